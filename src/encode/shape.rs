//! Chooses how an array is rendered: empty, inline primitives, an array of
//! primitive arrays, tabular, or the expanded-list fallback.
//!
//! The decision looks only at the array's direct children (spec §4.4's
//! "shape detection vs. recursion" rule) and checks the five shapes in
//! order, first match wins.

use smol_str::SmolStr;

use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Shape<'a> {
    /// `xs = []`.
    Empty,
    /// Every element is a primitive.
    InlinePrimitive(&'a [Value]),
    /// Every element is an `Array` containing only primitives.
    PrimitiveArrays(&'a [Value]),
    /// Every element is an `Object`, all share the same key set (order from
    /// the first element), and every value is a primitive.
    Tabular {
        fields: Vec<SmolStr>,
        rows: &'a [Value],
    },
    /// Fallback: one list item per element.
    ExpandedList(&'a [Value]),
}

pub(crate) fn detect(xs: &[Value]) -> Shape<'_> {
    if xs.is_empty() {
        return Shape::Empty;
    }
    if xs.iter().all(Value::is_primitive) {
        return Shape::InlinePrimitive(xs);
    }
    if xs.iter().all(is_primitive_array) {
        return Shape::PrimitiveArrays(xs);
    }
    if let Some(fields) = tabular_fields(xs) {
        return Shape::Tabular { fields, rows: xs };
    }
    Shape::ExpandedList(xs)
}

fn is_primitive_array(v: &Value) -> bool {
    matches!(v, Value::Array(items) if items.iter().all(Value::is_primitive))
}

/// If every element of `xs` is an `Object`, all sharing the same set of
/// keys (order taken from the first element) with every value a primitive,
/// return that key order. Otherwise `None`.
fn tabular_fields(xs: &[Value]) -> Option<Vec<SmolStr>> {
    let Value::Object(first) = &xs[0] else {
        return None;
    };
    let field_order: Vec<SmolStr> = first.iter().map(|(k, _)| k.clone()).collect();
    if field_order.is_empty() {
        return None;
    }

    for item in xs {
        let Value::Object(entries) = item else {
            return None;
        };
        if entries.len() != field_order.len() {
            return None;
        }
        for field in &field_order {
            let value = entries
                .iter()
                .find(|(k, _)| k == field)
                .map(|(_, v)| v)?;
            if !value.is_primitive() {
                return None;
            }
        }
    }

    Some(field_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_detect_empty() {
        assert_eq!(detect(&[]), Shape::Empty);
    }

    #[rstest::rstest]
    fn test_detect_inline_primitive() {
        let xs = vec![Value::from(1), Value::from("two"), Value::Bool(true)];
        assert!(matches!(detect(&xs), Shape::InlinePrimitive(_)));
    }

    #[rstest::rstest]
    fn test_detect_primitive_arrays() {
        let xs = vec![
            Value::Array(vec![Value::from(1), Value::from(2)]),
            Value::Array(vec![Value::from(3), Value::from(4)]),
        ];
        assert!(matches!(detect(&xs), Shape::PrimitiveArrays(_)));
    }

    #[rstest::rstest]
    fn test_detect_tabular() {
        let xs = vec![
            Value::object([("name", Value::from("Alice")), ("age", Value::from(30))]),
            Value::object([("name", Value::from("Bob")), ("age", Value::from(25))]),
        ];
        match detect(&xs) {
            Shape::Tabular { fields, .. } => {
                assert_eq!(fields, vec![SmolStr::new("name"), SmolStr::new("age")]);
            }
            other => panic!("expected Tabular, got {other:?}"),
        }
    }

    #[rstest::rstest]
    fn test_detect_tabular_rejects_mismatched_keys() {
        let xs = vec![
            Value::object([("name", Value::from("Alice"))]),
            Value::object([("age", Value::from(25))]),
        ];
        assert!(matches!(detect(&xs), Shape::ExpandedList(_)));
    }

    #[rstest::rstest]
    fn test_detect_tabular_rejects_nested_value() {
        let xs = vec![
            Value::object([("items", Value::Array(vec![Value::from(1)]))]),
            Value::object([("items", Value::Array(vec![Value::from(2)]))]),
        ];
        assert!(matches!(detect(&xs), Shape::ExpandedList(_)));
    }

    #[rstest::rstest]
    fn test_detect_expanded_list_fallback() {
        let xs = vec![
            Value::from("item1"),
            Value::from(42),
            Value::object([("key", Value::from("value"))]),
        ];
        assert!(matches!(detect(&xs), Shape::ExpandedList(_)));
    }
}
