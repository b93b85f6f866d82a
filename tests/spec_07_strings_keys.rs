//! §4.1 QUOTING RULES — when a scalar string or key requires quoting, and
//! the fixed escape set used inside quoted strings.

use rstest::rstest;
use toon::{decode, decode_with_options, encode, encode_with_options, DecodeOptions, Delimiter, EncodeOptions, Value};

#[rstest]
#[case(Value::from(""), "v: \"\"")]
#[case(Value::from(" leading"), "v: \" leading\"")]
#[case(Value::from("trailing "), "v: \"trailing \"")]
#[case(Value::from("true"), "v: \"true\"")]
#[case(Value::from("05"), "v: \"05\"")]
#[case(Value::from("1e6"), "v: \"1e6\"")]
#[case(Value::from("a:b"), "v: \"a:b\"")]
#[case(Value::from("a[b]"), "v: \"a[b]\"")]
#[case(Value::from("a{b}"), "v: \"a{b}\"")]
#[case(Value::from("a,b"), "v: \"a,b\"")]
#[case(Value::from("-"), "v: \"-\"")]
#[case(Value::from("-lead"), "v: \"-lead\"")]
fn scalar_quoting_rule_fires_for_each_condition(#[case] value: Value, #[case] expected: &str) {
    let object = Value::object([("v", value)]);
    assert_eq!(encode(&object).unwrap(), expected);
}

#[rstest]
fn all_four_recognized_escapes_round_trip() {
    let object = Value::object([("v", Value::from("a\nb\rc\t\"d\"\\e"))]);
    let encoded = encode(&object).unwrap();
    assert_eq!(encoded, "v: \"a\\nb\\rc\\t\\\"d\\\"\\\\e\"");
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.get("v"), Some(&Value::from("a\nb\rc\t\"d\"\\e")));
}

#[rstest]
fn comma_only_needs_quoting_when_comma_is_the_active_delimiter() {
    let object = Value::object([("v", Value::from("a,b"))]);
    assert_eq!(encode(&object).unwrap(), "v: \"a,b\"");

    let opts = EncodeOptions::default().with_delimiter(Delimiter::Pipe);
    assert_eq!(encode_with_options(&object, &opts).unwrap(), "v: a,b");
}

#[rstest]
fn dotted_bareword_key_needs_no_quoting() {
    let object = Value::object([("a.b", Value::from(1))]);
    assert_eq!(encode(&object).unwrap(), "a.b: 1");
}

#[rstest]
fn key_with_a_hyphen_requires_quoting() {
    let object = Value::object([("a-b", Value::from(1))]);
    assert_eq!(encode(&object).unwrap(), "\"a-b\": 1");
}

#[rstest]
fn decode_rejects_unknown_escape_sequence() {
    assert!(decode("v: \"\\q\"").is_err());
}

#[rstest]
fn decode_accepts_quoted_key_with_hyphen() {
    let value = decode("\"a-b\": 1").unwrap();
    assert_eq!(value.get("a-b"), Some(&Value::from("1")));
}

#[rstest]
fn decode_accepts_dotted_bareword_key() {
    let value = decode("a.b: 1").unwrap();
    assert_eq!(value.get("a.b"), Some(&Value::from("1")));
}

#[rstest]
fn decode_rejects_unquoted_invalid_bareword_key_in_strict_mode() {
    let opts = DecodeOptions::default().with_strict(true);
    assert!(decode_with_options("a-b: 1", &opts).is_err());
}

#[rstest]
fn decode_rejects_a_line_with_no_colon_at_all() {
    // A lone line with no colon is read as a root scalar, so the
    // missing-colon error only surfaces once a second line commits the
    // document to object parsing.
    assert!(decode("key value\nb: 2").is_err());
}
