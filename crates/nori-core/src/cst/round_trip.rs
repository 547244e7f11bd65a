//! Round-trip validation: parse then stringify must reproduce the source
//!
//! The whole point of carrying trivia on every node is that an unmodified
//! tree prints back byte-for-byte. These tests pin that law over the corpus
//! of document shapes the grammar accepts.

use super::{parse, stringify};

fn assert_round_trip(source: &str) {
    let tree = parse(source).expect(source);
    let printed = stringify(&tree).expect(source);
    assert_eq!(printed, source, "round trip failed for {source:?}");
}

#[test]
fn basic() {
    assert_round_trip(r#"{"test": true}"#);
}

#[test]
fn before_whitespace() {
    assert_round_trip(r#"{    "test": true}"#);
}

#[test]
fn after_whitespace() {
    assert_round_trip(r#"{"test": true     }"#);
}

#[test]
fn lines() {
    assert_round_trip("{\n      \"test\": true\n    }");
}

#[test]
fn number() {
    assert_round_trip(r#"{"test": 7.9e2}"#);
}

#[test]
fn positive_number() {
    assert_round_trip(r#"{"test": +1}"#);
}

#[test]
fn negative_number() {
    assert_round_trip(r#"{"test": -6.9e-2}"#);
}

#[test]
fn null_value() {
    assert_round_trip(r#"{"testtttt": null}"#);
}

#[test]
fn nested() {
    assert_round_trip(r#"{"test1":{"test2":false}}"#);
}

#[test]
fn array() {
    assert_round_trip(r#"{"test4":[1, null, "hi!", 8942]}"#);
}

#[test]
fn escapes() {
    assert_round_trip(r#"{"test":"te\"st"}"#);
}

#[test]
fn line_comment() {
    assert_round_trip("{\"test\": // comment!\n4}");
}

#[test]
fn block_comment() {
    assert_round_trip(r#"{"test": /* comment 2! */ 6}"#);
}

#[test]
fn ending_comment() {
    assert_round_trip(r#"{"test":true}/* comment 3! */"#);
}

#[test]
fn multiple_properties() {
    assert_round_trip(r#"{"test1":true,"test2":false,"test3":null}"#);
}

#[test]
fn crlf_lines() {
    assert_round_trip("{\r\n\t\"test\": true\r\n}");
}

#[test]
fn duplicate_keys() {
    assert_round_trip(r#"{"test":1,"test":2}"#);
}

#[test]
fn trailing_comma() {
    assert_round_trip(r#"{"a":1,}"#);
}

#[test]
fn commented_config_document() {
    assert_round_trip(
        "{\n  // connection settings\n  \"host\": \"localhost\",\n  \"port\": 8080, // default\n  /* feature\n     switches */\n  \"flags\": {\n    \"fast\": true,\n    \"safe\": false\n  },\n  \"weights\": [1, 2.5, -3e1, +4]\n}\n",
    );
}

#[test]
fn deeply_nested_mixed_document() {
    assert_round_trip(
        "{\"a\":{\"b\":[{\"c\":null}, [1,2], \"x\"]},\"d\":[[],{}],\"e\":\"\\\\\"}",
    );
}

#[test]
fn stringify_is_reentrant() {
    let source = "{\n  \"test\": [1, 2] // twice\n}";
    let tree = parse(source).expect("valid input");
    assert_eq!(stringify(&tree).unwrap(), source);
    assert_eq!(stringify(&tree).unwrap(), source);
}
