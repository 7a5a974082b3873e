//! Exact wire-format expectations: these tests pin the TOON text the encoder
//! emits and the strict/lenient behavior of the decoder, line for line.

use pretty_assertions::assert_eq;
use toonify::{
    decode, decode_with_options, encode, encode_with_options, toon, DecodeOptions, Delimiter,
    EncodeOptions, Error, Number, Value,
};

#[test]
fn test_object_format() {
    let value = toon!({"name": "Alice", "age": 30, "active": true});
    assert_eq!(encode(&value).unwrap(), "name: Alice\nage: 30\nactive: true");
}

#[test]
fn test_primitive_array_format() {
    assert_eq!(encode(&toon!([1, 2, 3, 4, 5])).unwrap(), "[5,]: 1,2,3,4,5");
    assert_eq!(
        encode(&toon!({"tags": ["php", "toon", "llm"]})).unwrap(),
        "tags[3,]: php,toon,llm"
    );
}

#[test]
fn test_tabular_array_format() {
    let value = toon!([
        {"id": 1, "name": "Roni"},
        {"id": 2, "name": "Phpi"}
    ]);
    assert_eq!(encode(&value).unwrap(), "[2,]{id,name}:\n  1,Roni\n  2,Phpi");
}

#[test]
fn test_named_tabular_format() {
    let value = toon!({
        "users": [
            {"id": 1, "name": "Roni Sommerfeld", "active": true},
            {"id": 2, "name": "PHPiando", "active": false}
        ]
    });
    assert_eq!(
        encode(&value).unwrap(),
        "users[2,]{id,name,active}:\n  1,Roni Sommerfeld,true\n  2,PHPiando,false"
    );
}

#[test]
fn test_tab_delimiter_format() {
    let value = toon!({"xs": [{"id": 1, "name": "Roni"}]});
    let options = EncodeOptions::new().with_delimiter(Delimiter::Tab);
    assert_eq!(
        encode_with_options(&value, &options).unwrap(),
        "xs[1\t]{id,name}:\n  1\tRoni"
    );
}

#[test]
fn test_pipe_delimiter_format() {
    let value = toon!([
        {"sku": "A1", "price": 9.99},
        {"sku": "B2", "price": 14.5}
    ]);
    let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
    assert_eq!(
        encode_with_options(&value, &options).unwrap(),
        "[2|]{sku,price}:\n  A1|9.99\n  B2|14.5"
    );
}

#[test]
fn test_pipe_delimiter_protects_commas() {
    let value = toon!({"items": ["a,b", "c|d", "plain"]});
    let options = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
    let toon = encode_with_options(&value, &options).unwrap();

    // Commas ride bare under a pipe delimiter; pipes are what get quoted.
    assert_eq!(toon, "items[3|]: a,b|\"c|d\"|plain");
    assert_eq!(decode(&toon).unwrap(), value);
}

#[test]
fn test_length_marker_format() {
    let options = EncodeOptions::new().with_length_marker("#");
    assert_eq!(
        encode_with_options(&toon!(["rust", "serde", "toon"]), &options).unwrap(),
        "[#3,]: rust,serde,toon"
    );

    let tabular = toon!({"xs": [{"id": 1}]});
    assert_eq!(
        encode_with_options(&tabular, &options).unwrap(),
        "xs[#1,]{id}:\n  1"
    );
    assert_eq!(decode("xs[#1,]{id}:\n  1").unwrap(), tabular);
}

#[test]
fn test_named_list_header_has_no_delimiter_symbol() {
    let value = toon!({"misc": [1, {"x": 2}]});
    assert_eq!(encode(&value).unwrap(), "misc[2]:\n  - 1\n  - x: 2");
}

#[test]
fn test_empty_array_format() {
    assert_eq!(encode(&toon!([])).unwrap(), "[0]:");
    assert_eq!(encode(&toon!({"xs": []})).unwrap(), "xs[0]:");
}

#[test]
fn test_quoting_rules() {
    let value = toon!({
        "with_comma": "a,b",
        "padded": " x ",
        "keyword": "true",
        "numeric": "123",
        "empty": "",
        "plain": "hello world"
    });
    assert_eq!(
        encode(&value).unwrap(),
        "with_comma: \"a,b\"\npadded: \" x \"\nkeyword: \"true\"\nnumeric: \"123\"\nempty: \"\"\nplain: hello world"
    );
}

#[test]
fn test_escape_sequences_format() {
    let value = toon!({"text": "line1\nline2\ttabbed \"q\""});
    assert_eq!(
        encode(&value).unwrap(),
        "text: \"line1\\nline2\\ttabbed \\\"q\\\"\""
    );
    assert_eq!(decode(&encode(&value).unwrap()).unwrap(), value);
}

#[test]
fn test_float_format_keeps_fraction() {
    let value = toon!({"whole": 2.0, "frac": 3.25});
    assert_eq!(encode(&value).unwrap(), "whole: 2.0\nfrac: 3.25");
}

#[test]
fn test_non_finite_floats_become_null() {
    let mut obj = toonify::ToonMap::new();
    obj.insert("nan".to_string(), Value::from(f64::NAN));
    obj.insert("inf".to_string(), Value::from(f64::INFINITY));
    assert_eq!(encode(&Value::Object(obj)).unwrap(), "nan: null\ninf: null");
}

#[test]
fn test_inline_list_object_format() {
    let value = toon!([{"id": 1, "name": "Alice"}, 7]);
    assert_eq!(encode(&value).unwrap(), "[2,]:\n  - id: 1, name: Alice\n  - 7");
}

#[test]
fn test_block_list_object_format() {
    let value = toon!([{
        "a": 1,
        "b": "two",
        "c": {"x": true},
        "d": 4
    }]);
    assert_eq!(
        encode(&value).unwrap(),
        "[1,]:\n  - a: 1\n    b: two\n    c:\n      x: true\n    d: 4"
    );
    assert_eq!(decode(&encode(&value).unwrap()).unwrap(), value);
}

#[test]
fn test_indent_width_format() {
    let value = toon!({"a": {"b": 1}});
    let options = EncodeOptions::new().with_indent(4);
    assert_eq!(encode_with_options(&value, &options).unwrap(), "a:\n    b: 1");
}

#[test]
fn test_strict_inline_count_mismatch() {
    assert!(matches!(decode("[3,]: 1,2"), Err(Error::Decode { .. })));
    assert!(matches!(decode("[1,]: 1,2"), Err(Error::Decode { .. })));
}

#[test]
fn test_strict_tabular_row_count() {
    // Too few rows.
    let err = decode("[2,]{id}:\n  1").unwrap_err();
    assert!(err.to_string().contains("row count mismatch"));

    // Too many rows.
    let err = decode("[1,]{id}:\n  1\n  2").unwrap_err();
    assert!(err.to_string().contains("row count mismatch"));
}

#[test]
fn test_strict_tabular_field_count() {
    let err = decode("[2,]{id,name}:\n  1\n  2,B").unwrap_err();
    assert!(err.to_string().contains("field count mismatch"));
}

#[test]
fn test_strict_list_count() {
    let err = decode("[2,]:\n  - 1").unwrap_err();
    assert!(err.to_string().contains("list count mismatch"));

    let err = decode("[1,]:\n  - 1\n  - 2").unwrap_err();
    assert!(err.to_string().contains("list count mismatch"));
}

#[test]
fn test_strict_continuation_violation() {
    let err = decode("[1,]:\n  - a: 1\n    ???").unwrap_err();
    assert!(err.to_string().contains("continuation"));
}

#[test]
fn test_lenient_accepts_short_collections() {
    let lenient = DecodeOptions::new().with_strict(false);

    assert_eq!(
        decode_with_options("[3,]: 1,2", &lenient).unwrap(),
        toon!([1, 2])
    );

    // Missing trailing fields fill with null.
    let value = decode_with_options("[2,]{id,name}:\n  1\n  2,B", &lenient).unwrap();
    assert_eq!(value, toon!([{"id": 1, "name": null}, {"id": 2, "name": "B"}]));

    // Excess rows truncate at the declared count.
    let value = decode_with_options("[1,]{id}:\n  1\n  2", &lenient).unwrap();
    assert_eq!(value, toon!([{"id": 1}]));

    // A malformed continuation ends the item instead of failing.
    let value = decode_with_options("[1,]:\n  - a: 1\n    ???", &lenient).unwrap();
    assert_eq!(value, toon!([{"a": 1}]));
}

#[test]
fn test_decoded_line_numbers() {
    match decode("xs[2,]{id}:\n  1,extra") {
        Err(Error::Decode { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected a decode error, got {other:?}"),
    }
}

#[test]
fn test_decode_header_without_delimiter_symbol() {
    // The delimiter symbol is optional in headers; comma is the default.
    assert_eq!(decode("[3]: 1,2,3").unwrap(), toon!([1, 2, 3]));
    assert_eq!(
        decode("[2]{id,name}:\n  1,A\n  2,B").unwrap(),
        toon!([{"id": 1, "name": "A"}, {"id": 2, "name": "B"}])
    );
}

#[test]
fn test_scalar_root_documents() {
    assert_eq!(encode(&Value::Null).unwrap(), "null");
    assert_eq!(decode("null").unwrap(), Value::Null);
    assert_eq!(decode("42").unwrap(), Value::Number(Number::Integer(42)));
    assert_eq!(
        decode("hello world").unwrap(),
        Value::String("hello world".to_string())
    );
}
