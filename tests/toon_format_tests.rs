//! Tree-level codec tests: literal encoded output, shape selection,
//! strict/lax decoding, and error reporting.

use toon_codec::{decode, encode, toon, Delimiter, ToonOptions, Value};

fn opts() -> ToonOptions {
    ToonOptions::new()
}

fn lax() -> ToonOptions {
    ToonOptions::lax()
}

fn round_trip(value: &Value) {
    let text = encode(value, &opts()).unwrap();
    let back = decode(&text, &opts()).unwrap();
    assert_eq!(&back, value, "round trip through:\n{}", text);
}

#[test]
fn simple_object() {
    let tree = toon!({ "id": 123, "name": "Ada", "active": true });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "id: 123\nname: Ada\nactive: true");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn nested_object() {
    let tree = toon!({ "user": { "id": 123, "name": "Ada" } });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "user:\n  id: 123\n  name: Ada");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn primitive_array_is_inline() {
    let tree = toon!({ "tags": ["admin", "ops", "dev"] });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "tags[3]: admin,ops,dev");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn uniform_records_are_tabular() {
    let tree = toon!({
        "items": [
            { "sku": "A1", "qty": 2, "price": 9.99 },
            { "sku": "B2", "qty": 1, "price": 14.5 }
        ]
    });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "items[2]{sku,qty,price}:\n  A1,2,9.99\n  B2,1,14.5");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn pipe_delimiter_with_length_marker() {
    let options = ToonOptions::new()
        .with_delimiter(Delimiter::Pipe)
        .with_length_marker(true);
    let tree = toon!({ "tags": ["a", "b"] });
    let text = encode(&tree, &options).unwrap();
    assert_eq!(text, "tags[#2|]: a|b");
    // the header declares its own delimiter, so default options decode it too
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn tab_delimiter_headers_are_self_describing() {
    let options = ToonOptions::new().with_delimiter(Delimiter::Tab);
    let tree = toon!({ "tags": ["x", "y"] });
    let text = encode(&tree, &options).unwrap();
    assert_eq!(text, "tags[2\t]: x\ty");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn strict_count_mismatch_fails_at_header_line() {
    let err = decode("tags[3]: admin,ops", &opts()).unwrap_err();
    assert_eq!(err.line(), Some(1));

    let value = decode("tags[3]: admin,ops", &lax()).unwrap();
    assert_eq!(value, toon!({ "tags": ["admin", "ops"] }));
}

#[test]
fn special_characters_are_quoted_and_restored() {
    let tree = toon!({
        "colon": "a:b",
        "comma": "a,b",
        "newline": "a\nb",
        "empty": ""
    });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(
        text,
        "colon: \"a:b\"\ncomma: \"a,b\"\nnewline: \"a\\nb\"\nempty: \"\""
    );
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn ambiguous_strings_stay_strings() {
    let tree = toon!({
        "boolean_like": "true",
        "number_like": "42",
        "zip": "01234",
        "negative": "-5",
        "padded": " padded "
    });
    let text = encode(&tree, &opts()).unwrap();
    assert!(text.contains("\"true\""));
    assert!(text.contains("\"42\""));
    assert!(text.contains("\"01234\""));
    assert!(text.contains("\"-5\""));
    assert!(text.contains("\" padded \""));
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn leading_zero_numbers_decode_as_strings() {
    let value = decode("zip: 01234\nneg: -007", &lax()).unwrap();
    assert_eq!(value, toon!({ "zip": "01234", "neg": "-007" }));
}

#[test]
fn exponent_input_is_accepted_but_never_emitted() {
    let value = decode("n: 1e6", &opts()).unwrap();
    assert_eq!(value, toon!({ "n": 1000000.0 }));
    let text = encode(&value, &opts()).unwrap();
    assert_eq!(text, "n: 1000000");

    let big = toon!({ "big": 1e21 });
    let text = encode(&big, &opts()).unwrap();
    assert_eq!(text, "big: 1000000000000000000000");
}

#[test]
fn non_finite_numbers_encode_as_null() {
    let tree = toon!({ "a": (f64::NAN), "b": (f64::INFINITY) });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "a: null\nb: null");
}

#[test]
fn negative_zero_folds_to_zero() {
    let text = encode(&toon!({ "n": (-0.0) }), &opts()).unwrap();
    assert_eq!(text, "n: 0");
}

#[test]
fn empty_collections() {
    let tree = toon!({ "list": [], "obj": {} });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "list[0]:\nobj:");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn empty_array_followed_by_more_fields() {
    let value = decode("tags[0]:\nnext: 1", &opts()).unwrap();
    assert_eq!(value, toon!({ "tags": [], "next": 1 }));
}

#[test]
fn expanded_list_mixed_items() {
    let tree = toon!({ "mixed": [1, { "name": "Ada", "role": "admin" }, "text"] });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "mixed[3]:\n  - 1\n  - name: Ada\n  role: admin\n  - text");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn list_item_with_nested_structures() {
    let tree = toon!({
        "entries": [
            { "meta": { "depth": 2 }, "tags": ["a", "b"] },
            [1, [2, 3]]
        ]
    });
    round_trip(&tree);
}

#[test]
fn root_values() {
    assert_eq!(decode("42", &opts()).unwrap(), toon!(42));
    assert_eq!(decode("hello world", &opts()).unwrap(), toon!("hello world"));
    assert_eq!(decode("\"a:b\"", &opts()).unwrap(), toon!("a:b"));
    assert_eq!(decode("null", &opts()).unwrap(), Value::Null);
    assert_eq!(decode("[3]: 1,2,3", &opts()).unwrap(), toon!([1, 2, 3]));
    assert_eq!(
        decode("[2]{a}:\n  1\n  2", &opts()).unwrap(),
        toon!([{ "a": 1 }, { "a": 2 }])
    );
}

#[test]
fn root_round_trips() {
    round_trip(&toon!("plain"));
    round_trip(&toon!(""));
    round_trip(&toon!(3.25));
    round_trip(&Value::Null);
    round_trip(&toon!([1, "two", null, true]));
    round_trip(&toon!([[1, 2], [3]]));
    round_trip(&toon!([{ "a": 1 }, { "b": 2 }]));
}

#[test]
fn bracket_text_that_is_not_a_header_stays_text() {
    // no unquoted `]:`, so the root-primitive branch applies
    assert_eq!(decode("[abc]", &opts()).unwrap(), toon!("[abc]"));
    assert_eq!(decode("[abc", &opts()).unwrap(), toon!("[abc"));
    // same cascade for expanded-list items
    assert_eq!(
        decode("t[1]:\n  - [abc]", &opts()).unwrap(),
        toon!({ "t": ["[abc]"] })
    );
}

#[test]
fn tabular_with_null_cells() {
    let tree = toon!({ "rows": [{ "x": 1, "y": null }, { "x": 2, "y": 3 }] });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "rows[2]{x,y}:\n  1,null\n  2,3");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn quoted_keys() {
    let tree = toon!({ "user-id": 7, "2nd": "place", "": "empty key" });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(
        text,
        "\"user-id\": 7\n\"2nd\": place\n\"\": \"empty key\""
    );
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn quoted_key_with_array_value() {
    let tree = toon!({ "my-tags": ["x", "y"] });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "\"my-tags\"[2]: x,y");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn quoted_values_with_delimiters_inside_arrays() {
    let tree = toon!({ "cells": ["a,b", "plain", "x:y"] });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "cells[3]: \"a,b\",plain,\"x:y\"");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn other_delimiters_do_not_force_quotes() {
    let tree = toon!({ "v": "a|b" });
    let text = encode(&tree, &opts()).unwrap();
    assert_eq!(text, "v: a|b");
    assert_eq!(decode(&text, &opts()).unwrap(), tree);
}

#[test]
fn document_delimiter_applies_to_bare_headers() {
    let options = ToonOptions::new().with_delimiter(Delimiter::Pipe);
    let value = decode("tags[2]: a|b", &options).unwrap();
    assert_eq!(value, toon!({ "tags": ["a", "b"] }));
}

#[test]
fn crlf_input_is_normalized() {
    let value = decode("a: 1\r\nb: 2", &opts()).unwrap();
    assert_eq!(value, toon!({ "a": 1, "b": 2 }));
}

#[test]
fn empty_input() {
    let err = decode("", &opts()).unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert_eq!(decode("", &lax()).unwrap(), toon!({}));
    assert_eq!(decode("\n\n", &lax()).unwrap(), toon!({}));
}

#[test]
fn first_line_must_be_at_depth_zero() {
    let err = decode("  x: 1", &opts()).unwrap_err();
    assert_eq!(err.line(), Some(1));
}

#[test]
fn duplicate_keys_are_rejected_in_both_modes() {
    let err = decode("a: 1\na: 2", &opts()).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(decode("a: 1\na: 2", &lax()).is_err());
}

#[test]
fn indentation_errors() {
    // not a multiple of the indent size
    let err = decode("a:\n   b: 1", &opts()).unwrap_err();
    assert_eq!(err.line(), Some(2));

    // tab in indentation is strict-only
    assert!(decode("a:\n\tb: 1", &opts()).is_err());
    let value = decode("a:\n\tb: 1", &lax()).unwrap();
    assert_eq!(value, toon!({ "a": { "b": 1 } }));
}

#[test]
fn depth_jump_is_a_strict_error() {
    let err = decode("a:\n    b: 1", &opts()).unwrap_err();
    assert_eq!(err.line(), Some(2));
    let value = decode("a:\n    b: 1", &lax()).unwrap();
    assert_eq!(value, toon!({ "a": { "b": 1 } }));
}

#[test]
fn missing_colon_is_a_strict_error() {
    let err = decode("a: 1\njust text", &opts()).unwrap_err();
    assert_eq!(err.line(), Some(2));
    assert!(decode("a: 1\njust text", &lax()).is_ok());
}

#[test]
fn unterminated_string_is_fatal_in_both_modes() {
    assert!(decode("a: \"unterminated", &opts()).is_err());
    assert!(decode("a: \"unterminated", &lax()).is_err());
}

#[test]
fn invalid_escape_is_strict_only() {
    let err = decode("a: \"x\\qy\"", &opts()).unwrap_err();
    assert_eq!(err.line(), Some(1));
    let value = decode("a: \"x\\qy\"", &lax()).unwrap();
    assert_eq!(value, toon!({ "a": "x\\qy" }));
}

#[test]
fn malformed_headers_are_fatal_in_both_modes() {
    assert!(decode("tags[x]: a", &opts()).is_err());
    assert!(decode("tags[x]: a", &lax()).is_err());
    assert!(decode("tags[1]x: a", &lax()).is_err());
}

#[test]
fn invalid_unquoted_key_is_strict_only() {
    assert!(decode("my key: 1", &opts()).is_err());
    let value = decode("my key: 1", &lax()).unwrap();
    assert_eq!(value, toon!({ "my key": 1 }));
}

#[test]
fn blank_line_inside_array_body() {
    let input = "t[2]:\n  - a\n\n  - b";
    let err = decode(input, &opts()).unwrap_err();
    assert_eq!(err.line(), Some(3));
    assert_eq!(decode(input, &lax()).unwrap(), toon!({ "t": ["a", "b"] }));
}

#[test]
fn tabular_row_width_mismatch() {
    let input = "t[2]{a,b}:\n  1,2\n  3";
    let err = decode(input, &opts()).unwrap_err();
    assert_eq!(err.line(), Some(3));
    // lax pads missing trailing cells with null
    assert_eq!(
        decode(input, &lax()).unwrap(),
        toon!({ "t": [{ "a": 1, "b": 2 }, { "a": 3, "b": null }] })
    );
}

#[test]
fn expanded_count_mismatch_is_strict_only() {
    let input = "t[3]:\n  - a\n  - b";
    let err = decode(input, &opts()).unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert_eq!(decode(input, &lax()).unwrap(), toon!({ "t": ["a", "b"] }));
}

#[test]
fn length_marker_is_inert_on_decode() {
    assert_eq!(decode("[#3]: 1,2,3", &opts()).unwrap(), toon!([1, 2, 3]));
    assert_eq!(
        decode("tags[#2]: a,b", &opts()).unwrap(),
        toon!({ "tags": ["a", "b"] })
    );
}

#[test]
fn blank_lines_between_object_fields_are_ignored() {
    let value = decode("a: 1\n\nb: 2", &opts()).unwrap();
    assert_eq!(value, toon!({ "a": 1, "b": 2 }));
}

#[test]
fn no_trailing_newline_and_indentation_law() {
    let tree = toon!({
        "a": { "b": { "c": [1, 2] } },
        "rows": [{ "x": 1 }, { "x": 2 }]
    });
    let text = encode(&tree, &opts()).unwrap();
    assert!(!text.ends_with('\n'));
    for line in text.lines() {
        let spaces = line.len() - line.trim_start_matches(' ').len();
        assert_eq!(spaces % 2, 0, "bad indent in line: {:?}", line);
        assert!(!line.starts_with('\t'));
    }
}

#[test]
fn idempotent_decode() {
    let input = "user:\n  name: Ada\n  tags[2]: a,b\nitems[2]{x,y}:\n  1,2\n  3,4";
    let first = decode(input, &opts()).unwrap();
    let re_encoded = encode(&first, &opts()).unwrap();
    let second = decode(&re_encoded, &opts()).unwrap();
    assert_eq!(first, second);
}
