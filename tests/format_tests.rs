//! Exact textual format checks: what encodes to which bytes, and what those
//! bytes parse back into.

use toon::{parse, to_string, to_string_with_options, toon, EncodeOptions, Error, Value};

#[test]
fn scalar_encoding() {
    assert_eq!(to_string(&Value::Null).unwrap(), "null");
    assert_eq!(to_string(&true).unwrap(), "true");
    assert_eq!(to_string(&42).unwrap(), "42");
    assert_eq!(to_string(&3.5).unwrap(), "3.5");
    assert_eq!(to_string("hello").unwrap(), "hello");
}

#[test]
fn integral_floats_encode_without_fraction() {
    assert_eq!(to_string(&2.0f64).unwrap(), "2");
    assert_eq!(to_string(&-10.0f64).unwrap(), "-10");
}

#[test]
fn strings_quote_only_when_ambiguous() {
    assert_eq!(to_string("hello world").unwrap(), "hello world");
    assert_eq!(to_string("null").unwrap(), "\"null\"");
    assert_eq!(to_string("true").unwrap(), "\"true\"");
    assert_eq!(to_string("false").unwrap(), "\"false\"");
    assert_eq!(to_string("").unwrap(), "\"\"");
    assert_eq!(to_string("3.14").unwrap(), "\"3.14\"");
    assert_eq!(to_string("a, b").unwrap(), "\"a, b\"");
    assert_eq!(to_string("x: y").unwrap(), "\"x: y\"");
    assert_eq!(to_string("#tag").unwrap(), "\"#tag\"");
    assert_eq!(to_string("a\nb").unwrap(), "\"a\\nb\"");
    // Numeric-looking text that is not a number stays bare.
    assert_eq!(to_string("1.2.3").unwrap(), "1.2.3");
    assert_eq!(to_string("v2").unwrap(), "v2");
}

#[test]
fn empty_array_form() {
    assert_eq!(to_string(&Vec::<i32>::new()).unwrap(), "[0]:");
    assert_eq!(parse("[0]:").unwrap(), Value::Array(vec![]));
}

#[test]
fn inline_array_form() {
    assert_eq!(to_string(&vec![1, 2, 3]).unwrap(), "[3]: 1, 2, 3");
    assert_eq!(parse("[3]: 1, 2, 3").unwrap(), toon!([1, 2, 3]));
}

#[test]
fn tabular_array_form() {
    let rows = toon!([{"x": 1, "y": 2}, {"x": 3, "y": 4}]);
    let text = to_string(&rows).unwrap();
    assert_eq!(text, "[{x, y}]:\n  1, 2\n  3, 4");
    assert_eq!(parse(&text).unwrap(), rows);
}

#[test]
fn mixed_key_sets_fall_back_to_inline() {
    let rows = toon!([{"x": 1}, {"y": 2}]);
    assert!(to_string(&rows).unwrap().starts_with("[2]: "));
}

#[test]
fn object_keys_sort() {
    let doc = toon!({"zeta": 1, "alpha": 2});
    assert_eq!(to_string(&doc).unwrap(), "alpha: 2\nzeta: 1");
}

#[test]
fn nested_objects_indent_two_spaces() {
    let doc = toon!({"server": {"host": "localhost", "port": 8080}});
    assert_eq!(
        to_string(&doc).unwrap(),
        "server: \n  host: localhost\n  port: 8080"
    );
}

#[test]
fn custom_indent_width() {
    let doc = toon!({"a": {"b": 1}});
    let text = to_string_with_options(&doc, EncodeOptions::new().with_indent(4)).unwrap();
    assert_eq!(text, "a: \n    b: 1");
    // Width is cosmetic; the document still parses to the same tree.
    assert_eq!(parse(&text).unwrap(), doc);
}

#[test]
fn parse_flat_object() {
    let doc = parse("name: Alice\nage: 30\n").unwrap();
    assert_eq!(doc, toon!({"age": 30, "name": "Alice"}));
    assert!(doc["name"].is_string());
    assert!(doc["age"].is_number());
}

#[test]
fn parse_comments_and_blank_lines() {
    let text = "# generated\n\nname: Alice\n\n# section\nage: 30\n";
    let doc = parse(text).unwrap();
    assert_eq!(doc, toon!({"age": 30, "name": "Alice"}));
}

#[test]
fn parse_unicode_escape() {
    assert_eq!(parse("\"\\u00e9\"").unwrap(), Value::from("é"));
}

#[test]
fn parse_unterminated_string_fails() {
    assert!(matches!(
        parse("\"abc"),
        Err(Error::UnterminatedString { .. })
    ));
}

#[test]
fn non_finite_floats_encode_as_null() {
    assert_eq!(to_string(&f64::NAN).unwrap(), "null");
    assert_eq!(to_string(&f64::INFINITY).unwrap(), "null");
}

#[test]
fn deep_nesting_round_trips() {
    let doc = toon!({
        "a": {"b": {"c": {"d": 1}}},
        "z": 2
    });
    let text = to_string(&doc).unwrap();
    assert_eq!(parse(&text).unwrap(), doc);
}

#[test]
fn tabular_rows_with_string_cells() {
    let rows = toon!([
        {"name": "Widget", "price": 9.99},
        {"name": "Gadget", "price": 14.99}
    ]);
    let text = to_string(&rows).unwrap();
    assert_eq!(text, "[{name, price}]:\n  Widget, 9.99\n  Gadget, 14.99");
    assert_eq!(parse(&text).unwrap(), rows);
}

#[test]
fn tabular_rows_with_quoted_cells() {
    let rows = toon!([
        {"msg": "a, b"},
        {"msg": "plain"}
    ]);
    let text = to_string(&rows).unwrap();
    assert_eq!(text, "[{msg}]:\n  \"a, b\"\n  plain");
    assert_eq!(parse(&text).unwrap(), rows);
}

#[test]
fn encode_parse_encode_is_stable() {
    let docs = [
        toon!({"a": 1, "b": [2, 3], "c": {"d": "text"}}),
        toon!([{"x": 1, "y": 2}, {"x": 3, "y": 4}]),
        toon!([1, "two", null, true]),
        toon!({"empty": [], "n": 5}),
    ];
    for doc in docs {
        let once = to_string(&doc).unwrap();
        let twice = to_string(&parse(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn empty_input_parses_to_null() {
    assert_eq!(parse("").unwrap(), Value::Null);
    assert_eq!(parse("  \n# nothing here\n").unwrap(), Value::Null);
}
