//! Format-level tests: exact text shapes produced by the encoder and
//! accepted by the decoder.

use serde_pyon::{
    decode, encode, encode_with_options, normalize, remove_spaces, to_json, to_json_fast, pyon,
    EncodeOptions, Value,
};

#[test]
fn test_encode_primitives() {
    assert_eq!(encode(&Value::None), "None");
    assert_eq!(encode(&Value::Bool(true)), "True");
    assert_eq!(encode(&Value::Bool(false)), "False");
    assert_eq!(encode(&Value::Int(0)), "0");
    assert_eq!(encode(&Value::Int(-42)), "-42");
    assert_eq!(encode(&Value::Int(i64::MAX)), "9223372036854775807");
}

#[test]
fn test_encode_floats() {
    // floats always carry a decimal point or an exponent
    assert_eq!(encode(&Value::Float(1.0)), "1.0");
    assert_eq!(encode(&Value::Float(-0.0)), "-0.0");
    assert_eq!(encode(&Value::Float(0.1)), "0.1");
    assert_eq!(encode(&Value::Float(100.0)), "100.0");
    assert_eq!(encode(&Value::Float(1e300)), "1e300");
    assert_eq!(encode(&Value::Float(1e-5)), "1e-5");
    assert_eq!(encode(&Value::Float(2.5e-10)), "2.5e-10");

    assert_eq!(encode(&Value::Float(f64::INFINITY)), "inf");
    assert_eq!(encode(&Value::Float(f64::NEG_INFINITY)), "-inf");
    assert_eq!(encode(&Value::Float(f64::NAN)), "nan");
}

#[test]
fn test_encode_strings() {
    assert_eq!(encode(&Value::Str("hello".to_string())), "'hello'");
    assert_eq!(encode(&Value::Str(String::new())), "''");
    assert_eq!(encode(&Value::Str("it's".to_string())), r"'it\'s'");
    assert_eq!(encode(&Value::Str("a\nb".to_string())), r"'a\nb'");
    assert_eq!(encode(&Value::Str("a\tb".to_string())), r"'a\tb'");
    assert_eq!(encode(&Value::Str("a\\b".to_string())), r"'a\\b'");
    // double quotes need no escape inside single quotes
    assert_eq!(encode(&Value::Str("a\"b".to_string())), "'a\"b'");
    // other control characters use \xNN
    assert_eq!(encode(&Value::Str("\u{7}".to_string())), r"'\x07'");
    assert_eq!(encode(&Value::Str("\u{7f}".to_string())), r"'\x7f'");
    // non-ASCII passes through unescaped
    assert_eq!(encode(&Value::Str("héllo".to_string())), "'héllo'");
}

#[test]
fn test_encode_containers() {
    assert_eq!(encode(&Value::List(vec![])), "[]");
    assert_eq!(encode(&Value::Tuple(vec![])), "()");
    assert_eq!(encode(&Value::set([])), "set()");
    assert_eq!(encode(&pyon!({})), "{}");

    assert_eq!(encode(&pyon!([1, 2, 3])), "[1, 2, 3]");
    assert_eq!(encode(&pyon!((1, 2))), "(1, 2)");
    // single-element tuples keep the trailing comma
    assert_eq!(encode(&Value::Tuple(vec![Value::Int(1)])), "(1,)");
    assert_eq!(encode(&pyon!({1, 2, 3})), "{1, 2, 3}");
    assert_eq!(encode(&pyon!({"a": 1, "b": 2})), "{'a': 1, 'b': 2}");
    assert_eq!(
        encode(&pyon!({"a": [1, (2,)], "b": {"c": None}})),
        "{'a': [1, (2,)], 'b': {'c': None}}"
    );
}

#[test]
fn test_decode_quote_styles() {
    assert_eq!(decode("'hi'").unwrap(), Value::Str("hi".to_string()));
    assert_eq!(decode("\"hi\"").unwrap(), Value::Str("hi".to_string()));
    assert_eq!(decode("\"don't\"").unwrap(), Value::Str("don't".to_string()));
    assert_eq!(decode(r#"'say "hi"'"#).unwrap(), Value::Str("say \"hi\"".to_string()));
}

#[test]
fn test_decode_escapes() {
    assert_eq!(decode(r"'\n'").unwrap(), Value::Str("\n".to_string()));
    assert_eq!(decode(r"'\r'").unwrap(), Value::Str("\r".to_string()));
    assert_eq!(decode(r"'\t'").unwrap(), Value::Str("\t".to_string()));
    assert_eq!(decode(r"'\a'").unwrap(), Value::Str("\u{7}".to_string()));
    assert_eq!(decode(r"'\b'").unwrap(), Value::Str("\u{8}".to_string()));
    assert_eq!(decode(r"'\f'").unwrap(), Value::Str("\u{c}".to_string()));
    assert_eq!(decode(r"'\v'").unwrap(), Value::Str("\u{b}".to_string()));
    assert_eq!(decode(r"'\0'").unwrap(), Value::Str("\0".to_string()));
    assert_eq!(decode(r"'\\'").unwrap(), Value::Str("\\".to_string()));
    assert_eq!(decode(r"'\''").unwrap(), Value::Str("'".to_string()));
    assert_eq!(decode(r#"'\"'"#).unwrap(), Value::Str("\"".to_string()));

    assert_eq!(decode(r"'\x41'").unwrap(), Value::Str("A".to_string()));
    assert_eq!(decode(r"'\xff'").unwrap(), Value::Str("\u{ff}".to_string()));
    assert_eq!(decode(r"'A'").unwrap(), Value::Str("A".to_string()));
    assert_eq!(
        decode(r"'\U0001F600'").unwrap(),
        Value::Str("\u{1f600}".to_string())
    );

    // unknown escapes are preserved literally
    assert_eq!(decode(r"'\q'").unwrap(), Value::Str("\\q".to_string()));
    assert_eq!(decode(r"'\d+'").unwrap(), Value::Str("\\d+".to_string()));

    assert!(decode(r"'\xGG'").is_err());
    assert!(decode(r"'\uD800'").is_err());
}

#[test]
fn test_decode_whitespace_and_commas() {
    assert_eq!(
        decode("  { 'a' :  1 , 'b' : [ 2 ,3 ] }  ").unwrap(),
        pyon!({"a": 1, "b": [2, 3]})
    );

    // trailing commas are accepted everywhere
    assert_eq!(decode("[1, 2,]").unwrap(), pyon!([1, 2]));
    assert_eq!(decode("(1, 2,)").unwrap(), pyon!((1, 2)));
    assert_eq!(decode("{1, 2,}").unwrap(), pyon!({1, 2}));
    assert_eq!(decode("{'a': 1,}").unwrap(), pyon!({"a": 1}));

    assert!(decode("[,]").is_err());
    assert!(decode("[1,,2]").is_err());
}

#[test]
fn test_decode_tuples_and_parens() {
    assert_eq!(decode("()").unwrap(), Value::Tuple(vec![]));
    assert_eq!(decode("(1,)").unwrap(), Value::Tuple(vec![Value::Int(1)]));
    // no comma means a parenthesized value, not a tuple
    assert_eq!(decode("(1)").unwrap(), Value::Int(1));
    assert_eq!(decode("('x')").unwrap(), Value::Str("x".to_string()));
    assert_eq!(decode("((1, 2))").unwrap(), pyon!((1, 2)));
    assert_eq!(
        decode("((1,),)").unwrap(),
        Value::Tuple(vec![Value::Tuple(vec![Value::Int(1)])])
    );
}

#[test]
fn test_decode_sets() {
    assert_eq!(decode("set()").unwrap(), Value::set([]));
    assert_eq!(decode("set( )").unwrap(), Value::set([]));
    // {} is always the empty dict, never a set
    assert_eq!(decode("{}").unwrap(), pyon!({}));
    assert_eq!(decode("{1, 2, 3}").unwrap(), pyon!({1, 2, 3}));
    // duplicate members collapse
    assert_eq!(decode("{1, 1, 2}").unwrap(), pyon!({1, 2}));

    assert!(decode("set").is_err());
    assert!(decode("set(1, 2)").is_err());
    assert!(decode("{[1], 2}").is_err());
}

#[test]
fn test_decode_keywords_need_boundaries() {
    assert_eq!(decode("True").unwrap(), Value::Bool(true));
    assert_eq!(decode("None").unwrap(), Value::None);
    assert!(decode("Truex").is_err());
    assert!(decode("None2").is_err());
    assert!(decode("infinity").is_err());
    assert!(decode("true").is_err());
    assert!(decode("null").is_err());
}

#[test]
fn test_pretty_output() {
    let value = pyon!({"name": "Alice", "scores": [95, 87, 92]});
    let options = EncodeOptions::new().with_indent(4).with_width(20);

    let text = encode_with_options(&value, &options);
    assert_eq!(
        text,
        "{\n    'name': 'Alice',\n    'scores': [\n        95,\n        87,\n        92\n    ]\n}"
    );
    assert_eq!(decode(&text).unwrap(), value);

    // a generous width keeps everything inline
    let wide = EncodeOptions::new().with_indent(4).with_width(160);
    assert_eq!(
        encode_with_options(&value, &wide),
        "{'name': 'Alice', 'scores': [95, 87, 92]}"
    );
}

#[test]
fn test_pretty_single_element_tuple() {
    let value = Value::Tuple(vec![Value::Str("alone".to_string())]);
    let options = EncodeOptions::new().with_indent(2).with_width(5);
    assert_eq!(
        encode_with_options(&value, &options),
        "(\n  'alone',\n)"
    );
}

#[test]
fn test_remove_spaces() {
    assert_eq!(
        remove_spaces("{'a': 1, 'b': [2, 3]}"),
        "{'a':1,'b':[2,3]}"
    );
    assert_eq!(remove_spaces("( 1 , 2 )"), "(1,2)");
    assert_eq!(remove_spaces("{\n  'a': 1\n}"), "{'a':1}");

    // whitespace inside string literals survives, including after \'
    assert_eq!(
        remove_spaces(r"{'it\'s fine': 1, 'b c': 2}"),
        r"{'it\'s fine':1,'b c':2}"
    );

    // idempotent
    let once = remove_spaces("{'a': 1, 'b': (2, 3)}");
    assert_eq!(remove_spaces(&once), once);
}

#[test]
fn test_to_json() {
    let value = decode("{1: 'a', 'b': [2, 3]}").unwrap();
    assert_eq!(to_json(&value).unwrap(), r#"{"1":"a","b":[2,3]}"#);

    // all keys coerce to strings, as str() would
    let value = decode("{True: 1, None: 2, 2.5: 3}").unwrap();
    assert_eq!(to_json(&value).unwrap(), r#"{"True":1,"None":2,"2.5":3}"#);

    let value = decode("{(1, 2): 'pair'}").unwrap();
    assert_eq!(to_json(&value).unwrap(), r#"{"(1, 2)":"pair"}"#);

    // tuples flatten to arrays
    let value = decode("(1, (2, 3))").unwrap();
    assert_eq!(to_json(&value).unwrap(), "[1,[2,3]]");

    assert_eq!(to_json(&Value::None).unwrap(), "null");
    assert_eq!(to_json(&Value::Bool(true)).unwrap(), "true");
}

#[test]
fn test_to_json_unsupported() {
    let value = decode("{1, 2}").unwrap();
    let err = to_json(&value).unwrap_err();
    assert_eq!(err.to_string(), "unsupported type for JSON: set");

    let err = to_json(&Value::Float(f64::NAN)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "unsupported type for JSON: non-finite float nan"
    );
    assert!(to_json(&Value::Float(f64::INFINITY)).is_err());

    // non-finite floats in key position coerce like any other key
    let value = decode("{inf: 1}").unwrap();
    assert_eq!(to_json(&value).unwrap(), r#"{"inf":1}"#);
}

#[test]
fn test_to_json_key_collisions() {
    // 1 and '1' both coerce to "1"; the later entry wins
    let value = decode("{1: 'int', '1': 'str'}").unwrap();
    assert_eq!(to_json(&value).unwrap(), r#"{"1":"str"}"#);
}

#[test]
fn test_to_json_fast() {
    assert_eq!(to_json_fast("{'a': 1}"), r#"{"a": 1}"#);
    assert_eq!(to_json_fast("['x', 'y']"), r#"["x", "y"]"#);
    // blind swap: embedded quotes are the caller's problem
    assert_eq!(to_json_fast("'it's'"), r#""it"s""#);
}

#[test]
fn test_normalize() {
    assert_eq!(normalize("{'b': 2, 'a': 1}").unwrap(), "{'a': 1, 'b': 2}");
    assert_eq!(
        normalize("{'b': {'d': 1, 'c': 2}, 'a': [{'z': 1, 'y': 2}]}").unwrap(),
        "{'a': [{'y': 2, 'z': 1}], 'b': {'c': 2, 'd': 1}}"
    );

    // multi-line input comes back on one line
    assert_eq!(
        normalize("{\n  'b': 1,\n  'a': 2\n}").unwrap(),
        "{'a': 2, 'b': 1}"
    );

    // text that does not decode passes through unchanged
    assert_eq!(normalize("not pyon at all").unwrap(), "not pyon at all");
    assert_eq!(normalize("").unwrap(), "");
}

#[test]
fn test_normalize_key_ordering() {
    // bools sort as their numeric value
    assert_eq!(
        normalize("{2.5: 'c', True: 'a', 2: 'b'}").unwrap(),
        "{True: 'a', 2: 'b', 2.5: 'c'}"
    );
    assert_eq!(
        normalize("{(1, 2): 'x', (1, 1): 'y'}").unwrap(),
        "{(1, 1): 'y', (1, 2): 'x'}"
    );
    assert_eq!(
        normalize("{'b': 0, 'a': 0, 'ab': 0}").unwrap(),
        "{'a': 0, 'ab': 0, 'b': 0}"
    );
}

#[test]
fn test_normalize_incomparable_keys() {
    let err = normalize("{'a': 1, 2: 3}").unwrap_err();
    assert_eq!(
        err.to_string(),
        "'<' not supported between instances of 'str' and 'int'"
    );

    assert!(normalize("{None: 1, 2: 3}").is_err());
    assert!(normalize("{(1,): 1, 2: 3}").is_err());
}

#[test]
fn test_normalize_mixed_keys_error_at_scale() {
    // dicts large enough to leave the sort's small-slice paths still
    // report the mix as an error
    for n in [3usize, 33, 64, 200] {
        let mut entries = Vec::with_capacity(n);
        for i in 0..n {
            // irregular interleave of int and str keys
            if (i * 7 + i / 3) % 3 == 0 {
                entries.push(format!("{}: 0", i));
            } else {
                entries.push(format!("'k{}': 0", i));
            }
        }
        let text = format!("{{{}}}", entries.join(", "));
        let err = normalize(&text).unwrap_err();
        assert!(err
            .to_string()
            .starts_with("'<' not supported between instances of"));
    }
}

#[test]
fn test_normalize_equal_numeric_keys_distinct_types() {
    // 1 and 1.0 are distinct keys; either insertion order canonicalizes
    // to the same text
    assert_eq!(normalize("{1: 'a', 1.0: 'b'}").unwrap(), "{1: 'a', 1.0: 'b'}");
    assert_eq!(normalize("{1.0: 'b', 1: 'a'}").unwrap(), "{1: 'a', 1.0: 'b'}");
    assert_eq!(
        normalize("{1.0: 'b', True: 'c', 1: 'a'}").unwrap(),
        "{True: 'c', 1: 'a', 1.0: 'b'}"
    );

    // int-float ordering stays exact above 2^53
    assert_eq!(
        normalize("{9007199254740993: 'a', 9007199254740992.0: 'b'}").unwrap(),
        "{9007199254740992.0: 'b', 9007199254740993: 'a'}"
    );
}

#[test]
fn test_decode_encode_fixed_point() {
    // canonical text survives a decode/encode cycle byte for byte
    let canonical = [
        "None",
        "True",
        "[1, 2.5, 'x', (3,), {4, 5}, {'k': None}]",
        "{(1, 'a'): [set(), {}, ()]}",
        r"'it\'s \n fine'",
    ];

    for text in canonical {
        assert_eq!(encode(&decode(text).unwrap()), text);
    }
}
