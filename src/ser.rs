//! PYON encoding.
//!
//! This module renders [`Value`] trees as PYON literal text and converts
//! Rust data structures into [`Value`] trees via [`to_value`].
//!
//! ## Overview
//!
//! - **Canonical single-line form**: `, ` between items, `: ` after keys,
//!   single-quoted strings, `(1,)` for one-element tuples, `set()` for the
//!   empty set
//! - **Width-aware pretty form**: with a nonzero indent, groupings that do
//!   not fit the configured width break one item per line
//! - **Round-trip floats**: floats print in their shortest form that parses
//!   back to the same bits, with `inf`, `-inf`, and `nan` spelled out
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_pyon::{to_string, to_string_pretty};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//!
//! // Compact form
//! assert_eq!(to_string(&data).unwrap(), "{'x': 1, 'y': 2}");
//!
//! // Pretty form
//! let pretty = to_string_pretty(&data).unwrap();
//! ```

use crate::{Dict, EncodeOptions, Error, HashableValue, Result, Value};
use serde::{ser, Serialize};

/// Renders a value as its canonical single-line PYON form.
///
/// Items are separated by `", "`, dict keys by `": "`, strings are
/// single-quoted with backslash escapes, one-element tuples keep their
/// trailing comma, and the empty set prints as `set()`. The output parses
/// back to an equal value with [`decode`](crate::decode).
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{encode, pyon, Value};
///
/// let value = pyon!({"a": 1, "b": [2, 3]});
/// assert_eq!(encode(&value), "{'a': 1, 'b': [2, 3]}");
///
/// assert_eq!(encode(&Value::Tuple(vec![Value::Int(1)])), "(1,)");
/// assert_eq!(encode(&Value::set([])), "set()");
/// ```
#[must_use]
pub fn encode(value: &Value) -> String {
    encode_with_options(value, &EncodeOptions::new())
}

/// Renders a value with explicit layout options.
///
/// With `indent` of zero (the default) this is [`encode`]. With a nonzero
/// indent, any grouping whose single-line form would run past `width`
/// breaks one item per line at the next indent level; groupings that fit
/// stay inline. Dict keys always stay on the same line as their value's
/// opening character.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{encode_with_options, pyon, EncodeOptions};
///
/// let value = pyon!({"name": "Alice", "scores": [95, 87]});
/// let options = EncodeOptions::new().with_indent(4).with_width(30);
/// assert_eq!(
///     encode_with_options(&value, &options),
///     "{\n    'name': 'Alice',\n    'scores': [95, 87]\n}",
/// );
/// ```
#[must_use]
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> String {
    let mut out = String::with_capacity(256);
    if options.indent == 0 {
        write_value(value, &mut out);
    } else {
        write_pretty(value, &mut out, options, 0);
    }
    out
}

/// Strips whitespace outside single-quoted strings.
///
/// The scanner understands single-quote regions and backslash escapes, so
/// whitespace inside string content (including after an escaped `\'`)
/// survives while all formatting whitespace goes. The function is
/// idempotent and works on any text, not just valid PYON; an unterminated
/// quote region keeps the rest of the input verbatim.
///
/// Double-quoted strings are not recognized here. Text produced by
/// [`encode`](crate::encode) only ever uses single quotes.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::remove_spaces;
///
/// assert_eq!(remove_spaces("{'a': 1, 'b': 2}"), "{'a':1,'b':2}");
/// assert_eq!(remove_spaces("{'key with space': 1}"), "{'key with space':1}");
/// ```
#[must_use]
pub fn remove_spaces(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if in_string {
            result.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '\'' {
                in_string = false;
            }
        } else if ch == '\'' {
            result.push(ch);
            in_string = true;
        } else if !ch.is_whitespace() {
            result.push(ch);
        }
    }

    result
}

pub(crate) fn write_value(value: &Value, out: &mut String) {
    match value {
        Value::None => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => write_float(*f, out),
        Value::Str(s) => write_str_literal(s, out),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(item, out);
            }
            out.push(']');
        }
        Value::Tuple(items) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(item, out);
            }
            // (1,) stays distinguishable from the parenthesized value (1)
            if items.len() == 1 {
                out.push(',');
            }
            out.push(')');
        }
        Value::Set(members) => {
            if members.is_empty() {
                // {} would read back as the empty dict
                out.push_str("set()");
            } else {
                out.push('{');
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_hashable(member, out);
                }
                out.push('}');
            }
        }
        Value::Dict(dict) => {
            out.push('{');
            for (i, (key, val)) in dict.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_hashable(key, out);
                out.push_str(": ");
                write_value(val, out);
            }
            out.push('}');
        }
    }
}

pub(crate) fn write_hashable(value: &HashableValue, out: &mut String) {
    match value {
        HashableValue::None => out.push_str("None"),
        HashableValue::Bool(true) => out.push_str("True"),
        HashableValue::Bool(false) => out.push_str("False"),
        HashableValue::Int(i) => out.push_str(&i.to_string()),
        HashableValue::Float(f) => write_float(*f, out),
        HashableValue::Str(s) => write_str_literal(s, out),
        HashableValue::Tuple(items) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_hashable(item, out);
            }
            if items.len() == 1 {
                out.push(',');
            }
            out.push(')');
        }
    }
}

fn write_float(v: f64, out: &mut String) {
    if v.is_nan() {
        out.push_str("nan");
    } else if v.is_infinite() {
        out.push_str(if v.is_sign_positive() { "inf" } else { "-inf" });
    } else {
        // {:?} picks the shortest decimal that parses back to the same bits
        // and always keeps a decimal point or exponent (1.0, never 1)
        out.push_str(&format!("{:?}", v));
    }
}

fn write_str_literal(s: &str, out: &mut String) {
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}

/// True when the value is a grouping with at least one item, so breaking
/// it across lines can actually shorten a line.
fn can_expand(value: &Value) -> bool {
    match value {
        Value::List(items) | Value::Tuple(items) => !items.is_empty(),
        Value::Set(members) => !members.is_empty(),
        Value::Dict(dict) => !dict.is_empty(),
        _ => false,
    }
}

fn push_indent(out: &mut String, options: &EncodeOptions, level: usize) {
    out.push_str(&" ".repeat(options.indent * level));
}

fn write_pretty(value: &Value, out: &mut String, options: &EncodeOptions, level: usize) {
    let mut inline = String::new();
    write_value(value, &mut inline);

    let column = out.len() - out.rfind('\n').map_or(0, |i| i + 1);
    if !can_expand(value) || column + inline.len() <= options.width {
        out.push_str(&inline);
        return;
    }

    match value {
        Value::List(items) => write_pretty_items(items, '[', ']', out, options, level, false),
        Value::Tuple(items) => {
            write_pretty_items(items, '(', ')', out, options, level, items.len() == 1)
        }
        Value::Set(members) => {
            out.push('{');
            let len = members.len();
            for (i, member) in members.iter().enumerate() {
                out.push('\n');
                push_indent(out, options, level + 1);
                // set members are scalars or tuples; they stay inline
                write_hashable(member, out);
                if i + 1 < len {
                    out.push(',');
                }
            }
            out.push('\n');
            push_indent(out, options, level);
            out.push('}');
        }
        Value::Dict(dict) => {
            out.push('{');
            let len = dict.len();
            for (i, (key, val)) in dict.iter().enumerate() {
                out.push('\n');
                push_indent(out, options, level + 1);
                write_hashable(key, out);
                out.push_str(": ");
                write_pretty(val, out, options, level + 1);
                if i + 1 < len {
                    out.push(',');
                }
            }
            out.push('\n');
            push_indent(out, options, level);
            out.push('}');
        }
        _ => out.push_str(&inline),
    }
}

fn write_pretty_items(
    items: &[Value],
    open: char,
    close: char,
    out: &mut String,
    options: &EncodeOptions,
    level: usize,
    trailing_comma: bool,
) {
    out.push(open);
    let len = items.len();
    for (i, item) in items.iter().enumerate() {
        out.push('\n');
        push_indent(out, options, level + 1);
        write_pretty(item, out, options, level + 1);
        if i + 1 < len || trailing_comma {
            out.push(',');
        }
    }
    out.push('\n');
    push_indent(out, options, level);
    out.push(close);
}

/// Converts any `Serialize` type into a [`Value`].
///
/// Rust sequences become lists, Rust tuples (and tuple structs) become
/// tuples, maps and structs become dicts, `None`/unit become `None`, and
/// bytes become a list of integers. Map keys may be any hashable value, so
/// tuple-keyed maps convert losslessly. Enums use the externally tagged
/// form: a unit variant is its name as a string, any other variant is a
/// single-entry dict keyed by the variant name.
///
/// # Errors
///
/// Returns [`Error::Unhashable`] when a map key converts to a list, set,
/// or dict.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{encode, to_value};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i64, y: i64 }
///
/// let value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(encode(&value), "{'x': 1, 'y': 2}");
/// ```
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(ValueSerializer)
}

pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTuple {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: Dict,
    current_key: Option<HashableValue>,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: Dict,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeTuple;
    type SerializeTupleStruct = SerializeTuple;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(v as i64))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Int(v as i64))
        } else {
            Ok(Value::Float(v as f64))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::Float(v as f64))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::Str(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        let vec = v.iter().map(|&b| Value::Int(b as i64)).collect();
        Ok(Value::List(vec))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::Str(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        let mut map = Dict::new();
        map.insert(HashableValue::Str(variant.to_string()), to_value(value)?);
        Ok(Value::Dict(map))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec { vec: Vec::new() })
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeTuple> {
        Ok(SerializeTuple {
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeTuple> {
        Ok(SerializeTuple {
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: Dict::new(),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap {
            map: Dict::new(),
            current_key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: Dict::new(),
        })
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::List(self.vec))
    }
}

impl ser::SerializeTuple for SerializeTuple {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Tuple(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeTuple {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Tuple(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Dict::new();
        map.insert(
            HashableValue::Str(self.variant.to_string()),
            Value::Tuple(self.vec),
        );
        Ok(Value::Dict(map))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_value(key)?.into_hashable()?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Dict(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(HashableValue::Str(key.to_string()), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Dict(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(HashableValue::Str(key.to_string()), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        let mut map = Dict::new();
        map.insert(
            HashableValue::Str(self.variant.to_string()),
            Value::Dict(self.map),
        );
        Ok(Value::Dict(map))
    }
}
