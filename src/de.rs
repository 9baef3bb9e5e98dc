//! PYON decoding.
//!
//! This module parses PYON literal text into [`Value`] trees. The parser is a
//! recursive-descent evaluator over a closed grammar: quoted strings, signed
//! numbers, `True`/`False`/`None`, lists, tuples, sets, and dicts. It never
//! resolves names, never calls functions (the empty-set spelling `set()` is
//! recognized as a token, not executed), and never evaluates operators, so
//! decoding untrusted text cannot run code.
//!
//! ## Overview
//!
//! - **Single-pass parsing**: O(n) over the input with one character of lookahead
//! - **Error reporting**: line/column information on every syntax error
//! - **Bounded recursion**: nesting deeper than 128 levels is a defined error
//!   rather than a stack overflow
//!
//! ## Usage
//!
//! ```rust
//! use serde_pyon::{decode, Value};
//!
//! let value = decode("{'name': 'Alice', 'scores': [95, 87]}").unwrap();
//! let dict = value.as_dict().unwrap();
//! assert_eq!(dict.get_str("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```
//!
//! Typed decoding goes through [`from_value`] (or [`from_str`](crate::from_str)
//! in the crate root):
//!
//! ```rust
//! use serde_pyon::{decode, from_value};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i64, y: i64 }
//!
//! let value = decode("{'x': 1, 'y': 2}").unwrap();
//! let data: Data = from_value(value).unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```

use crate::{Dict, Error, HashableValue, Result, Value};
use indexmap::IndexSet;
use serde::de::IntoDeserializer;
use serde::{de, forward_to_deserialize_any};

/// Nesting depth at which the parser gives up instead of recursing further.
const MAX_NESTING_DEPTH: usize = 128;

/// Parses PYON text into a [`Value`].
///
/// The grammar covers exactly what [`encode`](crate::encode) emits: single-
/// or double-quoted strings with backslash escapes, integers and floats
/// (including `inf` and `nan`), `True`/`False`/`None`, `[...]` lists,
/// `(...)` tuples (a lone parenthesized value without a comma is that value,
/// `(v,)` is a one-element tuple), `{...}` dicts and sets, `{}` for the
/// empty dict and `set()` for the empty set. Whitespace and trailing commas
/// inside groupings are insignificant. Anything else (bare identifiers,
/// calls, operators) is rejected.
///
/// Duplicate dict keys resolve last-write-wins. Dict keys and set members
/// must be hashable: scalars or tuples of hashables.
///
/// # Quirk
///
/// Empty input is returned unchanged as `Value::Str("")` rather than
/// erroring. Tabular pipelines route cell text through `decode` and expect
/// empty cells to survive the trip; don't "fix" this. Whitespace-only input
/// is an error like any other non-literal text.
///
/// # Errors
///
/// Returns a decode-family error ([`Error::is_decode`]) when the text is not
/// a valid literal, contains an unhashable key, an integer outside `i64`
/// range, or nests deeper than 128 levels.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{decode, Value};
///
/// let value = decode("{1: 'a', 'nums': (1, 2)}").unwrap();
/// assert!(value.is_dict());
///
/// assert_eq!(decode("").unwrap(), Value::Str(String::new()));
/// assert!(decode("   ").is_err());
/// assert!(decode("__import__('os')").is_err());
/// ```
pub fn decode(text: &str) -> Result<Value> {
    if text.is_empty() {
        return Ok(Value::Str(String::new()));
    }

    let mut parser = Parser::new(text);
    parser.skip_whitespace();
    if parser.at_end() {
        return Err(Error::syntax(
            parser.line,
            parser.column,
            "input is only whitespace",
        ));
    }

    let value = parser.parse_value()?;
    parser.skip_whitespace();
    if let Some(ch) = parser.peek_char() {
        return Err(Error::syntax(
            parser.line,
            parser.column,
            format!("unexpected trailing character {:?}", ch),
        ));
    }
    Ok(value)
}

/// Decodes the bracket-delimited cells of a tabular row, passing everything
/// else through untouched.
///
/// A cell is attempted only when its trimmed text starts and ends with a
/// matching `{}`, `[]`, or `()` pair. A failed attempt keeps the original
/// cell text as a [`Value::Str`], since tabular data is allowed to contain
/// cells that merely look bracket-delimited. Decode failures are recovered
/// here, never propagated.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{decode_row, Value};
///
/// let row = decode_row(["{'a': 1}", "plain text", "[1, 2"]);
/// assert!(row[0].is_dict());
/// assert_eq!(row[1], Value::Str("plain text".to_string()));
/// // unbalanced bracket cell survives unchanged
/// assert_eq!(row[2], Value::Str("[1, 2".to_string()));
/// ```
pub fn decode_row<I, S>(row: I) -> Vec<Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    row.into_iter()
        .map(|cell| {
            let text = cell.as_ref();
            if looks_delimited(text.trim()) {
                match decode(text) {
                    Ok(value) => value,
                    Err(_) => Value::Str(text.to_string()),
                }
            } else {
                Value::Str(text.to_string())
            }
        })
        .collect()
}

fn looks_delimited(trimmed: &str) -> bool {
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
        || (trimmed.starts_with('(') && trimmed.ends_with(')'))
}

/// The PYON literal parser.
struct Parser<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    column: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            input,
            position: 0,
            line: 1,
            column: 1,
            depth: 0,
        }
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    fn next_char(&mut self) -> Option<char> {
        if let Some(ch) = self.input[self.position..].chars().next() {
            self.position += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(ch)
        } else {
            None
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            if ch.is_whitespace() {
                self.next_char();
            } else {
                break;
            }
        }
    }

    fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Consumes `word` if it appears here as a whole identifier (not a
    /// prefix of a longer one).
    fn eat_keyword(&mut self, word: &str) -> bool {
        if self.input[self.position..].starts_with(word) {
            let after = self.input[self.position + word.len()..].chars().next();
            if !matches!(after, Some(c) if c.is_ascii_alphanumeric() || c == '_') {
                for _ in 0..word.len() {
                    self.next_char();
                }
                return true;
            }
        }
        false
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek_char() {
            Some('\'') | Some('"') => self.parse_string().map(Value::Str),
            Some('[') => self.parse_list(),
            Some('(') => self.parse_paren(),
            Some('{') => self.parse_brace(),
            Some(ch) if ch.is_ascii_digit() || ch == '-' || ch == '+' || ch == '.' => {
                self.parse_number()
            }
            Some(ch) if ch.is_alphabetic() => self.parse_keyword(),
            Some(ch) => Err(Error::syntax(
                self.line,
                self.column,
                format!("unexpected character {:?}", ch),
            )),
            None => Err(Error::unexpected_eof(self.line, self.column, "a value")),
        }
    }

    /// Parses a value and checks it is usable as a dict key or set member.
    fn parse_key(&mut self) -> Result<HashableValue> {
        self.parse_value()?.into_hashable()
    }

    fn parse_string(&mut self) -> Result<String> {
        let quote = match self.next_char() {
            Some(q) if q == '\'' || q == '"' => q,
            _ => return Err(Error::syntax(self.line, self.column, "expected string quote")),
        };
        let mut result = String::new();

        loop {
            match self.next_char() {
                Some(ch) if ch == quote => return Ok(result),
                Some('\\') => match self.next_char() {
                    Some('\\') => result.push('\\'),
                    Some('\'') => result.push('\''),
                    Some('"') => result.push('"'),
                    Some('n') => result.push('\n'),
                    Some('r') => result.push('\r'),
                    Some('t') => result.push('\t'),
                    Some('a') => result.push('\u{0007}'), // bell
                    Some('b') => result.push('\u{0008}'), // backspace
                    Some('f') => result.push('\u{000C}'), // form feed
                    Some('v') => result.push('\u{000B}'), // vertical tab
                    Some('0') => result.push('\0'),
                    Some('x') => result.push(self.parse_hex_escape(2)?),
                    Some('u') => result.push(self.parse_hex_escape(4)?),
                    Some('U') => result.push(self.parse_hex_escape(8)?),
                    Some(other) => {
                        // unknown escape, preserved literally (lenient parsing)
                        result.push('\\');
                        result.push(other);
                    }
                    None => {
                        return Err(Error::unexpected_eof(
                            self.line,
                            self.column,
                            "escape sequence",
                        ))
                    }
                },
                Some(other) => result.push(other),
                None => {
                    return Err(Error::unexpected_eof(self.line, self.column, "closing quote"))
                }
            }
        }
    }

    /// Hex escape body: `\xHH`, `\uHHHH`, or `\UHHHHHHHH`.
    fn parse_hex_escape(&mut self, digits: usize) -> Result<char> {
        let mut hex = String::new();
        for _ in 0..digits {
            match self.next_char() {
                Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
                _ => {
                    return Err(Error::syntax(
                        self.line,
                        self.column,
                        format!("invalid escape sequence (expected {} hex digits)", digits),
                    ))
                }
            }
        }

        let code_point = u32::from_str_radix(&hex, 16)
            .map_err(|_| Error::syntax(self.line, self.column, "invalid hex in escape sequence"))?;

        char::from_u32(code_point).ok_or_else(|| {
            Error::syntax(self.line, self.column, "invalid code point in escape sequence")
        })
    }

    fn parse_number(&mut self) -> Result<Value> {
        let start = self.position;
        let (line, col) = (self.line, self.column);

        let mut negative = false;
        match self.peek_char() {
            Some('-') => {
                negative = true;
                self.next_char();
            }
            Some('+') => {
                self.next_char();
            }
            _ => {}
        }

        // non-finite floats print as inf/-inf/nan, so the grammar takes them back
        if self.eat_keyword("inf") {
            return Ok(Value::Float(if negative {
                f64::NEG_INFINITY
            } else {
                f64::INFINITY
            }));
        }
        if self.eat_keyword("nan") {
            return Ok(Value::Float(f64::NAN));
        }

        let mut seen_dot = false;
        let mut seen_exp = false;
        while let Some(ch) = self.peek_char() {
            match ch {
                '0'..='9' => {
                    self.next_char();
                }
                '.' if !seen_dot && !seen_exp => {
                    seen_dot = true;
                    self.next_char();
                }
                'e' | 'E' if !seen_exp => {
                    seen_exp = true;
                    self.next_char();
                    if matches!(self.peek_char(), Some('+') | Some('-')) {
                        self.next_char();
                    }
                }
                _ => break,
            }
        }

        let literal = &self.input[start..self.position];
        if seen_dot || seen_exp {
            literal
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| Error::syntax(line, col, format!("invalid float literal '{}'", literal)))
        } else {
            literal.parse::<i64>().map(Value::Int).map_err(|e| {
                use std::num::IntErrorKind;
                match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                        Error::IntegerOverflow {
                            literal: literal.to_string(),
                        }
                    }
                    _ => Error::syntax(line, col, format!("invalid integer literal '{}'", literal)),
                }
            })
        }
    }

    fn parse_keyword(&mut self) -> Result<Value> {
        let (line, col) = (self.line, self.column);

        if self.eat_keyword("True") {
            return Ok(Value::Bool(true));
        }
        if self.eat_keyword("False") {
            return Ok(Value::Bool(false));
        }
        if self.eat_keyword("None") {
            return Ok(Value::None);
        }
        if self.eat_keyword("inf") {
            return Ok(Value::Float(f64::INFINITY));
        }
        if self.eat_keyword("nan") {
            return Ok(Value::Float(f64::NAN));
        }
        if self.eat_keyword("set") {
            // the empty set has no brace literal; `set()` is its one spelling
            self.skip_whitespace();
            if self.peek_char() != Some('(') {
                return Err(Error::syntax(
                    line,
                    col,
                    "'set' is only valid as the empty-set form set()",
                ));
            }
            self.next_char(); // consume '('
            self.skip_whitespace();
            if self.peek_char() != Some(')') {
                return Err(Error::syntax(
                    line,
                    col,
                    "set(...) with arguments is a call, not a literal",
                ));
            }
            self.next_char(); // consume ')'
            return Ok(Value::Set(IndexSet::new()));
        }

        let rest = &self.input[self.position..];
        let ident: String = rest
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect();
        Err(Error::syntax(
            line,
            col,
            format!("unexpected identifier '{}'", ident),
        ))
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(Error::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.next_char(); // consume '['

        let mut items = Vec::new();
        loop {
            self.skip_whitespace();
            if self.peek_char() == Some(']') {
                self.next_char();
                break;
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                Some(']') => {
                    self.next_char();
                    break;
                }
                Some(ch) => {
                    return Err(Error::syntax(
                        self.line,
                        self.column,
                        format!("expected ',' or ']', found {:?}", ch),
                    ))
                }
                None => return Err(Error::unexpected_eof(self.line, self.column, "',' or ']'")),
            }
        }

        self.depth -= 1;
        Ok(Value::List(items))
    }

    fn parse_paren(&mut self) -> Result<Value> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(Error::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.next_char(); // consume '('

        self.skip_whitespace();
        if self.peek_char() == Some(')') {
            self.next_char();
            self.depth -= 1;
            return Ok(Value::Tuple(Vec::new()));
        }

        let first = self.parse_value()?;
        self.skip_whitespace();
        match self.peek_char() {
            Some(')') => {
                // no comma: a parenthesized value, not a one-element tuple
                self.next_char();
                self.depth -= 1;
                return Ok(first);
            }
            Some(',') => {
                self.next_char();
            }
            Some(ch) => {
                return Err(Error::syntax(
                    self.line,
                    self.column,
                    format!("expected ',' or ')', found {:?}", ch),
                ))
            }
            None => return Err(Error::unexpected_eof(self.line, self.column, "',' or ')'")),
        }

        let mut items = vec![first];
        loop {
            self.skip_whitespace();
            if self.peek_char() == Some(')') {
                self.next_char();
                break;
            }
            items.push(self.parse_value()?);
            self.skip_whitespace();
            match self.peek_char() {
                Some(',') => {
                    self.next_char();
                }
                Some(')') => {
                    self.next_char();
                    break;
                }
                Some(ch) => {
                    return Err(Error::syntax(
                        self.line,
                        self.column,
                        format!("expected ',' or ')', found {:?}", ch),
                    ))
                }
                None => return Err(Error::unexpected_eof(self.line, self.column, "',' or ')'")),
            }
        }

        self.depth -= 1;
        Ok(Value::Tuple(items))
    }

    /// A `{` group is a dict or a set, decided by whether a `:` follows the
    /// first element. `{}` is the empty dict.
    fn parse_brace(&mut self) -> Result<Value> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(Error::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            });
        }
        self.next_char(); // consume '{'

        self.skip_whitespace();
        if self.peek_char() == Some('}') {
            self.next_char();
            self.depth -= 1;
            return Ok(Value::Dict(Dict::new()));
        }

        let first = self.parse_value()?;
        self.skip_whitespace();
        let value = match self.peek_char() {
            Some(':') => {
                self.next_char();
                self.parse_dict_rest(first.into_hashable()?)?
            }
            Some(',') | Some('}') => self.parse_set_rest(first.into_hashable()?)?,
            Some(ch) => {
                return Err(Error::syntax(
                    self.line,
                    self.column,
                    format!("expected ':', ',' or '}}', found {:?}", ch),
                ))
            }
            None => {
                return Err(Error::unexpected_eof(
                    self.line,
                    self.column,
                    "':', ',' or '}'",
                ))
            }
        };

        self.depth -= 1;
        Ok(value)
    }

    /// Continues a dict after `{first_key:` has been consumed.
    fn parse_dict_rest(&mut self, first_key: HashableValue) -> Result<Value> {
        let mut dict = Dict::new();
        let value = self.parse_value()?;
        dict.insert(first_key, value);

        loop {
            self.skip_whitespace();
            match self.peek_char() {
                Some('}') => {
                    self.next_char();
                    break;
                }
                Some(',') => {
                    self.next_char();
                }
                Some(ch) => {
                    return Err(Error::syntax(
                        self.line,
                        self.column,
                        format!("expected ',' or '}}', found {:?}", ch),
                    ))
                }
                None => return Err(Error::unexpected_eof(self.line, self.column, "',' or '}'")),
            }

            self.skip_whitespace();
            if self.peek_char() == Some('}') {
                self.next_char();
                break;
            }

            let key = self.parse_key()?;
            self.skip_whitespace();
            if self.peek_char() != Some(':') {
                return Err(Error::syntax(
                    self.line,
                    self.column,
                    "expected ':' after dict key",
                ));
            }
            self.next_char(); // consume ':'
            let value = self.parse_value()?;
            // duplicate keys resolve last-write-wins
            dict.insert(key, value);
        }

        Ok(Value::Dict(dict))
    }

    /// Continues a set after its first member has been parsed.
    fn parse_set_rest(&mut self, first: HashableValue) -> Result<Value> {
        let mut members = IndexSet::new();
        members.insert(first);

        loop {
            self.skip_whitespace();
            match self.peek_char() {
                Some('}') => {
                    self.next_char();
                    break;
                }
                Some(',') => {
                    self.next_char();
                }
                Some(ch) => {
                    return Err(Error::syntax(
                        self.line,
                        self.column,
                        format!("expected ',' or '}}', found {:?}", ch),
                    ))
                }
                None => return Err(Error::unexpected_eof(self.line, self.column, "',' or '}'")),
            }

            self.skip_whitespace();
            if self.peek_char() == Some('}') {
                self.next_char();
                break;
            }

            members.insert(self.parse_key()?);
        }

        Ok(Value::Set(members))
    }
}

/// Deserializes a decoded [`Value`] into any type implementing
/// `Deserialize`.
///
/// Lists, tuples, and sets all drive sequence deserialization; dicts drive
/// map deserialization with their keys converted back to values. Enums
/// deserialize from a bare string (unit variant) or a single-entry
/// string-keyed dict (variant with data).
///
/// # Errors
///
/// Returns [`Error::Custom`] when the value's shape does not match the
/// target type.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{decode, from_value};
///
/// let value = decode("[1, 2, 3]").unwrap();
/// let nums: Vec<i64> = from_value(value).unwrap();
/// assert_eq!(nums, vec![1, 2, 3]);
/// ```
pub fn from_value<T>(value: Value) -> Result<T>
where
    T: de::DeserializeOwned,
{
    T::deserialize(ValueDeserializer::new(value))
}

struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::None => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Int(i) => visitor.visit_i64(i),
            Value::Float(f) => visitor.visit_f64(f),
            Value::Str(s) => visitor.visit_string(s),
            Value::List(items) | Value::Tuple(items) => {
                visitor.visit_seq(SeqDeserializer::new(items))
            }
            Value::Set(members) => {
                let items = members.into_iter().map(Value::from).collect();
                visitor.visit_seq(SeqDeserializer::new(items))
            }
            Value::Dict(dict) => visitor.visit_map(MapDeserializer::new(dict)),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::None => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Str(s) => visitor.visit_enum(s.into_deserializer()),
            Value::Dict(dict) => {
                if dict.len() != 1 {
                    return Err(Error::custom(
                        "expected a single-entry dict for an enum variant",
                    ));
                }
                match dict.into_iter().next() {
                    Some((HashableValue::Str(variant), value)) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, value))
                    }
                    Some((key, _)) => Err(Error::custom(format!(
                        "enum variant key must be a string, found {}",
                        key.type_name()
                    ))),
                    None => Err(Error::custom("expected enum variant")),
                }
            }
            _ => Err(Error::custom("expected enum")),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple tuple_struct map struct
        identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<HashableValue, Value>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(dict: Dict) -> Self {
        MapDeserializer {
            iter: dict.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(Value::from(key)))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Value) -> Self {
        EnumDeserializer {
            variant,
            value: Some(value),
        }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::Str(self.variant)))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::None) | None => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::List(items)) | Some(Value::Tuple(items)) => {
                visitor.visit_seq(SeqDeserializer::new(items))
            }
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Dict(dict)) => visitor.visit_map(MapDeserializer::new(dict)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}
