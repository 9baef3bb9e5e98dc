//! Dynamic value representation for PYON data.
//!
//! This module provides the [`Value`] enum which represents any valid PYON
//! value, and the [`HashableValue`] enum for the subset of values that may
//! appear as dict keys or set members.
//!
//! ## Core Types
//!
//! - [`Value`]: Any PYON value (none, bool, int, float, str, list, tuple, set, dict)
//! - [`HashableValue`]: The hashable subset (scalars and tuples of hashables)
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_pyon::Value;
//!
//! // From primitives
//! let none = Value::None;
//! let boolean = Value::from(true);
//! let number = Value::from(42);
//! let text = Value::from("hello");
//!
//! // Using the pyon! macro
//! use serde_pyon::pyon;
//! let obj = pyon!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! ```
//!
//! ### Type Checking
//!
//! ```rust
//! use serde_pyon::Value;
//!
//! let value = Value::from(42);
//! assert!(value.is_int());
//! assert!(!value.is_str());
//! assert_eq!(value.type_name(), "int");
//! ```
//!
//! ### Extracting Values
//!
//! ```rust
//! use serde_pyon::Value;
//! use std::convert::TryFrom;
//!
//! let value = Value::from(42);
//!
//! // Safe extraction with TryFrom
//! let num: i64 = i64::try_from(value).unwrap();
//! assert_eq!(num, 42);
//! ```
//!
//! ### Converting from Rust Types
//!
//! ```rust
//! use serde_pyon::{to_value, Value};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let point = Point { x: 10, y: 20 };
//! let value: Value = to_value(&point).unwrap();
//!
//! if let Value::Dict(dict) = value {
//!     assert_eq!(dict.len(), 2);
//! }
//! ```

use crate::Dict;
use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamically-typed representation of any valid PYON value.
///
/// This enum can represent any value the PYON grammar can express. It's
/// particularly useful when:
///
/// - The structure isn't known at compile time
/// - You need to manipulate decoded data generically
/// - Building PYON structures programmatically
///
/// Equality is structural, with floats compared by bit pattern so that
/// `nan == nan` and value trees can be compared after a round trip. Dict and
/// set equality ignores insertion order, matching dict equality in the
/// notation this format mirrors.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::Value;
///
/// let none = Value::None;
/// let num = Value::Int(42);
/// let text = Value::Str("hello".to_string());
///
/// assert!(none.is_none());
/// assert!(num.is_int());
/// assert!(text.is_str());
/// ```
#[derive(Clone, Debug, Default)]
pub enum Value {
    #[default]
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Set(IndexSet<HashableValue>),
    Dict(Dict),
}

/// A value usable as a dict key or set member.
///
/// PYON follows its home notation in restricting keys and set members to
/// hashable values: scalars and tuples whose elements are themselves
/// hashable. Lists, sets, and dicts are not hashable and cannot appear here.
///
/// Floats hash and compare by bit pattern, which makes the type usable in
/// hashed containers at the cost of distinguishing `0.0` from `-0.0`.
///
/// # Examples
///
/// ```rust
/// use serde_pyon::{HashableValue, Value};
/// use std::convert::TryFrom;
///
/// let key = HashableValue::try_from(Value::Int(1)).unwrap();
/// assert_eq!(key, HashableValue::Int(1));
///
/// // Lists are not hashable
/// assert!(HashableValue::try_from(Value::List(vec![])).is_err());
/// ```
#[derive(Clone, Debug)]
pub enum HashableValue {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Tuple(Vec<HashableValue>),
}

impl Value {
    /// Returns `true` if the value is `None`.
    #[inline]
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is an integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Returns `true` if the value is a float.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Returns `true` if the value is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` if the value is a tuple.
    #[inline]
    #[must_use]
    pub const fn is_tuple(&self) -> bool {
        matches!(self, Value::Tuple(_))
    }

    /// Returns `true` if the value is a set.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    /// Returns `true` if the value is a dict.
    #[inline]
    #[must_use]
    pub const fn is_dict(&self) -> bool {
        matches!(self, Value::Dict(_))
    }

    /// Returns the type name in the notation's own vocabulary:
    /// `"NoneType"`, `"bool"`, `"int"`, `"float"`, `"str"`, `"list"`,
    /// `"tuple"`, `"set"`, or `"dict"`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::Value;
    ///
    /// assert_eq!(Value::None.type_name(), "NoneType");
    /// assert_eq!(Value::List(vec![]).type_name(), "list");
    /// ```
    #[inline]
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Set(_) => "set",
            Value::Dict(_) => "dict",
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::Value;
    ///
    /// assert_eq!(Value::Bool(true).as_bool(), Some(true));
    /// assert_eq!(Value::from(42).as_bool(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer, or a float with no fractional part that
    /// fits in `i64`, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::Value;
    ///
    /// assert_eq!(Value::Int(42).as_i64(), Some(42));
    /// assert_eq!(Value::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Value::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// If the value is numeric, returns it as an `f64`. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::Value;
    ///
    /// assert_eq!(Value::Int(42).as_f64(), Some(42.0));
    /// assert_eq!(Value::Float(3.5).as_f64(), Some(3.5));
    /// assert_eq!(Value::from("3.5").as_f64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// If the value is a list, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a tuple, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_tuple(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Tuple(items) => Some(items),
            _ => None,
        }
    }

    /// If the value is a set, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_set(&self) -> Option<&IndexSet<HashableValue>> {
        match self {
            Value::Set(members) => Some(members),
            _ => None,
        }
    }

    /// If the value is a dict, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Value::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Returns `true` if this value could be used as a dict key or set
    /// member: scalars always, tuples when every element is hashable,
    /// lists/sets/dicts never.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::Value;
    ///
    /// assert!(Value::Int(1).is_hashable());
    /// assert!(Value::Tuple(vec![Value::Int(1), Value::Str("a".into())]).is_hashable());
    /// assert!(!Value::List(vec![]).is_hashable());
    /// assert!(!Value::Tuple(vec![Value::List(vec![])]).is_hashable());
    /// ```
    #[must_use]
    pub fn is_hashable(&self) -> bool {
        match self {
            Value::None | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => true,
            Value::Tuple(items) => items.iter().all(Value::is_hashable),
            Value::List(_) | Value::Set(_) | Value::Dict(_) => false,
        }
    }

    /// Converts this value into a [`HashableValue`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unhashable`](crate::Error::Unhashable) if the value
    /// (or any tuple element within it) is a list, set, or dict.
    pub fn into_hashable(self) -> crate::Result<HashableValue> {
        HashableValue::try_from(self)
    }

    /// Builds a set value from hashable members, keeping first-insertion
    /// order and dropping duplicates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::{HashableValue, Value};
    ///
    /// let set = Value::set([HashableValue::Int(2), HashableValue::Int(1), HashableValue::Int(2)]);
    /// assert_eq!(set.as_set().unwrap().len(), 2);
    /// ```
    pub fn set<I>(members: I) -> Value
    where
        I: IntoIterator<Item = HashableValue>,
    {
        Value::Set(members.into_iter().collect())
    }
}

impl HashableValue {
    /// Returns the type name in the notation's own vocabulary.
    #[inline]
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            HashableValue::None => "NoneType",
            HashableValue::Bool(_) => "bool",
            HashableValue::Int(_) => "int",
            HashableValue::Float(_) => "float",
            HashableValue::Str(_) => "str",
            HashableValue::Tuple(_) => "tuple",
        }
    }

    /// If this key is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HashableValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Compares two keys with the mixed-type ordering the canonicalizer
    /// uses: booleans, integers, and floats compare numerically with each
    /// other; strings compare lexicographically; tuples compare elementwise
    /// then by length. Float comparison is total (`f64::total_cmp`), so
    /// `nan` keys still sort deterministically. Integer-float comparison is
    /// exact at any magnitude, and numerically equal keys of different
    /// types order bool, then int, then float, so two distinct keys never
    /// compare `Equal`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncomparableKeys`](crate::Error::IncomparableKeys)
    /// for any other mix, including `None` against anything else.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_pyon::HashableValue;
    /// use std::cmp::Ordering;
    ///
    /// let a = HashableValue::Int(1);
    /// let b = HashableValue::Float(1.5);
    /// assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Less);
    ///
    /// // 1 and 1.0 are distinct keys; the int takes the earlier position
    /// assert_eq!(a.try_cmp(&HashableValue::Float(1.0)).unwrap(), Ordering::Less);
    ///
    /// let s = HashableValue::Str("1".to_string());
    /// assert!(a.try_cmp(&s).is_err());
    /// ```
    pub fn try_cmp(&self, other: &HashableValue) -> crate::Result<Ordering> {
        match (self, other) {
            (HashableValue::Str(a), HashableValue::Str(b)) => Ok(a.cmp(b)),
            (HashableValue::Tuple(a), HashableValue::Tuple(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.try_cmp(y)? {
                        Ordering::Equal => {}
                        unequal => return Ok(unequal),
                    }
                }
                Ok(a.len().cmp(&b.len()))
            }
            // keys are unique, so two None keys never meet in a real sort
            (HashableValue::None, HashableValue::None) => Ok(Ordering::Equal),
            (a, b) => match a.numeric_cmp(b) {
                Some(ordering) => Ok(ordering),
                None => Err(crate::Error::IncomparableKeys {
                    left: a.type_name(),
                    right: b.type_name(),
                }),
            },
        }
    }

    /// Cross-type numeric comparison, `None` when either side is not a
    /// number. Equal values of different types break the tie by
    /// [`numeric_rank`](Self::numeric_rank), which keeps the order total.
    fn numeric_cmp(&self, other: &HashableValue) -> Option<Ordering> {
        let by_value = match (self, other) {
            (HashableValue::Bool(a), HashableValue::Bool(b)) => a.cmp(b),
            (HashableValue::Bool(a), HashableValue::Int(b)) => i64::from(*a).cmp(b),
            (HashableValue::Int(a), HashableValue::Bool(b)) => a.cmp(&i64::from(*b)),
            (HashableValue::Int(a), HashableValue::Int(b)) => a.cmp(b),
            (HashableValue::Float(a), HashableValue::Float(b)) => a.total_cmp(b),
            (HashableValue::Bool(a), HashableValue::Float(b)) => cmp_int_float(i64::from(*a), *b),
            (HashableValue::Int(a), HashableValue::Float(b)) => cmp_int_float(*a, *b),
            (HashableValue::Float(a), HashableValue::Bool(b)) => {
                cmp_int_float(i64::from(*b), *a).reverse()
            }
            (HashableValue::Float(a), HashableValue::Int(b)) => cmp_int_float(*b, *a).reverse(),
            _ => return None,
        };
        Some(by_value.then_with(|| self.numeric_rank().cmp(&other.numeric_rank())))
    }

    /// Tie-break rank for numerically equal keys: bool 0, int 1, float 2.
    /// Only the numeric variants reach this.
    fn numeric_rank(&self) -> u8 {
        match self {
            HashableValue::Bool(_) => 0,
            HashableValue::Int(_) => 1,
            _ => 2,
        }
    }
}

/// Exact comparison of an integer against a float, never rounding the
/// integer through `f64`. NaN orders by its sign to stay consistent with
/// [`f64::total_cmp`]: above every integer when positive, below when
/// negative.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    // 2^63: every i64 is strictly below it, and -2^63 is exactly i64::MIN,
    // so a float outside [-2^63, 2^63) clears the whole integer range and
    // anything inside truncates to an in-range i64
    const TWO_POW_63: f64 = 9_223_372_036_854_775_808.0;
    if f >= TWO_POW_63 {
        return Ordering::Less;
    }
    if f < -TWO_POW_63 {
        return Ordering::Greater;
    }
    let whole = f.trunc() as i64;
    match i.cmp(&whole) {
        Ordering::Equal if f.fract() > 0.0 => Ordering::Less,
        Ordering::Equal if f.fract() < 0.0 => Ordering::Greater,
        ordering => ordering,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Set(a), Value::Set(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl PartialEq for HashableValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (HashableValue::None, HashableValue::None) => true,
            (HashableValue::Bool(a), HashableValue::Bool(b)) => a == b,
            (HashableValue::Int(a), HashableValue::Int(b)) => a == b,
            (HashableValue::Float(a), HashableValue::Float(b)) => a.to_bits() == b.to_bits(),
            (HashableValue::Str(a), HashableValue::Str(b)) => a == b,
            (HashableValue::Tuple(a), HashableValue::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for HashableValue {}

impl Hash for HashableValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            HashableValue::None => state.write_u8(0),
            HashableValue::Bool(b) => {
                state.write_u8(1);
                b.hash(state);
            }
            HashableValue::Int(i) => {
                state.write_u8(2);
                i.hash(state);
            }
            HashableValue::Float(f) => {
                state.write_u8(3);
                f.to_bits().hash(state);
            }
            HashableValue::Str(s) => {
                state.write_u8(4);
                s.hash(state);
            }
            HashableValue::Tuple(items) => {
                state.write_u8(5);
                items.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    /// Formats the value as its single-line PYON literal form, identical to
    /// [`encode`](crate::encode).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::ser::write_value(self, &mut out);
        f.write_str(&out)
    }
}

impl fmt::Display for HashableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::ser::write_hashable(self, &mut out);
        f.write_str(&out)
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::None => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) | Value::Tuple(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Set(members) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for member in members {
                    seq.serialize_element(member)?;
                }
                seq.end()
            }
            Value::Dict(dict) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(dict.len()))?;
                for (k, v) in dict.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for HashableValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            HashableValue::None => serializer.serialize_unit(),
            HashableValue::Bool(b) => serializer.serialize_bool(*b),
            HashableValue::Int(i) => serializer.serialize_i64(*i),
            HashableValue::Float(f) => serializer.serialize_f64(*f),
            HashableValue::Str(s) => serializer.serialize_str(s),
            HashableValue::Tuple(items) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for element in items {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid PYON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::Int(value as i64))
                } else {
                    Ok(Value::Float(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::Str(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::Str(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::None)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::List(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut dict = Dict::new();
                while let Some((key, value)) = map.next_entry::<HashableValue, Value>()? {
                    dict.insert(key, value);
                }
                Ok(Value::Dict(dict))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl<'de> Deserialize<'de> for HashableValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct KeyVisitor;

        impl<'de> Visitor<'de> for KeyVisitor {
            type Value = HashableValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a hashable PYON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(HashableValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(HashableValue::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(HashableValue::Int(value as i64))
                } else {
                    Ok(HashableValue::Float(value as f64))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(HashableValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(HashableValue::Str(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(HashableValue::Str(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(HashableValue::None)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(HashableValue::None)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(HashableValue::Tuple(vec))
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

// Conversions between the full lattice and the hashable subset
impl From<HashableValue> for Value {
    fn from(key: HashableValue) -> Self {
        match key {
            HashableValue::None => Value::None,
            HashableValue::Bool(b) => Value::Bool(b),
            HashableValue::Int(i) => Value::Int(i),
            HashableValue::Float(f) => Value::Float(f),
            HashableValue::Str(s) => Value::Str(s),
            HashableValue::Tuple(items) => {
                Value::Tuple(items.into_iter().map(Value::from).collect())
            }
        }
    }
}

impl TryFrom<Value> for HashableValue {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::None => Ok(HashableValue::None),
            Value::Bool(b) => Ok(HashableValue::Bool(b)),
            Value::Int(i) => Ok(HashableValue::Int(i)),
            Value::Float(f) => Ok(HashableValue::Float(f)),
            Value::Str(s) => Ok(HashableValue::Str(s)),
            Value::Tuple(items) => {
                let items = items
                    .into_iter()
                    .map(HashableValue::try_from)
                    .collect::<crate::Result<Vec<_>>>()?;
                Ok(HashableValue::Tuple(items))
            }
            other => Err(crate::Error::Unhashable {
                type_name: other.type_name(),
            }),
        }
    }
}

// TryFrom implementations for extracting primitives from Value
impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => Ok(i),
            Value::Float(f) => {
                if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                    Ok(f as i64)
                } else {
                    Err(crate::Error::custom(format!(
                        "cannot convert float {} to i64",
                        f
                    )))
                }
            }
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(i) => Ok(i as f64),
            Value::Float(f) => Ok(f),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Str(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Dict> for Value {
    fn from(value: Dict) -> Self {
        Value::Dict(value)
    }
}

impl From<IndexSet<HashableValue>> for Value {
    fn from(value: IndexSet<HashableValue>) -> Self {
        Value::Set(value)
    }
}

// From implementations for creating HashableValue from primitives,
// used by the pyon! macro for dict keys
impl From<bool> for HashableValue {
    fn from(value: bool) -> Self {
        HashableValue::Bool(value)
    }
}

impl From<i8> for HashableValue {
    fn from(value: i8) -> Self {
        HashableValue::Int(value as i64)
    }
}

impl From<i16> for HashableValue {
    fn from(value: i16) -> Self {
        HashableValue::Int(value as i64)
    }
}

impl From<i32> for HashableValue {
    fn from(value: i32) -> Self {
        HashableValue::Int(value as i64)
    }
}

impl From<i64> for HashableValue {
    fn from(value: i64) -> Self {
        HashableValue::Int(value)
    }
}

impl From<u8> for HashableValue {
    fn from(value: u8) -> Self {
        HashableValue::Int(value as i64)
    }
}

impl From<u16> for HashableValue {
    fn from(value: u16) -> Self {
        HashableValue::Int(value as i64)
    }
}

impl From<u32> for HashableValue {
    fn from(value: u32) -> Self {
        HashableValue::Int(value as i64)
    }
}

impl From<f32> for HashableValue {
    fn from(value: f32) -> Self {
        HashableValue::Float(value as f64)
    }
}

impl From<f64> for HashableValue {
    fn from(value: f64) -> Self {
        HashableValue::Float(value)
    }
}

impl From<String> for HashableValue {
    fn from(value: String) -> Self {
        HashableValue::Str(value)
    }
}

impl From<&str> for HashableValue {
    fn from(value: &str) -> Self {
        HashableValue::Str(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::TryFrom;

    #[test]
    fn test_tryfrom_i64() {
        let value = Value::Int(42);
        let result: i64 = TryFrom::try_from(value).unwrap();
        assert_eq!(result, 42);

        let value = Value::Float(42.0);
        let result: i64 = TryFrom::try_from(value).unwrap();
        assert_eq!(result, 42);

        let value = Value::Str("test".to_string());
        assert!(i64::try_from(value).is_err());
    }

    #[test]
    fn test_tryfrom_f64() {
        let value = Value::Float(3.5);
        let result: f64 = TryFrom::try_from(value).unwrap();
        assert_eq!(result, 3.5);

        let value = Value::Int(42);
        let result: f64 = TryFrom::try_from(value).unwrap();
        assert_eq!(result, 42.0);
    }

    #[test]
    fn test_tryfrom_bool() {
        let value = Value::Bool(true);
        let result: bool = TryFrom::try_from(value).unwrap();
        assert!(result);

        let value = Value::Int(1);
        assert!(bool::try_from(value).is_err());
    }

    #[test]
    fn test_tryfrom_string() {
        let value = Value::Str("hello".to_string());
        let result: String = TryFrom::try_from(value).unwrap();
        assert_eq!(result, "hello");

        let value = Value::Int(42);
        assert!(String::try_from(value).is_err());
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(3.5f64), Value::Float(3.5));
        assert_eq!(Value::from("test"), Value::Str("test".to_string()));
        assert_eq!(
            Value::from("test".to_string()),
            Value::Str("test".to_string())
        );
    }

    #[test]
    fn test_from_collections() {
        let vec = vec![Value::from(1i32), Value::from(2i32)];
        let value = Value::from(vec.clone());
        assert_eq!(value, Value::List(vec));

        let mut dict = Dict::new();
        dict.insert(HashableValue::from("key"), Value::from(42i32));
        let value = Value::from(dict.clone());
        assert_eq!(value, Value::Dict(dict));
    }

    #[test]
    fn test_hashable_gate() {
        assert!(HashableValue::try_from(Value::Int(1)).is_ok());
        assert!(HashableValue::try_from(Value::Tuple(vec![Value::Int(1)])).is_ok());
        assert!(HashableValue::try_from(Value::List(vec![])).is_err());
        assert!(HashableValue::try_from(Value::Dict(Dict::new())).is_err());
        assert!(HashableValue::try_from(Value::set([])).is_err());

        // a list hiding inside a tuple is still unhashable
        let nested = Value::Tuple(vec![Value::List(vec![Value::Int(1)])]);
        let err = HashableValue::try_from(nested).unwrap_err();
        assert_eq!(err.to_string(), "unhashable type: 'list'");
    }

    #[test]
    fn test_float_key_equality() {
        let a = HashableValue::Float(f64::NAN);
        let b = HashableValue::Float(f64::NAN);
        assert_eq!(a, b);

        // bit-pattern equality keeps 0.0 and -0.0 distinct
        assert_ne!(HashableValue::Float(0.0), HashableValue::Float(-0.0));
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
    }

    #[test]
    fn test_try_cmp_numeric() {
        use std::cmp::Ordering;

        let cases = [
            (HashableValue::Bool(false), HashableValue::Int(1)),
            (HashableValue::Int(1), HashableValue::Float(1.5)),
            (HashableValue::Float(0.5), HashableValue::Bool(true)),
        ];
        for (a, b) in cases {
            assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Less);
            assert_eq!(b.try_cmp(&a).unwrap(), Ordering::Greater);
        }
    }

    #[test]
    fn test_try_cmp_equal_numbers_distinct_types() {
        use std::cmp::Ordering;

        // numerically equal keys stay distinct and order bool, int, float
        let cases = [
            (HashableValue::Bool(true), HashableValue::Int(1)),
            (HashableValue::Int(1), HashableValue::Float(1.0)),
            (HashableValue::Bool(false), HashableValue::Float(0.0)),
            (HashableValue::Int(0), HashableValue::Float(-0.0)),
        ];
        for (a, b) in cases {
            assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Less);
            assert_eq!(b.try_cmp(&a).unwrap(), Ordering::Greater);
        }
    }

    #[test]
    fn test_try_cmp_int_float_exact() {
        use std::cmp::Ordering;

        // 2^53 + 1 rounds to 2^53 under f64; the comparison must not
        let above = HashableValue::Int(9_007_199_254_740_993);
        let below = HashableValue::Float(9_007_199_254_740_992.0);
        assert_eq!(above.try_cmp(&below).unwrap(), Ordering::Greater);
        assert_eq!(below.try_cmp(&above).unwrap(), Ordering::Less);

        // floats beyond the i64 range clear every integer
        let max = HashableValue::Int(i64::MAX);
        assert_eq!(
            max.try_cmp(&HashableValue::Float(9.3e18)).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            max.try_cmp(&HashableValue::Float(9.2e18)).unwrap(),
            Ordering::Greater
        );

        // -2^63 is exactly i64::MIN; equal value falls to the type rank
        assert_eq!(
            HashableValue::Int(i64::MIN)
                .try_cmp(&HashableValue::Float(-9.223372036854776e18))
                .unwrap(),
            Ordering::Less
        );

        // nan orders by sign, matching total_cmp at the float level
        assert_eq!(
            max.try_cmp(&HashableValue::Float(f64::NAN)).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            HashableValue::Int(i64::MIN)
                .try_cmp(&HashableValue::Float(-f64::NAN))
                .unwrap(),
            Ordering::Greater
        );
    }

    #[test]
    fn test_try_cmp_tuples() {
        use std::cmp::Ordering;

        let a = HashableValue::Tuple(vec![HashableValue::Int(1), HashableValue::Int(2)]);
        let b = HashableValue::Tuple(vec![HashableValue::Int(1), HashableValue::Int(3)]);
        let c = HashableValue::Tuple(vec![HashableValue::Int(1)]);
        assert_eq!(a.try_cmp(&b).unwrap(), Ordering::Less);
        assert_eq!(c.try_cmp(&a).unwrap(), Ordering::Less);
    }

    #[test]
    fn test_try_cmp_incomparable() {
        let a = HashableValue::Int(1);
        let b = HashableValue::Str("1".to_string());
        let err = a.try_cmp(&b).unwrap_err();
        assert_eq!(
            err.to_string(),
            "'<' not supported between instances of 'int' and 'str'"
        );

        let none = HashableValue::None;
        assert!(none.try_cmp(&a).is_err());
    }

    #[test]
    fn test_dict_equality_ignores_order() {
        let mut forward = Dict::new();
        forward.insert(HashableValue::from("a"), Value::Int(1));
        forward.insert(HashableValue::from("b"), Value::Int(2));

        let mut backward = Dict::new();
        backward.insert(HashableValue::from("b"), Value::Int(2));
        backward.insert(HashableValue::from("a"), Value::Int(1));

        assert_eq!(Value::Dict(forward), Value::Dict(backward));
    }

    #[test]
    fn test_const_is_methods() {
        const fn check_none(v: &Value) -> bool {
            v.is_none()
        }

        let none_value = Value::None;
        assert!(check_none(&none_value));
    }
}
