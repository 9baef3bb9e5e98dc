//! PYON Format Reference
//!
//! This module documents the PYON (Python Object Notation) text format as
//! implemented by this library.
//!
//! # Overview
//!
//! PYON is the literal notation Python prints when it `repr()`s a built-in
//! container. Services that log dictionaries, tuples, and sets into CSV
//! columns, message payloads, or line-oriented telemetry produce this
//! notation constantly; PYON gives that text a precise round-trippable
//! grammar outside of Python. Everything JSON can say, PYON can say, plus
//! three things JSON cannot: tuples, sets, and dict keys that are not
//! strings.
//!
//! ## Design Philosophy
//!
//! - **Repr fidelity**: Encoded output is byte-for-byte what Python would
//!   print for the same value
//! - **Literals only**: Decoding never resolves names, calls functions, or
//!   evaluates operators, so untrusted input cannot run anything
//! - **Round-trip**: `decode(encode(v))` compares equal to `v`, including
//!   float bit patterns and container order
//!
//! # Primitives
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | None | `None` | `{'x': None}` |
//! | Boolean | `True` or `False` | `{'ok': True}` |
//! | Integer | Decimal digits, optional sign | `42`, `-7` |
//! | Float | Decimal point or exponent | `1.0`, `2.5e-3` |
//! | Non-finite float | `inf`, `-inf`, `nan` | `{'limit': inf}` |
//! | String | `'single'` or `"double"` quoted | `'hello'` |
//!
//! **Integers** live in the signed 64-bit range; a literal outside it is an
//! error rather than a silent wrap or a silent float.
//!
//! **Floats** encode in their shortest decimal form that parses back to the
//! same bits, always keeping a point or exponent so `1.0` never collapses
//! into the integer `1`. Very large exponents like `1e999` decode to `inf`,
//! matching what `float('1e999')` produces.
//!
//! # Strings
//!
//! The encoder always emits single quotes. The decoder accepts either quote
//! style; the quote character itself is the only delimiter, so a
//! double-quoted string may contain bare single quotes and vice versa.
//!
//! **Escape sequences** (either quote style):
//!
//! ```text
//! \'  \"  - quotes
//! \\      - backslash
//! \n \r \t - newline, carriage return, tab
//! \a \b \f \v - bell, backspace, form feed, vertical tab
//! \0      - NUL
//! \xHH    - 2-digit hex escape
//! \uXXXX  - 4-digit Unicode escape
//! \UXXXXXXXX - 8-digit Unicode escape
//! ```
//!
//! An unrecognized escape is preserved literally (backslash and all), the
//! lenient behavior real logged data needs. On encode, control characters
//! print as `\xHH` and other non-ASCII text passes through unescaped.
//!
//! # Groupings
//!
//! ## Lists
//!
//! ```text
//! [1, 2, 3]
//! []
//! ```
//!
//! ## Tuples
//!
//! ```text
//! (1, 2, 3)
//! (1,)        # one element: the comma is what makes it a tuple
//! ()          # empty tuple
//! (1)         # no comma: this is the integer 1, parenthesized
//! ```
//!
//! Tuples and lists hold the same element kinds; they differ in identity
//! (a tuple never compares equal to a list) and in hashability.
//!
//! ## Sets
//!
//! ```text
//! {1, 2, 3}
//! set()       # the empty set; {} is already taken by the empty dict
//! ```
//!
//! `set(...)` with arguments is a call, not a literal, and is rejected.
//! Duplicate members collapse to the first occurrence.
//!
//! ## Dicts
//!
//! ```text
//! {'a': 1, 'b': 2}
//! {1: 'one', (1, 2): 'pair', None: 'nothing'}
//! {}
//! ```
//!
//! Keys may be any *hashable* value: `None`, booleans, integers, floats,
//! strings, and tuples of hashables. Lists, sets, and dicts cannot be keys.
//! Duplicate keys resolve last-write-wins, keeping the first occurrence's
//! position.
//!
//! A `{` grouping is a dict when a `:` follows its first element and a set
//! otherwise.
//!
//! # Whitespace and Commas
//!
//! Whitespace between tokens is insignificant, including newlines inside
//! groupings, so pretty-printed output decodes the same as compact output.
//! A trailing comma before a closing bracket is accepted everywhere.
//!
//! The canonical encoding uses `", "` between items and `": "` after keys.
//!
//! # Equality and Ordering
//!
//! - Dict equality ignores entry order; `{'a': 1, 'b': 2}` equals
//!   `{'b': 2, 'a': 1}`
//! - Floats compare by bit pattern in keys and members, so `nan` can be a
//!   key and `0.0`/`-0.0` are distinct keys
//! - For key sorting, numbers (booleans included) order numerically among
//!   themselves, strings lexicographically, tuples elementwise; any other
//!   mix of key types has no defined order and sorting reports it
//! - Numerically equal keys of different types, like `1` and `1.0`, sort
//!   in a fixed bool-int-float order, so canonical text is insertion-order
//!   independent
//!
//! # JSON Mapping
//!
//! The strict converter walks a decoded value and produces compact JSON:
//!
//! | PYON | JSON |
//! |------|------|
//! | `None`, `True`, `False` | `null`, `true`, `false` |
//! | Integer, finite float | number |
//! | String | string |
//! | List, tuple | array |
//! | Dict | object, keys stringified `str()`-style |
//! | Set | error (no JSON form) |
//! | `inf`, `-inf`, `nan` | error in value position |
//!
//! Key stringification: `1` becomes `"1"`, `True` becomes `"True"`,
//! `(1, 2)` becomes `"(1, 2)"`, strings stay as they are.
//!
//! # Limits
//!
//! - **Nesting**: groupings deeper than 128 levels fail with a defined
//!   error instead of overflowing the stack
//! - **Not in the grammar**: bytes literals, complex numbers, `Ellipsis`,
//!   triple-quoted strings, implicit string concatenation, comments,
//!   underscores in numbers, hex/octal/binary integers
//!
//! # Empty Input
//!
//! The empty string decodes to the empty string value rather than erroring;
//! tabular pipelines feed cell text straight through and empty cells must
//! survive. Whitespace-only input is a syntax error like any other
//! non-literal text.

// This module contains only documentation; no implementation code
