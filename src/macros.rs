/// Builds a [`Value`](crate::Value) from PYON-shaped syntax.
///
/// Lists, tuples (including the one-element `(1,)` form), sets, dicts, and
/// the `None`/`True`/`False` keywords follow their PYON meaning; any other
/// expression converts through [`to_value`](crate::to_value). Dict keys may
/// be any hashable shape, tuples included.
///
/// ```rust
/// use serde_pyon::{encode, pyon};
///
/// let value = pyon!({"name": "Alice", "tags": {1, 2}, "pos": (3, 4)});
/// assert_eq!(encode(&value), "{'name': 'Alice', 'tags': {1, 2}, 'pos': (3, 4)}");
/// ```
///
/// # Panics
///
/// Panics if a dict key or set member is not hashable (a list, set, or
/// dict).
#[macro_export]
macro_rules! pyon {
    // Handle None
    (None) => {
        $crate::Value::None
    };

    // Handle True
    (True) => {
        $crate::Value::Bool(true)
    };

    // Handle False
    (False) => {
        $crate::Value::Bool(false)
    };

    // Handle empty list
    ([]) => {
        $crate::Value::List(vec![])
    };

    // Handle non-empty list
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::pyon!($elem)),*])
    };

    // Handle empty tuple
    (()) => {
        $crate::Value::Tuple(vec![])
    };

    // Handle one-element tuple (trailing comma required, as in Python)
    (($elem:tt ,)) => {
        $crate::Value::Tuple(vec![$crate::pyon!($elem)])
    };

    // Handle longer tuples
    (($first:tt , $($rest:tt),+ $(,)?)) => {
        $crate::Value::Tuple(vec![$crate::pyon!($first), $($crate::pyon!($rest)),+])
    };

    // A parenthesized value without a comma is just that value
    (($value:tt)) => {
        $crate::pyon!($value)
    };

    // Handle empty dict
    ({}) => {
        $crate::Value::Dict($crate::Dict::new())
    };

    // Handle dict with any hashable key shape
    ({ $($key:tt : $value:tt),+ $(,)? }) => {{
        let mut dict = $crate::Dict::new();
        $(
            dict.insert(
                $crate::pyon!($key)
                    .into_hashable()
                    .expect("dict keys must be hashable"),
                $crate::pyon!($value),
            );
        )+
        $crate::Value::Dict(dict)
    }};

    // Handle set
    ({ $($elem:tt),+ $(,)? }) => {
        $crate::Value::set(vec![
            $(
                $crate::pyon!($elem)
                    .into_hashable()
                    .expect("set members must be hashable")
            ),+
        ])
    };

    // Fallback for any expression
    ($other:expr) => {
        $crate::to_value(&$other).unwrap_or($crate::Value::None)
    };
}

#[cfg(test)]
mod tests {
    use crate::{encode, Dict, HashableValue, Value};

    #[test]
    fn test_pyon_macro_primitives() {
        assert_eq!(pyon!(None), Value::None);
        assert_eq!(pyon!(True), Value::Bool(true));
        assert_eq!(pyon!(False), Value::Bool(false));
        assert_eq!(pyon!(42), Value::Int(42));
        assert_eq!(pyon!(3.5), Value::Float(3.5));
        assert_eq!(pyon!("hello"), Value::Str("hello".to_string()));
    }

    #[test]
    fn test_pyon_macro_lists() {
        assert_eq!(pyon!([]), Value::List(vec![]));

        let list = pyon!([1, 2, 3]);
        match list {
            Value::List(vec) => {
                assert_eq!(vec.len(), 3);
                assert_eq!(vec[0], Value::Int(1));
                assert_eq!(vec[1], Value::Int(2));
                assert_eq!(vec[2], Value::Int(3));
            }
            _ => panic!("Expected list"),
        }
    }

    #[test]
    fn test_pyon_macro_tuples() {
        assert_eq!(pyon!(()), Value::Tuple(vec![]));
        assert_eq!(pyon!((1,)), Value::Tuple(vec![Value::Int(1)]));
        assert_eq!(
            pyon!((1, 2)),
            Value::Tuple(vec![Value::Int(1), Value::Int(2)])
        );

        // a parenthesized value without a comma is not a tuple
        assert_eq!(pyon!((1)), Value::Int(1));
    }

    #[test]
    fn test_pyon_macro_sets() {
        let set = pyon!({1, 2, 3});
        assert_eq!(
            set,
            Value::set([
                HashableValue::Int(1),
                HashableValue::Int(2),
                HashableValue::Int(3),
            ])
        );

        // duplicates collapse
        assert_eq!(pyon!({1, 1, 2}), pyon!({1, 2}));
    }

    #[test]
    fn test_pyon_macro_dicts() {
        assert_eq!(pyon!({}), Value::Dict(Dict::new()));

        let dict = pyon!({
            "name": "Alice",
            "age": 30
        });

        match dict {
            Value::Dict(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(
                    map.get_str("name"),
                    Some(&Value::Str("Alice".to_string()))
                );
                assert_eq!(map.get_str("age"), Some(&Value::Int(30)));
            }
            _ => panic!("Expected dict"),
        }
    }

    #[test]
    fn test_pyon_macro_nonstring_keys() {
        let dict = pyon!({1: "one", (1, 2): "pair"});
        match dict {
            Value::Dict(map) => {
                assert_eq!(
                    map.get(&HashableValue::Int(1)),
                    Some(&Value::Str("one".to_string()))
                );
                let pair = HashableValue::Tuple(vec![
                    HashableValue::Int(1),
                    HashableValue::Int(2),
                ]);
                assert_eq!(map.get(&pair), Some(&Value::Str("pair".to_string())));
            }
            _ => panic!("Expected dict"),
        }
    }

    #[test]
    fn test_pyon_macro_nested() {
        let value = pyon!({"a": [1, (2, 3)], "b": {4, 5}});
        assert_eq!(encode(&value), "{'a': [1, (2, 3)], 'b': {4, 5}}");
    }
}
