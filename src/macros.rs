/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Arrays and objects recurse element by element; `null` maps to
/// [`Value::Null`](crate::Value::Null). Everything else converts through
/// `Value::from`, so an expression the value model cannot hold is a compile
/// error rather than a silent null.
///
/// Inside arrays and objects, a value must be a single token tree; wrap
/// compound expressions in parentheses, e.g. `toon!({ "n": (-0.5) })`.
///
/// # Examples
///
/// ```rust
/// use toon_codec::toon;
///
/// let data = toon!({
///     "name": "Ada",
///     "age": 36,
///     "tags": ["math", "computing"]
/// });
///
/// assert_eq!(data["name"].as_str(), Some("Ada"));
/// ```
#[macro_export]
macro_rules! toon {
    (null) => {
        $crate::Value::Null
    };

    // the zero-repetition case covers the empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::toon!($elem)),*])
    };

    // objects keep the literal's field order
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut object = $crate::ToonMap::new();
        $(
            object.insert($key.to_string(), $crate::toon!($value));
        )*
        $crate::Value::Object(object)
    }};

    // booleans, numbers, strings, and any other From-convertible expression
    ($other:expr) => {
        $crate::Value::from($other)
    };
}

#[cfg(test)]
mod tests {
    use crate::{ToonMap, Value};

    #[test]
    fn macro_primitives() {
        assert_eq!(toon!(null), Value::Null);
        assert_eq!(toon!(true), Value::Bool(true));
        assert_eq!(toon!(false), Value::Bool(false));
        assert_eq!(toon!(42), Value::Number(42.0));
        assert_eq!(toon!(3.5), Value::Number(3.5));
        assert_eq!(toon!("hello"), Value::String("hello".to_string()));
    }

    #[test]
    fn macro_accepts_from_convertible_expressions() {
        assert_eq!(toon!(-5), Value::Number(-5.0));

        let score = 2.5f64;
        assert_eq!(toon!(score), Value::Number(2.5));

        let name = String::from("Ada");
        assert_eq!(toon!(name), Value::String("Ada".to_string()));
    }

    #[test]
    fn macro_arrays() {
        assert_eq!(toon!([]), Value::Array(vec![]));

        let arr = toon!([1, 2, 3]);
        assert_eq!(
            arr,
            Value::Array(vec![
                Value::Number(1.0),
                Value::Number(2.0),
                Value::Number(3.0),
            ])
        );
    }

    #[test]
    fn macro_objects() {
        assert_eq!(toon!({}), Value::Object(ToonMap::new()));

        let obj = toon!({
            "name": "Ada",
            "age": 36
        });

        match obj {
            Value::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(map.get("name"), Some(&Value::String("Ada".to_string())));
                assert_eq!(map.get("age"), Some(&Value::Number(36.0)));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn macro_nesting() {
        let value = toon!({
            "user": { "id": 1, "roles": ["admin", "ops"] },
            "active": true
        });
        assert_eq!(value["user"]["id"], Value::Number(1.0));
        assert_eq!(
            value["user"]["roles"],
            Value::Array(vec![Value::from("admin"), Value::from("ops")])
        );
    }

    #[test]
    fn parenthesized_values_inside_containers() {
        let value = toon!({ "half": (-0.5), "nan": (f64::NAN) });
        assert_eq!(value["half"], Value::Number(-0.5));
        assert!(matches!(value["nan"], Value::Number(n) if n.is_nan()));
    }
}
