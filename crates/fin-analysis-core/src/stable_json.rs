//! Deterministic JSON rendering and a short fingerprint over it.

use serde_json::Value;

const HASH_SEED: i32 = 5381;
const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Serialize `value` with object keys sorted lexicographically at every
/// depth. Array order is preserved.
pub fn to_stable_string(value: &Value) -> String {
    let mut out = String::new();
    write_stable(value, &mut out);
    out
}

fn write_stable(value: &Value, out: &mut String) {
    match value {
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_stable(item, out);
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_stable(&map[key.as_str()], out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Non-cryptographic fingerprint: djb2-xor over the UTF-16 code units of the
/// stable rendering, as unsigned 32-bit base 36. Suitable for cache keys.
pub fn stable_hash(value: &Value) -> String {
    let rendered = to_stable_string(value);
    let mut hash = HASH_SEED;
    for unit in rendered.encode_utf16() {
        hash = hash.wrapping_mul(33) ^ i32::from(unit);
    }
    to_base36(hash as u32)
}

fn to_base36(mut n: u32) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        digits.push(BASE36_DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    digits.reverse();
    String::from_utf8_lossy(&digits).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_keys_sorted_at_every_depth() {
        let v = json!({"b": 1, "a": {"z": true, "c": null}, "m": [3, {"y": 1, "x": 2}]});
        assert_eq!(
            to_stable_string(&v),
            r#"{"a":{"c":null,"z":true},"b":1,"m":[3,{"x":2,"y":1}]}"#
        );
    }

    #[test]
    fn test_strings_are_escaped() {
        assert_eq!(to_stable_string(&json!({"k\"": "a\nb"})), r#"{"k\"":"a\nb"}"#);
    }

    #[test]
    fn test_hash_of_empty_object() {
        // "{}": ((5381*33) ^ 123) * 33 ^ 125
        let expected = (((5381i32 * 33) ^ 123) * 33) ^ 125;
        assert_eq!(stable_hash(&json!({})), to_base36(expected as u32));
    }

    #[test]
    fn test_hash_independent_of_key_order() {
        let a = json!({"principal": 1000, "annualRate": 0.05});
        let b = json!({"annualRate": 0.05, "principal": 1000});
        assert_eq!(stable_hash(&a), stable_hash(&b));
        assert_ne!(stable_hash(&a), stable_hash(&json!({"principal": 1001, "annualRate": 0.05})));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u32::MAX), "1z141z3");
    }
}
