//! Pure helper functions for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value is not the expected type, the default is returned.
//! These never fail; they always produce a usable value.

use serde_json::Value;

/// Extracts an `f64` from `params[name]`, returning `default` if missing or wrong type.
///
/// Accepts both JSON numbers (including integers) and converts them to f64.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Like [`param_f64`], but tries each key in order before falling back.
///
/// Hosts written against camelCase props (`borderRadius`) and Rust-side
/// snake_case configs (`border_radius`) can share one parser this way.
pub fn param_f64_any(params: &Value, names: &[&str], default: f64) -> f64 {
    names
        .iter()
        .find_map(|name| params.get(*name).and_then(Value::as_f64))
        .unwrap_or(default)
}

/// Extracts a `u32` from `params[name]`, returning `default` if missing, wrong
/// type, negative, or too large.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a string slice from `params[name]`, or `None` if missing or wrong type.
pub fn param_str<'a>(params: &'a Value, name: &str) -> Option<&'a str> {
    params.get(name).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // -- param_f64 --

    #[test]
    fn param_f64_extracts_existing_float() {
        let params = json!({"speed": 2.5});
        assert!((param_f64(&params, "speed", 1.0) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_extracts_integer_as_float() {
        let params = json!({"borderRadius": 32});
        assert!((param_f64(&params, "borderRadius", 0.0) - 32.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_key_missing() {
        let params = json!({"other": 1.0});
        assert!((param_f64(&params, "speed", 3.0) - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_when_wrong_type() {
        let params = json!({"speed": "fast"});
        assert!((param_f64(&params, "speed", 1.0) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_returns_default_for_non_object() {
        let params = json!("not an object");
        assert!((param_f64(&params, "speed", 7.0) - 7.0).abs() < f64::EPSILON);
    }

    // -- param_f64_any --

    #[test]
    fn param_f64_any_prefers_first_present_key() {
        let params = json!({"border_radius": 10, "borderRadius": 20});
        let r = param_f64_any(&params, &["border_radius", "borderRadius"], 24.0);
        assert!((r - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_any_falls_through_to_later_key() {
        let params = json!({"borderRadius": 20});
        let r = param_f64_any(&params, &["border_radius", "borderRadius"], 24.0);
        assert!((r - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn param_f64_any_returns_default_when_none_match() {
        let r = param_f64_any(&json!({}), &["a", "b"], 24.0);
        assert!((r - 24.0).abs() < f64::EPSILON);
    }

    // -- param_u32 --

    #[test]
    fn param_u32_extracts_existing_integer() {
        assert_eq!(param_u32(&json!({"octaves": 4}), "octaves", 6), 4);
    }

    #[test]
    fn param_u32_returns_default_for_float_or_negative() {
        assert_eq!(param_u32(&json!({"octaves": 2.5}), "octaves", 6), 6);
        assert_eq!(param_u32(&json!({"octaves": -1}), "octaves", 6), 6);
    }

    #[test]
    fn param_u32_returns_default_when_too_large() {
        let params = json!({"octaves": u64::MAX});
        assert_eq!(param_u32(&params, "octaves", 6), 6);
    }

    // -- param_str --

    #[test]
    fn param_str_extracts_existing_string() {
        let params = json!({"color": "#ef4444"});
        assert_eq!(param_str(&params, "color"), Some("#ef4444"));
    }

    #[test]
    fn param_str_returns_none_for_wrong_type_or_missing() {
        assert_eq!(param_str(&json!({"color": 42}), "color"), None);
        assert_eq!(param_str(&json!({}), "color"), None);
    }
}
