//! Positional argument extraction.

use crate::models::ScriptProfile;
use crate::{Error, Result};
use serde_json::Value;

/// Returns the string argument at `index`.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` if the argument is missing or not a string.
pub fn required_str<'a>(args: &'a [Value], index: usize, name: &str) -> Result<&'a str> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.as_str()),
        Some(Value::Null) | None => Err(Error::InvalidArgument(format!(
            "missing argument #{index} '{name}'"
        ))),
        Some(other) => Err(Error::InvalidArgument(format!(
            "argument #{index} '{name}' must be a string, got {}",
            type_name(other)
        ))),
    }
}

/// Returns the string argument at `index`, treating a missing or `null`
/// argument as absent.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` if the argument is present but not a string.
pub fn optional_str<'a>(args: &'a [Value], index: usize, name: &str) -> Result<Option<&'a str>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => required_str(args, index, name).map(Some),
    }
}

/// Returns the script profile at `index`, or `default` when absent.
///
/// # Errors
///
/// Returns `Error::InvalidArgument` for a non-string or unknown profile.
pub fn script_profile(args: &[Value], index: usize, default: ScriptProfile) -> Result<ScriptProfile> {
    let Some(name) = optional_str(args, index, "script")? else {
        return Ok(default);
    };
    ScriptProfile::parse(name).ok_or_else(|| {
        Error::InvalidArgument(format!("unknown script profile '{name}'"))
    })
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_required_str_present() {
        let args = vec![json!("a.png")];
        assert_eq!(required_str(&args, 0, "imageReference").unwrap(), "a.png");
    }

    #[test_case(vec![] ; "missing")]
    #[test_case(vec![json!(null)] ; "null")]
    #[test_case(vec![json!(42)] ; "number")]
    #[test_case(vec![json!({"path": "a"})] ; "object")]
    fn test_required_str_rejects(args: Vec<Value>) {
        assert!(matches!(
            required_str(&args, 0, "imageReference"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_type_reported_in_message() {
        let args = vec![json!(true)];
        let err = required_str(&args, 0, "assetName").unwrap_err();
        assert!(err.to_string().contains("boolean"));
    }

    #[test_case(vec![json!("x")], ScriptProfile::Devanagari ; "absent")]
    #[test_case(vec![json!("x"), json!(null)], ScriptProfile::Devanagari ; "null")]
    #[test_case(vec![json!("x"), json!("latin")], ScriptProfile::Latin ; "latin")]
    #[test_case(vec![json!("x"), json!("KOREAN")], ScriptProfile::Korean ; "uppercase")]
    fn test_script_profile(args: Vec<Value>, expected: ScriptProfile) {
        assert_eq!(
            script_profile(&args, 1, ScriptProfile::Devanagari).unwrap(),
            expected
        );
    }

    #[test]
    fn test_unknown_script_profile() {
        let args = vec![json!("x"), json!("elvish")];
        assert!(matches!(
            script_profile(&args, 1, ScriptProfile::Latin),
            Err(Error::InvalidArgument(_))
        ));
    }
}
