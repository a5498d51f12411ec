// Step options and `step__option` parameter routing.
//
// Parameters for a whole pipeline are a flat map such as
// {"stemmer__language": "english", "stopwords__stopwords": [...]}; each key
// is split on the first double underscore and handed to the named step.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{PipelineError, Result};

/// Options for a single step, keyed by option name.
pub type Options = serde_json::Map<String, Value>;

/// Separator between step name and option name in pipeline parameters.
pub const STEP_SEPARATOR: &str = "__";

/// Group flat `step__option` parameters by step name.
///
/// Keys without a separator are rejected as invalid rather than silently
/// ignored.
pub fn route_params(params: &Options) -> Result<BTreeMap<String, Options>> {
    let mut routed: BTreeMap<String, Options> = BTreeMap::new();
    for (key, value) in params {
        let Some((step, option)) = key.split_once(STEP_SEPARATOR) else {
            return Err(PipelineError::InvalidOption {
                key: key.clone(),
                reason: format!("expected a 'step{STEP_SEPARATOR}option' key"),
            });
        };
        routed
            .entry(step.to_string())
            .or_default()
            .insert(option.to_string(), value.clone());
    }
    Ok(routed)
}

/// Read a string option.
pub fn get_str<'a>(options: &'a Options, key: &str) -> Result<Option<&'a str>> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(invalid(key, "a string", other)),
    }
}

/// Read a list-of-strings option.
pub fn get_str_list(options: &Options, key: &str) -> Result<Option<Vec<String>>> {
    match options.get(key) {
        None => Ok(None),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(invalid(key, "a list of strings", other)),
            })
            .collect::<Result<Vec<_>>>()
            .map(Some),
        Some(other) => Err(invalid(key, "a list of strings", other)),
    }
}

/// Read a non-negative number option.
pub fn get_f64(options: &Options, key: &str) -> Result<Option<f64>> {
    match options.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v >= 0.0 => Ok(Some(v)),
            _ => Err(invalid(key, "a non-negative number", &Value::Number(n.clone()))),
        },
        Some(other) => Err(invalid(key, "a number", other)),
    }
}

/// Reject any option key not in `known`.
pub fn ensure_known(step: &str, options: &Options, known: &[&str]) -> Result<()> {
    match options.keys().find(|k| !known.contains(&k.as_str())) {
        Some(key) => Err(PipelineError::UnknownOption {
            step: step.to_string(),
            key: key.clone(),
        }),
        None => Ok(()),
    }
}

fn invalid(key: &str, expected: &str, found: &Value) -> PipelineError {
    PipelineError::InvalidOption {
        key: key.to_string(),
        reason: format!("expected {expected}, got {found}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn opts(v: Value) -> Options {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn test_route_params_groups_by_step() {
        let params = opts(json!({
            "stemmer__language": "english",
            "count_vect__min_df": 2,
            "count_vect__max_df": 0.98,
        }));
        let routed = route_params(&params).unwrap();
        assert_eq!(routed.len(), 2);
        assert_eq!(routed["stemmer"]["language"], json!("english"));
        assert_eq!(routed["count_vect"].len(), 2);
    }

    #[test]
    fn test_route_params_splits_on_first_separator() {
        let routed = route_params(&opts(json!({"a__b__c": 1}))).unwrap();
        assert!(routed["a"].contains_key("b__c"));
    }

    #[test]
    fn test_route_params_rejects_bare_key() {
        assert!(route_params(&opts(json!({"language": "french"}))).is_err());
    }

    #[test]
    fn test_getters_check_types() {
        let o = opts(json!({"s": "x", "n": 3, "l": ["a", "b"], "neg": -1}));
        assert_eq!(get_str(&o, "s").unwrap(), Some("x"));
        assert!(get_str(&o, "n").is_err());
        assert_eq!(get_f64(&o, "n").unwrap(), Some(3.0));
        assert!(get_f64(&o, "neg").is_err());
        assert_eq!(
            get_str_list(&o, "l").unwrap(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(get_str(&o, "missing").unwrap(), None);
    }

    #[test]
    fn test_ensure_known() {
        let o = opts(json!({"language": "french"}));
        assert!(ensure_known("stemmer", &o, &["language"]).is_ok());
        assert!(matches!(
            ensure_known("letter_splitter", &o, &[]),
            Err(PipelineError::UnknownOption { .. })
        ));
    }
}
