use lazy_static::lazy_static;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;

lazy_static! {
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{([a-zA-Z_][a-zA-Z0-9_]*)\}").unwrap();
}

/// Names of all `{placeholder}`s in a path template, in order of appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .collect()
}

fn render_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Substitutes every placeholder; fails with the list of unbound names.
pub fn render(template: &str, params: &BTreeMap<String, Value>) -> Result<String, Vec<String>> {
    let unbound: Vec<String> = placeholders(template)
        .into_iter()
        .filter(|name| !params.contains_key(name))
        .collect();
    if !unbound.is_empty() {
        return Err(unbound);
    }

    let rendered = PLACEHOLDER_REGEX.replace_all(template, |caps: &Captures| {
        params.get(&caps[1]).map(render_param).unwrap_or_default()
    });
    Ok(rendered.into_owned())
}
