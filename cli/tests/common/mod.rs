#![allow(dead_code)]
use serde_json::Value;
use std::path::PathBuf;
use std::process::Command;

pub fn petcheck_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_petcheck"));
    cmd.env_remove("PETCHECK_BASE_URL");
    cmd
}

/// Writes a suite document to a per-process temp file and returns its path.
pub fn write_suite(name: &str, suite: &Value) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "petcheck_{name}_{}.json",
        std::process::id()
    ));
    std::fs::write(&path, serde_json::to_string_pretty(suite).unwrap())
        .expect("Failed to write suite file");
    path
}

pub fn json_subset(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(exp_map), Value::Object(act_map)) => exp_map.iter().all(|(k, v)| {
            act_map
                .get(k)
                .is_some_and(|act_v| json_subset(v, act_v))
        }),
        (Value::Array(exp_arr), Value::Array(act_arr)) => {
            exp_arr.len() == act_arr.len()
                && exp_arr
                    .iter()
                    .zip(act_arr.iter())
                    .all(|(e, a)| json_subset(e, a))
        }
        (Value::String(s), _) if s == "{{*}}" => true,
        (Value::String(s), Value::String(a)) if s.starts_with("{{regex:") && s.ends_with("}}") => {
            let pattern = &s[8..s.len() - 2];
            regex::Regex::new(pattern).is_ok_and(|re| re.is_match(a))
        }
        _ => expected == actual,
    }
}

pub fn validate_pure_json_response(stdout: &str, expected: &Value) -> Result<Value, String> {
    let actual: Value = serde_json::from_str(stdout)
        .map_err(|e| format!("Failed to parse actual JSON response: {e}\n{stdout}"))?;

    if !json_subset(expected, &actual) {
        return Err(format!(
            "JSON mismatch!\nExpected subset:\n{}\nActual:\n{}",
            serde_json::to_string_pretty(expected).unwrap(),
            serde_json::to_string_pretty(&actual).unwrap()
        ));
    }

    Ok(actual)
}
