use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

lazy_static! {
    static ref NAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9_][a-zA-Z0-9_/-]*$").unwrap();
}

pub fn validate_name(name: &str) -> Result<String, String> {
    if name.len() > 100 {
        return Err("Name must be 100 characters or less".to_string());
    }
    if !NAME_REGEX.is_match(name) {
        return Err("Name must match pattern: ^[a-zA-Z0-9_][a-zA-Z0-9_/-]*$".to_string());
    }
    Ok(name.to_string())
}

pub fn validate_base_url(url: &str) -> Result<String, String> {
    let parsed = reqwest::Url::parse(url).map_err(|e| format!("Invalid URL '{url}': {e}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(url.to_string()),
        scheme => Err(format!("Unsupported URL scheme '{scheme}', expected http or https")),
    }
}

pub fn validate_parallelism(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Parallelism must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("Parallelism '{value}' must be a positive integer")),
    }
}

pub fn validate_timeout(value: &str) -> Result<Duration, String> {
    let secs = match value.parse::<f64>() {
        Ok(secs) if secs > 0.0 => secs,
        _ => return Err(format!("Timeout value '{value}' must be a positive number")),
    };
    Duration::try_from_secs_f64(secs)
        .map_err(|_| format!("Timeout value '{value}' is too large"))
}
