use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

fn render_text_from_model<T: Serialize + ?Sized>(model: &T) -> String {
    let value = serde_json::to_value(model).unwrap_or(Value::Null);
    render_value(&value, 0)
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn render_value(value: &Value, indent: usize) -> String {
    let pad = " ".repeat(indent);
    match value {
        Value::Null => String::new(),
        Value::Array(arr) => {
            let mut s = String::new();
            for item in arr {
                match item {
                    Value::Array(_) | Value::Object(_) => {
                        s.push_str(&format!("{pad}-\n"));
                        s.push_str(&render_value(item, indent + 2));
                    }
                    _ => s.push_str(&format!("{pad}- {}\n", render_scalar(item))),
                }
            }
            s
        }
        Value::Object(map) => {
            let mut s = String::new();
            for (k, v) in map {
                match v {
                    Value::Null => {}
                    Value::Array(_) | Value::Object(_) => {
                        s.push_str(&format!("{pad}{k}:\n"));
                        s.push_str(&render_value(v, indent + 2));
                    }
                    _ => s.push_str(&format!("{pad}{k}: {}\n", render_scalar(v))),
                }
            }
            s
        }
        scalar => indent_lines(&pad, &render_scalar(scalar)),
    }
}

fn indent_lines(pad: &str, text: &str) -> String {
    text.lines().map(|line| format!("{pad}{line}\n")).collect()
}

pub struct Formatter {
    engine: OutputFormat,
}

impl Formatter {
    pub fn new(engine: OutputFormat) -> Self {
        Self { engine }
    }

    pub fn format<T: Serialize>(&self, model: &T) -> String {
        match self.engine {
            OutputFormat::Text => render_text_from_model(model),
            OutputFormat::Json => serde_json::to_string_pretty(model).unwrap_or_default(),
        }
    }

    pub fn format_list<T: Serialize>(&self, list: &[T], title: &str, empty_msg: &str) -> String {
        match self.engine {
            OutputFormat::Text => {
                if list.is_empty() {
                    format!("{empty_msg}\n")
                } else {
                    let content = render_text_from_model(list);
                    if title.is_empty() {
                        content
                    } else {
                        format!("{title}\n{content}")
                    }
                }
            }
            OutputFormat::Json => {
                serde_json::to_string_pretty(list).unwrap_or_else(|_| "[]".to_string())
            }
        }
    }
}

pub fn get_formatter(output_format: &OutputFormat) -> Formatter {
    Formatter::new(*output_format)
}
