use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

use pag_tracker::types::ProjectStatus;

/// Global output format setting
static OUTPUT_JSON: AtomicBool = AtomicBool::new(false);
static QUIET: AtomicBool = AtomicBool::new(false);

pub fn set_json_output(json: bool) {
    OUTPUT_JSON.store(json, Ordering::Relaxed);
}

pub fn is_json_output() -> bool {
    OUTPUT_JSON.load(Ordering::Relaxed)
}

pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

/// Print a table or JSON depending on output mode
pub fn print_table<T, R, F>(items: &[T], to_row: F)
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(items).unwrap_or_default());
    } else {
        let rows: Vec<R> = items.iter().map(&to_row).collect();
        let table = Table::new(rows).with(Style::rounded()).to_string();
        println!("{table}");
    }
}

/// Print a single item or JSON depending on output mode
pub fn print_item<T: Serialize>(item: &T, display: impl FnOnce(&T)) {
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
    } else {
        display(item);
    }
}

/// Print a message (skipped in quiet mode; a small object in JSON mode)
pub fn print_message(message: &str) {
    if QUIET.load(Ordering::Relaxed) {
        return;
    }
    if is_json_output() {
        println!("{}", serde_json::json!({ "message": message }));
    } else {
        println!("{message}");
    }
}

/// Render an opaque response body: pretty JSON in JSON mode, otherwise a
/// best-effort table.
pub fn print_value(value: &Value) {
    if is_json_output() {
        println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
    } else {
        println!("{}", render_value(value));
    }
}

pub fn render_value(value: &Value) -> String {
    match value {
        Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
            records_table(items)
        }
        Value::Array(items) if items.is_empty() => "(none)".to_string(),
        Value::Object(map) if map.values().any(|v| v.is_array()) => map
            .iter()
            .map(|(key, v)| format!("{}\n{}", heading(key).bold(), render_value(v)))
            .collect::<Vec<_>>()
            .join("\n\n"),
        Value::Object(map) => {
            let mut builder = Builder::default();
            for (key, v) in map {
                builder.push_record([heading(key), cell(v)]);
            }
            builder.build().with(Style::rounded()).to_string()
        }
        other => cell(other),
    }
}

fn records_table(items: &[Value]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key);
                }
            }
        }
    }

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| heading(c)));
    for item in items {
        builder.push_record(
            columns
                .iter()
                .map(|c| item.get(*c).map(cell).unwrap_or_default()),
        );
    }
    builder.build().with(Style::rounded()).to_string()
}

/// Flatten a JSON value into one table cell.
pub fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => match map.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => value.to_string(),
        },
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
    }
}

/// `single_countries_data` -> `Single countries data`
fn heading(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format status with color for the known approval states
pub fn status_colored(status: &str) -> String {
    match ProjectStatus::from_label(status) {
        Some(known) => known.colored(),
        None => status.to_string(),
    }
}

/// Monetary values arrive as decimal strings ("1500000.00") or numbers.
pub fn format_money(value: Option<&Value>) -> String {
    let raw = match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => return "-".to_string(),
    };

    let (whole, frac) = match raw.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (raw.as_str(), None),
    };
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", whole),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return raw;
    }

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Format a date string nicely using chrono
pub fn format_date(iso: &str) -> String {
    use chrono::{DateTime, Local, Utc};

    if let Ok(dt) = iso.parse::<DateTime<Utc>>() {
        let local: DateTime<Local> = dt.into();
        local.format("%Y-%m-%d %H:%M").to_string()
    } else {
        // Fallback: just extract date portion
        iso.split('T').next().unwrap_or(iso).to_string()
    }
}

/// Truncate a string with ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
