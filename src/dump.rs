//! Human-readable rendering of a resolved session.

use core::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::config_value::ConfigValue;
use crate::error::ConfigError;
use crate::session::Session;

/// Render the resolved settings and the files behind them.
///
/// Intended for `--dump-config` style debugging output; the result carries
/// ANSI colors.
pub fn render_session(session: &Session) -> Result<String, ConfigError> {
    let environment = session.environment()?;
    let settings = session.settings()?;

    let mut out = String::new();
    if environment.is_empty() {
        writeln!(out, "{}", "Resolved settings".bold()).ok();
    } else {
        writeln!(
            out,
            "{} ({})",
            "Resolved settings".bold(),
            environment.yellow()
        )
        .ok();
    }

    if settings.is_empty() {
        writeln!(out, "  {}", "(empty)".bright_black()).ok();
    }
    for (key, value) in settings {
        render_entry(&mut out, key, value, 1);
    }

    let files = session.loaded_files()?;
    if !files.is_empty() {
        writeln!(out, "{}", "Loaded from:".bold()).ok();
        for file in files {
            match &file.name {
                Some(name) => {
                    writeln!(out, "  {} ({name})", file.path.as_str().cyan()).ok();
                }
                None => {
                    writeln!(out, "  {}", file.path.as_str().cyan()).ok();
                }
            }
        }
    }

    Ok(out)
}

fn render_entry(out: &mut String, key: &str, value: &ConfigValue, depth: usize) {
    let indent = "  ".repeat(depth);
    if let ConfigValue::Object(map) = value {
        writeln!(out, "{indent}{}:", key.cyan()).ok();
        for (nested_key, nested) in map {
            render_entry(out, nested_key, nested, depth + 1);
        }
    } else {
        writeln!(out, "{indent}{}: {}", key.cyan(), scalar(value)).ok();
    }
}

fn scalar(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Null => "null".bright_black().to_string(),
        ConfigValue::Bool(b) => b.magenta().to_string(),
        ConfigValue::Integer(i) => i.blue().to_string(),
        ConfigValue::Float(x) => x.blue().to_string(),
        ConfigValue::String(s) => s.green().to_string(),
        ConfigValue::Array(items) => {
            let rendered: Vec<String> = items.iter().map(scalar).collect();
            format!("[{}]", rendered.join(", "))
        }
        ConfigValue::Object(map) => format!("{{{} keys}}", map.len()),
    }
}
