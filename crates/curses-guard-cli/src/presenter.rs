//! CLI output rendering.

use clap::ValueEnum;
use serde::Serialize;

/// Output format for commands with structured results.
#[derive(Clone, Copy, Debug, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// One named library constant and its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConstantEntry {
    pub name: &'static str,
    pub value: i32,
}

impl ConstantEntry {
    pub fn new(name: &'static str, value: i32) -> Self {
        Self { name, value }
    }
}

pub fn render_constants(entries: &[ConstantEntry], format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(entries),
        OutputFormat::Text => {
            let width = entries.iter().map(|e| e.name.len()).max().unwrap_or(0);
            Ok(entries
                .iter()
                .map(|e| format!("{:<width$} {}", e.name, e.value))
                .collect::<Vec<_>>()
                .join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<ConstantEntry> {
        vec![
            ConstantEntry::new("COLOR_RED", 1),
            ConstantEntry::new("A_BOLD", 2097152),
        ]
    }

    #[test]
    fn test_text_aligns_values() {
        let text = render_constants(&sample(), OutputFormat::Text).unwrap();
        assert_eq!(text, "COLOR_RED 1\nA_BOLD    2097152");
    }

    #[test]
    fn test_json_is_an_array_of_entries() {
        let json = render_constants(&sample(), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["name"], "COLOR_RED");
        assert_eq!(parsed[1]["value"], 2097152);
    }

    #[test]
    fn test_empty_table_renders_nothing() {
        assert_eq!(render_constants(&[], OutputFormat::Text).unwrap(), "");
        assert_eq!(render_constants(&[], OutputFormat::Json).unwrap(), "[]");
    }
}
