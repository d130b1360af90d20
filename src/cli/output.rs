//! Shared output formatting utilities for CLI commands
//!
//! JSON, YAML and table output. Secret values are printed as `[REDACTED]`
//! unless the caller asked for them with `--reveal`.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::module::FunctionDoc;
use crate::secrets::{ResolvedSecret, SecretRecord, SecretString, REDACTED};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Table,
}

impl OutputFormat {
    /// Parse output format from string
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            "table" => Ok(OutputFormat::Table),
            _ => anyhow::bail!(
                "Unsupported output format: '{}'. Use 'json', 'yaml', or 'table'.",
                s
            ),
        }
    }
}

/// A key/value pair as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecretRow {
    pub key: String,
    pub value: String,
}

impl SecretRow {
    pub fn new(key: impl Into<String>, value: &SecretString, reveal: bool) -> Self {
        let value =
            if reveal { value.expose_secret().to_string() } else { REDACTED.to_string() };
        Self { key: key.into(), value }
    }

    pub fn from_resolved(secret: &ResolvedSecret, reveal: bool) -> Self {
        Self::new(secret.key.clone(), &secret.value, reveal)
    }
}

/// Print data as JSON
pub fn print_json<T: Serialize>(data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

/// Print data as YAML
pub fn print_yaml<T: Serialize>(data: &T) -> Result<()> {
    let yaml = serde_yaml::to_string(data).context("Failed to serialize to YAML")?;
    println!("{}", yaml);
    Ok(())
}

pub fn print_secret_rows(rows: &[SecretRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Yaml => print_yaml(&rows),
        OutputFormat::Table => {
            print_table_header(&[("Key", 32), ("Value", 48)]);
            for row in rows {
                println!("{:<32} {}", truncate(&row.key, 32), truncate(&row.value, 48));
            }
            println!();
            Ok(())
        }
    }
}

/// Print raw API records. Values stay redacted in every format.
pub fn print_records(records: &[SecretRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&records),
        OutputFormat::Yaml => print_yaml(&records),
        OutputFormat::Table => {
            print_table_header(&[("Key", 32), ("Path", 20), ("Env", 12), ("Version", 8), ("Tags", 24)]);
            for record in records {
                let tags: Vec<&str> = record.tags.iter().map(|t| t.slug.as_str()).collect();
                println!(
                    "{:<32} {:<20} {:<12} {:<8} {}",
                    truncate(&record.secret_key, 32),
                    truncate(record.secret_path.as_deref().unwrap_or("-"), 20),
                    truncate(record.environment.as_deref().unwrap_or("-"), 12),
                    record.version.map_or_else(|| "-".to_string(), |v| v.to_string()),
                    truncate(&tags.join(","), 24)
                );
            }
            println!();
            Ok(())
        }
    }
}

pub fn print_functions(functions: &[FunctionDoc], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&functions),
        OutputFormat::Yaml => print_yaml(&functions),
        OutputFormat::Table => {
            for function in functions {
                println!();
                println!("{}: {}", function.name, function.summary);
                print_table_header(&[("Parameter", 26), ("Type", 12), ("Default", 10), ("Description", 50)]);
                for param in function.parameters {
                    let kind = serde_json::to_value(param.kind)
                        .ok()
                        .and_then(|v| v.as_str().map(str::to_string))
                        .unwrap_or_default();
                    println!(
                        "{:<26} {:<12} {:<10} {}",
                        param.name,
                        kind,
                        param.default.unwrap_or("required"),
                        param.doc
                    );
                }
                println!("Returns: {}", function.returns);
            }
            println!();
            Ok(())
        }
    }
}

/// Truncate string to maximum length with ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Print a horizontal separator line
pub fn print_separator(width: usize) {
    println!("{}", "-".repeat(width));
}

/// Print a table header
pub fn print_table_header(columns: &[(&str, usize)]) {
    println!();
    let mut header = String::new();
    for (name, width) in columns {
        header.push_str(&format!("{:<width$} ", name, width = width));
    }
    println!("{}", header.trim());

    let total_width: usize = columns.iter().map(|(_, w)| w + 1).sum();
    print_separator(total_width.saturating_sub(1));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::FUNCTIONS;

    #[test]
    fn test_output_format_parse() {
        assert_eq!(OutputFormat::parse("json").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("YAML").unwrap(), OutputFormat::Yaml);
        assert_eq!(OutputFormat::parse("table").unwrap(), OutputFormat::Table);
        assert!(OutputFormat::parse("csv").is_err());
    }

    #[test]
    fn test_secret_row_redacts_unless_revealed() {
        let value = SecretString::new("hunter2");
        assert_eq!(SecretRow::new("DB_PASSWORD", &value, false).value, "[REDACTED]");
        assert_eq!(SecretRow::new("DB_PASSWORD", &value, true).value, "hunter2");
    }

    #[test]
    fn test_print_rows_and_functions() {
        let rows = vec![SecretRow::new("A", &SecretString::new("1"), false)];
        for format in [OutputFormat::Json, OutputFormat::Yaml, OutputFormat::Table] {
            assert!(print_secret_rows(&rows, format).is_ok());
            assert!(print_functions(FUNCTIONS, format).is_ok());
        }
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("hello", 3), "...");
        assert_eq!(truncate("ключ-секрета", 7), "ключ...");
    }
}
