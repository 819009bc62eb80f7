use console::style;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        };
        Self { format }
    }

    pub fn success(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => println!("{} {}", style("✓").green().bold(), message),
            OutputFormat::Json => print_json(&status_message("success", message)),
        }
    }

    pub fn info(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => println!("{} {}", style("ℹ").blue().bold(), message),
            OutputFormat::Json => print_json(&status_message("info", message)),
        }
    }

    pub fn warning(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", style("⚠").yellow().bold(), message),
            OutputFormat::Json => eprint_json(&status_message("warning", message)),
        }
    }

    /// Rows as a table for humans; JSON mode prints nothing and leaves the
    /// data to [`OutputWriter::result`]
    pub fn table<T: Tabled>(&self, rows: Vec<T>) {
        if let OutputFormat::Human = self.format {
            if rows.is_empty() {
                println!("{}", style("(no data)").dim());
            } else {
                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{}", table);
            }
        }
    }

    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": "success",
                    "data": data,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        match self.format {
            OutputFormat::Human => println!("{}: {}", style(key).bold(), value),
            OutputFormat::Json => print_json(&serde_json::json!({
                key.to_string(): value.to_string(),
            })),
        }
    }

    pub fn section(&self, title: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

fn status_message(status: &str, message: impl Display) -> Value {
    serde_json::json!({
        "status": status,
        "message": message.to_string(),
    })
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn print_json(value: &Value) {
    println!("{}", pretty(value));
}

fn eprint_json(value: &Value) {
    eprintln!("{}", pretty(value));
}
