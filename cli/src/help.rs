//! Plain-text help and error rendering.
//!
//! The help message mirrors the configuration: short description, one
//! usage line per command path, the parameter table, long description.
//! No styling, no wrapping; the text goes to a terminal as-is.

use std::fmt::Write as _;

use crate::error::CliError;
use crate::interface::Interface;

impl Interface {
    /// Renders the usage block: one line per leaf of the command tree.
    pub fn usage(&self) -> String {
        let mut out = String::from("Usage:\n");
        for (path, pattern) in self.engine().tree().leaves() {
            if path.is_empty() {
                let _ = writeln!(out, "  {} {}", self.name(), pattern);
            } else {
                let _ = writeln!(out, "  {} {} {}", self.name(), path, pattern);
            }
        }
        out
    }

    /// Renders the full help message.
    pub fn help(&self) -> String {
        let mut out = String::new();
        if !self.short_description().is_empty() {
            let _ = writeln!(out, "{}\n", self.short_description());
        }
        out.push_str(&self.usage());

        if !self.parameters().is_empty() {
            out.push_str("\nParameters:\n");
            let labels: Vec<String> = self
                .parameters()
                .iter()
                .map(|p| match &p.long_name {
                    Some(long_name) => format!("-{}, {}", p.flag, long_name),
                    None => format!("-{}", p.flag),
                })
                .collect();
            let width = labels.iter().map(String::len).max().unwrap_or(0);
            for (parameter, label) in self.parameters().iter().zip(&labels) {
                let _ = write!(out, "  {label:<width$}");
                if let Some(description) = &parameter.description {
                    let _ = write!(out, "  {description}");
                }
                if let Some(default) = &parameter.default {
                    let _ = write!(out, " (default: {default})");
                }
                out.push('\n');
            }
        }

        if !self.long_description().is_empty() {
            let _ = write!(out, "\n{}\n", self.long_description());
        }
        out
    }

    /// Renders an error together with the usage block.
    pub fn error_report(&self, error: &CliError) -> String {
        format!("{}: {error}\n\n{}", self.name(), self.usage())
    }

    /// Writes the error report to stderr.
    pub fn display_error(&self, error: &CliError) {
        eprint!("{}", self.error_report(error));
    }
}
