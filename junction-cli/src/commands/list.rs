//! List command implementation.
//!
//! Displays installed mounts in various formats (table, JSON, CSV, TSV).

use crate::error::CliError;
use crate::utils::{format_timestamp, load_configuration, open_store, GlobalOptions};
use clap::{Args, ValueEnum};
use std::io::Write;

use junction::{MountEntry, RegistrationScope};

/// Column headers for CSV/TSV output.
const COLUMN_HEADERS: [&str; 5] = ["region", "label", "identity", "scope", "installed_at"];

/// List installed mounts.
#[derive(Args)]
pub struct ListCommand {
    /// Output format
    #[arg(
        long,
        value_enum,
        default_value = "table",
        env = "JUNCTION_OUTPUT_FORMAT",
        ignore_case = true
    )]
    pub format: OutputFormat,

    /// Restrict to one registration scope
    #[arg(long, value_name = "SCOPE")]
    pub scope: Option<String>,

    /// Filter by identity (case-insensitive)
    #[arg(long, value_name = "IDENTITY")]
    pub filter_identity: Option<String>,
}

/// Output format for the list command.
#[derive(Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// TSV format (tab-separated values)
    Tsv,
}

impl ListCommand {
    /// Execute the list command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let config = load_configuration(global)?;
        let store = open_store(global, &config)?;

        let scope = match &self.scope {
            Some(text) => Some(
                text.parse::<RegistrationScope>()
                    .map_err(|e| CliError::InvalidArguments(e.to_string()))?,
            ),
            None => None,
        };

        let mut entries = store.list(scope)?;

        if let Some(identity) = &self.filter_identity {
            entries.retain(|entry| entry.identity.matches(identity));
        }

        match self.format {
            OutputFormat::Table => format_as_table(&entries)?,
            OutputFormat::Json => format_as_json(&entries)?,
            OutputFormat::Csv => format_as_delimited(&entries, b',')?,
            OutputFormat::Tsv => format_as_delimited(&entries, b'\t')?,
        }

        Ok(())
    }
}

/// Format entries as a human-readable table.
fn format_as_table(entries: &[MountEntry]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let header_line = COLUMN_HEADERS
        .iter()
        .map(|s| s.to_uppercase())
        .collect::<Vec<_>>()
        .join("\t");
    writeln!(handle, "{header_line}")?;

    for entry in entries {
        writeln!(
            handle,
            "{}\t{}\t{}\t{}\t{}",
            entry.region,
            entry.label,
            entry.identity,
            entry.scope,
            format_timestamp(entry.installed_at),
        )?;
    }

    Ok(())
}

/// Format entries as JSON.
fn format_as_json(entries: &[MountEntry]) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let json_data: Vec<serde_json::Value> = entries
        .iter()
        .map(|entry| {
            serde_json::json!({
                "region": entry.region.to_string(),
                "label": entry.label,
                "identity": entry.identity.to_string(),
                "scope": entry.scope.to_string(),
                "tooltip": entry.tooltip,
                "installed_at": format_timestamp(entry.installed_at),
            })
        })
        .collect();

    serde_json::to_writer_pretty(&mut handle, &json_data)
        .map_err(|e| CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e)))?;

    writeln!(handle)?;

    Ok(())
}

/// Convert csv::Error to CliError.
fn csv_error(e: csv::Error) -> CliError {
    CliError::Io(std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Format entries as delimited output (CSV or TSV).
fn format_as_delimited(entries: &[MountEntry], delimiter: u8) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let handle = stdout.lock();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(handle);

    writer.write_record(COLUMN_HEADERS).map_err(csv_error)?;

    for entry in entries {
        writer
            .write_record(&[
                entry.region.to_string(),
                entry.label.clone(),
                entry.identity.to_string(),
                entry.scope.to_string(),
                format_timestamp(entry.installed_at),
            ])
            .map_err(csv_error)?;
    }

    writer.flush()?;

    Ok(())
}
