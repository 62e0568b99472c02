//! Record printing in text or JSON form

use crate::cli::commands::OutputFormat;
use crate::core::record::Record;
use crate::error::Result;
use crate::store::Store;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct Labeled<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
    #[serde(flatten)]
    record: &'a Record,
}

/// Text: `label: record` (or just the record); JSON: one object per line
pub fn write_record<W: Write>(
    out: &mut W,
    format: OutputFormat,
    label: Option<&str>,
    record: &Record,
) -> Result<()> {
    match format {
        OutputFormat::Text => match label {
            Some(label) => writeln!(out, "{}: {}", label, record)?,
            None => writeln!(out, "{}", record)?,
        },
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &Labeled { label, record })?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Status line for the user: plain text, or `{"message": ...}` in JSON mode
pub fn write_message<W: Write>(out: &mut W, format: OutputFormat, message: &str) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", message)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut *out, &serde_json::json!({ "message": message }))?;
            writeln!(out)?;
        }
    }
    Ok(())
}

/// Every record, most viewed first, labelled `001`, `002`, ...
pub fn write_ranked<W: Write>(out: &mut W, format: OutputFormat, store: &Store) -> Result<()> {
    if format == OutputFormat::Text {
        writeln!(out, "\nGenerated Posts - sorted by views:")?;
    }
    for (rank, record) in store.ranked_by_views().into_iter().enumerate() {
        let label = format!("{:03}", rank + 1);
        write_record(out, format, Some(&label), record)?;
    }
    Ok(())
}
