//! Export message records to CSV.
//!
//! Output is UTF-8 with BOM for Excel compatibility.

use std::io::Write;
use std::path::Path;

use crate::model::record::MessageRecord;

/// Fixed column order of the CSV output.
const COLUMNS: &str = "received_time,sent_time,from,to,cc,subject,snippet";

/// Export records to a CSV file, returning the number of data rows.
pub fn export_csv(records: &[MessageRecord], output_path: &Path) -> anyhow::Result<usize> {
    let file = std::fs::File::create(output_path)?;
    let mut writer = std::io::BufWriter::new(file);

    // UTF-8 BOM for Excel
    writer.write_all(&[0xEF, 0xBB, 0xBF])?;
    writeln!(writer, "{COLUMNS}")?;

    for record in records {
        writeln!(writer, "{}", format_row(record))?;
    }

    writer.flush()?;
    Ok(records.len())
}

fn format_row(record: &MessageRecord) -> String {
    format!(
        "{},{},{},{},{},{},{}",
        csv_escape(record.received_time.as_deref().unwrap_or("")),
        csv_escape(record.sent_time.as_deref().unwrap_or("")),
        csv_escape(&record.from),
        csv_escape(&record.to),
        csv_escape(&record.cc),
        csv_escape(&record.subject),
        csv_escape(&record.snippet),
    )
}

/// Escape a value for CSV (RFC 4180).
///
/// Wraps in double quotes if the value contains commas, quotes, or newlines.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
