use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::display::{write_csv, TimetableTable};
use crate::error::Result;

/// Default download name for a school's timetable.
///
/// Path separators, characters Windows forbids in file names, quotes and
/// control characters become `_`, so the name is always a single path
/// component and a valid `Content-Disposition` value.
pub fn export_file_name(school_name: &str) -> String {
    let stem: String = school_name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{}_timetable.csv", stem)
}

/// Writes the timetable to `csv_path` as CSV, replacing any existing file
pub fn export_timetable_csv(table: &TimetableTable, csv_path: &Path) -> Result<()> {
    let file = File::create(csv_path)?;
    write_csv(table, BufWriter::new(file))?;
    info!("Timetable exported to {}", csv_path.display());
    Ok(())
}
