use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;
use std::fs::File;
use tracing::debug;

use crate::error::Result;
use crate::schedule::TeacherRequirement;

/// Reads teacher requirements from CSV text.
///
/// Expected header: `name,subject,classes_per_week,minutes_per_class`
/// (`sessions_per_week` / `session_minutes` are accepted too). Fields are
/// trimmed and blank lines are skipped. Rows are returned in file order.
pub fn read_teachers<R: Read>(reader: R) -> Result<Vec<TeacherRequirement>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut teachers = Vec::new();
    for result in rdr.deserialize() {
        let teacher: TeacherRequirement = result?;
        teachers.push(teacher);
    }
    Ok(teachers)
}

/// Loads teacher requirements from a CSV file
pub fn load_teachers<P: AsRef<Path>>(csv_path: P) -> Result<Vec<TeacherRequirement>> {
    let path = csv_path.as_ref();
    let teachers = read_teachers(File::open(path)?)?;
    debug!("Loaded {} teachers from {}", teachers.len(), path.display());
    Ok(teachers)
}
