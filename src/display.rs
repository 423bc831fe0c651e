use std::io::{Read, Write};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Serialize, Deserialize};

use crate::error::{Result, TimetableError};
use crate::schedule::{TeacherAllocation, Weekday, WeekGrid};

/// Header of the day-name column in exports
pub const DAY_COLUMN: &str = "Day";

/// Column header for a zero-based period index
pub fn period_header(period: usize) -> String {
    format!("Period {}", period + 1)
}

/// One weekday of the rendered timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub day: String,
    pub cells: Vec<String>,
}

/// Weekday rows by period columns, both in timetable order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableTable {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TimetableTable {
    #[cfg(test)]
    pub fn cell(&self, day: &str, period: usize) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.day == day)
            .and_then(|r| r.cells.get(period))
            .map(String::as_str)
    }
}

/// Converts a grid into labeled rows and columns without touching it
pub fn to_table(grid: &WeekGrid) -> TimetableTable {
    let columns = (0..grid.periods_per_day()).map(period_header).collect();
    let rows = grid
        .iter()
        .map(|(day, slots)| TableRow {
            day: day.name().to_string(),
            cells: slots.iter().map(|s| s.to_string()).collect(),
        })
        .collect();
    TimetableTable { columns, rows }
}

/// Writes the table as CSV: a `Day,Period 1..N` header, then one record per weekday
pub fn write_csv<W: Write>(table: &TimetableTable, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header = Vec::with_capacity(table.columns.len() + 1);
    header.push(DAY_COLUMN);
    header.extend(table.columns.iter().map(String::as_str));
    wtr.write_record(&header)?;

    for row in &table.rows {
        let mut record = Vec::with_capacity(row.cells.len() + 1);
        record.push(row.day.as_str());
        record.extend(row.cells.iter().map(String::as_str));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn to_csv_string(table: &TimetableTable) -> Result<String> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    // csv only emits the UTF-8 it was given
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Parses text produced by [`write_csv`] back into a table
pub fn read_csv<R: Read>(reader: R) -> Result<TimetableTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let columns = rdr.headers()?.iter().skip(1).map(str::to_string).collect();
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut fields = record.iter();
        let raw_day = fields.next().unwrap_or_default();
        let day = Weekday::from_name(raw_day).ok_or_else(|| {
            TimetableError::validation(format!("Unknown day '{}' in timetable CSV", raw_day))
        })?;
        rows.push(TableRow {
            day: day.name().to_string(),
            cells: fields.map(str::to_string).collect(),
        });
    }

    Ok(TimetableTable { columns, rows })
}

/// Renders a fixed-width text grid for the terminal
pub fn render_text(table: &TimetableTable) -> String {
    let mut widths = Vec::with_capacity(table.columns.len() + 1);
    widths.push(
        table
            .rows
            .iter()
            .map(|r| r.day.chars().count())
            .chain(std::iter::once(DAY_COLUMN.len()))
            .max()
            .unwrap_or(0),
    );
    for (i, col) in table.columns.iter().enumerate() {
        let widest_cell = table
            .rows
            .iter()
            .filter_map(|r| r.cells.get(i))
            .map(|c| c.chars().count())
            .max()
            .unwrap_or(0);
        widths.push(widest_cell.max(col.len()));
    }

    let mut out = String::new();
    let mut push_line = |fields: Vec<&str>| {
        let padded: Vec<String> = fields
            .iter()
            .zip(&widths)
            .map(|(f, w)| format!("{:<width$}", f, width = *w))
            .collect();
        out.push_str(padded.join(" | ").trim_end());
        out.push('\n');
    };

    let mut header = vec![DAY_COLUMN];
    header.extend(table.columns.iter().map(String::as_str));
    push_line(header);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(rule.iter().map(String::as_str).collect());
    for row in &table.rows {
        let mut line = vec![row.day.as_str()];
        line.extend(row.cells.iter().map(String::as_str));
        push_line(line);
    }

    out
}

/// Prints a generated timetable and any teachers left short
pub fn print_timetable(school_name: &str, table: &TimetableTable, teachers: &[TeacherAllocation]) {
    println!("\n=== {} Weekly Timetable ===\n", school_name);
    print!("{}", render_text(table));

    let short: Vec<&TeacherAllocation> = teachers.iter().filter(|t| !t.is_complete()).collect();
    if !short.is_empty() {
        println!("\n⚠️  Sessions that could not be placed ({}):", short.len());
        for t in short {
            println!("  - {}: {} of {} placed", t.label, t.placed, t.requested);
        }
    }
}
