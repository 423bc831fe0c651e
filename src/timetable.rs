use serde::{Deserialize, Serialize};
use tracing::info;

use crate::display::{to_table, TimetableTable};
use crate::error::Result;
use crate::form::{validate_request, TimetableRequest};
use crate::schedule::{Allocator, TeacherAllocation};

/// A generated timetable as handed back to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableResponse {
    pub school_name: String,
    pub generated_at: String,
    pub table: TimetableTable,
    pub teachers: Vec<TeacherAllocation>,
}

/// Validates the request, allocates and converts the grid to a table.
///
/// A seed in the request overrides whatever seed `allocator` carries.
pub fn generate_timetable(req: &TimetableRequest, allocator: &Allocator) -> Result<TimetableResponse> {
    validate_request(req)?;

    let allocator = match req.seed {
        Some(seed) => allocator.clone().seed(Some(seed)),
        None => allocator.clone(),
    };
    let allocation = allocator.allocate(req.periods_per_day, req.period_length_minutes, &req.teachers)?;

    info!(
        "Timetable for {} generated ({} teachers, {} sessions short)",
        req.school_name,
        req.teachers.len(),
        allocation.total_shortfall()
    );

    Ok(TimetableResponse {
        school_name: req.school_name.trim().to_string(),
        generated_at: chrono::Utc::now().to_rfc3339(),
        table: to_table(&allocation.grid),
        teachers: allocation.teachers,
    })
}
