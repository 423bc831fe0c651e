pub mod submission;
pub mod export;

pub use submission::{TimetableRequest, validate_request};
pub use export::{export_file_name, export_timetable_csv};
