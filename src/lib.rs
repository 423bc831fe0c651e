pub mod error;
pub mod logger;
pub mod schedule;
pub mod display;
pub mod parser;
pub mod form;
pub mod timetable;
pub mod web;

pub use error::{Result, TimetableError};
pub use schedule::{allocate, allocate_seeded, Allocation, Allocator, TeacherRequirement, Weekday, WeekGrid};
pub use display::{to_table, TimetableTable};
pub use timetable::{generate_timetable, TimetableResponse};
