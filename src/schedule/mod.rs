pub mod types;
pub mod slot_utils;
pub mod allocator;

pub use types::{Allocation, Slot, TeacherAllocation, TeacherRequirement, Weekday, WeekGrid, FREE};
pub use slot_utils::blocks_needed;
pub use allocator::{allocate, allocate_seeded, Allocator, DEFAULT_MAX_ATTEMPTS};
