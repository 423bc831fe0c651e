use std::fmt;
use serde::{Serialize, Deserialize};

/// Text stored in a slot nobody has been assigned to
pub const FREE: &str = "Free";

/// School days in timetable order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_name(name: &str) -> Option<Weekday> {
        Weekday::ALL.into_iter().find(|d| d.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One period of one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Free,
    Booked(String),
}

impl Slot {
    pub fn is_free(&self) -> bool {
        matches!(self, Slot::Free)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Slot::Free => None,
            Slot::Booked(label) => Some(label),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Free => f.write_str(FREE),
            Slot::Booked(label) => f.write_str(label),
        }
    }
}

/// What a single teacher needs placed in the week
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRequirement {
    pub name: String,
    pub subject: String,
    #[serde(alias = "classes_per_week")]
    pub sessions_per_week: u32,
    #[serde(alias = "minutes_per_class")]
    pub session_minutes: u32,
}

impl TeacherRequirement {
    pub fn new(
        name: impl Into<String>,
        subject: impl Into<String>,
        sessions_per_week: u32,
        session_minutes: u32,
    ) -> Self {
        Self {
            name: name.into(),
            subject: subject.into(),
            sessions_per_week,
            session_minutes,
        }
    }

    /// Text written into every slot of this teacher's blocks
    pub fn label(&self) -> String {
        format!("{} ({})", self.subject, self.name)
    }
}

/// Five days of `periods_per_day` slots each. The shape never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekGrid {
    periods_per_day: usize,
    days: [Vec<Slot>; 5],
}

impl WeekGrid {
    /// Builds an all-free grid
    pub fn new(periods_per_day: usize) -> Self {
        Self {
            periods_per_day,
            days: std::array::from_fn(|_| vec![Slot::Free; periods_per_day]),
        }
    }

    pub fn periods_per_day(&self) -> usize {
        self.periods_per_day
    }

    pub fn day(&self, day: Weekday) -> &[Slot] {
        &self.days[day.index()]
    }

    pub fn slot(&self, day: Weekday, period: usize) -> Option<&Slot> {
        self.days[day.index()].get(period)
    }

    /// Iterates days in Monday..Friday order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Slot])> {
        Weekday::ALL.into_iter().map(move |d| (d, self.day(d)))
    }

    pub(crate) fn day_mut(&mut self, day: Weekday) -> &mut [Slot] {
        &mut self.days[day.index()]
    }

    pub fn free_slot_count(&self) -> usize {
        self.days.iter().flatten().filter(|s| s.is_free()).count()
    }

    /// Number of slots holding exactly `label`
    pub fn count_label(&self, label: &str) -> usize {
        self.days
            .iter()
            .flatten()
            .filter(|s| s.label() == Some(label))
            .count()
    }
}

/// Outcome of placing one teacher's sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherAllocation {
    pub label: String,
    pub requested: u32,
    pub placed: u32,
    pub blocks_needed: usize,
    pub attempts: u32,
}

impl TeacherAllocation {
    pub fn shortfall(&self) -> u32 {
        self.requested.saturating_sub(self.placed)
    }

    pub fn is_complete(&self) -> bool {
        self.placed >= self.requested
    }
}

/// A filled grid plus the per-teacher report, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub grid: WeekGrid,
    pub teachers: Vec<TeacherAllocation>,
}

impl Allocation {
    pub fn total_shortfall(&self) -> u32 {
        self.teachers.iter().map(TeacherAllocation::shortfall).sum()
    }

    pub fn incomplete(&self) -> impl Iterator<Item = &TeacherAllocation> {
        self.teachers.iter().filter(|t| !t.is_complete())
    }
}
