use serde::{Deserialize, Serialize};

use crate::error::{Result, TimetableError};
use crate::schedule::TeacherRequirement;

pub const MAX_PERIODS_PER_DAY: u32 = 12;
pub const MIN_PERIOD_LENGTH: u32 = 15;
pub const MAX_PERIOD_LENGTH: u32 = 120;
pub const MAX_TEACHERS: usize = 20;
pub const MIN_CLASS_MINUTES: u32 = 10;
pub const MAX_CLASS_MINUTES: u32 = 300;

/// A timetable request as collected from the form or the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableRequest {
    pub school_name: String,
    pub periods_per_day: u32,
    #[serde(alias = "period_length")]
    pub period_length_minutes: u32,
    pub teachers: Vec<TeacherRequirement>,
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Validates a request against the form's bounds
pub fn validate_request(req: &TimetableRequest) -> Result<()> {
    if req.school_name.trim().is_empty() {
        return Err(TimetableError::validation("Please enter the school name"));
    }

    if !(1..=MAX_PERIODS_PER_DAY).contains(&req.periods_per_day) {
        return Err(TimetableError::validation(format!(
            "Number of periods per day must be between 1 and {}",
            MAX_PERIODS_PER_DAY
        )));
    }

    if !(MIN_PERIOD_LENGTH..=MAX_PERIOD_LENGTH).contains(&req.period_length_minutes) {
        return Err(TimetableError::validation(format!(
            "Length of each period must be between {} and {} minutes",
            MIN_PERIOD_LENGTH, MAX_PERIOD_LENGTH
        )));
    }

    if req.teachers.is_empty() || req.teachers.len() > MAX_TEACHERS {
        return Err(TimetableError::validation(format!(
            "Number of teachers must be between 1 and {}",
            MAX_TEACHERS
        )));
    }

    let max_classes = req.periods_per_day * 5;
    for (i, teacher) in req.teachers.iter().enumerate() {
        let n = i + 1;
        if teacher.name.trim().is_empty() || teacher.subject.trim().is_empty() {
            return Err(TimetableError::validation(format!(
                "Please fill the name and subject of teacher {}",
                n
            )));
        }
        if !(1..=max_classes).contains(&teacher.sessions_per_week) {
            return Err(TimetableError::validation(format!(
                "Classes/week for teacher {} must be between 1 and {}",
                n, max_classes
            )));
        }
        if !(MIN_CLASS_MINUTES..=MAX_CLASS_MINUTES).contains(&teacher.session_minutes) {
            return Err(TimetableError::validation(format!(
                "Class duration for teacher {} must be between {} and {} minutes",
                n, MIN_CLASS_MINUTES, MAX_CLASS_MINUTES
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> TimetableRequest {
        TimetableRequest {
            school_name: "Hill School".to_string(),
            periods_per_day: 6,
            period_length_minutes: 45,
            teachers: vec![
                TeacherRequirement::new("A", "Math", 4, 45),
                TeacherRequirement::new("B", "Science", 2, 90),
            ],
            seed: None,
        }
    }

    fn message(req: &TimetableRequest) -> String {
        match validate_request(req) {
            Err(TimetableError::Validation { message }) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(validate_request(&request()).is_ok());
    }

    #[test]
    fn blank_school_name_fails() {
        let mut req = request();
        req.school_name = "   ".to_string();
        assert_eq!(message(&req), "Please enter the school name");
    }

    #[test]
    fn grid_bounds_are_enforced() {
        let mut req = request();
        req.periods_per_day = 13;
        assert!(message(&req).contains("periods per day"));

        let mut req = request();
        req.period_length_minutes = 10;
        assert!(message(&req).contains("Length of each period"));
    }

    #[test]
    fn teacher_count_bounds_are_enforced() {
        let mut req = request();
        req.teachers.clear();
        assert!(message(&req).contains("Number of teachers"));

        let mut req = request();
        req.teachers = vec![TeacherRequirement::new("A", "Math", 1, 45); 21];
        assert!(message(&req).contains("Number of teachers"));
    }

    #[test]
    fn teacher_fields_are_checked_with_one_based_index() {
        let mut req = request();
        req.teachers[1].subject = String::new();
        assert_eq!(message(&req), "Please fill the name and subject of teacher 2");

        let mut req = request();
        req.teachers[0].sessions_per_week = 31;
        assert_eq!(message(&req), "Classes/week for teacher 1 must be between 1 and 30");

        let mut req = request();
        req.teachers[0].session_minutes = 301;
        assert!(message(&req).contains("Class duration for teacher 1"));
    }

    #[test]
    fn deserializes_form_names() {
        let json = r#"{
            "school_name": "Hill",
            "periods_per_day": 4,
            "period_length": 45,
            "teachers": [{"name": "A", "subject": "Math", "classes_per_week": 2, "minutes_per_class": 45}]
        }"#;
        let req: TimetableRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.period_length_minutes, 45);
        assert_eq!(req.seed, None);
        assert_eq!(req.teachers[0].sessions_per_week, 2);
    }
}
