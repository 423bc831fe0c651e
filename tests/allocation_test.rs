use timetable_generator::schedule::{Allocator, Slot};
use timetable_generator::{allocate, allocate_seeded, TeacherRequirement, TimetableError, Weekday};

fn school_staff() -> Vec<TeacherRequirement> {
    vec![
        TeacherRequirement::new("Ann", "Math", 5, 45),
        TeacherRequirement::new("Bo", "Science", 3, 90),
        TeacherRequirement::new("Cy", "English", 4, 45),
        TeacherRequirement::new("Di", "Art", 2, 60),
        TeacherRequirement::new("Ed", "PE", 2, 30),
    ]
}

/// Each booked run must be exactly the teacher's block length (or a whole multiple
/// when the same teacher sits back to back)
fn assert_runs_match_blocks(allocation: &timetable_generator::Allocation) {
    for (day, slots) in allocation.grid.iter() {
        let mut period = 0;
        while period < slots.len() {
            let Slot::Booked(label) = &slots[period] else {
                period += 1;
                continue;
            };
            let run = slots[period..]
                .iter()
                .take_while(|s| s.label() == Some(label.as_str()))
                .count();
            let blocks = allocation
                .teachers
                .iter()
                .find(|t| &t.label == label)
                .map(|t| t.blocks_needed)
                .unwrap();
            assert_eq!(run % blocks, 0, "{} on {} at period {}", label, day, period + 1);
            period += run;
        }
    }
}

#[test]
fn grid_shape_is_fixed() {
    for periods in [1, 4, 6, 12] {
        let teachers = vec![TeacherRequirement::new("Ann", "Math", 3, 15)];
        let allocation = allocate(periods, 15, &teachers).unwrap();
        assert_eq!(allocation.grid.iter().count(), 5);
        for (_, slots) in allocation.grid.iter() {
            assert_eq!(slots.len(), periods as usize);
        }
    }
}

#[test]
fn roomy_week_places_every_session() {
    let allocation = allocate_seeded(8, 45, &school_staff(), 2024).unwrap();
    for teacher in &allocation.teachers {
        assert!(teacher.is_complete(), "{} short", teacher.label);
    }
    assert_eq!(allocation.grid.count_label("Science (Bo)"), 6);
    assert_eq!(allocation.grid.count_label("Art (Di)"), 4);
    assert_eq!(allocation.grid.count_label("PE (Ed)"), 2);
    assert_runs_match_blocks(&allocation);
}

#[test]
fn booked_slots_match_placed_blocks() {
    for seed in 0..25 {
        let allocation = allocate_seeded(6, 45, &school_staff(), seed).unwrap();
        let booked: usize = allocation
            .teachers
            .iter()
            .map(|t| t.placed as usize * t.blocks_needed)
            .sum();
        assert_eq!(booked, 30 - allocation.grid.free_slot_count());
    }
}

#[test]
fn seeded_runs_are_reproducible_and_seeds_differ() {
    let a = allocate_seeded(6, 45, &school_staff(), 99).unwrap();
    let b = allocate_seeded(6, 45, &school_staff(), 99).unwrap();
    assert_eq!(a, b);

    let differs = (0..10u64)
        .map(|seed| allocate_seeded(6, 45, &school_staff(), seed).unwrap().grid)
        .any(|grid| grid != a.grid);
    assert!(differs);
}

#[test]
fn single_teacher_concrete_scenario() {
    let teachers = vec![TeacherRequirement::new("A", "Math", 2, 45)];
    let allocation = allocate_seeded(4, 45, &teachers, 12345).unwrap();

    let mut labeled = 0;
    for (_, slots) in allocation.grid.iter() {
        for slot in slots {
            match slot {
                Slot::Free => {}
                Slot::Booked(label) => {
                    assert_eq!(label, "Math (A)");
                    labeled += 1;
                }
            }
        }
    }
    assert_eq!(labeled, 2);
}

#[test]
fn whole_day_sessions_land_on_distinct_days() {
    let teachers = vec![TeacherRequirement::new("B", "Lab", 5, 90)];
    let allocation = allocate_seeded(3, 30, &teachers, 77).unwrap();

    assert_eq!(allocation.teachers[0].placed, 5);
    for day in Weekday::ALL {
        assert!(allocation.grid.day(day).iter().all(|s| s.label() == Some("Lab (B)")));
    }
}

#[test]
fn too_long_session_is_invalid_argument() {
    let teachers = vec![
        TeacherRequirement::new("A", "Math", 1, 45),
        TeacherRequirement::new("B", "Lab", 1, 120),
    ];
    match allocate_seeded(3, 30, &teachers, 1) {
        Err(TimetableError::InvalidArgument { message }) => assert!(message.contains("Lab (B)")),
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
}

#[test]
fn later_teachers_absorb_the_shortfall() {
    // 5 slots in the week
    let teachers = vec![
        TeacherRequirement::new("A", "Math", 5, 45),
        TeacherRequirement::new("B", "Art", 3, 45),
    ];
    let allocation = allocate_seeded(1, 45, &teachers, 3).unwrap();
    assert_eq!(allocation.teachers[0].placed, 5);
    assert_eq!(allocation.teachers[1].placed, 0);
    assert_eq!(allocation.incomplete().count(), 1);
}

#[test]
fn fallback_and_shuffle_keep_the_invariants() {
    let allocator = Allocator::with_seed(31)
        .first_fit_fallback(true)
        .shuffle_teachers(true);
    let allocation = allocator.allocate(6, 45, &school_staff()).unwrap();
    assert_runs_match_blocks(&allocation);
    assert_eq!(allocation.teachers.len(), 5);
    assert_eq!(allocation.teachers[0].label, "Math (Ann)");
}
