use std::fs;
use tempfile::TempDir;

use timetable_generator::display::{read_csv, to_csv_string};
use timetable_generator::form::{export_file_name, export_timetable_csv};
use timetable_generator::parser::load_teachers;
use timetable_generator::{allocate_seeded, to_table, TeacherRequirement};

#[test]
fn exported_file_reads_back_to_the_grid() {
    let teachers = vec![
        TeacherRequirement::new("Smith, J", "Math", 4, 45),
        TeacherRequirement::new("O\"Neil", "Drama", 2, 90),
    ];
    let allocation = allocate_seeded(5, 45, &teachers, 8).unwrap();
    let table = to_table(&allocation.grid);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(export_file_name("Hill School"));
    export_timetable_csv(&table, &path).unwrap();

    let parsed = read_csv(fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(parsed, table);
    for (row, (day, slots)) in parsed.rows.iter().zip(allocation.grid.iter()) {
        assert_eq!(row.day, day.name());
        let cells: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
        assert_eq!(row.cells, cells);
    }
}

#[test]
fn export_overwrites_previous_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.csv");
    fs::write(&path, "stale contents that are much longer than a header line\n".repeat(50)).unwrap();

    let allocation = allocate_seeded(2, 45, &[TeacherRequirement::new("A", "Math", 1, 45)], 1).unwrap();
    let table = to_table(&allocation.grid);
    export_timetable_csv(&table, &path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, to_csv_string(&table).unwrap());
    assert!(written.starts_with("Day,Period 1,Period 2"));
}

#[test]
fn teacher_file_feeds_the_allocator() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("teachers.csv");
    fs::write(
        &path,
        "name,subject,classes_per_week,minutes_per_class\nAnn,Math,3,45\nBo,Science,2,90\n",
    )
    .unwrap();

    let teachers = load_teachers(&path).unwrap();
    let allocation = allocate_seeded(6, 45, &teachers, 4).unwrap();
    assert_eq!(allocation.grid.count_label("Math (Ann)"), 3);
    assert_eq!(allocation.grid.count_label("Science (Bo)"), 4);
}
