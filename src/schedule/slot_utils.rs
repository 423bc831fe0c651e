use super::types::{Slot, Weekday, WeekGrid};

/// Number of consecutive periods a session occupies (rounded up)
pub fn blocks_needed(session_minutes: u32, period_length_minutes: u32) -> usize {
    session_minutes.div_ceil(period_length_minutes) as usize
}

/// Last valid start period for a block of `blocks` periods, if any
pub fn max_start(periods_per_day: usize, blocks: usize) -> Option<usize> {
    periods_per_day.checked_sub(blocks)
}

/// True if every slot in `start..start + blocks` on `day` is free
pub fn is_block_free(grid: &WeekGrid, day: Weekday, start: usize, blocks: usize) -> bool {
    grid.day(day)
        .get(start..start + blocks)
        .is_some_and(|slots| slots.iter().all(Slot::is_free))
}

/// Writes `label` into `start..start + blocks` on `day`. Caller checks the block is free.
pub fn fill_block(grid: &mut WeekGrid, day: Weekday, start: usize, blocks: usize, label: &str) {
    for slot in &mut grid.day_mut(day)[start..start + blocks] {
        *slot = Slot::Booked(label.to_string());
    }
}

/// Earliest free block scanning Monday..Friday, then period order
pub fn first_free_block(grid: &WeekGrid, blocks: usize) -> Option<(Weekday, usize)> {
    let last = max_start(grid.periods_per_day(), blocks)?;
    Weekday::ALL.into_iter().find_map(|day| {
        (0..=last)
            .find(|&start| is_block_free(grid, day, start, blocks))
            .map(|start| (day, start))
    })
}
