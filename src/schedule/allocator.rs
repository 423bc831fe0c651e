use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::error::{Result, TimetableError};
use super::slot_utils::{blocks_needed, fill_block, first_free_block, is_block_free, max_start};
use super::types::{Allocation, TeacherAllocation, TeacherRequirement, Weekday, WeekGrid};

/// Random probes spent on each teacher before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 1000;

/// Randomized best-effort placement of teaching blocks into a week.
///
/// Every call to [`Allocator::allocate`] builds its own grid and its own
/// generator, so one `Allocator` can be shared between threads. Without a seed
/// the generator is drawn from OS entropy.
#[derive(Debug, Clone)]
pub struct Allocator {
    seed: Option<u64>,
    max_attempts: u32,
    first_fit_fallback: bool,
    shuffle_teachers: bool,
}

impl Default for Allocator {
    fn default() -> Self {
        Self {
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            first_fit_fallback: false,
            shuffle_teachers: false,
        }
    }
}

impl Allocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::default().seed(Some(seed))
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// After the random probes run out, place what is left by scanning days and periods in order
    pub fn first_fit_fallback(mut self, enabled: bool) -> Self {
        self.first_fit_fallback = enabled;
        self
    }

    /// Process teachers in a random order instead of input order
    pub fn shuffle_teachers(mut self, enabled: bool) -> Self {
        self.shuffle_teachers = enabled;
        self
    }

    pub fn allocate(
        &self,
        periods_per_day: u32,
        period_length_minutes: u32,
        teachers: &[TeacherRequirement],
    ) -> Result<Allocation> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.allocate_with_rng(periods_per_day, period_length_minutes, teachers, &mut rng)
    }

    /// Same as [`Allocator::allocate`] but draws from a caller-owned generator
    pub fn allocate_with_rng<R: Rng>(
        &self,
        periods_per_day: u32,
        period_length_minutes: u32,
        teachers: &[TeacherRequirement],
        rng: &mut R,
    ) -> Result<Allocation> {
        let blocks = validate_inputs(periods_per_day, period_length_minutes, teachers)?;
        let mut grid = WeekGrid::new(periods_per_day as usize);

        let mut order: Vec<usize> = (0..teachers.len()).collect();
        if self.shuffle_teachers {
            order.shuffle(rng);
        }

        let mut reports: Vec<Option<TeacherAllocation>> = vec![None; teachers.len()];
        for idx in order {
            let report = self.place_teacher(&mut grid, &teachers[idx], blocks[idx], rng);
            if !report.is_complete() {
                warn!(
                    "{}: placed {} of {} sessions after {} attempts",
                    report.label, report.placed, report.requested, report.attempts
                );
            }
            reports[idx] = Some(report);
        }

        let allocation = Allocation {
            grid,
            teachers: reports.into_iter().flatten().collect(),
        };
        info!(
            "Allocated {} teachers into {}x{} grid ({} free slots, {} sessions short)",
            teachers.len(),
            Weekday::ALL.len(),
            periods_per_day,
            allocation.grid.free_slot_count(),
            allocation.total_shortfall()
        );
        Ok(allocation)
    }

    fn place_teacher<R: Rng>(
        &self,
        grid: &mut WeekGrid,
        teacher: &TeacherRequirement,
        blocks: usize,
        rng: &mut R,
    ) -> TeacherAllocation {
        let label = teacher.label();
        let mut placed = 0;
        let mut attempts = 0;

        // None only if the block is longer than a day, which validation rejects
        if let Some(last_start) = max_start(grid.periods_per_day(), blocks) {
            while placed < teacher.sessions_per_week && attempts < self.max_attempts {
                attempts += 1;
                let day = Weekday::ALL[rng.gen_range(0..Weekday::ALL.len())];
                let start = rng.gen_range(0..=last_start);

                if is_block_free(grid, day, start, blocks) {
                    fill_block(grid, day, start, blocks, &label);
                    placed += 1;
                }
            }
        }

        if self.first_fit_fallback {
            while placed < teacher.sessions_per_week {
                let Some((day, start)) = first_free_block(grid, blocks) else {
                    break;
                };
                debug!("{}: first-fit placement on {} at period {}", label, day, start + 1);
                fill_block(grid, day, start, blocks, &label);
                placed += 1;
            }
        }

        debug!(
            "{}: {}/{} sessions of {} period(s) in {} attempts",
            label, placed, teacher.sessions_per_week, blocks, attempts
        );

        TeacherAllocation {
            label,
            requested: teacher.sessions_per_week,
            placed,
            blocks_needed: blocks,
            attempts,
        }
    }
}

/// Places every teacher's sessions with a fresh entropy-seeded generator and the default attempt bound
pub fn allocate(
    periods_per_day: u32,
    period_length_minutes: u32,
    teachers: &[TeacherRequirement],
) -> Result<Allocation> {
    Allocator::new().allocate(periods_per_day, period_length_minutes, teachers)
}

/// Deterministic variant of [`allocate`]
pub fn allocate_seeded(
    periods_per_day: u32,
    period_length_minutes: u32,
    teachers: &[TeacherRequirement],
    seed: u64,
) -> Result<Allocation> {
    Allocator::with_seed(seed).allocate(periods_per_day, period_length_minutes, teachers)
}

/// Checks the grid shape and every teacher, returning each teacher's block length
fn validate_inputs(
    periods_per_day: u32,
    period_length_minutes: u32,
    teachers: &[TeacherRequirement],
) -> Result<Vec<usize>> {
    if periods_per_day == 0 {
        return Err(TimetableError::invalid_argument("periods_per_day must be at least 1"));
    }
    if period_length_minutes == 0 {
        return Err(TimetableError::invalid_argument("period_length_minutes must be at least 1"));
    }

    teachers
        .iter()
        .enumerate()
        .map(|(i, teacher)| {
            let which = i + 1;
            if teacher.name.trim().is_empty() {
                return Err(TimetableError::invalid_argument(format!(
                    "teacher {which} has an empty name"
                )));
            }
            if teacher.subject.trim().is_empty() {
                return Err(TimetableError::invalid_argument(format!(
                    "teacher {which} has an empty subject"
                )));
            }
            if teacher.sessions_per_week == 0 {
                return Err(TimetableError::invalid_argument(format!(
                    "{} needs at least 1 session per week",
                    teacher.label()
                )));
            }
            if teacher.session_minutes == 0 {
                return Err(TimetableError::invalid_argument(format!(
                    "{} has a session length of 0 minutes",
                    teacher.label()
                )));
            }
            let blocks = blocks_needed(teacher.session_minutes, period_length_minutes);
            if blocks > periods_per_day as usize {
                return Err(TimetableError::invalid_argument(format!(
                    "{} needs {} consecutive periods per session but a day only has {}",
                    teacher.label(),
                    blocks,
                    periods_per_day
                )));
            }
            Ok(blocks)
        })
        .collect()
}
