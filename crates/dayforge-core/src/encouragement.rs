//! Congratulatory messages shown when a block is completed.
//!
//! Independent of the scheduler. The random source is passed in so callers
//! (and tests) decide whether the choice is seeded.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::intensity::Intensity;
use crate::task::TaskType;

const WORK: &[&str] = &[
    "Solid focus. That block is done.",
    "Another work block in the books.",
    "Nice, the hard part is behind you.",
    "Deep work done. Stretch a little.",
];

const HIGH_INTENSITY_WORK: &[&str] = &[
    "Big day, and you are keeping pace.",
    "Full throttle and still on schedule.",
    "That is how a high-intensity day gets done.",
];

const PERSONAL: &[&str] = &[
    "Taken care of. One less thing on your mind.",
    "Good to have that done.",
    "Body and errands both thank you.",
];

const REST: &[&str] = &[
    "Rested and ready for the next one.",
    "Recharged. Back at it when you are ready.",
    "Good break. Those count too.",
];

const DOWNTIME: &[&str] = &[
    "Enjoyed that? Good, it was on the plan.",
    "Downtime well spent.",
    "Balance matters. Nicely done.",
];

const HALFWAY: &[&str] = &[
    "Halfway through the day's plan.",
    "More than half done. Keep the rhythm.",
];

const ALL_DONE: &[&str] = &[
    "Every block done. What a day.",
    "Plan complete. Time to switch off.",
    "All done. Tomorrow's plan can wait until tomorrow.",
];

fn pool(block_type: TaskType, completed: usize, total: usize, intensity: Intensity) -> &'static [&'static str] {
    if total > 0 && completed >= total {
        return ALL_DONE;
    }
    if total > 1 && completed * 2 == total {
        return HALFWAY;
    }
    match block_type {
        TaskType::Work if intensity == Intensity::High => HIGH_INTENSITY_WORK,
        TaskType::Work => WORK,
        TaskType::Essential | TaskType::Movement => PERSONAL,
        TaskType::Break | TaskType::Meal | TaskType::Sleep => REST,
        TaskType::Phone | TaskType::Social | TaskType::Leisure => DOWNTIME,
    }
}

/// Pick a message for a just-completed block.
///
/// `completed` and `total` count the day's blocks; reaching the total, or
/// exactly half of it, switches to the milestone pools.
pub fn encouragement<R: Rng + ?Sized>(
    rng: &mut R,
    block_type: TaskType,
    completed: usize,
    total: usize,
    intensity: Intensity,
) -> &'static str {
    pool(block_type, completed, total, intensity)
        .choose(rng)
        .copied()
        .unwrap_or("Nice work.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    #[test]
    fn same_seed_same_message() {
        let mut a = Pcg64::seed_from_u64(7);
        let mut b = Pcg64::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(
                encouragement(&mut a, TaskType::Work, 1, 5, Intensity::Medium),
                encouragement(&mut b, TaskType::Work, 1, 5, Intensity::Medium)
            );
        }
    }

    #[test]
    fn completion_uses_all_done_pool() {
        let mut rng = Pcg64::seed_from_u64(1);
        let msg = encouragement(&mut rng, TaskType::Leisure, 6, 6, Intensity::Low);
        assert!(ALL_DONE.contains(&msg));
    }

    #[test]
    fn halfway_milestone() {
        let mut rng = Pcg64::seed_from_u64(2);
        let msg = encouragement(&mut rng, TaskType::Break, 3, 6, Intensity::Low);
        assert!(HALFWAY.contains(&msg));
    }

    #[test]
    fn high_intensity_work_has_its_own_pool() {
        let mut rng = Pcg64::seed_from_u64(3);
        let msg = encouragement(&mut rng, TaskType::Work, 1, 5, Intensity::High);
        assert!(HIGH_INTENSITY_WORK.contains(&msg));
    }

    #[test]
    fn every_type_has_messages() {
        let mut rng = Pcg64::seed_from_u64(4);
        for t in TaskType::ALL {
            assert!(!encouragement(&mut rng, t, 0, 0, Intensity::Medium).is_empty());
        }
    }
}
