//! Mood selection capability

use crate::conversation::MoodTag;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Picks the mood for a bot message
pub trait MoodPicker: Send {
    fn pick(&mut self) -> MoodTag;
}

impl<F> MoodPicker for F
where
    F: FnMut() -> MoodTag + Send,
{
    fn pick(&mut self) -> MoodTag {
        self()
    }
}

/// Uniform choice over every `MoodTag`
pub struct RandomMood {
    rng: StdRng,
}

impl RandomMood {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomMood {
    fn default() -> Self {
        Self::new()
    }
}

impl MoodPicker for RandomMood {
    fn pick(&mut self) -> MoodTag {
        // ALL is non-empty
        MoodTag::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(MoodTag::Friendly)
    }
}

/// Always returns the same mood
#[derive(Debug, Clone, Copy)]
pub struct FixedMood(pub MoodTag);

impl MoodPicker for FixedMood {
    fn pick(&mut self) -> MoodTag {
        self.0
    }
}
