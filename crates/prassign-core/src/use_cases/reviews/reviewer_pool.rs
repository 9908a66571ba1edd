use prassign_config::Config;
use prassign_models::Team;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of reviewers a new pull request should get.
pub const REVIEWERS_TARGET_COUNT: usize = 2;

/// Active teammates eligible to review a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ReviewerPool {
    candidates: Vec<String>,
}

impl ReviewerPool {
    pub fn from_team<'e>(team: &Team, excluded: impl IntoIterator<Item = &'e str>) -> Self {
        let excluded: Vec<&str> = excluded.into_iter().collect();

        Self {
            candidates: team
                .active_members()
                .filter(|m| !excluded.contains(&m.user_id.as_str()))
                .map(|m| m.user_id.clone())
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Up to `count` distinct candidates, uniformly at random.
    pub fn pick_many(&self, rng: &mut ChaCha8Rng, count: usize) -> Vec<String> {
        self.candidates
            .choose_multiple(rng, count)
            .cloned()
            .collect()
    }

    pub fn pick_one(&self, rng: &mut ChaCha8Rng) -> Option<String> {
        self.candidates.choose(rng).cloned()
    }
}

/// Random generator for one selection.
///
/// Seeded from entropy unless a seed is configured, in which case the
/// seed is mixed with `salt` so each pull request draws its own sequence.
pub(crate) fn selection_rng(config: &Config, salt: &str) -> ChaCha8Rng {
    match config.assignment.random_seed {
        0 => ChaCha8Rng::from_entropy(),
        seed => ChaCha8Rng::seed_from_u64(mix_seed(seed, salt)),
    }
}

const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// FNV-1a over the salt bytes, starting from the seed.
fn mix_seed(seed: u64, salt: &str) -> u64 {
    salt.bytes()
        .fold(seed, |acc, b| (acc ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}
