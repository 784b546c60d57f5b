use crate::DOOR_COUNT;
use crate::config::VerificationConfig;
use crate::error::{Result, SolveError};
use crate::signature_index::Fingerprint;
use rand::Rng;

/// Builds the plans sent to `/explore`.
///
/// The verification suffixes are fixed for the lifetime of the planner; every
/// fingerprint of one attempt must be taken with the same suffixes or they are
/// not comparable.
#[derive(Debug, Clone)]
pub struct WalkPlanner {
    suffixes: Vec<String>,
}

impl WalkPlanner {
    /// Fails unless there is at least one suffix and every suffix has a door.
    pub fn new(suffixes: Vec<String>) -> Result<Self> {
        if suffixes.is_empty() {
            return Err(SolveError::InvalidConfig(
                "at least one verification suffix is required".to_string(),
            ));
        }
        if suffixes.iter().any(|suffix| suffix.is_empty()) {
            return Err(SolveError::InvalidConfig(
                "verification suffixes must have at least one door".to_string(),
            ));
        }
        Ok(Self { suffixes })
    }

    /// Suffix `i` starts with door `i % 6` and continues with random doors.
    pub fn random<R: Rng>(config: &VerificationConfig, rng: &mut R) -> Result<Self> {
        let suffixes = (0..config.check_num)
            .map(|i| {
                let mut suffix = (i % DOOR_COUNT).to_string();
                for _ in 1..config.check_len {
                    suffix.push_str(&rng.gen_range(0..DOOR_COUNT).to_string());
                }
                suffix
            })
            .collect();
        Self::new(suffixes)
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }

    /// Plans fingerprinting the room at the end of `route`.
    pub fn fingerprint_plans(&self, route: &str) -> Vec<String> {
        self.suffixes
            .iter()
            .map(|suffix| format!("{}{}", route, suffix))
            .collect()
    }

    /// Plans fingerprinting the starting room.
    pub fn bootstrap_plans(&self) -> Vec<String> {
        self.fingerprint_plans("")
    }

    /// Door-major batch: for each door `d`, `route + d + suffix` for every suffix.
    pub fn expansion_plans(&self, route: &str) -> Vec<String> {
        let mut plans = Vec::with_capacity(DOOR_COUNT * self.suffixes.len());
        for door in 0..DOOR_COUNT {
            plans.extend(self.fingerprint_plans(&format!("{}{}", route, door)));
        }
        plans
    }

    /// Strips the first `prefix_len` doors' labels from each result.
    ///
    /// The returned observations start with the label of the room reached after
    /// `prefix_len` doors. Results must have been length-checked by the caller.
    pub fn fingerprint(results: &[Vec<u8>], prefix_len: usize) -> Fingerprint {
        Fingerprint::new(
            results
                .iter()
                .map(|labels| labels[prefix_len..].to_vec())
                .collect(),
        )
    }
}
