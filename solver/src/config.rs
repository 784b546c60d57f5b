use crate::error::{Result, SolveError};
use crate::problems;

/// Shape of the verification suffixes used to fingerprint rooms.
///
/// More or longer suffixes make accidental fingerprint collisions between
/// distinct rooms less likely, at the price of longer and more numerous plans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationConfig {
    /// Number of suffixes (plans per door).
    pub check_num: usize,
    /// Doors per suffix.
    pub check_len: usize,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            check_num: 1,
            check_len: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub problem_name: String,
    pub room_count: usize,
    pub verification: VerificationConfig,
    /// Base seed for the verification suffixes; attempt `a` uses `seed + a`.
    pub seed: Option<u64>,
    /// `None` retries until a guess is accepted.
    pub max_attempts: Option<usize>,
}

impl SolverConfig {
    /// Config for a catalogued problem, or for any name when `room_count` is given.
    pub fn for_problem(problem_name: &str, room_count: Option<usize>) -> Result<Self> {
        let room_count = room_count
            .or_else(|| problems::get_problem_size(problem_name))
            .ok_or_else(|| {
                SolveError::InvalidConfig(format!(
                    "unknown problem '{}' and no room count given",
                    problem_name
                ))
            })?;
        Ok(Self {
            problem_name: problem_name.to_string(),
            room_count,
            verification: VerificationConfig::default(),
            seed: None,
            max_attempts: None,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.room_count == 0 {
            return Err(SolveError::InvalidConfig(
                "room count must be positive".to_string(),
            ));
        }
        if self.verification.check_num == 0 {
            return Err(SolveError::InvalidConfig(
                "at least one verification suffix is required".to_string(),
            ));
        }
        if self.verification.check_len == 0 {
            return Err(SolveError::InvalidConfig(
                "verification suffixes must have at least one door".to_string(),
            ));
        }
        if self.max_attempts == Some(0) {
            return Err(SolveError::InvalidConfig(
                "max attempts must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
