use crate::GuessMap;
use crate::api_trait::ApiClientTrait;
use crate::config::SolverConfig;
use crate::edge_resolver::resolve_connections;
use crate::error::{Result, SolveError};
use crate::planner::WalkPlanner;
use crate::solver::Solver;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Accepted(GuessMap),
    Rejected,
}

/// Result of a successful solve.
#[derive(Debug, Clone)]
pub struct Solved {
    pub map: GuessMap,
    pub attempts: usize,
}

fn attempt_rng(config: &SolverConfig, attempt: usize) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(attempt as u64)),
        None => StdRng::from_entropy(),
    }
}

/// One select → discover → resolve → guess cycle with fresh state.
pub async fn run_attempt(
    api: Arc<dyn ApiClientTrait>,
    config: &SolverConfig,
    attempt: usize,
) -> Result<AttemptOutcome> {
    config.validate()?;
    let acknowledged = api.select_problem(&config.problem_name).await?;
    info!(attempt, problem = %acknowledged, "attempt started");

    let planner = WalkPlanner::random(&config.verification, &mut attempt_rng(config, attempt))?;
    let mut solver = Solver::new(api.clone(), planner);
    let discovery = solver.explore(config.room_count).await?;
    let connections = resolve_connections(&discovery.doors)?;
    let map = discovery.to_map(connections);

    if api.guess(&map).await? {
        Ok(AttemptOutcome::Accepted(map))
    } else {
        Ok(AttemptOutcome::Rejected)
    }
}

/// Repeats attempts until a guess is accepted or `max_attempts` run out.
pub async fn solve_until_accepted(
    api: Arc<dyn ApiClientTrait>,
    config: &SolverConfig,
) -> Result<Solved> {
    config.validate()?;

    let mut attempt = 0;
    loop {
        if config.max_attempts.is_some_and(|max| attempt >= max) {
            return Err(SolveError::AttemptsExhausted(attempt));
        }
        attempt += 1;

        match run_attempt(api.clone(), config, attempt).await {
            Ok(AttemptOutcome::Accepted(map)) => {
                info!(attempt, rooms = map.rooms.len(), "guess accepted");
                return Ok(Solved {
                    map,
                    attempts: attempt,
                });
            }
            Ok(AttemptOutcome::Rejected) => warn!(attempt, "guess rejected, retrying"),
            Err(e) => error!(attempt, error = %e, "attempt failed, retrying"),
        }
    }
}
