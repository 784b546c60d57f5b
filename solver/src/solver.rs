use crate::DOOR_COUNT;
use crate::api_trait::ApiClientTrait;
use crate::error::{Result, SolveError};
use crate::graph::{AdjacencyTable, Discovery, Room};
use crate::planner::WalkPlanner;
use crate::signature_index::{Fingerprint, SignatureIndex};
use std::sync::Arc;
use tracing::{debug, info};

/// Discovers rooms breadth-first, one oracle call per probed room.
///
/// A `Solver` owns the discovery state of exactly one attempt.
pub struct Solver {
    api: Arc<dyn ApiClientTrait>,
    planner: WalkPlanner,
    pub rooms: Vec<Room>,
    pub index: SignatureIndex,
    pub doors: AdjacencyTable,
}

impl Solver {
    pub fn new(api: Arc<dyn ApiClientTrait>, planner: WalkPlanner) -> Self {
        Self {
            api,
            planner,
            rooms: Vec::new(),
            index: SignatureIndex::new(),
            doors: AdjacencyTable::new(),
        }
    }

    /// Sends `plans` and checks the response has one full-length result per plan.
    async fn explore_checked(&self, plans: Vec<String>) -> Result<Vec<Vec<u8>>> {
        let plan_lens: Vec<usize> = plans.iter().map(String::len).collect();
        let (results, query_count) = self.api.explore(plans).await?;
        debug!(plans = plan_lens.len(), query_count, "explored");

        if results.len() != plan_lens.len() {
            return Err(SolveError::ResultCountMismatch {
                plans: plan_lens.len(),
                results: results.len(),
            });
        }
        for (index, (plan_len, labels)) in plan_lens.into_iter().zip(&results).enumerate() {
            if labels.len() != plan_len + 1 {
                return Err(SolveError::ResultLengthMismatch {
                    index,
                    expected: plan_len + 1,
                    observed: labels.len(),
                });
            }
        }
        Ok(results)
    }

    /// Label and fingerprint of the room reached after `prefix_len` doors.
    fn signature(results: &[Vec<u8>], prefix_len: usize) -> Result<(u8, Fingerprint)> {
        let fingerprint = WalkPlanner::fingerprint(results, prefix_len);
        let label = fingerprint.label().ok_or_else(|| {
            SolveError::InvalidConfig("fingerprint taken without verification walks".to_string())
        })?;
        Ok((label, fingerprint))
    }

    /// Label and fingerprint of the room at the end of `route`.
    pub async fn compute_fingerprint(&self, route: &str) -> Result<(u8, Fingerprint)> {
        let results = self
            .explore_checked(self.planner.fingerprint_plans(route))
            .await?;
        Self::signature(&results, route.len())
    }

    fn add_room(&mut self, label: u8, route: String, fingerprint: Fingerprint) -> usize {
        let index = self.rooms.len();
        self.index.insert(label, fingerprint.clone(), index);
        self.rooms.push(Room {
            label,
            route,
            fingerprint,
        });
        index
    }

    /// Probes all six doors of `room` and classifies each neighbour.
    async fn expand(&mut self, room: usize, expected: usize) -> Result<()> {
        let route = self.rooms[room].route.clone();
        let results = self
            .explore_checked(self.planner.expansion_plans(&route))
            .await?;

        let per_door = self.planner.suffix_count();
        let offset = route.len() + 1;
        let mut row = [0usize; DOOR_COUNT];

        for (door, target) in row.iter_mut().enumerate() {
            let batch = &results[door * per_door..(door + 1) * per_door];
            let (label, fingerprint) = Self::signature(batch, offset)?;

            *target = match self.index.lookup(label, &fingerprint) {
                Some(known) => {
                    debug!(room, door, label, target = known, "door leads to known room");
                    known
                }
                None => {
                    if self.rooms.len() == expected {
                        return Err(SolveError::TooManyRooms { expected });
                    }
                    let new_route = format!("{}{}", route, door);
                    let index = self.add_room(label, new_route, fingerprint);
                    debug!(room, door, label, target = index, "door leads to new room");
                    index
                }
            };
        }

        self.doors.push_row(row);
        Ok(())
    }

    /// Discovers exactly `problem_size` rooms and all their doors.
    pub async fn explore(&mut self, problem_size: usize) -> Result<Discovery> {
        info!(problem_size, suffixes = ?self.planner.suffixes(), "starting exploration");

        let results = self.explore_checked(self.planner.bootstrap_plans()).await?;
        let (label, fingerprint) = Self::signature(&results, 0)?;
        self.add_room(label, String::new(), fingerprint);

        for room in 0..problem_size {
            if room >= self.rooms.len() {
                return Err(SolveError::RoomsExhausted {
                    discovered: self.rooms.len(),
                    expected: problem_size,
                });
            }
            self.expand(room, problem_size).await?;
            debug!(room, discovered = self.rooms.len(), "room probed");
        }

        info!(rooms = self.rooms.len(), signatures = self.index.len(), "exploration complete");
        Ok(Discovery {
            rooms: std::mem::take(&mut self.rooms),
            doors: std::mem::take(&mut self.doors),
        })
    }
}
