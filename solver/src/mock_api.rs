use crate::api_trait::ApiClientTrait;
use crate::{Connection, DOOR_COUNT, DoorRef, GuessMap};
use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::{debug, info};

/// An in-process library answering like the contest service.
#[derive(Debug)]
pub struct MockApiClient {
    labels: Vec<u8>,
    // doors[room][door] = door on the other side
    doors: Vec<[DoorRef; DOOR_COUNT]>,
    starting_room: usize,
    query_count: AtomicU32,
    selected: Mutex<Option<String>>,
}

impl MockApiClient {
    /// Random library: room `i` has label `i % 4`, door stubs are paired at random.
    ///
    /// Pairings are redrawn until every room is reachable from room 0 and no two
    /// rooms are indistinguishable by walks, as in the contest's libraries.
    pub fn random(room_count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let labels: Vec<u8> = (0..room_count).map(|i| (i % 4) as u8).collect();

        let mut stubs: Vec<DoorRef> = (0..room_count)
            .flat_map(|room| (0..DOOR_COUNT).map(move |door| DoorRef { room, door }))
            .collect();
        loop {
            stubs.shuffle(&mut rng);
            let mut doors = vec![[DoorRef { room: 0, door: 0 }; DOOR_COUNT]; room_count];
            for pair in stubs.chunks(2) {
                let (a, b) = (pair[0], pair[1]);
                doors[a.room][a.door] = b;
                doors[b.room][b.door] = a;
            }
            let library = Self::with_doors(labels.clone(), doors, 0);
            if library.is_connected() && library.is_minimal() {
                return library;
            }
        }
    }

    /// Library described by a map in `/guess` format.
    pub fn from_map(map: &GuessMap) -> Result<Self> {
        let doors = door_table(map)?;
        Ok(Self::with_doors(map.rooms.clone(), doors, map.starting_room))
    }

    fn with_doors(labels: Vec<u8>, doors: Vec<[DoorRef; DOOR_COUNT]>, starting_room: usize) -> Self {
        Self {
            labels,
            doors,
            starting_room,
            query_count: AtomicU32::new(0),
            selected: Mutex::new(None),
        }
    }

    pub fn room_count(&self) -> usize {
        self.labels.len()
    }

    pub fn query_count(&self) -> u32 {
        self.query_count.load(Ordering::Relaxed)
    }

    /// The hidden library as a map.
    pub fn to_map(&self) -> GuessMap {
        let mut connections = Vec::new();
        for (room, row) in self.doors.iter().enumerate() {
            for (door, &to) in row.iter().enumerate() {
                let from = DoorRef { room, door };
                if from <= to {
                    connections.push(Connection { from, to });
                }
            }
        }
        GuessMap {
            rooms: self.labels.clone(),
            starting_room: self.starting_room,
            connections,
        }
    }

    fn is_connected(&self) -> bool {
        let mut seen = vec![false; self.room_count()];
        let mut stack = vec![self.starting_room];
        seen[self.starting_room] = true;
        while let Some(u) = stack.pop() {
            for to in &self.doors[u] {
                if !seen[to.room] {
                    seen[to.room] = true;
                    stack.push(to.room);
                }
            }
        }
        seen.into_iter().all(|s| s)
    }

    /// Moore-style partition refinement: true when every room is its own class.
    fn is_minimal(&self) -> bool {
        let n = self.room_count();
        let mut class: Vec<usize> = self.labels.iter().map(|&l| l as usize).collect();
        let mut class_count = 0;
        loop {
            let mut ids: HashMap<(usize, [usize; DOOR_COUNT]), usize> = HashMap::new();
            let next: Vec<usize> = (0..n)
                .map(|u| {
                    let mut succ = [0; DOOR_COUNT];
                    for (d, to) in self.doors[u].iter().enumerate() {
                        succ[d] = class[to.room];
                    }
                    let fresh = ids.len();
                    *ids.entry((class[u], succ)).or_insert(fresh)
                })
                .collect();
            if ids.len() == class_count {
                return class_count == n;
            }
            class_count = ids.len();
            class = next;
        }
    }

    fn execute_path(&self, plan: &str) -> Result<Vec<u8>> {
        let mut current_room = self.starting_room;
        let mut result = vec![self.labels[current_room]];
        for c in plan.chars() {
            let door = c
                .to_digit(10)
                .map(|d| d as usize)
                .filter(|&d| d < DOOR_COUNT)
                .ok_or_else(|| anyhow!("invalid door '{}' in plan '{}'", c, plan))?;
            current_room = self.doors[current_room][door].room;
            result.push(self.labels[current_room]);
        }
        Ok(result)
    }

    /// Whether `map` behaves like the hidden library on every walk.
    pub fn check_solution(&self, map: &GuessMap) -> bool {
        if map.rooms.len() != self.labels.len() {
            debug!(
                expected = self.labels.len(),
                submitted = map.rooms.len(),
                "room count differs"
            );
            return false;
        }
        let submitted = match door_table(map) {
            Ok(doors) => doors,
            Err(e) => {
                debug!(error = %e, "malformed map");
                return false;
            }
        };

        // Walk both libraries in lockstep over every reachable pair of rooms.
        let n = self.labels.len();
        let mut visited = vec![vec![false; n]; n];
        let mut stack = vec![(self.starting_room, map.starting_room)];
        visited[self.starting_room][map.starting_room] = true;
        while let Some((u, v)) = stack.pop() {
            if self.labels[u] != map.rooms[v] {
                return false;
            }
            for door in 0..DOOR_COUNT {
                let u2 = self.doors[u][door].room;
                let v2 = submitted[v][door].room;
                if !visited[u2][v2] {
                    visited[u2][v2] = true;
                    stack.push((u2, v2));
                }
            }
        }
        true
    }
}

/// Door table of `map`; every door must be used by exactly one connection.
fn door_table(map: &GuessMap) -> Result<Vec<[DoorRef; DOOR_COUNT]>> {
    let n = map.rooms.len();
    if map.starting_room >= n {
        bail!("starting room {} out of range", map.starting_room);
    }
    let mut doors: Vec<[Option<DoorRef>; DOOR_COUNT]> = vec![[None; DOOR_COUNT]; n];
    for connection in &map.connections {
        for end in [connection.from, connection.to] {
            if end.room >= n || end.door >= DOOR_COUNT {
                bail!("door {:?} out of range", end);
            }
        }
        let (a, b) = (connection.from, connection.to);
        if doors[a.room][a.door].is_some() || (a != b && doors[b.room][b.door].is_some()) {
            bail!("door used twice in {:?}", connection);
        }
        doors[a.room][a.door] = Some(b);
        doors[b.room][b.door] = Some(a);
    }

    doors
        .into_iter()
        .enumerate()
        .map(|(room, row)| -> Result<[DoorRef; DOOR_COUNT]> {
            let mut full = [DoorRef { room: 0, door: 0 }; DOOR_COUNT];
            for (door, end) in row.into_iter().enumerate() {
                full[door] = end.ok_or_else(|| anyhow!("room {} door {} is unconnected", room, door))?;
            }
            Ok(full)
        })
        .collect()
}

#[async_trait]
impl ApiClientTrait for MockApiClient {
    async fn select_problem(&self, problem_name: &str) -> Result<String> {
        info!(problem = problem_name, rooms = self.room_count(), "[mock] selected problem");
        self.query_count.store(0, Ordering::Relaxed);
        let mut selected = self
            .selected
            .lock()
            .map_err(|_| anyhow!("mock session lock poisoned"))?;
        *selected = Some(problem_name.to_string());
        Ok(problem_name.to_string())
    }

    async fn explore(&self, plans: Vec<String>) -> Result<(Vec<Vec<u8>>, u32)> {
        let selected = self
            .selected
            .lock()
            .map_err(|_| anyhow!("mock session lock poisoned"))?
            .is_some();
        if !selected {
            bail!("explore called before select");
        }

        let results = plans
            .iter()
            .map(|plan| self.execute_path(plan))
            .collect::<Result<Vec<_>>>()?;
        let query_count =
            self.query_count.fetch_add(plans.len() as u32 + 1, Ordering::Relaxed) + plans.len() as u32 + 1;
        debug!(plans = plans.len(), query_count, "[mock] explore");
        Ok((results, query_count))
    }

    async fn guess(&self, map: &GuessMap) -> Result<bool> {
        let mut selected = self
            .selected
            .lock()
            .map_err(|_| anyhow!("mock session lock poisoned"))?;
        if selected.take().is_none() {
            bail!("guess called before select");
        }
        let correct = self.check_solution(map);
        info!(correct, query_count = self.query_count(), "[mock] guess");
        Ok(correct)
    }
}
