use crate::signature_index::Fingerprint;
use crate::{Connection, DOOR_COUNT, GuessMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub label: u8,
    /// Doors taken from the starting room to first reach this room.
    pub route: String,
    pub fingerprint: Fingerprint,
}

/// `door_target[room][door]`, one row per fully probed room.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyTable {
    rows: Vec<[usize; DOOR_COUNT]>,
}

impl AdjacencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<[usize; DOOR_COUNT]>) -> Self {
        Self { rows }
    }

    /// Appends the row of the next room; rows are indexed by room.
    pub fn push_row(&mut self, row: [usize; DOOR_COUNT]) {
        self.rows.push(row);
    }

    pub fn target(&self, room: usize, door: usize) -> usize {
        self.rows[room][door]
    }

    pub fn row(&self, room: usize) -> &[usize; DOOR_COUNT] {
        &self.rows[room]
    }

    pub fn room_count(&self) -> usize {
        self.rows.len()
    }
}

/// Result of one complete discovery pass.
#[derive(Debug, Clone)]
pub struct Discovery {
    pub rooms: Vec<Room>,
    pub doors: AdjacencyTable,
}

impl Discovery {
    pub fn labels(&self) -> Vec<u8> {
        self.rooms.iter().map(|room| room.label).collect()
    }

    /// Map with room 0, reached by the empty route, as the starting room.
    pub fn to_map(&self, connections: Vec<Connection>) -> GuessMap {
        GuessMap {
            rooms: self.labels(),
            starting_room: 0,
            connections,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DoorRef;

    #[test]
    fn table_rows_are_room_indexed() {
        let mut table = AdjacencyTable::new();
        table.push_row([0, 1, 1, 0, 0, 1]);
        table.push_row([0, 0, 0, 1, 1, 1]);
        assert_eq!(table.room_count(), 2);
        assert_eq!(table.target(0, 2), 1);
        assert_eq!(table.row(1), &[0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn map_starts_at_room_zero() {
        let discovery = Discovery {
            rooms: vec![
                Room {
                    label: 2,
                    route: String::new(),
                    fingerprint: Fingerprint::new(vec![vec![2, 1]]),
                },
                Room {
                    label: 1,
                    route: "4".to_string(),
                    fingerprint: Fingerprint::new(vec![vec![1, 1]]),
                },
            ],
            doors: AdjacencyTable::new(),
        };
        let connection = Connection {
            from: DoorRef { room: 0, door: 4 },
            to: DoorRef { room: 1, door: 0 },
        };
        let map = discovery.to_map(vec![connection]);
        assert_eq!(map.rooms, vec![2, 1]);
        assert_eq!(map.starting_room, 0);
        assert_eq!(map.connections, vec![connection]);
    }
}
