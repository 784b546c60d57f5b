pub mod api;
pub mod api_trait;
pub mod config;
pub mod edge_resolver;
pub mod error;
pub mod graph;
pub mod mock_api;
pub mod orchestrator;
pub mod planner;
pub mod problems;
pub mod signature_index;
pub mod solver;


use serde::{Deserialize, Serialize};

/// Every room has exactly this many doors, numbered `0..DOOR_COUNT`.
pub const DOOR_COUNT: usize = 6;

/// One endpoint of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DoorRef {
    pub room: usize,
    pub door: usize,
}

/// An undirected pairing of two doors, possibly on the same room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: DoorRef,
    pub to: DoorRef,
}

/// The map submitted to `/guess`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessMap {
    pub rooms: Vec<u8>,
    #[serde(rename = "startingRoom")]
    pub starting_room: usize,
    pub connections: Vec<Connection>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guess_map_uses_contest_field_names() {
        let map = GuessMap {
            rooms: vec![0, 1],
            starting_room: 0,
            connections: vec![Connection {
                from: DoorRef { room: 0, door: 3 },
                to: DoorRef { room: 1, door: 5 },
            }],
        };
        let value = serde_json::to_value(&map).unwrap();
        assert_eq!(value["startingRoom"], 0);
        assert_eq!(value["rooms"], serde_json::json!([0, 1]));
        assert_eq!(value["connections"][0]["from"]["door"], 3);
        assert_eq!(value["connections"][0]["to"]["room"], 1);
    }
}
