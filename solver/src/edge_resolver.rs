// Pairs doors into undirected connections.
//
// The adjacency table only says which room a door leads to, not which door of
// that room leads back. When room i has several doors to room t, the k-th of
// them (in door order) is paired with the k-th door of t leading to i. Doors
// of room i leading to i itself are paired among themselves in door order:
// first with second, third with fourth, and so on.

use crate::error::{Result, SolveError};
use crate::graph::AdjacencyTable;
use crate::{Connection, DOOR_COUNT, DoorRef};

/// Doors of `room` leading to `target`, in increasing door order.
fn doors_to(table: &AdjacencyTable, room: usize, target: usize) -> Vec<usize> {
    (0..DOOR_COUNT)
        .filter(|&door| table.target(room, door) == target)
        .collect()
}

/// Door on the far side of `(room, door)`.
fn partner(table: &AdjacencyTable, room: usize, door: usize) -> Result<DoorRef> {
    let target = table.target(room, door);
    let inconsistent = SolveError::InconsistentAdjacency { room, door, target };
    if target >= table.room_count() {
        return Err(inconsistent);
    }

    let siblings = doors_to(table, room, target);
    let rank = siblings.iter().take_while(|&&d| d < door).count();

    if target == room {
        let pair = if rank % 2 == 0 {
            // An odd door out is connected to itself.
            siblings.get(rank + 1).copied().unwrap_or(door)
        } else {
            siblings[rank - 1]
        };
        return Ok(DoorRef { room, door: pair });
    }

    doors_to(table, target, room)
        .get(rank)
        .map(|&back| DoorRef {
            room: target,
            door: back,
        })
        .ok_or(inconsistent)
}

/// Every door of `table` in exactly one connection.
///
/// Each connection is listed once, from its smaller endpoint. Fails if the two
/// directions of some room pair disagree on how many doors join them.
pub fn resolve_connections(table: &AdjacencyTable) -> Result<Vec<Connection>> {
    let mut connections = Vec::with_capacity(table.room_count() * DOOR_COUNT / 2);
    for room in 0..table.room_count() {
        for door in 0..DOOR_COUNT {
            let from = DoorRef { room, door };
            let to = partner(table, room, door)?;
            if from <= to {
                connections.push(Connection { from, to });
            }
        }
    }
    Ok(connections)
}
