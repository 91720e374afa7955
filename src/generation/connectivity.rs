//! Connectivity driver
//!
//! Keeps routing corridors until every room shares one union-find set.
//! Each round starts from the smallest set: every member, in index order,
//! tries partners outside the set from least to most connected. The first
//! corridor that routes joins the two sets and ends the round. A round in
//! which nothing routes is fatal: claimed tiles only accumulate, so the set
//! can never be reached later.

use crate::error::{LevelError, Result};
use crate::generation::corridor::{CorridorRouter, Hallway};
use crate::generation::disjoint_set::DisjointSet;

/// Connect every room of `router`, directly or transitively
///
/// # Errors
///
/// Returns `Disconnected` when a round exhausts every member/partner pair.
pub fn connect_rooms(router: &mut CorridorRouter<'_>) -> Result<Vec<Hallway>> {
    let total = router.rooms().len();
    let mut sets = DisjointSet::new(total);
    let mut hallways = Vec::with_capacity(total.saturating_sub(1));

    while !sets.is_fully_connected() {
        let anchor = sets.loneliest();
        let Some(hallway) = join_set(router, &sets, anchor) else {
            let connected = sets.largest_set_size();
            log::warn!(
                "room {} cannot be reached; {} of {} rooms connected",
                anchor,
                connected,
                total
            );
            return Err(LevelError::Disconnected { connected, total });
        };

        sets.union(hallway.source, hallway.target);
        log::trace!(
            "hallway {} -> {} ({} tiles), {} sets left",
            hallway.source,
            hallway.target,
            hallway.len(),
            sets.set_count()
        );
        hallways.push(hallway);
    }

    Ok(hallways)
}

fn join_set(router: &mut CorridorRouter<'_>, sets: &DisjointSet, anchor: usize) -> Option<Hallway> {
    for member in sets.members(anchor) {
        let mut tried = vec![false; sets.len()];
        while let Some(partner) = sets.next_loneliest(member, &tried) {
            tried[partner] = true;
            if let Some(hallway) = router.connect(member, partner) {
                return Some(hallway);
            }
        }
    }
    None
}
