//! Room placement
//!
//! Each partition hosts at most one room. A room keeps one free tile between
//! its walls and the partition's lower bounds and two below its (exclusive)
//! upper bounds, so rooms in neighbouring partitions never touch and no room
//! reaches the outer ring of the grid.

use rand::Rng;

use crate::config::RoomSizeRange;
use crate::generation::partition::Partition;
use crate::grid::Position;
use crate::room::Room;

/// Place one randomly sized room in every partition that can hold one
///
/// Randomness is drawn per hosting partition in a fixed order: width, height,
/// x offset, y offset. Partitions too small for the minimum room size are
/// skipped without consuming randomness. Room order follows partition order.
pub fn place_rooms<R: Rng>(
    rng: &mut R,
    partitions: &[Partition],
    sizes: &RoomSizeRange,
) -> Vec<Room> {
    let mut rooms = Vec::with_capacity(partitions.len());

    for partition in partitions {
        let available = partition.upper_right - partition.lower_left - Position::splat(2);
        let (min_w, min_h) = (sizes.min_width as i32, sizes.min_height as i32);
        if available.x < min_w || available.y < min_h {
            log::trace!(
                "partition {}-{} too small for a room",
                partition.lower_left,
                partition.upper_right
            );
            continue;
        }

        let width = rng.gen_range(min_w..=available.x.min(sizes.max_width as i32));
        let height = rng.gen_range(min_h..=available.y.min(sizes.max_height as i32));

        let lowest = partition.lower_left + Position::ONE;
        let highest = partition.upper_right - Position::ONE - Position::new(width, height);
        let x = rng.gen_range(lowest.x..=highest.x);
        let y = rng.gen_range(lowest.y..=highest.y);

        let lower_left = Position::new(x, y);
        rooms.push(Room::new(lower_left, lower_left + Position::new(width - 1, height - 1)));
    }

    rooms
}
