//! Complete workflow demonstration for rust_maze_level

use rust_maze_level::*;

fn main() -> Result<()> {
    println!("=== rust_maze_level Complete Demo ===\n");

    // Step 1 and 2: configure and generate, moving to the next seed when the
    // rooms cannot all be joined
    println!("Step 1: Generating level...");
    let mut seed = 12345;
    let level = loop {
        let config = LevelConfigBuilder::new()
            .seed(seed)
            .world_size(WorldSize::Standard)
            .build()?;
        match Level::generate(config) {
            Ok(level) => break level,
            Err(e @ LevelError::Disconnected { .. }) => {
                println!("  Seed {seed}: {e}, retrying");
                seed += 1;
            }
            Err(e) => return Err(e),
        }
    };

    println!("  Seed: {}", level.config().seed);
    println!("  Size: {}x{}", level.width(), level.height());
    println!("  Rooms: {}", level.room_count());
    println!("  Hallways: {}", level.hallways().len());

    // Step 2: Room graph
    println!("\nStep 2: Room connections:");
    for id in 0..level.room_count() {
        println!("  Room {} -> {:?}", id, level.rooms_connected_to(id));
    }

    // Step 3: Query spatial index
    #[cfg(feature = "spatial-index")]
    {
        println!("\nStep 3: Spatial queries:");
        let test_pos = Position::new(level.width() / 2, level.height() / 2);
        if let Some(room_id) = level.nearest_room(test_pos) {
            let room = level.room(room_id)?;
            println!("  Position {} -> Room {} centered at {}", test_pos, room_id, room.center());
        }
    }

    // Step 4: Paint and populate
    println!("\nStep 4: Painting and placing objects...");
    let mut tiles = level.paint(&BasicPalette);
    let objects = populate(&level, &mut tiles, &ObjectConfig::default())?;
    println!("  Floor tiles: {}", tiles.count(BasicTile::Floor));
    println!("  Wall tiles: {}", tiles.count(BasicTile::Wall));
    println!("  Avatar: {}", objects.avatar.position);
    println!("  Exit: {}", objects.exit.position);
    for pair in &objects.portals {
        let [a, b] = pair.ends();
        println!("  Portal: {} <-> {}", a, b);
    }
    println!("\n{tiles}");

    // Step 5: Field of view from the avatar and every torch
    println!("\nStep 5: Field of view...");
    let mut origins = objects.light_sources();
    origins.push(objects.avatar.position);
    let view = field_of_view(&tiles, &origins, 5);
    let lit = view.iter().filter(|&(_, tile)| tile != BasicTile::Nothing).count();
    println!("  Lit tiles: {}", lit);
    println!("\n{view}");

    println!("\n=== Demo Complete ===");
    Ok(())
}
