//! Example: Generate a maze layout
//!
//! Demonstrates the raw generation pipeline without painting or objects.

use rust_maze_level::*;
use rust_maze_level::generation::generate_layout;

fn main() {
    println!("Maze Level Generation Example");
    println!("=============================\n");

    let config = LevelConfigBuilder::new()
        .seed(42)
        .world_size(WorldSize::Small) // Small keeps the dump readable
        .target_partition_count(8)
        .unwrap()
        .max_partition_layers(4)
        .unwrap()
        .build()
        .unwrap();

    println!("Configuration:");
    println!("  Seed: {}", config.seed);
    println!("  World Size: {} ({}x{})", config.world_size.name(), config.width(), config.height());
    println!("  Target Partitions: {}", config.target_partition_count);
    println!("  Partition Layers: {}", config.max_partition_layers);
    println!();

    println!("Generating layout...");
    let layout = match generate_layout(&config) {
        Ok(layout) => layout,
        Err(e) => {
            println!("Generation failed: {e}");
            println!("Try another seed.");
            return;
        }
    };
    println!(
        "Generated {} rooms in {} partitions\n",
        layout.rooms.len(),
        layout.partitions.len()
    );

    let corridor_tiles: usize = layout.hallways.iter().map(Hallway::len).sum();
    let avg_len = corridor_tiles as f32 / layout.hallways.len().max(1) as f32;

    println!("Statistics:");
    println!("  Hallways: {}", layout.hallways.len());
    println!("  Corridor tiles: {}", corridor_tiles);
    println!("  Average hallway length: {:.2}", avg_len);
    println!();

    println!("Rooms:");
    for (id, room) in layout.rooms.iter().enumerate() {
        println!(
            "  Room {}: {} to {}, {}x{}, floor={}",
            id,
            room.lower_left,
            room.upper_right,
            room.width(),
            room.height(),
            room.floor_area()
        );
    }

    println!("\nHallways:");
    for hallway in &layout.hallways {
        println!(
            "  {} -> {}: {} tiles, {} walls",
            hallway.source,
            hallway.target,
            hallway.len(),
            hallway.walls.len()
        );
    }

    println!("\nGeneration complete!");
}
