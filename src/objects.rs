//! Game objects placed on a painted level
//!
//! Population runs after painting: it samples tiles from a
//! [`TileGrid<BasicTile>`] and stamps each object's tile over whatever was
//! there, remembering the covered tile so movable objects can restore it.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{LevelError, Result};
use crate::grid::{distance, Position};
use crate::level::Level;
use crate::tiles::{BasicTile, TileGrid};

/// RNG stream used for object placement, kept apart from layout generation
const OBJECT_STREAM: u64 = 1;

/// Object counts and placement constraints
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectConfig {
    pub torches: usize,
    pub breads: usize,
    pub portal_pairs: usize,
    /// Minimum distance between the spawn point and the exit
    pub min_spawn_exit_distance: f64,
    /// Minimum distance between the two ends of a portal pair
    pub min_portal_distance: f64,
    /// Random draws allowed per object before placement fails
    pub max_sample_attempts: usize,
}

impl Default for ObjectConfig {
    fn default() -> Self {
        Self {
            torches: 8,
            breads: 4,
            portal_pairs: 3,
            min_spawn_exit_distance: 20.0,
            min_portal_distance: 25.0,
            max_sample_attempts: 10_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mobility {
    Movable,
    Immovable,
}

/// Kinds of object that can occupy a tile
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Avatar,
    Exit,
    Torch,
    Bread,
    Portal,
}

impl EntityKind {
    /// Only the avatar moves; everything else stays where it was placed
    pub fn mobility(self) -> Mobility {
        match self {
            EntityKind::Avatar => Mobility::Movable,
            _ => Mobility::Immovable,
        }
    }

    pub fn tile(self) -> BasicTile {
        match self {
            EntityKind::Avatar => BasicTile::Avatar,
            EntityKind::Exit => BasicTile::Exit,
            EntityKind::Torch => BasicTile::Torch,
            EntityKind::Bread => BasicTile::Bread,
            EntityKind::Portal => BasicTile::Portal,
        }
    }
}

/// An object stamped onto a tile grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entity {
    pub kind: EntityKind,
    pub position: Position,
    /// Tile covered by this entity
    pub underlying: BasicTile,
}

impl Entity {
    /// Stamp a new entity onto `tiles` at `position`
    fn place(tiles: &mut TileGrid<BasicTile>, kind: EntityKind, position: Position) -> Self {
        let underlying = tiles.get(position);
        tiles.set(position, kind.tile());
        Self {
            kind,
            position,
            underlying,
        }
    }

    #[inline]
    pub fn mobility(&self) -> Mobility {
        self.kind.mobility()
    }

    /// Move the entity to `to`, restoring the tile it covered
    ///
    /// # Errors
    ///
    /// `Immovable` if the entity's kind cannot move. The grid is untouched.
    ///
    /// # Panics
    ///
    /// Panics if `to` lies outside the grid.
    pub fn relocate(&mut self, tiles: &mut TileGrid<BasicTile>, to: Position) -> Result<()> {
        if self.mobility() == Mobility::Immovable {
            return Err(LevelError::Immovable {
                kind: self.kind,
                position: self.position,
            });
        }

        tiles.set(self.position, self.underlying);
        self.underlying = tiles.get(to);
        tiles.set(to, self.kind.tile());
        self.position = to;
        Ok(())
    }
}

/// Two linked portal tiles
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortalPair {
    ends: [Position; 2],
}

impl PortalPair {
    pub fn new(a: Position, b: Position) -> Self {
        Self { ends: [a, b] }
    }

    #[inline]
    pub fn ends(&self) -> [Position; 2] {
        self.ends
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        self.ends.contains(&pos)
    }

    /// The end opposite `pos`, or `None` if `pos` is not an end of this pair
    pub fn other_end(&self, pos: Position) -> Option<Position> {
        match self.ends {
            [a, b] if a == pos => Some(b),
            [a, b] if b == pos => Some(a),
            _ => None,
        }
    }
}

/// Every object placed on a level
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLayout {
    pub avatar: Entity,
    pub exit: Entity,
    pub torches: Vec<Entity>,
    pub breads: Vec<Entity>,
    pub portals: Vec<PortalPair>,
}

impl ObjectLayout {
    pub fn portal_pair_at(&self, pos: Position) -> Option<&PortalPair> {
        self.portals.iter().find(|pair| pair.contains(pos))
    }

    /// Torch positions, the light sources for field-of-view
    pub fn light_sources(&self) -> Vec<Position> {
        self.torches.iter().map(|t| t.position).collect()
    }
}

/// Place the avatar, exit, torches, bread and portals on a painted level
///
/// The RNG is seeded from the level seed on a separate stream, so the same
/// level always gets the same objects without disturbing layout generation.
///
/// # Errors
///
/// `PlacementFailed` if some object finds no valid tile within
/// `max_sample_attempts` draws.
pub fn populate(
    level: &Level,
    tiles: &mut TileGrid<BasicTile>,
    config: &ObjectConfig,
) -> Result<ObjectLayout> {
    let mut rng = ChaCha8Rng::seed_from_u64(level.config().seed);
    rng.set_stream(OBJECT_STREAM);
    let attempts = config.max_sample_attempts;

    let spawn = sample_tile(&mut rng, tiles, BasicTile::Floor, attempts, "avatar")?;
    let avatar = Entity::place(tiles, EntityKind::Avatar, spawn);

    let exit_pos = sample_exit(&mut rng, level, tiles, spawn, config)?;
    let exit = Entity::place(tiles, EntityKind::Exit, exit_pos);

    let mut torches = Vec::with_capacity(config.torches);
    for _ in 0..config.torches {
        let pos = sample_tile(&mut rng, tiles, BasicTile::Floor, attempts, "torch")?;
        torches.push(Entity::place(tiles, EntityKind::Torch, pos));
    }

    let mut breads = Vec::with_capacity(config.breads);
    for _ in 0..config.breads {
        let pos = sample_tile(&mut rng, tiles, BasicTile::Floor, attempts, "bread")?;
        breads.push(Entity::place(tiles, EntityKind::Bread, pos));
    }

    let mut portals = Vec::with_capacity(config.portal_pairs);
    for _ in 0..config.portal_pairs {
        let a = sample_tile(&mut rng, tiles, BasicTile::Floor, attempts, "portal")?;
        let b = sample_portal_end(&mut rng, tiles, a, config)?;
        tiles.set(a, BasicTile::Portal);
        tiles.set(b, BasicTile::Portal);
        portals.push(PortalPair::new(a, b));
    }

    log::debug!(
        "Placed avatar at {}, exit at {}, {} torches, {} breads, {} portal pairs",
        avatar.position,
        exit.position,
        torches.len(),
        breads.len(),
        portals.len()
    );

    Ok(ObjectLayout {
        avatar,
        exit,
        torches,
        breads,
        portals,
    })
}

/// Draw uniform positions until one holds `wanted`
fn sample_tile<R: Rng>(
    rng: &mut R,
    tiles: &TileGrid<BasicTile>,
    wanted: BasicTile,
    attempts: usize,
    what: &str,
) -> Result<Position> {
    for _ in 0..attempts {
        let pos = random_position(rng, tiles);
        if tiles.get(pos) == wanted {
            return Ok(pos);
        }
    }
    Err(LevelError::PlacementFailed(format!(
        "no {} tile for {} after {} attempts",
        wanted.description(),
        what,
        attempts
    )))
}

#[inline]
fn random_position<R: Rng>(rng: &mut R, tiles: &TileGrid<BasicTile>) -> Position {
    Position::new(
        rng.gen_range(0..tiles.width()),
        rng.gen_range(0..tiles.height()),
    )
}

/// Draw floor tiles until one is far enough from the first end `a`
fn sample_portal_end<R: Rng>(
    rng: &mut R,
    tiles: &TileGrid<BasicTile>,
    a: Position,
    config: &ObjectConfig,
) -> Result<Position> {
    for _ in 0..config.max_sample_attempts {
        let pos = random_position(rng, tiles);
        if tiles.get(pos) == BasicTile::Floor && distance(a, pos) >= config.min_portal_distance {
            return Ok(pos);
        }
    }
    Err(LevelError::PlacementFailed(format!(
        "no portal end at least {} tiles from {}",
        config.min_portal_distance, a
    )))
}

/// Draw room wall tiles until one is far enough from `spawn`
///
/// Corners are rejected since they cannot be walked into from a floor tile.
fn sample_exit<R: Rng>(
    rng: &mut R,
    level: &Level,
    tiles: &TileGrid<BasicTile>,
    spawn: Position,
    config: &ObjectConfig,
) -> Result<Position> {
    let rooms = level.rooms();
    if rooms.is_empty() {
        return Err(LevelError::PlacementFailed("no room to host the exit".into()));
    }

    for _ in 0..config.max_sample_attempts {
        let room = rooms[rng.gen_range(0..rooms.len())];
        let pos = Position::new(
            rng.gen_range(room.lower_left.x..=room.upper_right.x),
            rng.gen_range(room.lower_left.y..=room.upper_right.y),
        );
        if tiles.get(pos) == BasicTile::Wall
            && !room.is_corner(pos)
            && distance(pos, spawn) >= config.min_spawn_exit_distance
        {
            return Ok(pos);
        }
    }
    Err(LevelError::PlacementFailed(format!(
        "no exit site at least {} tiles from the spawn at {}",
        config.min_spawn_exit_distance, spawn
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LevelConfigBuilder;
    use crate::grid::Grid;
    use crate::tiles::BasicPalette;
    use rand::RngCore;

    fn populated_level() -> (Level, TileGrid<BasicTile>, ObjectLayout) {
        (0..200)
            .find_map(|seed| {
                let config = LevelConfigBuilder::new().seed(seed).build().ok()?;
                let level = Level::generate(config).ok()?;
                let mut tiles = level.paint(&BasicPalette);
                let objects = populate(&level, &mut tiles, &ObjectConfig::default()).ok()?;
                Some((level, tiles, objects))
            })
            .expect("no seed in 0..200 produced a populated level")
    }

    #[test]
    fn test_populate_counts() {
        let (_, tiles, objects) = populated_level();
        assert_eq!(tiles.count(BasicTile::Avatar), 1);
        assert_eq!(tiles.count(BasicTile::Exit), 1);
        assert_eq!(tiles.count(BasicTile::Torch), 8);
        assert_eq!(tiles.count(BasicTile::Bread), 4);
        assert_eq!(tiles.count(BasicTile::Portal), 6);
        assert_eq!(objects.torches.len(), 8);
        assert_eq!(objects.breads.len(), 4);
        assert_eq!(objects.portals.len(), 3);
    }

    #[test]
    fn test_exit_placement() {
        let (level, _, objects) = populated_level();
        let exit = objects.exit.position;
        assert_eq!(objects.exit.underlying, BasicTile::Wall);
        assert!(distance(exit, objects.avatar.position) >= 20.0);

        let room = level.room(level.find_room_at(exit).unwrap()).unwrap();
        assert!(room.on_perimeter(exit));
        assert!(!room.is_corner(exit));
    }

    #[test]
    fn test_portal_pairs_are_far_apart() {
        let (_, tiles, objects) = populated_level();
        for pair in &objects.portals {
            let [a, b] = pair.ends();
            assert!(distance(a, b) >= 25.0);
            assert_eq!(tiles.get(a), BasicTile::Portal);
            assert_eq!(objects.portal_pair_at(b), Some(pair));
        }
    }

    #[test]
    fn test_populate_is_deterministic() {
        let (level, _, objects) = populated_level();
        let mut tiles = level.paint(&BasicPalette);
        let again = populate(&level, &mut tiles, &ObjectConfig::default()).unwrap();
        assert_eq!(objects, again);
    }

    #[test]
    fn test_avatar_relocation_restores_tiles() {
        let (level, mut tiles, mut objects) = populated_level();
        let start = objects.avatar.position;
        let target = level
            .grid()
            .neighbors(start)
            .find(|&n| tiles.get(n) == BasicTile::Floor)
            .expect("spawn tile has no floor neighbour");

        objects.avatar.relocate(&mut tiles, target).unwrap();
        assert_eq!(tiles.get(start), BasicTile::Floor);
        assert_eq!(tiles.get(target), BasicTile::Avatar);
        assert_eq!(objects.avatar.position, target);
        assert_eq!(objects.avatar.underlying, BasicTile::Floor);
    }

    #[test]
    fn test_immovable_entities() {
        let (_, mut tiles, mut objects) = populated_level();
        let before = tiles.clone();
        let torch = &mut objects.torches[0];
        let err = torch.relocate(&mut tiles, Position::new(0, 0)).unwrap_err();
        assert_eq!(
            err,
            LevelError::Immovable {
                kind: EntityKind::Torch,
                position: torch.position,
            }
        );
        assert_eq!(tiles, before);
        assert_eq!(objects.exit.mobility(), Mobility::Immovable);
    }

    #[test]
    fn test_portal_other_end() {
        let a = Position::new(1, 2);
        let b = Position::new(30, 2);
        let pair = PortalPair::new(a, b);
        assert_eq!(pair.other_end(a), Some(b));
        assert_eq!(pair.other_end(b), Some(a));
        assert_eq!(pair.other_end(Position::new(5, 5)), None);
    }

    /// Counts the words drawn from an inner RNG
    struct CountingRng {
        inner: ChaCha8Rng,
        draws: usize,
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.draws += 1;
            self.inner.fill_bytes(dest)
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.draws += 1;
            self.inner.try_fill_bytes(dest)
        }
    }

    #[test]
    fn test_portal_end_respects_attempt_budget() {
        // Every tile is floor but no two tiles are 25 apart
        let grid = Grid::new(6, 6);
        let tiles = TileGrid::new(grid, BasicTile::Floor);
        assert_eq!(tiles.count(BasicTile::Floor), grid.len());
        let config = ObjectConfig {
            max_sample_attempts: 50,
            ..ObjectConfig::default()
        };
        let mut rng = CountingRng {
            inner: ChaCha8Rng::seed_from_u64(7),
            draws: 0,
        };

        let err = sample_portal_end(&mut rng, &tiles, Position::new(2, 2), &config).unwrap_err();
        assert!(matches!(err, LevelError::PlacementFailed(_)));
        // Two coordinates per attempt, with slack for rejection sampling
        assert!(rng.draws >= 2 * 50);
        assert!(rng.draws < 4 * 50, "{} draws for 50 attempts", rng.draws);
    }

    #[test]
    fn test_placement_failure() {
        let (level, _, _) = populated_level();
        let mut tiles = level.paint(&BasicPalette);
        let config = ObjectConfig {
            min_spawn_exit_distance: 10_000.0,
            max_sample_attempts: 50,
            ..ObjectConfig::default()
        };
        let err = populate(&level, &mut tiles, &config).unwrap_err();
        assert!(matches!(err, LevelError::PlacementFailed(_)));
    }
}
