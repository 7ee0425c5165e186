//! # Terrain Generation
//!
//! Randomized, stateless generators for the world's starting content:
//! the flat base layer with its boundary walls, tapering hills, cloud
//! banks, and trees. Every generator returns placement lists and never
//! mutates the world store; the caller feeds the output through
//! `add_block` with deferred visibility.
//!
//! Generation is best effort: edge parameters (tiny worlds, exhausted
//! tree candidates) shrink the output rather than failing.

use log::info;

use super::block::BlockKind;
use super::coords::Position;
use super::world::WorldStore;

/// A block kind to be placed at a grid position.
pub type Placement = (BlockKind, Position);

/// Ground level of the grass layer.
const BASE_GRASS_Y: i32 = -2;

/// Radius around the origin kept clear of hills, so the player never
/// spawns inside one.
const SPAWN_CLEARANCE: i32 = 5;

/// Heights at which cloud banks can form.
const CLOUD_LEVELS: [i32; 5] = [18, 20, 22, 24, 26];

/// Number of vertical cells above a grass cell that must be empty for a
/// tree to take root there.
const TREE_HEADROOM: i32 = 9;

/// Default number of hills for a world of half-width `world_size`.
pub fn default_hill_count(world_size: i32) -> usize {
    (world_size * 3 / 2) as usize
}

/// Default number of clouds for a world of half-width `world_size`.
pub fn default_cloud_count(world_size: i32) -> usize {
    (world_size * 15 / 4) as usize
}

/// Default number of trees for a world of half-width `world_size`.
pub fn default_tree_count(world_size: i32) -> usize {
    (world_size * 25 / 8) as usize
}

/// Generates the base of the world: a grass layer at y = -2 over a stone
/// layer at y = -3, spanning `[-world_size, world_size]` on x and z, with
/// a solid stone wall from y = -2 to y = 2 along the outer perimeter.
pub fn generate_base_layer(world_size: i32) -> Vec<Placement> {
    let mut placements = Vec::new();
    for x in -world_size..=world_size {
        for z in -world_size..=world_size {
            placements.push((BlockKind::Grass, Position::new(x, BASE_GRASS_Y, z)));
            placements.push((BlockKind::Stone, Position::new(x, BASE_GRASS_Y - 1, z)));
            if x.abs() == world_size || z.abs() == world_size {
                for dy in -2..3 {
                    placements.push((BlockKind::Stone, Position::new(x, dy, z)));
                }
            }
        }
    }
    placements
}

/// Generates `num_hills` hills at random centers, keeping their centers
/// at least 10 blocks inside the boundary walls. Worlds too small for
/// that margin pile every hill onto the origin instead.
pub fn generate_hills(world_size: i32, num_hills: usize) -> Vec<Vec<Placement>> {
    let margin = (world_size - 10).max(0);
    let mut hills = Vec::with_capacity(num_hills);
    for _ in 0..num_hills {
        let center_x = fastrand::i32(-margin..=margin);
        let center_z = fastrand::i32(-margin..=margin);
        hills.push(generate_hill(center_x, center_z));
    }
    hills
}

/// Generates a single hill centered at (`center_x`, `center_z`): a stack
/// of disks of one random material, shrinking by one block of radius per
/// level so the hill tapers off. Cells inside the spawn clearance circle
/// are skipped.
pub fn generate_hill(center_x: i32, center_z: i32) -> Vec<Placement> {
    let base = -1;
    let taper_rate = 1;
    let height = fastrand::i32(1..=6);
    let mut side_length = fastrand::i32(4..=8);
    let kind = [BlockKind::Grass, BlockKind::Sand, BlockKind::Brick][fastrand::usize(0..3)];

    let mut hill = Vec::new();
    for y in base..base + height {
        for x in center_x - side_length..=center_x + side_length {
            for z in center_z - side_length..=center_z + side_length {
                let (dx, dz) = (x - center_x, z - center_z);
                if dx * dx + dz * dz > (side_length + 1) * (side_length + 1) {
                    continue;
                }
                if x * x + z * z < SPAWN_CLEARANCE * SPAWN_CLEARANCE {
                    continue;
                }
                hill.push((kind, Position::new(x, y, z)));
            }
        }
        side_length -= taper_rate;
    }
    hill
}

/// Generates `num_clouds` clouds at random positions in the fixed cloud
/// height bands.
pub fn generate_clouds(world_size: i32, num_clouds: usize) -> Vec<Vec<Placement>> {
    let mut clouds = Vec::with_capacity(num_clouds);
    for _ in 0..num_clouds {
        let center_x = fastrand::i32(-world_size..=world_size);
        let center_z = fastrand::i32(-world_size..=world_size);
        let center_y = CLOUD_LEVELS[fastrand::usize(0..CLOUD_LEVELS.len())];
        let radius = fastrand::i32(3..=6);
        clouds.push(generate_cloud(center_x, center_y, center_z, radius));
    }
    clouds
}

/// Generates a single flat cloud: a disk of one random cloud kind with
/// the circular footprint `dx^2 + dz^2 <= (radius + 1)^2`.
pub fn generate_cloud(center_x: i32, center_y: i32, center_z: i32, radius: i32) -> Vec<Placement> {
    let kind = if fastrand::bool() {
        BlockKind::LightCloud
    } else {
        BlockKind::DarkCloud
    };
    let mut cloud = Vec::new();
    for x in center_x - radius..=center_x + radius {
        for z in center_z - radius..=center_z + radius {
            let (dx, dz) = (x - center_x, z - center_z);
            if dx * dx + dz * dz > (radius + 1) * (radius + 1) {
                continue;
            }
            cloud.push((kind, Position::new(x, center_y, z)));
        }
    }
    cloud
}

/// Generates up to `num_trees` trees on the existing world.
///
/// Candidate sites are grass cells at the lowest grass level (ground
/// level, never hillsides) with enough empty headroom above them. Sites
/// are sampled without replacement; when they run out, fewer trees are
/// returned.
pub fn generate_trees(world: &WorldStore, num_trees: usize) -> Vec<Vec<Placement>> {
    let grass_cells: Vec<Position> = world
        .iter_blocks()
        .filter(|(p, kind)| *kind == BlockKind::Grass && p.y <= 0)
        .map(|(p, _)| p)
        .collect();
    let Some(min_grass_level) = grass_cells.iter().map(|p| p.y).min() else {
        return Vec::new();
    };

    let mut candidates: Vec<Position> = grass_cells
        .into_iter()
        .filter(|p| p.y == min_grass_level)
        .filter(|p| {
            (1..=TREE_HEADROOM).all(|dy| !world.contains(Position::new(p.x, p.y + dy, p.z)))
        })
        .collect();

    let mut trees = Vec::new();
    for _ in 0..num_trees {
        if candidates.is_empty() {
            info!(
                "tree sites exhausted after {} of {} trees",
                trees.len(),
                num_trees
            );
            break;
        }
        let base = candidates.swap_remove(fastrand::usize(0..candidates.len()));
        trees.push(generate_tree(base.x, base.y + 1, base.z, 5));
    }
    trees
}

/// Generates a single tree rooted at (x, y, z): a vertical trunk of
/// `trunk_height` blocks topped by a 5 x 3 x 5 leaf canopy.
pub fn generate_tree(x: i32, y: i32, z: i32, trunk_height: i32) -> Vec<Placement> {
    let mut tree = Vec::new();
    for stem in 0..trunk_height {
        tree.push((BlockKind::TreeTrunk, Position::new(x, y + stem, z)));
    }
    for dx in -2..=2 {
        for dy in 0..3 {
            for dz in -2..=2 {
                let position = Position::new(x + dx, y + trunk_height + dy, z + dz);
                tree.push((BlockKind::TreeLeaves, position));
            }
        }
    }
    tree
}
