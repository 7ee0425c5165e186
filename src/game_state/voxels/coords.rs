//! # Coordinate Types and Conversions
//!
//! This module defines the coordinate vocabulary shared by the whole voxel
//! system: integer grid positions, vertical-column sectors, and the
//! conversions between continuous space and the grid.

use cgmath::{Point3, Vector3};

/// The canonical voxel-grid coordinate. One position holds at most one block.
pub type Position = Point3<i32>;

/// A sector key grouping positions for amortized visibility scans.
///
/// Sectors are vertical columns: the y component is always pinned to 0.
pub type Sector = Point3<i32>;

/// Half-width of the playable world. The generated ground spans
/// `[-WORLD_SIZE, WORLD_SIZE]` on the x and z axes.
pub const WORLD_SIZE: i32 = 160;

/// Target update rate of the game clock, in ticks per second.
/// Also bounds the wall-clock budget of one deferred-queue drain.
pub const TICKS_PER_SEC: u32 = 60;

/// Edge length of a sector on the x and z axes.
pub const SECTOR_SIZE: i32 = 16;

/// The six axis-aligned unit offsets to a voxel's face neighbors,
/// in the order +y, -y, -x, +x, +z, -z.
pub const FACES: [Vector3<i32>; 6] = [
    Vector3::new(0, 1, 0),
    Vector3::new(0, -1, 0),
    Vector3::new(-1, 0, 0),
    Vector3::new(1, 0, 0),
    Vector3::new(0, 0, 1),
    Vector3::new(0, 0, -1),
];

/// Returns the grid position of the voxel containing a continuous position.
///
/// Each component rounds to the nearest integer, halves away from zero.
pub fn normalize(position: Point3<f32>) -> Position {
    Position::new(
        position.x.round() as i32,
        position.y.round() as i32,
        position.z.round() as i32,
    )
}

/// Returns the sector containing the given grid position.
///
/// Floor division keeps sectors aligned across the negative axes,
/// and the y component is discarded so a sector spans all heights.
pub fn sectorize(position: Position) -> Sector {
    Sector::new(
        position.x.div_euclid(SECTOR_SIZE),
        0,
        position.z.div_euclid(SECTOR_SIZE),
    )
}
