//! # Collision Resolver
//!
//! Penetration-resolution sweep between the player's bounding column and
//! the voxel grid. This is deliberately cheap: per sub-step it tests at
//! most 6 faces x 3 axes x player-height cells against the world store,
//! never a broad-phase pass. The update loop's 8 motion sub-steps keep
//! the per-step displacement small enough for this approximation.

use cgmath::Point3;

use super::voxels::coords::{normalize, FACES};
use super::voxels::world::WorldStore;

/// How much the player must overlap a neighboring cell, per axis, before
/// the overlap counts as a collision. A pad of 0.25 lets the player sink
/// slightly into terrain, as if walking through tall grass; at 0.5 or
/// more the player would fall through the ground.
const PAD: f32 = 0.25;

/// Result of one collision query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    /// The proposed position, clamped out of any colliding cells.
    pub position: Point3<f32>,
    /// True when a vertical face (floor or ceiling) was hit; the caller
    /// zeroes the player's vertical velocity in response.
    pub hit_vertical_face: bool,
}

/// Clamps `position` so a player of the given height (in stacked cells)
/// does not overlap any collidable block.
///
/// For each face direction and axis, the penetration depth into the
/// neighboring cell is measured against `PAD`; on a hit the position is
/// pushed back along that axis and the remaining cells for that face are
/// skipped. Cells that are empty or non-collidable (clouds, leaves) never
/// collide.
pub fn collide(world: &WorldStore, position: Point3<f32>, height: i32) -> CollisionOutcome {
    let mut p = [position.x, position.y, position.z];
    let np = normalize(position);
    let np = [np.x, np.y, np.z];
    let mut hit_vertical_face = false;

    for face in FACES {
        let face = [face.x, face.y, face.z];
        for axis in 0..3 {
            if face[axis] == 0 {
                continue;
            }
            // Overlap with the neighboring cell along this axis.
            let d = (p[axis] - np[axis] as f32) * face[axis] as f32;
            if d < PAD {
                continue;
            }
            for dy in 0..height {
                let mut cell = np;
                cell[1] -= dy;
                cell[axis] += face[axis];
                if world.can_pass_through_block(Point3::new(cell[0], cell[1], cell[2])) {
                    continue;
                }
                p[axis] -= (d - PAD) * face[axis] as f32;
                if face[1] != 0 {
                    hit_vertical_face = true;
                }
                break;
            }
        }
    }

    CollisionOutcome {
        position: Point3::new(p[0], p[1], p[2]),
        hit_vertical_face,
    }
}
