//! # Player Kinematics
//!
//! The player's position, view rotation, vertical velocity, movement
//! intent, and inventory. Motion intent is accumulated from discrete
//! input events (signed counters, so two simultaneous "forward" sources
//! compose and cancel correctly) and integrated each sub-tick against a
//! collision callback supplied by the game loop.

use cgmath::{Point3, Vector3};

use super::collision::CollisionOutcome;
use super::voxels::block::BlockKind;
use super::voxels::coords::WORLD_SIZE;

/// Maximum jump height, in blocks.
const MAX_JUMP_HEIGHT: f32 = 1.0;

/// Terminal falling speed, in blocks per second.
const MAX_FALL_SPEED: f32 = 50.0;

/// Horizontal (and vertical) speed while flying, in blocks per second.
const FLYING_SPEED: f32 = 15.0;

/// Downward acceleration, in blocks per second squared.
const GRAVITY: f32 = 20.0;

/// Step by which walking speed is raised or lowered.
const WALK_SPEED_INCREMENT: f32 = 5.0;

/// Fastest configurable walking speed.
const MAX_WALK_SPEED: f32 = 20.0;

/// Height of the player's bounding column, in cells.
pub const PLAYER_HEIGHT: i32 = 2;

/// Mouse-look sensitivity, degrees of rotation per unit of sight delta.
const SIGHT_SENSITIVITY: f32 = 0.15;

/// The player's kinematic state and inventory.
pub struct Player {
    /// Current walking speed, in blocks per second.
    walking_speed: f32,
    /// When flying, gravity has no effect and speed is increased.
    flying: bool,
    /// While flying, whether the ascend intent is active.
    ascend: bool,
    /// While flying, whether the descend intent is active.
    descend: bool,
    /// Movement intent accumulators. The first element goes negative
    /// moving forward and positive moving backward; the second goes
    /// negative moving left and positive moving right. Each input source
    /// contributes plus or minus one, so sources compose additively.
    strafe: [i32; 2],
    /// Continuous position in the world. The y axis is vertical.
    pub position: Point3<f32>,
    /// View rotation in degrees: yaw in the ground plane (unbounded) and
    /// pitch from the ground plane up (clamped to [-90, 90]).
    pub rotation: (f32, f32),
    /// Vertical velocity, in blocks per second.
    pub dy: f32,
    /// Blocks the player can place, cycled by the number keys.
    inventory: Vec<BlockKind>,
    /// The inventory entry that a secondary action will place.
    selected_block: BlockKind,
    /// Jump speed derived from `GRAVITY` and `MAX_JUMP_HEIGHT`.
    jump_speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Creates a player at the origin, grounded, facing along the z axis.
    pub fn new() -> Self {
        let inventory = vec![
            BlockKind::Brick,
            BlockKind::Grass,
            BlockKind::Sand,
            BlockKind::TreeTrunk,
            BlockKind::TreeLeaves,
        ];
        Player {
            walking_speed: WALK_SPEED_INCREMENT,
            flying: false,
            ascend: false,
            descend: false,
            strafe: [0, 0],
            position: Point3::new(0.0, 0.0, 0.0),
            rotation: (0.0, 0.0),
            dy: 0.0,
            selected_block: inventory[0],
            inventory,
            // Solve v_t = v_0 - g t for the apex time, then substitute
            // into s = v_0 t - g t^2 / 2 with s = MAX_JUMP_HEIGHT.
            jump_speed: (2.0 * GRAVITY * MAX_JUMP_HEIGHT).sqrt(),
        }
    }

    /// The unit vector along the player's line of sight.
    pub fn get_sight_vector(&self) -> Vector3<f32> {
        let (x, y) = self.rotation;
        // m scales the horizontal components: 1 looking at the horizon,
        // 0 looking straight up or down.
        let m = y.to_radians().cos();
        let dy = y.to_radians().sin();
        let dx = (x - 90.0).to_radians().cos() * m;
        let dz = (x - 90.0).to_radians().sin() * m;
        Vector3::new(dx, dy, dz)
    }

    /// The direction of intended motion derived from the view rotation and
    /// the strafe accumulators. Zero when no motion intent is active.
    ///
    /// Walking motion is always horizontal. Flying motion follows the
    /// pitch of the view when moving straight forward or backward, with
    /// correspondingly less horizontal travel.
    pub fn get_motion_vector(&self) -> Vector3<f32> {
        if self.strafe == [0, 0] {
            return Vector3::new(0.0, 0.0, 0.0);
        }
        let (x, y) = self.rotation;
        let strafe = (self.strafe[0] as f32)
            .atan2(self.strafe[1] as f32)
            .to_degrees();
        let y_angle = y.to_radians();
        let x_angle = (x + strafe).to_radians();
        if self.flying {
            let mut m = y_angle.cos();
            let mut dy = y_angle.sin();
            if self.strafe[1] != 0 {
                // Moving left or right stays level.
                dy = 0.0;
                m = 1.0;
            }
            if self.strafe[0] > 0 {
                // Moving backwards inverts the climb.
                dy = -dy;
            }
            Vector3::new(x_angle.cos() * m, dy, x_angle.sin() * m)
        } else {
            Vector3::new(x_angle.cos(), 0.0, x_angle.sin())
        }
    }

    /// Begins forward motion from one input source.
    pub fn move_forward(&mut self) {
        self.strafe[0] -= 1;
    }

    /// Ends forward motion from one input source.
    pub fn stop_forward(&mut self) {
        self.strafe[0] += 1;
    }

    /// Begins backward motion from one input source.
    pub fn move_backward(&mut self) {
        self.strafe[0] += 1;
    }

    /// Ends backward motion from one input source.
    pub fn stop_backward(&mut self) {
        self.strafe[0] -= 1;
    }

    /// Begins leftward motion from one input source.
    pub fn move_left(&mut self) {
        self.strafe[1] -= 1;
    }

    /// Ends leftward motion from one input source.
    pub fn stop_left(&mut self) {
        self.strafe[1] += 1;
    }

    /// Begins rightward motion from one input source.
    pub fn move_right(&mut self) {
        self.strafe[1] += 1;
    }

    /// Ends rightward motion from one input source.
    pub fn stop_right(&mut self) {
        self.strafe[1] -= 1;
    }

    /// Jumps, if currently grounded (vertical velocity exactly zero).
    pub fn jump(&mut self) {
        if self.dy == 0.0 {
            self.dy = self.jump_speed;
        }
    }

    /// Raises walking speed by one increment, up to the maximum.
    pub fn speed_up(&mut self) {
        if self.walking_speed <= MAX_WALK_SPEED - WALK_SPEED_INCREMENT {
            self.walking_speed += WALK_SPEED_INCREMENT;
        }
    }

    /// Lowers walking speed by one increment, down to the base speed.
    pub fn speed_down(&mut self) {
        if self.walking_speed > WALK_SPEED_INCREMENT {
            self.walking_speed -= WALK_SPEED_INCREMENT;
        }
    }

    /// Current speed in blocks per second, depending on flight mode.
    pub fn current_speed(&self) -> f32 {
        if self.flying {
            FLYING_SPEED
        } else {
            self.walking_speed
        }
    }

    /// Toggles flight mode.
    pub fn toggle_flight(&mut self) {
        self.flying = !self.flying;
    }

    /// Whether the player is currently flying.
    pub fn is_flying(&self) -> bool {
        self.flying
    }

    /// Sets the ascend intent (effective only while flying).
    pub fn set_ascend(&mut self, ascend: bool) {
        self.ascend = ascend;
    }

    /// Sets the descend intent (effective only while flying).
    pub fn set_descend(&mut self, descend: bool) {
        self.descend = descend;
    }

    /// Rotates the view by a relative sight delta, clamping pitch so the
    /// player can look at most straight up or straight down.
    pub fn adjust_sight(&mut self, dx: f32, dy: f32) {
        let (x, y) = self.rotation;
        let x = x + dx * SIGHT_SENSITIVITY;
        let y = (y + dy * SIGHT_SENSITIVITY).clamp(-90.0, 90.0);
        self.rotation = (x, y);
    }

    /// Selects the active inventory entry, wrapping around the inventory
    /// length.
    pub fn select_active_item(&mut self, index: usize) {
        self.selected_block = self.inventory[index % self.inventory.len()];
    }

    /// The block a secondary action will place.
    pub fn selected_block(&self) -> BlockKind {
        self.selected_block
    }

    /// The player's placeable blocks, in selection order.
    pub fn inventory(&self) -> &[BlockKind] {
        &self.inventory
    }

    /// Integrates one motion sub-step.
    ///
    /// Computes the displacement from motion intent and speed, applies
    /// gravity (with terminal velocity) or the flying ascend/descend
    /// intent, then adopts whatever position the collision callback
    /// returns. A vertical-face hit zeroes the vertical velocity: landing
    /// or a ceiling bonk.
    pub fn update<F>(&mut self, dt: f32, collide: F)
    where
        F: FnOnce(Point3<f32>, i32) -> CollisionOutcome,
    {
        let distance = dt * self.current_speed();
        let motion = self.get_motion_vector();
        let mut dy = motion.y * distance;

        if !self.flying {
            // Falling accelerates until terminal velocity; a jump slows
            // until the fall begins.
            self.dy -= dt * GRAVITY;
            self.dy = self.dy.max(-MAX_FALL_SPEED);
            dy += self.dy * dt;
        } else {
            let mut direction = 0.0;
            if self.ascend {
                direction += 1.0;
            }
            if self.descend {
                direction -= 1.0;
            }
            dy += direction * dt * FLYING_SPEED;
        }

        let proposed = Point3::new(
            self.position.x + motion.x * distance,
            self.position.y + dy,
            self.position.z + motion.z * distance,
        );
        let outcome = collide(proposed, PLAYER_HEIGHT);
        self.position = outcome.position;
        if outcome.hit_vertical_face {
            self.dy = 0.0;
        }
    }

    /// Clamps the player's x and z coordinates to the world boundary.
    /// Height is unconstrained; the boundary walls are the only fence.
    pub fn clamp_to_world_boundary(&mut self) {
        self.position.x = clamp_to_boundary(self.position.x, WORLD_SIZE);
        self.position.z = clamp_to_boundary(self.position.z, WORLD_SIZE);
    }
}

/// Clamps one coordinate to `[-boundary, boundary]`.
fn clamp_to_boundary(coordinate: f32, boundary: i32) -> f32 {
    coordinate.clamp(-(boundary as f32), boundary as f32)
}
