//! # Game State
//!
//! The top-level orchestrator tying the voxel world, the player, and the
//! collision resolver together. External collaborators drive it in two
//! ways: the clock calls [`GameState::update`] at a fixed nominal rate,
//! and the input layer translates discrete events into the `handle_*`
//! intent methods.
//!
//! ## Tick Ordering
//!
//! Each tick drains one slice of the deferred visibility queue, reacts to
//! the player crossing a sector boundary, clamps the player to the world
//! boundary, and then integrates player motion in eight sub-steps so thin
//! obstacles cannot be tunneled through.

pub mod audio;
pub mod collision;
pub mod player;
pub mod rendering;
pub mod voxels;

use cgmath::Point3;
use log::info;

use audio::SoundPlayer;
use collision::collide;
use player::Player;
use rendering::MeshRegistrar;
use voxels::coords::{normalize, sectorize, Sector, WORLD_SIZE};
use voxels::terrain;
use voxels::world::WorldStore;

/// Upper bound on the time delta accepted for one update call, so a frame
/// hitch cannot blow up the integration error.
const MAX_TICK_DT: f32 = 0.2;

/// Number of motion sub-steps per update call.
const MOTION_SUBSTEPS: u32 = 8;

/// Maximum reach of the player's primary and secondary actions, in blocks.
const ACTION_RANGE: i32 = 8;

/// The complete state of one game session.
pub struct GameState {
    /// The voxel world and its visibility bookkeeping.
    pub world: WorldStore,
    /// The player character.
    pub player: Player,
    /// The sector the player occupied last tick. `None` before the first
    /// update, which triggers the full initial visibility build.
    sector: Option<Sector>,
}

impl GameState {
    /// Creates a session with an empty world and a fresh player, wired to
    /// the given renderer and audio collaborators.
    pub fn new(registrar: Box<dyn MeshRegistrar>, sounds: Box<dyn SoundPlayer>) -> Self {
        GameState {
            world: WorldStore::new(registrar, sounds),
            player: Player::new(),
            sector: None,
        }
    }

    /// Populates the world with generated terrain: base layer and walls,
    /// hills, clouds, and trees, in that order. All placements go through
    /// the deferred path; nothing is shown until the first update.
    pub fn generate_terrain(&mut self) {
        for (kind, position) in terrain::generate_base_layer(WORLD_SIZE) {
            self.world.add_block(position, kind, false);
        }
        for hill in terrain::generate_hills(WORLD_SIZE, terrain::default_hill_count(WORLD_SIZE)) {
            for (kind, position) in hill {
                self.world.add_block(position, kind, false);
            }
        }
        for cloud in terrain::generate_clouds(WORLD_SIZE, terrain::default_cloud_count(WORLD_SIZE))
        {
            for (kind, position) in cloud {
                self.world.add_block(position, kind, false);
            }
        }
        let trees = terrain::generate_trees(&self.world, terrain::default_tree_count(WORLD_SIZE));
        for tree in trees {
            for (kind, position) in tree {
                self.world.add_block(position, kind, false);
            }
        }
        info!("terrain generated: {} blocks", self.world.block_count());
    }

    /// Advances the game by one clock tick.
    ///
    /// # Arguments
    /// * `dt` - Seconds since the previous call, clamped to `MAX_TICK_DT`
    pub fn update(&mut self, dt: f32) {
        let dt = dt.min(MAX_TICK_DT);
        self.world.process_queue();

        let sector = sectorize(normalize(self.player.position));
        if self.sector != Some(sector) {
            self.world.change_sectors(self.sector, sector);
            if self.sector.is_none() {
                // First sector assignment: build the whole initial view
                // before the player can see a hole in the world.
                self.world.process_entire_queue();
            }
            self.sector = Some(sector);
        }

        self.player.clamp_to_world_boundary();

        let step = dt / MOTION_SUBSTEPS as f32;
        for _ in 0..MOTION_SUBSTEPS {
            self.player
                .update(step, |position, height| collide(&self.world, position, height));
        }
    }

    /// Breaks the block under the crosshair, if it is within reach and
    /// breakable.
    pub fn handle_primary_action(&mut self) {
        let sight = self.player.get_sight_vector();
        if let Some((position, _)) = self.world.hit_test(self.player.position, sight, ACTION_RANGE)
        {
            let kind = self
                .world
                .block_at(position)
                .expect("hit_test returned an empty position");
            if kind.is_breakable() {
                self.world.remove_block(position, true);
            }
        }
    }

    /// Places the selected block against the face under the crosshair, if
    /// the hit block allows building on it.
    pub fn handle_secondary_action(&mut self) {
        let sight = self.player.get_sight_vector();
        if let Some((position, Some(previous))) =
            self.world.hit_test(self.player.position, sight, ACTION_RANGE)
        {
            let kind = self
                .world
                .block_at(position)
                .expect("hit_test returned an empty position");
            if kind.can_build_on() {
                self.world
                    .add_block(previous, self.player.selected_block(), true);
            }
        }
    }

    /// Applies tri-state movement intents. Each argument is 1 to start
    /// moving in that direction, -1 to stop, and 0 to leave it unchanged.
    pub fn handle_movement(&mut self, forward: i32, backward: i32, left: i32, right: i32) {
        match forward {
            1 => self.player.move_forward(),
            -1 => self.player.stop_forward(),
            _ => {}
        }
        match backward {
            1 => self.player.move_backward(),
            -1 => self.player.stop_backward(),
            _ => {}
        }
        match left {
            1 => self.player.move_left(),
            -1 => self.player.stop_left(),
            _ => {}
        }
        match right {
            1 => self.player.move_right(),
            -1 => self.player.stop_right(),
            _ => {}
        }
    }

    /// Applies tri-state ascend/descend intents while flying. For each
    /// argument, 1 activates the intent and -1 releases it; 0 leaves it
    /// unchanged. Ascending takes precedence when both change at once.
    pub fn handle_flight(&mut self, ascending: i32, descending: i32) {
        if ascending != 0 {
            self.player.set_ascend(ascending == 1);
        } else if descending != 0 {
            self.player.set_descend(descending == 1);
        }
    }

    /// Makes the player jump if grounded.
    pub fn handle_jump(&mut self) {
        self.player.jump();
    }

    /// Toggles flight mode.
    pub fn handle_flight_toggle(&mut self) {
        self.player.toggle_flight();
    }

    /// Raises or lowers the walking speed.
    pub fn handle_speed_change(&mut self, increase: bool) {
        if increase {
            self.player.speed_up();
        } else {
            self.player.speed_down();
        }
    }

    /// Rotates the player's view by a relative mouse delta.
    pub fn handle_adjust_vision(&mut self, dx: f32, dy: f32) {
        self.player.adjust_sight(dx, dy);
    }

    /// Switches the active inventory slot.
    pub fn handle_change_active_block(&mut self, index: usize) {
        self.player.select_active_item(index);
    }

    /// The sector the player occupied at the last update, if any.
    pub fn current_sector(&self) -> Option<Sector> {
        self.sector
    }

    /// The player's continuous position.
    pub fn player_position(&self) -> Point3<f32> {
        self.player.position
    }
}
