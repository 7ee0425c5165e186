#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Blockworld
//!
//! A voxel world engine for a first-person block-building game: a sparse
//! 3D grid of typed blocks, incremental mesh visibility management,
//! procedural terrain generation, and player movement with collision
//! against that grid.
//!
//! ## Key Modules
//!
//! * `game_state` - The orchestrator: world store, player, collision,
//!   terrain generation, and the per-tick update loop
//! * `game_state::voxels` - The sparse voxel world and its visibility
//!   bookkeeping
//! * `game_state::rendering` / `game_state::audio` - The narrow seams
//!   behind which real renderer and audio backends live
//!
//! ## Architecture
//!
//! The engine is strictly single-threaded and driven from outside: a
//! clock collaborator calls `GameState::update(dt)` at a fixed nominal
//! rate, and an input collaborator translates window events into intent
//! calls. Bulk visibility work (world generation, sector crossings) is
//! deferred into a FIFO queue drained a time slice per tick, so no single
//! frame stalls on a large mutation.
//!
//! ## Usage
//!
//! ```no_run
//! use blockworld::game_state::audio::NullSoundPlayer;
//! use blockworld::game_state::rendering::NullRegistrar;
//! use blockworld::game_state::GameState;
//!
//! let mut game = GameState::new(
//!     Box::new(NullRegistrar::new()),
//!     Box::new(NullSoundPlayer),
//! );
//! game.generate_terrain();
//! loop {
//!     game.update(1.0 / 60.0);
//! }
//! ```

pub mod game_state;

pub use game_state::collision::{collide, CollisionOutcome};
pub use game_state::player::Player;
pub use game_state::voxels::block::{BlockAppearance, BlockKind};
pub use game_state::voxels::coords::{
    normalize, sectorize, Position, Sector, SECTOR_SIZE, TICKS_PER_SEC, WORLD_SIZE,
};
pub use game_state::voxels::world::WorldStore;
pub use game_state::GameState;

/// Initializes the process-wide logger, reading the filter from the
/// `RUST_LOG` environment variable and writing to stdout.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();
}
