//! # Voxel World Core
//!
//! This module contains the voxel half of the game state:
//!
//! * **Block**: the fixed kind catalog, per-kind flags, and appearances
//! * **Coords**: grid positions, sectors, and the conversions between them
//! * **World**: the sparse block store and its visibility bookkeeping
//! * **Terrain**: randomized generation of the starting world
//!
//! ## Data Flow
//!
//! 1. Terrain generators produce placement lists at construction time
//! 2. The world store ingests them with visibility deferred
//! 3. The update loop drains the deferred queue a slice per tick
//! 4. Player edits mutate the store immediately, surface-only

pub mod block;
pub mod coords;
pub mod terrain;
pub mod world;
