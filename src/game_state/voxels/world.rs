//! # World Store
//!
//! This module provides the `WorldStore` struct, the sparse voxel map at
//! the heart of the game: every block in existence, the subset currently
//! shown, the sector index used for amortized visibility scans, and the
//! deferred show/hide work queue.
//!
//! ## Visibility Model
//!
//! Only exposed blocks (those with at least one absent face neighbor) are
//! ever shown. Interior blocks stay hidden, which keeps the rendering cost
//! proportional to the world's surface rather than its volume. Every block
//! mutation reconciles the shown state of the six face neighbors.
//!
//! ## Deferred Work
//!
//! Bulk operations (world generation, sector crossings) never touch the
//! renderer directly. They enqueue show/hide operations that the update
//! loop drains FIFO under a wall-clock budget of one tick, so a sector
//! crossing that queues thousands of operations cannot stall a frame.

use std::collections::{HashMap, HashSet, VecDeque};

use cgmath::{Point3, Vector3};
use log::debug;
use web_time::{Duration, Instant};

use crate::game_state::audio::SoundPlayer;
use crate::game_state::rendering::{block_vertices, MeshHandle, MeshRegistrar};

use super::block::BlockKind;
use super::coords::{normalize, sectorize, Position, Sector, FACES, TICKS_PER_SEC};

/// Radius, in sectors, of the visible neighborhood kept around the
/// player's sector.
const SECTOR_PAD: i32 = 4;

/// Sub-steps per block when marching a sight ray. Bounds the distance a
/// ray can skip past a thin occupied voxel.
const HIT_TEST_STEPS_PER_BLOCK: i32 = 8;

/// A deferred visibility operation, executed when the queue drains.
enum QueuedOp {
    /// Materialize the mesh for a block that was marked shown.
    ShowMesh(Position, BlockKind),
    /// Destroy the mesh of a block that was marked hidden.
    HideMesh(Position),
}

/// The sparse voxel world and its visibility bookkeeping.
///
/// # Invariants
///
/// * `shown` keys are a subset of `world` keys.
/// * Every position in `world` appears exactly once in its sector's list.
/// * `meshes` keys equal `shown` keys, except transiently while deferred
///   operations are queued.
pub struct WorldStore {
    /// Every block in the world, keyed by grid position.
    world: HashMap<Position, BlockKind>,
    /// The blocks whose meshes have been (or are queued to be) materialized.
    shown: HashMap<Position, BlockKind>,
    /// Live render primitives, one per materialized block.
    meshes: HashMap<Position, MeshHandle>,
    /// All positions on record for each sector.
    sectors: HashMap<Sector, Vec<Position>>,
    /// Deferred show/hide operations, strictly FIFO.
    queue: VecDeque<QueuedOp>,
    /// Renderer collaborator; the only consumer of mesh data.
    registrar: Box<dyn MeshRegistrar>,
    /// Audio collaborator for opportunistic effects.
    sounds: Box<dyn SoundPlayer>,
}

impl WorldStore {
    /// Creates an empty world wired to the given collaborators.
    pub fn new(registrar: Box<dyn MeshRegistrar>, sounds: Box<dyn SoundPlayer>) -> Self {
        WorldStore {
            world: HashMap::new(),
            shown: HashMap::new(),
            meshes: HashMap::new(),
            sectors: HashMap::new(),
            queue: VecDeque::new(),
            registrar,
            sounds,
        }
    }

    /// Number of blocks in the world.
    pub fn block_count(&self) -> usize {
        self.world.len()
    }

    /// Number of blocks currently marked shown.
    pub fn shown_count(&self) -> usize {
        self.shown.len()
    }

    /// Number of live render primitives.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of deferred operations waiting in the queue.
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// The block at `position`, if any.
    pub fn block_at(&self, position: Position) -> Option<BlockKind> {
        self.world.get(&position).copied()
    }

    /// Whether a block exists at `position`.
    pub fn contains(&self, position: Position) -> bool {
        self.world.contains_key(&position)
    }

    /// Whether the block at `position` is currently marked shown.
    pub fn is_shown(&self, position: Position) -> bool {
        self.shown.contains_key(&position)
    }

    /// Iterates over every block in the world, in arbitrary order.
    pub fn iter_blocks(&self) -> impl Iterator<Item = (Position, BlockKind)> + '_ {
        self.world.iter().map(|(p, k)| (*p, *k))
    }

    /// Whether the player can move through the cell at `position`: true
    /// when the cell is empty or its block is non-collidable.
    pub fn can_pass_through_block(&self, position: Position) -> bool {
        match self.world.get(&position) {
            None => true,
            Some(kind) => !kind.is_collidable(),
        }
    }

    /// Whether at least one of the six face neighbors of `position` is
    /// absent from the world. Fully surrounded blocks are not exposed and
    /// are never shown.
    pub fn exposed(&self, position: Position) -> bool {
        FACES
            .iter()
            .any(|face| !self.world.contains_key(&(position + *face)))
    }

    /// Adds a block to the world.
    ///
    /// A block already occupying `position` is first removed with full
    /// remove semantics; replacement is never a silent overwrite. With
    /// `immediate` the block is shown if exposed and the neighbors are
    /// reconciled; without it the insertion has no visibility effect at
    /// all, which is the bulk world-generation path.
    pub fn add_block(&mut self, position: Position, kind: BlockKind, immediate: bool) {
        if self.world.contains_key(&position) {
            self.remove_block(position, immediate);
        }
        self.world.insert(position, kind);
        let positions = self.sectors.entry(sectorize(position)).or_default();
        debug_assert!(
            !positions.contains(&position),
            "sector index already contains {position:?}"
        );
        positions.push(position);
        if immediate {
            if self.exposed(position) {
                self.show_block(position, true);
            }
            self.check_neighbors(position);
        }
    }

    /// Removes the block at `position`.
    ///
    /// With `immediate`, a shown block is hidden synchronously (with a
    /// break-sound notification) and the neighbors are reconciled. The
    /// deferred path leaves visibility untouched: callers must not remove
    /// a currently shown block without `immediate`.
    ///
    /// # Panics
    /// Panics if no block exists at `position`.
    pub fn remove_block(&mut self, position: Position, immediate: bool) {
        if self.world.remove(&position).is_none() {
            panic!("remove_block called for empty position {position:?}");
        }
        let sector = sectorize(position);
        let positions = self
            .sectors
            .get_mut(&sector)
            .unwrap_or_else(|| panic!("no sector list for {sector:?}"));
        let index = positions
            .iter()
            .position(|p| *p == position)
            .unwrap_or_else(|| panic!("{position:?} missing from sector {sector:?}"));
        positions.remove(index);
        if immediate {
            if self.shown.contains_key(&position) {
                self.hide_block(position, true);
                self.sounds.play_effect("rock_hit");
            }
            self.check_neighbors(position);
        }
    }

    /// Reconciles the shown state of the six face neighbors of `position`:
    /// exposed neighbors get shown, buried neighbors get hidden. Called
    /// after any immediate add or remove; idempotent.
    pub fn check_neighbors(&mut self, position: Position) {
        for face in FACES {
            let neighbor = position + face;
            if !self.world.contains_key(&neighbor) {
                continue;
            }
            if self.exposed(neighbor) {
                if !self.shown.contains_key(&neighbor) {
                    self.show_block(neighbor, true);
                }
            } else if self.shown.contains_key(&neighbor) {
                self.hide_block(neighbor, true);
            }
        }
    }

    /// Marks the block at `position` shown, materializing its mesh now or
    /// enqueueing the materialization.
    ///
    /// No-op when `position` is not in the world; this tolerance covers a
    /// deferred show racing a removal.
    pub fn show_block(&mut self, position: Position, immediate: bool) {
        let Some(kind) = self.world.get(&position).copied() else {
            return;
        };
        self.shown.insert(position, kind);
        if immediate {
            self.materialize_mesh(position, kind);
        } else {
            self.queue.push_back(QueuedOp::ShowMesh(position, kind));
        }
    }

    /// Marks the block at `position` hidden, destroying its mesh now or
    /// enqueueing the destruction. Hiding does not remove the block from
    /// the world.
    ///
    /// # Panics
    /// Panics if the block is not currently shown.
    pub fn hide_block(&mut self, position: Position, immediate: bool) {
        if self.shown.remove(&position).is_none() {
            panic!("hide_block called for block that is not shown: {position:?}");
        }
        if immediate {
            self.destroy_mesh(position);
        } else {
            self.queue.push_back(QueuedOp::HideMesh(position));
        }
    }

    /// Enqueues shows for every exposed, unshown block on record for
    /// `sector`. Called when the sector comes into range of the player.
    pub fn show_sector(&mut self, sector: Sector) {
        let Some(positions) = self.sectors.get(&sector) else {
            return;
        };
        let candidates: Vec<Position> = positions
            .iter()
            .copied()
            .filter(|p| !self.shown.contains_key(p) && self.exposed(*p))
            .collect();
        for position in candidates {
            self.show_block(position, false);
        }
    }

    /// Enqueues hides for every shown block on record for `sector`.
    /// Called when the sector falls out of range of the player.
    pub fn hide_sector(&mut self, sector: Sector) {
        let Some(positions) = self.sectors.get(&sector) else {
            return;
        };
        let candidates: Vec<Position> = positions
            .iter()
            .copied()
            .filter(|p| self.shown.contains_key(p))
            .collect();
        for position in candidates {
            self.hide_block(position, false);
        }
    }

    /// Moves the visible neighborhood from sector `before` to sector
    /// `after`, showing sectors that came into range and hiding sectors
    /// that left it.
    ///
    /// Only the symmetric difference of the two disk-shaped neighborhoods
    /// (radius `SECTOR_PAD`) is touched, never the whole world.
    pub fn change_sectors(&mut self, before: Option<Sector>, after: Sector) {
        let mut before_set = HashSet::new();
        let mut after_set = HashSet::new();
        for dx in -SECTOR_PAD..=SECTOR_PAD {
            for dz in -SECTOR_PAD..=SECTOR_PAD {
                if dx * dx + dz * dz > (SECTOR_PAD + 1) * (SECTOR_PAD + 1) {
                    continue;
                }
                let offset = Vector3::new(dx, 0, dz);
                if let Some(before) = before {
                    before_set.insert(before + offset);
                }
                after_set.insert(after + offset);
            }
        }
        debug!(
            "sector change {before:?} -> {after:?}: showing {}, hiding {}",
            after_set.difference(&before_set).count(),
            before_set.difference(&after_set).count()
        );
        for sector in after_set.difference(&before_set) {
            self.show_sector(*sector);
        }
        for sector in before_set.difference(&after_set) {
            self.hide_sector(*sector);
        }
    }

    /// Executes queued operations in FIFO order until the queue empties or
    /// one tick's wall-clock budget is spent. The remainder resumes on the
    /// next call, preserving order across calls.
    pub fn process_queue(&mut self) {
        let start = Instant::now();
        let budget = Duration::from_secs_f64(1.0 / TICKS_PER_SEC as f64);
        while !self.queue.is_empty() && start.elapsed() < budget {
            self.dequeue();
        }
    }

    /// Drains the queue unconditionally. Used on the very first sector
    /// assignment so the initial view is complete before motion starts.
    pub fn process_entire_queue(&mut self) {
        debug!("draining {} queued visibility operations", self.queue.len());
        while !self.queue.is_empty() {
            self.dequeue();
        }
    }

    /// Pops and executes the oldest queued operation. Operations overtaken
    /// by later immediate mutations are stale and do nothing: a queued show
    /// whose block has been removed or hidden, or a queued hide whose block
    /// has been re-shown.
    fn dequeue(&mut self) {
        match self.queue.pop_front() {
            Some(QueuedOp::ShowMesh(position, kind)) => {
                if self.shown.get(&position) == Some(&kind) {
                    self.materialize_mesh(position, kind);
                }
            }
            Some(QueuedOp::HideMesh(position)) => {
                if !self.shown.contains_key(&position) {
                    self.destroy_mesh(position);
                }
            }
            None => {}
        }
    }

    /// Builds and registers the render primitive for a block, replacing
    /// (and destroying) any primitive already registered there.
    fn materialize_mesh(&mut self, position: Position, kind: BlockKind) {
        let handle =
            self.registrar
                .register_mesh(position, &kind.appearance(), block_vertices(position));
        if let Some(old) = self.meshes.insert(position, handle) {
            self.registrar.destroy_mesh(old);
        }
    }

    /// Destroys the render primitive for a block. Tolerates a missing
    /// handle: a queued show cancelled by a hide before the drain leaves
    /// nothing to destroy.
    fn destroy_mesh(&mut self, position: Position) {
        if let Some(handle) = self.meshes.remove(&position) {
            self.registrar.destroy_mesh(handle);
        }
    }

    /// Line-of-sight search from `origin` along `direction`.
    ///
    /// Marches in fixed sub-steps of 1/8 block for up to `max_distance`
    /// blocks. Returns the first occupied voxel hit together with the
    /// previously visited empty voxel (the face the ray entered through),
    /// or `None` if nothing is hit within range.
    pub fn hit_test(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: i32,
    ) -> Option<(Position, Option<Position>)> {
        let step = direction / HIT_TEST_STEPS_PER_BLOCK as f32;
        let mut current = origin;
        let mut previous: Option<Position> = None;
        for _ in 0..max_distance * HIT_TEST_STEPS_PER_BLOCK {
            let key = normalize(current);
            if previous != Some(key) && self.world.contains_key(&key) {
                return Some((key, previous));
            }
            previous = Some(key);
            current += step;
        }
        None
    }
}
