//! # Mesh Registration Interface
//!
//! The world store has no knowledge of any rendering API. When a block
//! becomes visible it hands the renderer a position, the block's opaque
//! appearance, and the cube corner vertices; the renderer answers with a
//! handle used later to destroy the primitive. This module defines that
//! narrow seam plus a headless implementation for simulation and tests.

use cgmath::Point3;

use super::voxels::block::BlockAppearance;
use super::voxels::coords::Position;

/// Number of floats in one block's vertex data: 24 corners, 3 floats each.
pub const CUBE_VERTEX_FLOATS: usize = 72;

/// Opaque identifier for one registered render primitive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Receives show/hide notifications from the world store.
///
/// Implementations own whatever GPU or scene-graph state backs a visible
/// block. The store guarantees `destroy_mesh` is called at most once per
/// handle returned from `register_mesh`.
pub trait MeshRegistrar {
    /// Materializes the mesh for a block.
    ///
    /// # Arguments
    /// * `position` - Grid position of the block
    /// * `appearance` - The block kind's texture data
    /// * `vertices` - Corner vertices of the unit cube centered at `position`
    fn register_mesh(
        &mut self,
        position: Position,
        appearance: &BlockAppearance,
        vertices: [f32; CUBE_VERTEX_FLOATS],
    ) -> MeshHandle;

    /// Destroys a previously registered mesh.
    fn destroy_mesh(&mut self, handle: MeshHandle);
}

/// Shared single-threaded registrar handle.
///
/// The update loop is strictly single-threaded, so a caller that wants to
/// observe registrar state while the world store owns it can hand the
/// store one of these and keep a clone.
impl<R: MeshRegistrar> MeshRegistrar for std::rc::Rc<std::cell::RefCell<R>> {
    fn register_mesh(
        &mut self,
        position: Position,
        appearance: &BlockAppearance,
        vertices: [f32; CUBE_VERTEX_FLOATS],
    ) -> MeshHandle {
        self.borrow_mut().register_mesh(position, appearance, vertices)
    }

    fn destroy_mesh(&mut self, handle: MeshHandle) {
        self.borrow_mut().destroy_mesh(handle)
    }
}

/// Returns the 24 corner vertices of the cube centered at (x, y, z) with
/// half-extent `n`, in the face order top, bottom, left, right, front, back.
#[rustfmt::skip]
pub fn cube_vertices(x: f32, y: f32, z: f32, n: f32) -> [f32; CUBE_VERTEX_FLOATS] {
    [
        x-n,y+n,z-n, x-n,y+n,z+n, x+n,y+n,z+n, x+n,y+n,z-n,  // top
        x-n,y-n,z-n, x+n,y-n,z-n, x+n,y-n,z+n, x-n,y-n,z+n,  // bottom
        x-n,y-n,z-n, x-n,y-n,z+n, x-n,y+n,z+n, x-n,y+n,z-n,  // left
        x+n,y-n,z+n, x+n,y-n,z-n, x+n,y+n,z-n, x+n,y+n,z+n,  // right
        x-n,y-n,z+n, x+n,y-n,z+n, x+n,y+n,z+n, x-n,y+n,z+n,  // front
        x+n,y-n,z-n, x-n,y-n,z-n, x-n,y+n,z-n, x+n,y+n,z-n,  // back
    ]
}

/// Returns the unit-cube vertices for the block occupying `position`.
pub fn block_vertices(position: Position) -> [f32; CUBE_VERTEX_FLOATS] {
    let center = Point3::new(position.x as f32, position.y as f32, position.z as f32);
    cube_vertices(center.x, center.y, center.z, 0.5)
}

/// Registrar that tracks handles without touching any graphics API.
///
/// Used by the headless demo binary and throughout the test suite to
/// observe how many primitives the store has materialized.
#[derive(Debug, Default)]
pub struct NullRegistrar {
    next_handle: u64,
    /// Total meshes registered since creation.
    pub registered: usize,
    /// Total meshes destroyed since creation.
    pub destroyed: usize,
}

impl NullRegistrar {
    /// Creates a registrar with zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently live primitives.
    pub fn live(&self) -> usize {
        self.registered - self.destroyed
    }
}

impl MeshRegistrar for NullRegistrar {
    fn register_mesh(
        &mut self,
        _position: Position,
        _appearance: &BlockAppearance,
        _vertices: [f32; CUBE_VERTEX_FLOATS],
    ) -> MeshHandle {
        self.next_handle += 1;
        self.registered += 1;
        MeshHandle(self.next_handle)
    }

    fn destroy_mesh(&mut self, _handle: MeshHandle) {
        self.destroyed += 1;
    }
}
