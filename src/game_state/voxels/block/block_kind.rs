//! # Block Kind Catalog
//!
//! This module defines the closed set of block kinds that can appear in the
//! world. Kinds are compared by identity; all per-kind flags live in the
//! static property table in the parent module.

use num_derive::FromPrimitive;

use super::{BlockKindId, BLOCK_PROPERTIES};

/// Enumerates every kind of block the world can contain.
///
/// The catalog is fixed for the life of the process. The `FromPrimitive`
/// derive allows conversion from the compact id form used by the property
/// and appearance tables.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockKind {
    /// Grass-topped ground block. The base layer is made of this.
    Grass,

    /// Sand block, one of the random hill materials.
    Sand,

    /// Brick block, one of the random hill materials.
    Brick,

    /// Stone. Unbreakable; forms the bedrock layer and the boundary walls.
    Stone,

    /// Light cloud. Unbreakable, and the player passes straight through it.
    LightCloud,

    /// Dark cloud. Unbreakable, and the player passes straight through it.
    DarkCloud,

    /// Tree trunk segment.
    TreeTrunk,

    /// Tree canopy block. Breakable but does not block player motion.
    TreeLeaves,
}

/// Maps block names to their kinds. Kind identity is by name, so this is
/// the canonical lookup for externally supplied block references.
pub static BLOCK_KINDS_BY_NAME: phf::Map<&'static str, BlockKind> = phf::phf_map! {
    "GRASS" => BlockKind::Grass,
    "SAND" => BlockKind::Sand,
    "BRICK" => BlockKind::Brick,
    "STONE" => BlockKind::Stone,
    "LIGHT_CLOUD" => BlockKind::LightCloud,
    "DARK_CLOUD" => BlockKind::DarkCloud,
    "TREE_TRUNK" => BlockKind::TreeTrunk,
    "TREE_LEAVES" => BlockKind::TreeLeaves,
};

impl BlockKind {
    /// Converts a compact block id back into a `BlockKind`.
    ///
    /// # Panics
    /// Panics if the id does not correspond to a catalog entry.
    pub fn from_id(id: BlockKindId) -> Self {
        let kind: Option<BlockKind> = num::FromPrimitive::from_u8(id);
        kind.unwrap_or_else(|| panic!("no block kind with id {id}"))
    }

    /// Looks up a block kind by its canonical name.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_KINDS_BY_NAME.get(name).copied()
    }

    /// The canonical name of this kind.
    pub fn name(&self) -> &'static str {
        BLOCK_PROPERTIES[*self as usize].name
    }

    /// Whether the player can break blocks of this kind.
    pub fn is_breakable(&self) -> bool {
        BLOCK_PROPERTIES[*self as usize].is_breakable
    }

    /// Whether blocks of this kind stop player motion.
    pub fn is_collidable(&self) -> bool {
        BLOCK_PROPERTIES[*self as usize].is_collidable
    }

    /// Whether the player can place a new block against this kind.
    pub fn can_build_on(&self) -> bool {
        BLOCK_PROPERTIES[*self as usize].can_build_on
    }
}
