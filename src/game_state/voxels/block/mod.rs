//! # Block Module
//!
//! This module provides the block-related building blocks of the voxel
//! world: the kind catalog, the static per-kind property table, and the
//! texture-atlas appearance data handed to the renderer.

pub mod block_kind;

pub use block_kind::{BlockKind, BLOCK_KINDS_BY_NAME};

/// The underlying integer type used to identify block kinds in the static
/// tables.
pub type BlockKindId = u8;

/// Grid dimension of the square texture atlas, in tiles per side.
const ATLAS_SIZE: u32 = 4;

/// Fixed properties of one block kind.
///
/// One entry exists per `BlockKind`, indexed by the kind's id. The tile
/// coordinates locate the top, bottom and side textures on the atlas.
pub struct BlockProperties {
    /// Canonical name, also the key in `BLOCK_KINDS_BY_NAME`.
    pub name: &'static str,
    /// Whether the player can break blocks of this kind.
    pub is_breakable: bool,
    /// Whether blocks of this kind stop player motion.
    pub is_collidable: bool,
    /// Whether the player can place a new block against this kind.
    pub can_build_on: bool,
    /// Atlas tile coordinates for the top, bottom and side faces.
    pub tiles: [(u32, u32); 3],
}

/// Maps each block kind to its fixed properties.
///
/// The array is indexed by `BlockKind` as a `usize` and must stay in
/// declaration order with the enum.
pub static BLOCK_PROPERTIES: [BlockProperties; 8] = [
    BlockProperties {
        name: "GRASS",
        is_breakable: true,
        is_collidable: true,
        can_build_on: true,
        tiles: [(1, 0), (0, 1), (0, 0)],
    },
    BlockProperties {
        name: "SAND",
        is_breakable: true,
        is_collidable: true,
        can_build_on: true,
        tiles: [(1, 1), (1, 1), (1, 1)],
    },
    BlockProperties {
        name: "BRICK",
        is_breakable: true,
        is_collidable: true,
        can_build_on: true,
        tiles: [(2, 0), (2, 0), (2, 0)],
    },
    BlockProperties {
        name: "STONE",
        is_breakable: false,
        is_collidable: true,
        can_build_on: true,
        tiles: [(2, 1), (2, 1), (2, 1)],
    },
    BlockProperties {
        name: "LIGHT_CLOUD",
        is_breakable: false,
        is_collidable: false,
        can_build_on: false,
        tiles: [(3, 0), (3, 0), (3, 0)],
    },
    BlockProperties {
        name: "DARK_CLOUD",
        is_breakable: false,
        is_collidable: false,
        can_build_on: false,
        tiles: [(3, 1), (3, 1), (3, 1)],
    },
    BlockProperties {
        name: "TREE_TRUNK",
        is_breakable: true,
        is_collidable: true,
        can_build_on: true,
        tiles: [(1, 2), (1, 2), (2, 2)],
    },
    BlockProperties {
        name: "TREE_LEAVES",
        is_breakable: true,
        is_collidable: false,
        can_build_on: true,
        tiles: [(0, 2), (0, 2), (0, 2)],
    },
];

/// Opaque appearance handle passed to the renderer when a block's mesh is
/// registered.
///
/// Carries the flattened texture coordinates for the six faces of a unit
/// cube, in the order top, bottom, then the four sides. The world store
/// never interprets this data.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockAppearance {
    /// Texture coordinates for 24 cube corners, two floats per corner.
    pub texture_coordinates: [f32; 48],
}

/// Returns the corner texture coordinates of one atlas tile.
fn tex_coord(x: u32, y: u32) -> [f32; 8] {
    let m = 1.0 / ATLAS_SIZE as f32;
    let dx = x as f32 * m;
    let dy = y as f32 * m;
    [dx, dy, dx + m, dy, dx + m, dy + m, dx, dy + m]
}

impl BlockKind {
    /// Builds the renderer-facing appearance for this kind from its atlas
    /// tiles: top face, bottom face, then the side tile repeated for the
    /// four remaining faces.
    pub fn appearance(&self) -> BlockAppearance {
        let [top, bottom, side] = BLOCK_PROPERTIES[*self as usize].tiles;
        let top = tex_coord(top.0, top.1);
        let bottom = tex_coord(bottom.0, bottom.1);
        let side = tex_coord(side.0, side.1);

        let mut texture_coordinates = [0.0; 48];
        texture_coordinates[0..8].copy_from_slice(&top);
        texture_coordinates[8..16].copy_from_slice(&bottom);
        for face in 0..4 {
            let offset = 16 + face * 8;
            texture_coordinates[offset..offset + 8].copy_from_slice(&side);
        }
        BlockAppearance {
            texture_coordinates,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_flags_match_kind_identity() {
        assert!(!BlockKind::Stone.is_breakable());
        assert!(BlockKind::Stone.can_build_on());
        assert!(!BlockKind::LightCloud.is_collidable());
        assert!(!BlockKind::DarkCloud.can_build_on());
        assert!(BlockKind::TreeLeaves.is_breakable());
        assert!(!BlockKind::TreeLeaves.is_collidable());
    }

    #[test]
    fn name_round_trips_through_the_phf_map() {
        for kind in [
            BlockKind::Grass,
            BlockKind::Sand,
            BlockKind::Brick,
            BlockKind::Stone,
            BlockKind::LightCloud,
            BlockKind::DarkCloud,
            BlockKind::TreeTrunk,
            BlockKind::TreeLeaves,
        ] {
            assert_eq!(BlockKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(BlockKind::from_name("OBSIDIAN"), None);
    }

    #[test]
    fn id_conversion_round_trips() {
        assert_eq!(BlockKind::from_id(BlockKind::Brick as BlockKindId), BlockKind::Brick);
    }

    #[test]
    fn appearance_repeats_the_side_tile_four_times() {
        let appearance = BlockKind::Sand.appearance();
        let side = &appearance.texture_coordinates[16..24];
        for face in 1..4 {
            let offset = 16 + face * 8;
            assert_eq!(&appearance.texture_coordinates[offset..offset + 8], side);
        }
    }
}
