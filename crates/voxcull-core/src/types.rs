//! Block ids and how they affect sight lines.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// How a block interacts with line of sight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Opacity {
    /// No block present.
    Empty,
    /// Rendered, but sight passes through (water, glass).
    Transparent,
    /// Blocks line of sight.
    Opaque,
}

impl Opacity {
    /// Returns true if a cell of this class stops a sight line.
    #[inline]
    pub const fn blocks_sight(self) -> bool {
        matches!(self, Self::Opaque)
    }
}

/// Numeric block type.
///
/// Block ID 0 is reserved for air (empty space). Every id carries an explicit
/// [`Opacity`]; ids without an entry in the table are opaque.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const AIR: Self = Self(0);

    // Terrain.
    pub const STONE: Self = Self(1);
    pub const DIRT: Self = Self(2);
    pub const GRASS: Self = Self(3);
    pub const SNOW: Self = Self(4);
    pub const SAND: Self = Self(5);
    pub const WATER: Self = Self(6);

    // Vegetation.
    pub const LOG: Self = Self(7);
    pub const LEAVES: Self = Self(8);
    pub const FLOWER: Self = Self(9);

    // Glass family, all see-through.
    pub const GLASS: Self = Self(10);
    pub const TINTED_GLASS: Self = Self(11);
    pub const STAINED_GLASS: Self = Self(12);
    pub const GLASS_PANE: Self = Self(13);

    // Building blocks.
    pub const PLANKS: Self = Self(14);
    pub const BRICK: Self = Self(15);

    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }

    /// Anything but air, including transparent blocks.
    #[inline]
    pub const fn is_solid(self) -> bool {
        self.0 != 0
    }

    /// Sight classification of this block.
    #[inline]
    pub const fn opacity(self) -> Opacity {
        match self {
            Self::AIR => Opacity::Empty,
            Self::WATER
            | Self::GLASS
            | Self::TINTED_GLASS
            | Self::STAINED_GLASS
            | Self::GLASS_PANE => Opacity::Transparent,
            _ => Opacity::Opaque,
        }
    }

    /// Returns true if this block stops a sight line.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.opacity().blocks_sight()
    }

    /// Human-readable name, used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AIR => "air",
            Self::STONE => "stone",
            Self::DIRT => "dirt",
            Self::GRASS => "grass",
            Self::SNOW => "snow",
            Self::SAND => "sand",
            Self::WATER => "water",
            Self::LOG => "log",
            Self::LEAVES => "leaves",
            Self::FLOWER => "flower",
            Self::GLASS => "glass",
            Self::TINTED_GLASS => "tinted_glass",
            Self::STAINED_GLASS => "stained_glass",
            Self::GLASS_PANE => "glass_pane",
            Self::PLANKS => "planks",
            Self::BRICK => "brick",
            _ => "unknown",
        }
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.name(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_id_air() {
        assert!(BlockId::AIR.is_air());
        assert!(!BlockId::AIR.is_solid());
        assert_eq!(BlockId::AIR.opacity(), Opacity::Empty);
    }

    #[test]
    fn block_id_solid() {
        assert!(!BlockId::STONE.is_air());
        assert!(BlockId::STONE.is_solid());
        assert!(BlockId::WATER.is_solid());
    }

    #[test]
    fn water_and_glass_never_block_sight() {
        for id in [
            BlockId::WATER,
            BlockId::GLASS,
            BlockId::TINTED_GLASS,
            BlockId::STAINED_GLASS,
            BlockId::GLASS_PANE,
        ] {
            assert_eq!(id.opacity(), Opacity::Transparent, "{id}");
            assert!(!id.is_opaque());
        }
    }

    #[test]
    fn unknown_ids_are_opaque() {
        assert!(BlockId(900).is_opaque());
        assert_eq!(BlockId(900).name(), "unknown");
        assert!(BlockId::LEAVES.is_opaque());
    }
}
