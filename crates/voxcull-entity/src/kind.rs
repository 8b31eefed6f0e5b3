//! Creature kinds and their coarse visibility categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use voxcull_core::Error;

/// Broad class a settings toggle switches on or off as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Creatures,
    Villagers,
    Spaceships,
}

/// Closed set of entity kinds.
///
/// Only the visibility filter looks at this; culling and scheduling treat
/// every kind the same.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatureKind {
    Pig,
    Cow,
    Sheep,
    Chicken,
    Horse,
    Wolf,
    Fox,
    Deer,
    Bunny,
    Bear,
    Lion,
    Penguin,
    Duck,
    Frog,
    Owl,
    Eagle,
    Bat,
    Dragon,
    Pegasus,
    Zombie,
    Skeleton,
    Villager,
    Spaceship,
}

impl CreatureKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 23] = [
        Self::Pig,
        Self::Cow,
        Self::Sheep,
        Self::Chicken,
        Self::Horse,
        Self::Wolf,
        Self::Fox,
        Self::Deer,
        Self::Bunny,
        Self::Bear,
        Self::Lion,
        Self::Penguin,
        Self::Duck,
        Self::Frog,
        Self::Owl,
        Self::Eagle,
        Self::Bat,
        Self::Dragon,
        Self::Pegasus,
        Self::Zombie,
        Self::Skeleton,
        Self::Villager,
        Self::Spaceship,
    ];

    /// Category whose toggle also gates this kind.
    #[inline]
    pub const fn category(self) -> Category {
        match self {
            Self::Villager => Category::Villagers,
            Self::Spaceship => Category::Spaceships,
            _ => Category::Creatures,
        }
    }

    /// Stable name, matching the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pig => "Pig",
            Self::Cow => "Cow",
            Self::Sheep => "Sheep",
            Self::Chicken => "Chicken",
            Self::Horse => "Horse",
            Self::Wolf => "Wolf",
            Self::Fox => "Fox",
            Self::Deer => "Deer",
            Self::Bunny => "Bunny",
            Self::Bear => "Bear",
            Self::Lion => "Lion",
            Self::Penguin => "Penguin",
            Self::Duck => "Duck",
            Self::Frog => "Frog",
            Self::Owl => "Owl",
            Self::Eagle => "Eagle",
            Self::Bat => "Bat",
            Self::Dragon => "Dragon",
            Self::Pegasus => "Pegasus",
            Self::Zombie => "Zombie",
            Self::Skeleton => "Skeleton",
            Self::Villager => "Villager",
            Self::Spaceship => "Spaceship",
        }
    }
}

impl fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CreatureKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidData(format!("unknown creature kind `{s}`")))
    }
}
