//! Settings-driven visibility filter by creature kind.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::kind::{Category, CreatureKind};

/// Which creatures the player has chosen to see.
///
/// A kind is drawn only if its category toggle is on *and* the kind is in
/// the allow-list. The filter never affects whether a creature simulates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilitySettings {
    pub creatures: bool,
    pub villagers: bool,
    pub spaceships: bool,
    /// Kinds enabled individually.
    pub allowed: HashSet<CreatureKind>,
}

impl Default for VisibilitySettings {
    fn default() -> Self {
        Self {
            creatures: true,
            villagers: true,
            spaceships: true,
            allowed: CreatureKind::ALL.into_iter().collect(),
        }
    }
}

impl VisibilitySettings {
    /// Every category on, nothing allowed individually.
    pub fn none_allowed() -> Self {
        Self {
            allowed: HashSet::new(),
            ..Self::default()
        }
    }

    /// Every category on, only the given kinds allowed.
    pub fn only(kinds: impl IntoIterator<Item = CreatureKind>) -> Self {
        Self {
            allowed: kinds.into_iter().collect(),
            ..Self::default()
        }
    }

    /// State of a category toggle.
    #[inline]
    pub const fn category_visible(&self, category: Category) -> bool {
        match category {
            Category::Creatures => self.creatures,
            Category::Villagers => self.villagers,
            Category::Spaceships => self.spaceships,
        }
    }

    pub fn set_category_visible(&mut self, category: Category, visible: bool) {
        match category {
            Category::Creatures => self.creatures = visible,
            Category::Villagers => self.villagers = visible,
            Category::Spaceships => self.spaceships = visible,
        }
    }

    pub fn toggle_creatures(&mut self, visible: bool) {
        self.set_category_visible(Category::Creatures, visible);
    }

    pub fn toggle_villagers(&mut self, visible: bool) {
        self.set_category_visible(Category::Villagers, visible);
    }

    pub fn toggle_spaceships(&mut self, visible: bool) {
        self.set_category_visible(Category::Spaceships, visible);
    }

    /// Add or remove a kind from the allow-list.
    pub fn set_kind_visible(&mut self, kind: CreatureKind, visible: bool) {
        if visible {
            self.allowed.insert(kind);
        } else {
            self.allowed.remove(&kind);
        }
    }

    #[inline]
    pub fn is_kind_allowed(&self, kind: CreatureKind) -> bool {
        self.allowed.contains(&kind)
    }

    /// Final verdict for a creature that passed culling.
    #[inline]
    pub fn allows(&self, kind: CreatureKind) -> bool {
        self.category_visible(kind.category()) && self.is_kind_allowed(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_everything() {
        let settings = VisibilitySettings::default();
        assert!(CreatureKind::ALL.iter().all(|&k| settings.allows(k)));
    }

    #[test]
    fn kind_toggle_only_affects_that_kind() {
        let mut settings = VisibilitySettings::default();
        settings.set_kind_visible(CreatureKind::Cow, false);

        assert!(!settings.allows(CreatureKind::Cow));
        assert!(settings.allows(CreatureKind::Pig));

        settings.set_kind_visible(CreatureKind::Cow, true);
        assert!(settings.allows(CreatureKind::Cow));
    }

    #[test]
    fn category_toggle_overrides_allow_list() {
        let mut settings = VisibilitySettings::default();
        settings.toggle_creatures(false);

        assert!(!settings.allows(CreatureKind::Pig));
        assert!(settings.is_kind_allowed(CreatureKind::Pig));
        // Villagers and spaceships have their own switches.
        assert!(settings.allows(CreatureKind::Villager));
        assert!(settings.allows(CreatureKind::Spaceship));

        settings.toggle_villagers(false);
        settings.toggle_spaceships(false);
        assert!(!settings.allows(CreatureKind::Villager));
        assert!(!settings.allows(CreatureKind::Spaceship));
    }

    #[test]
    fn both_switches_must_be_on() {
        let settings = VisibilitySettings::only([CreatureKind::Villager]);
        assert!(settings.allows(CreatureKind::Villager));
        assert!(!settings.allows(CreatureKind::Pig));
        assert!(!VisibilitySettings::none_allowed().allows(CreatureKind::Villager));
    }

    #[test]
    fn deserializes_from_partial_toml() {
        let settings: VisibilitySettings = toml::from_str(
            r#"
                villagers = false
                allowed = ["Pig", "Villager"]
            "#,
        )
        .unwrap();

        assert!(settings.creatures);
        assert!(!settings.villagers);
        assert!(settings.allows(CreatureKind::Pig));
        assert!(!settings.allows(CreatureKind::Cow));
        assert!(!settings.allows(CreatureKind::Villager));
    }
}
