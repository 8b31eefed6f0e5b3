//! Culling configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use voxcull_core::{Error, Result};
use voxcull_physics::DEFAULT_MAX_STEPS;

/// Largest accepted slow-update budget, one minute.
pub const MAX_SLOW_UPDATE_BUDGET_MS: f32 = 60_000.0;

/// Tunables for the entity culler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CullingConfig {
    /// Entities closer than this to the observer always simulate.
    pub near_radius: f32,
    /// Radius of the sphere tested against the frustum at each entity.
    pub cull_sphere_radius: f32,
    /// Cell advances allowed per line-of-sight march.
    pub max_los_steps: u32,
    /// Height used when an entity reports a non-positive one.
    pub default_height: f32,
    /// Updates slower than this are logged.
    pub slow_update_budget_ms: f32,
    /// Time updates every this many frames (0 disables timing).
    pub profile_interval: u32,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            near_radius: 64.0,
            cull_sphere_radius: 2.0,
            max_los_steps: DEFAULT_MAX_STEPS,
            default_height: 1.0,
            slow_update_budget_ms: 25.0,
            profile_interval: 60,
        }
    }
}

impl CullingConfig {
    /// Parse a TOML document and validate it.
    ///
    /// Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| Error::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Reject values the culler cannot work with.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f32) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(Error::Config(format!("{name} must be positive, got {value}")))
            }
        }

        positive("near_radius", self.near_radius)?;
        positive("cull_sphere_radius", self.cull_sphere_radius)?;
        positive("default_height", self.default_height)?;
        if self.max_los_steps == 0 {
            return Err(Error::Config("max_los_steps must be at least 1".into()));
        }
        if !(0.0..=MAX_SLOW_UPDATE_BUDGET_MS).contains(&self.slow_update_budget_ms) {
            return Err(Error::Config(format!(
                "slow_update_budget_ms must be within 0..={MAX_SLOW_UPDATE_BUDGET_MS}, got {}",
                self.slow_update_budget_ms
            )));
        }
        Ok(())
    }

    /// Slow-update threshold as a duration.
    ///
    /// Values `validate` would reject never warn.
    pub fn slow_update_budget(&self) -> Duration {
        Duration::try_from_secs_f32(self.slow_update_budget_ms / 1000.0).unwrap_or(Duration::MAX)
    }

    /// Set the near radius.
    #[must_use]
    pub const fn with_near_radius(mut self, radius: f32) -> Self {
        self.near_radius = radius;
        self
    }

    /// Set the frustum test sphere radius.
    #[must_use]
    pub const fn with_cull_sphere_radius(mut self, radius: f32) -> Self {
        self.cull_sphere_radius = radius;
        self
    }

    /// Set the line-of-sight step cap.
    #[must_use]
    pub const fn with_max_los_steps(mut self, steps: u32) -> Self {
        self.max_los_steps = steps;
        self
    }

    /// Set how often updates are timed.
    #[must_use]
    pub const fn with_profile_interval(mut self, frames: u32) -> Self {
        self.profile_interval = frames;
        self
    }

    /// Squared near radius, compared against squared distances.
    #[inline]
    pub fn near_radius_sq(&self) -> f32 {
        self.near_radius * self.near_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CullingConfig::default();
        config.validate().unwrap();
        assert_eq!(config.near_radius_sq(), 4096.0);
        assert_eq!(config.max_los_steps, 100);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config =
            CullingConfig::from_toml_str("near_radius = 32.0\nmax_los_steps = 40\n").unwrap();
        assert_eq!(config.near_radius, 32.0);
        assert_eq!(config.max_los_steps, 40);
        assert_eq!(config.cull_sphere_radius, 2.0);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            CullingConfig::from_toml_str("near_radius = -1.0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            CullingConfig::from_toml_str("max_los_steps = 0"),
            Err(Error::Config(_))
        ));
        assert!(CullingConfig::default()
            .with_cull_sphere_radius(0.0)
            .validate()
            .is_err());
    }

    #[test]
    fn budget_is_bounded() {
        for source in [
            "slow_update_budget_ms = 1e30",
            "slow_update_budget_ms = -1.0",
            "slow_update_budget_ms = nan",
            "slow_update_budget_ms = inf",
        ] {
            assert!(
                matches!(CullingConfig::from_toml_str(source), Err(Error::Config(_))),
                "{source}"
            );
        }

        let config = CullingConfig::from_toml_str("slow_update_budget_ms = 60000.0").unwrap();
        assert_eq!(config.slow_update_budget(), Duration::from_secs(60));
        assert_eq!(CullingConfig::default().slow_update_budget().as_millis(), 25);
    }

    #[test]
    fn unvalidated_budget_does_not_panic() {
        for ms in [1e30, -5.0, f32::NAN, f32::INFINITY] {
            let config = CullingConfig {
                slow_update_budget_ms: ms,
                ..CullingConfig::default()
            };
            assert_eq!(config.slow_update_budget(), Duration::MAX, "{ms}");
        }
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            CullingConfig::from_toml_str("near_radius = \"far\""),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            CullingConfig::load("/definitely/not/here.toml"),
            Err(Error::Io(_))
        ));
    }
}
