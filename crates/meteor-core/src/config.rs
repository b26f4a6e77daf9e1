//! Configuration for the arena, the targeting policy and scenario setup.
//!
//! Every section has defaults taken from `constants`, so a config file only
//! needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::TargetPriority;
use crate::error::MeteorError;

/// Grid and world parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Side length of one grid cell (meters). Must be positive.
    pub cell_size: f64,
    /// Row stride for folding cell coordinates into one key. Must be positive.
    pub row_stride: i64,
    /// Queries centered on this Y value set the update scope.
    pub reference_plane_y: f64,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            row_stride: GRID_ROW_STRIDE,
            reference_plane_y: REFERENCE_PLANE_Y,
        }
    }
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), MeteorError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(MeteorError::InvalidConfig(format!(
                "cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if self.row_stride <= 0 {
            return Err(MeteorError::InvalidConfig(format!(
                "row_stride must be positive, got {}",
                self.row_stride
            )));
        }
        if !self.reference_plane_y.is_finite() {
            return Err(MeteorError::InvalidConfig(
                "reference_plane_y must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Targeting policy parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetingConfig {
    /// Half side length of the cube queried around the shooter.
    pub query_half_extent: f64,
    pub priority: TargetPriority,
}

impl Default for TargetingConfig {
    fn default() -> Self {
        Self {
            query_half_extent: TARGETING_BOX_SIZE / 2.0,
            priority: TargetPriority::default(),
        }
    }
}

impl TargetingConfig {
    pub fn validate(&self) -> Result<(), MeteorError> {
        if !self.query_half_extent.is_finite() || self.query_half_extent <= 0.0 {
            return Err(MeteorError::InvalidConfig(format!(
                "query_half_extent must be positive, got {}",
                self.query_half_extent
            )));
        }
        Ok(())
    }
}

/// Seeded asteroid field parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// RNG seed. Same seed = same field.
    pub seed: u64,
    pub asteroid_count: usize,
    pub field_radius: f64,
    pub clear_zone: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Share of asteroids given a drift velocity, in [0, 1].
    pub moving_fraction: f64,
    pub max_speed: f64,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            asteroid_count: ASTEROID_COUNT,
            field_radius: ASTEROID_FIELD_RADIUS,
            clear_zone: ASTEROID_CLEAR_ZONE,
            min_radius: ASTEROID_MIN_RADIUS,
            max_radius: ASTEROID_MAX_RADIUS,
            moving_fraction: ASTEROID_MOVING_FRACTION,
            max_speed: ASTEROID_MAX_SPEED,
        }
    }
}

impl ScenarioConfig {
    pub fn validate(&self) -> Result<(), MeteorError> {
        if !(self.min_radius > 0.0 && self.min_radius <= self.max_radius) {
            return Err(MeteorError::InvalidConfig(format!(
                "asteroid radius range {}..{} is empty",
                self.min_radius, self.max_radius
            )));
        }
        if !(self.clear_zone >= 0.0 && self.clear_zone < self.field_radius) {
            return Err(MeteorError::InvalidConfig(format!(
                "clear_zone {} must lie inside field_radius {}",
                self.clear_zone, self.field_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.moving_fraction) {
            return Err(MeteorError::InvalidConfig(format!(
                "moving_fraction must be in [0, 1], got {}",
                self.moving_fraction
            )));
        }
        if !(self.max_speed >= 0.0 && self.max_speed.is_finite()) {
            return Err(MeteorError::InvalidConfig(format!(
                "max_speed must be non-negative, got {}",
                self.max_speed
            )));
        }
        Ok(())
    }
}

/// Top-level configuration, as read from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteorConfig {
    pub arena: ArenaConfig,
    pub targeting: TargetingConfig,
    pub scenario: ScenarioConfig,
}

impl MeteorConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MeteorError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> Result<Self, MeteorError> {
        let config: MeteorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MeteorError> {
        self.arena.validate()?;
        self.targeting.validate()?;
        self.scenario.validate()
    }
}
