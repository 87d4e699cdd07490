//! Engine configuration, loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::animation::EasingType;
use crate::error::CubeError;
use crate::face::Face;
use crate::grid::Axis;

/// Placement of the six click sensors, in cubelet units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorLayout {
    /// Distance of a side sensor's centre from the cube centre along its normal.
    pub offset: f32,
    /// Same as `offset`, for the TOP and BOTTOM sensors.
    pub vertical_offset: f32,
    /// Extent along the face normal.
    pub thickness: f32,
    /// Extent across the face.
    pub span: f32,
}

impl Default for SensorLayout {
    fn default() -> Self {
        Self {
            offset: 0.99,
            vertical_offset: 1.0,
            thickness: 1.01,
            span: 3.01,
        }
    }
}

impl SensorLayout {
    /// Centre offset of the sensor in front of `face`.
    pub fn offset_for(&self, face: Face) -> f32 {
        match face.axis() {
            Axis::Y => self.vertical_offset,
            Axis::X | Axis::Z => self.offset,
        }
    }
}

/// Tunables of the rotation engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds one quarter turn takes.
    pub animation_duration: f32,
    /// Lock release delay as a fraction of `animation_duration`.
    pub settle_fraction: f32,
    pub easing: EasingType,
    /// World distance between neighbouring cubelet centres.
    pub cubelet_spacing: f32,
    pub sensor: SensorLayout,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            animation_duration: 0.1,
            settle_fraction: 1.0,
            easing: EasingType::EaseInOut,
            cubelet_spacing: 1.0,
            sensor: SensorLayout::default(),
        }
    }
}

impl EngineConfig {
    /// Loads and validates a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, CubeError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, CubeError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configuration shipped in `presets/default.json`.
    pub fn default_preset() -> Self {
        const DEFAULT_PRESET_JSON: &str = include_str!("../presets/default.json");
        Self::from_json(DEFAULT_PRESET_JSON).unwrap_or_else(|e| {
            tracing::warn!("[config] default preset rejected, using built-in defaults: {e}");
            Self::default()
        })
    }

    /// Seconds the rotation lock stays held after a turn starts.
    pub fn settle_delay(&self) -> f32 {
        self.animation_duration * self.settle_fraction
    }

    pub fn validate(&self) -> Result<(), CubeError> {
        if !self.animation_duration.is_finite() || self.animation_duration < 0.0 {
            return Err(CubeError::InvalidConfig(format!(
                "animation_duration must be a non-negative number, got {}",
                self.animation_duration
            )));
        }
        if !self.settle_fraction.is_finite() || !(0.0..=1.0).contains(&self.settle_fraction) {
            return Err(CubeError::InvalidConfig(format!(
                "settle_fraction must be within 0..=1, got {}",
                self.settle_fraction
            )));
        }
        if !self.cubelet_spacing.is_finite() || self.cubelet_spacing <= 0.0 {
            return Err(CubeError::InvalidConfig(format!(
                "cubelet_spacing must be positive, got {}",
                self.cubelet_spacing
            )));
        }
        let SensorLayout {
            offset,
            vertical_offset,
            thickness,
            span,
        } = self.sensor;
        if [offset, vertical_offset, thickness, span]
            .iter()
            .any(|v| !v.is_finite() || *v <= 0.0)
        {
            return Err(CubeError::InvalidConfig(
                "sensor offsets, thickness and span must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
