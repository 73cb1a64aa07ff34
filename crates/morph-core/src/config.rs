use serde::{Deserialize, Serialize};

use crate::capability::CapabilityThresholds;
use crate::error::EngineError;
use crate::palette::Palette;
use crate::shapes::{ShapeKind, GEOMETRIC_SEQUENCE, SILHOUETTE_SEQUENCE};

/// Per-tick simulation constants.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    pub spring: f32,
    pub damping: f32,
    pub scatter_radius_px: f32,
    pub scatter_base_force: f32,
    pub scatter_speed_gain: f32,
    pub scatter_speed_max: f32,
    pub scatter_depth_kick: f32,
    /// Rate of the single-pole filter driving `scatter_intensity`.
    pub scatter_smoothing: f32,
    pub focal_length: f32,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub time_step: f32,
    pub reduced_time_step: f32,
    pub yaw_step: f32,
    pub reduced_yaw_step: f32,
    pub pitch_amplitude: f32,
    pub pitch_frequency: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            spring: 0.06,
            damping: 0.88,
            scatter_radius_px: 100.0,
            scatter_base_force: 15.0,
            scatter_speed_gain: 3.0,
            scatter_speed_max: 50.0,
            scatter_depth_kick: 0.3,
            scatter_smoothing: 0.1,
            focal_length: 450.0,
            orbit_radius: 1.2,
            orbit_speed: 0.5,
            time_step: 0.008,
            reduced_time_step: 0.012,
            yaw_step: 0.004,
            reduced_yaw_step: 0.006,
            pitch_amplitude: 0.05,
            pitch_frequency: 0.2,
        }
    }
}

/// Shape library and palette bundle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    #[default]
    Silhouettes,
    Geometric,
}

impl Skin {
    pub fn default_sequence(self) -> Vec<ShapeKind> {
        match self {
            Skin::Silhouettes => SILHOUETTE_SEQUENCE.to_vec(),
            Skin::Geometric => GEOMETRIC_SEQUENCE.to_vec(),
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Skin::Silhouettes => Palette::cherry(),
            Skin::Geometric => Palette::slate(),
        }
    }
}

/// Everything the host can configure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub skin: Skin,
    /// Shape names; empty means the skin's default order.
    pub shape_sequence: Vec<String>,
    pub morph_interval_ms: u32,
    pub idle_timeout_ms: u32,
    pub idle_velocity_decay: f32,
    #[serde(flatten)]
    pub physics: PhysicsConfig,
    pub thresholds: CapabilityThresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            skin: Skin::default(),
            shape_sequence: Vec::new(),
            morph_interval_ms: 2500,
            idle_timeout_ms: 100,
            idle_velocity_decay: 0.9,
            physics: PhysicsConfig::default(),
            thresholds: CapabilityThresholds::default(),
        }
    }
}

impl EngineConfig {
    pub fn for_skin(skin: Skin) -> Self {
        Self {
            skin,
            ..Self::default()
        }
    }

    /// Parse JSON; missing fields take their defaults. The result is sanitised.
    pub fn from_json(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    /// Clamp every tunable into a range the simulation can live with.
    pub fn sanitized(mut self) -> Self {
        let finite_or = |v: f32, fallback: f32| if v.is_finite() { v } else { fallback };
        let d = PhysicsConfig::default();
        let p = &mut self.physics;

        p.spring = finite_or(p.spring, d.spring).clamp(1e-4, 1.0);
        p.damping = finite_or(p.damping, d.damping).clamp(0.0, 0.999);
        p.scatter_radius_px = finite_or(p.scatter_radius_px, d.scatter_radius_px).max(1.0);
        p.scatter_base_force = finite_or(p.scatter_base_force, d.scatter_base_force).max(0.0);
        p.scatter_speed_gain = finite_or(p.scatter_speed_gain, d.scatter_speed_gain).max(0.0);
        p.scatter_speed_max = finite_or(p.scatter_speed_max, d.scatter_speed_max).max(0.0);
        p.scatter_depth_kick = finite_or(p.scatter_depth_kick, d.scatter_depth_kick);
        p.scatter_smoothing = finite_or(p.scatter_smoothing, d.scatter_smoothing).clamp(1e-3, 1.0);
        p.focal_length = finite_or(p.focal_length, d.focal_length).max(1.0);
        p.orbit_radius = finite_or(p.orbit_radius, d.orbit_radius);
        p.orbit_speed = finite_or(p.orbit_speed, d.orbit_speed);
        p.time_step = finite_or(p.time_step, d.time_step).max(0.0);
        p.reduced_time_step = finite_or(p.reduced_time_step, d.reduced_time_step).max(0.0);
        p.yaw_step = finite_or(p.yaw_step, d.yaw_step);
        p.reduced_yaw_step = finite_or(p.reduced_yaw_step, d.reduced_yaw_step);
        p.pitch_amplitude = finite_or(p.pitch_amplitude, d.pitch_amplitude);
        p.pitch_frequency = finite_or(p.pitch_frequency, d.pitch_frequency);

        self.morph_interval_ms = self.morph_interval_ms.max(16);
        self.idle_velocity_decay = finite_or(self.idle_velocity_decay, 0.9).clamp(0.0, 1.0);
        self
    }

    /// Resolved morph order; unknown names become the sphere.
    pub fn sequence(&self) -> Vec<ShapeKind> {
        if self.shape_sequence.is_empty() {
            return self.skin.default_sequence();
        }
        self.shape_sequence
            .iter()
            .map(|name| ShapeKind::from_name(name))
            .collect()
    }
}
