//! Device capability adapter.
//!
//! Reduces raw platform signals to a `CapabilityProfile`: how many particles
//! to simulate, how big the canvas is, how many frames to drop, and which
//! per-particle effects are affordable. Computed once per session and again on
//! every viewport resize; it never touches the particle store.

use serde::{Deserialize, Serialize};

/// Coarse device class. Ordered from weakest to strongest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum CapabilityTier {
    VeryLow,
    Low,
    Standard,
}

/// Network hints, when the platform exposes them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionInfo {
    /// `"slow-2g"`, `"2g"`, `"3g"`, `"4g"`.
    pub effective_type: Option<String>,
    pub downlink_mbps: Option<f32>,
}

/// Raw signals probed by the host.
#[derive(Clone, Debug, PartialEq)]
pub struct PlatformSignals {
    pub device_memory_gb: Option<f32>,
    pub hardware_concurrency: Option<u32>,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub device_pixel_ratio: f32,
    pub prefers_reduced_motion: bool,
    pub has_touch: bool,
    pub connection: Option<ConnectionInfo>,
}

impl Default for PlatformSignals {
    /// A desktop with no special hints.
    fn default() -> Self {
        Self {
            device_memory_gb: None,
            hardware_concurrency: None,
            viewport_width: 1440.0,
            viewport_height: 900.0,
            device_pixel_ratio: 1.0,
            prefers_reduced_motion: false,
            has_touch: false,
            connection: None,
        }
    }
}

impl PlatformSignals {
    /// Replace non-finite or negative readings with neutral values.
    pub fn sanitized(&self) -> Self {
        let positive = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            device_memory_gb: self.device_memory_gb.filter(|m| m.is_finite() && *m > 0.0),
            hardware_concurrency: self.hardware_concurrency.filter(|c| *c > 0),
            viewport_width: positive(self.viewport_width, 0.0),
            viewport_height: positive(self.viewport_height, 0.0),
            device_pixel_ratio: positive(self.device_pixel_ratio, 1.0),
            prefers_reduced_motion: self.prefers_reduced_motion,
            has_touch: self.has_touch,
            connection: self.connection.clone().map(|c| ConnectionInfo {
                effective_type: c.effective_type,
                downlink_mbps: c.downlink_mbps.filter(|d| d.is_finite() && *d >= 0.0),
            }),
        }
    }
}

/// Cut-offs for the tiering policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapabilityThresholds {
    pub very_low_memory_gb: f32,
    pub low_memory_gb: f32,
    pub low_core_count: u32,
    pub mobile_width: f32,
    pub tiny_width: f32,
    pub min_downlink_mbps: f32,
    pub budget_pixel_ratio: f32,
}

impl Default for CapabilityThresholds {
    fn default() -> Self {
        Self {
            very_low_memory_gb: 2.0,
            low_memory_gb: 4.0,
            low_core_count: 2,
            mobile_width: 768.0,
            tiny_width: 375.0,
            min_downlink_mbps: 0.5,
            budget_pixel_ratio: 2.0,
        }
    }
}

/// Workload derived from the tier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CapabilityProfile {
    pub tier: CapabilityTier,
    pub particle_count: usize,
    pub base_radius: f32,
    pub canvas_size: f32,
    /// Process one frame out of every `frame_skip` (always >= 1).
    pub frame_skip: u32,
    pub glow_enabled: bool,
    pub hover_enabled: bool,
    pub device_pixel_ratio_cap: f32,
    /// Depth-sort once every `sort_interval` processed frames (always >= 1).
    pub sort_interval: u32,
}

impl CapabilityTier {
    /// Classify signals. Ordered rules, first match wins.
    pub fn classify(signals: &PlatformSignals, th: &CapabilityThresholds) -> CapabilityTier {
        let s = signals.sanitized();
        let narrow = s.viewport_width < th.mobile_width;
        let few_cores = s
            .hardware_concurrency
            .is_some_and(|c| c <= th.low_core_count);

        let slow_network = s.connection.as_ref().is_some_and(|c| {
            matches!(c.effective_type.as_deref(), Some("slow-2g") | Some("2g"))
                || c.downlink_mbps.is_some_and(|d| d < th.min_downlink_mbps)
        });

        let very_low = s.prefers_reduced_motion
            || s.device_memory_gb.is_some_and(|m| m < th.very_low_memory_gb)
            || (few_cores && narrow)
            || s.viewport_width < th.tiny_width
            || slow_network
            || (s.has_touch && narrow && s.device_pixel_ratio < th.budget_pixel_ratio);
        if very_low {
            return CapabilityTier::VeryLow;
        }

        let low = s.device_memory_gb.is_some_and(|m| m < th.low_memory_gb) || few_cores || narrow;
        if low {
            return CapabilityTier::Low;
        }

        CapabilityTier::Standard
    }

    pub fn profile(self) -> CapabilityProfile {
        match self {
            CapabilityTier::VeryLow => CapabilityProfile {
                tier: self,
                particle_count: 48,
                base_radius: 90.0,
                canvas_size: 300.0,
                frame_skip: 3,
                glow_enabled: false,
                hover_enabled: false,
                device_pixel_ratio_cap: 1.0,
                sort_interval: 4,
            },
            CapabilityTier::Low => CapabilityProfile {
                tier: self,
                particle_count: 80,
                base_radius: 100.0,
                canvas_size: 350.0,
                frame_skip: 2,
                glow_enabled: false,
                hover_enabled: false,
                device_pixel_ratio_cap: 1.0,
                sort_interval: 4,
            },
            CapabilityTier::Standard => CapabilityProfile {
                tier: self,
                particle_count: 200,
                base_radius: 150.0,
                canvas_size: 600.0,
                frame_skip: 1,
                glow_enabled: true,
                hover_enabled: true,
                device_pixel_ratio_cap: 2.0,
                sort_interval: 1,
            },
        }
    }
}

impl CapabilityProfile {
    pub fn from_signals(signals: &PlatformSignals, thresholds: &CapabilityThresholds) -> Self {
        let tier = CapabilityTier::classify(signals, thresholds);
        let profile = tier.profile();
        log::debug!(
            "capability tier {:?}: {} particles, canvas {}px, frame skip {}",
            tier,
            profile.particle_count,
            profile.canvas_size,
            profile.frame_skip
        );
        profile
    }

    /// Reduced-work mode: fewer rendered frames, larger per-frame steps.
    pub fn is_reduced(&self) -> bool {
        self.frame_skip > 1
    }

    /// Raster scale for a device pixel ratio, capped by the tier.
    pub fn pixel_ratio(&self, device_pixel_ratio: f32) -> f32 {
        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.device_pixel_ratio_cap).max(1.0)
        } else {
            1.0
        }
    }

    /// Backing store size in physical pixels.
    pub fn surface_px(&self, device_pixel_ratio: f32) -> u32 {
        (self.canvas_size * self.pixel_ratio(device_pixel_ratio)).round().max(1.0) as u32
    }
}
