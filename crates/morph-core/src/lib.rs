//! Particle morph-and-render engine.
//!
//! A fixed population of particles springs toward the sample points of a
//! procedural shape. Retargeting to another shape rewrites only the targets,
//! so the cloud flows from one form to the next. Each frame the population is
//! rotated, perspective-projected, depth-sorted and painted as discs onto a
//! [`render::DrawSurface`]. Workload follows a [`capability::CapabilityProfile`]
//! derived from device signals.
//!
//! [`engine::Engine`] is the entry point for hosts.

pub mod capability;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod forces;
pub mod frame;
pub mod interaction;
pub mod math;
pub mod morph;
pub mod palette;
pub mod particle;
pub mod projection;
pub mod raster;
pub mod render;
pub mod shapes;
pub mod solver;
pub mod store;

pub use capability::{CapabilityProfile, CapabilityTier, PlatformSignals};
pub use config::{EngineConfig, PhysicsConfig, Skin};
pub use context::ViewingContext;
pub use engine::{Engine, FrameOutcome, FrameStats};
pub use error::EngineError;
pub use raster::SoftwareRaster;
pub use render::DrawSurface;
pub use shapes::ShapeKind;
