//! Engine façade.
//!
//! Wires the store, scheduler, tracker, solver and renderer together behind
//! the handful of calls a host makes: configure, feed events, and call
//! `frame` once per display refresh. Everything runs on the caller's thread;
//! work only happens inside `frame` and the event methods, never between.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::capability::{CapabilityProfile, PlatformSignals};
use crate::config::EngineConfig;
use crate::context::ViewingContext;
use crate::error::EngineError;
use crate::frame::{FrameDecision, FrameLoop};
use crate::interaction::{InteractionState, InteractionTracker};
use crate::morph::MorphScheduler;
use crate::render::{DrawSurface, Renderer, Sprite};
use crate::shapes::ShapeKind;
use crate::solver::{EngineClock, Solver};
use crate::store::ParticleStore;

/// Counters from one processed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    /// Simulation tick after this frame.
    pub tick: u64,
    pub particle_count: usize,
    /// Whether the draw order was re-sorted this frame.
    pub sorted: bool,
    pub sprites_drawn: usize,
    pub glow_enabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// Loop is not running; nothing was touched.
    Stopped,
    /// Frame dropped by the skip policy; previous image stays on screen.
    Skipped,
    Rendered(FrameStats),
}

pub struct Engine {
    config: EngineConfig,
    signals: PlatformSignals,
    profile: CapabilityProfile,
    pending: Option<CapabilityProfile>,
    context: ViewingContext,
    store: ParticleStore,
    solver: Solver,
    scheduler: MorphScheduler,
    interaction: InteractionTracker,
    renderer: Renderer,
    frame_loop: FrameLoop,
    rng: StdRng,
}

impl Engine {
    /// Build an engine for the given device. Nothing runs until `start`.
    pub fn new(config: EngineConfig, signals: PlatformSignals, seed: u64) -> Self {
        let config = config.sanitized();
        let signals = signals.sanitized();
        let profile = CapabilityProfile::from_signals(&signals, &config.thresholds);
        Self::build(config, signals, profile, seed)
    }

    /// Build with an explicit profile instead of classifying signals.
    pub fn with_profile(config: EngineConfig, profile: CapabilityProfile, seed: u64) -> Self {
        Self::build(config.sanitized(), PlatformSignals::default(), profile, seed)
    }

    fn build(
        config: EngineConfig,
        signals: PlatformSignals,
        profile: CapabilityProfile,
        seed: u64,
    ) -> Self {
        let renderer = Renderer::new(config.skin.palette());
        let scheduler = MorphScheduler::new(config.sequence(), config.morph_interval_ms as f64);
        let interaction =
            InteractionTracker::new(config.idle_timeout_ms as f64, config.idle_velocity_decay);
        let mut solver = Solver::new(config.physics.clone());
        let mut rng = StdRng::seed_from_u64(seed);

        let mut store = ParticleStore::new();
        store.initialize(ShapeKind::Sphere, &profile, renderer.palette().len(), &mut rng);
        solver.reset(store.len());

        log::info!(
            "engine ready: {:?} tier, {} particles, skin {:?}",
            profile.tier,
            profile.particle_count,
            config.skin
        );

        Self {
            frame_loop: FrameLoop::new(&profile),
            config,
            signals,
            profile,
            pending: None,
            context: ViewingContext::default(),
            store,
            solver,
            scheduler,
            interaction,
            renderer,
            rng,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn profile(&self) -> &CapabilityProfile {
        &self.profile
    }

    /// Profile waiting for the next frame boundary, if any.
    pub fn pending_profile(&self) -> Option<&CapabilityProfile> {
        self.pending.as_ref()
    }

    pub fn context(&self) -> ViewingContext {
        self.context
    }

    pub fn store(&self) -> &ParticleStore {
        &self.store
    }

    pub fn solver(&self) -> &Solver {
        &self.solver
    }

    pub fn clock(&self) -> &EngineClock {
        self.solver.clock()
    }

    pub fn scheduler(&self) -> &MorphScheduler {
        &self.scheduler
    }

    pub fn interaction(&self) -> &InteractionState {
        self.interaction.state()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// CSS-to-physical scale for the current device, capped by the tier.
    pub fn pixel_ratio(&self) -> f32 {
        self.profile.pixel_ratio(self.signals.device_pixel_ratio)
    }

    /// Physical backing size of the square surface.
    pub fn surface_px(&self) -> u32 {
        self.profile.surface_px(self.signals.device_pixel_ratio)
    }

    /// Re-evaluate the device. A changed profile is applied at the start of
    /// the next frame, never in the middle of one.
    pub fn resize(&mut self, signals: PlatformSignals) {
        self.signals = signals.sanitized();
        let profile = CapabilityProfile::from_signals(&self.signals, &self.config.thresholds);
        if profile == self.profile {
            self.pending = None;
        } else {
            log::debug!("profile change to {:?} queued", profile.tier);
            self.pending = Some(profile);
        }
    }

    pub fn set_viewing_context(&mut self, context: ViewingContext, now_ms: f64) {
        self.context = context;
        self.scheduler.enter(context, now_ms, &mut self.store);
        if !context.is_visible() {
            self.frame_loop.stop();
        }
    }

    /// Pointer position relative to the surface centre, CSS pixels.
    pub fn pointer_move(&mut self, position: Vec2, now_ms: f64) {
        self.interaction.pointer_move(position, now_ms);
    }

    pub fn pointer_leave(&mut self) {
        self.interaction.pointer_leave();
    }

    /// Morph to `shape` outside the scheduler. Takes effect on the next tick.
    pub fn retarget(&mut self, shape: ShapeKind) -> bool {
        self.store.retarget(shape)
    }

    /// Start the loop. While the viewing context is hidden this is a no-op;
    /// entering a visible context does not start it either.
    pub fn start(&mut self, surface_available: bool) -> Result<(), EngineError> {
        if !self.context.is_visible() {
            log::debug!("start ignored while {:?}", self.context);
            return Ok(());
        }
        self.frame_loop.start(surface_available)
    }

    pub fn stop(&mut self) {
        self.frame_loop.stop();
    }

    /// Stop the loop and the morph timer together. Safe to repeat.
    pub fn teardown(&mut self) {
        self.frame_loop.stop();
        self.scheduler.cancel();
    }

    /// Sprites for the current state without advancing anything.
    pub fn compose(&self) -> Vec<Sprite> {
        let half = self.profile.canvas_size * 0.5;
        self.renderer.compose(&self.store, &self.solver, &self.profile, Vec2::splat(half))
    }

    /// Run one host frame: pending profile, morph poll, skip decision,
    /// interaction decay, simulation step, compose, draw.
    pub fn frame<S>(&mut self, now_ms: f64, surface: &mut S) -> FrameOutcome
    where
        S: DrawSurface + ?Sized,
    {
        if !self.frame_loop.is_running() {
            return FrameOutcome::Stopped;
        }

        self.apply_pending();
        let px = self.surface_px();
        if surface.size() != (px, px) {
            surface.resize(px, px, self.pixel_ratio());
        }

        self.scheduler.poll(now_ms, &mut self.store);

        let sort = match self.frame_loop.next_frame() {
            FrameDecision::Skip => return FrameOutcome::Skipped,
            FrameDecision::Process { sort } => sort,
        };

        self.interaction.decay(now_ms);
        self.solver.step(&mut self.store, self.interaction.state(), &self.profile, sort);

        let sprites = self.compose();
        let sprites_drawn = self.renderer.draw(surface, &sprites);

        FrameOutcome::Rendered(FrameStats {
            tick: self.solver.clock().tick,
            particle_count: self.store.len(),
            sorted: sort,
            sprites_drawn,
            glow_enabled: self.profile.glow_enabled,
        })
    }

    /// Full re-initialization on a profile change, keeping the current shape.
    fn apply_pending(&mut self) {
        let Some(profile) = self.pending.take() else {
            return;
        };
        log::info!(
            "applying {:?} tier: {} -> {} particles",
            profile.tier,
            self.profile.particle_count,
            profile.particle_count
        );
        let shape = self.store.shape();
        self.store.initialize(
            shape,
            &profile,
            self.renderer.palette().len(),
            &mut self.rng,
        );
        self.solver.reset(self.store.len());
        self.frame_loop.apply_profile(&profile);
        self.profile = profile;
    }
}
