use glam::Vec2;
use morph_core::capability::{CapabilityProfile, CapabilityTier};
use morph_core::config::PhysicsConfig;
use morph_core::interaction::InteractionState;
use morph_core::palette::Palette;
use morph_core::raster::{Rgba8, SoftwareRaster};
use morph_core::render::{DrawSurface, Renderer};
use morph_core::shapes::ShapeKind;
use morph_core::solver::Solver;
use morph_core::store::ParticleStore;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn scene(tier: CapabilityTier, count: usize) -> (ParticleStore, Solver, CapabilityProfile) {
    let profile = CapabilityProfile {
        particle_count: count,
        ..tier.profile()
    };
    let mut store = ParticleStore::new();
    store.initialize(ShapeKind::Sphere, &profile, 6, &mut StdRng::seed_from_u64(8));
    let mut solver = Solver::new(PhysicsConfig::default());
    for _ in 0..60 {
        solver.step(&mut store, &InteractionState::default(), &profile, true);
    }
    (store, solver, profile)
}

#[test]
fn test_sprites_follow_draw_order() {
    let (store, solver, profile) = scene(CapabilityTier::Standard, 100);
    let sprites =
        Renderer::new(Palette::cherry()).compose(&store, &solver, &profile, Vec2::splat(300.0));
    let ids: Vec<_> = sprites.iter().map(|s| s.id).collect();
    assert_eq!(ids, solver.draw_order());
}

#[test]
fn test_sprite_attributes_are_bounded() {
    let (store, solver, profile) = scene(CapabilityTier::Standard, 100);
    let sprites =
        Renderer::new(Palette::slate()).compose(&store, &solver, &profile, Vec2::splat(300.0));
    for s in &sprites {
        assert!(s.core.radius >= 0.5);
        assert!((0.0..=1.0).contains(&s.core.color[3]));
        assert!(s.core.color[..3].iter().all(|c| (0.0..=1.0).contains(c)));
        let glow = s.glow.expect("standard tier glows");
        assert!((glow.radius - s.core.radius * 2.5).abs() < 1e-4);
        assert!((glow.color[3] - s.core.color[3] * 0.15).abs() < 1e-5);
        assert!(s.center.x > 0.0 && s.center.x < 600.0);
    }
}

#[test]
fn test_depth_raises_opacity() {
    let (store, solver, profile) = scene(CapabilityTier::Standard, 200);
    let sprites =
        Renderer::new(Palette::cherry()).compose(&store, &solver, &profile, Vec2::splat(300.0));
    let deepest = sprites.iter().max_by(|a, b| a.depth.total_cmp(&b.depth)).unwrap();
    let shallowest = sprites.iter().min_by(|a, b| a.depth.total_cmp(&b.depth)).unwrap();
    // Normalise by the random base opacity so only depth matters.
    let relative = |id: usize, alpha: f32| alpha / store.particles().base_opacity[id];
    assert!(
        relative(deepest.id, deepest.core.color[3])
            > relative(shallowest.id, shallowest.core.color[3])
    );
}

#[test]
fn test_reduced_tier_composes_without_glow() {
    let (store, solver, profile) = scene(CapabilityTier::VeryLow, 48);
    let sprites =
        Renderer::new(Palette::cherry()).compose(&store, &solver, &profile, Vec2::splat(150.0));
    assert_eq!(sprites.len(), 48);
    assert!(sprites.iter().all(|s| s.glow.is_none()));
}

#[test]
fn test_raster_blends_source_over() {
    let mut r = SoftwareRaster::new(10, 10, 1.0);
    r.fill_circle(Vec2::splat(5.0), 3.0, [1.0, 0.0, 0.0, 1.0]);
    r.fill_circle(Vec2::splat(5.0), 3.0, [0.0, 0.0, 1.0, 0.5]);
    let p = r.pixel(5, 5).unwrap();
    assert_eq!(p.a, 255);
    assert!((p.r as i32 - 128).abs() <= 1, "red {}", p.r);
    assert!((p.b as i32 - 128).abs() <= 1, "blue {}", p.b);

    let mut r = SoftwareRaster::new(10, 10, 1.0);
    r.fill_circle(Vec2::splat(5.0), 3.0, [0.0, 1.0, 0.0, 0.5]);
    r.fill_circle(Vec2::splat(5.0), 3.0, [0.0, 1.0, 0.0, 0.5]);
    let p = r.pixel(5, 5).unwrap();
    assert!((p.a as i32 - 191).abs() <= 1, "alpha {}", p.a);
    assert_eq!(p.g, 255);
}

#[test]
fn test_disc_edges_are_antialiased() {
    let mut r = SoftwareRaster::new(20, 20, 1.0);
    r.fill_circle(Vec2::splat(10.0), 5.0, [1.0, 1.0, 1.0, 1.0]);
    let partial = r.pixels().iter().filter(|p| p.a > 0 && p.a < 255).count();
    assert!(partial > 0);
    r.clear();
    assert!(r.pixels().iter().all(|p| *p == Rgba8::default()));
}

#[test]
fn test_draw_clears_previous_frame() {
    let (store, solver, profile) = scene(CapabilityTier::Low, 20);
    let renderer = Renderer::new(Palette::cherry());
    let mut r = SoftwareRaster::new(350, 350, 1.0);
    r.fill_circle(Vec2::new(2.0, 2.0), 1.5, [1.0; 4]);
    let sprites = renderer.compose(&store, &solver, &profile, Vec2::splat(175.0));
    assert_eq!(renderer.draw(&mut r, &sprites), 20);
    assert_eq!(r.pixel(2, 2), Some(Rgba8::default()));
}
