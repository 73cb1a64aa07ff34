use std::f32::consts::PI;

use glam::Vec2;
use morph_core::capability::{CapabilityProfile, CapabilityTier};
use morph_core::config::PhysicsConfig;
use morph_core::interaction::InteractionState;
use morph_core::shapes::ShapeKind;
use morph_core::solver::Solver;
use morph_core::store::ParticleStore;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn standard(count: usize) -> CapabilityProfile {
    CapabilityProfile {
        particle_count: count,
        ..CapabilityTier::Standard.profile()
    }
}

fn store_with(shape: ShapeKind, profile: &CapabilityProfile, seed: u64) -> ParticleStore {
    let mut store = ParticleStore::new();
    let mut rng = StdRng::seed_from_u64(seed);
    store.initialize(shape, profile, 6, &mut rng);
    store
}

fn distances(store: &ParticleStore) -> Vec<f32> {
    let p = store.particles();
    (0..p.count)
        .map(|i| p.position[i].distance(p.target[i]))
        .collect()
}

#[test]
fn test_spring_converges_within_envelope() {
    let profile = standard(32);
    let mut store = store_with(ShapeKind::Sphere, &profile, 7);
    let mut solver = Solver::new(PhysicsConfig::default());
    let idle = InteractionState::default();

    let d0 = distances(&store);
    let mut envelope = 1.5_f32;
    for tick in 1..=200 {
        solver.step(&mut store, &idle, &profile, true);
        envelope *= 0.94;
        for (i, d) in distances(&store).iter().enumerate() {
            assert!(
                *d <= d0[i] * envelope + 1e-4,
                "particle {} at tick {}: distance {} above envelope {}",
                i,
                tick,
                d,
                d0[i] * envelope
            );
        }
    }

    for (i, d) in distances(&store).iter().enumerate() {
        assert!(*d < 1e-2, "particle {} still {} from target", i, d);
    }
}

#[test]
fn test_scatter_pushes_particle_away_from_pointer() {
    let profile = standard(16);
    let mut base = store_with(ShapeKind::Sphere, &profile, 3);
    base.settle();
    // Phase pi removes the depth kick so only the screen push remains.
    let subject = 5;
    base.set_orbit_phase(subject, PI);

    let mut pushed = store_with(ShapeKind::Sphere, &profile, 3);
    pushed.settle();
    pushed.set_orbit_phase(subject, PI);

    let probe = Solver::new(PhysicsConfig::default());
    let at = probe
        .projector(Vec2::ZERO)
        .project(base.particles().position[subject] + probe.orbit(PI))
        .offset;
    let pointer = at - Vec2::new(10.0, 0.0);

    let idle = InteractionState::default();
    let hovering = InteractionState {
        pointer,
        pointer_velocity: Vec2::new(4.0, 0.0),
        is_hovering: true,
        is_moving: true,
        last_move_ms: 0.0,
    };

    let mut calm = Solver::new(PhysicsConfig::default());
    calm.step(&mut base, &idle, &profile, true);
    let mut stirred = Solver::new(PhysicsConfig::default());
    stirred.step(&mut pushed, &hovering, &profile, true);

    let screen_distance = |solver: &Solver, store: &ParticleStore| {
        let p = store.particles().position[subject] + solver.orbit(PI);
        solver.projector(Vec2::ZERO).project(p).offset.distance(pointer)
    };
    let calm_d = screen_distance(&calm, &base);
    let stirred_d = screen_distance(&stirred, &pushed);
    assert!(
        stirred_d > calm_d + 5.0,
        "scatter did not push: {} vs {}",
        stirred_d,
        calm_d
    );
}

#[test]
fn test_no_scatter_without_hover() {
    let profile = standard(64);
    let mut a = store_with(ShapeKind::Sphere, &profile, 11);
    let mut b = store_with(ShapeKind::Sphere, &profile, 11);

    let idle = InteractionState::default();
    // Moving but not hovering: intensity rises, positions must not change.
    let moving_outside = InteractionState {
        pointer: Vec2::ZERO,
        pointer_velocity: Vec2::new(30.0, 30.0),
        is_hovering: false,
        is_moving: true,
        last_move_ms: 0.0,
    };

    let mut sa = Solver::new(PhysicsConfig::default());
    let mut sb = Solver::new(PhysicsConfig::default());
    for _ in 0..10 {
        sa.step(&mut a, &idle, &profile, true);
        sb.step(&mut b, &moving_outside, &profile, true);
    }
    assert_eq!(a.particles().position, b.particles().position);
    assert!(sb.clock().scatter_intensity > 0.0);
    assert_eq!(sa.clock().scatter_intensity, 0.0);
}

#[test]
fn test_hover_disabled_tier_ignores_pointer() {
    let profile = CapabilityProfile {
        particle_count: 32,
        ..CapabilityTier::Low.profile()
    };
    let mut a = store_with(ShapeKind::Sphere, &profile, 5);
    let mut b = store_with(ShapeKind::Sphere, &profile, 5);
    let hovering = InteractionState {
        pointer: Vec2::ZERO,
        pointer_velocity: Vec2::new(10.0, 0.0),
        is_hovering: true,
        is_moving: true,
        last_move_ms: 0.0,
    };

    let mut sa = Solver::new(PhysicsConfig::default());
    let mut sb = Solver::new(PhysicsConfig::default());
    for _ in 0..5 {
        sa.step(&mut a, &InteractionState::default(), &profile, true);
        sb.step(&mut b, &hovering, &profile, true);
    }
    assert_eq!(a.particles().position, b.particles().position);
}

#[test]
fn test_depth_sort_back_to_front() {
    let profile = standard(200);
    let mut store = store_with(ShapeKind::Torus, &profile, 21);
    let mut solver = Solver::new(PhysicsConfig::default());
    let idle = InteractionState::default();

    for _ in 0..30 {
        solver.step(&mut store, &idle, &profile, true);
        let keys = solver.depth_keys();
        let order = solver.draw_order();
        assert_eq!(order.len(), 200);
        for pair in order.windows(2) {
            assert!(
                keys[pair[0]] <= keys[pair[1]],
                "draw order not ascending: {} then {}",
                keys[pair[0]],
                keys[pair[1]]
            );
        }
    }

    let mut seen = solver.draw_order().to_vec();
    seen.sort_unstable();
    assert_eq!(seen, (0..200).collect::<Vec<_>>());
}

#[test]
fn test_unsorted_tick_keeps_previous_order() {
    let profile = standard(50);
    let mut store = store_with(ShapeKind::Cube, &profile, 2);
    let mut solver = Solver::new(PhysicsConfig::default());
    let idle = InteractionState::default();

    solver.step(&mut store, &idle, &profile, true);
    let order = solver.draw_order().to_vec();
    for _ in 0..3 {
        solver.step(&mut store, &idle, &profile, false);
        assert_eq!(solver.draw_order(), order.as_slice());
    }
}

#[test]
fn test_morph_keeps_positions_continuous() {
    let profile = standard(40);
    let mut store = store_with(ShapeKind::Sphere, &profile, 9);
    let mut solver = Solver::new(PhysicsConfig::default());
    let idle = InteractionState::default();
    for _ in 0..50 {
        solver.step(&mut store, &idle, &profile, true);
    }

    let before = store.particles().position.clone();
    assert!(store.retarget(ShapeKind::Helix));
    assert_eq!(store.particles().position, before);

    solver.step(&mut store, &idle, &profile, true);
    for (i, p) in store.particles().position.iter().enumerate() {
        // One tick can only move as far as velocity plus one spring pull allows.
        assert!(
            p.distance(before[i]) < 40.0,
            "particle {} jumped {}",
            i,
            p.distance(before[i])
        );
    }
}
