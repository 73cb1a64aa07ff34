//! Sprite composition and drawing.
//!
//! `compose` turns the simulated population into a flat list of discs in
//! draw order; `draw` only paints that list. Renderers never touch the store.

use glam::Vec2;

use crate::capability::CapabilityProfile;
use crate::palette::{Hsl, Palette};
use crate::projection::normalized_depth;
use crate::solver::Solver;
use crate::store::ParticleStore;

const MIN_SPRITE_RADIUS: f32 = 0.5;
const GLOW_RADIUS_SCALE: f32 = 2.5;
const GLOW_ALPHA_SCALE: f32 = 0.15;
const HUE_WOBBLE_DEG: f32 = 8.0;
const DEPTH_DARKENING: f32 = 15.0;
const CORE_DARKENING: f32 = 15.0;
const CORE_MIN_LIGHTNESS: f32 = 20.0;

/// Anything the renderer can paint discs onto.
pub trait DrawSurface {
    /// Backing size in physical pixels.
    fn size(&self) -> (u32, u32);
    /// New physical size, and the factor mapping CSS pixels onto it.
    fn resize(&mut self, width: u32, height: u32, scale: f32);
    fn clear(&mut self);
    /// `color` is straight-alpha RGBA in `[0, 1]`.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    pub radius: f32,
    pub color: [f32; 4],
}

/// One particle ready to paint, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
    pub id: usize,
    pub center: Vec2,
    pub depth: f32,
    pub core: Disc,
    pub glow: Option<Disc>,
}

pub struct Renderer {
    palette: Palette,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Project the population around `center` in the solver's draw order.
    pub fn compose(
        &self,
        store: &ParticleStore,
        solver: &Solver,
        profile: &CapabilityProfile,
        center: Vec2,
    ) -> Vec<Sprite> {
        let particles = &store.particles;
        let projector = solver.projector(center);
        let clock = solver.clock();
        let radius = store.radius();

        let mut sprites = Vec::with_capacity(particles.count);
        for &i in solver.draw_order() {
            if i >= particles.count {
                continue;
            }
            let projected =
                projector.project(particles.position[i] + solver.orbit(particles.orbit_phase[i]));
            let nd = normalized_depth(projected.depth, radius);

            let size = (particles.size[i] * projected.scale * (0.5 + 0.6 * nd))
                .max(MIN_SPRITE_RADIUS);
            let opacity = (particles.base_opacity[i]
                * (0.4 + 0.6 * nd)
                * (1.0 - 0.15 * clock.scatter_intensity))
                .max(0.0);

            let base = self.palette.get(particles.color_index[i]);
            let hue = base.h + (clock.time + i as f32 * 0.02).sin() * HUE_WOBBLE_DEG;
            let light = base.l - nd * DEPTH_DARKENING;
            let core_light = (light - CORE_DARKENING).max(CORE_MIN_LIGHTNESS);

            let core = Disc {
                radius: size,
                color: with_alpha(Hsl::new(hue, base.s, core_light), opacity),
            };
            let glow = profile.glow_enabled.then(|| Disc {
                radius: size * GLOW_RADIUS_SCALE,
                color: with_alpha(Hsl::new(hue, base.s, light), opacity * GLOW_ALPHA_SCALE),
            });

            sprites.push(Sprite {
                id: i,
                center: projected.screen,
                depth: projected.depth,
                core,
                glow,
            });
        }
        sprites
    }

    /// Clear the surface and paint `sprites` in order, glow under core.
    pub fn draw<S: DrawSurface + ?Sized>(&self, surface: &mut S, sprites: &[Sprite]) -> usize {
        surface.clear();
        for sprite in sprites {
            if let Some(glow) = sprite.glow {
                surface.fill_circle(sprite.center, glow.radius, glow.color);
            }
            surface.fill_circle(sprite.center, sprite.core.radius, sprite.core.color);
        }
        sprites.len()
    }
}

fn with_alpha(hsl: Hsl, alpha: f32) -> [f32; 4] {
    let [r, g, b] = hsl.to_rgb();
    [r, g, b, alpha.clamp(0.0, 1.0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        cleared: usize,
        circles: Vec<(Vec2, f32)>,
    }

    impl DrawSurface for Recorder {
        fn size(&self) -> (u32, u32) {
            (100, 100)
        }
        fn resize(&mut self, _: u32, _: u32, _: f32) {}
        fn clear(&mut self) {
            self.cleared += 1;
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, _: [f32; 4]) {
            self.circles.push((center, radius));
        }
    }

    #[test]
    fn glow_is_painted_before_core() {
        let sprite = Sprite {
            id: 0,
            center: Vec2::new(5.0, 5.0),
            depth: 0.0,
            core: Disc {
                radius: 2.0,
                color: [1.0; 4],
            },
            glow: Some(Disc {
                radius: 5.0,
                color: [1.0, 1.0, 1.0, 0.1],
            }),
        };
        let mut surface = Recorder::default();
        let drawn = Renderer::new(Palette::cherry()).draw(&mut surface, &[sprite]);
        assert_eq!(drawn, 1);
        assert_eq!(surface.cleared, 1);
        assert_eq!(surface.circles, vec![(sprite.center, 5.0), (sprite.center, 2.0)]);
    }
}
