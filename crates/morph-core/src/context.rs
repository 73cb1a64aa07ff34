/// Which page region the host is showing.
///
/// Only decides idle-vs-sequencing and visibility; how the host computes it is
/// its own business.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ViewingContext {
    /// Landing region: the object holds the default shape and just rotates.
    #[default]
    Static,
    /// Showcase region: the object cycles through the shape sequence.
    Showcase,
    /// Any other region: nothing is simulated or drawn.
    Hidden,
}

impl ViewingContext {
    pub fn from_section(section: i32) -> Self {
        match section {
            0 => ViewingContext::Static,
            1 => ViewingContext::Showcase,
            _ => ViewingContext::Hidden,
        }
    }

    pub fn is_visible(self) -> bool {
        !matches!(self, ViewingContext::Hidden)
    }
}

/// Opacity of the whole object for a scroll position measured in viewports.
pub fn fade_opacity(context: ViewingContext, scroll_progress: f32) -> f32 {
    if !context.is_visible() {
        return 0.0;
    }
    if !scroll_progress.is_finite() || scroll_progress < 1.5 {
        return 1.0;
    }
    (1.0 - (scroll_progress - 1.5) * 2.0).clamp(0.1, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_map_to_contexts() {
        assert_eq!(ViewingContext::from_section(0), ViewingContext::Static);
        assert_eq!(ViewingContext::from_section(1), ViewingContext::Showcase);
        assert_eq!(ViewingContext::from_section(4), ViewingContext::Hidden);
        assert_eq!(ViewingContext::from_section(-1), ViewingContext::Hidden);
    }

    #[test]
    fn fade_holds_then_floors() {
        let ctx = ViewingContext::Showcase;
        assert_eq!(fade_opacity(ctx, 0.0), 1.0);
        assert_eq!(fade_opacity(ctx, 1.4), 1.0);
        assert!((fade_opacity(ctx, 1.75) - 0.5).abs() < 1e-6);
        assert_eq!(fade_opacity(ctx, 3.0), 0.1);
        assert_eq!(fade_opacity(ViewingContext::Hidden, 0.0), 0.0);
    }
}
