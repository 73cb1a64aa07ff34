/// Hue in degrees, saturation and lightness in percent (CSS `hsl()` units).
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// sRGB components in `[0, 1]`.
    pub fn to_rgb(self) -> [f32; 3] {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = l - c / 2.0;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        [r + m, g + m, b + m]
    }
}

/// Fixed set of base colours particles pick from at initialisation.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Hsl>,
}

impl Palette {
    /// An empty list becomes a single neutral grey.
    pub fn new(colors: Vec<Hsl>) -> Self {
        if colors.is_empty() {
            return Self {
                colors: vec![Hsl::new(0.0, 0.0, 50.0)],
            };
        }
        Self { colors }
    }

    /// Rose and red shades for light backgrounds.
    pub fn cherry() -> Self {
        Self::new(vec![
            Hsl::new(350.0, 85.0, 55.0),
            Hsl::new(355.0, 80.0, 50.0),
            Hsl::new(345.0, 75.0, 60.0),
            Hsl::new(0.0, 70.0, 55.0),
            Hsl::new(352.0, 82.0, 52.0),
            Hsl::new(348.0, 78.0, 58.0),
        ])
    }

    /// Cool slate and steel blues.
    pub fn slate() -> Self {
        Self::new(vec![
            Hsl::new(215.0, 25.0, 45.0),
            Hsl::new(210.0, 30.0, 52.0),
            Hsl::new(220.0, 20.0, 40.0),
            Hsl::new(205.0, 35.0, 58.0),
            Hsl::new(225.0, 28.0, 48.0),
        ])
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Out-of-range indices wrap.
    pub fn get(&self, index: usize) -> Hsl {
        self.colors[index % self.colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-4)
    }

    #[test]
    fn primary_hues_convert() {
        assert!(close(Hsl::new(0.0, 100.0, 50.0).to_rgb(), [1.0, 0.0, 0.0]));
        assert!(close(Hsl::new(120.0, 100.0, 50.0).to_rgb(), [0.0, 1.0, 0.0]));
        assert!(close(Hsl::new(240.0, 100.0, 50.0).to_rgb(), [0.0, 0.0, 1.0]));
        assert!(close(Hsl::new(-120.0, 100.0, 50.0).to_rgb(), [0.0, 0.0, 1.0]));
    }

    #[test]
    fn grey_ignores_hue() {
        assert!(close(Hsl::new(77.0, 0.0, 50.0).to_rgb(), [0.5, 0.5, 0.5]));
    }

    #[test]
    fn palette_wraps_indices() {
        let p = Palette::cherry();
        assert_eq!(p.get(p.len()), p.get(0));
        assert_eq!(Palette::new(Vec::new()).len(), 1);
    }
}
