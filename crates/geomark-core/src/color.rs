//! Color generation for region identities.
//!
//! A region's color is its identity within a session, so freshly spawned
//! regions need colors that are both unique and easy to tell apart.

/// Fraction of a full hue turn between consecutive colors (golden ratio
/// conjugate). Keeps neighbors in the sequence visually far apart.
const HUE_STEP: f64 = 0.618_033_988_749_895;

/// Endless supply of spread-out region colors.
#[derive(Debug, Clone, Default)]
pub struct ColorWheel {
    index: u32,
}

impl ColorWheel {
    /// Create a wheel starting at the first color.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next color as an uppercase `#RRGGBB` string.
    pub fn next_color(&mut self) -> String {
        let hue = (self.index as f64 * HUE_STEP).fract();
        self.index = self.index.wrapping_add(1);
        let (r, g, b) = hue_to_rgb(hue);
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }
}

/// Convert hue (0.0-1.0) to RGB components.
pub fn hue_to_rgb(hue: f64) -> (u8, u8, u8) {
    let h = hue * 6.0;
    let c = 1.0_f64;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());

    let (r, g, b) = match h as i32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hue_to_rgb_primaries() {
        assert_eq!(hue_to_rgb(0.0), (255, 0, 0));
        assert_eq!(hue_to_rgb(1.0 / 3.0), (0, 255, 0));
        assert_eq!(hue_to_rgb(2.0 / 3.0), (0, 0, 255));
    }

    #[test]
    fn test_next_color_format() {
        let mut wheel = ColorWheel::new();
        let color = wheel.next_color();
        assert_eq!(color.len(), 7);
        assert!(color.starts_with('#'));
        assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_next_color_run_is_unique() {
        let mut wheel = ColorWheel::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..64 {
            assert!(seen.insert(wheel.next_color()));
        }
    }
}
