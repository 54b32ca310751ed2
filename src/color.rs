use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Color painted on a surface after a wrong guess (`#232323`).
pub const MISS: Color = Color::new(35, 35, 35);

/// Header accent at the start of every round (steelblue).
pub const HEADER_ACCENT: Color = Color::new(70, 130, 180);

/// An RGB color with 8-bit channels.
///
/// Rendered as `rgb(R, G, B)`, which is also the text shown in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Draws each channel independently and uniformly from `0..=255`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let r = rng.gen();
        let g = rng.gen();
        let b = rng.gen();
        Self { r, g, b }
    }

    pub fn random_palette<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Self> {
        (0..n).map(|_| Self::random(rng)).collect()
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn contrast(self) -> Self {
        let luma = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        if luma > 128_000 {
            Self::new(0, 0, 0)
        } else {
            Self::new(255, 255, 255)
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let inner = s
            .trim()
            .strip_prefix("rgb(")
            .and_then(|s| s.strip_suffix(')'))
            .ok_or_else(|| anyhow::anyhow!("expected 'rgb(R, G, B)', but got {s:?}"))?;
        let channels = inner
            .split(',')
            .map(|x| x.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()?;
        anyhow::ensure!(
            channels.len() == 3,
            "expected three channels, but got {}",
            channels.len()
        );
        Ok(Self::new(channels[0], channels[1], channels[2]))
    }
}

impl From<Color> for ratatui::style::Color {
    fn from(c: Color) -> Self {
        ratatui::style::Color::Rgb(c.r, c.g, c.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn display_matches_css_rgb() {
        assert_eq!(MISS.to_string(), "rgb(35, 35, 35)");
        assert_eq!(HEADER_ACCENT.to_string(), "rgb(70, 130, 180)");
    }

    #[test]
    fn parse_rgb_text() {
        let c: Color = "rgb(1, 22, 255)".parse().unwrap();
        assert_eq!(c, Color::new(1, 22, 255));
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);

        assert!("rgb(1, 2)".parse::<Color>().is_err());
        assert!("rgb(1, 2, 256)".parse::<Color>().is_err());
        assert!("#232323".parse::<Color>().is_err());
    }

    #[test]
    fn palettes_are_rerandomized() {
        let mut rng = StdRng::seed_from_u64(7);
        let a = Color::random_palette(&mut rng, 6);
        let b = Color::random_palette(&mut rng, 6);
        assert_eq!(a.len(), 6);
        assert_ne!(a, b);
    }

    #[test]
    fn contrast_picks_readable_text() {
        assert_eq!(Color::new(255, 255, 255).contrast(), Color::new(0, 0, 0));
        assert_eq!(MISS.contrast(), Color::new(255, 255, 255));
    }
}
