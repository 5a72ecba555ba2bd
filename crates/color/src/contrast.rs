//! WCAG 2.0 luminance and contrast

use serde::Serialize;

use crate::color::Color;

/// Luminance above which dark text is used
const DARK_TEXT_THRESHOLD: f64 = 0.5;

/// Foreground to draw over a color swatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextColor {
    /// Black
    Dark,
    /// Soft white, `(240, 240, 240)`
    Light,
}

impl TextColor {
    pub const SOFT_WHITE: Color = Color::rgb(240, 240, 240);

    pub fn color(&self) -> Color {
        match self {
            Self::Dark => Color::BLACK,
            Self::Light => Self::SOFT_WHITE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Linearise an sRGB channel
fn linear(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance in `[0, 1]`; alpha is ignored
pub fn relative_luminance(color: &Color) -> f64 {
    0.2126 * linear(color.red) + 0.7152 * linear(color.green) + 0.0722 * linear(color.blue)
}

/// WCAG contrast ratio in `[1, 21]`, symmetric in its arguments
pub fn contrast_ratio(a: &Color, b: &Color) -> f64 {
    let (la, lb) = (relative_luminance(a), relative_luminance(b));
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick dark or light text for a background, judged on its opaque version
pub fn contrast_text_color(background: &Color) -> TextColor {
    if relative_luminance(&background.opaque()) > DARK_TEXT_THRESHOLD {
        TextColor::Dark
    } else {
        TextColor::Light
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_luminance(r: u8, g: u8, b: u8) -> f64 {
        let channel = |v: u8| {
            let c = v as f64 / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        };
        0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
    }

    fn check(r: u8, g: u8, b: u8) {
        let color = Color::rgb(r, g, b);
        let expected = reference_luminance(r, g, b);
        assert!((relative_luminance(&color) - expected).abs() < 1e-12);
        let choice = contrast_text_color(&color);
        if expected > 0.5 {
            assert_eq!(choice, TextColor::Dark, "rgb({}, {}, {})", r, g, b);
        } else {
            assert_eq!(choice, TextColor::Light, "rgb({}, {}, {})", r, g, b);
        }
    }

    #[test]
    fn test_extremes() {
        assert_eq!(contrast_text_color(&Color::WHITE), TextColor::Dark);
        assert_eq!(contrast_text_color(&Color::BLACK), TextColor::Light);
        assert_eq!(contrast_text_color(&Color::rgb(255, 0, 0)), TextColor::Light);
        assert_eq!(contrast_text_color(&Color::rgb(255, 255, 0)), TextColor::Dark);
        assert!((relative_luminance(&Color::WHITE) - 1.0).abs() < 1e-9);
        assert_eq!(relative_luminance(&Color::BLACK), 0.0);
    }

    #[test]
    fn test_alpha_is_ignored() {
        let faded = Color::rgba(255, 255, 255, 10);
        assert_eq!(contrast_text_color(&faded), TextColor::Dark);
    }

    #[test]
    fn test_text_colors() {
        assert_eq!(TextColor::Dark.color(), Color::BLACK);
        assert_eq!(TextColor::Light.color().channels(), [240, 240, 240, 255]);
    }

    #[test]
    fn test_contrast_ratio() {
        let ratio = contrast_ratio(&Color::BLACK, &Color::WHITE);
        assert!((ratio - 21.0).abs() < 1e-9);
        assert_eq!(contrast_ratio(&Color::WHITE, &Color::BLACK), ratio);
        assert_eq!(contrast_ratio(&Color::rgb(1, 2, 3), &Color::rgb(1, 2, 3)), 1.0);
    }

    #[test]
    fn test_single_channel_sweeps() {
        for v in 0..=255u8 {
            check(v, 0, 0);
            check(0, v, 0);
            check(0, 0, v);
            check(v, v, v);
            check(v, 255, 255);
            check(255, v, 128);
        }
    }

    #[test]
    fn test_grid_sweep() {
        for r in (0..=255u8).step_by(5) {
            for g in (0..=255u8).step_by(5) {
                for b in (0..=255u8).step_by(15) {
                    check(r, g, b);
                }
            }
        }
    }

    #[test]
    fn test_threshold_neighbourhood() {
        // Grays straddle 0.5 between 187 and 188
        assert!(reference_luminance(187, 187, 187) < 0.5);
        assert!(reference_luminance(188, 188, 188) > 0.5);
        assert_eq!(contrast_text_color(&Color::rgb(187, 187, 187)), TextColor::Light);
        assert_eq!(contrast_text_color(&Color::rgb(188, 188, 188)), TextColor::Dark);
    }
}
