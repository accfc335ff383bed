//! Color math: range mapping and RGB/HSL conversion.
//!
//! Hue is in degrees (0.0–360.0), saturation and lightness in 0.0–1.0,
//! channels in 0–255.

/// Linearly map `value` from `[source_min, source_max]` onto
/// `[target_min, target_max]`. No clamping.
pub(crate) fn map(
    source_min: f64,
    source_max: f64,
    target_min: f64,
    target_max: f64,
    value: f64,
) -> f64 {
    (value - source_min) / (source_max - source_min) * (target_max - target_min) + target_min
}

/// Saturate `value` into `[0, max]`. NaN saturates to 0.
pub(crate) fn ensure_range(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, max)
}

/// Round to `digits` decimal places.
pub(crate) fn round_to(value: f64, digits: i32) -> f64 {
    let factor = 10f64.powi(digits);
    (value * factor).round() / factor
}

/// RGB (0–255) → HSL. Returns (h in degrees, s, l).
pub(crate) fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return (0.0, 0.0, l);
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (h, s.clamp(0.0, 1.0), l)
}

/// HSL → RGB (0–255). Hue in degrees, saturation and lightness 0.0–1.0.
pub(crate) fn hsl_to_rgb(h: f64, s: f64, l: f64) -> (u8, u8, u8) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h6 = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h6 % 2.0 - 1.0).abs());
    let m = l - c / 2.0;
    let (r, g, b) = match h6.floor() as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    (to_channel(r + m), to_channel(g + m), to_channel(b + m))
}

fn to_channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_scales_linearly() {
        assert_eq!(map(0.0, 60.0, 0.0, 255.0, 30.0), 127.5);
        assert_eq!(map(0.0, 360.0, 0.0, 1530.0, 360.0), 1530.0);
        assert_eq!(map(0.0, 255.0, 0.0, 250.0, 0.0), 0.0);
    }

    #[test]
    fn test_ensure_range() {
        assert_eq!(ensure_range(1000.0, 310.0), 310.0);
        assert_eq!(ensure_range(-5.0, 250.0), 0.0);
        assert_eq!(ensure_range(f64::NAN, 250.0), 0.0);
        assert_eq!(ensure_range(12.5, 250.0), 12.5);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(153.779527, 2), 153.78);
        assert_eq!(round_to(125.0, 2), 125.0);
    }

    #[test]
    fn test_rgb_to_hsl_primaries() {
        assert_eq!(rgb_to_hsl(255, 0, 0), (0.0, 1.0, 0.5));
        let (h, s, l) = rgb_to_hsl(0, 255, 0);
        assert_eq!((h, s, l), (120.0, 1.0, 0.5));
        let (h, _, _) = rgb_to_hsl(0, 0, 255);
        assert_eq!(h, 240.0);
    }

    #[test]
    fn test_rgb_to_hsl_gray_has_no_hue() {
        let (h, s, l) = rgb_to_hsl(128, 128, 128);
        assert_eq!(h, 0.0);
        assert_eq!(s, 0.0);
        assert!((l - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_hsl_round_trip() {
        for &(r, g, b) in &[(89, 74, 226), (255, 64, 129), (0, 200, 83), (12, 34, 56)] {
            let (h, s, l) = rgb_to_hsl(r, g, b);
            assert_eq!(hsl_to_rgb(h, s, l), (r, g, b));
        }
    }

    #[test]
    fn test_hsl_to_rgb_wraps_hue() {
        assert_eq!(hsl_to_rgb(360.0, 1.0, 0.5), (255, 0, 0));
        assert_eq!(hsl_to_rgb(-120.0, 1.0, 0.5), (0, 0, 255));
    }
}
