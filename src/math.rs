//! Color math — direct HSV/RGB conversions without external dependencies.
//! HSV values are normalized f64 in 0.0–1.0, RGB channels are 8-bit.

/// HSV → normalized RGB. All values 0.0–1.0.
pub(crate) fn hsv_to_unit_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = h * 6.0;
    let sector = h6.floor();
    let f = h6 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as u32) % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// HSV → 8-bit RGB.
///
/// Channels are truncated, not rounded: `0.998 * 255` becomes 254. Existing
/// stored colors were produced this way, so the rounding mode is part of the
/// format. Each channel is clamped first so float noise can never reach 256.
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (u8, u8, u8) {
    let (r, g, b) = hsv_to_unit_rgb(h, s, v);
    (truncate_channel(r), truncate_channel(g), truncate_channel(b))
}

fn truncate_channel(unit: f64) -> u8 {
    (unit * 255.0).clamp(0.0, 255.0) as u8
}

/// 8-bit RGB → HSV. Returns (h, s, v), all 0.0–1.0.
///
/// Hue is 0 for grays, where it is undefined.
pub(crate) fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let (r, g, b) = (
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    );
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    if delta == 0.0 {
        return (0.0, 0.0, v);
    }
    let s = delta / max;

    let rc = (max - r) / delta;
    let gc = (max - g) / delta;
    let bc = (max - b) / delta;
    let h = if r == max {
        bc - gc
    } else if g == max {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };

    ((h / 6.0).rem_euclid(1.0), s, v)
}
