//! Hue along the spiral and HSB to RGB conversion (all channels on a 0-255 scale).

/// Hue for a normalized spiral position `t`, starting at `color_offset` and
/// traversing the whole hue circle once from the inside to the outside.
///
/// Stays in `[0, 255)` for `t` in `[0, 1]`.
pub fn spiral_hue(color_offset: u8, t: f32) -> f32 {
    (color_offset as f32 + t * 255.0).rem_euclid(255.0)
}

/// Convert hue, saturation and brightness (each 0-255) to linear RGB in `[0, 1]`
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> [f32; 3] {
    let h = (hue / 255.0).rem_euclid(1.0) * 6.0;
    let s = (saturation / 255.0).clamp(0.0, 1.0);
    let v = (brightness / 255.0).clamp(0.0, 1.0);

    let c = v * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let m = v - c;

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
