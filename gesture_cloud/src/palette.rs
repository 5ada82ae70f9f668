//! Particle colours.
//!
//! Each template has a base hue; particles vary around it so the cloud
//! reads as a shimmer rather than a flat fill.  Fireworks spreads over the
//! whole wheel.

use shape_cloud::Template;

/// Base hue in degrees for each template.
pub fn template_hue(t: Template) -> f32 {
    match t {
        Template::Heart     => 340.0,  // rose
        Template::Flower    => 300.0,  // orchid
        Template::Saturn    =>  35.0,  // amber
        Template::Buddha    =>  48.0,  // gold
        Template::Fireworks =>   0.0,  // unused, full wheel
    }
}

/// Colour for particle `i` of `count` under `template`.
pub fn particle_color(template: Template, i: usize, count: usize) -> u32 {
    let frac = i as f32 / count.max(1) as f32;
    let hue = match template {
        Template::Fireworks => frac * 360.0,
        // ±25° around the base hue, spread by the golden ratio so neighbours differ
        t => template_hue(t) + ((i as f32 * 0.618_034) % 1.0 - 0.5) * 50.0,
    };
    hsv_to_argb(hue.rem_euclid(360.0), 0.72, 0.95)
}

/// Colours for a whole cloud.
pub fn palette_for(template: Template, count: usize) -> Vec<u32> {
    (0..count).map(|i| particle_color(template, i, count)).collect()
}

/// Convert HSV → packed ARGB (0xAARRGGBB, A=0xFF).
pub fn hsv_to_argb(h: f32, s: f32, v: f32) -> u32 {
    let h  = h % 360.0;
    let hi = (h / 60.0) as u32;
    let f  = h / 60.0 - hi as f32;
    let p  = v * (1.0 - s);
    let q  = v * (1.0 - s * f);
    let t  = v * (1.0 - s * (1.0 - f));
    let (r, g, b) = match hi {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let ri = (r * 255.0) as u32;
    let gi = (g * 255.0) as u32;
    let bi = (b * 255.0) as u32;
    0xFF000000 | (ri << 16) | (gi << 8) | bi
}

/// Scale an ARGB colour's brightness by `k` in `[0, 1]`.
pub fn dim(color: u32, k: f32) -> u32 {
    let k = k.clamp(0.0, 1.0);
    let ch = |shift: u32| (((color >> shift) & 0xFF) as f32 * k) as u32;
    0xFF000000 | (ch(16) << 16) | (ch(8) << 8) | ch(0)
}

/// Additive blend, saturating each channel.
pub fn add(a: u32, b: u32) -> u32 {
    let ch = |shift: u32| (((a >> shift) & 0xFF) + ((b >> shift) & 0xFF)).min(0xFF);
    0xFF000000 | (ch(16) << 16) | (ch(8) << 8) | ch(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_are_opaque() {
        for t in Template::ALL {
            for i in 0..50 {
                let c = particle_color(t, i, 50);
                assert_eq!(c >> 24, 0xFF, "{} particle {} not opaque", t, i);
            }
        }
    }

    #[test]
    fn templates_have_distinct_base_colors() {
        let heart = particle_color(Template::Heart, 0, 10);
        let saturn = particle_color(Template::Saturn, 0, 10);
        assert_ne!(heart, saturn);
    }

    #[test]
    fn palette_matches_count() {
        assert_eq!(palette_for(Template::Buddha, 123).len(), 123);
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_argb(0.0, 1.0, 1.0), 0xFFFF0000);
        assert_eq!(hsv_to_argb(120.0, 1.0, 1.0), 0xFF00FF00);
        assert_eq!(hsv_to_argb(240.0, 1.0, 1.0), 0xFF0000FF);
    }

    #[test]
    fn add_saturates() {
        assert_eq!(add(0xFFF00000, 0xFF200000), 0xFFFF0000);
        assert_eq!(add(0xFF010203, 0xFF010101), 0xFF020304);
    }

    #[test]
    fn dim_halves() {
        assert_eq!(dim(0xFF808080, 0.5), 0xFF404040);
        assert_eq!(dim(0xFFFFFFFF, 0.0), 0xFF000000);
    }
}
