//! Software-rendered visualizer using `minifb`.
//!
//! Layout:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  TEMPLATE NAME                                   EXP [████ ] │
//! │                                                  ROT [ ◆   ] │
//! │                                                              │
//! │                 particle cloud, perspective                  │
//! │                 camera at z = 50 looking at the origin       │
//! │                                                              │
//! │  status bar                                                  │
//! │  key legend                                                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;

use cloud_morph::GestureState;
use log::warn;
use minifb::{Key, KeyRepeat, Window, WindowOptions};

use crate::gesture::{SimInput, SimKey};
use crate::palette;
use shape_cloud::Template;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

pub const WIN_W:      usize = 960;
pub const WIN_H:      usize = 720;
const STATUS_Y:       usize = WIN_H - 36;
const HUD_X:          usize = WIN_W - 150;
const HUD_BAR_W:      usize = 100;
const BG_COLOR:       u32   = 0xFF05050A;
const TEXT_BG:        u32   = 0xFF101828;
const HUD_COLOR:      u32   = 0xFF66CCFF;
const HAND_ON_COLOR:  u32   = 0xFF55FF88;
const HAND_OFF_COLOR: u32   = 0xFF666666;

/// Camera distance from the origin along +z.
pub const CAMERA_Z:   f32 = 50.0;
/// Vertical field of view in degrees.
pub const FOV_DEG:    f32 = 75.0;
const NEAR:           f32 = 0.1;
const KEY_LEGEND: &str =
    "UP/DOWN=expand  LEFT/RIGHT=rotate  H=hand  1-5=shape  SPACE=next  Q=quit";

/// Particles closer than this get a 2×2 splat.
const NEAR_SPLAT:     f32 = 35.0;

/// Project a world-space point onto a `w × h` screen.
///
/// Returns pixel coordinates and the view depth, or `None` when the point is
/// behind the camera or off-screen.
pub fn project(p: [f32; 3], w: usize, h: usize) -> Option<(usize, usize, f32)> {
    let depth = CAMERA_Z - p[2];
    if depth <= NEAR {
        return None;
    }
    let focal = (h as f32 * 0.5) / (FOV_DEG.to_radians() * 0.5).tan();
    let sx = w as f32 * 0.5 + p[0] * focal / depth;
    let sy = h as f32 * 0.5 - p[1] * focal / depth;
    if sx < 0.0 || sy < 0.0 || sx >= w as f32 || sy >= h as f32 {
        return None;
    }
    Some((sx as usize, sy as usize, depth))
}

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window: Window,
    buf:    Vec<u32>,
    sim_tx: Sender<SimInput>,
}

impl Visualizer {
    pub fn new(sim_tx: Sender<SimInput>) -> Result<Self, String> {
        let mut window = Window::new(
            "Gesture Cloud",
            WIN_W, WIN_H,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        ).map_err(|e| e.to_string())?;

        window.limit_update_rate(Some(std::time::Duration::from_millis(16))); // ~60fps

        Ok(Visualizer {
            window,
            buf: vec![BG_COLOR; WIN_W * WIN_H],
            sim_tx,
        })
    }

    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Poll keyboard inputs and translate to SimInput events.
    ///
    /// Returns false when the window should close.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        let send = |input: SimInput| { let _ = self.sim_tx.send(input); };
        let one_shot = |k: Key| self.window.is_key_pressed(k, KeyRepeat::No);
        let held     = |k: Key| self.window.is_key_pressed(k, KeyRepeat::Yes);
        let released = |k: Key| self.window.is_key_released(k);

        if one_shot(Key::Q) || one_shot(Key::Escape) {
            send(SimInput::KeyDown(SimKey::Quit));
            return false;
        }

        if held(Key::Up)   { send(SimInput::KeyDown(SimKey::Expand)); }
        if held(Key::Down) { send(SimInput::KeyDown(SimKey::Contract)); }

        // Rotation holds while the arrow is down.
        if one_shot(Key::Left)  { send(SimInput::KeyDown(SimKey::RotateLeft)); }
        if released(Key::Left)  { send(SimInput::KeyUp(SimKey::RotateLeft)); }
        if one_shot(Key::Right) { send(SimInput::KeyDown(SimKey::RotateRight)); }
        if released(Key::Right) { send(SimInput::KeyUp(SimKey::RotateRight)); }

        if one_shot(Key::H)     { send(SimInput::KeyDown(SimKey::ToggleHand)); }
        if one_shot(Key::Space) { send(SimInput::KeyDown(SimKey::NextTemplate)); }

        let digits = [Key::Key1, Key::Key2, Key::Key3, Key::Key4, Key::Key5];
        for (key, t) in digits.iter().zip(Template::ALL) {
            if one_shot(*key) {
                send(SimInput::KeyDown(SimKey::Template(t)));
            }
        }

        true
    }

    /// Render one frame.
    pub fn render<I>(
        &mut self,
        points:   I,
        colors:   &[u32],
        template: Template,
        gesture:  &GestureState,
        status:   &str,
    ) where
        I: IntoIterator<Item = [f32; 3]>,
    {
        self.buf.fill(BG_COLOR);

        // ── Particles ─────────────────────────────────────────────────────
        for (p, &color) in points.into_iter().zip(colors) {
            if let Some((x, y, depth)) = project(p, WIN_W, WIN_H) {
                // Fade with distance: full at the origin plane, dim far back.
                let k = (CAMERA_Z / depth).clamp(0.25, 1.0) * 0.6;
                let c = palette::dim(color, k);
                self.add_pixel(x, y, c);
                if depth < NEAR_SPLAT {
                    self.add_pixel(x + 1, y, c);
                    self.add_pixel(x, y + 1, c);
                    self.add_pixel(x + 1, y + 1, c);
                }
            }
        }

        // ── HUD ───────────────────────────────────────────────────────────
        self.draw_label(template.name(), 10, 10, palette::particle_color(template, 0, 1));
        self.draw_hud(gesture);

        // ── Status bar ────────────────────────────────────────────────────
        self.fill_rect(0, STATUS_Y, WIN_W, WIN_H - STATUS_Y, TEXT_BG);
        self.draw_label(status, 10, STATUS_Y + 8, 0xFFEEEEEE);
        self.draw_label(KEY_LEGEND, 10, WIN_H - 12, 0xFF888888);

        if let Err(e) = self.window.update_with_buffer(&self.buf, WIN_W, WIN_H) {
            warn!("window update failed: {}", e);
        }
    }

    // ── Gesture HUD ───────────────────────────────────────────────────────

    fn draw_hud(&mut self, g: &GestureState) {
        let x = HUD_X;

        self.draw_label("EXP", x, 10, HUD_COLOR);
        self.draw_border(x + 16, 8, HUD_BAR_W, 9, HUD_COLOR);
        let filled = (g.expansion.clamp(0.0, 1.0) * (HUD_BAR_W - 4) as f32) as usize;
        self.fill_rect(x + 18, 10, filled, 5, HUD_COLOR);

        self.draw_label("ROT", x, 24, HUD_COLOR);
        self.draw_border(x + 16, 22, HUD_BAR_W, 9, HUD_COLOR);
        let centre = x + 16 + HUD_BAR_W / 2;
        let offset = (g.rotation.clamp(-1.0, 1.0) * (HUD_BAR_W / 2 - 4) as f32) as isize;
        let marker = (centre as isize + offset).max(0) as usize;
        self.fill_rect(marker.saturating_sub(1), 24, 3, 5, HUD_COLOR);

        let (label, color) = if g.is_detected {
            ("HAND", HAND_ON_COLOR)
        } else {
            ("NO HAND", HAND_OFF_COLOR)
        };
        self.draw_label(label, x, 38, color);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn add_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            let i = y * WIN_W + x;
            self.buf[i] = palette::add(self.buf[i], color);
        }
    }

    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if x >= WIN_W { return; }
        let x1 = (x + w).min(WIN_W);
        for row in y..(y + h).min(WIN_H) {
            self.buf[row * WIN_W + x..row * WIN_W + x1].fill(color);
        }
    }

    fn draw_border(&mut self, x: usize, y: usize, w: usize, h: usize, color: u32) {
        if w == 0 || h == 0 { return; }
        for col in x..(x+w).min(WIN_W) {
            self.set_pixel(col, y, color);
            self.set_pixel(col, y + h - 1, color);
        }
        for row in y..(y+h).min(WIN_H) {
            self.set_pixel(x, row, color);
            self.set_pixel(x + w - 1, row, color);
        }
    }

    fn set_pixel(&mut self, x: usize, y: usize, color: u32) {
        if x < WIN_W && y < WIN_H {
            self.buf[y * WIN_W + x] = color;
        }
    }

    /// 3×5 bitmap text, one column gap between characters.
    fn draw_label(&mut self, text: &str, x: usize, y: usize, color: u32) {
        for (n, ch) in text.chars().enumerate() {
            let cx = x + n * 4;
            if cx + 3 > WIN_W { break; }
            let glyph = char_glyph(ch).unwrap_or(UNKNOWN_GLYPH);
            for (row, bits) in glyph.into_iter().enumerate() {
                (0..3usize)
                    .filter(|col| bits & (0b100 >> col) != 0)
                    .for_each(|col| self.set_pixel(cx + col, y + row, color));
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Minimal 3×5 bitmap font
// ────────────────────────────────────────────────────────────────────────────

/// Drawn for characters the font lacks.
const UNKNOWN_GLYPH: [u8; 5] = [0b000, 0b000, 0b010, 0b000, 0b000];

fn char_glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' | 'A' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'b' | 'B' => [0b110, 0b101, 0b110, 0b101, 0b110],
        'c' | 'C' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'd' | 'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'e' | 'E' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'f' | 'F' => [0b111, 0b100, 0b111, 0b100, 0b100],
        'g' | 'G' => [0b111, 0b100, 0b101, 0b101, 0b111],
        'h' | 'H' => [0b101, 0b101, 0b111, 0b101, 0b101],
        'i' | 'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'j' | 'J' => [0b001, 0b001, 0b001, 0b101, 0b111],
        'k' | 'K' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'l' | 'L' => [0b100, 0b100, 0b100, 0b100, 0b111],
        'm' | 'M' => [0b101, 0b111, 0b101, 0b101, 0b101],
        'n' | 'N' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' | 'O' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' | 'P' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'q' | 'Q' => [0b111, 0b101, 0b101, 0b111, 0b001],
        'r' | 'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' | 'S' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' | 'T' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' | 'U' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'v' | 'V' => [0b101, 0b101, 0b101, 0b010, 0b010],
        'w' | 'W' => [0b101, 0b101, 0b101, 0b111, 0b101],
        'x' | 'X' => [0b101, 0b101, 0b010, 0b101, 0b101],
        'y' | 'Y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        'z' | 'Z' => [0b111, 0b001, 0b010, 0b100, 0b111],
        '/' => [0b001, 0b001, 0b010, 0b100, 0b100],
        '-' => [0b000, 0b000, 0b111, 0b000, 0b000],
        '.' => [0b000, 0b000, 0b000, 0b000, 0b010],
        ',' => [0b000, 0b000, 0b000, 0b010, 0b100],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        '=' => [0b000, 0b111, 0b000, 0b111, 0b000],
        '+' => [0b000, 0b010, 0b111, 0b010, 0b000],
        ' ' => [0b000, 0b000, 0b000, 0b000, 0b000],
        _   => return None,
    };
    Some(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_screen_text_is_fully_covered_by_the_font() {
        let mut texts = vec![KEY_LEGEND, "EXP", "ROT", "HAND", "NO HAND",
                             "Heart x 15000  converging  dev 12.34  scale 1.00  hand yes"];
        texts.extend(Template::ALL.iter().map(|t| t.name()));
        for text in texts {
            for ch in text.chars() {
                assert!(char_glyph(ch).is_some(), "no glyph for {:?} in {:?}", ch, text);
            }
        }
    }

    #[test]
    fn origin_projects_to_screen_centre() {
        let (x, y, depth) = project([0.0, 0.0, 0.0], 800, 600).unwrap();
        assert_eq!((x, y), (400, 300));
        assert_eq!(depth, CAMERA_Z);
    }

    #[test]
    fn up_is_up_and_right_is_right() {
        let (x, y, _) = project([5.0, 5.0, 0.0], 800, 600).unwrap();
        assert!(x > 400);
        assert!(y < 300);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        assert!(project([0.0, 0.0, CAMERA_Z + 1.0], 800, 600).is_none());
        assert!(project([0.0, 0.0, CAMERA_Z], 800, 600).is_none());
    }

    #[test]
    fn off_screen_points_are_culled() {
        assert!(project([1000.0, 0.0, 0.0], 800, 600).is_none());
    }

    #[test]
    fn nearer_points_spread_further_from_centre() {
        let (far_x, _, _)  = project([5.0, 0.0, -20.0], 800, 600).unwrap();
        let (near_x, _, _) = project([5.0, 0.0,  20.0], 800, 600).unwrap();
        assert!(near_x > far_x);
    }

    #[test]
    fn unscaled_fireworks_radius_is_on_screen() {
        for p in [[20.0, 0.0, 0.0], [0.0, 20.0, 0.0], [-20.0, -20.0, 0.0]] {
            assert!(project(p, WIN_W, WIN_H).is_some(), "{:?}", p);
        }
    }

    #[test]
    fn fully_expanded_cloud_is_clipped_at_the_camera() {
        // Scale 3.5 pushes a radius-20 burst to z = ±70, past the camera.
        let scaled = |p: [f32; 3]| [p[0] * 3.5, p[1] * 3.5, p[2] * 3.5];
        assert!(project(scaled([0.0, 0.0, 20.0]), WIN_W, WIN_H).is_none());
        assert!(project(scaled([0.0, 0.0, 15.0]), WIN_W, WIN_H).is_none());
        // Far side stays visible, shrunk toward the centre.
        let (x, y, depth) = project(scaled([0.0, 0.0, -20.0]), WIN_W, WIN_H).unwrap();
        assert_eq!((x, y), (WIN_W / 2, WIN_H / 2));
        assert_eq!(depth, 120.0);
    }
}
