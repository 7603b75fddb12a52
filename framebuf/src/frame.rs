//! The ARGB pixel buffer and its drawing helpers.

use crate::font;
use crate::rect::Rect;

/// Alpha-blend two ARGB colors.  `t` = 0.0 → all `a`, `t` = 1.0 → all `b`.
pub fn blend(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |ca: u32, cb: u32| (ca as f32 * (1.0 - t) + cb as f32 * t) as u32;
    let ar = (a >> 16) & 0xFF; let br = (b >> 16) & 0xFF;
    let ag = (a >>  8) & 0xFF; let bg = (b >>  8) & 0xFF;
    let ab =  a        & 0xFF; let bb =  b        & 0xFF;
    0xFF000000 | (lerp(ar, br) << 16) | (lerp(ag, bg) << 8) | lerp(ab, bb)
}

// ════════════════════════════════════════════════════════════════════════════
// Frame
// ════════════════════════════════════════════════════════════════════════════

/// An owned `w × h` ARGB buffer.  All drawing clips to the buffer bounds, so
/// callers may pass coordinates that hang off any edge.
pub struct Frame {
    pub buf: Vec<u32>,
    pub w:   usize,
    pub h:   usize,
}

impl Frame {
    pub fn new(w: usize, h: usize, fill: u32) -> Self {
        Frame { buf: vec![fill; w * h], w, h }
    }

    pub fn clear(&mut self, color: u32) {
        self.buf.fill(color);
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.buf[y as usize * self.w + x as usize] = color;
        }
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> u32 {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.buf[y as usize * self.w + x as usize]
        } else {
            0
        }
    }

    // ── rects ─────────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, r: Rect, color: u32) {
        let x0 = r.x.max(0) as usize;
        let y0 = r.y.max(0) as usize;
        let x1 = r.right().clamp(0, self.w as i32) as usize;
        let y1 = r.bottom().clamp(0, self.h as i32) as usize;
        for row in y0..y1 {
            for col in x0..x1 {
                self.buf[row * self.w + col] = color;
            }
        }
    }

    pub fn draw_border(&mut self, r: Rect, color: u32) {
        for col in r.x..r.right() {
            self.set_pixel(col, r.y, color);
            self.set_pixel(col, r.bottom() - 1, color);
        }
        for row in r.y..r.bottom() {
            self.set_pixel(r.x, row, color);
            self.set_pixel(r.right() - 1, row, color);
        }
    }

    // ── circles ───────────────────────────────────────────────────────────

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u32) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Circle blended over whatever is already in the buffer — used for the
    /// semi-transparent pad buttons.  `alpha` 0.0 leaves the background,
    /// 1.0 paints the color solid.
    pub fn blend_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u32, alpha: f32) {
        let r2 = radius * radius;
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= r2 {
                    let under = self.get_pixel(cx + dx, cy + dy);
                    self.set_pixel(cx + dx, cy + dy, blend(under, color, alpha));
                }
            }
        }
    }

    // ── sprite blit ───────────────────────────────────────────────────────

    /// Nearest-neighbour blit of an ARGB sprite into `dst`, stretching or
    /// squashing as needed (a sliding runner draws squashed).  Pixels with a
    /// zero alpha byte are skipped.
    pub fn blit_scaled(&mut self, src: &[u32], src_w: usize, src_h: usize, dst: Rect) {
        if src_w == 0 || src_h == 0 || dst.w <= 0 || dst.h <= 0 {
            return;
        }
        for dy in 0..dst.h {
            let sy = (dy as usize * src_h) / dst.h as usize;
            for dx in 0..dst.w {
                let sx = (dx as usize * src_w) / dst.w as usize;
                let px = src[sy * src_w + sx];
                if px >> 24 != 0 {
                    self.set_pixel(dst.x + dx, dst.y + dy, px);
                }
            }
        }
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Draw `text` with the 3×5 bitmap font at integer `scale`.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u32, scale: i32) {
        let scale = scale.max(1);
        let mut cx = x;
        for ch in text.chars() {
            let g = font::glyph(ch);
            for (row, &bits) in g.iter().enumerate() {
                for col in 0..3i32 {
                    if bits & (1 << (2 - col)) != 0 {
                        let r = Rect::new(
                            cx + col * scale,
                            y + row as i32 * scale,
                            scale,
                            scale,
                        );
                        self.fill_rect(r, color);
                    }
                }
            }
            cx += font::CHAR_W as i32 * scale;
            if cx >= self.w as i32 {
                break;
            }
        }
    }

    /// Scale-1 convenience used for status lines and legends.
    pub fn draw_label(&mut self, text: &str, x: i32, y: i32, color: u32) {
        self.draw_text(text, x, y, color, 1);
    }

    /// Pixel width of `text` at `scale`, for centring.
    pub fn text_width(text: &str, scale: i32) -> i32 {
        text.chars().count() as i32 * font::CHAR_W as i32 * scale.max(1)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_rect_clips_to_bounds() {
        let mut f = Frame::new(10, 10, 0xFF000000);
        f.fill_rect(Rect::new(-5, -5, 8, 8), 0xFFFFFFFF);
        assert_eq!(f.get_pixel(0, 0), 0xFFFFFFFF);
        assert_eq!(f.get_pixel(3, 3), 0xFF000000);
    }

    #[test]
    fn set_pixel_out_of_bounds_is_ignored() {
        let mut f = Frame::new(4, 4, 0);
        f.set_pixel(-1, 0, 0xFFFFFFFF);
        f.set_pixel(4, 4, 0xFFFFFFFF);
        assert!(f.buf.iter().all(|&p| p == 0));
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(0xFF102030, 0xFFFFFFFF, 0.0), 0xFF102030);
        assert_eq!(blend(0xFF102030, 0xFFFFFFFF, 1.0), 0xFFFFFFFF);
    }

    #[test]
    fn blend_midpoint_is_between() {
        let mid = blend(0xFF000000, 0xFF0000FF, 0.5);
        let b = mid & 0xFF;
        assert!(b > 0x60 && b < 0xA0, "blue channel {:#x}", b);
    }

    #[test]
    fn circle_covers_centre_not_corner() {
        let mut f = Frame::new(20, 20, 0);
        f.fill_circle(10, 10, 5, 0xFFFF0000);
        assert_eq!(f.get_pixel(10, 10), 0xFFFF0000);
        assert_eq!(f.get_pixel(0, 0), 0);
    }

    #[test]
    fn blit_skips_transparent_pixels() {
        let mut f = Frame::new(4, 4, 0xFF111111);
        let sprite = [0x00000000u32, 0xFFAABBCC, 0x00000000, 0xFFAABBCC];
        f.blit_scaled(&sprite, 2, 2, Rect::new(0, 0, 2, 2));
        assert_eq!(f.get_pixel(0, 0), 0xFF111111);
        assert_eq!(f.get_pixel(1, 0), 0xFFAABBCC);
    }

    #[test]
    fn blit_squashes_vertically() {
        let mut f = Frame::new(4, 4, 0);
        let sprite = vec![0xFFFFFFFFu32; 16]; // 4×4 solid
        f.blit_scaled(&sprite, 4, 4, Rect::new(0, 0, 4, 2));
        assert_eq!(f.get_pixel(0, 1), 0xFFFFFFFF);
        assert_eq!(f.get_pixel(0, 2), 0);
    }

    #[test]
    fn text_renders_ink() {
        let mut f = Frame::new(40, 10, 0);
        f.draw_label("SCORE", 0, 0, 0xFFFFFFFF);
        assert!(f.buf.iter().any(|&p| p == 0xFFFFFFFF));
    }

    #[test]
    fn text_width_scales() {
        assert_eq!(Frame::text_width("AB", 1), 8);
        assert_eq!(Frame::text_width("AB", 3), 24);
    }
}
