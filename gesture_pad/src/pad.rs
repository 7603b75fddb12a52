//! Virtual d-pad geometry and fingertip hit-testing.
//!
//! Four circular buttons around a fixed centre in the lower-left corner of
//! the window.  A fingertip within [`ACTIVATION_RADIUS`] of a button centre
//! presses that button; the nearest button wins if more than one is in
//! range (adjacent centres sit 56.6 px apart diagonally, so two buttons can
//! both be within 30 px of one point — the tie-break must be explicit).

use pad_link::Command;

// ════════════════════════════════════════════════════════════════════════════
// Layout constants
// ════════════════════════════════════════════════════════════════════════════

/// Distance from the pad centre to each button centre, in pixels.
pub const PAD_SPACING: f32 = 40.0;
/// Drawn button radius.
pub const BUTTON_RADIUS: i32 = 25;
/// A fingertip closer than this to a button centre presses it.
pub const ACTIVATION_RADIUS: f32 = 30.0;
/// Pad centre offset from the window's bottom-left corner.
pub const PAD_MARGIN_X: f32 = 100.0;
pub const PAD_MARGIN_Y: f32 = 100.0;

// ════════════════════════════════════════════════════════════════════════════
// PadButton
// ════════════════════════════════════════════════════════════════════════════

/// One of the four directional buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PadButton {
    Up,
    Down,
    Left,
    Right,
}

/// Fixed evaluation order; doubles as the priority order for exact distance
/// ties.
pub const ALL_BUTTONS: [PadButton; 4] = [
    PadButton::Up,
    PadButton::Down,
    PadButton::Left,
    PadButton::Right,
];

impl PadButton {
    /// The command this button publishes when pressed.
    pub fn command(self) -> Command {
        match self {
            PadButton::Up    => Command::Jump,
            PadButton::Down  => Command::Slide,
            PadButton::Left  => Command::Left,
            PadButton::Right => Command::Right,
        }
    }

    /// One-letter on-screen label.
    pub fn label(self) -> &'static str {
        match self {
            PadButton::Up    => "U",
            PadButton::Down  => "D",
            PadButton::Left  => "L",
            PadButton::Right => "R",
        }
    }

    /// Offset of this button's centre from the pad centre.
    pub fn offset(self) -> (f32, f32) {
        match self {
            PadButton::Up    => (0.0, -PAD_SPACING),
            PadButton::Down  => (0.0, PAD_SPACING),
            PadButton::Left  => (-PAD_SPACING, 0.0),
            PadButton::Right => (PAD_SPACING, 0.0),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DPad
// ════════════════════════════════════════════════════════════════════════════

/// The pad's placement within a window.
#[derive(Clone, Copy, Debug)]
pub struct DPad {
    pub cx: f32,
    pub cy: f32,
}

impl DPad {
    /// Anchor the pad in the bottom-left corner of a `win_w × win_h` window.
    pub fn anchored(_win_w: usize, win_h: usize) -> Self {
        DPad {
            cx: PAD_MARGIN_X,
            cy: win_h as f32 - PAD_MARGIN_Y,
        }
    }

    pub fn button_center(&self, button: PadButton) -> (f32, f32) {
        let (dx, dy) = button.offset();
        (self.cx + dx, self.cy + dy)
    }

    /// The button pressed by a fingertip at `(fx, fy)`, if any.
    ///
    /// Strictly-within-threshold, nearest-centre-wins.  Exact ties resolve
    /// in [`ALL_BUTTONS`] order.
    pub fn hit_test(&self, fx: f32, fy: f32) -> Option<PadButton> {
        let mut best: Option<(PadButton, f32)> = None;
        for button in ALL_BUTTONS {
            let (bx, by) = self.button_center(button);
            let dist = (fx - bx).hypot(fy - by);
            if dist < ACTIVATION_RADIUS && best.map_or(true, |(_, d)| dist < d) {
                best = Some((button, dist));
            }
        }
        best.map(|(b, _)| b)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> DPad {
        // Centre at (100, 100): Up (100,60)  Down (100,140)
        //                       Left (60,100) Right (140,100)
        DPad { cx: 100.0, cy: 100.0 }
    }

    #[test]
    fn anchored_bottom_left() {
        let p = DPad::anchored(640, 480);
        assert_eq!(p.cx, 100.0);
        assert_eq!(p.cy, 380.0);
    }

    #[test]
    fn far_fingertip_presses_nothing() {
        let p = pad();
        assert_eq!(p.hit_test(300.0, 300.0), None);
        assert_eq!(p.hit_test(0.0, 0.0), None);
    }

    #[test]
    fn each_button_centre_presses_itself() {
        let p = pad();
        for button in ALL_BUTTONS {
            let (bx, by) = p.button_center(button);
            assert_eq!(p.hit_test(bx, by), Some(button));
        }
    }

    #[test]
    fn button_commands() {
        assert_eq!(PadButton::Up.command(), Command::Jump);
        assert_eq!(PadButton::Down.command(), Command::Slide);
        assert_eq!(PadButton::Left.command(), Command::Left);
        assert_eq!(PadButton::Right.command(), Command::Right);
    }

    #[test]
    fn threshold_is_strict() {
        let p = pad();
        // Exactly 30 px right of the Right button: outside.
        assert_eq!(p.hit_test(170.0, 100.0), None);
        // 29 px: inside.
        assert_eq!(p.hit_test(169.0, 100.0), Some(PadButton::Right));
    }

    #[test]
    fn nearest_button_wins_in_overlap_lens() {
        let p = pad();
        // (121, 80): 29.0 px from Up, 27.6 px from Right — both in range.
        assert_eq!(p.hit_test(121.0, 80.0), Some(PadButton::Right));
        // Mirror point favouring Up.
        assert_eq!(p.hit_test(119.0, 80.0), Some(PadButton::Up));
    }

    #[test]
    fn exact_tie_resolves_by_declaration_order() {
        let p = pad();
        // (120, 80) is equidistant (28.28 px) from Up and Right.
        assert_eq!(p.hit_test(120.0, 80.0), Some(PadButton::Up));
    }
}
