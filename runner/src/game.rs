//! The per-frame game state machine.
//!
//! One [`GameState::step`] call per rendered frame, evaluated in a fixed
//! order: input, jump arc, slide, animation, obstacle spawn, obstacle
//! advance + collision, cleanup, score, game-over hold.  The caller owns
//! the high score and the reset.

use std::time::{Duration, Instant};

use framebuf::Rect;
use pad_link::Command;

// ════════════════════════════════════════════════════════════════════════════
// Tuning constants
// ════════════════════════════════════════════════════════════════════════════

pub const PLAY_W: i32 = 400;
pub const PLAY_H: i32 = 600;

pub const PLAYER_SIZE:    i32 = 40;
pub const PLAYER_START_X: i32 = 180;
pub const PLAYER_Y:       i32 = 500;
/// Horizontal step per LEFT/RIGHT command.
pub const STEP_X: i32 = 20;
/// Rightmost player x (player stays fully on the playfield).
pub const MAX_X: i32 = PLAY_W - PLAYER_SIZE;

pub const JUMP_HEIGHT:   f32 = 180.0;
pub const JUMP_DURATION: u32 = 20;

pub const SLIDE_FRAMES: u32 = 10;
/// Height lost while crouching.
pub const SLIDE_CROUCH: i32 = 20;

pub const OBSTACLE_W:     i32 = 10;
pub const OBSTACLE_H:     i32 = 15;
pub const OBSTACLE_SPEED: i32 = 5;
pub const OBSTACLE_Y:     i32 = PLAY_H - OBSTACLE_H - 50;
/// Frames between obstacle spawns.
pub const SPAWN_INTERVAL: u32 = 100;

/// One score point per this many frames survived.
pub const SCORE_EVERY: u32 = 5;
/// Wall-clock pause between collision and reset.
pub const GAME_OVER_HOLD: Duration = Duration::from_secs(2);

// ════════════════════════════════════════════════════════════════════════════
// Jump easing
// ════════════════════════════════════════════════════════════════════════════

/// Vertical offset of the jump arc at `progress` frames in: zero at both
/// ends, `-JUMP_HEIGHT` at the midpoint.
pub fn jump_offset_at(progress: u32) -> i32 {
    let t = progress as f32 / JUMP_DURATION as f32;
    (-JUMP_HEIGHT * (1.0 - 4.0 * (t - 0.5) * (t - 0.5))) as i32
}

// ════════════════════════════════════════════════════════════════════════════
// StepOutcome
// ════════════════════════════════════════════════════════════════════════════

/// What the caller must react to after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Running,
    /// The player just hit an obstacle.  `final_score` is the score at the
    /// moment of collision — this is the value the high score settles
    /// against.
    RoundOver { final_score: u32 },
    /// The game-over hold has elapsed; build a fresh `GameState`.
    ResetDue,
}

// ════════════════════════════════════════════════════════════════════════════
// GameState
// ════════════════════════════════════════════════════════════════════════════

/// Everything that lives for exactly one round.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player:         Rect,
    pub is_jumping:     bool,
    pub jump_progress:  u32,
    pub is_sliding:     bool,
    pub slide_progress: u32,
    pub obstacles:      Vec<Rect>,
    pub spawn_timer:    u32,
    pub frame_index:    usize,
    pub score:          u32,
    pub frame_count:    u32,
    pub game_over:      bool,
    pub game_over_at:   Option<Instant>,
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            player:         Rect::new(PLAYER_START_X, PLAYER_Y, PLAYER_SIZE, PLAYER_SIZE),
            is_jumping:     false,
            jump_progress:  0,
            is_sliding:     false,
            slide_progress: 0,
            obstacles:      Vec::new(),
            spawn_timer:    0,
            frame_index:    0,
            score:          0,
            frame_count:    0,
            game_over:      false,
            game_over_at:   None,
        }
    }

    // ── derived per-frame geometry ───────────────────────────────────────

    /// Current vertical jump offset (negative while airborne).
    pub fn jump_offset(&self) -> i32 {
        if self.is_jumping && self.jump_progress < JUMP_DURATION {
            jump_offset_at(self.jump_progress)
        } else {
            0
        }
    }

    /// Current crouch amount (height lost while sliding).
    pub fn slide_crouch(&self) -> i32 {
        if self.is_sliding && self.slide_progress < SLIDE_FRAMES {
            SLIDE_CROUCH
        } else {
            0
        }
    }

    /// The jump/slide-adjusted bounding rectangle — what collides and what
    /// gets drawn.
    pub fn hitbox(&self) -> Rect {
        Rect::new(
            self.player.x,
            self.player.y + self.jump_offset(),
            PLAYER_SIZE,
            PLAYER_SIZE - self.slide_crouch(),
        )
    }

    // ── input ────────────────────────────────────────────────────────────

    /// Map one command to at most one action.  Jump/slide requests are
    /// ignored while already in progress; movement clamps to the playfield.
    pub fn apply(&mut self, cmd: Command) {
        match cmd {
            Command::Left if self.player.x > 0 => {
                self.player.x = (self.player.x - STEP_X).max(0);
            }
            Command::Right if self.player.x < MAX_X => {
                self.player.x = (self.player.x + STEP_X).min(MAX_X);
            }
            Command::Jump if !self.is_jumping => {
                self.is_jumping = true;
                self.jump_progress = 0;
            }
            Command::Slide if !self.is_sliding => {
                self.is_sliding = true;
                self.slide_progress = 0;
            }
            _ => {}
        }
    }

    // ── one frame ────────────────────────────────────────────────────────

    /// Advance the round by one frame.
    ///
    /// `sprite_frames` is the run-cycle length the animation index wraps
    /// at; `now` timestamps a collision and drives the game-over hold.
    pub fn step(&mut self, cmd: Command, sprite_frames: usize, now: Instant) -> StepOutcome {
        // 9. Game-over hold: gameplay is frozen until the hold elapses.
        if self.game_over {
            let elapsed = self
                .game_over_at
                .map_or(Duration::ZERO, |at| now.duration_since(at));
            return if elapsed >= GAME_OVER_HOLD {
                StepOutcome::ResetDue
            } else {
                StepOutcome::Running
            };
        }

        // 1. Input.
        self.apply(cmd);

        // The rectangle this frame collides with, before counters advance.
        let hitbox = self.hitbox();

        // 2. Jump arc: ends exactly when progress reaches the duration.
        if self.is_jumping {
            if self.jump_progress < JUMP_DURATION {
                self.jump_progress += 1;
            } else {
                self.is_jumping = false;
            }
        }

        // 3. Slide.
        if self.is_sliding {
            if self.slide_progress < SLIDE_FRAMES {
                self.slide_progress += 1;
            } else {
                self.is_sliding = false;
            }
        }

        // 4. Animation.
        if sprite_frames > 0 {
            self.frame_index = (self.frame_index + 1) % sprite_frames;
        }

        // 5. Obstacle spawn.
        self.spawn_timer += 1;
        if self.spawn_timer >= SPAWN_INTERVAL {
            self.obstacles
                .push(Rect::new(PLAY_W, OBSTACLE_Y, OBSTACLE_W, OBSTACLE_H));
            self.spawn_timer = 0;
        }

        // 6. Obstacle advance & collision.
        let mut outcome = StepOutcome::Running;
        for obs in &mut self.obstacles {
            obs.x -= OBSTACLE_SPEED;
        }
        if self.obstacles.iter().any(|obs| hitbox.intersects(obs)) {
            self.game_over = true;
            self.game_over_at = Some(now);
            outcome = StepOutcome::RoundOver {
                final_score: self.score,
            };
        }

        // 7. Cleanup: obstacles fully past the left edge.
        self.obstacles.retain(|obs| obs.x > -OBSTACLE_W);

        // 8. Score: survival time, one point per SCORE_EVERY frames.  The
        // collision frame still counts; the high score settled against
        // `final_score` above, the snapshot at the moment of game-over.
        self.frame_count += 1;
        if self.frame_count % SCORE_EVERY == 0 {
            self.score += 1;
        }

        outcome
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SPRITES: usize = 4;

    fn now() -> Instant {
        Instant::now()
    }

    fn step_none(state: &mut GameState) -> StepOutcome {
        state.step(Command::None, NO_SPRITES, now())
    }

    // ── fresh state ──────────────────────────────────────────────────────

    #[test]
    fn fresh_state() {
        let s = GameState::new();
        assert_eq!(s.player, Rect::new(180, 500, 40, 40));
        assert!(!s.is_jumping && !s.is_sliding && !s.game_over);
        assert!(s.obstacles.is_empty());
        assert_eq!(s.score, 0);
        assert_eq!(s.hitbox(), s.player);
    }

    // ── movement bounds ──────────────────────────────────────────────────

    #[test]
    fn left_right_steps_by_twenty() {
        let mut s = GameState::new();
        s.step(Command::Left, NO_SPRITES, now());
        assert_eq!(s.player.x, 160);
        s.step(Command::Right, NO_SPRITES, now());
        assert_eq!(s.player.x, 180);
    }

    #[test]
    fn player_never_leaves_playfield() {
        let mut s = GameState::new();
        for _ in 0..30 {
            s.step(Command::Left, NO_SPRITES, now());
            assert!(s.player.x >= 0);
        }
        assert_eq!(s.player.x, 0);

        for _ in 0..30 {
            s.step(Command::Right, NO_SPRITES, now());
            assert!(s.player.x <= MAX_X);
        }
        assert_eq!(s.player.x, MAX_X);
    }

    // ── jump arc ─────────────────────────────────────────────────────────

    #[test]
    fn jump_offset_curve_endpoints_and_peak() {
        assert_eq!(jump_offset_at(0), 0);
        assert_eq!(jump_offset_at(JUMP_DURATION), 0);
        assert_eq!(jump_offset_at(JUMP_DURATION / 2), -(JUMP_HEIGHT as i32));
        // Strictly below ground mid-flight, peak is the minimum.
        for p in 1..JUMP_DURATION {
            assert!(jump_offset_at(p) < 0, "progress {}", p);
            assert!(jump_offset_at(p) >= -(JUMP_HEIGHT as i32));
        }
    }

    #[test]
    fn jump_progress_is_monotone_and_ends_at_duration() {
        let mut s = GameState::new();
        s.step(Command::Jump, NO_SPRITES, now());
        assert!(s.is_jumping);

        let mut last = s.jump_progress;
        let mut frames = 0;
        while s.is_jumping {
            step_none(&mut s);
            assert!(s.jump_progress >= last);
            last = s.jump_progress;
            frames += 1;
            assert!(frames < 50, "jump never ended");
        }
        assert_eq!(s.jump_progress, JUMP_DURATION);
        assert_eq!(s.jump_offset(), 0);
        // Ground position untouched; the arc is a render/collision offset.
        assert_eq!(s.player.y, PLAYER_Y);
    }

    #[test]
    fn jump_command_ignored_while_airborne() {
        let mut s = GameState::new();
        s.step(Command::Jump, NO_SPRITES, now());
        let before = s.jump_progress;
        s.step(Command::Jump, NO_SPRITES, now());
        assert_eq!(s.jump_progress, before + 1, "second JUMP must not restart the arc");
    }

    // ── slide ────────────────────────────────────────────────────────────

    #[test]
    fn slide_crouches_then_restores_height() {
        let mut s = GameState::new();
        s.step(Command::Slide, NO_SPRITES, now());
        assert!(s.is_sliding);
        assert_eq!(s.hitbox().h, PLAYER_SIZE - SLIDE_CROUCH);

        for _ in 0..SLIDE_FRAMES + 1 {
            step_none(&mut s);
        }
        assert!(!s.is_sliding);
        assert_eq!(s.hitbox().h, PLAYER_SIZE);
    }

    #[test]
    fn slide_command_ignored_while_sliding() {
        let mut s = GameState::new();
        s.step(Command::Slide, NO_SPRITES, now());
        let before = s.slide_progress;
        s.step(Command::Slide, NO_SPRITES, now());
        assert_eq!(s.slide_progress, before + 1);
    }

    // ── scenario: RIGHT, RIGHT, JUMP ─────────────────────────────────────

    #[test]
    fn right_right_jump_scenario() {
        let mut s = GameState::new();
        s.step(Command::Right, NO_SPRITES, now());
        s.step(Command::Right, NO_SPRITES, now());
        assert_eq!(s.player.x, PLAYER_START_X + 2 * STEP_X);

        s.step(Command::Jump, NO_SPRITES, now());
        let mut peak = 0;
        let mut peak_progress = 0;
        while s.is_jumping {
            let off = s.jump_offset();
            if off < peak {
                peak = off;
                peak_progress = s.jump_progress;
            }
            step_none(&mut s);
        }
        assert_eq!(peak, -(JUMP_HEIGHT as i32));
        assert_eq!(peak_progress, JUMP_DURATION / 2);
        assert_eq!(s.hitbox().y, PLAYER_Y); // back to baseline
    }

    // ── animation ────────────────────────────────────────────────────────

    #[test]
    fn animation_index_wraps() {
        let mut s = GameState::new();
        for _ in 0..NO_SPRITES + 1 {
            step_none(&mut s);
        }
        assert_eq!(s.frame_index, 1);
    }

    // ── obstacles ────────────────────────────────────────────────────────

    #[test]
    fn obstacle_spawns_at_interval() {
        let mut s = GameState::new();
        for _ in 0..SPAWN_INTERVAL - 1 {
            step_none(&mut s);
        }
        assert!(s.obstacles.is_empty());

        step_none(&mut s);
        assert_eq!(s.obstacles.len(), 1);
        assert_eq!(s.spawn_timer, 0);
        // Spawned at the right edge, already advanced once this frame.
        assert_eq!(s.obstacles[0], Rect::new(PLAY_W - OBSTACLE_SPEED, OBSTACLE_Y, OBSTACLE_W, OBSTACLE_H));
    }

    #[test]
    fn obstacles_scroll_left_and_get_culled() {
        let mut s = GameState::new();
        s.player.x = MAX_X; // keep the player clear of the strip
        s.obstacles.push(Rect::new(2, OBSTACLE_Y, OBSTACLE_W, OBSTACLE_H));

        step_none(&mut s); // → x = -3, still partially considered
        assert_eq!(s.obstacles.len(), 1);
        step_none(&mut s); // → x = -8, still > -OBSTACLE_W
        assert_eq!(s.obstacles.len(), 1);
        step_none(&mut s); // → x = -13, fully off screen
        assert!(s.obstacles.is_empty());
        assert!(!s.game_over);
    }

    #[test]
    fn approaching_obstacle_collides_at_predicted_frame() {
        let mut s = GameState::new();
        s.player.x = 0;
        // 100 → 40 takes 12 frames with no overlap yet (edges touch at 40);
        // the 13th frame reaches 35 and overlaps the 0..40 player.
        s.obstacles.push(Rect::new(100, OBSTACLE_Y, OBSTACLE_W, OBSTACLE_H));
        for i in 0..12 {
            assert_eq!(step_none(&mut s), StepOutcome::Running, "frame {}", i);
        }
        assert!(matches!(step_none(&mut s), StepOutcome::RoundOver { .. }));
        assert!(s.game_over);
        assert!(s.game_over_at.is_some());
    }

    #[test]
    fn jumping_clears_a_ground_obstacle() {
        let mut s = GameState::new();
        s.obstacles.push(Rect::new(250, OBSTACLE_Y, OBSTACLE_W, OBSTACLE_H));
        s.step(Command::Jump, NO_SPRITES, now());
        for _ in 0..60 {
            assert_eq!(step_none(&mut s), StepOutcome::Running);
        }
        assert!(!s.game_over);
        assert!(s.obstacles.is_empty(), "obstacle should have passed and been culled");
    }

    // ── score ────────────────────────────────────────────────────────────

    #[test]
    fn score_ticks_every_fifth_frame() {
        let mut s = GameState::new();
        for _ in 0..SCORE_EVERY - 1 {
            step_none(&mut s);
        }
        assert_eq!(s.score, 0);
        step_none(&mut s);
        assert_eq!(s.score, 1);

        for _ in 0..2 * SCORE_EVERY {
            step_none(&mut s);
        }
        assert_eq!(s.score, 3);
    }

    // ── game over ────────────────────────────────────────────────────────

    fn collide(s: &mut GameState, at: Instant) -> StepOutcome {
        // Obstacle one advance away from overlapping the player.
        s.obstacles.push(Rect::new(
            s.player.right() + OBSTACLE_SPEED - 1,
            OBSTACLE_Y,
            OBSTACLE_W,
            OBSTACLE_H,
        ));
        s.step(Command::None, NO_SPRITES, at)
    }

    #[test]
    fn collision_ends_round_exactly_once() {
        let mut s = GameState::new();
        let t0 = now();
        assert!(matches!(collide(&mut s, t0), StepOutcome::RoundOver { .. }));
        let stamp = s.game_over_at;

        // Further frames inside the hold change nothing.
        let frozen_score = s.score;
        let frozen_obstacles = s.obstacles.clone();
        for _ in 0..10 {
            assert_eq!(s.step(Command::Jump, NO_SPRITES, t0), StepOutcome::Running);
        }
        assert_eq!(s.score, frozen_score);
        assert_eq!(s.obstacles, frozen_obstacles);
        assert_eq!(s.game_over_at, stamp);
        assert!(!s.is_jumping, "input is dead during the hold");
    }

    #[test]
    fn high_score_snapshot_taken_at_collision() {
        let mut s = GameState::new();
        // Arrange the collision on a scoring frame: the frame still ticks,
        // but the reported final score is the pre-tick snapshot.
        s.frame_count = SCORE_EVERY - 1;
        s.score = 7;
        match collide(&mut s, now()) {
            StepOutcome::RoundOver { final_score } => assert_eq!(final_score, 7),
            other => panic!("expected RoundOver, got {:?}", other),
        }
        assert_eq!(s.score, 8);
    }

    #[test]
    fn reset_due_after_hold_elapses() {
        let mut s = GameState::new();
        let t0 = now();
        collide(&mut s, t0);

        let inside = t0 + Duration::from_millis(1500);
        assert_eq!(s.step(Command::None, NO_SPRITES, inside), StepOutcome::Running);

        let past = t0 + GAME_OVER_HOLD + Duration::from_millis(1);
        assert_eq!(s.step(Command::None, NO_SPRITES, past), StepOutcome::ResetDue);
    }
}
