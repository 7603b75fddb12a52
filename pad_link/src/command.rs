//! The enumerated gesture command — the unit of intent passed from the
//! virtual pad to the game loop.

use std::fmt;

// ════════════════════════════════════════════════════════════════════════════
// Command
// ════════════════════════════════════════════════════════════════════════════

/// A discrete gesture command.
///
/// `None` is the quiescent value: it is what a reader sees before the first
/// gesture and what any unreadable or unrecognised wire text decodes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Command {
    #[default]
    None,
    Jump,
    Slide,
    Left,
    Right,
}

impl Command {
    /// The text written to (and read from) the command file.
    pub fn wire_name(self) -> &'static str {
        match self {
            Command::None  => "NONE",
            Command::Jump  => "JUMP",
            Command::Slide => "SLIDE",
            Command::Left  => "LEFT",
            Command::Right => "RIGHT",
        }
    }

    /// Decode wire text.  Anything unrecognised — including an empty or
    /// truncated read — decodes to `None`; a command channel is never a
    /// source of errors.
    pub fn from_wire(text: &str) -> Command {
        match text.trim() {
            "JUMP"  => Command::Jump,
            "SLIDE" => Command::Slide,
            "LEFT"  => Command::Left,
            "RIGHT" => Command::Right,
            _       => Command::None,
        }
    }

    /// Compact encoding for the atomic mailbox slot.
    pub fn to_code(self) -> u8 {
        match self {
            Command::None  => 0,
            Command::Jump  => 1,
            Command::Slide => 2,
            Command::Left  => 3,
            Command::Right => 4,
        }
    }

    /// Inverse of [`Command::to_code`]; out-of-range codes decode to `None`.
    pub fn from_code(code: u8) -> Command {
        match code {
            1 => Command::Jump,
            2 => Command::Slide,
            3 => Command::Left,
            4 => Command::Right,
            _ => Command::None,
        }
    }

    pub fn is_none(self) -> bool {
        self == Command::None
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Command; 5] = [
        Command::None,
        Command::Jump,
        Command::Slide,
        Command::Left,
        Command::Right,
    ];

    #[test]
    fn wire_names_decode_back() {
        for cmd in ALL {
            assert_eq!(Command::from_wire(cmd.wire_name()), cmd);
        }
    }

    #[test]
    fn garbage_decodes_to_none() {
        assert_eq!(Command::from_wire(""), Command::None);
        assert_eq!(Command::from_wire("JUM"), Command::None);
        assert_eq!(Command::from_wire("jump"), Command::None);
        assert_eq!(Command::from_wire("JUMPSLIDE"), Command::None);
    }

    #[test]
    fn wire_text_is_trimmed() {
        assert_eq!(Command::from_wire("JUMP\n"), Command::Jump);
        assert_eq!(Command::from_wire("  LEFT  "), Command::Left);
    }

    #[test]
    fn codes_round_trip() {
        for cmd in ALL {
            assert_eq!(Command::from_code(cmd.to_code()), cmd);
        }
        assert_eq!(Command::from_code(200), Command::None);
    }

    #[test]
    fn display_matches_wire() {
        assert_eq!(format!("{}", Command::Slide), "SLIDE");
    }
}
