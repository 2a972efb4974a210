use serde::{Deserialize, Serialize};

/// Display colour of a team (and of its players).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Black,
    White,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Purple,
    Orange,
    Pink,
    Lime,
    Teal,
    Gray,
    Brown,
}

pub const ANSI_RESET: &str = "\x1b[0m";

impl TeamColor {
    /// Palette handed to generated leagues, in team order.
    pub const LEAGUE_PALETTE: [TeamColor; 8] = [
        TeamColor::Red,
        TeamColor::Blue,
        TeamColor::Green,
        TeamColor::Yellow,
        TeamColor::Magenta,
        TeamColor::Orange,
        TeamColor::Gray,
        TeamColor::Brown,
    ];

    pub fn ansi(self) -> &'static str {
        match self {
            TeamColor::Black => "\x1b[30m",
            TeamColor::White => "\x1b[37m",
            TeamColor::Red => "\x1b[31m",
            TeamColor::Green => "\x1b[32m",
            TeamColor::Yellow => "\x1b[33m",
            TeamColor::Blue => "\x1b[34m",
            TeamColor::Magenta => "\x1b[35m",
            TeamColor::Cyan => "\x1b[36m",
            TeamColor::Purple => "\x1b[38;5;129m",
            TeamColor::Orange => "\x1b[38;5;202m",
            TeamColor::Pink => "\x1b[38;5;213m",
            TeamColor::Lime => "\x1b[38;5;154m",
            TeamColor::Teal => "\x1b[38;5;37m",
            TeamColor::Gray => "\x1b[38;5;240m",
            TeamColor::Brown => "\x1b[38;5;124m",
        }
    }

    /// Wraps `text` in this colour's escape sequence.
    pub fn paint(self, text: &str) -> String {
        format!("{}{}{}", self.ansi(), text, ANSI_RESET)
    }

    /// Highlight used for the carrier's row: a colour neither team wears.
    pub fn carrier_highlight(left: TeamColor, right: TeamColor) -> TeamColor {
        let colors = [left, right];
        if !colors.contains(&TeamColor::Blue) {
            TeamColor::Cyan
        } else if !colors.contains(&TeamColor::Magenta) {
            TeamColor::Purple
        } else {
            TeamColor::Lime
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_carrier_highlight_avoids_team_colors() {
        assert_eq!(TeamColor::carrier_highlight(TeamColor::Red, TeamColor::Green), TeamColor::Cyan);
        assert_eq!(TeamColor::carrier_highlight(TeamColor::Blue, TeamColor::Red), TeamColor::Purple);
        assert_eq!(TeamColor::carrier_highlight(TeamColor::Blue, TeamColor::Magenta), TeamColor::Lime);
    }

    #[test]
    fn test_color_serde_lowercase() {
        let json = serde_json::to_string(&TeamColor::Orange).unwrap();
        assert_eq!(json, "\"orange\"");
        let parsed: TeamColor = serde_json::from_str("\"teal\"").unwrap();
        assert_eq!(parsed, TeamColor::Teal);
    }

    #[test]
    fn test_paint_resets() {
        let painted = TeamColor::Red.paint("Avi");
        assert!(painted.starts_with("\x1b[31m"));
        assert!(painted.ends_with(ANSI_RESET));
    }
}
