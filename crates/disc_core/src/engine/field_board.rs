//! Field board: a derived row/column view of the two lineups.
//!
//! - Truth = the players' own `(row, column)`
//! - Board = a per-turn copy for display and checks; never written back

use serde::{Deserialize, Serialize};

use super::constants::{field, FIELD_ROWS};
use crate::error::{MatchError, Result};
use crate::models::{PlayerId, PlayerPool, Team, TeamColor, TeamId};

/// The single lineup player running along one board row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRow {
    pub player: PlayerId,
    pub team: TeamId,
    pub column: i32,
    pub color: TeamColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldBoard {
    /// Indexed by field row; `None` for a row without an on-field player.
    pub rows: Vec<Option<BoardRow>>,
    pub carrier_row: Option<usize>,
    pub carrier_color: TeamColor,
}

impl FieldBoard {
    /// Reads both lineups' cells. Fails on any column outside the field.
    pub fn capture(players: &PlayerPool, left: &Team, right: &Team, carrier: Option<PlayerId>) -> Result<Self> {
        let mut rows = vec![None; FIELD_ROWS];
        let mut carrier_row = None;
        for team in [left, right] {
            for (&id, (row, column)) in team.lineup().iter().zip(team.positions(players)?) {
                let index = usize::try_from(row).ok().filter(|&r| r < FIELD_ROWS).ok_or_else(|| {
                    MatchError::OutOfBounds { player: id.to_string(), row, column }
                })?;
                rows[index] = Some(BoardRow { player: id, team: team.id(), column, color: team.color() });
                if carrier == Some(id) {
                    carrier_row = Some(index);
                }
            }
        }
        Ok(Self { rows, carrier_row, carrier_color: TeamColor::carrier_highlight(left.color(), right.color()) })
    }

    /// Column per row, `None` where the row is empty.
    pub fn columns(&self) -> Vec<Option<i32>> {
        self.rows.iter().map(|row| row.map(|r| r.column)).collect()
    }

    /// One line per row, `*` marking the player, coloured by team (or by the
    /// carrier highlight on the carrier's row).
    pub fn render(&self) -> String {
        self.render_with(|row, color| color.paint(row))
    }

    /// Same layout as [`render`](Self::render) without escape codes.
    pub fn render_plain(&self) -> String {
        self.render_with(|row, _| row.to_string())
    }

    fn render_with(&self, paint: impl Fn(&str, TeamColor) -> String) -> String {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let cells: Vec<String> = (field::LEFT_BOUNDARY..=field::RIGHT_BOUNDARY)
                    .map(|column| match row {
                        Some(r) if r.column == column => {
                            let color = if self.carrier_row == Some(index) { self.carrier_color } else { r.color };
                            paint("*", color)
                        }
                        _ => " ".to_string(),
                    })
                    .collect();
                cells.join("|")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
