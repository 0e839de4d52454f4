//! Discrete battle input events and the script format that encodes them.

use std::str::FromStr;

use crate::battle::Direction;
use crate::error::ScriptError;

/// One player input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleInput {
    /// Move the cursor one tile.
    Cursor(Direction),
    /// Confirm the tile under the cursor.
    Confirm,
    /// Undo the bound unit's move and release it.
    Cancel,
    /// End the bound unit's action without attacking.
    Skip,
    /// Concede the battle.
    Forfeit,
}

impl FromStr for BattleInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "up" | "k" => Ok(BattleInput::Cursor(Direction::Up)),
            "down" | "j" => Ok(BattleInput::Cursor(Direction::Down)),
            "left" | "h" => Ok(BattleInput::Cursor(Direction::Left)),
            "right" | "l" => Ok(BattleInput::Cursor(Direction::Right)),
            "confirm" | "enter" => Ok(BattleInput::Confirm),
            "cancel" | "x" => Ok(BattleInput::Cancel),
            "skip" | "s" => Ok(BattleInput::Skip),
            "forfeit" | "f" => Ok(BattleInput::Forfeit),
            other => Err(other.to_string()),
        }
    }
}

/// Parse a whitespace-separated input script.
///
/// `#` starts a comment that runs to the end of the line.
///
/// # Errors
///
/// Returns [`ScriptError::UnknownToken`] for the first token that is not a
/// recognised input.
pub fn parse_script(source: &str) -> Result<Vec<BattleInput>, ScriptError> {
    let mut inputs = Vec::new();

    for (line_no, line) in source.lines().enumerate() {
        let code = line.split('#').next().unwrap_or_default();
        for token in code.split_whitespace() {
            let input = token.parse().map_err(|token| ScriptError::UnknownToken {
                line: line_no + 1,
                token,
            })?;
            inputs.push(input);
        }
    }

    Ok(inputs)
}
