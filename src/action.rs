use crate::error::{GameError, Result};

/// Parses a `row:column` move.
pub fn parse_action(action: &str) -> Result<(i32, i32)> {
    let invalid = || GameError::InvalidAction(format!("Invalid action [{action}]"));

    let parts: Vec<&str> = action
        .split(':')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.as_slice() {
        [row, column] => Ok((
            row.parse().map_err(|_| invalid())?,
            column.parse().map_err(|_| invalid())?,
        )),
        _ => Err(invalid()),
    }
}
