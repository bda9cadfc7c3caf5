use std::num::ParseIntError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("cannot parse line {line}: {reason}")]
    Parse {line: usize, reason: String},
    #[error("could not parse number")]
    ParseInt(#[from] ParseIntError),
    #[error(transparent)]
    Regex(#[from] regex::Error),
    #[error("input is empty")]
    EmptyInput,
    #[error("machine {machine} cannot reach its target")]
    Unsolvable {machine: usize},
    #[error("machine {machine} has {buttons} buttons, too many to configure")]
    TooManyButtons {machine: usize, buttons: usize},
    #[error("machine {machine} has no joltage requirements")]
    NoJoltages {machine: usize},
    #[error("part must be 1 or 2, got {0}")]
    UnknownPart(u8),
}

impl PuzzleError {
    pub fn parse(line: usize, reason: impl Into<String>) -> Self {
        PuzzleError::Parse {line: line + 1, reason: reason.into()}
    }
}

pub type Result<T> = std::result::Result<T, PuzzleError>;
