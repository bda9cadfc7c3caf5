use regex::Regex;

use crate::error::{PuzzleError, Result};

const DIAL_SIZE: u64 = 100;
const DIAL_START: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rotation {
    Left(u64),
    Right(u64),
}

fn parse(input: &str) -> Result<Vec<Rotation>> {
    let re = Regex::new(r"^([LR])(\d+)$")?;
    input.trim().lines().enumerate().map(|(ln, line)| {
        let caps = re.captures(line.trim())
            .ok_or_else(|| PuzzleError::parse(ln, format!("expected L<n> or R<n>, got {:?}", line)))?;
        let clicks = caps[2].parse()?;
        Ok(if &caps[1] == "L" {Rotation::Left(clicks)} else {Rotation::Right(clicks)})
    }).collect()
}

/// Applies one rotation, returning the new position and how many clicks landed on 0.
fn turn(position: u64, rotation: Rotation) -> (u64, u64) {
    match rotation {
        Rotation::Right(n) => ((position + n) % DIAL_SIZE, (position + n) / DIAL_SIZE),
        Rotation::Left(n) => {
            let zeros = if position == 0 {
                n / DIAL_SIZE
            } else if n >= position {
                (n - position) / DIAL_SIZE + 1
            } else {0};
            ((position + DIAL_SIZE - n % DIAL_SIZE) % DIAL_SIZE, zeros)
        }
    }
}

pub fn run(part: u8, input: &str) -> Result<String> {
    let rotations = parse(input)?;
    let mut position = DIAL_START;
    let mut stops = 0u64;
    let mut passes = 0u64;
    for rotation in rotations {
        let (next, zeros) = turn(position, rotation);
        position = next;
        passes += zeros;
        if position == 0 {stops += 1}
    }
    match part {
        1 => Ok(stops.to_string()),
        2 => Ok(passes.to_string()),
        p => Err(PuzzleError::UnknownPart(p)),
    }
}
