use arrayvec::ArrayVec;
use bitvec::prelude::*;

use crate::error::{PuzzleError, Result};

const CROWDED: usize = 4;

struct Floor {
    rows: usize,
    cols: usize,
    rolls: BitVec,
}

impl Floor {
    fn parse(input: &str) -> Result<Self> {
        let lines = input.trim().lines().map(str::trim).collect::<Vec<_>>();
        let cols = lines.first().map(|line| line.len()).ok_or(PuzzleError::EmptyInput)?;
        let mut rolls = bitvec![0; lines.len() * cols];
        for (ri, line) in lines.iter().enumerate() {
            if line.len() != cols {
                return Err(PuzzleError::parse(ri, format!("expected {} cells, got {}", cols, line.len())));
            }
            for (ci, cell) in line.bytes().enumerate() {
                match cell {
                    b'@' => rolls.set(ri * cols + ci, true),
                    b'.' => (),
                    _ => return Err(PuzzleError::parse(ri, format!("unexpected cell {:?}", cell as char))),
                }
            }
        }
        Ok(Floor {rows: lines.len(), cols, rolls})
    }

    fn neighbours(&self, at: usize) -> ArrayVec<usize, 8> {
        let (ri, ci) = (at / self.cols, at % self.cols);
        let mut r = ArrayVec::new();
        for rj in ri.saturating_sub(1) ..= (ri + 1).min(self.rows - 1) {
            for cj in ci.saturating_sub(1) ..= (ci + 1).min(self.cols - 1) {
                if (rj, cj) != (ri, ci) {r.push(rj * self.cols + cj)}
            }
        }
        r
    }

    fn accessible(&self) -> Vec<usize> {
        self.rolls.iter_ones().filter(|&at|
            self.neighbours(at).iter().filter(|&&n| self.rolls[n]).count() < CROWDED
        ).collect()
    }
}

pub fn run(part: u8, input: &str) -> Result<String> {
    let mut floor = Floor::parse(input)?;
    match part {
        1 => Ok(floor.accessible().len().to_string()),
        2 => {
            let mut removed = 0;
            loop {
                let round = floor.accessible();
                if round.is_empty() {break}
                removed += round.len();
                tracing::debug!(round = round.len(), removed, "rolls removed");
                for at in round {floor.rolls.set(at, false)}
            }
            Ok(removed.to_string())
        },
        p => Err(PuzzleError::UnknownPart(p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "..@@.@@@@.
@@@.@.@.@@
@@@@@.@.@@
@.@@@@..@.
@@.@@@@.@@
.@@@@@@@.@
.@.@.@.@@@
@.@@@.@@@@
.@@@@@@@@.
@.@.@@@.@.
";

    #[test]
    fn example() -> anyhow::Result<()> {
        assert_eq!(run(1, EXAMPLE)?, "13");
        assert_eq!(run(2, EXAMPLE)?, "43");
        Ok(())
    }

    #[test]
    fn corner_has_three_neighbours() -> anyhow::Result<()> {
        let floor = Floor::parse("@@\n@@")?;
        assert_eq!(floor.neighbours(0).len(), 3);
        assert_eq!(floor.accessible().len(), 4);
        Ok(())
    }

    #[test]
    fn ragged_rows_are_rejected() {
        assert!(matches!(Floor::parse("@@@\n@@"), Err(PuzzleError::Parse {line: 2, ..})));
    }
}
