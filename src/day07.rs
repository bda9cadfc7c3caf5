use crate::error::{PuzzleError, Result};

/// Returns how many splitters were hit and how many timelines leave the bottom row.
fn simulate(input: &str) -> Result<(usize, u64)> {
    let rows = input.trim().lines().map(str::as_bytes).collect::<Vec<_>>();
    let (start_ri, start_ci) = rows.iter().enumerate().find_map(|(ri, row)|
        row.iter().position(|&cell| cell == b'S').map(|ci| (ri, ci))
    ).ok_or_else(|| PuzzleError::parse(0, "no start position"))?;
    let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);

    let mut beams = vec![0u64; width];
    beams[start_ci] = 1;
    let mut splits = 0;
    for (ri, row) in rows.iter().enumerate().skip(start_ri + 1) {
        let mut next = vec![0u64; width];
        for (ci, &count) in beams.iter().enumerate().filter(|&(_, &count)| count > 0) {
            match row.get(ci) {
                Some(b'^') => {
                    splits += 1;
                    if ci > 0 {next[ci - 1] += count}
                    if ci + 1 < width {next[ci + 1] += count}
                },
                Some(b'.') | Some(b'S') | None => next[ci] += count,
                Some(&cell) => return Err(PuzzleError::parse(ri, format!("unexpected cell {:?}", cell as char))),
            }
        }
        beams = next;
    }
    Ok((splits, beams.iter().sum()))
}

pub fn run(part: u8, input: &str) -> Result<String> {
    let (splits, timelines) = simulate(input)?;
    match part {
        1 => Ok(splits.to_string()),
        2 => Ok(timelines.to_string()),
        p => Err(PuzzleError::UnknownPart(p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = ".......S.......
...............
.......^.......
...............
......^.^......
...............
.....^.^.^.....
...............
....^.^...^....
...............
...^.^...^.^...
...............
..^...^.....^..
...............
.^.^.^.^.^...^.
...............
";

    #[test]
    fn example() -> anyhow::Result<()> {
        assert_eq!(run(1, EXAMPLE)?, "21");
        assert_eq!(run(2, EXAMPLE)?, "40");
        Ok(())
    }

    #[test]
    fn merged_beams_split_once() -> anyhow::Result<()> {
        assert_eq!(simulate("..S..\n..^..\n.....\n.^.^.\n..^..\n")?, (4, 6));
        Ok(())
    }

    #[test]
    fn missing_start() {
        assert!(run(1, "...\n.^.\n").is_err());
    }
}
