use regex::Regex;

use crate::error::{PuzzleError, Result};

fn repeats(id: &str, times: usize) -> bool {
    id.len() % times == 0 && id[.. id.len() / times].repeat(times) == id
}

fn invalid(part: u8, id: u64) -> bool {
    let id = id.to_string();
    if part == 1 {
        repeats(&id, 2)
    } else {
        (2 ..= id.len()).any(|times| repeats(&id, times))
    }
}

pub fn run(part: u8, input: &str) -> Result<String> {
    if part != 1 && part != 2 {return Err(PuzzleError::UnknownPart(part))}
    let re = Regex::new(r"(\d+)-(\d+)")?;
    let mut total = 0u64;
    let mut ranges = 0;
    for caps in re.captures_iter(input) {
        let start: u64 = caps[1].parse()?;
        let end: u64 = caps[2].parse()?;
        total += (start ..= end).filter(|&id| invalid(part, id)).sum::<u64>();
        ranges += 1;
    }
    if ranges == 0 {return Err(PuzzleError::EmptyInput)}
    Ok(total.to_string())
}
