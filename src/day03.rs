use crate::error::{PuzzleError, Result};

/// Largest number formed by picking `count` digits of `bank` in order.
fn joltage(bank: &[u8], count: usize) -> u64 {
    let mut from = 0;
    let mut joltage = 0;
    for left in (0 .. count).rev() {
        // first occurrence of the maximum among the digits that still leave room for the rest
        let window = &bank[from .. bank.len() - left];
        let (at, &digit) = window.iter().enumerate()
            .rev().max_by_key(|&(_, &d)| d).unwrap_or((0, &0));
        from += at + 1;
        joltage = joltage * 10 + digit as u64;
    }
    joltage
}

pub fn run(part: u8, input: &str) -> Result<String> {
    let count = match part {1 => 2, 2 => 12, p => return Err(PuzzleError::UnknownPart(p))};
    let banks = input.trim().lines().enumerate().map(|(ln, line)| {
        let bank = line.trim().bytes().map(|b| match b {
            b'0' ..= b'9' => Ok(b - b'0'),
            _ => Err(PuzzleError::parse(ln, format!("unexpected character {:?}", b as char))),
        }).collect::<Result<Vec<_>>>()?;
        if bank.len() < count {
            return Err(PuzzleError::parse(ln, format!("need at least {} batteries", count)));
        }
        Ok(bank)
    }).collect::<Result<Vec<_>>>()?;

    Ok(banks.iter().map(|bank| joltage(bank, count)).sum::<u64>().to_string())
}
