use std::ops::RangeInclusive;

use itertools::Itertools;

use crate::error::{PuzzleError, Result};

fn parse(input: &str) -> Result<(Vec<RangeInclusive<u64>>, Vec<u64>)> {
    let mut lines = input.trim().lines().map(str::trim).enumerate();
    let ranges = lines.by_ref().take_while(|(_, line)| !line.is_empty()).map(|(ln, line)| {
        let (start, end) = line.split_once('-')
            .ok_or_else(|| PuzzleError::parse(ln, format!("expected <start>-<end>, got {:?}", line)))?;
        let (start, end) = (start.parse::<u64>()?, end.parse::<u64>()?);
        if start > end {return Err(PuzzleError::parse(ln, "range ends before it starts"))}
        Ok(start ..= end)
    }).collect::<Result<Vec<_>>>()?;
    let ids = lines.map(|(_, line)| Ok(line.parse::<u64>()?)).collect::<Result<Vec<_>>>()?;
    if ranges.is_empty() {return Err(PuzzleError::EmptyInput)}
    Ok((ranges, ids))
}

/// Sorts and coalesces overlapping or touching ranges.
fn pack(ranges: &[RangeInclusive<u64>]) -> Vec<RangeInclusive<u64>> {
    ranges.iter().cloned()
        .sorted_unstable_by_key(|range| (*range.start(), *range.end()))
        .coalesce(|prev, next| {
            if *next.start() <= prev.end().saturating_add(1) {
                Ok(*prev.start() ..= *prev.end().max(next.end()))
            } else {
                Err((prev, next))
            }
        })
        .collect()
}

pub fn run(part: u8, input: &str) -> Result<String> {
    let (ranges, ids) = parse(input)?;
    match part {
        1 => Ok(ids.iter().filter(|&&id| ranges.iter().any(|range| range.contains(&id))).count().to_string()),
        2 => Ok(pack(&ranges).iter().map(|range| range.end() - range.start() + 1).sum::<u64>().to_string()),
        p => Err(PuzzleError::UnknownPart(p)),
    }
}
