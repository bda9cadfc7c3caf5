use itertools::Itertools;
use petgraph::unionfind::UnionFind;

use crate::error::{PuzzleError, Result};

const CONNECTIONS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct JunctionBox {
    x: i64,
    y: i64,
    z: i64,
}

impl JunctionBox {
    fn distance_sq(&self, other: &JunctionBox) -> i64 {
        (self.x - other.x).pow(2) + (self.y - other.y).pow(2) + (self.z - other.z).pow(2)
    }
}

fn parse(input: &str) -> Result<Vec<JunctionBox>> {
    let boxes = input.trim().lines().enumerate().map(|(ln, line)| {
        let coords = line.trim().split(',').map(str::parse::<i64>).collect::<std::result::Result<Vec<_>, _>>()?;
        let [x, y, z] = coords[..] else {
            return Err(PuzzleError::parse(ln, format!("expected x,y,z, got {:?}", line)));
        };
        Ok(JunctionBox {x, y, z})
    }).collect::<Result<Vec<_>>>()?;
    if boxes.len() < 2 {return Err(PuzzleError::EmptyInput)}
    Ok(boxes)
}

/// All pairs of box indices, closest first.
fn closest_pairs(boxes: &[JunctionBox]) -> Vec<(usize, usize)> {
    (0 .. boxes.len()).tuple_combinations()
        .sorted_by_cached_key(|&(i, j)| boxes[i].distance_sq(&boxes[j]))
        .collect()
}

/// Product of the three largest circuits after connecting the `connections` closest pairs.
fn largest_circuits(boxes: &[JunctionBox], connections: usize) -> usize {
    let mut circuits = UnionFind::<usize>::new(boxes.len());
    for (i, j) in closest_pairs(boxes).into_iter().take(connections) {
        circuits.union(i, j);
    }
    circuits.into_labeling().into_iter().counts().into_values()
        .sorted_unstable_by(|a, b| b.cmp(a))
        .take(3)
        .product()
}

/// Product of the X coordinates of the pair whose connection joins everything into one circuit.
fn final_connection(boxes: &[JunctionBox]) -> Option<i64> {
    let mut circuits = UnionFind::<usize>::new(boxes.len());
    let mut remaining = boxes.len();
    for (i, j) in closest_pairs(boxes) {
        if circuits.union(i, j) {
            remaining -= 1;
            if remaining == 1 {
                tracing::debug!(?i, ?j, "all junction boxes connected");
                return Some(boxes[i].x * boxes[j].x);
            }
        }
    }
    None
}

pub fn run(part: u8, input: &str) -> Result<String> {
    let boxes = parse(input)?;
    match part {
        1 => Ok(largest_circuits(&boxes, CONNECTIONS).to_string()),
        2 => final_connection(&boxes).map(|x| x.to_string()).ok_or(PuzzleError::EmptyInput),
        p => Err(PuzzleError::UnknownPart(p)),
    }
}
