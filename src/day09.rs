use itertools::Itertools;

use crate::error::{PuzzleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tile {
    x: u64,
    y: u64,
}

impl Tile {
    fn area(&self, other: &Tile) -> u64 {
        (self.x.abs_diff(other.x) + 1) * (self.y.abs_diff(other.y) + 1)
    }
}

/// Axis-aligned polygon edge, stored as the fixed coordinate and the span along the other axis.
#[derive(Debug, Clone, Copy)]
struct Edge {
    along: u64,
    start: u64,
    end: u64,
}

struct Floor {
    tiles: Vec<Tile>,
    vertical: Vec<Edge>,
    horizontal: Vec<Edge>,
}

impl Floor {
    fn parse(input: &str) -> Result<Self> {
        let tiles = input.trim().lines().enumerate().map(|(ln, line)| {
            let (x, y) = line.trim().split_once(',')
                .ok_or_else(|| PuzzleError::parse(ln, format!("expected x,y, got {:?}", line)))?;
            Ok(Tile {x: x.parse()?, y: y.parse()?})
        }).collect::<Result<Vec<_>>>()?;
        if tiles.len() < 2 {return Err(PuzzleError::EmptyInput)}

        let mut vertical = vec![];
        let mut horizontal = vec![];
        for (ln, (a, b)) in tiles.iter().circular_tuple_windows().enumerate() {
            if a.x == b.x {
                vertical.push(Edge {along: a.x, start: a.y.min(b.y), end: a.y.max(b.y)});
            } else if a.y == b.y {
                horizontal.push(Edge {along: a.y, start: a.x.min(b.x), end: a.x.max(b.x)});
            } else {
                return Err(PuzzleError::parse((ln + 1) % tiles.len(), "tile is not in line with the previous one"));
            }
        }
        Ok(Floor {tiles, vertical, horizontal})
    }

    fn crosses_interior(&self, a: &Tile, b: &Tile) -> bool {
        let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
        let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
        self.vertical.iter().any(|e|
            min_x < e.along && e.along < max_x && e.end > min_y && e.start < max_y
        ) || self.horizontal.iter().any(|e|
            min_y < e.along && e.along < max_y && e.end > min_x && e.start < max_x
        )
    }

    /// Point-in-polygon on doubled coordinates so rectangle centres stay integral.
    /// Points on the boundary count as inside.
    fn contains_doubled(&self, px: u64, py: u64) -> bool {
        let on_edge = |edges: &[Edge], along: u64, across: u64|
            edges.iter().any(|e| 2 * e.along == along && 2 * e.start <= across && across <= 2 * e.end);
        if on_edge(&self.vertical, px, py) || on_edge(&self.horizontal, py, px) {return true}
        self.vertical.iter()
            .filter(|e| 2 * e.along > px && 2 * e.start <= py && py < 2 * e.end)
            .count() % 2 == 1
    }

    /// For a rectangle one tile wide or tall, checks every stretch of the line between
    /// the points where the polygon boundary meets it.
    fn line_inside(&self, a: &Tile, b: &Tile) -> bool {
        let (along, across, lo, hi, edges) = if a.x == b.x {
            (a.x, false, a.y.min(b.y), a.y.max(b.y), &self.horizontal)
        } else if a.y == b.y {
            (a.y, true, a.x.min(b.x), a.x.max(b.x), &self.vertical)
        } else {
            return true;
        };
        edges.iter()
            .filter(|e| e.start <= along && along <= e.end && lo <= e.along && e.along <= hi)
            .map(|e| e.along)
            .chain([lo, hi])
            .sorted_unstable().dedup()
            .tuple_windows()
            .all(|(from, to)| if across {
                self.contains_doubled(from + to, 2 * along)
            } else {
                self.contains_doubled(2 * along, from + to)
            })
    }

    fn largest(&self, inside_only: bool) -> u64 {
        self.tiles.iter().tuple_combinations()
            .filter(|(a, b)| !inside_only || (
                !self.crosses_interior(a, b) && self.contains_doubled(a.x + b.x, a.y + b.y)
                    && self.line_inside(a, b)
            ))
            .map(|(a, b)| a.area(b))
            .max().unwrap_or(0)
    }
}

pub fn run(part: u8, input: &str) -> Result<String> {
    let floor = Floor::parse(input)?;
    match part {
        1 => Ok(floor.largest(false).to_string()),
        2 => Ok(floor.largest(true).to_string()),
        p => Err(PuzzleError::UnknownPart(p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "7,1\n11,1\n11,7\n9,7\n9,5\n2,5\n2,3\n7,3\n";

    #[test]
    fn example() -> anyhow::Result<()> {
        assert_eq!(run(1, EXAMPLE)?, "50");
        assert_eq!(run(2, EXAMPLE)?, "24");
        Ok(())
    }

    #[test]
    fn centre_outside_the_notch() -> anyhow::Result<()> {
        let floor = Floor::parse(EXAMPLE)?;
        let (a, b) = (Tile {x: 2, y: 5}, Tile {x: 9, y: 7});
        assert!(!floor.crosses_interior(&a, &b));
        assert!(!floor.contains_doubled(a.x + b.x, a.y + b.y));
        Ok(())
    }

    #[test]
    fn thin_rectangle_through_a_notch() -> anyhow::Result<()> {
        let floor = Floor::parse("0,0\n6,0\n6,4\n2,4\n2,1\n1,1\n1,4\n0,4\n")?;
        let (a, b) = (Tile {x: 0, y: 4}, Tile {x: 6, y: 4});
        assert!(!floor.crosses_interior(&a, &b));
        assert!(floor.contains_doubled(a.x + b.x, a.y + b.y));
        assert!(!floor.line_inside(&a, &b));
        assert!(floor.line_inside(&Tile {x: 2, y: 4}, &b));
        assert!(floor.line_inside(&Tile {x: 6, y: 0}, &b));
        Ok(())
    }

    #[test]
    fn diagonal_step_is_rejected() {
        assert!(matches!(Floor::parse("1,1\n2,2\n1,2\n"), Err(PuzzleError::Parse {..})));
    }
}
