use std::collections::VecDeque;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::error::{PuzzleError, Result};

const MAX_LAMPS: usize = 64;
const MAX_CONFIGURABLE_BUTTONS: usize = 24;

/// A button flips every lamp it lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    lamps: Vec<usize>,
}

impl Button {
    fn press(&self, lights: &mut u64) {
        for lamp in &self.lamps {
            *lights ^= 1 << lamp;
        }
    }

    fn mask(&self) -> u64 {
        let mut lights = 0;
        self.press(&mut lights);
        lights
    }
}

/// One machine: the light diagram to reach, its buttons and the joltage requirements.
#[derive(Debug, Clone)]
pub struct Machine {
    goal: u64,
    width: usize,
    buttons: Vec<Button>,
    joltages: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    lights: u64,
    presses: u32,
}

impl Entry {
    fn press(self, mask: u64) -> Entry {
        Entry {lights: self.lights ^ mask, presses: self.presses + 1}
    }
}

fn enclosed<'a>(token: &'a str, brackets: &[(char, char)]) -> Option<&'a str> {
    brackets.iter().find_map(|&(open, close)|
        token.strip_prefix(open).and_then(|rest| rest.strip_suffix(close))
    )
}

fn numbers<T: std::str::FromStr>(ln: usize, list: &str) -> Result<Vec<T>> {
    list.split(',').map(|n| n.trim().parse::<T>()
        .map_err(|_| PuzzleError::parse(ln, format!("{:?} is not a number", n)))
    ).collect()
}

impl Machine {
    /// Parses `[.##.] (3) (1,3) (2) {3,5,4,7}`; lamp 0 is the first diagram character.
    ///
    /// Buttons may be written `(..)` or `[..]`. Only a trailing `{..}` token is read as the
    /// joltage list, so a trailing `[1,2]` is another button.
    pub fn parse(ln: usize, line: &str) -> Result<Machine> {
        let mut tokens = line.split_whitespace().collect::<Vec<_>>();
        let joltages = match tokens.last().copied().and_then(|token| enclosed(token, &[('{', '}')])) {
            Some(list) => {
                tokens.pop();
                numbers::<u32>(ln, list)?
            },
            None => vec![],
        };

        let first = tokens.first().copied().ok_or_else(|| PuzzleError::parse(ln, "missing light diagram"))?;
        let diagram = enclosed(first, &[('[', ']')])
            .ok_or_else(|| PuzzleError::parse(ln, format!("expected [<lights>], got {:?}", first)))?;
        let width = diagram.chars().count();
        if width == 0 || width > MAX_LAMPS {
            return Err(PuzzleError::parse(ln, format!("light diagram must have 1 to {} lamps, got {}", MAX_LAMPS, width)));
        }
        let goal = diagram.chars().rev().try_fold(0u64, |acc, ch| match ch {
            '#' => Ok((acc << 1) | 1),
            '.' => Ok(acc << 1),
            _ => Err(PuzzleError::parse(ln, format!("unexpected light {:?}", ch))),
        })?;

        let buttons = tokens[1 ..].iter().map(|token| {
            let list = enclosed(token, &[('(', ')'), ('[', ']')])
                .ok_or_else(|| PuzzleError::parse(ln, format!("expected (<lamp>,...), got {:?}", token)))?;
            let lamps = numbers::<usize>(ln, list)?;
            if let Some(lamp) = lamps.iter().find(|&&lamp| lamp >= width) {
                return Err(PuzzleError::parse(ln, format!("button wires lamp {} but only {} lamps exist", lamp, width)));
            }
            Ok(Button {lamps})
        }).collect::<Result<Vec<_>>>()?;

        if !joltages.is_empty() && joltages.len() != width {
            return Err(PuzzleError::parse(ln, format!("{} joltages for {} lamps", joltages.len(), width)));
        }

        Ok(Machine {goal, width, buttons, joltages})
    }

    /// The goal rendered back as a light diagram.
    pub fn diagram(&self) -> String {
        let lights = (0 .. self.width).map(|i| if self.goal >> i & 1 == 1 {'#'} else {'.'}).collect::<String>();
        format!("[{}]", lights)
    }

    /// Breadth-first search from all lamps off; `None` if the goal is unreachable.
    pub fn fewest_presses(&self) -> Option<u32> {
        let masks = self.buttons.iter().map(Button::mask).collect::<Vec<_>>();
        let mut queue = VecDeque::from([Entry {lights: 0, presses: 0}]);
        let mut seen = FxHashSet::default();

        while let Some(entry) = queue.pop_front() {
            if entry.lights == self.goal {return Some(entry.presses)}
            if !seen.insert(entry.lights) {continue}
            for &mask in &masks {
                queue.push_back(entry.press(mask));
            }
        }
        None
    }

    /// Fewest presses that raise every counter to its joltage requirement.
    /// `machine` is the 1-based position used in errors.
    pub fn fewest_configuring_presses(&self, machine: usize) -> Result<u64> {
        if self.buttons.len() > MAX_CONFIGURABLE_BUTTONS {
            return Err(PuzzleError::TooManyButtons {machine, buttons: self.buttons.len()});
        }
        if self.joltages.is_empty() {
            return Err(PuzzleError::NoJoltages {machine});
        }
        Configurator::new(self).solve(self.joltages.clone()).ok_or(PuzzleError::Unsolvable {machine})
    }
}

/// Button sets grouped by the counter parity they produce, for the halving recursion.
struct Configurator {
    by_parity: FxHashMap<u64, Vec<(Vec<u32>, u64)>>,
    memo: FxHashMap<Vec<u32>, Option<u64>>,
}

impl Configurator {
    fn new(machine: &Machine) -> Configurator {
        let counters = machine.joltages.len();
        let mut by_parity: FxHashMap<u64, Vec<(Vec<u32>, u64)>> = FxHashMap::default();
        for set in 0u32 .. 1 << machine.buttons.len() {
            let mut effect = vec![0u32; counters];
            let mut parity = 0u64;
            for (_, button) in machine.buttons.iter().enumerate().filter(|&(bi, _)| set >> bi & 1 == 1) {
                for &lamp in &button.lamps {effect[lamp] += 1}
                button.press(&mut parity);
            }
            by_parity.entry(parity).or_default().push((effect, set.count_ones() as u64));
        }
        Configurator {by_parity, memo: FxHashMap::default()}
    }

    fn solve(&mut self, target: Vec<u32>) -> Option<u64> {
        solve(&self.by_parity, &mut self.memo, target)
    }
}

// Any solution presses some set of buttons an odd number of times; removing that set
// leaves an even remainder that is twice a solution for the halved target.
fn solve(
    by_parity: &FxHashMap<u64, Vec<(Vec<u32>, u64)>>,
    memo: &mut FxHashMap<Vec<u32>, Option<u64>>,
    target: Vec<u32>,
) -> Option<u64> {
    if target.iter().all(|&t| t == 0) {return Some(0)}
    if let Some(&known) = memo.get(&target) {return known}

    let parity = target.iter().enumerate().fold(0u64, |acc, (i, &t)| acc | ((t as u64 & 1) << i));
    let mut best: Option<u64> = None;
    for (effect, presses) in by_parity.get(&parity).map(Vec::as_slice).unwrap_or_default() {
        if effect.iter().zip(&target).any(|(e, t)| e > t) {continue}
        let half = target.iter().zip(effect).map(|(t, e)| (t - e) / 2).collect();
        if let Some(rest) = solve(by_parity, memo, half) {
            let total = presses + 2 * rest;
            best = Some(best.map_or(total, |b| b.min(total)));
        }
    }
    memo.insert(target, best);
    best
}

pub fn parse(input: &str) -> Result<Vec<Machine>> {
    let machines = input.lines().enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(ln, line)| Machine::parse(ln, line))
        .collect::<Result<Vec<_>>>()?;
    if machines.is_empty() {return Err(PuzzleError::EmptyInput)}
    Ok(machines)
}

/// Sums the fewest presses over all machines; one unsolvable machine fails the lot.
pub fn total_presses(machines: &[Machine]) -> Result<u64> {
    machines.iter().enumerate().map(|(mi, machine)| {
        let presses = machine.fewest_presses().ok_or(PuzzleError::Unsolvable {machine: mi + 1})?;
        debug!(machine = mi + 1, diagram = %machine.diagram(), presses, "lights configured");
        Ok(presses as u64)
    }).sum()
}

pub fn total_configuring_presses(machines: &[Machine]) -> Result<u64> {
    machines.iter().enumerate().map(|(mi, machine)| {
        let presses = machine.fewest_configuring_presses(mi + 1)?;
        debug!(machine = mi + 1, joltages = ?machine.joltages, presses, "joltages configured");
        Ok(presses)
    }).sum()
}

pub fn run(part: u8, input: &str) -> Result<String> {
    let machines = parse(input)?;
    match part {
        1 => Ok(total_presses(&machines)?.to_string()),
        2 => Ok(total_configuring_presses(&machines)?.to_string()),
        p => Err(PuzzleError::UnknownPart(p)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    const EXAMPLE: &str = "[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1) {3,5,4,7}
[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4) {7,5,12,7,2}
[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2) {10,11,11,5,10,5}
";

    fn machine(line: &str) -> Machine {
        Machine::parse(0, line).unwrap()
    }

    #[test]
    fn example() -> anyhow::Result<()> {
        assert_eq!(run(1, EXAMPLE)?, "7");
        assert_eq!(run(2, EXAMPLE)?, "33");
        Ok(())
    }

    #[test]
    fn example_machines() {
        let machines = parse(EXAMPLE).unwrap();
        let presses = machines.iter().map(|m| m.fewest_presses()).collect::<Vec<_>>();
        assert_eq!(presses, vec![Some(2), Some(3), Some(2)]);
        let configuring = machines.iter().map(|m| m.fewest_configuring_presses(1).ok()).collect::<Vec<_>>();
        assert_eq!(configuring, vec![Some(10), Some(12), Some(11)]);
    }

    #[test]
    fn parses_goal_with_lamp_zero_first() {
        let m = machine("[...#.] (0,2,3,4) (2,3) {7,5,12,7,2}");
        assert_eq!(m.goal, 0b01000);
        assert_eq!(m.width, 5);
        assert_eq!(m.buttons[1], Button {lamps: vec![2, 3]});
        assert_eq!(m.joltages, vec![7, 5, 12, 7, 2]);
    }

    #[test]
    fn diagram_round_trips() {
        for diagram in ["[.##.]", "[...#.]", "[#]", "[.###.#]", "[..]"] {
            let m = machine(diagram);
            assert_eq!(m.diagram(), diagram);
            assert_eq!(machine(&m.diagram()).goal, m.goal);
        }
    }

    #[test]
    fn button_press_is_an_involution() {
        let m = machine("[.###.#] (0,1,2,3,4) (0,3,4) (0,1,2,4,5) (1,2)");
        for button in &m.buttons {
            let mut lights = 0b101101;
            button.press(&mut lights);
            assert_ne!(lights, 0b101101);
            button.press(&mut lights);
            assert_eq!(lights, 0b101101);
        }
    }

    #[test]
    fn matches_pressing_each_button_at_most_once() {
        for m in parse(EXAMPLE).unwrap() {
            let brute = m.buttons.iter().powerset()
                .filter(|set| set.iter().fold(0, |lights, b| lights ^ b.mask()) == m.goal)
                .map(|set| set.len() as u32)
                .min();
            assert_eq!(m.fewest_presses(), brute);
        }
    }

    #[test]
    fn all_off_goal_needs_no_presses() {
        assert_eq!(machine("[..]").fewest_presses(), Some(0));
        assert_eq!(machine("[....] (0,1) (2)").fewest_presses(), Some(0));
    }

    #[test]
    fn one_press_per_lamp() {
        assert_eq!(machine("[##] (0) (1)").fewest_presses(), Some(2));
        assert_eq!(machine("[##] [0] [1]").fewest_presses(), Some(2));
    }

    #[test]
    fn parity_locked_goal_is_unsolvable() {
        let machines = parse("[#.] (0,1) {1,0}").unwrap();
        assert_eq!(machines[0].fewest_presses(), None);
        assert!(matches!(total_presses(&machines), Err(PuzzleError::Unsolvable {machine: 1})));
        assert!(matches!(run(1, "[##] (0) (1)\n[#.] (0,1)\n"), Err(PuzzleError::Unsolvable {machine: 2})));
    }

    #[test]
    fn totals_add_up_and_repeat() {
        let machines = parse("[.##.] (3) (1,3) (2) (2,3) (0,2) (0,1)\n[...#.] (0,2,3,4) (2,3) (0,4) (0,1,2) (1,2,3,4)\n").unwrap();
        assert_eq!(total_presses(&machines).unwrap(), 5);
        assert_eq!(total_presses(&machines).unwrap(), 5);
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert!(matches!(Machine::parse(0, ".##. (0)"), Err(PuzzleError::Parse {..})));
        assert!(matches!(Machine::parse(0, "[.#x.] (0)"), Err(PuzzleError::Parse {..})));
        assert!(matches!(Machine::parse(0, "[.##.] (0,a)"), Err(PuzzleError::Parse {..})));
        assert!(matches!(Machine::parse(0, "[.##.] (4)"), Err(PuzzleError::Parse {..})));
        assert!(matches!(Machine::parse(0, "[.##.] (0) {1,2}"), Err(PuzzleError::Parse {..})));
        assert!(matches!(Machine::parse(0, "{1,2}"), Err(PuzzleError::Parse {..})));
        assert!(matches!(parse("\n\n"), Err(PuzzleError::EmptyInput)));
    }

    #[test]
    fn joltage_targets_out_of_reach() {
        assert!(matches!(machine("[#.] (0,1) {1,0}").fewest_configuring_presses(1), Err(PuzzleError::Unsolvable {machine: 1})));
        assert_eq!(machine("[##] (0,1) (1) {2,5}").fewest_configuring_presses(1).unwrap(), 5);
    }

    #[test]
    fn configuring_needs_joltages() {
        assert!(matches!(machine("[##] (0) (1)").fewest_configuring_presses(1), Err(PuzzleError::NoJoltages {machine: 1})));
        assert!(matches!(run(2, "[##] (0) (1) {1,1}\n[##] (0) (1)\n"), Err(PuzzleError::NoJoltages {machine: 2})));
        assert!(matches!(run(2, "[##] (0) (1)"), Err(PuzzleError::NoJoltages {machine: 1})));
    }

    #[test]
    fn configuring_caps_button_count() {
        let line = format!("[#] {} {{1}}", vec!["(0)"; MAX_CONFIGURABLE_BUTTONS + 1].join(" "));
        assert!(matches!(machine(&line).fewest_configuring_presses(1), Err(PuzzleError::TooManyButtons {machine: 1, buttons: 25})));
        let line = format!("[#] {} {{1}}", vec!["(0)"; 40].join(" "));
        assert!(matches!(run(2, &line), Err(PuzzleError::TooManyButtons {machine: 1, buttons: 40})));
        assert_eq!(machine(&line).fewest_presses(), Some(1));
    }

    #[test]
    fn trailing_square_list_is_a_button() {
        let m = machine("[###] [0] [1] [2] [1,2]");
        assert_eq!(m.buttons.len(), 4);
        assert!(m.joltages.is_empty());
        assert_eq!(m.fewest_presses(), Some(2));
    }
}
