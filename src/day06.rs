use itertools::Itertools;

use crate::error::{PuzzleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {Add, Mul}

impl Op {
    fn apply(self, numbers: &[u64]) -> u64 {
        match self {
            Op::Add => numbers.iter().sum(),
            Op::Mul => numbers.iter().product(),
        }
    }
}

struct Worksheet<'a> {
    rows: Vec<&'a str>,
    ops: Vec<Op>,
}

impl<'a> Worksheet<'a> {
    fn parse(input: &'a str) -> Result<Self> {
        // leading spaces are significant, so only trailing blank lines are dropped
        let mut rows = input.lines().collect::<Vec<_>>();
        while rows.last().is_some_and(|row| row.trim().is_empty()) {rows.pop();}
        let op_line = rows.pop().ok_or(PuzzleError::EmptyInput)?;
        let ln = rows.len();
        let ops = op_line.split_whitespace().map(|op| match op {
            "+" => Ok(Op::Add),
            "*" => Ok(Op::Mul),
            _ => Err(PuzzleError::parse(ln, format!("unknown operator {:?}", op))),
        }).collect::<Result<Vec<_>>>()?;
        if rows.is_empty() || ops.is_empty() {return Err(PuzzleError::EmptyInput)}
        Ok(Worksheet {rows, ops})
    }

    /// Numbers read left to right along each row.
    fn by_rows(&self) -> Result<Vec<Vec<u64>>> {
        let mut problems = vec![vec![]; self.ops.len()];
        for (ri, row) in self.rows.iter().enumerate() {
            let numbers = row.split_whitespace().map(str::parse::<u64>).collect::<std::result::Result<Vec<_>, _>>()?;
            if numbers.len() != self.ops.len() {
                return Err(PuzzleError::parse(ri, format!("expected {} numbers, got {}", self.ops.len(), numbers.len())));
            }
            for (problem, n) in problems.iter_mut().zip(numbers) {problem.push(n)}
        }
        Ok(problems)
    }

    /// Numbers read top to bottom along each character column; blank columns separate problems.
    fn by_columns(&self) -> Result<Vec<Vec<u64>>> {
        let width = self.rows.iter().map(|row| row.len()).max().unwrap_or(0);
        let columns = (0 .. width).map(|ci| {
            self.rows.iter().filter_map(|row| row.as_bytes().get(ci).copied())
                .filter(|&b| b != b' ').map(char::from).collect::<String>()
        }).collect::<Vec<_>>();
        let chunks = columns.iter().chunk_by(|column| column.is_empty());
        let problems = (&chunks).into_iter()
            .filter(|(blank, _)| !blank)
            .map(|(_, group)| group.map(|column| column.parse::<u64>()).collect::<std::result::Result<Vec<_>, _>>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        if problems.len() != self.ops.len() {
            return Err(PuzzleError::parse(self.rows.len(), format!("expected {} problems, got {}", self.ops.len(), problems.len())));
        }
        Ok(problems)
    }

    fn grand_total(&self, problems: &[Vec<u64>]) -> u64 {
        self.ops.iter().zip(problems).map(|(op, numbers)| op.apply(numbers)).sum()
    }
}

pub fn run(part: u8, input: &str) -> Result<String> {
    let sheet = Worksheet::parse(input)?;
    let problems = match part {
        1 => sheet.by_rows()?,
        2 => sheet.by_columns()?,
        p => return Err(PuzzleError::UnknownPart(p)),
    };
    Ok(sheet.grand_total(&problems).to_string())
}
