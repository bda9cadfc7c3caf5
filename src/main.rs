use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod day01;
mod day02;
mod day03;
mod day04;
mod day05;
mod day06;
mod day07;
mod day08;
mod day09;
mod day10;
mod error;

type Solver = fn(u8, &str) -> error::Result<String>;

const DAYS: [Solver; 10] = [
    day01::run, day02::run, day03::run, day04::run, day05::run,
    day06::run, day07::run, day08::run, day09::run, day10::run,
];

/// Solves one part of one day's puzzle and prints the answer.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Day number
    #[arg(value_parser = clap::value_parser!(u8).range(1..=DAYS.len() as i64))]
    day: u8,

    /// Puzzle part, 1 or 2
    #[arg(value_parser = clap::value_parser!(u8).range(1..=2))]
    part: u8,

    /// Read day<DAY>test<TEST>.in instead of day<DAY>.in
    #[arg(short, long)]
    test: Option<u32>,

    /// Input file, overriding the name derived from the day
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print the elapsed time after the answer
    #[arg(long)]
    time: bool,
}

impl Args {
    fn input_path(&self) -> PathBuf {
        match (&self.input, self.test) {
            (Some(path), _) => path.clone(),
            (None, Some(test)) => PathBuf::from(format!("day{}test{}.in", self.day, test)),
            (None, None) => PathBuf::from(format!("day{}.in", self.day)),
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();

    let args = Args::parse();
    let fname = args.input_path();
    info!(day = args.day, part = args.part, input = %fname.display(), "solving");

    let input = std::fs::read_to_string(&fname)
        .with_context(|| format!("cannot read {}", fname.display()))?;
    let time = std::time::Instant::now();
    let answer = DAYS[args.day as usize - 1](args.part, &input)
        .with_context(|| format!("day {} part {} failed", args.day, args.part))?;
    let elapsed = time.elapsed();
    info!(elapsed = ?elapsed, "solved");

    println!("{}", answer);
    if args.time {
        println!("{} seconds elapsed", elapsed.as_secs_f32());
    }
    Ok(())
}
