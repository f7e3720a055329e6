use itertools::Itertools;

use super::Solver;
use crate::problem::{parse_num, parse_nums, Answer, Input, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Race {
    time: u64,
    record: u64,
}

impl Race {
    fn beaten_by(&self, hold: u64) -> bool {
        hold as u128 * (self.time - hold) as u128 > self.record as u128
    }

    /// Number of hold times that travel further than the record.
    ///
    /// Winning holds form a range `lo..=time - lo` symmetric around
    /// `time / 2`. The float root is only a starting point; the bound is
    /// settled with exact integer checks.
    pub fn ways_to_win(&self) -> u64 {
        let half = self.time / 2;

        if !self.beaten_by(half) {
            return 0;
        }

        let t = self.time as f64;
        let disc = (t * t - 4.0 * self.record as f64).max(0.0);
        let mut lo = (((t - disc.sqrt()) / 2.0).floor().max(0.0) as u64).min(half);

        while lo > 0 && self.beaten_by(lo - 1) {
            lo -= 1;
        }

        while !self.beaten_by(lo) {
            lo += 1;
        }

        self.time - 2 * lo + 1
    }
}

fn parse_row<'a>(
    line: Option<&'a str>,
    label: &str,
    line_no: usize,
) -> Result<&'a str, ParseError> {
    line.and_then(|l| l.strip_prefix(label))
        .ok_or_else(|| ParseError::line(line_no, format!("expected '{label}'")))
}

fn parse(input: &Input) -> Result<(Vec<Race>, Race), ParseError> {
    let mut lines = input.lines();
    let times = parse_row(lines.next(), "Time:", 1)?;
    let records = parse_row(lines.next(), "Distance:", 2)?;

    let time_values = parse_nums::<u64>(times, 1)?;
    let record_values = parse_nums::<u64>(records, 2)?;

    if time_values.len() != record_values.len() {
        return Err(ParseError::line(2, "one record per race expected"));
    }

    let races = time_values
        .into_iter()
        .zip(record_values)
        .map(|(time, record)| Race { time, record })
        .collect_vec();

    let joined = Race {
        time: parse_num(&times.split_whitespace().join(""), 1)?,
        record: parse_num(&records.split_whitespace().join(""), 2)?,
    };

    Ok((races, joined))
}

pub struct WaitForIt;

impl Solver for WaitForIt {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let (races, joined) = parse(input)?;
        let part1: u64 = races.iter().map(Race::ways_to_win).product();
        let part2 = joined.ways_to_win();

        Ok(Answer::new(part1 as i64, part2 as i64))
    }
}
