use super::Solver;
use crate::problem::{Answer, Input};

const DIGIT_WORDS: [&str; 9] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

pub struct Trebuchet;

impl Solver for Trebuchet {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let (mut part1, mut part2) = (0, 0);

        for line in input.lines() {
            part1 += calibration_value(line, false);
            part2 += calibration_value(line, true);
        }

        Ok(Answer::new(part1 as i64, part2 as i64))
    }
}

fn digit_at(line: &[u8], i: usize, spelled: bool) -> Option<u32> {
    let rest = &line[i..];

    if rest[0].is_ascii_digit() {
        return Some((rest[0] - b'0') as u32);
    }

    if !spelled {
        return None;
    }

    DIGIT_WORDS
        .iter()
        .position(|w| rest.starts_with(w.as_bytes()))
        .map(|p| p as u32 + 1)
}

/// First and last digit of the line as a two-digit number, or 0 if the line
/// has no digit. Spelled digits may overlap (`twone` is 21).
pub fn calibration_value(line: &str, spelled: bool) -> u32 {
    let bytes = line.as_bytes();
    let first = (0..bytes.len()).find_map(|i| digit_at(bytes, i, spelled));
    let last = (0..bytes.len()).rev().find_map(|i| digit_at(bytes, i, spelled));

    match (first, last) {
        (Some(first), Some(last)) => first * 10 + last,
        _ => 0,
    }
}
