use itertools::Itertools;
use tracing::debug;

use super::Solver;
use crate::problem::{parse_nums, Answer, Input, ParseError, SolveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MapRange {
    dest: i64,
    src: i64,
    len: i64,
}

impl MapRange {
    fn src_end(&self) -> i64 {
        self.src + self.len
    }

    fn shift(&self) -> i64 {
        self.dest - self.src
    }

    fn contains(&self, v: i64) -> bool {
        self.src <= v && v < self.src_end()
    }
}

#[derive(Debug, Clone)]
pub struct Almanac {
    seeds: Vec<i64>,
    stages: Vec<Vec<MapRange>>,
}

impl Almanac {
    fn parse(input: &Input) -> Result<Self, ParseError> {
        let mut lines = input.lines().enumerate().map(|(i, line)| (i + 1, line));
        let (_, first) = lines.next().ok_or(ParseError::Empty)?;
        let seeds = first
            .strip_prefix("seeds:")
            .ok_or_else(|| ParseError::line(1, "expected 'seeds:'"))?;
        let seeds = parse_nums(seeds, 1)?;

        let mut stages: Vec<Vec<MapRange>> = vec![];

        for (line_no, line) in lines {
            if line.trim().is_empty() {
                continue;
            }

            if line.trim_end().ends_with("map:") {
                stages.push(vec![]);
                continue;
            }

            let nums = parse_nums::<i64>(line, line_no)?;

            let [dest, src, len] = nums[..] else {
                return Err(ParseError::line(line_no, "expected 3 numbers"));
            };

            stages
                .last_mut()
                .ok_or_else(|| ParseError::line(line_no, "range before any map header"))?
                .push(MapRange { dest, src, len });
        }

        Ok(Self { seeds, stages })
    }

    fn location(&self, seed: i64) -> i64 {
        self.stages.iter().fold(seed, |v, stage| {
            stage
                .iter()
                .find(|r| r.contains(v))
                .map_or(v, |r| v + r.shift())
        })
    }

    /// Lowest location reachable from any individual seed.
    pub fn lowest_location(&self) -> Option<i64> {
        self.seeds.iter().map(|&s| self.location(s)).min()
    }

    /// Lowest location when the seed line holds `(start, length)` pairs.
    pub fn lowest_location_of_ranges(&self) -> Result<Option<i64>, SolveError> {
        if self.seeds.len() % 2 != 0 {
            return Err(SolveError::Unsolvable("seed ranges need an even number of values"));
        }

        let mut intervals = self
            .seeds
            .iter()
            .tuples()
            .map(|(&start, &len)| (start, start + len))
            .filter(|(start, end)| start < end)
            .collect_vec();

        for stage in self.stages.iter() {
            intervals = map_intervals(stage, intervals);
            debug!(intervals = intervals.len(), "mapped stage");
        }

        Ok(intervals.iter().map(|&(start, _)| start).min())
    }
}

/// Maps half-open intervals through one stage, splitting them on range
/// boundaries. Unmapped parts keep their values.
fn map_intervals(stage: &[MapRange], intervals: Vec<(i64, i64)>) -> Vec<(i64, i64)> {
    let mut pending = intervals;
    let mut mapped = vec![];

    while let Some((start, end)) = pending.pop() {
        match stage.iter().find(|r| start < r.src_end() && r.src < end) {
            Some(r) => {
                let lo = start.max(r.src);
                let hi = end.min(r.src_end());
                mapped.push((lo + r.shift(), hi + r.shift()));

                if start < lo {
                    pending.push((start, lo));
                }

                if hi < end {
                    pending.push((hi, end));
                }
            }
            None => mapped.push((start, end)),
        }
    }

    mapped
}

pub struct SeedFertilizer;

impl Solver for SeedFertilizer {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let almanac = Almanac::parse(input)?;

        let part1 = almanac
            .lowest_location()
            .ok_or(SolveError::Unsolvable("no seeds"))?;
        let part2 = almanac
            .lowest_location_of_ranges()?
            .ok_or(SolveError::Unsolvable("no seed ranges"))?;

        Ok(Answer::new(part1, part2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        seeds: 79 14 55 13

        seed-to-soil map:
        50 98 2
        52 50 48

        soil-to-fertilizer map:
        0 15 37
        37 52 2
        39 0 15

        fertilizer-to-water map:
        49 53 8
        0 11 42
        42 0 7
        57 7 4

        water-to-light map:
        88 18 7
        18 25 70

        light-to-temperature map:
        45 77 23
        81 45 19
        68 64 13

        temperature-to-humidity map:
        0 69 1
        1 0 69

        humidity-to-location map:
        60 56 37
        56 93 4
    "};

    #[test]
    fn example() {
        let answer = SeedFertilizer.solve(&Input::new(EXAMPLE)).unwrap();
        assert_eq!(answer, Answer::new(35, 46));
    }

    #[test]
    fn seed_locations() {
        let almanac = Almanac::parse(&Input::new(EXAMPLE)).unwrap();
        let locations = [79, 14, 55, 13].map(|s| almanac.location(s));
        assert_eq!(locations, [82, 43, 86, 35]);
    }

    #[test]
    fn split_interval() {
        let stage = [MapRange {
            dest: 100,
            src: 10,
            len: 5,
        }];
        let mut mapped = map_intervals(&stage, vec![(5, 20)]);
        mapped.sort();
        assert_eq!(mapped, [(5, 10), (15, 20), (100, 105)]);
    }

    #[test]
    fn odd_seed_count() {
        let almanac = Almanac::parse(&Input::new("seeds: 1 2 3\n\nx map:\n1 1 1\n")).unwrap();
        assert!(almanac.lowest_location_of_ranges().is_err());
    }
}
