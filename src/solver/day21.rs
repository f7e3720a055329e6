use std::collections::{HashMap, VecDeque};

use tracing::debug;

use super::Solver;
use crate::problem::{Answer, Coord, Grid, Input, Params, ParseError, SolveError};

#[derive(Debug, Clone)]
pub struct Garden {
    rocks: Grid<bool>,
    start: Coord,
}

impl Garden {
    fn parse(input: &Input) -> Result<Self, ParseError> {
        let grid = input.grid()?;
        let start = grid
            .find(|&b| b == b'S')
            .ok_or_else(|| ParseError::line(1, "no start position"))?;
        let rocks = grid.try_map(|c, &b| match b {
            b'#' => Ok(true),
            b'.' | b'S' => Ok(false),
            _ => Err(grid.unexpected(c)),
        })?;

        Ok(Self { rocks, start })
    }

    fn is_rock(&self, row: i64, col: i64) -> bool {
        let row = row.rem_euclid(self.rocks.height() as i64) as usize;
        let col = col.rem_euclid(self.rocks.width() as i64) as usize;
        self.rocks[Coord::new(row, col)]
    }

    /// Plots on which the walk can end after exactly `steps` steps.
    ///
    /// A plot reached in `d <= steps` steps is an end point iff `d` has the
    /// parity of `steps`, since the walk can bounce back and forth.
    pub fn reachable(&self, steps: usize, infinite: bool) -> usize {
        let start = (self.start.row as i64, self.start.col as i64);
        let (height, width) = (self.rocks.height() as i64, self.rocks.width() as i64);
        let mut dist = HashMap::from([(start, 0usize)]);
        let mut queue = VecDeque::from([start]);

        while let Some((row, col)) = queue.pop_front() {
            let d = dist[&(row, col)];

            if d == steps {
                continue;
            }

            for (dr, dc) in [(-1, 0), (0, 1), (1, 0), (0, -1)] {
                let next = (row + dr, col + dc);

                let on_map = (0..height).contains(&next.0) && (0..width).contains(&next.1);

                if !infinite && !on_map {
                    continue;
                }

                if self.is_rock(next.0, next.1) || dist.contains_key(&next) {
                    continue;
                }

                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }

        dist.values().filter(|&&d| d % 2 == steps % 2).count()
    }

    /// Reachable plots on the tiled map for a large step count.
    ///
    /// Samples `r`, `r + n`, `r + 2n` steps (`n` the tile size, `r` the
    /// remainder of the target) and extends the quadratic through them.
    pub fn reachable_far(&self, target: usize) -> Result<u64, SolveError> {
        let size = self.rocks.height();

        if size != self.rocks.width() {
            return Err(SolveError::Unsolvable("extrapolation needs a square map"));
        }

        let rem = target % size;
        let samples = [0, 1, 2].map(|k| self.reachable(rem + k * size, true) as i64);
        debug!(?samples, "tiled samples");

        let far = extrapolate(samples, (target / size) as i64);
        u64::try_from(far).map_err(|_| SolveError::Unsolvable("extrapolation went negative"))
    }
}

/// Value at `n` of the quadratic through `(0, y0)`, `(1, y1)`, `(2, y2)`.
fn extrapolate([y0, y1, y2]: [i64; 3], n: i64) -> i64 {
    let first = y1 - y0;
    let second = y2 - 2 * y1 + y0;
    y0 + n * first + n * (n - 1) / 2 * second
}

pub struct StepCounter;

impl Solver for StepCounter {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let params = Params::get();
        let garden = Garden::parse(input)?;
        let part1 = garden.reachable(params.day21_steps, false);
        let part2 = garden.reachable_far(params.day21_target_steps)?;

        Ok(Answer::new(part1 as i64, part2 as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        ...........
        .....###.#.
        .###.##..#.
        ..#.#...#..
        ....#.#....
        .##..S####.
        .##..#...#.
        .......##..
        .##.#.####.
        .##..##.##.
        ...........
    "};

    fn garden() -> Garden {
        Garden::parse(&Input::new(EXAMPLE)).unwrap()
    }

    #[test]
    fn bounded_walk() {
        let garden = garden();
        assert_eq!(garden.reachable(0, false), 1);
        assert_eq!(garden.reachable(1, false), 2);
        assert_eq!(garden.reachable(6, false), 16);
    }

    #[test]
    fn tiled_walk() {
        let garden = garden();
        assert_eq!(garden.reachable(6, true), 16);
        assert_eq!(garden.reachable(10, true), 50);
        assert_eq!(garden.reachable(50, true), 1594);
        assert_eq!(garden.reachable(100, true), 6536);
    }

    #[test]
    fn quadratic_extrapolation() {
        // f(n) = 3n^2 + 2n + 1
        assert_eq!(extrapolate([1, 6, 17], 10), 321);
        assert_eq!(extrapolate([1, 6, 17], 2), 17);
    }

    #[test]
    fn requires_start() {
        assert!(Garden::parse(&Input::new("...\n.#.\n")).is_err());
    }
}
