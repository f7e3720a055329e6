use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::debug;

use super::Solver;
use crate::{
    problem::{Answer, Coord, Dir, Grid, Input, ParseError, SolveError},
    util::ChangeMinMax,
};

/// Straight-run limits for a crucible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunLimits {
    pub min: usize,
    pub max: usize,
}

impl RunLimits {
    pub const CRUCIBLE: Self = Self::new(0, 3);
    pub const ULTRA_CRUCIBLE: Self = Self::new(4, 10);

    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

pub struct ClumsyCrucible;

impl Solver for ClumsyCrucible {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let map = parse(input)?;
        debug!(width = map.width(), height = map.height(), "heat loss map");

        let part1 = min_heat_loss(&map, RunLimits::CRUCIBLE)
            .ok_or(SolveError::Unsolvable("crucible cannot reach the factory"))?;
        let part2 = min_heat_loss(&map, RunLimits::ULTRA_CRUCIBLE)
            .ok_or(SolveError::Unsolvable("ultra crucible cannot reach the factory"))?;

        Ok(Answer::new(part1 as i64, part2 as i64))
    }
}

fn parse(input: &Input) -> Result<Grid<u32>, ParseError> {
    let grid = input.grid()?;

    grid.try_map(|c, &b| match b {
        b'0'..=b'9' => Ok((b - b'0') as u32),
        _ => Err(grid.unexpected(c)),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct State {
    cost: u32,
    coord: Coord,
    dir: Dir,
    run: usize,
}

/// Minimum heat loss from the top-left block to the bottom-right block.
///
/// States are `(block, incoming direction, run length)`. The start block is
/// exempt from the minimum run and the no-reverse rule. The cost of the start
/// block itself is never paid.
pub fn min_heat_loss(map: &Grid<u32>, limits: RunLimits) -> Option<u32> {
    let start = Coord::new(0, 0);
    let goal = Coord::new(map.height() - 1, map.width() - 1);

    if start == goal {
        return Some(0);
    }

    if limits.max == 0 {
        return None;
    }

    let key = |c: Coord, dir: Dir, run: usize| {
        (map.index_of(c) * Dir::ALL.len() + dir.index()) * limits.max + run - 1
    };

    let mut best = vec![u32::MAX; map.len() * Dir::ALL.len() * limits.max];
    let mut queue = BinaryHeap::new();
    let mut expanded = 0usize;

    queue.push(Reverse(State {
        cost: 0,
        coord: start,
        dir: Dir::N,
        run: 0,
    }));

    while let Some(Reverse(state)) = queue.pop() {
        // stale entry
        if state.run > 0 && best[key(state.coord, state.dir, state.run)] < state.cost {
            continue;
        }

        expanded += 1;
        let at_start = state.coord == start;

        for dir in Dir::ALL {
            if dir == state.dir && state.run == limits.max {
                continue;
            }

            if !at_start && dir != state.dir && state.run < limits.min {
                continue;
            }

            if !at_start && dir == state.dir.rev() {
                continue;
            }

            let Some(next) = map.step(state.coord, dir) else {
                continue;
            };

            let run = if dir == state.dir { state.run + 1 } else { 1 };
            let cost = state.cost + map[next];

            if !best[key(next, dir, run)].change_min(cost) {
                continue;
            }

            queue.push(Reverse(State {
                cost,
                coord: next,
                dir,
                run,
            }));
        }
    }

    debug!(expanded, ?limits, "search finished");

    Dir::ALL
        .iter()
        .flat_map(|&dir| (1..=limits.max).map(move |run| (dir, run)))
        .map(|(dir, run)| best[key(goal, dir, run)])
        .filter(|&cost| cost != u32::MAX)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        2413432311323
        3215453535623
        3255245654254
        3446585845452
        4546657867536
        1438598798454
        4457876987766
        3637877979653
        4654967986887
        4564679986453
        1224686865563
        2546548887735
        4322674655533
    "};

    fn heat_map(s: &str) -> Grid<u32> {
        parse(&Input::new(s)).unwrap()
    }

    #[test]
    fn example() {
        let answer = ClumsyCrucible.solve(&Input::new(EXAMPLE)).unwrap();
        assert_eq!(answer, Answer::new(102, 94));
    }

    #[test]
    fn long_corridor() {
        let map = heat_map(indoc! {"
            111111111111
            999999999991
            999999999991
            999999999991
            999999999991
        "});

        assert_eq!(min_heat_loss(&map, RunLimits::CRUCIBLE), Some(59));
        assert_eq!(min_heat_loss(&map, RunLimits::ULTRA_CRUCIBLE), Some(47));
    }

    #[test]
    fn single_block() {
        let map = heat_map("7\n");
        assert_eq!(min_heat_loss(&map, RunLimits::CRUCIBLE), Some(0));
        assert_eq!(min_heat_loss(&map, RunLimits::ULTRA_CRUCIBLE), Some(0));
    }

    #[test]
    fn max_run_is_enforced() {
        // five steps east with no room to weave
        let map = heat_map("511111\n");
        assert_eq!(min_heat_loss(&map, RunLimits::CRUCIBLE), None);
        assert_eq!(min_heat_loss(&map, RunLimits::new(0, 5)), Some(5));
    }

    #[test]
    fn min_run_is_enforced() {
        let map = heat_map("12\n34\n");
        assert_eq!(min_heat_loss(&map, RunLimits::CRUCIBLE), Some(6));
        assert_eq!(min_heat_loss(&map, RunLimits::ULTRA_CRUCIBLE), None);

        let map = heat_map("51111\n");
        assert_eq!(min_heat_loss(&map, RunLimits::ULTRA_CRUCIBLE), Some(4));
    }

    #[test]
    fn cheaper_detour_beats_straight_line() {
        // the straight route along the top row costs 9 per block
        let map = heat_map(indoc! {"
            1999
            1119
            9911
        "});
        assert_eq!(min_heat_loss(&map, RunLimits::CRUCIBLE), Some(5));
    }

    #[test]
    fn unsolvable_is_an_error() {
        let err = ClumsyCrucible.solve(&Input::new("12\n34\n")).unwrap_err();
        assert!(err.to_string().contains("ultra crucible"));
    }

    #[test]
    fn rejects_non_digits() {
        assert!(matches!(
            parse(&Input::new("12\n3x\n")),
            Err(ParseError::UnexpectedCell { cell: 'x', row: 1, col: 1 })
        ));
    }
}
