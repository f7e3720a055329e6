use std::collections::{HashMap, VecDeque};

use itertools::Itertools;

use super::Solver;
use crate::problem::{parse_num, Answer, Input, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brick {
    lo: [usize; 3],
    hi: [usize; 3],
}

impl Brick {
    fn parse(line: &str, line_no: usize) -> Result<Self, ParseError> {
        let (a, b) = line
            .split_once('~')
            .ok_or_else(|| ParseError::line(line_no, "missing '~'"))?;

        let end = |s: &str| -> Result<[usize; 3], ParseError> {
            let v = s
                .split(',')
                .map(|t| parse_num(t, line_no))
                .collect::<Result<Vec<usize>, _>>()?;
            v.try_into()
                .map_err(|_| ParseError::line(line_no, "expected x,y,z"))
        };

        let (a, b) = (end(a)?, end(b)?);
        let lo = [0, 1, 2].map(|i| a[i].min(b[i]));
        let hi = [0, 1, 2].map(|i| a[i].max(b[i]));

        Ok(Self { lo, hi })
    }

    fn footprint(&self) -> impl Iterator<Item = (usize, usize)> {
        (self.lo[0]..=self.hi[0]).cartesian_product(self.lo[1]..=self.hi[1])
    }
}

/// Support relations between settled bricks.
#[derive(Debug, Clone)]
pub struct Pile {
    above: Vec<Vec<usize>>,
    below: Vec<Vec<usize>>,
}

impl Pile {
    /// Drops the bricks lowest first until each rests on the ground or on
    /// another brick.
    pub fn settle(mut bricks: Vec<Brick>) -> Self {
        bricks.sort_by_key(|b| b.lo[2]);

        // (x, y) -> (top z, brick)
        let mut tops: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
        let mut above = vec![vec![]; bricks.len()];
        let mut below = vec![vec![]; bricks.len()];

        for (id, brick) in bricks.iter().enumerate() {
            let rest = brick
                .footprint()
                .filter_map(|xy| tops.get(&xy).map(|&(z, _)| z))
                .max()
                .unwrap_or(0);

            let supporters = brick
                .footprint()
                .filter_map(|xy| tops.get(&xy).copied())
                .filter(|&(z, _)| rest > 0 && z == rest)
                .map(|(_, other)| other)
                .unique()
                .collect_vec();

            for &other in supporters.iter() {
                above[other].push(id);
            }

            below[id] = supporters;

            let top = rest + 1 + brick.hi[2] - brick.lo[2];

            for xy in brick.footprint() {
                tops.insert(xy, (top, id));
            }
        }

        Self { above, below }
    }

    /// Bricks that hold up nothing on their own.
    pub fn safe_to_remove(&self) -> usize {
        (0..self.above.len())
            .filter(|&id| self.above[id].iter().all(|&a| self.below[a].len() > 1))
            .count()
    }

    /// Number of other bricks that fall if `id` is removed.
    fn chain_reaction(&self, id: usize) -> usize {
        let mut fallen = vec![false; self.above.len()];
        let mut queue = VecDeque::from([id]);
        let mut count = 0;
        fallen[id] = true;

        while let Some(current) = queue.pop_front() {
            for &a in self.above[current].iter() {
                if !fallen[a] && self.below[a].iter().all(|&b| fallen[b]) {
                    fallen[a] = true;
                    count += 1;
                    queue.push_back(a);
                }
            }
        }

        count
    }

    pub fn total_falls(&self) -> usize {
        (0..self.above.len()).map(|id| self.chain_reaction(id)).sum()
    }
}

pub struct SandSlabs;

impl Solver for SandSlabs {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let bricks = input
            .lines()
            .enumerate()
            .map(|(i, line)| Brick::parse(line, i + 1))
            .collect::<Result<Vec<_>, _>>()?;
        let pile = Pile::settle(bricks);

        Ok(Answer::new(
            pile.safe_to_remove() as i64,
            pile.total_falls() as i64,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        1,0,1~1,2,1
        0,0,2~2,0,2
        0,2,3~2,2,3
        0,0,4~0,2,4
        2,0,5~2,2,5
        0,1,6~2,1,6
        1,1,8~1,1,9
    "};

    #[test]
    fn example() {
        let answer = SandSlabs.solve(&Input::new(EXAMPLE)).unwrap();
        assert_eq!(answer, Answer::new(5, 7));
    }

    #[test]
    fn tower_of_cubes() {
        let bricks = ["0,0,1~0,0,1", "0,0,5~0,0,5", "0,0,9~0,0,9"]
            .iter()
            .map(|l| Brick::parse(l, 1).unwrap())
            .collect();
        let pile = Pile::settle(bricks);

        assert_eq!(pile.safe_to_remove(), 1);
        assert_eq!(pile.total_falls(), 2 + 1);
    }

    #[test]
    fn reversed_ends() {
        let brick = Brick::parse("2,0,5~0,0,5", 1).unwrap();
        assert_eq!(brick.lo, [0, 0, 5]);
        assert_eq!(brick.hi, [2, 0, 5]);
        assert!(Brick::parse("1,2~3,4", 1).is_err());
    }
}
