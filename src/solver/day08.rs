use std::collections::HashMap;

use tracing::debug;

use super::Solver;
use crate::{
    problem::{Answer, Input, ParseError, SolveError},
    util::lcm,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct Network {
    turns: Vec<Turn>,
    labels: Vec<String>,
    links: Vec<[usize; 2]>,
}

impl Network {
    fn parse(input: &Input) -> Result<Self, ParseError> {
        let mut lines = input.lines();
        let turns = lines
            .next()
            .ok_or(ParseError::Empty)?
            .trim()
            .chars()
            .map(|c| match c {
                'L' => Ok(Turn::Left),
                'R' => Ok(Turn::Right),
                _ => Err(ParseError::line(1, format!("unexpected instruction {c:?}"))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if turns.is_empty() {
            return Err(ParseError::line(1, "no instructions"));
        }

        let mut nodes = vec![];

        for (i, line) in lines.enumerate().map(|(i, l)| (i + 2, l)) {
            if line.trim().is_empty() {
                continue;
            }

            let parsed = line.split_once(" = ").and_then(|(label, links)| {
                let links = links.strip_prefix('(')?.strip_suffix(')')?;
                let (left, right) = links.split_once(", ")?;
                Some((i, label.trim(), left, right))
            });

            nodes.push(parsed.ok_or_else(|| ParseError::line(i, "expected 'AAA = (BBB, CCC)'"))?);
        }

        let index: HashMap<&str, usize> = nodes
            .iter()
            .enumerate()
            .map(|(i, &(_, label, _, _))| (label, i))
            .collect();

        let links = nodes
            .iter()
            .map(|&(line_no, _, left, right)| {
                let find = |l: &str| {
                    index
                        .get(l)
                        .copied()
                        .ok_or_else(|| ParseError::line(line_no, format!("unknown node {l:?}")))
                };
                Ok([find(left)?, find(right)?])
            })
            .collect::<Result<Vec<_>, ParseError>>()?;

        let labels = nodes.iter().map(|(_, l, _, _)| l.to_string()).collect();

        Ok(Self {
            turns,
            labels,
            links,
        })
    }

    fn find(&self, label: &str) -> Result<usize, SolveError> {
        self.labels
            .iter()
            .position(|l| l == label)
            .ok_or_else(|| SolveError::MissingNode(label.to_string()))
    }

    /// Steps from `start` until `done` holds, following the instructions
    /// cyclically. Gives up once every `(node, instruction)` state has been
    /// seen.
    fn steps(&self, start: usize, done: impl Fn(usize) -> bool) -> Result<u64, SolveError> {
        let limit = self.labels.len() * self.turns.len();
        let mut node = start;

        for (steps, turn) in self.turns.iter().cycle().enumerate() {
            if done(node) {
                return Ok(steps as u64);
            }

            if steps > limit {
                break;
            }

            node = self.links[node][*turn as usize];
        }

        Err(SolveError::Unsolvable("destination is never reached"))
    }

    pub fn steps_to_zzz(&self) -> Result<u64, SolveError> {
        let start = self.find("AAA")?;
        let goal = self.find("ZZZ")?;
        self.steps(start, |n| n == goal)
    }

    /// Every `..A` node walks to its first `..Z` node; the ghosts line up
    /// after the LCM of those distances.
    pub fn ghost_steps(&self) -> Result<u64, SolveError> {
        let mut total = 1;
        let mut ghosts = 0;

        for (start, label) in self.labels.iter().enumerate() {
            if !label.ends_with('A') {
                continue;
            }

            let steps = self.steps(start, |n| self.labels[n].ends_with('Z'))?;
            debug!(label = %label, steps, "ghost cycle");
            total = lcm(total, steps);
            ghosts += 1;
        }

        if ghosts == 0 {
            return Err(SolveError::MissingNode("..A".to_string()));
        }

        Ok(total)
    }
}

pub struct HauntedWasteland;

impl Solver for HauntedWasteland {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let network = Network::parse(input)?;
        let part1 = network.steps_to_zzz()?;
        let part2 = network.ghost_steps()?;

        Ok(Answer::new(part1 as i64, part2 as i64))
    }
}
