use std::collections::{HashMap, VecDeque};

use smallvec::SmallVec;

use super::Solver;
use crate::problem::{parse_num, Answer, Input, ParseError, SolveError};

const START: &str = "in";
const RATING_MIN: u64 = 1;
const RATING_MAX: u64 = 4000;

type Part = [u64; 4];

/// Inclusive rating bounds per category.
type PartRange = [(u64, u64); 4];

fn category(c: char) -> Option<usize> {
    "xmas".find(c)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cmp {
    Less,
    Greater,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Rule {
    condition: Option<(usize, Cmp, u64)>,
    target: String,
}

impl Rule {
    fn parse(s: &str, line_no: usize) -> Result<Self, ParseError> {
        let Some((cond, target)) = s.split_once(':') else {
            return Ok(Self {
                condition: None,
                target: s.to_string(),
            });
        };

        let mut chars = cond.chars();
        let cat = chars.next().and_then(category);
        let cmp = match chars.next() {
            Some('<') => Some(Cmp::Less),
            Some('>') => Some(Cmp::Greater),
            _ => None,
        };

        let (Some(cat), Some(cmp)) = (cat, cmp) else {
            return Err(ParseError::line(line_no, format!("bad condition {cond:?}")));
        };

        Ok(Self {
            condition: Some((cat, cmp, parse_num(&cond[2..], line_no)?)),
            target: target.to_string(),
        })
    }

    fn matches(&self, part: &Part) -> bool {
        match self.condition {
            None => true,
            Some((cat, Cmp::Less, v)) => part[cat] < v,
            Some((cat, Cmp::Greater, v)) => part[cat] > v,
        }
    }

    /// Splits `range` into the part this rule sends on and the part that
    /// falls through to the next rule.
    fn split(&self, range: PartRange) -> (Option<PartRange>, Option<PartRange>) {
        let Some((cat, cmp, v)) = self.condition else {
            return (Some(range), None);
        };

        let (lo, hi) = range[cat];
        let (hit, miss) = match cmp {
            Cmp::Less => ((lo, hi.min(v.saturating_sub(1))), (lo.max(v), hi)),
            Cmp::Greater => ((lo.max(v + 1), hi), (lo, hi.min(v))),
        };

        let with = |bounds: (u64, u64)| {
            (bounds.0 <= bounds.1).then(|| {
                let mut r = range;
                r[cat] = bounds;
                r
            })
        };

        (with(hit), with(miss))
    }
}

#[derive(Debug, Clone)]
pub struct System {
    workflows: HashMap<String, SmallVec<[Rule; 4]>>,
    parts: Vec<Part>,
}

impl System {
    fn parse(input: &Input) -> Result<Self, ParseError> {
        let mut workflows = HashMap::new();
        let mut parts = vec![];

        for (i, line) in input.lines().enumerate() {
            let line_no = i + 1;
            let line = line.trim();

            if line.is_empty() {
                continue;
            }

            let body = |s: &str| -> Result<String, ParseError> {
                let (_, rest) = s
                    .split_once('{')
                    .ok_or_else(|| ParseError::line(line_no, "missing '{'"))?;
                rest.strip_suffix('}')
                    .map(str::to_string)
                    .ok_or_else(|| ParseError::line(line_no, "missing '}'"))
            };

            if line.starts_with('{') {
                let mut part = [0; 4];

                for rating in body(line)?.split(',') {
                    let (name, value) = rating.split_once('=').ok_or_else(|| {
                        ParseError::line(line_no, format!("bad rating {rating:?}"))
                    })?;
                    let cat = name.chars().next().and_then(category).ok_or_else(|| {
                        ParseError::line(line_no, format!("bad category {name:?}"))
                    })?;
                    part[cat] = parse_num(value, line_no)?;
                }

                parts.push(part);
            } else {
                let name = line.split('{').next().unwrap_or_default().to_string();
                let rules = body(line)?
                    .split(',')
                    .map(|r| Rule::parse(r, line_no))
                    .collect::<Result<SmallVec<_>, _>>()?;
                workflows.insert(name, rules);
            }
        }

        Ok(Self { workflows, parts })
    }

    fn workflow(&self, name: &str) -> Result<&[Rule], SolveError> {
        self.workflows
            .get(name)
            .map(|rules| rules.as_slice())
            .ok_or_else(|| SolveError::MissingNode(name.to_string()))
    }

    fn accepts(&self, part: &Part) -> Result<bool, SolveError> {
        let mut name = START;

        // a part visits each workflow at most once unless the rules loop
        for _ in 0..=self.workflows.len() {
            match name {
                "A" => return Ok(true),
                "R" => return Ok(false),
                _ => {}
            }

            let rules = self.workflow(name)?;
            name = rules
                .iter()
                .find(|r| r.matches(part))
                .map(|r| r.target.as_str())
                .ok_or(SolveError::Unsolvable("workflow has no matching rule"))?;
        }

        Err(SolveError::Unsolvable("workflows loop"))
    }

    pub fn accepted_rating_sum(&self) -> Result<u64, SolveError> {
        let mut total = 0;

        for part in self.parts.iter() {
            if self.accepts(part)? {
                total += part.iter().sum::<u64>();
            }
        }

        Ok(total)
    }

    /// Number of rating combinations in `1..=4000` that end up accepted.
    pub fn accepted_combinations(&self) -> Result<u64, SolveError> {
        let mut total = 0;
        let mut queue = VecDeque::new();
        queue.push_back((START, [(RATING_MIN, RATING_MAX); 4], 0));

        while let Some((name, range, depth)) = queue.pop_front() {
            // an acyclic range path visits each workflow at most once
            if depth > self.workflows.len() {
                return Err(SolveError::Unsolvable("workflows loop"));
            }

            let mut rest = Some(range);

            for rule in self.workflow(name)? {
                let Some(current) = rest else {
                    break;
                };

                let (hit, miss) = rule.split(current);
                rest = miss;

                let Some(hit) = hit else {
                    continue;
                };

                match rule.target.as_str() {
                    "A" => total += hit.iter().map(|(lo, hi)| hi - lo + 1).product::<u64>(),
                    "R" => {}
                    target => queue.push_back((target, hit, depth + 1)),
                }
            }
        }

        Ok(total)
    }
}

pub struct Aplenty;

impl Solver for Aplenty {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let system = System::parse(input)?;
        let part1 = system.accepted_rating_sum()?;
        let part2 = system.accepted_combinations()?;

        Ok(Answer::new(part1 as i64, part2 as i64))
    }
}
