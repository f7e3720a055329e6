use std::collections::{HashMap, VecDeque};

use itertools::Itertools;
use rand::Rng;
use rand_pcg::Pcg64Mcg;
use tracing::{debug, info};

use super::Solver;
use crate::problem::{Answer, Input, Params, ParseError, SolveError};

const CUT_SIZE: usize = 3;
const MAX_ATTEMPTS: usize = 20;

#[derive(Debug, Clone)]
pub struct Wiring {
    labels: Vec<String>,
    edges: Vec<(usize, usize)>,
    /// (neighbour, edge) per component.
    adjacent: Vec<Vec<(usize, usize)>>,
}

impl Wiring {
    fn parse(input: &Input) -> Result<Self, ParseError> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut labels = vec![];
        let mut edges = vec![];

        for (i, line) in input.lines().enumerate() {
            let (name, others) = line
                .split_once(':')
                .ok_or_else(|| ParseError::line(i + 1, "missing ':'"))?;

            let mut id = |label| {
                let next = index.len();
                let id = *index.entry(label).or_insert(next);
                if id == next {
                    labels.push(label.to_string());
                }
                id
            };

            let a = id(name.trim());

            for other in others.split_whitespace() {
                edges.push((a, id(other)));
            }
        }

        let mut adjacent = vec![vec![]; labels.len()];

        for (e, &(a, b)) in edges.iter().enumerate() {
            adjacent[a].push((b, e));
            adjacent[b].push((a, e));
        }

        Ok(Self {
            labels,
            edges,
            adjacent,
        })
    }

    /// Adds one to every edge on a shortest path from `from` to `to`.
    fn record_path(&self, from: usize, to: usize, removed: &[bool], hits: &mut [usize]) {
        let mut parent: Vec<Option<(usize, usize)>> = vec![None; self.labels.len()];
        let mut seen = vec![false; self.labels.len()];
        let mut queue = VecDeque::from([from]);
        seen[from] = true;

        while let Some(v) = queue.pop_front() {
            if v == to {
                break;
            }

            for &(n, e) in self.adjacent[v].iter() {
                if removed[e] || seen[n] {
                    continue;
                }

                seen[n] = true;
                parent[n] = Some((v, e));
                queue.push_back(n);
            }
        }

        let mut v = to;

        while let Some((p, e)) = parent[v] {
            hits[e] += 1;
            v = p;
        }
    }

    fn component_size(&self, start: usize, removed: &[bool]) -> usize {
        let mut seen = vec![false; self.labels.len()];
        let mut queue = VecDeque::from([start]);
        let mut size = 1;
        seen[start] = true;

        while let Some(v) = queue.pop_front() {
            for &(n, e) in self.adjacent[v].iter() {
                if !removed[e] && !seen[n] {
                    seen[n] = true;
                    size += 1;
                    queue.push_back(n);
                }
            }
        }

        size
    }

    /// Cuts the edges most used by shortest paths between random pairs,
    /// one at a time, and returns the cut if it splits the graph.
    fn try_cut(&self, samples: usize, rng: &mut impl Rng) -> Option<Vec<usize>> {
        let n = self.labels.len();
        let mut removed = vec![false; self.edges.len()];
        let mut cut = vec![];

        for _ in 0..CUT_SIZE {
            let mut hits = vec![0; self.edges.len()];

            for _ in 0..samples {
                let a = rng.gen_range(0..n);
                let b = (a + rng.gen_range(1..n)) % n;
                self.record_path(a, b, &removed, &mut hits);
            }

            let (hottest, _) = hits
                .iter()
                .enumerate()
                .filter(|&(e, _)| !removed[e])
                .max_by_key(|&(_, &h)| h)?;

            removed[hottest] = true;
            cut.push(hottest);
        }

        (self.component_size(0, &removed) < n).then_some(cut)
    }

    /// Product of the group sizes after cutting the three connecting wires.
    pub fn split_product(&self, samples: usize, rng: &mut impl Rng) -> Result<u64, SolveError> {
        let n = self.labels.len();

        if n < 2 {
            return Err(SolveError::Unsolvable("need at least two components"));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let Some(cut) = self.try_cut(samples, rng) else {
                debug!(attempt, "cut did not split the graph");
                continue;
            };

            let mut removed = vec![false; self.edges.len()];
            cut.iter().for_each(|&e| removed[e] = true);

            let size = self.component_size(0, &removed);
            let wires = cut
                .iter()
                .map(|&e| {
                    let (a, b) = self.edges[e];
                    format!("{}/{}", self.labels[a], self.labels[b])
                })
                .join(", ");
            info!(wires = %wires, size, attempt, "graph split");

            return Ok((size * (n - size)) as u64);
        }

        Err(SolveError::Unsolvable("no three-wire cut found"))
    }
}

pub struct Snowverload;

impl Solver for Snowverload {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let params = Params::get();
        let wiring = Wiring::parse(input)?;
        let mut rng = Pcg64Mcg::new(params.seed.into());
        let part1 = wiring.split_product(params.day25_samples, &mut rng)?;

        Ok(Answer::single(part1 as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        jqt: rhn xhk nvd
        rsh: frs pzl lsr
        xhk: hfx
        cmg: qnr nvd lhk bvb
        rhn: xhk bvb hfx
        bvb: xhk hfx
        pzl: lsr hfx nvd
        qnr: nvd
        ntq: jqt hfx bvb xhk
        nvd: lhk
        lsr: lhk
        rzs: qnr cmg lsr rsh
        frs: qnr lhk lsr
    "};

    #[test]
    fn example() {
        let answer = Snowverload.solve(&Input::new(EXAMPLE)).unwrap();
        assert_eq!(answer, Answer::single(54));
    }

    #[test]
    fn parse_graph() {
        let wiring = Wiring::parse(&Input::new(EXAMPLE)).unwrap();
        assert_eq!(wiring.labels.len(), 15);
        assert_eq!(wiring.edges.len(), 33);
    }

    #[test]
    fn two_cliques_joined_by_three_wires() {
        // every component has at least four wires, so only the bridge cut works
        let input = Input::new(indoc! {"
            a1: a2 a3 a4 a5
            a2: a3 a4 a5
            a3: a4 a5
            a4: a5
            b1: b2 b3 b4 b5
            b2: b3 b4 b5
            b3: b4 b5
            b4: b5
            a1: b1
            a2: b2
            a3: b3
        "});
        let wiring = Wiring::parse(&input).unwrap();
        let mut rng = Pcg64Mcg::new(7);

        assert_eq!(wiring.split_product(500, &mut rng).unwrap(), 25);
    }

    #[test]
    fn single_component() {
        let wiring = Wiring::parse(&Input::new("a: \n")).unwrap();
        let mut rng = Pcg64Mcg::new(1);
        assert!(wiring.split_product(10, &mut rng).is_err());
    }
}
