use std::collections::HashMap;

use tracing::debug;

use super::Solver;
use crate::problem::{Answer, Coord, Dir, Grid, Input, ParseError, SolveError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tile {
    Forest,
    Path,
    Slope(Dir),
}

#[derive(Debug, Clone)]
pub struct Trails {
    tiles: Grid<Tile>,
    start: Coord,
    end: Coord,
}

/// Junction graph: vertex 0 is the start, vertex 1 the end.
#[derive(Debug, Clone)]
struct Graph {
    edges: Vec<Vec<(usize, usize)>>,
}

impl Trails {
    fn parse(input: &Input) -> Result<Self, ParseError> {
        let grid = input.grid()?;
        let tiles = grid.try_map(|c, &b| match b {
            b'#' => Ok(Tile::Forest),
            b'.' => Ok(Tile::Path),
            b'^' => Ok(Tile::Slope(Dir::N)),
            b'>' => Ok(Tile::Slope(Dir::E)),
            b'v' => Ok(Tile::Slope(Dir::S)),
            b'<' => Ok(Tile::Slope(Dir::W)),
            _ => Err(grid.unexpected(c)),
        })?;

        let opening = |row: usize| {
            (0..tiles.width())
                .map(|col| Coord::new(row, col))
                .find(|&c| tiles[c] == Tile::Path)
                .ok_or_else(|| ParseError::line(row + 1, "no opening in the hedge"))
        };

        let start = opening(0)?;
        let end = opening(tiles.height() - 1)?;

        Ok(Self { tiles, start, end })
    }

    fn open(&self, c: Coord) -> bool {
        self.tiles[c] != Tile::Forest
    }

    fn can_leave(&self, c: Coord, dir: Dir, slippery: bool) -> bool {
        match self.tiles[c] {
            Tile::Slope(downhill) if slippery => dir == downhill,
            _ => true,
        }
    }

    fn is_junction(&self, c: Coord) -> bool {
        self.open(c)
            && Dir::ALL
                .iter()
                .filter_map(|&d| self.tiles.step(c, d))
                .filter(|&n| self.open(n))
                .count()
                >= 3
    }

    /// Compresses corridors between junctions into weighted edges.
    fn graph(&self, slippery: bool) -> Graph {
        let mut vertices = vec![self.start, self.end];
        vertices.extend(
            self.tiles
                .coords()
                .filter(|&c| c != self.start && c != self.end && self.is_junction(c)),
        );

        let index: HashMap<Coord, usize> =
            vertices.iter().enumerate().map(|(i, &c)| (c, i)).collect();
        let mut edges = vec![vec![]; vertices.len()];

        for (from, &origin) in vertices.iter().enumerate() {
            for dir in Dir::ALL {
                if !self.can_leave(origin, dir, slippery) {
                    continue;
                }

                let Some(mut current) = self.tiles.step(origin, dir).filter(|&n| self.open(n))
                else {
                    continue;
                };

                let mut prev = origin;
                let mut len = 1;

                loop {
                    if let Some(&to) = index.get(&current) {
                        edges[from].push((to, len));
                        break;
                    }

                    let next = Dir::ALL.iter().find_map(|&d| {
                        let n = self.tiles.step(current, d)?;
                        (n != prev && self.open(n) && self.can_leave(current, d, slippery))
                            .then_some(n)
                    });

                    match next {
                        Some(n) => {
                            prev = current;
                            current = n;
                            len += 1;
                        }
                        None => break,
                    }
                }
            }
        }

        debug!(vertices = vertices.len(), slippery, "junction graph");
        Graph { edges }
    }

    pub fn longest_hike(&self, slippery: bool) -> Option<usize> {
        let graph = self.graph(slippery);
        let mut visited = vec![false; graph.edges.len()];
        visited[0] = true;
        graph.longest_from(0, &mut visited)
    }
}

impl Graph {
    fn longest_from(&self, v: usize, visited: &mut [bool]) -> Option<usize> {
        if v == 1 {
            return Some(0);
        }

        let mut best = None;

        for &(to, len) in self.edges[v].iter() {
            if visited[to] {
                continue;
            }

            visited[to] = true;

            if let Some(rest) = self.longest_from(to, visited) {
                best = best.max(Some(rest + len));
            }

            visited[to] = false;
        }

        best
    }
}

pub struct LongWalk;

impl Solver for LongWalk {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let trails = Trails::parse(input)?;
        let part1 = trails
            .longest_hike(true)
            .ok_or(SolveError::Unsolvable("no downhill route to the exit"))?;
        let part2 = trails
            .longest_hike(false)
            .ok_or(SolveError::Unsolvable("no route to the exit"))?;

        Ok(Answer::new(part1 as i64, part2 as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        #.#####################
        #.......#########...###
        #######.#########.#.###
        ###.....#.>.>.###.#.###
        ###v#####.#v#.###.#.###
        ###.>...#.#.#.....#...#
        ###v###.#.#.#########.#
        ###...#.#.#.......#...#
        #####.#.#.#######.#.###
        #.....#.#.#.......#...#
        #.#####.#.#.#########v#
        #.#...#...#...###...>.#
        #.#.#v#######v###.###v#
        #...#.>.#...>.>.#.###.#
        #####v#.#.###v#.#.###.#
        #.....#...#...#.#.#...#
        #.#########.###.#.#.###
        #...###...#...#...#.###
        ###.###.#.###v#####v###
        #...#...#.#.>.>.#.>.###
        #.###.###.#.###.#.#v###
        #.....###...###...#...#
        #####################.#
    "};

    #[test]
    fn example() {
        let answer = LongWalk.solve(&Input::new(EXAMPLE)).unwrap();
        assert_eq!(answer, Answer::new(94, 154));
    }

    #[test]
    fn straight_corridor() {
        let trails = Trails::parse(&Input::new("#.#\n#.#\n#.#\n")).unwrap();
        assert_eq!(trails.longest_hike(true), Some(2));
        assert_eq!(trails.longest_hike(false), Some(2));
    }

    #[test]
    fn uphill_slope_blocks_the_way() {
        let trails = Trails::parse(&Input::new("#.#\n#^#\n#.#\n")).unwrap();
        assert_eq!(trails.longest_hike(true), None);
        assert_eq!(trails.longest_hike(false), Some(2));
    }
}
