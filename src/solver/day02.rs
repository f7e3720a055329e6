use super::Solver;
use crate::{
    problem::{parse_num, Answer, Input, ParseError},
    util::ChangeMinMax,
};

const BAG: CubeSet = CubeSet {
    red: 12,
    green: 13,
    blue: 14,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CubeSet {
    red: u32,
    green: u32,
    blue: u32,
}

impl CubeSet {
    fn fits_in(&self, bag: &CubeSet) -> bool {
        self.red <= bag.red && self.green <= bag.green && self.blue <= bag.blue
    }

    fn power(&self) -> u32 {
        self.red * self.green * self.blue
    }
}

/// A game with the largest number of each colour seen across its draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Game {
    id: u32,
    max: CubeSet,
}

impl Game {
    fn parse(line: &str, line_no: usize) -> Result<Self, ParseError> {
        let (head, draws) = line
            .split_once(':')
            .ok_or_else(|| ParseError::line(line_no, "missing ':'"))?;
        let id = head
            .strip_prefix("Game ")
            .ok_or_else(|| ParseError::line(line_no, "expected 'Game <id>'"))?;
        let id = parse_num(id, line_no)?;
        let mut max = CubeSet::default();

        for draw in draws.split([';', ',']) {
            let (count, colour) = draw
                .trim()
                .split_once(' ')
                .ok_or_else(|| ParseError::line(line_no, format!("bad draw {draw:?}")))?;
            let count = parse_num(count, line_no)?;

            match colour {
                "red" => max.red.change_max(count),
                "green" => max.green.change_max(count),
                "blue" => max.blue.change_max(count),
                _ => return Err(ParseError::line(line_no, format!("unknown colour {colour:?}"))),
            };
        }

        Ok(Self { id, max })
    }
}

pub struct CubeConundrum;

impl Solver for CubeConundrum {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let games = input
            .lines()
            .enumerate()
            .map(|(i, line)| Game::parse(line, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let part1: u32 = games
            .iter()
            .filter(|g| g.max.fits_in(&BAG))
            .map(|g| g.id)
            .sum();
        let part2: u32 = games.iter().map(|g| g.max.power()).sum();

        Ok(Answer::new(part1 as i64, part2 as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        Game 1: 3 blue, 4 red; 1 red, 2 green, 6 blue; 2 green
        Game 2: 1 blue, 2 green; 3 green, 4 blue, 1 red; 1 green, 1 blue
        Game 3: 8 green, 6 blue, 20 red; 5 blue, 4 red, 13 green; 5 green, 1 red
        Game 4: 1 green, 3 red, 6 blue; 3 green, 6 red; 3 green, 15 blue, 14 red
        Game 5: 6 red, 1 blue, 3 green; 2 blue, 1 red, 2 green
    "};

    #[test]
    fn example() {
        let answer = CubeConundrum.solve(&Input::new(EXAMPLE)).unwrap();
        assert_eq!(answer, Answer::new(8, 2286));
    }

    #[test]
    fn parse_game() {
        let game = Game::parse("Game 12: 3 blue, 4 red; 1 red, 2 green, 6 blue", 1).unwrap();
        assert_eq!(game.id, 12);
        assert_eq!(
            game.max,
            CubeSet {
                red: 4,
                green: 2,
                blue: 6
            }
        );
    }

    #[test]
    fn rejects_unknown_colour() {
        assert!(Game::parse("Game 1: 3 purple", 7).is_err());
        assert!(Game::parse("Round 1: 3 red", 7).is_err());
    }
}
