use super::Solver;
use crate::problem::{parse_num, Answer, Dir, Input, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigStep {
    dir: Dir,
    len: i64,
    /// The real instruction hidden in the colour.
    decoded: (Dir, i64),
}

impl DigStep {
    fn parse(line: &str, line_no: usize) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let (Some(dir), Some(len), Some(colour), None) =
            (tokens.next(), tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(ParseError::line(line_no, "expected '<dir> <len> (#rrggbb)'"));
        };

        let dir = match dir {
            "U" => Dir::N,
            "R" => Dir::E,
            "D" => Dir::S,
            "L" => Dir::W,
            _ => return Err(ParseError::line(line_no, format!("unknown direction {dir:?}"))),
        };

        let len = parse_num::<i64>(len, line_no)?;

        if len < 0 {
            return Err(ParseError::line(line_no, format!("negative length {len}")));
        }

        let decoded = colour
            .strip_prefix("(#")
            .and_then(|c| c.strip_suffix(')'))
            .and_then(decode)
            .ok_or_else(|| ParseError::line(line_no, format!("bad colour {colour:?}")))?;

        Ok(Self { dir, len, decoded })
    }
}

/// Five hex digits of distance followed by a direction digit `0..=3`.
fn decode(colour: &str) -> Option<(Dir, i64)> {
    if colour.len() != 6 || !colour.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let len = i64::from_str_radix(&colour[..5], 16).ok()?;
    let dir = match &colour[5..] {
        "0" => Dir::E,
        "1" => Dir::S,
        "2" => Dir::W,
        "3" => Dir::N,
        _ => return None,
    };

    Some((dir, len))
}

/// Area enclosed by the dug trench, trench included.
///
/// Shoelace gives the area inside the centre line of the trench; the outer
/// half of each boundary cell adds `perimeter / 2 + 1`.
pub fn lagoon_area(steps: impl IntoIterator<Item = (Dir, i64)>) -> i64 {
    let (mut row, mut col) = (0i64, 0i64);
    let mut twice_area = 0;
    let mut perimeter = 0;

    for (dir, len) in steps {
        let (dr, dc) = dir.delta();
        let (next_row, next_col) = (row + dr * len, col + dc * len);
        twice_area += col * next_row - next_col * row;
        perimeter += len;
        row = next_row;
        col = next_col;
    }

    twice_area.abs() / 2 + perimeter / 2 + 1
}

pub struct LavaductLagoon;

impl Solver for LavaductLagoon {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let plan = input
            .lines()
            .enumerate()
            .map(|(i, line)| DigStep::parse(line, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let part1 = lagoon_area(plan.iter().map(|s| (s.dir, s.len)));
        let part2 = lagoon_area(plan.iter().map(|s| s.decoded));

        Ok(Answer::new(part1, part2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    const EXAMPLE: &str = indoc! {"
        R 6 (#70c710)
        D 5 (#0dc571)
        L 2 (#5713f0)
        D 2 (#d2c081)
        R 2 (#59c680)
        D 2 (#411b91)
        L 5 (#8ceee2)
        U 2 (#caa173)
        L 1 (#1b58a2)
        U 2 (#caa171)
        R 2 (#7807d2)
        U 3 (#a77fa3)
        L 2 (#015232)
        U 2 (#7a21e3)
    "};

    #[test]
    fn example() {
        let answer = LavaductLagoon.solve(&Input::new(EXAMPLE)).unwrap();
        assert_eq!(answer, Answer::new(62, 952408144115));
    }

    #[test]
    fn decode_colour() {
        let step = DigStep::parse("R 6 (#70c710)", 1).unwrap();
        assert_eq!(step.decoded, (Dir::E, 461937));
        assert_eq!(decode("0dc573"), Some((Dir::N, 56407)));
    }

    #[test]
    fn rejects_bad_direction_digit() {
        assert!(DigStep::parse("R 6 (#70c717)", 1).is_err());
        assert!(DigStep::parse("R 6 (#70c71f)", 1).is_err());
        assert!(DigStep::parse("R 6 (#+0c710)", 1).is_err());
    }

    #[test]
    fn rejects_negative_length() {
        assert!(matches!(
            DigStep::parse("R -3 (#70c710)", 4),
            Err(ParseError::Malformed { line: 4, .. })
        ));
    }

    #[test]
    fn unit_square() {
        let square = [(Dir::E, 1), (Dir::S, 1), (Dir::W, 1), (Dir::N, 1)];
        assert_eq!(lagoon_area(square), 4);
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(DigStep::parse("X 6 (#70c710)", 1).is_err());
        assert!(DigStep::parse("R 6 (#70c7)", 1).is_err());
        assert!(DigStep::parse("R 6", 1).is_err());
    }
}
