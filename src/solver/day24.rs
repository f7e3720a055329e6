use nalgebra::Vector3;
use tracing::debug;

use super::Solver;
use crate::problem::{parse_nums, Answer, Input, Params, ParseError, SolveError};

type Vec3 = Vector3<i128>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hailstone {
    pos: Vec3,
    vel: Vec3,
}

impl Hailstone {
    fn parse(line: &str, line_no: usize) -> Result<Self, ParseError> {
        let line = line.replace([',', '@'], " ");
        let nums = parse_nums::<i128>(&line, line_no)?;

        let [px, py, pz, vx, vy, vz] = nums[..] else {
            return Err(ParseError::line(line_no, "expected 'px, py, pz @ vx, vy, vz'"));
        };

        Ok(Self {
            pos: Vec3::new(px, py, pz),
            vel: Vec3::new(vx, vy, vz),
        })
    }

    /// Where the X/Y paths of two hailstones cross, if both reach that point
    /// in the future.
    fn crossing_xy(&self, other: &Hailstone) -> Option<(f64, f64)> {
        let (v1, v2) = (self.vel, other.vel);
        let det = v2.x * v1.y - v1.x * v2.y;

        if det == 0 {
            return None;
        }

        let d = other.pos - self.pos;
        let t = (v2.x * d.y - d.x * v2.y) as f64 / det as f64;
        let s = (v1.x * d.y - v1.y * d.x) as f64 / det as f64;

        if t < 0.0 || s < 0.0 {
            return None;
        }

        Some((
            self.pos.x as f64 + t * v1.x as f64,
            self.pos.y as f64 + t * v1.y as f64,
        ))
    }
}

pub fn crossings_in_area(hail: &[Hailstone], min: f64, max: f64) -> usize {
    let area = min..=max;
    let mut count = 0;

    for (i, a) in hail.iter().enumerate() {
        for b in hail[i + 1..].iter() {
            if let Some((x, y)) = a.crossing_xy(b) {
                if area.contains(&x) && area.contains(&y) {
                    count += 1;
                }
            }
        }
    }

    count
}

fn reduce(v: Vec3) -> Vec3 {
    let g = gcd(gcd(v.x.abs(), v.y.abs()), v.z.abs());
    if g == 0 {
        v
    } else {
        v / g
    }
}

fn gcd(a: i128, b: i128) -> i128 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Time at which a hailstone (in a frame where the rock passes the origin)
/// lies on the line through the origin with direction `dir`.
fn hit_time(h: &Hailstone, dir: &Vec3) -> Option<i128> {
    let num = h.pos.cross(dir);
    let den = h.vel.cross(dir);
    let k = (0..3).find(|&k| den[k] != 0)?;

    (num[k] % den[k] == 0).then(|| -num[k] / den[k])
}

/// Position of a rock thrown so that it hits every hailstone.
///
/// Seen from the first hailstone the rock flies along a line through the
/// origin, so that line lies in the plane through the origin spanned by
/// every other hailstone's path. Two such planes fix its direction; the hit
/// times on those two hailstones fix the rest. All arithmetic is exact.
pub fn rock_position(hail: &[Hailstone]) -> Result<Vec3, SolveError> {
    let (first, rest) = hail
        .split_first()
        .ok_or(SolveError::Unsolvable("no hailstones"))?;

    let relative = rest
        .iter()
        .map(|h| Hailstone {
            pos: h.pos - first.pos,
            vel: h.vel - first.vel,
        })
        .collect::<Vec<_>>();

    for (i, a) in relative.iter().enumerate() {
        for b in relative[i + 1..].iter() {
            let dir = reduce(a.pos.cross(&a.vel).cross(&b.pos.cross(&b.vel)));

            if dir == Vec3::zeros() {
                continue;
            }

            let (Some(ta), Some(tb)) = (hit_time(a, &dir), hit_time(b, &dir)) else {
                continue;
            };

            if ta == tb {
                continue;
            }

            let qa = a.pos + a.vel * ta;
            let qb = b.pos + b.vel * tb;
            let delta = qb - qa;

            if delta.iter().any(|&c| c % (tb - ta) != 0) {
                continue;
            }

            let vel = delta / (tb - ta);
            let pos = qa - vel * ta;
            debug!(ta, tb, "rock hits found");

            return Ok(pos + first.pos);
        }
    }

    Err(SolveError::Unsolvable("no rock trajectory hits every hailstone"))
}

pub struct NeverTellMeTheOdds;

impl Solver for NeverTellMeTheOdds {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let params = Params::get();
        let hail = input
            .lines()
            .enumerate()
            .map(|(i, line)| Hailstone::parse(line, i + 1))
            .collect::<Result<Vec<_>, _>>()?;

        let part1 = crossings_in_area(
            &hail,
            params.day24_area_min as f64,
            params.day24_area_max as f64,
        );
        let rock = rock_position(&hail)?;
        let part2 = rock.iter().sum::<i128>();

        Ok(Answer::new(part1 as i64, part2 as i64))
    }
}
