mod day01;
mod day02;
mod day05;
mod day06;
mod day08;
mod day17;
mod day18;
mod day19;
mod day20;
mod day21;
mod day22;
mod day23;
mod day24;
mod day25;

use crate::problem::{Answer, Input, SolveError};

pub trait Solver {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer>;
}

pub fn get_solver(day: u8) -> Result<Box<dyn Solver>, SolveError> {
    let solver: Box<dyn Solver> = match day {
        1 => Box::new(day01::Trebuchet),
        2 => Box::new(day02::CubeConundrum),
        5 => Box::new(day05::SeedFertilizer),
        6 => Box::new(day06::WaitForIt),
        8 => Box::new(day08::HauntedWasteland),
        17 => Box::new(day17::ClumsyCrucible),
        18 => Box::new(day18::LavaductLagoon),
        19 => Box::new(day19::Aplenty),
        20 => Box::new(day20::PulsePropagation),
        21 => Box::new(day21::StepCounter),
        22 => Box::new(day22::SandSlabs),
        23 => Box::new(day23::LongWalk),
        24 => Box::new(day24::NeverTellMeTheOdds),
        25 => Box::new(day25::Snowverload),
        _ => return Err(SolveError::UnknownDay(day)),
    };

    Ok(solver)
}
