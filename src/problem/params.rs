use std::{env, rc::Rc, str::FromStr};

use tracing::debug;

thread_local! {
    static PARAMS: Rc<Params> = Rc::new(Params::new());
}

#[derive(Debug, Clone)]
pub struct Params {
    pub seed: u64,
    pub day20_presses: usize,
    pub day21_steps: usize,
    pub day21_target_steps: usize,
    pub day24_area_min: i64,
    pub day24_area_max: i64,
    pub day25_samples: usize,
}

impl Params {
    fn new() -> Self {
        let seed = get_env("AOC_SEED", 42);
        let day20_presses = get_env("AOC_DAY20_PRESSES", 1000);
        let day21_steps = get_env("AOC_DAY21_STEPS", 64);
        let day21_target_steps = get_env("AOC_DAY21_TARGET_STEPS", 26_501_365);
        let day24_area_min = get_env("AOC_DAY24_AREA_MIN", 200_000_000_000_000);
        let day24_area_max = get_env("AOC_DAY24_AREA_MAX", 400_000_000_000_000);
        let day25_samples = get_env("AOC_DAY25_SAMPLES", 1000);

        let params = Self {
            seed,
            day20_presses,
            day21_steps,
            day21_target_steps,
            day24_area_min,
            day24_area_max,
            day25_samples,
        };

        debug!(?params, "loaded params");
        params
    }

    pub fn get() -> Rc<Self> {
        PARAMS.with(|p| p.clone())
    }
}

fn get_env<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_on_missing_or_invalid() {
        assert_eq!(get_env("AOC_TEST_SURELY_UNSET_VARIABLE", 7usize), 7);

        env::set_var("AOC_TEST_INVALID_NUMBER", "not a number");
        assert_eq!(get_env("AOC_TEST_INVALID_NUMBER", 3u64), 3);

        env::set_var("AOC_TEST_VALID_NUMBER", "12");
        assert_eq!(get_env("AOC_TEST_VALID_NUMBER", 3u64), 12);
    }
}
