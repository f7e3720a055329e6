use std::collections::{HashMap, VecDeque};

use smallvec::SmallVec;
use tracing::debug;

use super::Solver;
use crate::{
    problem::{Answer, Input, Params, ParseError, SolveError},
    util::lcm,
};

const BROADCASTER: &str = "broadcaster";
const SINK: &str = "rx";
const MAX_PRESSES: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Broadcaster,
    FlipFlop,
    Conjunction,
    Untyped,
}

#[derive(Debug, Clone)]
struct Module {
    kind: Kind,
    targets: SmallVec<[usize; 8]>,
    inputs: Vec<usize>,
    /// Last pulse received from each input, conjunctions only.
    memory: Vec<bool>,
    on: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pulse {
    from: usize,
    to: usize,
    high: bool,
}

#[derive(Debug, Clone)]
pub struct Machine {
    labels: Vec<String>,
    modules: Vec<Module>,
    broadcaster: usize,
}

impl Machine {
    fn parse(input: &Input) -> Result<Self, ParseError> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut labels = vec![];
        let mut modules = vec![];

        let mut id = |label: &str, labels: &mut Vec<String>, modules: &mut Vec<Module>| {
            *index.entry(label.to_string()).or_insert_with(|| {
                labels.push(label.to_string());
                modules.push(Module {
                    kind: Kind::Untyped,
                    targets: SmallVec::new(),
                    inputs: vec![],
                    memory: vec![],
                    on: false,
                });
                modules.len() - 1
            })
        };

        for (i, line) in input.lines().enumerate() {
            let line_no = i + 1;
            let (name, targets) = line
                .split_once("->")
                .ok_or_else(|| ParseError::line(line_no, "missing '->'"))?;
            let name = name.trim();

            let (kind, label) = match name.as_bytes().first() {
                Some(b'%') => (Kind::FlipFlop, &name[1..]),
                Some(b'&') => (Kind::Conjunction, &name[1..]),
                _ if name == BROADCASTER => (Kind::Broadcaster, name),
                _ => return Err(ParseError::line(line_no, format!("unknown module {name:?}"))),
            };

            let from = id(label, &mut labels, &mut modules);
            modules[from].kind = kind;

            for target in targets.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                let to = id(target, &mut labels, &mut modules);
                modules[from].targets.push(to);
                modules[to].inputs.push(from);
            }
        }

        let broadcaster = labels
            .iter()
            .position(|l| l == BROADCASTER)
            .ok_or_else(|| ParseError::line(1, "no broadcaster"))?;

        for module in modules.iter_mut() {
            module.memory = vec![false; module.inputs.len()];
        }

        Ok(Self {
            labels,
            modules,
            broadcaster,
        })
    }

    fn reset(&mut self) {
        for module in self.modules.iter_mut() {
            module.on = false;
            module.memory.fill(false);
        }
    }

    /// Pushes the button once, calling `observe` for every delivered pulse.
    /// Returns the number of low and high pulses sent.
    fn push_button(&mut self, mut observe: impl FnMut(&Pulse)) -> (u64, u64) {
        let mut low = 0;
        let mut high = 0;
        let mut queue = VecDeque::new();

        queue.push_back(Pulse {
            from: self.broadcaster,
            to: self.broadcaster,
            high: false,
        });

        while let Some(pulse) = queue.pop_front() {
            if pulse.high {
                high += 1;
            } else {
                low += 1;
            }

            observe(&pulse);

            let module = &mut self.modules[pulse.to];
            let out = match module.kind {
                Kind::Broadcaster => pulse.high,
                Kind::FlipFlop if pulse.high => continue,
                Kind::FlipFlop => {
                    module.on = !module.on;
                    module.on
                }
                Kind::Conjunction => {
                    if let Some(i) = module.inputs.iter().position(|&m| m == pulse.from) {
                        module.memory[i] = pulse.high;
                    }
                    !module.memory.iter().all(|&m| m)
                }
                Kind::Untyped => continue,
            };

            for &to in module.targets.iter() {
                queue.push_back(Pulse {
                    from: pulse.to,
                    to,
                    high: out,
                });
            }
        }

        (low, high)
    }

    pub fn pulse_product(&mut self, presses: usize) -> u64 {
        self.reset();
        let (mut low, mut high) = (0, 0);

        for _ in 0..presses {
            let (l, h) = self.push_button(|_| {});
            low += l;
            high += h;
        }

        low * high
    }

    /// Presses needed before `rx` gets a low pulse, assuming `rx` is fed by
    /// one conjunction whose inputs each go high periodically from press 0.
    /// `None` if the machine has no `rx`.
    pub fn presses_until_sink(&mut self) -> Result<Option<u64>, SolveError> {
        let Some(sink) = self.labels.iter().position(|l| l == SINK) else {
            return Ok(None);
        };

        let [feeder] = self.modules[sink].inputs[..] else {
            return Err(SolveError::Unsolvable("rx must have exactly one input"));
        };

        if self.modules[feeder].kind != Kind::Conjunction {
            return Err(SolveError::Unsolvable("rx must be fed by a conjunction"));
        }

        let watched = self.modules[feeder].inputs.clone();
        let mut first_high: Vec<Option<u64>> = vec![None; watched.len()];

        self.reset();

        for press in 1..=MAX_PRESSES {
            self.push_button(|p| {
                if p.to == feeder && p.high {
                    if let Some(i) = watched.iter().position(|&w| w == p.from) {
                        first_high[i].get_or_insert(press);
                    }
                }
            });

            if first_high.iter().all(Option::is_some) {
                break;
            }
        }

        let mut total = 1;

        for (&input, cycle) in watched.iter().zip(first_high) {
            let cycle = cycle.ok_or(SolveError::Unsolvable("input of rx feeder never goes high"))?;
            debug!(input = %self.labels[input], cycle, "feeder input cycle");
            total = lcm(total, cycle);
        }

        Ok(Some(total))
    }
}

pub struct PulsePropagation;

impl Solver for PulsePropagation {
    fn solve(&self, input: &Input) -> anyhow::Result<Answer> {
        let params = Params::get();
        let mut machine = Machine::parse(input)?;
        let part1 = machine.pulse_product(params.day20_presses);

        let answer = match machine.presses_until_sink()? {
            Some(part2) => Answer::new(part1 as i64, part2 as i64),
            None => Answer::single(part1 as i64),
        };

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    fn machine(s: &str) -> Machine {
        Machine::parse(&Input::new(s)).unwrap()
    }

    #[test]
    fn single_cycle() {
        let mut machine = machine(indoc! {"
            broadcaster -> a, b, c
            %a -> b
            %b -> c
            %c -> inv
            &inv -> a
        "});

        assert_eq!(machine.pulse_product(1000), 32000000);
        assert_eq!(machine.presses_until_sink().unwrap(), None);
    }

    #[test]
    fn untyped_output() {
        let mut machine = machine(indoc! {"
            broadcaster -> a
            %a -> inv, con
            &inv -> b
            %b -> con
            &con -> output
        "});

        assert_eq!(machine.pulse_product(1000), 11687500);
    }

    #[test]
    fn single_press_counts() {
        let mut machine = machine(indoc! {"
            broadcaster -> a, b, c
            %a -> b
            %b -> c
            %c -> inv
            &inv -> a
        "});

        assert_eq!(machine.push_button(|_| {}), (8, 4));
    }

    #[test]
    fn sink_cycles() {
        // x goes high on press 1, q on press 2, r on press 4
        let mut machine = machine(indoc! {"
            broadcaster -> x, p
            %x -> fd
            %p -> q
            %q -> fd, r
            %r -> fd
            &fd -> rx
        "});

        assert_eq!(machine.presses_until_sink().unwrap(), Some(4));
    }

    #[test]
    fn sink_needs_conjunction_feeder() {
        let mut machine = machine(indoc! {"
            broadcaster -> a
            %a -> rx
        "});

        assert!(machine.presses_until_sink().is_err());
    }

    #[test]
    fn feeder_input_that_never_goes_high() {
        // f only ever receives high pulses, so it never toggles
        let mut machine = machine(indoc! {"
            broadcaster -> inv
            &inv -> f
            %f -> fd
            &fd -> rx
        "});

        assert!(matches!(
            machine.presses_until_sink(),
            Err(SolveError::Unsolvable(_))
        ));
    }
}
