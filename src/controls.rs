use std::str::FromStr;

use crate::algorithm::Algorithm;
use crate::error::VisualizerError;

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Shuffle,
    Sort(Algorithm),
    Restart(Algorithm),
    Speed(i64),
    Cancel,
    Wait,
    Show,
    List,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  shuffle            new random array
  sort <algorithm>   start a sort (rejected while one is running)
  restart <alg>      cancel the running sort and start another
  speed <1-1000>     speed for the next run
  cancel             stop the running sort
  wait               block until the running sort ends
  show               print the array
  list               list algorithms
  quit";

impl FromStr for Command {
    type Err = VisualizerError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let verb = words.next().unwrap_or("").to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();
        let arg = rest.join(" ");
        let unknown = || VisualizerError::UnknownCommand(line.trim().to_owned());

        let command = match (verb.as_str(), rest.is_empty()) {
            ("shuffle", true) => Command::Shuffle,
            ("sort" | "start" | "run", false) => Command::Sort(arg.parse()?),
            ("restart", false) => Command::Restart(arg.parse()?),
            ("speed", false) => Command::Speed(arg.parse().map_err(|_| unknown())?),
            ("cancel" | "stop", true) => Command::Cancel,
            ("wait", true) => Command::Wait,
            ("show", true) => Command::Show,
            ("list", true) => Command::List,
            ("help" | "?", true) => Command::Help,
            ("quit" | "exit" | "q", true) => Command::Quit,
            _ => return Err(unknown()),
        };
        Ok(command)
    }
}
