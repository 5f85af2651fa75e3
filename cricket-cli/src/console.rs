//! Line-driven scoring session.
//!
//! Each line is parsed into an [`Input`], turned into an engine command and
//! the resulting state is redrawn. Rejected commands are logged and the
//! previous state is kept.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::Result;
use cricket_core::cue::{celebrate, ToneSink};
use cricket_core::delivery::{MAX_EXTRA_RUNS, MIN_EXTRA_RUNS};
use cricket_core::{
    Delivery, DismissalKind, EngineError, MatchConfig, MatchState, Scorecard, TeamInfo,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::render;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("nothing entered")]
    Empty,

    #[error("unknown input `{0}`, try `help`")]
    Unknown(String),

    #[error("`{command}` needs {what}")]
    Missing {
        command: &'static str,
        what: &'static str,
    },

    #[error("`{0}` is not a number")]
    BadNumber(String),

    #[error("unknown dismissal `{0}`")]
    BadDismissal(String),

    #[error("expected `bat` or `bowl`, got `{0}`")]
    BadChoice(String),

    #[error("byes and leg-byes run from 1 to 4, got {0}")]
    ExtrasOutOfRange(u8),
}

/// One line of scorer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Start,
    Toss { winner: usize, bat: bool },
    Openers(usize, usize),
    Bowl(usize),
    Ball(Delivery),
    Bat(usize),
    Next,
    Finish,
    Reset,
    Card,
    Help,
    Quit,
}

fn number(raw: &str) -> Result<usize, ParseError> {
    raw.parse()
        .map_err(|_| ParseError::BadNumber(raw.to_string()))
}

fn arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &'static str,
    what: &'static str,
) -> Result<&'a str, ParseError> {
    words.next().ok_or(ParseError::Missing { command, what })
}

fn dismissal(raw: &str) -> Result<DismissalKind, ParseError> {
    let kind = match raw {
        "bowled" => DismissalKind::Bowled,
        "caught" | "ct" => DismissalKind::Caught,
        "lbw" => DismissalKind::Lbw,
        "run-out" | "runout" | "ro" => DismissalKind::RunOut,
        "stumped" | "st" => DismissalKind::Stumped,
        "hit-wicket" | "hw" => DismissalKind::HitWicket,
        "caught-behind" | "cb" => DismissalKind::CaughtBehind,
        other => return Err(ParseError::BadDismissal(other.to_string())),
    };
    Ok(kind)
}

/// `b2` and `lb1` style extras. `None` when `word` is not one.
fn extras(word: &str) -> Option<Result<Delivery, ParseError>> {
    let (digits, make): (&str, fn(u8) -> Delivery) = if let Some(rest) = word.strip_prefix("lb")
    {
        (rest, Delivery::LegBye)
    } else if let Some(rest) = word.strip_prefix('b') {
        (rest, Delivery::Bye)
    } else {
        return None;
    };
    if digits.is_empty() {
        return Some(Ok(make(MIN_EXTRA_RUNS)));
    }
    let runs = match digits.parse::<u8>() {
        Ok(runs) => runs,
        Err(_) => return Some(Err(ParseError::BadNumber(digits.to_string()))),
    };
    if !(MIN_EXTRA_RUNS..=MAX_EXTRA_RUNS).contains(&runs) {
        return Some(Err(ParseError::ExtrasOutOfRange(runs)));
    }
    Some(Ok(make(runs)))
}

impl FromStr for Input {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let lowered = line.trim().to_ascii_lowercase();
        let mut words = lowered.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseError::Empty);
        };

        let input = match head {
            "0" | "." => Input::Ball(Delivery::Dot),
            "1" => Input::Ball(Delivery::One),
            "2" => Input::Ball(Delivery::Two),
            "3" => Input::Ball(Delivery::Three),
            "4" => Input::Ball(Delivery::Four),
            "6" => Input::Ball(Delivery::Six),
            "wd" => Input::Ball(Delivery::Wide),
            "nb" => Input::Ball(Delivery::NoBall),
            "w" => {
                let kind = match words.next() {
                    Some(raw) => dismissal(raw)?,
                    None => DismissalKind::Bowled,
                };
                Input::Ball(Delivery::Wicket(kind))
            }
            "start" => Input::Start,
            "toss" => {
                let winner = number(arg(&mut words, "toss", "the winning team")?)?;
                let bat = match arg(&mut words, "toss", "bat or bowl")? {
                    "bat" => true,
                    "bowl" => false,
                    other => return Err(ParseError::BadChoice(other.to_string())),
                };
                Input::Toss { winner, bat }
            }
            "openers" => {
                let a = number(arg(&mut words, "openers", "two players")?)?;
                let b = number(arg(&mut words, "openers", "two players")?)?;
                Input::Openers(a, b)
            }
            "bowl" => Input::Bowl(number(arg(&mut words, "bowl", "a player")?)?),
            "bat" => Input::Bat(number(arg(&mut words, "bat", "a player")?)?),
            "next" => Input::Next,
            "finish" => Input::Finish,
            "reset" => Input::Reset,
            "card" => Input::Card,
            "help" | "?" => Input::Help,
            "quit" | "q" | "exit" => Input::Quit,
            other => match extras(other) {
                Some(delivery) => Input::Ball(delivery?),
                None => return Err(ParseError::Unknown(other.to_string())),
            },
        };
        Ok(input)
    }
}

const HELP: &str = "\
commands:
  start                     set up the match from the team sheet
  toss <0|1> <bat|bowl>     record the toss
  openers <a> <b>           pick the opening pair
  bowl <n>                  pick the bowler for the over
  0 1 2 3 4 6               runs off the bat
  wd nb                     wide, no-ball
  b<n> lb<n>                byes, leg-byes
  w [kind]                  wicket: bowled caught lbw run-out stumped hit-wicket caught-behind
  bat <n>                   send in the next batsman
  finish                    close the innings now
  next                      start the second innings
  card                      print the scorecard
  reset                     start a fresh match
  quit
";

/// Whether the session should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Console<'a> {
    state: MatchState,
    teams: [TeamInfo; 2],
    config: MatchConfig,
    sink: &'a mut dyn ToneSink,
}

impl<'a> Console<'a> {
    pub fn new(teams: [TeamInfo; 2], config: MatchConfig, sink: &'a mut dyn ToneSink) -> Self {
        Self {
            state: MatchState::new(),
            teams,
            config,
            sink,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Apply one parsed input. Engine rejections leave the state untouched.
    pub fn handle(&mut self, input: Input, out: &mut impl Write) -> Result<Flow> {
        let state = &self.state;
        let next = match input {
            Input::Quit => return Ok(Flow::Quit),
            Input::Help => {
                write!(out, "{HELP}")?;
                return Ok(Flow::Continue);
            }
            Input::Card => {
                write!(out, "{}", render::scorecard(&Scorecard::from_state(state)))?;
                return Ok(Flow::Continue);
            }
            Input::Start => {
                let [a, b] = self.teams.clone();
                state.setup_match(a, b, self.config)
            }
            Input::Toss { winner, bat } => state.record_toss(winner, bat),
            Input::Openers(a, b) => state.select_openers([a, b]),
            Input::Bowl(idx) => state.select_bowler(idx),
            Input::Ball(delivery) => state.score_delivery(delivery),
            Input::Bat(idx) => state.select_new_batsman(idx),
            Input::Next => state.start_second_innings(),
            Input::Finish => state.finish_innings(),
            Input::Reset => {
                info!("match reset");
                Ok(state.reset_match())
            }
        };

        match next {
            Ok(next) => {
                let boundary = matches!(input, Input::Ball(d) if d.is_boundary());
                self.state = next;
                if boundary {
                    celebrate(&mut *self.sink);
                }
            }
            Err(err) => report(&err, out)?,
        }
        write!(out, "{}", render::scoreboard(&self.state))?;
        Ok(Flow::Continue)
    }

    /// Read lines until `quit` or end of input. Returns the final state.
    pub fn run(mut self, input: impl BufRead, mut out: impl Write) -> Result<MatchState> {
        write!(out, "{}", render::prompt(&self.state))?;
        out.flush()?;
        for line in input.lines() {
            let line = line?;
            match line.parse::<Input>() {
                Ok(parsed) => {
                    if self.handle(parsed, &mut out)? == Flow::Quit {
                        break;
                    }
                }
                Err(ParseError::Empty) => {}
                Err(err) => writeln!(out, "{err}")?,
            }
            out.flush()?;
        }
        Ok(self.state)
    }
}

fn report(err: &EngineError, out: &mut impl Write) -> Result<()> {
    warn!(error = %err, "command rejected");
    writeln!(out, "! {err}")?;
    Ok(())
}
