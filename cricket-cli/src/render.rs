//! Plain-text views of a match for the terminal.

use std::fmt::Write as _;

use cricket_core::delivery::{over_runs, BallEvent};
use cricket_core::scorecard::InningsCard;
use cricket_core::stats::{
    balls_remaining, bowler_overs, innings_run_rate, overs_string, required_run_rate,
    result_text, runs_required, strike_rate,
};
use cricket_core::{MatchState, Phase, Scorecard};

/// `"• 1 4 WD 2 W"`
pub fn ball_strip(balls: &[BallEvent]) -> String {
    balls
        .iter()
        .map(|b| b.label.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Live scoreboard followed by a prompt for whatever the phase needs next.
pub fn scoreboard(state: &MatchState) -> String {
    let mut out = String::new();
    if let Some(inn) = state.current() {
        let team = &state.teams[inn.batting_team].name;
        let _ = writeln!(
            out,
            "{} {}/{} ({} ov, RR {:.2})",
            team,
            inn.score,
            inn.wickets,
            overs_string(inn.total_balls),
            innings_run_rate(inn)
        );
        for (mark, batsman) in [("*", inn.striker()), (" ", inn.non_striker())] {
            if let Some(b) = batsman {
                let _ = writeln!(
                    out,
                    " {}{:<16} {:>3} ({}) SR {:.1}",
                    mark,
                    b.name,
                    b.runs,
                    b.balls,
                    strike_rate(b)
                );
            }
        }
        if let Some(bowler) = inn.current_bowler() {
            let _ = writeln!(
                out,
                "  {:<16} {}-{}-{}-{}",
                bowler.name,
                bowler_overs(bowler),
                bowler.maidens,
                bowler.runs_conceded,
                bowler.wickets
            );
        }
        if !inn.current_over.is_empty() {
            let _ = writeln!(out, "  this over: {}", ball_strip(&inn.current_over));
        }
        if let (Some(runs), Some(balls)) = (runs_required(state), balls_remaining(state)) {
            let _ = write!(out, "  need {} from {} balls", runs, balls);
            match required_run_rate(state) {
                Some(rrr) => {
                    let _ = writeln!(out, " (RRR {:.2})", rrr);
                }
                None => out.push('\n'),
            }
        }
    }
    out.push_str(&prompt(state));
    out
}

/// What the scorer is expected to type next.
pub fn prompt(state: &MatchState) -> String {
    match state.phase {
        Phase::Setup => "setup: `start` to load the team sheet\n".to_string(),
        Phase::Toss => format!(
            "toss: `toss <0|1> <bat|bowl>` (0 = {}, 1 = {})\n",
            state.teams[0].name, state.teams[1].name
        ),
        Phase::SelectBatting => format!(
            "openers for {}: `openers <a> <b>`\n{}",
            state.teams[state.batting_team_index()].name,
            roster(state, state.batting_team_index(), &state.available_batsmen())
        ),
        Phase::SelectBowling | Phase::NewBowler => {
            let mut text = String::new();
            if state.phase == Phase::NewBowler && !state.last_completed_over.is_empty() {
                let _ = writeln!(
                    text,
                    "end of over: {} ({} runs)",
                    ball_strip(&state.last_completed_over),
                    over_runs(&state.last_completed_over)
                );
            }
            if state.current().is_some_and(|inn| inn.needs_new_batsman) {
                text.push_str(&new_batsman_prompt(state));
            }
            let _ = writeln!(
                text,
                "bowler for {}: `bowl <n>`",
                state.teams[state.bowling_team_index()].name
            );
            text.push_str(&roster(
                state,
                state.bowling_team_index(),
                &state.eligible_bowlers(),
            ));
            text
        }
        Phase::Playing => {
            if state.current().is_some_and(|inn| inn.needs_new_batsman) {
                new_batsman_prompt(state)
            } else {
                "ball: 0 1 2 3 4 6 wd nb b<n> lb<n> w [kind]\n".to_string()
            }
        }
        Phase::InningsBreak => format!(
            "innings break: target {}. `next` to start the chase\n",
            state.target.unwrap_or(0)
        ),
        Phase::Result => format!(
            "{}. `card` for the scorecard, `reset` for a new match\n",
            result_text(state).unwrap_or_else(|| "Match over".to_string())
        ),
    }
}

fn new_batsman_prompt(state: &MatchState) -> String {
    format!(
        "wicket! new batsman: `bat <n>`\n{}",
        roster(state, state.batting_team_index(), &state.available_batsmen())
    )
}

fn roster(state: &MatchState, team: usize, indices: &[usize]) -> String {
    let players = &state.teams[team].players;
    let mut out = String::new();
    for &idx in indices {
        if let Some(name) = players.get(idx) {
            let _ = writeln!(out, "  [{}] {}", idx, name);
        }
    }
    out
}

/// Full batting and bowling card for every innings played.
pub fn scorecard(card: &Scorecard) -> String {
    let mut out = String::new();
    for inn in &card.innings {
        innings_card(&mut out, inn);
        out.push('\n');
    }
    if let Some(summary) = &card.summary {
        let _ = writeln!(out, "{}", summary);
    }
    out
}

fn innings_card(out: &mut String, inn: &InningsCard) {
    let _ = writeln!(
        out,
        "{} {} ({} ov, RR {:.2})",
        inn.team,
        inn.total(),
        inn.overs,
        inn.run_rate
    );
    let _ = writeln!(
        out,
        "  {:<16} {:<24} {:>4} {:>4} {:>3} {:>3} {:>7}",
        "batter", "", "R", "B", "4s", "6s", "SR"
    );
    for b in &inn.batting {
        let _ = writeln!(
            out,
            "  {:<16} {:<24} {:>4} {:>4} {:>3} {:>3} {:>7.2}",
            b.name, b.dismissal, b.runs, b.balls, b.fours, b.sixes, b.strike_rate
        );
    }
    let _ = writeln!(out, "  extras {}", inn.extras);
    let _ = writeln!(
        out,
        "  {:<16} {:>5} {:>3} {:>4} {:>3} {:>6}",
        "bowler", "O", "M", "R", "W", "Econ"
    );
    for b in &inn.bowling {
        let _ = writeln!(
            out,
            "  {:<16} {:>5} {:>3} {:>4} {:>3} {:>6.2}",
            b.name, b.overs, b.maidens, b.runs, b.wickets, b.economy
        );
    }
}
