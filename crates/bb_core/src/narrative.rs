//! Play-by-play text
//!
//! The engine only needs one line per plate appearance. Richer commentary
//! plugs in through [`NarrativeGenerator`].

use crate::engine::outcome::OutcomeKind;
use crate::models::Half;

#[derive(Debug, Clone, Copy)]
pub struct NarrativeContext<'a> {
    pub batter_name: &'a str,
    pub pitcher_name: &'a str,
    pub inning: u32,
    pub half: Half,
    pub runs_scored: u8,
    pub outs_after: u8,
    pub walk_off: bool,
}

pub trait NarrativeGenerator: Send + Sync {
    fn describe(&self, outcome: OutcomeKind, context: &NarrativeContext<'_>) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainNarrator;

impl NarrativeGenerator for PlainNarrator {
    fn describe(&self, outcome: OutcomeKind, ctx: &NarrativeContext<'_>) -> String {
        let action = match outcome {
            OutcomeKind::Strikeout => format!("{} strikes out", ctx.batter_name),
            OutcomeKind::Groundout => format!("{} grounds out", ctx.batter_name),
            OutcomeKind::Flyout => format!("{} flies out", ctx.batter_name),
            OutcomeKind::Lineout => format!("{} lines out", ctx.batter_name),
            OutcomeKind::Popout => format!("{} pops out", ctx.batter_name),
            OutcomeKind::Walk => format!("{} walks", ctx.batter_name),
            OutcomeKind::Single => format!("{} singles", ctx.batter_name),
            OutcomeKind::Double => format!("{} doubles", ctx.batter_name),
            OutcomeKind::Triple => format!("{} triples", ctx.batter_name),
            OutcomeKind::HomeRun => format!("{} homers", ctx.batter_name),
        };

        let mut line = format!("{action} off {}", ctx.pitcher_name);
        match ctx.runs_scored {
            0 => {}
            1 => line.push_str(", 1 run scores"),
            n => line.push_str(&format!(", {n} runs score")),
        }
        if ctx.walk_off {
            line.push_str(". Walk-off!");
        } else {
            line.push_str(&format!(
                ". {} out{}",
                ctx.outs_after,
                if ctx.outs_after == 1 { "" } else { "s" }
            ));
        }
        line
    }
}
