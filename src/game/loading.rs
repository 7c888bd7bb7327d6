//! Loading indicator shown while an oracle call is outstanding.
//!
//! The indicator and the call are two futures joined on the current task.
//! The indicator always runs for its fixed duration and then blanks its line;
//! the call's result is returned whether it finished before or after that.
//! Dropping the joined future (a phase abandoned mid-call) drops the ticker
//! with it, so no timer outlives the phase.

use crate::terminal::{LineStyle, SurfaceResult, Terminal};
use std::future::Future;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub label: &'static str,
    pub duration_ms: u64,
    pub tick_ms: u64,
}

pub const TICK_MS: u64 = 300;

/// Shown while a riddle is generated.
pub const RIDDLE: Indicator = Indicator {
    label: "  Consulting the ancient tomes",
    duration_ms: 2000,
    tick_ms: TICK_MS,
};

/// Shown while a guess is judged.
pub const VERDICT: Indicator = Indicator {
    label: "  She considers your answer",
    duration_ms: 1400,
    tick_ms: TICK_MS,
};

/// Label followed by `tick % 4` dots.
pub fn frame(label: &str, tick: u64) -> String {
    format!("{}{}", label, ".".repeat((tick % 4) as usize))
}

/// Animate `indicator` on its own line until its duration elapses, then blank it.
pub async fn animate<T>(term: &mut T, indicator: &Indicator) -> SurfaceResult<()>
where
    T: Terminal + ?Sized,
{
    let id = term.print_line(indicator.label, LineStyle::Dim)?;
    let tick = indicator.tick_ms.max(1);
    let mut elapsed = 0;
    let mut ticks = 0;
    while elapsed + tick <= indicator.duration_ms {
        term.wait_ms(tick).await;
        elapsed += tick;
        ticks += 1;
        term.rewrite_line(id, &frame(indicator.label, ticks))?;
    }
    term.wait_ms(indicator.duration_ms - elapsed).await;
    term.rewrite_line(id, "")
}

/// Run `operation` with `indicator` animating alongside it.
pub async fn with_indicator<T, F>(
    term: &mut T,
    indicator: &Indicator,
    operation: F,
) -> SurfaceResult<F::Output>
where
    T: Terminal + ?Sized,
    F: Future,
{
    let (shown, output) = tokio::join!(animate(term, indicator), operation);
    shown?;
    Ok(output)
}
