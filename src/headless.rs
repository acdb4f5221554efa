//! Terminal-less runner
//!
//! Drives auto-advance from a tokio timer and writes one line per render to
//! any `Write` sink, either as a text listing or as JSON lines.

use crate::driver::{Driver, Presenter};
use crate::sequence::{IndexSet, Sequence, Value};
use serde::Serialize;
use std::io::Write;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct TraceLine<'a> {
    frame: usize,
    values: &'a [Value],
    active: &'a IndexSet,
    sorted: &'a IndexSet,
}

/// Writes each render as a single line
pub struct TextPresenter<W: Write> {
    out: W,
    format: TraceFormat,
    frames: usize,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W, format: TraceFormat) -> Self {
        Self {
            out,
            format,
            frames: 0,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn format_text(values: &[Value], active: &IndexSet, sorted: &IndexSet) -> String {
        values
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                if active.contains(&idx) {
                    format!("[{}]", value)
                } else if sorted.contains(&idx) {
                    format!("{}*", value)
                } else {
                    value.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn render(&mut self, values: &[Value], active: &IndexSet, sorted: &IndexSet) {
        let line = match self.format {
            TraceFormat::Text => Self::format_text(values, active, sorted),
            TraceFormat::Json => {
                let trace = TraceLine {
                    frame: self.frames,
                    values,
                    active,
                    sorted,
                };
                match serde_json::to_string(&trace) {
                    Ok(json) => json,
                    Err(e) => {
                        error!(target: "headless", "Failed to encode frame: {}", e);
                        return;
                    }
                }
            }
        };
        self.frames += 1;

        if let Err(e) = writeln!(self.out, "{}", line) {
            error!(target: "headless", "Failed to write frame: {}", e);
        }
    }
}

/// Run auto-advance until the engine completes, sleeping on the tokio clock
/// between ticks. Returns the final sequence.
pub async fn run_headless<P: Presenter>(mut driver: Driver<P>, interval: Duration) -> Sequence {
    let start = Instant::now();
    driver.start_auto_at(interval, start.into_std());

    while let Some(wait) = driver.time_until_tick(Instant::now().into_std()) {
        tokio::time::sleep(wait).await;
        driver.tick(Instant::now().into_std());
    }

    info!(
        target: "headless",
        "{} run finished in {} steps ({:?})",
        driver.algorithm(),
        driver.steps_taken(),
        start.elapsed()
    );
    driver.sequence().clone()
}
