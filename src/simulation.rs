//! # Simulation Driver
//!
//! Runs a [`Generation`] forward for a fixed number of ticks, feeding each generation to a
//! [`Sink`] as it is computed. The loop is iterative, so the number of generations is bounded
//! only by time, not by stack depth.
//!
//! A run can be cut short between ticks, either by the sink (see [`Sink::should_stop`]) or by
//! a wall-clock budget set with [`Simulation::with_time_budget`]. A tick that has started is
//! always completed.

use std::{
    iter,
    time::{Duration, Instant},
};

use tracing::{debug, info};

use crate::{model::Generation, render::Sink};

/// Result of [`Simulation::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// The last generation computed, or the initial one if no tick ran.
    pub generation: Generation,
    /// Number of completed ticks.
    pub ticks: usize,
    /// Whether the run ended before the requested number of ticks.
    pub stopped_early: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Simulation {
    time_budget: Option<Duration>,
}

impl Simulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops the run at the first tick boundary after `budget` has elapsed.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Runs `generations` ticks starting from `initial`.
    ///
    /// Tick `i` renders generation `i` into `sink` (bracketed by `begin_generation(i)` and
    /// `end_generation(i)`) while computing generation `i + 1`. With `generations == 0`
    /// nothing is rendered and `initial` is returned as is.
    pub fn run<S: Sink + ?Sized>(
        &self,
        generations: usize,
        initial: Generation,
        sink: &mut S,
    ) -> RunSummary {
        let started = Instant::now();
        let mut current = initial;

        for tick in 0..generations {
            if sink.should_stop() || self.budget_exhausted(started) {
                info!(
                    ticks = tick,
                    requested = generations,
                    population = current.population(),
                    "simulation stopped early"
                );
                return RunSummary {
                    generation: current,
                    ticks: tick,
                    stopped_early: true,
                };
            }

            sink.begin_generation(tick);
            let next = current.tick(&mut *sink);
            sink.end_generation(tick);

            debug!(tick = tick + 1, population = next.population(), "tick complete");
            current = next;
        }

        info!(
            ticks = generations,
            population = current.population(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "simulation finished"
        );
        RunSummary {
            generation: current,
            ticks: generations,
            stopped_early: false,
        }
    }

    fn budget_exhausted(&self, started: Instant) -> bool {
        self.time_budget
            .is_some_and(|budget| started.elapsed() >= budget)
    }
}

/// Endless sequence of generations, starting with `initial` itself.
pub fn evolve(initial: Generation) -> impl Iterator<Item = Generation> {
    iter::successors(Some(initial), |generation| Some(generation.next()))
}
