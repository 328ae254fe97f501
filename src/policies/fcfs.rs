//! First-Come First-Served.

use log::trace;

use super::{by_arrival, take_min_by};
use crate::process::Process;
use crate::scheduler::{ReadyQueue, SchedulingAlgorithm, SchedulingPolicy};

/// Despacha siempre al proceso que llegó primero y lo ejecuta completo.
#[derive(Debug, Default)]
pub struct FcfsPolicy;

impl FcfsPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl SchedulingPolicy for FcfsPolicy {
    fn algorithm(&self) -> SchedulingAlgorithm {
        SchedulingAlgorithm::Fcfs
    }

    fn select_next(&mut self, ready: &mut ReadyQueue, clock: f64) -> Option<Process> {
        let selected = take_min_by(ready, by_arrival)?;
        trace!("[FCFS] t={:.2}: seleccionado P{:02}", clock, selected.id);
        Some(selected)
    }

    fn slice_end(&self, process: &Process, clock: f64, _next_arrival: Option<f64>) -> f64 {
        clock + process.remaining_burst()
    }
}
