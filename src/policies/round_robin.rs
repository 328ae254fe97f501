//! # Round Robin
//!
//! Cola FIFO de procesos listos. Cada despacho ejecuta como máximo un
//! quantum; si el proceso no termina vuelve al final de la cola, detrás de
//! los que llegaron durante su tramo.

use log::trace;

use crate::process::Process;
use crate::scheduler::{idle_until_next_arrival, ReadyQueue, SchedulingAlgorithm, SchedulingPolicy};

/// Política Round Robin con quantum fijo.
#[derive(Debug)]
pub struct RoundRobinPolicy {
    /// Tramo máximo por despacho
    quantum: f64,
}

impl RoundRobinPolicy {
    /// Crea la política con el quantum dado.
    ///
    /// El quantum debe haber sido validado con
    /// [`SchedulingAlgorithm::validate`].
    pub fn new(quantum: f64) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> f64 {
        self.quantum
    }
}

impl SchedulingPolicy for RoundRobinPolicy {
    fn algorithm(&self) -> SchedulingAlgorithm {
        SchedulingAlgorithm::RoundRobin {
            quantum: self.quantum,
        }
    }

    fn select_next(&mut self, ready: &mut ReadyQueue, clock: f64) -> Option<Process> {
        let selected = ready.pop_front()?;
        trace!(
            "[RR] t={:.2}: turno de P{:02} ({} en cola)",
            clock,
            selected.id,
            ready.len()
        );
        Some(selected)
    }

    fn slice_end(&self, process: &Process, clock: f64, _next_arrival: Option<f64>) -> f64 {
        clock + process.remaining_burst().min(self.quantum)
    }

    fn idle_until(&self, clock: f64, next_arrival: Option<f64>) -> f64 {
        idle_until_next_arrival(clock, next_arrival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_selection() {
        let mut policy = RoundRobinPolicy::new(2.0);
        let mut ready: ReadyQueue = vec![Process::new(4, 0.0, 9.0), Process::new(1, 0.0, 1.0)].into();

        assert_eq!(policy.select_next(&mut ready, 0.0).map(|p| p.id), Some(4));

        policy.requeue(&mut ready, Process::new(9, 0.0, 3.0));
        assert_eq!(policy.select_next(&mut ready, 2.0).map(|p| p.id), Some(1));
        assert_eq!(policy.select_next(&mut ready, 3.0).map(|p| p.id), Some(9));
    }

    #[test]
    fn test_slice_is_bounded_by_quantum() {
        let policy = RoundRobinPolicy::new(2.0);
        assert_eq!(policy.slice_end(&Process::new(0, 0.0, 5.0), 3.0, None), 5.0);
        assert_eq!(policy.slice_end(&Process::new(1, 0.0, 0.5), 3.0, None), 3.5);
    }

    #[test]
    fn test_idle_jumps_to_next_arrival() {
        let policy = RoundRobinPolicy::new(2.0);
        assert_eq!(policy.idle_until(2.0, Some(7.0)), 7.0);
        assert_eq!(policy.idle_until(2.0, None), 3.0);
    }
}
