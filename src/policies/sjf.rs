//! # Shortest Job First
//!
//! Ordena la cola de listos por ráfaga restante. En modo preemptivo
//! implementa Shortest Remaining Time First: el tramo en ejecución se corta
//! en la siguiente llegada para que el motor vuelva a elegir.

use std::cmp::Ordering;

use log::trace;

use super::{by_arrival, take_min_by};
use crate::process::Process;
use crate::scheduler::{idle_until_next_arrival, ReadyQueue, SchedulingAlgorithm, SchedulingPolicy};

/// Política SJF, preemptiva o no preemptiva.
#[derive(Debug)]
pub struct SjfPolicy {
    preemptive: bool,
}

impl SjfPolicy {
    /// Crea la política en el modo indicado.
    pub fn new(preemptive: bool) -> Self {
        Self { preemptive }
    }

    /// Menor ráfaga restante; empates por llegada y luego orden del generador.
    fn by_remaining(a: &Process, b: &Process) -> Ordering {
        a.remaining_burst()
            .total_cmp(&b.remaining_burst())
            .then_with(|| by_arrival(a, b))
    }
}

impl SchedulingPolicy for SjfPolicy {
    fn algorithm(&self) -> SchedulingAlgorithm {
        SchedulingAlgorithm::Sjf {
            preemptive: self.preemptive,
        }
    }

    fn select_next(&mut self, ready: &mut ReadyQueue, clock: f64) -> Option<Process> {
        let selected = take_min_by(ready, Self::by_remaining)?;
        trace!(
            "[SJF] t={:.2}: seleccionado P{:02} (restante {:.2})",
            clock,
            selected.id,
            selected.remaining_burst()
        );
        Some(selected)
    }

    fn slice_end(&self, process: &Process, clock: f64, next_arrival: Option<f64>) -> f64 {
        let completion = clock + process.remaining_burst();
        if !self.preemptive {
            return completion;
        }
        // Cortar en la próxima llegada para reevaluar la cola
        match next_arrival {
            Some(arrival) if arrival > clock && arrival < completion => arrival,
            _ => completion,
        }
    }

    // Los cortes en cada llegada no son cambios de contexto reales
    fn coalesces_resumed_slices(&self) -> bool {
        self.preemptive
    }

    fn idle_until(&self, clock: f64, next_arrival: Option<f64>) -> f64 {
        if self.preemptive {
            idle_until_next_arrival(clock, next_arrival)
        } else {
            clock + crate::config::IDLE_STEP
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selects_shortest_remaining() {
        let mut policy = SjfPolicy::new(false);
        let mut ready: ReadyQueue = vec![
            Process::new(0, 0.0, 8.0),
            Process::new(1, 0.0, 3.0),
            Process::new(2, 0.0, 5.0),
        ]
        .into();

        let order: Vec<usize> = std::iter::from_fn(|| policy.select_next(&mut ready, 0.0))
            .map(|p| p.id)
            .collect();
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_ties_break_by_arrival() {
        let mut policy = SjfPolicy::new(true);
        let mut ready: ReadyQueue = vec![Process::new(0, 3.0, 4.0), Process::new(1, 1.0, 4.0)].into();

        assert_eq!(policy.select_next(&mut ready, 3.0).map(|p| p.id), Some(1));
    }

    #[test]
    fn test_preemptive_slice_ends_at_next_arrival() {
        let process = Process::new(0, 0.0, 7.0);

        let preemptive = SjfPolicy::new(true);
        assert_eq!(preemptive.slice_end(&process, 0.0, Some(2.0)), 2.0);
        assert_eq!(preemptive.slice_end(&process, 0.0, Some(9.0)), 7.0);
        assert_eq!(preemptive.slice_end(&process, 0.0, None), 7.0);

        let non_preemptive = SjfPolicy::new(false);
        assert_eq!(non_preemptive.slice_end(&process, 0.0, Some(2.0)), 7.0);
    }

    #[test]
    fn test_idle_advance() {
        assert_eq!(SjfPolicy::new(true).idle_until(1.0, Some(6.0)), 6.0);
        assert_eq!(SjfPolicy::new(false).idle_until(1.0, Some(6.0)), 2.0);
    }
}
