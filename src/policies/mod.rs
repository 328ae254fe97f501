//! # Políticas de Planificación
//!
//! Cada política implementa [`SchedulingPolicy`](crate::scheduler::SchedulingPolicy)
//! y el motor la consulta en cada iteración del ciclo de simulación.
//!
//! - `FcfsPolicy`: orden de llegada, sin preempción
//! - `SjfPolicy`: menor ráfaga restante, con o sin preempción
//! - `RoundRobinPolicy`: cola FIFO con quantum fijo

pub mod fcfs;
pub mod round_robin;
pub mod sjf;

use std::cmp::Ordering;

use crate::process::Process;
use crate::scheduler::ReadyQueue;

pub use fcfs::FcfsPolicy;
pub use round_robin::RoundRobinPolicy;
pub use sjf::SjfPolicy;

/// Extrae de la cola el primer proceso mínimo según `compare`.
///
/// Ante empates gana el que aparece antes en la cola.
pub(crate) fn take_min_by<F>(ready: &mut ReadyQueue, mut compare: F) -> Option<Process>
where
    F: FnMut(&Process, &Process) -> Ordering,
{
    let index = ready
        .iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| compare(a, b).then(ia.cmp(ib)))
        .map(|(index, _)| index)?;
    ready.remove(index)
}

/// Orden por llegada y, en empate, por orden del generador.
pub(crate) fn by_arrival(a: &Process, b: &Process) -> Ordering {
    a.arrival_time
        .total_cmp(&b.arrival_time)
        .then(a.seq.cmp(&b.seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_min_by_prefers_queue_order_on_ties() {
        let mut ready: ReadyQueue = vec![
            Process::new(0, 0.0, 3.0),
            Process::new(1, 0.0, 1.0),
            Process::new(2, 0.0, 1.0),
        ]
        .into();

        let selected = take_min_by(&mut ready, |a, b| {
            a.remaining_burst().total_cmp(&b.remaining_burst())
        });

        assert_eq!(selected.map(|p| p.id), Some(1));
        assert_eq!(ready.len(), 2);
        assert!(take_min_by(&mut ReadyQueue::new(), by_arrival).is_none());
    }
}
