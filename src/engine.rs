//! # Módulo del Motor de Simulación
//!
//! El motor es dueño del reloj y de las tres colecciones de procesos
//! (pendientes, listos y completados). En cada iteración admite las
//! llegadas, consulta a la política qué proceso despachar y durante cuánto
//! tiempo, y actualiza las métricas del proceso.
//!
//! Un proceso está siempre en exactamente uno de: pendientes, listos, en
//! ejecución o completados. Un proceso completado no vuelve a encolarse.

use std::collections::{HashSet, VecDeque};

use log::{debug, info, warn};

use crate::config;
use crate::error::{Result, SimulationError};
use crate::process::Process;
use crate::scheduler::{ReadyQueue, SchedulingAlgorithm, SchedulingPolicy};

/// Tramo continuo de ejecución de un proceso en la CPU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionSlice {
    pub process_id: usize,
    pub start: f64,
    pub end: f64,
}

impl ExecutionSlice {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Resultado de ejecutar un algoritmo sobre una carga.
#[derive(Debug, Clone)]
pub struct SimulationRun {
    /// Algoritmo utilizado
    pub algorithm: SchedulingAlgorithm,
    /// Procesos completados, en orden de finalización
    pub completed: Vec<Process>,
    /// Valor del reloj al terminar la simulación
    pub final_clock: f64,
    /// Tramos de ejecución en orden cronológico
    pub timeline: Vec<ExecutionSlice>,
}

impl SimulationRun {
    /// Identificadores en orden de finalización.
    pub fn completion_order(&self) -> Vec<usize> {
        self.completed.iter().map(|process| process.id).collect()
    }

    /// Busca un proceso completado por su identificador.
    pub fn process(&self, id: usize) -> Option<&Process> {
        self.completed.iter().find(|process| process.id == id)
    }

    /// Número de despachos realizados.
    pub fn dispatches(&self) -> usize {
        self.timeline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}

/// Verifica una carga completa antes de simular.
///
/// # Errors
///
/// El primer error de validación de un proceso, o `DuplicateProcessId` si
/// dos procesos comparten identificador.
pub fn validate_workload(processes: &[Process]) -> Result<()> {
    let mut seen = HashSet::with_capacity(processes.len());
    for process in processes {
        process.validate()?;
        if !seen.insert(process.id) {
            return Err(SimulationError::DuplicateProcessId(process.id));
        }
    }
    Ok(())
}

/// Motor de simulación parametrizado por una política.
pub struct Engine {
    policy: Box<dyn SchedulingPolicy>,
    clock: f64,
    pending: VecDeque<Process>,
    ready: ReadyQueue,
    completed: Vec<Process>,
    timeline: Vec<ExecutionSlice>,
}

impl Engine {
    /// Crea un motor para el algoritmo indicado.
    ///
    /// La carga se valida por completo antes de construir el estado. Los
    /// procesos pueden venir en cualquier orden; se ordenan por llegada
    /// conservando el orden del generador en los empates.
    ///
    /// # Errors
    ///
    /// `InvalidQuantum` para un Round Robin mal configurado y cualquier
    /// error de [`validate_workload`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{Engine, Process, SchedulingAlgorithm};
    ///
    /// let processes = vec![Process::new(0, 0.0, 5.0), Process::new(1, 1.0, 1.0)];
    /// let run = Engine::new(processes, SchedulingAlgorithm::fcfs()).unwrap().run();
    ///
    /// assert_eq!(run.completion_order(), vec![0, 1]);
    /// assert_eq!(run.final_clock, 6.0);
    /// ```
    pub fn new(processes: Vec<Process>, algorithm: SchedulingAlgorithm) -> Result<Self> {
        algorithm.validate()?;
        Self::with_policy(processes, algorithm.policy())
    }

    /// Crea un motor con una política ya construida.
    pub fn with_policy(mut processes: Vec<Process>, policy: Box<dyn SchedulingPolicy>) -> Result<Self> {
        policy.algorithm().validate()?;
        validate_workload(&processes)?;

        for (seq, process) in processes.iter_mut().enumerate() {
            process.seq = seq;
        }
        processes.sort_by(|a, b| a.arrival_time.total_cmp(&b.arrival_time));

        Ok(Self {
            policy,
            clock: 0.0,
            pending: processes.into(),
            ready: ReadyQueue::new(),
            completed: Vec::new(),
            timeline: Vec::new(),
        })
    }

    pub fn algorithm(&self) -> SchedulingAlgorithm {
        self.policy.algorithm()
    }

    /// Ejecuta la simulación hasta que no quedan procesos.
    pub fn run(mut self) -> SimulationRun {
        let algorithm = self.policy.algorithm();
        let total = self.pending.len();
        info!("[MOTOR] {}: iniciando con {} procesos", algorithm, total);
        if total == 0 {
            warn!("[MOTOR] {}: carga vacía, no hay métricas", algorithm);
        }

        while !self.pending.is_empty() || !self.ready.is_empty() {
            self.admit_arrivals();

            if self.ready.is_empty() {
                self.advance_idle();
                continue;
            }

            if !self.dispatch_next() {
                warn!(
                    "[MOTOR] {}: la política no eligió proceso con {} listos",
                    algorithm,
                    self.ready.len()
                );
                break;
            }
        }

        info!(
            "[MOTOR] {}: {} procesos completados en t={:.2} ({} despachos)",
            algorithm,
            self.completed.len(),
            self.clock,
            self.timeline.len()
        );

        SimulationRun {
            algorithm,
            completed: self.completed,
            final_clock: self.clock,
            timeline: self.timeline,
        }
    }

    /// Mueve a la cola de listos los procesos con llegada <= reloj.
    fn admit_arrivals(&mut self) {
        while self
            .pending
            .front()
            .is_some_and(|process| process.arrival_time <= self.clock)
        {
            if let Some(process) = self.pending.pop_front() {
                debug!("[MOTOR] t={:.2}: llega {}", self.clock, process);
                self.ready.push_back(process);
            }
        }
    }

    fn next_arrival(&self) -> Option<f64> {
        self.pending.front().map(|process| process.arrival_time)
    }

    /// CPU inactiva: el reloj siempre avanza.
    fn advance_idle(&mut self) {
        let next = self.policy.idle_until(self.clock, self.next_arrival());
        self.clock = if next > self.clock {
            next
        } else {
            self.clock + config::IDLE_STEP
        };
    }

    /// Despacha un tramo. Devuelve `false` si la política no eligió proceso.
    fn dispatch_next(&mut self) -> bool {
        let Some(mut process) = self.policy.select_next(&mut self.ready, self.clock) else {
            return false;
        };

        let start = self.clock;
        process.dispatch(start);

        let proposed = self.policy.slice_end(&process, start, self.next_arrival());
        let end = if proposed > start {
            proposed
        } else {
            start + process.remaining_burst()
        };
        let run_time = (end - start).min(process.remaining_burst());
        process.execute(run_time, end);
        self.clock = end;
        self.record_slice(process.id, start, end);

        if process.is_finished() {
            process.complete(end);
            debug!(
                "[MOTOR] t={:.2}: P{:02} completado (espera {:.2}, turnaround {:.2})",
                end,
                process.id,
                process.waiting_time(),
                end - process.arrival_time
            );
            self.completed.push(process);
        } else {
            // Las llegadas del tramo entran antes que el proceso interrumpido
            self.admit_arrivals();
            debug!(
                "[MOTOR] t={:.2}: P{:02} interrumpido, restante {:.2}",
                end,
                process.id,
                process.remaining_burst()
            );
            self.policy.requeue(&mut self.ready, process);
        }
        true
    }

    /// Registra un tramo. Si la política continúa sin cambio de contexto al
    /// mismo proceso, se extiende el tramo anterior.
    fn record_slice(&mut self, process_id: usize, start: f64, end: f64) {
        if self.policy.coalesces_resumed_slices() {
            if let Some(last) = self
                .timeline
                .last_mut()
                .filter(|last| last.process_id == process_id && last.end == start)
            {
                last.end = end;
                return;
            }
        }
        self.timeline.push(ExecutionSlice {
            process_id,
            start,
            end,
        });
    }
}
