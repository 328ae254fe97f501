//! # Módulo de Algoritmos de Planificación
//!
//! Este módulo define los algoritmos de planificación disponibles y la
//! interfaz común que el motor usa para consultar a cada política qué
//! proceso despachar, durante cuánto tiempo y cómo avanzar en inactividad.

use std::collections::VecDeque;
use std::fmt;

use crate::config;
use crate::error::{Result, SimulationError};
use crate::policies::{FcfsPolicy, RoundRobinPolicy, SjfPolicy};
use crate::process::Process;

/// Cola de procesos listos compartida entre el motor y la política.
pub type ReadyQueue = VecDeque<Process>;

/// Algoritmos de planificación disponibles.
///
/// Cada variante se traduce en una política concreta mediante
/// [`SchedulingAlgorithm::policy`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SchedulingAlgorithm {
    /// First-Come First-Served: no preemptivo, en orden de llegada.
    Fcfs,

    /// Shortest Job First: elige la menor ráfaga restante.
    ///
    /// En modo preemptivo (SRTF) un trabajo estrictamente más corto que
    /// llega desplaza al proceso en ejecución.
    Sjf {
        /// Si el proceso en ejecución puede ser desplazado
        preemptive: bool,
    },

    /// Round Robin: preemptivo con quantum fijo.
    RoundRobin {
        /// Tiempo máximo de ejecución continua por despacho
        quantum: f64,
    },
}

impl SchedulingAlgorithm {
    /// Crea un nuevo algoritmo FCFS.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// let algorithm = SchedulingAlgorithm::fcfs();
    /// assert!(!algorithm.is_preemptive());
    /// ```
    pub fn fcfs() -> Self {
        Self::Fcfs
    }

    /// Crea un SJF no preemptivo.
    pub fn sjf() -> Self {
        Self::Sjf { preemptive: false }
    }

    /// Crea un SJF preemptivo (Shortest Remaining Time First).
    pub fn sjf_preemptive() -> Self {
        Self::Sjf { preemptive: true }
    }

    /// Crea un nuevo algoritmo Round Robin con el quantum especificado.
    ///
    /// El quantum se valida al construir el motor, no aquí.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// let algorithm = SchedulingAlgorithm::round_robin(2.0);
    /// assert_eq!(algorithm.get_quantum(), Some(2.0));
    /// ```
    pub fn round_robin(quantum: f64) -> Self {
        Self::RoundRobin { quantum }
    }

    /// Los cuatro algoritmos comparados por defecto.
    pub fn all() -> Vec<Self> {
        vec![
            Self::fcfs(),
            Self::sjf(),
            Self::sjf_preemptive(),
            Self::round_robin(config::DEFAULT_QUANTUM),
        ]
    }

    /// Determina si el algoritmo es preemptivo.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// assert!(!SchedulingAlgorithm::sjf().is_preemptive());
    /// assert!(SchedulingAlgorithm::sjf_preemptive().is_preemptive());
    /// assert!(SchedulingAlgorithm::round_robin(1.0).is_preemptive());
    /// ```
    pub fn is_preemptive(&self) -> bool {
        match self {
            Self::Fcfs => false,
            Self::Sjf { preemptive } => *preemptive,
            Self::RoundRobin { .. } => true,
        }
    }

    /// Obtiene el quantum configurado para Round Robin.
    ///
    /// # Returns
    ///
    /// `Some(quantum)` si es Round Robin, `None` en otro caso
    pub fn get_quantum(&self) -> Option<f64> {
        match self {
            Self::RoundRobin { quantum } => Some(*quantum),
            _ => None,
        }
    }

    /// Verifica los parámetros del algoritmo.
    ///
    /// # Errors
    ///
    /// `InvalidQuantum` si el quantum de Round Robin no es positivo y finito.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::RoundRobin { quantum } if !quantum.is_finite() || *quantum <= 0.0 => {
                Err(SimulationError::InvalidQuantum(*quantum))
            }
            _ => Ok(()),
        }
    }

    /// Código corto usado en la línea de comandos y la configuración.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fcfs => "FCFS",
            Self::Sjf { preemptive: false } => "SJF-NP",
            Self::Sjf { preemptive: true } => "SJF-P",
            Self::RoundRobin { .. } => "RR",
        }
    }

    /// Obtiene una descripción textual del algoritmo.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::SchedulingAlgorithm;
    ///
    /// assert_eq!(SchedulingAlgorithm::fcfs().description(), "First-Come, First-Served");
    /// assert_eq!(SchedulingAlgorithm::round_robin(2.0).description(), "Round Robin (Q=2)");
    /// ```
    pub fn description(&self) -> String {
        match self {
            Self::Fcfs => "First-Come, First-Served".to_string(),
            Self::Sjf { preemptive: false } => "Shortest Job First (no preemptivo)".to_string(),
            Self::Sjf { preemptive: true } => "Shortest Job First (preemptivo)".to_string(),
            Self::RoundRobin { quantum } => format!("Round Robin (Q={})", quantum),
        }
    }

    /// Construye la política que implementa este algoritmo.
    pub fn policy(&self) -> Box<dyn SchedulingPolicy> {
        match self {
            Self::Fcfs => Box::new(FcfsPolicy::new()),
            Self::Sjf { preemptive } => Box::new(SjfPolicy::new(*preemptive)),
            Self::RoundRobin { quantum } => Box::new(RoundRobinPolicy::new(*quantum)),
        }
    }
}

impl fmt::Display for SchedulingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fcfs => write!(f, "FCFS"),
            Self::Sjf { preemptive: false } => write!(f, "SJF (no preemptivo)"),
            Self::Sjf { preemptive: true } => write!(f, "SJF (preemptivo)"),
            Self::RoundRobin { quantum } => write!(f, "Round Robin (Q={})", quantum),
        }
    }
}

/// Regla de decisión de una política de planificación.
///
/// El motor es dueño del reloj y de las colas; la política solo decide.
/// Todos los tiempos están en unidades de simulación.
pub trait SchedulingPolicy {
    /// Algoritmo que implementa la política.
    fn algorithm(&self) -> SchedulingAlgorithm;

    /// Extrae de `ready` el próximo proceso a despachar.
    fn select_next(&mut self, ready: &mut ReadyQueue, clock: f64) -> Option<Process>;

    /// Instante en que termina el tramo de ejecución de `process`,
    /// despachado en `clock`. `next_arrival` es la llegada pendiente más
    /// próxima, si existe. Debe ser estrictamente mayor que `clock`.
    fn slice_end(&self, process: &Process, clock: f64, next_arrival: Option<f64>) -> f64;

    /// Devuelve a la cola un proceso que no terminó su ráfaga.
    fn requeue(&mut self, ready: &mut ReadyQueue, process: Process) {
        ready.push_back(process);
    }

    /// Si volver a elegir al proceso que acaba de salir, en el mismo
    /// instante, continúa su tramo en lugar de contar un nuevo despacho.
    fn coalesces_resumed_slices(&self) -> bool {
        false
    }

    /// Nuevo valor del reloj cuando no hay procesos listos.
    fn idle_until(&self, clock: f64, _next_arrival: Option<f64>) -> f64 {
        clock + config::IDLE_STEP
    }
}

/// Avance en inactividad para políticas que siguen las llegadas futuras.
pub(crate) fn idle_until_next_arrival(clock: f64, next_arrival: Option<f64>) -> f64 {
    let step = clock + config::IDLE_STEP;
    next_arrival.map_or(step, |arrival| step.max(arrival))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fcfs_creation() {
        let algorithm = SchedulingAlgorithm::fcfs();
        assert_eq!(algorithm, SchedulingAlgorithm::Fcfs);
        assert!(!algorithm.is_preemptive());
        assert_eq!(algorithm.get_quantum(), None);
    }

    #[test]
    fn test_round_robin_creation() {
        let algorithm = SchedulingAlgorithm::round_robin(4.0);

        match algorithm {
            SchedulingAlgorithm::RoundRobin { quantum } => assert_eq!(quantum, 4.0),
            _ => panic!("Expected RoundRobin variant"),
        }

        assert!(algorithm.is_preemptive());
    }

    #[test]
    fn test_quantum_validation() {
        assert!(SchedulingAlgorithm::round_robin(2.0).validate().is_ok());
        assert!(matches!(
            SchedulingAlgorithm::round_robin(0.0).validate(),
            Err(SimulationError::InvalidQuantum(_))
        ));
        assert!(SchedulingAlgorithm::round_robin(-3.0).validate().is_err());
        assert!(SchedulingAlgorithm::round_robin(f64::NAN).validate().is_err());
        assert!(SchedulingAlgorithm::sjf_preemptive().validate().is_ok());
    }

    #[test]
    fn test_policy_matches_algorithm() {
        for algorithm in SchedulingAlgorithm::all() {
            assert_eq!(algorithm.policy().algorithm(), algorithm);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SchedulingAlgorithm::fcfs()), "FCFS");
        assert_eq!(format!("{}", SchedulingAlgorithm::sjf()), "SJF (no preemptivo)");
        assert_eq!(format!("{}", SchedulingAlgorithm::round_robin(2.5)), "Round Robin (Q=2.5)");
        assert_eq!(SchedulingAlgorithm::sjf_preemptive().code(), "SJF-P");
    }

    #[test]
    fn test_idle_until_next_arrival() {
        assert_eq!(idle_until_next_arrival(3.0, Some(10.0)), 10.0);
        assert_eq!(idle_until_next_arrival(3.0, Some(3.5)), 4.0);
        assert_eq!(idle_until_next_arrival(3.0, None), 4.0);
    }
}
