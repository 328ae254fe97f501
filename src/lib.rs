//! # Simulador de Planificación de CPU
//!
//! Esta biblioteca implementa un simulador de eventos discretos que compara
//! algoritmos de planificación de procesos sobre una única CPU.
//!
//! ## Características principales
//!
//! - **Motor común**: un único ciclo de simulación parametrizado por una
//!   política (`SchedulingPolicy`), dueño del reloj y de las colas.
//! - **Algoritmos de scheduling**: FCFS, SJF (no preemptivo y preemptivo,
//!   con semántica SRTF) y Round Robin con quantum configurable.
//! - **Métricas**: tiempos medios de espera, turnaround y respuesta,
//!   throughput y utilización de CPU.
//! - **Carga sintética**: llegadas de Poisson y ráfagas exponenciales o
//!   normales, reproducibles a partir de una semilla.
//!
//! ## Estructura del proyecto
//!
//! - `process`: Registro de un proceso y sus métricas
//! - `scheduler`: Algoritmos disponibles e interfaz de las políticas
//! - `policies`: Implementación de cada política
//! - `engine`: Ciclo de simulación compartido
//! - `metrics`: Cálculo de métricas y reportes
//! - `workload`: Generador de carga
//! - `config`: Valores por defecto y configuración JSON
//! - `simulation`: Comparación de algoritmos sobre una misma carga

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod policies;
pub mod process;
pub mod scheduler;
pub mod simulation;
pub mod workload;

// Re-exportar las estructuras principales para facilitar su uso
pub use engine::{Engine, ExecutionSlice, SimulationRun};
pub use error::SimulationError;
pub use metrics::{MetricsCalculator, SchedulingMetrics};
pub use process::Process;
pub use scheduler::{SchedulingAlgorithm, SchedulingPolicy};
pub use simulation::{AlgorithmResult, Simulation, SimulationResults};
