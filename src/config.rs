//! # Módulo de Configuración
//!
//! Valores por defecto del simulador y carga de la configuración desde un
//! archivo JSON. Todas las claves son opcionales; las ausentes toman el
//! valor por defecto.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Result;
use crate::scheduler::SchedulingAlgorithm;
use crate::workload::{BurstDistribution, PriorityDistribution, WorkloadConfig};

/// Quantum por defecto para Round Robin (unidades de simulación)
pub const DEFAULT_QUANTUM: f64 = 2.0;

/// Avance mínimo del reloj cuando la CPU está inactiva
pub const IDLE_STEP: f64 = 1.0;

/// Semilla por defecto del generador de carga
pub const DEFAULT_SEED: u64 = 42;

/// Número de procesos generados por defecto
pub const DEFAULT_NUM_PROCESSES: usize = 20;

/// Tasa media de llegadas de Poisson por unidad de tiempo
pub const DEFAULT_ARRIVAL_RATE: f64 = 0.5;

/// Media de las ráfagas de CPU generadas
pub const DEFAULT_BURST_MEAN: f64 = 10.0;

/// Desviación estándar de las ráfagas (distribución normal)
pub const DEFAULT_BURST_STD_DEV: f64 = 3.0;

/// Rango de prioridades generadas
pub const DEFAULT_PRIORITY_MIN: i32 = 1;
pub const DEFAULT_PRIORITY_MAX: i32 = 10;

/// Código de algoritmo tal como aparece en la configuración y la CLI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum AlgorithmCode {
    #[serde(rename = "FCFS")]
    Fcfs,
    #[serde(rename = "SJF-NP")]
    SjfNonPreemptive,
    #[serde(rename = "SJF-P")]
    SjfPreemptive,
    #[serde(rename = "RR")]
    RoundRobin,
}

impl AlgorithmCode {
    /// Todos los códigos, en el orden de comparación habitual.
    pub const ALL: [AlgorithmCode; 4] = [
        Self::Fcfs,
        Self::SjfNonPreemptive,
        Self::SjfPreemptive,
        Self::RoundRobin,
    ];

    /// Traduce el código al algoritmo, aplicando el quantum a Round Robin.
    pub fn to_algorithm(self, quantum: f64) -> SchedulingAlgorithm {
        match self {
            Self::Fcfs => SchedulingAlgorithm::fcfs(),
            Self::SjfNonPreemptive => SchedulingAlgorithm::sjf(),
            Self::SjfPreemptive => SchedulingAlgorithm::sjf_preemptive(),
            Self::RoundRobin => SchedulingAlgorithm::round_robin(quantum),
        }
    }
}

/// Parámetros completos de una simulación.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Número de procesos a generar
    pub num_processes: usize,
    /// Tasa de llegadas de Poisson
    pub arrival_rate: f64,
    /// Distribución de las ráfagas de CPU
    pub burst_distribution: BurstDistribution,
    pub burst_mean: f64,
    pub burst_std_dev: f64,
    /// Distribución de las prioridades
    pub priority_distribution: PriorityDistribution,
    pub priority_min: i32,
    pub priority_max: i32,
    /// Algoritmos a comparar
    pub algorithms: Vec<AlgorithmCode>,
    /// Quantum para Round Robin
    pub quantum: f64,
    /// Semilla del generador de carga
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_processes: DEFAULT_NUM_PROCESSES,
            arrival_rate: DEFAULT_ARRIVAL_RATE,
            burst_distribution: BurstDistribution::Normal,
            burst_mean: DEFAULT_BURST_MEAN,
            burst_std_dev: DEFAULT_BURST_STD_DEV,
            priority_distribution: PriorityDistribution::Uniform,
            priority_min: DEFAULT_PRIORITY_MIN,
            priority_max: DEFAULT_PRIORITY_MAX,
            algorithms: AlgorithmCode::ALL.to_vec(),
            quantum: DEFAULT_QUANTUM,
            seed: DEFAULT_SEED,
        }
    }
}

impl SimulationConfig {
    /// Interpreta una configuración en formato JSON.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::config::{AlgorithmCode, SimulationConfig};
    ///
    /// let config = SimulationConfig::from_json_str(r#"{"num_processes": 5, "algorithms": ["RR"]}"#).unwrap();
    /// assert_eq!(config.num_processes, 5);
    /// assert_eq!(config.algorithms, vec![AlgorithmCode::RoundRobin]);
    /// assert_eq!(config.quantum, 2.0);
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Carga la configuración desde un archivo JSON.
    ///
    /// # Errors
    ///
    /// `Io` si el archivo no se puede leer, `Config` si su contenido no es
    /// una configuración válida.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Algoritmos seleccionados, en el orden configurado.
    pub fn scheduling_algorithms(&self) -> Vec<SchedulingAlgorithm> {
        self.algorithms
            .iter()
            .map(|code| code.to_algorithm(self.quantum))
            .collect()
    }

    /// Parámetros del generador de carga.
    pub fn workload(&self) -> WorkloadConfig {
        WorkloadConfig {
            num_processes: self.num_processes,
            arrival_rate: self.arrival_rate,
            burst_distribution: self.burst_distribution,
            burst_mean: self.burst_mean,
            burst_std_dev: self.burst_std_dev,
            priority_distribution: self.priority_distribution,
            priority_min: self.priority_min,
            priority_max: self.priority_max,
        }
    }
}
