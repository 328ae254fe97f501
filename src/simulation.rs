//! # Módulo de Simulación Principal
//!
//! Este módulo coordina la comparación de algoritmos: construye o recibe
//! la carga de procesos, ejecuta cada algoritmo sobre copias
//! independientes y reúne las métricas de todas las ejecuciones.

use log::info;

use crate::config::SimulationConfig;
use crate::engine::{validate_workload, Engine, SimulationRun};
use crate::error::Result;
use crate::metrics::{MetricsCalculator, SchedulingMetrics};
use crate::process::Process;
use crate::scheduler::SchedulingAlgorithm;
use crate::workload::WorkloadGenerator;

/// Resultado de un algoritmo dentro de una comparación.
#[derive(Debug, Clone)]
pub struct AlgorithmResult {
    /// Algoritmo ejecutado
    pub algorithm: SchedulingAlgorithm,
    /// Traza completa de la ejecución
    pub run: SimulationRun,
    /// Métricas agregadas, `None` si la carga estaba vacía
    pub metrics: Option<SchedulingMetrics>,
}

/// Resultados de todos los algoritmos, en el orden en que se ejecutaron.
#[derive(Debug, Clone, Default)]
pub struct SimulationResults {
    results: Vec<AlgorithmResult>,
}

impl SimulationResults {
    /// Busca el resultado de un algoritmo.
    pub fn get(&self, algorithm: &SchedulingAlgorithm) -> Option<&AlgorithmResult> {
        self.results
            .iter()
            .find(|result| &result.algorithm == algorithm)
    }

    /// Métricas de un algoritmo, si se ejecutó y hubo procesos.
    pub fn metrics(&self, algorithm: &SchedulingAlgorithm) -> Option<&SchedulingMetrics> {
        self.get(algorithm)?.metrics.as_ref()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AlgorithmResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

impl<'a> IntoIterator for &'a SimulationResults {
    type Item = &'a AlgorithmResult;
    type IntoIter = std::slice::Iter<'a, AlgorithmResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

/// Orquestador de la comparación de algoritmos.
///
/// La `Simulation` conserva la carga original intacta; cada algoritmo
/// recibe copias recién creadas con las métricas en cero.
pub struct Simulation {
    /// Carga de procesos a comparar
    processes: Vec<Process>,
    /// Algoritmos a ejecutar, en orden
    algorithms: Vec<SchedulingAlgorithm>,
    /// Calculadora de métricas para generar reportes
    metrics_calculator: MetricsCalculator,
}

impl Simulation {
    /// Crea una simulación que compara los cuatro algoritmos por defecto.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{Process, SchedulingAlgorithm, Simulation};
    ///
    /// let simulation = Simulation::new(vec![Process::new(0, 0.0, 3.0), Process::new(1, 0.0, 1.0)]);
    /// let results = simulation.run().unwrap();
    ///
    /// assert_eq!(results.len(), 4);
    /// let sjf = results.get(&SchedulingAlgorithm::sjf()).unwrap();
    /// assert_eq!(sjf.run.completion_order(), vec![1, 0]);
    /// ```
    pub fn new(processes: Vec<Process>) -> Self {
        Self::with_algorithms(processes, SchedulingAlgorithm::all())
    }

    /// Crea una simulación con algoritmos personalizados.
    pub fn with_algorithms(processes: Vec<Process>, algorithms: Vec<SchedulingAlgorithm>) -> Self {
        Self {
            processes,
            algorithms,
            metrics_calculator: MetricsCalculator::new(),
        }
    }

    /// Genera la carga y los algoritmos a partir de la configuración.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` si los parámetros de la carga no son válidos.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let processes = WorkloadGenerator::new(config.seed).generate(&config.workload())?;
        Ok(Self::with_algorithms(processes, config.scheduling_algorithms()))
    }

    /// Carga original, sin modificar por ninguna ejecución.
    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn algorithms(&self) -> &[SchedulingAlgorithm] {
        &self.algorithms
    }

    /// Ejecuta todos los algoritmos y retorna sus resultados.
    ///
    /// La carga y los algoritmos se validan antes de ejecutar ninguno, de
    /// modo que un error no deja resultados parciales.
    pub fn run(&self) -> Result<SimulationResults> {
        validate_workload(&self.processes)?;
        for algorithm in &self.algorithms {
            algorithm.validate()?;
        }

        info!(
            "=== Simulación de planificación: {} procesos, {} algoritmos ===",
            self.processes.len(),
            self.algorithms.len()
        );

        let results = self
            .algorithms
            .iter()
            .map(|algorithm| self.run_algorithm(*algorithm))
            .collect::<Result<Vec<_>>>()?;

        Ok(SimulationResults { results })
    }

    /// Ejecuta un único algoritmo sobre copias independientes de la carga.
    pub fn run_algorithm(&self, algorithm: SchedulingAlgorithm) -> Result<AlgorithmResult> {
        let copies = self.processes.iter().map(Process::fresh_copy).collect();
        let run = Engine::new(copies, algorithm)?.run();
        let metrics = self.metrics_calculator.calculate_run(&run);

        Ok(AlgorithmResult {
            algorithm,
            run,
            metrics,
        })
    }

    /// Genera el reporte comparativo seguido del detalle de cada algoritmo.
    pub fn generate_report(&self, results: &SimulationResults) -> String {
        let mut report = self.metrics_calculator.generate_comparison_report(results);
        for result in results {
            report.push_str(
                &self
                    .metrics_calculator
                    .generate_report(&result.run, result.metrics.as_ref()),
            );
        }
        report
    }

    /// Genera un CSV con los procesos de todas las ejecuciones.
    pub fn generate_csv_report(&self, results: &SimulationResults) -> String {
        let mut csv = String::new();
        for (index, result) in results.iter().enumerate() {
            let run_csv = self.metrics_calculator.generate_csv_report(&result.run);
            let skip = usize::from(index > 0);
            for line in run_csv.lines().skip(skip) {
                csv.push_str(line);
                csv.push('\n');
            }
        }
        csv
    }
}
