//! # Módulo de Métricas y Reportes
//!
//! Este módulo reduce la lista de procesos completados de una ejecución a
//! estadísticas agregadas y genera reportes de texto y CSV a partir de
//! ellas.

use crate::engine::SimulationRun;
use crate::process::Process;
use crate::simulation::SimulationResults;

/// Métricas agregadas de una ejecución.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulingMetrics {
    /// Tiempo promedio de espera
    pub avg_waiting_time: f64,
    /// Tiempo promedio de turnaround
    pub avg_turnaround_time: f64,
    /// Tiempo promedio de respuesta (llegada a primer despacho)
    pub avg_response_time: f64,
    /// Procesos completados por unidad de tiempo
    pub throughput: f64,
    /// Porcentaje de tiempo con la CPU ocupada
    pub cpu_utilization_percent: f64,
    /// Número de procesos completados
    pub completed_count: usize,
    /// Reloj final de la simulación
    pub makespan: f64,
}

/// Calculadora de métricas para la simulación.
///
/// Todas las operaciones son funciones puras de la lista de completados y
/// del reloj final.
pub struct MetricsCalculator;

impl MetricsCalculator {
    /// Crea una nueva instancia del calculador de métricas.
    pub fn new() -> Self {
        Self
    }

    /// Calcula las métricas agregadas.
    ///
    /// # Arguments
    ///
    /// * `completed` - Procesos completados
    /// * `final_clock` - Reloj al terminar la simulación
    ///
    /// # Returns
    ///
    /// `None` si no hay procesos completados; no hay métricas que reportar
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::{Engine, MetricsCalculator, Process, SchedulingAlgorithm};
    ///
    /// let run = Engine::new(vec![Process::new(0, 0.0, 4.0)], SchedulingAlgorithm::fcfs())
    ///     .unwrap()
    ///     .run();
    /// let metrics = MetricsCalculator::new().calculate(&run.completed, run.final_clock).unwrap();
    /// assert_eq!(metrics.cpu_utilization_percent, 100.0);
    /// assert_eq!(metrics.throughput, 0.25);
    ///
    /// assert!(MetricsCalculator::new().calculate(&[], 0.0).is_none());
    /// ```
    pub fn calculate(&self, completed: &[Process], final_clock: f64) -> Option<SchedulingMetrics> {
        if completed.is_empty() {
            return None;
        }

        let count = completed.len() as f64;
        let mean = |values: &mut dyn Iterator<Item = f64>| values.sum::<f64>() / count;

        let avg_waiting_time = mean(&mut completed.iter().map(Process::waiting_time));
        let avg_turnaround_time =
            mean(&mut completed.iter().filter_map(Process::turnaround_time));
        let avg_response_time = mean(&mut completed.iter().filter_map(Process::response_time));

        let throughput = if final_clock > 0.0 {
            count / final_clock
        } else {
            0.0
        };

        let busy: f64 = completed.iter().map(Process::original_burst).sum();
        let cpu_utilization_percent = 100.0 * busy / final_clock.max(1.0);

        Some(SchedulingMetrics {
            avg_waiting_time,
            avg_turnaround_time,
            avg_response_time,
            throughput,
            cpu_utilization_percent,
            completed_count: completed.len(),
            makespan: final_clock,
        })
    }

    /// Calcula las métricas de una ejecución completa.
    pub fn calculate_run(&self, run: &SimulationRun) -> Option<SchedulingMetrics> {
        self.calculate(&run.completed, run.final_clock)
    }

    /// Genera un reporte detallado de una ejecución.
    ///
    /// # Arguments
    ///
    /// * `run` - Ejecución a reportar
    /// * `metrics` - Métricas de la ejecución, si las hay
    ///
    /// # Returns
    ///
    /// String con la tabla por proceso y las estadísticas resumidas
    pub fn generate_report(&self, run: &SimulationRun, metrics: Option<&SchedulingMetrics>) -> String {
        let mut report = String::new();

        report.push_str(&format!("\n=== REPORTE: {} ===\n\n", run.algorithm.description()));

        report.push_str(&format!(
            "{:^6} {:^10} {:^10} {:^10} {:^10} {:^10} {:^12}\n",
            "PID", "Llegada", "Ráfaga", "Respuesta", "Espera", "Fin", "Turnaround"
        ));
        report.push_str(&format!("{}\n", "-".repeat(74)));

        for process in &run.completed {
            report.push_str(&format!(
                "{:^6} {:^10} {:^10} {:^10} {:^10} {:^10} {:^12}\n",
                format!("#{:02}", process.id),
                Self::format_time(process.arrival_time),
                Self::format_time(process.original_burst()),
                Self::format_optional(process.response_time()),
                Self::format_time(process.waiting_time()),
                Self::format_optional(process.completion_time()),
                Self::format_optional(process.turnaround_time()),
            ));
        }

        report.push_str("\n=== ESTADÍSTICAS RESUMIDAS ===\n");
        match metrics {
            Some(metrics) => {
                report.push_str(&format!("Procesos completados: {}\n", metrics.completed_count));
                report.push_str(&format!(
                    "Tiempo medio de espera: {}\n",
                    Self::format_time(metrics.avg_waiting_time)
                ));
                report.push_str(&format!(
                    "Tiempo medio de turnaround: {}\n",
                    Self::format_time(metrics.avg_turnaround_time)
                ));
                report.push_str(&format!(
                    "Tiempo medio de respuesta: {}\n",
                    Self::format_time(metrics.avg_response_time)
                ));
                report.push_str(&format!("Throughput: {:.3} procesos/unidad\n", metrics.throughput));
                report.push_str(&format!(
                    "Utilización de CPU: {:.2}%\n",
                    metrics.cpu_utilization_percent
                ));
            }
            None => report.push_str("Sin datos: la carga estaba vacía\n"),
        }
        report.push_str(&format!("Despachos: {}\n", run.dispatches()));
        report.push_str(&format!("Orden de finalización: {:?}\n", run.completion_order()));

        report
    }

    /// Genera una tabla comparativa de todos los algoritmos ejecutados.
    pub fn generate_comparison_report(&self, results: &SimulationResults) -> String {
        let mut report = String::new();

        report.push_str("\n=== COMPARACIÓN DE ALGORITMOS ===\n\n");
        report.push_str(&format!(
            "{:<38} {:>10} {:>12} {:>12} {:>10}\n",
            "Algoritmo", "Espera", "Turnaround", "Throughput", "CPU %"
        ));
        report.push_str(&format!("{}\n", "-".repeat(86)));

        for result in results.iter() {
            let name = result.algorithm.description();
            match &result.metrics {
                Some(metrics) => report.push_str(&format!(
                    "{:<38} {:>10.2} {:>12.2} {:>12.3} {:>10.2}\n",
                    name,
                    metrics.avg_waiting_time,
                    metrics.avg_turnaround_time,
                    metrics.throughput,
                    metrics.cpu_utilization_percent
                )),
                None => report.push_str(&format!(
                    "{:<38} {:>10} {:>12} {:>12} {:>10}\n",
                    name, "N/A", "N/A", "N/A", "N/A"
                )),
            }
        }

        report
    }

    /// Genera los datos por proceso de una ejecución en formato CSV.
    ///
    /// # Returns
    ///
    /// String CSV con una cabecera y una fila por proceso completado
    pub fn generate_csv_report(&self, run: &SimulationRun) -> String {
        let mut csv = String::new();

        csv.push_str("Algorithm,ProcessID,ArrivalTime,BurstTime,Priority,ResponseTime,WaitTime,CompletionTime,Turnaround\n");

        for process in &run.completed {
            csv.push_str(&format!("{},", run.algorithm.code()));
            csv.push_str(&format!("{},", process.id));
            csv.push_str(&format!("{:.3},", process.arrival_time));
            csv.push_str(&format!("{:.3},", process.original_burst()));
            match process.priority {
                Some(priority) => csv.push_str(&format!("{},", priority)),
                None => csv.push_str("N/A,"),
            }
            csv.push_str(&format!("{},", Self::csv_optional(process.response_time())));
            csv.push_str(&format!("{:.3},", process.waiting_time()));
            csv.push_str(&format!("{},", Self::csv_optional(process.completion_time())));
            csv.push_str(&Self::csv_optional(process.turnaround_time()));
            csv.push('\n');
        }

        csv
    }

    /// Formatea un tiempo de simulación con dos decimales.
    pub fn format_time(time: f64) -> String {
        format!("{:.2}", time)
    }

    fn format_optional(time: Option<f64>) -> String {
        time.map(Self::format_time).unwrap_or_else(|| "N/A".to_string())
    }

    fn csv_optional(time: Option<f64>) -> String {
        time.map(|t| format!("{:.3}", t))
            .unwrap_or_else(|| "N/A".to_string())
    }
}

impl Default for MetricsCalculator {
    fn default() -> Self {
        Self::new()
    }
}
