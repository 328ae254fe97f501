//! # Módulo de Procesos
//!
//! Este módulo define el registro de un proceso: su identidad, los datos
//! de llegada y ráfaga fijados por el generador, y las métricas que el
//! motor de planificación va escribiendo durante la simulación.

use std::fmt;

use crate::error::{Result, SimulationError};

/// Tolerancia para considerar que una ráfaga restante llegó a cero.
pub const TIME_EPSILON: f64 = 1e-9;

/// Representa un proceso que compite por la CPU.
///
/// Los campos de identidad (`id`, `arrival_time`, `priority`, `period`) son
/// inmutables durante la simulación. La ráfaga original y la restante se
/// guardan por separado: la utilización de CPU siempre lee la original.
#[derive(Debug, Clone, PartialEq)]
pub struct Process {
    /// Identificador único del proceso
    pub id: usize,
    /// Instante en que el proceso pasa a ser elegible
    pub arrival_time: f64,
    /// Prioridad (reservada, ningún algoritmo la consulta)
    pub priority: Option<i32>,
    /// Período para procesos de tiempo real (no utilizado)
    pub period: Option<f64>,
    original_burst: f64,
    remaining_burst: f64,
    waiting_time: f64,
    response_time: Option<f64>,
    turnaround_time: Option<f64>,
    completion_time: Option<f64>,
    last_departure: Option<f64>,
    /// Orden de inserción del generador, usado para desempates
    pub(crate) seq: usize,
}

impl Process {
    /// Crea un nuevo proceso con las métricas en cero.
    ///
    /// # Arguments
    ///
    /// * `id` - Identificador único del proceso
    /// * `arrival_time` - Instante de llegada (>= 0)
    /// * `burst_time` - Tiempo de CPU requerido (> 0)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::Process;
    ///
    /// let process = Process::new(1, 0.0, 5.0).with_priority(3);
    /// assert_eq!(process.remaining_burst(), 5.0);
    /// assert_eq!(process.priority, Some(3));
    /// assert!(process.completion_time().is_none());
    /// ```
    pub fn new(id: usize, arrival_time: f64, burst_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            priority: None,
            period: None,
            original_burst: burst_time,
            remaining_burst: burst_time,
            waiting_time: 0.0,
            response_time: None,
            turnaround_time: None,
            completion_time: None,
            last_departure: None,
            seq: id,
        }
    }

    /// Asigna una prioridad al proceso.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Asigna un período al proceso.
    pub fn with_period(mut self, period: f64) -> Self {
        self.period = Some(period);
        self
    }

    /// Crea una copia independiente lista para otra ejecución.
    ///
    /// Conserva la identidad y la ráfaga original, pero reinicia la ráfaga
    /// restante y todas las métricas. Cada algoritmo debe ejecutarse sobre
    /// sus propias copias para que las comparaciones sean justas.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::Process;
    ///
    /// let original = Process::new(7, 2.0, 4.0).with_period(10.0);
    /// let copy = original.fresh_copy();
    /// assert_eq!(copy.id, 7);
    /// assert_eq!(copy.period, Some(10.0));
    /// assert_eq!(copy.waiting_time(), 0.0);
    /// ```
    pub fn fresh_copy(&self) -> Self {
        let mut copy = Self::new(self.id, self.arrival_time, self.original_burst);
        copy.priority = self.priority;
        copy.period = self.period;
        copy.seq = self.seq;
        copy
    }

    /// Verifica que el proceso pueda entrar a una simulación.
    ///
    /// # Errors
    ///
    /// `InvalidArrivalTime` si la llegada es negativa o no finita,
    /// `InvalidBurstTime` si la ráfaga no es positiva o no es finita.
    pub fn validate(&self) -> Result<()> {
        if !self.arrival_time.is_finite() || self.arrival_time < 0.0 {
            return Err(SimulationError::InvalidArrivalTime {
                id: self.id,
                arrival_time: self.arrival_time,
            });
        }
        if !self.original_burst.is_finite() || self.original_burst <= 0.0 {
            return Err(SimulationError::InvalidBurstTime {
                id: self.id,
                burst_time: self.original_burst,
            });
        }
        Ok(())
    }

    /// Ráfaga de CPU fijada al crear el proceso.
    pub fn original_burst(&self) -> f64 {
        self.original_burst
    }

    /// Trabajo de CPU que aún falta por ejecutar.
    pub fn remaining_burst(&self) -> f64 {
        self.remaining_burst
    }

    /// Tiempo total que el proceso pasó listo sin ejecutarse.
    pub fn waiting_time(&self) -> f64 {
        self.waiting_time
    }

    /// Tiempo desde la llegada hasta el primer despacho.
    pub fn response_time(&self) -> Option<f64> {
        self.response_time
    }

    /// Tiempo desde la llegada hasta la finalización.
    pub fn turnaround_time(&self) -> Option<f64> {
        self.turnaround_time
    }

    /// Instante en que el proceso terminó.
    pub fn completion_time(&self) -> Option<f64> {
        self.completion_time
    }

    /// `true` si el proceso ya obtuvo la CPU al menos una vez.
    pub fn first_dispatched(&self) -> bool {
        self.response_time.is_some()
    }

    /// Último instante en que el proceso dejó la CPU.
    pub fn last_departure(&self) -> Option<f64> {
        self.last_departure
    }

    /// `true` si ya no le queda trabajo pendiente.
    pub fn is_finished(&self) -> bool {
        self.remaining_burst <= TIME_EPSILON
    }

    /// Registra que el proceso toma la CPU en `clock`.
    ///
    /// La espera acumula el hueco desde la última salida de la CPU, o desde
    /// la llegada si es el primer despacho.
    pub(crate) fn dispatch(&mut self, clock: f64) {
        let ready_since = self.last_departure.unwrap_or(self.arrival_time);
        self.waiting_time += (clock - ready_since).max(0.0);
        if self.response_time.is_none() {
            self.response_time = Some((clock - self.arrival_time).max(0.0));
        }
    }

    /// Descuenta `run_time` de la ráfaga restante y registra la salida.
    pub(crate) fn execute(&mut self, run_time: f64, departure: f64) {
        self.remaining_burst = (self.remaining_burst - run_time).max(0.0);
        if self.remaining_burst <= TIME_EPSILON {
            self.remaining_burst = 0.0;
        }
        self.last_departure = Some(departure);
    }

    /// Finaliza el proceso en `clock`.
    pub(crate) fn complete(&mut self, clock: f64) {
        self.completion_time = Some(clock);
        self.turnaround_time = Some(clock - self.arrival_time);
    }
}

impl fmt::Display for Process {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "P{:02} (llegada={:.2}, ráfaga={:.2}, restante={:.2})",
            self.id, self.arrival_time, self.original_burst, self.remaining_burst
        )
    }
}
