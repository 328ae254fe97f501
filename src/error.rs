//! # Módulo de Errores
//!
//! Define los errores que puede reportar el simulador antes de construir
//! cualquier estado de simulación. Una vez validada la entrada, la
//! ejecución de un planificador no tiene modos de fallo.

use std::fmt;
use std::io;

/// Errores del simulador de planificación.
#[derive(Debug)]
pub enum SimulationError {
    /// Tiempo de llegada negativo o no finito
    InvalidArrivalTime { id: usize, arrival_time: f64 },
    /// Ráfaga de CPU no positiva o no finita
    InvalidBurstTime { id: usize, burst_time: f64 },
    /// Dos procesos comparten el mismo identificador
    DuplicateProcessId(usize),
    /// Quantum de Round Robin no positivo o no finito
    InvalidQuantum(f64),
    /// Parámetro inválido para el generador de carga
    InvalidParameter { name: &'static str, value: f64 },
    /// No se pudo leer el archivo de configuración
    Io(io::Error),
    /// El archivo de configuración no es JSON válido
    Config(serde_json::Error),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArrivalTime { id, arrival_time } => write!(
                f,
                "proceso {}: tiempo de llegada inválido ({})",
                id, arrival_time
            ),
            Self::InvalidBurstTime { id, burst_time } => write!(
                f,
                "proceso {}: ráfaga de CPU inválida ({}), debe ser > 0",
                id, burst_time
            ),
            Self::DuplicateProcessId(id) => write!(f, "identificador de proceso duplicado: {}", id),
            Self::InvalidQuantum(quantum) => {
                write!(f, "quantum inválido para Round Robin ({}), debe ser > 0", quantum)
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "parámetro de carga inválido: {} = {}", name, value)
            }
            Self::Io(err) => write!(f, "error al leer la configuración: {}", err),
            Self::Config(err) => write!(f, "configuración inválida: {}", err),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SimulationError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for SimulationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err)
    }
}

/// Resultado con el error del simulador.
pub type Result<T> = std::result::Result<T, SimulationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = SimulationError::InvalidBurstTime { id: 3, burst_time: 0.0 };
        assert_eq!(err.to_string(), "proceso 3: ráfaga de CPU inválida (0), debe ser > 0");

        let err = SimulationError::InvalidQuantum(-1.0);
        assert!(err.to_string().contains("Round Robin"));
    }

    #[test]
    fn test_source_chain() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let err = SimulationError::from(io_err);
        assert!(std::error::Error::source(&err).is_some());
        assert!(std::error::Error::source(&SimulationError::DuplicateProcessId(1)).is_none());
    }
}
