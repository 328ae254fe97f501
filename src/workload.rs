//! # Módulo de Generación de Carga
//!
//! Genera listas de procesos sintéticos a partir de distribuciones de
//! probabilidad. La semilla es estado explícito del generador, de modo que
//! la misma semilla reproduce siempre la misma carga.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution, Exp, Normal};
use serde::Deserialize;

use crate::error::{Result, SimulationError};
use crate::process::Process;

/// Ráfaga mínima generada; evita ráfagas nulas al muestrear.
pub const MIN_BURST_TIME: f64 = 1e-3;

/// Distribución de las ráfagas de CPU.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurstDistribution {
    /// Exponencial con la media indicada
    Exponential,
    /// Valor absoluto de una normal
    Normal,
}

/// Distribución de las prioridades.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityDistribution {
    /// Enteros uniformes en el rango
    Uniform,
    /// Sesgada hacia prioridades bajas (Beta(2, 5))
    Weighted,
}

/// Parámetros de la carga a generar.
#[derive(Clone, Debug, PartialEq)]
pub struct WorkloadConfig {
    pub num_processes: usize,
    pub arrival_rate: f64,
    pub burst_distribution: BurstDistribution,
    pub burst_mean: f64,
    pub burst_std_dev: f64,
    pub priority_distribution: PriorityDistribution,
    pub priority_min: i32,
    pub priority_max: i32,
}

/// Generador de procesos con semilla explícita.
pub struct WorkloadGenerator {
    rng: StdRng,
}

impl WorkloadGenerator {
    /// Crea un generador reproducible a partir de `seed`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cpu_scheduling_simulator::workload::WorkloadGenerator;
    ///
    /// let a = WorkloadGenerator::new(42).poisson_arrivals(0.5, 5, 0.0).unwrap();
    /// let b = WorkloadGenerator::new(42).poisson_arrivals(0.5, 5, 0.0).unwrap();
    /// assert_eq!(a, b);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Tiempos de llegada de un proceso de Poisson.
    ///
    /// Los intervalos entre llegadas son exponenciales con media `1 / rate`
    /// y se acumulan a partir de `start`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` si `rate` no es positiva y finita.
    pub fn poisson_arrivals(&mut self, rate: f64, count: usize, start: f64) -> Result<Vec<f64>> {
        let gaps = Exp::new(rate)
            .ok()
            .filter(|_| rate.is_finite() && rate > 0.0)
            .ok_or(SimulationError::InvalidParameter {
                name: "arrival_rate",
                value: rate,
            })?;

        let mut current = start;
        Ok((0..count)
            .map(|_| {
                current += gaps.sample(&mut self.rng);
                current
            })
            .collect())
    }

    /// Ráfagas de CPU según la distribución indicada.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` si la media no es positiva o la desviación es
    /// negativa.
    pub fn burst_times(
        &mut self,
        distribution: BurstDistribution,
        count: usize,
        mean: f64,
        std_dev: f64,
    ) -> Result<Vec<f64>> {
        if !mean.is_finite() || mean <= 0.0 {
            return Err(SimulationError::InvalidParameter {
                name: "burst_mean",
                value: mean,
            });
        }

        let samples: Vec<f64> = match distribution {
            BurstDistribution::Exponential => {
                let dist = Exp::new(1.0 / mean).map_err(|_| SimulationError::InvalidParameter {
                    name: "burst_mean",
                    value: mean,
                })?;
                dist.sample_iter(&mut self.rng).take(count).collect()
            }
            BurstDistribution::Normal => {
                if !std_dev.is_finite() || std_dev < 0.0 {
                    return Err(SimulationError::InvalidParameter {
                        name: "burst_std_dev",
                        value: std_dev,
                    });
                }
                let dist = Normal::new(mean, std_dev).map_err(|_| {
                    SimulationError::InvalidParameter {
                        name: "burst_std_dev",
                        value: std_dev,
                    }
                })?;
                dist.sample_iter(&mut self.rng)
                    .take(count)
                    .map(f64::abs)
                    .collect()
            }
        };

        Ok(samples
            .into_iter()
            .map(|burst| burst.max(MIN_BURST_TIME))
            .collect())
    }

    /// Prioridades enteras en `[min, max]`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` si `min > max`.
    pub fn priorities(
        &mut self,
        count: usize,
        distribution: PriorityDistribution,
        min: i32,
        max: i32,
    ) -> Result<Vec<i32>> {
        if min > max {
            return Err(SimulationError::InvalidParameter {
                name: "priority_max",
                value: max as f64,
            });
        }

        match distribution {
            PriorityDistribution::Uniform => {
                Ok((0..count).map(|_| self.rng.gen_range(min..=max)).collect())
            }
            PriorityDistribution::Weighted => {
                let beta = Beta::new(2.0, 5.0).map_err(|_| SimulationError::InvalidParameter {
                    name: "priority_distribution",
                    value: 2.0,
                })?;
                let span = max as f64 - min as f64;
                Ok((0..count)
                    .map(|_| (beta.sample(&mut self.rng) * span + min as f64).trunc() as i32)
                    .collect())
            }
        }
    }

    /// Genera la lista completa de procesos, con identificadores `0..n`.
    pub fn generate(&mut self, config: &WorkloadConfig) -> Result<Vec<Process>> {
        let count = config.num_processes;
        let arrivals = self.poisson_arrivals(config.arrival_rate, count, 0.0)?;
        let bursts = self.burst_times(
            config.burst_distribution,
            count,
            config.burst_mean,
            config.burst_std_dev,
        )?;
        let priorities = self.priorities(
            count,
            config.priority_distribution,
            config.priority_min,
            config.priority_max,
        )?;

        debug!(
            "[GENERADOR] {} procesos generados (tasa {}, ráfagas {:?})",
            count, config.arrival_rate, config.burst_distribution
        );

        Ok(arrivals
            .into_iter()
            .zip(bursts)
            .zip(priorities)
            .enumerate()
            .map(|(id, ((arrival, burst), priority))| {
                Process::new(id, arrival, burst).with_priority(priority)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> WorkloadConfig {
        WorkloadConfig {
            num_processes: 50,
            arrival_rate: 0.5,
            burst_distribution: BurstDistribution::Normal,
            burst_mean: 10.0,
            burst_std_dev: 3.0,
            priority_distribution: PriorityDistribution::Uniform,
            priority_min: 1,
            priority_max: 10,
        }
    }

    #[test]
    fn test_arrivals_are_increasing() {
        let arrivals = WorkloadGenerator::new(1).poisson_arrivals(2.0, 100, 5.0).unwrap();
        assert_eq!(arrivals.len(), 100);
        assert!(arrivals[0] >= 5.0);
        assert!(arrivals.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_invalid_parameters() {
        let mut generator = WorkloadGenerator::new(1);
        assert!(generator.poisson_arrivals(0.0, 3, 0.0).is_err());
        assert!(generator.poisson_arrivals(-1.0, 3, 0.0).is_err());
        assert!(generator
            .burst_times(BurstDistribution::Exponential, 3, 0.0, 1.0)
            .is_err());
        assert!(generator
            .burst_times(BurstDistribution::Normal, 3, 10.0, -1.0)
            .is_err());
        assert!(generator
            .priorities(3, PriorityDistribution::Uniform, 5, 1)
            .is_err());
    }

    #[test]
    fn test_bursts_are_positive() {
        let mut generator = WorkloadGenerator::new(3);
        for distribution in [BurstDistribution::Exponential, BurstDistribution::Normal] {
            let bursts = generator.burst_times(distribution, 200, 2.0, 4.0).unwrap();
            assert!(bursts.iter().all(|&burst| burst >= MIN_BURST_TIME));
        }
    }

    #[test]
    fn test_priorities_in_range() {
        let mut generator = WorkloadGenerator::new(9);
        for distribution in [PriorityDistribution::Uniform, PriorityDistribution::Weighted] {
            let priorities = generator.priorities(200, distribution, 1, 10).unwrap();
            assert!(priorities.iter().all(|p| (1..=10).contains(p)));
        }
    }

    #[test]
    fn test_weighted_priorities_full_range() {
        let mut generator = WorkloadGenerator::new(4);
        let priorities = generator
            .priorities(50, PriorityDistribution::Weighted, i32::MIN, i32::MAX)
            .unwrap();
        assert_eq!(priorities.len(), 50);

        let single = generator
            .priorities(5, PriorityDistribution::Weighted, 7, 7)
            .unwrap();
        assert!(single.iter().all(|&p| p == 7));
    }

    #[test]
    fn test_weighted_priorities_truncate_toward_zero() {
        let mut generator = WorkloadGenerator::new(6);
        let priorities = generator
            .priorities(200, PriorityDistribution::Weighted, -10, 0)
            .unwrap();
        // -10 + 10 * Beta(2,5) trunca hacia cero, nunca por debajo de -10
        assert!(priorities.iter().all(|p| (-10..=0).contains(p)));
        assert!(priorities.iter().any(|&p| p > -10));
    }

    #[test]
    fn test_generate_is_reproducible() {
        let config = sample_config();
        let first = WorkloadGenerator::new(42).generate(&config).unwrap();
        let second = WorkloadGenerator::new(42).generate(&config).unwrap();
        let other = WorkloadGenerator::new(43).generate(&config).unwrap();

        assert_eq!(first, second);
        assert_ne!(first, other);
        assert_eq!(first.len(), 50);
        assert!(first.iter().enumerate().all(|(i, p)| p.id == i));
        assert!(first.iter().all(|p| p.validate().is_ok()));
    }
}
