use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Builder;
use log::{info, LevelFilter};

use cpu_scheduling_simulator::config::{self, AlgorithmCode, SimulationConfig};
use cpu_scheduling_simulator::workload::BurstDistribution;
use cpu_scheduling_simulator::Simulation;

/// Algoritmos seleccionables desde la línea de comandos.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    /// First-Come, First-Served
    #[value(name = "FCFS")]
    Fcfs,
    /// Shortest Job First no preemptivo
    #[value(name = "SJF-NP")]
    SjfNp,
    /// Shortest Job First preemptivo (SRTF)
    #[value(name = "SJF-P")]
    SjfP,
    /// Round Robin
    #[value(name = "RR")]
    Rr,
}

impl From<AlgorithmArg> for AlgorithmCode {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Fcfs => AlgorithmCode::Fcfs,
            AlgorithmArg::SjfNp => AlgorithmCode::SjfNonPreemptive,
            AlgorithmArg::SjfP => AlgorithmCode::SjfPreemptive,
            AlgorithmArg::Rr => AlgorithmCode::RoundRobin,
        }
    }
}

/// Distribución de las ráfagas de CPU.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DistributionArg {
    Exponential,
    Normal,
}

impl From<DistributionArg> for BurstDistribution {
    fn from(arg: DistributionArg) -> Self {
        match arg {
            DistributionArg::Exponential => BurstDistribution::Exponential,
            DistributionArg::Normal => BurstDistribution::Normal,
        }
    }
}

/// Simulador de planificación de CPU
#[derive(Parser, Debug)]
#[command(name = "cpu-scheduling-simulator")]
#[command(about = "Compara algoritmos de planificación de CPU sobre una carga sintética", long_about = None)]
struct Args {
    /// Número de procesos a simular
    #[arg(long, default_value_t = config::DEFAULT_NUM_PROCESSES)]
    num_processes: usize,

    /// Tasa de llegadas de Poisson
    #[arg(long, default_value_t = config::DEFAULT_ARRIVAL_RATE)]
    arrival_rate: f64,

    /// Distribución de los tiempos de ejecución
    #[arg(long, value_enum, default_value_t = DistributionArg::Normal)]
    burst_distribution: DistributionArg,

    /// Archivo JSON de configuración; reemplaza a las demás opciones
    #[arg(long)]
    config: Option<PathBuf>,

    /// Algoritmos a simular
    #[arg(long, value_enum, num_args = 1.., default_values_t = vec![
        AlgorithmArg::Fcfs,
        AlgorithmArg::SjfNp,
        AlgorithmArg::SjfP,
        AlgorithmArg::Rr,
    ])]
    algorithms: Vec<AlgorithmArg>,

    /// Quantum para Round Robin
    #[arg(long, default_value_t = config::DEFAULT_QUANTUM)]
    quantum: f64,

    /// Semilla del generador de carga
    #[arg(long, default_value_t = config::DEFAULT_SEED)]
    seed: u64,

    /// Imprimir los resultados por proceso en formato CSV
    #[arg(long, default_value_t = false)]
    csv: bool,

    /// Registro detallado de cada despacho
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

impl Args {
    fn simulation_config(&self) -> Result<SimulationConfig> {
        if let Some(path) = &self.config {
            return SimulationConfig::from_file(path)
                .with_context(|| format!("no se pudo cargar la configuración {}", path.display()));
        }

        Ok(SimulationConfig {
            num_processes: self.num_processes,
            arrival_rate: self.arrival_rate,
            burst_distribution: self.burst_distribution.into(),
            algorithms: self.algorithms.iter().map(|&arg| arg.into()).collect(),
            quantum: self.quantum,
            seed: self.seed,
            ..SimulationConfig::default()
        })
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.verbose);

    let config = args.simulation_config()?;
    info!("Configuración: {:?}", config);

    let simulation = Simulation::from_config(&config).context("no se pudo generar la carga")?;
    let results = simulation.run().context("la simulación falló")?;

    println!("\nResultados de la simulación de planificación de CPU:");
    println!("=================================");
    println!("Número de procesos: {}", config.num_processes);
    println!("Tasa de llegada: {}", config.arrival_rate);
    println!("Distribución de ráfagas: {:?}", config.burst_distribution);
    println!("Semilla: {}", config.seed);

    print!("{}", simulation.generate_report(&results));

    if args.csv {
        println!();
        print!("{}", simulation.generate_csv_report(&results));
    }

    Ok(())
}
