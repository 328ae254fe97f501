//! Ejemplo: comparar FCFS y Round Robin sobre una carga fija

use cpu_scheduling_simulator::{Process, SchedulingAlgorithm, Simulation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Ejemplo: Comparación de Políticas ===\n");

    let processes = vec![
        Process::new(0, 0.0, 8.0),
        Process::new(1, 1.0, 4.0),
        Process::new(2, 2.0, 9.0),
        Process::new(3, 3.0, 5.0),
    ];

    let fcfs = SchedulingAlgorithm::fcfs();
    let rr = SchedulingAlgorithm::round_robin(3.0);
    let simulation = Simulation::with_algorithms(processes, vec![fcfs, rr]);
    let results = simulation.run()?;

    println!("{}", simulation.generate_report(&results));

    if let (Some(a), Some(b)) = (results.metrics(&fcfs), results.metrics(&rr)) {
        println!("| Métrica                    | FCFS      | Round Robin |");
        println!("|----------------------------|-----------|-------------|");
        println!(
            "| Tiempo promedio de espera  | {:<9.2} | {:<11.2} |",
            a.avg_waiting_time, b.avg_waiting_time
        );
        println!(
            "| Tiempo promedio turnaround | {:<9.2} | {:<11.2} |",
            a.avg_turnaround_time, b.avg_turnaround_time
        );
        println!(
            "| Tiempo promedio respuesta  | {:<9.2} | {:<11.2} |",
            a.avg_response_time, b.avg_response_time
        );
    }

    std::fs::write("comparison_results.csv", simulation.generate_csv_report(&results))?;
    println!("\nArchivo CSV generado: comparison_results.csv");

    Ok(())
}
