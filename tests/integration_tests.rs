//! Tests de integración para el simulador de planificación

use std::collections::HashSet;

use cpu_scheduling_simulator::config::SimulationConfig;
use cpu_scheduling_simulator::workload::{BurstDistribution, WorkloadGenerator};
use cpu_scheduling_simulator::{
    Engine, MetricsCalculator, Process, SchedulingAlgorithm, Simulation, SimulationRun,
};

const TOLERANCE: f64 = 1e-6;

fn generated_workload(seed: u64, distribution: BurstDistribution) -> Vec<Process> {
    let config = SimulationConfig {
        num_processes: 30,
        burst_distribution: distribution,
        seed,
        ..SimulationConfig::default()
    };
    WorkloadGenerator::new(seed)
        .generate(&config.workload())
        .expect("valid workload")
}

fn all_runs(processes: &[Process]) -> Vec<SimulationRun> {
    SchedulingAlgorithm::all()
        .into_iter()
        .chain([SchedulingAlgorithm::round_robin(0.5), SchedulingAlgorithm::round_robin(7.0)])
        .map(|algorithm| {
            let copies = processes.iter().map(Process::fresh_copy).collect();
            Engine::new(copies, algorithm).unwrap().run()
        })
        .collect()
}

#[test]
fn test_every_process_completes_exactly_once() {
    for seed in [1, 2, 3] {
        let processes = generated_workload(seed, BurstDistribution::Exponential);
        let expected: HashSet<usize> = processes.iter().map(|p| p.id).collect();

        for run in all_runs(&processes) {
            let order = run.completion_order();
            let unique: HashSet<usize> = order.iter().copied().collect();
            assert_eq!(order.len(), processes.len(), "{}", run.algorithm);
            assert_eq!(unique, expected, "{}", run.algorithm);
        }
    }
}

#[test]
fn test_metrics_are_consistent() {
    let processes = generated_workload(42, BurstDistribution::Normal);

    for run in all_runs(&processes) {
        for process in &run.completed {
            let turnaround = process.turnaround_time().unwrap();
            assert!(process.waiting_time() >= 0.0);
            assert!(turnaround + TOLERANCE >= process.original_burst());
            // En una sola CPU el turnaround es espera más servicio
            assert!(
                (turnaround - process.waiting_time() - process.original_burst()).abs() < TOLERANCE,
                "{}: P{}",
                run.algorithm,
                process.id
            );
            assert!(process.response_time().unwrap() <= process.waiting_time() + TOLERANCE);
            assert_eq!(process.remaining_burst(), 0.0);
        }
    }
}

#[test]
fn test_timeline_is_sequential() {
    let processes = generated_workload(7, BurstDistribution::Exponential);

    for run in all_runs(&processes) {
        assert!(run
            .timeline
            .windows(2)
            .all(|pair| pair[0].end <= pair[1].start + TOLERANCE));

        for process in &processes {
            let served: f64 = run
                .timeline
                .iter()
                .filter(|slice| slice.process_id == process.id)
                .map(|slice| slice.duration())
                .sum();
            assert!((served - process.original_burst()).abs() < TOLERANCE);
        }

        if let Some(last) = run.timeline.last() {
            assert_eq!(last.end, run.final_clock);
        }
    }
}

#[test]
fn test_round_robin_slices_respect_quantum() {
    let processes = generated_workload(11, BurstDistribution::Normal);
    let run = Engine::new(processes, SchedulingAlgorithm::round_robin(2.0))
        .unwrap()
        .run();

    assert!(run
        .timeline
        .iter()
        .all(|slice| slice.duration() <= 2.0 + TOLERANCE));
}

#[test]
fn test_non_preemptive_policies_dispatch_once() {
    let processes = generated_workload(5, BurstDistribution::Normal);

    for algorithm in [SchedulingAlgorithm::fcfs(), SchedulingAlgorithm::sjf()] {
        let run = Engine::new(processes.clone(), algorithm).unwrap().run();
        assert_eq!(run.dispatches(), processes.len(), "{}", algorithm);
    }
}

#[test]
fn test_fcfs_preserves_arrival_order() {
    let processes = generated_workload(21, BurstDistribution::Exponential);
    let run = Engine::new(processes, SchedulingAlgorithm::fcfs()).unwrap().run();

    for pair in run.completed.windows(2) {
        assert!(pair[0].arrival_time <= pair[1].arrival_time);
        assert!(pair[0].completion_time() <= pair[1].completion_time());
    }
}

#[test]
fn test_round_robin_two_equal_jobs() {
    let run = Engine::new(
        vec![Process::new(0, 0.0, 5.0), Process::new(1, 0.0, 5.0)],
        SchedulingAlgorithm::round_robin(2.0),
    )
    .unwrap()
    .run();

    let owners: Vec<usize> = run.timeline.iter().map(|slice| slice.process_id).collect();
    assert_eq!(owners, vec![0, 1, 0, 1, 0, 1]);
    assert_eq!(run.process(0).unwrap().completion_time(), Some(9.0));
    assert_eq!(run.process(1).unwrap().completion_time(), Some(10.0));
}

#[test]
fn test_policies_do_not_leak_into_each_other() {
    let processes = generated_workload(8, BurstDistribution::Normal);

    let alone = Engine::new(
        processes.iter().map(Process::fresh_copy).collect(),
        SchedulingAlgorithm::sjf_preemptive(),
    )
    .unwrap()
    .run();

    let simulation = Simulation::new(processes);
    let results = simulation.run().unwrap();
    let together = &results.get(&SchedulingAlgorithm::sjf_preemptive()).unwrap().run;

    assert_eq!(alone.completed, together.completed);
    assert_eq!(alone.final_clock, together.final_clock);
}

#[test]
fn test_metrics_calculation_is_pure() {
    let processes = generated_workload(9, BurstDistribution::Exponential);
    let run = Engine::new(processes, SchedulingAlgorithm::round_robin(2.0))
        .unwrap()
        .run();
    let snapshot = run.completed.clone();

    let calculator = MetricsCalculator::new();
    let first = calculator.calculate_run(&run).unwrap();
    let second = calculator.calculate_run(&run).unwrap();

    assert_eq!(first, second);
    assert_eq!(run.completed, snapshot);
    assert_eq!(first.completed_count, 30);
    assert!(first.cpu_utilization_percent > 0.0 && first.cpu_utilization_percent <= 100.0 + TOLERANCE);
}

#[test]
fn test_config_file() {
    let path = std::env::temp_dir().join(format!("cpu-sched-config-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{"num_processes": 6, "algorithms": ["FCFS", "RR"], "quantum": 3, "seed": 99}"#,
    )
    .unwrap();

    let config = SimulationConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let simulation = Simulation::from_config(&config).unwrap();
    let results = simulation.run().unwrap();

    assert_eq!(results.len(), 2);
    assert!(results.get(&SchedulingAlgorithm::round_robin(3.0)).is_some());
    for result in &results {
        assert_eq!(result.run.completed.len(), 6);
    }
}
