// tests/reference_instance.rs

mod common;

use critpath::config::reference_project;
use critpath::errors::{CritpathError, SolveStatus};
use critpath::report::schedule_report;
use critpath::schedule::{SolveOptions, Solver};
use critpath::types::SolveMethod;

fn expected_starts(scenario: &str) -> Vec<(&'static str, f64)> {
    match scenario {
        "best" => vec![
            ("A", 0.0), ("B", 0.0), ("C", 10.0), ("D1", 10.0), ("D2", 30.0),
            ("D3", 30.0), ("D4", 70.0), ("D5", 115.0), ("D6", 115.0), ("D7", 130.0),
            ("D8", 145.0), ("E", 18.0), ("F", 155.0), ("G", 155.0), ("H", 163.0),
        ],
        "expected" => vec![
            ("A", 0.0), ("B", 0.0), ("C", 15.0), ("D1", 15.0), ("D2", 40.0),
            ("D3", 40.0), ("D4", 90.0), ("D5", 145.0), ("D6", 145.0), ("D7", 165.0),
            ("D8", 183.0), ("E", 27.0), ("F", 195.0), ("G", 195.0), ("H", 205.0),
        ],
        "worst" => vec![
            ("A", 0.0), ("B", 0.0), ("C", 20.0), ("D1", 20.0), ("D2", 55.0),
            ("D3", 55.0), ("D4", 125.0), ("D5", 200.0), ("D6", 200.0), ("D7", 230.0),
            ("D8", 255.0), ("E", 36.0), ("F", 270.0), ("G", 270.0), ("H", 286.0),
        ],
        other => panic!("no fixture for scenario {other}"),
    }
}

#[test]
fn every_scenario_matches_hand_computed_schedule() {
    common::init_tracing();
    let project = reference_project().unwrap();

    for (scenario, completion) in [("best", 166.0), ("expected", 210.0), ("worst", 293.0)] {
        for method in [SolveMethod::Lp, SolveMethod::CriticalPath] {
            let options = SolveOptions::default().with_method(method);
            let schedule = Solver::with_options(&project, options).solve(scenario).unwrap();

            assert_eq!(schedule.status(), SolveStatus::Optimal);
            assert_eq!(schedule.scenario(), scenario);
            assert_eq!(schedule.completion_time(), completion, "{scenario} via {method}");

            let starts = schedule.start_times();
            assert_eq!(starts.len(), 15);
            for (task, start) in expected_starts(scenario) {
                assert_eq!(starts[task], start, "start of {task} in {scenario} via {method}");
            }
        }
    }
}

#[test]
fn join_task_waits_for_slowest_predecessor() {
    let project = reference_project().unwrap();
    let schedule = Solver::new(&project).solve("expected").unwrap();

    let b = schedule.finish_of("B").unwrap();
    let c = schedule.finish_of("C").unwrap();
    assert_eq!(schedule.start_of("E"), Some(b.max(c)));
}

#[test]
fn critical_path_runs_through_the_d_chain() {
    let project = reference_project().unwrap();
    let schedule = Solver::new(&project).solve("expected").unwrap();

    assert_eq!(
        schedule.critical_path(),
        vec!["A", "D1", "D3", "D4", "D6", "D7", "D8", "F", "H"]
    );
    assert_eq!(schedule.slack_of("G"), Some(3.0));
    assert_eq!(schedule.slack_of("D2"), Some(10.0));
    assert!(!schedule.is_critical("B"));

    let span = schedule
        .aggregate_span("D", &project.aggregate["D"].parts)
        .unwrap();
    assert_eq!((span.start, span.finish, span.work), (15.0, 195.0, 245.0));
}

#[test]
fn solving_twice_gives_identical_schedules() {
    let project = reference_project().unwrap();
    let solver = Solver::new(&project);

    let first = solver.solve("worst").unwrap();
    let second = solver.solve("worst").unwrap();
    assert_eq!(first.start_times(), second.start_times());
    assert_eq!(first.completion_time(), second.completion_time());
}

#[test]
fn unknown_scenario_fails_before_solving() {
    let project = reference_project().unwrap();
    let err = Solver::new(&project).solve("optimistic").unwrap_err();

    match err {
        CritpathError::Configuration(msg) => {
            assert!(msg.contains("optimistic"));
            assert!(msg.contains("best, expected, worst"));
        }
        e => panic!("Expected Configuration error, got: {:?}", e),
    }
}

#[test]
fn report_for_best_scenario() {
    let project = reference_project().unwrap();
    let schedule = Solver::new(&project).solve("best").unwrap();
    let report = schedule_report(&project, &schedule);

    assert!(report.contains("Project plan for the 'best' scenario."));
    assert!(report.contains("Start_E = 18\n"));
    assert!(report.contains("Total Project Time = 166"));
}
