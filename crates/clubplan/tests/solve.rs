//! End-to-end solves through the job manager.

use clubplan::prelude::*;
use clubplan::{demo, rules, solve_request, ClubPlanError};
use clubplan_test::small_club_request;

fn config(seed: u64, steps: u64) -> SolverConfig {
    SolverConfig::new()
        .with_random_seed(seed)
        .with_step_limit(steps)
        .with_termination_seconds(20)
}

const DATASET: &str = r#"{
  "trainers": [
    {
      "id": "t1",
      "name": "Ann",
      "maxHoursPerWeek": 4,
      "trainableAgeGroups": ["U8", "U10"],
      "preferredTeamId": "u8"
    }
  ],
  "teams": [
    {
      "id": "u8",
      "name": "U8 Bees",
      "ageGroup": "U8",
      "size": 12,
      "trainingsPerWeek": 2,
      "availableDays": ["MONDAY", "THURSDAY"],
      "earliestHour": 17,
      "latestHour": 19
    }
  ],
  "timeSlots": [
    { "id": "mon-17", "dayOfWeek": "MONDAY", "startHour": 17 },
    { "id": "mon-18", "dayOfWeek": "MONDAY", "startHour": 18 },
    { "id": "thu-17", "dayOfWeek": "THURSDAY", "startHour": 17 },
    { "id": "thu-18", "dayOfWeek": "THURSDAY", "startHour": 18 }
  ],
  "fieldCapacity": 60
}"#;

#[test]
fn small_club_becomes_feasible() {
    let mut config = config(4, 3000);
    config.termination.best_score_feasible = true;

    let output = solve_request(small_club_request(), config).unwrap();

    assert_eq!(output.schedule.solver_status, SolverStatus::NotSolving);
    assert_eq!(output.score_analysis.hard_score, 0);
    assert_eq!(output.score_analysis.assigned_sessions, 6);
    assert_eq!(output.schedule.score, Some(score_schedule(&output.schedule)));
    assert!(output
        .score_analysis
        .constraint_matches
        .iter()
        .all(|m| m.level == clubplan::ScoreLevel::Soft));
    assert!(output
        .session_analysis
        .iter()
        .flat_map(|s| &s.violations)
        .all(|v| v.level == clubplan::ScoreLevel::Soft));
}

#[test]
fn json_dataset_solves_and_serializes_camel_case() {
    let request: SolveRequest = serde_json::from_str(DATASET).unwrap();
    assert_eq!(request.session_count(), 2);

    let output = solve_request(request, config(1, 300)).unwrap();
    let value = serde_json::to_value(&output).unwrap();

    assert_eq!(value["jobId"], output.job_id.as_str());
    assert_eq!(value["scoreAnalysis"]["hardScore"], 0);
    assert_eq!(value["scoreAnalysis"]["totalSessions"], 2);
    assert_eq!(value["schedule"]["solverStatus"], "NOT_SOLVING");
    let score = value["schedule"]["score"].as_str().unwrap();
    assert!(score.starts_with("0hard/"));
    assert_eq!(value["sessionAnalysis"].as_array().unwrap().len(), 2);
    assert_eq!(value["sessionAnalysis"][0]["teamName"], "U8 Bees");
    assert_eq!(value["sessionAnalysis"][0]["trainerName"], "Ann");

    let days: Vec<Weekday> = (0..2)
        .map(|idx| output.schedule.session_slot(idx).unwrap().day_of_week)
        .collect();
    assert_ne!(days[0], days[1]);
}

#[test]
fn demo_club_is_fully_assigned() {
    let output = solve_request(demo::demo_club(), config(7, 500)).unwrap();

    assert_eq!(output.schedule.unassigned_count(), 0);
    assert_eq!(output.score_analysis.total_sessions, 11);
    assert_eq!(output.session_analysis.len(), 11);
    let score = output.schedule.score.unwrap();
    assert_eq!(
        (output.score_analysis.hard_score, output.score_analysis.soft_score),
        (score.hard(), score.soft())
    );
}

#[test]
fn unqualified_team_finishes_infeasible() {
    let mut request = small_club_request();
    request.teams.push(
        Team::new("seniors", "Seniors", AgeGroup::Senior, 18, 1)
            .with_days([Weekday::Monday])
            .with_hours(19, 20),
    );
    assert!(!request.issues().is_empty());

    let output = solve_request(request, config(2, 300)).unwrap();
    assert!(output.score_analysis.hard_score < 0);
    assert_eq!(output.score_analysis.total_sessions, 7);
    let senior = &output.session_analysis[6];
    assert!(senior.has_violations);
    assert!(senior
        .violations
        .iter()
        .any(|v| v.constraint_name == "Trainer qualification"));
}

#[test]
fn club_without_trainers_finishes_infeasible() {
    let mut request = small_club_request();
    request.trainers.clear();

    let output = solve_request(request, config(1, 50)).unwrap();
    let score = output.schedule.score.unwrap();
    assert!(!score.is_feasible());
    assert_eq!(output.score_analysis.hard_score, score.hard());
    assert_eq!(output.score_analysis.unassigned_sessions, 6);
    assert!(output
        .score_analysis
        .constraint_matches
        .iter()
        .any(|m| m.name == rules::UNASSIGNED_SESSION && m.match_count == 6));
    assert!(output.session_analysis.iter().all(|s| s.has_violations));
}

#[test]
fn invalid_config_is_rejected() {
    let err = solve_request(small_club_request(), config(1, 10).with_pool_size(0)).unwrap_err();
    assert!(matches!(err, ClubPlanError::InvalidInput(_)));
}
