//! clubplan solver engine
//!
//! This crate provides the search side of the training scheduler:
//! - Solver, running a construction phase followed by local search
//! - Change and swap moves with random sampling
//! - Hill climbing, late acceptance and simulated annealing acceptors
//! - Termination conditions
//! - SolverManager, running jobs on a worker pool with score and session
//!   reports

pub mod heuristic;
pub mod manager;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod termination;

pub use heuristic::{all_moves, MoveSampler, TrainingMove};
pub use manager::{
    analyze_score, analyze_sessions, BestSolutionListener, ConstraintMatchInfo, JobStatus,
    ScoreAnalysis, SessionAnalysis, SolveJob, SolverManager, ViolationInfo,
};
pub use phase::{
    construct_schedule,
    localsearch::{
        Acceptor, ConfiguredAcceptor, HillClimbingAcceptor, LateAcceptanceAcceptor,
        LocalSearchPhase, MoveTabuList, SimulatedAnnealingAcceptor,
    },
    ConstructionPhase, Phase,
};
pub use scope::{PhaseScope, SolverScope};
pub use solver::{
    solve_schedule, BestSolutionSender, ClubScoreDirector, SolveResult, Solver, SolverState,
    SolverStats,
};
pub use termination::{
    BestScoreFeasibleTermination, BestScoreTermination, ConfiguredTermination, OrTermination,
    StepCountTermination, Termination, TimeTermination, UnimprovedStepCountTermination,
};
