//! Plain-text rendering of score and session reports.

use std::fmt::Write;

use clubplan_solver::{ScoreAnalysis, SessionAnalysis};

/// Renders the score summary and one line per contributing rule.
pub fn render_score_analysis(analysis: &ScoreAnalysis) -> String {
    let mut out = String::new();
    let feasibility = if analysis.hard_score == 0 {
        "feasible"
    } else {
        "infeasible"
    };
    let _ = writeln!(
        out,
        "Score: {}hard/{}soft ({feasibility})",
        analysis.hard_score, analysis.soft_score
    );
    let _ = writeln!(
        out,
        "Sessions: {} assigned, {} unassigned, {} total",
        analysis.assigned_sessions, analysis.unassigned_sessions, analysis.total_sessions
    );

    if analysis.constraint_matches.is_empty() {
        let _ = writeln!(out, "No constraint matches");
        return out;
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{:<28} {:<5} {:>7} {:>8}", "Constraint", "Level", "Score", "Matches");
    for entry in &analysis.constraint_matches {
        let _ = writeln!(
            out,
            "{:<28} {:<5} {:>7} {:>8}",
            entry.name, entry.level, entry.score, entry.match_count
        );
    }
    out
}

/// Renders every session with its assignment and the rules it matches.
pub fn render_sessions(sessions: &[SessionAnalysis]) -> String {
    let mut out = String::new();
    for session in sessions {
        let marker = if session.has_violations { "!" } else { " " };
        let _ = writeln!(
            out,
            "{marker} {:<12} {:<16} {:<12} {:<16} {:>+5}",
            session.session_id,
            session.team_name,
            session.trainer_name,
            session.time_slot_info,
            session.total_score
        );
        for violation in &session.violations {
            let _ = writeln!(
                out,
                "      [{} {:+}] {}",
                violation.level, violation.score, violation.message
            );
        }
    }
    out
}
