//! Colorful console output for solver and job events.
//!
//! Provides a `tracing` layer that renders the structured events of
//! `clubplan_solver` as colored lines.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (solving, phases, jobs)
//! - **DEBUG**: Progress updates (1/sec with speed and score) and new best scores
//! - **TRACE**: Individual steps

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const DEFAULT_DIRECTIVE: &str = "clubplan_solver=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
/// `RUST_LOG` overrides the default `clubplan_solver=info` filter.
pub fn init() {
    INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(ClubConsoleLayer)
            .try_init();
    });
}

/// Prints the clubplan banner.
pub fn print_banner() {
    let banner = r#"
      _       _           _
  ___| |_   _| |__  _ __ | | __ _ _ __
 / __| | | | | '_ \| '_ \| |/ _` | '_ \
| (__| | |_| | |_) | |_) | | (_| | | | |
 \___|_|\__,_|_.__/| .__/|_|\__,_|_| |_|
                   |_|
"#;

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(
        stdout,
        "{}",
        format!("  v{} - training scheduler\n", env!("CARGO_PKG_VERSION"))
            .bright_white()
            .bold()
    );
    let _ = stdout.flush();
}

fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats solver events with colors.
pub struct ClubConsoleLayer;

impl<S: Subscriber> Layer<S> for ClubConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("clubplan_solver") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    phase: Option<String>,
    job_id: Option<String>,
    reason: Option<String>,
    score: Option<String>,
    step_move: Option<String>,
    steps: Option<u64>,
    speed: Option<u64>,
    step: Option<u64>,
    sessions: Option<u64>,
    duration_ms: Option<u64>,
    entity_count: Option<u64>,
    value_count: Option<u64>,
    time_limit_secs: Option<u64>,
    moves_evaluated: Option<u64>,
    accepted: Option<bool>,
    feasible: Option<bool>,
    terminated_early: Option<bool>,
}

impl EventVisitor {
    fn record_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "phase" => self.phase = Some(value),
            "job_id" => self.job_id = Some(value),
            "reason" => self.reason = Some(value),
            "score" => self.score = Some(value),
            "step_move" => self.step_move = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.record_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "step" => self.step = Some(value),
            "sessions" => self.sessions = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "entity_count" => self.entity_count = Some(value),
            "value_count" => self.value_count = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            "moves_evaluated" => self.moves_evaluated = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        match field.name() {
            "accepted" => self.accepted = Some(value),
            "feasible" => self.feasible = Some(value),
            "terminated_early" => self.terminated_early = Some(value),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "progress" => format_progress(v),
        "new_best" => format_new_best(v),
        "step" => format_step(v, level),
        "job_submitted" | "job_started" | "job_terminate_requested" | "job_finished"
        | "job_failed" => format_job(v),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let entities = v.entity_count.unwrap_or(0);
    let values = v.value_count.unwrap_or(0);
    let scale = calculate_problem_scale(entities as usize, values as usize);

    let mut output = format!(
        "{} {} Solving │ {} sessions │ {} values │ scale {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        entities.to_formatted_string(&Locale::en).bright_yellow(),
        values.to_formatted_string(&Locale::en).bright_yellow(),
        scale.bright_magenta()
    );

    if let Some(limit) = v.time_limit_secs {
        output.push_str(&format!(
            " │ {}s limit",
            limit.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let is_feasible = v.feasible.unwrap_or_else(|| score.starts_with("0hard"));

    let status = if is_feasible {
        "FEASIBLE".bright_green().bold().to_string()
    } else {
        "INFEASIBLE".bright_red().bold().to_string()
    };

    format!(
        "{} {} Solving complete │ {} │ {} steps │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.steps
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        format_score(score),
        status
    )
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} {} ended │ {} │ {} steps │ {} moves/s │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        v.steps
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        v.speed
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
        format_score(score)
    )
}

fn format_progress(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} {:>10} steps │ {:>12}/s │ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        v.steps
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .white(),
        v.speed
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
        format_score(score)
    )
}

fn format_new_best(v: &EventVisitor) -> String {
    format!(
        "{} {} Step {:>7} │ {}",
        format_elapsed(),
        "->".bright_blue(),
        v.step.unwrap_or(0).to_formatted_string(&Locale::en).white(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_step(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let icon = if v.accepted.unwrap_or(false) {
        "✓".bright_green().to_string()
    } else {
        "✗".bright_red().to_string()
    };

    format!(
        "{} {} Step {:>10} │ {} │ {}",
        format_elapsed(),
        icon,
        v.step
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_black(),
        v.step_move.as_deref().unwrap_or("-").bright_black(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_job(v: &EventVisitor) -> String {
    let event = v.event.as_deref().unwrap_or("");
    let job_id = v.job_id.as_deref().unwrap_or("?");
    let short_id: String = job_id.chars().take(8).collect();
    let tag = format!("[job {short_id}]");

    let detail = match event {
        "job_submitted" => format!(
            "submitted with {} sessions",
            v.sessions.unwrap_or(0).to_formatted_string(&Locale::en)
        ),
        "job_started" => "started".to_string(),
        "job_terminate_requested" => "termination requested".yellow().to_string(),
        "job_finished" => {
            let mut detail = format!(
                "finished │ {} │ {}",
                format_duration_ms(v.duration_ms.unwrap_or(0)),
                format_score(v.score.as_deref().unwrap_or("N/A"))
            );
            if v.terminated_early.unwrap_or(false) {
                detail.push_str(" │ terminated early");
            }
            detail
        }
        _ => format!(
            "{}: {}",
            "failed".bright_red().bold(),
            v.reason.as_deref().unwrap_or("unknown reason")
        ),
    };

    format!("{} {} {}", format_elapsed(), tag.bright_cyan(), detail)
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

fn format_score(score: &str) -> String {
    let Some((hard, soft)) = score.split_once('/') else {
        return score.white().to_string();
    };
    let hard = hard.trim_end_matches("hard");
    let soft = soft.trim_end_matches("soft");
    let hard_num: i64 = hard.parse().unwrap_or(0);
    let soft_num: i64 = soft.parse().unwrap_or(0);

    let hard_str = if hard_num < 0 {
        format!("{}hard", hard).bright_red().to_string()
    } else {
        format!("{}hard", hard).bright_green().to_string()
    };
    let soft_str = if soft_num < 0 {
        format!("{}soft", soft).yellow().to_string()
    } else if soft_num > 0 {
        format!("{}soft", soft).bright_green().to_string()
    } else {
        format!("{}soft", soft).white().to_string()
    };

    format!("{}/{}", hard_str, soft_str)
}

/// Size of the search space, `value_count ^ entity_count`, in scientific notation.
fn calculate_problem_scale(entity_count: usize, value_count: usize) -> String {
    if entity_count == 0 || value_count == 0 {
        return "0".to_string();
    }

    let log_scale = (entity_count as f64) * (value_count as f64).log10();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}
