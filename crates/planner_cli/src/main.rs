//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `planner_core` linkage against the seeded demo store.
//! - Keep output deterministic: "today" comes from argv, never the clock.
//!
//! Usage: `planner_cli [YYYY-MM-DD]` (defaults to the week before the demo
//! service).

use chrono::NaiveDate;
use planner_core::fixtures::SARAH_JOHNSON;
use planner_core::model::validation::parse_date;
use planner_core::query::{dashboard_stats, upcoming_assignments, upcoming_services};
use planner_core::{PlannerConfig, PlannerStore};
use std::process::ExitCode;

const DEFAULT_TODAY: &str = "2024-01-14";

fn main() -> ExitCode {
    let config = PlannerConfig::default();
    if let Err(err) = planner_core::init_logging_from_config(&config.logging) {
        eprintln!("planner_cli: failed to start logging: {err}");
        return ExitCode::FAILURE;
    }

    let raw_today = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_TODAY.to_string());
    let today = match parse_date(&raw_today) {
        Ok(date) => date,
        Err(err) => {
            eprintln!("planner_cli: {err}");
            return ExitCode::FAILURE;
        }
    };

    let store = match PlannerStore::with_fixtures(config.reference_policy) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("planner_cli: failed to seed demo data: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("planner_core ping={}", planner_core::ping());
    println!("planner_core version={}", planner_core::core_version());
    print_summary(&store, &config, today);
    ExitCode::SUCCESS
}

fn print_summary(store: &PlannerStore, config: &PlannerConfig, today: NaiveDate) {
    let stats = dashboard_stats(store, today, config.dashboard.admin_upcoming);
    println!(
        "today={today} volunteers={} songs={} teams={} upcoming_services={}",
        stats.volunteer_count,
        stats.song_count,
        store.teams().len(),
        stats.upcoming_service_count
    );

    for service in upcoming_services(store.services(), today, config.dashboard.admin_upcoming) {
        println!(
            "service {} {} \"{}\" blocks={} minutes={}",
            service.date,
            service.time.format("%H:%M"),
            service.name,
            service.blocks.len(),
            service.planned_minutes()
        );
        for block in &service.blocks {
            println!(
                "  {:>2}. [{}] {} assigned={}",
                block.order,
                block.kind.as_str(),
                block.title,
                block.assignments.len()
            );
        }
    }

    let assignments = upcoming_assignments(
        store.services(),
        SARAH_JOHNSON,
        today,
        config.dashboard.volunteer_upcoming,
    );
    for assignment in assignments {
        println!(
            "assignment volunteer={SARAH_JOHNSON} service=\"{}\" block=\"{}\" role={}",
            assignment.service.name, assignment.block.title, assignment.role
        );
    }
}
