use std::io::Read;
use std::sync::Arc;

use facility_planner::{
    actor::{session::Session, worker::SimulationWorker},
    api::script,
    blueprint::reference::ReferenceData,
    config::Config,
    instrumentation::tracing::init_tracing_subscriber,
};

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    init_tracing_subscriber(config.log_format).expect("Failed to set global subscriber");
    tracing::info!("Starting the application...");

    let reference = match &config.reference_path {
        Some(path) => ReferenceData::load(path),
        None => ReferenceData::builtin(),
    };
    let reference = match reference {
        Ok(reference) => Arc::new(reference),
        Err(e) => {
            tracing::error!("Failed to load reference data: {}", e);
            std::process::exit(1);
        }
    };

    let raw = match &config.script_path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw).map(|_| raw)
        }
    };
    let raw = match raw {
        Ok(raw) => raw,
        Err(e) => {
            tracing::error!("Failed to read request script: {}", e);
            std::process::exit(1);
        }
    };

    let mut session =
        Session::new(reference.clone()).with_full_budget_requirement(config.require_full_budget);
    let worker = SimulationWorker::new(reference, config.simulate_delay);

    let responses = match script::run_script(&raw, &mut session, &worker).await {
        Ok(responses) => responses,
        Err(e) => {
            tracing::error!("Failed to run request script: {}", e);
            std::process::exit(1);
        }
    };
    match serde_json::to_string_pretty(&responses) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            tracing::error!("Failed to serialize responses: {}", e);
            std::process::exit(1);
        }
    }

    if let Some(report) = session.report() {
        tracing::info!("Policy summary:\n{}", report.policy_summary);
        tracing::info!("{}", report.facility_summary);
    }
    tracing::info!("Session finished with remaining budget {}", session.budget());
}
