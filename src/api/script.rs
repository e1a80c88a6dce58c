use serde_json::Value;
use tokio::sync::mpsc;

use crate::actor::model::ResponseSignal;
use crate::actor::session::Session;
use crate::actor::worker::SimulationWorker;
use crate::api::model::{ApiRequest, ApiResponse, Command, Payload};
use crate::error::Error;
use crate::summary::legend;

/// Feeds a JSON array of requests through the session in order, one
/// response per entry. An entry that is not a valid request gets an error
/// response and the entries after it still run. Only a script that is not
/// a JSON array fails as a whole.
pub async fn run_script(
    raw: &str,
    session: &mut Session,
    worker: &SimulationWorker,
) -> Result<Vec<ApiResponse>, Error> {
    let entries: Vec<Value> = serde_json::from_str(raw).map_err(|e| Error::InvalidRequest {
        message: format!("request script must be a JSON array: {e}"),
    })?;
    tracing::info!("Running {} requests", entries.len());

    let mut responses = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let id = entry_id(&entry, index);
        let response = match serde_json::from_value::<ApiRequest>(entry) {
            Ok(request) => handle(&request, session, worker).await,
            Err(e) => {
                tracing::error!("Failed to parse request {}: {}", id, e);
                ApiResponse::error(id, e.to_string())
            }
        };
        responses.push(response);
    }
    Ok(responses)
}

// Falls back to the entry's position when it carries no usable id.
fn entry_id(entry: &Value, index: usize) -> String {
    match entry.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => index.to_string(),
    }
}

pub async fn handle(
    request: &ApiRequest,
    session: &mut Session,
    worker: &SimulationWorker,
) -> ApiResponse {
    let id = request.id.clone();
    let command = match request.command() {
        Ok(command) => command,
        Err(e) => {
            tracing::error!("Failed to parse params for request {}: {}", id, e);
            return ApiResponse::error(id, e.to_string());
        }
    };
    tracing::debug!("Handling request {}: {:?}", id, command);

    match command {
        Command::Select(building_type) => match session.select(building_type) {
            Ok(selected) => ApiResponse::ok(
                id,
                Payload::Selection {
                    selected: selected.cloned(),
                },
            ),
            Err(rejection) => ApiResponse::rejected(id, rejection.to_string()),
        },
        Command::Place(position) => match session.place(position) {
            Ok(placement) => {
                let placement = placement.clone();
                ApiResponse::ok(
                    id,
                    Payload::Placement {
                        placement,
                        remaining_budget: session.budget(),
                    },
                )
            }
            Err(rejection) => ApiResponse::rejected(id, rejection.to_string()),
        },
        Command::Simulate => simulate(id, session, worker).await,
        Command::Usage => ApiResponse::ok(id, Payload::Usage(session.usage())),
        Command::Legend => {
            let entries = legend::legend(&session.reference().catalog);
            let text = legend::render(&entries);
            ApiResponse::ok(id, Payload::Legend { entries, text })
        }
    }
}

async fn simulate(id: String, session: &mut Session, worker: &SimulationWorker) -> ApiResponse {
    let request = match session.simulation_request() {
        Ok(request) => request,
        Err(rejection) => return ApiResponse::rejected(id, rejection.to_string()),
    };
    let request_id = request.id;
    let (tx, mut rx) = mpsc::channel(4);
    worker.submit(request, tx);

    while let Some(signal) = rx.recv().await {
        match signal {
            ResponseSignal::Started(_) => tracing::info!("Simulating..."),
            ResponseSignal::Completed(report) => {
                let notice = report.notice;
                session.apply((*report).clone());
                return ApiResponse::ok_with_message(id, Payload::Report(report), notice);
            }
        }
    }

    session.abandon(request_id);
    ApiResponse::error(id, format!("simulation {request_id} ended without a result"))
}
