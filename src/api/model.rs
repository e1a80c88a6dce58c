use serde::{Deserialize, Serialize};

use crate::actor::session::UsageReport;
use crate::blueprint::model::BuildingType;
use crate::error::Error;
use crate::geometry::region::LatLng;
use crate::simulation::model::Placement;
use crate::simulation::report::SimulationReport;
use crate::summary::legend::LegendEntry;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Select,
    Place,
    Simulate,
    Usage,
    Legend,
}

#[derive(Deserialize, Debug, Clone)]
pub struct SelectParams {
    pub building: BuildingType,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiRequest {
    pub id: String,
    pub method: Method,
    #[serde(default)]
    pub params: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(BuildingType),
    Place(LatLng),
    Simulate,
    Usage,
    Legend,
}

fn invalid_request(e: serde_json::Error) -> Error {
    Error::InvalidRequest {
        message: e.to_string(),
    }
}

impl ApiRequest {
    pub fn command(&self) -> Result<Command, Error> {
        let params = || self.params.clone();
        let command = match self.method {
            Method::Select => {
                let params: SelectParams =
                    serde_json::from_value(params()).map_err(invalid_request)?;
                Command::Select(params.building)
            }
            Method::Place => {
                Command::Place(serde_json::from_value(params()).map_err(invalid_request)?)
            }
            Method::Simulate => Command::Simulate,
            Method::Usage => Command::Usage,
            Method::Legend => Command::Legend,
        };
        Ok(command)
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Ok,
    Rejected,
    Error,
}

#[derive(Serialize, Debug, Clone)]
#[serde(untagged)]
pub enum Payload {
    Selection {
        selected: Option<BuildingType>,
    },
    Placement {
        placement: Placement,
        #[serde(rename = "remainingBudget")]
        remaining_budget: u64,
    },
    Report(Box<SimulationReport>),
    Usage(UsageReport),
    Legend {
        entries: Vec<LegendEntry>,
        text: String,
    },
}

#[derive(Serialize, Debug, Clone)]
pub struct ApiResponse {
    pub id: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Payload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResponse {
    pub fn ok(id: impl Into<String>, payload: Payload) -> Self {
        Self {
            id: id.into(),
            status: Status::Ok,
            result: Some(payload),
            message: None,
        }
    }

    pub fn ok_with_message(
        id: impl Into<String>,
        payload: Payload,
        message: impl Into<String>,
    ) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(id, payload)
        }
    }

    pub fn rejected(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Status::Rejected,
            result: None,
            message: Some(message.into()),
        }
    }

    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            status: Status::Error,
            result: None,
            message: Some(message.into()),
        }
    }
}
