use std::fmt;

use uuid::Uuid;

use crate::blueprint::model::BuildingType;
use crate::simulation::model::Placement;
use crate::simulation::report::SimulationReport;

/// Snapshot of a session handed to the simulation worker.
#[derive(Clone, Debug)]
pub struct SimulationRequest {
    pub id: Uuid,
    pub placements: Vec<Placement>,
    pub installed: Vec<BuildingType>,
}

#[derive(Clone, Debug)]
pub enum ResponseSignal {
    Started(Uuid),
    Completed(Box<SimulationReport>),
}

impl fmt::Display for ResponseSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseSignal::Started(id) => write!(f, "Simulation {id} started"),
            ResponseSignal::Completed(report) => {
                write!(f, "Simulation {} completed", report.request_id)
            }
        }
    }
}
