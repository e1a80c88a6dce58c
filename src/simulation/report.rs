use serde::Serialize;
use uuid::Uuid;

use crate::blueprint::model::BuildingType;
use crate::blueprint::reference::ReferenceData;
use crate::simulation::comparator::{self, ComparisonResult};
use crate::simulation::model::{Placement, ProjectionSeries};
use crate::simulation::projection;
use crate::summary::narrative;

pub const COMPLETION_NOTICE: &str = "Simulation completed! Population and safety status updated.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub request_id: Uuid,
    pub start_year: i32,
    pub horizon_year: i32,
    pub series: ProjectionSeries,
    pub comparison: ComparisonResult,
    pub policy_summary: String,
    pub facility_summary: String,
    pub notice: &'static str,
}

/// Projection, comparison and both narratives for one placement set.
pub fn build_report(
    reference: &ReferenceData,
    request_id: Uuid,
    placements: &[Placement],
    installed: &[BuildingType],
) -> SimulationReport {
    let series = projection::project(
        placements,
        &reference.catalog,
        &reference.projection_impacts,
        &reference.baseline,
        reference.horizon,
    );
    let comparison = comparator::compare(
        installed,
        &reference.scenario_impacts,
        &reference.baseline,
        &reference.forecast,
    );
    let policy_summary = narrative::summarize_policy(&reference.baseline, &series);
    let facility_summary = narrative::summarize_facilities(installed);

    SimulationReport {
        request_id,
        start_year: reference.horizon.start_year(),
        horizon_year: reference.horizon.horizon_year(),
        series,
        comparison,
        policy_summary,
        facility_summary,
        notice: COMPLETION_NOTICE,
    }
}
