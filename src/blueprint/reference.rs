use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::blueprint::model::{Catalog, ProjectionImpactTable, ScenarioImpactTable};
use crate::error::Error;
use crate::geometry::region::Region;
use crate::simulation::model::{Horizon, Indicators, Placement};

const BUILTIN_REFERENCE: &str = include_str!("../../data/reference.json");

/// Static configuration consumed by the planner. Loaded once at startup and
/// shared read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceData {
    pub catalog: Catalog,
    pub projection_impacts: ProjectionImpactTable,
    pub scenario_impacts: ScenarioImpactTable,
    pub baseline: Indicators,
    pub forecast: Indicators,
    pub horizon: Horizon,
    pub region: Region,
    pub budget: u64,
    #[serde(default)]
    pub initial_placements: Vec<Placement>,
}

impl ReferenceData {
    pub fn builtin() -> Result<Self, Error> {
        Self::from_json(BUILTIN_REFERENCE)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        tracing::info!("Loading reference data from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let data: ReferenceData = serde_json::from_str(raw)?;
        data.validate()?;
        tracing::debug!(
            catalog = data.catalog.entries().len(),
            projection_table = %data.projection_impacts.version,
            scenario_table = %data.scenario_impacts.version,
            "Reference data loaded"
        );
        Ok(data)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.catalog.entries().is_empty() {
            return Err(Error::ReferenceData {
                message: "catalog has no entries".to_string(),
            });
        }
        for placement in &self.initial_placements {
            if !self.region.contains(placement.position) {
                tracing::warn!(
                    "Initial {} placement at ({}, {}) lies outside the region",
                    placement.building_type,
                    placement.position.lat,
                    placement.position.lng
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::model::BuildingType;

    #[test]
    fn test_builtin_reference_data_loads() {
        let data = ReferenceData::builtin().unwrap();
        assert_eq!(data.horizon.start_year(), 2025);
        assert_eq!(data.horizon.horizon_year(), 2050);
        assert_eq!(data.catalog.entries().len(), 8);
        assert_eq!(data.projection_impacts.rows.len(), 8);
        assert_eq!(data.scenario_impacts.rows.len(), 8);
        assert!(data.budget > 0);
        for placement in &data.initial_placements {
            assert!(data.region.contains(placement.position));
        }
    }

    #[test]
    fn test_builtin_tables_are_versioned_independently() {
        let data = ReferenceData::builtin().unwrap();
        assert_ne!(
            data.projection_impacts.version,
            data.scenario_impacts.version
        );
        let school_a = data.projection_impacts.get(&BuildingType::School).unwrap();
        assert_eq!(school_a.population_percent, 0.05);
    }

    #[test]
    fn test_invalid_horizon_fails_fast() {
        let mut json: serde_json::Value = serde_json::from_str(BUILTIN_REFERENCE).unwrap();
        json["horizon"]["horizonYear"] = serde_json::json!(2020);
        let err = ReferenceData::from_json(&json.to_string()).unwrap_err();
        assert!(err.to_string().contains("must be after start year"));
    }

    #[test]
    fn test_empty_region_fails_fast() {
        let mut json: serde_json::Value = serde_json::from_str(BUILTIN_REFERENCE).unwrap();
        json["region"] = serde_json::json!([]);
        assert!(matches!(
            ReferenceData::from_json(&json.to_string()),
            Err(Error::ReferenceData { .. })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ReferenceData::load("/nonexistent/reference.json").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
