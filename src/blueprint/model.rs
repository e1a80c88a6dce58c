use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::simulation::model::{Indicator, Indicators};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BuildingType {
    Market,
    School,
    CommunityCentre,
    Hospital,
    PoliceStation,
    NonProfitHousing,
    Daycare,
    SeniorCentre,
    Other(String),
}

impl BuildingType {
    pub const KNOWN: [BuildingType; 8] = [
        BuildingType::Market,
        BuildingType::School,
        BuildingType::CommunityCentre,
        BuildingType::Hospital,
        BuildingType::PoliceStation,
        BuildingType::NonProfitHousing,
        BuildingType::Daycare,
        BuildingType::SeniorCentre,
    ];

    pub fn name(&self) -> &str {
        match self {
            BuildingType::Market => "Market",
            BuildingType::School => "School",
            BuildingType::CommunityCentre => "CommunityCentre",
            BuildingType::Hospital => "Hospital",
            BuildingType::PoliceStation => "PoliceStation",
            BuildingType::NonProfitHousing => "NonProfitHousing",
            BuildingType::Daycare => "Daycare",
            BuildingType::SeniorCentre => "SeniorCentre",
            BuildingType::Other(name) => name,
        }
    }
}

impl From<String> for BuildingType {
    fn from(name: String) -> Self {
        BuildingType::KNOWN
            .into_iter()
            .find(|known| known.name() == name)
            .unwrap_or(BuildingType::Other(name))
    }
}

impl From<&str> for BuildingType {
    fn from(name: &str) -> Self {
        BuildingType::from(name.to_string())
    }
}

impl From<BuildingType> for String {
    fn from(building_type: BuildingType) -> Self {
        match building_type {
            BuildingType::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for BuildingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub building_type: BuildingType,
    pub label: String,
    pub unit_cost: u64,
}

/// Buildings offered for placement, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn get(&self, building_type: &BuildingType) -> Option<&CatalogEntry> {
        self.entries
            .iter()
            .find(|entry| &entry.building_type == building_type)
    }

    pub fn contains(&self, building_type: &BuildingType) -> bool {
        self.get(building_type).is_some()
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}

/// Table A row: fractional multipliers applied per placed facility and
/// scaled by the elapsed share of the horizon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProportionalImpact {
    pub population_percent: f64,
    pub traffic_percent: f64,
    pub crime_percent: f64,
    pub housing_satisfaction_percent: f64,
    pub unemployment_percent: f64,
    pub housing_supply_percent: f64,
    pub air_quality_percent: f64,
    pub inflation_percent: f64,
}

impl ProportionalImpact {
    pub fn for_indicator(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Population => self.population_percent,
            Indicator::TrafficAccidents => self.traffic_percent,
            Indicator::CrimeRate => self.crime_percent,
            Indicator::HousingSatisfaction => self.housing_satisfaction_percent,
            Indicator::UnemploymentRate => self.unemployment_percent,
            Indicator::HousingSupplyRate => self.housing_supply_percent,
            Indicator::AirQualityIndex => self.air_quality_percent,
            Indicator::InflationRate => self.inflation_percent,
        }
    }
}

/// Table A, consumed by the projection model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionImpactTable {
    pub version: String,
    pub rows: BTreeMap<BuildingType, ProportionalImpact>,
}

impl ProjectionImpactTable {
    pub fn get(&self, building_type: &BuildingType) -> Option<&ProportionalImpact> {
        self.rows.get(building_type)
    }
}

/// Table B row: flat percentage (population, traffic, crime, air quality)
/// or point (housing, unemployment, inflation) deltas for one facility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioImpactRow {
    pub facility: BuildingType,
    #[serde(default)]
    pub population_change: f64,
    #[serde(default)]
    pub traffic_change: f64,
    #[serde(default)]
    pub crime_change: f64,
    #[serde(default)]
    pub housing_satisfaction: f64,
    #[serde(default)]
    pub unemployment_change: f64,
    #[serde(default)]
    pub housing_supply_rate: f64,
    #[serde(default)]
    pub air_quality_change: f64,
    #[serde(default)]
    pub inflation_rate: f64,
}

impl ScenarioImpactRow {
    pub fn for_indicator(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Population => self.population_change,
            Indicator::TrafficAccidents => self.traffic_change,
            Indicator::CrimeRate => self.crime_change,
            Indicator::HousingSatisfaction => self.housing_satisfaction,
            Indicator::UnemploymentRate => self.unemployment_change,
            Indicator::HousingSupplyRate => self.housing_supply_rate,
            Indicator::AirQualityIndex => self.air_quality_change,
            Indicator::InflationRate => self.inflation_rate,
        }
    }

    pub fn deltas(&self) -> Indicators {
        Indicators::from_fn(|indicator| self.for_indicator(indicator))
    }
}

/// Table B, consumed by the scenario comparator. Authored independently of
/// [`ProjectionImpactTable`]; the two do not have to agree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioImpactTable {
    pub version: String,
    pub rows: Vec<ScenarioImpactRow>,
}
