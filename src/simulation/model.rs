use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::blueprint::model::BuildingType;
use crate::error::Error;
use crate::geometry::region::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Indicator {
    Population,
    TrafficAccidents,
    CrimeRate,
    HousingSatisfaction,
    UnemploymentRate,
    HousingSupplyRate,
    AirQualityIndex,
    InflationRate,
}

impl Indicator {
    pub const ALL: [Indicator; 8] = [
        Indicator::Population,
        Indicator::TrafficAccidents,
        Indicator::CrimeRate,
        Indicator::HousingSatisfaction,
        Indicator::UnemploymentRate,
        Indicator::HousingSupplyRate,
        Indicator::AirQualityIndex,
        Indicator::InflationRate,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Indicator::Population => "population",
            Indicator::TrafficAccidents => "trafficAccidents",
            Indicator::CrimeRate => "crimeRate",
            Indicator::HousingSatisfaction => "housingSatisfaction",
            Indicator::UnemploymentRate => "unemploymentRate",
            Indicator::HousingSupplyRate => "housingSupplyRate",
            Indicator::AirQualityIndex => "airQualityIndex",
            Indicator::InflationRate => "inflationRate",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Indicator::Population => "Population",
            Indicator::TrafficAccidents => "Traffic Accidents",
            Indicator::CrimeRate => "Crime Incidents",
            Indicator::HousingSatisfaction => "Housing Satisfaction (%)",
            Indicator::UnemploymentRate => "Unemployment Rate (%)",
            Indicator::HousingSupplyRate => "Housing Supply Rate (%)",
            Indicator::AirQualityIndex => "Air Quality Index",
            Indicator::InflationRate => "Inflation Rate (%)",
        }
    }
}

/// One value per indicator. Used for snapshots (baseline, forecast, a
/// projected year) as well as for per-indicator impact totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub population: f64,
    pub traffic_accidents: f64,
    pub crime_rate: f64,
    pub housing_satisfaction: f64,
    pub unemployment_rate: f64,
    pub housing_supply_rate: f64,
    pub air_quality_index: f64,
    pub inflation_rate: f64,
}

impl Indicators {
    pub fn from_fn(mut f: impl FnMut(Indicator) -> f64) -> Self {
        let mut values = Self::default();
        for indicator in Indicator::ALL {
            values.set(indicator, f(indicator));
        }
        values
    }

    pub fn get(&self, indicator: Indicator) -> f64 {
        match indicator {
            Indicator::Population => self.population,
            Indicator::TrafficAccidents => self.traffic_accidents,
            Indicator::CrimeRate => self.crime_rate,
            Indicator::HousingSatisfaction => self.housing_satisfaction,
            Indicator::UnemploymentRate => self.unemployment_rate,
            Indicator::HousingSupplyRate => self.housing_supply_rate,
            Indicator::AirQualityIndex => self.air_quality_index,
            Indicator::InflationRate => self.inflation_rate,
        }
    }

    pub fn set(&mut self, indicator: Indicator, value: f64) {
        let slot = match indicator {
            Indicator::Population => &mut self.population,
            Indicator::TrafficAccidents => &mut self.traffic_accidents,
            Indicator::CrimeRate => &mut self.crime_rate,
            Indicator::HousingSatisfaction => &mut self.housing_satisfaction,
            Indicator::UnemploymentRate => &mut self.unemployment_rate,
            Indicator::HousingSupplyRate => &mut self.housing_supply_rate,
            Indicator::AirQualityIndex => &mut self.air_quality_index,
            Indicator::InflationRate => &mut self.inflation_rate,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    #[serde(flatten)]
    pub indicators: Indicators,
}

/// Year-by-year projection from `start + 1` to the horizon year inclusive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectionSeries {
    records: Vec<YearRecord>,
}

impl ProjectionSeries {
    pub fn new(records: Vec<YearRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[YearRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&YearRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &YearRecord> {
        self.records.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HorizonRepr", into = "HorizonRepr")]
pub struct Horizon {
    start_year: i32,
    horizon_year: i32,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HorizonRepr {
    start_year: i32,
    horizon_year: i32,
}

impl Horizon {
    pub fn new(start_year: i32, horizon_year: i32) -> Result<Self, Error> {
        if horizon_year <= start_year {
            return Err(Error::InvalidHorizon {
                start_year,
                horizon_year,
            });
        }
        Ok(Self {
            start_year,
            horizon_year,
        })
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn horizon_year(&self) -> i32 {
        self.horizon_year
    }

    pub fn span(&self) -> i32 {
        self.horizon_year - self.start_year
    }

    /// Elapsed share of the horizon at `year`, linear in [0, 1].
    pub fn fraction(&self, year: i32) -> f64 {
        f64::from(year - self.start_year) / f64::from(self.span())
    }

    pub fn projected_years(&self) -> impl Iterator<Item = i32> {
        (self.start_year + 1)..=self.horizon_year
    }
}

impl TryFrom<HorizonRepr> for Horizon {
    type Error = Error;

    fn try_from(repr: HorizonRepr) -> Result<Self, Self::Error> {
        Horizon::new(repr.start_year, repr.horizon_year)
    }
}

impl From<Horizon> for HorizonRepr {
    fn from(horizon: Horizon) -> Self {
        HorizonRepr {
            start_year: horizon.start_year,
            horizon_year: horizon.horizon_year,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub position: LatLng,
    pub building_type: BuildingType,
    pub cost: u64,
}

impl Placement {
    pub fn new(position: LatLng, building_type: BuildingType, cost: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            building_type,
            cost,
        }
    }
}
