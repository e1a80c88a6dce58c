use crate::blueprint::model::{BuildingType, Catalog, ProjectionImpactTable};
use crate::simulation::model::{
    Horizon, Indicator, Indicators, Placement, ProjectionSeries, YearRecord,
};

/// Number of placements per building type, in catalog order. Types missing
/// from the catalog are dropped.
pub fn tally<'a>(
    placements: &[Placement],
    catalog: &'a Catalog,
) -> Vec<(&'a BuildingType, u32)> {
    catalog
        .entries()
        .iter()
        .filter_map(|entry| {
            let count = placements
                .iter()
                .filter(|p| p.building_type == entry.building_type)
                .count() as u32;
            (count > 0).then_some((&entry.building_type, count))
        })
        .collect()
}

/// Count-weighted sum of Table A coefficients, one scalar per indicator.
pub fn aggregate_impact(
    counts: &[(&BuildingType, u32)],
    impacts: &ProjectionImpactTable,
) -> Indicators {
    let mut total = Indicators::default();
    for (building_type, count) in counts {
        let Some(impact) = impacts.get(building_type) else {
            tracing::debug!("No projection coefficients for {}, skipping", building_type);
            continue;
        };
        for indicator in Indicator::ALL {
            let sum = total.get(indicator) + impact.for_indicator(indicator) * f64::from(*count);
            total.set(indicator, sum);
        }
    }
    total
}

/// Rounding and clamping applied to a scaled baseline value.
pub fn settle(indicator: Indicator, value: f64) -> f64 {
    match indicator {
        Indicator::Population => value.round(),
        Indicator::TrafficAccidents | Indicator::CrimeRate => value.round().max(0.0),
        Indicator::HousingSatisfaction
        | Indicator::HousingSupplyRate
        | Indicator::UnemploymentRate => value.clamp(0.0, 100.0),
        Indicator::AirQualityIndex => value.clamp(0.0, 500.0),
        Indicator::InflationRate => value.max(0.0),
    }
}

pub fn project(
    placements: &[Placement],
    catalog: &Catalog,
    impacts: &ProjectionImpactTable,
    baseline: &Indicators,
    horizon: Horizon,
) -> ProjectionSeries {
    let counts = tally(placements, catalog);
    tracing::debug!("Placement counts: {:?}", counts);
    let impact = aggregate_impact(&counts, impacts);

    let records = horizon
        .projected_years()
        .map(|year| {
            let fraction = horizon.fraction(year);
            let indicators = Indicators::from_fn(|indicator| {
                let scaled =
                    baseline.get(indicator) * (1.0 + impact.get(indicator) * fraction);
                settle(indicator, scaled)
            });
            YearRecord { year, indicators }
        })
        .collect();

    let series = ProjectionSeries::new(records);
    tracing::info!(
        "Projected {} years from {} for {} placements",
        series.len(),
        horizon.start_year(),
        placements.len()
    );
    series
}
