use serde::Serialize;

use crate::blueprint::model::{BuildingType, ScenarioImpactRow, ScenarioImpactTable};
use crate::simulation::model::{Indicator, Indicators};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRow {
    pub indicator: Indicator,
    pub label: &'static str,
    pub baseline: f64,
    pub forecast: f64,
    pub scenario: f64,
    pub difference: f64,
    /// Display form of `difference`, `+` prefixed when positive.
    pub formatted_difference: String,
}

/// The Table B rows that matched the installed facilities, and their sums.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacilityImpactDetail {
    pub table_version: String,
    pub rows: Vec<ScenarioImpactRow>,
    pub totals: Indicators,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub scenario: Indicators,
    pub difference: Indicators,
    pub rows: Vec<ComparisonRow>,
    pub detail: FacilityImpactDetail,
}

/// Single-year end state from baseline plus flat Table B deltas.
pub fn apply_deltas(indicator: Indicator, base: f64, delta: f64) -> f64 {
    match indicator {
        Indicator::Population | Indicator::TrafficAccidents | Indicator::CrimeRate => {
            (base * (1.0 + delta / 100.0)).round()
        }
        Indicator::HousingSatisfaction
        | Indicator::UnemploymentRate
        | Indicator::HousingSupplyRate
        | Indicator::InflationRate => (base + delta).clamp(0.0, 100.0),
        Indicator::AirQualityIndex => (base * (1.0 + delta / 100.0)).clamp(0.0, 500.0),
    }
}

pub fn compare(
    installed: &[BuildingType],
    impacts: &ScenarioImpactTable,
    baseline: &Indicators,
    forecast: &Indicators,
) -> ComparisonResult {
    let rows: Vec<ScenarioImpactRow> = impacts
        .rows
        .iter()
        .filter(|row| installed.contains(&row.facility))
        .cloned()
        .collect();

    let mut totals = Indicators::default();
    for row in &rows {
        for indicator in Indicator::ALL {
            totals.set(indicator, totals.get(indicator) + row.for_indicator(indicator));
        }
    }
    tracing::debug!(
        "Scenario table {} matched {} of {} installed types",
        impacts.version,
        rows.len(),
        installed.len()
    );

    let scenario = Indicators::from_fn(|indicator| {
        apply_deltas(indicator, baseline.get(indicator), totals.get(indicator))
    });
    let difference =
        Indicators::from_fn(|indicator| scenario.get(indicator) - forecast.get(indicator));

    let rows_by_indicator = Indicator::ALL
        .into_iter()
        .map(|indicator| ComparisonRow {
            indicator,
            label: indicator.label(),
            baseline: baseline.get(indicator),
            forecast: forecast.get(indicator),
            scenario: scenario.get(indicator),
            difference: difference.get(indicator),
            formatted_difference: format_signed(difference.get(indicator)),
        })
        .collect();

    ComparisonResult {
        scenario,
        difference,
        rows: rows_by_indicator,
        detail: FacilityImpactDetail {
            table_version: impacts.version.clone(),
            rows,
            totals,
        },
    }
}

pub fn format_signed(value: f64) -> String {
    let formatted = format_value(value);
    if value > 0.0 && formatted != "0" {
        format!("+{formatted}")
    } else {
        formatted
    }
}

/// Thousands-grouped number with at most three decimals.
pub fn format_value(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let abs = rounded.abs();
    let whole = abs.trunc() as u64;
    let fraction = format!("{:.3}", abs - abs.trunc());
    let fraction = fraction.trim_start_matches('0').trim_end_matches('0');

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if fraction.len() > 1 {
        grouped.push_str(fraction);
    }
    if negative && (whole > 0 || fraction.len() > 1) {
        format!("-{grouped}")
    } else {
        grouped
    }
}
