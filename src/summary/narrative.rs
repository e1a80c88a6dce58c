use crate::blueprint::model::BuildingType;
use crate::simulation::model::{Indicator, Indicators, ProjectionSeries};

pub const NO_FACILITIES: &str = "No facilities installed.";
pub const NO_SUGGESTIONS: &str = "No suggestions available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    PositiveIfIncreasing,
    NegativeIfIncreasing,
}

struct Template {
    indicator: Indicator,
    direction: Direction,
    up: &'static str,
    down: &'static str,
}

// Housing supply rate has no narrative.
static TEMPLATES: [Template; 7] = [
    Template {
        indicator: Indicator::Population,
        direction: Direction::PositiveIfIncreasing,
        up: "Population growth strengthens the labor force and economic vitality, attracting investments and improving city services.",
        down: "A decline in population may signal economic challenges and reduced workforce availability, requiring targeted revitalization strategies.",
    },
    Template {
        indicator: Indicator::TrafficAccidents,
        direction: Direction::NegativeIfIncreasing,
        up: "An increase in traffic accidents calls for enhanced road safety measures and public awareness campaigns to protect citizens.",
        down: "Reduced traffic accidents improve public safety and lower healthcare costs.",
    },
    Template {
        indicator: Indicator::CrimeRate,
        direction: Direction::NegativeIfIncreasing,
        up: "Rising crime rates necessitate increased law enforcement resources and community engagement to ensure safety.",
        down: "Lower crime rates contribute to higher quality of life and attract new residents and businesses.",
    },
    Template {
        indicator: Indicator::HousingSatisfaction,
        direction: Direction::PositiveIfIncreasing,
        up: "Improved housing satisfaction promotes social stability and community well-being.",
        down: "Declining housing satisfaction could lead to social unrest and increased mobility, demanding affordable housing initiatives.",
    },
    Template {
        indicator: Indicator::UnemploymentRate,
        direction: Direction::NegativeIfIncreasing,
        up: "Higher unemployment rates risk social challenges and economic stagnation, highlighting the need for job creation programs.",
        down: "Lower unemployment strengthens the economy and citizen welfare.",
    },
    Template {
        indicator: Indicator::AirQualityIndex,
        direction: Direction::NegativeIfIncreasing,
        up: "Worsening air quality poses health risks and requires environmental regulations and green initiatives.",
        down: "Improved air quality enhances public health and environmental sustainability.",
    },
    Template {
        indicator: Indicator::InflationRate,
        direction: Direction::NegativeIfIncreasing,
        up: "Rising inflation can erode purchasing power and requires fiscal and monetary policy adjustments.",
        down: "Stable or decreasing inflation supports economic stability and consumer confidence.",
    },
];

pub fn policy_note(building_type: &BuildingType) -> Option<&'static str> {
    let note = match building_type {
        BuildingType::Market => {
            "Market expansion boosts the economy but may increase traffic and pollution. Investments in public transit and environmental controls are advised."
        }
        BuildingType::School => {
            "School development raises education levels and long-term growth potential. Adequate funding and facility maintenance are essential."
        }
        BuildingType::CommunityCentre => {
            "Community centres enhance social cohesion but require sustainable operational budgets."
        }
        BuildingType::Hospital => {
            "Hospitals improve health outcomes; ensure capacity matches population growth."
        }
        BuildingType::PoliceStation => {
            "Police presence reduces crime but must balance community trust and engagement."
        }
        BuildingType::NonProfitHousing => {
            "Non-profit housing improves affordability but demands integration policies to maintain neighborhood harmony."
        }
        BuildingType::Daycare => {
            "Daycare services support working families, increasing labor participation rates."
        }
        BuildingType::SeniorCentre => {
            "Senior centres address aging population needs and promote active aging."
        }
        BuildingType::Other(_) => return None,
    };
    Some(note)
}

fn bullets(title: &str, lines: &[&str]) -> String {
    let mut section = format!("{title}\n");
    section.push_str(
        &lines
            .iter()
            .map(|line| format!("- {line}"))
            .collect::<Vec<_>>()
            .join("\n"),
    );
    section
}

/// Positive changes then cautions, comparing the baseline against the last
/// year of the series. Empty series give an empty summary.
pub fn summarize_policy(baseline: &Indicators, series: &ProjectionSeries) -> String {
    let Some(last) = series.last() else {
        return String::new();
    };

    let mut positive = Vec::new();
    let mut caution = Vec::new();
    for template in &TEMPLATES {
        let change = last.indicators.get(template.indicator) - baseline.get(template.indicator);
        if change == 0.0 || change.is_nan() {
            continue;
        }
        let increased = change > 0.0;
        match (template.direction, increased) {
            (Direction::PositiveIfIncreasing, true) => positive.push(template.up),
            (Direction::PositiveIfIncreasing, false) => caution.push(template.down),
            (Direction::NegativeIfIncreasing, false) => positive.push(template.down),
            (Direction::NegativeIfIncreasing, true) => caution.push(template.up),
        }
    }

    let mut sections = Vec::new();
    if !positive.is_empty() {
        sections.push(bullets("Overall Positive Changes:", &positive));
    }
    if !caution.is_empty() {
        sections.push(bullets("Considerations and Cautions:", &caution));
    }
    sections.join("\n\n").trim().to_string()
}

/// One policy note per distinct installed type, in first-seen order.
pub fn summarize_facilities(installed: &[BuildingType]) -> String {
    if installed.is_empty() {
        return NO_FACILITIES.to_string();
    }

    let mut seen: Vec<&BuildingType> = Vec::new();
    for building_type in installed {
        if !seen.contains(&building_type) {
            seen.push(building_type);
        }
    }

    let lines: Vec<String> = seen
        .into_iter()
        .map(|building_type| {
            format!(
                "{}: {}",
                building_type,
                policy_note(building_type).unwrap_or(NO_SUGGESTIONS)
            )
        })
        .collect();
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    bullets("Facilities and Policy Suggestions:", &lines)
}
