use serde::Serialize;

use crate::blueprint::model::{BuildingType, Catalog};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendEntry {
    pub building_type: BuildingType,
    pub label: String,
    pub positive: &'static str,
    pub negative: &'static str,
}

/// Expected upsides and downsides of a facility, `None` for unknown types.
pub fn effects(building_type: &BuildingType) -> Option<(&'static str, &'static str)> {
    let effects = match building_type {
        BuildingType::Market => (
            "Economic activation, job growth, increased tax revenue",
            "Increased traffic congestion, noise pollution",
        ),
        BuildingType::School => (
            "Improved education level, population inflow",
            "Overcrowded educational facilities, financial burden",
        ),
        BuildingType::CommunityCentre => (
            "Increased housing satisfaction, cultural revitalization",
            "Facility maintenance costs",
        ),
        BuildingType::Hospital => (
            "Improved healthcare level, increased public safety",
            "Increased operating costs, more traffic",
        ),
        BuildingType::PoliceStation => (
            "Reduced crime rate, increased resident safety perception",
            "Police shortage concerns, risk of excessive force",
        ),
        BuildingType::NonProfitHousing => (
            "Improved housing stability, support for low-income groups",
            "Negative impact on neighborhood image",
        ),
        BuildingType::Daycare => (
            "Increased young families, promotion of female economic activity",
            "Operating costs and lack of space",
        ),
        BuildingType::SeniorCentre => (
            "Improved elderly welfare, community strengthening",
            "Operating costs, lack of resources",
        ),
        BuildingType::Other(_) => return None,
    };
    Some(effects)
}

pub fn legend(catalog: &Catalog) -> Vec<LegendEntry> {
    catalog
        .entries()
        .iter()
        .filter_map(|entry| {
            effects(&entry.building_type).map(|(positive, negative)| LegendEntry {
                building_type: entry.building_type.clone(),
                label: entry.label.clone(),
                positive,
                negative,
            })
        })
        .collect()
}

pub fn render(entries: &[LegendEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                "{}\n  + {}\n  - {}",
                entry.label, entry.positive, entry.negative
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::model::CatalogEntry;

    #[test]
    fn test_every_known_type_has_effects() {
        for building_type in BuildingType::KNOWN {
            assert!(effects(&building_type).is_some(), "{building_type}");
        }
        assert!(effects(&BuildingType::Other("Stadium".into())).is_none());
    }

    #[test]
    fn test_legend_follows_catalog_and_skips_unknown() {
        let catalog = Catalog::new(vec![
            CatalogEntry {
                building_type: BuildingType::Hospital,
                label: "Hospital".to_string(),
                unit_cost: 3000,
            },
            CatalogEntry {
                building_type: BuildingType::Other("Stadium".into()),
                label: "Stadium".to_string(),
                unit_cost: 9000,
            },
        ]);
        let entries = legend(&catalog);
        assert_eq!(entries.len(), 1);
        let text = render(&entries);
        assert!(text.starts_with("Hospital\n  + Improved healthcare level"));
    }
}
