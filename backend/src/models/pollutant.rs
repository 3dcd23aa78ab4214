//! Reference information about the pollutants reported by the collector.
//!
//! The catalog is informational: datasets may contain pollutant ids that are
//! not listed here.

use serde::Serialize;

/// Descriptive entry for one pollutant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PollutantInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub sources: &'static str,
    pub health_effects: &'static str,
    pub environmental_impact: &'static str,
}

pub const POLLUTANT_CATALOG: [PollutantInfo; 7] = [
    PollutantInfo {
        id: "co",
        name: "Carbon Monoxide (CO)",
        sources: "Car exhaust, industrial emissions, and heating systems.",
        health_effects: "Can cause headaches, dizziness, confusion, and even death at high levels.",
        environmental_impact: "Contributes to smog and harms ecosystems.",
    },
    PollutantInfo {
        id: "o3",
        name: "Ozone (O₃)",
        sources: "Forms in sunlight from vehicle emissions and industrial pollution.",
        health_effects: "Causes coughing, asthma, and worsens lung diseases.",
        environmental_impact: "Damages crops, trees, and harms air quality.",
    },
    PollutantInfo {
        id: "no",
        name: "Nitric Oxide (NO)",
        sources: "Vehicle and power plant emissions, industry.",
        health_effects: "Irritates airways, causing coughing and breathing problems.",
        environmental_impact: "Contributes to acid rain and smog formation.",
    },
    PollutantInfo {
        id: "no2",
        name: "Nitrogen Dioxide (NO₂)",
        sources: "Fossil fuel combustion from vehicles and power plants.",
        health_effects: "Aggravates asthma and lung infections.",
        environmental_impact: "Contributes to acid rain and worsens air quality.",
    },
    PollutantInfo {
        id: "pm10",
        name: "Particulate Matter (PM₁₀)",
        sources: "Diesel engines, burning wood and coal, dust from farming and wildfires.",
        health_effects: "Irritates lungs, increases risk of heart disease and respiratory issues.",
        environmental_impact: "Damages buildings and affects climate.",
    },
    PollutantInfo {
        id: "pm25",
        name: "Fine Particulate Matter (PM₂.₅)",
        sources: "Vehicle emissions, industrial burning, wildfires.",
        health_effects: "Deeply penetrates lungs, linked to heart disease and lung cancer.",
        environmental_impact: "Affects cloud formation and climate patterns.",
    },
    PollutantInfo {
        id: "so2",
        name: "Sulfur Dioxide (SO₂)",
        sources: "Power plants burning coal, volcanic eruptions.",
        health_effects: "Causes breathing problems, worsens lung diseases.",
        environmental_impact: "Leads to acid rain, damaging forests and water systems.",
    },
];

/// Look up a pollutant by id (case-insensitive).
pub fn pollutant_info(id: &str) -> Option<&'static PollutantInfo> {
    POLLUTANT_CATALOG
        .iter()
        .find(|p| p.id.eq_ignore_ascii_case(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        assert_eq!(pollutant_info("PM25").map(|p| p.id), Some("pm25"));
        assert!(pollutant_info("benzene").is_none());
    }

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids: Vec<_> = POLLUTANT_CATALOG.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), POLLUTANT_CATALOG.len());
    }
}
