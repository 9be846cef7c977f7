//! WMO weather code to description/icon lookup.
//!
//! See: https://open-meteo.com/en/docs#weathervariables

use std::ops::RangeInclusive;

use crate::model::{IconKey, WeatherPresentation};

const UNKNOWN: WeatherPresentation = WeatherPresentation {
    description: "Unknown",
    icon: IconKey::Cloud,
};

// Inclusive ranges, checked in order. The fog row spans 45..=48, so 46 and 47
// are Foggy even though WMO only defines 45 and 48.
const TABLE: &[(RangeInclusive<i64>, &str, IconKey)] = &[
    (0..=0, "Clear Sky", IconKey::Sun),
    (1..=3, "Partly Cloudy", IconKey::CloudSun),
    (45..=48, "Foggy", IconKey::Smog),
    (51..=55, "Drizzle", IconKey::CloudRain),
    (61..=65, "Rain", IconKey::CloudShowersHeavy),
    (71..=77, "Snow Fall", IconKey::Snowflake),
    (80..=82, "Rain Showers", IconKey::CloudShowersWater),
    (95..=99, "Thunderstorm", IconKey::CloudBolt),
];

/// Map a weather code to its presentation. Total: unmatched codes yield "Unknown".
pub fn classify(code: i64) -> WeatherPresentation {
    TABLE
        .iter()
        .find(|(range, _, _)| range.contains(&code))
        .map(|(_, description, icon)| WeatherPresentation {
            description: *description,
            icon: *icon,
        })
        .unwrap_or(UNKNOWN)
}
