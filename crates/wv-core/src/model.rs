//! Domain model: country-year records, regions and indicators

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::VizError;

/// First year covered by the dataset
pub const FIRST_YEAR: i32 = 1960;

/// Last year covered by the dataset
pub const LAST_YEAR: i32 = 2020;

/// Distance between two consecutive years
pub const YEAR_STEP: i32 = 5;

/// Macro-geographic grouping used for color coding and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Asia,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Oceania,
}

impl Region {
    /// All regions in legend order
    pub const ALL: [Region; 6] = [
        Region::Africa,
        Region::Asia,
        Region::Europe,
        Region::NorthAmerica,
        Region::SouthAmerica,
        Region::Oceania,
    ];

    /// Human readable name, also the parse key
    pub fn name(self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::NorthAmerica => "North America",
            Region::SouthAmerica => "South America",
            Region::Oceania => "Oceania",
        }
    }

    /// Fixed display color as RGB
    pub fn rgb(self) -> [u8; 3] {
        match self {
            Region::Africa => [0xe7, 0x4c, 0x3c],
            Region::Asia => [0xf3, 0x9c, 0x12],
            Region::Europe => [0x34, 0x98, 0xdb],
            Region::NorthAmerica => [0x2e, 0xcc, 0x71],
            Region::SouthAmerica => [0x9b, 0x59, 0xb6],
            Region::Oceania => [0x1a, 0xbc, 0x9c],
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Region {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|region| region.name() == s)
            .ok_or_else(|| VizError::UnknownRegion(s.to_string()))
    }
}

/// One of the numeric per-record fields that can be visualized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    GdpPerCapita,
    Population,
    LifeExpectancy,
    LiteracyRate,
    InfantMortality,
}

impl Indicator {
    pub const ALL: [Indicator; 5] = [
        Indicator::GdpPerCapita,
        Indicator::Population,
        Indicator::LifeExpectancy,
        Indicator::LiteracyRate,
        Indicator::InfantMortality,
    ];

    /// Indicators offered on the distribution view's vertical axis
    pub const DISTRIBUTION: [Indicator; 3] = [
        Indicator::LifeExpectancy,
        Indicator::LiteracyRate,
        Indicator::InfantMortality,
    ];

    /// Stable key, matches the record's serialized field name
    pub fn key(self) -> &'static str {
        match self {
            Indicator::GdpPerCapita => "gdpPerCapita",
            Indicator::Population => "population",
            Indicator::LifeExpectancy => "lifeExpectancy",
            Indicator::LiteracyRate => "literacyRate",
            Indicator::InfantMortality => "infantMortality",
        }
    }

    /// Axis label
    pub fn label(self) -> &'static str {
        match self {
            Indicator::GdpPerCapita => "GDP per Capita (USD)",
            Indicator::Population => "Population",
            Indicator::LifeExpectancy => "Life Expectancy (years)",
            Indicator::LiteracyRate => "Literacy Rate (%)",
            Indicator::InfantMortality => "Infant Mortality (per 1000 births)",
        }
    }

    /// Lower-case words for running text, e.g. "life expectancy"
    pub fn phrase(self) -> &'static str {
        match self {
            Indicator::GdpPerCapita => "gdp per capita",
            Indicator::Population => "population",
            Indicator::LifeExpectancy => "life expectancy",
            Indicator::LiteracyRate => "literacy rate",
            Indicator::InfantMortality => "infant mortality",
        }
    }

    pub fn value(self, record: &Record) -> f64 {
        match self {
            Indicator::GdpPerCapita => record.gdp_per_capita,
            Indicator::Population => record.population as f64,
            Indicator::LifeExpectancy => record.life_expectancy,
            Indicator::LiteracyRate => record.literacy_rate,
            Indicator::InfantMortality => record.infant_mortality,
        }
    }

    /// Whether the indicator spans orders of magnitude and is drawn on a log axis
    pub fn is_log_scaled(self) -> bool {
        matches!(self, Indicator::GdpPerCapita | Indicator::Population)
    }

    /// Fixed vertical domain used by the distribution view
    pub fn distribution_domain(self) -> Option<(f64, f64)> {
        match self {
            Indicator::LifeExpectancy => Some((30.0, 85.0)),
            Indicator::LiteracyRate => Some((0.0, 100.0)),
            Indicator::InfantMortality => Some((0.0, 150.0)),
            _ => None,
        }
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Indicator {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Indicator::ALL
            .into_iter()
            .find(|indicator| indicator.key() == s)
            .ok_or_else(|| VizError::UnknownIndicator(s.to_string()))
    }
}

/// One country-year observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub country: String,
    pub region: Region,
    pub code: String,
    pub year: i32,
    pub gdp_per_capita: f64,
    pub population: u64,
    pub life_expectancy: f64,
    pub literacy_rate: f64,
    pub infant_mortality: f64,
}

/// The frozen, session-wide set of records in generation order
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of one year, in dataset order
    pub fn for_year(&self, year: i32) -> Vec<&Record> {
        self.records.iter().filter(|r| r.year == year).collect()
    }

    /// Distinct years in ascending order
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Regions that occur at least once, in legend order
    pub fn regions_present(&self) -> Vec<Region> {
        Region::ALL
            .into_iter()
            .filter(|region| self.records.iter().any(|r| r.region == *region))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(country: &str, region: Region, year: i32) -> Record {
        Record {
            country: country.to_string(),
            region,
            code: "XXX".to_string(),
            year,
            gdp_per_capita: 1000.0,
            population: 5_000_000,
            life_expectancy: 60.0,
            literacy_rate: 70.0,
            infant_mortality: 30.0,
        }
    }

    #[test]
    fn test_region_round_trips_through_name() {
        for region in Region::ALL {
            assert_eq!(region.name().parse::<Region>().unwrap(), region);
        }
        assert!("Atlantis".parse::<Region>().is_err());
    }

    #[test]
    fn test_indicator_keys_parse() {
        assert_eq!("literacyRate".parse::<Indicator>().unwrap(), Indicator::LiteracyRate);
        assert!(matches!(
            "gdp".parse::<Indicator>(),
            Err(VizError::UnknownIndicator(key)) if key == "gdp"
        ));
    }

    #[test]
    fn test_distribution_domains() {
        assert_eq!(Indicator::LifeExpectancy.distribution_domain(), Some((30.0, 85.0)));
        assert_eq!(Indicator::LiteracyRate.distribution_domain(), Some((0.0, 100.0)));
        assert_eq!(Indicator::InfantMortality.distribution_domain(), Some((0.0, 150.0)));
        assert_eq!(Indicator::Population.distribution_domain(), None);
    }

    #[test]
    fn test_record_serializes_with_page_field_names() {
        let json = serde_json::to_value(record("Chile", Region::SouthAmerica, 1990)).unwrap();
        assert_eq!(json["gdpPerCapita"], 1000.0);
        assert_eq!(json["region"], "SouthAmerica");
    }

    #[test]
    fn test_dataset_queries_keep_order() {
        let dataset = Dataset::new(vec![
            record("B", Region::Asia, 1960),
            record("B", Region::Asia, 1965),
            record("A", Region::Oceania, 1960),
        ]);

        let names: Vec<_> = dataset.for_year(1960).iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["B", "A"]);
        assert_eq!(dataset.years(), vec![1960, 1965]);
        assert_eq!(dataset.regions_present(), vec![Region::Asia, Region::Oceania]);
    }
}
