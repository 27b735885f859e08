//! Filters and aggregations used by the views
//!
//! All functions are pure and borrow records from the dataset.

use std::collections::BTreeSet;

use wv_core::controls::RegionFilter;
use wv_core::error::{Result, VizError};
use wv_core::model::{Dataset, Indicator, Record};

/// Records of `year` in dataset order
pub fn filter_year(dataset: &Dataset, year: i32) -> Vec<&Record> {
    dataset.for_year(year)
}

pub fn filter_region<'a>(records: &[&'a Record], filter: RegionFilter) -> Vec<&'a Record> {
    records.iter().copied().filter(|r| filter.matches(r)).collect()
}

/// Minimum and maximum of `indicator`, `None` when empty
pub fn extent(records: &[&Record], indicator: Indicator) -> Option<(f64, f64)> {
    records.iter().map(|r| indicator.value(r)).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

pub fn mean(records: &[&Record], indicator: Indicator) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let sum: f64 = records.iter().map(|r| indicator.value(r)).sum();
    Some(sum / records.len() as f64)
}

/// Record with the largest `indicator`; the first one wins ties
pub fn max_by<'a>(records: &[&'a Record], indicator: Indicator) -> Option<&'a Record> {
    let (first, rest) = records.split_first()?;
    Some(rest.iter().copied().fold(*first, |best, r| {
        if indicator.value(r) > indicator.value(best) {
            r
        } else {
            best
        }
    }))
}

pub fn distinct_regions(records: &[&Record]) -> usize {
    records.iter().map(|r| r.region).collect::<BTreeSet<_>>().len()
}

/// Figures shown in the map view's side panel
#[derive(Debug, Clone, PartialEq)]
pub struct MapMetrics {
    pub total_countries: usize,
    /// Mean GDP per capita, rounded to whole dollars
    pub average_gdp: f64,
    pub highest_country: String,
    pub highest_value: f64,
    pub regional_clusters: usize,
}

/// Metrics panel figures for one year's records
pub fn map_metrics(records: &[&Record], indicator: Indicator, year: i32) -> Result<MapMetrics> {
    let highest = max_by(records, indicator).ok_or(VizError::EmptySelection { year })?;
    let average_gdp = mean(records, Indicator::GdpPerCapita)
        .ok_or(VizError::EmptySelection { year })?
        .round();

    Ok(MapMetrics {
        total_countries: records.len(),
        average_gdp,
        highest_country: highest.country.clone(),
        highest_value: indicator.value(highest),
        regional_clusters: distinct_regions(records),
    })
}
