//! Per-view control state
//!
//! Every view keeps its own controls and hands a snapshot of them to each
//! redraw, so a redraw never observes a half-updated panel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VizError};
use crate::model::{Indicator, Record, Region, FIRST_YEAR, LAST_YEAR, YEAR_STEP};

/// A stepped year slider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearSlider {
    pub min: i32,
    pub max: i32,
    pub step: i32,
    pub default: i32,
    value: i32,
}

impl YearSlider {
    /// Slider over the dataset's years, starting at `default`
    pub fn new(default: i32) -> Result<Self> {
        let mut slider = Self {
            min: FIRST_YEAR,
            max: LAST_YEAR,
            step: YEAR_STEP,
            default,
            value: default,
        };
        slider.seek_to(default)?;
        Ok(slider)
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Move to `year`, snapping down onto the step grid
    pub fn seek_to(&mut self, year: i32) -> Result<()> {
        if year < self.min || year > self.max {
            return Err(VizError::YearOutOfRange {
                year,
                min: self.min,
                max: self.max,
            });
        }
        self.value = year - (year - self.min) % self.step;
        Ok(())
    }

    /// Like `seek_to` but clamps instead of failing
    pub fn set(&mut self, year: i32) {
        let clamped = year.clamp(self.min, self.max);
        self.value = clamped - (clamped - self.min) % self.step;
    }

    pub fn reset(&mut self) {
        self.set(self.default);
    }

    /// All positions the slider can take
    pub fn positions(&self) -> impl Iterator<Item = i32> {
        (self.min..=self.max).step_by(self.step as usize)
    }
}

impl Default for YearSlider {
    fn default() -> Self {
        Self {
            min: FIRST_YEAR,
            max: LAST_YEAR,
            step: YEAR_STEP,
            default: LAST_YEAR,
            value: LAST_YEAR,
        }
    }
}

/// Region filter of the explorer view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(region) => record.region == *region,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            RegionFilter::All => "all",
            RegionFilter::Only(region) => region.name(),
        }
    }

    /// "all" followed by every region
    pub fn options() -> impl Iterator<Item = RegionFilter> {
        std::iter::once(RegionFilter::All).chain(Region::ALL.into_iter().map(RegionFilter::Only))
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str("All Regions"),
            RegionFilter::Only(region) => f.write_str(region.name()),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = VizError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "all" {
            Ok(RegionFilter::All)
        } else {
            s.parse().map(RegionFilter::Only)
        }
    }
}

/// Snapshot of the distribution view's controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionControls {
    pub year: i32,
    pub indicator: Indicator,
}

impl DistributionControls {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            indicator: Indicator::LifeExpectancy,
        }
    }
}

/// Snapshot of the grid map view's controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapControls {
    pub year: i32,
    pub indicator: Indicator,
}

impl MapControls {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            indicator: Indicator::GdpPerCapita,
        }
    }
}

/// Snapshot of the explorer view's controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplorerControls {
    pub year: i32,
    pub x: Indicator,
    pub y: Indicator,
    pub region: RegionFilter,
}

impl ExplorerControls {
    pub fn new(year: i32) -> Self {
        Self {
            year,
            x: Indicator::GdpPerCapita,
            y: Indicator::LifeExpectancy,
            region: RegionFilter::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_snaps_to_step() {
        let mut slider = YearSlider::new(2020).unwrap();
        slider.seek_to(1987).unwrap();
        assert_eq!(slider.value(), 1985);

        slider.set(3000);
        assert_eq!(slider.value(), 2020);

        slider.set(1900);
        assert_eq!(slider.value(), 1960);
    }

    #[test]
    fn test_slider_rejects_out_of_range() {
        let mut slider = YearSlider::default();
        assert!(matches!(
            slider.seek_to(2025),
            Err(VizError::YearOutOfRange { year: 2025, .. })
        ));
        assert!(YearSlider::new(1955).is_err());
    }

    #[test]
    fn test_slider_reset_returns_to_default() {
        let mut slider = YearSlider::new(1990).unwrap();
        slider.set(2010);
        slider.reset();
        assert_eq!(slider.value(), 1990);
    }

    #[test]
    fn test_slider_positions() {
        let slider = YearSlider::default();
        let positions: Vec<_> = slider.positions().collect();
        assert_eq!(positions.len(), 13);
        assert_eq!(positions.first(), Some(&1960));
        assert_eq!(positions.last(), Some(&2020));
    }

    #[test]
    fn test_region_filter_parsing() {
        assert_eq!("all".parse::<RegionFilter>().unwrap(), RegionFilter::All);
        assert_eq!(
            "Oceania".parse::<RegionFilter>().unwrap(),
            RegionFilter::Only(Region::Oceania)
        );
        assert!("Antarctica".parse::<RegionFilter>().is_err());
        assert_eq!(RegionFilter::options().count(), 7);
    }
}
