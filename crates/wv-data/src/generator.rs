//! Synthetic development-indicator generator
//!
//! Produces one record per (country, year). Values are drawn independently
//! per record around a per-year trend, then frozen.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wv_core::model::{Dataset, Record, Region, FIRST_YEAR, LAST_YEAR, YEAR_STEP};

/// The fixed country set as (name, region, ISO code), in grid order
pub const COUNTRIES: [(&str, Region, &str); 25] = [
    ("United States", Region::NorthAmerica, "USA"),
    ("China", Region::Asia, "CHN"),
    ("Japan", Region::Asia, "JPN"),
    ("Germany", Region::Europe, "DEU"),
    ("India", Region::Asia, "IND"),
    ("United Kingdom", Region::Europe, "GBR"),
    ("France", Region::Europe, "FRA"),
    ("Brazil", Region::SouthAmerica, "BRA"),
    ("Italy", Region::Europe, "ITA"),
    ("Canada", Region::NorthAmerica, "CAN"),
    ("South Korea", Region::Asia, "KOR"),
    ("Russia", Region::Europe, "RUS"),
    ("Australia", Region::Oceania, "AUS"),
    ("Spain", Region::Europe, "ESP"),
    ("Mexico", Region::NorthAmerica, "MEX"),
    ("Indonesia", Region::Asia, "IDN"),
    ("Nigeria", Region::Africa, "NGA"),
    ("South Africa", Region::Africa, "ZAF"),
    ("Argentina", Region::SouthAmerica, "ARG"),
    ("Egypt", Region::Africa, "EGY"),
    ("Sweden", Region::Europe, "SWE"),
    ("Norway", Region::Europe, "NOR"),
    ("Bangladesh", Region::Asia, "BGD"),
    ("Pakistan", Region::Asia, "PAK"),
    ("Vietnam", Region::Asia, "VNM"),
];

/// Generate a fresh dataset from entropy
pub fn generate() -> Dataset {
    generate_with(&mut StdRng::from_entropy())
}

/// Generate a reproducible dataset
pub fn generate_seeded(seed: u64) -> Dataset {
    generate_with(&mut StdRng::seed_from_u64(seed))
}

/// Generate a dataset from the given random source
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Dataset {
    let years: Vec<i32> = (FIRST_YEAR..=LAST_YEAR).step_by(YEAR_STEP as usize).collect();
    let mut records = Vec::with_capacity(COUNTRIES.len() * years.len());

    for (name, region, code) in COUNTRIES {
        for &year in &years {
            records.push(synthesize(rng, name, region, code, year));
        }
    }

    tracing::info!(
        "Generated {} records for {} countries over {} years",
        records.len(),
        COUNTRIES.len(),
        years.len()
    );
    Dataset::new(records)
}

fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    name: &str,
    region: Region,
    code: &str,
    year: i32,
) -> Record {
    let elapsed = f64::from(year - FIRST_YEAR);

    let base_gdp = rng.gen_range(5_000.0..55_000.0);
    let growth_rate = rng.gen_range(0.02..0.06);
    let gdp_per_capita = base_gdp * (1.0_f64 + growth_rate).powf(elapsed / 10.0);

    let population = rng.gen_range(1.0e6..3.01e8) * (1.0 + elapsed * 0.015);
    let life_expectancy = (45.0 + elapsed * 0.3 + rng.gen_range(0.0..10.0)).min(85.0);
    let literacy_rate = (30.0 + elapsed * 0.8 + rng.gen_range(0.0..20.0)).min(99.0);
    let infant_mortality = (100.0 - elapsed * 0.8 - rng.gen_range(0.0..20.0)).max(2.0);

    Record {
        country: name.to_string(),
        region,
        code: code.to_string(),
        year,
        gdp_per_capita: gdp_per_capita.round(),
        population: population.round() as u64,
        life_expectancy: round1(life_expectancy),
        literacy_rate: round1(literacy_rate),
        infant_mortality: round1(infant_mortality),
    }
}

/// Round to one decimal place
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
