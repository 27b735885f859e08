//! Hover tooltip and detail prompt content

use egui::{Id, RichText, Ui};
use wv_core::model::Record;

use super::format::{format_currency, format_number, format_thousands};

/// Lines shown when hovering a record; the first is the country
pub fn tooltip_lines(record: &Record) -> Vec<String> {
    vec![
        record.country.clone(),
        format!("Region: {}", record.region),
        format!("Year: {}", record.year),
        format!("GDP per Capita: {}", format_currency(record.gdp_per_capita)),
        format!("Population: {}", format_thousands(record.population as f64)),
        format!("Life Expectancy: {} years", format_number(record.life_expectancy)),
        format!("Literacy Rate: {}%", format_number(record.literacy_rate)),
        format!("Infant Mortality: {}", format_number(record.infant_mortality)),
    ]
}

/// Lines of the blocking detail prompt opened from the map
pub fn detail_lines(record: &Record) -> Vec<String> {
    vec![
        format!("Country: {}", record.country),
        format!("Region: {}", record.region),
        format!("GDP per Capita: {}", format_currency(record.gdp_per_capita)),
        format!("Population: {}", format_thousands(record.population as f64)),
        format!("Life Expectancy: {} years", format_number(record.life_expectancy)),
    ]
}

/// Show the record tooltip next to the pointer
pub fn show_record_tooltip(ui: &Ui, id: Id, record: &Record) {
    egui::show_tooltip_at_pointer(ui.ctx(), id, |ui| {
        let mut lines = tooltip_lines(record).into_iter();
        if let Some(title) = lines.next() {
            ui.label(RichText::new(title).strong());
        }
        for line in lines {
            ui.label(line);
        }
    });
}
