//! Explorer view: any indicator against any other, filterable by region
//!
//! Every redraw rebuilds the frame from scratch. Points are plotted in
//! normalized scale space, so log axes need no special handling in the
//! plot widget; the axis formatters invert the scales for the tick labels.

use std::any::Any;
use std::ops::RangeInclusive;

use egui::{ComboBox, RichText, Slider, Ui};
use egui_plot::{Legend, Plot, PlotPoint, Points};
use wv_core::controls::{ExplorerControls, RegionFilter, YearSlider};
use wv_core::model::{Dataset, Indicator, Record};
use wv_core::scene::Scene;
use wv_data::{extent, filter_region, filter_year};

use super::utils::{region_fill, show_record_tooltip, tick_format, Scale};
use crate::scene_view::{SceneView, ViewAction};
use crate::{HoveredRecord, ViewerContext};

/// Bubble radius range in pixels
pub const RADIUS_RANGE: (f64, f64) = (5.0, 30.0);

/// Lowest domain start of the GDP per capita log axis
pub const GDP_FLOOR: f64 = 100.0;

/// Lowest domain start of the population log axis
pub const POPULATION_FLOOR: f64 = 1000.0;

const UNIT: (f64, f64) = (0.0, 1.0);

/// Scale for `indicator` over the extent of `records`
pub fn indicator_scale(indicator: Indicator, records: &[&Record], range: (f64, f64)) -> Scale {
    let (lo, hi) = extent(records, indicator).unwrap_or(UNIT);
    match indicator {
        Indicator::GdpPerCapita => Scale::log((lo.max(GDP_FLOOR), hi), range),
        Indicator::Population => Scale::log((lo.max(POPULATION_FLOOR), hi), range),
        _ => Scale::linear((lo, hi), range),
    }
}

/// One plotted record
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerPoint {
    pub record: Record,
    /// Position in normalized `[0, 1]` scale space
    pub position: [f64; 2],
    pub radius: f32,
}

#[derive(Debug, Clone)]
pub struct ExplorerFrame {
    pub controls: ExplorerControls,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub size_scale: Scale,
    pub points: Vec<ExplorerPoint>,
}

/// Build the frame; `None` when the filters leave nothing to plot
pub fn layout(dataset: &Dataset, controls: ExplorerControls) -> Option<ExplorerFrame> {
    let year = filter_year(dataset, controls.year);
    let records = filter_region(&year, controls.region);
    if records.is_empty() {
        return None;
    }

    let x_scale = indicator_scale(controls.x, &records, UNIT);
    let y_scale = indicator_scale(controls.y, &records, UNIT);
    let size_domain = extent(&records, Indicator::Population).unwrap_or(UNIT);
    let size_scale = Scale::sqrt(size_domain, RADIUS_RANGE);

    let points = records
        .iter()
        .map(|record| ExplorerPoint {
            record: (*record).clone(),
            position: [
                x_scale.apply(controls.x.value(record)),
                y_scale.apply(controls.y.value(record)),
            ],
            radius: size_scale.apply(record.population as f64) as f32,
        })
        .collect();

    Some(ExplorerFrame {
        controls,
        x_scale,
        y_scale,
        size_scale,
        points,
    })
}

/// Tick label for a normalized coordinate
fn axis_label(scale: Scale, indicator: Indicator) -> impl Fn(f64, usize, &RangeInclusive<f64>) -> String {
    let format = tick_format(indicator);
    move |value, _, _| {
        if (0.0..=1.0).contains(&value) {
            format(scale.invert(value))
        } else {
            String::new()
        }
    }
}

/// The explorer scene
pub struct ExplorerView {
    slider: YearSlider,
    x: Indicator,
    y: Indicator,
    region: RegionFilter,
    frame: Option<ExplorerFrame>,
    initialized: bool,
    initializations: usize,
    rebuilds: usize,
}

impl Default for ExplorerView {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerView {
    pub fn new() -> Self {
        let defaults = ExplorerControls::new(YearSlider::default().value());
        Self {
            slider: YearSlider::default(),
            x: defaults.x,
            y: defaults.y,
            region: defaults.region,
            frame: None,
            initialized: false,
            initializations: 0,
            rebuilds: 0,
        }
    }

    pub fn controls(&self) -> ExplorerControls {
        ExplorerControls {
            year: self.slider.value(),
            x: self.x,
            y: self.y,
            region: self.region,
        }
    }

    pub fn frame(&self) -> Option<&ExplorerFrame> {
        self.frame.as_ref()
    }

    pub fn initializations(&self) -> usize {
        self.initializations
    }

    pub fn rebuilds(&self) -> usize {
        self.rebuilds
    }

    pub fn reset(&mut self, slider: YearSlider, dataset: &Dataset) {
        let defaults = ExplorerControls::new(slider.value());
        self.slider = slider;
        self.x = defaults.x;
        self.y = defaults.y;
        self.region = defaults.region;
        self.initialized = true;
        self.initializations += 1;

        self.redraw(dataset);
    }

    /// Apply a full control snapshot and rebuild
    pub fn apply(&mut self, controls: ExplorerControls, dataset: &Dataset) {
        self.slider.set(controls.year);
        self.x = controls.x;
        self.y = controls.y;
        self.region = controls.region;
        self.redraw(dataset);
    }

    pub fn redraw(&mut self, dataset: &Dataset) {
        let controls = self.controls();
        self.frame = layout(dataset, controls);
        self.rebuilds += 1;

        match &self.frame {
            Some(frame) => tracing::debug!(
                "Explorer rebuilt: {} points, {} vs {}, {}",
                frame.points.len(),
                controls.y.key(),
                controls.x.key(),
                controls.region.key()
            ),
            None => tracing::warn!(
                "No records for {} in {}",
                controls.year,
                controls.region.key()
            ),
        }
    }

    fn controls_ui(&mut self, ui: &mut Ui) -> Option<ExplorerControls> {
        let mut controls = self.controls();

        ui.horizontal(|ui| {
            ui.label("Year:");
            ui.add(
                Slider::new(&mut controls.year, self.slider.min..=self.slider.max)
                    .step_by(f64::from(self.slider.step))
                    .show_value(false),
            );
            ui.label(RichText::new(controls.year.to_string()).strong());

            ui.separator();
            indicator_combo(ui, "explorer_x", "X Axis:", &mut controls.x);
            indicator_combo(ui, "explorer_y", "Y Axis:", &mut controls.y);

            ui.separator();
            ui.label("Region:");
            ComboBox::from_id_source("explorer_region")
                .selected_text(controls.region.to_string())
                .show_ui(ui, |ui| {
                    for option in RegionFilter::options() {
                        ui.selectable_value(&mut controls.region, option, option.to_string());
                    }
                });
        });

        (controls != self.controls()).then_some(controls)
    }

    fn plot_ui(&self, ctx: &ViewerContext, ui: &mut Ui, frame: &ExplorerFrame) {
        let controls = frame.controls;
        let plot = Plot::new("explorer_plot")
            .height(ctx.chart_height)
            .legend(Legend::default())
            .x_axis_label(controls.x.label())
            .y_axis_label(controls.y.label())
            .x_axis_formatter(axis_label(frame.x_scale, controls.x))
            .y_axis_formatter(axis_label(frame.y_scale, controls.y))
            .include_x(-0.05)
            .include_x(1.05)
            .include_y(-0.05)
            .include_y(1.05)
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false);

        let response = plot.show(ui, |plot_ui| {
            for point in &frame.points {
                plot_ui.points(
                    Points::new(vec![point.position])
                        .radius(point.radius)
                        .color(region_fill(point.record.region))
                        .filled(true)
                        .name(point.record.region.name()),
                );
            }

            let pointer = plot_ui.pointer_coordinate()?;
            let pointer = plot_ui.screen_from_plot(pointer);
            frame.points.iter().rposition(|point| {
                let center = plot_ui.screen_from_plot(PlotPoint::new(point.position[0], point.position[1]));
                center.distance(pointer) <= point.radius
            })
        });

        match response.inner.and_then(|index| frame.points.get(index)) {
            Some(point) => {
                ctx.set_hovered(Some(HoveredRecord {
                    scene: Scene::Explorer,
                    country: point.record.country.clone(),
                }));
                show_record_tooltip(ui, response.response.id.with("tooltip"), &point.record);
            }
            None if response.response.hovered() => ctx.set_hovered(None),
            None => {}
        }
    }
}

fn indicator_combo(ui: &mut Ui, id: &str, label: &str, value: &mut Indicator) {
    ui.label(label);
    ComboBox::from_id_source(id)
        .selected_text(value.label())
        .show_ui(ui, |ui| {
            for option in Indicator::ALL {
                ui.selectable_value(value, option, option.label());
            }
        });
}

impl SceneView for ExplorerView {
    fn scene(&self) -> Scene {
        Scene::Explorer
    }

    fn initialize(&mut self, ctx: &ViewerContext) {
        let slider = ctx.default_slider();
        self.reset(slider, &ctx.dataset);
        tracing::info!("Explorer view initialized at {}", self.slider.value());
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Vec<ViewAction> {
        if let Some(controls) = self.controls_ui(ui) {
            self.apply(controls, &ctx.dataset);
        }
        ui.add_space(8.0);

        match &self.frame {
            Some(frame) => self.plot_ui(ctx, ui, frame),
            None => {
                ui.allocate_ui(egui::vec2(ui.available_width(), ctx.chart_height), |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(RichText::new(format!("No data for {}", self.slider.value())).weak());
                    });
                });
            }
        }

        Vec::new()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wv_core::model::Region;
    use wv_data::generate_seeded;

    fn record(country: &str, region: Region, gdp: f64, population: u64) -> Record {
        Record {
            country: country.to_string(),
            region,
            code: "XXX".to_string(),
            year: 2020,
            gdp_per_capita: gdp,
            population,
            life_expectancy: 70.0,
            literacy_rate: 90.0,
            infant_mortality: 10.0,
        }
    }

    #[test]
    fn test_log_domains_are_floored() {
        let a = record("A", Region::Asia, 40.0, 200);
        let b = record("B", Region::Asia, 5000.0, 50_000);
        let records = vec![&a, &b];

        let gdp = indicator_scale(Indicator::GdpPerCapita, &records, UNIT);
        assert_eq!(gdp.domain(), (100.0, 5000.0));
        let population = indicator_scale(Indicator::Population, &records, UNIT);
        assert_eq!(population.domain(), (1000.0, 50_000.0));
        let literacy = indicator_scale(Indicator::LiteracyRate, &records, UNIT);
        assert_eq!(literacy.domain(), (90.0, 90.0));
    }

    #[test]
    fn test_generated_domains_respect_floors() {
        let dataset = generate_seeded(8);
        let frame = layout(&dataset, ExplorerControls::new(1960)).unwrap();
        assert!(frame.x_scale.domain().0 >= GDP_FLOOR);

        let mut controls = ExplorerControls::new(1960);
        controls.y = Indicator::Population;
        let frame = layout(&dataset, controls).unwrap();
        assert!(frame.y_scale.domain().0 >= POPULATION_FLOOR);
    }

    #[test]
    fn test_region_filter_applies_before_scales() {
        let dataset = generate_seeded(8);
        let mut controls = ExplorerControls::new(2020);
        controls.region = RegionFilter::Only(Region::Africa);
        let frame = layout(&dataset, controls).unwrap();

        assert_eq!(frame.points.len(), 3);
        assert!(frame.points.iter().all(|p| p.record.region == Region::Africa));
        let xs: Vec<f64> = frame.points.iter().map(|p| p.position[0]).collect();
        assert!(xs.iter().any(|x| x.abs() < 1e-9));
        assert!(xs.iter().any(|x| (x - 1.0).abs() < 1e-9));
        for point in &frame.points {
            assert!(point.radius >= 5.0 - 1e-3 && point.radius <= 30.0 + 1e-3);
        }
    }

    #[test]
    fn test_empty_selection_has_no_frame() {
        let dataset = Dataset::new(vec![record("A", Region::Asia, 1000.0, 10_000)]);
        let mut controls = ExplorerControls::new(2020);
        controls.region = RegionFilter::Only(Region::Oceania);
        assert!(layout(&dataset, controls).is_none());
        assert!(layout(&dataset, ExplorerControls::new(1990)).is_none());
    }

    #[test]
    fn test_axis_labels_invert_scales() {
        let scale = Scale::log((100.0, 100_000.0), UNIT);
        let label = axis_label(scale, Indicator::GdpPerCapita);
        assert_eq!(label(0.0, 0, &(0.0..=1.0)), "100");
        assert_eq!(label(1.0, 0, &(0.0..=1.0)), "100k");
        assert_eq!(label(1.5, 0, &(0.0..=1.0)), "");

        let linear = axis_label(Scale::linear((40.0, 80.0), UNIT), Indicator::LifeExpectancy);
        assert_eq!(linear(0.5, 0, &(0.0..=1.0)), "60.0");
    }

    #[test]
    fn test_reset_and_apply_rebuild() {
        let dataset = generate_seeded(8);
        let mut view = ExplorerView::new();
        view.reset(YearSlider::default(), &dataset);
        assert_eq!(view.controls(), ExplorerControls::new(2020));
        assert_eq!(view.frame().unwrap().points.len(), 25);

        let mut controls = view.controls();
        controls.year = 1980;
        controls.region = RegionFilter::Only(Region::Europe);
        view.apply(controls, &dataset);
        assert_eq!(view.frame().unwrap().points.len(), 8);
        assert_eq!(view.rebuilds(), 2);

        view.reset(YearSlider::default(), &dataset);
        assert_eq!(view.controls().region, RegionFilter::All);
        assert_eq!(view.initializations(), 2);
    }
}
