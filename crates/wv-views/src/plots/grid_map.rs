//! Grid map view: one rounded cell per country, shaded by an indicator
//!
//! Cells are placed on a ten-column grid in dataset order. A side panel shows
//! summary metrics for the selected year.

use std::any::Any;
use std::time::{Duration, Instant};

use egui::{Color32, ComboBox, Rect, RichText, Rounding, Sense, Slider, Stroke, Ui};
use wv_core::controls::{MapControls, YearSlider};
use wv_core::error::Result;
use wv_core::model::{Dataset, Indicator, Record};
use wv_core::scene::Scene;
use wv_data::{extent, filter_year, map_metrics, MapMetrics};

use super::utils::{
    format_currency, sequential_blue, show_record_tooltip, JoinSummary, JoinTimings, MarkAttrs,
    MarkSet, MarkTarget, Scale, Tween,
};
use crate::scene_view::{SceneView, ViewAction};
use crate::{HoveredRecord, ViewerContext};

pub const COLUMNS: usize = 10;

/// Rows the chart height is divided into
pub const ROWS: usize = 5;

pub const CELL_GAP: f32 = 5.0;

pub const CORNER_RADIUS: f32 = 5.0;

pub const METRICS_PANEL_WIDTH: f32 = 220.0;

const DEFAULT_CONTAINER_WIDTH: f32 = 1130.0;

const TIMINGS: JoinTimings = JoinTimings {
    enter: Duration::ZERO,
    update: Duration::from_millis(500),
    exit: None,
};

/// Row and column of the `index`-th record
pub fn grid_position(index: usize) -> (usize, usize) {
    (index / COLUMNS, index % COLUMNS)
}

/// Geometry and fill of one cell in chart-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellAttrs {
    pub rect: Rect,
    pub fill: Color32,
}

impl Tween for CellAttrs {
    fn tween(&self, to: &Self, t: f32) -> Self {
        Self {
            rect: self.rect.tween(&to.rect, t),
            fill: self.fill.tween(&to.fill, t),
        }
    }
}

impl MarkAttrs for CellAttrs {
    fn collapsed(&self) -> Self {
        Self {
            rect: self.rect,
            fill: Color32::TRANSPARENT,
        }
    }
}

#[derive(Debug)]
pub struct MapFrame {
    pub year: i32,
    pub indicator: Indicator,
    pub cells: Vec<MarkTarget<CellAttrs, Record>>,
    /// Indicator extent the color scale spans
    pub color_domain: Option<(f64, f64)>,
    pub metrics: Result<MapMetrics>,
}

/// Lay out the grid for a chart of `width` by `height` pixels
pub fn layout(dataset: &Dataset, controls: MapControls, width: f32, height: f32) -> MapFrame {
    let records = filter_year(dataset, controls.year);
    let indicator = controls.indicator;

    let color_domain = extent(&records, indicator);
    let color_scale = Scale::linear(color_domain.unwrap_or((0.0, 1.0)), (0.0, 1.0));

    let column_width = width / COLUMNS as f32;
    let row_height = height / ROWS as f32;
    let cell_size = egui::vec2(
        (column_width - CELL_GAP).max(0.0),
        (row_height - CELL_GAP).max(0.0),
    );

    let cells = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let (row, col) = grid_position(index);
            let min = egui::pos2(col as f32 * column_width, row as f32 * row_height);
            MarkTarget {
                key: record.country.clone(),
                attrs: CellAttrs {
                    rect: Rect::from_min_size(min, cell_size),
                    fill: sequential_blue(color_scale.normalize(indicator.value(record))),
                },
                datum: (*record).clone(),
            }
        })
        .collect();

    MapFrame {
        year: controls.year,
        indicator,
        cells,
        color_domain,
        metrics: map_metrics(&records, indicator, controls.year),
    }
}

/// The grid map scene
pub struct GridMapView {
    slider: YearSlider,
    indicator: Indicator,
    container_width: f32,
    chart_size: egui::Vec2,
    cells: MarkSet<CellAttrs, Record>,
    frame: Option<MapFrame>,
    initialized: bool,
    initializations: usize,
    last_join: JoinSummary,
}

impl Default for GridMapView {
    fn default() -> Self {
        Self::new()
    }
}

impl GridMapView {
    pub fn new() -> Self {
        Self {
            slider: YearSlider::default(),
            indicator: Indicator::GdpPerCapita,
            container_width: DEFAULT_CONTAINER_WIDTH,
            chart_size: egui::vec2(DEFAULT_CONTAINER_WIDTH - METRICS_PANEL_WIDTH, 600.0),
            cells: MarkSet::new(),
            frame: None,
            initialized: false,
            initializations: 0,
            last_join: JoinSummary::default(),
        }
    }

    pub fn controls(&self) -> MapControls {
        MapControls {
            year: self.slider.value(),
            indicator: self.indicator,
        }
    }

    pub fn year(&self) -> i32 {
        self.slider.value()
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn cells(&self) -> &MarkSet<CellAttrs, Record> {
        &self.cells
    }

    pub fn frame(&self) -> Option<&MapFrame> {
        self.frame.as_ref()
    }

    pub fn initializations(&self) -> usize {
        self.initializations
    }

    pub fn last_join(&self) -> JoinSummary {
        self.last_join
    }

    pub fn reset(&mut self, slider: YearSlider, chart_height: f32, dataset: &Dataset, now: Instant) {
        self.slider = slider;
        self.indicator = Indicator::GdpPerCapita;
        self.chart_size = egui::vec2(
            (self.container_width - METRICS_PANEL_WIDTH).max(0.0),
            chart_height,
        );
        self.cells.clear();
        self.frame = None;
        self.initialized = true;
        self.initializations += 1;

        self.redraw(dataset, now);
    }

    pub fn set_year(&mut self, year: i32, dataset: &Dataset, now: Instant) {
        self.slider.set(year);
        self.redraw(dataset, now);
    }

    pub fn set_indicator(&mut self, indicator: Indicator, dataset: &Dataset, now: Instant) {
        self.indicator = indicator;
        self.redraw(dataset, now);
    }

    pub fn redraw(&mut self, dataset: &Dataset, now: Instant) {
        let frame = layout(dataset, self.controls(), self.chart_size.x, self.chart_size.y);
        if let Err(err) = &frame.metrics {
            tracing::warn!("Map metrics unavailable: {}", err);
        }

        self.last_join = self.cells.join(frame.cells.clone(), TIMINGS, now);
        tracing::debug!(
            "Map redraw for {} / {}: {:?}",
            frame.year,
            frame.indicator.key(),
            self.last_join
        );
        self.frame = Some(frame);
    }

    fn controls_ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label("Year:");
            let mut year = self.slider.value();
            let slider = Slider::new(&mut year, self.slider.min..=self.slider.max)
                .step_by(f64::from(self.slider.step))
                .show_value(false);
            if ui.add(slider).changed() {
                self.set_year(year, &ctx.dataset, ctx.now);
            }
            ui.label(RichText::new(self.slider.value().to_string()).strong());

            ui.separator();
            ui.label("Indicator:");
            let mut indicator = self.indicator;
            ComboBox::from_id_source("map_indicator")
                .selected_text(indicator.label())
                .show_ui(ui, |ui| {
                    for option in Indicator::ALL {
                        ui.selectable_value(&mut indicator, option, option.label());
                    }
                });
            if indicator != self.indicator {
                self.set_indicator(indicator, &ctx.dataset, ctx.now);
            }
        });
    }

    fn grid_ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Vec<ViewAction> {
        let mut actions = Vec::new();
        let (response, painter) = ui.allocate_painter(self.chart_size, Sense::click());
        let origin = response.rect.min.to_vec2();
        let pointer = response.hover_pos();
        let mut hovered: Option<&Record> = None;

        for cell in self.cells.frame(ctx.now) {
            let rect = cell.attrs.rect.translate(origin);
            painter.rect(
                rect,
                Rounding::same(CORNER_RADIUS),
                cell.attrs.fill,
                Stroke::new(1.0, Color32::WHITE),
            );
            if pointer.is_some_and(|p| rect.contains(p)) {
                hovered = Some(cell.datum);
            }
        }

        if self.cells.is_empty() {
            if let Some(frame) = &self.frame {
                painter.text(
                    response.rect.center(),
                    egui::Align2::CENTER_CENTER,
                    format!("No data for {}", frame.year),
                    egui::FontId::proportional(16.0),
                    ui.visuals().weak_text_color(),
                );
            }
        }

        match hovered {
            Some(record) => {
                ctx.set_hovered(Some(HoveredRecord {
                    scene: Scene::Map,
                    country: record.country.clone(),
                }));
                if response.clicked() {
                    actions.push(ViewAction::ShowDetails(record.clone()));
                } else {
                    show_record_tooltip(ui, response.id.with("tooltip"), record);
                }
            }
            None if response.hovered() => ctx.set_hovered(None),
            None => {}
        }

        actions
    }

    fn metrics_ui(&self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.set_width(METRICS_PANEL_WIDTH - 20.0);
            ui.heading("Key Metrics");
            ui.add_space(8.0);

            match self.frame.as_ref().map(|frame| &frame.metrics) {
                Some(Ok(metrics)) => {
                    metric_row(ui, "Total Countries", metrics.total_countries.to_string());
                    metric_row(ui, "Avg GDP per Capita", format_currency(metrics.average_gdp));
                    metric_row(ui, "Highest Value", metrics.highest_country.clone());
                    metric_row(ui, "Regional Clusters", metrics.regional_clusters.to_string());
                }
                Some(Err(_)) | None => {
                    ui.label(RichText::new("No data").weak());
                }
            }
        });
    }
}

fn metric_row(ui: &mut Ui, label: &str, value: String) {
    ui.label(RichText::new(label).small().weak());
    ui.label(RichText::new(value).heading());
    ui.add_space(6.0);
}

impl SceneView for GridMapView {
    fn scene(&self) -> Scene {
        Scene::Map
    }

    fn initialize(&mut self, ctx: &ViewerContext) {
        let slider = ctx.default_slider();
        self.reset(slider, ctx.chart_height, &ctx.dataset, ctx.now);
        tracing::info!("Map view initialized at {}", self.year());
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Vec<ViewAction> {
        self.container_width = ui.available_width();
        self.controls_ui(ctx, ui);
        ui.add_space(8.0);

        let mut actions = Vec::new();
        ui.horizontal_top(|ui| {
            actions = self.grid_ui(ctx, ui);
            self.metrics_ui(ui);
        });
        actions
    }

    fn is_animating(&self, now: Instant) -> bool {
        self.cells.is_animating(now)
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
    use wv_data::{generate_seeded, COUNTRIES};

    #[test]
    fn test_grid_positions() {
        assert_eq!(grid_position(0), (0, 0));
        assert_eq!(grid_position(9), (0, 9));
        assert_eq!(grid_position(10), (1, 0));
        assert_eq!(grid_position(24), (2, 4));
    }

    #[test]
    fn test_layout_cells() {
        let dataset = generate_seeded(5);
        let frame = layout(&dataset, MapControls::new(2020), 1000.0, 600.0);

        assert_eq!(frame.cells.len(), COUNTRIES.len());
        let eleventh = &frame.cells[11].attrs.rect;
        assert_eq!(eleventh.min, egui::pos2(100.0, 120.0));
        assert_eq!(eleventh.size(), egui::vec2(95.0, 115.0));
        assert_eq!(frame.cells[0].key, "United States");
    }

    #[test]
    fn test_fill_follows_indicator() {
        let dataset = generate_seeded(5);
        let frame = layout(&dataset, MapControls::new(2020), 1000.0, 600.0);
        let records = filter_year(&dataset, 2020);
        let (lo, hi) = frame.color_domain.unwrap();

        let darkest = records.iter().position(|r| r.gdp_per_capita == hi).unwrap();
        let lightest = records.iter().position(|r| r.gdp_per_capita == lo).unwrap();
        assert_eq!(frame.cells[darkest].attrs.fill, sequential_blue(1.0));
        assert_eq!(frame.cells[lightest].attrs.fill, sequential_blue(0.0));
    }

    #[test]
    fn test_metrics_match_year() {
        let dataset = generate_seeded(5);
        let frame = layout(&dataset, MapControls::new(1990), 1000.0, 600.0);
        let metrics = frame.metrics.unwrap();

        assert_eq!(metrics.total_countries, 25);
        assert_eq!(metrics.regional_clusters, 6);
    }

    #[test]
    fn test_empty_year_has_no_metrics() {
        let frame = layout(&Dataset::default(), MapControls::new(2020), 1000.0, 600.0);
        assert!(frame.cells.is_empty());
        assert!(frame.metrics.is_err());
    }

    #[test]
    fn test_redraw_keeps_cells_keyed() {
        let dataset = generate_seeded(5);
        let start = Instant::now();
        let mut view = GridMapView::new();
        view.reset(YearSlider::default(), 600.0, &dataset, start);
        assert_eq!(view.last_join().entered, 25);

        view.set_indicator(Indicator::LiteracyRate, &dataset, start);
        assert_eq!(view.last_join(), JoinSummary { entered: 0, updated: 25, exited: 0 });
        assert!(view.is_animating(start + Duration::from_millis(100)));
        assert!(!view.is_animating(start + Duration::from_millis(500)));

        view.set_year(1960, &dataset, start);
        assert_eq!(view.year(), 1960);
        assert_eq!(view.cells().len(), 25);
    }
}
