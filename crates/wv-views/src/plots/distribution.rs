//! Distribution view: GDP per capita against a chosen indicator as bubbles
//!
//! Bubbles are keyed by country. Changing the year or indicator joins the new
//! records against the drawn bubbles, so countries glide between positions
//! instead of being redrawn.

use std::any::Any;
use std::time::{Duration, Instant};

use egui::{Align2, Color32, ComboBox, FontId, Pos2, RichText, Sense, Slider, Stroke, Ui};
use wv_core::controls::{DistributionControls, YearSlider};
use wv_core::model::{Dataset, Indicator, Record};
use wv_core::scene::Scene;
use wv_core::AnimationStep;
use wv_data::{extent, filter_year, max_by};

use super::utils::axis;
use super::utils::{
    format_number, format_si, legend_entries, region_fill, show_record_tooltip, JoinSummary,
    JoinTimings, MarkAttrs, MarkSet, MarkTarget, Scale, Transition, Tween,
};
use crate::scene_view::{ChartGeometry, SceneView, ViewAction};
use crate::{HoveredRecord, ViewerContext};

/// Fixed horizontal domain, GDP per capita in USD
pub const X_DOMAIN: (f64, f64) = (500.0, 100_000.0);

/// Bubble radius range in pixels
pub const RADIUS_RANGE: (f64, f64) = (5.0, 50.0);

pub const X_LABEL: &str = "GDP per Capita (USD, log scale)";

/// Container width assumed until the view has been laid out once
pub const DEFAULT_CONTAINER_WIDTH: f32 = 1130.0;

const TIMINGS: JoinTimings = JoinTimings {
    enter: Duration::from_millis(500),
    update: Duration::from_millis(500),
    exit: Some(Duration::from_millis(300)),
};

const AXIS_DURATION: Duration = Duration::from_millis(500);

/// Position and size of one bubble in plot-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleAttrs {
    pub center: Pos2,
    pub radius: f32,
}

impl Tween for BubbleAttrs {
    fn tween(&self, to: &Self, t: f32) -> Self {
        Self {
            center: self.center.tween(&to.center, t),
            radius: self.radius.tween(&to.radius, t),
        }
    }
}

impl MarkAttrs for BubbleAttrs {
    fn collapsed(&self) -> Self {
        Self {
            center: self.center,
            radius: 0.0,
        }
    }
}

/// Call-out for the record with the highest indicator value
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub country: String,
    pub headline: String,
    pub value: String,
    /// Bubble center in plot-local pixels
    pub anchor: Pos2,
}

/// Everything one redraw needs, computed without touching the UI
#[derive(Debug, Clone)]
pub struct DistributionFrame {
    pub year: i32,
    pub indicator: Indicator,
    pub x_scale: Scale,
    pub y_scale: Scale,
    pub size_scale: Scale,
    pub y_label: &'static str,
    pub marks: Vec<MarkTarget<BubbleAttrs, Record>>,
    pub annotation: Option<Annotation>,
}

/// Lay out the bubbles of one year
pub fn layout(
    dataset: &Dataset,
    controls: DistributionControls,
    geometry: &ChartGeometry,
) -> DistributionFrame {
    let records = filter_year(dataset, controls.year);
    let indicator = controls.indicator;

    let x_scale = Scale::log(X_DOMAIN, (0.0, f64::from(geometry.width())));
    let y_domain = indicator
        .distribution_domain()
        .or_else(|| extent(&records, indicator))
        .unwrap_or((0.0, 1.0));
    let y_scale = Scale::linear(y_domain, (f64::from(geometry.height()), 0.0));
    let size_domain = extent(&records, Indicator::Population).unwrap_or((0.0, 1.0));
    let size_scale = Scale::sqrt(size_domain, RADIUS_RANGE);

    let position = |record: &Record| {
        Pos2::new(
            x_scale.apply(record.gdp_per_capita) as f32,
            y_scale.apply(indicator.value(record)) as f32,
        )
    };

    let marks = records
        .iter()
        .map(|record| MarkTarget {
            key: record.country.clone(),
            attrs: BubbleAttrs {
                center: position(record),
                radius: size_scale.apply(record.population as f64) as f32,
            },
            datum: (*record).clone(),
        })
        .collect();

    // Infant mortality is "lower is better", so a highest call-out is left out
    let annotation = if indicator == Indicator::InfantMortality {
        None
    } else {
        max_by(&records, indicator).map(|record| Annotation {
            country: record.country.clone(),
            headline: format!("Highest {}", indicator.phrase()),
            value: format!("Value: {}", format_number(indicator.value(record))),
            anchor: position(record),
        })
    };

    DistributionFrame {
        year: controls.year,
        indicator,
        x_scale,
        y_scale,
        size_scale,
        y_label: indicator.label(),
        marks,
        annotation,
    }
}

/// The bubble chart scene
pub struct DistributionView {
    slider: YearSlider,
    indicator: Indicator,
    container_width: f32,
    geometry: ChartGeometry,
    marks: MarkSet<BubbleAttrs, Record>,
    y_domain: Option<Transition<(f64, f64)>>,
    frame: Option<DistributionFrame>,
    initialized: bool,
    initializations: usize,
    redraws: usize,
    last_join: JoinSummary,
}

impl Default for DistributionView {
    fn default() -> Self {
        Self::new()
    }
}

impl DistributionView {
    pub fn new() -> Self {
        Self {
            slider: YearSlider::default(),
            indicator: Indicator::LifeExpectancy,
            container_width: DEFAULT_CONTAINER_WIDTH,
            geometry: ChartGeometry::new(DEFAULT_CONTAINER_WIDTH, 600.0),
            marks: MarkSet::new(),
            y_domain: None,
            frame: None,
            initialized: false,
            initializations: 0,
            redraws: 0,
            last_join: JoinSummary::default(),
        }
    }

    /// Snapshot of the controls handed to each redraw
    pub fn controls(&self) -> DistributionControls {
        DistributionControls {
            year: self.slider.value(),
            indicator: self.indicator,
        }
    }

    pub fn slider(&self) -> &YearSlider {
        &self.slider
    }

    pub fn year(&self) -> i32 {
        self.slider.value()
    }

    pub fn indicator(&self) -> Indicator {
        self.indicator
    }

    pub fn marks(&self) -> &MarkSet<BubbleAttrs, Record> {
        &self.marks
    }

    pub fn frame(&self) -> Option<&DistributionFrame> {
        self.frame.as_ref()
    }

    pub fn initializations(&self) -> usize {
        self.initializations
    }

    pub fn redraws(&self) -> usize {
        self.redraws
    }

    pub fn last_join(&self) -> JoinSummary {
        self.last_join
    }

    /// Reset controls and marks, capture the chart size and draw once
    pub fn reset(&mut self, slider: YearSlider, chart_height: f32, dataset: &Dataset, now: Instant) {
        self.slider = slider;
        self.indicator = Indicator::LifeExpectancy;
        self.geometry = ChartGeometry::new(self.container_width, chart_height);
        self.marks.clear();
        self.y_domain = None;
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

    /// Move the slider to the animated year and redraw
    pub fn apply_animation_step(&mut self, step: AnimationStep, dataset: &Dataset, now: Instant) {
        self.set_year(step.year, dataset, now);
    }

    pub fn redraw(&mut self, dataset: &Dataset, now: Instant) {
        let frame = layout(dataset, self.controls(), &self.geometry);

        let target = frame.y_scale.domain();
        match self.y_domain.as_mut() {
            Some(domain) => domain.retarget(target, now, AXIS_DURATION),
            None => self.y_domain = Some(Transition::settled(target, now)),
        }

        if frame.marks.is_empty() {
            tracing::warn!("No records for {}", frame.year);
        }

        self.last_join = self.marks.join(frame.marks.clone(), TIMINGS, now);
        self.redraws += 1;
        tracing::debug!(
            "Distribution redraw for {} / {}: {:?}",
            frame.year,
            frame.indicator.key(),
            self.last_join
        );

        self.frame = Some(frame);
    }

    fn controls_ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Vec<ViewAction> {
        let mut actions = Vec::new();

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
            ComboBox::from_id_source("distribution_indicator")
                .selected_text(indicator.label())
                .show_ui(ui, |ui| {
                    for option in Indicator::DISTRIBUTION {
                        ui.selectable_value(&mut indicator, option, option.label());
                    }
                });
            if indicator != self.indicator {
                self.set_indicator(indicator, &ctx.dataset, ctx.now);
            }

            ui.separator();
            let play = ui.add_enabled(!ctx.animation_running, egui::Button::new(ctx.trigger_label));
            if play.clicked() {
                actions.push(ViewAction::PlayRequested);
            }
        });

        actions
    }

    fn chart_ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) {
        self.container_width = ui.available_width();
        let size = egui::vec2(self.geometry.outer_width.max(ui.available_width()), self.geometry.outer_height);
        let (response, painter) = ui.allocate_painter(size, Sense::hover());
        let plot = self.geometry.plot_rect(response.rect.min);
        let text_color = ui.visuals().text_color();

        let Some(frame) = &self.frame else {
            return;
        };

        let x_ticks = axis::ticks(&frame.x_scale, 10, |v| format_si(v, 1));
        axis::paint_bottom_axis(&painter, plot, &x_ticks, text_color);

        let y_domain = self
            .y_domain
            .as_ref()
            .map(|d| d.value_at(ctx.now))
            .unwrap_or_else(|| frame.y_scale.domain());
        let y_scale = frame.y_scale.with_domain(y_domain);
        let y_ticks = axis::ticks(&y_scale, 10, format_number);
        axis::paint_left_axis(&painter, plot, &y_ticks, text_color);
        axis::paint_axis_titles(&painter, plot, X_LABEL, frame.y_label, text_color);

        let pointer = response.hover_pos();
        let mut hovered: Option<&Record> = None;

        for mark in self.marks.frame(ctx.now) {
            let center = plot.min + mark.attrs.center.to_vec2();
            painter.circle(
                center,
                mark.attrs.radius,
                region_fill(mark.datum.region),
                Stroke::new(2.0, Color32::WHITE),
            );
            if !mark.exiting
                && pointer.is_some_and(|p| p.distance(center) <= mark.attrs.radius)
            {
                hovered = Some(mark.datum);
            }
        }

        if let Some(annotation) = &frame.annotation {
            let anchor = plot.min + annotation.anchor.to_vec2() + egui::vec2(12.0, 12.0);
            let text = format!("{}\n{}\n{}", annotation.country, annotation.headline, annotation.value);
            painter.text(anchor, Align2::LEFT_TOP, text, FontId::proportional(12.0), text_color);
        }

        for (i, (name, color)) in legend_entries().into_iter().enumerate() {
            let row = Pos2::new(plot.right() - 110.0, plot.top() + 10.0 + i as f32 * 20.0);
            painter.circle_filled(row, 6.0, color);
            painter.text(row + egui::vec2(12.0, 0.0), Align2::LEFT_CENTER, name, FontId::proportional(12.0), text_color);
        }

        if frame.marks.is_empty() {
            painter.text(
                plot.center(),
                Align2::CENTER_CENTER,
                format!("No data for {}", frame.year),
                FontId::proportional(16.0),
                ui.visuals().weak_text_color(),
            );
        }

        match hovered {
            Some(record) => {
                ctx.set_hovered(Some(HoveredRecord {
                    scene: Scene::Distribution,
                    country: record.country.clone(),
                }));
                show_record_tooltip(ui, response.id.with("tooltip"), record);
            }
            None if response.hovered() => ctx.set_hovered(None),
            None => {}
        }
    }
}

impl SceneView for DistributionView {
    fn scene(&self) -> Scene {
        Scene::Distribution
    }

    fn initialize(&mut self, ctx: &ViewerContext) {
        let slider = ctx.default_slider();
        self.reset(slider, ctx.chart_height, &ctx.dataset, ctx.now);
        tracing::info!("Distribution view initialized at {}", self.year());
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn ui(&mut self, ctx: &ViewerContext, ui: &mut Ui) -> Vec<ViewAction> {
        let actions = self.controls_ui(ctx, ui);
        ui.add_space(8.0);
        self.chart_ui(ctx, ui);
        actions
    }

    fn is_animating(&self, now: Instant) -> bool {
        self.marks.is_animating(now) || self.y_domain.as_ref().is_some_and(|d| !d.is_done(now))
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
    use wv_data::{generate_seeded, COUNTRIES};

    fn geometry() -> ChartGeometry {
        ChartGeometry::new(DEFAULT_CONTAINER_WIDTH, 600.0)
    }

    fn record(country: &str, year: i32, gdp: f64, population: u64) -> Record {
        Record {
            country: country.to_string(),
            region: Region::Asia,
            code: "XXX".to_string(),
            year,
            gdp_per_capita: gdp,
            population,
            life_expectancy: 60.0,
            literacy_rate: 70.0,
            infant_mortality: 30.0,
        }
    }

    #[test]
    fn test_layout_one_bubble_per_country() {
        let dataset = generate_seeded(3);
        let frame = layout(&dataset, DistributionControls::new(2020), &geometry());

        assert_eq!(frame.marks.len(), COUNTRIES.len());
        assert_eq!(frame.y_scale.domain(), (30.0, 85.0));
        assert_eq!(frame.y_label, "Life Expectancy (years)");
        for mark in &frame.marks {
            assert!(mark.attrs.radius >= 5.0 - 1e-3 && mark.attrs.radius <= 50.0 + 1e-3);
        }
    }

    #[test]
    fn test_layout_scales() {
        let dataset = Dataset::new(vec![
            record("A", 2000, 500.0, 1_000_000),
            record("B", 2000, 100_000.0, 4_000_000),
        ]);
        let frame = layout(&dataset, DistributionControls::new(2000), &geometry());

        let a = &frame.marks[0].attrs;
        let b = &frame.marks[1].attrs;
        assert!(a.center.x.abs() < 1e-3);
        assert!((b.center.x - 1000.0).abs() < 1e-3);
        assert!((a.radius - 5.0).abs() < 1e-3);
        assert!((b.radius - 50.0).abs() < 1e-3);
        // life expectancy 60 on [30, 85] mapped to [500, 0]
        assert!((a.center.y - 500.0 * 25.0 / 55.0).abs() < 1e-2);
    }

    #[test]
    fn test_x_axis_is_labelled_log() {
        let dataset = Dataset::new(vec![record("A", 2000, 500.0, 1_000_000)]);
        let frame = layout(&dataset, DistributionControls::new(2000), &geometry());

        assert_eq!(X_LABEL, "GDP per Capita (USD, log scale)");
        // geometric midpoint of the domain sits at half the plot width
        let mid = frame.x_scale.apply((500.0_f64 * 100_000.0).sqrt());
        assert!((mid - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_annotation_highlights_highest_value() {
        let dataset = generate_seeded(9);
        let mut controls = DistributionControls::new(2010);
        controls.indicator = Indicator::LiteracyRate;
        let frame = layout(&dataset, controls, &geometry());

        let records = filter_year(&dataset, 2010);
        let best = max_by(&records, Indicator::LiteracyRate).unwrap();
        let annotation = frame.annotation.unwrap();
        assert_eq!(annotation.country, best.country);
        assert_eq!(annotation.headline, "Highest literacy rate");
        assert_eq!(annotation.value, format!("Value: {}", best.literacy_rate));
    }

    #[test]
    fn test_no_annotation_for_infant_mortality() {
        let dataset = generate_seeded(9);
        let mut controls = DistributionControls::new(2010);
        controls.indicator = Indicator::InfantMortality;
        let frame = layout(&dataset, controls, &geometry());

        assert!(frame.annotation.is_none());
        assert_eq!(frame.y_scale.domain(), (0.0, 150.0));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let dataset = generate_seeded(1);
        let start = Instant::now();
        let mut view = DistributionView::new();

        view.reset(YearSlider::default(), 600.0, &dataset, start);
        view.set_year(1975, &dataset, start);
        view.set_indicator(Indicator::LiteracyRate, &dataset, start);
        assert_eq!(view.year(), 1975);

        view.reset(YearSlider::default(), 600.0, &dataset, start);
        assert_eq!(view.year(), 2020);
        assert_eq!(view.indicator(), Indicator::LifeExpectancy);
        assert_eq!(view.initializations(), 2);
        assert_eq!(view.last_join().entered, COUNTRIES.len());
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let dataset = generate_seeded(2);
        let start = Instant::now();
        let mut view = DistributionView::new();
        view.reset(YearSlider::default(), 600.0, &dataset, start);

        view.redraw(&dataset, start + Duration::from_secs(1));
        let keys: Vec<String> = view.marks().keys().into_iter().map(String::from).collect();
        view.redraw(&dataset, start + Duration::from_secs(2));

        assert_eq!(view.last_join(), JoinSummary { entered: 0, updated: 25, exited: 0 });
        let again: Vec<String> = view.marks().keys().into_iter().map(String::from).collect();
        assert_eq!(keys, again);
        assert_eq!(view.marks().len(), COUNTRIES.len());
    }

    #[test]
    fn test_missing_country_exits() {
        let dataset = Dataset::new(vec![
            record("A", 2015, 1000.0, 1_000_000),
            record("B", 2015, 2000.0, 2_000_000),
            record("A", 2020, 1500.0, 1_100_000),
        ]);
        let start = Instant::now();
        let mut view = DistributionView::new();
        view.reset(YearSlider::default(), 600.0, &dataset, start);
        assert_eq!(view.marks().keys(), vec!["A"]);

        view.set_year(2015, &dataset, start + Duration::from_secs(1));
        assert_eq!(view.last_join(), JoinSummary { entered: 1, updated: 1, exited: 0 });

        let later = start + Duration::from_secs(2);
        view.set_year(2020, &dataset, later);
        assert_eq!(view.last_join().exited, 1);
        assert!(view.is_animating(later));
        assert!(!view.is_animating(later + Duration::from_secs(1)));
    }

    #[test]
    fn test_animation_step_moves_slider() {
        let dataset = generate_seeded(4);
        let start = Instant::now();
        let mut view = DistributionView::new();
        view.reset(YearSlider::default(), 600.0, &dataset, start);

        view.apply_animation_step(AnimationStep { year: 1960, finished: false }, &dataset, start);
        assert_eq!(view.year(), 1960);
        assert_eq!(view.frame().unwrap().year, 1960);
        assert_eq!(view.redraws(), 2);
    }

    #[test]
    fn test_empty_dataset_renders_empty_frame() {
        let start = Instant::now();
        let mut view = DistributionView::new();
        view.reset(YearSlider::default(), 600.0, &Dataset::default(), start);

        let frame = view.frame().unwrap();
        assert!(frame.marks.is_empty());
        assert!(frame.annotation.is_none());
        assert!(view.marks().is_empty());
    }
}
