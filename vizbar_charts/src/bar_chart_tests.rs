// Copyright 2025 the VizBar Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use kurbo::{Size, Vec2};
use proptest::prelude::*;
use vizbar_dom::{Bound, Document, DomError, ElementId, JoinCounts, Selector, Tag};

use crate::{
    BarChart, BarChartConfig, ChartError, ConfigError, DatasetError, Entry, Margin,
    RenderReport,
};

const LETTERS: [(&str, f64); 26] = [
    ("A", 0.08167),
    ("B", 0.01492),
    ("C", 0.02782),
    ("D", 0.04253),
    ("E", 0.12702),
    ("F", 0.02288),
    ("G", 0.02015),
    ("H", 0.06094),
    ("I", 0.06966),
    ("J", 0.00153),
    ("K", 0.00772),
    ("L", 0.04025),
    ("M", 0.02406),
    ("N", 0.06749),
    ("O", 0.07507),
    ("P", 0.01929),
    ("Q", 0.00095),
    ("R", 0.05987),
    ("S", 0.06327),
    ("T", 0.09056),
    ("U", 0.02758),
    ("V", 0.00978),
    ("W", 0.02360),
    ("X", 0.00150),
    ("Y", 0.01974),
    ("Z", 0.00074),
];

fn letters() -> Vec<Entry> {
    LETTERS.iter().map(|(k, v)| Entry::new(*k, *v)).collect()
}

fn setup() -> (Document, ElementId) {
    let mut doc = Document::new();
    let container = doc.append(doc.root(), Tag::Div).unwrap();
    (doc, container)
}

fn render_one(
    chart: &mut BarChart,
    doc: &mut Document,
    container: ElementId,
    data: Vec<Entry>,
) -> Result<RenderReport, ChartError> {
    let mut outcomes = chart.render(doc, &Bound::datum([container], data));
    assert_eq!(outcomes.len(), 1);
    outcomes.remove(0).result
}

fn count(doc: &Document, scope: ElementId, selector: &str) -> usize {
    doc.select_all(scope, &Selector::parse(selector).unwrap())
        .len()
}

fn bars(doc: &Document, container: ElementId) -> Vec<ElementId> {
    doc.select_all(container, &Selector::parse("rect.bar").unwrap())
}

fn attr(doc: &Document, id: ElementId, name: &str) -> f64 {
    doc.element(id).unwrap().attr_f64(name).unwrap()
}

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() <= 1e-9, "{a} != {b}");
}

#[test]
fn letters_render_once() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();
    assert!(!chart.is_rendered());

    let report = render_one(&mut chart, &mut doc, container, letters()).unwrap();
    assert!(report.created);
    assert_eq!(report.drawable, Size::new(900.0, 450.0));
    assert_eq!(
        report.bars,
        JoinCounts {
            entered: 26,
            updated: 0,
            exited: 0
        }
    );
    assert!(chart.is_rendered());

    assert_eq!(count(&doc, container, "svg.bar-chart"), 1);
    assert_eq!(count(&doc, container, "g.container-group"), 1);
    assert_eq!(count(&doc, container, "g.chart-group"), 1);
    assert_eq!(count(&doc, container, "g.x-axis-group.axis"), 1);
    assert_eq!(count(&doc, container, "g.y-axis-group.axis"), 1);
    assert_eq!(bars(&doc, container).len(), 26);

    let surface = chart.surface(container).unwrap();
    // 26 key ticks plus the domain path; the y axis runs 0% to 12%.
    assert_eq!(doc.children(surface.x_axis_group).unwrap().len(), 27);
    assert_eq!(doc.children(surface.y_axis_group).unwrap().len(), 14);
    let x_axis = doc.element(surface.x_axis_group).unwrap();
    assert_eq!(
        x_axis.attr("transform").and_then(|v| v.as_translate()),
        Some(Vec2::new(0.0, 450.0))
    );

    // Freshly entered bars sit at the right edge with their final height.
    let tallest = bars(&doc, container)[4];
    assert_eq!(attr(&doc, tallest, "x"), 900.0);
    assert_eq!(attr(&doc, tallest, "y"), 0.0);
    assert_eq!(attr(&doc, tallest, "height"), 450.0);
    assert_close(attr(&doc, tallest, "width"), 30.38);

    let svg = doc.element(surface.svg).unwrap();
    assert_eq!(svg.attr_f64("width"), Some(1020.0));
    assert_eq!(svg.attr_f64("height"), Some(550.0));

    let markup = doc.to_svg_string(container).unwrap();
    assert!(markup.contains(" class=\"bar-chart\""));
    assert!(markup.contains(">12%</text>"));
}

#[test]
fn second_render_moves_bars_into_their_bands() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();
    render_one(&mut chart, &mut doc, container, letters()).unwrap();
    let report = render_one(&mut chart, &mut doc, container, letters()).unwrap();
    assert!(!report.created);
    assert_eq!(report.bars.updated, 26);

    let (x, _) = chart.scales(container).unwrap();
    assert_eq!(x.step(), 34.0);
    assert_eq!(x.band_width(), 31.0);
    let ids = bars(&doc, container);
    assert_close(attr(&doc, ids[0], "x"), 10.31);
    assert_close(attr(&doc, ids[25], "x"), 10.0 + 25.0 * 34.0 + 0.31);
}

#[test]
fn subset_rerender_drops_to_five_bars() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();
    render_one(&mut chart, &mut doc, container, letters()).unwrap();
    let before = bars(&doc, container);

    let subset: Vec<Entry> = letters().into_iter().take(5).collect();
    let report = render_one(&mut chart, &mut doc, container, subset.clone()).unwrap();
    assert_eq!(
        report.bars,
        JoinCounts {
            entered: 0,
            updated: 5,
            exited: 21
        }
    );

    let after = bars(&doc, container);
    assert_eq!(after, before[..5]);

    let (x, y) = chart.scales(container).unwrap();
    assert_eq!(x.domain().len(), 5);
    let gap = x.band_width() * 2.0 / 100.0;
    for (entry, id) in subset.iter().zip(&after) {
        let band = x.map(&entry.key).unwrap();
        assert_close(attr(&doc, *id, "x"), band + gap / 2.0);
        assert_close(attr(&doc, *id, "width"), x.band_width() - gap);
        assert_close(attr(&doc, *id, "y"), y.map(entry.value));
        assert_close(attr(&doc, *id, "height"), 450.0 - y.map(entry.value));
    }

    let surface = chart.surface(container).unwrap();
    assert_eq!(doc.children(surface.x_axis_group).unwrap().len(), 6);
}

#[test]
fn uniform_margin_grows_the_drawable_area() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();
    render_one(&mut chart, &mut doc, container, letters()).unwrap();

    chart.set_margin(Margin::uniform(4.0));
    let report = render_one(&mut chart, &mut doc, container, letters()).unwrap();
    assert_eq!(report.drawable, Size::new(952.0, 492.0));

    let surface = chart.surface(container).unwrap();
    let wrapper = doc.element(surface.container_group).unwrap();
    assert_eq!(
        wrapper.attr("transform").and_then(|v| v.as_translate()),
        Some(Vec2::new(4.0, 4.0))
    );
    let x_axis = doc.element(surface.x_axis_group).unwrap();
    assert_eq!(
        x_axis.attr("transform").and_then(|v| v.as_translate()),
        Some(Vec2::new(0.0, 492.0))
    );

    // The surface size animates towards its new value.
    assert_eq!(doc.pending_transitions(), 2);
    doc.advance(125.0);
    let half = attr(&doc, surface.svg, "width");
    assert!(half < 1020.0 && half > 968.0, "{half}");
    doc.settle();
    assert_eq!(attr(&doc, surface.svg, "width"), 968.0);
    assert_eq!(attr(&doc, surface.svg, "height"), 508.0);

    let (x, y) = chart.scales(container).unwrap();
    assert_eq!(x.range_extent(), (0.0, 952.0));
    assert_eq!(y.range(), (492.0, 0.0));
    let tallest = bars(&doc, container)[4];
    assert_eq!(attr(&doc, tallest, "height"), 492.0);
}

#[test]
fn rendering_is_structurally_idempotent() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();
    let subset: Vec<Entry> = letters().into_iter().take(5).collect();
    let datasets = [
        letters(),
        subset.clone(),
        Vec::new(),
        letters(),
        Vec::new(),
        subset,
    ];
    for data in datasets {
        let expected = data.len();
        render_one(&mut chart, &mut doc, container, data).unwrap();
        assert_eq!(doc.children(container).unwrap().len(), 1);
        assert_eq!(count(&doc, container, "svg.bar-chart"), 1);
        assert_eq!(count(&doc, container, "g.container-group"), 1);
        assert_eq!(count(&doc, container, "g.chart-group"), 1);
        assert_eq!(count(&doc, container, "g.x-axis-group.axis"), 1);
        assert_eq!(count(&doc, container, "g.y-axis-group.axis"), 1);
        assert_eq!(count(&doc, container, "path.domain"), 2);
        assert_eq!(bars(&doc, container).len(), expected);
    }
}

#[test]
fn accessors_round_trip_and_chain() {
    let mut chart = BarChart::new();
    assert_eq!(chart.margin(), Margin::default());
    assert_eq!(chart.width(), 960.0);
    assert_eq!(chart.height(), 500.0);
    assert_eq!(chart.gap(), 2.0);

    let margin = Margin {
        top: 1.0,
        right: 2.0,
        bottom: 3.0,
        left: 4.0,
    };
    chart
        .set_margin(margin)
        .set_width(640.0)
        .set_height(480.0)
        .set_gap(10.0)
        .set_transition_ms(0.0);
    assert_eq!(chart.margin(), margin);
    assert_eq!(chart.width(), 640.0);
    assert_eq!(chart.height(), 480.0);
    assert_eq!(chart.gap(), 10.0);
    assert_eq!(chart.transition_ms(), 0.0);

    // Writes are not validated.
    chart.set_gap(-5.0);
    assert_eq!(chart.gap(), -5.0);

    let copy = BarChart::with_config(*chart.config());
    assert_eq!(copy.config(), chart.config());
    assert!(!copy.is_rendered());
}

#[test]
fn zero_transition_resizes_immediately() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();
    chart.set_transition_ms(0.0);
    render_one(&mut chart, &mut doc, container, letters()).unwrap();
    chart.set_width(500.0);
    render_one(&mut chart, &mut doc, container, letters()).unwrap();
    let svg = chart.surface(container).unwrap().svg;
    assert_eq!(doc.pending_transitions(), 0);
    assert_eq!(attr(&doc, svg, "width"), 560.0);
}

#[test]
fn invalid_settings_and_data_are_reported() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();

    chart.set_width(50.0);
    assert_eq!(
        render_one(&mut chart, &mut doc, container, letters()),
        Err(ChartError::InvalidConfiguration(
            ConfigError::NegativeDrawableArea {
                width: -10.0,
                height: 450.0
            }
        ))
    );
    chart.set_width(960.0).set_gap(150.0);
    assert_eq!(
        render_one(&mut chart, &mut doc, container, letters()),
        Err(ChartError::InvalidConfiguration(ConfigError::GapOutOfRange(
            150.0
        )))
    );
    chart.set_gap(2.0);

    let negative = vec![Entry::new("A", 0.5), Entry::new("B", -0.1)];
    assert!(matches!(
        render_one(&mut chart, &mut doc, container, negative),
        Err(ChartError::InvalidDataset(DatasetError::NegativeValue {
            index: 1,
            ..
        }))
    ));
    let duplicate = vec![Entry::new("A", 0.5), Entry::new("A", 0.1)];
    assert!(matches!(
        render_one(&mut chart, &mut doc, container, duplicate),
        Err(ChartError::InvalidDataset(DatasetError::DuplicateKey { .. }))
    ));
    assert_eq!(
        render_one(&mut chart, &mut doc, ElementId(4040), letters()),
        Err(ChartError::Dom(DomError::UnknownElement(ElementId(4040))))
    );

    // Nothing was drawn by the failed attempts.
    assert!(!chart.is_rendered());
    assert!(doc.children(container).unwrap().is_empty());
}

#[test]
fn a_failing_container_does_not_stop_the_others() {
    let mut doc = Document::new();
    let first = doc.append(doc.root(), Tag::Div).unwrap();
    let second = doc.append(doc.root(), Tag::Div).unwrap();
    let mut chart = BarChart::new();
    render_one(&mut chart, &mut doc, first, letters()).unwrap();

    let mut selection = Bound::new();
    selection
        .push(first, vec![Entry::new("A", f64::NAN)])
        .push(second, letters());
    let outcomes = chart.render(&mut doc, &selection);

    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].container, first);
    assert!(matches!(
        outcomes[0].result,
        Err(ChartError::InvalidDataset(DatasetError::NonFiniteValue { .. }))
    ));
    assert!(outcomes[1].result.is_ok());

    // The failed container keeps its last good render.
    assert_eq!(chart.scales(first).unwrap().0.domain().len(), 26);
    assert_eq!(bars(&doc, first).len(), 26);
    assert_eq!(bars(&doc, second).len(), 26);
}

#[test]
fn containers_keep_separate_state() {
    let mut doc = Document::new();
    let left = doc.append(doc.root(), Tag::Div).unwrap();
    let right = doc.append(doc.root(), Tag::Div).unwrap();
    let mut chart = BarChart::new();

    let mut selection = Bound::new();
    selection
        .push(left, letters())
        .push(right, letters()[..3].to_vec());
    let outcomes = chart.render(&mut doc, &selection);
    assert!(outcomes.iter().all(|o| o.result.is_ok()));

    assert_ne!(chart.surface(left), chart.surface(right));
    assert_eq!(chart.scales(left).unwrap().0.domain().len(), 26);
    assert_eq!(chart.scales(right).unwrap().0.domain().len(), 3);
    assert_eq!(bars(&doc, left).len(), 26);
    assert_eq!(bars(&doc, right).len(), 3);

    let report = render_one(&mut chart, &mut doc, right, letters()[..7].to_vec()).unwrap();
    assert_eq!(
        report.bars,
        JoinCounts {
            entered: 4,
            updated: 3,
            exited: 0
        }
    );
    assert_eq!(bars(&doc, left).len(), 26);

    assert!(chart.forget(left));
    assert!(!chart.forget(left));
    assert!(chart.scales(left).is_none());
    assert!(chart.is_rendered());
}

#[test]
fn empty_selection_renders_nothing() {
    let mut doc = Document::new();
    let mut chart = BarChart::new();
    let outcomes = chart.render(&mut doc, &Bound::<Vec<Entry>>::new());
    assert!(outcomes.is_empty());
    assert!(!chart.is_rendered());
    assert_eq!(doc.len(), 1);
}

#[test]
fn externally_removed_surface_is_rebuilt() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();
    render_one(&mut chart, &mut doc, container, letters()).unwrap();
    let old = chart.surface(container).unwrap();
    doc.remove(old.svg).unwrap();

    let report = render_one(&mut chart, &mut doc, container, letters()).unwrap();
    assert!(report.created);
    assert_eq!(report.bars.entered, 26);
    assert_eq!(count(&doc, container, "svg.bar-chart"), 1);
}

#[test]
fn surface_is_found_by_a_fresh_chart() {
    let (mut doc, container) = setup();
    render_one(&mut BarChart::new(), &mut doc, container, letters()).unwrap();

    let mut other = BarChart::new();
    let report = render_one(&mut other, &mut doc, container, letters()).unwrap();
    assert!(!report.created);
    assert_eq!(report.bars.updated, 26);
    assert_eq!(count(&doc, container, "svg.bar-chart"), 1);
}

#[test]
fn zero_values_collapse_to_the_baseline() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();
    let data = vec![Entry::new("a", 0.0), Entry::new("b", 0.0)];
    render_one(&mut chart, &mut doc, container, data).unwrap();
    for id in bars(&doc, container) {
        assert_eq!(attr(&doc, id, "y"), 450.0);
        assert_eq!(attr(&doc, id, "height"), 0.0);
    }
}

#[test]
fn empty_dataset_clears_the_bars() {
    let (mut doc, container) = setup();
    let mut chart = BarChart::new();
    render_one(&mut chart, &mut doc, container, letters()).unwrap();
    let report = render_one(&mut chart, &mut doc, container, Vec::new()).unwrap();
    assert_eq!(report.bars.exited, 26);
    assert!(bars(&doc, container).is_empty());
    let x_axis = chart.surface(container).unwrap().x_axis_group;
    assert_eq!(count(&doc, x_axis, "g.tick"), 0);
}

fn dataset(values: &[f64]) -> Vec<Entry> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| Entry::new(format!("k{i}"), *v))
        .collect()
}

proptest! {
    #[test]
    fn bar_count_matches_the_dataset(
        first in proptest::collection::vec(0.0f64..1.0, 0..40),
        second in proptest::collection::vec(0.0f64..1.0, 0..40),
    ) {
        let (mut doc, container) = setup();
        let mut chart = BarChart::new();
        render_one(&mut chart, &mut doc, container, dataset(&first)).unwrap();
        prop_assert_eq!(bars(&doc, container).len(), first.len());

        let report = render_one(&mut chart, &mut doc, container, dataset(&second)).unwrap();
        prop_assert_eq!(bars(&doc, container).len(), second.len());
        prop_assert_eq!(report.bars.entered, second.len().saturating_sub(first.len()));
        prop_assert_eq!(report.bars.exited, first.len().saturating_sub(second.len()));
    }

    #[test]
    fn bars_fit_the_drawable_area(
        values in proptest::collection::vec(0.0f64..1000.0, 1..60),
        width in 60.0f64..2000.0,
        height in 50.0f64..1000.0,
        gap in 0.0f64..=100.0,
    ) {
        let (mut doc, container) = setup();
        let mut chart = BarChart::with_config(BarChartConfig {
            width,
            height,
            gap,
            ..BarChartConfig::default()
        });
        let report = render_one(&mut chart, &mut doc, container, dataset(&values)).unwrap();
        let drawable = report.drawable;
        let (x, y) = chart.scales(container).unwrap();

        let ids = bars(&doc, container);
        let bar_width = attr(&doc, ids[0], "width");
        let gap_size = x.band_width() * gap / 100.0;
        prop_assert!(values.len() as f64 * (bar_width + gap_size) <= drawable.width + 1e-9);

        for (value, id) in values.iter().zip(&ids) {
            let bar_height = attr(&doc, *id, "height");
            prop_assert!(bar_height >= 0.0);
            prop_assert!((bar_height + y.map(*value) - drawable.height).abs() <= 1e-9);
        }
    }
}
