use super::*;
use crate::foundation::color::{COALITION_TINT_ALPHA, Rgb8};
use crate::layout::transition::TransitionTarget;
use crate::timeline::index::year_coordinate;
use chrono::NaiveDate;
use serde_json::json;

fn clock() -> TimelineClock {
    TimelineClock::at_date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())
}

fn currents() -> CurrentsFile {
    serde_json::from_value(json!({
        "families": [{ "currents": [
            { "name": "Communisme", "color": "#dd0000", "parties": [{ "name": "PCF" }] },
            { "name": "Socialisme", "color": "#ff8080", "parties": [{ "name": "SFIO" }, { "name": "PS" }] },
            { "name": "Gaullisme", "color": "#0000aa", "parties": [{ "name": "UNR" }, { "name": "RPR" }] }
        ]}]
    }))
    .unwrap()
}

fn republics() -> RepublicsFile {
    serde_json::from_value(json!({
        "republics": [
            { "name": "IVe", "legislatures": [
                { "legislature": 1, "begin": "1951-01-01", "end": "1956-01-01", "total_deputes": 400,
                  "parties": [
                    { "name": "PCF", "deputes": 100 },
                    { "name": "SFIO", "deputes": 100, "coalition": "Front" },
                    { "name": "UNR", "deputes": 200 }
                  ] }
            ] },
            { "name": "Ve", "legislatures": [
                { "legislature": 1, "begin": "1958-01-01", "end": "1962-01-01", "total_deputes": 420,
                  "parties": [
                    { "name": "PCF", "deputes": 50 },
                    { "name": "PS", "deputes": 150, "coalition": "Majorité" },
                    { "name": "UNR", "deputes": 200, "coalition": "Majorité" }
                  ] },
                { "legislature": 2, "begin": "1962-01-01", "end": "now", "total_deputes": 410,
                  "parties": [
                    { "name": "PS", "deputes": 100 },
                    { "name": "RPR", "deputes": 300 },
                    { "name": "XYZ", "deputes": 10 }
                  ] }
            ] }
        ]
    }))
    .unwrap()
}

fn data() -> ChartData {
    ChartData::prepare(&republics(), &currents(), clock()).unwrap()
}

fn options(transitions_visible: bool) -> LayoutOptions {
    LayoutOptions {
        graph_width: 400.0,
        row_height: 10.0,
        transitions_visible,
    }
}

fn coord(raw: &str) -> f64 {
    year_coordinate(raw, &clock()).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn prepare_records_gaps_and_extent() {
    let data = data();
    assert_eq!(data.republics().len(), 2);
    assert_eq!(data.registry().len(), 3);
    assert_eq!(
        data.resolution_gaps(),
        [ResolutionGap {
            republic: "Ve".to_string(),
            legislature: 2,
            party: "XYZ".to_string(),
        }]
    );
    let (lo, hi) = data.timeline_extent();
    assert!(close(lo, coord("1951-01-01")));
    assert!(close(hi, coord("now")));
    assert!(close(hi, coord("2020-01-01") + 2.0));
}

#[test]
fn prepare_rejects_malformed_dates() {
    let mut file = republics();
    file.republics[1].legislatures[0].end = "1962-31-01".to_string();
    assert!(ChartData::prepare(&file, &currents(), clock()).is_err());
}

#[test]
fn blank_party_name_becomes_a_resolution_gap() {
    let mut file = republics();
    file.republics[1].legislatures[0].parties[0].name = "  ".to_string();
    let data = ChartData::prepare(&file, &currents(), clock()).unwrap();

    assert!(data.resolution_gaps().contains(&ResolutionGap {
        republic: "Ve".to_string(),
        legislature: 1,
        party: String::new(),
    }));
    let ve = &data.republics()[1].legislatures[0];
    let names: Vec<&str> = ve.parties.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["PS", "UNR"]);
    compute_chart_layout(&data, &data.all_visible(), &options(true)).unwrap();
}

#[test]
fn reversed_range_is_drawn_with_zero_height() {
    let mut file = republics();
    file.republics[1].legislatures[1].end = "1961-01-01".to_string();
    let data = ChartData::prepare(&file, &currents(), clock()).unwrap();

    let (lo, hi) = data.timeline_extent();
    assert!(close(lo, coord("1951-01-01")));
    assert!(close(hi, coord("1962-01-01")));

    let layout = compute_chart_layout(&data, &data.all_visible(), &options(true)).unwrap();
    let last: Vec<&Bar> = layout
        .bars
        .iter()
        .filter(|b| b.legislature.republic == "Ve" && b.legislature.number == 2)
        .collect();
    assert_eq!(last.len(), 2);
    assert!(last.iter().all(|b| b.height == 0.0));
    assert!(layout.bars.iter().all(|b| b.height >= 0.0 && b.height.is_finite()));
}

#[test]
fn bars_keep_source_order_and_partition_width() {
    let data = data();
    let layout = compute_chart_layout(&data, &data.all_visible(), &options(true)).unwrap();

    let names: Vec<&str> = layout.bars.iter().map(|b| b.party_name.as_str()).collect();
    assert_eq!(names, ["PCF", "SFIO", "UNR", "PCF", "PS", "UNR", "PS", "RPR"]);
    assert_eq!(layout.legislature_meta.len(), 3);

    for meta in &layout.legislature_meta {
        let bars: Vec<&Bar> = layout
            .bars
            .iter()
            .filter(|b| b.legislature == meta.legislature)
            .collect();
        let total: f64 = bars.iter().map(|b| b.width).sum();
        assert!(close(total, 400.0), "{total}");
        assert!(close(bars[0].x, 0.0));
        for pair in bars.windows(2) {
            assert!(close(pair[0].x + pair[0].width, pair[1].x));
        }
    }
    assert!(close(layout.height, (coord("now") - coord("1951-01-01")) * 10.0));
}

#[test]
fn last_legislature_of_a_republic_flows_into_the_next() {
    let data = data();
    let layout = compute_chart_layout(&data, &data.all_visible(), &options(true)).unwrap();

    let full = (coord("1958-01-01") - coord("1951-01-01")) * 10.0;
    let first = &layout.bars[0];
    assert!(close(first.y, 0.0));
    assert!(close(first.height, full / TRANSITION_HEIGHT_SHARE));

    let from_ive: Vec<&Polygon> = layout
        .polygons
        .iter()
        .filter(|p| p.legislature.republic == "IVe")
        .collect();
    assert_eq!(from_ive.len(), 3);

    let sfio = from_ive[1];
    assert_eq!(sfio.party_name, "SFIO");
    assert_eq!(sfio.target, TransitionTarget::Counterpart { index: 1 });
    let [tl, tr, br, bl] = sfio.points;
    assert!(close(tl.x, 100.0) && close(tr.x, 200.0));
    assert!(close(bl.x, 50.0) && close(br.x, 200.0));
    assert!(close(tl.y, full / TRANSITION_HEIGHT_SHARE));
    assert!(close(bl.y, full));
}

#[test]
fn missing_counterpart_collapses_into_neighbour_gap() {
    let data = data();
    let layout = compute_chart_layout(&data, &data.all_visible(), &options(true)).unwrap();

    // Ve 1 -> Ve 2: no communist party in the second legislature
    let pcf = layout
        .polygons
        .iter()
        .find(|p| p.legislature.republic == "Ve" && p.party_name == "PCF")
        .unwrap();
    assert_eq!(
        pcf.target,
        TransitionTarget::Gap {
            prev: None,
            next: Some(0)
        }
    );
    assert!(close(pcf.points[2].x, 0.0) && close(pcf.points[3].x, 0.0));

    // the last legislature has nothing to flow into
    assert_eq!(layout.polygons.len(), 6);
    assert!(
        layout
            .polygons
            .iter()
            .all(|p| !(p.legislature.republic == "Ve" && p.legislature.number == 2))
    );
}

#[test]
fn hidden_transitions_give_bars_the_full_row() {
    let data = data();
    let shown = compute_chart_layout(&data, &data.all_visible(), &options(true)).unwrap();
    let hidden = compute_chart_layout(&data, &data.all_visible(), &options(false)).unwrap();

    for (a, b) in shown.bars.iter().zip(&hidden.bars) {
        assert_eq!(a.y, b.y);
        assert!(close(b.height, a.height * TRANSITION_HEIGHT_SHARE));
    }
    for p in &hidden.polygons {
        assert!(close(p.points[0].y, p.points[3].y));
    }
    assert_eq!(shown.height, hidden.height);
}

#[test]
fn hidden_current_gets_zero_width_and_no_polygon() {
    let data = data();
    let mut visible = data.all_visible();
    visible.remove("Gaullisme");
    let layout = compute_chart_layout(&data, &visible, &options(true)).unwrap();

    assert_eq!(layout.bars.len(), 8);
    for bar in layout.bars.iter().filter(|b| b.current_name == "Gaullisme") {
        assert_eq!(bar.width, 0.0);
    }
    assert_eq!(layout.polygons.len(), 4);
    assert!(layout.polygons.iter().all(|p| p.current_name != "Gaullisme"));

    // PS alone in its row once RPR is hidden
    let ps = layout.bars.iter().rfind(|b| b.party_name == "PS").unwrap();
    assert!(close(ps.width, 400.0));
}

#[test]
fn nothing_visible_is_not_an_error() {
    let data = data();
    let layout = compute_chart_layout(&data, &VisibleCurrents::none(), &options(true)).unwrap();
    assert!(layout.bars.iter().all(|b| b.width == 0.0));
    assert!(layout.polygons.is_empty());
    assert!(layout.coalition_runs.is_empty());
    assert!(layout.legislature_meta.iter().all(|m| m.filtered_deputes == 0));
}

#[test]
fn coalition_runs_and_colors() {
    let data = data();
    let layout = compute_chart_layout(&data, &data.all_visible(), &options(true)).unwrap();

    let labels: Vec<&str> = layout
        .coalition_runs
        .iter()
        .map(|o| o.run.label.as_str())
        .collect();
    assert_eq!(labels, ["Front", "Majorité"]);
    let majority = &layout.coalition_runs[1];
    assert_eq!(majority.run.seats, 350);
    assert!(close(majority.run.span.x0, 50.0) && close(majority.run.span.x1, 400.0));

    let blue = Rgb8::parse_hex("#0000aa").unwrap();
    let ps = &layout.bars[4];
    assert_eq!(ps.party_name, "PS");
    assert_eq!(ps.display_color(false), Rgb8::parse_hex("#ff8080").unwrap());
    assert_eq!(ps.display_color(true), blue.with_alpha(COALITION_TINT_ALPHA));
    assert_eq!(layout.bars[5].display_color(true), blue);

    let ps_flow = layout
        .polygons
        .iter()
        .find(|p| p.legislature.chart_index == 1 && p.party_name == "PS")
        .unwrap();
    assert!(ps_flow.is_coalition_flow);
    assert_eq!(ps_flow.display_color(true), blue.with_alpha(COALITION_TINT_ALPHA));
}

#[test]
fn layout_is_idempotent() {
    let data = data();
    let a = compute_chart_layout(&data, &data.all_visible(), &options(true)).unwrap();
    let b = compute_chart_layout(&data, &data.all_visible(), &options(true)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn options_are_validated() {
    let data = data();
    for bad in [
        LayoutOptions {
            graph_width: -1.0,
            ..LayoutOptions::default()
        },
        LayoutOptions {
            graph_width: f64::NAN,
            ..LayoutOptions::default()
        },
        LayoutOptions {
            row_height: f64::INFINITY,
            ..LayoutOptions::default()
        },
    ] {
        let err = compute_chart_layout(&data, &data.all_visible(), &bad).unwrap_err();
        assert!(err.to_string().starts_with("layout error:"), "{err}");
    }
    LayoutOptions::default().validate().unwrap();
}

#[test]
fn options_deserialize_with_defaults() {
    let opts: LayoutOptions = serde_json::from_value(json!({ "graph_width": 640.0 })).unwrap();
    assert_eq!(opts.graph_width, 640.0);
    assert_eq!(opts.row_height, LayoutOptions::default().row_height);
    assert!(opts.transitions_visible);
}

#[test]
fn empty_republics_file_is_rejected() {
    let data = ChartData::prepare(&RepublicsFile::default(), &currents(), clock());
    assert!(data.is_err());
}
