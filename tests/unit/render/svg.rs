use super::*;
use crate::chart::assembler::{ChartData, LayoutOptions, compute_chart_layout};
use crate::data::model::{CurrentsFile, RepublicsFile};
use crate::timeline::index::TimelineClock;
use chrono::NaiveDate;
use serde_json::json;

fn layout() -> ChartLayout {
    let currents: CurrentsFile = serde_json::from_value(json!({
        "families": [{ "currents": [
            { "name": "Gauche", "color": "#ff0000", "parties": [{ "name": "G&R" }] },
            { "name": "Droite", "color": "#0000ff", "parties": [{ "name": "D" }] }
        ]}]
    }))
    .unwrap();
    let republics: RepublicsFile = serde_json::from_value(json!({
        "republics": [{ "name": "Ve", "legislatures": [
            { "legislature": 1, "begin": "2000-01-01", "end": "2005-01-01", "total_deputes": 100,
              "parties": [
                { "name": "G&R", "deputes": 40, "coalition": "Union" },
                { "name": "D", "deputes": 60, "coalition": "Union" }
              ] },
            { "legislature": 2, "begin": "2005-01-01", "end": "2010-01-01", "total_deputes": 100,
              "parties": [{ "name": "G&R", "deputes": 0 }, { "name": "D", "deputes": 100 }] }
        ]}]
    }))
    .unwrap();
    let clock = TimelineClock::at_date(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    let data = ChartData::prepare(&republics, &currents, clock).unwrap();
    compute_chart_layout(&data, &data.all_visible(), &LayoutOptions::default()).unwrap()
}

#[test]
fn fmt_number_is_stable() {
    assert_eq!(fmt_number(1.0), "1");
    assert_eq!(fmt_number(0.1 + 0.2), "0.3");
    assert_eq!(fmt_number(-0.0001), "0");
    assert_eq!(fmt_number(f64::NAN), "0");
    assert_eq!(fmt_number(12.34567), "12.346");
}

#[test]
fn escape_xml_covers_markup() {
    assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
}

#[test]
fn document_contains_every_visible_primitive() {
    let layout = layout();
    let svg = render_svg(&layout, &SvgOptions::default());
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
    assert!(svg.ends_with("</svg>"));
    assert!(svg.contains(r##"fill="#ffffff""##));

    // zero-seat G&R in the second row is not drawn
    let bars = layout.bars.iter().filter(|b| b.width > 0.0).count();
    assert_eq!(bars, 3);
    assert_eq!(svg.matches("<title>").count(), bars);
    assert_eq!(svg.matches("<polygon").count(), layout.polygons.len());
    assert!(svg.contains(r#"fill-opacity="0.7""#));
    assert!(svg.contains("G&amp;R"));
    assert!(!svg.contains("G&R"));
}

#[test]
fn coalition_view_recolors() {
    let layout = layout();
    let plain = render_svg(&layout, &SvgOptions::default());
    let tinted = render_svg(
        &layout,
        &SvgOptions {
            coalition_view: true,
            ..SvgOptions::default()
        },
    );
    assert!(plain.contains(r##"fill="#ff0000""##));
    assert!(tinted.contains(r##"fill="#0000ffcc""##));
}

#[test]
fn rendering_is_deterministic() {
    let a = render_svg(&layout(), &SvgOptions::default());
    let b = render_svg(&layout(), &SvgOptions::default());
    assert_eq!(a, b);
}

#[test]
fn switches_drop_optional_groups() {
    let svg = render_svg(
        &layout(),
        &SvgOptions {
            labels: false,
            grid: false,
            ..SvgOptions::default()
        },
    );
    assert!(!svg.contains("<text"));
    assert!(!svg.contains("<line"));
}
