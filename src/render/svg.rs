use std::fmt::Write as _;

use crate::{
    chart::axis::{DEFAULT_X_TICKS, x_axis_ticks},
    chart::primitives::{Bar, ChartLayout},
    foundation::color::Rgb8,
};

/// Presentation switches for [`render_svg`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SvgOptions {
    /// Paint bars and flows with their coalition's color.
    pub coalition_view: bool,
    /// Page background.
    pub background: Rgb8,
    /// Opacity of transition polygons.
    pub transition_opacity: f64,
    /// Draw party names on bars large enough to hold them.
    pub labels: bool,
    /// Label font size in pixels.
    pub font_size: f64,
    /// Vertical grid lines at 25/50/75 % of the width.
    pub grid: bool,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            coalition_view: false,
            background: Rgb8::rgb(255, 255, 255),
            transition_opacity: 0.7,
            labels: true,
            font_size: 12.0,
            grid: true,
        }
    }
}

const COALITION_STROKE: &str = "#000000";
const GRID_STROKE: &str = "#d0d0d0";

/// Serialize a layout as a standalone SVG document.
///
/// Numbers are written with at most three decimals so equal layouts give equal bytes.
#[tracing::instrument(skip(layout, options))]
pub fn render_svg(layout: &ChartLayout, options: &SvgOptions) -> String {
    let w = fmt_number(layout.width);
    let h = fmt_number(layout.height);
    let mut out = String::new();
    let _ = write!(
        &mut out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );
    let _ = write!(
        &mut out,
        r#"<rect width="{w}" height="{h}" fill="{}"/>"#,
        options.background.to_hex()
    );

    if options.grid {
        out.push_str(r#"<g class="grid">"#);
        for tick in x_axis_ticks(layout.width, &DEFAULT_X_TICKS) {
            let x = fmt_number(tick.offset);
            let _ = write!(
                &mut out,
                r#"<line x1="{x}" y1="0" x2="{x}" y2="{h}" stroke="{GRID_STROKE}" stroke-dasharray="4 4"/>"#
            );
        }
        out.push_str("</g>");
    }

    out.push_str(r#"<g class="transitions">"#);
    for polygon in &layout.polygons {
        let points = polygon
            .points
            .iter()
            .map(|p| format!("{},{}", fmt_number(p.x), fmt_number(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            &mut out,
            r#"<polygon points="{points}" fill="{}" fill-opacity="{}"/>"#,
            polygon.display_color(options.coalition_view).to_hex(),
            fmt_number(options.transition_opacity)
        );
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="bars">"#);
    for bar in layout.bars.iter().filter(|b| b.width > 0.0) {
        render_bar(&mut out, layout, bar, options);
    }
    out.push_str("</g>");

    out.push_str(r#"<g class="coalitions">"#);
    for outline in &layout.coalition_runs {
        let r = outline.rect();
        if r.width() <= 0.0 {
            continue;
        }
        let _ = write!(
            &mut out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{COALITION_STROKE}" stroke-width="1.5"/>"#,
            fmt_number(r.x0),
            fmt_number(r.y0),
            fmt_number(r.width()),
            fmt_number(r.height())
        );
    }
    out.push_str("</g>");

    if options.labels {
        out.push_str(r#"<g class="labels">"#);
        for bar in &layout.bars {
            if !label_fits(bar, options.font_size) {
                continue;
            }
            let _ = write!(
                &mut out,
                r#"<text x="{}" y="{}" font-size="{}" text-anchor="middle" dominant-baseline="central">{}</text>"#,
                fmt_number(bar.x + bar.width / 2.0),
                fmt_number(bar.y + bar.height / 2.0),
                fmt_number(options.font_size),
                escape_xml(&bar.party_name)
            );
        }
        out.push_str("</g>");
    }

    out.push_str("</svg>");
    out
}

fn render_bar(out: &mut String, layout: &ChartLayout, bar: &Bar, options: &SvgOptions) {
    let tip = layout.tooltip_for(bar);
    let mut title = format!(
        "{} ({}) : {} / {} ({}%)",
        tip.full_name.as_deref().unwrap_or(&tip.party_name),
        tip.current_name,
        tip.deputes,
        tip.total_deputes,
        fmt_number(tip.share)
    );
    if let Some(c) = &tip.coalition {
        let _ = write!(&mut title, " · {} {} ({}%)", c.label, c.deputes, fmt_number(c.share));
    }
    let _ = write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"><title>{}</title></rect>"#,
        fmt_number(bar.x),
        fmt_number(bar.y),
        fmt_number(bar.width),
        fmt_number(bar.height),
        bar.display_color(options.coalition_view).to_hex(),
        escape_xml(&title)
    );
}

// Rough advance of 0.6 em per character.
fn label_fits(bar: &Bar, font_size: f64) -> bool {
    let text_width = bar.party_name.chars().count() as f64 * font_size * 0.6;
    bar.width >= text_width + 4.0 && bar.height >= font_size + 2.0
}

fn fmt_number(v: f64) -> String {
    if !v.is_finite() || v.abs() < 0.0005 {
        return "0".to_string();
    }
    let mut s = format!("{:.3}", (v * 1000.0).round() / 1000.0);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
