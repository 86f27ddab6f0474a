use crate::chart::primitives::ChartLayout;

/// Default x tick positions, as percentages of the graph width.
pub const DEFAULT_X_TICKS: [f64; 3] = [25.0, 50.0, 75.0];

/// One axis graduation.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AxisTick {
    /// Pixel offset along the axis.
    pub offset: f64,
    /// Label text.
    pub label: String,
}

/// One tick at the top of each drawn legislature, labelled `"<year> · <ordinal>"`.
pub fn y_axis_ticks(layout: &ChartLayout) -> Vec<AxisTick> {
    layout
        .legislature_meta
        .iter()
        .map(|meta| AxisTick {
            offset: meta.y,
            label: format!("{} · {}", meta.begin_year, meta.legislature.number),
        })
        .collect()
}

/// Ticks at `percents` of `graph_width`, labelled `"NN%"`.
pub fn x_axis_ticks(graph_width: f64, percents: &[f64]) -> Vec<AxisTick> {
    percents
        .iter()
        .map(|&p| AxisTick {
            offset: graph_width * p / 100.0,
            label: format!("{p}%"),
        })
        .collect()
}
