use crate::{
    foundation::core::Span,
    layout::visibility::{VisibleCurrents, filtered_total, visibility_mask},
    resolve::registry::ResolvedParty,
};

/// Horizontal layout of one legislature row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RowLayout {
    /// One span per party, in source order.
    pub spans: Vec<Span>,
    /// Visibility per party, in source order.
    pub visible: Vec<bool>,
    /// Seat sum over visible parties.
    pub filtered_total: u64,
    /// Width the spans partition.
    pub graph_width: f64,
}

impl RowLayout {
    /// Whether every party is hidden or seatless.
    pub fn is_empty(&self) -> bool {
        self.filtered_total == 0
    }
}

/// Lay out one legislature: visible parties share `graph_width` in proportion to their seats.
pub fn layout_row(
    parties: &[ResolvedParty],
    visible: &VisibleCurrents,
    graph_width: f64,
) -> RowLayout {
    let mask = visibility_mask(parties, visible);
    let total = filtered_total(parties, visible);
    let seats: Vec<u32> = parties.iter().map(|p| p.deputes).collect();
    RowLayout {
        spans: proportional_spans(&seats, &mask, total, graph_width),
        visible: mask,
        filtered_total: total,
        graph_width,
    }
}

/// Spans of [`layout_row`] alone.
pub fn layout_spans(
    parties: &[ResolvedParty],
    visible: &VisibleCurrents,
    graph_width: f64,
) -> Vec<Span> {
    layout_row(parties, visible, graph_width).spans
}

/// `width_i = visible_i ? W * seats_i / total : 0`, each span starting where the previous ends.
///
/// Hidden entries keep their slot with zero width. A zero total yields all-zero spans.
pub fn proportional_spans(
    seats: &[u32],
    visible: &[bool],
    total: u64,
    graph_width: f64,
) -> Vec<Span> {
    let mut spans = Vec::with_capacity(seats.len());
    let mut x = 0.0;
    for (i, &s) in seats.iter().enumerate() {
        let shown = visible.get(i).copied().unwrap_or(false);
        let width = if shown && total > 0 {
            graph_width * f64::from(s) / (total as f64)
        } else {
            0.0
        };
        spans.push(Span::from_origin_width(x, width));
        x += width;
    }
    spans
}

#[cfg(test)]
#[path = "../../tests/unit/layout/proportional.rs"]
mod tests;
