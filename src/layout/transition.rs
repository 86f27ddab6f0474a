use kurbo::Shape as _;

use crate::{
    foundation::core::{BezPath, Point, Span},
    layout::proportional::RowLayout,
    resolve::registry::ResolvedParty,
};

/// A laid-out legislature row: resolved parties and their horizontal layout.
#[derive(Clone, Copy, Debug)]
pub struct LaidOutRow<'a> {
    /// Parties in source order.
    pub parties: &'a [ResolvedParty],
    /// Spans and visibility for `parties`.
    pub layout: &'a RowLayout,
}

impl<'a> LaidOutRow<'a> {
    /// Pair parties with their layout.
    pub fn new(parties: &'a [ResolvedParty], layout: &'a RowLayout) -> Self {
        Self { parties, layout }
    }

    fn is_visible(&self, i: usize) -> bool {
        self.layout.visible.get(i).copied().unwrap_or(false)
    }

    fn span(&self, i: usize) -> Span {
        self.layout.spans.get(i).copied().unwrap_or_default()
    }

    /// First party whose current is `current_name`.
    pub fn counterpart(&self, current_name: &str) -> Option<usize> {
        self.parties.iter().position(|p| p.current.name == current_name)
    }

    fn visible_counterpart(&self, current_name: &str) -> Option<usize> {
        self.counterpart(current_name).filter(|&k| self.is_visible(k))
    }
}

/// Vertical extent of the transition band between two rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionBand {
    /// Bottom edge of the source bar.
    pub y_top: f64,
    /// Top edge of the successor row.
    pub y_bottom: f64,
}

impl TransitionBand {
    /// Band height (zero when transitions are collapsed).
    pub fn height(self) -> f64 {
        self.y_bottom - self.y_top
    }
}

/// How the lower edge of a transition was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionTarget {
    /// The successor has a visible party of the same current.
    Counterpart {
        /// Source index in the successor row.
        index: usize,
    },
    /// The current disappears or is hidden: the flow narrows into the gap between the
    /// counterparts of its neighbours.
    Gap {
        /// Successor index bounding the gap on the left.
        prev: Option<usize>,
        /// Successor index bounding the gap on the right.
        next: Option<usize>,
    },
}

/// Quadrilateral connecting a party's span to its target span in the successor row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TransitionShape {
    /// Source index in the origin row.
    pub from_index: usize,
    /// How `bottom` was obtained.
    pub target: TransitionTarget,
    /// Span at `band.y_top`.
    pub top: Span,
    /// Span at `band.y_bottom`.
    pub bottom: Span,
    /// Corners: top-left, top-right, bottom-right, bottom-left.
    pub points: [Point; 4],
}

impl TransitionShape {
    fn new(
        from_index: usize,
        target: TransitionTarget,
        top: Span,
        bottom: Span,
        band: TransitionBand,
    ) -> Self {
        Self {
            from_index,
            target,
            top,
            bottom,
            points: [
                Point::new(top.x0, band.y_top),
                Point::new(top.x1, band.y_top),
                Point::new(bottom.x1, band.y_bottom),
                Point::new(bottom.x0, band.y_bottom),
            ],
        }
    }

    /// Closed outline of the quadrilateral.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.points[0]);
        for p in &self.points[1..] {
            path.line_to(*p);
        }
        path.close_path();
        path
    }

    /// Unsigned area; zero for degenerate shapes.
    pub fn area(&self) -> f64 {
        self.to_path().area().abs()
    }
}

/// Lower edge for party `i` of `from`: its counterpart's span, or the neighbour gap.
///
/// The gap runs from the right edge of the nearest preceding party's visible counterpart
/// (0 when none) to the left edge of the nearest following one (`graph_width` when none).
/// When those counterparts swapped places in the successor, the flow instead narrows to
/// where its current's spectrum rank would be inserted among the visible successor parties.
pub fn target_span(
    from: &LaidOutRow<'_>,
    i: usize,
    to: &LaidOutRow<'_>,
    graph_width: f64,
) -> (Span, TransitionTarget) {
    let current = &from.parties[i].current.name;
    if let Some(k) = to.visible_counterpart(current) {
        return (to.span(k), TransitionTarget::Counterpart { index: k });
    }

    let prev = (0..i)
        .rev()
        .find_map(|j| to.visible_counterpart(&from.parties[j].current.name));
    let next = (i + 1..from.parties.len())
        .find_map(|j| to.visible_counterpart(&from.parties[j].current.name));
    let (lo, hi) = gap_edges(to, prev, next, graph_width);
    if lo <= hi {
        return (Span { x0: lo, x1: hi }, TransitionTarget::Gap { prev, next });
    }

    let rank = from.parties[i].current.id;
    let next = (0..to.parties.len())
        .find(|&k| to.is_visible(k) && to.parties[k].current.id > rank);
    let prev = (0..next.unwrap_or(to.parties.len()))
        .rev()
        .find(|&k| to.is_visible(k));
    let (lo, hi) = gap_edges(to, prev, next, graph_width);
    // only hidden, zero-width parties lie between prev and next
    (Span::ordered(lo, hi), TransitionTarget::Gap { prev, next })
}

fn gap_edges(
    to: &LaidOutRow<'_>,
    prev: Option<usize>,
    next: Option<usize>,
    graph_width: f64,
) -> (f64, f64) {
    (
        prev.map_or(0.0, |k| to.span(k).x1),
        next.map_or(graph_width, |k| to.span(k).x0),
    )
}

/// One quadrilateral per visible party of `from`, in source order.
pub fn build_transitions(
    from: &LaidOutRow<'_>,
    to: &LaidOutRow<'_>,
    graph_width: f64,
    band: TransitionBand,
) -> Vec<TransitionShape> {
    (0..from.parties.len())
        .filter(|&i| from.is_visible(i))
        .map(|i| {
            let (bottom, target) = target_span(from, i, to, graph_width);
            TransitionShape::new(i, target, from.span(i), bottom, band)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/transition.rs"]
mod tests;
