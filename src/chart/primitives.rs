use crate::{
    chart::meta::LegislatureMeta,
    foundation::color::{COALITION_TINT_ALPHA, Rgb8},
    foundation::core::{Point, Rect},
    layout::coalition::{CoalitionMark, CoalitionRun},
    layout::transition::TransitionTarget,
    resolve::registry::{CurrentId, ResolutionGap},
};

/// Identifies the legislature a primitive belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct LegislatureRef {
    /// Republic name.
    pub republic: String,
    /// Republic position in the dataset.
    pub republic_index: usize,
    /// Legislature position within its republic.
    pub legislature_index: usize,
    /// Legislature ordinal as stored (not unique across republics).
    pub number: u32,
    /// Position in [`ChartLayout::legislature_meta`].
    pub chart_index: usize,
}

/// A party's bar in one legislature row. Hidden parties keep a zero-width bar.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Bar {
    /// Owning legislature.
    pub legislature: LegislatureRef,
    /// Source index of the party in its legislature.
    pub party_index: usize,
    /// Party short name.
    pub party_name: String,
    /// Party long name.
    pub full_name: Option<String>,
    /// Owning current name.
    pub current_name: String,
    /// Owning current index.
    pub current_id: CurrentId,
    /// Owning current color.
    pub color: Rgb8,
    /// Seats held.
    pub deputes: u32,
    /// Left edge.
    pub x: f64,
    /// Width, zero when hidden.
    pub width: f64,
    /// Top edge.
    pub y: f64,
    /// Height.
    pub height: f64,
    /// Coalition data when the party carries a label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coalition: Option<CoalitionMark>,
}

impl Bar {
    /// Bar rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Fill color: the current's own color, or in coalition view the coalition's dominant color
    /// (tinted when it belongs to another current).
    pub fn display_color(&self, coalition_view: bool) -> Rgb8 {
        display_color(
            self.color,
            self.coalition.as_ref().map(|c| c.run_color),
            coalition_view,
        )
    }
}

/// Transition quadrilateral from a party's bar to its successor span.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Polygon {
    /// Legislature the flow starts from.
    pub legislature: LegislatureRef,
    /// Source party index in that legislature.
    pub party_index: usize,
    /// Source party name.
    pub party_name: String,
    /// Current carried across the transition.
    pub current_name: String,
    /// Current color.
    pub color: Rgb8,
    /// Dominant coalition color when the source party is in a coalition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coalition_color: Option<Rgb8>,
    /// Whether the source party belongs to a coalition.
    pub is_coalition_flow: bool,
    /// How the lower edge was obtained.
    pub target: TransitionTarget,
    /// Corners: top-left, top-right, bottom-right, bottom-left.
    pub points: [Point; 4],
}

impl Polygon {
    /// Fill color, same rule as [`Bar::display_color`].
    pub fn display_color(&self, coalition_view: bool) -> Rgb8 {
        display_color(self.color, self.coalition_color, coalition_view)
    }
}

/// Border box around a contiguous coalition run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CoalitionOutline {
    /// Owning legislature.
    pub legislature: LegislatureRef,
    /// Run description.
    pub run: CoalitionRun,
    /// Top edge (the bar row's top).
    pub y: f64,
    /// Height (the bar height).
    pub height: f64,
}

impl CoalitionOutline {
    /// Outline rectangle.
    pub fn rect(&self) -> Rect {
        self.run.span.to_rect(self.y, self.y + self.height)
    }
}

/// Everything a presentation layer needs to draw the chart.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ChartLayout {
    /// Bars in republic, legislature, then party order.
    pub bars: Vec<Bar>,
    /// Transition polygons in the same order as their source bars.
    pub polygons: Vec<Polygon>,
    /// Coalition borders.
    pub coalition_runs: Vec<CoalitionOutline>,
    /// One entry per drawn legislature.
    pub legislature_meta: Vec<LegislatureMeta>,
    /// `[min, max]` year coordinates of the timeline.
    pub timeline_extent: (f64, f64),
    /// Graph width in pixels.
    pub width: f64,
    /// Graph height in pixels.
    pub height: f64,
    /// Parties dropped at resolution time.
    pub resolution_gaps: Vec<ResolutionGap>,
}

fn display_color(own: Rgb8, coalition: Option<Rgb8>, coalition_view: bool) -> Rgb8 {
    match coalition {
        Some(c) if coalition_view && !c.same_rgb(own) => c.with_alpha(COALITION_TINT_ALPHA),
        _ => own,
    }
}
