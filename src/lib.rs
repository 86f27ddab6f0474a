//! Hemicycle lays out a timeline of French legislative assemblies.
//!
//! A dataset of republics, legislatures and party seat counts, together with a catalogue of
//! political currents, becomes positioned rectangles (one bar per party and legislature) and
//! quadrilaterals joining each party to its successor in the next legislature.
//!
//! # Pipeline overview
//!
//! 1. **Load**: `RepublicsFile` / `CurrentsFile` / `EventsFile` from JSON, validated on read
//! 2. **Prepare**: [`ChartData::prepare`] resolves every party to its current once and indexes
//!    the timeline (`"now"` is resolved against an explicit [`TimelineClock`])
//! 3. **Lay out**: [`compute_chart_layout`] filters by [`VisibleCurrents`], partitions each row,
//!    groups coalitions and builds transition shapes
//! 4. **Export** (optional): [`render_svg`]
//!
//! Layout is pure: the same data, visibility set and [`LayoutOptions`] give the same
//! [`ChartLayout`], bit for bit.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod chart;
mod data;
mod foundation;
mod layout;
mod render;
mod resolve;
mod timeline;

pub use chart::assembler::{
    ChartData, LayoutOptions, ResolvedRepublic, TRANSITION_HEIGHT_SHARE, compute_chart_layout,
};
pub use chart::axis::{AxisTick, DEFAULT_X_TICKS, x_axis_ticks, y_axis_ticks};
pub use chart::meta::{
    LeadingCoalition, LeadingParty, LegislatureMeta, share_of, summarize_legislature,
};
pub use chart::primitives::{Bar, ChartLayout, CoalitionOutline, LegislatureRef, Polygon};
pub use chart::tooltip::{CoalitionTooltip, Tooltip};
pub use data::model::{
    Current, CurrentParty, CurrentsFile, Event, EventsFile, Family, Legislature, PartySeats,
    Republic, RepublicsFile,
};
pub use foundation::color::{COALITION_TINT_ALPHA, Rgb8};
pub use foundation::core::{BezPath, Point, Rect, Span};
pub use foundation::error::{HemicycleError, HemicycleResult};
pub use layout::coalition::{
    CoalitionLayout, CoalitionMark, CoalitionRun, CoalitionTotal, coalition_totals,
    group_coalitions,
};
pub use layout::proportional::{RowLayout, layout_row, layout_spans, proportional_spans};
pub use layout::transition::{
    LaidOutRow, TransitionBand, TransitionShape, TransitionTarget, build_transitions,
    target_span,
};
pub use layout::visibility::{VisibleCurrents, filtered_total, is_party_visible, visibility_mask};
pub use render::svg::{SvgOptions, render_svg};
pub use resolve::registry::{
    CurrentId, CurrentInfo, CurrentRef, CurrentRegistry, ResolutionGap, ResolvedLegislature,
    ResolvedParty,
};
pub use timeline::index::{
    MS_PER_YEAR, NOW_PADDING_YEARS, NOW_SENTINEL, TimeMarker, TimelineClock,
    epoch_ms_to_coordinate, pixel_y, year_coordinate,
};
