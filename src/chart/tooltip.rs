use crate::{
    chart::meta::share_of,
    chart::primitives::{Bar, ChartLayout},
    foundation::core::Point,
};

/// Coalition part of a hover tooltip.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CoalitionTooltip {
    /// Coalition label.
    pub label: String,
    /// Seats of every member party.
    pub deputes: u64,
    /// Percentage of the nominal total.
    pub share: f64,
}

/// What hovering a bar displays.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Tooltip {
    /// Party short name.
    pub party_name: String,
    /// Party long name.
    pub full_name: Option<String>,
    /// Owning current.
    pub current_name: String,
    /// Seats held.
    pub deputes: u32,
    /// Percentage of the nominal total.
    pub share: f64,
    /// Nominal seat count of the legislature.
    pub total_deputes: u32,
    /// Legislature dates, `end_year` absent while ongoing.
    pub begin_year: i32,
    /// See `begin_year`.
    pub end_year: Option<i32>,
    /// Coalition figures when the party has a label.
    pub coalition: Option<CoalitionTooltip>,
}

impl ChartLayout {
    /// Bar under `point`. Zero-width (hidden) bars never match.
    pub fn bar_at(&self, point: Point) -> Option<&Bar> {
        self.bars.iter().find(|bar| {
            bar.width > 0.0
                && bar.height > 0.0
                && point.x >= bar.x
                && point.x < bar.x + bar.width
                && point.y >= bar.y
                && point.y < bar.y + bar.height
        })
    }

    /// Tooltip content for `bar`; shares use the legislature's nominal total.
    pub fn tooltip_for(&self, bar: &Bar) -> Tooltip {
        let meta = self.legislature_meta.get(bar.legislature.chart_index);
        let total = meta.map_or(0, |m| m.total_deputes);
        Tooltip {
            party_name: bar.party_name.clone(),
            full_name: bar.full_name.clone(),
            current_name: bar.current_name.clone(),
            deputes: bar.deputes,
            share: share_of(u64::from(bar.deputes), total),
            total_deputes: total,
            begin_year: meta.map_or(0, |m| m.begin_year),
            end_year: meta.and_then(|m| m.end_year),
            coalition: bar.coalition.as_ref().map(|c| CoalitionTooltip {
                label: c.label.clone(),
                deputes: c.run_seats,
                share: share_of(c.run_seats, total),
            }),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/tooltip.rs"]
mod tests;
