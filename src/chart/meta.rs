use crate::{
    chart::primitives::LegislatureRef,
    foundation::color::Rgb8,
    layout::coalition::coalition_totals,
    layout::proportional::RowLayout,
    resolve::registry::ResolvedLegislature,
};

/// Party holding the most seats in a legislature.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LeadingParty {
    /// Party short name.
    pub name: String,
    /// Party long name.
    pub full_name: Option<String>,
    /// Owning current.
    pub current_name: String,
    /// Current color.
    pub color: Rgb8,
    /// Seats held.
    pub deputes: u32,
    /// Percentage of the nominal total.
    pub share: f64,
}

/// Coalition holding the most seats in a legislature.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LeadingCoalition {
    /// Coalition label.
    pub label: String,
    /// Seats of every member party.
    pub deputes: u64,
    /// Dominant member color.
    pub color: Rgb8,
    /// Percentage of the nominal total.
    pub share: f64,
}

/// Per-legislature summary shown next to each row.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct LegislatureMeta {
    /// Which legislature.
    pub legislature: LegislatureRef,
    /// Raw `begin` value.
    pub begin: String,
    /// Raw `end` value.
    pub end: String,
    /// Calendar year of `begin`.
    pub begin_year: i32,
    /// Calendar year of `end`, `None` while ongoing.
    pub end_year: Option<i32>,
    /// Row top.
    pub y: f64,
    /// Bar height of the row.
    pub height: f64,
    /// Nominal seat count of the assembly.
    pub total_deputes: u32,
    /// Seats of resolved parties.
    pub seated_deputes: u64,
    /// Seats of visible parties.
    pub filtered_deputes: u64,
    /// Most-seat party, first on ties.
    pub leading_party: Option<LeadingParty>,
    /// Most-seat coalition, first on ties.
    pub leading_coalition: Option<LeadingCoalition>,
    /// Whether the leading party holds strictly more seats than the leading coalition.
    pub party_outweighs_coalition: bool,
}

/// Percentage of `seats` in `total`, 0 when `total` is 0.
pub fn share_of(seats: u64, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        100.0 * (seats as f64) / f64::from(total)
    }
}

/// Summarise one legislature. Leaders are computed over every resolved party, visible or not.
pub fn summarize_legislature(
    leg: &ResolvedLegislature,
    legislature: LegislatureRef,
    row: &RowLayout,
    y: f64,
    height: f64,
) -> LegislatureMeta {
    let leading_party = leg
        .parties
        .iter()
        .reduce(|best, p| if p.deputes > best.deputes { p } else { best })
        .map(|p| LeadingParty {
            name: p.name.clone(),
            full_name: p.full_name.clone(),
            current_name: p.current.name.clone(),
            color: p.current.color,
            deputes: p.deputes,
            share: share_of(u64::from(p.deputes), leg.total_deputes),
        });

    let leading_coalition = coalition_totals(&leg.parties)
        .into_iter()
        .reduce(|best, c| if c.seats > best.seats { c } else { best })
        .map(|c| LeadingCoalition {
            share: share_of(c.seats, leg.total_deputes),
            label: c.label,
            deputes: c.seats,
            color: c.color,
        });

    let party_outweighs_coalition = match (&leading_party, &leading_coalition) {
        (Some(p), Some(c)) => u64::from(p.deputes) > c.deputes,
        (Some(p), None) => p.deputes > 0,
        (None, _) => false,
    };

    LegislatureMeta {
        legislature,
        begin: leg.begin.clone(),
        end: leg.end.clone(),
        begin_year: leg.begin_year,
        end_year: leg.end_year,
        y,
        height,
        total_deputes: leg.total_deputes,
        seated_deputes: leg.parties.iter().map(|p| u64::from(p.deputes)).sum(),
        filtered_deputes: row.filtered_total,
        leading_party,
        leading_coalition,
        party_outweighs_coalition,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/meta.rs"]
mod tests;
