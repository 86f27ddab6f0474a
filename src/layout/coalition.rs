use crate::{
    foundation::color::Rgb8,
    foundation::core::Span,
    resolve::registry::ResolvedParty,
};

/// Coalition data attached to a party with a coalition label.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CoalitionMark {
    /// Coalition label.
    pub label: String,
    /// No earlier visible party continues this coalition.
    pub is_first: bool,
    /// No later visible party continues this coalition.
    pub is_last: bool,
    /// Seats of every party carrying the label in the legislature, visible or not.
    pub run_seats: u64,
    /// Current color of the label's highest-seat party.
    pub run_color: Rgb8,
}

/// A contiguous block of visible parties sharing a coalition label.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CoalitionRun {
    /// Coalition label.
    pub label: String,
    /// Source index of the first party of the block.
    pub first: usize,
    /// Source index of the last party of the block.
    pub last: usize,
    /// Horizontal extent of the block.
    pub span: Span,
    /// Label-wide seat total (see [`CoalitionMark::run_seats`]).
    pub seats: u64,
    /// Label-wide dominant color.
    pub color: Rgb8,
}

/// Label-wide totals of one coalition within a legislature.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CoalitionTotal {
    /// Coalition label.
    pub label: String,
    /// Seats of every member party.
    pub seats: u64,
    /// Current color of the highest-seat member, first encountered on ties.
    pub color: Rgb8,
    /// Name of that member.
    pub leading_party: String,
}

/// Coalition grouping of one legislature row.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct CoalitionLayout {
    /// One entry per party in source order; `None` outside any coalition.
    pub marks: Vec<Option<CoalitionMark>>,
    /// Visible contiguous blocks in source order.
    pub runs: Vec<CoalitionRun>,
}

/// Label-wide totals in first-appearance order.
pub fn coalition_totals(parties: &[ResolvedParty]) -> Vec<CoalitionTotal> {
    let mut totals: Vec<(CoalitionTotal, u32)> = Vec::new();
    for party in parties {
        let Some(label) = party.coalition.as_deref() else {
            continue;
        };
        match totals.iter_mut().find(|(t, _)| t.label == label) {
            Some((total, best)) => {
                total.seats += u64::from(party.deputes);
                if party.deputes > *best {
                    *best = party.deputes;
                    total.color = party.current.color;
                    total.leading_party = party.name.clone();
                }
            }
            None => totals.push((
                CoalitionTotal {
                    label: label.to_string(),
                    seats: u64::from(party.deputes),
                    color: party.current.color,
                    leading_party: party.name.clone(),
                },
                party.deputes,
            )),
        }
    }
    totals.into_iter().map(|(t, _)| t).collect()
}

/// Group parties into coalition runs.
///
/// Boundaries are searched over visible neighbours only: a hidden party never splits a run,
/// a visible party with another label (or none) always does.
pub fn group_coalitions(
    parties: &[ResolvedParty],
    spans: &[Span],
    visible: &[bool],
) -> CoalitionLayout {
    let totals = coalition_totals(parties);
    let is_visible = |i: usize| visible.get(i).copied().unwrap_or(false);
    let label_of = |i: usize| parties[i].coalition.as_deref();

    let marks = (0..parties.len())
        .map(|i| {
            let label = label_of(i)?;
            let total = totals.iter().find(|t| t.label == label)?;
            let prev = (0..i).rev().find(|&j| is_visible(j));
            let next = (i + 1..parties.len()).find(|&j| is_visible(j));
            Some(CoalitionMark {
                label: label.to_string(),
                is_first: prev.is_none_or(|j| label_of(j) != Some(label)),
                is_last: next.is_none_or(|j| label_of(j) != Some(label)),
                run_seats: total.seats,
                run_color: total.color,
            })
        })
        .collect();

    let mut runs: Vec<CoalitionRun> = Vec::new();
    let mut open: Option<CoalitionRun> = None;
    for i in (0..parties.len()).filter(|&i| is_visible(i)) {
        let span = spans.get(i).copied().unwrap_or_default();
        match (open.as_mut(), label_of(i)) {
            (Some(run), Some(label)) if run.label == label => {
                run.last = i;
                run.span = run.span.union(span);
                continue;
            }
            _ => {}
        }
        runs.extend(open.take());
        if let Some(label) = label_of(i)
            && let Some(total) = totals.iter().find(|t| t.label == label)
        {
            open = Some(CoalitionRun {
                label: label.to_string(),
                first: i,
                last: i,
                span,
                seats: total.seats,
                color: total.color,
            });
        }
    }
    runs.extend(open);

    CoalitionLayout { marks, runs }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/coalition.rs"]
mod tests;
