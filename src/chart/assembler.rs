use crate::{
    chart::meta::summarize_legislature,
    chart::primitives::{Bar, ChartLayout, CoalitionOutline, LegislatureRef, Polygon},
    data::model::{CurrentsFile, RepublicsFile},
    foundation::error::{HemicycleError, HemicycleResult},
    layout::coalition::group_coalitions,
    layout::proportional::{RowLayout, layout_row},
    layout::transition::{LaidOutRow, TransitionBand, build_transitions},
    layout::visibility::VisibleCurrents,
    resolve::registry::{CurrentRegistry, ResolutionGap, ResolvedLegislature},
    timeline::index::{TimelineClock, pixel_y},
};

/// Row height divisor when transitions are shown: the bar takes `1 / 1.75` of its row.
pub const TRANSITION_HEIGHT_SHARE: f64 = 1.75;

/// Geometry options of a layout pass.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Horizontal extent every row partitions, in pixels.
    pub graph_width: f64,
    /// Pixels per year of timeline.
    pub row_height: f64,
    /// Reserve part of each row for transition polygons.
    pub transitions_visible: bool,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            graph_width: 1000.0,
            row_height: 28.0,
            transitions_visible: true,
        }
    }
}

impl LayoutOptions {
    /// Reject non-finite or negative dimensions.
    pub fn validate(&self) -> HemicycleResult<()> {
        if !self.graph_width.is_finite() || self.graph_width < 0.0 {
            return Err(HemicycleError::layout(format!(
                "graph_width must be finite and >= 0, got {}",
                self.graph_width
            )));
        }
        if !self.row_height.is_finite() || self.row_height < 0.0 {
            return Err(HemicycleError::layout(format!(
                "row_height must be finite and >= 0, got {}",
                self.row_height
            )));
        }
        Ok(())
    }

    /// Divisor applied to a row's full height to get its bar height.
    pub fn height_share(&self) -> f64 {
        if self.transitions_visible {
            TRANSITION_HEIGHT_SHARE
        } else {
            1.0
        }
    }
}

/// A republic with its legislatures resolved.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedRepublic {
    /// Republic name.
    pub name: String,
    /// Legislatures in source order.
    pub legislatures: Vec<ResolvedLegislature>,
}

/// Dataset resolved once and reused across layout passes.
#[derive(Clone, Debug)]
pub struct ChartData {
    registry: CurrentRegistry,
    republics: Vec<ResolvedRepublic>,
    gaps: Vec<ResolutionGap>,
    extent: (f64, f64),
    clock: TimelineClock,
}

impl ChartData {
    /// Resolve every party against the currents and index the timeline.
    ///
    /// Malformed dates or colors are fatal; unresolvable parties are recorded as gaps.
    #[tracing::instrument(skip(republics, currents))]
    pub fn prepare(
        republics: &RepublicsFile,
        currents: &CurrentsFile,
        clock: TimelineClock,
    ) -> HemicycleResult<Self> {
        republics.validate()?;
        let registry = CurrentRegistry::build(currents)?;

        let mut resolved = Vec::with_capacity(republics.republics.len());
        let mut gaps = Vec::new();
        for republic in &republics.republics {
            let mut legislatures = Vec::with_capacity(republic.legislatures.len());
            for leg in &republic.legislatures {
                let (leg, mut missing) =
                    registry.resolve_legislature(&republic.name, leg, &clock)?;
                legislatures.push(leg);
                gaps.append(&mut missing);
            }
            resolved.push(ResolvedRepublic {
                name: republic.name.clone(),
                legislatures,
            });
        }

        let mut legs = resolved.iter().flat_map(|r| r.legislatures.iter());
        let extent = match legs.next() {
            Some(first) => {
                let lo = first.begin_coord.min(first.end_coord);
                let hi = first.begin_coord.max(first.end_coord);
                legs.fold((lo, hi), |(lo, hi), l| {
                    (lo.min(l.begin_coord).min(l.end_coord), hi.max(l.end_coord).max(l.begin_coord))
                })
            }
            None => (0.0, 0.0),
        };

        tracing::debug!(
            republics = resolved.len(),
            currents = registry.len(),
            gaps = gaps.len(),
            "chart data prepared"
        );

        Ok(Self {
            registry,
            republics: resolved,
            gaps,
            extent,
            clock,
        })
    }

    /// Merged currents.
    pub fn registry(&self) -> &CurrentRegistry {
        &self.registry
    }

    /// Resolved republics in source order.
    pub fn republics(&self) -> &[ResolvedRepublic] {
        &self.republics
    }

    /// Parties dropped at resolution time.
    pub fn resolution_gaps(&self) -> &[ResolutionGap] {
        &self.gaps
    }

    /// `[earliest begin, latest end]` in year coordinates.
    pub fn timeline_extent(&self) -> (f64, f64) {
        self.extent
    }

    /// Clock used to resolve `"now"`.
    pub fn clock(&self) -> TimelineClock {
        self.clock
    }

    /// Every current of the registry visible.
    pub fn all_visible(&self) -> VisibleCurrents {
        VisibleCurrents::all(&self.registry)
    }
}

/// Lay out the whole chart for one visibility configuration.
///
/// The first legislature of the next republic is used as the transition target of each
/// republic's last legislature, but is only drawn as part of its own republic.
#[tracing::instrument(skip(data, visible))]
pub fn compute_chart_layout(
    data: &ChartData,
    visible: &VisibleCurrents,
    options: &LayoutOptions,
) -> HemicycleResult<ChartLayout> {
    options.validate()?;
    let width = options.graph_width;
    let share = options.height_share();
    let (origin, end) = data.extent;

    let mut out = ChartLayout {
        bars: Vec::new(),
        polygons: Vec::new(),
        coalition_runs: Vec::new(),
        legislature_meta: Vec::new(),
        timeline_extent: data.extent,
        width,
        height: pixel_y(end, origin, options.row_height).max(0.0),
        resolution_gaps: data.gaps.clone(),
    };

    for (r, republic) in data.republics.iter().enumerate() {
        let successor = data
            .republics
            .get(r + 1)
            .and_then(|next| next.legislatures.first());
        let chain: Vec<&ResolvedLegislature> =
            republic.legislatures.iter().chain(successor).collect();
        let rows: Vec<RowLayout> = chain
            .iter()
            .map(|leg| layout_row(&leg.parties, visible, width))
            .collect();

        for (l, leg) in republic.legislatures.iter().enumerate() {
            let row = &rows[l];
            let next = chain.get(l + 1).zip(rows.get(l + 1));
            let legislature = LegislatureRef {
                republic: republic.name.clone(),
                republic_index: r,
                legislature_index: l,
                number: leg.number,
                chart_index: out.legislature_meta.len(),
            };

            let y = pixel_y(leg.begin_coord, origin, options.row_height);
            let row_end = next.map_or(leg.end_coord, |(n, _)| n.begin_coord);
            let full = pixel_y(row_end, leg.begin_coord, options.row_height).max(0.0);
            let bar_height = full / share;

            let coalitions = group_coalitions(&leg.parties, &row.spans, &row.visible);
            for (i, (party, span)) in leg.parties.iter().zip(&row.spans).enumerate() {
                out.bars.push(Bar {
                    legislature: legislature.clone(),
                    party_index: i,
                    party_name: party.name.clone(),
                    full_name: party.full_name.clone(),
                    current_name: party.current.name.clone(),
                    current_id: party.current.id,
                    color: party.current.color,
                    deputes: party.deputes,
                    x: span.x0,
                    width: span.width(),
                    y,
                    height: bar_height,
                    coalition: coalitions.marks.get(i).cloned().flatten(),
                });
            }

            if let Some((next_leg, next_row)) = next {
                let band = TransitionBand {
                    y_top: y + bar_height,
                    y_bottom: y + full,
                };
                let from = LaidOutRow::new(&leg.parties, row);
                let to = LaidOutRow::new(&next_leg.parties, next_row);
                for shape in build_transitions(&from, &to, width, band) {
                    let party = &leg.parties[shape.from_index];
                    let mark = coalitions.marks.get(shape.from_index).and_then(Option::as_ref);
                    out.polygons.push(Polygon {
                        legislature: legislature.clone(),
                        party_index: shape.from_index,
                        party_name: party.name.clone(),
                        current_name: party.current.name.clone(),
                        color: party.current.color,
                        coalition_color: mark.map(|m| m.run_color),
                        is_coalition_flow: mark.is_some(),
                        target: shape.target,
                        points: shape.points,
                    });
                }
            }

            out.coalition_runs
                .extend(coalitions.runs.into_iter().map(|run| CoalitionOutline {
                    legislature: legislature.clone(),
                    run,
                    y,
                    height: bar_height,
                }));

            out.legislature_meta
                .push(summarize_legislature(leg, legislature, row, y, bar_height));
        }
    }

    tracing::debug!(
        bars = out.bars.len(),
        polygons = out.polygons.len(),
        coalition_runs = out.coalition_runs.len(),
        legislatures = out.legislature_meta.len(),
        height = out.height,
        "chart layout computed"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/chart/assembler.rs"]
mod tests;
