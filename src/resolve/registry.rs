use std::collections::BTreeMap;

use crate::{
    data::model::{CurrentParty, CurrentsFile, Legislature, PartySeats},
    foundation::color::Rgb8,
    foundation::error::HemicycleResult,
    timeline::index::{TimeMarker, TimelineClock},
};

/// Index of a merged current in its [`CurrentRegistry`].
///
/// Indices follow first-seen file order, which is the left/right spectrum order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CurrentId(pub usize);

/// A current after whitespace-duplicate merging.
#[derive(Clone, Debug, serde::Serialize)]
pub struct CurrentInfo {
    /// Trimmed name.
    pub name: String,
    /// Color of the first record seen under this name.
    pub color: Rgb8,
    /// Keyword of the first record seen under this name.
    pub keyword: Option<String>,
    /// Family of the first record seen under this name.
    pub family: Option<String>,
    /// Concatenated party records of every merged record.
    pub parties: Vec<CurrentParty>,
}

/// The owning current carried by each resolved party.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CurrentRef {
    /// Registry index, also the spectrum rank.
    pub id: CurrentId,
    /// Trimmed current name, the cross-legislature identity.
    pub name: String,
    /// Current color.
    pub color: Rgb8,
}

/// A party enriched with its owning current.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedParty {
    /// Short name.
    pub name: String,
    /// Long name, taken from the current's party record.
    pub full_name: Option<String>,
    /// Keyword, taken from the current's party record.
    pub keyword: Option<String>,
    /// Seats held.
    pub deputes: u32,
    /// Trimmed coalition label; blank labels are dropped.
    pub coalition: Option<String>,
    /// Notable members.
    pub persons: Vec<String>,
    /// Owning current.
    pub current: CurrentRef,
}

/// A legislature whose parties have been resolved and dates parsed.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedLegislature {
    /// Owning republic name.
    pub republic: String,
    /// Ordinal within the republic.
    pub number: u32,
    /// Raw begin date.
    pub begin: String,
    /// Raw end date (`"now"` for the ongoing legislature).
    pub end: String,
    /// Year coordinate of `begin`.
    pub begin_coord: f64,
    /// Year coordinate of `end`, padded when ongoing.
    pub end_coord: f64,
    /// Calendar year of `begin`.
    pub begin_year: i32,
    /// Calendar year of `end`, `None` while ongoing.
    pub end_year: Option<i32>,
    /// Whether `end` is the `"now"` sentinel.
    pub ongoing: bool,
    /// Nominal seat total.
    pub total_deputes: u32,
    /// Resolved parties in source order.
    pub parties: Vec<ResolvedParty>,
}

/// A party dropped because no current lists it.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ResolutionGap {
    /// Republic name.
    pub republic: String,
    /// Legislature ordinal.
    pub legislature: u32,
    /// Unresolved party name.
    pub party: String,
}

/// Lookup from party names to their owning currents, built once per dataset.
#[derive(Clone, Debug, Default)]
pub struct CurrentRegistry {
    currents: Vec<CurrentInfo>,
    by_name: BTreeMap<String, CurrentId>,
    by_party: BTreeMap<String, CurrentId>,
}

impl CurrentRegistry {
    /// Merge currents by trimmed name and index their parties.
    #[tracing::instrument(skip(file))]
    pub fn build(file: &CurrentsFile) -> HemicycleResult<Self> {
        file.validate()?;

        let mut reg = Self::default();
        for family in &file.families {
            for current in &family.currents {
                let name = current.name.trim();
                let id = match reg.by_name.get(name) {
                    Some(&id) => {
                        tracing::debug!(current = name, "merging whitespace-duplicate current");
                        reg.currents[id.0]
                            .parties
                            .extend(current.parties.iter().cloned());
                        id
                    }
                    None => {
                        let id = CurrentId(reg.currents.len());
                        reg.currents.push(CurrentInfo {
                            name: name.to_string(),
                            color: current.color,
                            keyword: current.keyword.clone(),
                            family: family.name.as_ref().map(|n| n.trim().to_string()),
                            parties: current.parties.clone(),
                        });
                        reg.by_name.insert(name.to_string(), id);
                        id
                    }
                };

                for party in &current.parties {
                    let key = party.name.trim();
                    match reg.by_party.get(key) {
                        Some(&owner) if owner != id => tracing::warn!(
                            party = key,
                            owner = reg.currents[owner.0].name.as_str(),
                            ignored = name,
                            "party listed under several currents; keeping the first"
                        ),
                        Some(_) => {}
                        None => {
                            reg.by_party.insert(key.to_string(), id);
                        }
                    }
                }
            }
        }
        Ok(reg)
    }

    /// Number of merged currents.
    pub fn len(&self) -> usize {
        self.currents.len()
    }

    /// Whether the registry holds no current.
    pub fn is_empty(&self) -> bool {
        self.currents.is_empty()
    }

    /// Merged currents in spectrum order.
    pub fn currents(&self) -> &[CurrentInfo] {
        &self.currents
    }

    /// Current by registry index.
    pub fn get(&self, id: CurrentId) -> Option<&CurrentInfo> {
        self.currents.get(id.0)
    }

    /// Current by (untrimmed) name.
    pub fn by_name(&self, name: &str) -> Option<(CurrentId, &CurrentInfo)> {
        let id = *self.by_name.get(name.trim())?;
        Some((id, &self.currents[id.0]))
    }

    /// Owning current of a party name.
    pub fn owner_of(&self, party_name: &str) -> Option<(CurrentId, &CurrentInfo)> {
        let id = *self.by_party.get(party_name.trim())?;
        Some((id, &self.currents[id.0]))
    }

    /// Enrich one party; `None` when no current lists it.
    pub fn resolve_party(&self, party: &PartySeats) -> Option<ResolvedParty> {
        let name = party.name.trim();
        let (id, current) = self.owner_of(name)?;
        let record = current.parties.iter().find(|p| p.name.trim() == name);
        Some(ResolvedParty {
            name: name.to_string(),
            full_name: record.and_then(|r| r.full_name.clone()),
            keyword: record.and_then(|r| r.keyword.clone()),
            deputes: party.deputes,
            coalition: party
                .coalition
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            persons: party.persons.clone(),
            current: CurrentRef {
                id,
                name: current.name.clone(),
                color: current.color,
            },
        })
    }

    /// Resolve every party of a legislature and parse its dates.
    ///
    /// Unresolvable parties are dropped and reported; malformed dates are fatal.
    pub fn resolve_legislature(
        &self,
        republic: &str,
        leg: &Legislature,
        clock: &TimelineClock,
    ) -> HemicycleResult<(ResolvedLegislature, Vec<ResolutionGap>)> {
        leg.validate()?;
        let begin = TimeMarker::parse(&leg.begin)?;
        let end = TimeMarker::parse(&leg.end)?;

        let mut parties = Vec::with_capacity(leg.parties.len());
        let mut gaps = Vec::new();
        for party in &leg.parties {
            match self.resolve_party(party) {
                Some(p) => parties.push(p),
                None => {
                    tracing::warn!(
                        republic,
                        legislature = leg.legislature,
                        party = party.name.as_str(),
                        "party has no owning current; dropped from layout"
                    );
                    gaps.push(ResolutionGap {
                        republic: republic.to_string(),
                        legislature: leg.legislature,
                        party: party.name.trim().to_string(),
                    });
                }
            }
        }

        Ok((
            ResolvedLegislature {
                republic: republic.to_string(),
                number: leg.legislature,
                begin: leg.begin.clone(),
                end: leg.end.clone(),
                begin_coord: begin.coordinate(clock),
                end_coord: end.coordinate(clock),
                begin_year: begin.calendar_year().unwrap_or_default(),
                end_year: end.calendar_year(),
                ongoing: end.is_now(),
                total_deputes: leg.total_deputes,
                parties,
            },
            gaps,
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resolve/registry.rs"]
mod tests;
