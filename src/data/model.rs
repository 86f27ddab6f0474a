use crate::{
    foundation::color::Rgb8,
    foundation::error::{HemicycleError, HemicycleResult},
    timeline::index::TimeMarker,
};

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Contents of the republics file.
pub struct RepublicsFile {
    /// Republics in chronological order.
    pub republics: Vec<Republic>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A constitutional era.
pub struct Republic {
    /// Display name ("Ve République").
    pub name: String,
    /// Optional begin date, cosmetic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub begin: Option<String>,
    /// Optional end date, cosmetic.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
    /// Legislatures in chronological order.
    pub legislatures: Vec<Legislature>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// One elected assembly's term.
pub struct Legislature {
    /// Ordinal within its republic. Not unique across republics.
    pub legislature: u32,
    /// ISO begin date.
    pub begin: String,
    /// ISO end date or `"now"`.
    pub end: String,
    /// Nominal seat total. May differ from the sum of party seats.
    pub total_deputes: u32,
    /// Duration in years as stored by the data converter, informative only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    /// Parties in display order.
    pub parties: Vec<PartySeats>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A party's seats in one legislature, as stored.
pub struct PartySeats {
    /// Party short name, resolved against the currents file.
    pub name: String,
    /// Seats held.
    #[serde(default)]
    pub deputes: u32,
    /// Coalition label shared with adjacent parties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coalition: Option<String>,
    /// Notable members, cosmetic.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub persons: Vec<String>,
    /// Source references, cosmetic.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source: Vec<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Contents of the currents file.
pub struct CurrentsFile {
    /// Families of currents, in display order.
    pub families: Vec<Family>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Cosmetic grouping of currents.
pub struct Family {
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Family color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb8>,
    /// Currents in spectrum order.
    pub currents: Vec<Current>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A political current (family of parties across time).
pub struct Current {
    /// Current name. Compared after trimming.
    pub name: String,
    /// Display color.
    pub color: Rgb8,
    /// Disambiguation hint for external lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Parties owned by this current, in spectrum order.
    pub parties: Vec<CurrentParty>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A party record as listed under its current.
pub struct CurrentParty {
    /// Short name, matched against [`PartySeats::name`].
    pub name: String,
    /// Long name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Disambiguation hint for external lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
/// Contents of the events file. Consumed by presentation layers only.
pub struct EventsFile {
    /// Historical events.
    pub events: Vec<Event>,
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// A dated historical event.
pub struct Event {
    /// ISO begin date.
    pub begin: String,
    /// ISO end date or `"now"`.
    pub end: String,
    /// Title.
    pub title: String,
    /// Event category ("Cohabitation", "Référendum", ...).
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Disambiguation hint for external lookups.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    /// Source references.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source: Vec<String>,
}

impl RepublicsFile {
    /// Validate names and dates. Malformed dates are fatal.
    pub fn validate(&self) -> HemicycleResult<()> {
        if self.republics.is_empty() {
            return Err(HemicycleError::validation("republics file has no republic"));
        }
        for republic in &self.republics {
            if republic.name.trim().is_empty() {
                return Err(HemicycleError::validation("republic name must be non-empty"));
            }
            for leg in &republic.legislatures {
                leg.validate().map_err(|e| {
                    prefix_error(e, &format!("{} legislature {}", republic.name, leg.legislature))
                })?;
            }
        }
        Ok(())
    }
}

impl Legislature {
    /// Validate dates.
    ///
    /// Only unparseable dates are fatal. A reversed range is logged and later drawn as a
    /// zero-height band; blank party names surface as resolution gaps.
    pub fn validate(&self) -> HemicycleResult<()> {
        let begin = TimeMarker::parse(&self.begin)?;
        if begin.is_now() {
            return Err(HemicycleError::validation("begin must be a date, not \"now\""));
        }
        let end = TimeMarker::parse(&self.end)?;
        if let (TimeMarker::At(b), TimeMarker::At(e)) = (begin, end)
            && e < b
        {
            tracing::warn!(
                legislature = self.legislature,
                begin = %self.begin,
                end = %self.end,
                "legislature ends before it begins"
            );
        }
        Ok(())
    }
}

impl CurrentsFile {
    /// Validate current and party names.
    pub fn validate(&self) -> HemicycleResult<()> {
        for current in self.families.iter().flat_map(|f| &f.currents) {
            if current.name.trim().is_empty() {
                return Err(HemicycleError::validation("current name must be non-empty"));
            }
            for party in &current.parties {
                if party.name.trim().is_empty() {
                    return Err(HemicycleError::validation(format!(
                        "current \"{}\" lists a party with an empty name",
                        current.name.trim()
                    )));
                }
            }
        }
        Ok(())
    }

    /// All currents in file order, families flattened.
    pub fn currents(&self) -> impl Iterator<Item = &Current> {
        self.families.iter().flat_map(|f| f.currents.iter())
    }
}

impl EventsFile {
    /// Validate event dates and titles.
    pub fn validate(&self) -> HemicycleResult<()> {
        for event in &self.events {
            if event.title.trim().is_empty() {
                return Err(HemicycleError::validation("event title must be non-empty"));
            }
            TimeMarker::parse(&event.begin).map_err(|e| prefix_error(e, &event.title))?;
            TimeMarker::parse(&event.end).map_err(|e| prefix_error(e, &event.title))?;
        }
        Ok(())
    }
}

fn prefix_error(err: HemicycleError, context: &str) -> HemicycleError {
    match err {
        HemicycleError::Validation(msg) => HemicycleError::validation(format!("{context}: {msg}")),
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/model.rs"]
mod tests;
