use std::collections::BTreeSet;

use crate::resolve::registry::{CurrentRegistry, ResolvedParty};

/// Set of enabled current names, owned by the caller and passed to every layout call.
///
/// Membership is by trimmed name so that merged or re-resolved currents compare equal.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VisibleCurrents {
    names: BTreeSet<String>,
}

impl VisibleCurrents {
    /// Every current of the registry.
    pub fn all(registry: &CurrentRegistry) -> Self {
        Self::only(registry.currents().iter().map(|c| c.name.as_str()))
    }

    /// No current at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Exactly the given current names.
    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_string())
                .collect(),
        }
    }

    /// Whether a current name is enabled.
    pub fn contains(&self, current_name: &str) -> bool {
        self.names.contains(current_name.trim())
    }

    /// Enable a current. Returns `true` when it was hidden.
    pub fn insert(&mut self, current_name: &str) -> bool {
        self.names.insert(current_name.trim().to_string())
    }

    /// Hide a current. Returns `true` when it was enabled.
    pub fn remove(&mut self, current_name: &str) -> bool {
        self.names.remove(current_name.trim())
    }

    /// Flip a current. Returns its new state.
    pub fn toggle(&mut self, current_name: &str) -> bool {
        if self.remove(current_name) {
            false
        } else {
            self.insert(current_name)
        }
    }

    /// Number of enabled currents.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no current is enabled.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Enabled names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Whether a party's owning current is enabled.
pub fn is_party_visible(party: &ResolvedParty, visible: &VisibleCurrents) -> bool {
    visible.contains(&party.current.name)
}

/// Visibility of each party, in source order.
pub fn visibility_mask(parties: &[ResolvedParty], visible: &VisibleCurrents) -> Vec<bool> {
    parties
        .iter()
        .map(|p| is_party_visible(p, visible))
        .collect()
}

/// Seat sum over visible parties; the proportional denominator.
pub fn filtered_total(parties: &[ResolvedParty], visible: &VisibleCurrents) -> u64 {
    parties
        .iter()
        .filter(|p| is_party_visible(p, visible))
        .map(|p| u64::from(p.deputes))
        .sum()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/visibility.rs"]
mod tests;
