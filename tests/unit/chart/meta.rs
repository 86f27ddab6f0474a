use super::*;
use crate::foundation::core::Span;
use crate::resolve::registry::{CurrentId, CurrentRef, ResolvedParty};

fn party(name: &str, deputes: u32, coalition: Option<&str>) -> ResolvedParty {
    ResolvedParty {
        name: name.to_string(),
        full_name: Some(format!("Parti {name}")),
        keyword: None,
        deputes,
        coalition: coalition.map(str::to_string),
        persons: vec![],
        current: CurrentRef {
            id: CurrentId(0),
            name: format!("current-{name}"),
            color: Rgb8::rgb(10, 20, 30),
        },
    }
}

fn legislature(parties: Vec<ResolvedParty>, ongoing: bool) -> ResolvedLegislature {
    ResolvedLegislature {
        republic: "Ve".to_string(),
        number: 16,
        begin: "2022-06-28".to_string(),
        end: if ongoing { "now" } else { "2024-06-09" }.to_string(),
        begin_coord: 2022.49,
        end_coord: 2024.44,
        begin_year: 2022,
        end_year: (!ongoing).then_some(2024),
        ongoing,
        total_deputes: 577,
        parties,
    }
}

fn reference() -> LegislatureRef {
    LegislatureRef {
        republic: "Ve".to_string(),
        republic_index: 0,
        legislature_index: 15,
        number: 16,
        chart_index: 0,
    }
}

fn row(filtered_total: u64) -> RowLayout {
    RowLayout {
        spans: vec![Span::default(); 3],
        visible: vec![true; 3],
        filtered_total,
        graph_width: 100.0,
    }
}

#[test]
fn coalition_outweighs_its_biggest_party() {
    let leg = legislature(
        vec![
            party("LFI", 75, Some("NUPES")),
            party("PS", 31, Some("NUPES")),
            party("RE", 170, Some("Ensemble")),
        ],
        false,
    );
    let meta = summarize_legislature(&leg, reference(), &row(276), 5.0, 12.0);

    let p = meta.leading_party.as_ref().unwrap();
    assert_eq!(p.name, "RE");
    assert_eq!(p.full_name.as_deref(), Some("Parti RE"));
    assert!((p.share - 100.0 * 170.0 / 577.0).abs() < 1e-12);

    let c = meta.leading_coalition.as_ref().unwrap();
    assert_eq!((c.label.as_str(), c.deputes), ("Ensemble", 170));
    assert!(!meta.party_outweighs_coalition);

    assert_eq!(meta.total_deputes, 577);
    assert_eq!(meta.seated_deputes, 276);
    assert_eq!((meta.begin_year, meta.end_year), (2022, Some(2024)));
    assert_eq!((meta.y, meta.height), (5.0, 12.0));
}

#[test]
fn party_wins_without_coalitions() {
    let leg = legislature(vec![party("A", 10, None), party("B", 10, None)], true);
    let meta = summarize_legislature(&leg, reference(), &row(20), 0.0, 0.0);
    assert_eq!(meta.leading_party.unwrap().name, "A");
    assert!(meta.leading_coalition.is_none());
    assert!(meta.party_outweighs_coalition);
    assert_eq!(meta.end_year, None);
}

#[test]
fn totals_are_kept_apart() {
    let leg = legislature(vec![party("A", 10, Some("X")), party("B", 30, None)], false);
    let meta = summarize_legislature(&leg, reference(), &row(10), 0.0, 0.0);
    assert_eq!(meta.filtered_deputes, 10);
    assert_eq!(meta.seated_deputes, 40);
    assert_eq!(meta.total_deputes, 577);
    assert!(meta.party_outweighs_coalition);
}

#[test]
fn empty_legislature_has_no_leader() {
    let meta = summarize_legislature(&legislature(vec![], false), reference(), &row(0), 0.0, 0.0);
    assert!(meta.leading_party.is_none());
    assert!(!meta.party_outweighs_coalition);
}

#[test]
fn share_of_zero_total() {
    assert_eq!(share_of(5, 0), 0.0);
    assert_eq!(share_of(1, 4), 25.0);
}
