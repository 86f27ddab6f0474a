use super::*;
use serde_json::json;

fn leg(begin: &str, end: &str) -> Legislature {
    Legislature {
        legislature: 1,
        begin: begin.to_string(),
        end: end.to_string(),
        total_deputes: 10,
        duration: None,
        parties: vec![PartySeats {
            name: "PCF".to_string(),
            deputes: 10,
            coalition: None,
            persons: vec![],
            source: vec![],
        }],
    }
}

#[test]
fn legislature_accepts_now_end() {
    leg("2024-07-18", "now").validate().unwrap();
}

#[test]
fn legislature_rejects_malformed_dates() {
    assert!(leg("1958-12-xx", "1962-10-09").validate().is_err());
    assert!(leg("now", "1962-10-09").validate().is_err());
}

#[test]
fn reversed_range_and_blank_party_are_not_fatal() {
    leg("1962-10-09", "1958-12-09").validate().unwrap();

    let mut blank = leg("1958-12-09", "1962-10-09");
    blank.parties[0].name = " ".to_string();
    blank.validate().unwrap();
}

#[test]
fn republics_error_names_the_legislature() {
    let file = RepublicsFile {
        republics: vec![Republic {
            name: "Ve".to_string(),
            begin: None,
            end: None,
            legislatures: vec![leg("bogus", "now")],
        }],
    };
    let err = file.validate().unwrap_err().to_string();
    assert!(err.contains("Ve legislature 1"), "{err}");
    assert!(err.contains("bogus"), "{err}");
}

#[test]
fn party_defaults_apply_when_fields_are_missing() {
    let p: PartySeats = serde_json::from_value(json!({ "name": "SFIO" })).unwrap();
    assert_eq!(p.deputes, 0);
    assert!(p.coalition.is_none());
    assert!(p.persons.is_empty());
}

#[test]
fn currents_reject_blank_names() {
    let file: CurrentsFile = serde_json::from_value(json!({
        "families": [{ "currents": [{ "name": "  ", "color": "#000000", "parties": [] }] }]
    }))
    .unwrap();
    assert!(file.validate().is_err());
}

#[test]
fn event_type_field_is_renamed() {
    let file: EventsFile = serde_json::from_value(json!({
        "events": [{ "begin": "1986-03-20", "end": "1988-05-10", "title": "Cohabitation", "type": "Cohabitation" }]
    }))
    .unwrap();
    file.validate().unwrap();
    assert_eq!(file.events[0].kind.as_deref(), Some("Cohabitation"));
}
