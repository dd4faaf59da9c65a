use std::fs;
use std::path::PathBuf;

use player_cards::attributes::Attribute;
use player_cards::config::EngineConfig;
use player_cards::engine::{RawPlayerRecord, derive_profiles};
use player_cards::rating::RatingScale;
use player_cards::reliability::{DEFAULT_GAMMA, PeerReference, PeerStats, reliability};
use player_cards::sheet::parse_players_csv;

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

fn record(surname: &str, pos: &str, apps: &str, win: &str, ast: &str, gol: &str) -> RawPlayerRecord {
    RawPlayerRecord {
        surname: surname.to_string(),
        position: pos.to_string(),
        appearances: apps.to_string(),
        win_rate: win.to_string(),
        assists_per_match: ast.to_string(),
        goals_per_match: gol.to_string(),
    }
}

/// A twelve-appearance peer so the squad maximum is 12.
fn peer() -> RawPlayerRecord {
    record("PEER", "CM", "12", "50%", "0", "0")
}

#[test]
fn striker_scenario() {
    let cfg = EngineConfig::default();
    let rows = vec![
        record("ROSSI", "ST", "10", "60%", "0,50", "1,00"),
        peer(),
        record("ZERO", "ST", "0", "", "", ""),
    ];
    let out = derive_profiles(&rows, &cfg);
    let rossi = &out[0];
    let zero = &out[2];

    assert!(rossi.rating > zero.rating);
    assert!(rossi.rating < 100);
    assert_eq!(rossi.rating, 77);
    assert!((rossi.win_rate_conservative - 0.3127).abs() < 1e-3);
    assert!(rossi.attributes.sho > rossi.attributes.pas);
    assert_eq!(rossi.attributes.sho, 93);
    assert_eq!(rossi.attributes.pas, 75);
}

#[test]
fn goalkeeper_weighting_differs() {
    let cfg = EngineConfig::default();
    let rows = vec![
        record("A", "GK", "10", "60%", "0,50", "1,00"),
        record("B", "ST", "10", "60%", "0,50", "1,00"),
        peer(),
    ];
    let out = derive_profiles(&rows, &cfg);
    assert_ne!(out[0].rating, out[1].rating);
    assert!(out[0].rating < out[1].rating);
    // Goalkeepers get the defensive bonus.
    assert!(out[0].attributes.def > out[1].attributes.def);
}

#[test]
fn zero_appearances_collapse_to_base() {
    let rows = vec![record("GHOST", "ST", "0", "90%", "2", "3"), peer()];
    let out = derive_profiles(&rows, &EngineConfig::default());
    let ghost = &out[0];
    assert_eq!(ghost.rating, 60);
    assert_eq!(ghost.win_rate_conservative, 0.0);
    assert_eq!(ghost.reliability, 0.0);
    for attr in [Attribute::Pac, Attribute::Sho, Attribute::Pas, Attribute::Dri, Attribute::Phy] {
        assert_eq!(ghost.attributes.get(attr), 55, "{attr}");
    }
    assert_eq!(ghost.attributes.def, 61);
}

#[test]
fn small_sample_does_not_outrank_proven_player() {
    let rows = vec![
        record("LUCKY", "CM", "2", "100%", "0,3", "0,3"),
        record("STEADY", "CM", "22", "91%", "0,3", "0,3"),
    ];
    let out = derive_profiles(&rows, &EngineConfig::default());
    assert!(out[0].rating < out[1].rating);
    assert!(out[0].win_rate_conservative < out[1].win_rate_conservative);
}

#[test]
fn empty_input_is_empty_output() {
    assert!(derive_profiles(&[], &EngineConfig::default()).is_empty());
}

#[test]
fn pipeline_is_idempotent() {
    let records = parse_players_csv(&read_fixture("players.csv")).expect("fixture should parse");
    let cfg = EngineConfig::default();
    let a = serde_json::to_string(&derive_profiles(&records, &cfg)).unwrap();
    let b = serde_json::to_string(&derive_profiles(&records, &cfg)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn fixture_sheet_end_to_end() {
    let records = parse_players_csv(&read_fixture("players.csv")).expect("fixture should parse");
    assert_eq!(records.len(), 6);

    let out = derive_profiles(&records, &EngineConfig::default());
    assert_eq!(out.len(), records.len());
    assert_eq!(out[0].id, "0-ROSSI-ST");
    assert_eq!(out[1].position, "GK");
    assert_eq!(out[5].name, "Player 6");
    assert_eq!(out[5].id, "5--LB");
    assert_eq!(out[5].win_rate, 0.0);
    assert_eq!(out[5].goals_per_match, 0.0);

    for p in &out {
        assert!((60..=100).contains(&p.rating), "{}", p.name);
        assert!(p.attributes.iter().all(|(_, v)| (30..=99).contains(&v)));
        assert!((0.0..=1.0).contains(&p.win_rate_conservative));
    }
}

#[test]
fn median_reference_changes_damping() {
    let records = parse_players_csv(&read_fixture("players.csv")).expect("fixture should parse");
    let full = |reference| EngineConfig {
        scale: RatingScale::Full,
        reference,
        ..EngineConfig::default()
    };
    let by_max = derive_profiles(&records, &full(PeerReference::Max));
    let by_median = derive_profiles(&records, &full(PeerReference::Median));

    // Nonzero appearances are [10, 12, 12, 2, 5]: max 12, median 10.
    let peers = PeerStats::from_appearances(by_median.iter().map(|p| p.appearances));
    assert_eq!(peers.reference(PeerReference::Max), 12.0);
    assert_eq!(peers.reference(PeerReference::Median), 10.0);
    for p in &by_median {
        let expected = reliability(p.appearances, 10.0, DEFAULT_GAMMA);
        assert!((p.reliability - expected).abs() < 1e-12, "{}", p.name);
    }
    for p in &by_max {
        let expected = reliability(p.appearances, 12.0, DEFAULT_GAMMA);
        assert!((p.reliability - expected).abs() < 1e-12, "{}", p.name);
    }

    let ratings = |rows: &[player_cards::DerivedPlayerProfile]| {
        rows.iter().map(|p| p.rating).collect::<Vec<_>>()
    };
    let max_ratings = ratings(by_max.as_slice());
    let median_ratings = ratings(by_median.as_slice());
    assert_eq!(max_ratings[0], 43, "ROSSI");
    assert_eq!(median_ratings[0], 54, "ROSSI");
    assert_eq!(max_ratings[3], 4, "NERI");
    assert_eq!(median_ratings[3], 6, "NERI");
    assert_eq!(max_ratings[5], 1, "Player 6");
    assert_eq!(median_ratings[5], 2, "Player 6");
    // GIALLI has no appearances under either reference.
    assert_eq!(max_ratings[4], 0);
    assert_eq!(median_ratings[4], 0);
    for (m, d) in max_ratings.iter().zip(&median_ratings) {
        assert!(m <= d);
    }
}
