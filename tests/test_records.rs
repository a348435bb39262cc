use waste_management::entities::{GuestKind, MAX_ENCYCLOPEDIA_LEVEL};
use waste_management::records::*;

#[test]
fn missing_records_read_as_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    assert_eq!(store.load().unwrap(), Records::default());
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path().join("nested"));
    let records = Records {
        p1_best: 7,
        p2_best: 10,
        encyclopedia_level: 2,
    };
    store.save(&records).unwrap();
    assert_eq!(store.load().unwrap(), records);
    assert!(store.records_path().ends_with(RECORDS_FILE));
}

#[test]
fn save_writes_the_encyclopedia() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    store
        .save(&Records {
            encyclopedia_level: 1,
            ..Records::default()
        })
        .unwrap();

    let text = std::fs::read_to_string(store.encyclopedia_path()).unwrap();
    assert!(text.starts_with("ENCYCLOPEDIA - 1 OF 3 SPECIES FOUND"));
    assert!(text.contains("TURTLE"));
    assert!(!text.contains("DOLPHIN"));
}

#[test]
fn malformed_records_are_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    std::fs::write(store.records_path(), "{ not json").unwrap();
    assert!(matches!(store.load(), Err(RecordsError::Parse { .. })));
}

#[test]
fn best_scores_survive_a_worse_session() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use waste_management::compute::init_session;

    let dir = tempfile::tempdir().unwrap();
    let store = RecordStore::new(dir.path());
    store
        .save(&Records {
            p1_best: 6,
            p2_best: 1,
            encyclopedia_level: 0,
        })
        .unwrap();

    let mut session = init_session(&store.load().unwrap(), &mut StdRng::seed_from_u64(3));
    for _ in 0..3 {
        session.players[0].credit_evaded();
        session.players[1].credit_evaded();
    }
    store.save(&session.records()).unwrap();

    let saved = store.load().unwrap();
    assert_eq!(saved.p1_best, 6);
    assert_eq!(saved.p2_best, 3);
}

// ── Encyclopedia ──────────────────────────────────────────────────────────────

#[test]
fn encyclopedia_starts_empty() {
    let text = encyclopedia_text(0);
    assert!(text.starts_with("ENCYCLOPEDIA - 0 OF 3 SPECIES FOUND"));
    assert_eq!(text.matches("??????").count(), 3);
    for kind in GuestKind::ALL {
        assert!(!text.contains(kind.name()));
    }
}

#[test]
fn encyclopedia_lists_species_in_unlock_order() {
    let text = encyclopedia_text(MAX_ENCYCLOPEDIA_LEVEL);
    let turtle = text.find("TURTLE").unwrap();
    let dolphin = text.find("DOLPHIN").unwrap();
    let whale = text.find("WHALE").unwrap();
    assert!(turtle < dolphin && dolphin < whale);
    assert!(!text.contains("??????"));
    for kind in GuestKind::ALL {
        assert!(text.contains(species_entry(kind)));
    }
}

#[test]
fn encyclopedia_level_beyond_max_is_clamped() {
    assert_eq!(encyclopedia_text(9), encyclopedia_text(MAX_ENCYCLOPEDIA_LEVEL));
}
