use parlance::config::PreferenceStore;
use parlance::fonts::FONTS;
use parlance::prefs::next_candidate;
use parlance::theme::THEMES;

#[test]
fn test_fresh_store_serves_first_candidates() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path());

    assert_eq!(store.load_font(), FONTS[0]);
    assert_eq!(store.load_theme(), THEMES[0]);
}

#[test]
fn test_slots_survive_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();
    {
        let store = PreferenceStore::new(dir.path());
        store.save_font("JetBrains Mono").unwrap();
        store.save_theme(&THEMES[2]).unwrap();
    }

    let reopened = PreferenceStore::new(dir.path());
    assert_eq!(reopened.load_font(), "JetBrains Mono");
    assert_eq!(reopened.load_theme(), THEMES[2]);
}

#[test]
fn test_theme_slot_on_disk_is_camel_case_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path());
    store.save_theme(&THEMES[0]).unwrap();

    let raw = std::fs::read_to_string(dir.path().join("theme")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(value.get("color").is_some());
    assert!(value.get("background").is_some());
    assert!(value.get("linkColor").is_some());
}

#[test]
fn test_corrupt_slots_recover_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path());
    std::fs::write(dir.path().join("theme"), "]]] not json").unwrap();
    std::fs::write(dir.path().join("font"), "   ").unwrap();

    assert_eq!(store.load_theme(), THEMES[0]);
    assert_eq!(store.load_font(), FONTS[0]);
}

#[test]
fn test_cycling_a_stored_preference_walks_the_candidate_list() {
    let dir = tempfile::tempdir().unwrap();
    let store = PreferenceStore::new(dir.path());

    // walk the whole theme list through the store, as repeated sessions would
    let mut active = store.load_theme();
    for _ in 0..THEMES.len() {
        let next = next_candidate(&active, THEMES.as_slice()).clone();
        store.save_theme(&next).unwrap();
        active = store.load_theme();
    }
    assert_eq!(active, THEMES[0], "a full pass returns to the start");
}
