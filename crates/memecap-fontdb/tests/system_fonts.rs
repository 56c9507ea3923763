//! Resolution against whatever fonts the machine has installed
//!
//! Hosts without fonts skip the checks that need one.

use std::sync::Arc;

use memecap_core::FontFamily;
use memecap_fontdb::FontDatabase;

fn any_family(db: &FontDatabase) -> Option<FontFamily> {
    db.families().into_iter().next().map(FontFamily::new)
}

#[test]
fn test_resolution_is_cached() {
    let db = FontDatabase::with_system_fonts();
    let Some(family) = any_family(&db) else {
        eprintln!("no system fonts, skipping");
        return;
    };

    let first = db.resolve(&family).unwrap();
    let second = db.resolve(&family).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(db.is_resolved(&family));
}

#[test]
fn test_resolved_font_has_sane_metrics() {
    let db = FontDatabase::with_system_fonts();
    let Some(family) = any_family(&db) else {
        return;
    };

    let font = db.resolve(&family).unwrap();
    assert!(font.units_per_em() > 0);
    assert!(font.ascent_ratio() > 0.0);
    assert!(font.descent_ratio() <= 0.0);

    let ratio = font.width_ratio(' ').unwrap();
    assert!(ratio.is_finite() && ratio >= 0.0);
}

#[test]
fn test_registered_font_answers_for_alias() {
    let db = FontDatabase::with_system_fonts();
    let Some(family) = any_family(&db) else {
        return;
    };

    let font = db.resolve(&family).unwrap();
    db.register(FontFamily::impact(), Arc::clone(&font));

    assert!(Arc::ptr_eq(&db.resolve(&FontFamily::impact()).unwrap(), &font));
    assert!(db.families().contains(&"Impact".to_string()));
}
