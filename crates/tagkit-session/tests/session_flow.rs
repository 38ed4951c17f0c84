//! End-to-end key handling against an in-memory host.
//!
//! Failure paths are checked through the diagnostics they leave behind.

use tagkit_fonts::{Catalog, CatalogError, FontFace, KeyOptions, NormalizationForm, StaticFonts};
use tagkit_session::testing::MemoryHost;
use tagkit_session::{KeyCode, KeyEvent, Modifiers, Session, SessionConfig, SessionError};
use tracing_test::traced_test;

fn alt(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code).with_modifiers(Modifiers::ALT)
}

fn alt_shift(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code).with_modifiers(Modifiers::ALT | Modifiers::SHIFT)
}

fn japanese_session() -> Session {
    let mut source = StaticFonts(vec![
        FontFace::outline("ＭＳ Ｐゴシック"),
        FontFace::outline("ＭＳ ゴシック"),
        FontFace::outline("@ＭＳ ゴシック"),
        FontFace::outline("メイリオ"),
        FontFace::outline("Arial"),
        FontFace::raster("Terminal"),
    ]);
    Session::start(&mut source, SessionConfig::default())
}

// =========================================================================
// Editing sequences
// =========================================================================

#[test]
fn nudging_a_spawned_tag_round_trips() {
    let session = japanese_session();
    let mut host = MemoryHost::new("今日は").with_caret("今日".len());

    assert!(session.handle_key(&mut host, alt(KeyCode::Down)));
    assert_eq!(host.text, "今日<p+0,+1>は");

    // The caret now sits inside the spawned tag, so the same tag is edited.
    assert!(session.handle_key(&mut host, alt_shift(KeyCode::Left)));
    assert_eq!(host.text, "今日<p-10,+1>は");

    assert!(session.handle_key(&mut host, alt_shift(KeyCode::Right)));
    assert!(session.handle_key(&mut host, alt(KeyCode::Up)));
    assert_eq!(host.text, "今日は");
    assert_eq!(host.caret(), Some("今日".len()));
    assert_eq!(host.changes, 4);
}

#[test]
fn absolute_position_saturates_at_zero() {
    let session = japanese_session();
    let mut host = MemoryHost::new("<p0,5>").with_caret(2);
    assert!(!session.handle_key(&mut host, alt(KeyCode::Left)));
    assert_eq!(host.text, "<p0,5>");
    assert!(session.handle_key(&mut host, alt(KeyCode::Up)));
    assert_eq!(host.text, "<p0,4>");
}

#[test]
fn font_style_cycles() {
    let session = japanese_session();
    let mut host = MemoryHost::new("<s12,Arial,>").with_caret(11);
    let mut seen = Vec::new();
    for _ in 0..4 {
        session.handle_key(&mut host, alt(KeyCode::Up));
        seen.push(host.text.clone());
    }
    assert_eq!(
        seen,
        ["<s12,Arial,B>", "<s12,Arial,I>", "<s12,Arial,BI>", "<s12,Arial,>"]
    );
}

#[test]
fn font_size_omits_zero_when_editing() {
    let session = japanese_session();
    let mut host = MemoryHost::new("<s1,Arial>").with_caret(2);
    assert!(session.handle_key(&mut host, alt(KeyCode::Down)));
    assert_eq!(host.text, "<s,Arial>");
    assert_eq!(host.caret(), Some(2));
}

#[test]
fn kana_variants_rank_first() {
    let session = japanese_session();
    let mut host = MemoryHost::new("<s12,ＭＳ ごしっく>")
        .with_caret("<s12,".len())
        .answer(Some(0));
    assert!(session.handle_key(&mut host, alt(KeyCode::Up)));
    assert_eq!(host.text, "<s12,ＭＳ ゴシック>");
    // Same byte length, so the caret stays put.
    assert_eq!(host.caret(), Some("<s12,".len()));
}

#[test]
fn compatibility_form_folds_full_width_names() {
    let config = SessionConfig::default()
        .with_key_options(KeyOptions::with_form(NormalizationForm::Compatibility));
    let mut source = StaticFonts::from_names(["ＭＳ ゴシック", "Verdana"]);
    let session = Session::start(&mut source, config);
    let mut host = MemoryHost::new("<s12,ms ｺﾞｼｯｸ>").with_caret(6).answer(Some(0));
    assert!(session.handle_key(&mut host, alt(KeyCode::Up)));
    assert_eq!(host.text, "<s12,ＭＳ ゴシック>");
}

#[test]
fn wait_per_char_flag_survives_edits() {
    let session = japanese_session();
    let mut host = MemoryHost::new("<w*0.1>").with_caret(4);
    assert!(session.handle_key(&mut host, alt(KeyCode::Down)));
    assert_eq!(host.text, "<w*>");
    assert!(session.handle_key(&mut host, alt_shift(KeyCode::Up)));
    assert_eq!(host.text, "<w*1>");
}

#[test]
#[traced_test]
fn suggestions_only_offer_names_that_fit_a_tag() {
    let mut source = StaticFonts::from_names(["Foo, Inc", "Foo Inc", "Foo>Bar"]);
    let session = Session::start(&mut source, SessionConfig::default());
    assert!(logs_contain("cannot appear in a tag"));

    let mut host = MemoryHost::new("<s12,Foo Incc>").with_caret(6).answer(Some(0));
    assert!(session.handle_key(&mut host, alt(KeyCode::Up)));
    assert_eq!(host.presented[0].1, ["Foo Inc"]);
    assert_eq!(host.text, "<s12,Foo Inc>");

    // The rewritten tag is still found and edited in place.
    host.selection = 3..3;
    assert!(session.handle_key(&mut host, alt(KeyCode::Up)));
    assert_eq!(host.text, "<s13,Foo Inc>");
}

// =========================================================================
// Insert menu
// =========================================================================

#[test]
fn insert_menu_defaults_to_template_font() {
    let session = japanese_session();
    let mut host = MemoryHost::new("").answer(Some(1));
    assert!(session.handle_key(&mut host, alt(KeyCode::Char('t'))));
    assert_eq!(host.text, "<s32,ＭＳ Ｐゴシック,>");
    assert_eq!(host.caret(), Some(host.text.len()));
}

#[test]
fn dismissed_insert_menu_changes_nothing() {
    let session = japanese_session();
    let mut host = MemoryHost::new("abc").with_selection(0..3).answer(None);
    assert!(!session.handle_key(&mut host, alt(KeyCode::Char('t'))));
    assert_eq!(host.text, "abc");
    assert_eq!(host.selection, 0..3);
    assert_eq!(host.presented[0].1.len(), 3);
    assert_eq!(host.changes, 0);
}

// =========================================================================
// Failure paths
// =========================================================================

#[test]
#[traced_test]
fn enumeration_failure_is_logged() {
    let mut source = || -> Result<Vec<FontFace>, CatalogError> {
        Err(CatalogError::Enumeration("no font service".to_string()))
    };
    let session = Session::start(&mut source, SessionConfig::default());
    assert!(session.catalog().is_empty());
    assert!(logs_contain("font enumeration failed"));
}

#[test]
#[traced_test]
fn unknown_font_without_catalog_abandons_edit() {
    let session = Session::with_catalog(Catalog::empty(), SessionConfig::default());
    let mut host = MemoryHost::new("<s12,Arial>").with_caret(6);
    assert!(!session.handle_key(&mut host, alt(KeyCode::Up)));
    assert_eq!(host.text, "<s12,Arial>");
    assert!(host.presented.is_empty());
    assert!(logs_contain("key action abandoned"));
}

#[test]
#[traced_test]
fn read_failure_is_reported() {
    let session = japanese_session();
    let mut host = MemoryHost::new("<r1>").with_caret(2);
    host.fail_reads = true;
    let err = session.try_handle_key(&mut host, alt(KeyCode::Up)).unwrap_err();
    assert!(matches!(err, SessionError::Surface(_)));
    assert!(!session.handle_key(&mut host, alt(KeyCode::Up)));
    assert!(logs_contain("cannot read text"));
}

#[test]
fn out_of_range_caret_is_rejected() {
    let session = japanese_session();
    let mut host = MemoryHost::new("<r1>").with_caret(9);
    let err = session.try_handle_key(&mut host, alt(KeyCode::Up)).unwrap_err();
    assert_eq!(
        err,
        SessionError::InvalidSelection {
            start: 9,
            end: 9,
            len: 4
        }
    );
}

#[test]
fn custom_trigger() {
    let config = SessionConfig::default().with_trigger(Modifiers::CTRL | Modifiers::ALT);
    let session = Session::with_catalog(Catalog::empty(), config);
    let mut host = MemoryHost::new("<r1>").with_caret(2);
    assert!(!session.handle_key(&mut host, alt(KeyCode::Up)));
    let both = KeyEvent::new(KeyCode::Up).with_modifiers(Modifiers::CTRL | Modifiers::ALT);
    assert!(session.handle_key(&mut host, both));
    assert_eq!(host.text, "<r1.1>");
}
