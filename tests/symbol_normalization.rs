//! Behavior-driven tests for symbol normalization
//!
//! Whatever spelling the user types, one company must map to exactly one
//! watchlist key. These tests pin the normalization rules and the rejection
//! taxonomy for inputs that cannot be tickers.

use nepsewatch_core::{Symbol, ValidationError, Watchlist, MAX_SYMBOL_LEN};
use nepsewatch_tests::{open_store, ScriptedSource};
use tempfile::tempdir;

// =============================================================================
// Normalization: Canonical Form
// =============================================================================

#[test]
fn input_variants_collapse_to_the_canonical_spelling() {
    // Given: the spellings a user plausibly types for one company
    let variants = ["nabil", "NABIL", "Nabil", " nabil ", "\tNABIL\n"];

    // Then: all of them parse to the same canonical symbol
    for variant in variants {
        let parsed = Symbol::parse(variant).expect("variant should parse");
        assert_eq!(parsed.as_str(), "NABIL", "variant {variant:?}");
        assert_eq!(parsed.to_string(), "NABIL");
    }
}

#[test]
fn digits_dots_and_hyphens_survive_normalization() {
    // Mutual funds and special listings carry digits and punctuation
    for (input, expected) in [
        ("c30mf", "C30MF"),
        ("nica-d", "NICA-D"),
        ("ngpl.a", "NGPL.A"),
        ("h8020", "H8020"),
    ] {
        let parsed = Symbol::parse(input).expect("should parse");
        assert_eq!(parsed.as_str(), expected);
    }
}

#[test]
fn symbols_normalize_even_through_serde() {
    // Given: a raw spelling arriving as JSON
    let parsed: Symbol = serde_json::from_str("\" nabil \"").expect("deserialize");

    // Then: the deserialized value is already canonical
    assert_eq!(parsed.as_str(), "NABIL");
    assert_eq!(serde_json::to_string(&parsed).expect("serialize"), "\"NABIL\"");

    // And: strings that cannot be tickers fail to deserialize at all
    assert!(serde_json::from_str::<Symbol>("\"9NABIL\"").is_err());
}

// =============================================================================
// Normalization: Rejection Taxonomy
// =============================================================================

#[test]
fn blank_input_is_rejected_before_anything_else() {
    for input in ["", "   ", "\t\n"] {
        let error = Symbol::parse(input).expect_err("must fail");
        assert!(
            matches!(error, ValidationError::EmptySymbol),
            "input {input:?}"
        );
    }
}

#[test]
fn rejections_name_the_offending_character() {
    let error = Symbol::parse("9NABIL").expect_err("digit start");
    assert!(matches!(error, ValidationError::SymbolInvalidStart { ch: '9' }));

    let error = Symbol::parse("-NABIL").expect_err("punctuation start");
    assert!(matches!(error, ValidationError::SymbolInvalidStart { ch: '-' }));

    let error = Symbol::parse("NAB IL").expect_err("inner space");
    assert!(matches!(
        error,
        ValidationError::SymbolInvalidChar { ch: ' ', index: 3 }
    ));

    let error = Symbol::parse("NAB$L").expect_err("shell metacharacter");
    assert!(matches!(
        error,
        ValidationError::SymbolInvalidChar { ch: '$', .. }
    ));

    let error = Symbol::parse("नेपाल").expect_err("non-ASCII script");
    assert!(matches!(error, ValidationError::SymbolInvalidStart { .. }));
}

#[test]
fn the_length_limit_sits_exactly_at_the_boundary() {
    let longest = "A".repeat(MAX_SYMBOL_LEN);
    let parsed = Symbol::parse(&longest).expect("boundary length should parse");
    assert_eq!(parsed.as_str().len(), MAX_SYMBOL_LEN);

    let over = "A".repeat(MAX_SYMBOL_LEN + 1);
    let error = Symbol::parse(&over).expect_err("must fail");
    assert!(matches!(
        error,
        ValidationError::SymbolTooLong { len, max } if len == MAX_SYMBOL_LEN + 1 && max == MAX_SYMBOL_LEN
    ));
}

// =============================================================================
// Normalization: One Company, One Row
// =============================================================================

#[test]
fn normalized_variants_share_one_watchlist_row() {
    let temp = tempdir().expect("tempdir");
    let watchlist = Watchlist::new(open_store(&temp), ScriptedSource::new());

    // Given: the same company added under three spellings
    assert!(watchlist.add_symbol("nabil").expect("first add").created);
    assert!(!watchlist.add_symbol(" NABIL ").expect("second add").created);
    assert!(!watchlist.add_symbol("Nabil").expect("third add").created);

    // Then: one row exists, and any spelling removes it
    assert_eq!(watchlist.current_view().expect("view").len(), 1);
    assert!(watchlist.remove_symbol("nAbIl").expect("remove"));
    assert!(watchlist.current_view().expect("view").is_empty());
}
