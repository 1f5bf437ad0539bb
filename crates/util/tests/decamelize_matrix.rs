//! Decamelizer behaviour matrix.

use convertkit_util::{decamelize, DecamelizeOptions, SpaceReplacement};
use proptest::prelude::*;

fn options() -> DecamelizeOptions {
    DecamelizeOptions::default()
}

// ---------------------------------------------------------------------------
// Word boundaries
// ---------------------------------------------------------------------------

#[test]
fn documented_examples() {
    assert_eq!(decamelize("LoadByWhateverStuff", options()), "Load By Whatever Stuff");
    assert_eq!(decamelize("BBKing", options()), "BBKing");
    assert_eq!(decamelize("LoadBy25Years", options()), "Load By 25 Years");
}

#[test]
fn leading_underscores_can_be_kept() {
    let keep = DecamelizeOptions {
        keep_leading_underscores: true,
        force_rest_lower: true,
        ..options()
    };
    assert_eq!(decamelize("__WhatIs", keep), "__What is");
    assert_eq!(decamelize("_a_b", keep), "_A b");
}

#[test]
fn first_letter_policy() {
    let plain = DecamelizeOptions {
        force_first_upper: false,
        ..options()
    };
    assert_eq!(decamelize("camelCase", plain), "camel Case");
    assert_eq!(decamelize("camelCase", options()), "Camel Case");

    let lower = DecamelizeOptions {
        force_rest_lower: true,
        ..options()
    };
    assert_eq!(decamelize("XMLHttpRequest", lower), "Xmlhttp request");
}

#[test]
fn unknown_characters_pass_through() {
    assert_eq!(decamelize("a\u{0007}b", options()), "A\u{0007}b");
    assert_eq!(decamelize("日本Go", options()), "日本 Go");
    assert_eq!(decamelize("Price$Tag", options()), "Price$ Tag");
}

#[test]
fn escapes_decode_at_first_position() {
    let unescape = DecamelizeOptions {
        unescape_unicode: true,
        ..options()
    };
    assert_eq!(decamelize("\\u0041Bc", unescape), "ABc");
    // Truncated escapes are ordinary text.
    assert_eq!(decamelize("\\u00", unescape), "\\ u 00");
}

#[test]
fn replacement_characters() {
    for (replacement, expected) in [
        (SpaceReplacement::Underscore, "Load_By_Years"),
        (SpaceReplacement::Minus, "Load-By-Years"),
        (SpaceReplacement::Dot, "Load.By.Years"),
        (SpaceReplacement::None, "Load By Years"),
    ] {
        let opts = DecamelizeOptions {
            space_replacement: replacement,
            ..options()
        };
        assert_eq!(decamelize("LoadByYears", opts), expected);
    }
}

#[test]
fn unclosed_braces_scan_in_linear_time() {
    let keep = DecamelizeOptions {
        keep_formatting_indices: true,
        ..options()
    };
    assert_eq!(decamelize("{0}of{x", keep), "{0}of{ x");

    let n = 200_000;
    let out = decamelize(&"{".repeat(n), keep);
    assert_eq!(out.len(), 2 * n - 1);
    assert!(out.starts_with("{ { {") && out.ends_with(" {"));
}

#[test]
fn options_load_from_json() {
    let opts: DecamelizeOptions =
        serde_json::from_str(r#"{"force_rest_lower": true, "space_replacement": "underscore"}"#)
            .unwrap();
    assert!(opts.force_first_upper);
    assert!(opts.force_rest_lower);
    assert_eq!(opts.space_replacement, SpaceReplacement::Underscore);
    assert_eq!(decamelize("LoadByYears", opts), "Load_by_years");
}

// ---------------------------------------------------------------------------
// Idempotence
// ---------------------------------------------------------------------------

#[test]
fn already_spaced_text_is_stable() {
    let once = decamelize("LoadByYears", options());
    assert_eq!(once, "Load By Years");
    assert_eq!(decamelize(&once, options()), once);
}

proptest! {
    #[test]
    fn decamelize_is_idempotent(text in "[A-Za-z0-9 _,.]{0,32}") {
        let once = decamelize(&text, options());
        prop_assert_eq!(decamelize(&once, options()), once);
    }

    #[test]
    fn output_has_no_double_spaces(text in "[A-Za-z0-9 _]{0,32}") {
        let out = decamelize(&text, options());
        prop_assert!(!out.contains("  "));
        prop_assert!(!out.starts_with(' '));
        prop_assert!(!out.ends_with(' '));
    }
}
