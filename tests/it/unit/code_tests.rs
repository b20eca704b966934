//! Unit tests for survey codes.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;
use surveycanvas::ErrorKind;
use surveycanvas::code::{Lookup, generate_unique_code, is_survey_code, lookup_key};

#[test]
fn test_generated_code_avoids_taken() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut taken = HashSet::new();
    for _ in 0..100 {
        let code = generate_unique_code(&mut rng, |c| taken.contains(c), 50).unwrap();
        assert!(is_survey_code(&code));
        assert!(taken.insert(code));
    }
}

#[test]
fn test_always_colliding_oracle_exhausts() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut calls = 0;
    let err = generate_unique_code(
        &mut rng,
        |_| {
            calls += 1;
            true
        },
        50,
    )
    .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::CodeGenerationExhausted);
    assert_eq!(calls, 50);
}

#[test]
fn test_zero_attempts_fails_immediately() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(generate_unique_code(&mut rng, |_| false, 0).is_err());
}

#[test]
fn test_lookup_key_classifies_input() {
    assert_eq!(lookup_key("123-456"), Lookup::Code("123-456".into()));
    assert_eq!(lookup_key(" 123456 "), Lookup::Code("123-456".into()));
    assert_eq!(lookup_key("123 456"), Lookup::Code("123-456".into()));
    assert_eq!(lookup_key("12345"), Lookup::Id("12345".into()));
    assert_eq!(lookup_key("s_0f3a1c"), Lookup::Id("s_0f3a1c".into()));
}

#[test]
fn test_overlong_digit_input_is_not_a_code() {
    assert_eq!(lookup_key("1234567"), Lookup::Id("1234567".into()));
    assert_eq!(lookup_key("123-4567"), Lookup::Id("123-4567".into()));
}

#[test]
fn test_code_pattern_is_ascii_only() {
    assert!(!is_survey_code("١٢٣-٤٥٦"));
    assert_eq!(lookup_key("١٢٣-٤٥٦"), Lookup::Id("١٢٣-٤٥٦".into()));
}
