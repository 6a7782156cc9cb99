//! Identifier Property Tests
//!
//! Generation, parsing and hashing contracts of `Identifier`:
//! - deterministic strategies are stable and distinguish inputs
//! - text round-trips through the canonical form
//! - malformed text is rejected without panicking

use crate::test_utils::*;
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};

fn hash_of(id: &Identifier) -> u64 {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish()
}

fn is_canonical(text: &str) -> bool {
    let groups: Vec<&str> = text.split('-').collect();
    let lengths: Vec<usize> = groups.iter().map(|g| g.len()).collect();
    lengths == [8, 4, 4, 4, 12]
        && groups
            .iter()
            .all(|g| g.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)))
}

// =============================================================================
// Determinism
// =============================================================================

proptest! {
    #[test]
    fn prop_from_name_deterministic(name in ".*") {
        prop_assert_eq!(Identifier::from_name(&name), Identifier::from_name(&name));
    }

    #[test]
    fn prop_from_name_distinguishes(a in ".{0,24}", b in ".{0,24}") {
        prop_assume!(a != b);
        prop_assert_ne!(Identifier::from_name(&a), Identifier::from_name(&b));
    }

    #[test]
    fn prop_from_seed_deterministic(seed in any::<u32>()) {
        prop_assert_eq!(Identifier::from_seed(seed), Identifier::from_seed(seed));
        prop_assert!(Identifier::from_seed(seed).is_valid());
    }

    #[test]
    fn prop_from_name_hash_deterministic(name in ".*") {
        prop_assert_eq!(Identifier::from_name_hash(&name), Identifier::from_name_hash(&name));
    }

    #[test]
    fn prop_namespace_isolates(label_a in "[a-z]{1,8}", label_b in "[a-z]{1,8}", name in ".{0,16}") {
        prop_assume!(label_a != label_b);
        let a = IdentifierNamespace::DEFAULT.derive(&label_a);
        let b = IdentifierNamespace::DEFAULT.derive(&label_b);
        prop_assert_ne!(a.identifier_for(&name), b.identifier_for(&name));
    }
}

// =============================================================================
// Text Form
// =============================================================================

proptest! {
    #[test]
    fn prop_round_trip(value in any::<u128>()) {
        let id = Identifier::from_u128(value);
        let text = id.to_string();
        prop_assert!(is_canonical(&text));
        prop_assert_eq!(Identifier::parse(&text), Some(id));
        prop_assert_eq!(Identifier::parse(&text.to_uppercase()), Some(id));
        prop_assert_eq!(Identifier::parse(&text.replace('-', "")), Some(id));
        prop_assert_eq!(Identifier::parse(&format!("{{{}}}", text)), Some(id));
    }

    #[test]
    fn prop_parse_never_panics(text in ".{0,48}") {
        let _ = Identifier::parse(&text);
    }

    #[test]
    fn prop_parse_ignores_hyphen_placement(value in any::<u128>(), cuts in proptest::collection::vec(0usize..=32, 0..6)) {
        let id = Identifier::from_u128(value);
        let mut text = format!("{:032x}", value);
        let mut cuts = cuts;
        cuts.sort_unstable();
        for cut in cuts.into_iter().rev() {
            text.insert(cut, '-');
        }
        prop_assert_eq!(Identifier::parse(&text), Some(id));
    }

    #[test]
    fn prop_parse_rejects_wrong_digit_count(digits in "[0-9a-f]{0,31}") {
        prop_assert!(Identifier::parse(&digits).is_none());
    }

    #[test]
    fn prop_hash_consistent_with_equality(value in any::<u128>()) {
        let a = Identifier::from_u128(value);
        let b = Identifier::parse(&a.to_string()).unwrap();
        prop_assert_eq!(hash_of(&a), hash_of(&b));
        prop_assert_eq!(a.hash_code(), b.hash_code());
    }
}

#[test]
fn test_parse_rejects_documented_inputs() {
    assert!(Identifier::parse("not-a-uuid").is_none());
    assert!(Identifier::parse("550e8400-e29b-41d4-a716").is_none());
    assert!(Identifier::parse("").is_none());
}

#[test]
fn test_from_str_explains_rejection() {
    let err = "550e8400-e29b-41d4-a716".parse::<Identifier>().unwrap_err();
    assert!(err.to_string().contains("20 hex digits"));

    let err = "{550e8400-e29b-41d4-a716-446655440000"
        .parse::<Identifier>()
        .unwrap_err();
    assert!(err.to_string().contains("unbalanced braces"));
}

#[test]
fn test_random_identifiers_are_canonical_and_valid() {
    for _ in 0..100 {
        let id = Identifier::random();
        assert!(id.is_valid());
        assert!(is_canonical(&id.to_string()));
    }
}

// =============================================================================
// Generation Strategies Side By Side
// =============================================================================

#[test]
fn test_strategies_do_not_collide_for_same_input() {
    let name = "Player";
    let by_name = Identifier::from_name(name);
    let by_hash = Identifier::from_name_hash(name);
    assert_ne!(by_name, by_hash);
    assert_ne!(by_name, Identifier::INVALID);
    assert_ne!(by_hash, Identifier::INVALID);
}

#[test]
fn test_identifiers_key_hash_maps() {
    let mut names: HashMap<Identifier, &str> = HashMap::new();
    for name in ["alpha", "beta", "gamma"] {
        names.insert(Identifier::from_name(name), name);
    }
    assert_eq!(names.get(&Identifier::from_name("beta")), Some(&"beta"));
    assert_eq!(names.len(), 3);
}

#[test]
fn test_explicit_generator_handles_per_worker() {
    let handles: Vec<_> = (0..4u64)
        .map(|worker| {
            std::thread::spawn(move || {
                let mut generator = IdentifierGenerator::seeded(worker);
                (0..100).map(|_| generator.next_identifier()).collect::<Vec<_>>()
            })
        })
        .collect();

    let all: Vec<Identifier> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();
    let distinct: HashSet<_> = all.iter().collect();
    assert_eq!(distinct.len(), all.len());

    // Same seed, same sequence
    let mut again = IdentifierGenerator::seeded(0);
    assert_eq!(again.next_identifier(), all[0]);
}
