use joaat_restore::{apply, hash, joaat, Joaat, NameTable};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 200;

// Asset-style identifiers, e.g. "Prop_Bench_01a"
fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9_]{0,31}"
}

// Letters whose upper/lower case forms map back onto each other
fn cased_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_ ÀÉÖÜàéöü]{0,40}"
}

// Filler text that can never contain a token
fn filler_strategy() -> impl Strategy<Value = String> {
    "[<>/=\" a-z0-9\n]{0,40}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    #[test]
    fn case_does_not_change_hash(name in cased_strategy()) {
        prop_assert_eq!(joaat(&name.to_uppercase()), joaat(&name.to_lowercase()));
        prop_assert_eq!(hash(&name), hash(&name.to_lowercase()));
    }

    #[test]
    fn hash_is_deterministic(name in "\\PC{0,40}") {
        prop_assert_eq!(hash(&name), hash(&name));
        let token = hash(&name);
        prop_assert!(token.as_str().starts_with("hash_"));
        prop_assert_eq!(token.as_str().len(), 13);
        prop_assert!(token.as_str()[5..].chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn token_round_trips_to_name(name in name_strategy()) {
        let table = NameTable::from_lines([name.as_str()], &Joaat);
        let result = apply(hash(&name).as_str(), &table);

        prop_assert_eq!(result.content, name);
        prop_assert!(result.changed);
    }

    #[test]
    fn embedded_tokens_round_trip(
        names in prop::collection::vec(name_strategy(), 1..8),
        fillers in prop::collection::vec(filler_strategy(), 8),
    ) {
        let table = NameTable::from_lines(names.iter(), &Joaat);

        let mut hashed = String::new();
        let mut expected = String::new();
        for (name, filler) in names.iter().zip(fillers.iter()) {
            let winner = table.get(hash(name).as_str()).unwrap();
            hashed.push_str(filler);
            hashed.push_str(hash(name).as_str());
            expected.push_str(filler);
            expected.push_str(winner);
        }

        let result = apply(&hashed, &table);
        prop_assert_eq!(result.content, expected);
    }

    #[test]
    fn substitution_is_idempotent(
        names in prop::collection::vec(name_strategy(), 1..8),
        filler in filler_strategy(),
    ) {
        let table = NameTable::from_lines(names.iter(), &Joaat);
        let text: String = names
            .iter()
            .map(|name| format!("{}{}", filler, hash(name)))
            .collect();

        let first = apply(&text, &table);
        let second = apply(&first.content, &table);
        prop_assert!(!second.changed);
        prop_assert_eq!(second.content, first.content);
    }

    #[test]
    fn unknown_tokens_are_inert(value in any::<u32>(), filler in filler_strategy()) {
        let table = NameTable::default();
        let text = format!("{filler}hash_{value:08X}{filler}hash_{value:08x}");

        let result = apply(&text, &table);
        prop_assert!(!result.changed);
        prop_assert_eq!(result.content, text);
    }
}
