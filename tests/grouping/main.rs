//! Integration tests for alphabetic sectioning.

use barkeep::bar::Ingredient;
use barkeep::{group_by, group_by_name, group_by_name_with, GroupingOptions, Named};
use pretty_assertions::assert_eq;

/// Deterministic pseudo-random names, mixed case and digits.
fn names(seed: u64, count: usize) -> Vec<String> {
    const ALPHABET: &[u8] = b"aAbBcCdDgGlLmMrRtTvV0123456789";
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };
    (0..count)
        .map(|_| {
            let len = 1 + next() % 6;
            (0..len)
                .map(|_| ALPHABET[next() % ALPHABET.len()] as char)
                .collect()
        })
        .collect()
}

fn shelf(names: &[String]) -> Vec<Ingredient> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Ingredient::new(format!("ing-{}", i), name.clone()))
        .collect()
}

#[test]
fn grouping_is_total_and_sorted() {
    for seed in 1..=25u64 {
        let items = shelf(&names(seed, 40));
        let grouped = group_by_name(items.iter());

        assert_eq!(grouped.len(), items.len(), "seed {seed}");
        for item in &items {
            let hits = grouped.iter().filter(|entry| entry.id() == item.id()).count();
            assert_eq!(hits, 1, "seed {seed}: {} appears {hits} times", item.name);
        }

        let titles = grouped.titles();
        let mut sorted = titles.clone();
        sorted.sort_by_key(|title| title.to_lowercase());
        assert_eq!(titles, sorted, "seed {seed}");
        sorted.dedup_by_key(|title| title.to_lowercase());
        assert_eq!(titles.len(), sorted.len(), "seed {seed}: duplicate titles");

        for section in grouped.sections() {
            let keys: Vec<String> = section.items().iter().map(|i| i.name.to_lowercase()).collect();
            let mut expected = keys.clone();
            expected.sort();
            assert_eq!(keys, expected, "seed {seed}");
            for item in section.items() {
                let first: String = item.name.chars().next().unwrap().to_uppercase().collect();
                assert_eq!(first, section.title());
            }
        }
    }
}

#[test]
fn grouping_is_deterministic() {
    let items = shelf(&names(7, 30));
    let mut reversed = items.clone();
    reversed.reverse();

    let a = group_by_name(items.iter());
    let b = group_by_name(reversed.iter());
    assert_eq!(a, b);
}

#[test]
fn numbered_names_scenario() {
    let items = shelf(
        &["2second", "1bfirst", "1afirst", "4fourth", "3third"]
            .map(String::from),
    );
    let grouped = group_by_name(items.iter());

    assert_eq!(grouped.titles(), vec!["1", "2", "3", "4"]);
    let first: Vec<&str> = grouped.sections()[0].items().iter().map(|i| i.name()).collect();
    assert_eq!(first, vec!["1afirst", "1bfirst"]);
    assert!(grouped.sections()[1..].iter().all(|section| section.len() == 1));
}

#[test]
fn collapsed_digits_follow_letters() {
    let items = shelf(&["2second", "Amaro", "1first", "bitters"].map(String::from));
    let grouped = group_by_name_with(
        items.iter(),
        &GroupingOptions {
            collapse_non_alphabetic: true,
        },
    );

    assert_eq!(grouped.titles(), vec!["A", "B", "#"]);
    assert_eq!(grouped.get(2, 0).map(|i| i.name()), Some("1first"));
}

#[test]
fn custom_key_and_comparator() {
    // bucket by last letter, longest first
    let words = vec!["sour", "fizz", "flip", "julep", "smash"];
    let grouped = group_by(
        words,
        |word| word.chars().last().unwrap_or(' '),
        |a, b| b.len().cmp(&a.len()).then(a.cmp(b)),
    );

    assert_eq!(grouped.titles(), vec!["H", "P", "R", "Z"]);
    assert_eq!(grouped.sections()[1].items(), &["julep", "flip"]);
}
