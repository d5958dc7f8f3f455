use phrase_gen::{GrammarError, GrammarTable, SentenceExpander};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_grammar(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_from_file() {
    let file = write_grammar(
        "This grammar greets somebody.\n\
         {\n\
         <start>\n\
         <greeting> <noun>\n\
         }\n\
         {\n\
         <greeting>\n\
         Hello\n\
         Hi\n\
         }\n\
         {\n\
         <noun>\n\
         world\n\
         friend\n\
         }\n",
    );

    let table = GrammarTable::from_file(file.path()).unwrap();
    assert_eq!(table.len(), 3);

    let mut expander = SentenceExpander::new(&table);
    for _ in 0..25 {
        let phrase = expander.expand("<start>").unwrap();
        let expected = ["Hello world", "Hello friend", "Hi world", "Hi friend"];
        assert!(expected.contains(&phrase.as_str()), "got {}", phrase);
    }
}

#[test]
fn test_missing_file() {
    let result = GrammarTable::from_file("no/such/grammar.g");
    assert!(matches!(result, Err(GrammarError::Io(_))));
}

#[test]
fn test_round_trip_terminal_alternatives() {
    // Terminal-only alternatives: output is always one of them, never the
    // key line, never empty.
    let file = write_grammar("{\n<color>\nred\ngreen\nblue\n}\n");
    let table = GrammarTable::from_file(file.path()).unwrap();

    let mut expander = SentenceExpander::with_rng(&table, StdRng::seed_from_u64(3));
    for _ in 0..200 {
        let phrase = expander.expand("<color>").unwrap();
        assert!(["red", "green", "blue"].contains(&phrase.as_str()), "got {}", phrase);
        assert_ne!(phrase, "<color>");
        assert!(!phrase.is_empty());
    }
}

#[test]
fn test_concrete_two_symbol_scenario() {
    let file = write_grammar(
        "{\n<start>\n<a> <b>\n}\n{\n<a>\nX\nY\n}\n{\n<b>\n1\n2\n}\n",
    );
    let table = GrammarTable::from_file(file.path()).unwrap();

    let mut expander = SentenceExpander::with_rng(&table, StdRng::seed_from_u64(9));
    for _ in 0..300 {
        let phrase = expander.expand("<start>").unwrap();
        assert!(
            ["X 1", "X 2", "Y 1", "Y 2"].contains(&phrase.as_str()),
            "got {}",
            phrase
        );
    }
}

#[test]
fn test_resize_preserves_all_rule_groups() {
    // Enough non-terminals to force several capacity doublings.
    let mut content = String::new();
    for n in 0..30 {
        content.push_str(&format!("{{\n<word{}>\nvalue{}\nother{}\n}}\n", n, n, n));
    }

    let file = write_grammar(&content);
    let table = GrammarTable::from_file(file.path()).unwrap();
    assert_eq!(table.len(), 30);
    assert!(table.capacity() > 30);

    for n in 0..30 {
        let marker = format!("<word{}>", n);
        let group = table.rules_for(&marker).unwrap();
        assert_eq!(group[0], marker);
        assert_eq!(group[1], format!("value{}", n));
        assert_eq!(group[2], format!("other{}", n));
    }
}

#[test]
fn test_determinism_under_fixed_seed() {
    let file = write_grammar(
        "{\n<start>\n<adj> <noun>\n}\n\
         {\n<adj>\nquick\nlazy\nclever\n}\n\
         {\n<noun>\nfox\ndog\nprogrammer\n}\n",
    );
    let table = GrammarTable::from_file(file.path()).unwrap();

    let mut first = SentenceExpander::with_rng(&table, StdRng::seed_from_u64(2024));
    let mut second = SentenceExpander::with_rng(&table, StdRng::seed_from_u64(2024));

    let a: Vec<String> = (0..20).map(|_| first.expand("<start>").unwrap()).collect();
    let b: Vec<String> = (0..20).map(|_| second.expand("<start>").unwrap()).collect();
    assert_eq!(a, b);
}

#[test]
fn test_terminal_passthrough() {
    let file = write_grammar("{\n<noun>\nworld\n}\n");
    let table = GrammarTable::from_file(file.path()).unwrap();

    let mut expander = SentenceExpander::new(&table);
    assert_eq!(
        expander.expand("nothing to expand here").unwrap(),
        "nothing to expand here"
    );
}

#[test]
fn test_self_referential_grammar_hits_depth_limit() {
    let file = write_grammar("{\n<loop>\nstill <loop>\n}\n");
    let table = GrammarTable::from_file(file.path()).unwrap();

    let mut expander = SentenceExpander::new(&table).with_max_depth(16);
    assert!(matches!(
        expander.expand("<loop>"),
        Err(GrammarError::RecursionLimitExceeded { .. })
    ));
}

#[test]
fn test_unknown_start_symbol() {
    let file = write_grammar("{\n<noun>\nworld\n}\n");
    let table = GrammarTable::from_file(file.path()).unwrap();

    let mut expander = SentenceExpander::new(&table);
    assert!(matches!(
        expander.expand("<verb>"),
        Err(GrammarError::UnknownNonTerminal(_))
    ));
}
