mod common;
use common::{file_var, text_var};
use promptvars::{compute_stats, Stats};
use rstest::rstest;

#[test]
fn test_empty_template_and_no_variables() {
    assert_eq!(compute_stats("", &[]), Stats::default());
    assert_eq!(
        compute_stats("", &[]),
        Stats {
            variable_count: 0,
            text_variable_count: 0,
            file_variable_count: 0,
            character_count: 0,
            word_count: 0,
            letter_count: 0,
        }
    );
}

#[test]
fn test_variable_counts_by_kind() {
    let vars = vec![text_var("a"), file_var("b"), text_var("c")];
    let stats = compute_stats("%%a%%", &vars);
    assert_eq!(stats.variable_count, 3);
    assert_eq!(stats.text_variable_count, 2);
    assert_eq!(stats.file_variable_count, 1);
}

#[rstest]
#[case("a b  c", 3, 6, 3)]
#[case("   ", 0, 3, 0)]
#[case("\n\t", 0, 2, 0)]
#[case("  Hello, world!  ", 2, 17, 12)]
#[case("one\ntwo\tthree", 3, 13, 11)]
#[case("%%name%%", 1, 8, 8)]
#[case("héllo wörld", 2, 11, 10)]
fn test_text_metrics(
    #[case] template: &str,
    #[case] words: usize,
    #[case] characters: usize,
    #[case] letters: usize,
) {
    let stats = compute_stats(template, &[]);
    assert_eq!(stats.word_count, words);
    assert_eq!(stats.character_count, characters);
    assert_eq!(stats.letter_count, letters);
}
