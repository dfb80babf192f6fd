use ugrep::{is_match, match_node, parse_pattern, InvalidPattern};

fn assert_match(pattern: &str, text: &str, expected: bool) {
    let result = is_match(text, pattern)
        .unwrap_or_else(|_| panic!("pattern '{pattern}' failed to parse"));
    assert_eq!(
        result, expected,
        "pattern '{pattern}' against text '{text}' - expected: {expected}, got: {result}"
    );
}

mod literal_tests {
    use super::*;

    #[test]
    fn single_char_match() {
        assert_match("a", "abc", true);
    }

    #[test]
    fn single_char_no_match() {
        assert_match("x", "abc", false);
    }

    #[test]
    fn char_anywhere_in_line() {
        assert_match("c", "abc", true);
    }

    #[test]
    fn empty_text_has_no_literal_match() {
        assert_match("a", "", false);
    }

    #[test]
    fn punctuation_is_ordinary() {
        assert_match("a-b", "xa-by", true);
        assert_match("a,b", "a,b", true);
    }
}

mod dot_tests {
    use super::*;

    #[test]
    fn dot_matches_any_character() {
        assert_match(".", "z", true);
    }

    #[test]
    fn dot_does_not_match_past_the_end() {
        assert_match(".", "", false);
    }

    #[test]
    fn dot_inside_a_sequence() {
        assert_match("a.c", "abc", true);
        assert_match("a.c", "ac", false);
    }
}

mod anchor_tests {
    use super::*;

    #[test]
    fn start_anchor() {
        assert_match("^a", "ab", true);
        assert_match("^b", "ab", false);
    }

    #[test]
    fn end_anchor() {
        assert_match("b$", "ab", true);
        assert_match("a$", "ab", false);
    }

    #[test]
    fn both_anchors_require_the_whole_line() {
        assert_match("^ab$", "ab", true);
        assert_match("^ab$", "abc", false);
        assert_match("^ab$", "xab", false);
    }

    #[test]
    fn anchored_star_matches_every_line() {
        assert_match("^a*", "xyz", true);
    }

    #[test]
    fn dollar_in_the_middle_matches_nothing() {
        assert_match("a$b", "ab", false);
        assert_match("a$b", "a", false);
    }

    #[test]
    fn dollar_after_quantifier_anchors_the_sequence() {
        assert_match("ab*$", "ab", true);
        assert_match("ab*$", "abx", false);
    }
}

mod quantifier_tests {
    use super::*;

    #[test]
    fn question_is_optional() {
        assert_match("colou?r", "color", true);
        assert_match("colou?r", "colour", true);
        assert_match("colou?r", "colr", false);
    }

    #[test]
    fn star_matches_every_line() {
        assert_match("a*", "zzz", true);
        assert_match("a*", "", true);
    }

    #[test]
    fn plus_needs_one_occurrence() {
        assert_match("a+", "za", true);
        assert_match("a+", "", false);
        assert_match("a+", "zzz", false);
    }

    #[test]
    fn range_lower_and_upper_bounds() {
        assert_match("^a{2,3}$", "a", false);
        assert_match("^a{2,3}$", "aa", true);
        assert_match("^a{2,3}$", "aaa", true);
        assert_match("^a{2,3}$", "aaaa", false);
    }

    #[test]
    fn range_without_upper_bound() {
        assert_match("^a{2,}$", "a", false);
        assert_match("^a{2,}$", "aaaaa", true);
    }

    #[test]
    fn single_bound_means_at_least() {
        assert_match("^a{2}$", "aaaa", true);
        assert_match("^a{2}$", "a", false);
    }

    #[test]
    fn range_without_lower_bound_is_optional() {
        assert_match("^xa{,2}$", "x", true);
        assert_match("^xa{,2}$", "xaa", true);
        assert_match("^xa{,2}$", "xaaa", false);
    }

    #[test]
    fn range_on_a_group_counts_occurrences() {
        assert_match("^(ab){2}$", "abab", true);
        assert_match("^(ab){2}$", "ab", false);
    }

    #[test]
    fn group_quantifier() {
        assert_match("(ab)+", "xababy", true);
        assert_match("^(ab)+$", "aba", false);
    }
}

mod char_class_tests {
    use super::*;

    #[test]
    fn class_range() {
        assert_match("[a-c]", "xbx", true);
        assert_match("[a-c]", "xyz", false);
    }

    #[test]
    fn class_range_excludes_the_dash() {
        assert_match("[a-c]", "-", false);
    }

    #[test]
    fn negated_class() {
        assert_match("[^a-c]", "abc", false);
        assert_match("[^a-c]", "abd", true);
    }

    #[test]
    fn literal_dash_members() {
        assert_match("[ab-]", "-", true);
        assert_match("[-ab]", "-", true);
    }

    #[test]
    fn empty_class_matches_nothing() {
        assert_match("[]", "abc", false);
    }
}

mod alternation_tests {
    use super::*;

    #[test]
    fn either_branch_matches() {
        assert_match("cat|dog", "hotdog", true);
        assert_match("cat|dog", "catnip", true);
        assert_match("cat|dog", "bird", false);
    }

    #[test]
    fn alternation_inside_a_group() {
        assert_match("gr(a|e)y", "gray", true);
        assert_match("gr(a|e)y", "grey", true);
        assert_match("gr(a|e)y", "griy", false);
    }
}

mod error_tests {
    use super::*;

    #[test]
    fn structural_errors_are_invalid_pattern() {
        for pattern in ["a(", "(a", "a)", "[z-a]", "[abc", "a{3,1}", "a{0,0}", ""] {
            assert_eq!(
                parse_pattern(pattern).unwrap_err(),
                InvalidPattern,
                "pattern {pattern:?} should be rejected"
            );
        }
    }

    #[test]
    fn error_displays_like_the_cli_message() {
        assert_eq!(InvalidPattern.to_string(), "Invalid pattern");
    }
}

mod end_to_end_tests {
    use super::*;

    #[test]
    fn anchored_optional_vowel() {
        assert_match("^colou?r$", "color", true);
        assert_match("^colou?r$", "colour", true);
        assert_match("^colou?r$", "colr", false);
        assert_match("^colou?r$", "xcolor", false);
    }

    #[test]
    fn highlight_positions_follow_the_table() {
        let node = parse_pattern("b+").unwrap();
        let chars: Vec<char> = "abba".chars().collect();
        let table = match_node(&node, &chars);
        let covered: Vec<bool> = (0..chars.len()).map(|k| table.covers(k)).collect();
        assert_eq!(covered, vec![false, true, true, false]);
    }

    #[test]
    fn nullable_pattern_covers_no_positions() {
        let node = parse_pattern("x*").unwrap();
        let chars: Vec<char> = "abc".chars().collect();
        let table = match_node(&node, &chars);
        assert!(table.has_match());
        assert!((0..chars.len()).all(|k| !table.covers(k)));
    }
}
