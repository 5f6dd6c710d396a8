//! Term extraction: turns a display name into its lowercase searchable terms.
//!
//! `"HPV (human papilloma virus)"` yields the main name and the parenthetical
//! synonym as two separate terms: `["hpv", "human papilloma virus"]`.

/// Split a display name into its canonical, lowercase search terms.
///
/// Only the first `" ("` is considered. When no `)` follows it the whole
/// string is kept as a single term; otherwise the synonym runs up to the
/// first `)` or a second `" ("`, whichever comes first. Interior whitespace is collapsed so every
/// term has single spaces between its words; the result is never empty.
pub fn extract_terms(display_text: &str) -> Vec<String> {
    let lowered = display_text.to_lowercase();

    let candidates: Vec<&str> = match lowered.split_once(" (") {
        Some((before, after)) => match after.split_once(')') {
            Some((between, _)) => {
                // A nested " (" ends the synonym early.
                let synonym = between.split(" (").next().unwrap_or(between);
                vec![before, synonym]
            }
            None => vec![lowered.as_str()],
        },
        None => vec![lowered.as_str()],
    };

    let terms: Vec<String> = candidates
        .into_iter()
        .map(collapse_whitespace)
        .filter(|term| !term.is_empty())
        .collect();

    if terms.is_empty() {
        vec![collapse_whitespace(&lowered)]
    } else {
        terms
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::plain("AIDS", &["aids"])]
    #[case::synonym("chronic fatigue syndrome (CFS)", &["chronic fatigue syndrome", "cfs"])]
    #[case::long_synonym("HPV (human papilloma virus)", &["hpv", "human papilloma virus"])]
    #[case::unbalanced("Lyme disease (borrelia", &["lyme disease (borrelia"])]
    #[case::no_space_before_paren("COVID-19(coronavirus)", &["covid-19(coronavirus)"])]
    #[case::trailing_text_dropped("GERD (acid reflux) chronic", &["gerd", "acid reflux"])]
    #[case::extra_whitespace("  Brain   cancer  ", &["brain cancer"])]
    #[case::empty_synonym("flu ()", &["flu"])]
    #[case::nested_paren("Alpha (beta (gamma)", &["alpha", "beta"])]
    #[case::nested_paren_closed("Alpha (beta (gamma))", &["alpha", "beta"])]
    fn extracts_terms(#[case] input: &str, #[case] expected: &[&str]) {
        assert_eq!(extract_terms(input), expected);
    }

    #[test]
    fn empty_input_still_yields_one_term() {
        assert_eq!(extract_terms(""), [""]);
        assert_eq!(extract_terms("   "), [""]);
    }

    #[test]
    fn extraction_is_pure() {
        let input = "multiple sclerosis (MS)";
        assert_eq!(extract_terms(input), extract_terms(input));
    }

    #[test]
    fn terms_are_lowercase_with_single_spaces() {
        for term in extract_terms("Post-Traumatic  Stress\tDisorder (PTSD)") {
            assert_eq!(term, term.to_lowercase());
            assert!(!term.contains("  "));
            assert_eq!(term, term.trim());
        }
    }
}
