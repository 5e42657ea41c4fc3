//! Splitting headings from trailing body text on one physical line.
//!
//! Column-based extraction can glue a section label to the first words of
//! its body, yielding lines like
//! `"DISTRETTO CAROTIDEO DX Arteria carotide comune"`. The splitter
//! restores the missing line break without fragmenting dosage lines that
//! legitimately open with uppercase abbreviations.

use super::classify::{is_uppercase_word, strip_punctuation, LineClassifier};

/// Splits a leading all-uppercase heading run off a line.
pub struct HeadingSplitter<'a> {
    classifier: &'a LineClassifier,
}

impl<'a> HeadingSplitter<'a> {
    /// Create a splitter sharing the given classifier's drug patterns.
    pub fn new(classifier: &'a LineClassifier) -> Self {
        Self { classifier }
    }

    /// Split `line` into a heading and a remainder when a run of two or
    /// more uppercase words is followed by other content.
    ///
    /// Returns the (possibly unchanged) first line plus the optional
    /// remainder. The line stays whole when it is drug-like inside an
    /// active list section, when no qualifying run exists, when the run
    /// covers the entire line, or when either the remainder or the full
    /// line reads as a drug entry.
    pub fn split(&self, line: &str, in_list_section: bool) -> (String, Option<String>) {
        if in_list_section && self.classifier.is_drug_like(line) {
            return (line.to_string(), None);
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if words.len() < 2 {
            return (line.to_string(), None);
        }

        // Leading run of uppercase words; the first failing token ends it.
        let mut run = 0;
        for word in &words {
            let clean = strip_punctuation(word);
            if !clean.is_empty() && is_uppercase_word(&clean) {
                run += 1;
            } else {
                break;
            }
        }

        if run < 2 || run >= words.len() {
            return (line.to_string(), None);
        }

        let rest = words[run..].join(" ");
        if self.classifier.is_drug_like(&rest) || self.classifier.is_drug_like(line) {
            return (line.to_string(), None);
        }

        (words[..run].join(" "), Some(rest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(line: &str, in_list_section: bool) -> (String, Option<String>) {
        let classifier = LineClassifier::new();
        HeadingSplitter::new(&classifier).split(line, in_list_section)
    }

    #[test]
    fn test_split_heading_from_body() {
        let (heading, rest) = split("DISTRETTO CAROTIDEO DX Arteria carotide comune", false);
        assert_eq!(heading, "DISTRETTO CAROTIDEO DX");
        assert_eq!(rest.as_deref(), Some("Arteria carotide comune"));
    }

    #[test]
    fn test_single_uppercase_word_is_not_a_run() {
        let (line, rest) = split("ECODOPPLER dei tronchi sovraortici", false);
        assert_eq!(line, "ECODOPPLER dei tronchi sovraortici");
        assert_eq!(rest, None);
    }

    #[test]
    fn test_whole_line_heading_stays_whole() {
        let (line, rest) = split("ESAME OBIETTIVO", false);
        assert_eq!(line, "ESAME OBIETTIVO");
        assert_eq!(rest, None);
    }

    #[test]
    fn test_short_lines_stay_whole() {
        assert_eq!(split("TERAPIA", false), ("TERAPIA".to_string(), None));
        assert_eq!(split("", false), (String::new(), None));
    }

    #[test]
    fn test_drug_line_never_split() {
        // Uppercase drug entries start with 2+ uppercase tokens but must
        // stay on one line.
        let line = "ASA CARDIO 100 mg 1 cpr die";
        assert_eq!(split(line, false), (line.to_string(), None));
    }

    #[test]
    fn test_drug_remainder_aborts_split() {
        let line = "TERAPIA CONSIGLIATA asa 100 mg die";
        assert_eq!(split(line, false), (line.to_string(), None));
    }

    #[test]
    fn test_list_section_short_circuit() {
        let line = "BISOPROLOLO EG 2,5 mg cpr";
        assert_eq!(split(line, true), (line.to_string(), None));
    }

    #[test]
    fn test_numeral_ends_the_run() {
        // The run scan stops at the first token without letters, so the
        // numeral is part of the remainder.
        let (heading, rest) = split("REFERTO ECOGRAFICO 12 maggio", false);
        assert_eq!(heading, "REFERTO ECOGRAFICO");
        assert_eq!(rest.as_deref(), Some("12 maggio"));
    }
}
