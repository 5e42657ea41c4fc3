//! Line classification for zone-extracted text.
//!
//! Lines recovered from a zone are structurally flat: a section label, a
//! prose fragment, and a therapy entry all arrive as plain strings. The
//! classifier decides which is which from lexical shape alone: letter
//! case, punctuation, and a fixed dosage vocabulary.

use regex::Regex;

/// Single words treated as section headings even when standing alone.
const SPECIAL_HEADINGS: &[&str] = &["TERAPIA"];

/// Headings that open a list section: every following line stays on its
/// own output line until the next heading.
const LIST_SECTION_HEADINGS: &[&str] = &["TERAPIA"];

/// Dosage amounts followed by unit/route/frequency codes, or whole-word
/// pharmaceutical-form nouns.
const DRUG_PATTERN: &str = r"(?i)\d+\s*(mg|ml|mg/ml|mcg|g|ui|cp|cpr|cprrv|cps|cpsrp|fl|gtt|bust|conf|supp|os|ev|im|sc|die|bid|tid|qid|prn|h\d+|ore|%)|\b(compresse|capsule|fiale|gocce|bustine|supposte|cerotto|cerotti|sciroppo|crema|pomata|gel|spray)\b";

/// Category assigned to one raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCategory {
    /// Two or more all-uppercase words forming a section label.
    Heading,

    /// A reserved single word treated as a heading regardless of case.
    SpecialHeading {
        /// Whether the heading opens a list section.
        opens_list: bool,
    },

    /// A line whose first character is `-`; kept on its own line without
    /// touching the list-section state.
    DashItem,

    /// A line matching the dosage/pharmaceutical-form pattern.
    DrugLike,

    /// Anything else; a candidate for paragraph merging.
    Plain,
}

impl LineCategory {
    /// True for `Heading` and `SpecialHeading`.
    pub fn is_heading(&self) -> bool {
        matches!(
            self,
            LineCategory::Heading | LineCategory::SpecialHeading { .. }
        )
    }

    /// Whether emitting this line opens a list section.
    pub fn opens_list_section(&self) -> bool {
        matches!(self, LineCategory::SpecialHeading { opens_list: true })
    }
}

/// Classifies trimmed, non-empty lines.
///
/// Classification is total: any string input maps to some category, and
/// no input can make it fail.
pub struct LineClassifier {
    drug_pattern: Regex,
}

impl LineClassifier {
    /// Create a classifier with the default vocabularies.
    pub fn new() -> Self {
        Self {
            drug_pattern: Regex::new(DRUG_PATTERN).unwrap(),
        }
    }

    /// Check whether a line reads as a drug entry (dosage, unit, route,
    /// frequency, or pharmaceutical form).
    ///
    /// Purely lexical; a drug line may well be all-uppercase too, which
    /// is exactly why the reflow pass needs this check.
    pub fn is_drug_like(&self, line: &str) -> bool {
        self.drug_pattern.is_match(line)
    }

    /// Classify one line in the given list-section context.
    pub fn classify(&self, line: &str, in_list_section: bool) -> LineCategory {
        let drug_like = self.is_drug_like(line);
        let special = special_heading_word(line);
        let tokens: Vec<String> = line.split_whitespace().map(strip_punctuation).collect();
        let mut heading = special.is_some() || is_heading_tokens(&tokens);

        // A capitalized dosage line inside a list section must not read
        // as a new section label.
        if heading && in_list_section && drug_like {
            heading = false;
        }

        // Dash prefix wins last: the line stays separate and the section
        // state passes through unchanged.
        if line.starts_with('-') {
            return LineCategory::DashItem;
        }

        if heading {
            return match special {
                Some(word) => LineCategory::SpecialHeading {
                    opens_list: LIST_SECTION_HEADINGS.contains(&word.as_str()),
                },
                None => LineCategory::Heading,
            };
        }

        if drug_like {
            LineCategory::DrugLike
        } else {
            LineCategory::Plain
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a token down to its word characters.
pub(super) fn strip_punctuation(token: &str) -> String {
    token
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// True when a token reads as a heading word: at least one uppercase
/// letter and no lowercase ones. Caseless characters (digits inside a
/// mixed token) carry no vote.
pub(super) fn is_uppercase_word(token: &str) -> bool {
    let mut has_upper = false;
    for c in token.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

/// Decide whether punctuation-stripped tokens form a heading: at least
/// two alphabetic all-uppercase words. Tokens with no letters at all
/// (bare numerals, stray symbols) are skipped rather than counted
/// against the line.
pub(super) fn is_heading_tokens(tokens: &[String]) -> bool {
    let mut upper_words = 0;
    for token in tokens {
        if !token.chars().any(|c| c.is_alphabetic()) {
            continue;
        }
        if !is_uppercase_word(token) {
            return false;
        }
        upper_words += 1;
    }
    upper_words >= 2
}

/// The reserved-heading word for a line that consists of exactly one
/// token, uppercased, when it belongs to the special set.
fn special_heading_word(line: &str) -> Option<String> {
    let clean: String = line
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    let mut words = clean.split_whitespace();
    let word = words.next()?;
    if words.next().is_some() {
        return None;
    }
    let upper = word.to_uppercase();
    SPECIAL_HEADINGS.contains(&upper.as_str()).then_some(upper)
}
