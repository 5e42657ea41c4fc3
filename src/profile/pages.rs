//! Page selectors binding zones to pages.

use std::fmt;

use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Selects which pages of a document a zone applies to.
///
/// On the wire (the calibration tool's JSON) a selector is the keyword
/// `"current"` or `"all"`, a single 0-based page index, or an array of
/// indices. A missing `pages` field means `Current`.
///
/// Decoding is fail-closed: any encoding that is not one of those forms
/// (an unknown keyword, a float, a boolean, `null`, an object, a negative
/// index) decodes to an empty `List`, which matches no page. A malformed
/// selector silently excludes its zone instead of over-matching or
/// aborting the profile load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelector {
    /// The page the zone was bound to when authored. Carries no page
    /// number of its own; the extraction driver only consults the filter
    /// while iterating the page the binding refers to.
    Current,
    /// Every page.
    All,
    /// A single 0-based page index.
    Single(usize),
    /// An explicit set of 0-based page indices.
    List(Vec<usize>),
}

impl PageSelector {
    /// Check whether this selector matches the given 0-based page index.
    pub fn applies(&self, page_index: usize) -> bool {
        match self {
            PageSelector::Current | PageSelector::All => true,
            PageSelector::Single(p) => *p == page_index,
            PageSelector::List(pages) => pages.contains(&page_index),
        }
    }
}

impl Default for PageSelector {
    fn default() -> Self {
        PageSelector::Current
    }
}

impl fmt::Display for PageSelector {
    /// Human-readable form with 1-based page numbers, as shown to users.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageSelector::Current => write!(f, "current page"),
            PageSelector::All => write!(f, "all pages"),
            PageSelector::Single(p) => write!(f, "page {}", p + 1),
            PageSelector::List(pages) => {
                if pages.is_empty() {
                    return write!(f, "no pages");
                }
                let nums: Vec<String> = pages.iter().map(|p| (p + 1).to_string()).collect();
                write!(f, "pages {}", nums.join(", "))
            }
        }
    }
}

impl Serialize for PageSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PageSelector::Current => serializer.serialize_str("current"),
            PageSelector::All => serializer.serialize_str("all"),
            PageSelector::Single(p) => serializer.serialize_u64(*p as u64),
            PageSelector::List(pages) => serializer.collect_seq(pages.iter()),
        }
    }
}

/// Matches no page; the fail-closed decode result.
fn closed() -> PageSelector {
    PageSelector::List(Vec::new())
}

struct PageSelectorVisitor;

impl<'de> Visitor<'de> for PageSelectorVisitor {
    type Value = PageSelector;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("\"current\", \"all\", a page index, or a list of page indices")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(match value {
            "current" => PageSelector::Current,
            "all" => PageSelector::All,
            _ => closed(),
        })
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(match usize::try_from(value) {
            Ok(p) => PageSelector::Single(p),
            Err(_) => closed(),
        })
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(match usize::try_from(value) {
            Ok(p) => PageSelector::Single(p),
            Err(_) => closed(),
        })
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut pages = Vec::new();
        while let Some(value) = seq.next_element::<i64>()? {
            // Negative entries are dropped element-wise.
            if let Ok(p) = usize::try_from(value) {
                pages.push(p);
            }
        }
        Ok(PageSelector::List(pages))
    }

    fn visit_f64<E: de::Error>(self, _value: f64) -> Result<Self::Value, E> {
        Ok(closed())
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<Self::Value, E> {
        Ok(closed())
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(closed())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(closed())
    }
}

impl<'de> Deserialize<'de> for PageSelector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(PageSelectorVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> PageSelector {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_applies() {
        assert!(PageSelector::Current.applies(0));
        assert!(PageSelector::Current.applies(7));

        assert!(PageSelector::All.applies(0));
        assert!(PageSelector::All.applies(100));

        let single = PageSelector::Single(2);
        assert!(single.applies(2));
        assert!(!single.applies(1));
        assert!(!single.applies(3));

        let list = PageSelector::List(vec![0, 2, 4]);
        assert!(list.applies(0));
        assert!(!list.applies(1));
        assert!(list.applies(4));
    }

    #[test]
    fn test_empty_list_matches_nothing() {
        let list = PageSelector::List(Vec::new());
        assert!(!list.applies(0));
        assert!(!list.applies(1));
    }

    #[test]
    fn test_decode_wire_forms() {
        assert_eq!(decode("\"current\""), PageSelector::Current);
        assert_eq!(decode("\"all\""), PageSelector::All);
        assert_eq!(decode("3"), PageSelector::Single(3));
        assert_eq!(decode("[0, 1, 5]"), PageSelector::List(vec![0, 1, 5]));
    }

    #[test]
    fn test_decode_fails_closed() {
        for json in ["\"everything\"", "1.5", "true", "null", "{\"page\": 1}", "-2"] {
            let selector = decode(json);
            assert!(!selector.applies(0), "{json} should match no page");
            assert!(!selector.applies(1), "{json} should match no page");
        }
    }

    #[test]
    fn test_decode_list_drops_negative_entries() {
        assert_eq!(decode("[1, -3, 2]"), PageSelector::List(vec![1, 2]));
    }

    #[test]
    fn test_serialize_round_trip() {
        for selector in [
            PageSelector::Current,
            PageSelector::All,
            PageSelector::Single(4),
            PageSelector::List(vec![0, 3]),
        ] {
            let json = serde_json::to_string(&selector).unwrap();
            assert_eq!(decode(&json), selector);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(PageSelector::Current.to_string(), "current page");
        assert_eq!(PageSelector::All.to_string(), "all pages");
        assert_eq!(PageSelector::Single(0).to_string(), "page 1");
        assert_eq!(PageSelector::List(vec![0, 2]).to_string(), "pages 1, 3");
        assert_eq!(PageSelector::List(Vec::new()).to_string(), "no pages");
    }
}
