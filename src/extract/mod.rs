//! Extraction driver composing zones, page filters, and the reflow engine.
//!
//! The driver stays agnostic of any concrete document renderer: a
//! [`PageTextProvider`] supplies already-clipped zone text, and the driver
//! walks pages in order, keeps the captures whose zones apply, and hands
//! the text to the reflow engine.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::profile::{Zone, ZoneProfile};
use crate::reflow::ReflowEngine;

/// Characters shown per zone by [`ZoneExtractor::preview`].
const PREVIEW_CHARS: usize = 100;

/// Supplies raw text for a zone rectangle on one page.
///
/// Implementations wrap a document renderer. The returned text must be in
/// reading order, and empty when nothing overlaps the rectangle; the
/// driver never interprets geometry itself.
pub trait PageTextProvider: Sync {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Raw text inside `zone`'s rectangle on the given 0-based page.
    fn zone_text(&self, page_index: usize, zone: &Zone) -> String;
}

/// Options for the extraction driver.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Reflow extracted text (headings, list items, merged paragraphs).
    pub reflow: bool,

    /// Process pages in parallel.
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Enable or disable reflow of the extracted text.
    pub fn with_reflow(mut self, reflow: bool) -> Self {
        self.reflow = reflow;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            reflow: true,
            parallel: true,
        }
    }
}

/// Text captured for one zone across the whole document.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneCapture {
    /// Zone label.
    pub label: String,

    /// 1-based page numbers the texts came from, as reported to users.
    pub pages: Vec<usize>,

    /// One text per captured page, in page order.
    pub texts: Vec<String>,
}

impl ZoneCapture {
    /// True when no page produced text for this zone.
    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}

/// Walks a document's pages and extracts every applicable zone.
pub struct ZoneExtractor<'a, P> {
    provider: &'a P,
    profile: &'a ZoneProfile,
    engine: ReflowEngine,
    options: ExtractOptions,
}

impl<'a, P: PageTextProvider> ZoneExtractor<'a, P> {
    /// Create an extractor over a provider and a profile.
    pub fn new(provider: &'a P, profile: &'a ZoneProfile) -> Self {
        Self {
            provider,
            profile,
            engine: ReflowEngine::new(),
            options: ExtractOptions::default(),
        }
    }

    /// Replace the driver options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Extract the whole document as one text block.
    ///
    /// Captures are concatenated in page-major order (all applicable
    /// zones of page 0, then page 1, …) and reflowed as a single
    /// sequence, so a list section opened on one page keeps its entries
    /// separate on the next.
    pub fn extract_text(&self) -> String {
        let captures = self.capture_pages();
        let joined = captures
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        if self.options.reflow {
            self.engine.reflow(&joined)
        } else {
            joined
        }
    }

    /// Extract per-zone captures, grouped by label in profile order.
    pub fn extract_zones(&self) -> Vec<ZoneCapture> {
        let captures = self.capture_pages();
        self.profile
            .zones
            .iter()
            .map(|zone| {
                let mut capture = ZoneCapture {
                    label: zone.label.clone(),
                    pages: Vec::new(),
                    texts: Vec::new(),
                };
                for c in captures.iter().filter(|c| c.label == zone.label) {
                    capture.pages.push(c.page_index + 1);
                    capture.texts.push(if self.options.reflow {
                        self.engine.reflow(&c.text)
                    } else {
                        c.text.clone()
                    });
                }
                capture
            })
            .collect()
    }

    /// Extract a single zone by label.
    pub fn extract_zone(&self, label: &str) -> Result<ZoneCapture> {
        self.extract_zones()
            .into_iter()
            .find(|c| c.label == label)
            .ok_or_else(|| Error::ZoneNotFound(label.to_string()))
    }

    /// First characters of the first non-empty capture per zone, for
    /// quick visual checks of a profile against a document.
    pub fn preview(&self) -> Vec<(String, Option<String>)> {
        self.extract_zones()
            .into_iter()
            .map(|capture| {
                let snippet = capture.texts.first().map(|text| {
                    let flat = text.replace('\n', " ");
                    match flat.char_indices().nth(PREVIEW_CHARS) {
                        Some((i, _)) => format!("{}...", &flat[..i]),
                        None => flat,
                    }
                });
                (capture.label, snippet)
            })
            .collect()
    }

    /// Raw captures in page-major order, empty ones skipped.
    fn capture_pages(&self) -> Vec<RawCapture> {
        let capture_page = |page_index: usize| -> Vec<RawCapture> {
            self.profile
                .zones_for_page(page_index)
                .filter_map(|zone| {
                    let text = self.provider.zone_text(page_index, zone);
                    if text.trim().is_empty() {
                        None
                    } else {
                        Some(RawCapture {
                            label: zone.label.clone(),
                            page_index,
                            text,
                        })
                    }
                })
                .collect()
        };

        let pages = 0..self.provider.page_count();
        log::debug!(
            "extracting {} zones over {} pages",
            self.profile.zones.len(),
            pages.len()
        );

        let per_page: Vec<Vec<RawCapture>> = if self.options.parallel {
            pages.into_par_iter().map(capture_page).collect()
        } else {
            pages.map(capture_page).collect()
        };
        per_page.into_iter().flatten().collect()
    }
}

/// One non-empty zone capture on one page.
struct RawCapture {
    label: String,
    page_index: usize,
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{PageSelector, Zone};

    /// Provider over fixed per-page, per-zone strings.
    struct FixedProvider {
        pages: Vec<Vec<(&'static str, &'static str)>>,
    }

    impl PageTextProvider for FixedProvider {
        fn page_count(&self) -> usize {
            self.pages.len()
        }

        fn zone_text(&self, page_index: usize, zone: &Zone) -> String {
            self.pages[page_index]
                .iter()
                .find(|(label, _)| *label == zone.label)
                .map(|(_, text)| text.to_string())
                .unwrap_or_default()
        }
    }

    fn profile() -> ZoneProfile {
        let mut profile = ZoneProfile::new("test");
        profile
            .zones
            .push(Zone::new("corpo", 0.0, 0.0, 500.0, 700.0).with_pages(PageSelector::All));
        profile
            .zones
            .push(Zone::new("piede", 0.0, 700.0, 500.0, 100.0).with_pages(PageSelector::Single(1)));
        profile
    }

    fn provider() -> FixedProvider {
        FixedProvider {
            pages: vec![
                vec![("corpo", "Cardiopatia ischemica.\nIn compenso emodinamico.")],
                vec![
                    ("corpo", "TERAPIA\nASA 100 MG 1 CPR DIE"),
                    ("piede", "pagina 2 di 2"),
                ],
            ],
        }
    }

    #[test]
    fn test_extract_text_page_major_order() {
        let profile = profile();
        let provider = provider();
        let extractor = ZoneExtractor::new(&provider, &profile);
        assert_eq!(
            extractor.extract_text(),
            "Cardiopatia ischemica. In compenso emodinamico.\nTERAPIA\nASA 100 MG 1 CPR DIE\npagina 2 di 2"
        );
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let profile = profile();
        let provider = provider();
        let parallel = ZoneExtractor::new(&provider, &profile).extract_text();
        let sequential = ZoneExtractor::new(&provider, &profile)
            .with_options(ExtractOptions::new().sequential())
            .extract_text();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn test_extract_zones_grouping() {
        let profile = profile();
        let provider = provider();
        let captures = ZoneExtractor::new(&provider, &profile).extract_zones();

        assert_eq!(captures.len(), 2);
        assert_eq!(captures[0].label, "corpo");
        assert_eq!(captures[0].pages, vec![1, 2]);
        assert_eq!(captures[0].texts.len(), 2);
        assert_eq!(captures[1].label, "piede");
        assert_eq!(captures[1].pages, vec![2]);
    }

    #[test]
    fn test_extract_zone_not_found() {
        let profile = profile();
        let provider = provider();
        let extractor = ZoneExtractor::new(&provider, &profile);
        let err = extractor.extract_zone("margine").unwrap_err();
        assert!(matches!(err, Error::ZoneNotFound(label) if label == "margine"));
    }

    #[test]
    fn test_raw_extraction_skips_reflow() {
        let profile = profile();
        let provider = provider();
        let extractor = ZoneExtractor::new(&provider, &profile)
            .with_options(ExtractOptions::new().with_reflow(false));
        let text = extractor.extract_text();
        // Without reflow the two prose lines keep their line break.
        assert!(text.contains("Cardiopatia ischemica.\nIn compenso emodinamico."));
    }

    #[test]
    fn test_preview_truncates() {
        let profile = profile();
        let provider = provider();
        let extractor = ZoneExtractor::new(&provider, &profile);
        let preview = extractor.preview();

        assert_eq!(preview.len(), 2);
        let (label, snippet) = &preview[0];
        assert_eq!(label, "corpo");
        let snippet = snippet.as_deref().unwrap();
        assert!(!snippet.contains('\n'));
        assert!(snippet.starts_with("Cardiopatia"));
    }
}
