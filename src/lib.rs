//! # zonetext
//!
//! Zone-based text extraction and reflow for paginated reports.
//!
//! A zone profile names rectangular regions of a page and binds each one
//! to a page selection. Given the raw text extracted from those regions
//! (by any document renderer), this library reconstructs its logical
//! structure: section headings stay on their own lines, therapy and other
//! list entries stay separate, and wrapped prose is merged back into
//! paragraphs.
//!
//! ## Quick Start
//!
//! ```
//! let raw = "Cardiopatia ischemica\ncronica stabile.\nTERAPIA\nASA 100 MG 1 CPR DIE";
//! let text = zonetext::reflow_text(raw);
//! assert_eq!(
//!     text,
//!     "Cardiopatia ischemica cronica stabile.\nTERAPIA\nASA 100 MG 1 CPR DIE"
//! );
//! ```
//!
//! ## Features
//!
//! - **Zone profiles**: serde-backed JSON schema shared with the
//!   calibration tool; fail-closed page selectors
//! - **Line classification**: headings, reserved section words, dash
//!   items, and drug/dosage lines told apart lexically
//! - **Reflow**: single-pass state machine merging paragraph runs while
//!   keeping list sections line-by-line
//! - **Renderer-agnostic driver**: plug any page-text source in through
//!   a small trait; pages processed in parallel with Rayon

pub mod error;
pub mod extract;
pub mod profile;
pub mod reflow;

// Re-export commonly used types
pub use error::{Error, Result};
pub use extract::{ExtractOptions, PageTextProvider, ZoneCapture, ZoneExtractor};
pub use profile::{PageSelector, PageSize, Zone, ZoneProfile};
pub use reflow::{reflow_text, LineCategory, LineClassifier, OutputBlock, ReflowEngine};

use std::path::Path;

/// Load a zone profile from a JSON file.
///
/// # Example
///
/// ```no_run
/// let profile = zonetext::load_profile("profile_referto.json").unwrap();
/// println!("zones: {}", profile.zones.len());
/// ```
pub fn load_profile<P: AsRef<Path>>(path: P) -> Result<ZoneProfile> {
    ZoneProfile::load(path)
}

/// Extract and reflow a whole document through a page-text provider.
///
/// Convenience wrapper over [`ZoneExtractor::extract_text`] with default
/// options.
pub fn extract_text<P: PageTextProvider>(provider: &P, profile: &ZoneProfile) -> String {
    ZoneExtractor::new(provider, profile).extract_text()
}
