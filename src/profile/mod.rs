//! Zone profile model and JSON persistence.
//!
//! A profile is authored once by the interactive calibration tool and
//! consumed read-only by the extraction path. The JSON schema is the
//! calibrator's output: `profile_name`, optional source-document metadata,
//! and an ordered list of zones.

mod pages;

pub use pages::PageSelector;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A named rectangular region of a page, in document-space units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Label, unique within a profile.
    pub label: String,

    /// Left edge.
    pub x: f64,

    /// Top edge.
    pub y: f64,

    /// Rectangle width.
    pub width: f64,

    /// Rectangle height.
    pub height: f64,

    /// Pages this zone applies to.
    #[serde(default)]
    pub pages: PageSelector,
}

impl Zone {
    /// Create a zone bound to the current page.
    pub fn new(label: impl Into<String>, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            label: label.into(),
            x,
            y,
            width,
            height,
            pages: PageSelector::Current,
        }
    }

    /// Replace the page binding.
    pub fn with_pages(mut self, pages: PageSelector) -> Self {
        self.pages = pages;
        self
    }

    /// Check whether this zone applies to the given 0-based page index.
    pub fn applies_to_page(&self, page_index: usize) -> bool {
        self.pages.applies(page_index)
    }

    /// Right edge of the rectangle.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge of the rectangle.
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Page dimensions recorded by the calibration tool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Page width in document-space units.
    pub width: f64,

    /// Page height in document-space units.
    pub height: f64,
}

/// An ordered set of zones for one document layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneProfile {
    /// Profile name.
    pub profile_name: String,

    /// File name of the document the profile was calibrated against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_file: Option<String>,

    /// Page count of the calibration document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,

    /// Page dimensions of the calibration document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,

    /// Zones in authoring order.
    #[serde(default)]
    pub zones: Vec<Zone>,
}

impl ZoneProfile {
    /// Create an empty profile.
    pub fn new(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
            pdf_file: None,
            total_pages: None,
            page_size: None,
            zones: Vec::new(),
        }
    }

    /// Decode a profile from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: ZoneProfile = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Load a profile from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Encode the profile as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the profile to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Look up a zone by label.
    pub fn zone(&self, label: &str) -> Option<&Zone> {
        self.zones.iter().find(|z| z.label == label)
    }

    /// Zones applying to the given 0-based page index, in authoring order.
    pub fn zones_for_page(&self, page_index: usize) -> impl Iterator<Item = &Zone> {
        self.zones
            .iter()
            .filter(move |z| z.applies_to_page(page_index))
    }

    /// Check the label-uniqueness invariant.
    fn validate(&self) -> Result<()> {
        for (i, zone) in self.zones.iter().enumerate() {
            if self.zones[..i].iter().any(|z| z.label == zone.label) {
                return Err(Error::DuplicateZone(zone.label.clone()));
            }
        }
        Ok(())
    }
}
