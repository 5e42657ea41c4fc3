//! Reflow state machine producing ordered output blocks.

use unicode_normalization::UnicodeNormalization;

use super::classify::{LineCategory, LineClassifier};
use super::split::HeadingSplitter;

/// A unit of reflowed output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputBlock {
    /// A section heading kept on its own line.
    Heading(String),

    /// A line kept separate: a dash item or a list-section entry.
    Item(String),

    /// A run of plain lines merged into one space-joined paragraph.
    Paragraph(String),
}

impl OutputBlock {
    /// The block's text.
    pub fn text(&self) -> &str {
        match self {
            OutputBlock::Heading(s) | OutputBlock::Item(s) | OutputBlock::Paragraph(s) => s,
        }
    }
}

/// Single-pass reflow of zone-extracted lines.
///
/// One call owns its entire state and leaves nothing behind, so
/// independent inputs can be reflowed concurrently from any number of
/// threads with a shared engine.
pub struct ReflowEngine {
    classifier: LineClassifier,
}

impl ReflowEngine {
    /// Create an engine with the default vocabularies.
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
        }
    }

    /// The engine's line classifier.
    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Reflow raw zone text into its final newline-joined form.
    ///
    /// Empty input (or input that is blank after normalization) yields an
    /// empty string.
    pub fn reflow(&self, text: &str) -> String {
        let blocks = self.reflow_blocks(text);
        let lines: Vec<&str> = blocks.iter().map(OutputBlock::text).collect();
        lines.join("\n")
    }

    /// Reflow raw zone text into ordered output blocks.
    pub fn reflow_blocks(&self, text: &str) -> Vec<OutputBlock> {
        let lines = normalize_lines(text);
        let lines = self.split_headings(lines);
        self.fold_lines(lines)
    }

    /// Splitter pre-pass over every normalized line.
    ///
    /// The pass runs before any section state exists, so the drug
    /// short-circuit is evaluated per line: drug-like lines go through
    /// unsplit and everything else is offered to the splitter with the
    /// section flag unset.
    fn split_headings(&self, lines: Vec<String>) -> Vec<String> {
        let splitter = HeadingSplitter::new(&self.classifier);
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            if self.classifier.is_drug_like(&line) {
                out.push(line);
                continue;
            }
            let (first, rest) = splitter.split(&line, false);
            out.push(first);
            out.extend(rest);
        }
        out
    }

    /// Fold classified lines into output blocks, one pass left to right.
    fn fold_lines(&self, lines: Vec<String>) -> Vec<OutputBlock> {
        let mut blocks = Vec::new();
        let mut buffer: Vec<String> = Vec::new();
        let mut in_list_section = false;

        for line in lines {
            let category = self.classifier.classify(&line, in_list_section);
            match category {
                LineCategory::Heading | LineCategory::SpecialHeading { .. } => {
                    flush_paragraph(&mut blocks, &mut buffer);
                    let opens_list = category.opens_list_section();
                    if opens_list != in_list_section {
                        log::debug!(
                            "list section {} at {:?}",
                            if opens_list { "opened" } else { "closed" },
                            line
                        );
                    }
                    in_list_section = opens_list;
                    blocks.push(OutputBlock::Heading(line));
                }
                LineCategory::DashItem => {
                    flush_paragraph(&mut blocks, &mut buffer);
                    blocks.push(OutputBlock::Item(line));
                }
                _ if in_list_section => {
                    flush_paragraph(&mut blocks, &mut buffer);
                    blocks.push(OutputBlock::Item(line));
                }
                _ => buffer.push(line),
            }
        }

        flush_paragraph(&mut blocks, &mut buffer);
        blocks
    }
}

impl Default for ReflowEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize raw zone text into trimmed, non-empty lines: NFC, CR and
/// CRLF to LF, whitespace-only lines dropped.
fn normalize_lines(text: &str) -> Vec<String> {
    let text: String = text.nfc().collect();
    text.replace('\r', "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Close the current paragraph buffer into a block, if non-empty.
fn flush_paragraph(blocks: &mut Vec<OutputBlock>, buffer: &mut Vec<String>) {
    if !buffer.is_empty() {
        blocks.push(OutputBlock::Paragraph(buffer.join(" ")));
        buffer.clear();
    }
}
