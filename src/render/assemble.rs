//! Text assembly and the low-yield fallback.

use std::collections::HashSet;

use crate::parser::{
    ArraySpacing, DecodedFragment, DedupPolicy, ExtractOptions, ShowOperator, TextOperation,
};

use super::result::{Diagnostic, ExtractionReport, ExtractionResult, ExtractionStats};

/// Collects fragments in discovery order and turns them into a result.
///
/// Fragments are pushed region by region, operation by operation. Blank
/// fragments are dropped, duplicates are dropped according to the
/// [`DedupPolicy`], and the survivors are joined by single spaces with all
/// whitespace runs collapsed.
pub struct TextAssembler {
    dedup: DedupPolicy,
    array_spacing: ArraySpacing,
    min_text_chars: usize,
    seen: HashSet<String>,
    units: Vec<String>,
    stats: ExtractionStats,
}

impl TextAssembler {
    pub fn new(dedup: DedupPolicy, array_spacing: ArraySpacing, min_text_chars: usize) -> Self {
        Self {
            dedup,
            array_spacing,
            min_text_chars,
            seen: HashSet::new(),
            units: Vec::new(),
            stats: ExtractionStats::new(),
        }
    }

    pub fn from_options(options: &ExtractOptions) -> Self {
        Self::new(options.dedup, options.array_spacing, options.min_text_chars)
    }

    /// Record that a new stream region starts.
    pub fn begin_stream(&mut self) {
        self.stats.add_stream();
    }

    /// Add the fragments of one text operation.
    pub fn push_operation(&mut self, op: &TextOperation<'_>) {
        self.stats.add_operation();
        let fragments = op.decode();
        self.stats.fragment_count += fragments.len() as u32;

        match (self.array_spacing, op.operator) {
            (ArraySpacing::Concatenate, ShowOperator::ShowArray) => {
                let joined: String = fragments.iter().map(DecodedFragment::as_str).collect();
                self.push_unit(joined);
            }
            _ => {
                for fragment in fragments {
                    self.push_unit(fragment.into_string());
                }
            }
        }
    }

    /// Add one fragment found outside any text operation.
    pub fn push_loose(&mut self, fragment: DecodedFragment) {
        if self.push_unit(fragment.into_string()) {
            self.stats.loose_literal_count += 1;
        }
    }

    fn push_unit(&mut self, unit: String) -> bool {
        if unit.trim().is_empty() {
            self.stats.empty_fragment_count += 1;
            return false;
        }
        if self.dedup.applies_to(&unit) && !self.seen.insert(unit.clone()) {
            self.stats.duplicate_count += 1;
            return false;
        }
        self.units.push(unit);
        true
    }

    /// The assembled text so far.
    pub fn text(&self) -> String {
        normalize_whitespace(&self.units.join(" "))
    }

    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    /// Apply the plausibility threshold and produce the final report.
    pub fn finish(mut self, file_name: &str) -> ExtractionReport {
        let text = self.text();
        self.stats.count_text(&text);

        let char_count = text.chars().count();
        let result = if char_count < self.min_text_chars {
            log::warn!(
                "{}: only {} characters recovered (threshold {}), likely scanned or compressed",
                file_name,
                char_count,
                self.min_text_chars
            );
            ExtractionResult::Degraded(Diagnostic::low_yield(file_name, text))
        } else {
            ExtractionResult::Complete { text }
        };

        ExtractionReport {
            result,
            stats: self.stats,
        }
    }
}

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
