//! Output types: the synthesized document and per-run statistics.

use serde::Serialize;

/// The three-part LaTeX document produced by one pipeline run.
///
/// Immutable after synthesis; the parts always concatenate in
/// preamble → body → closing order.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    /// Document class and envelope page geometry.
    pub preamble: String,
    /// One envelope block per record, in source row order.
    pub body: String,
    /// `\end{document}`.
    pub closing: String,
}

impl Document {
    /// The complete document text.
    pub fn text(&self) -> String {
        let mut s = String::with_capacity(
            self.preamble.len() + self.body.len() + self.closing.len(),
        );
        s.push_str(&self.preamble);
        s.push_str(&self.body);
        s.push_str(&self.closing);
        s
    }
}

/// Counters from one generation run.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GenerationStats {
    /// Rows visited in the configured range, including skipped ones.
    pub rows_scanned: usize,
    /// Envelope blocks emitted.
    pub envelopes: usize,
    /// Rows excluded by the `"?"` street sentinel.
    pub skipped: usize,
}

/// Result of a successful generation run.
#[derive(Debug, Clone, Serialize)]
pub struct EnvelopeOutput {
    pub document: Document,
    pub stats: GenerationStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_concatenates_in_order() {
        let doc = Document {
            preamble: "A".into(),
            body: "B".into(),
            closing: "C".into(),
        };
        assert_eq!(doc.text(), "ABC");
    }

    #[test]
    fn stats_serialize() {
        let stats = GenerationStats {
            rows_scanned: 3,
            envelopes: 2,
            skipped: 1,
        };
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"envelopes\":2"));
    }
}
