//! Document synthesis: sanitized records to a complete LaTeX source.
//!
//! The document has exactly three parts. A fixed preamble sets the paper to
//! the physical envelope size, one block per record typesets the address,
//! and a fixed closing ends the document. Synthesis is a pure string
//! transformation; writing the result anywhere is the caller's business.

use crate::config::PageDimensions;
use crate::output::Document;
use crate::pipeline::extract::AddressRecord;
use crate::pipeline::sanitize::sanitize;

/// The sender block typeset in the top-left corner of each envelope.
const RETURN_ADDRESS: [&str; 3] = [
    "Sean Evans \\& Lauren Demell",
    "134 Crescent Lane",
    "Roslyn Heights NY 11577",
];

/// Compose the full document from extracted records.
///
/// Records are rendered in the order given. Each block fills one page:
/// return address top-left (when `include_return_address`), stamp box
/// top-right (when `include_stamp`), then the guest's address centered in
/// `\Huge` type.
pub fn synthesize(
    records: &[AddressRecord],
    dims: &PageDimensions,
    include_return_address: bool,
    include_stamp: bool,
) -> Document {
    let preamble = preamble(dims);
    let closing = "\\end{document}".to_string();

    let mut body = String::new();
    for record in records {
        push_envelope(&mut body, record, include_return_address, include_stamp);
    }

    Document {
        preamble,
        body,
        closing,
    }
}

/// Document class and page geometry for the physical envelope.
fn preamble(dims: &PageDimensions) -> String {
    format!(
        "\\documentclass[12pt]{{article}}\n\n\
         \\usepackage[paperheight={}in,paperwidth={}in,margin={}in,nofoot,nohead]{{geometry}}\n\n\
         \\begin{{document}}\n\n\
         \\pagestyle{{empty}}\n\
         \\setlength{{\\unitlength}}{{1in}}\n\n",
        dims.height, dims.width, dims.margin
    )
}

/// Append one envelope page to `body`.
fn push_envelope(
    body: &mut String,
    record: &AddressRecord,
    include_return_address: bool,
    include_stamp: bool,
) {
    let name = sanitize(&record.name);
    let street = sanitize(&record.street);
    let city = sanitize(&record.city);
    // Sanitized for parity with the other fields, but not typeset: printing
    // the country line on every envelope of a mostly-domestic guest list was
    // dropped from the layout.
    let _country = sanitize(&record.country);

    body.push_str("\\begin{minipage}{.5\\linewidth} \\noindent\n");
    if include_return_address {
        for line in RETURN_ADDRESS {
            body.push_str(line);
            body.push_str("\\\\\n");
        }
    }
    body.push_str("\\end{minipage}\n");

    body.push_str("\\begin{minipage}{.5\\linewidth} \\hspace{-.2in} \\vspace{-.3in}\n");
    if include_stamp {
        body.push_str("\\begin{flushright}\n\\framebox(1,1){STAMP}\n\\end{flushright}\n");
    }
    body.push_str("\\end{minipage}\n\n");

    body.push_str("\\begin{center} \\begin{Huge} \\vspace*{\\fill}\n");
    body.push_str(&name);
    body.push_str("\\\\\n");
    body.push_str(&street);
    body.push_str("\\\\\n");
    body.push_str(&city);
    body.push_str("\\\\\n");
    body.push_str("\\vspace{\\fill} \\end{Huge} \\end{center}\n\n");

    body.push_str("\\clearpage\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> PageDimensions {
        PageDimensions {
            height: 5.25,
            width: 7.25,
            margin: 1.0,
        }
    }

    fn record(name: &str, street: &str, city: &str, country: &str) -> AddressRecord {
        AddressRecord {
            name: name.into(),
            street: street.into(),
            city: city.into(),
            country: country.into(),
        }
    }

    #[test]
    fn test_preamble_parameterized_by_dimensions() {
        let doc = synthesize(&[], &dims(), true, true);
        assert!(doc
            .preamble
            .contains("paperheight=5.25in,paperwidth=7.25in,margin=1in"));
        assert!(doc.preamble.starts_with("\\documentclass[12pt]{article}"));
    }

    #[test]
    fn test_zero_records_still_framed() {
        let doc = synthesize(&[], &dims(), true, true);
        assert!(doc.body.is_empty());
        assert_eq!(doc.closing, "\\end{document}");
        let text = doc.text();
        assert!(text.starts_with("\\documentclass"));
        assert!(text.ends_with("\\end{document}"));
    }

    #[test]
    fn test_one_block_per_record() {
        let records = vec![
            record("Jane Doe", "123 1st Ave", "Springfield", "USA"),
            record("Ann Lee", "45th Main St", "Lakeview", "Canada"),
        ];
        let doc = synthesize(&records, &dims(), true, true);
        assert_eq!(doc.body.matches("\\clearpage").count(), 2);
        assert_eq!(doc.body.matches("\\begin{Huge}").count(), 2);
    }

    #[test]
    fn test_fields_sanitized_in_body() {
        let records = vec![record("Tom & Ida", "123 1st Ave", "Springfield", "USA")];
        let doc = synthesize(&records, &dims(), false, false);
        assert!(doc.body.contains("Tom \\& Ida"));
        assert!(doc.body.contains("123 $1^{st}$ Ave"));
    }

    #[test]
    fn test_country_not_typeset() {
        let records = vec![record("Ann Lee", "45th Main St", "Lakeview", "Canada")];
        let doc = synthesize(&records, &dims(), true, true);
        assert!(!doc.body.contains("Canada"));
    }

    #[test]
    fn test_return_address_toggle() {
        let records = vec![record("A", "1 B St", "C", "D")];
        let with = synthesize(&records, &dims(), true, false);
        let without = synthesize(&records, &dims(), false, false);
        assert!(with.body.contains("134 Crescent Lane"));
        assert!(!without.body.contains("134 Crescent Lane"));
    }

    #[test]
    fn test_stamp_toggle() {
        let records = vec![record("A", "1 B St", "C", "D")];
        let with = synthesize(&records, &dims(), false, true);
        let without = synthesize(&records, &dims(), false, false);
        assert!(with.body.contains("\\framebox(1,1){STAMP}"));
        assert!(!without.body.contains("STAMP"));
    }

    #[test]
    fn test_record_order_matches_input() {
        let records = vec![
            record("First Guest", "1 A St", "X", "USA"),
            record("Second Guest", "2 B St", "Y", "USA"),
        ];
        let doc = synthesize(&records, &dims(), true, true);
        let first = doc.body.find("First Guest").unwrap();
        let second = doc.body.find("Second Guest").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_integral_margin_renders_without_fraction() {
        let d = PageDimensions {
            height: 4.0,
            width: 9.5,
            margin: 1.0,
        };
        let doc = synthesize(&[], &d, true, true);
        assert!(doc.preamble.contains("paperheight=4in"));
        assert!(doc.preamble.contains("margin=1in"));
    }
}
