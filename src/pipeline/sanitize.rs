//! Sanitisation: raw spreadsheet text to LaTeX-safe markup.
//!
//! Guest lists are typed by hand, so fields arrive with characters LaTeX
//! reserves (`#` and `&`, as in "Tom & Ida" or "Apt #4") and street ordinals
//! ("21st Ave") that look wrong typeset in plain text. This module applies
//! three deterministic rules that make a field safe to drop straight into
//! the document body. Each rule is a pure function with no shared state.
//!
//! ## Rule Order
//!
//! 1. Escape reserved characters (`#` to `\#`, `&` to `\&`)
//! 2. Rewrite ordinal suffixes as superscript math (`21st` to `$21^{st}$`),
//!    but only when the field starts with a number, i.e. looks like a
//!    street address rather than prose that happens to contain digits
//! 3. Strip leading whitespace

use once_cell::sync::Lazy;
use regex::Regex;

/// Characters LaTeX reserves that realistically appear in address data.
const RESERVED: [char; 2] = ['#', '&'];

/// Sanitise one raw field into LaTeX-safe text.
///
/// Pure function; the empty string maps to the empty string.
pub fn sanitize(raw: &str) -> String {
    let s = escape_reserved(raw);
    let s = superscript_ordinals(&s);
    s.trim_start().to_string()
}

// ── Rule 1: Escape reserved characters ───────────────────────────────────────

fn escape_reserved(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for c in input.chars() {
        if RESERVED.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ── Rule 2: Superscript ordinal suffixes ─────────────────────────────────────

static RE_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// A token starting with a digit and ending in an ordinal suffix.
/// The greedy group leaves exactly the two-letter suffix for the second.
static RE_ORDINAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d.*)(st|nd|rd|th)$").unwrap());

/// Does the field lead with a number, as street addresses do?
///
/// True for `"123 Main St"`, `"123-45 Kissena Blvd"` (hyphenated Queens
/// house numbers) and `"45th Main St"` (the house number is itself an
/// ordinal); false for `"Main St 123"`.
fn leads_with_number(first_token: &str) -> bool {
    RE_NUMERIC.is_match(first_token)
        || RE_ORDINAL.is_match(first_token)
        || first_token
            .split('-')
            .next()
            .is_some_and(|seg| RE_NUMERIC.is_match(seg))
}

/// Rewrite every `<digits…><st|nd|rd|th>` token as `$<digits…>^{<suffix>}$`.
///
/// Tokens are split on single spaces and rejoined the same way, so the
/// original spacing (including runs of spaces) survives untouched. Tokens
/// without a matching suffix pass through unchanged, as does the whole
/// string when its first token is not numeric.
fn superscript_ordinals(input: &str) -> String {
    let first = input.split(' ').next().unwrap_or("");
    if !leads_with_number(first) {
        return input.to_string();
    }

    input
        .split(' ')
        .map(|token| match RE_ORDINAL.captures(token) {
            Some(caps) => format!("${}^{{{}}}$", &caps[1], &caps[2]),
            None => token.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Tests ────────────────────────────────────────────────────────────────────
