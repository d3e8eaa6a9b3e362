//! Line grammar for the part-order box.
//!
//! ```text
//! line   := WS* PART (WS+ "x" WS* QTY)? (WS+ "-" (WS+ DETAIL)?)? WS*
//! PART   := a catalog label, matched case-insensitively
//! QTY    := ASCII digits, 1..=u32::MAX
//! DETAIL := any text, trimmed
//! ```
//!
//! The separator before `x` and `-` must be whitespace, so `LCD` never claims a
//! `LCD-CABLE` line.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use crate::catalog::PartName;

/// One recognised part line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub part: PartName,
    pub quantity: u32,
    pub detail: String,
}

static LINE_PATTERNS: LazyLock<Vec<(PartName, Regex)>> = LazyLock::new(|| {
    PartName::ALL
        .into_iter()
        .filter_map(|part| {
            let pattern = format!(
                r"^\s*{}(?:\s+x\s*(\d+))?(?:\s+-(?:\s+(.*?))?)?\s*$",
                regex::escape(part.label())
            );
            match RegexBuilder::new(&pattern).case_insensitive(true).build() {
                Ok(re) => Some((part, re)),
                Err(e) => {
                    tracing::error!("Part pattern for {} failed to compile: {e}", part.label());
                    None
                }
            }
        })
        .collect()
});

/// Parses a single line against the catalog. First catalog entry that matches
/// wins. Returns `None` for blank lines, lines naming no known part, and lines
/// whose quantity is zero or does not fit a `u32`.
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    if line.trim().is_empty() {
        return None;
    }

    for (part, re) in LINE_PATTERNS.iter() {
        let Some(caps) = re.captures(line) else {
            continue;
        };

        let quantity = match caps.get(1) {
            Some(m) => match m.as_str().parse::<u32>() {
                Ok(q) if q > 0 => q,
                _ => return None,
            },
            None => 1,
        };

        let detail = caps
            .get(2)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        return Some(ParsedLine {
            part: *part,
            quantity,
            detail,
        });
    }

    None
}
