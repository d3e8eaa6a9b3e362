//! Part-order text ⇄ structured map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::PartName;
use crate::part_order::grammar::parse_line;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartOrderEntry {
    /// Always >= 1; an entry that would drop below 1 is removed instead.
    pub quantity: u32,
    pub detail: String,
}

impl PartOrderEntry {
    pub fn single() -> Self {
        Self {
            quantity: 1,
            detail: String::new(),
        }
    }
}

/// Known parts keyed in catalog order (`PartName`'s `Ord` is declaration order).
pub type PartOrderMap = BTreeMap<PartName, PartOrderEntry>;

/// Decoded part-order box: recognised parts plus every line that matched
/// nothing, kept verbatim in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartOrder {
    pub entries: PartOrderMap,
    pub unknown_lines: Vec<String>,
}

/// Parses the part-order text, splitting on LF only so unknown lines keep any
/// CR byte for byte. Blank lines are dropped. Duplicate lines for the
/// same part add their quantities; the first non-empty detail is kept.
pub fn decode(text: &str) -> PartOrder {
    let mut order = PartOrder::default();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Some(parsed) => {
                order
                    .entries
                    .entry(parsed.part)
                    .and_modify(|existing| {
                        existing.quantity = existing.quantity.saturating_add(parsed.quantity);
                        if existing.detail.is_empty() && !parsed.detail.is_empty() {
                            existing.detail = parsed.detail.clone();
                        }
                    })
                    .or_insert(PartOrderEntry {
                        quantity: parsed.quantity,
                        detail: parsed.detail,
                    });
            }
            None => order.unknown_lines.push(line.to_string()),
        }
    }

    order
}

/// Writes one line per known part in catalog order, then the unknown lines.
pub fn encode(order: &PartOrder) -> String {
    let known = order
        .entries
        .iter()
        .filter(|(_, entry)| entry.quantity > 0)
        .map(|(part, entry)| encode_line(*part, entry));

    known
        .chain(order.unknown_lines.iter().cloned())
        .collect::<Vec<_>>()
        .join("\n")
}

fn encode_line(part: PartName, entry: &PartOrderEntry) -> String {
    let mut line = part.label().to_string();
    if entry.quantity > 1 {
        line.push_str(&format!(" x {}", entry.quantity));
    }
    let detail = entry.detail.trim();
    if detail.is_empty() {
        line.push_str(" -");
    } else {
        line.push_str(&format!(" - {detail}"));
    }
    line
}

/// Non-blank lines in the part-order box.
pub fn count_part_lines(text: &str) -> usize {
    text.lines().filter(|l| !l.trim().is_empty()).count()
}
