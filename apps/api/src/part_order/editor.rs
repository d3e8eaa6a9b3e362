//! Chip-grid edits applied to the raw part-order text.
//!
//! The text stays the source of truth: every edit decodes, mutates the map and
//! encodes again, so unknown lines survive any chip interaction.

use crate::catalog::PartName;
use crate::part_order::codec::{decode, encode, PartOrder, PartOrderEntry};

fn edit(text: &str, mutate: impl FnOnce(&mut PartOrder)) -> String {
    let mut order = decode(text);
    mutate(&mut order);
    encode(&order)
}

/// Adds the part with quantity 1 when absent, removes it entirely when present.
pub fn toggle_part(text: &str, part: PartName) -> String {
    edit(text, |order| {
        if order.entries.remove(&part).is_none() {
            order.entries.insert(part, PartOrderEntry::single());
        }
    })
}

/// Moves the quantity by `delta`, floored at 1. Absent parts are left alone.
pub fn adjust_quantity(text: &str, part: PartName, delta: i64) -> String {
    edit(text, |order| {
        if let Some(entry) = order.entries.get_mut(&part) {
            let next = (entry.quantity as i64).saturating_add(delta);
            entry.quantity = next.clamp(1, u32::MAX as i64) as u32;
        }
    })
}

/// Applies a quantity typed by the user. Non-numeric input changes nothing; a
/// value below 1 removes the part; otherwise the part is set (or added).
pub fn set_quantity(text: &str, part: PartName, raw: &str) -> String {
    let Ok(value) = raw.trim().parse::<i64>() else {
        tracing::debug!("Ignoring non-numeric quantity {raw:?} for {}", part.label());
        return text.to_string();
    };

    edit(text, |order| {
        if value < 1 {
            order.entries.remove(&part);
            return;
        }
        let quantity = value.min(u32::MAX as i64) as u32;
        order
            .entries
            .entry(part)
            .and_modify(|e| e.quantity = quantity)
            .or_insert(PartOrderEntry {
                quantity,
                detail: String::new(),
            });
    })
}

pub fn remove_part(text: &str, part: PartName) -> String {
    edit(text, |order| {
        order.entries.remove(&part);
    })
}

/// Replaces the detail of a part already in the order.
pub fn set_detail(text: &str, part: PartName, detail: &str) -> String {
    let detail = detail.lines().next().unwrap_or_default().trim().to_string();
    edit(text, |order| {
        if let Some(entry) = order.entries.get_mut(&part) {
            entry.detail = detail;
        }
    })
}
