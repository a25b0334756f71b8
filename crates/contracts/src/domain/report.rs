use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Flat order-line record as returned by the period reporting endpoint.
/// Consumed read-only; `subtotal` reflects the price at order time, which
/// may differ from the current catalog price.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRecord {
    pub order_no: String,
    pub member_name: String,
    pub created_at: DateTime<Utc>,
    pub item_name: String,
    pub qty: u32,
    pub subtotal: f64,
    pub delivered: bool,
}

/// Named report bucket with the item names it claims. A line belongs to the
/// first definition that lists its item; unmatched lines fall into the
/// implicit catch-all group.
#[derive(Debug, Clone, Copy)]
pub struct GroupDefinition {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

/// Catch-all bucket for items not assigned to any named group.
pub const CATCH_ALL_GROUP: &str = "LAINNYA";

/// Default report layout: items ordered to the high table, everything else
/// under LAINNYA.
pub static DEFAULT_GROUPS: &[GroupDefinition] = &[GroupDefinition {
    name: "ORDER KE HIGH TABEL",
    items: &[
        "SMG",
        "SHOTGUN",
        "NAVY REVOLVER",
        "PISTOL X17",
        "BLACK REVOLVER",
        "KVR",
    ],
}];

/// Accumulated totals for one item within a group. The unit price is
/// recomputed from the accumulated totals (`subtotal / qty`) rather than
/// taken from the catalog, so historical price overrides stay visible.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTotals {
    pub item_name: String,
    pub qty: u32,
    pub unit_price: f64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    pub name: String,
    pub items: Vec<ItemTotals>,
}

impl GroupReport {
    pub fn total(&self) -> f64 {
        self.items.iter().map(|it| it.subtotal).sum()
    }

    pub fn item(&self, name: &str) -> Option<&ItemTotals> {
        self.items.iter().find(|it| it.item_name == name)
    }
}

fn group_name_for(item_name: &str, defs: &[GroupDefinition]) -> &'static str {
    for def in defs {
        if def.items.contains(&item_name) {
            return def.name;
        }
    }
    CATCH_ALL_GROUP
}

/// Re-aggregate flat order lines into named report groups.
///
/// Groups come out in definition order with the catch-all last, items in
/// first-seen order, so aggregating the same input twice produces identical
/// output. Holds no state; fully recomputed on every call.
pub fn group_aggregate(lines: &[OrderLineRecord], defs: &[GroupDefinition]) -> Vec<GroupReport> {
    let mut groups: Vec<GroupReport> = Vec::new();

    for line in lines {
        let group_name = group_name_for(&line.item_name, defs);
        let group_idx = match groups.iter().position(|g| g.name == group_name) {
            Some(i) => i,
            None => {
                groups.push(GroupReport {
                    name: group_name.to_string(),
                    items: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[group_idx];

        // Unit price of the line itself, guarding the qty == 0 edge.
        let line_unit_price = if line.qty > 0 {
            line.subtotal / line.qty as f64
        } else {
            0.0
        };

        match group
            .items
            .iter()
            .position(|it| it.item_name == line.item_name)
        {
            Some(i) => {
                let entry = &mut group.items[i];
                entry.qty += line.qty;
                entry.subtotal += line.subtotal;
                entry.unit_price = if entry.qty > 0 {
                    entry.subtotal / entry.qty as f64
                } else {
                    line_unit_price
                };
            }
            None => {
                group.items.push(ItemTotals {
                    item_name: line.item_name.clone(),
                    qty: line.qty,
                    unit_price: line_unit_price,
                    subtotal: line.subtotal,
                });
            }
        }
    }

    // Definition order, catch-all last.
    let rank = |name: &str| -> usize {
        defs.iter()
            .position(|d| d.name == name)
            .unwrap_or(defs.len())
    };
    groups.sort_by_key(|g| rank(&g.name));
    groups
}
