use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One sellable item. The catalog is defined at build time and never changes
/// at runtime; item names are unique across the whole catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogItem {
    pub category: &'static str,
    pub name: &'static str,
    pub price: f64,
}

const fn item(category: &'static str, name: &'static str, price: f64) -> CatalogItem {
    CatalogItem {
        category,
        name,
        price,
    }
}

pub static CATALOG: &[CatalogItem] = &[
    item("Gun", "PISTOL .50", 9100.0),
    item("Gun", "CERAMIC PISTOL", 26000.0),
    item("Gun", "TECH 9", 26000.0),
    item("Gun", "MINI SMG", 29900.0),
    item("Gun", "MICRO SMG", 29900.0),
    item("Gun", "SMG", 39000.0),
    item("Gun", "SHOTGUN", 65000.0),
    item("Gun", "NAVY REVOLVER", 71500.0),
    item("Gun", "PISTOL X17", 32500.0),
    item("Gun", "BLACK REVOLVER", 91000.0),
    item("Gun", "KVR", 78000.0),
    item("Ammo", "AMMO 9MM", 2730.0),
    item("Ammo", "AMMO 44 MAGNUM", 5200.0),
    item("Ammo", "AMMO 0.45", 5200.0),
    item("Ammo", "AMMO 12 GAUGE", 6500.0),
    item("Ammo", "AMMO .50", 750.0),
    item("Attachment", "Tactical Flashlight", 3000.0),
    item("Attachment", "Suppressor", 10000.0),
    item("Attachment", "Tactical Suppressor", 10000.0),
    item("Attachment", "Grip", 3000.0),
    item("Attachment", "Extended Pistol Clip", 3000.0),
    item("Attachment", "Extended SMG Clip", 5000.0),
    item("Attachment", "Extended Rifle Clip", 15000.0),
    item("Attachment", "SMG Drum", 10000.0),
    item("Attachment", "Rifle Drum", 20000.0),
    item("Attachment", "Macro Scope", 3000.0),
    item("Attachment", "Medium Scope", 3000.0),
    item("Others", "VEST", 2600.0),
    item("Others", "VEST MEDIUM", 1300.0),
    item("Others", "LOCKPICK", 1300.0),
];

/// Per-item order caps carried along with the submit payload so the backend
/// can enforce them. Items without an entry are uncapped.
pub static ITEM_MAX_LIMITS: &[(&str, u32)] = &[
    ("PISTOL .50", 60),
    ("CERAMIC PISTOL", 30),
    ("MICRO SMG", 20),
    ("AMMO 9MM", 250),
    ("AMMO .50", 100),
    ("VEST", 125),
    ("VEST MEDIUM", 150),
    ("LOCKPICK", 60),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static CatalogItem>> =
    Lazy::new(|| CATALOG.iter().map(|it| (it.name, it)).collect());

/// Look an item up by its unique name.
pub fn find(name: &str) -> Option<&'static CatalogItem> {
    BY_NAME.get(name).copied()
}

/// Category names in catalog order, deduplicated.
pub fn categories() -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for it in CATALOG {
        if !out.contains(&it.category) {
            out.push(it.category);
        }
    }
    out
}

/// Items belonging to one category, in catalog order.
pub fn items_in(category: &str) -> Vec<&'static CatalogItem> {
    CATALOG.iter().filter(|it| it.category == category).collect()
}

/// Maximum order quantity for an item, when capped.
pub fn max_qty(name: &str) -> Option<u32> {
    ITEM_MAX_LIMITS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, max)| *max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_known_items() {
        let smg = find("SMG").unwrap();
        assert_eq!(smg.category, "Gun");
        assert_eq!(smg.price, 39000.0);
        assert!(find("UNKNOWN ITEM").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        assert_eq!(BY_NAME.len(), CATALOG.len());
    }

    #[test]
    fn test_categories_order() {
        assert_eq!(categories(), vec!["Gun", "Ammo", "Attachment", "Others"]);
        assert_eq!(items_in("Others").len(), 3);
        assert!(items_in("Nope").is_empty());
    }

    #[test]
    fn test_max_limits() {
        assert_eq!(max_qty("AMMO 9MM"), Some(250));
        assert_eq!(max_qty("SMG"), None);
    }

    #[test]
    fn test_prices_non_negative() {
        assert!(CATALOG.iter().all(|it| it.price >= 0.0));
    }
}
