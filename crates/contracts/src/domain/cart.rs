use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::catalog;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Programmer error: the UI only offers catalog-listed items.
    #[error("item not found in catalog: {0}")]
    ItemNotFound(String),
}

/// One line of an in-progress order, keyed by item name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub item_name: String,
    pub category: String,
    pub unit_price: f64,
    pub qty: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.unit_price * self.qty as f64
    }
}

/// The customer's current selection. Lives only until submit or reset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `qty` of an item, resolving category and price from the catalog.
    /// Adding an item already in the cart merges additively into the
    /// existing line. Callers clamp the quantity to at least 1 beforehand.
    pub fn add(&mut self, item_name: &str, qty: u32) -> Result<(), CartError> {
        let item = catalog::find(item_name)
            .ok_or_else(|| CartError::ItemNotFound(item_name.to_string()))?;

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_name == item.name) {
            line.qty += qty;
        } else {
            self.lines.push(CartLine {
                item_name: item.name.to_string(),
                category: item.category.to_string(),
                unit_price: item.price,
                qty,
            });
        }
        Ok(())
    }

    /// Remove the line for an item. Removing an absent item is a no-op.
    pub fn remove(&mut self, item_name: &str) {
        self.lines.retain(|l| l.item_name != item_name);
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(|l| l.subtotal()).sum()
    }

    pub fn total_qty(&self) -> u32 {
        self.lines.iter().map(|l| l.qty).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
