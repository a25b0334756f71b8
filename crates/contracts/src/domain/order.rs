use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::cart::Cart;
use super::catalog;
use super::period::PeriodCode;

/// A validated order ready to submit: the cart plus the member and period
/// it belongs to.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub member_id: Uuid,
    pub period_code: PeriodCode,
    pub cart: Cart,
}

impl OrderDraft {
    pub fn validate(&self) -> Result<(), String> {
        if self.cart.is_empty() {
            return Err("Please add items to order".into());
        }
        Ok(())
    }

    /// Wire payload for `POST /api/orders`. Field names (`orderanke`,
    /// `kategori`, `harga`) are what the backend expects; capped items
    /// carry their `maxQty` so the backend can enforce the limit.
    pub fn to_payload(&self) -> OrderPayload {
        OrderPayload {
            member_id: self.member_id,
            orderanke: self.period_code,
            delivered: false,
            items: self
                .cart
                .lines()
                .iter()
                .map(|l| OrderItemPayload {
                    item_name: l.item_name.clone(),
                    kategori: l.category.clone(),
                    harga: l.unit_price,
                    qty: l.qty,
                    max_qty: catalog::max_qty(&l.item_name),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub member_id: Uuid,
    pub orderanke: PeriodCode,
    pub delivered: bool,
    pub items: Vec<OrderItemPayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemPayload {
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub kategori: String,
    pub harga: f64,
    pub qty: u32,
    #[serde(rename = "maxQty", skip_serializing_if = "Option::is_none")]
    pub max_qty: Option<u32>,
}

/// One row of a member's own orders for the current period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberOrderRow {
    pub item: String,
    pub qty: u32,
    pub subtotal: f64,
}

/// Total spend across a member's rows for the period.
pub fn member_orders_total(rows: &[MemberOrderRow]) -> f64 {
    rows.iter().map(|r| r.subtotal).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_fails_validation() {
        let draft = OrderDraft {
            member_id: Uuid::new_v4(),
            period_code: PeriodCode(32),
            cart: Cart::new(),
        };
        assert!(draft.validate().is_err());
    }

    #[test]
    fn test_payload_wire_format() {
        let mut cart = Cart::new();
        cart.add("AMMO 9MM", 10).unwrap();
        cart.add("SMG", 1).unwrap();
        let draft = OrderDraft {
            member_id: Uuid::nil(),
            period_code: PeriodCode(32),
            cart,
        };
        assert!(draft.validate().is_ok());

        let json = serde_json::to_value(draft.to_payload()).unwrap();
        assert_eq!(json["orderanke"], 32);
        assert_eq!(json["delivered"], false);
        assert_eq!(json["items"][0]["itemName"], "AMMO 9MM");
        assert_eq!(json["items"][0]["kategori"], "Ammo");
        assert_eq!(json["items"][0]["harga"], 2730.0);
        assert_eq!(json["items"][0]["maxQty"], 250);
        // uncapped item omits maxQty entirely
        assert!(json["items"][1].get("maxQty").is_none());
    }

    #[test]
    fn test_member_orders_total() {
        let rows = vec![
            MemberOrderRow {
                item: "SMG".into(),
                qty: 2,
                subtotal: 78000.0,
            },
            MemberOrderRow {
                item: "VEST".into(),
                qty: 1,
                subtotal: 2600.0,
            },
        ];
        assert_eq!(member_orders_total(&rows), 80600.0);
    }
}
