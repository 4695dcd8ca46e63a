//! Per-customer carts and their line items
//!
//! A cart line is a tagged union: either a quantity of a catalog product or
//! a single custom cake spec. The two shapes are distinguished by a `kind`
//! tag and validated exhaustively, never by ad hoc field-presence checks.
//!
//! One cart exists per customer identity, created lazily on first add, and
//! persisted whole; concurrent adds against the same cart resolve
//! last-write-wins at the store.

use crate::core::cake::CakeSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single line in a customer's cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartLine {
    /// A catalog product, referenced by name, with the unit price captured
    /// at the time it was added
    Product {
        name: String,
        quantity: u32,
        unit_price_cents: i64,
    },

    /// A fully specified custom cake order
    CustomCake { spec: CakeSpec },
}

impl CartLine {
    /// Total price of this line in cents
    pub fn line_total_cents(&self) -> i64 {
        match self {
            CartLine::Product {
                quantity,
                unit_price_cents,
                ..
            } => i64::from(*quantity) * unit_price_cents,
            CartLine::CustomCake { spec } => spec.price_cents,
        }
    }
}

/// A customer's cart: an ordered sequence of lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Owning customer identity (lowercased email)
    pub customer: String,
    pub lines: Vec<CartLine>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// An empty cart for a customer that has not added anything yet
    pub fn empty(customer: impl Into<String>) -> Self {
        Self {
            customer: customer.into(),
            lines: Vec::new(),
            updated_at: Utc::now(),
        }
    }

    /// Append a line and refresh the update timestamp
    pub fn push_line(&mut self, line: CartLine) {
        self.lines.push(line);
        self.updated_at = Utc::now();
    }

    /// Remove the line at `index`, refreshing the update timestamp.
    ///
    /// Returns the removed line, or `None` when the index is out of range.
    pub fn remove_line(&mut self, index: usize) -> Option<CartLine> {
        if index >= self.lines.len() {
            return None;
        }
        let removed = self.lines.remove(index);
        self.updated_at = Utc::now();
        Some(removed)
    }

    /// Sum of all line totals in cents
    pub fn total_cents(&self) -> i64 {
        self.lines.iter().map(CartLine::line_total_cents).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::cake::{CakeBase, CakeSize, DesignSource, Fulfilment};
    use chrono::NaiveDate;

    fn cake_spec() -> CakeSpec {
        CakeSpec {
            occasion: "Birthday".into(),
            base: CakeBase::Chocolate,
            size: CakeSize::Medium,
            colors: vec!["blue".into()],
            fulfilment: Fulfilment::SelfPickup,
            topping: None,
            message: None,
            design: DesignSource::AiGenerated,
            notes: None,
            required_date: NaiveDate::from_ymd_opt(2027, 1, 15).unwrap(),
            price_cents: 5400,
            surcharge_note: None,
        }
    }

    #[test]
    fn test_line_totals() {
        let product = CartLine::Product {
            name: "Croissant".into(),
            quantity: 3,
            unit_price_cents: 450,
        };
        assert_eq!(product.line_total_cents(), 1350);

        let cake = CartLine::CustomCake { spec: cake_spec() };
        assert_eq!(cake.line_total_cents(), 5400);
    }

    #[test]
    fn test_cart_total_sums_lines() {
        let mut cart = Cart::empty("maya@example.com");
        cart.push_line(CartLine::Product {
            name: "Croissant".into(),
            quantity: 2,
            unit_price_cents: 450,
        });
        cart.push_line(CartLine::CustomCake { spec: cake_spec() });
        assert_eq!(cart.total_cents(), 900 + 5400);
    }

    #[test]
    fn test_remove_line_by_index() {
        let mut cart = Cart::empty("maya@example.com");
        cart.push_line(CartLine::Product {
            name: "Croissant".into(),
            quantity: 1,
            unit_price_cents: 450,
        });
        cart.push_line(CartLine::Product {
            name: "Baguette".into(),
            quantity: 1,
            unit_price_cents: 380,
        });

        let removed = cart.remove_line(0).unwrap();
        assert!(matches!(removed, CartLine::Product { name, .. } if name == "Croissant"));
        assert_eq!(cart.lines.len(), 1);

        assert!(cart.remove_line(5).is_none());
    }

    #[test]
    fn test_lines_serialize_with_kind_tag() {
        let product = CartLine::Product {
            name: "Croissant".into(),
            quantity: 1,
            unit_price_cents: 450,
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["kind"], "product");

        let cake = CartLine::CustomCake { spec: cake_spec() };
        let json = serde_json::to_value(&cake).unwrap();
        assert_eq!(json["kind"], "custom_cake");
    }

    #[test]
    fn test_cart_round_trips_through_json() {
        let mut cart = Cart::empty("maya@example.com");
        cart.push_line(CartLine::CustomCake { spec: cake_spec() });
        let json = serde_json::to_string(&cart).unwrap();
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
