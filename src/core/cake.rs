//! Custom cake specifications
//!
//! A [`CakeSpec`] is a customer-defined order: occasion, base, size, colors,
//! fulfilment method, decoration and a required date. Specs are immutable
//! once submitted; an edit produces a new spec. The price is computed here
//! from a base-type price table, a size factor and a flat delivery
//! surcharge, never taken from the client.
//!
//! The raw [`CakeOrderForm`] keeps every field optional and stringly-typed
//! so that validation can report *all* problems at once (see
//! [`crate::core::schedule::validate_order_form`]) instead of failing on
//! the first malformed field at deserialization time.

use crate::core::error::{ApiError, ApiResult};
use crate::core::schedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Flat fee added to the computed price when the order is delivered
pub const DELIVERY_SURCHARGE_CENTS: i64 = 500;

/// User-visible note attached to delivery orders
pub const DELIVERY_SURCHARGE_NOTE: &str = "Delivery adds a $5.00 charge to the order total";

/// The four cake bases the bakery offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CakeBase {
    Vanilla,
    Chocolate,
    RedVelvet,
    Carrot,
}

impl CakeBase {
    /// Parse a form value; tolerant of spacing and case
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "vanilla" => Some(CakeBase::Vanilla),
            "chocolate" => Some(CakeBase::Chocolate),
            "red_velvet" | "redvelvet" => Some(CakeBase::RedVelvet),
            "carrot" => Some(CakeBase::Carrot),
            _ => None,
        }
    }

    /// Price of a small cake of this base, in cents
    pub fn base_price_cents(self) -> i64 {
        match self {
            CakeBase::Vanilla => 3200,
            CakeBase::Chocolate => 3600,
            CakeBase::RedVelvet => 4200,
            CakeBase::Carrot => 3800,
        }
    }
}

/// The three sizes a cake can be ordered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CakeSize {
    Small,
    Medium,
    Large,
}

impl CakeSize {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "small" => Some(CakeSize::Small),
            "medium" => Some(CakeSize::Medium),
            "large" => Some(CakeSize::Large),
            _ => None,
        }
    }

    /// Size factor applied to the base price, in percent
    fn price_factor_percent(self) -> i64 {
        match self {
            CakeSize::Small => 100,
            CakeSize::Medium => 150,
            CakeSize::Large => 200,
        }
    }
}

/// How the finished order reaches the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fulfilment {
    SelfPickup,
    Delivery,
}

impl Fulfilment {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "self_pickup" | "pickup" => Some(Fulfilment::SelfPickup),
            "delivery" => Some(Fulfilment::Delivery),
            _ => None,
        }
    }
}

/// Where the cake's design comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DesignSource {
    /// Customer-supplied reference image (stored elsewhere; only the
    /// reference string is carried)
    Upload { reference: String },
    /// Placeholder for a generated design
    AiGenerated,
}

impl Default for DesignSource {
    fn default() -> Self {
        DesignSource::AiGenerated
    }
}

/// A fully validated, priced custom cake order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CakeSpec {
    pub occasion: String,
    pub base: CakeBase,
    pub size: CakeSize,
    /// At most three base colors
    pub colors: Vec<String>,
    pub fulfilment: Fulfilment,
    pub topping: Option<String>,
    /// Writing to pipe onto the cake
    pub message: Option<String>,
    pub design: DesignSource,
    pub notes: Option<String>,
    pub required_date: NaiveDate,
    /// Computed price in cents
    pub price_cents: i64,
    /// Set when fulfilment incurs an additional charge
    pub surcharge_note: Option<String>,
}

impl CakeSpec {
    /// Compute the price for a base/size/fulfilment combination
    pub fn price_for(base: CakeBase, size: CakeSize, fulfilment: Fulfilment) -> i64 {
        let sized = base.base_price_cents() * size.price_factor_percent() / 100;
        match fulfilment {
            Fulfilment::SelfPickup => sized,
            Fulfilment::Delivery => sized + DELIVERY_SURCHARGE_CENTS,
        }
    }

    /// Validate a raw order form against `today` and build the priced spec.
    ///
    /// Returns `ApiError::Invalid` carrying every failure when the form
    /// does not validate.
    pub fn from_form(form: CakeOrderForm, today: NaiveDate) -> ApiResult<Self> {
        let issues = schedule::validate_order_form(&form, today);
        if !issues.is_empty() {
            return Err(ApiError::Invalid(issues));
        }

        // validate_order_form guarantees these parse
        let base = form
            .base
            .as_deref()
            .and_then(CakeBase::parse)
            .ok_or_else(|| ApiError::Validation("cake base is required".into()))?;
        let size = form
            .size
            .as_deref()
            .and_then(CakeSize::parse)
            .ok_or_else(|| ApiError::Validation("cake size is required".into()))?;
        let fulfilment = form
            .fulfilment
            .as_deref()
            .and_then(Fulfilment::parse)
            .ok_or_else(|| ApiError::Validation("fulfilment option is required".into()))?;
        let required_date = form
            .required_date
            .as_deref()
            .and_then(schedule::parse_date)
            .ok_or_else(|| ApiError::Validation("required date is missing".into()))?;

        let price_cents = Self::price_for(base, size, fulfilment);
        let surcharge_note = match fulfilment {
            Fulfilment::Delivery => Some(DELIVERY_SURCHARGE_NOTE.to_string()),
            Fulfilment::SelfPickup => None,
        };

        Ok(Self {
            occasion: form.occasion.unwrap_or_default().trim().to_string(),
            base,
            size,
            colors: form.colors,
            fulfilment,
            topping: form.topping.filter(|t| !t.trim().is_empty()),
            message: form.message.filter(|m| !m.trim().is_empty()),
            design: form.design.unwrap_or_default(),
            notes: form.notes.filter(|n| !n.trim().is_empty()),
            required_date,
            price_cents,
            surcharge_note,
        })
    }
}

/// Raw cake order form as submitted by the client.
///
/// Everything is optional so validation can enumerate all missing or
/// malformed fields in one pass.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CakeOrderForm {
    pub occasion: Option<String>,
    pub base: Option<String>,
    pub size: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub fulfilment: Option<String>,
    pub topping: Option<String>,
    pub message: Option<String>,
    pub design: Option<DesignSource>,
    pub notes: Option<String>,
    /// ISO date, e.g. "2026-09-01"
    pub required_date: Option<String>,
}
