//! Fulfilment date rules and order-form validation
//!
//! Dates are compared day-to-day; time of day never matters. The form
//! validator accumulates every failure into a list so a client can render
//! all of them at once rather than fixing problems one round-trip at a time.

use crate::core::cake::{CakeBase, CakeOrderForm, CakeSize, Fulfilment};
use crate::core::error::FieldIssue;
use chrono::NaiveDate;

/// Maximum number of base colors a cake may specify
pub const MAX_CAKE_COLORS: usize = 3;

/// Whether a fulfilment date can be chosen.
///
/// Dates strictly before `today` are not selectable; today and all future
/// dates are. Calendar UIs should render non-selectable dates as
/// non-interactive.
pub fn is_selectable(candidate: NaiveDate, today: NaiveDate) -> bool {
    candidate >= today
}

/// Parse an ISO `YYYY-MM-DD` form date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Validate a cake order form, returning every failure found.
///
/// An empty vec means the form is valid and safe to turn into a
/// [`crate::core::cake::CakeSpec`].
pub fn validate_order_form(form: &CakeOrderForm, today: NaiveDate) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    match form.occasion.as_deref().map(str::trim) {
        None | Some("") => issues.push(FieldIssue::new("occasion", "occasion is required")),
        Some(_) => {}
    }

    match form.base.as_deref() {
        None => issues.push(FieldIssue::new("base", "cake base is required")),
        Some(raw) => {
            if CakeBase::parse(raw).is_none() {
                issues.push(FieldIssue::new(
                    "base",
                    format!("'{}' is not an available cake base", raw),
                ));
            }
        }
    }

    match form.size.as_deref() {
        None => issues.push(FieldIssue::new("size", "cake size is required")),
        Some(raw) => {
            if CakeSize::parse(raw).is_none() {
                issues.push(FieldIssue::new(
                    "size",
                    format!("'{}' is not an available size", raw),
                ));
            }
        }
    }

    match form.fulfilment.as_deref() {
        None => issues.push(FieldIssue::new(
            "fulfilment",
            "choose self pickup or delivery",
        )),
        Some(raw) => {
            if Fulfilment::parse(raw).is_none() {
                issues.push(FieldIssue::new(
                    "fulfilment",
                    format!("'{}' is not a fulfilment option", raw),
                ));
            }
        }
    }

    if form.colors.len() > MAX_CAKE_COLORS {
        issues.push(FieldIssue::new(
            "colors",
            format!("at most {} colors may be chosen", MAX_CAKE_COLORS),
        ));
    }

    match form.required_date.as_deref() {
        None | Some("") => issues.push(FieldIssue::new("required_date", "date is required")),
        Some(raw) => match parse_date(raw) {
            None => issues.push(FieldIssue::new(
                "required_date",
                format!("'{}' is not a valid date (expected YYYY-MM-DD)", raw),
            )),
            Some(date) => {
                if !is_selectable(date, today) {
                    issues.push(FieldIssue::new("required_date", "date is in the past"));
                }
            }
        },
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_past_dates_are_not_selectable() {
        let today = d("2026-08-07");
        assert!(!is_selectable(d("2026-08-06"), today));
        assert!(!is_selectable(d("2025-12-31"), today));
    }

    #[test]
    fn test_today_and_future_are_selectable() {
        let today = d("2026-08-07");
        assert!(is_selectable(today, today));
        assert!(is_selectable(d("2026-08-08"), today));
        assert!(is_selectable(d("2027-01-01"), today));
    }

    #[test]
    fn test_time_of_day_is_irrelevant() {
        // date-only comparison by construction: NaiveDate carries no time
        let today = d("2026-08-07");
        assert!(is_selectable(d("2026-08-07"), today));
    }

    #[test]
    fn test_missing_date_reported_as_required() {
        let form = CakeOrderForm {
            occasion: Some("Wedding".into()),
            base: Some("vanilla".into()),
            size: Some("large".into()),
            fulfilment: Some("delivery".into()),
            ..Default::default()
        };
        let issues = validate_order_form(&form, d("2026-08-07"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].field, "required_date");
        assert!(issues[0].message.contains("required"));
    }

    #[test]
    fn test_past_date_reported() {
        let form = CakeOrderForm {
            occasion: Some("Wedding".into()),
            base: Some("vanilla".into()),
            size: Some("large".into()),
            fulfilment: Some("delivery".into()),
            required_date: Some("2020-01-01".into()),
            ..Default::default()
        };
        let issues = validate_order_form(&form, d("2026-08-07"));
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("past"));
    }

    #[test]
    fn test_all_failures_reported_together() {
        let form = CakeOrderForm {
            base: Some("mango".into()),
            colors: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            required_date: Some("not-a-date".into()),
            ..Default::default()
        };
        let issues = validate_order_form(&form, d("2026-08-07"));
        let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
        assert!(fields.contains(&"occasion"));
        assert!(fields.contains(&"base"));
        assert!(fields.contains(&"size"));
        assert!(fields.contains(&"fulfilment"));
        assert!(fields.contains(&"colors"));
        assert!(fields.contains(&"required_date"));
    }

    #[test]
    fn test_valid_form_has_no_issues() {
        let form = CakeOrderForm {
            occasion: Some("Anniversary".into()),
            base: Some("red velvet".into()),
            size: Some("small".into()),
            colors: vec!["gold".into()],
            fulfilment: Some("Self Pickup".into()),
            required_date: Some("2026-08-07".into()),
            ..Default::default()
        };
        assert!(validate_order_form(&form, d("2026-08-07")).is_empty());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2026-08-07"), Some(d("2026-08-07")));
        assert_eq!(parse_date(" 2026-08-07 "), Some(d("2026-08-07")));
        assert_eq!(parse_date("07/08/2026"), None);
    }
}
