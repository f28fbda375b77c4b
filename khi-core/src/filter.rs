use serde::Deserialize;

use crate::Deal;

/// Query filters for listing deals. Empty strings count as absent.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct DealFilter {
    pub category: Option<String>,
    pub destination: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
}

impl DealFilter {
    pub fn matches(&self, deal: &Deal) -> bool {
        if let Some(category) = present(&self.category) {
            if deal.category != category {
                return false;
            }
        }

        if let Some(destination) = present(&self.destination) {
            let needle = destination.to_lowercase();
            if !deal.destination_city.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(max_price) = present(&self.max_price) {
            // An unreadable bound matches nothing.
            match parse_leading_int(max_price) {
                Some(limit) if deal.price_amount() <= limit as f64 => {}
                _ => return false,
            }
        }

        true
    }

    pub fn is_empty(&self) -> bool {
        present(&self.category).is_none()
            && present(&self.destination).is_none()
            && present(&self.max_price).is_none()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Reads the integer at the start of `input`, ignoring leading whitespace
/// and anything after the digits: `" 20000abc"` reads as 20000. Values
/// past the `i64` range saturate. Returns `None` when no digits lead the
/// string.
pub fn parse_leading_int(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return None;
    }

    // Accumulate toward the sign so i64::MIN stays reachable.
    let value = digits.bytes().fold(0i64, |acc, b| {
        let digit = i64::from(b - b'0');
        if negative {
            acc.saturating_mul(10).saturating_sub(digit)
        } else {
            acc.saturating_mul(10).saturating_add(digit)
        }
    });

    Some(value)
}
