use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use tracing::warn;

use crate::{DealError, DealResult};

/// Every deal departs from Karachi.
pub const ORIGIN_CODE: &str = "KHI";
pub const DEFAULT_CURRENCY: &str = "PKR";
pub const DEFAULT_CATEGORY: &str = "common";

/// Fields a create request must carry, checked in this order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "destination",
    "destination_city",
    "price",
    "original_price",
    "airline",
];

/// A round-trip flight offer out of KHI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub id: u64,
    #[serde(default = "default_origin")]
    pub origin: String,
    pub destination: String,
    pub destination_city: String,
    /// ISO `YYYY-MM-DD`, stored as sent.
    #[serde(default)]
    pub departure_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
    /// Amounts keep the JSON number they arrived as, so `14500` stays an
    /// integer on the way out and `14500.5` keeps its fraction.
    pub price: Number,
    pub original_price: Number,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub discount_percent: i64,
    pub airline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub airline_logo: Option<String>,
    #[serde(default)]
    pub stops: u32,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub available_months: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_flights_url: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Client-supplied keys with no typed counterpart, kept as sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_origin() -> String {
    ORIGIN_CODE.to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_active() -> bool {
    true
}

impl Deal {
    /// Builds a new deal from a create request body.
    ///
    /// The body must carry every entry of [`REQUIRED_FIELDS`] with a truthy
    /// value. `id`, `origin`, `discount_percent`, `is_active` and
    /// `created_at` are always set here, whatever the body says.
    pub fn from_submission(id: u64, body: Value, now: DateTime<Utc>) -> DealResult<Self> {
        let mut fields = match body {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        if let Some(missing) = REQUIRED_FIELDS
            .iter()
            .find(|field| !is_truthy(fields.get(**field)))
        {
            return Err(DealError::missing_field(missing));
        }

        fields.insert("id".to_string(), Value::from(id));
        fields.insert("origin".to_string(), Value::from(ORIGIN_CODE));
        fields.insert("discount_percent".to_string(), Value::from(0));
        fields.insert("is_active".to_string(), Value::Bool(true));
        fields.insert("created_at".to_string(), Value::from(now.to_rfc3339()));

        let mut deal: Deal = serde_json::from_value(Value::Object(fields)).map_err(|e| {
            warn!("Rejected new deal: {}", e);
            DealError::Validation("Invalid deal".to_string())
        })?;
        deal.discount_percent = discount_percent(deal.price_amount(), deal.original_price_amount());

        Ok(deal)
    }

    /// Shallow-merges `patch` over this deal and returns the result.
    ///
    /// Keys in the patch replace whole values. The id never changes and the
    /// discount is not recomputed. A patch that is not a JSON object changes
    /// nothing.
    pub fn merged(&self, patch: &Value) -> DealResult<Self> {
        let mut fields = match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(DealError::Internal("deal did not encode as an object".into())),
            Err(e) => return Err(DealError::Internal(e.to_string())),
        };

        if let Some(patch) = patch.as_object() {
            for (key, value) in patch {
                fields.insert(key.clone(), value.clone());
            }
        }
        fields.insert("id".to_string(), Value::from(self.id));

        serde_json::from_value(Value::Object(fields)).map_err(|e| {
            warn!(deal_id = self.id, "Rejected deal update: {}", e);
            DealError::Validation("Invalid deal field".to_string())
        })
    }

    pub fn price_amount(&self) -> f64 {
        self.price.as_f64().unwrap_or(0.0)
    }

    pub fn original_price_amount(&self) -> f64 {
        self.original_price.as_f64().unwrap_or(0.0)
    }
}

/// Percentage saved against the original fare, rounded half up.
pub fn discount_percent(price: f64, original_price: f64) -> i64 {
    let ratio = (original_price - price) / original_price * 100.0;
    if !ratio.is_finite() {
        return 0;
    }
    // float-to-int casts saturate
    (ratio + 0.5).floor() as i64
}

/// Loose presence check used for required fields: missing, `null`, `false`,
/// zero and the empty string all count as absent.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission() -> Value {
        json!({
            "destination": "DXB",
            "destination_city": "Dubai",
            "price": 14500,
            "original_price": 29000,
            "airline": "Emirates",
            "departure_date": "2026-03-15",
            "return_date": "2026-03-22",
            "category": "common"
        })
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(discount_percent(14500.0, 29000.0), 50);
        assert_eq!(discount_percent(64000.0, 150000.0), 57);
        assert_eq!(discount_percent(42000.0, 90000.0), 53);
        // halves round up, also when the fare went up
        assert_eq!(discount_percent(1.0, 8.0), 88);
        assert_eq!(discount_percent(9.0, 8.0), -12);
        assert_eq!(discount_percent(14500.5, 29000.0), 50);
        assert_eq!(discount_percent(1.0, 0.0), 0);
    }

    #[test]
    fn test_discount_percent_extreme_amounts() {
        assert_eq!(discount_percent(1.0, i64::MIN as f64), 100);
        assert_eq!(discount_percent(1e300, 1.0), i64::MIN);
        assert_eq!(discount_percent(f64::MAX, 1.0), 0);
    }

    #[test]
    fn test_from_submission_sets_derived_fields() {
        let now = Utc::now();
        let mut body = submission();
        body["origin"] = json!("LHE");
        body["id"] = json!(99);
        body["is_active"] = json!(false);

        let deal = Deal::from_submission(7, body, now).unwrap();

        assert_eq!(deal.id, 7);
        assert_eq!(deal.origin, "KHI");
        assert_eq!(deal.discount_percent, 50);
        assert!(deal.is_active);
        assert_eq!(deal.created_at.timestamp(), now.timestamp());
        assert_eq!(deal.currency, "PKR");
        assert_eq!(deal.departure_date.as_deref(), Some("2026-03-15"));
    }

    #[test]
    fn test_from_submission_accepts_fractional_price() {
        let mut body = submission();
        body["price"] = json!(14500.5);

        let deal = Deal::from_submission(1, body, Utc::now()).unwrap();

        assert_eq!(deal.price_amount(), 14500.5);
        assert_eq!(deal.discount_percent, 50);
        let encoded = serde_json::to_value(&deal).unwrap();
        assert_eq!(encoded["price"], json!(14500.5));
        assert_eq!(encoded["original_price"], json!(29000));
    }

    #[test]
    fn test_from_submission_extreme_original_price() {
        let mut body = submission();
        body["price"] = json!(1);
        body["original_price"] = json!(i64::MIN);

        let deal = Deal::from_submission(1, body, Utc::now()).unwrap();
        assert_eq!(deal.discount_percent, 100);
    }

    #[test]
    fn test_from_submission_names_first_missing_field() {
        let mut body = submission();
        body.as_object_mut().unwrap().remove("airline");
        let err = Deal::from_submission(1, body, Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: airline");

        let mut body = submission();
        body["destination_city"] = json!("");
        body["price"] = json!(0);
        let err = Deal::from_submission(1, body, Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: destination_city");
    }

    #[test]
    fn test_from_submission_non_object_body() {
        let err = Deal::from_submission(1, json!([1, 2, 3]), Utc::now()).unwrap_err();
        assert_eq!(err.to_string(), "Missing required field: destination");
    }

    #[test]
    fn test_from_submission_rejects_wrong_types() {
        let mut body = submission();
        body["price"] = json!("cheap");
        let err = Deal::from_submission(1, body, Utc::now()).unwrap_err();
        assert!(matches!(err, DealError::Validation(ref msg) if msg == "Invalid deal"));
    }

    #[test]
    fn test_extra_fields_survive() {
        let mut body = submission();
        body["featured"] = json!(true);
        let deal = Deal::from_submission(1, body, Utc::now()).unwrap();
        assert_eq!(deal.extra.get("featured"), Some(&json!(true)));

        let encoded = serde_json::to_value(&deal).unwrap();
        assert_eq!(encoded["featured"], json!(true));
    }

    #[test]
    fn test_merged_keeps_id_and_untouched_fields() {
        let deal = Deal::from_submission(3, submission(), Utc::now()).unwrap();
        let updated = deal
            .merged(&json!({ "id": 42, "price": 12000.5, "stops": 1, "departure_date": "" }))
            .unwrap();

        assert_eq!(updated.id, 3);
        assert_eq!(updated.price_amount(), 12000.5);
        assert_eq!(updated.stops, 1);
        assert_eq!(updated.departure_date.as_deref(), Some(""));
        assert_eq!(updated.discount_percent, 50);
        assert_eq!(updated.destination_city, "Dubai");
        assert_eq!(updated.created_at, deal.created_at);
    }

    #[test]
    fn test_merged_rejects_bad_types() {
        let deal = Deal::from_submission(3, submission(), Utc::now()).unwrap();
        let err = deal.merged(&json!({ "price": "free" })).unwrap_err();
        assert_eq!(err.to_string(), "Invalid deal field");
        assert_eq!(deal.merged(&json!("not an object")).unwrap(), deal);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some(&Value::Null)));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(!is_truthy(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(false))));
        assert!(is_truthy(Some(&json!(0.5))));
        assert!(is_truthy(Some(&json!("x"))));
        assert!(is_truthy(Some(&json!([]))));
    }
}
