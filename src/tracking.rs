//! Request payloads and response models for tracking records.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TrackingError};
use crate::time::Time;

/// Delivery state of a tracked shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackingStatus {
    Pending,
    NotFound,
    Transit,
    Pickup,
    Delivered,
    Undelivered,
    Exception,
    Expired,
}

impl TrackingStatus {
    pub const ALL: [TrackingStatus; 8] = [
        TrackingStatus::Pending,
        TrackingStatus::NotFound,
        TrackingStatus::Transit,
        TrackingStatus::Pickup,
        TrackingStatus::Delivered,
        TrackingStatus::Undelivered,
        TrackingStatus::Exception,
        TrackingStatus::Expired,
    ];

    /// Symbolic name sent in request filters
    pub fn name(&self) -> &'static str {
        match self {
            TrackingStatus::Pending => "PENDING",
            TrackingStatus::NotFound => "NOTFOUND",
            TrackingStatus::Transit => "TRANSIT",
            TrackingStatus::Pickup => "PICKUP",
            TrackingStatus::Delivered => "DELIVERED",
            TrackingStatus::Undelivered => "UNDELIVERED",
            TrackingStatus::Exception => "EXCEPTION",
            TrackingStatus::Expired => "EXPIRED",
        }
    }

    /// Lowercase value the service reports on tracking records
    pub fn value(&self) -> &'static str {
        match self {
            TrackingStatus::Pending => "pending",
            TrackingStatus::NotFound => "notfound",
            TrackingStatus::Transit => "transit",
            TrackingStatus::Pickup => "pickup",
            TrackingStatus::Delivered => "delivered",
            TrackingStatus::Undelivered => "undelivered",
            TrackingStatus::Exception => "exception",
            TrackingStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for TrackingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackingStatus {
    type Err = TrackingError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        TrackingStatus::ALL
            .into_iter()
            .find(|status| status.value().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                TrackingError::InvalidArgument(format!("unknown tracking status: {}", s))
            })
    }
}

impl Serialize for TrackingStatus {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

/// Payload identifying one shipment, plus optional descriptive fields.
///
/// Optional fields left unset, or set to an empty string, are omitted from
/// the JSON body entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingData {
    pub carrier_code: String,
    pub tracking_number: String,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub order_id: Option<String>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub lang: Option<String>,
}

impl TrackingData {
    /// Tracking data with only the required fields
    pub fn new(carrier_code: &str, tracking_number: &str) -> Result<Self> {
        Self::builder(carrier_code, tracking_number).build()
    }

    pub fn builder(carrier_code: &str, tracking_number: &str) -> TrackingDataBuilder {
        TrackingDataBuilder {
            carrier_code: carrier_code.to_string(),
            tracking_number: tracking_number.to_string(),
            title: None,
            customer_name: None,
            customer_email: None,
            order_id: None,
            lang: None,
        }
    }

    /// Check the required fields of a value that may not have come from the builder
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("carrier_code", &self.carrier_code),
            ("tracking_number", &self.tracking_number),
        ] {
            if value.trim().is_empty() {
                return Err(TrackingError::InvalidArgument(format!("{} is required", field)));
            }
        }
        Ok(())
    }

    /// Body for an update: every supplied field except the two identifying ones,
    /// which travel in the URL path instead.
    pub fn update_body(&self) -> Result<Map<String, Value>> {
        let mut body = match serde_json::to_value(self)? {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        body.remove("carrier_code");
        body.remove("tracking_number");
        Ok(body)
    }
}

/// Builder for [`TrackingData`].
#[derive(Debug, Clone)]
pub struct TrackingDataBuilder {
    carrier_code: String,
    tracking_number: String,
    title: Option<String>,
    customer_name: Option<String>,
    customer_email: Option<String>,
    order_id: Option<String>,
    lang: Option<String>,
}

impl TrackingDataBuilder {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn customer_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = Some(name.into());
        self
    }

    pub fn customer_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Language of the tracking events, e.g. "en"
    pub fn lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Validate the required fields and drop empty optional ones
    pub fn build(self) -> Result<TrackingData> {
        Ok(TrackingData {
            carrier_code: required("carrier_code", self.carrier_code)?,
            tracking_number: required("tracking_number", self.tracking_number)?,
            title: non_empty(self.title),
            customer_name: non_empty(self.customer_name),
            customer_email: non_empty(self.customer_email),
            order_id: non_empty(self.order_id),
            lang: non_empty(self.lang),
        })
    }
}

fn required(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TrackingError::InvalidArgument(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn is_absent(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}

/// Filters for listing trackings. Unset filters are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TrackingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_min: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at_max: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time_min: Option<Time>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time_max: Option<Time>,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: TrackingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn created_between(mut self, min: impl Into<Time>, max: impl Into<Time>) -> Self {
        self.created_at_min = Some(min.into());
        self.created_at_max = Some(max.into());
        self
    }

    pub fn created_after(mut self, min: impl Into<Time>) -> Self {
        self.created_at_min = Some(min.into());
        self
    }

    pub fn updated_between(mut self, min: impl Into<Time>, max: impl Into<Time>) -> Self {
        self.update_time_min = Some(min.into());
        self.update_time_max = Some(max.into());
        self
    }

    pub fn updated_after(mut self, min: impl Into<Time>) -> Self {
        self.update_time_min = Some(min.into());
        self
    }
}

/// A tracking record as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub tracking_number: String,
    pub carrier_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    /// Every other field the service sent (events, origin info, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TrackingItem {
    /// Parsed status, `None` if absent or not one of the known states
    pub fn tracking_status(&self) -> Option<TrackingStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Outcome of a batch create: rejected entries land in `errors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub submitted: u32,
    pub added: u32,
    #[serde(default)]
    pub trackings: Vec<TrackingItem>,
    #[serde(default)]
    pub errors: Vec<BatchError>,
}

/// A batch entry the service refused, e.g. a duplicate tracking number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carrier_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One page of trackings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default)]
    pub items: Vec<TrackingItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_tracking_data_required_only() {
        let td = TrackingData::new("dhl", "1234567890").unwrap();
        assert_eq!(
            serde_json::to_value(&td).unwrap(),
            json!({"carrier_code": "dhl", "tracking_number": "1234567890"})
        );
    }

    #[test]
    fn test_tracking_data_one_extra_field() {
        let td = TrackingData::builder("dhl", "1234567890")
            .customer_email("jane@example.com")
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&td).unwrap(),
            json!({
                "carrier_code": "dhl",
                "tracking_number": "1234567890",
                "customer_email": "jane@example.com",
            })
        );
    }

    #[test]
    fn test_tracking_data_all_fields() {
        let td = TrackingData::builder("gls-italy", "AB123")
            .title("Laptop")
            .customer_name("Jane")
            .customer_email("jane@example.com")
            .order_id("#42")
            .lang("en")
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(&td).unwrap(),
            json!({
                "carrier_code": "gls-italy",
                "tracking_number": "AB123",
                "title": "Laptop",
                "customer_name": "Jane",
                "customer_email": "jane@example.com",
                "order_id": "#42",
                "lang": "en",
            })
        );
    }

    #[test]
    fn test_tracking_data_empty_optional_is_omitted() {
        let td = TrackingData::builder("dhl", "1234567890").title("").build().unwrap();
        assert_eq!(td.title, None);
        assert!(serde_json::to_value(&td).unwrap().get("title").is_none());
    }

    #[test]
    fn test_tracking_data_requires_identifiers() {
        assert!(matches!(
            TrackingData::new("", "1234567890"),
            Err(TrackingError::InvalidArgument(_))
        ));
        assert!(matches!(
            TrackingData::new("dhl", "   "),
            Err(TrackingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_update_body_strips_identifiers() {
        let td = TrackingData::builder("dhl", "1234567890")
            .title("Renamed")
            .build()
            .unwrap();
        let body = td.update_body().unwrap();
        assert_eq!(Value::Object(body), json!({"title": "Renamed"}));
    }

    #[test]
    fn test_update_body_required_only_is_empty() {
        let td = TrackingData::new("dhl", "1234567890").unwrap();
        assert_eq!(Value::Object(td.update_body().unwrap()), json!({}));
    }

    #[test]
    fn test_struct_literal_never_sends_empty_optionals() {
        let td = TrackingData {
            carrier_code: "dhl".to_string(),
            tracking_number: "1234567890".to_string(),
            title: Some(String::new()),
            customer_name: None,
            customer_email: Some(String::new()),
            order_id: Some("#42".to_string()),
            lang: None,
        };

        assert!(td.validate().is_ok());
        assert_eq!(
            serde_json::to_value(&td).unwrap(),
            json!({"carrier_code": "dhl", "tracking_number": "1234567890", "order_id": "#42"})
        );
        assert_eq!(Value::Object(td.update_body().unwrap()), json!({"order_id": "#42"}));
    }

    #[test]
    fn test_validate_rejects_blank_identifiers() {
        let mut td = TrackingData::new("dhl", "1234567890").unwrap();
        td.carrier_code = String::new();
        assert!(matches!(td.validate(), Err(TrackingError::InvalidArgument(_))));

        let td: TrackingData =
            serde_json::from_value(json!({"carrier_code": "dhl", "tracking_number": " "})).unwrap();
        assert!(td.validate().is_err());
    }

    #[test]
    fn test_status_names() {
        assert_eq!(serde_json::to_value(TrackingStatus::NotFound).unwrap(), json!("NOTFOUND"));
        assert_eq!("delivered".parse::<TrackingStatus>().unwrap(), TrackingStatus::Delivered);
        assert_eq!("TRANSIT".parse::<TrackingStatus>().unwrap(), TrackingStatus::Transit);
        assert!("lost".parse::<TrackingStatus>().is_err());
    }

    #[test]
    fn test_list_options_serialization() {
        let created = NaiveDate::from_ymd_opt(2020, 8, 12)
            .unwrap()
            .and_hms_opt(14, 28, 11)
            .unwrap();
        let options = ListOptions::new()
            .status(TrackingStatus::Delivered)
            .page(2)
            .created_after(created);

        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            json!({"status": "DELIVERED", "page": 2, "created_at_min": 1597242491})
        );
        assert_eq!(serde_json::to_value(ListOptions::new()).unwrap(), json!({}));
    }

    #[test]
    fn test_tracking_item_keeps_extra_fields() {
        let item: TrackingItem = serde_json::from_value(json!({
            "id": "a1b2",
            "tracking_number": "1234567890",
            "carrier_code": "dhl",
            "status": "transit",
            "created_at": "2018-09-03T06:35:07+08:00",
            "origin_info": {"trackinfo": []}
        }))
        .unwrap();

        assert_eq!(item.tracking_status(), Some(TrackingStatus::Transit));
        assert!(item.extra.contains_key("origin_info"));
        assert_eq!(item.title, None);
    }

    #[test]
    fn test_batch_result() {
        let result: BatchResult = serde_json::from_value(json!({
            "submitted": 2,
            "added": 1,
            "trackings": [{"tracking_number": "1", "carrier_code": "dhl"}],
            "errors": [
                {"tracking_number": "2", "code": 4016, "message": "Tracking already exists."}
            ]
        }))
        .unwrap();

        assert_eq!(result.trackings.len(), 1);
        assert_eq!(result.errors[0].code, Some(4016));
    }
}
