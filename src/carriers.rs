//! Courier detection and the built-in courier registry.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TrackingError};
use crate::rest::TrackingContext;

/// Courier codes by country: `(country, [(display name, code)])`.
pub const COURIERS: &[(&str, &[(&str, &str)])] = &[(
    "Italy",
    &[
        ("Poste Italiane", "poste-italiane"),
        ("Nexive", "nexive"),
        ("GLS Italia", "gls-italy"),
        ("Bartolini", "bartolini"),
        ("TNT Italia", "tnt-it"),
        ("SGT Italia", "sgt-it"),
        ("SDA Italia", "italy-sda"),
    ],
)];

/// Countries present in the registry
pub fn countries() -> impl Iterator<Item = &'static str> {
    COURIERS.iter().map(|(country, _)| *country)
}

/// Couriers registered for `country`
pub fn couriers_for(country: &str) -> Option<&'static [(&'static str, &'static str)]> {
    COURIERS
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, couriers)| *couriers)
}

/// Courier code for a display name within a country
pub fn courier_code(country: &str, name: &str) -> Option<&'static str> {
    couriers_for(country)?
        .iter()
        .find(|(display, _)| *display == name)
        .map(|(_, code)| *code)
}

/// A candidate courier returned by detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Carrier {
    pub name: String,
    pub code: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize)]
struct DetectRequest<'a> {
    tracking_number: &'a str,
}

impl TrackingContext {
    /// Guess the courier from a tracking number.
    ///
    /// Candidates come back in the service's own ranking order.
    pub fn detect_carrier(&self, tracking_number: &str) -> Result<Vec<Carrier>> {
        self.require_configured()?;
        let tracking_number = tracking_number.trim();
        if tracking_number.is_empty() {
            return Err(TrackingError::InvalidArgument(
                "tracking_number is required".to_string(),
            ));
        }
        let body = DetectRequest { tracking_number };
        self.apply(Method::POST, "/carriers/detect", Some(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courier_lookup() {
        assert_eq!(courier_code("Italy", "GLS Italia"), Some("gls-italy"));
        assert_eq!(courier_code("Italy", "DHL"), None);
        assert_eq!(courier_code("France", "GLS Italia"), None);
        assert_eq!(couriers_for("Italy").map(|c| c.len()), Some(7));
        assert_eq!(countries().collect::<Vec<_>>(), vec!["Italy"]);
    }

    #[test]
    fn test_detect_requires_api_key() {
        let ctx = TrackingContext::new().unwrap();
        assert!(ctx.detect_carrier("1234567890").unwrap_err().is_configuration());
    }

    #[test]
    fn test_detect_rejects_blank_number() {
        let ctx = TrackingContext::new().unwrap().with_api_key("key").unwrap();
        let err = ctx.detect_carrier("   ").unwrap_err();
        assert!(matches!(err, TrackingError::InvalidArgument(_)));
    }

    #[test]
    fn test_carrier_deserialization() {
        let carriers: Vec<Carrier> =
            serde_json::from_str(r#"[{"name": "DHL", "code": "dhl"}]"#).unwrap();
        assert_eq!(carriers[0].code, "dhl");
        assert!(carriers[0].extra.is_empty());
    }
}
