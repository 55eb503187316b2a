//! Tracking record operations.
//!
//! Every method checks that an API key is installed, performs exactly one
//! HTTP round trip and returns the `data` section of the response. Nothing
//! is retried here.

use reqwest::Method;
use serde_json::Value;

use crate::error::{Result, TrackingError};
use crate::rest::TrackingContext;
use crate::tracking::{BatchResult, ListOptions, TrackingData, TrackingItem, TrackingList};

/// Characters that would end or restructure a path segment
const PATH_RESERVED: &[char] = &['/', '\\', '?', '#', '%'];

fn path_segment<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TrackingError::InvalidArgument(format!("{} is required", field)));
    }
    if value == "." || value == ".." || value.contains(PATH_RESERVED) {
        return Err(TrackingError::InvalidArgument(format!(
            "{} cannot be used in a URL path: {:?}",
            field, value
        )));
    }
    Ok(value)
}

/// Path of a single tracking record. Identifiers are trimmed, not escaped,
/// so anything that would change the addressed path is refused.
pub(crate) fn item_path(carrier_code: &str, tracking_number: &str) -> Result<String> {
    Ok(format!(
        "/trackings/{}/{}",
        path_segment("carrier_code", carrier_code)?,
        path_segment("tracking_number", tracking_number)?
    ))
}

impl TrackingContext {
    /// Register one shipment for tracking
    pub fn create_tracking_item(&self, data: &TrackingData) -> Result<TrackingItem> {
        self.require_configured()?;
        data.validate()?;
        self.apply(Method::POST, "/trackings/post", Some(data))
    }

    /// Register several shipments in one request.
    ///
    /// Entries the service refuses (e.g. duplicates) come back in
    /// `BatchResult::errors`; that is still a successful call.
    pub fn create_tracking_items_batch(&self, data: &[TrackingData]) -> Result<BatchResult> {
        self.require_configured()?;
        data.iter().try_for_each(TrackingData::validate)?;
        self.apply(Method::POST, "/trackings/batch", Some(data))
    }

    /// Fetch one tracking record
    pub fn get_tracking_item(
        &self,
        carrier_code: &str,
        tracking_number: &str,
    ) -> Result<TrackingItem> {
        self.require_configured()?;
        let path = item_path(carrier_code, tracking_number)?;
        self.apply(Method::GET, &path, None::<&()>)
    }

    /// Change the descriptive fields of a tracking record.
    ///
    /// `carrier_code` and `tracking_number` address the record and are not
    /// repeated in the body.
    pub fn update_tracking_item(&self, data: &TrackingData) -> Result<TrackingItem> {
        self.require_configured()?;
        let path = item_path(&data.carrier_code, &data.tracking_number)?;
        let body = data.update_body()?;
        self.apply(Method::PUT, &path, Some(&body))
    }

    /// Stop tracking a shipment. The service answers with an empty list.
    pub fn delete_tracking_item(
        &self,
        carrier_code: &str,
        tracking_number: &str,
    ) -> Result<Value> {
        self.require_configured()?;
        let path = item_path(carrier_code, tracking_number)?;
        Ok(self.do_request(Method::DELETE, &path, None::<&()>)?.into_data())
    }

    /// List tracked shipments matching `options`
    pub fn list_trackings(&self, options: &ListOptions) -> Result<TrackingList> {
        self.require_configured()?;
        self.apply_query("/trackings/get", options)
    }

    /// Fetch fresh results from the courier, bypassing cached data.
    ///
    /// The service rate-limits this endpoint more tightly than the others.
    pub fn realtime_tracking(&self, data: &TrackingData) -> Result<TrackingItem> {
        self.require_configured()?;
        data.validate()?;
        self.apply(Method::POST, "/trackings/realtime", Some(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path() {
        assert_eq!(
            item_path(" dhl ", "1234567890\n").unwrap(),
            "/trackings/dhl/1234567890"
        );
        assert_eq!(item_path("dhl", "AB.12").unwrap(), "/trackings/dhl/AB.12");
        assert!(item_path("dhl", "").is_err());
    }

    #[test]
    fn test_item_path_rejects_path_changing_identifiers() {
        let numbers = [
            "AB#12",
            "AB?x=1",
            "AB/../../trackings/dhl/AB",
            "..",
            ".",
            "AB%2F12",
            "A\\B",
        ];
        for number in numbers {
            let err = item_path("dhl", number).unwrap_err();
            assert!(
                matches!(err, TrackingError::InvalidArgument(_)),
                "{:?} was accepted",
                number
            );
        }
        assert!(item_path("dhl/x", "1234567890").is_err());
    }

    #[test]
    fn test_operations_require_api_key() {
        let ctx = TrackingContext::new().unwrap();
        let data = TrackingData::new("dhl", "1234567890").unwrap();

        assert!(ctx.create_tracking_item(&data).unwrap_err().is_configuration());
        assert!(ctx
            .create_tracking_items_batch(std::slice::from_ref(&data))
            .unwrap_err()
            .is_configuration());
        assert!(ctx
            .get_tracking_item("dhl", "1234567890")
            .unwrap_err()
            .is_configuration());
        assert!(ctx.update_tracking_item(&data).unwrap_err().is_configuration());
        assert!(ctx
            .delete_tracking_item("dhl", "1234567890")
            .unwrap_err()
            .is_configuration());
        assert!(ctx.list_trackings(&ListOptions::new()).unwrap_err().is_configuration());
        assert!(ctx.realtime_tracking(&data).unwrap_err().is_configuration());
    }

    #[test]
    fn test_configuration_is_checked_before_arguments() {
        let ctx = TrackingContext::new().unwrap();
        assert!(ctx.get_tracking_item("", "").unwrap_err().is_configuration());
    }

    #[test]
    fn test_struct_literal_with_blank_identifier_is_refused() {
        let ctx = TrackingContext::new().unwrap().with_api_key("key").unwrap();
        let mut data = TrackingData::new("dhl", "1234567890").unwrap();
        data.carrier_code = String::new();

        for err in [
            ctx.create_tracking_item(&data).unwrap_err(),
            ctx.realtime_tracking(&data).unwrap_err(),
            ctx.update_tracking_item(&data).unwrap_err(),
            ctx.create_tracking_items_batch(std::slice::from_ref(&data))
                .unwrap_err(),
        ] {
            assert!(matches!(err, TrackingError::InvalidArgument(_)), "{:?}", err);
        }
    }
}
