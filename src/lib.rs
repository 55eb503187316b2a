//! # trackingmore - client for the TrackingMore package-tracking API
//!
//! A blocking Rust client for the TrackingMore v2 REST API. It registers
//! shipments for tracking, queries and updates them, detects couriers from a
//! tracking number and deletes records.
//!
//! ## Features
//!
//! - Per-context API key; no process-wide state
//! - Typed request payloads that omit unset optional fields
//! - Envelope checking: the service reports failures with HTTP 200 and a
//!   `meta.code`, which surfaces here as [`TrackingError::Api`]
//! - Typed results, plus raw access through [`Response`]
//!
//! ## Basic Usage
//!
//! ```no_run
//! use trackingmore::{TrackingContext, TrackingData};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = TrackingContext::new()?.with_api_key("your-api-key")?;
//!
//!     let data = TrackingData::builder("dhl", "1234567890")
//!         .title("Laptop")
//!         .build()?;
//!     let item = ctx.create_tracking_item(&data)?;
//!     println!("tracking {} created ({:?})", item.tracking_number, item.status);
//!
//!     for carrier in ctx.detect_carrier("1234567890")? {
//!         println!("candidate: {} ({})", carrier.name, carrier.code);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! ```no_run
//! use trackingmore::{TrackingContext, TrackingError};
//!
//! let ctx = TrackingContext::new()?;
//! match ctx.get_tracking_item("dhl", "1234567890") {
//!     Err(TrackingError::Configuration) => eprintln!("set an API key first"),
//!     Err(TrackingError::Api { code, message, .. }) => eprintln!("{}: {}", code, message),
//!     Err(e) => eprintln!("transport failure: {}", e),
//!     Ok(item) => println!("{:?}", item.tracking_status()),
//! }
//! # Ok::<(), trackingmore::TrackingError>(())
//! ```

pub mod apikey;
pub mod carriers;
pub mod client;
pub mod error;
pub mod response;
pub mod rest;
pub mod time;
pub mod tracking;
pub mod trackings;

// Re-export main types for convenience
pub use apikey::ApiKey;
pub use carriers::{courier_code, couriers_for, Carrier, COURIERS};
pub use client::Config;
pub use error::{Result, TrackingError};
pub use response::{check_response, Meta, Response};
pub use rest::TrackingContext;
pub use time::Time;
pub use tracking::{
    BatchError, BatchResult, ListOptions, TrackingData, TrackingDataBuilder, TrackingItem,
    TrackingList, TrackingStatus,
};

// Re-export serde_json for convenience
pub use serde_json::json;
