//! Adapters that implement [`TelemetrySource`] for the vehicle data service.
//!
//! The service speaks plain HTTP GET with query-string commands and answers
//! with a small XML document per request:
//!
//! ```text
//! <response>
//!   <carinfo>
//!     <car><userid>usSF-413</userid><vid>...</vid></car>
//!     <data>
//!       <createtime>2013-11-01T12:23:58</createtime>
//!       <MapMatching><lat>34.65</lat><lon>135.16</lon></MapMatching>
//!       <Spd>0.00</Spd>
//!       ...
//!     </data>
//!   </carinfo>
//! </response>
//! ```
//!
//! - [`decode_response`] turns such a document into typed records
//! - [`ServiceEndpoint`] builds the command URLs
//! - [`HttpSource`] talks to a live service
//! - [`SampleSource`] replays a canned document for offline runs
//!
//! [`TelemetrySource`]: drivecue_telemetry::TelemetrySource

#![deny(static_mut_refs)]
#![deny(unused_must_use)]

pub mod decode;
pub mod http;
pub mod request;
pub mod sample;

pub use decode::{CREATETIME_FORMAT, decode_response, parse_createtime};
pub use http::{HttpSource, HttpSourceConfig};
pub use request::{Service, ServiceEndpoint};
pub use sample::{COMMAND_LOG_CAPACITY, SAMPLE_DOCUMENT, SampleSource};
