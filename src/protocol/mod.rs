//! Progress stream protocol
//!
//! The stream endpoint answers with newline-delimited `data: <json>` lines.
//! [`LineDecoder`] reassembles lines from arbitrary chunks, [`parse_frame`]
//! turns one line into a [`ProgressEvent`], and [`progress_events`] chains the
//! two over a response body.

pub mod decoder;
pub mod frame;
pub mod stream;

pub use decoder::LineDecoder;
pub use frame::{parse_frame, ProgressEvent};
pub use stream::progress_events;
