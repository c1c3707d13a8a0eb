//! Types and traits for recording evaluation progress.
//!
//! The evaluation loop emits one [`Record`] per environment step and a summary
//! record at the end of an episode. Records are passed to a [`Recorder`], which
//! decides where they go.
//!
//! ```rust
//! use rrc_core::record::{Record, RecordValue};
//!
//! let mut record = Record::empty();
//! record.insert("time_index", RecordValue::Scalar(10.0));
//! record.insert("goal", RecordValue::Array1(vec![0.0, 0.0, 0.0325]));
//! assert_eq!(record.get_scalar("time_index").unwrap(), 10.0);
//! ```
mod base;
mod buffered_recorder;
mod log_recorder;
mod null_recorder;
mod recorder;

pub use base::{Record, RecordValue};
pub use buffered_recorder::BufferedRecorder;
pub use log_recorder::LogRecorder;
pub use null_recorder::NullRecorder;
pub use recorder::Recorder;
