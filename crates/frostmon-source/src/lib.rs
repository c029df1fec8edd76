//! Sample acquisition from the time-series store.
//!
//! A [`SampleSource`] returns the most recent scalar reading for a tagged
//! series. The production implementation ([`influx::InfluxSampleSource`])
//! queries the InfluxDB 1.x HTTP API; the monitor engine only sees the
//! trait, so tests substitute an in-memory source.

pub mod error;
pub mod influx;


use async_trait::async_trait;
use error::SourceError;
use frostmon_common::types::Sample;

/// Read access to the latest reading of a named series.
#[async_trait]
pub trait SampleSource: Send + Sync {
    /// Returns the most recent sample recorded for `source_key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot be reached within the
    /// configured timeout, rejects the query, returns an unparseable
    /// response, or holds no data for the key.
    async fn latest(&self, source_key: &str) -> Result<Sample, SourceError>;
}
