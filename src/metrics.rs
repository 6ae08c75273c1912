//! Prometheus counters for imports and requests.
//!
//! With the `metrics` feature disabled the counters compile to no-ops.

#[cfg(feature = "metrics")]
mod registry {
    use lazy_static::lazy_static;
    use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

    lazy_static! {
        pub(super) static ref RECORDS_DECODED: IntCounter = register_int_counter!(
            "dawa_records_decoded_total",
            "Total number of records handed to consumers"
        )
        .expect("metric can be registered");
        pub(super) static ref DECODE_ERRORS: IntCounter = register_int_counter!(
            "dawa_decode_errors_total",
            "Total number of imports that ended with an error"
        )
        .expect("metric can be registered");
        pub(super) static ref REQUESTS: IntCounter = register_int_counter!(
            "dawa_requests_total",
            "Total number of HTTP requests sent"
        )
        .expect("metric can be registered");
    }

    /// Renders every registered metric in the text exposition format.
    pub fn gather_metrics() -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&prometheus::gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(feature = "metrics")]
pub use registry::gather_metrics;

pub(crate) fn inc_records() {
    #[cfg(feature = "metrics")]
    registry::RECORDS_DECODED.inc();
}

pub(crate) fn inc_errors() {
    #[cfg(feature = "metrics")]
    registry::DECODE_ERRORS.inc();
}

#[allow(dead_code)]
pub(crate) fn inc_requests() {
    #[cfg(feature = "metrics")]
    registry::REQUESTS.inc();
}
