
#[cfg(feature = "http")]
mod http_tests;
mod query_tests;
mod time_tests;
