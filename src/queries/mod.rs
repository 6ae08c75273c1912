//! Fluent query builders, one per resource.
//!
//! Setters take and return the builder by value so calls can be chained.
//! Multi-valued setters accept any iterable of strings; calling one twice
//! adds to the values already given. Calling a single-valued setter twice
//! keeps the first value and records a warning on the query.

/// Setters that send every value pipe-separated. `empty` allows the
/// parameter to be sent without a value, which the service reads as
/// "field is empty".
macro_rules! multi_setters {
    ($($(#[$meta:meta])* $method:ident => $key:literal $(, empty $empty:literal)?;)*) => {
        $(
            $(#[$meta])*
            pub fn $method<I, S>(mut self, values: I) -> Self
            where
                I: IntoIterator<Item = S>,
                S: Into<String>,
            {
                let param = $crate::param::TextParam::multi($key, values);
                $(let param = param.allow_empty($empty);)?
                self.query.add(param);
                self
            }
        )*
    };
}

/// Setters that keep a single value.
macro_rules! single_setters {
    ($($(#[$meta:meta])* $method:ident => $key:literal $(, empty $empty:literal)?;)*) => {
        $(
            $(#[$meta])*
            pub fn $method(mut self, value: impl Into<String>) -> Self {
                let param = $crate::param::TextParam::single($key, value);
                $(let param = param.allow_empty($empty);)?
                self.query.add(param);
                self
            }
        )*
    };
}

/// Accessors shared by every builder wrapping a [`Query`](crate::Query).
macro_rules! query_accessors {
    () => {
        /// Sends the request to another host, e.g. a test server.
        pub fn with_host(mut self, host: impl Into<String>) -> Self {
            self.query.with_host(host);
            self
        }

        /// Adds a parameter the builder has no setter for.
        pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
            self.query.add_raw(key, value);
            self
        }

        /// Asks for responses without extra whitespace. Always added when
        /// the query is executed.
        pub fn noformat(mut self) -> Self {
            self.query.no_format();
            self
        }

        pub fn url(&self) -> String {
            self.query.url()
        }

        pub fn warnings(&self) -> &[$crate::param::ParamError] {
            self.query.warnings()
        }

        pub fn as_query(&self) -> &$crate::Query {
            &self.query
        }
    };
}

/// Network methods for builders whose results are arrays of `$record`.
macro_rules! record_requests {
    ($record:ty) => {
        /// Runs the query and streams the results.
        #[cfg(feature = "http")]
        pub async fn iter(
            &self,
            http: &$crate::HttpConnector,
        ) -> Result<$crate::RecordStream<$record>, $crate::DawaError> {
            self.query.records(http).await
        }

        /// Runs the query and collects every result.
        #[cfg(feature = "http")]
        pub async fn all(
            &self,
            http: &$crate::HttpConnector,
        ) -> Result<Vec<$record>, $crate::DawaError> {
            self.query.all(http).await
        }

        /// The first result, or `None` when nothing matched. The full query
        /// is still executed, so keep it to small result sets.
        #[cfg(feature = "http")]
        pub async fn first(
            &self,
            http: &$crate::HttpConnector,
        ) -> Result<Option<$record>, $crate::DawaError> {
            self.query.first(http).await
        }
    };
}

/// Requests the results as a GeoJSON feature collection.
macro_rules! geojson_request {
    () => {
        #[cfg(feature = "http")]
        pub async fn geojson(
            &self,
            http: &$crate::HttpConnector,
        ) -> Result<$crate::FeatureCollection, $crate::DawaError> {
            self.query.geojson(http).await
        }
    };
}

mod adgangsadresse;
mod adresse;
mod bynavn;
mod list;
mod postnummer;
mod vejstykke;

pub use adgangsadresse::*;
pub use adresse::*;
pub use bynavn::*;
pub use list::*;
pub use postnummer::*;
pub use vejstykke::*;
