use crate::param::TextParam;
use crate::{Postnummer, Query};

/// Search for postal codes under `/postnumre`.
#[derive(Debug, Clone)]
pub struct PostnummerQuery {
    query: Query,
}

impl Default for PostnummerQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl PostnummerQuery {
    pub fn new() -> Self {
        Self {
            query: Query::new("/postnumre"),
        }
    }

    pub fn autocomplete() -> Self {
        Self {
            query: Query::new("/postnumre/autocomplete"),
        }
    }

    query_accessors!();

    multi_setters! {
        nr => "nr";
        navn => "navn";
        /// Postal codes overlapping the given municipalities.
        kommunekode => "kommunekode";
    }

    single_setters! {
        /// Free-text search in number and name.
        q => "q", empty true;
    }

    /// Include or exclude postal codes of bulk recipients.
    pub fn stormodtagere(mut self, include: bool) -> Self {
        self.query
            .add(TextParam::single("stormodtagere", include.to_string()));
        self
    }

    record_requests!(Postnummer);
    geojson_request!();

    /// Looks up one postal code by number.
    #[cfg(feature = "http")]
    pub async fn get_postnr(
        http: &crate::HttpConnector,
        nr: &str,
    ) -> Result<Option<Postnummer>, crate::DawaError> {
        Self::new().nr([nr]).first(http).await
    }
}
