use crate::param::TextParam;
use crate::{Adgangsadresse, Query};

/// Search for access addresses under `/adgangsadresser`.
#[derive(Debug, Clone)]
pub struct AdgangsadresseQuery {
    query: Query,
}

impl Default for AdgangsadresseQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl AdgangsadresseQuery {
    pub fn new() -> Self {
        Self {
            query: Query::new("/adgangsadresser"),
        }
    }

    pub fn autocomplete() -> Self {
        Self {
            query: Query::new("/adgangsadresser/autocomplete"),
        }
    }

    query_accessors!();

    single_setters! {
        /// Free-text search. Every word must match; `*` is allowed at the
        /// end of a word.
        q => "q";
        /// The 12 character key of municipality, road and house number.
        kvh => "kvh";
        srid => "srid";
        polygon => "polygon";
        cirkel => "cirkel";
    }

    multi_setters! {
        id => "id";
        vejkode => "vejkode";
        vejnavn => "vejnavn", empty true;
        husnr => "husnr";
        supplerendebynavn => "supplerendebynavn", empty true;
        postnr => "postnr";
        kommunekode => "kommunekode";
        ejerlavkode => "ejerlavkode";
        zonekode => "zonekode";
        matrikelnr => "matrikelnr";
        esrejendomsnr => "esrejendomsnr";
        regionskode => "regionskode", empty true;
        sognekode => "sognekode", empty true;
        opstillingskredskode => "opstillingskredskode", empty true;
        retskredskode => "retskredskode", empty true;
        politikredskode => "politikredskode", empty true;
    }

    pub fn status(mut self, status: i32) -> Self {
        self.query.add(TextParam::single("status", status.to_string()));
        self
    }

    pub fn side(mut self, page: u32) -> Self {
        self.query
            .add(TextParam::single("side", page.to_string()).allow_empty(true));
        self
    }

    pub fn per_side(mut self, per_page: u32) -> Self {
        self.query
            .add(TextParam::single("per_side", per_page.to_string()).allow_empty(true));
        self
    }

    record_requests!(Adgangsadresse);
    geojson_request!();

    /// Looks up one access address by id.
    #[cfg(feature = "http")]
    pub async fn get_by_id(
        http: &crate::HttpConnector,
        id: &str,
    ) -> Result<Option<Adgangsadresse>, crate::DawaError> {
        Self::new().id([id]).first(http).await
    }
}
