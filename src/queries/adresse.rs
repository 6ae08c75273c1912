use crate::{Adresse, Query};

/// Search for addresses under `/adresser`.
#[derive(Debug, Clone)]
pub struct AdresseQuery {
    query: Query,
}

impl Default for AdresseQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl AdresseQuery {
    pub fn new() -> Self {
        Self {
            query: Query::new("/adresser"),
        }
    }

    /// Search-as-you-type variant under `/adresser/autocomplete`.
    pub fn autocomplete() -> Self {
        Self {
            query: Query::new("/adresser/autocomplete"),
        }
    }

    query_accessors!();

    single_setters! {
        /// Free-text search in road name, house number, floor, door,
        /// supplementary town name and postal code. Every word must match;
        /// `*` is allowed at the end of a word.
        q => "q";
        /// The 19 character key of municipality, road, house number, floor
        /// and door.
        kvhx => "kvhx";
        /// Spatial reference of `polygon` and `cirkel`. Defaults to WGS84.
        srid => "srid";
        /// Polygon as a JSON array of coordinate rings, e.g.
        /// `[[[10.3,55.3],[10.4,55.3],[10.4,55.31],[10.3,55.3]]]`.
        polygon => "polygon";
        /// `x,y,r` with the radius in metres.
        cirkel => "cirkel";
    }

    multi_setters! {
        id => "id";
        adgangsadresseid => "adgangsadresseid";
        etage => "etage", empty true;
        doer => "dør", empty true;
        vejkode => "vejkode";
        vejnavn => "vejnavn", empty true;
        husnr => "husnr";
        supplerendebynavn => "supplerendebynavn", empty true;
        postnr => "postnr";
        kommunekode => "kommunekode";
        ejerlavkode => "ejerlavkode";
        /// 1 urban zone, 2 rural zone, 3 summer house area.
        zonekode => "zonekode";
        matrikelnr => "matrikelnr";
        esrejendomsnr => "esrejendomsnr";
        regionskode => "regionskode", empty true;
        sognekode => "sognekode", empty true;
        opstillingskredskode => "opstillingskredskode", empty true;
        retskredskode => "retskredskode", empty true;
        politikredskode => "politikredskode", empty true;
    }

    /// 1 final, 3 provisional.
    pub fn status(mut self, status: i32) -> Self {
        self.query
            .add(crate::param::TextParam::single("status", status.to_string()));
        self
    }

    /// Page number, starting at 1. Only has effect together with `per_side`.
    pub fn side(mut self, page: u32) -> Self {
        self.query
            .add(crate::param::TextParam::single("side", page.to_string()).allow_empty(true));
        self
    }

    pub fn per_side(mut self, per_page: u32) -> Self {
        self.query.add(
            crate::param::TextParam::single("per_side", per_page.to_string()).allow_empty(true),
        );
        self
    }

    record_requests!(Adresse);
}
