use crate::{Query, Vejstykke};

/// Search for road segments under `/vejstykker`.
#[derive(Debug, Clone)]
pub struct VejstykkeQuery {
    query: Query,
}

impl Default for VejstykkeQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl VejstykkeQuery {
    pub fn new() -> Self {
        Self {
            query: Query::new("/vejstykker"),
        }
    }

    pub fn autocomplete() -> Self {
        Self {
            query: Query::new("/vejstykker/autocomplete"),
        }
    }

    query_accessors!();

    single_setters! {
        q => "q";
    }

    multi_setters! {
        kode => "kode";
        kommunekode => "kommunekode";
        navn => "navn";
        postnr => "postnr";
    }

    record_requests!(Vejstykke);
}
