use crate::{Query, SupplerendeBynavn};

/// Search for supplementary town names under `/supplerendebynavne`.
#[derive(Debug, Clone)]
pub struct SupplerendeBynavnQuery {
    query: Query,
}

impl Default for SupplerendeBynavnQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SupplerendeBynavnQuery {
    pub fn new() -> Self {
        Self {
            query: Query::new("/supplerendebynavne"),
        }
    }

    query_accessors!();

    single_setters! {
        q => "q";
    }

    multi_setters! {
        navn => "navn";
        kommunekode => "kommunekode";
        postnr => "postnr";
    }

    record_requests!(SupplerendeBynavn);
}
