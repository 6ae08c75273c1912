use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use crate::param::TextParam;
use crate::records::{
    Ejerlav, Kommune, Opstillingskreds, Politikreds, Region, Retskreds, Sogn, Valglandsdel,
};
use crate::Query;

/// The administrative divisions served as plain lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Regioner,
    Kommuner,
    Sogne,
    Retskredse,
    Politikredse,
    Opstillingskredse,
    Valglandsdele,
    Ejerlav,
}

impl ListKind {
    pub const ALL: [ListKind; 8] = [
        ListKind::Regioner,
        ListKind::Kommuner,
        ListKind::Sogne,
        ListKind::Retskredse,
        ListKind::Politikredse,
        ListKind::Opstillingskredse,
        ListKind::Valglandsdele,
        ListKind::Ejerlav,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ListKind::Regioner => "regioner",
            ListKind::Kommuner => "kommuner",
            ListKind::Sogne => "sogne",
            ListKind::Retskredse => "retskredse",
            ListKind::Politikredse => "politikredse",
            ListKind::Opstillingskredse => "opstillingskredse",
            ListKind::Valglandsdele => "valglandsdele",
            ListKind::Ejerlav => "ejerlav",
        }
    }

    pub fn path(&self) -> String {
        format!("/{}", self.as_str())
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown list type '{0}'")]
pub struct UnknownListKind(pub String);

impl FromStr for ListKind {
    type Err = UnknownListKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ListKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownListKind(s.to_string()))
    }
}

/// A record type served by one of the list endpoints.
pub trait ListResource: DeserializeOwned + Serialize + Send + 'static {
    const KIND: ListKind;
}

macro_rules! list_resource {
    ($($record:ty => $kind:ident),* $(,)?) => {
        $(impl ListResource for $record {
            const KIND: ListKind = ListKind::$kind;
        })*
    };
}

list_resource! {
    Region => Regioner,
    Kommune => Kommuner,
    Sogn => Sogne,
    Retskreds => Retskredse,
    Politikreds => Politikredse,
    Opstillingskreds => Opstillingskredse,
    Valglandsdel => Valglandsdele,
    Ejerlav => Ejerlav,
}

/// Search one of the list endpoints. The record type picks the endpoint:
/// `ListQuery::<Region>::new(false)` queries `/regioner`.
#[derive(Debug, Clone)]
pub struct ListQuery<T> {
    query: Query,
    _record: PhantomData<fn() -> T>,
}

impl<T: ListResource> ListQuery<T> {
    pub fn new(autocomplete: bool) -> Self {
        let mut path = T::KIND.path();
        if autocomplete {
            path.push_str("/autocomplete");
        }
        Self {
            query: Query::new(path),
            _record: PhantomData,
        }
    }

    pub fn kind(&self) -> ListKind {
        T::KIND
    }

    query_accessors!();

    multi_setters! {
        /// Free-text search in code and name.
        q => "q";
        kode => "kode";
        navn => "navn";
    }

    record_requests!(T);
    geojson_request!();
}

/// Finds the item of kind `T` covering a point, via `/<kind>/reverse`.
#[derive(Debug, Clone)]
pub struct ReverseQuery<T> {
    query: Query,
    _record: PhantomData<fn() -> T>,
}

impl<T: ListResource> ReverseQuery<T> {
    /// `x` is easting or longitude and `y` northing or latitude, depending
    /// on `srid`. Without `srid` the service assumes WGS84.
    pub fn new(x: f64, y: f64, srid: Option<&str>) -> Self {
        let mut query = Query::new(format!("{}/reverse", T::KIND.path()));
        query.add(TextParam::single("x", x.to_string()));
        query.add(TextParam::single("y", y.to_string()));
        if let Some(srid) = srid.filter(|s| !s.is_empty()) {
            query.add(TextParam::single("srid", srid));
        }
        Self {
            query,
            _record: PhantomData,
        }
    }

    query_accessors!();

    /// Fetches the single matching item.
    #[cfg(feature = "http")]
    pub async fn fetch(&self, http: &crate::HttpConnector) -> Result<T, crate::DawaError> {
        self.query.single(http).await
    }
}
