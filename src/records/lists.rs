use serde::{Deserialize, Serialize};

use super::nullable;

macro_rules! coded_area {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct $name {
            #[serde(deserialize_with = "nullable")]
            pub href: String,
            #[serde(deserialize_with = "nullable")]
            pub kode: String,
            #[serde(deserialize_with = "nullable")]
            pub navn: String,
        }
    };
}

coded_area!(
    /// A municipality. `kode` is four digits.
    Kommune
);
coded_area!(Region);
coded_area!(
    /// A parish.
    Sogn
);
coded_area!(
    /// A court district.
    Retskreds
);
coded_area!(
    /// A police district.
    Politikreds
);
coded_area!(
    /// A nomination district.
    Opstillingskreds
);

/// A regional electoral area, identified by letter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Valglandsdel {
    pub href: String,
    pub bogstav: String,
    pub navn: String,
}

/// A cadastral district.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ejerlav {
    #[serde(deserialize_with = "nullable")]
    pub href: String,
    /// Up to seven digits, e.g. `170354`.
    #[serde(deserialize_with = "nullable")]
    pub kode: i64,
    #[serde(deserialize_with = "nullable")]
    pub navn: String,
}
