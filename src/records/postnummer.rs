use serde::{Deserialize, Serialize};

use super::{nullable, Kommune};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Postnummer {
    pub href: String,
    /// Four digits, e.g. "2400".
    pub nr: String,
    pub navn: String,
    /// Municipalities overlapping the postal area.
    #[serde(deserialize_with = "nullable")]
    pub kommuner: Vec<Kommune>,
    /// Addresses of a bulk recipient. The service has only ever sent null.
    pub stormodtageradresser: serde_json::Value,
}
