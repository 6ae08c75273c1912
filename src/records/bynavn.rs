use serde::{Deserialize, Serialize};

use super::{nullable, Kommune, PostnummerRef};

/// A supplementary town name, typically a village, that narrows down an
/// address within its postal code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplerendeBynavn {
    pub href: String,
    pub navn: String,
    #[serde(deserialize_with = "nullable")]
    pub kommuner: Vec<Kommune>,
    #[serde(deserialize_with = "nullable")]
    pub postnumre: Vec<PostnummerRef>,
}
