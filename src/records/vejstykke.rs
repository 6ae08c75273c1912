use serde::{Deserialize, Serialize};

use super::{nullable, Historik, Kommune, PostnummerRef};

/// A road within one municipality, identified by municipality and road
/// code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vejstykke {
    pub href: String,
    pub kode: String,
    pub navn: String,
    /// Short form of the name, at most 20 characters, for labels.
    #[serde(deserialize_with = "nullable")]
    pub adresseringsnavn: String,
    pub kommune: Kommune,
    #[serde(deserialize_with = "nullable")]
    pub postnumre: Vec<PostnummerRef>,
    pub historik: Historik,
}
