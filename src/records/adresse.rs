use serde::{Deserialize, Serialize};

use super::{nullable, Adgangsadresse, Historik};

/// An address: an access address plus optional floor and door.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adresse {
    pub href: String,
    pub id: String,
    pub status: i32,
    /// 1 to 99, "st", "kl", "kl2" up to "kl9".
    #[serde(deserialize_with = "nullable")]
    pub etage: String,
    #[serde(rename = "dør", deserialize_with = "nullable")]
    pub doer: String,
    #[serde(deserialize_with = "nullable")]
    pub adressebetegnelse: String,
    /// kvh followed by three characters of floor and four of door.
    pub kvhx: String,
    pub historik: Historik,
    pub adgangsadresse: Adgangsadresse,
}
