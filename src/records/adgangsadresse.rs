use serde::{Deserialize, Serialize};

use super::{nullable, Ejerlav, Historik, Kommune, Opstillingskreds, Politikreds};
use super::{PostnummerRef, Region, Retskreds, Sogn, VejstykkeRef};
use crate::time::DawaTime;

/// An access address: the entrance to a plot or building from a named
/// road. Unlike [`Adresse`](super::Adresse) it carries no floor or door.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adgangsadresse {
    pub href: String,
    pub id: String,
    /// 1 is a final address, 3 a provisional one.
    pub status: i32,
    pub vejstykke: VejstykkeRef,
    pub husnr: String,
    #[serde(deserialize_with = "nullable")]
    pub supplerendebynavn: String,
    pub postnummer: PostnummerRef,
    pub kommune: Kommune,
    pub ejerlav: Ejerlav,
    #[serde(deserialize_with = "nullable")]
    pub esrejendomsnr: String,
    #[serde(deserialize_with = "nullable")]
    pub matrikelnr: String,
    pub historik: Historik,
    pub adgangspunkt: Adgangspunkt,
    #[serde(rename = "DDKN", deserialize_with = "nullable")]
    pub ddkn: DDKN,
    /// Municipality code, road code and house number, twelve characters.
    #[serde(deserialize_with = "nullable")]
    pub kvh: String,
    #[serde(deserialize_with = "nullable")]
    pub region: Region,
    #[serde(deserialize_with = "nullable")]
    pub sogn: Sogn,
    #[serde(deserialize_with = "nullable")]
    pub politikreds: Politikreds,
    #[serde(deserialize_with = "nullable")]
    pub retskreds: Retskreds,
    #[serde(deserialize_with = "nullable")]
    pub opstillingskreds: Opstillingskreds,
    /// "Byzone", "Sommerhusområde" or "Landzone".
    #[serde(deserialize_with = "nullable")]
    pub zone: String,
}

/// The geographic point of an access address.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Adgangspunkt {
    #[serde(deserialize_with = "nullable")]
    pub kilde: i32,
    /// WGS84 `[bredde, længde]` when read from CSV; JSON keeps the order
    /// the service sends.
    #[serde(deserialize_with = "nullable")]
    pub koordinater: [f64; 2],
    /// "A" absolute, "B" computed, "U" no point.
    #[serde(rename = "nøjagtighed", deserialize_with = "nullable")]
    pub noejagtighed: String,
    #[serde(deserialize_with = "nullable")]
    pub tekniskstandard: String,
    /// Text direction in gon, 0 to 400.
    #[serde(deserialize_with = "nullable")]
    pub tekstretning: f64,
    #[serde(rename = "ændret", deserialize_with = "nullable")]
    pub aendret: DawaTime,
}

/// Cells of the Danish square grid containing the address.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DDKN {
    pub m100: String,
    pub km1: String,
    pub km10: String,
}
