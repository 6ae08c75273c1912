//! Typed records for the DAWA resources.
//!
//! JSON field names follow the service (`ændret`, `nøjagtighed`, `DDKN`);
//! the Rust fields use ASCII spellings. Fields the service may send as
//! `null` decode to their default value.

use serde::{Deserialize, Deserializer, Serialize};

use crate::time::DawaTime;

mod adgangsadresse;
mod adresse;
mod bynavn;
mod lists;
mod postnummer;
mod vejstykke;

pub use adgangsadresse::*;
pub use adresse::*;
pub use bynavn::*;
pub use lists::*;
pub use postnummer::*;
pub use vejstykke::*;

pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Creation and last-change times of a resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Historik {
    #[serde(deserialize_with = "nullable")]
    pub oprettet: DawaTime,
    #[serde(rename = "ændret", deserialize_with = "nullable")]
    pub aendret: DawaTime,
}

/// Reference to a postal code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostnummerRef {
    pub href: String,
    /// Four digits.
    pub nr: String,
    pub navn: String,
}

/// Reference to a road segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VejstykkeRef {
    pub href: String,
    /// Road code, four digits, unique within the municipality.
    pub kode: String,
    pub navn: String,
}
