//! # DAWA client
//!
//! Async access to DAWA, the Danish address web service. The crate has two
//! halves:
//!
//! * query builders that assemble search URLs for addresses, access
//!   addresses, postal codes, roads and the administrative lists, and
//! * streaming importers that turn the service's JSON and CSV exports into
//!   typed records one at a time, without holding the export in memory.
//!
//! Every import runs on its own task and hands records over a bounded
//! channel. Reading past the last record reports how the import ended:
//! `Ok(None)` for a complete export, or the error that stopped it.
//!
//! ## Example
//!
//! ```no_run
//! use dawa_dataflow::{import_adresser_csv, ImportConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let file = tokio::fs::File::open("adresser.csv").await?;
//!     let mut adresser = import_adresser_csv(file, &ImportConfig::default());
//!
//!     while let Some(adresse) = adresser.next().await? {
//!         println!("{} {}", adresse.adgangsadresse.vejstykke.navn, adresse.adgangsadresse.husnr);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Querying the service needs the `http` feature (on by default):
//!
//! ```no_run
//! # #[cfg(feature = "http")]
//! # async fn run() -> Result<(), dawa_dataflow::DawaError> {
//! use dawa_dataflow::{AdresseQuery, ClientConfig, HttpConnector};
//!
//! let http = HttpConnector::new(&ClientConfig::default())?;
//! let found = AdresseQuery::new()
//!     .vejnavn(["Rødkildevej"])
//!     .husnr(["46"])
//!     .all(&http)
//!     .await?;
//! println!("{} matches", found.len());
//! # Ok(())
//! # }
//! ```

#[cfg(test)]
mod tests;

mod time;
pub use time::*;

mod param;
pub use param::*;

mod query;
pub use query::*;

mod config;
pub use config::*;

mod metrics;
pub use metrics::*;

mod reader;
pub use reader::ChannelReader;

mod stream_adapter;
pub use stream_adapter::*;

mod framing;
pub use framing::*;

mod decoder;
pub use decoder::*;

mod import;
pub use import::*;

mod csv_import;
pub use csv_import::*;

pub mod records;
pub use records::*;

pub mod queries;
pub use queries::*;

#[cfg(feature = "http")]
mod connectors;
#[cfg(feature = "http")]
pub use connectors::*;

use tokio::io::AsyncRead;

/// Imports addresses from a JSON array export.
pub fn import_adresser_json<R>(reader: R, config: &ImportConfig) -> RecordStream<Adresse>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    import_json(reader, config)
}

/// Imports addresses from a CSV export.
pub fn import_adresser_csv<R>(reader: R, config: &ImportConfig) -> RecordStream<Adresse>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    import_csv(reader, config)
}

pub fn import_adgangsadresser_json<R>(
    reader: R,
    config: &ImportConfig,
) -> RecordStream<Adgangsadresse>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    import_json(reader, config)
}

pub fn import_adgangsadresser_csv<R>(
    reader: R,
    config: &ImportConfig,
) -> RecordStream<Adgangsadresse>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    import_csv(reader, config)
}

pub fn import_postnumre_json<R>(reader: R, config: &ImportConfig) -> RecordStream<Postnummer>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    import_json(reader, config)
}

pub fn import_vejstykker_json<R>(reader: R, config: &ImportConfig) -> RecordStream<Vejstykke>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    import_json(reader, config)
}

pub fn import_supplerende_bynavne_json<R>(
    reader: R,
    config: &ImportConfig,
) -> RecordStream<SupplerendeBynavn>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    import_json(reader, config)
}
