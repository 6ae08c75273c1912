use csv::StringRecord;
use std::collections::HashMap;
use std::io::Read;
use std::str::FromStr;
use tokio::{io::AsyncRead, sync::mpsc};
use tokio_util::{io::SyncIoBridge, sync::CancellationToken};
use tracing::debug;

use crate::decoder::DecodeError;
use crate::reader::CancellableReader;
use crate::records::{
    Adgangsadresse, Adgangspunkt, Adresse, Ejerlav, Historik, Kommune, Opstillingskreds,
    Politikreds, PostnummerRef, Region, Retskreds, Sogn, VejstykkeRef, DDKN,
};
use crate::time::DawaTime;
use crate::{ImportConfig, RecordStream};

impl From<csv::Error> for DecodeError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            if let csv::ErrorKind::Io(io) = e.into_kind() {
                return DecodeError::from(io);
            }
            return DecodeError::Csv("I/O error".to_string());
        }
        DecodeError::Csv(e.to_string())
    }
}

/// Column positions taken from the header row.
#[derive(Debug, Clone, Default)]
pub struct CsvHeader {
    columns: HashMap<String, usize>,
}

impl CsvHeader {
    pub fn new(header: &StringRecord) -> Self {
        let columns = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim_start_matches('\u{feff}').to_string(), i))
            .collect();
        Self { columns }
    }
}

/// A data row addressed by column name.
///
/// Columns missing from the export read as empty text.
pub struct CsvRow<'a> {
    header: &'a CsvHeader,
    record: &'a StringRecord,
}

impl<'a> CsvRow<'a> {
    pub fn new(header: &'a CsvHeader, record: &'a StringRecord) -> Self {
        Self { header, record }
    }

    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = *self.header.columns.get(column)?;
        self.record.get(index)
    }

    pub fn text(&self, column: &str) -> String {
        self.get(column).unwrap_or_default().to_string()
    }

    fn parse<T>(&self, column: &str) -> Result<T, DecodeError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.get(column).unwrap_or_default();
        value.trim().parse().map_err(|e: T::Err| DecodeError::Field {
            field: column.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
    }

    pub fn required_i32(&self, column: &str) -> Result<i32, DecodeError> {
        self.parse(column)
    }

    /// Zero when the column is empty or not a number.
    pub fn optional_i32(&self, column: &str) -> i32 {
        self.parse(column).unwrap_or_default()
    }

    pub fn optional_i64(&self, column: &str) -> i64 {
        self.parse(column).unwrap_or_default()
    }

    pub fn optional_f64(&self, column: &str) -> f64 {
        self.parse(column).unwrap_or_default()
    }

    pub fn required_time(&self, column: &str) -> Result<DawaTime, DecodeError> {
        Ok(DawaTime::parse(self.get(column).unwrap_or_default())?)
    }

    /// The default time when the column is empty; malformed text is an error.
    pub fn optional_time(&self, column: &str) -> Result<DawaTime, DecodeError> {
        match self.get(column).map(str::trim) {
            None | Some("") => Ok(DawaTime::default()),
            Some(text) => Ok(DawaTime::parse(text)?),
        }
    }

    /// WGS84 coordinates as `[bredde, længde]`.
    pub fn coordinates(&self) -> [f64; 2] {
        [
            self.optional_f64("wgs84koordinat_bredde"),
            self.optional_f64("wgs84koordinat_længde"),
        ]
    }
}

/// Record types that can be built from a row of a CSV export.
pub trait FromCsvRow: Sized {
    fn from_csv_row(row: &CsvRow<'_>) -> Result<Self, DecodeError>;
}

/// Starts importing records from a CSV export with a header row.
///
/// A header that cannot be read is reported through the stream like any
/// other error.
pub fn import_csv<R, T>(reader: R, config: &ImportConfig) -> RecordStream<T>
where
    R: AsyncRead + Unpin + Send + 'static,
    T: FromCsvRow + Send + 'static,
{
    RecordStream::spawn(config.channel_capacity, move |tx, token| async move {
        let source = SyncIoBridge::new(CancellableReader::new(reader, token.clone()));
        tokio::task::spawn_blocking(move || read_rows(source, &tx, &token))
            .await
            .map_err(|_| DecodeError::Interrupted)?
    })
}

fn read_rows<R: Read, T: FromCsvRow>(
    source: R,
    tx: &mpsc::Sender<T>,
    token: &CancellationToken,
) -> Result<(), DecodeError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b',')
        .has_headers(true)
        .flexible(false)
        .from_reader(source);
    let header = CsvHeader::new(reader.headers()?);
    debug!(columns = header.columns.len(), "read CSV header");

    let mut record = StringRecord::new();
    while reader.read_record(&mut record)? {
        if token.is_cancelled() {
            return Err(DecodeError::Cancelled);
        }
        let item = T::from_csv_row(&CsvRow::new(&header, &record))?;
        if tx.blocking_send(item).is_err() {
            return Err(DecodeError::Cancelled);
        }
    }
    Ok(())
}

/// Columns shared by the access address and address exports. `prefix`
/// selects the access address's own id, status and history columns.
fn adgangsadresse_columns(row: &CsvRow<'_>, prefix: &str) -> Result<Adgangsadresse, DecodeError> {
    let own = |column: &str| {
        if prefix.is_empty() {
            column.to_string()
        } else {
            format!("{prefix}{column}")
        }
    };
    let id_column = if prefix.is_empty() {
        "id".to_string()
    } else {
        "adgangsadresseid".to_string()
    };
    let status = if prefix.is_empty() {
        row.required_i32("status")?
    } else {
        row.optional_i32(&own("status"))
    };

    Ok(Adgangsadresse {
        id: row.text(&id_column),
        status,
        historik: Historik {
            oprettet: row.required_time(&own("oprettet"))?,
            aendret: row.required_time(&own("ændret"))?,
        },
        vejstykke: VejstykkeRef {
            kode: row.text("vejkode"),
            navn: row.text("vejnavn"),
            ..Default::default()
        },
        husnr: row.text("husnr"),
        supplerendebynavn: row.text("supplerendebynavn"),
        postnummer: PostnummerRef {
            nr: row.text("postnr"),
            navn: row.text("postnrnavn"),
            ..Default::default()
        },
        kommune: Kommune {
            kode: row.text("kommunekode"),
            navn: row.text("kommunenavn"),
            ..Default::default()
        },
        ejerlav: Ejerlav {
            kode: row.optional_i64("ejerlavkode"),
            navn: row.text("ejerlavnavn"),
            ..Default::default()
        },
        matrikelnr: row.text("matrikelnr"),
        esrejendomsnr: row.text("esrejendomsnr"),
        adgangspunkt: Adgangspunkt {
            koordinater: row.coordinates(),
            noejagtighed: row.text("nøjagtighed"),
            kilde: row.optional_i32("kilde"),
            tekniskstandard: row.text("tekniskstandard"),
            tekstretning: row.optional_f64("tekstretning"),
            aendret: row.optional_time("adressepunktændringsdato")?,
        },
        ddkn: DDKN {
            m100: row.text("ddkn_m100"),
            km1: row.text("ddkn_km1"),
            km10: row.text("ddkn_km10"),
        },
        kvh: row.text("kvh"),
        region: Region {
            kode: row.text("regionskode"),
            navn: row.text("regionsnavn"),
            ..Default::default()
        },
        sogn: Sogn {
            kode: row.text("sognekode"),
            navn: row.text("sognenavn"),
            ..Default::default()
        },
        politikreds: Politikreds {
            kode: row.text("politikredskode"),
            navn: row.text("politikredsnavn"),
            ..Default::default()
        },
        retskreds: Retskreds {
            kode: row.text("retskredskode"),
            navn: row.text("retskredsnavn"),
            ..Default::default()
        },
        opstillingskreds: Opstillingskreds {
            kode: row.text("opstillingskredskode"),
            navn: row.text("opstillingskredsnavn"),
            ..Default::default()
        },
        zone: row.text("zone"),
        ..Default::default()
    })
}

impl FromCsvRow for Adgangsadresse {
    fn from_csv_row(row: &CsvRow<'_>) -> Result<Self, DecodeError> {
        adgangsadresse_columns(row, "")
    }
}

impl FromCsvRow for Adresse {
    fn from_csv_row(row: &CsvRow<'_>) -> Result<Self, DecodeError> {
        let status = row.required_i32("status")?;
        let historik = Historik {
            oprettet: row.required_time("oprettet")?,
            aendret: row.required_time("ændret")?,
        };
        let kvhx = row.text("kvhx");
        let mut adgangsadresse = adgangsadresse_columns(row, "adgangsadresse_")?;
        // The export only carries kvhx; kvh is its first twelve characters.
        adgangsadresse.kvh = kvhx.chars().take(12).collect();

        Ok(Adresse {
            id: row.text("id"),
            status,
            historik,
            etage: row.text("etage"),
            doer: row.text("dør"),
            kvhx,
            adgangsadresse,
            ..Default::default()
        })
    }
}
