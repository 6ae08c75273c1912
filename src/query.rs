use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use crate::param::{ParamError, TextParam};

#[cfg(feature = "http")]
use crate::{
    connectors::{DawaError, HttpConnector},
    import_json, BodyReader, RecordStream,
};
#[cfg(feature = "http")]
use serde::de::DeserializeOwned;

/// Host used by every query unless overridden with [`Query::with_host`].
pub const DEFAULT_HOST: &str = "http://dawa.aws.dk";

/// The generic query shared by all resource builders.
///
/// Parameters are kept in insertion order. Adding a key twice merges the
/// values when the parameter is multi-valued and otherwise records a
/// warning and keeps the first value.
#[derive(Debug, Clone)]
pub struct Query {
    host: Option<String>,
    path: String,
    params: HashMap<String, TextParam>,
    keys: Vec<String>,
    warnings: Vec<ParamError>,
}

impl Query {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            host: None,
            path: path.into(),
            params: HashMap::new(),
            keys: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn add(&mut self, param: TextParam) {
        let key = param.key().to_string();
        let Some(existing) = self.params.get_mut(&key) else {
            self.keys.push(key.clone());
            self.params.insert(key, param);
            return;
        };
        if !param.multi {
            warn!(key = %key, "ignoring second value of single-valued parameter");
            self.warnings.push(ParamError::DuplicateValue { key });
            return;
        }
        if let Err(e) = existing.merge(param) {
            warn!(key = %key, error = %e, "unable to merge parameter");
            self.warnings.push(e);
        }
    }

    /// Adds `key=value` as a free-form parameter. Values must not be
    /// pre-escaped.
    pub fn add_raw(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.add(TextParam::single(key, value).allow_empty(true));
    }

    pub fn with_host(&mut self, host: impl Into<String>) {
        self.host = Some(host.into());
    }

    pub fn on_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn warnings(&self) -> &[ParamError] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn url(&self) -> String {
        let mut out = format!("{}{}", self.host(), self.path);
        if self.keys.is_empty() {
            return out;
        }
        let rendered: Vec<String> = self
            .keys
            .iter()
            .filter_map(|key| self.params.get(key))
            .map(TextParam::render)
            .collect();
        out.push('?');
        out.push_str(&rendered.join("&"));
        out
    }

    /// Marks the request to be delivered without pretty-printing.
    pub(crate) fn no_format(&mut self) {
        if !self.params.contains_key("noformat") {
            self.add(TextParam::flag("noformat"));
        }
    }
}

#[cfg(feature = "http")]
impl Query {
    /// Copy of the query bound to the connector's host, unless a host was
    /// set on the query itself.
    fn resolved(&self, http: &HttpConnector) -> Query {
        let mut query = self.clone();
        if query.host.is_none() {
            query.host = http.host().map(str::to_string);
        }
        query
    }

    /// Performs the GET and returns the response when the status is below 400.
    pub async fn request(&self, http: &HttpConnector) -> Result<reqwest::Response, DawaError> {
        http.get(&self.resolved(http).url()).await
    }

    /// Executes the query and streams the JSON array response as records.
    pub async fn records<T>(&self, http: &HttpConnector) -> Result<RecordStream<T>, DawaError>
    where
        T: DeserializeOwned + Serialize + Send + 'static,
    {
        let mut query = self.resolved(http);
        query.no_format();
        let response = query.request(http).await?;
        let body = BodyReader::new(Box::pin(response.bytes_stream()));
        Ok(import_json(body, http.import_config()))
    }

    /// Reads every record of the response into memory.
    pub async fn all<T>(&self, http: &HttpConnector) -> Result<Vec<T>, DawaError>
    where
        T: DeserializeOwned + Serialize + Send + 'static,
    {
        let stream = self.records(http).await?;
        Ok(stream.collect_all().await?)
    }

    /// Returns the first record, or `None` when the result is empty.
    ///
    /// The full query is still executed, so keep it to small result sets.
    pub async fn first<T>(&self, http: &HttpConnector) -> Result<Option<T>, DawaError>
    where
        T: DeserializeOwned + Serialize + Send + 'static,
    {
        let mut stream = self.records(http).await?;
        // Input after the first record is never inspected; dropping the
        // stream stops the download.
        Ok(stream.next().await?)
    }

    /// Fetches a single JSON object, as returned by `/reverse` lookups.
    pub async fn single<T: DeserializeOwned>(&self, http: &HttpConnector) -> Result<T, DawaError> {
        let mut query = self.resolved(http);
        query.no_format();
        let url = query.url();
        let body = query.request(http).await?.bytes().await?;
        if body.is_empty() {
            return Err(DawaError::RequestFailed { url });
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Requests the result as GeoJSON and decodes the feature collection.
    pub async fn geojson(&self, http: &HttpConnector) -> Result<FeatureCollection, DawaError> {
        let mut query = self.resolved(http);
        query.add_raw("format", "geojson");
        let url = query.url();
        let body = query.request(http).await?.bytes().await;
        match body {
            Ok(body) if !body.is_empty() => Ok(serde_json::from_slice(&body)?),
            _ => Err(DawaError::RequestFailed { url }),
        }
    }
}

/// GeoJSON `FeatureCollection` envelope. Geometries and properties are left
/// as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub geometry: serde_json::Value,
    #[serde(default)]
    pub properties: serde_json::Value,
}
