use url::form_urlencoded;

/// Problems raised while combining query parameters.
///
/// The query builder never returns these; they end up in its warning list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("merge: key value mismatch '{left}' != '{right}'")]
    MergeKeyMismatch { left: String, right: String },
    #[error("merge: cannot merge multiple values of key {key}")]
    NotMulti { key: String },
    #[error("ignoring second value of key {key}")]
    DuplicateValue { key: String },
}

/// One named query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextParam {
    pub name: String,
    pub values: Vec<String>,
    /// Values are rendered pipe-separated; otherwise only the first is sent.
    pub multi: bool,
    /// Render `name=` even when no value was given.
    pub allow_empty: bool,
}

impl TextParam {
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: vec![value.into()],
            multi: false,
            allow_empty: false,
        }
    }

    pub fn multi<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
            multi: true,
            allow_empty: false,
        }
    }

    /// A parameter that is sent without any value, such as `noformat=`.
    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            multi: false,
            allow_empty: true,
        }
    }

    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    pub fn key(&self) -> &str {
        &self.name
    }

    /// Renders `name=value`, escaping both sides.
    pub fn render(&self) -> String {
        let mut out = query_escape(&self.name);
        out.push('=');
        if self.allow_empty && self.values.is_empty() {
            return out;
        }
        if self.multi {
            let escaped: Vec<String> = self.values.iter().map(|v| query_escape(v)).collect();
            out.push_str(&escaped.join("|"));
        } else if let Some(first) = self.values.first() {
            out.push_str(&query_escape(first));
        }
        out
    }

    /// Appends the values of `other`, which must carry the same name.
    pub fn merge(&mut self, other: TextParam) -> Result<(), ParamError> {
        if self.name != other.name {
            return Err(ParamError::MergeKeyMismatch {
                left: self.name.clone(),
                right: other.name,
            });
        }
        if !self.multi {
            return Err(ParamError::NotMulti {
                key: self.name.clone(),
            });
        }
        self.values.extend(other.values);
        Ok(())
    }
}

/// Form-style escaping: space becomes `+`, only ASCII alphanumerics and
/// `-_.~` pass through.
pub fn query_escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
        .replace("%7E", "~")
}
