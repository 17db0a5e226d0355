//! Document retrieval.
//!
//! A [`RetrievalRequest`] is configured with a single source (local path or
//! URL, set at most once) and optional credentials, then fetched. When none
//! of username/password/domain are set the fetch is unauthenticated; if at
//! least one is set the request carries a credential bundle populated with
//! exactly the fields that were given.

use std::{fs, path::Path};

use url::Url;

use crate::error::Error;

/// How fetched bytes are decoded to text. The original tool applied a fixed
/// single-byte decode regardless of the document's declared encoding; that
/// behavior is kept as the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Map every byte 1:1 to the first 256 code points. Never fails, but
    /// documents in other encodings will decode incorrectly.
    Latin1,
    Utf8,
}

impl Default for DecodePolicy {
    fn default() -> Self {
        DecodePolicy::Latin1
    }
}

impl DecodePolicy {
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            DecodePolicy::Latin1 => bytes.iter().map(|&byte| char::from(byte)).collect(),
            DecodePolicy::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) domain: Option<String>,
}

impl Credentials {
    /// The account name sent over the wire; a set domain uses the
    /// `DOMAIN\user` convention.
    pub(crate) fn account(&self) -> String {
        match (&self.domain, &self.username) {
            (Some(domain), Some(username)) => format!("{}\\{}", domain, username),
            (Some(domain), None) => format!("{}\\", domain),
            (None, Some(username)) => username.clone(),
            (None, None) => String::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct RetrievalRequest {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    domain: Option<String>,
    decode: DecodePolicy,
}

impl RetrievalRequest {
    /// Set the document source. May be called at most once.
    pub fn set_url(&mut self, url: String) -> Result<(), Error> {
        if self.url.is_some() {
            return Err(Error::TooManySources);
        }

        self.url = Some(url);
        Ok(())
    }

    pub fn set_username(&mut self, username: String) {
        self.username = Some(username);
    }

    pub fn set_password(&mut self, password: String) {
        self.password = Some(password);
    }

    pub fn set_domain(&mut self, domain: String) {
        self.domain = Some(domain);
    }

    pub fn set_decode_policy(&mut self, decode: DecodePolicy) {
        self.decode = decode;
    }

    pub fn has_source(&self) -> bool {
        self.url.is_some()
    }

    pub(crate) fn credentials(&self) -> Option<Credentials> {
        if self.username.is_none() && self.password.is_none() && self.domain.is_none() {
            return None;
        }

        Some(Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
            domain: self.domain.clone(),
        })
    }

    /// Retrieve the document at the configured source and decode it to text.
    pub fn fetch(&self) -> Result<String, Error> {
        let source = self.url.as_deref().ok_or(Error::NoSource)?;
        let url = resolve_location(source)?;

        let bytes = match url.scheme() {
            "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| Error::InvalidSource(source.to_owned()))?;

                fs::read(&path).map_err(|error| Error::FileRead {
                    path,
                    source: error,
                })?
            }

            "http" | "https" => self.fetch_http(url)?,

            other => return Err(Error::UnsupportedScheme(other.to_owned())),
        };

        Ok(self.decode.decode(&bytes))
    }

    fn fetch_http(&self, url: Url) -> Result<Vec<u8>, Error> {
        let client = reqwest::blocking::Client::new();
        let mut request = client.get(url.clone());

        if let Some(credentials) = self.credentials() {
            request = request.basic_auth(credentials.account(), credentials.password.as_deref());
        }

        let response = request.send()?;

        if !response.status().is_success() {
            return Err(Error::HttpStatus {
                status: response.status(),
                url: url.into(),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}

/// A source is either a URL or a filesystem path; bare paths are converted
/// to file URLs.
fn resolve_location(source: &str) -> Result<Url, Error> {
    match Url::parse(source) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let path = Path::new(source)
                .canonicalize()
                .map_err(|error| Error::FileRead {
                    path: source.into(),
                    source: error,
                })?;

            Url::from_file_path(&path).map_err(|()| Error::InvalidSource(source.to_owned()))
        }
        Err(_) => Err(Error::InvalidSource(source.to_owned())),
    }
}
