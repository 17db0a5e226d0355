use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("No emitter registered for language {0}")]
    UnsupportedLanguage(String),

    #[error("Unsupported protocol {0}")]
    UnsupportedProtocol(String),

    #[error("Document defines no services")]
    NoServices,

    #[error("A base URL requires a URL setting key")]
    BaseUrlWithoutUrlKey,
}
