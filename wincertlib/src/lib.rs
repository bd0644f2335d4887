#![doc = include_str!("../README.md")]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod client;
pub mod data;
pub mod provider;
pub mod request;
pub mod validate;

mod utils;

pub use client::{get_all_certificates, get_certificate, CertStoreClient};
pub use data::{
    AllCertOptions, Certificate, CertificateAndKey, OneCertOptions, StoreLocation, StoreName,
};
pub use provider::{CertificateProvider, Completion, ProviderError, ProviderResult};
pub use request::{CertificateRequest, RequestParams};

use log::{debug, warn};

/// Result type for wincertlib
pub type Result<T> = core::result::Result<T, Error>;

/// Error values for wincertlib
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A required argument was not supplied, i.e., no options were passed to [get_certificate]
    #[error("{0}")]
    InvalidArgument(String),
    /// Store location is not a member of [StoreLocation]
    #[error("Store Location - {0} is not supported.")]
    UnsupportedStoreLocation(String),
    /// Store name is not a member of [StoreName]
    #[error("Store Name - {0} is not supported.")]
    UnsupportedStoreName(String),
    /// Error reported by the certificate provider, passed through unchanged
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// The certificate provider dropped its [Completion] without reporting an outcome
    #[error("certificate provider dropped its completion handle without reporting a result")]
    CompletionDropped,
    /// The certificate provider reported a result that does not match the request type
    #[error("certificate provider returned a result that does not match the request")]
    UnexpectedResult,
    /// Asn1 is used to propagate error information from the der and x509-cert crates
    #[error("ASN.1 error: {0}")]
    Asn1(der::Error),
    /// Pkcs8 is used to propagate error information from the pkcs8 crate
    #[error("PKCS #8 error: {0}")]
    Pkcs8(pkcs8::Error),
    /// PEM block carried a label other than the one expected
    #[error("unexpected PEM label: {0}")]
    UnexpectedPemLabel(String),
    /// Provider payload could not be parsed as JSON
    #[error("failed to parse provider payload: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

impl From<der::Error> for Error {
    fn from(err: der::Error) -> Error {
        Error::Asn1(err)
    }
}

impl From<pkcs8::Error> for Error {
    fn from(err: pkcs8::Error) -> Error {
        Error::Pkcs8(err)
    }
}

/// Enum that describes level associated with a log message
#[derive(Debug, Eq, PartialEq)]
enum WinCertLogLevels {
    /// Common warn logging level
    Warn,
    /// Common debug logging level
    Debug,
}

/// Generates logging output per the logger configured by the calling application
fn log_message(level: &WinCertLogLevels, message: &str) {
    if &WinCertLogLevels::Warn == level {
        warn!("{}", message);
    } else {
        debug!("{}", message);
    }
}

/// Generates warn level logging output per calling application configured logging
pub(crate) fn log_warn(message: &str) {
    log_message(&WinCertLogLevels::Warn, message)
}

/// Generates debug level logging output per calling application configured logging
pub(crate) fn log_debug(message: &str) {
    log_message(&WinCertLogLevels::Debug, message)
}
