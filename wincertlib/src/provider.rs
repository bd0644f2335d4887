//! Bridges a completion-style certificate provider to an async result
//!
//! A [CertificateProvider] receives a validated [CertificateRequest] and a [Completion]. The
//! provider reports its outcome by consuming the [Completion], which it may do before returning
//! from [fetch](CertificateProvider::fetch) or later from another thread or task. Because the
//! completion is consumed, an outcome is delivered at most once and is either a result or an
//! error, never both.
//!
//! No timeout is applied. A provider that holds its [Completion] without ever using it leaves
//! the caller waiting indefinitely; a provider that drops it unused yields
//! [Error::CompletionDropped].

use std::{error::Error as StdError, fmt};

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use crate::{
    data::{Certificate, CertificateAndKey},
    log_debug, log_warn, CertificateRequest, Error, Result,
};

/// Error reported by a [CertificateProvider].
///
/// Display and source are those of the wrapped error, which can be recovered with
/// [downcast_ref](ProviderError::downcast_ref) or [into_inner](ProviderError::into_inner).
pub struct ProviderError(Box<dyn StdError + Send + Sync + 'static>);

impl ProviderError {
    /// Wraps an error value or message reported by a provider
    pub fn new(err: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        ProviderError(err.into())
    }

    /// Returns a reference to the wrapped error if it is of type `E`
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Returns the wrapped error
    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.0
    }
}

impl fmt::Debug for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl StdError for ProviderError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.0.source()
    }
}

/// Successful outcome reported by a [CertificateProvider]
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderResult {
    /// Every certificate in a store, for requests with `all_certificates` set
    Certificates(Vec<Certificate>),
    /// A certificate and its key, for requests naming a thumbprint
    CertificateAndKey(CertificateAndKey),
}

impl ProviderResult {
    /// Parses a JSON payload produced by a provider. `all_certificates` selects whether an array of
    /// certificates or a single certificate and key is expected.
    pub fn from_json(all_certificates: bool, json: &str) -> Result<Self> {
        if all_certificates {
            Ok(ProviderResult::Certificates(serde_json::from_str(json)?))
        } else {
            Ok(ProviderResult::CertificateAndKey(serde_json::from_str(
                json,
            )?))
        }
    }

    /// Returns the certificate list or [Error::UnexpectedResult]
    pub fn into_certificates(self) -> Result<Vec<Certificate>> {
        match self {
            ProviderResult::Certificates(certs) => Ok(certs),
            ProviderResult::CertificateAndKey(_) => Err(Error::UnexpectedResult),
        }
    }

    /// Returns the certificate and key or [Error::UnexpectedResult]
    pub fn into_certificate_and_key(self) -> Result<CertificateAndKey> {
        match self {
            ProviderResult::CertificateAndKey(cak) => Ok(cak),
            ProviderResult::Certificates(_) => Err(Error::UnexpectedResult),
        }
    }
}

impl From<Vec<Certificate>> for ProviderResult {
    fn from(certs: Vec<Certificate>) -> Self {
        ProviderResult::Certificates(certs)
    }
}

impl From<CertificateAndKey> for ProviderResult {
    fn from(cak: CertificateAndKey) -> Self {
        ProviderResult::CertificateAndKey(cak)
    }
}

/// Outcome reported through a [Completion]
pub type ProviderOutcome = core::result::Result<ProviderResult, ProviderError>;

/// Single-use handle through which a [CertificateProvider] reports the outcome of a request
#[derive(Debug)]
pub struct Completion {
    tx: oneshot::Sender<ProviderOutcome>,
}

impl Completion {
    /// Reports the outcome of the request
    pub fn complete(self, outcome: ProviderOutcome) {
        if self.tx.send(outcome).is_err() {
            log_debug("Caller stopped waiting before the certificate provider completed");
        }
    }

    /// Reports a successful outcome
    pub fn succeed(self, result: impl Into<ProviderResult>) {
        self.complete(Ok(result.into()))
    }

    /// Reports a failure. The error is returned to the caller unchanged.
    pub fn fail(self, err: impl Into<Box<dyn StdError + Send + Sync + 'static>>) {
        self.complete(Err(ProviderError::new(err)))
    }
}

/// Capability that reads certificates and keys from a certificate store.
///
/// Implementations must report exactly one outcome per call via the supplied [Completion]. A
/// result must be [ProviderResult::Certificates] when `request.all_certificates` is true and
/// [ProviderResult::CertificateAndKey] otherwise. A blank key is a valid result.
pub trait CertificateProvider: Send + Sync {
    /// Starts reading the certificate material described by `request`
    fn fetch(&self, request: CertificateRequest, completion: Completion);
}

impl<F> CertificateProvider for F
where
    F: Fn(CertificateRequest, Completion) + Send + Sync,
{
    fn fetch(&self, request: CertificateRequest, completion: Completion) {
        self(request, completion)
    }
}

/// Invokes `provider` with `request` and waits for the outcome. Provider errors are returned as
/// [Error::Provider] without translation and results are returned without inspection.
pub async fn execute<P>(provider: &P, request: CertificateRequest) -> Result<ProviderResult>
where
    P: CertificateProvider + ?Sized,
{
    let (tx, rx) = oneshot::channel();
    log_debug(&format!(
        "Dispatching request for {}\\{} to certificate provider",
        request.store_location, request.store_name
    ));
    provider.fetch(request, Completion { tx });

    match rx.await {
        Ok(Ok(result)) => Ok(result),
        Ok(Err(e)) => Err(Error::Provider(e)),
        Err(_) => {
            log_warn("Certificate provider dropped its completion handle without reporting");
            Err(Error::CompletionDropped)
        }
    }
}
