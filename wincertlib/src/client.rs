//! Public operations for reading certificates from a certificate store
//!
//! Each operation builds request parameters, validates them and only then calls the provider, so
//! a bad argument never reaches the provider. Calls share no state and may run concurrently.

use std::sync::Arc;

use crate::{
    data::{AllCertOptions, Certificate, CertificateAndKey, OneCertOptions},
    provider::{execute, CertificateProvider},
    request::{build_all_certificates_request, build_single_certificate_request},
    validate::validate_params,
    Result,
};

/// Reads every certificate from the store named by `options` using `provider`. Store name and
/// location default to Root and CurrentUser.
pub async fn get_all_certificates<P>(
    provider: &P,
    options: Option<AllCertOptions>,
) -> Result<Vec<Certificate>>
where
    P: CertificateProvider + ?Sized,
{
    let params = build_all_certificates_request(options);
    let request = validate_params(&params)?;
    execute(provider, request).await?.into_certificates()
}

/// Reads the certificate with the thumbprint named by `options`, and its private key, using
/// `provider`.
///
/// The key is blank unless the certificate was imported with an exportable key stored where the
/// provider can find it.
pub async fn get_certificate<P>(
    provider: &P,
    options: Option<OneCertOptions>,
) -> Result<CertificateAndKey>
where
    P: CertificateProvider + ?Sized,
{
    let params = build_single_certificate_request(options)?;
    let request = validate_params(&params)?;
    execute(provider, request).await?.into_certificate_and_key()
}

/// Shareable handle that pairs the public operations with a [CertificateProvider]
pub struct CertStoreClient<P: ?Sized> {
    provider: Arc<P>,
}

impl<P: ?Sized> Clone for CertStoreClient<P> {
    fn clone(&self) -> Self {
        CertStoreClient {
            provider: Arc::clone(&self.provider),
        }
    }
}

impl<P: CertificateProvider> CertStoreClient<P> {
    /// Creates a client that takes ownership of `provider`
    pub fn new(provider: P) -> Self {
        CertStoreClient {
            provider: Arc::new(provider),
        }
    }
}

impl<P: CertificateProvider + ?Sized> CertStoreClient<P> {
    /// Creates a client that shares `provider`
    pub fn from_arc(provider: Arc<P>) -> Self {
        CertStoreClient { provider }
    }

    /// Returns the provider used by this client
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// See [get_all_certificates]
    pub async fn get_all_certificates(
        &self,
        options: Option<AllCertOptions>,
    ) -> Result<Vec<Certificate>> {
        get_all_certificates(self.provider.as_ref(), options).await
    }

    /// See [get_certificate]
    pub async fn get_certificate(
        &self,
        options: Option<OneCertOptions>,
    ) -> Result<CertificateAndKey> {
        get_certificate(self.provider.as_ref(), options).await
    }
}
