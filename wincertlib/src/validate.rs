//! Validates store names and locations before any provider call

use crate::{
    request::{CertificateRequest, RequestParams},
    utils::value_or_undefined,
    Error, Result, StoreLocation, StoreName,
};

/// Takes normalized [RequestParams] and returns a [CertificateRequest] if the store location and
/// store name are supported. The location is checked first, so when both are unsupported the
/// location error is returned. The thumbprint is not inspected.
pub fn validate_params(params: &RequestParams) -> Result<CertificateRequest> {
    let store_location = params
        .store_location
        .as_deref()
        .and_then(|l| l.parse::<StoreLocation>().ok())
        .ok_or_else(|| {
            Error::UnsupportedStoreLocation(value_or_undefined(params.store_location.as_deref()))
        })?;

    let store_name = params
        .store_name
        .as_deref()
        .and_then(|n| n.parse::<StoreName>().ok())
        .ok_or_else(|| {
            Error::UnsupportedStoreName(value_or_undefined(params.store_name.as_deref()))
        })?;

    Ok(CertificateRequest {
        store_name,
        store_location,
        thumbprint: params.thumbprint.clone(),
        all_certificates: params.all_certificates,
    })
}
