//! Normalizes caller options into requests for the certificate provider
//!
//! Building a request never fails on bad store names or locations. [RequestParams] carries the
//! caller's strings as-is (defaults applied where the operation has them) and
//! [validate_params](crate::validate::validate_params) turns it into a [CertificateRequest], the
//! only form the provider accepts.

use serde::{Deserialize, Serialize};

use crate::{
    data::{AllCertOptions, OneCertOptions, DEFAULT_STORE_LOCATION, DEFAULT_STORE_NAME},
    log_debug, Error, Result, StoreLocation, StoreName,
};

/// Normalized, not yet validated, request parameters
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RequestParams {
    /// Store name as supplied by the caller or defaulted
    pub store_name: Option<String>,
    /// Store location as supplied by the caller or defaulted
    pub store_location: Option<String>,
    /// Thumbprint of the certificate to retrieve, never set when `all_certificates` is true
    pub thumbprint: Option<String>,
    /// True when all certificates in the store are requested
    pub all_certificates: bool,
}

/// Validated unit of work sent to a [CertificateProvider](crate::CertificateProvider).
///
/// Serializes to `{storeName, storeLocation, thumbprint?, allCertificates}`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequest {
    /// Store to read from
    pub store_name: StoreName,
    /// Location of the store to read from
    pub store_location: StoreLocation,
    /// Thumbprint of the certificate to retrieve, forwarded without inspection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbprint: Option<String>,
    /// True when all certificates in the store are requested
    pub all_certificates: bool,
}

/// Treats empty strings as unset
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Prepares parameters to read every certificate from a store. Store name and location default to
/// Root and CurrentUser when absent or empty.
pub fn build_all_certificates_request(options: Option<AllCertOptions>) -> RequestParams {
    let options = options.unwrap_or_default();
    let params = RequestParams {
        store_name: Some(
            non_empty(options.store_name).unwrap_or_else(|| DEFAULT_STORE_NAME.to_string()),
        ),
        store_location: Some(
            non_empty(options.store_location)
                .unwrap_or_else(|| DEFAULT_STORE_LOCATION.to_string()),
        ),
        thumbprint: None,
        all_certificates: true,
    };
    log_debug(&format!("Prepared request parameters: {params:?}"));
    params
}

/// Prepares parameters to read one certificate and its key from a store. All values are copied
/// verbatim from `options`, which must be present.
pub fn build_single_certificate_request(options: Option<OneCertOptions>) -> Result<RequestParams> {
    let options = match options {
        Some(options) => options,
        None => return Err(Error::InvalidArgument("Options required".to_string())),
    };

    let params = RequestParams {
        store_name: options.store_name,
        store_location: options.store_location,
        thumbprint: options.thumbprint,
        all_certificates: false,
    };
    log_debug(&format!("Prepared request parameters: {params:?}"));
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_certificates_defaults() {
        let expected = RequestParams {
            store_name: Some("Root".to_string()),
            store_location: Some("CurrentUser".to_string()),
            thumbprint: None,
            all_certificates: true,
        };
        assert_eq!(build_all_certificates_request(None), expected);
        assert_eq!(
            build_all_certificates_request(Some(AllCertOptions::default())),
            expected
        );
        assert_eq!(
            build_all_certificates_request(Some(AllCertOptions {
                store_name: Some(String::new()),
                store_location: Some(String::new()),
            })),
            expected
        );
    }

    #[test]
    fn all_certificates_keeps_caller_values() {
        let params = build_all_certificates_request(Some(AllCertOptions {
            store_name: Some("Bogus".to_string()),
            store_location: None,
        }));
        assert_eq!(params.store_name.as_deref(), Some("Bogus"));
        assert_eq!(params.store_location.as_deref(), Some("CurrentUser"));
    }

    #[test]
    fn single_certificate_requires_options() {
        match build_single_certificate_request(None) {
            Err(Error::InvalidArgument(msg)) => assert_eq!(msg, "Options required"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn single_certificate_copies_verbatim() {
        let params = build_single_certificate_request(Some(OneCertOptions {
            store_name: Some(String::new()),
            store_location: None,
            thumbprint: Some(String::new()),
        }))
        .unwrap();
        assert_eq!(params.store_name.as_deref(), Some(""));
        assert_eq!(params.store_location, None);
        assert_eq!(params.thumbprint.as_deref(), Some(""));
        assert!(!params.all_certificates);
    }

    #[test]
    fn request_wire_format() {
        let request = CertificateRequest {
            store_name: StoreName::Root,
            store_location: StoreLocation::CurrentUser,
            thumbprint: None,
            all_certificates: true,
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"storeName":"Root","storeLocation":"CurrentUser","allCertificates":true}"#
        );

        let request = CertificateRequest {
            store_name: StoreName::My,
            store_location: StoreLocation::LocalMachine,
            thumbprint: Some("AB12".to_string()),
            all_certificates: false,
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"storeName":"My","storeLocation":"LocalMachine","thumbprint":"AB12","allCertificates":false}"#
        );
    }
}
