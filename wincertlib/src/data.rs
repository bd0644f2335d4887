//! Provides data structures exchanged with callers and with the certificate provider

use std::{fmt, str::FromStr};

use pkcs8::{PrivateKeyInfo, SecretDocument};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use zeroize::Zeroize;

use crate::{
    utils::{buffer_to_hex, decode_pem_certificate, normalize_thumbprint},
    Error, Result,
};

/// Store location used when [AllCertOptions] does not name one
pub const DEFAULT_STORE_LOCATION: StoreLocation = StoreLocation::CurrentUser;

/// Store name used when [AllCertOptions] does not name one
pub const DEFAULT_STORE_NAME: StoreName = StoreName::Root;

/// Location scope of a Windows certificate store
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StoreLocation {
    /// Per-user stores
    CurrentUser,
    /// Machine-wide stores
    LocalMachine,
}

impl StoreLocation {
    /// Every supported store location
    pub const ALL: [StoreLocation; 2] = [StoreLocation::CurrentUser, StoreLocation::LocalMachine];

    /// Returns the name used for the location at the API boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreLocation::CurrentUser => "CurrentUser",
            StoreLocation::LocalMachine => "LocalMachine",
        }
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreLocation {
    type Err = Error;

    /// Names are matched case-sensitively.
    fn from_str(s: &str) -> Result<Self> {
        StoreLocation::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| Error::UnsupportedStoreLocation(s.to_string()))
    }
}

/// Logical certificate store name
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum StoreName {
    /// Certificates of other users
    AddressBook,
    /// Third-party certification authorities
    AuthRoot,
    /// Intermediate certification authorities
    CertificateAuthority,
    /// Revoked certificates
    Disallowed,
    /// Personal certificates
    My,
    /// Trusted root certification authorities
    Root,
    /// Directly trusted people and resources
    TrustedPeople,
    /// Directly trusted publishers
    TrustedPublisher,
}

impl StoreName {
    /// Every supported store name
    pub const ALL: [StoreName; 8] = [
        StoreName::AddressBook,
        StoreName::AuthRoot,
        StoreName::CertificateAuthority,
        StoreName::Disallowed,
        StoreName::My,
        StoreName::Root,
        StoreName::TrustedPeople,
        StoreName::TrustedPublisher,
    ];

    /// Returns the name used for the store at the API boundary
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreName::AddressBook => "AddressBook",
            StoreName::AuthRoot => "AuthRoot",
            StoreName::CertificateAuthority => "CertificateAuthority",
            StoreName::Disallowed => "Disallowed",
            StoreName::My => "My",
            StoreName::Root => "Root",
            StoreName::TrustedPeople => "TrustedPeople",
            StoreName::TrustedPublisher => "TrustedPublisher",
        }
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreName {
    type Err = Error;

    /// Names are matched case-sensitively.
    fn from_str(s: &str) -> Result<Self> {
        StoreName::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| Error::UnsupportedStoreName(s.to_string()))
    }
}

/// Options accepted by [get_all_certificates](crate::get_all_certificates). Unset (or empty) values
/// fall back to [DEFAULT_STORE_NAME] and [DEFAULT_STORE_LOCATION].
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AllCertOptions {
    /// Store name, e.g., Root
    pub store_name: Option<String>,
    /// Store location, i.e., CurrentUser or LocalMachine
    pub store_location: Option<String>,
}

impl AllCertOptions {
    /// Creates options naming the given store
    pub fn new(store_name: StoreName, store_location: StoreLocation) -> Self {
        AllCertOptions {
            store_name: Some(store_name.to_string()),
            store_location: Some(store_location.to_string()),
        }
    }
}

/// Options accepted by [get_certificate](crate::get_certificate). No value has a default.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OneCertOptions {
    /// Store name, e.g., My
    pub store_name: Option<String>,
    /// Store location, i.e., CurrentUser or LocalMachine
    pub store_location: Option<String>,
    /// Thumbprint of the certificate to retrieve
    pub thumbprint: Option<String>,
}

impl OneCertOptions {
    /// Creates options naming the given store and certificate thumbprint
    pub fn new(store_name: StoreName, store_location: StoreLocation, thumbprint: &str) -> Self {
        OneCertOptions {
            store_name: Some(store_name.to_string()),
            store_location: Some(store_location.to_string()),
            thumbprint: Some(thumbprint.to_string()),
        }
    }
}

/// Certificate read from a store, without private key
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Certificate {
    /// Subject name as rendered by the provider
    pub subject: String,
    /// Issuer name as rendered by the provider
    pub issuer: String,
    /// Hex thumbprint as rendered by the provider
    pub thumbprint: String,
    /// PEM-encoded certificate
    pub pem: String,
}

impl Certificate {
    /// Parses the PEM-encoded certificate
    pub fn to_x509(&self) -> Result<x509_cert::Certificate> {
        let (_, cert) = decode_pem_certificate(&self.pem)?;
        Ok(cert)
    }

    /// Returns the SHA-1 hash of the encoded certificate as upper case hex without separators
    pub fn computed_thumbprint(&self) -> Result<String> {
        let (der_cert, _) = decode_pem_certificate(&self.pem)?;
        Ok(buffer_to_hex(&Sha1::digest(der_cert)))
    }

    /// Returns true if the reported thumbprint matches the hash of the encoded certificate.
    /// Case, spaces and colons in the reported value are ignored.
    pub fn thumbprint_matches(&self) -> Result<bool> {
        Ok(normalize_thumbprint(&self.thumbprint) == self.computed_thumbprint()?)
    }
}

/// Certificate and private key read from a store.
///
/// The key is blank when the certificate's key was not imported as exportable or is not stored
/// where the provider can find it. The key is zeroized on drop.
#[derive(Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CertificateAndKey {
    /// PEM-encoded certificate
    pub cert: String,
    /// PEM-encoded private key, possibly blank
    pub key: String,
}

impl CertificateAndKey {
    /// Parses the PEM-encoded certificate
    pub fn certificate(&self) -> Result<x509_cert::Certificate> {
        let (_, cert) = decode_pem_certificate(&self.cert)?;
        Ok(cert)
    }

    /// Returns false when the provider returned a blank key
    pub fn has_private_key(&self) -> bool {
        !self.key.trim().is_empty()
    }

    /// Returns the PKCS #8 private key, or None when the provider returned a blank key
    pub fn private_key(&self) -> Result<Option<SecretDocument>> {
        if !self.has_private_key() {
            return Ok(None);
        }

        let (label, doc) = SecretDocument::from_pem(self.key.trim())?;
        if label != "PRIVATE KEY" {
            return Err(Error::UnexpectedPemLabel(label.to_string()));
        }
        PrivateKeyInfo::try_from(doc.as_bytes())?;
        Ok(Some(doc))
    }
}

impl fmt::Debug for CertificateAndKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = if self.has_private_key() {
            "<redacted>"
        } else {
            ""
        };
        f.debug_struct("CertificateAndKey")
            .field("cert", &self.cert)
            .field("key", &key)
            .finish()
    }
}

impl Drop for CertificateAndKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}
