//! Utility functions for use within wincertlib

use der::{Decode, Document};
use subtle_encoding::hex;
use x509_cert::Certificate;

use crate::{Error, Result};

/// Takes a buffer and returns a String containing an ASCII hex representation of the buffer's contents
pub(crate) fn buffer_to_hex(buffer: &[u8]) -> String {
    let hex = hex::encode_upper(buffer);
    let r = std::str::from_utf8(hex.as_slice());
    if let Ok(s) = r {
        s.to_string()
    } else {
        String::new()
    }
}

/// Strips spaces and colons from a hex thumbprint and upper cases what remains
pub(crate) fn normalize_thumbprint(thumbprint: &str) -> String {
    thumbprint
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Takes a PEM-encoded certificate and returns the DER encoding alongside the parsed certificate
pub(crate) fn decode_pem_certificate(pem: &str) -> Result<(Vec<u8>, Certificate)> {
    let (label, doc) = Document::from_pem(pem.trim())?;
    if label != "CERTIFICATE" {
        return Err(Error::UnexpectedPemLabel(label.to_string()));
    }
    let cert = Certificate::from_der(doc.as_bytes())?;
    Ok((doc.into_vec(), cert))
}

/// Renders an optional caller-supplied value for inclusion in error messages. Absent values read
/// as `undefined`.
pub(crate) fn value_or_undefined(value: Option<&str>) -> String {
    value.unwrap_or("undefined").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_upper_case() {
        assert_eq!(buffer_to_hex(&[0x1b, 0xbb, 0x00, 0xff]), "1BBB00FF");
        assert_eq!(buffer_to_hex(&[]), "");
    }

    #[test]
    fn thumbprint_normalization() {
        assert_eq!(normalize_thumbprint("1b:bb:70"), "1BBB70");
        assert_eq!(normalize_thumbprint(" 1b bb 70 "), "1BBB70");
        assert_eq!(normalize_thumbprint("1BBB70"), "1BBB70");
    }
}
