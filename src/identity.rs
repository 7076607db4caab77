use std::fmt;

use crate::cert::Certificate;
use crate::error::{DevCertError, Result};
use crate::key::{KeyFormat, KeyPair};

/// The two serialized artifacts of one issuance: an unencrypted PEM private
/// key and the matching PEM certificate.
#[derive(Clone, PartialEq, Eq)]
pub struct IssuedIdentity {
    private_key: Vec<u8>,
    certificate: Vec<u8>,
}

impl IssuedIdentity {
    pub fn new(private_key: Vec<u8>, certificate: Vec<u8>) -> Self {
        Self {
            private_key,
            certificate,
        }
    }

    pub fn private_key_pem(&self) -> &[u8] {
        &self.private_key
    }

    pub fn certificate_pem(&self) -> &[u8] {
        &self.certificate
    }

    /// Splits into `(private key, certificate)` bytes.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>) {
        (self.private_key, self.certificate)
    }

    /// Decodes both artifacts back into structured form.
    pub fn parse(&self) -> Result<ParsedIdentity> {
        ParsedIdentity::from_pem(&self.private_key, &self.certificate)
    }
}

impl fmt::Debug for IssuedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedIdentity")
            .field("private_key", &format_args!("<{} bytes>", self.private_key.len()))
            .field("certificate", &String::from_utf8_lossy(&self.certificate))
            .finish()
    }
}

/// A decoded key/certificate pair.
#[derive(Clone, Debug)]
pub struct ParsedIdentity {
    pub key: KeyPair,
    /// Format the key was stored in.
    pub key_format: KeyFormat,
    pub certificate: Certificate,
}

impl ParsedIdentity {
    pub fn from_pem(private_key: &[u8], certificate: &[u8]) -> Result<Self> {
        let key_pem = std::str::from_utf8(private_key)
            .map_err(|e| DevCertError::DecodingError(format!("private key is not UTF-8: {e}")))?;
        let (key, key_format) = KeyPair::from_pem(key_pem)?;
        let certificate = Certificate::from_pem(certificate)?;
        Ok(Self {
            key,
            key_format,
            certificate,
        })
    }

    /// Whether the certificate embeds the public half of `key`.
    pub fn key_matches_certificate(&self) -> Result<bool> {
        let key_spki = self.key.as_spki()?;
        Ok(key_spki
            == self
                .certificate
                .inner
                .tbs_certificate
                .subject_public_key_info)
    }

    /// Verifies the self-signature and that the key belongs to the certificate.
    pub fn verify(&self) -> Result<()> {
        self.certificate.verify_self_signed()?;
        if !self.key_matches_certificate()? {
            return Err(DevCertError::VerificationError(
                "private key does not match the certificate's public key".to_string(),
            ));
        }
        Ok(())
    }

    /// Re-encodes the private key in the format it was read from.
    pub fn key_to_pem(&self) -> Result<String> {
        self.key.to_pem(self.key_format)
    }
}
