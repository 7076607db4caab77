//! use devcert::error::DevCertError;

use std::path::PathBuf;

use thiserror::Error;

/// Represents errors that can occur while issuing, inspecting or writing a
/// development certificate.
///
/// Each variant maps to one stage of the pipeline so callers can tell the user
/// which step failed.
#[derive(Debug, Error)]
pub enum DevCertError {
    /// Key-pair generation failed: unsafe parameters or an unusable RNG.
    #[error("Key generation error: {0}")]
    KeyGenerationError(String),

    /// Error during data encoding.
    #[error("Failed to encode data: {0}")]
    EncodingError(String),

    /// The certificate could not be signed with the configured key and digest.
    #[error("Signing error: {0}")]
    SigningError(String),

    /// Error during data decoding.
    #[error("Failed to decode data: {0}")]
    DecodingError(String),

    /// Error due to invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A signature or key/certificate pairing did not check out.
    #[error("Verification failed: {0}")]
    VerificationError(String),

    /// Writing an artifact to disk failed.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DevCertError {
    /// Short name of the stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            DevCertError::KeyGenerationError(_) => "key generation",
            DevCertError::EncodingError(_) => "encoding",
            DevCertError::SigningError(_) => "signing",
            DevCertError::DecodingError(_) => "decoding",
            DevCertError::InvalidInput(_) => "configuration",
            DevCertError::VerificationError(_) => "verification",
            DevCertError::Io { .. } => "writing output",
        }
    }
}

pub type Result<T> = std::result::Result<T, DevCertError>;

impl From<der::Error> for DevCertError {
    /// DER failures while building a certificate are encoding failures; the
    /// decode paths map their errors explicitly.
    fn from(err: der::Error) -> Self {
        DevCertError::EncodingError(err.to_string())
    }
}

impl From<x509_cert::spki::Error> for DevCertError {
    fn from(err: x509_cert::spki::Error) -> Self {
        DevCertError::EncodingError(err.to_string())
    }
}

impl From<pkcs8::Error> for DevCertError {
    fn from(err: pkcs8::Error) -> Self {
        DevCertError::EncodingError(err.to_string())
    }
}

impl From<rsa::pkcs1::Error> for DevCertError {
    fn from(err: rsa::pkcs1::Error) -> Self {
        DevCertError::EncodingError(err.to_string())
    }
}

impl From<pem::PemError> for DevCertError {
    fn from(err: pem::PemError) -> Self {
        DevCertError::DecodingError(err.to_string())
    }
}
