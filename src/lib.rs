//! # devcert - Self-Signed Certificates for Local Development
//!
//! devcert issues a disposable TLS identity, an unencrypted private key and a
//! self-signed X.509 certificate, so a development server can speak HTTPS
//! without a certificate authority. It is built entirely on the RustCrypto
//! crates; there is no dependency on OpenSSL or ring outside of tests.
//!
//! ## What gets issued
//!
//! With the default [`IssuerConfig`]:
//! - an **RSA-2048** key (public exponent 65537) in PKCS#1 PEM
//! - subject and issuer `C=CN, ST=Beijing, L=Beijing, O=Dev, CN=localhost`
//! - a random 20-octet serial number
//! - validity from the moment of issuance for **365 days**
//! - a non-critical Subject Alternative Name extension with `localhost` and `*.localhost`
//! - a **SHA-256 with RSA** self-signature
//!
//! All of it can be changed through the builder; ECDSA P-256 keys and PKCS#8
//! output are also available.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use devcert::{IssuerConfig, issue_self_signed, output::write_identity};
//!
//! # fn main() -> Result<(), devcert::error::DevCertError> {
//! let identity = issue_self_signed(&IssuerConfig::default())?;
//! let paths = write_identity(std::path::Path::new("ssl"), &identity)?;
//! println!("certificate: {}", paths.certificate.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Reproducible issuance
//!
//! Randomness and time are injected, so tests can pin both:
//!
//! ```rust,no_run
//! use devcert::issuer::{FixedClock, IssuerConfig, issue_self_signed_with};
//! use time::OffsetDateTime;
//!
//! # fn main() -> Result<(), devcert::error::DevCertError> {
//! let clock = FixedClock(OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap());
//! let identity = issue_self_signed_with(&IssuerConfig::default(), &mut rand_core::OsRng, &clock)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Checking an issued identity
//!
//! ```rust,no_run
//! use devcert::{IssuerConfig, issue_self_signed};
//!
//! # fn main() -> Result<(), devcert::error::DevCertError> {
//! let parsed = issue_self_signed(&IssuerConfig::default())?.parse()?;
//! parsed.verify()?;
//! let (san, critical) = parsed.certificate.subject_alt_name()?.unwrap();
//! assert_eq!(san.names, vec!["localhost", "*.localhost"]);
//! assert!(!critical);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`issuer`]: configuration and the issuance pipeline
//! - [`key`]: key generation, PEM import/export, signing and verification
//! - [`cert`]: certificate signing, encoding/decoding and extensions
//! - [`identity`]: the issued artifacts and their decoded form
//! - [`output`]: writing artifacts to disk
//! - [`error`]: error types
//! - [`tbs_certificate`]: low-level certificate structure manipulation

pub mod cert;
pub mod error;
pub mod identity;
pub mod issuer;
pub mod key;
pub mod output;
pub mod tbs_certificate;

pub use error::DevCertError;
pub use identity::{IssuedIdentity, ParsedIdentity};
pub use issuer::{IssuerConfig, issue_self_signed};
