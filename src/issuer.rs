use bon::Builder;
use rand_core::{CryptoRngCore, RngCore};
use time::OffsetDateTime;

use crate::cert::Certificate;
use crate::cert::extensions::SubjectAltName;
use crate::cert::params::{DistinguishedName, ExtensionParam, SignatureDigest, Validity};
use crate::error::{DevCertError, Result};
use crate::identity::IssuedIdentity;
use crate::key::{KeyAlgorithm, KeyFormat, KeyPair, PublicKey};
use crate::tbs_certificate::TbsCertificate;

/// Validity of an issued certificate when none is configured.
pub const DEFAULT_VALIDITY_DAYS: u32 = 365;

/// Width of generated serial numbers; RFC 5280 caps serials at 20 octets.
pub const SERIAL_NUMBER_LEN: usize = 20;

/// DNS names a development certificate covers by default.
pub fn default_dns_names() -> Vec<String> {
    vec!["localhost".to_string(), "*.localhost".to_string()]
}

/// Everything that shapes an issued certificate.
///
/// Built once and passed whole to [`issue_self_signed`]; the defaults
/// describe an RSA-2048 certificate for `localhost` valid for a year.
///
/// ```
/// use devcert::issuer::IssuerConfig;
///
/// let config = IssuerConfig::builder()
///     .validity_days(30)
///     .dns_names(vec!["myapp.localhost".to_string()])
///     .build();
/// assert_eq!(config.subject.common_name, "localhost");
/// ```
#[derive(Clone, Debug, Builder, PartialEq, Eq)]
pub struct IssuerConfig {
    #[builder(default)]
    pub key_algorithm: KeyAlgorithm,
    #[builder(default)]
    pub key_format: KeyFormat,
    /// Subject and issuer of the certificate.
    #[builder(default)]
    pub subject: DistinguishedName,
    #[builder(default = DEFAULT_VALIDITY_DAYS)]
    pub validity_days: u32,
    /// Subject alternative DNS names, in order. Empty omits the extension.
    #[builder(default = default_dns_names())]
    pub dns_names: Vec<String>,
    #[builder(default)]
    pub digest: SignatureDigest,
}

impl Default for IssuerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Source of the issuance time.
pub trait Clock {
    fn now_utc(&self) -> OffsetDateTime;
}

/// Reads the system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Always reports the same instant.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now_utc(&self) -> OffsetDateTime {
        self.0
    }
}

/// Issues a self-signed certificate and its private key using the operating
/// system's RNG and the system clock.
pub fn issue_self_signed(config: &IssuerConfig) -> Result<IssuedIdentity> {
    issue_self_signed_with(config, &mut rand_core::OsRng, &SystemClock)
}

/// Issues a self-signed certificate and its private key.
///
/// All randomness (key material and serial number) comes from `rng` and the
/// clock is read exactly once. Nothing is returned unless both artifacts were
/// serialized.
pub fn issue_self_signed_with<R, C>(
    config: &IssuerConfig,
    rng: &mut R,
    clock: &C,
) -> Result<IssuedIdentity>
where
    R: CryptoRngCore,
    C: Clock + ?Sized,
{
    tracing::debug!(algorithm = ?config.key_algorithm, "generating key pair");
    let key = KeyPair::generate(config.key_algorithm, rng)?;
    let signature_algorithm = key.signature_algorithm(config.digest)?;

    let serial_number = random_serial_number(rng)?;
    let validity = Validity::starting_at(clock.now_utc(), config.validity_days)?;
    tracing::trace!(
        serial = ?serial_number,
        not_before = %validity.not_before,
        not_after = %validity.not_after,
        "assembling certificate"
    );

    let mut extensions = Vec::new();
    if !config.dns_names.is_empty() {
        let san = SubjectAltName {
            names: config.dns_names.clone(),
        };
        extensions.push(ExtensionParam::from_extension(&san, false)?);
    }

    let tbs = TbsCertificate {
        serial_number,
        signature_algorithm,
        issuer: config.subject.clone(),
        validity,
        subject: config.subject.clone(),
        subject_public_key: PublicKey::from_key_pair(&key),
        extensions,
    };

    tracing::debug!(algorithm = ?signature_algorithm, "self-signing certificate");
    let certificate = Certificate::sign(&tbs, &key)?;

    let private_key_pem = key.to_pem(config.key_format)?;
    let certificate_pem = certificate.to_pem()?;
    tracing::debug!(subject = %config.subject.common_name, "issued self-signed certificate");

    Ok(IssuedIdentity::new(
        private_key_pem.into_bytes(),
        certificate_pem.into_bytes(),
    ))
}

/// Draws a positive serial number of exactly [`SERIAL_NUMBER_LEN`] octets.
///
/// The top bit is cleared so the INTEGER is positive and the next one set so
/// the encoding never loses a leading octet, leaving 158 random bits.
pub fn random_serial_number<R: CryptoRngCore>(rng: &mut R) -> Result<Vec<u8>> {
    let mut serial = vec![0u8; SERIAL_NUMBER_LEN];
    rng.try_fill_bytes(&mut serial).map_err(|e| {
        DevCertError::KeyGenerationError(format!("random source unavailable: {e}"))
    })?;
    serial[0] &= 0x7f;
    serial[0] |= 0x40;
    Ok(serial)
}
