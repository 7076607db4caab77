pub mod extensions;
pub mod params;

use der::asn1::{Any, BitString};
use der::oid::ObjectIdentifier;
use der::{Decode, DecodePem, Encode, EncodePem};
use extensions::{SubjectAltName, ToAndFromX509Extension};
use params::ExtensionParam;
use x509_cert::certificate::CertificateInner;
use x509_cert::spki::AlgorithmIdentifierOwned;

use crate::error::{DevCertError, Result};
use crate::key::{KeyPair, PublicKey};
use crate::tbs_certificate::TbsCertificate;

/// PEM label of an X.509 certificate.
pub const CERTIFICATE_LABEL: &str = "CERTIFICATE";

/// Represents the supported signature algorithms for certificates.
///
/// This enum provides a mapping to the corresponding OIDs for each algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    /// SHA-256 with RSA encryption.
    Sha256WithRSA,
    /// SHA-384 with RSA encryption.
    Sha384WithRSA,
    /// SHA-512 with RSA encryption.
    Sha512WithRSA,
    /// SHA-256 with ECDSA.
    Sha256WithECDSA,
}

impl SignatureAlgorithm {
    pub fn oid(&self) -> ObjectIdentifier {
        match self {
            SignatureAlgorithm::Sha256WithRSA => const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::Sha384WithRSA => const_oid::db::rfc5912::SHA_384_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::Sha512WithRSA => const_oid::db::rfc5912::SHA_512_WITH_RSA_ENCRYPTION,
            SignatureAlgorithm::Sha256WithECDSA => const_oid::db::rfc5912::ECDSA_WITH_SHA_256,
        }
    }

    /// Determine signature algorithm based on OID
    pub fn from_oid(oid: &ObjectIdentifier) -> Result<Self> {
        match *oid {
            const_oid::db::rfc5912::SHA_256_WITH_RSA_ENCRYPTION => Ok(Self::Sha256WithRSA),
            const_oid::db::rfc5912::SHA_384_WITH_RSA_ENCRYPTION => Ok(Self::Sha384WithRSA),
            const_oid::db::rfc5912::SHA_512_WITH_RSA_ENCRYPTION => Ok(Self::Sha512WithRSA),
            const_oid::db::rfc5912::ECDSA_WITH_SHA_256 => Ok(Self::Sha256WithECDSA),
            other => Err(DevCertError::DecodingError(format!(
                "Unsupported signature algorithm {other}"
            ))),
        }
    }
}

impl From<SignatureAlgorithm> for AlgorithmIdentifierOwned {
    /// RSA identifiers carry explicit NULL parameters (RFC 4055); ECDSA ones
    /// omit them (RFC 5758).
    fn from(value: SignatureAlgorithm) -> Self {
        let parameters = match value {
            SignatureAlgorithm::Sha256WithECDSA => None,
            _ => Some(Any::null()),
        };
        AlgorithmIdentifierOwned {
            oid: value.oid(),
            parameters,
        }
    }
}

/// Represents a signed X.509 certificate.
///
/// This struct provides methods to encode the certificate into DER or PEM formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    /// The inner representation of the certificate.
    pub inner: CertificateInner,
}

impl Certificate {
    /// Signs `tbs` with `key` and wraps the result.
    ///
    /// The signature covers the DER encoding of the TBS certificate, and the
    /// outer algorithm identifier repeats the one inside it.
    pub fn sign(tbs: &TbsCertificate, key: &KeyPair) -> Result<Self> {
        let tbs_certificate = tbs.to_tbs_certificate_inner()?;
        let tbs_der = tbs_certificate.to_der()?;
        let signature = key.sign_data(&tbs_der, &tbs.signature_algorithm)?;

        let inner = CertificateInner {
            tbs_certificate,
            signature_algorithm: tbs.signature_algorithm.into(),
            signature: BitString::from_bytes(&signature)?,
        };
        Ok(Self { inner })
    }

    /// Encodes the certificate into DER format.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        self.inner
            .to_der()
            .map_err(|e| DevCertError::EncodingError(e.to_string()))
    }

    /// Encodes the certificate into PEM format.
    pub fn to_pem(&self) -> Result<String> {
        self.inner
            .to_pem(der::pem::LineEnding::LF)
            .map_err(|e| DevCertError::EncodingError(e.to_string()))
    }

    /// Decodes a DER-encoded certificate.
    pub fn from_der(der_bytes: &[u8]) -> Result<Self> {
        let inner = CertificateInner::from_der(der_bytes)
            .map_err(|e| DevCertError::DecodingError(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Decodes a PEM-encoded certificate.
    pub fn from_pem(pem: impl AsRef<[u8]>) -> Result<Self> {
        let inner = CertificateInner::from_pem(pem)
            .map_err(|e| DevCertError::DecodingError(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Decodes the TBS portion into its structured form.
    pub fn tbs_certificate(&self) -> Result<TbsCertificate> {
        TbsCertificate::from_tbs_certificate_inner(&self.inner.tbs_certificate)
    }

    /// Returns the SAN extension and its criticality, if present.
    pub fn subject_alt_name(&self) -> Result<Option<(SubjectAltName, bool)>> {
        self.inner
            .tbs_certificate
            .extensions
            .iter()
            .flatten()
            .find(|ext| ext.extn_id == SubjectAltName::OID)
            .map(|ext| {
                let param = ExtensionParam {
                    oid: ext.extn_id,
                    critical: ext.critical,
                    value: ext.extn_value.as_bytes().to_vec(),
                };
                param
                    .to_extension::<SubjectAltName>()
                    .map(|san| (san, param.critical))
            })
            .transpose()
    }

    /// Checks that the certificate is self-issued and that its signature
    /// verifies under its own public key.
    pub fn verify_self_signed(&self) -> Result<()> {
        let tbs = &self.inner.tbs_certificate;
        if tbs.issuer != tbs.subject {
            return Err(DevCertError::VerificationError(format!(
                "issuer {} differs from subject {}",
                tbs.issuer, tbs.subject
            )));
        }
        if self.inner.signature_algorithm != tbs.signature {
            return Err(DevCertError::VerificationError(
                "outer and inner signature algorithms differ".to_string(),
            ));
        }

        let algorithm = SignatureAlgorithm::from_oid(&tbs.signature.oid)?;
        let public_key = PublicKey::from_x509spki(&tbs.subject_public_key_info)?;
        let signature = self.inner.signature.as_bytes().ok_or_else(|| {
            DevCertError::VerificationError("signature has unused bits".to_string())
        })?;
        let tbs_der = tbs
            .to_der()
            .map_err(|e| DevCertError::EncodingError(e.to_string()))?;

        public_key.verify(&algorithm, &tbs_der, signature)
    }
}
