use bon::Builder;
use const_oid::ObjectIdentifier;
use der::asn1::{Any, PrintableStringRef, SetOfVec, Utf8StringRef};
use time::{Duration, OffsetDateTime};
use x509_cert::attr::AttributeTypeAndValue;
use x509_cert::name::{RdnSequence, RelativeDistinguishedName};

use super::extensions::ToAndFromX509Extension;
use crate::error::{DevCertError, Result};

/// id-at-countryName
pub const COUNTRY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.6");
/// id-at-stateOrProvinceName
pub const STATE_OR_PROVINCE_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.8");
/// id-at-localityName
pub const LOCALITY_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.7");
/// id-at-organizationName
pub const ORGANIZATION_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.10");
/// id-at-commonName
pub const COMMON_NAME: ObjectIdentifier = ObjectIdentifier::new_unwrap("2.5.4.3");

/// Distinguished name used as both subject and issuer of a development
/// certificate.
///
/// Attributes are always encoded in the order country, state, locality,
/// organization, common name. Unset optional attributes are omitted.
///
/// # Fields
/// * `country` - The country (C), a two letter code.
/// * `state` - The state or province (ST).
/// * `locality` - The locality or city (L).
/// * `organization` - The organization (O).
/// * `common_name` - The common name (CN).
#[derive(Clone, Debug, Builder, PartialEq, Eq)]
pub struct DistinguishedName {
    pub country: Option<String>,
    pub state: Option<String>,
    pub locality: Option<String>,
    pub organization: Option<String>,
    pub common_name: String,
}

impl Default for DistinguishedName {
    fn default() -> Self {
        Self {
            country: Some("CN".to_string()),
            state: Some("Beijing".to_string()),
            locality: Some("Beijing".to_string()),
            organization: Some("Dev".to_string()),
            common_name: "localhost".to_string(),
        }
    }
}

impl DistinguishedName {
    /// Converts the distinguished name to an X.509 name, one attribute per RDN.
    ///
    /// The country is a `PrintableString` as X.520 requires; everything else
    /// is a `UTF8String`.
    pub fn as_x509_name(&self) -> Result<x509_cert::name::DistinguishedName> {
        let mut rdns = Vec::with_capacity(5);

        if let Some(country) = &self.country {
            let value = PrintableStringRef::new(country).map_err(|e| {
                DevCertError::InvalidInput(format!("country {country:?} is not printable: {e}"))
            })?;
            rdns.push(single_attribute_rdn(COUNTRY_NAME, Any::encode_from(&value)?)?);
        }
        for (oid, value) in [
            (STATE_OR_PROVINCE_NAME, &self.state),
            (LOCALITY_NAME, &self.locality),
            (ORGANIZATION_NAME, &self.organization),
        ] {
            if let Some(value) = value {
                rdns.push(single_attribute_rdn(oid, utf8_value(value)?)?);
            }
        }
        rdns.push(single_attribute_rdn(COMMON_NAME, utf8_value(&self.common_name)?)?);

        Ok(RdnSequence(rdns))
    }

    /// Creates a `DistinguishedName` from an X.509 name.
    ///
    /// Attributes other than the five this type models are ignored.
    pub fn from_x509_name(x509dn: &x509_cert::name::DistinguishedName) -> Result<Self> {
        let mut name = DistinguishedName {
            country: None,
            state: None,
            locality: None,
            organization: None,
            common_name: String::new(),
        };

        for attr in x509dn.0.iter().flat_map(|rdn| rdn.0.iter()) {
            let value = std::str::from_utf8(attr.value.value())
                .map_err(|e| DevCertError::DecodingError(e.to_string()))?
                .to_string();
            match attr.oid {
                COUNTRY_NAME => name.country = Some(value),
                STATE_OR_PROVINCE_NAME => name.state = Some(value),
                LOCALITY_NAME => name.locality = Some(value),
                ORGANIZATION_NAME => name.organization = Some(value),
                COMMON_NAME => name.common_name = value,
                _ => {}
            }
        }

        Ok(name)
    }
}

fn utf8_value(value: &str) -> Result<Any> {
    Ok(Any::encode_from(&Utf8StringRef::new(value)?)?)
}

fn single_attribute_rdn(oid: ObjectIdentifier, value: Any) -> Result<RelativeDistinguishedName> {
    let attribute = AttributeTypeAndValue { oid, value };
    Ok(RelativeDistinguishedName(SetOfVec::try_from(vec![attribute])?))
}

/// Digest used when self-signing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureDigest {
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

/// Certificate validity period.
///
/// This struct represents the `notBefore` and `notAfter` fields in a certificate.
///
/// # Fields
/// * `not_before` - The start of the validity period.
/// * `not_after` - The end of the validity period.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Validity {
    pub not_before: OffsetDateTime,
    pub not_after: OffsetDateTime,
}

impl Validity {
    /// Creates a validity period of `days` starting at `now`.
    ///
    /// `now` is truncated to whole seconds since X.509 times carry no
    /// fractional part; this keeps the encoded span exactly `days` long.
    pub fn starting_at(now: OffsetDateTime, days: u32) -> Result<Self> {
        let not_before = OffsetDateTime::from_unix_timestamp(now.unix_timestamp())
            .map_err(|e| DevCertError::InvalidInput(e.to_string()))?;
        let not_after = not_before
            .checked_add(Duration::days(i64::from(days)))
            .ok_or_else(|| {
                DevCertError::InvalidInput(format!("a validity of {days} days is out of range"))
            })?;
        Ok(Self {
            not_before,
            not_after,
        })
    }

    /// Length of the validity period.
    pub fn span(&self) -> Duration {
        self.not_after - self.not_before
    }

    /// Whether `instant` falls inside the period, both ends inclusive.
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.not_before <= instant && instant <= self.not_after
    }
}

/// Represents an X.509 extension.
///
/// # Fields
/// * `oid` - The object identifier of the extension.
/// * `critical` - Indicates if the extension is critical.
/// * `value` - The DER-encoded value of the extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtensionParam {
    pub oid: ObjectIdentifier,
    pub critical: bool,
    /// DER-encoded extension value
    pub value: Vec<u8>,
}

impl ExtensionParam {
    /// Creates an `ExtensionParam` from a specific extension.
    pub fn from_extension<E: ToAndFromX509Extension>(extension: &E, critical: bool) -> Result<Self> {
        Ok(Self {
            oid: E::OID,
            critical,
            value: extension.to_x509_extension_value()?,
        })
    }

    /// Decodes an `ExtensionParam` into a specific extension.
    pub fn to_extension<E: ToAndFromX509Extension>(&self) -> Result<E> {
        E::from_x509_extension_value(&self.value)
    }
}
