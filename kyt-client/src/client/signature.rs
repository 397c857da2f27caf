//! Request signing for the KYT API.
//!
//! Every call carries a `SIGN` header: the uppercase hex MD5 digest of a
//! canonical string built from the request envelope,
//!
//! ```text
//! appId={appId}&method={method}&params={address={address}, platform={platform}}&timestamp={timestamp}&url={url}&key={appSecret}
//! ```
//!
//! Only the `address` and `platform` query parameters take part in the
//! signature, whatever else the query holds.

use md5::{Digest, Md5};
use reqwest::Method;
use std::fmt;
use time::OffsetDateTime;

/// Ordered query parameters of a KYT request.
///
/// The first two pairs are always `platform` and `address`. Extra pairs are
/// sent on the wire but are not signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create the parameters for an address lookup
    pub fn new(platform: impl Into<String>, address: impl Into<String>) -> Self {
        QueryParams(vec![
            ("platform".to_string(), platform.into()),
            ("address".to_string(), address.into()),
        ])
    }

    /// Append an extra parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    /// The `platform` value, e.g. `eth`
    pub fn platform(&self) -> &str {
        &self.0[0].1
    }

    /// The `address` value
    pub fn address(&self) -> &str {
        &self.0[1].1
    }

    /// All pairs in insertion order
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// The fields of a single request that feed the signature and the headers
#[derive(Debug, Clone)]
pub struct RequestEnvelope<'a> {
    /// The application id
    pub app_id: &'a str,
    /// The HTTP verb
    pub method: &'a Method,
    /// The query parameters
    pub params: &'a QueryParams,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
    /// The endpoint path, relative to the API root
    pub url: &'a str,
    /// The application secret
    pub key: &'a str,
}

impl RequestEnvelope<'_> {
    /// The string that gets digested into the signature
    pub fn canonical_string(&self) -> String {
        format!(
            "appId={}&method={}&params={{address={}, platform={}}}&timestamp={}&url={}&key={}",
            self.app_id,
            self.method.as_str(),
            self.params.address(),
            self.params.platform(),
            self.timestamp,
            self.url,
            self.key,
        )
    }

    /// Sign the envelope
    pub fn sign(&self) -> Signature {
        compute_signature(self)
    }
}

/// A 32 character uppercase hex MD5 digest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// The signature as sent in the `SIGN` header
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compute the signature of a request envelope
pub fn compute_signature(envelope: &RequestEnvelope<'_>) -> Signature {
    let digest = Md5::digest(envelope.canonical_string().as_bytes());
    Signature(hex::encode_upper(digest))
}

/// Current Unix time in milliseconds
pub fn timestamp_millis() -> u64 {
    let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
    u64::try_from(millis).unwrap_or_default()
}
