//! HMAC request signing for the Weebly Cloud API.
//!
//! Every request carries an `X-Signed-Request-Hash` header computed as
//!
//! ```text
//! base64(HMAC-SHA256(secret_key, METHOD + "\n" + path + "\n" + canonical_body))
//! ```
//!
//! where `path` is the request path without domain or query string, and
//! `canonical_body` is the JSON body for POST/PUT/PATCH or the literal
//! placeholder `[]` for GET/DELETE (which send no body at all). The query
//! string is never part of the signed content.
//!
//! # Example
//!
//! ```rust
//! use weebly_cloud::auth::{RequestSigner, SignatureEncoding};
//! use weebly_cloud::{HttpMethod, SecretKey};
//!
//! let signer = RequestSigner::new(SecretKey::new("secret").unwrap(), SignatureEncoding::RawDigest);
//! let signature = signer.sign(HttpMethod::Get, "user/123/site", None);
//! assert_eq!(signature, "elmYOUt+h3RdylVUoKD7h2Yo8hKvXxbAADPaOVItKT8=");
//! ```

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;

use crate::clients::HttpMethod;
use crate::config::SecretKey;

type HmacSha256 = Hmac<Sha256>;

/// Canonical body used in the signed content when no body bytes are sent.
pub const EMPTY_BODY: &str = "[]";

/// How the HMAC digest is turned into the header value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SignatureEncoding {
    /// Base64 of the raw 32-byte digest.
    #[default]
    RawDigest,
    /// Base64 of the lowercase hex digest, as emitted by the legacy SDKs.
    HexDigest,
}

/// Computes request signatures with a secret key.
///
/// Signing is a pure function of `(method, path, body)`: the same inputs
/// always produce the same signature.
#[derive(Clone, Debug)]
pub struct RequestSigner {
    secret_key: SecretKey,
    encoding: SignatureEncoding,
}

impl RequestSigner {
    /// Creates a signer for the given secret key.
    #[must_use]
    pub const fn new(secret_key: SecretKey, encoding: SignatureEncoding) -> Self {
        Self {
            secret_key,
            encoding,
        }
    }

    /// Returns the digest encoding in use.
    #[must_use]
    pub const fn encoding(&self) -> SignatureEncoding {
        self.encoding
    }

    /// Returns the canonical body text for a request.
    ///
    /// Body-carrying methods serialize their parameters as a JSON object; an
    /// absent or empty parameter map is rendered as `[]`. Methods without a
    /// body always use the `[]` placeholder, whatever `body` holds.
    #[must_use]
    pub fn canonical_body(method: HttpMethod, body: Option<&Map<String, Value>>) -> String {
        match body {
            Some(params) if method.has_body() && !params.is_empty() => {
                Value::Object(params.clone()).to_string()
            }
            _ => EMPTY_BODY.to_string(),
        }
    }

    /// Returns the exact string that is signed.
    #[must_use]
    pub fn string_to_sign(method: HttpMethod, path: &str, canonical_body: &str) -> String {
        format!("{}\n{path}\n{canonical_body}", method.as_str())
    }

    /// Signs a request described by its method, path and body parameters.
    #[must_use]
    pub fn sign(&self, method: HttpMethod, path: &str, body: Option<&Map<String, Value>>) -> String {
        let canonical_body = Self::canonical_body(method, body);
        self.sign_canonical(method, path, &canonical_body)
    }

    /// Signs a request whose body has already been canonicalized.
    #[must_use]
    pub fn sign_canonical(&self, method: HttpMethod, path: &str, canonical_body: &str) -> String {
        let message = Self::string_to_sign(method, path, canonical_body);
        let secret = self.secret_key.as_ref();
        match self.encoding {
            SignatureEncoding::RawDigest => compute_signature_base64(message.as_bytes(), secret),
            SignatureEncoding::HexDigest => {
                STANDARD.encode(compute_signature_hex(message.as_bytes(), secret))
            }
        }
    }
}

fn mac_for(message: &[u8], secret: &str) -> HmacSha256 {
    // HMAC accepts any key size, so this never panics
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    mac
}

/// Computes an HMAC-SHA256 signature and returns the base64-encoded raw digest.
#[must_use]
pub fn compute_signature_base64(message: &[u8], secret: &str) -> String {
    STANDARD.encode(mac_for(message, secret).finalize().into_bytes())
}

/// Computes an HMAC-SHA256 signature and returns the lowercase hex digest.
#[must_use]
pub fn compute_signature_hex(message: &[u8], secret: &str) -> String {
    hex::encode(mac_for(message, secret).finalize().into_bytes())
}

mod hex {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        let bytes = bytes.as_ref();
        let mut result = String::with_capacity(bytes.len() * 2);
        for &byte in bytes {
            result.push(HEX_CHARS[(byte >> 4) as usize] as char);
            result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
        }
        result
    }
}
