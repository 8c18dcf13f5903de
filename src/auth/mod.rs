//! Request authentication for the Weebly Cloud API.
//!
//! The API authenticates each request with two headers: the public key
//! (`X-Public-Key`) and an HMAC-SHA256 signature of the request
//! (`X-Signed-Request-Hash`). This module computes the signature.
//!
//! # Overview
//!
//! - [`RequestSigner`]: Signs `(method, path, body)` triples with the secret key
//! - [`SignatureEncoding`]: Raw or hex digest before base64 encoding
//! - [`EMPTY_BODY`]: The `[]` placeholder signed for body-less requests

mod signer;

pub use signer::{
    compute_signature_base64, compute_signature_hex, RequestSigner, SignatureEncoding, EMPTY_BODY,
};
