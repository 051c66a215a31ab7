/// Signature scheme and key material for [`JwtTokenVerifier`](crate::JwtTokenVerifier)
#[derive(Debug, Clone)]
pub enum JwtAlgorithm {
    /// HMAC with SHA-256 (shared secret)
    HS256 { secret: Vec<u8> },
    /// RSA with SHA-256 (provider's public key, PEM encoded)
    RS256 { public_key_pem: String },
}
