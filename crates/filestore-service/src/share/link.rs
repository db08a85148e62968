//! Share token generation.

use rand::Rng;

/// Random bytes behind each share token.
const TOKEN_BYTES: usize = 32;

/// Generates share link tokens and the URLs that carry them.
#[derive(Debug, Clone)]
pub struct LinkService {
    accept_url_base: String,
}

impl LinkService {
    /// Creates a link service whose URLs point at `accept_url_base`.
    pub fn new(accept_url_base: impl Into<String>) -> Self {
        Self {
            accept_url_base: accept_url_base.into(),
        }
    }

    /// Generates a cryptographically secure random token, hex-encoded.
    pub fn generate_token(&self) -> String {
        let mut rng = rand::thread_rng();
        let bytes: Vec<u8> = (0..TOKEN_BYTES).map(|_| rng.r#gen()).collect();
        hex::encode(&bytes)
    }

    /// The link a recipient follows to accept `token`.
    pub fn accept_url(&self, token: &str) -> String {
        let separator = if self.accept_url_base.contains('?') { '&' } else { '?' };
        format!("{}{separator}token={token}", self.accept_url_base)
    }
}

mod hex {
    /// Lowercase hex encoding.
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}
