//! Ed25519 signature checks for inbound Discord interactions.

use crate::errors::{Error, Result};
use ed25519_dalek::{Signature, VerifyingKey};

/// Verifies interaction payloads against the application's fixed public key.
///
/// Built once at startup; a malformed configured key prevents the process
/// from starting at all.
pub struct InteractionVerifier {
    key: VerifyingKey,
}

impl InteractionVerifier {
    /// Parses the hex-encoded public key from configuration.
    pub fn new(public_key_hex: &str) -> Result<Self> {
        let bytes = hex::decode(public_key_hex)
            .map_err(|_| Error::Config("DISCORD_PUBLIC_KEY is not valid hex".to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| Error::Config("DISCORD_PUBLIC_KEY must decode to 32 bytes".to_string()))?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|_| Error::Config("DISCORD_PUBLIC_KEY is not a valid Ed25519 key".to_string()))?;
        Ok(Self { key })
    }

    /// Checks the detached signature over `timestamp || body`.
    ///
    /// Returns `false` for a missing or malformed header as well as for a
    /// signature mismatch; it never errors. `body` must be the raw request
    /// bytes - re-serializing the parsed payload can change them and
    /// invalidate the signature.
    #[must_use]
    pub fn verify(&self, signature: Option<&str>, timestamp: Option<&str>, body: &[u8]) -> bool {
        let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
            return false;
        };
        let Ok(signature_bytes) = hex::decode(signature) else {
            return false;
        };
        let Ok(signature) = Signature::from_slice(&signature_bytes) else {
            return false;
        };
        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);
        self.key.verify_strict(&message, &signature).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn test_keypair() -> (SigningKey, InteractionVerifier) {
        let signing = SigningKey::from_bytes(&[7u8; 32]);
        let verifier = InteractionVerifier::new(&hex::encode(signing.verifying_key().as_bytes()))
            .unwrap();
        (signing, verifier)
    }

    fn sign(signing: &SigningKey, timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(signing.sign(&message).to_bytes())
    }

    #[test]
    fn accepts_a_genuine_signature() {
        let (signing, verifier) = test_keypair();
        let body = br#"{"type":1}"#;
        let signature = sign(&signing, "1700000000", body);
        assert!(verifier.verify(Some(&signature), Some("1700000000"), body));
    }

    #[test]
    fn rejects_missing_headers() {
        let (signing, verifier) = test_keypair();
        let body = br#"{"type":1}"#;
        let signature = sign(&signing, "1700000000", body);
        assert!(!verifier.verify(None, Some("1700000000"), body));
        assert!(!verifier.verify(Some(&signature), None, body));
    }

    #[test]
    fn rejects_tampered_input() {
        let (signing, verifier) = test_keypair();
        let body = br#"{"type":1}"#;
        let signature = sign(&signing, "1700000000", body);
        // wrong timestamp
        assert!(!verifier.verify(Some(&signature), Some("1700000001"), body));
        // wrong body
        assert!(!verifier.verify(Some(&signature), Some("1700000000"), br#"{"type":2}"#));
        // garbage signature
        assert!(!verifier.verify(Some("zz"), Some("1700000000"), body));
    }

    #[test]
    fn malformed_public_key_is_a_config_error() {
        assert!(matches!(
            InteractionVerifier::new("deadbeef"),
            Err(Error::Config(_))
        ));
    }
}
