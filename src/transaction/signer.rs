//! Transaction signing with network binding.
//!
//! The signature input is the generation hash followed by the signable
//! bytes, so a payload verifies only against the network whose hash it
//! was signed with. Announcing on the wrong network fails verification
//! instead of spending funds.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::account::keypair::Account;
use crate::network::types::GenerationHash;
use crate::transaction::builder::UnsignedTransfer;
use crate::transaction::types::{Hash256, SignedTransfer};

/// Sign an unsigned transfer against one network's generation hash.
///
/// The resulting payload layout is `signable bytes ‖ signature ‖ signer
/// public key`; the transaction hash covers all of those plus the
/// generation hash, so the same fields signed for another network hash to
/// a different transaction.
pub fn sign_transfer(
    unsigned: &UnsignedTransfer,
    account: &Account,
    generation_hash: &GenerationHash,
) -> SignedTransfer {
    let signable = unsigned.signable_bytes();

    let mut signing_input = Vec::with_capacity(32 + signable.len());
    signing_input.extend_from_slice(generation_hash.as_bytes());
    signing_input.extend_from_slice(&signable);
    let signature = account.sign(&signing_input);

    let public_key = account.public_key();

    let mut payload = Vec::with_capacity(signable.len() + 96);
    payload.extend_from_slice(&signable);
    payload.extend_from_slice(&signature.to_bytes());
    payload.extend_from_slice(&public_key);

    let mut hasher = Sha256::new();
    hasher.update(signature.to_bytes());
    hasher.update(public_key);
    hasher.update(generation_hash.as_bytes());
    hasher.update(&signable);
    let hash = Hash256(hasher.finalize().into());

    tracing::debug!(
        hash = %hash,
        size = payload.len(),
        "Signed transfer"
    );

    SignedTransfer {
        payload,
        hash,
        signer_public_key: account.public_key_hex(),
        generation_hash: *generation_hash,
        deadline: unsigned.deadline,
    }
}

/// Verify a serialized payload against a network's generation hash.
///
/// Returns false for truncated payloads, unparsable keys, or signatures
/// produced under any other generation hash.
pub fn verify_payload(payload: &[u8], generation_hash: &GenerationHash) -> bool {
    if payload.len() < 96 {
        return false;
    }
    let (signable, suffix) = payload.split_at(payload.len() - 96);
    let (sig_bytes, key_bytes) = suffix.split_at(64);

    let signature = match <[u8; 64]>::try_from(sig_bytes) {
        Ok(bytes) => Signature::from_bytes(&bytes),
        Err(_) => return false,
    };
    let key: [u8; 32] = match key_bytes.try_into() {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let verifying_key = match VerifyingKey::from_bytes(&key) {
        Ok(vk) => vk,
        Err(_) => return false,
    };

    let mut signing_input = Vec::with_capacity(32 + signable.len());
    signing_input.extend_from_slice(generation_hash.as_bytes());
    signing_input.extend_from_slice(signable);

    verifying_key.verify(&signing_input, &signature).is_ok()
}
