//! Transaction import URIs.
//!
//! Pairs the serialized payload with the generation hash it was signed
//! for, so an external wallet reconstructing the transaction knows which
//! network it belongs to. Rendering the URI as a QR code is left to the
//! presentation layer.

use crate::transaction::types::SignedTransfer;

/// URI scheme for transaction import.
pub const URI_SCHEME: &str = "web+tipjar";

/// Render a signed transfer as an import URI.
pub fn transfer_uri(signed: &SignedTransfer) -> String {
    format!(
        "{}://transaction?data={}&generationHash={}",
        URI_SCHEME,
        signed.payload_hex(),
        signed.generation_hash
    )
}
