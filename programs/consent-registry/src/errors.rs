//! Error definitions for the consent registry

use anchor_lang::prelude::*;

#[error_code]
pub enum ConsentRegistryError {
    #[msg("Invalid fingerprint: must be non-empty printable ASCII without whitespace")]
    InvalidFingerprint,

    #[msg("Fingerprint is too long (max 128 characters)")]
    FingerprintTooLong,

    #[msg("Unauthorized: caller is not permitted by the record's policy")]
    Unauthorized,

    #[msg("Consent record has not been created yet")]
    NotInitialized,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
