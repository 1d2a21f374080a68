//! Instruction handlers for the consent registry

pub mod initialize_record;
pub mod create_consent;
pub mod revoke_consent;
pub mod anchor_audit_hash;
pub mod set_policy;
pub mod query;

pub use initialize_record::*;
pub use create_consent::*;
pub use revoke_consent::*;
pub use anchor_audit_hash::*;
pub use set_policy::*;
pub use query::*;
