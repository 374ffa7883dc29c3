//! Core types and signature bookkeeping for the muon self-test library.
//!
//! This crate contains the host-testable foundation of the engine: the
//! identifier newtypes, the shared error taxonomy, signature records, the
//! injectable comparison policy, and the per-core [`SignatureStore`].
//! Everything here is plain data and bounded arrays — no hardware access,
//! no allocation, no internal threading — so it can be exercised with
//! `cargo test` on the host exactly as it runs on a bare-metal target.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]

pub mod error;
pub mod id;
pub mod sig;
pub mod store;
pub mod verify;

pub use error::SelfTestError;
pub use id::CoreId;
pub use sig::{FailedTest, RecordFlags, Signature, SignatureRecord, TestSpace};
pub use store::SignatureStore;
pub use verify::{AcceptAll, GoldenTable, SignatureVerifier};
