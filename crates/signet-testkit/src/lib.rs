//! # Signet Testkit
//!
//! Testing utilities for Signet.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known addresses, messages and signatures for cross-platform verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: An in-memory keyring and a ready-made signing account
//!
//! ## Golden Vectors
//!
//! ```rust
//! use signet_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, detail) in verify_all_vectors() {
//!     assert!(matches, "{}: {}", name, detail);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use signet_testkit::generators::{public_key, scheme};
//!
//! proptest! {
//!     #[test]
//!     fn address_roundtrip(key in public_key(), scheme in scheme()) {
//!         let address = scheme.encode(&key);
//!         prop_assert_eq!(scheme.decode(address.as_str()).unwrap(), key);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use signet_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::with_seed([0x42; 32]);
//! let envelope = fixture.sign(7, b"transfer").unwrap();
//! assert_eq!(envelope.signature().len(), 64);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, KeyringError, MemoryKeyring, TestFixture};
pub use generators::CallParams;
pub use vectors::{
    address_vectors, signing_vectors, verify_all_vectors, AddressVector, SigningVector,
};
