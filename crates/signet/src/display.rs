//! Helpers for showing addresses to people.
//!
//! None of this is used by the codec or the pipeline.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use signet_core::{
    Address, AddressScheme, CodecError, PublicKey, PLACEHOLDER_ADDRESS, PLACEHOLDER_SHORT,
};

/// Characters kept on each side of a shortened address.
pub const SHORT_EDGE: usize = 7;

/// Shorten an address to its first and last seven characters.
///
/// Text of fourteen characters or fewer comes back unchanged.
pub fn shorten(address: &str) -> String {
    let count = address.chars().count();
    if count <= SHORT_EDGE * 2 {
        return address.to_string();
    }

    let head: String = address.chars().take(SHORT_EDGE).collect();
    let tail: String = address.chars().skip(count - SHORT_EDGE).collect();
    format!("{}…{}", head, tail)
}

/// Lookup of accounts the caller already keeps locally.
pub trait KnownAccounts {
    fn has(&self, address: &Address) -> bool;
}

impl<S: BuildHasher> KnownAccounts for HashSet<Address, S> {
    fn has(&self, address: &Address) -> bool {
        self.contains(address)
    }
}

impl KnownAccounts for BTreeSet<Address> {
    fn has(&self, address: &Address) -> bool {
        self.contains(address)
    }
}

/// What a wallet shows for a typed or stored address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSummary {
    /// Canonical address, or [`PLACEHOLDER_ADDRESS`] when the input is invalid.
    pub address: String,
    /// Shortened form of `address`.
    pub short: String,
    pub public_key: Option<PublicKey>,
    pub is_valid: bool,
    /// Whether `known` already holds this address. Always false when invalid.
    pub is_known: bool,
    /// Why decoding failed, if it did.
    pub error: Option<CodecError>,
}

impl AddressSummary {
    /// Summarize user input.
    ///
    /// Surrounding whitespace is ignored. A valid address is re-encoded so the
    /// summary always carries the canonical text of the decoded key.
    pub fn from_input<K>(text: &str, scheme: &AddressScheme, known: &K) -> Self
    where
        K: KnownAccounts + ?Sized,
    {
        match scheme.decode(text.trim()) {
            Ok(key) => Self::from_public_key(&key, scheme, known),
            Err(e) => Self {
                address: PLACEHOLDER_ADDRESS.to_string(),
                short: PLACEHOLDER_SHORT.to_string(),
                public_key: None,
                is_valid: false,
                is_known: false,
                error: Some(e),
            },
        }
    }

    /// Summarize a key the caller already holds.
    pub fn from_public_key<K>(key: &PublicKey, scheme: &AddressScheme, known: &K) -> Self
    where
        K: KnownAccounts + ?Sized,
    {
        let address = scheme.encode(key);
        Self {
            short: shorten(address.as_str()),
            is_known: known.has(&address),
            address: address.into_string(),
            public_key: Some(*key),
            is_valid: true,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_ADDRESS: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

    fn alice() -> PublicKey {
        PublicKey::from_hex("d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d")
            .unwrap()
    }

    #[test]
    fn test_shorten() {
        assert_eq!(shorten(ALICE_ADDRESS), "5GrwvaE…HGKutQY");
        assert_eq!(shorten(PLACEHOLDER_ADDRESS), PLACEHOLDER_SHORT);
        assert_eq!(shorten("5Grwva"), "5Grwva");
        assert_eq!(shorten("12345678901234"), "12345678901234");
        assert_eq!(shorten("123456789012345"), "1234567…9012345");
    }

    #[test]
    fn test_summary_of_valid_input() {
        let known: HashSet<Address> = HashSet::new();
        let input = format!("  {} ", ALICE_ADDRESS);
        let summary = AddressSummary::from_input(&input, &AddressScheme::default(), &known);

        assert!(summary.is_valid);
        assert!(!summary.is_known);
        assert_eq!(summary.address, ALICE_ADDRESS);
        assert_eq!(summary.short, "5GrwvaE…HGKutQY");
        assert_eq!(summary.public_key, Some(alice()));
        assert_eq!(summary.error, None);
    }

    #[test]
    fn test_summary_of_known_account() {
        let mut known = BTreeSet::new();
        known.insert(ALICE_ADDRESS.parse::<Address>().unwrap());

        let summary = AddressSummary::from_input(ALICE_ADDRESS, &AddressScheme::default(), &known);
        assert!(summary.is_known);

        let other =
            AddressSummary::from_public_key(&PublicKey::ZERO, &AddressScheme::default(), &known);
        assert!(other.is_valid);
        assert!(!other.is_known);
    }

    #[test]
    fn test_summary_falls_back_to_placeholder() {
        let known: HashSet<Address> = HashSet::new();

        let mut typo = ALICE_ADDRESS.to_string();
        typo.pop();
        typo.push('Z');

        for input in ["", "not an address", typo.as_str()] {
            let summary = AddressSummary::from_input(input, &AddressScheme::default(), &known);
            assert!(!summary.is_valid);
            assert!(!summary.is_known);
            assert_eq!(summary.address, PLACEHOLDER_ADDRESS);
            assert_eq!(summary.short, PLACEHOLDER_SHORT);
            assert_eq!(summary.public_key, None);
            assert!(summary.error.is_some());
        }
    }

    #[test]
    fn test_summary_pins_network() {
        let known: HashSet<Address> = HashSet::new();
        let polkadot = AddressScheme::ss58(0).unwrap();

        let summary = AddressSummary::from_input(ALICE_ADDRESS, &polkadot, &known);
        assert!(!summary.is_valid);
        assert!(matches!(summary.error, Some(CodecError::InvalidAddressText(_))));

        let reencoded = AddressSummary::from_public_key(&alice(), &polkadot, &known);
        assert!(reencoded.is_valid);
        assert_eq!(polkadot.decode(&reencoded.address).unwrap(), alice());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn short_form_keeps_both_ends(bytes in any::<[u8; 32]>(), prefix in 0u8..64) {
                let scheme = AddressScheme::ss58(prefix).unwrap();
                let address = scheme.encode(&PublicKey::from_bytes(bytes));
                let text = address.as_str();
                let short = shorten(text);

                prop_assert_eq!(short.chars().count(), SHORT_EDGE * 2 + 1);
                prop_assert!(text.starts_with(&short[..SHORT_EDGE]));
                prop_assert!(short.ends_with(&text[text.len() - SHORT_EDGE..]));
            }
        }
    }
}
