//! SS58 address codec.
//!
//! An address is the human-copyable form of a [`PublicKey`]:
//!
//! > base58(prefix || 32-byte-public-key || checksum)
//!
//! The prefix is a single byte identifying the network the address belongs
//! to. The checksum is the first `checksum_len` bytes of
//! `Blake2b-512("SS58PRE" || prefix || key)`. It catches copying mistakes:
//! decoding recomputes it and fails closed on any disagreement.
//!
//! Hash function, alphabet and widths are carried by an [`AddressScheme`]
//! value rather than hard-coded, so that another protocol version only needs
//! another scheme.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::crypto::blake2b_512;
use crate::error::{CodecError, Result};
use crate::types::{PublicKey, PUBLIC_KEY_LEN};

/// Context string hashed in front of every SS58 checksum preimage.
pub const SS58_CONTEXT: &[u8] = b"SS58PRE";

/// Prefix of the generic Substrate network. Addresses start with `5`.
pub const DEFAULT_PREFIX: u8 = 42;

/// Checksum width used for 32-byte keys.
pub const DEFAULT_CHECKSUM_LEN: usize = 2;

/// Prefixes at or above this value need a two-byte encoding, which this
/// codec does not produce.
pub const MAX_SINGLE_BYTE_PREFIX: u8 = 63;

/// Shown in place of an address while no valid one is available.
pub const PLACEHOLDER_ADDRESS: &str = "5xxxxxxxxxxxxxxx";

/// Short form of [`PLACEHOLDER_ADDRESS`].
pub const PLACEHOLDER_SHORT: &str = "5xxxxxx…xxxxxxx";

/// Layout version of an address scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemeVersion {
    /// Single-byte prefix, 32-byte key, truncated Blake2b-512 checksum.
    #[default]
    Ss58V1,
}

/// Hash function used to derive the checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecksumHash {
    /// `Blake2b-512("SS58PRE" || prefix || key)`.
    #[default]
    Ss58Blake2b512,
}

impl ChecksumHash {
    /// Full digest over the checksum preimage.
    fn digest(self, prefix: u8, body: &[u8]) -> [u8; 64] {
        match self {
            ChecksumHash::Ss58Blake2b512 => blake2b_512(&[SS58_CONTEXT, &[prefix], body]),
        }
    }
}

/// Base58 alphabet addresses are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressAlphabet {
    #[default]
    Bitcoin,
    Ripple,
    Flickr,
}

impl AddressAlphabet {
    fn as_bs58(self) -> &'static bs58::Alphabet {
        match self {
            AddressAlphabet::Bitcoin => bs58::Alphabet::BITCOIN,
            AddressAlphabet::Ripple => bs58::Alphabet::RIPPLE,
            AddressAlphabet::Flickr => bs58::Alphabet::FLICKR,
        }
    }
}

/// Serialized form of an [`AddressScheme`], validated on the way in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct SchemeParams {
    version: SchemeVersion,
    prefix: u8,
    checksum_len: usize,
    hash: ChecksumHash,
    alphabet: AddressAlphabet,
}

impl Default for SchemeParams {
    fn default() -> Self {
        AddressScheme::default().into()
    }
}

/// A versioned address format.
///
/// Every instance is valid: the prefix fits in one byte of the SS58 range and
/// the checksum width is between 1 and 64 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SchemeParams", into = "SchemeParams")]
pub struct AddressScheme {
    version: SchemeVersion,
    prefix: u8,
    checksum_len: usize,
    hash: ChecksumHash,
    alphabet: AddressAlphabet,
}

impl Default for AddressScheme {
    fn default() -> Self {
        Self {
            version: SchemeVersion::Ss58V1,
            prefix: DEFAULT_PREFIX,
            checksum_len: DEFAULT_CHECKSUM_LEN,
            hash: ChecksumHash::Ss58Blake2b512,
            alphabet: AddressAlphabet::Bitcoin,
        }
    }
}

impl AddressScheme {
    /// SS58 scheme for the given network prefix.
    pub fn ss58(prefix: u8) -> Result<Self> {
        let scheme = Self {
            prefix,
            ..Self::default()
        };
        scheme.validate()?;
        Ok(scheme)
    }

    /// Override the checksum width.
    pub fn with_checksum_len(mut self, checksum_len: usize) -> Result<Self> {
        self.checksum_len = checksum_len;
        self.validate()?;
        Ok(self)
    }

    /// Check the prefix and checksum width.
    ///
    /// Every constructor runs this, so a scheme obtained from this crate
    /// always passes.
    pub fn validate(&self) -> Result<()> {
        if self.prefix > MAX_SINGLE_BYTE_PREFIX {
            return Err(CodecError::UnsupportedPrefix(self.prefix));
        }
        if !(1..=64).contains(&self.checksum_len) {
            return Err(CodecError::InvalidScheme(format!(
                "checksum length must be within 1..=64, got {}",
                self.checksum_len
            )));
        }
        Ok(())
    }

    /// Override the alphabet.
    pub fn with_alphabet(mut self, alphabet: AddressAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn version(&self) -> SchemeVersion {
        self.version
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    pub fn checksum_len(&self) -> usize {
        self.checksum_len
    }

    pub fn alphabet(&self) -> AddressAlphabet {
        self.alphabet
    }

    /// Number of bytes an address of this scheme decodes to.
    pub fn decoded_len(&self) -> usize {
        1 + PUBLIC_KEY_LEN + self.checksum_len
    }

    /// Encode a public key.
    ///
    /// Deterministic: the same key always yields the same string.
    pub fn encode(&self, key: &PublicKey) -> Address {
        let digest = self.hash.digest(self.prefix, key.as_bytes());

        let mut raw = Vec::with_capacity(self.decoded_len());
        raw.push(self.prefix);
        raw.extend_from_slice(key.as_bytes());
        raw.extend_from_slice(&digest[..self.checksum_len]);

        Address {
            text: bs58::encode(raw)
                .with_alphabet(self.alphabet.as_bs58())
                .into_string(),
            scheme: *self,
        }
    }

    /// Encode raw key bytes, rejecting anything that is not exactly 32 bytes.
    pub fn encode_bytes(&self, key: &[u8]) -> Result<Address> {
        let key = PublicKey::try_from(key)?;
        Ok(self.encode(&key))
    }

    /// Encode a list of keys, preserving order.
    pub fn encode_many<'a, I>(&self, keys: I) -> Vec<Address>
    where
        I: IntoIterator<Item = &'a PublicKey>,
    {
        keys.into_iter().map(|key| self.encode(key)).collect()
    }

    /// Decode an address of this scheme's network back into its key.
    pub fn decode(&self, text: &str) -> Result<PublicKey> {
        let (prefix, key) = self.decode_network(text)?;
        if prefix != self.prefix {
            return Err(CodecError::InvalidAddressText(format!(
                "network prefix {} does not match expected {}",
                prefix, self.prefix
            )));
        }
        Ok(key)
    }

    /// Decode an address of any single-byte network, returning its prefix.
    ///
    /// Alphabet and checksum width still come from this scheme.
    pub fn decode_network(&self, text: &str) -> Result<(u8, PublicKey)> {
        if text.is_empty() {
            return Err(CodecError::InvalidAddressText("empty address".into()));
        }

        let raw = bs58::decode(text)
            .with_alphabet(self.alphabet.as_bs58())
            .into_vec()
            .map_err(|e| CodecError::InvalidAddressText(e.to_string()))?;

        if raw.len() != self.decoded_len() {
            return Err(CodecError::InvalidAddressText(format!(
                "expected {} decoded bytes, got {}",
                self.decoded_len(),
                raw.len()
            )));
        }

        let prefix = raw[0];
        if prefix > MAX_SINGLE_BYTE_PREFIX {
            return Err(CodecError::InvalidAddressText(format!(
                "unsupported network prefix {}",
                prefix
            )));
        }

        let (key_bytes, checksum) = raw[1..].split_at(PUBLIC_KEY_LEN);
        let key = PublicKey::try_from(key_bytes)?;

        let digest = self.hash.digest(prefix, key.as_bytes());
        if checksum != &digest[..self.checksum_len] {
            return Err(CodecError::ChecksumMismatch);
        }

        Ok((prefix, key))
    }

    /// Whether `text` decodes to a 32-byte key under this scheme.
    ///
    /// Callers deciding whether a string is a usable identity should use this
    /// instead of checking length or characters themselves.
    pub fn is_valid(&self, text: &str) -> bool {
        self.decode(text).is_ok()
    }
}

impl TryFrom<SchemeParams> for AddressScheme {
    type Error = CodecError;

    fn try_from(params: SchemeParams) -> Result<Self> {
        let scheme = AddressScheme::ss58(params.prefix)?
            .with_checksum_len(params.checksum_len)?
            .with_alphabet(params.alphabet);
        Ok(Self {
            version: params.version,
            hash: params.hash,
            ..scheme
        })
    }
}

impl From<AddressScheme> for SchemeParams {
    fn from(scheme: AddressScheme) -> Self {
        Self {
            version: scheme.version,
            prefix: scheme.prefix,
            checksum_len: scheme.checksum_len,
            hash: scheme.hash,
            alphabet: scheme.alphabet,
        }
    }
}

/// Encode with the default scheme.
pub fn encode(key: &PublicKey) -> Address {
    AddressScheme::default().encode(key)
}

/// Encode raw bytes with the default scheme.
pub fn encode_bytes(key: &[u8]) -> Result<Address> {
    AddressScheme::default().encode_bytes(key)
}

/// Decode with the default scheme.
pub fn decode(text: &str) -> Result<PublicKey> {
    AddressScheme::default().decode(text)
}

/// Validate with the default scheme.
pub fn is_valid(text: &str) -> bool {
    AddressScheme::default().is_valid(text)
}

/// A checksummed textual address, together with the scheme it was written in.
///
/// Values only come out of an encoder or a successful parse, and always
/// decode under their own [`Address::scheme`].
///
/// [`FromStr`] only knows the default alphabet and checksum width. Use
/// [`Address::parse`] for anything else. Serde keeps the scheme: addresses in
/// the default format serialize as a bare string, others as
/// `{"address": ..., "scheme": ...}`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address {
    text: String,
    scheme: AddressScheme,
}

impl Address {
    /// Parse `text` written with `scheme`'s alphabet and checksum width.
    ///
    /// Any single-byte network prefix is accepted; the returned address
    /// records the prefix it actually carries. Use [`AddressScheme::decode`]
    /// to pin the network.
    pub fn parse(text: &str, scheme: &AddressScheme) -> Result<Self> {
        let (prefix, _) = scheme.decode_network(text)?;
        Ok(Self {
            text: text.to_string(),
            scheme: AddressScheme { prefix, ..*scheme },
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }

    /// Scheme this address is written in, including its network prefix.
    pub fn scheme(&self) -> &AddressScheme {
        &self.scheme
    }

    /// Network prefix and key this address encodes.
    pub fn to_public_key(&self) -> Result<(u8, PublicKey)> {
        self.scheme.decode_network(&self.text)
    }

    fn has_default_format(&self) -> bool {
        AddressScheme {
            prefix: DEFAULT_PREFIX,
            ..self.scheme
        } == AddressScheme::default()
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.text)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl FromStr for Address {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self> {
        Address::parse(s, &AddressScheme::default())
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.text
    }
}

/// Wire form of an [`Address`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum AddressRepr {
    Text(String),
    WithScheme {
        address: String,
        scheme: AddressScheme,
    },
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let repr = if self.has_default_format() {
            AddressRepr::Text(self.text.clone())
        } else {
            AddressRepr::WithScheme {
                address: self.text.clone(),
                scheme: self.scheme,
            }
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let parsed = match AddressRepr::deserialize(deserializer)? {
            AddressRepr::Text(text) => text.parse::<Address>(),
            AddressRepr::WithScheme { address, scheme } => Address::parse(&address, &scheme),
        };
        parsed.map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE_HEX: &str = "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";
    const ALICE_ADDRESS: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";
    const ZERO_PREFIX_0: &str = "111111111111111111111111111111111HC1";
    const ZERO_PREFIX_42: &str = "5C4hrfjw9DjXZTzV3MwzrrAr9P1MJhSrvWGWqi1eSuyUpnhM";

    fn alice() -> PublicKey {
        PublicKey::from_hex(ALICE_HEX).unwrap()
    }

    /// Raw address bytes with a valid checksum over an arbitrary body.
    fn raw_address(prefix: u8, body: &[u8]) -> String {
        let digest = blake2b_512(&[SS58_CONTEXT, &[prefix], body]);
        let mut raw = vec![prefix];
        raw.extend_from_slice(body);
        raw.extend_from_slice(&digest[..2]);
        bs58::encode(raw).into_string()
    }

    #[test]
    fn test_known_addresses() {
        let zero_scheme = AddressScheme::ss58(0).unwrap();
        assert_eq!(zero_scheme.encode(&PublicKey::ZERO).as_str(), ZERO_PREFIX_0);
        assert_eq!(encode(&PublicKey::ZERO).as_str(), ZERO_PREFIX_42);
        assert_eq!(encode(&alice()).as_str(), ALICE_ADDRESS);
    }

    #[test]
    fn test_decode_known_addresses() {
        let zero_scheme = AddressScheme::ss58(0).unwrap();
        assert_eq!(zero_scheme.decode(ZERO_PREFIX_0).unwrap(), PublicKey::ZERO);
        assert_eq!(decode(ALICE_ADDRESS).unwrap(), alice());
    }

    #[test]
    fn test_altered_last_character_fails() {
        let zero_scheme = AddressScheme::ss58(0).unwrap();
        let altered = "111111111111111111111111111111111HC2";
        assert!(zero_scheme.decode(altered).is_err());
        assert!(!zero_scheme.is_valid(altered));
    }

    #[test]
    fn test_every_single_character_substitution_fails() {
        let alphabet = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
        let cases = [
            (AddressScheme::ss58(0).unwrap(), ZERO_PREFIX_0),
            (AddressScheme::default(), ZERO_PREFIX_42),
            (AddressScheme::default(), ALICE_ADDRESS),
        ];

        for (scheme, address) in cases {
            let chars: Vec<char> = address.chars().collect();
            for i in 0..chars.len() {
                for c in alphabet.chars().filter(|c| *c != chars[i]) {
                    let mut mutated = chars.clone();
                    mutated[i] = c;
                    let mutated: String = mutated.into_iter().collect();

                    match scheme.decode(&mutated) {
                        Err(CodecError::ChecksumMismatch) | Err(CodecError::InvalidAddressText(_)) => {}
                        other => panic!("{} decoded to {:?}", mutated, other),
                    }
                }
            }
        }
    }

    #[test]
    fn test_rejects_wrong_body_length() {
        // Checksums are valid for the body, only the length is wrong.
        for len in [31usize, 33] {
            let text = raw_address(DEFAULT_PREFIX, &vec![7u8; len]);
            assert!(matches!(
                decode(&text),
                Err(CodecError::InvalidAddressText(_))
            ));
        }
    }

    #[test]
    fn test_rejects_foreign_alphabet_and_empty() {
        assert!(matches!(decode(""), Err(CodecError::InvalidAddressText(_))));
        // '0', 'O', 'I' and 'l' are not part of the base58 alphabet.
        let mut bad = ALICE_ADDRESS.to_string();
        bad.replace_range(3..4, "0");
        assert!(matches!(decode(&bad), Err(CodecError::InvalidAddressText(_))));
        assert!(!is_valid("not an address"));
        assert!(!is_valid(PLACEHOLDER_ADDRESS));
    }

    #[test]
    fn test_prefix_must_match_scheme() {
        let polkadot = AddressScheme::ss58(0).unwrap();
        let err = polkadot.decode(ALICE_ADDRESS).unwrap_err();
        assert!(matches!(err, CodecError::InvalidAddressText(_)));

        let (prefix, key) = polkadot.decode_network(ALICE_ADDRESS).unwrap();
        assert_eq!(prefix, DEFAULT_PREFIX);
        assert_eq!(key, alice());
    }

    #[test]
    fn test_encode_bytes_rejects_wrong_length() {
        assert_eq!(
            encode_bytes(&[0u8; 31]),
            Err(CodecError::InvalidIdentity { len: 31 })
        );
        assert_eq!(encode_bytes(&[0u8; 32]).unwrap().as_str(), ZERO_PREFIX_42);
    }

    #[test]
    fn test_encode_many_preserves_order() {
        let keys = [alice(), PublicKey::ZERO];
        let addresses = AddressScheme::default().encode_many(&keys);
        assert_eq!(addresses[0].as_str(), ALICE_ADDRESS);
        assert_eq!(addresses[1].as_str(), ZERO_PREFIX_42);
    }

    #[test]
    fn test_scheme_validation() {
        assert_eq!(AddressScheme::ss58(64), Err(CodecError::UnsupportedPrefix(64)));
        assert_eq!(AddressScheme::default().validate(), Ok(()));
        assert_eq!(AddressScheme::ss58(63).unwrap().validate(), Ok(()));
        assert!(AddressScheme::default().with_checksum_len(0).is_err());
        assert!(AddressScheme::default().with_checksum_len(65).is_err());

        let wide = AddressScheme::default().with_checksum_len(64).unwrap();
        let address = wide.encode(&alice());
        assert_eq!(wide.decode(address.as_str()).unwrap(), alice());
        // A different width is a different format.
        assert!(!is_valid(address.as_str()));
    }

    #[test]
    fn test_alternative_alphabet_roundtrip() {
        let ripple = AddressScheme::default().with_alphabet(AddressAlphabet::Ripple);
        let address = ripple.encode(&alice());
        assert_ne!(address.as_str(), ALICE_ADDRESS);
        assert_eq!(ripple.decode(address.as_str()).unwrap(), alice());
    }

    #[test]
    fn test_scheme_from_json() {
        let scheme: AddressScheme =
            serde_json::from_str(r#"{"prefix": 0, "alphabet": "bitcoin"}"#).unwrap();
        assert_eq!(scheme.prefix(), 0);
        assert_eq!(scheme.checksum_len(), DEFAULT_CHECKSUM_LEN);
        assert_eq!(scheme.version(), SchemeVersion::Ss58V1);

        let rejected: std::result::Result<AddressScheme, _> =
            serde_json::from_str(r#"{"prefix": 200}"#);
        assert!(rejected.is_err());
    }

    #[test]
    fn test_address_parse_and_serde() {
        let address: Address = ALICE_ADDRESS.parse().unwrap();
        assert_eq!(address.to_public_key().unwrap(), (DEFAULT_PREFIX, alice()));
        assert_eq!(address.to_string(), ALICE_ADDRESS);

        let json = serde_json::to_string(&address).unwrap();
        assert_eq!(json, format!("\"{}\"", ALICE_ADDRESS));
        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, address);

        assert!("5xxxxxxxxxxxxxxx".parse::<Address>().is_err());
        assert!(serde_json::from_str::<Address>("\"5Grwva\"").is_err());
    }

    #[test]
    fn test_address_keeps_its_scheme() {
        let key = PublicKey::from_bytes([0xd4; 32]);
        let schemes = [
            AddressScheme::default().with_alphabet(AddressAlphabet::Ripple),
            AddressScheme::default().with_checksum_len(8).unwrap(),
            AddressScheme::ss58(0).unwrap().with_checksum_len(64).unwrap(),
        ];

        for scheme in schemes {
            let address = scheme.encode(&key);
            assert_eq!(address.scheme(), &scheme);
            assert_eq!(address.to_public_key().unwrap(), (scheme.prefix(), key));

            let json = serde_json::to_string(&address).unwrap();
            let back: Address = serde_json::from_str(&json).unwrap();
            assert_eq!(back, address);
            assert_eq!(back.to_public_key().unwrap(), (scheme.prefix(), key));

            let parsed = Address::parse(address.as_str(), &scheme).unwrap();
            assert_eq!(parsed, address);

            // The scheme-less parse only knows the default format.
            assert!(address.as_str().parse::<Address>().is_err());
        }
    }

    #[test]
    fn test_address_parse_records_prefix() {
        let address = Address::parse(ZERO_PREFIX_0, &AddressScheme::default()).unwrap();
        assert_eq!(address.scheme().prefix(), 0);
        assert_eq!(address, AddressScheme::ss58(0).unwrap().encode(&PublicKey::ZERO));
        assert_eq!(
            serde_json::to_string(&address).unwrap(),
            format!("\"{}\"", ZERO_PREFIX_0)
        );

        let mismatched = serde_json::json!({
            "address": ALICE_ADDRESS,
            "scheme": {"checksum_len": 8}
        });
        assert!(serde_json::from_value::<Address>(mismatched).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn roundtrip(bytes in any::<[u8; 32]>(), prefix in 0u8..=MAX_SINGLE_BYTE_PREFIX) {
                let scheme = AddressScheme::ss58(prefix).unwrap();
                let key = PublicKey::from_bytes(bytes);
                let address = scheme.encode(&key);
                prop_assert_eq!(scheme.decode(address.as_str()).unwrap(), key);
                prop_assert_eq!(scheme.encode(&key), address);
            }

            #[test]
            fn checksum_bit_flip_is_detected(
                bytes in any::<[u8; 32]>(),
                byte in 33usize..35,
                bit in 0u8..8,
            ) {
                let key = PublicKey::from_bytes(bytes);
                let address = encode(&key);
                let mut raw = bs58::decode(address.as_str()).into_vec().unwrap();
                raw[byte] ^= 1 << bit;
                let tampered = bs58::encode(raw).into_string();
                prop_assert_eq!(decode(&tampered), Err(CodecError::ChecksumMismatch));
            }
        }
    }
}
