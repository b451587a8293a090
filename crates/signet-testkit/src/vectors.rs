//! Golden test vectors for deterministic verification.
//!
//! Addresses, canonical messages and Ed25519 signatures here were produced
//! independently of this codebase. Any change in output is a format break.

use signet_core::{AddressScheme, Keypair, MessageFormat, PublicKey};

/// An address vector: key and prefix in, SS58 text out.
#[derive(Debug, Clone)]
pub struct AddressVector {
    pub name: &'static str,
    /// Public key (hex).
    pub public_key: &'static str,
    pub prefix: u8,
    pub expected_address: &'static str,
}

/// A signing vector: call in, message and signature out.
#[derive(Debug, Clone)]
pub struct SigningVector {
    pub name: &'static str,
    /// Seed of the signing key-pair. Its public key is the call target.
    pub seed: [u8; 32],
    pub sequence: u64,
    pub payload: &'static [u8],
    pub format: MessageFormat,
    /// Expected canonical message (hex).
    pub expected_message: &'static str,
    /// Expected Ed25519 signature over the message (hex).
    pub expected_signature: &'static str,
}

impl SigningVector {
    pub fn keypair(&self) -> Keypair {
        Keypair::from_seed(&self.seed)
    }
}

/// All address vectors.
pub fn address_vectors() -> Vec<AddressVector> {
    vec![
        AddressVector {
            name: "zero key, prefix 0",
            public_key: "0000000000000000000000000000000000000000000000000000000000000000",
            prefix: 0,
            expected_address: "111111111111111111111111111111111HC1",
        },
        AddressVector {
            name: "zero key, prefix 2",
            public_key: "0000000000000000000000000000000000000000000000000000000000000000",
            prefix: 2,
            expected_address: "CaKWz5omakTK7ovp4m3koXrHyHb7NG3Nt7GENHbviByZpKp",
        },
        AddressVector {
            name: "zero key, prefix 42",
            public_key: "0000000000000000000000000000000000000000000000000000000000000000",
            prefix: 42,
            expected_address: "5C4hrfjw9DjXZTzV3MwzrrAr9P1MJhSrvWGWqi1eSuyUpnhM",
        },
        AddressVector {
            name: "alice, prefix 42",
            public_key: "d43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d",
            prefix: 42,
            expected_address: "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY",
        },
        AddressVector {
            name: "all ones, prefix 42",
            public_key: "ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            prefix: 42,
            expected_address: "5HrN7fHLXWcFiXPwwtq2EkSGns9eMt5P7SpeTPewumZy6ftb",
        },
        AddressVector {
            name: "seed 0x42 key, prefix 42",
            public_key: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            prefix: 42,
            expected_address: "5CpQ5tmsKY2WWjPGSDKwXmJFwDRFektPY7wdY8ZK1yNoCAVo",
        },
        AddressVector {
            name: "seed 0x42 key, prefix 0",
            public_key: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            prefix: 0,
            expected_address: "1khEE2wBKHyxGPnPrNwfv8QnqQuM4SXccg7hRYfa4QKNUtm",
        },
        AddressVector {
            name: "seed 0x00 key, prefix 42",
            public_key: "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29",
            prefix: 42,
            expected_address: "5DQcDYQ3wwobcrJ5aE5CzGp34ZWYNeYfYZ1yLbPiU2RcSvwm",
        },
        AddressVector {
            name: "seed 0x01 key, prefix 0",
            public_key: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            prefix: 0,
            expected_address: "148eGqBKBSbTrKnGQka9tNNFoycLLa6ZPddFbtfJNczsBQPj",
        },
    ]
}

/// All signing vectors.
pub fn signing_vectors() -> Vec<SigningVector> {
    vec![
        SigningVector {
            name: "seq 7, empty payload",
            seed: [0x42; 32],
            sequence: 7,
            payload: b"",
            format: MessageFormat::V1Fixed,
            expected_message: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db120700000000000000",
            expected_signature: "7b7117762fed93c4b0d4a1415033db271b92ba772819fb518ee87675f42f2debbd042dadbe936f9a957800bec55623409d92f782cdb6bb6a5750ee3bd7e40f08",
        },
        SigningVector {
            name: "seq 8, empty payload",
            seed: [0x42; 32],
            sequence: 8,
            payload: b"",
            format: MessageFormat::V1Fixed,
            expected_message: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db120800000000000000",
            expected_signature: "b79d26432bdbcf497b26fa2cd68d5508b1137817de94afb5415f161f15f6cdb8e644a83a04c9e539d94eba9ec44064fbc2a0c07a827ecae3663a4e6edbe9e807",
        },
        SigningVector {
            name: "seq 0, transfer payload",
            seed: [0x01; 32],
            sequence: 0,
            payload: b"transfer",
            format: MessageFormat::V1Fixed,
            expected_message: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c00000000000000007472616e73666572",
            expected_signature: "b9ea9da138ef8c7d8c2f9ae9e2e1f02337d84428e41ace773916296ba81dda699f4394e85b900f20e3a0823cad2d27458bd98088f88b06213dabbace72b84e0b",
        },
        SigningVector {
            name: "max sequence, binary payload",
            seed: [0x00; 32],
            sequence: u64::MAX,
            payload: &[0x00, 0x01, 0x02, 0x03],
            format: MessageFormat::V1Fixed,
            expected_message: "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29ffffffffffffffff00010203",
            expected_signature: "3a0c6fd57e626344ec6e86902168fc8910a11faf4dc2333bffdb3bdd28df9337646a310168352e00f74686025be83f832097e50fe52dec8c0b3107cb0a67740c",
        },
        SigningVector {
            name: "compact seq 7, empty payload",
            seed: [0x42; 32],
            sequence: 7,
            payload: b"",
            format: MessageFormat::V2Compact,
            expected_message: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db121c",
            expected_signature: "cd46330ad6f2fafc8ed6aa91d89a78591aea82c3be9e0a0880766736cc53047a060b57704c723d323204fc08da018f476175e62478197058e3598d15e931d90f",
        },
        SigningVector {
            name: "compact seq 0, transfer payload",
            seed: [0x01; 32],
            sequence: 0,
            payload: b"transfer",
            format: MessageFormat::V2Compact,
            expected_message: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c007472616e73666572",
            expected_signature: "814952627ef517352a147e7faedea80ce59c8948ffd7a31fe888d13c786286fb6a6ce1110c275f62fdc7afb94b1355d6f6ef08422a4464c7e97b89c3cebd0802",
        },
        SigningVector {
            name: "compact max sequence, binary payload",
            seed: [0x00; 32],
            sequence: u64::MAX,
            payload: &[0x00, 0x01, 0x02, 0x03],
            format: MessageFormat::V2Compact,
            expected_message: "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da2913ffffffffffffffff00010203",
            expected_signature: "7ef720de3a69a9c951badf9e3e690bca8191c19667273e3d82069e1f0a317016413b379342e8eec6faf542421328763e06a21396827a19cdd0675528e6b16704",
        },
    ]
}

/// Check every vector against this implementation.
///
/// Returns `(name, matches, detail)` for each vector. `detail` holds what was
/// actually produced, or the error.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let mut results = Vec::new();

    for v in address_vectors() {
        let produced = PublicKey::from_hex(v.public_key).and_then(|key| {
            AddressScheme::ss58(v.prefix).map(|scheme| scheme.encode(&key).into_string())
        });
        results.push(match produced {
            Ok(address) => (v.name.to_string(), address == v.expected_address, address),
            Err(e) => (v.name.to_string(), false, e.to_string()),
        });
    }

    for v in signing_vectors() {
        let keypair = v.keypair();
        let target = keypair.public_key();
        let produced = v.format.encode(target.as_bytes(), v.sequence, v.payload).map(|message| {
            let signature = keypair.sign(message.as_bytes());
            (message.to_hex(), signature.to_hex())
        });
        results.push(match produced {
            Ok((message, signature)) => {
                let matches = message == v.expected_message && signature == v.expected_signature;
                (v.name.to_string(), matches, format!("{} {}", message, signature))
            }
            Err(e) => (v.name.to_string(), false, e.to_string()),
        });
    }

    results
}
