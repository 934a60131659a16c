//! Address validation per network family
//!
//! Format checks only: EVM hex addresses, SS58 Substrate addresses (including
//! the checksum), and Bitcoin addresses. Legacy base58 Bitcoin addresses have
//! their checksum and version byte verified; bech32 ones are checked by prefix
//! and length.

use blake2::{Blake2b512, Digest};

use crate::errors::AddressError;
use crate::types::Network;

const SS58_CHECKSUM_PREFIX: &[u8] = b"SS58PRE";
const SS58_CHECKSUM_LEN: usize = 2;
const ACCOUNT_ID_LEN: usize = 32;

/// Version byte + 20-byte hash of a base58check Bitcoin address
const BTC_LEGACY_PAYLOAD_LEN: usize = 21;
/// P2PKH / P2SH version bytes, mainnet and testnet
const BTC_LEGACY_VERSIONS: [u8; 4] = [0x00, 0x05, 0x6f, 0xc4];

/// Whether `address` is syntactically valid for `network`.
pub fn is_valid_address_for_network(address: &str, network: Network) -> bool {
    validate_address(address, network).is_ok()
}

/// Validate an address for a network family.
pub fn validate_address(address: &str, network: Network) -> Result<(), AddressError> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }

    match network {
        Network::Evm => decode_evm(address).map(|_| ()),
        Network::Substrate => decode_ss58(address).map(|_| ()),
        Network::Bitcoin => validate_bitcoin(address),
    }
}

/// Raw account bytes behind an address (20 bytes for EVM, 32 for Substrate).
///
/// Bitcoin addresses have no fixed-size account form and are returned as
/// their UTF-8 bytes.
pub fn address_to_bytes(address: &str, network: Network) -> Result<Vec<u8>, AddressError> {
    validate_address(address, network)?;
    match network {
        Network::Evm => decode_evm(address),
        Network::Substrate => decode_ss58(address).map(|(_, account)| account.to_vec()),
        Network::Bitcoin => Ok(address.as_bytes().to_vec()),
    }
}

fn invalid(network: Network, reason: impl Into<String>) -> AddressError {
    AddressError::InvalidFormat {
        network: network.to_string(),
        reason: reason.into(),
    }
}

fn decode_evm(address: &str) -> Result<Vec<u8>, AddressError> {
    let hex_part = address
        .strip_prefix("0x")
        .ok_or_else(|| invalid(Network::Evm, "must start with '0x'"))?;

    if hex_part.len() != 40 {
        return Err(invalid(
            Network::Evm,
            "must be 42 characters (0x + 40 hex chars)",
        ));
    }

    hex::decode(hex_part).map_err(|_| invalid(Network::Evm, "contains non-hex characters"))
}

/// Decode an SS58 address into its network prefix and 32-byte account ID.
pub fn decode_ss58(address: &str) -> Result<(u16, [u8; ACCOUNT_ID_LEN]), AddressError> {
    let data = bs58::decode(address)
        .into_vec()
        .map_err(|e| invalid(Network::Substrate, format!("not base58: {}", e)))?;

    let first = *data
        .first()
        .ok_or_else(|| invalid(Network::Substrate, "empty payload"))?;

    let (prefix, prefix_len) = match first {
        0..=63 => (first as u16, 1),
        64..=127 => {
            let second = *data
                .get(1)
                .ok_or_else(|| invalid(Network::Substrate, "truncated prefix"))?;
            let lower = ((first & 0b0011_1111) << 2) | (second >> 6);
            let upper = second & 0b0011_1111;
            ((lower as u16) | ((upper as u16) << 8), 2)
        }
        _ => return Err(invalid(Network::Substrate, "reserved prefix")),
    };

    if data.len() != prefix_len + ACCOUNT_ID_LEN + SS58_CHECKSUM_LEN {
        return Err(invalid(
            Network::Substrate,
            format!("unexpected payload length {}", data.len()),
        ));
    }

    let (body, checksum) = data.split_at(data.len() - SS58_CHECKSUM_LEN);
    let mut hasher = Blake2b512::new();
    hasher.update(SS58_CHECKSUM_PREFIX);
    hasher.update(body);
    let hash = hasher.finalize();
    if hash[..SS58_CHECKSUM_LEN] != *checksum {
        return Err(invalid(Network::Substrate, "checksum mismatch"));
    }

    let mut account = [0u8; ACCOUNT_ID_LEN];
    account.copy_from_slice(&body[prefix_len..]);
    Ok((prefix, account))
}

fn validate_bitcoin(address: &str) -> Result<(), AddressError> {
    let lower = address.to_ascii_lowercase();
    if lower.starts_with("bc1") || lower.starts_with("tb1") || lower.starts_with("bcrt1") {
        return validate_bitcoin_bech32(address, &lower);
    }
    validate_bitcoin_legacy(address)
}

fn validate_bitcoin_bech32(address: &str, lower: &str) -> Result<(), AddressError> {
    if address.len() < 14 || address.len() > 74 {
        return Err(invalid(Network::Bitcoin, "invalid length"));
    }
    if !lower.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid(Network::Bitcoin, "contains invalid characters"));
    }
    Ok(())
}

fn validate_bitcoin_legacy(address: &str) -> Result<(), AddressError> {
    let payload = bs58::decode(address)
        .with_check(None)
        .into_vec()
        .map_err(|e| invalid(Network::Bitcoin, format!("not a base58check or bech32 address: {}", e)))?;

    if payload.len() != BTC_LEGACY_PAYLOAD_LEN {
        return Err(invalid(
            Network::Bitcoin,
            format!("unexpected payload length {}", payload.len()),
        ));
    }
    if !BTC_LEGACY_VERSIONS.contains(&payload[0]) {
        return Err(invalid(
            Network::Bitcoin,
            format!("unknown version byte {:#04x}", payload[0]),
        ));
    }
    Ok(())
}
