//! Key-material collaborators: WIF and P2PKH address derivation from a
//! recovered scalar. The search core only consumes these for final
//! verification and reporting.

use crate::codec;
use crate::curve::CurvePoint;
use crate::error::Result;
use crate::utils;
use num_bigint::BigUint;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

const MAINNET_P2PKH_VERSION: u8 = 0x00;
const MAINNET_WIF_VERSION: u8 = 0x80;

fn base58check(payload: &[u8]) -> String {
    let checksum = Sha256::digest(Sha256::digest(payload));
    let mut data = payload.to_vec();
    data.extend_from_slice(&checksum[..4]);
    bs58::encode(data).into_string()
}

fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let mut ripe = Ripemd160::new();
    ripe.update(sha);
    let digest = ripe.finalize();
    let mut out = [0u8; 20];
    out.copy_from_slice(&digest);
    out
}

/// Mainnet P2PKH address for the compressed encoding of `point`.
pub fn p2pkh_address(point: &CurvePoint) -> Result<String> {
    let compressed = codec::compressed_key_bytes(point)?;
    let digest = hash160(&compressed);
    let mut payload = Vec::with_capacity(21);
    payload.push(MAINNET_P2PKH_VERSION);
    payload.extend_from_slice(&digest);
    Ok(base58check(&payload))
}

/// Wallet Import Format for `scalar`, flagged for a compressed public key.
pub fn wif_compressed(scalar: &BigUint) -> String {
    let mut payload = Vec::with_capacity(34);
    payload.push(MAINNET_WIF_VERSION);
    payload.extend_from_slice(&utils::scalar_to_32_bytes(scalar));
    payload.push(0x01);
    base58check(&payload)
}
