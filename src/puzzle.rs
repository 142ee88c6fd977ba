//! Top-level orchestration: decode the target key, scan the range, derive
//! the reportable key material.

use crate::codec;
use crate::curve::CurveGroup;
use crate::error::{DlogError, Result};
use crate::keys;
use crate::scanner::RangeScanner;
use crate::traits::ProgressSink;
use crate::utils;
use num_bigint::BigUint;
use web_time::Instant;

/// Everything derived from a recovered private scalar.
#[derive(Debug, Clone)]
pub struct PuzzleSolution {
    /// 64-digit zero-padded hex.
    pub private_key_hex: String,
    pub wif: String,
    pub address: String,
    /// Set when a target address was supplied: whether the derived address
    /// matches it.
    pub address_matches: Option<bool>,
}

/// Report for a completed solve, found or exhausted.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub solution: Option<PuzzleSolution>,
    pub operations: u64,
    pub elapsed_secs: f64,
    pub operations_per_sec: f64,
}

pub struct PuzzleSolver {
    group: CurveGroup,
    workers: usize,
}

impl PuzzleSolver {
    pub fn new() -> Self {
        Self::with_workers(1)
    }

    /// `workers > 1` scans windows on a thread pool.
    pub fn with_workers(workers: usize) -> Self {
        PuzzleSolver {
            group: CurveGroup::secp256k1(),
            workers: workers.max(1),
        }
    }

    /// Searches `[start_hex, end_hex]` for the scalar behind
    /// `compressed_public_key`. Returns `Ok` with an empty solution when the
    /// range is exhausted; errors are reserved for malformed inputs.
    pub fn solve(
        &self,
        compressed_public_key: &str,
        target_address: Option<&str>,
        start_hex: &str,
        end_hex: &str,
        sink: &dyn ProgressSink,
    ) -> Result<SolveReport> {
        let start = utils::parse_scalar_hex(start_hex).ok_or_else(|| DlogError::InvalidRange {
            start: start_hex.to_string(),
            end: end_hex.to_string(),
        })?;
        let end = utils::parse_scalar_hex(end_hex).ok_or_else(|| DlogError::InvalidRange {
            start: start_hex.to_string(),
            end: end_hex.to_string(),
        })?;
        if end >= self.group.n {
            // keys at or beyond the group order can never be reported
            return Err(DlogError::ScalarOutOfRange(format!("{:x}", end)));
        }

        let target = codec::decompress_public_key(&self.group, compressed_public_key)?;
        let scanner = RangeScanner::new(&self.group);

        let started = Instant::now();
        let result = if self.workers > 1 {
            scanner.scan_parallel(&target, &start, &end, self.workers, sink)?
        } else {
            scanner.scan(&target, &start, &end, sink)?
        };
        let elapsed_secs = started.elapsed().as_secs_f64();
        let operations_per_sec = if elapsed_secs > 0.0 {
            result.operations as f64 / elapsed_secs
        } else {
            0.0
        };
        tracing::info!(
            "scan finished: {} group operations in {:.2}s ({:.0}/s)",
            result.operations,
            elapsed_secs,
            operations_per_sec
        );

        let solution = match result.scalar {
            Some(scalar) => Some(self.derive(&scalar, target_address)?),
            None => None,
        };
        Ok(SolveReport {
            solution,
            operations: result.operations,
            elapsed_secs,
            operations_per_sec,
        })
    }

    fn derive(&self, scalar: &BigUint, target_address: Option<&str>) -> Result<PuzzleSolution> {
        if *scalar >= self.group.n {
            return Err(DlogError::ScalarOutOfRange(format!("{:x}", scalar)));
        }
        let point = self.group.scalar_mul(&self.group.g, scalar);
        let address = keys::p2pkh_address(&point)?;
        let address_matches = target_address.map(|want| {
            let matches = want == address;
            if !matches {
                tracing::warn!("derived address {} does not match target {}", address, want);
            }
            matches
        });
        Ok(PuzzleSolution {
            private_key_hex: utils::scalar_to_hex(scalar),
            wif: keys::wif_compressed(scalar),
            address,
            address_matches,
        })
    }
}

impl Default for PuzzleSolver {
    fn default() -> Self {
        Self::new()
    }
}
