//! Baby-step Giant-step over one window of the key range.
//!
//! A window solve covers the scalars `start + j·m + i` for `i, j` in
//! `[0, m)` where `m` is the window size: `m` baby steps fill a lookup
//! table, then up to `m` giant strides of `-m·G` walk the target back
//! until it lands on a table entry.

pub mod generator;
pub mod solver;

use crate::curve::{CurveGroup, CurvePoint};
use num_bigint::{BigInt, BigUint};
use std::collections::HashMap;

/// Window solver. The giant stride `-m·G` depends only on the window size,
/// so it is computed once and shared by every window of a solve; the
/// baby-step table is rebuilt per window and discarded afterwards.
pub struct BabyStepGiantStep<'a> {
    group: &'a CurveGroup,
    window_size: u64,
    giant_step: CurvePoint,
}

/// Baby-step lookup table for a single window, mapping each affine point to
/// its offset from the window start. Offsets within a window are distinct
/// points (the group order vastly exceeds any window), so inserts never
/// collide.
pub(crate) struct BabyStepTable {
    pub(crate) offsets: HashMap<CurvePoint, u64>,
}

/// Outcome of one window: the scalar if the target was hit, plus the number
/// of group additions performed.
pub struct WindowOutcome {
    pub scalar: Option<BigUint>,
    pub operations: u64,
}

impl<'a> BabyStepGiantStep<'a> {
    pub fn new(group: &'a CurveGroup, window_size: u64) -> Self {
        assert!(window_size >= 1, "window size must be at least 1");
        let giant_step = group.mul_signed(&group.g, &-BigInt::from(window_size));
        BabyStepGiantStep {
            group,
            window_size,
            giant_step,
        }
    }

    pub fn window_size(&self) -> u64 {
        self.window_size
    }
}
