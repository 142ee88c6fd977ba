use super::{BabyStepGiantStep, BabyStepTable};
use num_bigint::BigUint;
use std::collections::HashMap;

impl BabyStepTable {
    /// Builds the baby-step table for the window starting at `start`:
    /// walks `G·start, G·(start+1), ...` recording each point's offset.
    /// Returns the table and the `window_size` additions it cost.
    pub(crate) fn generate(
        solver: &BabyStepGiantStep<'_>,
        start: &BigUint,
    ) -> (BabyStepTable, u64) {
        let group = solver.group;
        let mut offsets = HashMap::with_capacity(solver.window_size as usize);

        let mut current = group.scalar_mul(&group.g, start);
        for offset in 0..solver.window_size {
            offsets.insert(current.clone(), offset);
            current = group.add(&current, &group.g);
        }

        (BabyStepTable { offsets }, solver.window_size)
    }
}
