use super::{BabyStepGiantStep, BabyStepTable, WindowOutcome};
use crate::curve::CurvePoint;
use num_bigint::BigUint;

impl BabyStepGiantStep<'_> {
    /// Runs both phases for the window starting at `start`.
    ///
    /// Giant phase: starting from the target, stride by `-m·G` and look each
    /// intermediate point up in the baby table; a hit at giant index `j` and
    /// table offset `i` means the scalar is `start + j·m + i`. At most one
    /// hit can occur per window, and a fruitless window costs exactly
    /// `2·window_size` additions.
    pub fn solve_window(&self, target: &CurvePoint, start: &BigUint) -> WindowOutcome {
        let (table, mut operations) = BabyStepTable::generate(self, start);

        let mut current = target.clone();
        for giant in 0..self.window_size {
            if let Some(&offset) = table.offsets.get(&current) {
                let scalar = start + BigUint::from(giant) * self.window_size + offset;
                return WindowOutcome {
                    scalar: Some(scalar),
                    operations,
                };
            }
            current = self.group.add(&current, &self.giant_step);
            operations += 1;
        }

        WindowOutcome {
            scalar: None,
            operations,
        }
    }
}
