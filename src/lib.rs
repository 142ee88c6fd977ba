//! Baby-step Giant-step search for secp256k1 private keys known to lie in a
//! bounded interval.
//!
//! The interval is partitioned into fixed-size windows near the square root
//! of its length; each window is solved independently with a baby-step table
//! and a backwards giant-step walk, costing O(√N) group operations and
//! memory per window. Outside the given interval this offers no advantage
//! over brute force.

pub mod bsgs;
pub mod codec;
pub mod curve;
pub mod error;
pub mod keys;
pub mod puzzle;
pub mod scanner;
pub mod traits;
pub mod utils;

pub use curve::{CurveGroup, CurvePoint};
pub use error::{DlogError, Result};
pub use puzzle::{PuzzleSolution, PuzzleSolver, SolveReport};
pub use scanner::{RangeScanner, SolveResult};
pub use traits::{NullSink, ProgressSink, TracingSink};
