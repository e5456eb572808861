use rayon::prelude::*;

use crate::computer;
use crate::error::Result;
use crate::program::Program;

/// Run `program` once per input set, each on its own machine, in parallel.
///
/// Machines share nothing but the read-only program, so results are the
/// same as running them one after another. `results[i]` belongs to
/// `inputs[i]`.
pub fn run_batch(program: &Program, inputs: &[Vec<i64>]) -> Vec<Result<Vec<i64>>> {
    inputs
        .par_iter()
        .map(|set| computer::run(program, set.iter().copied()))
        .collect()
}
