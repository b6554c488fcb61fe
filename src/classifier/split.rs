//! Label-stratified train/held-out splitting.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::classifier::Label;
use crate::error::{Result, VeracityError};

/// Split sample indices into a training and a held-out partition,
/// preserving each label's proportion.
///
/// Each label's indices are shuffled with a `StdRng` seeded from `seed`,
/// so the split is reproducible. A label with fewer than two samples
/// contributes nothing to the held-out partition, and at least one sample
/// per label always stays on the training side.
///
/// Returns `(train_indices, held_out_indices)`, both sorted.
pub fn stratified_split(
    labels: &[Label],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>)> {
    if labels.is_empty() {
        return Err(VeracityError::invalid_argument(
            "cannot split an empty label set",
        ));
    }
    if !(0.0..1.0).contains(&test_fraction) {
        return Err(VeracityError::invalid_argument(format!(
            "test_fraction must be in [0, 1), got {test_fraction}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut held_out = Vec::new();

    for label in Label::ORDERED {
        let mut group: Vec<usize> = labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect();

        if group.is_empty() {
            continue;
        }

        group.shuffle(&mut rng);

        let mut test_count = if group.len() < 2 || test_fraction == 0.0 {
            0
        } else {
            ((group.len() as f64 * test_fraction).round() as usize).max(1)
        };
        // Never empty a label's training side
        test_count = test_count.min(group.len() - 1);

        held_out.extend_from_slice(&group[..test_count]);
        train.extend_from_slice(&group[test_count..]);
    }

    train.sort_unstable();
    held_out.sort_unstable();

    Ok((train, held_out))
}
