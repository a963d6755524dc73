use std::fmt::Display;

use rand::{Rng, SeedableRng, rngs::StdRng};
use snafu::Snafu;

use crate::map::IntervalMap;

use super::DenseModel;

/// Largest key window the checker accepts, so the dense model stays small.
pub const MAX_WINDOW_LEN: i64 = 1 << 20;

const BASE_VALUE: char = 'A';

#[derive(Debug, Clone)]
pub struct FuzzOptions {
    pub seed: u64,
    pub iterations: usize,
    /// Number of assignments applied to each fresh map.
    pub operations: usize,
    pub min_key: i64,
    pub max_key: i64,
    /// Values drawn for assignments. The base value is always `'A'`.
    pub alphabet: Vec<char>,
}

impl Default for FuzzOptions {
    fn default() -> Self {
        Self { seed: 0, iterations: 1000, operations: 64, min_key: -50, max_key: 50, alphabet: vec!['A', 'B', 'C', 'D'] }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub begin: i64,
    pub end: i64,
    pub value: char,
}

impl Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "assign({}, {}, {:?})", self.begin, self.end, self.value)
    }
}

/// Assignments applied to a map, in order, up to and including the failing one.
#[derive(Debug, Clone)]
pub struct History(pub Vec<Assignment>);

impl Display for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for assignment in &self.0 {
            writeln!(f, "    {assignment}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Snafu)]
pub enum FuzzError {
    #[snafu(display("key window {min_key}..={max_key} must be non-empty and at most {MAX_WINDOW_LEN} keys long"))]
    InvalidWindow { min_key: i64, max_key: i64 },
    #[snafu(display("alphabet must not be empty"))]
    EmptyAlphabet,
    #[snafu(display(
        "iteration {iteration}: lookup({key}) returned {actual:?} but {expected:?} was expected after:\n{history}"
    ))]
    LookupMismatch { iteration: usize, key: i64, actual: char, expected: char, history: History },
    #[snafu(display("iteration {iteration}: map is not in canonical form after:\n{history}"))]
    NotCanonical { iteration: usize, history: History },
    #[snafu(display(
        "iteration {iteration}: map stores {stored} change points but the function has {transitions} transitions after:\n{history}"
    ))]
    NotMinimal { iteration: usize, stored: usize, transitions: usize, history: History },
    #[snafu(display("iteration {iteration}: empty range changed the map after:\n{history}"))]
    EmptyRangeMutated { iteration: usize, history: History },
    #[snafu(display("iteration {iteration}: repeating the last assignment changed the map after:\n{history}"))]
    NotIdempotent { iteration: usize, history: History },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzReport {
    pub iterations: usize,
    pub assignments: usize,
    pub empty_ranges: usize,
    pub max_change_points: usize,
}

impl Display for FuzzReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} iterations, {} assignments ({} empty), at most {} change points",
            self.iterations, self.assignments, self.empty_ranges, self.max_change_points
        )
    }
}

/// Applies random assignments to an [`IntervalMap`] and a [`DenseModel`] side by side, checking after
/// every assignment that both agree on every key and that the map is canonical and minimal.
pub fn fuzz(options: &FuzzOptions) -> Result<FuzzReport, FuzzError> {
    let FuzzOptions { seed, iterations, operations, min_key, max_key, ref alphabet } = *options;
    if max_key < min_key || max_key == i64::MAX || max_key.checked_sub(min_key).is_none_or(|len| len >= MAX_WINDOW_LEN) {
        return InvalidWindowSnafu { min_key, max_key }.fail();
    }
    if alphabet.is_empty() {
        return EmptyAlphabetSnafu.fail();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = FuzzReport { iterations, assignments: 0, empty_ranges: 0, max_change_points: 0 };

    for iteration in 0..iterations {
        let mut map = IntervalMap::new(BASE_VALUE);
        let mut model = DenseModel::new(min_key, max_key, BASE_VALUE);
        let mut history = vec![];

        for _ in 0..operations {
            // Ends may land one past the window so the last key can be assigned too
            let assignment = Assignment {
                begin: rng.random_range(min_key..=max_key + 1),
                end: rng.random_range(min_key..=max_key + 1),
                value: alphabet[rng.random_range(0..alphabet.len())],
            };
            history.push(assignment);
            report.assignments += 1;

            let Assignment { begin, end, value } = assignment;
            if begin < end {
                map.assign(begin, end, value);
                model.assign(begin, end, value);

                if rng.random_ratio(1, 8) {
                    let once = map.clone();
                    map.assign(begin, end, value);
                    if map != once {
                        return NotIdempotentSnafu { iteration, history: History(history) }.fail();
                    }
                }
            } else {
                report.empty_ranges += 1;
                let before = map.clone();
                map.assign(begin, end, value);
                if map != before {
                    return EmptyRangeMutatedSnafu { iteration, history: History(history) }.fail();
                }
            }

            check(&map, &model, min_key, max_key, iteration, &history)?;
            report.max_change_points = report.max_change_points.max(map.len());
        }

        log::trace!("Iteration {iteration} finished with {} change points", map.len());
    }

    Ok(report)
}

fn check(
    map: &IntervalMap<i64, char>,
    model: &DenseModel<char>,
    min_key: i64,
    max_key: i64,
    iteration: usize,
    history: &[Assignment],
) -> Result<(), FuzzError> {
    let snapshot = || History(history.to_vec());

    for key in min_key.saturating_sub(1)..=max_key.saturating_add(1) {
        let actual = *map.lookup(&key);
        let expected = *model.lookup(key);
        if actual != expected {
            return LookupMismatchSnafu { iteration, key, actual, expected, history: snapshot() }.fail();
        }
    }
    if !map.is_canonical() {
        return NotCanonicalSnafu { iteration, history: snapshot() }.fail();
    }
    let transitions = model.transitions();
    if map.len() != transitions {
        return NotMinimalSnafu { iteration, stored: map.len(), transitions, history: snapshot() }.fail();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fuzz_default_window() {
        let options = FuzzOptions { iterations: 200, ..Default::default() };
        let report = fuzz(&options).unwrap();
        assert_eq!(report.iterations, 200);
        assert_eq!(report.assignments, 200 * 64);
        assert!(report.empty_ranges > 0);
    }

    #[test]
    fn test_fuzz_narrow_window() {
        let options =
            FuzzOptions { seed: 7, iterations: 500, operations: 16, min_key: 0, max_key: 3, alphabet: vec!['A', 'B'] };
        fuzz(&options).unwrap();
    }

    #[test]
    fn test_fuzz_rejects_bad_options() {
        let options = FuzzOptions { min_key: 5, max_key: 4, ..Default::default() };
        assert!(matches!(fuzz(&options), Err(FuzzError::InvalidWindow { .. })));

        let options = FuzzOptions { min_key: i64::MIN, max_key: i64::MAX, ..Default::default() };
        assert!(matches!(fuzz(&options), Err(FuzzError::InvalidWindow { .. })));

        let options = FuzzOptions { alphabet: vec![], ..Default::default() };
        assert!(matches!(fuzz(&options), Err(FuzzError::EmptyAlphabet)));
    }

    #[test]
    fn test_history_display() {
        let history = History(vec![Assignment { begin: 1, end: 5, value: 'B' }, Assignment { begin: 3, end: 3, value: 'C' }]);
        assert_eq!(history.to_string(), "    assign(1, 5, 'B')\n    assign(3, 3, 'C')\n");
    }
}
