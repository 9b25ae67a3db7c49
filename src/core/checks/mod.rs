//! The four alignment quality checks.
//!
//! Each check is a pure function over the corpus measurement tables
//! producing a list of anomalies. No check reads another's output, no check
//! mutates the tables, and all four run on every invocation, so the combined
//! result is deterministic for a given pair of tables.

mod consistency;
mod duration;
mod outliers;
mod timing;

pub use consistency::check_word_phoneme_consistency;
pub use duration::check_durations;
pub use outliers::check_statistical_outliers;
pub use timing::check_timing_continuity;

use std::collections::HashMap;

use crate::config::CheckConfig;
use crate::core::anomaly::Anomaly;
use crate::core::measurement::{PhonemeMeasurement, WordMeasurement};

/// Output of one full analyzer run, one list per check.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    pub duration: Vec<Anomaly>,
    pub timing: Vec<Anomaly>,
    pub outliers: Vec<Anomaly>,
    pub consistency: Vec<Anomaly>,
}

impl CheckOutcome {
    pub fn total(&self) -> usize {
        self.duration.len() + self.timing.len() + self.outliers.len() + self.consistency.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Anomaly> {
        self.duration
            .iter()
            .chain(&self.timing)
            .chain(&self.outliers)
            .chain(&self.consistency)
    }
}

/// Run all four checks over the corpus tables.
pub fn run_all_checks(
    phonemes: &[PhonemeMeasurement],
    words: &[WordMeasurement],
    config: &CheckConfig,
) -> CheckOutcome {
    CheckOutcome {
        duration: check_durations(phonemes, config),
        timing: check_timing_continuity(phonemes, config),
        outliers: check_statistical_outliers(phonemes, config),
        consistency: check_word_phoneme_consistency(phonemes, words, config),
    }
}

/// Group table rows by a string key, keys in first-appearance order, rows in
/// table order within each group.
pub(crate) fn group_in_order<'a, T, F>(rows: &'a [T], key: F) -> Vec<(&'a str, Vec<&'a T>)>
where
    F: Fn(&'a T) -> &'a str,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&T>)> = Vec::new();
    for row in rows {
        let k = key(row);
        match index.get(k) {
            Some(&i) => groups[i].1.push(row),
            None => {
                index.insert(k, groups.len());
                groups.push((k, vec![row]));
            }
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_in_order_preserves_first_appearance() {
        let rows = vec![
            ("b", 1),
            ("a", 2),
            ("b", 3),
            ("c", 4),
            ("a", 5),
        ];
        let groups = group_in_order(&rows, |r| r.0);
        let keys: Vec<&str> = groups.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(groups[0].1.iter().map(|r| r.1).collect::<Vec<_>>(), vec![1, 3]);
    }
}
