//! Synthetic records standing in for a database read

use crate::core::record::SourceRecord;

/// Category label used before the first block switch
const BASE_CATEGORY: &str = "testcat";

/// Generate `count` records of `amount` each.
///
/// The category becomes `testcat{i}` at every index `i` divisible by
/// `block`, so each block of `block` records lands in its own category.
/// A `block` of zero never switches.
pub fn sample_records(count: u64, block: u64, amount: f64) -> Vec<SourceRecord> {
    let mut category = BASE_CATEGORY.to_string();
    (0..count)
        .map(|i| {
            if block != 0 && i % block == 0 {
                category = format!("{BASE_CATEGORY}{i}");
            }
            SourceRecord::new(i, category.clone(), amount)
        })
        .collect()
}
