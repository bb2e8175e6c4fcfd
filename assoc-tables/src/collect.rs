use indexmap::IndexMap;
use log::trace;

use crate::canon::{self, CanonicalRecord};
use crate::record::{self, Direction, ProofRecord, ProofStatus};

/// Deduplicated records plus the counters reported at the end of a run.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Canonical row mapped to the oriented, uncollapsed expression it was
    /// first seen with. Iteration follows first-seen order.
    pub records: IndexMap<CanonicalRecord, String>,
    pub total: usize,
    pub right: usize,
    pub unknown: usize,
}

impl Collection {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add(&mut self, record: &ProofRecord) {
        self.total += 1;
        if record.direction == Direction::Right {
            self.right += 1;
        }
        if record.status == ProofStatus::Unknown {
            self.unknown += 1;
        }
        self.records
            .entry(canon::canonicalize(record))
            .or_insert_with(|| canon::orient(record));
    }

    /// Scans log lines, skipping everything that is not a result line.
    pub fn add_lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            match record::parse_line(line.as_ref()) {
                Some(record) => self.add(&record),
                None => trace!("skipping line: {}", line.as_ref()),
            }
        }
    }

    pub fn unique(&self) -> usize {
        self.records.len()
    }
}

pub fn collect<'a, I>(records: I) -> Collection
where
    I: IntoIterator<Item = &'a ProofRecord>,
{
    let mut collection = Collection::new();
    for record in records {
        collection.add(record);
    }
    collection
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIN_LEFT: &str =
        "Leaves: 2, i: 0, Min::make(x0, y0) -> Left-associativity with identity: { 2147483647 }";
    const SUB_RIGHT: &str =
        "Leaves: 2, i: 0, Sub::make(x0, y0) -> Right-associativity with identity: { 0 }";
    const SUB_LEFT_SWAPPED: &str =
        "Leaves: 2, i: 3, Sub::make(y0, x0) -> Left-associativity with identity: { 0 }";

    #[test]
    fn counts_and_dedups() {
        let mut c = Collection::new();
        c.add_lines([MIN_LEFT, "noise", MIN_LEFT, SUB_RIGHT, SUB_LEFT_SWAPPED]);
        assert_eq!(c.total, 4);
        assert_eq!(c.right, 1);
        assert_eq!(c.unknown, 0);
        // the swapped right proof coincides with the left one
        assert_eq!(c.unique(), 2);
        let keys: Vec<_> = c.records.keys().map(|k| k.expression.as_str()).collect();
        assert_eq!(keys, vec!["i32_min_x0y0", "i32_sub_y0x0"]);
        assert_eq!(c.records.get_index(1).unwrap().1, "Sub::make(y0, x0)");
    }

    #[test]
    fn collect_matches_canonicalize() {
        let records: Vec<_> = [MIN_LEFT, SUB_RIGHT, MIN_LEFT]
            .iter()
            .filter_map(|line| record::parse_line(line))
            .collect();
        let c = collect(&records);
        assert_eq!(c.total, 3);
        let keys: Vec<_> = c.records.keys().cloned().collect();
        assert_eq!(
            keys,
            vec![canon::canonicalize(&records[0]), canon::canonicalize(&records[1])]
        );
    }

    #[test]
    fn identity_is_part_of_the_key() {
        let mut c = Collection::new();
        c.add_lines([
            MIN_LEFT,
            "Leaves: 2, i: 1, Min::make(x0, y0) -> Left-associativity with identity: { 7 }",
        ]);
        assert_eq!(c.unique(), 2);
    }
}
