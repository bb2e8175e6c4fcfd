use indexmap::{IndexMap, IndexSet};

use crate::canon::CanonicalRecord;
use crate::halide::OpKind;
use crate::order::{Constant, OrderedRecord};

/// Number of independent variable pairs a reduction pattern uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Arity {
    Single,
    Double,
}

impl Arity {
    pub const ALL: [Arity; 2] = [Arity::Single, Arity::Double];

    pub fn name(self) -> &'static str {
        match self {
            Arity::Single => "single",
            Arity::Double => "double",
        }
    }
}

/// Rows bucketed by root operator and arity. Every bucket exists, empty
/// or not, so the emitted code always has all ten accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedTable {
    buckets: IndexMap<(OpKind, Arity), Vec<CanonicalRecord>>,
    constants: IndexSet<Constant>,
}

impl Default for OrderedTable {
    fn default() -> Self {
        let mut buckets = IndexMap::new();
        for arity in Arity::ALL {
            for op in OpKind::ALL {
                buckets.insert((op, arity), vec![]);
            }
        }
        Self {
            buckets,
            constants: Default::default(),
        }
    }
}

impl OrderedTable {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends one collection pass. Bucket contents keep the order of
    /// `ordered`.
    pub fn extend(&mut self, arity: Arity, ordered: &[OrderedRecord]) {
        for rec in ordered {
            self.constants.extend(rec.constants.iter().cloned());
            self.buckets
                .entry((rec.root(), arity))
                .or_insert_with(Vec::new)
                .push(rec.record.clone());
        }
    }

    pub fn get(&self, op: OpKind, arity: Arity) -> &[CanonicalRecord] {
        self.buckets
            .get(&(op, arity))
            .map_or(&[][..], |rows| rows.as_slice())
    }

    pub fn buckets(&self) -> impl Iterator<Item = (OpKind, Arity, &[CanonicalRecord])> {
        self.buckets
            .iter()
            .map(|((op, arity), rows)| (*op, *arity, rows.as_slice()))
    }

    /// Free constants referenced by any row, in first-use order.
    pub fn constants(&self) -> impl Iterator<Item = &Constant> {
        self.constants.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(|rows| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub fn partition(ordered: &[OrderedRecord], arity: Arity) -> OrderedTable {
    let mut table = OrderedTable::new();
    table.extend(arity, ordered);
    table
}
