//! Canonical naming for proof records.
//!
//! Everything here is plain text substitution over fixed tables. The
//! tables are applied in the order listed; do not reorder or generalise
//! them.

use crate::record::{Direction, ProofRecord};

/// Surface variables and the names they are declared under in the
/// generated code.
pub const VARIABLE_ATOMS: [(&str, &str); 4] = [
    ("x0", "i32_x0"),
    ("y0", "i32_y0"),
    ("x1", "i32_x1"),
    ("y1", "i32_y1"),
];

/// Two-variable sub-expressions that collapse to a single declared atom.
pub const COLLAPSED_ATOMS: [(&str, &str); 16] = [
    ("Mul::make(i32_x0, i32_y0)", "i32_mul_x0y0"),
    ("Mul::make(i32_x0, i32_x0)", "i32_mul_x0x0"),
    ("Mul::make(i32_y0, i32_y0)", "i32_mul_y0y0"),
    ("Add::make(i32_x0, i32_y0)", "i32_add_x0y0"),
    ("Max::make(i32_x0, i32_y0)", "i32_max_x0y0"),
    ("Min::make(i32_x0, i32_y0)", "i32_min_x0y0"),
    ("Sub::make(i32_x0, i32_y0)", "i32_sub_x0y0"),
    ("Sub::make(i32_y0, i32_x0)", "i32_sub_y0x0"),
    ("Mul::make(i32_x1, i32_y1)", "i32_mul_x1y1"),
    ("Mul::make(i32_x1, i32_x1)", "i32_mul_x1x1"),
    ("Mul::make(i32_y1, i32_y1)", "i32_mul_y1y1"),
    ("Add::make(i32_x1, i32_y1)", "i32_add_x1y1"),
    ("Max::make(i32_x1, i32_y1)", "i32_max_x1y1"),
    ("Min::make(i32_x1, i32_y1)", "i32_min_x1y1"),
    ("Sub::make(i32_x1, i32_y1)", "i32_sub_x1y1"),
    ("Sub::make(i32_y1, i32_x1)", "i32_sub_y1x1"),
];

/// Identity literals with a named constant in the generated code.
pub const SENTINELS: [(&str, &str); 4] = [
    ("2147483647", "i32_tmax"),
    ("-2147483648", "i32_tmin"),
    ("0", "i32_zero"),
    ("1", "i32_one"),
];

const SWAP_PLACEHOLDER: &str = "_y0";

/// A table row, and the key records are deduplicated on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalRecord {
    pub expression: String,
    pub identity: String,
}

/// Exchanges `x0` and `y0`. A right-associative proof over `(x0, y0)` is a
/// left-associative proof over `(y0, x0)`.
pub fn swap(expr: &str) -> String {
    expr.replace("y0", SWAP_PLACEHOLDER)
        .replace("x0", "y0")
        .replace(SWAP_PLACEHOLDER, "x0")
}

/// Expression as a left-associative proof would state it.
pub fn orient(record: &ProofRecord) -> String {
    match record.direction {
        Direction::Right => swap(&record.expression),
        Direction::Left | Direction::Unknown => record.expression.clone(),
    }
}

/// Renames variables and collapses known sub-expressions. Expects an
/// already oriented expression.
pub fn canonical_expression(expr: &str) -> String {
    let mut out = expr.to_string();
    for &(var, atom) in VARIABLE_ATOMS.iter() {
        out = out.replace(var, atom);
    }
    for &(pattern, atom) in COLLAPSED_ATOMS.iter() {
        out = out.replace(pattern, atom);
    }
    out
}

pub fn canonical_identity(identity: &str) -> String {
    SENTINELS
        .iter()
        .find(|(literal, _)| *literal == identity)
        .map_or(identity, |(_, name)| *name)
        .to_string()
}

pub fn canonicalize(record: &ProofRecord) -> CanonicalRecord {
    CanonicalRecord {
        expression: canonical_expression(&orient(record)),
        identity: canonical_identity(&record.identity),
    }
}
