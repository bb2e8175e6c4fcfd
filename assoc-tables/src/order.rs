use crate::canon::{self, CanonicalRecord};
use crate::collect::Collection;
use crate::error::Result;
use crate::halide::{OpKind, ProofExpr};

/// A free constant leaf: the variable name the prover used, and the name
/// rows refer to it by once variables inside it have been renamed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constant {
    pub name: String,
    pub var: String,
}

impl Constant {
    pub fn new(var: &str) -> Self {
        Self {
            name: canon::canonical_expression(var),
            var: var.to_string(),
        }
    }
}

/// A collected record with the operator sequence of its uncollapsed
/// expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedRecord {
    pub root: OpKind,
    pub ops: Vec<OpKind>,
    pub constants: Vec<Constant>,
    pub record: CanonicalRecord,
}

impl OrderedRecord {
    pub fn root(&self) -> OpKind {
        self.root
    }

    pub fn key(&self) -> Vec<u8> {
        order_key(&self.ops)
    }
}

pub fn order_key(ops: &[OpKind]) -> Vec<u8> {
    ops.iter().map(|op| op.rank()).collect()
}

/// Sorts by operator-rank sequence. The sort is stable, so records with
/// equal sequences keep the order they were first collected in.
pub fn order(collection: &Collection) -> Result<Vec<OrderedRecord>> {
    let mut ordered = collection
        .records
        .iter()
        .map(|(record, source)| -> Result<OrderedRecord> {
            let expr = ProofExpr::parse(source)?;
            Ok(OrderedRecord {
                root: expr.root_kind()?,
                ops: expr.op_sequence()?,
                constants: expr
                    .free_constants()
                    .iter()
                    .map(|var| Constant::new(var))
                    .collect(),
                record: record.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    ordered.sort_by_cached_key(OrderedRecord::key);
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenError;

    #[test]
    fn add_then_mul_sorts_first() {
        let mut c = Collection::new();
        c.add_lines([
            "Leaves: 3, i: 1, Mul::make(Add::make(x0, k0), y0) -> Left-associativity with identity: { 1 }",
            "Leaves: 3, i: 2, Add::make(Mul::make(x0, k0), y0) -> Left-associativity with identity: { 0 }",
        ]);
        let ordered = order(&c).unwrap();
        assert_eq!(ordered[0].key(), vec![0, 1]);
        assert_eq!(ordered[1].key(), vec![1, 0]);
        assert_eq!(ordered[0].root(), OpKind::Add);
        assert_eq!(ordered[0].constants, vec![Constant::new("k0")]);
        assert_eq!(ordered[0].constants[0].name, "k0");
    }

    #[test]
    fn prefix_sorts_before_extension() {
        let mut c = Collection::new();
        c.add_lines([
            "Leaves: 3, i: 1, Add::make(Min::make(x0, k0), y0) -> Left-associativity with identity: { 0 }",
            "Leaves: 2, i: 0, Add::make(x0, y0) -> Left-associativity with identity: { 0 }",
        ]);
        let ordered = order(&c).unwrap();
        assert_eq!(ordered[0].record.expression, "i32_add_x0y0");
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let mut c = Collection::new();
        c.add_lines([
            "Leaves: 2, i: 0, Max::make(y0, x0) -> Left-associativity with identity: { -2147483648 }",
            "Leaves: 2, i: 1, Max::make(x0, y0) -> Left-associativity with identity: { -2147483648 }",
        ]);
        let ordered = order(&c).unwrap();
        assert_eq!(ordered[0].record.expression, "Max::make(i32_y0, i32_x0)");
        assert_eq!(ordered[1].record.expression, "i32_max_x0y0");
    }

    #[test]
    fn constants_take_their_renamed_name() {
        let mut c = Collection::new();
        c.add_lines([
            "Leaves: 3, i: 0, Add::make(Max::make(x0, kx0), y0) -> Left-associativity with identity: { 0 }",
        ]);
        let ordered = order(&c).unwrap();
        assert_eq!(
            ordered[0].record.expression,
            "Add::make(Max::make(i32_x0, ki32_x0), i32_y0)"
        );
        assert_eq!(
            ordered[0].constants,
            vec![Constant {
                name: "ki32_x0".to_string(),
                var: "kx0".to_string(),
            }]
        );
    }

    #[test]
    fn unknown_operator_aborts() {
        let mut c = Collection::new();
        c.add_lines([
            "Leaves: 2, i: 0, Div::make(x0, y0) -> Left-associativity with identity: { 1 }",
        ]);
        assert!(matches!(order(&c), Err(GenError::UnknownOperator { .. })));
    }
}
