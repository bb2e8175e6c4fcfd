//! C++ rendering of an [`OrderedTable`].
//!
//! The generated accessors hold their table in a function-local
//! `static const`, which C++ initialises exactly once even under
//! concurrent first calls.

use crate::canon::{CanonicalRecord, COLLAPSED_ATOMS, VARIABLE_ATOMS};
use crate::config::{HEADER_FILE, INCLUDE_GUARD, NAMESPACES};
use crate::halide::OpKind;
use crate::order::Constant;
use crate::table::{Arity, OrderedTable};

const TAB: &str = "    ";
const TABLE_TYPE: &str = "vector<vector<AssociativePair>>";

// dispatch order of the generated lookup
const DISPATCH_ORDER: [OpKind; 5] = [OpKind::Add, OpKind::Sub, OpKind::Mul, OpKind::Min, OpKind::Max];

fn line(out: &mut String, depth: usize, text: &str) {
    for _ in 0..depth {
        out.push_str(TAB);
    }
    out.push_str(text);
    out.push('\n');
}

fn open_namespaces(out: &mut String) {
    for ns in NAMESPACES {
        line(out, 0, &format!("namespace {} {{", ns));
    }
    out.push('\n');
}

fn close_namespaces(out: &mut String) {
    out.push('\n');
    for _ in NAMESPACES {
        line(out, 0, "}");
    }
    out.push('\n');
}

pub fn accessor_name(op: OpKind, arity: Arity) -> String {
    format!("get_{}_i32_ops_table_{}", arity.name(), op.suffix())
}

/// Identity as a typed constant. Sentinels are already named.
fn identity_expr(identity: &str) -> String {
    match identity.parse::<i64>() {
        Ok(value) => format!("make_const(i32, {})", value),
        Err(_) => identity.to_string(),
    }
}

fn row(record: &CanonicalRecord) -> String {
    format!(
        "{{{{{}, {}}}}},",
        record.expression,
        identity_expr(&record.identity)
    )
}

pub fn render_header() -> String {
    let mut out = String::new();
    line(&mut out, 0, &format!("#ifndef {}", INCLUDE_GUARD));
    line(&mut out, 0, &format!("#define {}", INCLUDE_GUARD));
    out.push('\n');
    line(&mut out, 0, "/** \\file");
    line(&mut out, 0, " * Tables listing associative operators and their identities.");
    line(&mut out, 0, " */");
    out.push('\n');
    line(&mut out, 0, "#include \"Halide.h\"");
    out.push('\n');
    line(&mut out, 0, "#include <iostream>");
    line(&mut out, 0, "#include <vector>");
    out.push('\n');
    open_namespaces(&mut out);

    line(&mut out, 0, "struct AssociativePair {");
    line(&mut out, 1, "Expr op;");
    line(&mut out, 1, "Expr identity;");
    out.push('\n');
    line(&mut out, 1, "AssociativePair() {}");
    line(&mut out, 1, "AssociativePair(Expr op) : op(op) {}");
    line(&mut out, 1, "AssociativePair(Expr op, Expr id) : op(op), identity(id) {}");
    line(&mut out, 0, "};");
    out.push('\n');
    line(
        &mut out,
        0,
        "const std::vector<std::vector<AssociativePair>> &get_i32_ops_table(const std::vector<Expr> &exprs);",
    );

    close_namespaces(&mut out);
    line(&mut out, 0, "#endif");
    out
}

fn render_constants(out: &mut String, table: &OrderedTable) {
    line(out, 0, "const Type i32 = Int(32);");
    line(out, 0, "const Expr i32_zero = make_const(i32, 0);");
    line(out, 0, "const Expr i32_one = make_const(i32, 1);");
    line(out, 0, "const Expr i32_tmax = i32.max();");
    line(out, 0, "const Expr i32_tmin = i32.min();");
    out.push('\n');

    for (var, atom) in VARIABLE_ATOMS.iter() {
        line(
            out,
            0,
            &format!("const Expr {} = Variable::make(i32, \"{}\");", atom, var),
        );
    }
    out.push('\n');

    let mut any = false;
    for Constant { name, var } in table.constants() {
        line(
            out,
            0,
            &format!("const Expr {} = Variable::make(i32, \"{}\");", name, var),
        );
        any = true;
    }
    if any {
        out.push('\n');
    }

    // one group per variable pair
    for group in COLLAPSED_ATOMS.chunks(8) {
        for (pattern, atom) in group {
            line(out, 0, &format!("const Expr {} = {};", atom, pattern));
        }
        out.push('\n');
    }
}

fn render_accessor(out: &mut String, op: OpKind, arity: Arity, rows: &[CanonicalRecord]) {
    line(
        out,
        0,
        &format!("const {} &{}() {{", TABLE_TYPE, accessor_name(op, arity)),
    );
    if rows.is_empty() {
        line(out, 1, &format!("static const {} exprs;", TABLE_TYPE));
    } else {
        line(out, 1, &format!("static const {} exprs = {{", TABLE_TYPE));
        for record in rows {
            line(out, 2, &row(record));
        }
        line(out, 1, "};");
    }
    line(out, 1, "return exprs;");
    line(out, 0, "}");
    out.push('\n');
}

fn render_dispatch(out: &mut String) {
    line(
        out,
        0,
        "const std::vector<std::vector<AssociativePair>> &get_i32_ops_table(const vector<Expr> &exprs) {",
    );
    line(
        out,
        1,
        "static const std::vector<std::vector<AssociativePair>> empty;",
    );
    line(out, 1, "if (exprs.empty()) {");
    line(out, 2, "return empty;");
    line(out, 1, "}");
    for (i, op) in DISPATCH_ORDER.iter().enumerate() {
        let keyword = if i == 0 { "if" } else { "} else if" };
        line(
            out,
            1,
            &format!("{} (exprs[0].as<{}>()) {{", keyword, op.name()),
        );
        line(
            out,
            2,
            &format!("debug(5) << \"Returning {} root table\\n\";", op.suffix()),
        );
        line(out, 2, "if (exprs.size() == 1) {");
        line(
            out,
            3,
            &format!("return {}();", accessor_name(*op, Arity::Single)),
        );
        line(out, 2, "} else {");
        line(
            out,
            3,
            &format!("return {}();", accessor_name(*op, Arity::Double)),
        );
        line(out, 2, "}");
    }
    line(out, 1, "}");
    line(out, 1, "debug(5) << \"Returning empty table\\n\";");
    line(out, 1, "return empty;");
    line(out, 0, "}");
}

fn render_smoke_test(out: &mut String) {
    line(out, 0, "using namespace Halide;");
    line(out, 0, "using namespace Halide::Internal;");
    out.push('\n');
    line(out, 0, "int main() {");
    line(out, 1, "Expr x = Variable::make(Int(32), \"x\");");
    line(out, 1, "Expr y = Variable::make(Int(32), \"y\");");
    line(out, 1, "Expr expr = Min::make(x, y);");
    line(out, 1, "const auto &table = get_i32_ops_table({expr});");
    line(out, 1, "if (table.empty()) {");
    line(out, 2, "std::cout << \"Empty min table\\n\";");
    line(out, 2, "return 1;");
    line(out, 1, "}");
    line(
        out,
        1,
        "std::cout << \"Op: \" << table[0][0].op << \" with id: \" << table[0][0].identity << \"\\n\";",
    );
    line(out, 1, "return 0;");
    line(out, 0, "}");
}

pub fn render_source(table: &OrderedTable) -> String {
    let mut out = String::new();
    line(&mut out, 0, &format!("#include \"{}\"", HEADER_FILE));
    out.push('\n');
    line(&mut out, 0, "using std::vector;");
    out.push('\n');
    open_namespaces(&mut out);
    line(&mut out, 0, "namespace {");
    out.push('\n');

    render_constants(&mut out, table);
    for (op, arity, rows) in table.buckets() {
        render_accessor(&mut out, op, arity, rows);
    }

    line(&mut out, 0, "}  // namespace");
    out.push('\n');
    render_dispatch(&mut out);
    close_namespaces(&mut out);
    render_smoke_test(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::OrderedRecord;
    use crate::table::partition;

    fn table() -> OrderedTable {
        let rows = vec![
            OrderedRecord {
                root: OpKind::Min,
                ops: vec![OpKind::Min],
                constants: vec![],
                record: CanonicalRecord {
                    expression: "i32_min_x0y0".to_string(),
                    identity: "i32_tmax".to_string(),
                },
            },
            OrderedRecord {
                root: OpKind::Add,
                ops: vec![OpKind::Add, OpKind::Min],
                constants: vec![Constant::new("k0")],
                record: CanonicalRecord {
                    expression: "Add::make(Min::make(i32_x0, k0), i32_y0)".to_string(),
                    identity: "-1".to_string(),
                },
            },
        ];
        partition(&rows, Arity::Single)
    }

    #[test]
    fn accessor_rows() {
        let src = render_source(&table());
        assert!(src.contains(
            "const vector<vector<AssociativePair>> &get_single_i32_ops_table_min() {\n    static const vector<vector<AssociativePair>> exprs = {\n        {{i32_min_x0y0, i32_tmax}},\n    };"
        ));
        assert!(src.contains("{{Add::make(Min::make(i32_x0, k0), i32_y0), make_const(i32, -1)}},"));
        assert!(src.contains("const Expr k0 = Variable::make(i32, \"k0\");"));
        assert!(src.contains("const Expr i32_sub_y1x1 = Sub::make(i32_y1, i32_x1);"));
    }

    #[test]
    fn constants_declared_under_row_names() {
        let rows = vec![OrderedRecord {
            root: OpKind::Add,
            ops: vec![OpKind::Add, OpKind::Max],
            constants: vec![Constant::new("kx0")],
            record: CanonicalRecord {
                expression: "Add::make(Max::make(i32_x0, ki32_x0), i32_y0)".to_string(),
                identity: "i32_zero".to_string(),
            },
        }];
        let src = render_source(&partition(&rows, Arity::Single));
        assert!(src.contains("const Expr ki32_x0 = Variable::make(i32, \"kx0\");"));
        assert!(!src.contains("const Expr kx0 "));
    }

    #[test]
    fn empty_buckets_are_still_emitted() {
        let src = render_source(&OrderedTable::new());
        for arity in Arity::ALL {
            for op in OpKind::ALL {
                let decl = format!("&{}() {{\n    static const {} exprs;\n", accessor_name(op, arity), TABLE_TYPE);
                assert!(src.contains(&decl), "missing {}", decl);
            }
        }
        assert!(src.contains("return empty;"));
    }

    #[test]
    fn header_declares_lookup() {
        let h = render_header();
        assert!(h.starts_with("#ifndef HALIDE_ASSOCIATIVE_OPS_TABLE_H\n"));
        assert!(h.contains("AssociativePair(Expr op, Expr id) : op(op), identity(id) {}"));
        assert!(h.contains("get_i32_ops_table(const std::vector<Expr> &exprs);"));
        assert!(h.ends_with("#endif\n"));
    }
}
