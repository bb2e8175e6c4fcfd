use egg::*;

use crate::error::{GenError, Result};
use std::fmt;
use std::iter::Peekable;
use std::str::{CharIndices, FromStr};

pub type RecExpr = egg::RecExpr<Halide>;

/// The four variables a proof expression ranges over.
pub const VARIABLES: [&str; 4] = ["x0", "y0", "x1", "y1"];

// constructors as they appear in prover output
define_language! {
    pub enum Halide {
        "Add::make" = Add([Id; 2]),
        "Mul::make" = Mul([Id; 2]),
        "Max::make" = Max([Id; 2]),
        "Min::make" = Min([Id; 2]),
        "Sub::make" = Sub([Id; 2]),

        Leaf(egg::Symbol),
        Other(egg::Symbol, Vec<Id>),
    }
}

/// Kind of a binary operator, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpKind {
    Add,
    Mul,
    Max,
    Min,
    Sub,
}

impl OpKind {
    pub const ALL: [OpKind; 5] = [OpKind::Add, OpKind::Mul, OpKind::Max, OpKind::Min, OpKind::Sub];

    /// Classifies a constructor name by its first three characters.
    pub fn from_prefix(name: &str) -> Option<Self> {
        match name.get(..3)? {
            "Add" => Some(OpKind::Add),
            "Mul" => Some(OpKind::Mul),
            "Max" => Some(OpKind::Max),
            "Min" => Some(OpKind::Min),
            "Sub" => Some(OpKind::Sub),
            _ => None,
        }
    }

    /// Position in the ordering key.
    pub fn rank(self) -> u8 {
        match self {
            OpKind::Add => 0,
            OpKind::Mul => 1,
            OpKind::Max => 2,
            OpKind::Min => 3,
            OpKind::Sub => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OpKind::Add => "Add",
            OpKind::Mul => "Mul",
            OpKind::Max => "Max",
            OpKind::Min => "Min",
            OpKind::Sub => "Sub",
        }
    }

    /// Lowercase form used in atom and accessor names.
    pub fn suffix(self) -> &'static str {
        match self {
            OpKind::Add => "add",
            OpKind::Mul => "mul",
            OpKind::Max => "max",
            OpKind::Min => "min",
            OpKind::Sub => "sub",
        }
    }

    fn node(self, children: [Id; 2]) -> Halide {
        match self {
            OpKind::Add => Halide::Add(children),
            OpKind::Mul => Halide::Mul(children),
            OpKind::Max => Halide::Max(children),
            OpKind::Min => Halide::Min(children),
            OpKind::Sub => Halide::Sub(children),
        }
    }
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Halide {
    pub fn op_kind(&self) -> Option<OpKind> {
        match self {
            Halide::Add(_) => Some(OpKind::Add),
            Halide::Mul(_) => Some(OpKind::Mul),
            Halide::Max(_) => Some(OpKind::Max),
            Halide::Min(_) => Some(OpKind::Min),
            Halide::Sub(_) => Some(OpKind::Sub),
            Halide::Leaf(_) | Halide::Other(..) => None,
        }
    }
}

/// An expression from a proof log, kept next to its source text so
/// errors can quote it.
#[derive(Debug, Clone)]
pub struct ProofExpr {
    text: String,
    rec: RecExpr,
}

impl ProofExpr {
    pub fn parse(text: &str) -> Result<Self> {
        let mut parser = Parser {
            text,
            chars: text.char_indices().peekable(),
            rec: Default::default(),
        };
        parser.expr()?;
        parser.skip_whitespace();
        if let Some((pos, _)) = parser.chars.peek() {
            return Err(GenError::malformed(
                text,
                format!("trailing input at byte {}", pos),
            ));
        }
        Ok(ProofExpr {
            text: text.to_string(),
            rec: parser.rec,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn rec_expr(&self) -> &RecExpr {
        &self.rec
    }

    fn root(&self) -> Id {
        Id::from(self.rec.as_ref().len() - 1)
    }

    /// Operators in pre-order, which is the order their constructors
    /// appear in the text.
    pub fn op_sequence(&self) -> Result<Vec<OpKind>> {
        let mut ops = vec![];
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            let node = &self.rec[id];
            match node {
                Halide::Leaf(_) => continue,
                Halide::Other(op, _) => {
                    return Err(GenError::UnknownOperator {
                        op: op.to_string(),
                        expression: self.text.clone(),
                    })
                }
                _ => {}
            }
            if let Some(kind) = node.op_kind() {
                ops.push(kind);
            }
            stack.extend(node.children().iter().rev().copied());
        }
        Ok(ops)
    }

    pub fn root_kind(&self) -> Result<OpKind> {
        let node = &self.rec[self.root()];
        if let Some(kind) = node.op_kind() {
            return Ok(kind);
        }
        match node {
            Halide::Other(op, _) => Err(GenError::UnknownOperator {
                op: op.to_string(),
                expression: self.text.clone(),
            }),
            _ => Err(GenError::MissingRootOperator {
                expression: self.text.clone(),
            }),
        }
    }

    /// Leaves that are neither proof variables nor integer literals,
    /// e.g. the prover's `k0`.
    pub fn free_constants(&self) -> Vec<String> {
        let mut names: Vec<String> = vec![];
        for node in self.rec.as_ref() {
            if let Halide::Leaf(sym) = node {
                let name = sym.as_str();
                let is_var = VARIABLES.contains(&name);
                if !is_var && name.parse::<i64>().is_err() && !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

impl FromStr for ProofExpr {
    type Err = GenError;

    fn from_str(s: &str) -> Result<Self> {
        ProofExpr::parse(s)
    }
}

impl fmt::Display for ProofExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

struct Parser<'a> {
    text: &'a str,
    chars: Peekable<CharIndices<'a>>,
    rec: RecExpr,
}

fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':' || c == '-'
}

impl<'a> Parser<'a> {
    fn skip_whitespace(&mut self) {
        while self.chars.peek().map_or(false, |(_, c)| c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn error(&self, reason: impl Into<String>) -> GenError {
        GenError::malformed(self.text, reason)
    }

    fn token(&mut self) -> Result<&'a str> {
        self.skip_whitespace();
        let start = match self.chars.peek() {
            Some(&(pos, c)) if is_token_char(c) => pos,
            Some(&(pos, c)) => {
                return Err(self.error(format!("unexpected `{}` at byte {}", c, pos)))
            }
            None => return Err(self.error("unexpected end of input")),
        };
        let mut end = start;
        while let Some(&(pos, c)) = self.chars.peek() {
            if !is_token_char(c) {
                break;
            }
            end = pos + c.len_utf8();
            self.chars.next();
        }
        let text = self.text;
        Ok(&text[start..end])
    }

    fn expect(&mut self, want: char) -> Result<()> {
        self.skip_whitespace();
        match self.chars.next() {
            Some((_, c)) if c == want => Ok(()),
            Some((pos, c)) => Err(self.error(format!(
                "expected `{}` but found `{}` at byte {}",
                want, c, pos
            ))),
            None => Err(self.error(format!("expected `{}` but input ended", want))),
        }
    }

    fn expr(&mut self) -> Result<Id> {
        let name = self.token()?;
        self.skip_whitespace();
        if !matches!(self.chars.peek(), Some((_, '('))) {
            if name.contains(':') {
                return Err(self.error(format!("constructor `{}` has no arguments", name)));
            }
            return Ok(self.rec.add(Halide::Leaf(name.into())));
        }

        let op = name
            .strip_suffix("::make")
            .ok_or_else(|| self.error(format!("`{}` is not a `::make` constructor", name)))?;
        self.expect('(')?;
        let mut args = vec![self.expr()?];
        loop {
            self.skip_whitespace();
            match self.chars.peek() {
                Some((_, ',')) => {
                    self.chars.next();
                    args.push(self.expr()?);
                }
                _ => break,
            }
        }
        self.expect(')')?;

        let node = match OpKind::from_prefix(op) {
            Some(kind) => match args[..] {
                [a, b] => kind.node([a, b]),
                _ => {
                    return Err(self.error(format!(
                        "`{}` takes 2 arguments, got {}",
                        name,
                        args.len()
                    )))
                }
            },
            None => Halide::Other(op.into(), args),
        };
        Ok(self.rec.add(node))
    }
}
