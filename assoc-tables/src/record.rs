//! Proof log lines.
//!
//! The prover prints one result per line, mixed with progress and
//! diagnostic output. Only the two result forms below are records:
//!
//! ```text
//! Leaves: 2, i: 0, Min::make(x0, y0) -> Left-associativity with identity: { 2147483647 }
//! Leaves: 3, i: 7, Sub::make(x0, y0) -> UNKNOWN associative with right-identity: { 0 }
//! ```

use regex::Regex;
use std::sync::OnceLock;

/// Which associativity variant the prover established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Unknown,
}

impl Direction {
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("left") {
            Direction::Left
        } else if token.eq_ignore_ascii_case("right") {
            Direction::Right
        } else {
            Direction::Unknown
        }
    }
}

/// Which of the two line forms produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProofStatus {
    Proven,
    /// Associativity unconfirmed; the direction names the side the
    /// identity was checked on.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProofRecord {
    pub expression: String,
    pub direction: Direction,
    pub status: ProofStatus,
    pub identity: String,
}

fn proven_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"Leaves: \d+, i: \d+, (.*) -> (\w*)-associativity with identity: \{ (-?\d+) \}",
        )
        .unwrap()
    })
}

fn unknown_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"Leaves: \d+, i: \d+, (.*) -> UNKNOWN associative with (\w*)-identity: \{ (-?\d+) \}",
        )
        .unwrap()
    })
}

/// Parses one log line, returning `None` for anything that is not a
/// result line.
pub fn parse_line(line: &str) -> Option<ProofRecord> {
    let (caps, status) = match proven_re().captures(line) {
        Some(caps) => (caps, ProofStatus::Proven),
        None => (unknown_re().captures(line)?, ProofStatus::Unknown),
    };
    Some(ProofRecord {
        expression: caps[1].to_string(),
        direction: Direction::from_token(&caps[2]),
        status,
        identity: caps[3].to_string(),
    })
}
