use std::path::{Path, PathBuf};

/// Proof log written by the prover.
pub const INPUT_FILE: &str = "single_constant.txt";
pub const HEADER_FILE: &str = "AssociativeOpsTable.h";
pub const SOURCE_FILE: &str = "AssociativeOpsTable.cpp";

pub const INCLUDE_GUARD: &str = "HALIDE_ASSOCIATIVE_OPS_TABLE_H";
/// Namespaces wrapping the generated declarations, outermost first.
pub const NAMESPACES: [&str; 2] = ["Halide", "Internal"];

/// Directory a run reads its log from and writes its tables to. The file
/// names themselves are fixed so the generated files are reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub dir: PathBuf,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self::in_dir(".")
    }
}

impl GenConfig {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn input_path(&self) -> PathBuf {
        self.dir.join(INPUT_FILE)
    }

    pub fn header_path(&self) -> PathBuf {
        self.dir.join(HEADER_FILE)
    }

    pub fn source_path(&self) -> PathBuf {
        self.dir.join(SOURCE_FILE)
    }
}
