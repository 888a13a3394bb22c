//! Intcode program loader and disassembler.
//!
//! The loader turns comma-separated text into a [`Program`]. It is
//! permissive: anything that is not a digit or `-` separates numbers, and
//! tokens that do not parse are skipped. It never fails.
//!
//! The disassembler renders decoded instructions for diagnostics.
//!
//! # Usage
//!
//! ```
//! use intcode_assembler::{listing, load};
//!
//! let program = load("104,1125899906842624,99\n");
//! assert_eq!(program.cells(), &[104, 1125899906842624, 99]);
//! assert_eq!(listing(&program), "    0: out #1125899906842624\n    2: halt\n");
//! ```

mod disassembler;
mod lexer;

pub use disassembler::{disassemble, listing};

use std::fs;
use std::path::Path;

use intcode_common::Program;
use lexer::{parse_token, tokenize};

/// Load a program from text.
///
/// Numbers appear in the order written. Empty input yields an empty program.
pub fn load(text: &str) -> Program {
    Program::new(tokenize(text).filter_map(parse_token).collect())
}

/// Load a program from a file.
///
/// A file that cannot be read yields an empty program. Invalid UTF-8 is
/// replaced rather than rejected, since only ASCII digits matter.
pub fn load_file(path: impl AsRef<Path>) -> Program {
    match fs::read(path) {
        Ok(bytes) => load(&String::from_utf8_lossy(&bytes)),
        Err(_) => Program::default(),
    }
}
