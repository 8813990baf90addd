//! # jnrgen-core
//!
//! A library for generating JNR-FFI Java bindings from the `wgpu-native`
//! C header.
//!
//! This crate provides the core functionality for:
//! - Tokenizing the restricted C header subset the generator understands
//! - Parsing typedefs for enums, structs, and scalar aliases plus `#define`
//!   integer constants into declaration nodes
//! - Registering every declaration in a symbol table, patching known-bad
//!   struct layouts, and emitting one Java source unit per declaration
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`lexer`]: Header tokenization
//! - [`parser`]: Declaration parsing
//! - [`model`]: Declaration nodes
//! - [`registry`]: Symbol table, type resolution, and code emission
//! - [`hooks`]: Patch registry for layout corrections
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```no_run
//! use jnrgen_core::{parse_header, GeneratorConfig, HookSet, Registry};
//! use std::fs;
//! use std::path::Path;
//!
//! // Read the header and parse its declarations
//! let header = fs::read_to_string("wgpu.h")?;
//! let declarations = parse_header(&header);
//!
//! // Register every name, run the built-in patches, then emit
//! let mut registry = Registry::new(GeneratorConfig::default(), declarations);
//! registry.register_all()?;
//! registry.apply_hooks(&HookSet::standard())?;
//!
//! let stats = registry.emit_all(Path::new("./jnr-gen"))?;
//! println!("wrote {} files", stats.files_written);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Extensibility
//!
//! The generator's heuristics are injected configuration, not module state:
//!
//! - [`GeneratorConfig`]/[`NamingConfig`] carry the naming policy (library
//!   prefix, the enum tag-suffix strip, corrective renames) and the
//!   exclusion list
//! - [`HookSet`] carries the mock-struct seeds and per-struct layout patches
//!

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod error;
pub mod hooks;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod registry;

// Re-export primary types for convenience
pub use error::{Error, Result};
pub use hooks::HookSet;
pub use lexer::{Lexer, Token, TokenKind};
pub use model::Declaration;
pub use parser::{parse_header, Parser};
pub use registry::{
    generate_bindings, GeneratedUnit, GeneratorConfig, NamingConfig, Registry, RenderOutcome,
    RunStats,
};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
