//! # Codebook Bundle
//!
//! Source amalgamation for single-file submission: recursively replaces
//! project-local quoted includes with the referenced file's contents.
//!
//! ## Pipeline
//!
//! ```text
//! Catalog (eligible files)
//!     │
//!     ├──> Dependency Narrower (optional, compiler -MM)
//!     │      └─> Eligible subset for this define set
//!     │
//!     └──> Bundler (recursive expansion)
//!            └─> Single self-contained stream
//! ```
//!
//! The expansion emulates `#pragma once` without running a preprocessor: each
//! file's body lands in the output at most once, guard regions ahead of the
//! marker are dropped on inclusion, and `#line` markers keep compiler
//! diagnostics against the output traceable to the original files.
//!
//! This is a text-level approximation, not a C preprocessor. Exactly one guard
//! idiom (`#pragma once`) and two include spellings (`#include`, `%:include`)
//! are recognized; every other conditional-compilation construct is opaque
//! content and passes through unchanged.

mod bundler;
mod directive;
mod error;
mod narrow;

pub use bundler::Bundler;
pub use directive::{parse_include, PRAGMA_ONCE, SKIP_MARK};
pub use error::{BundleError, Result};
pub use narrow::narrow;
