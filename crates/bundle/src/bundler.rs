use std::collections::{BTreeSet, HashSet};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::directive::{parse_include, PRAGMA_ONCE};
use crate::{BundleError, Result};

/// Recursive include expander.
///
/// Holds the codebook root and the set of files that may be inlined; each call
/// to [`Bundler::bundle`] is an independent run with its own inserted-set, so
/// one `Bundler` can produce several outputs without the runs interfering.
pub struct Bundler {
    root: PathBuf,
    eligible: BTreeSet<PathBuf>,
}

impl Bundler {
    pub fn new(root: impl AsRef<Path>, eligible: BTreeSet<PathBuf>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            eligible,
        }
    }

    /// Expand `input` into a single self-contained stream.
    ///
    /// `defines` are pre-declared as `#define` lines ahead of the expansion;
    /// a `NAME=VALUE` entry becomes `#define NAME VALUE`.
    pub fn bundle<W: Write>(&self, input: &Path, defines: &[String], out: &mut W) -> Result<()> {
        let input = input
            .canonicalize()
            .map_err(|_| BundleError::MissingInput(input.to_path_buf()))?;

        for define in defines {
            match define.split_once('=') {
                Some((name, value)) => writeln!(out, "#define {name} {value}")?,
                None => writeln!(out, "#define {define}")?,
            }
        }

        let mut inserted = HashSet::new();
        self.expand(&input, false, &mut inserted, out)
    }

    /// Depth-first expansion of one file.
    ///
    /// `before_pragma` is true only for files reached through an include; while
    /// it holds, lines ahead of the `#pragma once` marker are dropped so guard
    /// boilerplate appears once per output, not once per inclusion site.
    fn expand<W: Write>(
        &self,
        path: &Path,
        before_pragma: bool,
        inserted: &mut HashSet<PathBuf>,
        out: &mut W,
    ) -> Result<()> {
        if inserted.contains(path) {
            writeln!(out, "// already included")?;
            return Ok(());
        }
        inserted.insert(path.to_path_buf());

        log::info!("copying {}", path.display());
        let text = fs::read_to_string(path).map_err(|source| BundleError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let lines: Vec<&str> = text.lines().collect();

        // A file without the marker contributes from its first line.
        let mut suppressing = before_pragma && lines.iter().any(|l| l.trim() == PRAGMA_ONCE);
        if !suppressing {
            writeln!(out, "#line 1 \"{}\"", path.display())?;
        }

        for (idx, line) in lines.iter().enumerate() {
            if line.trim() == PRAGMA_ONCE {
                // Body starts on the next line; the marker itself is dropped.
                writeln!(out, "#line {} \"{}\"", idx + 2, path.display())?;
                suppressing = false;
                continue;
            }
            if suppressing {
                continue;
            }
            if let Some(target) = parse_include(line) {
                if let Some(resolved) = self.resolve(target) {
                    if self.eligible.contains(&resolved) {
                        writeln!(out, "// START {line}")?;
                        self.expand(&resolved, true, inserted, out)?;
                        writeln!(out, "// END {line}")?;
                        writeln!(out, "#line {} \"{}\"", idx + 2, path.display())?;
                        continue;
                    }
                }
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    /// Resolve a quoted include path against the root. A target that cannot be
    /// resolved is simply not eligible; the directive line passes through.
    fn resolve(&self, quoted: &str) -> Option<PathBuf> {
        self.root.join(quoted).canonicalize().ok()
    }
}
