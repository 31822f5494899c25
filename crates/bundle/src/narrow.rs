use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::{BundleError, Result};

/// Narrow a catalog to the files a real compilation would include.
///
/// Runs the compiler's dependency-listing mode (`-MM`) with the codebook root
/// on the include path and one `-D<NAME>` per define, then intersects the
/// reported headers with `catalog`. Conditional compilation can make a quoted
/// include inert for a given define set; the compiler, not this tool, is the
/// authority on which headers are actually pulled in.
///
/// A non-zero exit is fatal: the captured stderr is surfaced verbatim and no
/// partial result is produced.
pub fn narrow(
    input: &Path,
    defines: &[String],
    compiler: &str,
    root: &Path,
    catalog: &BTreeSet<PathBuf>,
) -> Result<BTreeSet<PathBuf>> {
    let mut cmd = Command::new(compiler);
    cmd.arg("-MM").arg(input).arg("-I").arg(root);
    for define in defines {
        cmd.arg(format!("-D{define}"));
    }

    log::debug!("dependency scan: {cmd:?}");
    let output = cmd.output().map_err(|source| BundleError::Spawn {
        compiler: compiler.to_string(),
        source,
    })?;
    if !output.status.success() {
        return Err(BundleError::DepScan {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let narrowed = intersect(dep_tokens(&stdout), catalog);
    log::info!(
        "dependency scan kept {} of {} catalogued files",
        narrowed.len(),
        catalog.len()
    );
    Ok(narrowed)
}

/// Header tokens of a `-MM` listing: whitespace-separated, with bare `\`
/// line-continuation markers dropped and the leading object-file and
/// source-file tokens skipped.
fn dep_tokens(stdout: &str) -> impl Iterator<Item = &str> {
    stdout
        .split_whitespace()
        .filter(|token| *token != "\\")
        .skip(2)
}

fn intersect<'a>(
    tokens: impl Iterator<Item = &'a str>,
    catalog: &BTreeSet<PathBuf>,
) -> BTreeSet<PathBuf> {
    tokens
        .filter_map(|token| Path::new(token).canonicalize().ok())
        .filter(|path| catalog.contains(path))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn dep_tokens_skip_object_source_and_continuations() {
        let listing = "main.o: main.cpp lib/a.h \\\n lib/b.h\n";
        let tokens: Vec<&str> = dep_tokens(listing).collect();
        assert_eq!(tokens, vec!["lib/a.h", "lib/b.h"]);
    }

    #[test]
    fn intersect_keeps_only_catalogued_paths() {
        let temp = tempdir().unwrap();
        let root = temp.path().canonicalize().unwrap();
        fs::create_dir_all(root.join("lib")).unwrap();
        fs::write(root.join("lib/a.h"), "").unwrap();
        fs::write(root.join("lib/b.h"), "").unwrap();

        let catalog: BTreeSet<PathBuf> = [root.join("lib/a.h")].into_iter().collect();
        let a = root.join("lib/a.h").display().to_string();
        let b = root.join("lib/b.h").display().to_string();

        let narrowed = intersect([a.as_str(), b.as_str()].into_iter(), &catalog);
        assert_eq!(narrowed, catalog);
    }

    #[test]
    fn unresolvable_tokens_are_ignored() {
        let catalog = BTreeSet::new();
        let narrowed = intersect(["/no/such/header.h"].into_iter(), &catalog);
        assert!(narrowed.is_empty());
    }

    #[test]
    fn failed_scan_surfaces_the_exit_status() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        fs::write(root.join("main.cpp"), "int main() {}\n").unwrap();

        // `false` ignores its arguments and exits non-zero.
        let err = narrow(
            &root.join("main.cpp"),
            &[],
            "false",
            root,
            &BTreeSet::new(),
        )
        .unwrap_err();

        assert!(matches!(err, BundleError::DepScan { .. }));
    }

    #[test]
    fn unknown_compiler_is_a_spawn_error() {
        let temp = tempdir().unwrap();
        let root = temp.path();

        let err = narrow(
            &root.join("main.cpp"),
            &[],
            "definitely-not-a-compiler",
            root,
            &BTreeSet::new(),
        )
        .unwrap_err();

        assert!(matches!(err, BundleError::Spawn { .. }));
    }
}
