use anyhow::{Context, Result};
use clap::Args;
use codebook_bundle::{narrow, Bundler};
use codebook_catalog::FileCatalog;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub(crate) struct InsertArgs {
    /// File to bundle; resolved against the root when not found as given
    pub(crate) input: PathBuf,

    /// Output file
    #[arg(short, long, default_value = "to_submit.cpp")]
    pub(crate) output: PathBuf,

    /// Macro define (NAME or NAME=VALUE); used for the dependency scan and
    /// pre-declared at the top of the output
    #[arg(short = 'd', long = "define")]
    pub(crate) defines: Vec<String>,

    /// Inline every catalogued header without asking the compiler which ones
    /// this build would actually pull in
    #[arg(long, conflicts_with = "defines")]
    pub(crate) no_narrow: bool,

    /// Compiler used for the dependency scan
    #[arg(long, default_value = "g++")]
    pub(crate) compiler: String,
}

pub(crate) fn run(root: &Path, args: &InsertArgs) -> Result<()> {
    let input = resolve_input(root, &args.input)?;

    let catalog = FileCatalog::new(root);
    let files = catalog
        .scan()
        .with_context(|| format!("failed to catalog {}", root.display()))?;
    let eligible = if args.no_narrow {
        files
    } else {
        narrow(&input, &args.defines, &args.compiler, root, &files)?
    };

    let bundler = Bundler::new(root, eligible);
    let mut buffer = Vec::new();
    bundler.bundle(&input, &args.defines, &mut buffer)?;

    // Temp-then-rename: a failed run never leaves a truncated submission file.
    let mut tmp = args.output.clone().into_os_string();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);
    fs::write(&tmp, &buffer).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, &args.output)
        .with_context(|| format!("failed to move output to {}", args.output.display()))?;

    log::info!("wrote {}", args.output.display());
    Ok(())
}

fn resolve_input(root: &Path, input: &Path) -> Result<PathBuf> {
    if input.is_file() {
        return Ok(input.to_path_buf());
    }
    let joined = root.join(input);
    anyhow::ensure!(
        joined.is_file(),
        "input file {} not found (also tried {})",
        input.display(),
        joined.display()
    );
    Ok(joined)
}
