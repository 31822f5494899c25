use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use codebook_catalog::FileCatalog;
use codebook_search::FuzzyFinder;
use std::path::{Path, PathBuf};

mod compile;
mod insert;
mod timing;

#[derive(Parser)]
#[command(name = "codebook")]
#[command(about = "Single-file bundling for competitive programming libraries", long_about = None)]
#[command(version)]
struct Cli {
    /// Codebook root directory
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log only warnings and errors
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List all library files under the root
    #[command(visible_aliases = ["ls", "l"])]
    List(ListArgs),

    /// Fuzzy-search library file names
    Find(FindArgs),

    /// Replace quoted includes with the referenced code
    #[command(visible_alias = "i")]
    Insert(insert::InsertArgs),

    /// Compile a file with the house warning and sanitizer flag set
    Compile(compile::CompileArgs),

    /// Time a compiled binary over repeated runs
    #[command(visible_alias = "t")]
    Time(timing::TimeArgs),
}

#[derive(Args)]
struct ListArgs {
    /// Print the listing as a JSON array
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct FindArgs {
    /// Pattern to match against library file names
    pattern: String,

    /// Maximum number of matches to print
    #[arg(short = 'n', long, default_value_t = 10)]
    limit: usize,

    /// Print match scores alongside the paths
    #[arg(short, long)]
    scores: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.quiet, cli.verbose);

    anyhow::ensure!(
        cli.root.is_dir(),
        "codebook root {} is not a directory",
        cli.root.display()
    );

    match &cli.command {
        Commands::List(args) => list(&cli.root, args),
        Commands::Find(args) => find(&cli.root, args),
        Commands::Insert(args) => insert::run(&cli.root, args),
        Commands::Compile(args) => compile::run(&cli.root, args),
        Commands::Time(args) => timing::run(args),
    }
}

fn init_logger(quiet: bool, verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn list(root: &Path, args: &ListArgs) -> Result<()> {
    let catalog = FileCatalog::new(root);
    let files = catalog.scan()?;
    let relative = catalog.relative(&files)?;

    if args.json {
        let names: Vec<String> = relative.iter().map(|p| p.display().to_string()).collect();
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for path in relative {
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn find(root: &Path, args: &FindArgs) -> Result<()> {
    let catalog = FileCatalog::new(root);
    let files = catalog.scan()?;
    let candidates: Vec<String> = catalog
        .relative(&files)?
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let mut finder = FuzzyFinder::new();
    for (idx, score) in finder.search(&args.pattern, &candidates, args.limit) {
        if args.scores {
            println!("{score:.2}: {}", candidates[idx]);
        } else {
            println!("{}", candidates[idx]);
        }
    }
    Ok(())
}
