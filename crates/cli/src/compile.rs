use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Known compilers and their standard flag; the first entry is the default
/// and the fallback for unrecognized `--compiler` values.
const COMPILER_STD: [(&str, &str); 2] = [("g++", "-std=c++2a"), ("g++-11", "-std=c++20")];

const WARNING_FLAGS: [&str; 7] = [
    "-O2",
    "-g",
    "-fmax-errors=1",
    "-Wall",
    "-Wextra",
    "-Wshadow",
    "-Wconversion",
];

const OPT_INFO_FLAGS: [&str; 2] = ["-fopt-info-vec-optimized", "-fopt-info-loop-optimized"];

const DEBUG_FLAGS: [&str; 6] = [
    "-O0",
    "-ggdb",
    "-fsanitize=address,undefined",
    "-fno-omit-frame-pointer",
    "-D",
    "DEBUG",
];

#[derive(Args)]
pub(crate) struct CompileArgs {
    /// File to compile; `.cpp` is assumed when the extension is missing
    pub(crate) input: PathBuf,

    /// Binary output; default is the input minus its extension
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    /// Compiler to invoke
    #[arg(long, default_value = "g++")]
    pub(crate) compiler: String,

    /// Add optimization info flags
    #[arg(short = 'i', long)]
    pub(crate) opt_info: bool,

    /// Add debug and sanitizer flags
    #[arg(short = 'g', long)]
    pub(crate) debug: bool,

    /// Extra compiler arguments (after `--`)
    #[arg(last = true)]
    pub(crate) extra_args: Vec<String>,
}

pub(crate) fn build_command(root: &Path, args: &CompileArgs) -> Vec<String> {
    let (compiler, std_flag) = COMPILER_STD
        .iter()
        .find(|(name, _)| *name == args.compiler)
        .copied()
        .unwrap_or(COMPILER_STD[0]);

    let code = if args.input.extension().is_some() {
        args.input.clone()
    } else {
        args.input.with_extension("cpp")
    };
    let binary = match &args.output {
        Some(output) => output.clone(),
        None => PathBuf::from(code.file_stem().unwrap_or(code.as_os_str())),
    };

    let mut cmd: Vec<String> = vec![
        compiler.to_string(),
        std_flag.to_string(),
        code.display().to_string(),
        "-o".to_string(),
        binary.display().to_string(),
        "-I".to_string(),
        root.display().to_string(),
    ];
    cmd.extend(WARNING_FLAGS.map(String::from));
    if args.opt_info {
        cmd.extend(OPT_INFO_FLAGS.map(String::from));
    }
    if args.debug {
        cmd.extend(DEBUG_FLAGS.map(String::from));
    }
    cmd.extend(args.extra_args.iter().cloned());
    cmd
}

pub(crate) fn run(root: &Path, args: &CompileArgs) -> Result<()> {
    let cmd = build_command(root, args);
    println!("Running `{}`", cmd.join(" "));

    let status = Command::new(&cmd[0])
        .args(&cmd[1..])
        .status()
        .with_context(|| format!("failed to run {}", cmd[0]))?;
    if !status.success() {
        // Diagnostics already went to the terminal; the exit code is
        // authoritative and is not reinterpreted.
        std::process::exit(status.code().unwrap_or(1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str) -> CompileArgs {
        CompileArgs {
            input: PathBuf::from(input),
            output: None,
            compiler: "g++".to_string(),
            opt_info: false,
            debug: false,
            extra_args: vec![],
        }
    }

    #[test]
    fn default_command_shape() {
        let cmd = build_command(Path::new("/book"), &args("solve.cpp"));
        assert_eq!(
            &cmd[..7],
            &["g++", "-std=c++2a", "solve.cpp", "-o", "solve", "-I", "/book"]
        );
        assert!(cmd.contains(&"-Wconversion".to_string()));
        assert!(!cmd.contains(&"-O0".to_string()));
    }

    #[test]
    fn missing_extension_defaults_to_cpp() {
        let cmd = build_command(Path::new("/book"), &args("solve"));
        assert_eq!(cmd[2], "solve.cpp");
        assert_eq!(cmd[4], "solve");
    }

    #[test]
    fn explicit_output_wins() {
        let mut a = args("solve.cpp");
        a.output = Some(PathBuf::from("fast"));
        let cmd = build_command(Path::new("/book"), &a);
        assert_eq!(cmd[4], "fast");
    }

    #[test]
    fn unknown_compiler_falls_back_to_the_default() {
        let mut a = args("solve.cpp");
        a.compiler = "clang++".to_string();
        let cmd = build_command(Path::new("/book"), &a);
        assert_eq!(cmd[0], "g++");
        assert_eq!(cmd[1], "-std=c++2a");
    }

    #[test]
    fn versioned_compiler_selects_its_standard() {
        let mut a = args("solve.cpp");
        a.compiler = "g++-11".to_string();
        let cmd = build_command(Path::new("/book"), &a);
        assert_eq!(cmd[0], "g++-11");
        assert_eq!(cmd[1], "-std=c++20");
    }

    #[test]
    fn debug_flags_are_appended() {
        let mut a = args("solve.cpp");
        a.debug = true;
        let cmd = build_command(Path::new("/book"), &a);
        assert!(cmd.contains(&"-fsanitize=address,undefined".to_string()));
        assert!(cmd.contains(&"-O0".to_string()));
    }

    #[test]
    fn opt_info_flags_are_appended() {
        let mut a = args("solve.cpp");
        a.opt_info = true;
        let cmd = build_command(Path::new("/book"), &a);
        assert!(cmd.contains(&"-fopt-info-vec-optimized".to_string()));
    }

    #[test]
    fn extra_args_come_last() {
        let mut a = args("solve.cpp");
        a.extra_args = vec!["-DLOCAL".to_string()];
        let cmd = build_command(Path::new("/book"), &a);
        assert_eq!(cmd.last().unwrap(), "-DLOCAL");
    }
}
