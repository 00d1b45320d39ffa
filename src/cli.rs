//! CLI: args, path display, and run logic.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::harness::{FileSpec, ScratchProject};

#[derive(Parser)]
#[command(name = "tempproj")]
#[command(about = "Materialize a disposable project from local files and run a command inside it.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Write the contents of local file SRC at REL inside the project; repeatable
    #[arg(long = "file", value_name = "REL=SRC")]
    pub files: Vec<String>,

    /// Copy file or tree SRC into the project at DEST (default: SRC's file name); repeatable
    #[arg(long = "copy", value_name = "SRC[=DEST]")]
    pub copies: Vec<String>,

    /// Print every relative path in the project before running the command
    #[arg(short, long)]
    pub list: bool,

    /// Verbose: -v = debug, -vv = trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Command to run inside the project
    #[arg(value_name = "PROGRAM", required = true)]
    pub program: String,

    /// Arguments passed to the command
    #[arg(
        value_name = "ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub args: Vec<String>,
}

/// Format path for user-facing output: strip Windows extended path prefix `\\?\` so it displays as a normal path.
pub fn display_path(path: &Path) -> std::borrow::Cow<'_, str> {
    let s = path.to_string_lossy();
    #[cfg(windows)]
    {
        if let Some(stripped) = s.strip_prefix(r"\\?\") {
            return std::borrow::Cow::Owned(stripped.to_string());
        }
    }
    s
}

fn build_spec(entries: &[String]) -> Result<FileSpec, String> {
    let mut spec = FileSpec::new();
    for entry in entries {
        let (rel, src) = entry
            .split_once('=')
            .ok_or_else(|| format!("--file expects REL=SRC, got '{entry}'"))?;
        let content =
            fs::read_to_string(src).map_err(|e| format!("cannot read '{src}': {e}"))?;
        spec.insert(rel, content);
    }
    Ok(spec)
}

/// Destination for a `--copy SRC[=DEST]` entry; defaults to SRC's file name.
fn copy_dest(src: &Path, dest: Option<&str>) -> Result<PathBuf, String> {
    match dest {
        Some(d) => Ok(PathBuf::from(d)),
        None => src
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| format!("cannot infer destination for '{}'", display_path(src))),
    }
}

pub fn run(args: Args) -> i32 {
    let spec = match build_spec(&args.files) {
        Ok(spec) => spec,
        Err(msg) => {
            eprintln!("Error: {msg}");
            return 2;
        }
    };

    let project = match ScratchProject::create(&spec) {
        Ok(project) => project,
        Err(err) => {
            eprintln!("Error: {err}");
            return 2;
        }
    };

    for entry in &args.copies {
        let (src, dest) = match entry.split_once('=') {
            Some((src, dest)) => (PathBuf::from(src), Some(dest)),
            None => (PathBuf::from(entry), None),
        };
        let dest = match copy_dest(&src, dest) {
            Ok(dest) => dest,
            Err(msg) => {
                eprintln!("Error: {msg}");
                return 2;
            }
        };
        if let Err(err) = project.import_tree(&src, &dest) {
            eprintln!("Error: {err}");
            return 2;
        }
    }

    if args.list {
        eprintln!("Project files in {}:", display_path(project.root()));
        for rel in project.list_files() {
            eprintln!("  {}", rel.display());
        }
    }

    match project.run(&args.program, &args.args) {
        Ok(result) => {
            // Re-emit the captured streams so the caller sees them as if
            // the child had inherited them.
            print!("{}", result.stdout);
            eprint!("{}", result.stderr);
            result.exit_code
        }
        Err(err) => {
            eprintln!("Error: {err}");
            2
        }
    }
}
