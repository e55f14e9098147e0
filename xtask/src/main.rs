//! Workspace automation: `cargo xtask <task>`
//!
//! Output goes straight to the terminal; this binary never runs inside the
//! client, so it does not set up tracing.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::{env, fs};

use anyhow::{bail, Context, Result};

/// Where ts-rs writes the domain crate's exports
const TS_EXPORT_DIR: &str = "crates/domain/bindings";
const DEFAULT_BINDINGS_OUT: &str = "bindings";

/// Optional features each crate must keep compiling with
const FEATURE_COMBOS: &[(&str, Option<&str>)] = &[
    ("talentfolio-common", Some("foundation,observability,runtime")),
    ("talentfolio-domain", Some("ts-gen")),
    ("talentfolio-core", Some("test-utils")),
    ("talentfolio-infra", Some("test-utils")),
    ("talentfolio-app", Some("ts-gen")),
];

#[derive(Debug, Clone, Copy)]
enum Task {
    Check,
    Features,
    Bindings,
}

impl Task {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "check" => Some(Self::Check),
            "features" => Some(Self::Features),
            "bindings" => Some(Self::Bindings),
            _ => None,
        }
    }

    fn run(self) -> Result<()> {
        match self {
            Self::Check => check(),
            Self::Features => features(),
            Self::Bindings => bindings(),
        }
    }
}

fn usage() {
    eprintln!("usage: cargo xtask <task>");
    eprintln!();
    eprintln!("  check      rustfmt, clippy (warnings denied), then every test");
    eprintln!("  features   cargo check each crate with its optional features");
    eprintln!("  bindings   export the wire types as TypeScript (out dir: $XTASK_TS_OUT)");
}

fn main() -> ExitCode {
    let Some(task) = env::args().nth(1) else {
        usage();
        return ExitCode::FAILURE;
    };
    let Some(task) = Task::parse(&task) else {
        eprintln!("unknown task `{task}`");
        usage();
        return ExitCode::FAILURE;
    };

    match task.run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("xtask {task:?} failed: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Run `cargo <args>`, failing on a non-zero exit.
fn cargo(args: &[&str]) -> Result<()> {
    println!("$ cargo {}", args.join(" "));
    let status = Command::new(env::var("CARGO").unwrap_or_else(|_| "cargo".into()))
        .args(args)
        .status()
        .with_context(|| format!("could not start cargo {}", args.join(" ")))?;
    if !status.success() {
        bail!("cargo {} exited with {status}", args.join(" "));
    }
    Ok(())
}

fn check() -> Result<()> {
    cargo(&["fmt", "--all", "--", "--check"])?;
    cargo(&["clippy", "--workspace", "--all-targets", "--all-features", "--", "-D", "warnings"])?;
    cargo(&["test", "--workspace", "--all-features"])
}

fn features() -> Result<()> {
    for &(package, features) in FEATURE_COMBOS {
        cargo(&["check", "-p", package])?;
        if let Some(features) = features {
            cargo(&["check", "-p", package, "--features", features])?;
        }
    }
    Ok(())
}

/// ts-rs writes one file per exported type while the domain tests run; copy
/// them out and add an `index.ts` barrel.
fn bindings() -> Result<()> {
    cargo(&["test", "-p", "talentfolio-domain", "--features", "ts-gen", "--lib"])?;

    let out = env::var_os("XTASK_TS_OUT")
        .map_or_else(|| PathBuf::from(DEFAULT_BINDINGS_OUT), PathBuf::from);
    fs::create_dir_all(&out).with_context(|| format!("creating {}", out.display()))?;

    let mut index = String::from("// Generated by `cargo xtask bindings`; do not edit.\n\n");
    let mut exported = 0_usize;
    for source in exported_types(Path::new(TS_EXPORT_DIR))? {
        let Some(name) = source.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        fs::copy(&source, out.join(format!("{name}.ts")))
            .with_context(|| format!("copying {}", source.display()))?;
        let _ = writeln!(index, "export type {{ {name} }} from './{name}';");
        exported += 1;
    }

    fs::write(out.join("index.ts"), index).context("writing index.ts")?;
    println!("{exported} wire types exported to {}", out.display());
    Ok(())
}

fn exported_types(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("{} missing; did the ts-gen tests run?", dir.display()))?
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "ts"))
        .filter(|path| path.file_stem().is_some_and(|stem| stem != "index"))
        .collect();
    files.sort();
    Ok(files)
}
