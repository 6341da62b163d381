//! Bryc CLI - Brython AOT compiler and synchronization tool
//!
//! Usage: bryc <COMMAND>
//!
//! Commands:
//!   sync     Convert every source file once, then exit
//!   watch    Convert everything, then watch for changes and sync continuously
//!   version  Show version information

mod cli;

use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use bryc::transpiler::CommandTranspiler;
use bryc::watcher::{watch, WatchEvent};
use bryc::{BrycError, Config, PathMapper, SyncEngine};

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Sync {
            source,
            dest,
            transpiler,
        } => cmd_sync(&source, &dest, transpiler, cli.json, cli.verbose),
        Commands::Watch {
            source,
            dest,
            transpiler,
        } => cmd_watch(&source, &dest, transpiler, cli.json),
        Commands::Version => cmd_version(cli.json),
    }
}

/// Resolve roots and configuration into a ready engine.
///
/// All configuration errors (missing source root, nested roots, missing
/// transpiler command, malformed bryc.toml) surface here, before any
/// artifact is touched.
fn build_engine(
    source: &Path,
    dest: &Path,
    transpiler_override: Option<String>,
) -> Result<SyncEngine<CommandTranspiler>> {
    let source_root = source
        .canonicalize()
        .map_err(|_| BrycError::DirectoryNotFound {
            path: source.to_path_buf(),
        })?;
    if !source_root.is_dir() {
        return Err(BrycError::DirectoryNotFound {
            path: source.to_path_buf(),
        }
        .into());
    }

    // Resolve dest before creating anything: the nesting check must see
    // the same canonical form however the argument was spelled.
    let artifact_root = resolve_creatable_dir(dest)?;
    if artifact_root.starts_with(&source_root) {
        return Err(BrycError::ArtifactRootInsideSource {
            artifact_root,
            source_root,
        }
        .into());
    }
    fs::create_dir_all(&artifact_root)?;

    let mut config = Config::load_for_source(&source_root)?;
    if let Some(command) = transpiler_override {
        config.transpiler.command = Some(command);
    }
    let transpiler = CommandTranspiler::from_config(&config)?;

    let mapper = PathMapper::new(
        source_root,
        artifact_root,
        config.source.extensions,
        config.artifact.suffix,
    );
    Ok(SyncEngine::new(mapper, transpiler))
}

/// Resolve a directory that may not exist yet to an absolute, symlink-free
/// path: canonicalize the nearest existing ancestor, then reattach the
/// missing components.
fn resolve_creatable_dir(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    let normalized = lexical_normalize(&absolute);

    let mut missing: Vec<OsString> = Vec::new();
    let mut base = normalized.clone();
    loop {
        match base.canonicalize() {
            Ok(mut resolved) => {
                for name in missing.iter().rev() {
                    resolved.push(name);
                }
                return Ok(resolved);
            }
            Err(_) => match base.file_name() {
                Some(name) => {
                    missing.push(name.to_os_string());
                    base.pop();
                }
                None => return Ok(normalized),
            },
        }
    }
}

/// Fold `.` and `..` components without touching the filesystem.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn cmd_sync(
    source: &Path,
    dest: &Path,
    transpiler: Option<String>,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let engine = build_engine(source, dest, transpiler)?;

    if !json {
        println!("📦 Bryc Sync");
        println!("Source: {}", engine.mapper().source_root().display());
        println!("Dest:   {}", engine.mapper().artifact_root().display());
    }

    let result = engine.sync_all()?;

    if json {
        let output = serde_json::json!({
            "event": "sync",
            "status": if result.is_success() { "success" } else { "partial" },
            "written": result.written.len(),
            "errors": result.errors.len(),
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("\n📊 Sync Results:");
        if !result.written.is_empty() {
            println!("  ✓ Written: {} files", result.written.len());
            if verbose > 0 {
                for path in &result.written {
                    println!("    - {}", path);
                }
            }
        }
        if !result.errors.is_empty() {
            println!("  ✗ Errors: {}", result.errors.len());
            for err in &result.errors {
                println!("    - {}", err);
            }
        }
        println!();
    }

    if !result.is_success() {
        anyhow::bail!("{} file(s) failed to convert", result.errors.len());
    }
    Ok(())
}

fn cmd_watch(source: &Path, dest: &Path, transpiler: Option<String>, json: bool) -> Result<()> {
    let engine = build_engine(source, dest, transpiler)?;

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })?;

    if !json {
        println!("👀 Bryc Watch");
        println!("Source: {}", engine.mapper().source_root().display());
        println!("Dest:   {}", engine.mapper().artifact_root().display());
        println!("Press Ctrl+C to stop\n");
    }

    watch(&engine, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            match event {
                WatchEvent::WatchStarted { source } => {
                    println!("📂 Watching: {}", source);
                }
                WatchEvent::SyncStarted => {
                    println!("🔄 Syncing...");
                }
                WatchEvent::SyncComplete { written, errors } => {
                    if errors > 0 {
                        println!("⚠ Sync: {} written, {} errors", written, errors);
                    } else {
                        println!("✓ Sync: {} written", written);
                    }
                }
                WatchEvent::Converted { source, artifact } => {
                    println!("📝 Converted: {} -> {}", source, artifact);
                }
                WatchEvent::Removed { artifact } => {
                    println!("🗑 Removed: {}", artifact);
                }
                WatchEvent::Error { message } => {
                    eprintln!("✗ Error: {}", message);
                }
                WatchEvent::Shutdown => {
                    println!("\n👋 Shutting down...");
                }
            }
        }
    })?;

    Ok(())
}

fn cmd_version(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    if json {
        let output = serde_json::json!({
            "event": "version",
            "version": version,
        });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("bryc {}", version);
    }
    Ok(())
}
