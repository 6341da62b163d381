//! Common test utilities for bryc e2e tests.
//!
//! Provides `TestEnv`: an isolated source/artifact tree pair under a temp
//! directory, pre-configured with the identity transpiler (`cat`), plus
//! helpers to run the bryc binary against it.

use std::fs;
use std::path::PathBuf;
use std::process::{Child, Command, Output, Stdio};

use tempfile::TempDir;

pub struct TestEnv {
    root: TempDir,
}

#[allow(dead_code)]
impl TestEnv {
    /// New environment with a `src/` tree whose `bryc.toml` uses `cat` as
    /// the transpiler, so artifacts mirror their sources byte for byte.
    pub fn new() -> Self {
        let env = Self::without_config();
        env.write_config("[transpiler]\ncommand = \"cat\"\n");
        env
    }

    /// New environment with no `bryc.toml` at all.
    pub fn without_config() -> Self {
        let root = TempDir::new().unwrap();
        fs::create_dir_all(root.path().join("src")).unwrap();
        Self { root }
    }

    pub fn source(&self) -> PathBuf {
        self.root.path().join("src")
    }

    pub fn dest(&self) -> PathBuf {
        self.root.path().join("out")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.source().join("bryc.toml"), content).unwrap();
    }

    pub fn write_source(&self, relative: &str, content: &str) {
        let path = self.source().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn artifact(&self, relative: &str) -> PathBuf {
        self.dest().join(relative)
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_bryc"))
            .args(args)
            .current_dir(self.root.path())
            .output()
            .expect("failed to run bryc")
    }

    /// Run `bryc sync` against this environment's roots.
    pub fn sync(&self, extra: &[&str]) -> Output {
        let source = self.source();
        let dest = self.dest();
        let mut args = vec![
            "sync",
            "--source",
            source.to_str().unwrap(),
            "--dest",
            dest.to_str().unwrap(),
        ];
        args.extend_from_slice(extra);
        self.run(&args)
    }

    /// Spawn `bryc watch --json` against this environment's roots.
    pub fn spawn_watch(&self) -> Child {
        Command::new(env!("CARGO_BIN_EXE_bryc"))
            .args([
                "watch",
                "--json",
                "--source",
                self.source().to_str().unwrap(),
                "--dest",
                self.dest().to_str().unwrap(),
            ])
            .current_dir(self.root.path())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to start bryc watch")
    }
}
