//! Test harness for running the pipeline against a temporary tree.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use assert_fs::prelude::*;
use assert_fs::TempDir;

use kubesource::config::{Config, CONFIG_FILE_NAME};
use kubesource::render::CommandExecutor;

#[cfg(unix)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    ExitStatus::from_raw(code as u32)
}

/// Stands in for kustomize. Builds are answered by the source directory's
/// final path component.
#[derive(Default)]
pub struct ScriptedExecutor {
    rendered: HashMap<String, String>,
    failures: HashMap<String, String>,
    missing_binary: bool,
    cancel_on: Option<(String, Arc<AtomicBool>)>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to builds of `source` with `output`.
    pub fn renders(mut self, source: &str, output: impl Into<String>) -> Self {
        self.rendered.insert(source.to_string(), output.into());
        self
    }

    /// Fail builds of `source` with `stderr` and exit code 1.
    pub fn fails(mut self, source: &str, stderr: &str) -> Self {
        self.failures.insert(source.to_string(), stderr.to_string());
        self
    }

    /// Set `flag` while building `source`, as a Ctrl-C mid-render would.
    pub fn cancels_on(mut self, source: &str, flag: Arc<AtomicBool>) -> Self {
        self.cancel_on = Some((source.to_string(), flag));
        self
    }

    pub fn without_binary(mut self) -> Self {
        self.missing_binary = true;
        self
    }

    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn exec(&self, program: &str, args: &[&OsStr]) -> std::io::Result<Output> {
        let mut call = vec![program.to_string()];
        call.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
        self.calls.borrow_mut().push(call);

        let source = args
            .last()
            .and_then(|a| Path::new(a).file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if let Some((name, flag)) = &self.cancel_on {
            if *name == source {
                flag.store(true, Ordering::SeqCst);
            }
        }

        if let Some(stderr) = self.failures.get(&source) {
            return Ok(Output {
                status: exit_status(1),
                stdout: Vec::new(),
                stderr: stderr.as_bytes().to_vec(),
            });
        }

        Ok(Output {
            status: exit_status(0),
            stdout: self
                .rendered
                .get(&source)
                .cloned()
                .unwrap_or_default()
                .into_bytes(),
            stderr: Vec::new(),
        })
    }

    fn look_path(&self, program: &str) -> Option<PathBuf> {
        (!self.missing_binary).then(|| PathBuf::from("/usr/local/bin").join(program))
    }
}

/// Isolated directory tree for pipeline runs.
pub struct TestHarness {
    temp_dir: TempDir,
}

impl TestHarness {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn child(&self, relative: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(relative)
    }

    /// Write `config` as `<app>/kubesource.yaml` and create every source
    /// directory it names with a kustomization file.
    pub fn add_app(&self, app: &str, config: &Config) -> PathBuf {
        let app_dir = self.temp_dir.child(app);
        app_dir.create_dir_all().expect("Failed to create app dir");

        for source in &config.sources {
            let source_dir = app_dir.child(&source.source_dir);
            source_dir
                .child("kustomization.yaml")
                .write_str("resources: []\n")
                .expect("Failed to write kustomization");
        }

        let yaml = serde_yaml::to_string(config).expect("Failed to serialize config");
        self.write_config(app, &yaml)
    }

    /// Write raw config content as `<app>/kubesource.yaml`.
    pub fn write_config(&self, app: &str, content: &str) -> PathBuf {
        let app_dir = self.temp_dir.child(app);
        app_dir
            .child(CONFIG_FILE_NAME)
            .write_str(content)
            .expect("Failed to write config");
        app_dir.path().to_path_buf()
    }

    /// Sorted file names directly inside `relative`.
    pub fn list(&self, relative: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.root().join(relative))
            .expect("Failed to read directory")
            .map(|e| {
                e.expect("Failed to read entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }
}
