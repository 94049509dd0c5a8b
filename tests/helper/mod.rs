//! Fixture for a goenv root and a project workspace

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use goenv_resolve::toolchain::installed::go_binary_name;
use goenv_resolve::{Config, Manager};

pub struct GoenvFixture {
    root: TempDir,
    work: TempDir,
}

impl GoenvFixture {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().unwrap(),
            work: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    pub fn work(&self) -> &Path {
        self.work.path()
    }

    pub fn config(&self) -> Config {
        Config {
            current_dir: Some(self.work().to_path_buf()),
            ..Config::with_root(self.root())
        }
    }

    pub fn manager(&self) -> Manager {
        Manager::new(self.config())
    }

    /// Install toolchains with a go binary
    pub fn install(&self, versions: &[&str]) -> &Self {
        for version in versions {
            let bin = self.root().join("versions").join(version).join("bin");
            fs::create_dir_all(&bin).unwrap();
            fs::write(bin.join(go_binary_name()), "#!/bin/sh\n").unwrap();
        }
        self
    }

    /// Create a version directory without a go binary
    pub fn install_corrupted(&self, version: &str) -> &Self {
        fs::create_dir_all(self.root().join("versions").join(version).join("bin")).unwrap();
        self
    }

    /// Write a file relative to the workspace, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a file directly under the goenv root
    pub fn write_root(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).unwrap();
        path
    }
}

pub fn go_mod(go: &str, toolchain: Option<&str>) -> String {
    let mut content = format!("module example.com/app\n\ngo {}\n", go);
    if let Some(toolchain) = toolchain {
        content.push_str(&format!("\ntoolchain {}\n", toolchain));
    }
    content.push_str("\nrequire golang.org/x/mod v0.21.0\n");
    content
}
