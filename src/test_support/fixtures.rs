//! Resource tree fixtures backed by a temporary directory.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A resource root on disk, removed when dropped.
pub struct ResourceTree {
    dir: TempDir,
}

impl ResourceTree {
    /// Create an empty resource root.
    pub fn new() -> Self {
        ResourceTree {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    /// Path of the resource root.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Absolute path of a file inside the root.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file, creating parent directories.
    pub fn file(self, relative: &str, contents: &str) -> Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create fixture dir");
        }
        fs::write(&path, contents).expect("failed to write fixture file");
        self
    }

    /// Create an empty directory.
    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.path(relative)).expect("failed to create fixture dir");
        self
    }

    /// Write `<dir>/strings.xml` declaring the given strings.
    pub fn strings(self, dir: &str, strings: &[(&str, &str)]) -> Self {
        let contents = values_xml(
            &strings
                .iter()
                .map(|(k, v)| format!("    <string name=\"{}\">{}</string>", k, v))
                .collect::<Vec<_>>(),
        );
        self.file(&format!("{}/strings.xml", dir), &contents)
    }

    /// Write one empty drawable per name into `dir`.
    pub fn drawables(mut self, dir: &str, names: &[&str]) -> Self {
        for name in names {
            self = self.file(&format!("{}/{}.xml", dir, name), "<vector/>");
        }
        self
    }
}

impl Default for ResourceTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap element lines in a `<resources>` document.
pub fn values_xml(lines: &[String]) -> String {
    let mut out = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<resources>\n");
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("</resources>\n");
    out
}

/// A `strings.xml` document with `count` keys `str_0 .. str_{count-1}`.
pub fn numbered_strings(count: usize) -> String {
    values_xml(
        &(0..count)
            .map(|i| format!("    <string name=\"str_{i}\">Value {i}</string>"))
            .collect::<Vec<_>>(),
    )
}
