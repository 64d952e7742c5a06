use std::path::{Path, PathBuf};
use std::process::Command;

use regex::Regex;

use crate::constants::{
    APPLICATION_ANCHOR, APPLICATION_CONFIG, GEMFILE, ROUTES_ANCHOR, ROUTES_CONFIG,
};
use crate::error::{Error, Result};

/// Mutation primitives against the target application tree.
///
/// Every operation reads and writes files directly; no in-memory model of
/// the tree is kept between calls.
pub struct Project {
    root: PathBuf,
    skip_install: bool,
}

impl Project {
    pub fn new<P: AsRef<Path>>(root: P, skip_install: bool) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::AppDirDoesNotExistError {
                app_dir: root.display().to_string(),
            });
        }
        Ok(Self { root: root.to_path_buf(), skip_install })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Writes a file, creating parent directories as needed.
    pub fn create_file(&self, rel: &str, contents: &str) -> Result<()> {
        let dest = self.path(rel);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(dest, contents)?;
        log::info!("create {rel}");
        Ok(())
    }

    /// Removes a file if it exists.
    pub fn remove_file(&self, rel: &str) -> Result<()> {
        let dest = self.path(rel);
        if dest.exists() {
            std::fs::remove_file(dest)?;
            log::info!("remove {rel}");
        }
        Ok(())
    }

    /// Appends text to an existing file, creating it when absent.
    pub fn append_file(&self, rel: &str, text: &str) -> Result<()> {
        let dest = self.path(rel);
        let mut contents =
            if dest.exists() { std::fs::read_to_string(&dest)? } else { String::new() };
        if !contents.is_empty() && !contents.ends_with('\n') {
            contents.push('\n');
        }
        contents.push_str(text);
        std::fs::write(dest, contents)?;
        log::info!("append {rel}");
        Ok(())
    }

    /// Appends a dependency entry to the Gemfile.
    pub fn gem(
        &self,
        name: &str,
        requirement: Option<&str>,
        group: Option<&str>,
    ) -> Result<()> {
        let mut line = format!("gem \"{name}\"");
        if let Some(requirement) = requirement {
            line.push_str(&format!(", \"{requirement}\""));
        }
        if let Some(group) = group {
            line.push_str(&format!(", group: :{group}"));
        }
        line.push('\n');
        self.append_file(GEMFILE, &line)
    }

    /// Prefixes every line matching `pattern` with `# `, keeping indentation.
    pub fn comment_lines(&self, rel: &str, pattern: &Regex) -> Result<()> {
        let dest = self.path(rel);
        let contents = std::fs::read_to_string(&dest)?;
        let commented: String = contents
            .split_inclusive('\n')
            .map(|line| {
                if pattern.is_match(line) {
                    let indent_len = line.len() - line.trim_start().len();
                    format!("{}# {}", &line[..indent_len], &line[indent_len..])
                } else {
                    line.to_string()
                }
            })
            .collect();
        std::fs::write(dest, commented)?;
        log::info!("comment matching lines in {rel}");
        Ok(())
    }

    /// Replaces the first regex match in a file with literal text.
    ///
    /// A file without a match is left untouched.
    pub fn gsub_file(&self, rel: &str, pattern: &Regex, replacement: &str) -> Result<()> {
        let dest = self.path(rel);
        let contents = std::fs::read_to_string(&dest)?;
        match pattern.replace(&contents, regex::NoExpand(replacement)) {
            std::borrow::Cow::Borrowed(_) => {
                log::debug!("no match for {pattern} in {rel}");
            }
            std::borrow::Cow::Owned(patched) => {
                std::fs::write(dest, patched)?;
                log::info!("gsub {rel}");
            }
        }
        Ok(())
    }

    /// Inserts `content` on its own lines directly after the first line
    /// containing `anchor`. Missing anchors log a warning and change nothing.
    pub fn inject_into_file(&self, rel: &str, anchor: &str, content: &str) -> Result<()> {
        let dest = self.path(rel);
        let contents = std::fs::read_to_string(&dest)?;
        let Some(anchor_start) = contents.find(anchor) else {
            log::warn!("anchor '{anchor}' not found in {rel}, nothing injected");
            return Ok(());
        };
        let insert_at = match contents[anchor_start..].find('\n') {
            Some(offset) => anchor_start + offset + 1,
            None => contents.len(),
        };
        let mut patched = String::with_capacity(contents.len() + content.len());
        patched.push_str(&contents[..insert_at]);
        patched.push_str(content);
        patched.push_str(&contents[insert_at..]);
        std::fs::write(dest, patched)?;
        log::info!("inject into {rel}");
        Ok(())
    }

    /// Adds configuration inside the Rails application class.
    pub fn environment(&self, code: &str) -> Result<()> {
        self.inject_into_file(APPLICATION_CONFIG, APPLICATION_ANCHOR, &indent(code, 4))
    }

    /// Adds a route declaration inside the routes draw block.
    pub fn route(&self, code: &str) -> Result<()> {
        self.inject_into_file(ROUTES_CONFIG, ROUTES_ANCHOR, &indent(code, 2))
    }

    /// Creates an initializer under config/initializers/.
    pub fn initializer(&self, name: &str, contents: &str) -> Result<()> {
        self.create_file(&format!("config/initializers/{name}"), contents)
    }

    /// Creates a rake task file under lib/tasks/.
    pub fn rakefile(&self, name: &str, contents: &str) -> Result<()> {
        self.create_file(&format!("lib/tasks/{name}"), contents)
    }

    /// Runs an external command in the project root, blocking until it
    /// exits. Suppressed entirely under --skip-install.
    pub fn run(&self, program: &str, args: &[&str]) -> Result<()> {
        let command = format!("{} {}", program, args.join(" "));
        if self.skip_install {
            log::info!("skip `{command}` (--skip-install)");
            return Ok(());
        }
        log::info!("run `{command}`");
        let status = Command::new(program).args(args).current_dir(&self.root).status()?;
        if !status.success() {
            return Err(Error::CommandFailed { command, status });
        }
        Ok(())
    }

    pub fn bundle_install(&self) -> Result<()> {
        self.run("bundle", &["install"])
    }

    pub fn rails_command(&self, args: &[&str]) -> Result<()> {
        let mut full = vec!["exec", "rails"];
        full.extend_from_slice(args);
        self.run("bundle", &full)
    }
}

fn indent(code: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    code.lines()
        .map(|line| {
            if line.is_empty() {
                String::from("\n")
            } else {
                format!("{pad}{line}\n")
            }
        })
        .collect()
}
