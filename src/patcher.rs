use std::borrow::Cow;

use regex::{NoExpand, Regex};

use crate::error::Result;

/// Named top-level blocks of config/database.yml.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Default,
    Development,
    Test,
    Production,
}

impl Section {
    pub fn key(&self) -> &'static str {
        match self {
            Section::Default => "default",
            Section::Development => "development",
            Section::Test => "test",
            Section::Production => "production",
        }
    }

    /// Pattern matching the section from its line-start keyword up to the
    /// next blank line or end of input. The production block always runs to
    /// end of input, since nothing follows it in a generated config.
    pub fn pattern(&self) -> Result<Regex> {
        let pattern = match self {
            Section::Production => format!(r"(?ms)^{}:.*\z", self.key()),
            _ => format!(r"(?ms)^{}:.*?(?:\n\n|\z)", self.key()),
        };
        Ok(Regex::new(&pattern)?)
    }
}

/// Replaces one named block with literal text.
///
/// Only the first match in document order is affected; a document without
/// the keyword is returned unchanged.
pub fn replace_section<'a>(
    contents: &'a str,
    section: Section,
    replacement: &str,
) -> Result<Cow<'a, str>> {
    Ok(section.pattern()?.replace(contents, NoExpand(replacement)))
}
