//! Symbol replacement across a copied template
//!
//! Rewrites placeholder identifiers in text files using an ordered list of
//! rules. Order matters: a later rule may narrow what an earlier one did
//! (the sponsors link correction runs after the owner rewrite).
//!
//! Rule text may reference `{project_name}`, `{organization}` and `{sponsor}`.

use crate::collector::{FileCollector, PatternSet};
use crate::config::{ReadmeConfig, ReforkConfig, RuleConfig};
use crate::error::{Error, Result};
use crate::types::ReplaceReport;
use crate::utils::{require, resolve_path};
use camino::Utf8Path;
use regex::{Captures, NoExpand, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing::{debug, info};

static VAR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(project_name|organization|sponsor)\}").expect("variable regex is valid")
});

/// How expanded values are escaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    /// Inside a regex pattern
    Pattern,
    /// Inside a regex replacement, where `$` starts a capture reference
    Replacement,
}

/// Values substituted into rule text
#[derive(Debug, Clone)]
pub struct RuleVars {
    pub project_name: String,
    pub organization: String,
    pub sponsor: String,
}

impl RuleVars {
    /// Expand `{var}` references in a single pass; values are never re-expanded
    fn expand(&self, template: &str, escape: Escape) -> String {
        VAR_RE
            .replace_all(template, |caps: &Captures| {
                let value = match &caps[1] {
                    "project_name" => &self.project_name,
                    "organization" => &self.organization,
                    _ => &self.sponsor,
                };
                match escape {
                    Escape::None => value.clone(),
                    Escape::Pattern => regex::escape(value),
                    Escape::Replacement => value.replace('$', "$$"),
                }
            })
            .into_owned()
    }
}

/// A compiled pattern and the text that replaces every match
///
/// Literal rules insert the replacement verbatim. Regex rules may reference
/// capture groups (`$1`, `${name}`).
#[derive(Debug, Clone)]
pub struct ReplacementRule {
    pattern: Regex,
    replacement: String,
    expand_captures: bool,
}

impl ReplacementRule {
    /// Rule matching `from` literally
    pub fn literal(from: &str, to: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(&regex::escape(from))?,
            replacement: to.into(),
            expand_captures: false,
        })
    }

    /// Rule matching the regular expression `pattern`
    pub fn regex(pattern: &str, to: impl Into<String>) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
            replacement: to.into(),
            expand_captures: true,
        })
    }

    /// Compile a configured rule, expanding variables first
    pub fn from_config(rule: &RuleConfig, vars: &RuleVars) -> Result<Self> {
        if rule.regex {
            Self::regex(
                &vars.expand(&rule.from, Escape::Pattern),
                vars.expand(&rule.to, Escape::Replacement),
            )
        } else {
            Self::literal(
                &vars.expand(&rule.from, Escape::None),
                vars.expand(&rule.to, Escape::None),
            )
        }
    }

    /// Replace every match; borrowed when nothing matched
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.expand_captures {
            self.pattern.replace_all(text, self.replacement.as_str())
        } else {
            self.pattern.replace_all(text, NoExpand(&self.replacement))
        }
    }
}

/// Rules applied in declaration order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<ReplacementRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ReplacementRule>) -> Self {
        Self { rules }
    }

    /// Compile configured rules in order
    pub fn from_config(rules: &[RuleConfig], vars: &RuleVars) -> Result<Self> {
        let rules = rules
            .iter()
            .map(|rule| ReplacementRule::from_config(rule, vars))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Run every rule over `text`, each on the previous rule's output
    pub fn apply(&self, text: &str) -> String {
        let mut content = text.to_string();
        for rule in &self.rules {
            if let Cow::Owned(updated) = rule.apply(&content) {
                content = updated;
            }
        }
        content
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Removes a marked section from files with a given name
#[derive(Debug, Clone)]
pub struct SectionRemoval {
    file_name: String,
    start: String,
    end: String,
}

impl SectionRemoval {
    pub fn new(file_name: &str, start: &str, end: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            start: start.to_string(),
            end: end.to_string(),
        }
    }

    pub fn from_config(config: &ReadmeConfig) -> Self {
        Self::new(&config.file_name, &config.section_start, &config.section_end)
    }

    /// True when the file name (not the path) is exactly the configured name
    pub fn applies_to(&self, rel: &Utf8Path) -> bool {
        rel.file_name() == Some(self.file_name.as_str())
    }

    /// Cut from the start marker up to, not including, the end marker
    ///
    /// Returns `None` unless both markers exist with the end after the start.
    pub fn apply(&self, text: &str) -> Option<String> {
        if self.start.is_empty() || self.end.is_empty() {
            return None;
        }
        let start = text.find(&self.start)?;
        let end = start + self.start.len() + text[start + self.start.len()..].find(&self.end)?;

        let mut spliced = String::with_capacity(text.len() - (end - start));
        spliced.push_str(&text[..start]);
        spliced.push_str(&text[end..]);
        Some(spliced)
    }
}

/// Options for a replacement pass
#[derive(Debug, Clone)]
pub struct ReplaceOptions {
    pub project_name: String,
    pub organization: String,
    pub sponsor: String,
    /// Glob patterns selecting candidate files
    pub include: Vec<String>,
    /// Glob patterns excluded from rewriting
    pub ignore: Vec<String>,
    pub readme: ReadmeConfig,
    /// Ordered substitution rules
    pub rules: Vec<RuleConfig>,
}

impl ReplaceOptions {
    /// Build options from configuration; `organization` falls back to the
    /// configured default
    pub fn from_config(
        config: &ReforkConfig,
        project_name: &str,
        organization: Option<&str>,
    ) -> Self {
        Self {
            project_name: project_name.to_string(),
            organization: organization
                .unwrap_or(config.organization.as_str())
                .to_string(),
            sponsor: config.sponsor.clone(),
            include: config.replace.include.clone(),
            ignore: config.replace.ignore.clone(),
            readme: config.replace.readme.clone(),
            rules: config.replace.rules.clone(),
        }
    }

    fn vars(&self) -> RuleVars {
        RuleVars {
            project_name: self.project_name.clone(),
            organization: self.organization.clone(),
            sponsor: self.sponsor.clone(),
        }
    }
}

/// Apply the section removal (when the file qualifies) and then every rule
pub fn rewrite_text(
    rel: &Utf8Path,
    text: &str,
    section: &SectionRemoval,
    rules: &RuleSet,
) -> String {
    let spliced = if section.applies_to(rel) {
        section.apply(text)
    } else {
        None
    };

    match spliced {
        Some(spliced) => rules.apply(&spliced),
        None => rules.apply(text),
    }
}

/// Replace symbols in every candidate file under `destination`
///
/// Files are written back only when their content changed.
///
/// # Errors
/// Returns error if:
/// - `destination` or the project name is empty
/// - A pattern or rule fails to compile
/// - The destination cannot be walked, or a file cannot be read as UTF-8 or written
pub fn replace_symbols(destination: &str, options: &ReplaceOptions) -> Result<ReplaceReport> {
    require(destination, "Destination path")?;
    require(&options.project_name, "Project name")?;
    require(&options.organization, "Organization")?;

    let dest = resolve_path(destination)?;

    info!("Replacing symbols in {}...", dest);
    info!("  Project name: {}", options.project_name);

    let rules = RuleSet::from_config(&options.rules, &options.vars())?;
    let section = SectionRemoval::from_config(&options.readme);
    let collector = FileCollector::new(dest.clone(), PatternSet::new(&options.ignore)?)
        .with_include(PatternSet::new(&options.include)?);

    let mut report = ReplaceReport::default();

    for file in collector.files()? {
        let rel = file?;
        let path = dest.join(&rel);
        report.files_scanned += 1;

        let content =
            std::fs::read_to_string(&path).map_err(|e| Error::read_file(path.as_str(), e))?;
        let updated = rewrite_text(&rel, &content, &section, &rules);

        if updated == content {
            debug!("Unchanged: {}", rel);
            continue;
        }

        std::fs::write(&path, updated).map_err(|e| Error::write_file(path.as_str(), e))?;
        info!("  Updated: {}", rel);
        report.files_updated.push(rel);
    }

    info!("Updated {} files with new symbols", report.updated_count());
    Ok(report)
}
