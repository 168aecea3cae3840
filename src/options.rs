use crate::args::Args;
use crate::error::{Error, Result};
use globset::Glob;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Pattern used when no destination subfolder is given
pub const MATCH_ALL: &str = "*";

/// How deep target discovery looks below the target root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Immediate children of the root only
    ShallowOnly,
    /// Directories at any depth below the root
    Recursive,
}

/// Replacement rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacementRule {
    /// Literal string to search for
    pub from: String,

    /// Replacement text, may contain the solution name placeholder
    pub to: String,
}

/// Ordered set of replacement rules with unique search keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    rules: Vec<ReplacementRule>,
}

impl Replacements {
    /// Build the mapping from a flat list read as consecutive (search, replacement) pairs.
    ///
    /// A trailing element without a partner is dropped. A repeated search key keeps
    /// the position of its first occurrence and takes the last value.
    pub fn from_pairs<S: AsRef<str>>(values: &[S]) -> Self {
        let mut replacements = Self::default();
        for pair in values.chunks_exact(2) {
            replacements.insert(pair[0].as_ref(), pair[1].as_ref());
        }
        replacements
    }

    /// Insert a rule, overwriting the value of an existing rule with the same key
    pub fn insert(&mut self, from: &str, to: &str) {
        match self.rules.iter_mut().find(|rule| rule.from == from) {
            Some(rule) => rule.to = to.to_string(),
            None => self.rules.push(ReplacementRule {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReplacementRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Fully resolved description of one run
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    pub source_path: PathBuf,
    pub target_root: PathBuf,
    pub search_pattern: String,
    pub search_mode: SearchMode,
    pub replacements: Replacements,
    /// Cap on concurrent destination writes, unbounded when `None`
    pub max_concurrency: Option<NonZeroUsize>,
}

impl ExecutionPlan {
    /// Resolve command line arguments into a plan, using the process working
    /// directory when no target directory is given
    pub fn from_args(args: &Args) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            Error::configuration(format!("Cannot determine the current directory: {}", e))
        })?;
        Self::resolve(args, &cwd)
    }

    /// Resolve command line arguments into a plan relative to `default_root`
    ///
    /// # Errors
    /// Returns `Error::Configuration` if the source file or target directory does not
    /// exist, the subfolder name is not a valid pattern, or a replacement key is empty.
    pub fn resolve(args: &Args, default_root: &Path) -> Result<Self> {
        // The source must be an existing regular file with a name to copy under
        let source_path = args.source_file.clone();
        if source_path.as_os_str().is_empty() {
            return Err(Error::configuration("No source file given."));
        }
        if !source_path.is_file() {
            return Err(Error::configuration(format!(
                "File not found: <{}>.",
                source_path.display()
            )));
        }
        if source_path.file_name().is_none() {
            return Err(Error::configuration(format!(
                "Source path has no file name: <{}>.",
                source_path.display()
            )));
        }

        // A subfolder name switches from the solution roots to a search at any depth
        let (search_pattern, search_mode) = match args.destination_subfolder.as_deref() {
            Some(name) if !name.is_empty() => (name.to_string(), SearchMode::Recursive),
            _ => (MATCH_ALL.to_string(), SearchMode::ShallowOnly),
        };
        Glob::new(&search_pattern).map_err(|e| {
            Error::configuration(format!(
                "Invalid destination subfolder <{}>: {}",
                search_pattern, e
            ))
        })?;

        // Fall back to the default root when no target directory is given
        let target_root = match args.target_directory.as_ref() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.clone(),
            _ => default_root.to_path_buf(),
        };
        if !target_root.is_dir() {
            return Err(Error::configuration(format!(
                "Directory not found: <{}>.",
                target_root.display()
            )));
        }

        // Pair up the replacement values; an empty search string would match everywhere
        let replacements = Replacements::from_pairs(&args.replace_strings);
        if replacements.iter().any(|rule| rule.from.is_empty()) {
            return Err(Error::configuration(
                "Empty search string is not allowed in replacement pairs.",
            ));
        }

        Ok(Self {
            source_path,
            target_root,
            search_pattern,
            search_mode,
            replacements,
            max_concurrency: args.jobs,
        })
    }
}
