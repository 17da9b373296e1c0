//! Line scanner for the retention configuration
//!
//! Produces one token list per non-empty logical line. Comments (`#` and
//! `//`) are stripped, and `include <glob>` lines are replaced by the
//! content of every matching file.

use std::fs::File;
use std::io::{BufRead, Cursor, Read};
use std::path::{Path, PathBuf};

use ignore::gitignore::GitignoreBuilder;
use ignore::WalkBuilder;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};

const INCLUDE_IDENTIFIER: &str = "include";
const COMMENT_BASH_STYLE: char = '#';
const COMMENT_C_STYLE: &str = "//";

/// Remove comments and surrounding whitespace from a line.
pub fn trim(line: &str) -> &str {
    let mut line = line;
    if let Some(i) = line.find(COMMENT_BASH_STYLE) {
        line = &line[..i];
    }
    if let Some(i) = line.find(COMMENT_C_STYLE) {
        line = &line[..i];
    }
    line.trim()
}

/// Reads token lines from a stack of sources.
///
/// The bottom of the stack is the configuration itself; every `include`
/// pushes a new source on top, which is drained before scanning resumes on
/// the one below it.
pub struct LineScanner<'a> {
    sources: Vec<Box<dyn BufRead + 'a>>,
    base_dir: Option<PathBuf>,
}

impl<'a> LineScanner<'a> {
    pub fn new(reader: impl BufRead + 'a) -> Self {
        Self {
            sources: vec![Box::new(reader)],
            base_dir: None,
        }
    }

    /// Resolve relative include patterns against `dir` instead of the
    /// working directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Read the next non-empty line as tokens. `Ok(None)` means every
    /// source is exhausted.
    pub fn scan_line(&mut self) -> ConfigResult<Option<Vec<String>>> {
        let mut buf = String::new();

        while let Some(source) = self.sources.last_mut() {
            buf.clear();
            if source.read_line(&mut buf)? == 0 {
                self.sources.pop();
                continue;
            }

            let line = trim(&buf);
            if line.is_empty() {
                continue;
            }

            let fields: Vec<String> = line.split_whitespace().map(str::to_string).collect();
            match fields.as_slice() {
                [keyword, pattern] if keyword == INCLUDE_IDENTIFIER => self.include(pattern)?,
                _ => return Ok(Some(fields)),
            }
        }

        Ok(None)
    }

    /// Resolve a path named in the configuration against the base
    /// directory, if one is set and `path` is relative.
    pub fn resolve(&self, path: &str) -> PathBuf {
        match &self.base_dir {
            Some(base) if Path::new(path).is_relative() => base.join(path),
            _ => PathBuf::from(path),
        }
    }

    /// Push the concatenated content of every file matching `pattern`.
    fn include(&mut self, pattern: &str) -> ConfigResult<()> {
        let pattern = self.resolve(pattern).to_string_lossy().into_owned();

        let paths = glob(&pattern);
        if paths.is_empty() {
            return Err(ConfigError::IncludeNoMatch(pattern));
        }

        let mut buffer = Vec::new();
        for path in paths {
            debug!(path = %path.display(), "including configuration file");

            let mut file = File::open(&path).map_err(|source| ConfigError::IncludeOpen {
                path: path.clone(),
                source,
            })?;
            file.read_to_end(&mut buffer)
                .map_err(|source| ConfigError::IncludeRead { path, source })?;

            // Included files may lack a trailing newline.
            buffer.push(b'\n');
        }

        self.sources.push(Box::new(Cursor::new(buffer)));
        Ok(())
    }
}

fn has_glob_meta(s: &str) -> bool {
    s.contains(['*', '?', '['])
}

/// Collapse runs of `*` so that `**` stays within one path component.
fn single_component(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    for c in part.chars() {
        if c != '*' || !out.ends_with('*') {
            out.push(c);
        }
    }
    out
}

/// Expand a shell glob into the sorted list of matching paths.
///
/// A pattern without wildcards matches itself if it exists. Otherwise the
/// literal leading directories are walked, following symlinks, and every
/// entry at the pattern's depth is matched against the remaining
/// components. Wildcards never cross a `/`.
fn glob(pattern: &str) -> Vec<PathBuf> {
    if !has_glob_meta(pattern) {
        let path = PathBuf::from(pattern);
        return match path.symlink_metadata() {
            Ok(_) => vec![path],
            Err(_) => Vec::new(),
        };
    }

    let mut base = PathBuf::new();
    let mut rest: Vec<String> = Vec::new();
    for component in Path::new(pattern).components() {
        let part = component.as_os_str().to_string_lossy();
        if rest.is_empty() && !has_glob_meta(&part) {
            base.push(component);
        } else {
            rest.push(single_component(&part));
        }
    }
    if base.as_os_str().is_empty() {
        base = PathBuf::from(".");
    }

    let line = format!("/{}", rest.join("/"));
    let mut builder = GitignoreBuilder::new(&base);
    if builder.add_line(None, &line).is_err() {
        return Vec::new();
    }
    let matcher = match builder.build() {
        Ok(matcher) => matcher,
        Err(_) => return Vec::new(),
    };

    let depth = rest.len();
    let mut paths: Vec<PathBuf> = WalkBuilder::new(&base)
        .standard_filters(false)
        .follow_links(true)
        .max_depth(Some(depth))
        .build()
        .filter_map(Result::ok)
        .filter(|entry| entry.depth() == depth)
        .filter(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            matcher.matched(entry.path(), is_dir).is_ignore()
        })
        .map(|entry| entry.into_path())
        .collect();
    paths.sort();
    paths
}
