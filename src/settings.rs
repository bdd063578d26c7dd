// src/settings.rs
//
// Settings resolution. A FormatConfig for one file is built from, in
// increasing priority:
// 1. built-in defaults
// 2. .editorconfig files, collected walking up from the file until one
//    declares `root = true` (closer files win)
// 3. the nearest reformadoc.toml
// 4. explicit overrides (CLI flags)
//
// The wrap column has its own precedence: an explicit `wrap_column`, then
// `max_line_length`, then the largest `guidelines` column, then the largest
// editor guide column, then DEFAULT_WRAP_COLUMN.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{FormatConfig, NewLine, DEFAULT_WRAP_COLUMN};
use crate::error::{ConfigError, ConfigResult};

/// Name of the settings file looked up next to the formatted file.
pub const SETTINGS_FILE_NAME: &str = "reformadoc.toml";

/// Name of the editorconfig files.
pub const EDITORCONFIG_FILE_NAME: &str = ".editorconfig";

/* ============================= reformadoc.toml =========================== */

/// Contents of a `reformadoc.toml` file. Every field is optional; unset fields
/// fall through to lower-priority sources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tabs: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab_size: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_size: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_line: Option<NewLine>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap_column: Option<usize>,

    /// Editor guide lines in the `RGB(r,g,b) 80, 120` format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor_guides: Option<String>,
}

impl Settings {
    /// Load settings from a file
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path)?;
        let settings: Self =
            toml::from_str(&content).map_err(|e| ConfigError::TomlParseError {
                file: path.to_path_buf(),
                error: e,
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Find the nearest settings file by walking up from `start_dir`.
    pub fn find(start_dir: &Path) -> ConfigResult<Option<(PathBuf, Self)>> {
        for dir in start_dir.ancestors() {
            let path = dir.join(SETTINGS_FILE_NAME);
            if path.is_file() {
                let settings = Self::load_from_file(&path)?;
                return Ok(Some((path, settings)));
            }
        }
        Ok(None)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.tab_size == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "tab_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.wrap_column == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "wrap_column".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Fields set in `other` replace those of `self`.
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            use_tabs: other.use_tabs.or(self.use_tabs),
            tab_size: other.tab_size.or(self.tab_size),
            indent_size: other.indent_size.or(self.indent_size),
            new_line: other.new_line.or(self.new_line),
            wrap_column: other.wrap_column.or(self.wrap_column),
            editor_guides: other.editor_guides.or(self.editor_guides),
        }
    }
}

/* ============================== .editorconfig ============================ */

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    glob: String,
    properties: Vec<(String, String)>,
}

/// One parsed `.editorconfig` file. Malformed lines are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfigFile {
    pub root: bool,
    sections: Vec<Section>,
}

impl EditorConfigFile {
    pub fn parse(text: &str) -> Self {
        let mut file = EditorConfigFile::default();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            if let Some(glob) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                file.sections.push(Section {
                    glob: glob.to_string(),
                    properties: Vec::new(),
                });
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().to_string();
            match file.sections.last_mut() {
                Some(section) => section.properties.push((key, value)),
                None if key == "root" => file.root = value.eq_ignore_ascii_case("true"),
                None => {}
            }
        }
        file
    }

    /// Properties of the sections matching `relative_path` (a `/`-separated
    /// path relative to this file's directory), later sections winning.
    fn apply(&self, relative_path: &str, properties: &mut BTreeMap<String, String>) {
        let file_name = relative_path.rsplit('/').next().unwrap_or(relative_path);
        for section in &self.sections {
            let matched = if section.glob.contains('/') {
                glob_matches(section.glob.trim_start_matches('/'), relative_path)
            } else {
                glob_matches(&section.glob, file_name)
            };
            if matched {
                for (key, value) in &section.properties {
                    properties.insert(key.clone(), value.clone());
                }
            }
        }
    }
}

/// Editorconfig properties in effect for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorConfig {
    properties: BTreeMap<String, String>,
}

impl EditorConfig {
    /// Collects the `.editorconfig` files above `path` and applies them,
    /// outermost first.
    pub fn for_file(path: &Path) -> ConfigResult<Self> {
        let path = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let mut files = Vec::new();
        for dir in path.ancestors().skip(1) {
            let candidate = dir.join(EDITORCONFIG_FILE_NAME);
            let text = match fs::read_to_string(&candidate) {
                Ok(text) => text,
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) if candidate.is_dir() => {
                    debug!(path = %candidate.display(), error = %e, "skipping editorconfig");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let file = EditorConfigFile::parse(&text);
            let root = file.root;
            files.push((dir.to_path_buf(), file));
            if root {
                break;
            }
        }

        let mut config = EditorConfig::default();
        for (dir, file) in files.iter().rev() {
            let Ok(relative) = path.strip_prefix(dir) else {
                continue;
            };
            let relative = relative.to_string_lossy().replace('\\', "/");
            file.apply(&relative, &mut config.properties);
        }
        debug!(files = files.len(), properties = config.properties.len(), "resolved editorconfig");
        Ok(config)
    }

    /// Applies already parsed files (outermost first) to `relative_path`.
    pub fn from_files<'f>(
        files: impl IntoIterator<Item = &'f EditorConfigFile>,
        relative_path: &str,
    ) -> Self {
        let mut config = EditorConfig::default();
        for file in files {
            file.apply(relative_path, &mut config.properties);
        }
        config
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn use_tabs(&self) -> Option<bool> {
        match self.get("indent_style")?.to_ascii_lowercase().as_str() {
            "tab" => Some(true),
            "space" => Some(false),
            _ => None,
        }
    }

    /// `indent_size`; the value `tab` means the tab width.
    pub fn indent_size(&self) -> Option<usize> {
        match self.get("indent_size")? {
            v if v.eq_ignore_ascii_case("tab") => self.tab_width(),
            v => parse_positive(v),
        }
    }

    /// `tab_width`, defaulting to a numeric `indent_size`.
    pub fn tab_width(&self) -> Option<usize> {
        self.get("tab_width")
            .and_then(parse_positive)
            .or_else(|| self.get("indent_size").and_then(parse_positive))
    }

    pub fn end_of_line(&self) -> Option<NewLine> {
        self.get("end_of_line").and_then(NewLine::parse)
    }

    pub fn max_line_length(&self) -> Option<usize> {
        self.get("max_line_length").and_then(parse_positive)
    }

    pub fn guidelines(&self) -> Option<usize> {
        self.get("guidelines").and_then(parse_guidelines)
    }
}

/* ================================ Globs ================================== */

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Editorconfig glob: `*` (not `/`), `**`, `?`, `[abc]`, `[!a-z]`, `{a,b}`.
/// Patterns that do not compile match nothing.
pub fn glob_matches(pattern: &str, path: &str) -> bool {
    expand_braces(pattern).iter().any(|p| {
        match Pattern::new(&recursive_components(p)) {
            Ok(pattern) => pattern.matches_with(path, GLOB_OPTIONS),
            Err(e) => {
                debug!(pattern = %p, error = %e, "ignoring editorconfig section");
                false
            }
        }
    })
}

fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let mut depth = 0usize;
    let mut close = None;
    let mut bounds = vec![open];
    for (i, c) in pattern[open..].char_indices() {
        let i = open + i;
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(i);
                    break;
                }
            }
            ',' if depth == 1 => bounds.push(i),
            _ => {}
        }
    }
    let Some(close) = close else {
        return vec![pattern.to_string()];
    };
    bounds.push(close);

    let head = &pattern[..open];
    let tail = &pattern[close + 1..];
    bounds
        .windows(2)
        .flat_map(|w| expand_braces(&format!("{head}{}{tail}", &pattern[w[0] + 1..w[1]])))
        .collect()
}

/// Editorconfig allows `**` inside a path component (`src/**.cs`); glob
/// only accepts it as a whole component, so split it out.
fn recursive_components(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    let mut rest = pattern;
    while let Some(at) = rest.find("**") {
        let (head, tail) = (&rest[..at], &rest[at + 2..]);
        out.push_str(head);
        if !head.is_empty() && !head.ends_with('/') {
            out.push_str("*/");
        }
        out.push_str("**");
        if !tail.is_empty() && !tail.starts_with('/') {
            out.push_str("/*");
        }
        rest = tail.trim_start_matches('*');
    }
    out.push_str(rest);
    out
}

/* ============================ Column settings ============================ */

fn parse_positive(s: &str) -> Option<usize> {
    match s.trim().parse::<i64>() {
        Ok(n) if n > 0 => usize::try_from(n).ok(),
        _ => None,
    }
}

/// Largest column of an editorconfig `guidelines` value such as
/// `80, 120 1px dotted red`: each comma-separated entry starts with a column.
pub fn parse_guidelines(value: &str) -> Option<usize> {
    value
        .split(',')
        .filter_map(|entry| entry.split(' ').find(|s| !s.is_empty()))
        .filter_map(parse_positive)
        .max()
}

/// Largest column of an editor guide string such as `RGB(128,0,0) 80, 120`.
pub fn parse_editor_guides(value: &str) -> Option<usize> {
    let value = value.trim();
    let rest = value.strip_prefix("RGB(")?;
    let close = rest.find(')')?;
    rest[close + 1..].split(',').filter_map(parse_positive).max()
}

/// Wrap column by precedence; see the module docs.
pub fn resolve_wrap_column(
    explicit: Option<usize>,
    editorconfig: &EditorConfig,
    editor_guides: Option<&str>,
) -> usize {
    explicit
        .filter(|&n| n > 0)
        .or_else(|| editorconfig.max_line_length())
        .or_else(|| editorconfig.guidelines())
        .or_else(|| editor_guides.and_then(parse_editor_guides))
        .unwrap_or(DEFAULT_WRAP_COLUMN)
}

/// Final configuration for `document`. The newline style falls back to the
/// document's first line terminator when nothing configures it.
pub fn resolve(settings: &Settings, editorconfig: &EditorConfig, document: &str) -> FormatConfig {
    let defaults = FormatConfig::default();
    let tab_size = settings
        .tab_size
        .filter(|&n| n > 0)
        .or_else(|| editorconfig.tab_width())
        .unwrap_or(defaults.tab_size);
    FormatConfig {
        use_tabs: settings
            .use_tabs
            .or_else(|| editorconfig.use_tabs())
            .unwrap_or(defaults.use_tabs),
        tab_size,
        indent_size: settings
            .indent_size
            .or_else(|| editorconfig.indent_size())
            .unwrap_or(defaults.indent_size),
        new_line: settings
            .new_line
            .or_else(|| editorconfig.end_of_line())
            .or_else(|| NewLine::detect(document))
            .unwrap_or(defaults.new_line),
        wrap_column: resolve_wrap_column(
            settings.wrap_column,
            editorconfig,
            settings.editor_guides.as_deref(),
        ),
    }
}

/// Resolves the configuration for the file at `path` from the files around
/// it, with `overrides` on top.
pub fn load_for_file(
    path: &Path,
    document: &str,
    settings_file: Option<&Path>,
    overrides: Settings,
) -> ConfigResult<FormatConfig> {
    let editorconfig = EditorConfig::for_file(path)?;
    let settings = match settings_file {
        Some(file) => Settings::load_from_file(file)?,
        None => {
            let dir = path.parent().unwrap_or(Path::new("."));
            match Settings::find(dir)? {
                Some((found, settings)) => {
                    debug!(path = %found.display(), "loaded settings");
                    settings
                }
                None => Settings::default(),
            }
        }
    };
    let settings = settings.merge(overrides);
    settings.validate()?;
    Ok(resolve(&settings, &editorconfig, document))
}
