use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::markdown::RenderOptions;
use crate::style::StyleSheet;

/// How the CLI prints a rendered tree.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Outline,
    Json,
}

impl OutputFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outline => "outline",
            Self::Json => "json",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "outline" => Some(Self::Outline),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Flags that can be persisted in an rc file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub watch: bool,
    pub inline: bool,
    pub debug: bool,
    pub no_default_styles: bool,
    pub perf: bool,
    pub styles: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub render_debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Merge `other` over `self`: switches are or-ed, valued options from
    /// `other` win when present.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            inline: self.inline || other.inline,
            debug: self.debug || other.debug,
            no_default_styles: self.no_default_styles || other.no_default_styles,
            perf: self.perf || other.perf,
            styles: other.styles.clone().or_else(|| self.styles.clone()),
            format: other.format.or(self.format),
            render_debug_log: other
                .render_debug_log
                .clone()
                .or_else(|| self.render_debug_log.clone()),
        }
    }

    /// Build render options, loading the style override file if one is set.
    pub fn render_options(&self) -> Result<RenderOptions> {
        let markdown_styles = match &self.styles {
            Some(path) => StyleSheet::load(path)
                .with_context(|| format!("Failed to load styles {}", path.display()))?,
            None => StyleSheet::new(),
        };
        Ok(RenderOptions::default()
            .with_debug(self.debug)
            .with_parse_inline(self.inline)
            .with_default_styles(!self.no_default_styles)
            .with_markdown_styles(markdown_styles))
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("marktree").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("marktree")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("marktree").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join(".config")
                .join("marktree")
                .join("config");
        }
    }

    local_override_path()
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".marktreerc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let switches = [
        (flags.watch, "--watch"),
        (flags.inline, "--inline"),
        (flags.debug, "--debug"),
        (flags.no_default_styles, "--no-default-styles"),
        (flags.perf, "--perf"),
    ];
    let mut lines = vec!["# marktree defaults (saved with --save)".to_string()];
    lines.extend(
        switches
            .iter()
            .filter(|(on, _)| *on)
            .map(|(_, flag)| (*flag).to_string()),
    );
    if let Some(styles) = &flags.styles {
        lines.push(format!("--styles {}", styles.display()));
    }
    if let Some(format) = flags.format {
        lines.push(format!("--format {}", format.as_str()));
    }
    if let Some(log) = &flags.render_debug_log {
        lines.push(format!("--render-debug-log {}", log.display()));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

/// Pick the known flags out of a token list. Unknown tokens (including the
/// program name and file argument) are skipped. `-w` is short for
/// `--watch`.
pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut tokens = tokens.iter();
    while let Some(token) = tokens.next() {
        let (name, inline_value) = match token.split_once('=') {
            Some((name, value)) => (name, Some(value.to_string())),
            None => (token.as_str(), None),
        };
        let mut value = || inline_value.clone().or_else(|| tokens.next().cloned());

        match name {
            "-w" | "--watch" => flags.watch = true,
            "--inline" => flags.inline = true,
            "--debug" => flags.debug = true,
            "--no-default-styles" => flags.no_default_styles = true,
            "--perf" => flags.perf = true,
            "--styles" => {
                if let Some(path) = value() {
                    flags.styles = Some(PathBuf::from(path));
                }
            }
            "--format" => {
                if let Some(format) = value() {
                    flags.format = OutputFormat::parse(&format);
                }
            }
            "--render-debug-log" => {
                if let Some(path) = value() {
                    flags.render_debug_log = Some(PathBuf::from(path));
                }
            }
            _ => {}
        }
    }
    flags
}
