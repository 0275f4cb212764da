//! Startup configuration and the served root.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::error::ServeError;

/// Command-line and environment configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "filedrop")]
#[command(about = "Share a directory over HTTP: browse, download and upload files")]
pub struct Config {
    /// TCP port to listen on
    #[arg(short, long, default_value_t = 8000, env = "FILEDROP_PORT")]
    pub port: u16,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0", env = "FILEDROP_HOST")]
    pub host: String,

    /// Directory to serve (defaults to the current directory)
    #[arg(short = 'd', long, env = "FILEDROP_ROOT")]
    pub root: Option<PathBuf>,

    /// Largest request body accepted, in MiB
    #[arg(long = "max-body-mb", default_value_t = 1024, env = "FILEDROP_MAX_BODY_MB")]
    pub max_body_mb: usize,
}

impl Config {
    /// Parses the process arguments, exiting with usage on error.
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    pub fn max_body_bytes(&self) -> usize {
        self.max_body_mb.saturating_mul(1024 * 1024)
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Resolves the served root once. Fails if a configured root does not exist.
    pub fn served_root(&self) -> anyhow::Result<ServedRoot> {
        match &self.root {
            Some(dir) => ServedRoot::new(dir),
            None => {
                let cwd = std::env::current_dir().context("cannot read current directory")?;
                ServedRoot::new(cwd)
            }
        }
    }
}

/// The single directory tree exposed by the server.
///
/// Always absolute. Handlers receive it explicitly; the process working
/// directory is never changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServedRoot {
    path: PathBuf,
}

impl ServedRoot {
    pub fn new(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            anyhow::bail!("directory does not exist: {}", path.display());
        }
        if !path.is_dir() {
            anyhow::bail!("not a directory: {}", path.display());
        }
        let path = path
            .canonicalize()
            .with_context(|| format!("cannot resolve {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolves a single file name (download or upload target) inside the root.
    ///
    /// Names carrying a path separator, a quote or any control character
    /// (CR/LF would split the `Content-Disposition` header), or naming
    /// `.`/`..` are rejected.
    pub fn resolve_name(&self, name: &str) -> Result<PathBuf, ServeError> {
        let unsafe_name = name.is_empty()
            || name == "."
            || name == ".."
            || name.chars().any(|c| matches!(c, '/' | '\\' | '"') || c.is_control());
        if unsafe_name {
            return Err(ServeError::UnsafeName(name.to_string()));
        }
        Ok(self.path.join(name))
    }

    /// Resolves a relative request path. `None` when it tries to leave the root.
    pub fn resolve_relative(&self, relative: &str) -> Option<PathBuf> {
        let relative = Path::new(relative);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        contained.then(|| self.path.join(relative))
    }
}
