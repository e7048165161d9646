//! Static site build: copy assets, then render every markdown page.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::config::Config;
use crate::error::RenderError;
use crate::template::render_page;

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error(
        "output directory {} would remove source directory {}",
        output.display(),
        source_dir.display()
    )]
    OutputContainsSource { output: PathBuf, source_dir: PathBuf },
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to render {}: {source}", path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

/// What a build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub assets: usize,
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> SiteError + '_ {
    move |source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Build the whole site described by `config`.
///
/// The output directory is replaced, not merged into.
pub fn build(config: &Config) -> Result<BuildReport, SiteError> {
    let paths = &config.paths;

    if !paths.static_dir.is_dir() {
        return Err(SiteError::MissingDirectory(paths.static_dir.clone()));
    }
    if !paths.content.is_dir() {
        return Err(SiteError::MissingDirectory(paths.content.clone()));
    }

    check_output(&paths.output, &[paths.content.as_path(), paths.static_dir.as_path()])?;

    reset_dir(&paths.output)?;
    let assets = copy_dir(&paths.static_dir, &paths.output)?;
    tracing::info!(assets, from = %paths.static_dir.display(), "copied static files");

    let template = fs::read_to_string(&paths.template).map_err(io_error(&paths.template))?;

    let pages = collect_pages(&paths.content)?;
    pages.par_iter().try_for_each(|source| {
        let relative = source.strip_prefix(&paths.content).unwrap_or(source.as_path());
        let dest = paths.output.join(relative).with_extension("html");
        generate_page(source, &template, &dest, &config.site.base_path)
    })?;
    tracing::info!(pages = pages.len(), to = %paths.output.display(), "generated pages");

    Ok(BuildReport {
        pages: pages.len(),
        assets,
    })
}

/// Render one markdown file through `template` into `dest`.
pub fn generate_page(
    source: &Path,
    template: &str,
    dest: &Path,
    base_path: &str,
) -> Result<(), SiteError> {
    tracing::debug!(from = %source.display(), to = %dest.display(), "generating page");

    let markdown = fs::read_to_string(source).map_err(io_error(source))?;
    let html = render_page(template, &markdown, base_path).map_err(|source_err| {
        SiteError::Render {
            path: source.to_path_buf(),
            source: source_err,
        }
    })?;

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }
    fs::write(dest, html).map_err(io_error(dest))
}

/// Refuse an output directory that is, or sits above, a source directory;
/// resetting it would delete the sources.
fn check_output(output: &Path, sources: &[&Path]) -> Result<(), SiteError> {
    if !output.exists() {
        return Ok(());
    }
    let output = output.canonicalize().map_err(io_error(output))?;
    for source in sources {
        let resolved = source.canonicalize().map_err(io_error(source))?;
        if resolved.starts_with(&output) {
            return Err(SiteError::OutputContainsSource {
                output,
                source_dir: source.to_path_buf(),
            });
        }
    }
    Ok(())
}

/// Remove `dir` if present and create it empty.
fn reset_dir(dir: &Path) -> Result<(), SiteError> {
    if dir.exists() {
        tracing::debug!(dir = %dir.display(), "removing previous output");
        fs::remove_dir_all(dir).map_err(io_error(dir))?;
    }
    fs::create_dir_all(dir).map_err(io_error(dir))
}

/// Recursively copy the contents of `from` into `to`, returning the number
/// of files copied.
pub fn copy_dir(from: &Path, to: &Path) -> Result<usize, SiteError> {
    let mut copied = 0;
    for entry in fs::read_dir(from).map_err(io_error(from))? {
        let entry = entry.map_err(io_error(from))?;
        let path = entry.path();
        let target = to.join(entry.file_name());
        if path.is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
            copied += copy_dir(&path, &target)?;
        } else {
            fs::copy(&path, &target).map_err(io_error(&path))?;
            tracing::debug!(from = %path.display(), to = %target.display(), "copied");
            copied += 1;
        }
    }
    Ok(copied)
}

/// Every `.md` file under `dir`, sorted for a stable build order.
fn collect_pages(dir: &Path) -> Result<Vec<PathBuf>, SiteError> {
    let mut pages = Vec::new();
    walk_dir(dir, &mut pages)?;
    pages.sort();
    Ok(pages)
}

fn walk_dir(current: &Path, pages: &mut Vec<PathBuf>) -> Result<(), SiteError> {
    for entry in fs::read_dir(current).map_err(io_error(current))? {
        let path = entry.map_err(io_error(current))?.path();
        if path.is_dir() {
            walk_dir(&path, pages)?;
        } else if path.extension().is_some_and(|ext| ext == "md") {
            pages.push(path);
        }
    }
    Ok(())
}
