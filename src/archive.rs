//! Fragment archiving.
//!
//! Each fragment directory under the collection root becomes one
//! `<name>.zip`. Entry paths are relative to the collection root, so every
//! entry starts with the fragment name:
//!
//! ```text
//! fragments/sp-hero/index.html      ──► sp-hero.zip: sp-hero/index.html
//! fragments/sp-hero/img/banner.png  ──► sp-hero.zip: sp-hero/img/banner.png
//! ```

use crate::log;
use std::{
    fs::{self, File},
    io,
    path::{Component, Path, PathBuf},
};
use thiserror::Error;
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("cannot access `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("failed to walk `{0}`")]
    Walk(PathBuf, #[source] walkdir::Error),

    #[error("failed to write archive `{0}`")]
    Zip(PathBuf, #[source] zip::result::ZipError),

    #[error("`{path}` is outside `{root}`")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

type Result<T> = std::result::Result<T, ArchiveError>;

/// What happened to one requested fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// Archive written with this many entries.
    Archived { entries: usize },
    /// Fragment directory does not exist; nothing written.
    Missing,
}

/// Per-fragment outcomes, in request order.
#[derive(Debug, Default)]
pub struct ArchiveReport {
    pub fragments: Vec<(String, FragmentOutcome)>,
}

impl ArchiveReport {
    pub fn total(&self) -> usize {
        self.fragments.len()
    }

    /// Files written across all archives.
    pub fn entries(&self) -> usize {
        self.fragments
            .iter()
            .map(|(_, outcome)| match outcome {
                FragmentOutcome::Archived { entries } => *entries,
                FragmentOutcome::Missing => 0,
            })
            .sum()
    }

    /// Fragments actually archived (empty archives included).
    pub fn archived(&self) -> usize {
        self.fragments
            .iter()
            .filter(|(_, outcome)| matches!(outcome, FragmentOutcome::Archived { .. }))
            .count()
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Archive every fragment in `fragments`, in order.
///
/// Missing fragments are reported and skipped; any other failure aborts.
pub fn archive_fragments<S: AsRef<str>>(
    source: &Path,
    output: &Path,
    fragments: &[S],
) -> Result<ArchiveReport> {
    fs::create_dir_all(output).map_err(|err| ArchiveError::Io(output.to_path_buf(), err))?;

    log!("zip"; "source: {}", source.display());
    log!("zip"; "output: {}", output.display());

    let mut report = ArchiveReport::default();
    for name in fragments {
        let name = name.as_ref();
        let outcome = archive_fragment(name, source, output)?;
        report.fragments.push((name.to_string(), outcome));
    }

    log!(
        "zip";
        "archived {}/{} fragments ({} files) into {}",
        report.archived(),
        report.total(),
        report.entries(),
        output.display()
    );
    Ok(report)
}

/// Write `output/<name>.zip` from `source/<name>`, replacing any previous archive.
pub fn archive_fragment(name: &str, source: &Path, output: &Path) -> Result<FragmentOutcome> {
    let fragment_dir = source.join(name);
    if !fragment_dir.is_dir() {
        log!("warn"; "fragment directory {} does not exist, skipping", fragment_dir.display());
        return Ok(FragmentOutcome::Missing);
    }

    let files = collect_files(&fragment_dir)?;
    let zip_name = format!("{name}.zip");
    let zip_path = output.join(&zip_name);

    let file = File::create(&zip_path).map_err(|err| ArchiveError::Io(zip_path.clone(), err))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for path in &files {
        let entry = entry_name(path, source)?;
        let mut input = File::open(path).map_err(|err| ArchiveError::Io(path.clone(), err))?;

        zip.start_file(entry.as_str(), options)
            .map_err(|err| ArchiveError::Zip(zip_path.clone(), err))?;
        io::copy(&mut input, &mut zip).map_err(|err| ArchiveError::Io(path.clone(), err))?;

        log!("zip"; "added {} to {}", entry, zip_name);
    }

    zip.finish()
        .map_err(|err| ArchiveError::Zip(zip_path.clone(), err))?;

    log!("zip"; "created {} ({} files)", zip_name, files.len());
    Ok(FragmentOutcome::Archived {
        entries: files.len(),
    })
}

/// Collect all regular files under `dir`, recursively, in walk order.
///
/// Symlinks are followed and archived under the link's own path. A dangling
/// link or a link cycle is a walk error.
pub fn collect_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.map_err(|err| ArchiveError::Walk(dir.to_path_buf(), err))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Archive entry name for `path`: relative to `root`, `/`-separated.
pub fn entry_name(path: &Path, root: &Path) -> Result<String> {
    let outside = || ArchiveError::OutsideRoot {
        path: path.to_path_buf(),
        root: root.to_path_buf(),
    };
    let relative = path.strip_prefix(root).map_err(|_| outside())?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            _ => return Err(outside()),
        }
    }
    Ok(parts.join("/"))
}

// ============================================================================
// Tests
// ============================================================================
