//! Batch placeholder rewriting over files selected by a glob.
//!
//! Every file ends in exactly one [`FileOutcome`]; a failure on one file is
//! logged and the batch moves on.

use crate::{
    log,
    logger::{dimmed, status_symbol},
    placeholder::{NAMESPACE, Rewriter},
};
use anyhow::{Context, Result, bail};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

/// Whether changed files are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    Apply,
    /// Report only; never touches the file system.
    Check,
}

/// Terminal state of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Rewritten (or, in check mode, would be).
    Fixed,
    Unchanged,
    Failed(String),
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed => f.write_str("fixed"),
            Self::Unchanged => f.write_str("unchanged"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
        }
    }
}

#[derive(Debug, Default)]
pub struct FixReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl FixReport {
    pub fn total(&self) -> usize {
        self.files.len()
    }

    pub fn fixed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Fixed))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unchanged))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|(_, o)| pred(o)).count()
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Build the rewrite rules for `variables` and run them over `pattern`.
///
/// In [`FixMode::Check`], any file that still needs fixing is an error.
pub fn fix_all<S: AsRef<str>>(variables: &[S], pattern: &str, mode: FixMode) -> Result<FixReport> {
    let rewriter = Rewriter::new(variables).context("Failed to build rewrite rules")?;

    log!("fix"; "scanning {}", pattern);
    let report = fix_files(&rewriter, pattern, mode)?;

    if mode == FixMode::Check && report.fixed() > 0 {
        bail!("{} files have bare config variables", report.fixed());
    }
    Ok(report)
}

/// Rewrite every file matching `pattern`, in glob order.
///
/// Only an invalid pattern is an error; per-file problems end up in the report.
pub fn fix_files(rewriter: &Rewriter, pattern: &str, mode: FixMode) -> Result<FixReport> {
    let paths =
        glob::glob(pattern).with_context(|| format!("invalid file pattern `{pattern}`"))?;

    let mut report = FixReport::default();
    for entry in paths {
        let (path, outcome) = match entry {
            Ok(path) => {
                let outcome = fix_file(rewriter, &path, mode);
                (path, outcome)
            }
            Err(err) => {
                let path = err.path().to_path_buf();
                let outcome = FileOutcome::Failed(err.error().to_string());
                log_outcome(&path, &outcome, mode);
                (path, outcome)
            }
        };
        report.files.push((path, outcome));
    }

    log_summary(&report, mode);
    Ok(report)
}

/// Rewrite one file in place. Never fails; errors become [`FileOutcome::Failed`].
pub fn fix_file(rewriter: &Rewriter, path: &Path, mode: FixMode) -> FileOutcome {
    let outcome = match try_fix_file(rewriter, path, mode) {
        Ok(true) => FileOutcome::Fixed,
        Ok(false) => FileOutcome::Unchanged,
        Err(err) => FileOutcome::Failed(format!("{err:#}")),
    };
    log_outcome(path, &outcome, mode);
    outcome
}

/// Returns whether the file needed changes.
fn try_fix_file(rewriter: &Rewriter, path: &Path, mode: FixMode) -> Result<bool> {
    let content = fs::read_to_string(path).context("failed to read file")?;

    if mode == FixMode::Check {
        return Ok(rewriter.needs_rewrite(&content));
    }

    let fixed = rewriter.rewrite(&content);
    if fixed == content.as_str() {
        return Ok(false);
    }
    fs::write(path, fixed.as_bytes()).context("failed to write file")?;
    Ok(true)
}

// ============================================================================
// Output
// ============================================================================

fn log_outcome(path: &Path, outcome: &FileOutcome, mode: FixMode) {
    let (module, line) = outcome_line(path, outcome, mode);
    log!(module; "{}", line);
}

/// Logger module and full status line for one file. The path and any
/// failure reason are always included in full.
fn outcome_line(path: &Path, outcome: &FileOutcome, mode: FixMode) -> (&'static str, String) {
    let path = path.display();
    match (outcome, mode) {
        (FileOutcome::Fixed, FixMode::Apply) => {
            ("fix", format!("{} fixed: {path}", status_symbol(true)))
        }
        (FileOutcome::Fixed, FixMode::Check) => {
            ("fix", format!("{} needs fix: {path}", status_symbol(false)))
        }
        (FileOutcome::Unchanged, _) => ("fix", dimmed(&format!("unchanged: {path}")).to_string()),
        (FileOutcome::Failed(reason), _) => {
            ("error", format!("{} {path}: {reason}", status_symbol(false)))
        }
    }
}

fn log_summary(report: &FixReport, mode: FixMode) {
    let fixed_label = match mode {
        FixMode::Apply => "fixed",
        FixMode::Check => "need fixes",
    };
    log!(
        "fix";
        "{} files processed: {} {}, {} unchanged, {} failed",
        report.total(),
        report.fixed(),
        fixed_label,
        report.unchanged(),
        report.failed()
    );

    match (report.fixed(), mode) {
        (0, _) => log!("fix"; "no bare config variables found"),
        (_, FixMode::Apply) => {
            log!("fix"; "variables now use ${{{NAMESPACE}.variableName}}");
        }
        (_, FixMode::Check) => {}
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn rewriter() -> Rewriter {
        Rewriter::new(&["displayStyle", "showRatings", "showBadge"]).unwrap()
    }

    /// `dir/<name>/index.html` for each fragment.
    fn write_fragments(dir: &Path, fragments: &[(&str, &str)]) -> String {
        for (name, content) in fragments {
            let fragment = dir.join(name);
            fs::create_dir_all(&fragment).unwrap();
            fs::write(fragment.join("index.html"), content).unwrap();
        }
        let root = glob::Pattern::escape(&dir.to_string_lossy());
        format!("{root}/*/index.html")
    }

    #[test]
    fn test_fix_file_rewrites_in_place() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(
            &path,
            "[#if (showRatings)]<b>${displayStyle!\"a\"}</b>[#elseif (showBadge)][/#if]",
        )
        .unwrap();

        assert_eq!(fix_file(&rewriter(), &path, FixMode::Apply), FileOutcome::Fixed);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[#if (configuration.showRatings)]<b>${configuration.displayStyle!\"a\"}</b>\
             [#elseif (configuration.showBadge)][/#if]"
        );

        // Second run has nothing left to do.
        assert_eq!(fix_file(&rewriter(), &path, FixMode::Apply), FileOutcome::Unchanged);
    }

    #[test]
    fn test_fix_file_unchanged_not_rewritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "${configuration.displayStyle}").unwrap();
        let before = fs::metadata(&path).unwrap().modified().unwrap();

        assert_eq!(fix_file(&rewriter(), &path, FixMode::Apply), FileOutcome::Unchanged);
        assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn test_fix_file_invalid_utf8_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, [0xff, 0xfe, b'$']).unwrap();

        let outcome = fix_file(&rewriter(), &path, FixMode::Apply);
        assert!(matches!(outcome, FileOutcome::Failed(reason) if reason.contains("read")));
    }

    #[test]
    fn test_fix_file_missing_fails() {
        let dir = TempDir::new().unwrap();
        let outcome = fix_file(&rewriter(), &dir.path().join("nope.html"), FixMode::Apply);
        assert!(matches!(outcome, FileOutcome::Failed(_)));
    }

    #[test]
    fn test_check_mode_never_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "${showBadge}").unwrap();

        assert_eq!(fix_file(&rewriter(), &path, FixMode::Check), FileOutcome::Fixed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "${showBadge}");
    }

    #[test]
    fn test_fix_files_counts_add_up() {
        let dir = TempDir::new().unwrap();
        let pattern = write_fragments(
            dir.path(),
            &[
                ("sp-hero", "${displayStyle}"),
                ("sp-footer", "${configuration.displayStyle}"),
                ("sp-header", "[#if (showRatings)][/#if]"),
                ("sp-broken", ""),
            ],
        );
        fs::write(dir.path().join("sp-broken/index.html"), [0xc3u8, 0x28]).unwrap();
        // Not matched by the pattern.
        fs::write(dir.path().join("sp-hero/other.html"), "${displayStyle}").unwrap();

        let report = fix_files(&rewriter(), &pattern, FixMode::Apply).unwrap();

        assert_eq!(report.total(), 4);
        assert_eq!(report.fixed(), 2);
        assert_eq!(report.unchanged(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(
            report.fixed() + report.unchanged() + report.failed(),
            report.total()
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("sp-hero/other.html")).unwrap(),
            "${displayStyle}"
        );

        let again = fix_files(&rewriter(), &pattern, FixMode::Apply).unwrap();
        assert_eq!(again.fixed(), 0);
        assert_eq!(again.unchanged(), 3);
    }

    #[test]
    fn test_fix_files_no_matches() {
        let dir = TempDir::new().unwrap();
        let pattern = write_fragments(dir.path(), &[]);

        let report = fix_files(&rewriter(), &pattern, FixMode::Apply).unwrap();
        assert_eq!(report.total(), 0);
    }

    #[test]
    fn test_fix_files_invalid_pattern() {
        assert!(fix_files(&rewriter(), "frags/[*.html", FixMode::Apply).is_err());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(FileOutcome::Fixed.to_string(), "fixed");
        assert_eq!(
            FileOutcome::Failed("denied".into()).to_string(),
            "failed: denied"
        );
    }

    #[test]
    fn test_failure_line_keeps_path_and_reason() {
        let path = PathBuf::from(format!(
            "scottish-power-collection/fragments/{}/index.html",
            "sp-a-very-long-fragment-directory-".repeat(4)
        ));
        assert!(path.display().to_string().len() > 120);
        let reason = "failed to read file: stream did not contain valid UTF-8";

        let (module, line) =
            outcome_line(&path, &FileOutcome::Failed(reason.into()), FixMode::Apply);

        assert_eq!(module, "error");
        assert!(line.contains(&path.display().to_string()));
        assert!(line.ends_with(reason));
    }

    #[test]
    fn test_fix_all_check_fails_until_clean() {
        let dir = TempDir::new().unwrap();
        let pattern = write_fragments(
            dir.path(),
            &[("sp-hero", "${displayStyle}"), ("sp-footer", "<footer/>")],
        );
        let variables = ["displayStyle"];

        let err = fix_all(&variables, &pattern, FixMode::Check).unwrap_err();
        assert!(err.to_string().contains("1 files have bare config variables"));
        assert_eq!(
            fs::read_to_string(dir.path().join("sp-hero/index.html")).unwrap(),
            "${displayStyle}"
        );

        let report = fix_all(&variables, &pattern, FixMode::Apply).unwrap();
        assert_eq!(report.fixed(), 1);

        let report = fix_all(&variables, &pattern, FixMode::Check).unwrap();
        assert_eq!(report.fixed(), 0);
        assert_eq!(report.unchanged(), 2);
    }

    #[test]
    fn test_fix_all_rejects_invalid_variable() {
        let dir = TempDir::new().unwrap();
        let pattern = write_fragments(dir.path(), &[]);
        assert!(fix_all(&["not a name"], &pattern, FixMode::Apply).is_err());
    }
}
