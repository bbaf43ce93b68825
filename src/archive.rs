//! Packaging the presentation directory into a single archive.
//!
//! The archive is built by an external tool. A zip-style tool is preferred,
//! with a tar-style tool as fallback:
//!
//! | Tool        | Invocation                          | Output                |
//! |-------------|-------------------------------------|-----------------------|
//! | `zip`       | `zip -q -r <name>.zip <dir>`        | `<parent>/<name>.zip` |
//! | `tar`       | `tar -czf <name>.tgz <dir>`         | `<parent>/<name>.tgz` |
//!
//! The tool runs with the presentation directory's parent as its working
//! directory, so the archive contains exactly one top-level folder. The
//! working directory is set on the child process only; ours never changes.
//!
//! Tools are looked up on `PATH` unless given as a path. A tool whose file
//! name contains `zip` is driven as a zip-style tool, anything else as
//! tar-style.
//!
//! Process execution sits behind [`CommandRunner`] so the invocation can be
//! tested without the real tools installed.

use log::debug;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("archive tool not found: {0}")]
    ToolNotFound(String),
    #[error("presentation directory {0} does not exist; run `award-deck copy` first")]
    MissingPresentation(PathBuf),
    #[error("cannot archive {0}: it has no parent directory")]
    NoParent(PathBuf),
    #[error("failed to execute {tool}: {source}")]
    Spawn { tool: PathBuf, source: io::Error },
    #[error("{tool} was killed by signal {signal}")]
    Signaled { tool: PathBuf, signal: i32 },
    #[error("{tool} exited with status {code}")]
    Failed { tool: PathBuf, code: i32 },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    Tar,
}

impl ArchiveKind {
    fn from_tool(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if name.contains("zip") {
            ArchiveKind::Zip
        } else {
            ArchiveKind::Tar
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ArchiveKind::Zip => "zip",
            ArchiveKind::Tar => "tgz",
        }
    }

    fn args(self, archive: &str, dir: &str) -> Vec<String> {
        match self {
            ArchiveKind::Zip => vec!["-q".into(), "-r".into(), archive.into(), dir.into()],
            ArchiveKind::Tar => vec!["-czf".into(), archive.into(), dir.into()],
        }
    }
}

/// A located archive executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveTool {
    pub path: PathBuf,
    pub kind: ArchiveKind,
}

impl ArchiveTool {
    pub fn new(path: PathBuf) -> Self {
        let kind = ArchiveKind::from_tool(&path);
        Self { path, kind }
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Exited(i32),
    Signaled(i32),
}

/// Runs an external program in a given working directory.
pub trait CommandRunner {
    fn run(&self, program: &Path, args: &[String], cwd: &Path) -> io::Result<RunOutcome>;
}

/// Runs programs with [`std::process::Command`].
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &Path, args: &[String], cwd: &Path) -> io::Result<RunOutcome> {
        let status = Command::new(program).args(args).current_dir(cwd).status()?;
        if let Some(code) = status.code() {
            return Ok(RunOutcome::Exited(code));
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Ok(RunOutcome::Signaled(signal));
            }
        }
        Ok(RunOutcome::Exited(-1))
    }
}

/// Search the directories of a `PATH`-style value for an executable file.
pub fn find_on_path(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    std::env::split_paths(path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

/// Locate the archive tool.
///
/// A requested tool given as a path (anything with a directory component)
/// is made absolute against the current directory, since the tool later runs
/// elsewhere; a bare name is searched on `path_var`. Without a request,
/// `zip` is tried first, then `tar`.
pub fn resolve_tool(
    requested: Option<&Path>,
    path_var: Option<&OsStr>,
) -> Result<ArchiveTool, ArchiveError> {
    match requested {
        Some(tool) if tool.components().count() > 1 || tool.is_absolute() => {
            if is_executable(tool) {
                Ok(ArchiveTool::new(std::path::absolute(tool)?))
            } else {
                Err(ArchiveError::ToolNotFound(tool.display().to_string()))
            }
        }
        Some(tool) => {
            let name = tool.to_string_lossy();
            find_on_path(&name, path_var)
                .map(ArchiveTool::new)
                .ok_or_else(|| ArchiveError::ToolNotFound(format!("{name} (searched PATH)")))
        }
        None => ["zip", "tar"]
            .iter()
            .find_map(|name| find_on_path(name, path_var))
            .map(ArchiveTool::new)
            .ok_or_else(|| ArchiveError::ToolNotFound("neither zip nor tar is on PATH".into())),
    }
}

/// Archive `presentation_dir` with `tool`, returning the archive's path.
///
/// The archive is named `<file>.<ext>` (default: the directory's own name)
/// and written next to the presentation directory. An archive left by a
/// previous run is replaced.
pub fn create_archive(
    runner: &impl CommandRunner,
    tool: &ArchiveTool,
    presentation_dir: &Path,
    file: Option<&str>,
) -> Result<PathBuf, ArchiveError> {
    if !presentation_dir.is_dir() {
        return Err(ArchiveError::MissingPresentation(
            presentation_dir.to_path_buf(),
        ));
    }
    let absolute = presentation_dir.canonicalize()?;
    let (parent, dir_name) = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => (parent, name.to_string_lossy().into_owned()),
        _ => return Err(ArchiveError::NoParent(absolute.clone())),
    };

    let archive_name = format!("{}.{}", file.unwrap_or(&dir_name), tool.kind.extension());
    let archive_path = parent.join(&archive_name);
    if archive_path.exists() {
        debug!("removing previous archive {}", archive_path.display());
        fs::remove_file(&archive_path)?;
    }

    let args = tool.kind.args(&archive_name, &dir_name);
    debug!(
        "running {} {:?} in {}",
        tool.path.display(),
        args,
        parent.display()
    );
    let outcome = runner
        .run(&tool.path, &args, parent)
        .map_err(|source| ArchiveError::Spawn {
            tool: tool.path.clone(),
            source,
        })?;

    match outcome {
        RunOutcome::Exited(0) => Ok(archive_path),
        RunOutcome::Exited(code) => Err(ArchiveError::Failed {
            tool: tool.path.clone(),
            code,
        }),
        RunOutcome::Signaled(signal) => Err(ArchiveError::Signaled {
            tool: tool.path.clone(),
            signal,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records invocations and answers with a fixed outcome.
    struct MockRunner {
        outcome: io::Result<RunOutcome>,
        calls: RefCell<Vec<(PathBuf, Vec<String>, PathBuf)>>,
    }

    impl MockRunner {
        fn answering(outcome: RunOutcome) -> Self {
            Self {
                outcome: Ok(outcome),
                calls: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                outcome: Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl CommandRunner for MockRunner {
        fn run(&self, program: &Path, args: &[String], cwd: &Path) -> io::Result<RunOutcome> {
            self.calls
                .borrow_mut()
                .push((program.to_path_buf(), args.to_vec(), cwd.to_path_buf()));
            match &self.outcome {
                Ok(outcome) => Ok(*outcome),
                Err(e) => Err(io::Error::new(e.kind(), e.to_string())),
            }
        }
    }

    #[cfg(unix)]
    fn install_tool(dir: &Path, name: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        write_file(&path, "#!/bin/sh\n");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(not(unix))]
    fn install_tool(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        write_file(&path, "");
        path
    }

    fn presentation(tmp: &TempDir) -> PathBuf {
        let dir = tmp.path().join("Presentation");
        write_file(&dir.join("0001-1.jpg"), "photo");
        dir
    }

    fn zip_tool() -> ArchiveTool {
        ArchiveTool::new(PathBuf::from("/usr/bin/zip"))
    }

    // =========================================================================
    // Tool resolution
    // =========================================================================

    #[test]
    fn kind_follows_tool_name() {
        assert_eq!(ArchiveTool::new("/usr/bin/zip".into()).kind, ArchiveKind::Zip);
        assert_eq!(ArchiveTool::new("/opt/7zip".into()).kind, ArchiveKind::Zip);
        assert_eq!(ArchiveTool::new("/bin/tar".into()).kind, ArchiveKind::Tar);
        assert_eq!(ArchiveTool::new("gtar".into()).kind, ArchiveKind::Tar);
    }

    #[test]
    fn prefers_zip_over_tar() {
        let tmp = TempDir::new().unwrap();
        let bin_a = tmp.path().join("a");
        let bin_b = tmp.path().join("b");
        install_tool(&bin_a, "tar");
        let zip = install_tool(&bin_b, "zip");
        let path_var = std::env::join_paths([&bin_a, &bin_b]).unwrap();

        let tool = resolve_tool(None, Some(path_var.as_os_str())).unwrap();
        assert_eq!(tool.path, zip);
        assert_eq!(tool.kind, ArchiveKind::Zip);
    }

    #[test]
    fn falls_back_to_tar() {
        let tmp = TempDir::new().unwrap();
        let tar = install_tool(tmp.path(), "tar");
        let path_var = tmp.path().as_os_str().to_os_string();

        let tool = resolve_tool(None, Some(path_var.as_os_str())).unwrap();
        assert_eq!(tool.path, tar);
        assert_eq!(tool.kind, ArchiveKind::Tar);
    }

    #[test]
    fn no_tool_at_all() {
        let tmp = TempDir::new().unwrap();
        let path_var = tmp.path().as_os_str().to_os_string();
        assert!(matches!(
            resolve_tool(None, Some(path_var.as_os_str())),
            Err(ArchiveError::ToolNotFound(_))
        ));
        assert!(matches!(
            resolve_tool(None, None),
            Err(ArchiveError::ToolNotFound(_))
        ));
    }

    #[test]
    fn requested_name_is_searched_on_path() {
        let tmp = TempDir::new().unwrap();
        let bsdtar = install_tool(tmp.path(), "bsdtar");
        let path_var = tmp.path().as_os_str().to_os_string();

        let tool = resolve_tool(Some(Path::new("bsdtar")), Some(path_var.as_os_str())).unwrap();
        assert_eq!(tool.path, bsdtar);

        let err = resolve_tool(Some(Path::new("zip")), Some(path_var.as_os_str())).unwrap_err();
        assert!(matches!(err, ArchiveError::ToolNotFound(_)));
    }

    #[test]
    fn requested_path_is_used_directly() {
        let tmp = TempDir::new().unwrap();
        let zip = install_tool(tmp.path(), "zip");

        let tool = resolve_tool(Some(zip.as_path()), None).unwrap();
        assert_eq!(tool.path, zip);

        let missing = tmp.path().join("gone/zip");
        assert!(matches!(
            resolve_tool(Some(missing.as_path()), None),
            Err(ArchiveError::ToolNotFound(_))
        ));
    }

    /// `target` spelled relative to the current directory via `..` hops.
    #[cfg(unix)]
    fn relative_to_cwd(target: &Path) -> PathBuf {
        let cwd = std::env::current_dir().unwrap();
        let mut relative = PathBuf::new();
        for _ in cwd.components().skip(1) {
            relative.push("..");
        }
        relative.join(target.strip_prefix("/").unwrap())
    }

    #[cfg(unix)]
    #[test]
    fn requested_relative_path_becomes_absolute() {
        let tmp = TempDir::new().unwrap();
        let zip = install_tool(tmp.path(), "zip");
        let relative = relative_to_cwd(&zip);
        assert!(relative.is_relative());

        let tool = resolve_tool(Some(relative.as_path()), None).unwrap();

        assert!(tool.path.is_absolute());
        assert_eq!(tool.kind, ArchiveKind::Zip);
        assert_eq!(
            tool.path.canonicalize().unwrap(),
            zip.canonicalize().unwrap()
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_executable_files_are_not_tools() {
        let tmp = TempDir::new().unwrap();
        write_file(&tmp.path().join("zip"), "not executable");
        let path_var = tmp.path().as_os_str().to_os_string();
        assert_eq!(find_on_path("zip", Some(path_var.as_os_str())), None);
    }

    // =========================================================================
    // Invocation
    // =========================================================================

    #[test]
    fn zip_runs_in_parent_with_single_folder() {
        let tmp = TempDir::new().unwrap();
        let dir = presentation(&tmp);
        let runner = MockRunner::answering(RunOutcome::Exited(0));

        let archive = create_archive(&runner, &zip_tool(), &dir, None).unwrap();

        let parent = tmp.path().canonicalize().unwrap();
        assert_eq!(archive, parent.join("Presentation.zip"));
        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        let (program, args, cwd) = &calls[0];
        assert_eq!(program, &PathBuf::from("/usr/bin/zip"));
        assert_eq!(args, &["-q", "-r", "Presentation.zip", "Presentation"]);
        assert_eq!(cwd, &parent);
    }

    #[test]
    fn tar_uses_tgz_and_custom_name() {
        let tmp = TempDir::new().unwrap();
        let dir = presentation(&tmp);
        let runner = MockRunner::answering(RunOutcome::Exited(0));
        let tar = ArchiveTool::new(PathBuf::from("/bin/tar"));

        let archive = create_archive(&runner, &tar, &dir, Some("awards-2026")).unwrap();

        assert!(archive.ends_with("awards-2026.tgz"));
        let calls = runner.calls.borrow();
        assert_eq!(calls[0].1, vec!["-czf", "awards-2026.tgz", "Presentation"]);
    }

    #[test]
    fn previous_archive_is_removed_first() {
        let tmp = TempDir::new().unwrap();
        let dir = presentation(&tmp);
        let stale = tmp.path().join("Presentation.zip");
        write_file(&stale, "old archive");
        let runner = MockRunner::answering(RunOutcome::Exited(0));

        create_archive(&runner, &zip_tool(), &dir, None).unwrap();
        assert!(!stale.exists());
    }

    #[test]
    fn missing_presentation_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let runner = MockRunner::answering(RunOutcome::Exited(0));
        let err =
            create_archive(&runner, &zip_tool(), &tmp.path().join("Presentation"), None).unwrap_err();
        assert!(matches!(err, ArchiveError::MissingPresentation(_)));
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn exec_failure_signal_and_exit_code_are_distinct() {
        let tmp = TempDir::new().unwrap();
        let dir = presentation(&tmp);

        let spawn = create_archive(&MockRunner::failing(), &zip_tool(), &dir, None).unwrap_err();
        assert!(matches!(spawn, ArchiveError::Spawn { .. }));
        assert!(spawn.to_string().starts_with("failed to execute"));

        let signal = create_archive(
            &MockRunner::answering(RunOutcome::Signaled(9)),
            &zip_tool(),
            &dir,
            None,
        )
        .unwrap_err();
        assert!(matches!(signal, ArchiveError::Signaled { signal: 9, .. }));
        assert!(signal.to_string().contains("killed by signal 9"));

        let failed = create_archive(
            &MockRunner::answering(RunOutcome::Exited(12)),
            &zip_tool(),
            &dir,
            None,
        )
        .unwrap_err();
        assert!(matches!(failed, ArchiveError::Failed { code: 12, .. }));
        assert!(failed.to_string().contains("exited with status 12"));
    }
}
