//! Audio output backends
//!
//! Stereo does not decode audio itself. Playback is delegated to an external
//! command-line player which is launched per track (and relaunched on resume
//! and seek) and killed to pause or stop.

use crate::error::{PlaybackError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::str::FromStr;
use std::time::Duration;
use tokio::process::{Child, Command};

/// A way of turning a file into sound
pub trait PlayerBackend: Send + Sync + fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether `launch` honours a non-zero offset
    fn supports_seek(&self) -> bool;

    /// Start playing `path` from `offset`
    ///
    /// Backends that cannot seek ignore `offset`.
    fn launch(&self, path: &Path, offset: Duration) -> Result<Box<dyn OutputProcess>>;
}

/// Handle to one running output process
#[async_trait]
pub trait OutputProcess: Send + fmt::Debug {
    /// Kill the process and reap it
    ///
    /// Terminating a process that already exited is not an error.
    async fn terminate(&mut self) -> Result<()>;
}

/// Supported external player programs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputProgram {
    /// FFmpeg's minimal player
    Ffplay,

    /// FFmpeg writing straight to the default ALSA device
    Ffmpeg,

    /// macOS command-line player
    Afplay,
}

impl OutputProgram {
    /// Programs tried by the startup probe, in order
    pub fn probe_order() -> Vec<Self> {
        let mut order = vec![Self::Ffplay];

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        order.push(Self::Ffmpeg);

        order.push(Self::Afplay);
        order
    }

    /// Executable name searched for on `PATH`
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ffplay => "ffplay",
            Self::Ffmpeg => "ffmpeg",
            Self::Afplay => "afplay",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Ffplay => "ffplay without a display window",
            Self::Ffmpeg => "ffmpeg decoding to the default ALSA device",
            Self::Afplay => "macOS afplay (no seeking)",
        }
    }

    pub fn supports_seek(&self) -> bool {
        !matches!(self, Self::Afplay)
    }

    /// Command-line arguments for playing `path` from `offset`
    pub fn args(&self, path: &Path, offset: Duration) -> Vec<OsString> {
        let start = format!("{:.3}", offset.as_secs_f64());

        match self {
            Self::Ffplay => vec![
                "-nodisp".into(),
                "-autoexit".into(),
                "-loglevel".into(),
                "error".into(),
                "-ss".into(),
                start.into(),
                path.into(),
            ],
            Self::Ffmpeg => vec![
                "-hide_banner".into(),
                "-loglevel".into(),
                "fatal".into(),
                "-ss".into(),
                start.into(),
                "-i".into(),
                path.into(),
                "-f".into(),
                "alsa".into(),
                "default".into(),
            ],
            Self::Afplay => vec![path.into()],
        }
    }
}

impl fmt::Display for OutputProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputProgram {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ffplay" => Ok(Self::Ffplay),
            "ffmpeg" => Ok(Self::Ffmpeg),
            "afplay" => Ok(Self::Afplay),
            other => Err(format!("unknown output program: {other}")),
        }
    }
}

/// Locate an executable by searching `PATH`
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let paths = std::env::var_os("PATH")?;

    std::env::split_paths(&paths)
        .map(|dir| dir.join(executable_name(name)))
        .find(|candidate| candidate.is_file())
}

#[cfg(target_os = "windows")]
fn executable_name(name: &str) -> String {
    format!("{name}.exe")
}

#[cfg(not(target_os = "windows"))]
fn executable_name(name: &str) -> String {
    name.to_string()
}

/// Backend that runs one of the [`OutputProgram`]s as a child process
#[derive(Debug, Clone)]
pub struct CommandBackend {
    program: OutputProgram,
    binary: PathBuf,
}

impl CommandBackend {
    pub fn new(program: OutputProgram, binary: impl Into<PathBuf>) -> Self {
        Self {
            program,
            binary: binary.into(),
        }
    }

    /// Pick the output program once at startup
    ///
    /// With `preferred` set, only that program is considered, at `binary` if
    /// given. Otherwise the programs from [`OutputProgram::probe_order`] are
    /// searched for on `PATH`.
    pub fn probe(preferred: Option<OutputProgram>, binary: Option<&Path>) -> Result<Self> {
        if let Some(binary) = binary {
            let program = match preferred {
                Some(program) => program,
                None => binary
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(|stem| stem.parse().ok())
                    .ok_or_else(|| {
                        PlaybackError::NoBackendAvailable(binary.display().to_string())
                    })?,
            };

            if !binary.is_file() {
                return Err(PlaybackError::NoBackendAvailable(
                    binary.display().to_string(),
                ));
            }

            tracing::debug!("Using {} at {}", program, binary.display());
            return Ok(Self::new(program, binary));
        }

        let candidates = preferred.map_or_else(OutputProgram::probe_order, |p| vec![p]);

        for program in &candidates {
            if let Some(binary) = find_in_path(program.name()) {
                tracing::debug!("Found {} at {}", program, binary.display());
                return Ok(Self::new(*program, binary));
            }
            tracing::debug!("{} not found on PATH", program);
        }

        let tried: Vec<&str> = candidates.iter().map(|p| p.name()).collect();
        Err(PlaybackError::NoBackendAvailable(tried.join(", ")))
    }

    pub fn program(&self) -> OutputProgram {
        self.program
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl PlayerBackend for CommandBackend {
    fn name(&self) -> &'static str {
        self.program.name()
    }

    fn supports_seek(&self) -> bool {
        self.program.supports_seek()
    }

    fn launch(&self, path: &Path, offset: Duration) -> Result<Box<dyn OutputProcess>> {
        let child = Command::new(&self.binary)
            .args(self.program.args(path, offset))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PlaybackError::Launch {
                program: self.program.name(),
                path: path.to_path_buf(),
                source,
            })?;

        tracing::debug!(
            "Launched {} (pid {:?}) for {}",
            self.program,
            child.id(),
            path.display()
        );

        Ok(Box::new(ChildProcess { child }))
    }
}

/// A spawned player process
#[derive(Debug)]
pub struct ChildProcess {
    child: Child,
}

#[async_trait]
impl OutputProcess for ChildProcess {
    async fn terminate(&mut self) -> Result<()> {
        if self.child.try_wait()?.is_some() {
            return Ok(());
        }

        match self.child.kill().await {
            Ok(()) => Ok(()),
            // Exited between try_wait and kill
            Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
