//! Size-rotating file writer

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use jiff::Zoned;
use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::{FileConfig, RotationConfig};
use crate::logger::error::LoggerError;

/// File writer shared by every event of a `fmt` layer.
///
/// Write failures switch the writer to stderr so log lines are never lost
/// silently.
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

struct WriterState {
    file: BufWriter<File>,
    current_size: u64,
    rotation: RotationConfig,
    fallback_mode: bool,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = open_log_file(&config.path, config.append)?;
        let current_size = if config.append {
            fs::metadata(&config.path).map(|m| m.len()).unwrap_or(0)
        } else {
            0
        };

        Ok(Self {
            state: Arc::new(Mutex::new(WriterState {
                file,
                current_size,
                rotation: config.rotation.clone(),
                fallback_mode: false,
            })),
            path: config.path.clone(),
        })
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterGuard {
            state: self.state.clone(),
            path: self.path.clone(),
        }
    }
}

pub struct RotatingWriterGuard {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
}

impl Write for RotatingWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().write(buf);
        }

        if state.current_size >= state.rotation.max_size {
            if let Err(e) = rotate(&mut state, &self.path) {
                return fall_back(&mut state, buf, e);
            }
        }

        match state.file.write(buf) {
            Ok(written) => {
                state.current_size += written as u64;
                Ok(written)
            }
            Err(e) => fall_back(&mut state, buf, e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        if state.fallback_mode {
            return io::stderr().flush();
        }
        state.file.flush()
    }
}

impl Drop for RotatingWriterGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.state.lock() {
            let _ = state.file.flush();
        }
    }
}

fn fall_back(state: &mut WriterState, buf: &[u8], error: io::Error) -> io::Result<usize> {
    state.fallback_mode = true;
    eprintln!(
        "[Logger] File write failed, falling back to stderr: {}",
        error
    );
    io::stderr().write(buf)
}

fn rotate(state: &mut WriterState, path: &Path) -> io::Result<()> {
    state.file.flush()?;

    if path.exists() {
        fs::rename(path, rotated_path(path))?;
    }
    state.file = open_log_file(path, false)?;
    state.current_size = 0;

    cleanup_rotated_files(path, state.rotation.max_files)
}

/// `logs/median.log` becomes `logs/median.20260101_120000.log`
fn rotated_path(base_path: &Path) -> PathBuf {
    let timestamp = Zoned::now().strftime("%Y%m%d_%H%M%S%.3f");
    let stem = base_path.file_stem().unwrap_or_default().to_string_lossy();
    let ext = base_path.extension().unwrap_or_default().to_string_lossy();

    let name = if ext.is_empty() {
        format!("{}.{}", stem, timestamp)
    } else {
        format!("{}.{}.{}", stem, timestamp, ext)
    };
    base_path.with_file_name(name)
}

/// Deletes the oldest rotated files beyond `max_files`.
fn cleanup_rotated_files(base_path: &Path, max_files: usize) -> io::Result<()> {
    let parent = match base_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let prefix = format!(
        "{}.",
        base_path.file_stem().unwrap_or_default().to_string_lossy()
    );

    let mut rotated: Vec<PathBuf> = fs::read_dir(parent)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path != base_path
                && path
                    .file_name()
                    .map(|name| name.to_string_lossy().starts_with(&prefix))
                    .unwrap_or(false)
        })
        .collect();

    // Timestamped names sort chronologically
    rotated.sort();

    let excess = rotated.len().saturating_sub(max_files);
    for path in rotated.into_iter().take(excess) {
        fs::remove_file(path)?;
    }
    Ok(())
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::LogFormat;
    use tempfile::TempDir;

    fn file_config(path: PathBuf, max_size: u64, max_files: usize) -> FileConfig {
        FileConfig {
            enabled: true,
            path,
            append: true,
            format: LogFormat::Json,
            rotation: RotationConfig {
                max_size,
                max_files,
            },
        }
    }

    #[test]
    fn test_writer_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/median.log");

        let writer = RotatingFileWriter::new(&file_config(path.clone(), 1024, 2)).unwrap();
        writer.make_writer().write_all(b"hello\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");
    }

    #[test]
    fn test_writer_rotates_when_size_reached() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("median.log");
        let writer = RotatingFileWriter::new(&file_config(path.clone(), 8, 5)).unwrap();

        writer.make_writer().write_all(b"0123456789\n").unwrap();
        writer.make_writer().write_all(b"second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second\n");
        let rotated = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path() != path)
            .count();
        assert_eq!(rotated, 1);
    }

    #[test]
    fn test_cleanup_keeps_newest_rotated_files() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("median.log");
        for stamp in ["20260101_000000", "20260102_000000", "20260103_000000"] {
            fs::write(dir.path().join(format!("median.{}.log", stamp)), "x").unwrap();
        }
        fs::write(&base, "current").unwrap();
        fs::write(dir.path().join("other.log"), "untouched").unwrap();

        cleanup_rotated_files(&base, 2).unwrap();

        assert!(!dir.path().join("median.20260101_000000.log").exists());
        assert!(dir.path().join("median.20260102_000000.log").exists());
        assert!(dir.path().join("median.20260103_000000.log").exists());
        assert!(dir.path().join("other.log").exists());
        assert!(base.exists());
    }

    #[test]
    fn test_rotated_path_keeps_extension() {
        let rotated = rotated_path(Path::new("logs/median.log"));
        let name = rotated.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("median."));
        assert!(name.ends_with(".log"));
        assert_eq!(rotated.parent(), Some(Path::new("logs")));
    }
}
