//! Size-rotating file writer plugged into `tracing_subscriber::fmt`

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::{FileConfig, RotationConfig};
use crate::logger::error::LoggerError;

/// File writer with size-based rotation.
///
/// When a write fails the writer switches to stderr for the rest of the
/// process so log lines are never silently lost.
#[derive(Clone)]
pub struct RotatingFileWriter {
    state: Arc<Mutex<WriterState>>,
    path: PathBuf,
    rotation: RotationConfig,
}

struct WriterState {
    file: BufWriter<File>,
    current_size: u64,
    fallback_mode: bool,
}

impl RotatingFileWriter {
    pub fn new(config: &FileConfig) -> Result<Self, LoggerError> {
        if let Some(parent) = config.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
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
                fallback_mode: false,
            })),
            path: config.path.clone(),
            rotation: config.rotation.clone(),
        })
    }

    pub fn is_in_fallback_mode(&self) -> bool {
        self.state.lock().map(|s| s.fallback_mode).unwrap_or(false)
    }

    /// Shift `path.N` to `path.N+1`, dropping the oldest, then move the
    /// active file to `path.1`.
    fn rotate(path: &Path, max_files: usize) -> Result<(), LoggerError> {
        let oldest = rotated_path(path, max_files);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..max_files).rev() {
            let from = rotated_path(path, index);
            if from.exists() {
                fs::rename(&from, rotated_path(path, index + 1))?;
            }
        }

        if path.exists() {
            fs::rename(path, rotated_path(path, 1)).map_err(|e| {
                LoggerError::rotation(format!("failed to rotate {}: {}", path.display(), e))
            })?;
        }

        Ok(())
    }
}

impl<'a> MakeWriter<'a> for RotatingFileWriter {
    type Writer = RotatingWriterGuard;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriterGuard {
            writer: self.clone(),
        }
    }
}

/// Per-event handle returned by `make_writer`
pub struct RotatingWriterGuard {
    writer: RotatingFileWriter,
}

impl RotatingWriterGuard {
    fn fall_back(
        state: &mut WriterState,
        buf: &[u8],
        error: &dyn std::fmt::Display,
    ) -> io::Result<usize> {
        state.fallback_mode = true;
        eprintln!("[logger] file write failed, falling back to stderr: {}", error);
        io::stderr().write(buf)
    }
}

impl Write for RotatingWriterGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let writer = &self.writer;
        let mut state = writer
            .state
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))?;

        if state.fallback_mode {
            return io::stderr().write(buf);
        }

        if state.current_size > 0
            && state.current_size + buf.len() as u64 > writer.rotation.max_size
        {
            if let Err(e) = state.file.flush() {
                return Self::fall_back(&mut state, buf, &e);
            }
            if let Err(e) = RotatingFileWriter::rotate(&writer.path, writer.rotation.max_files) {
                return Self::fall_back(&mut state, buf, &e);
            }
            match open_log_file(&writer.path, false) {
                Ok(file) => {
                    state.file = file;
                    state.current_size = 0;
                }
                Err(e) => return Self::fall_back(&mut state, buf, &e),
            }
        }

        match state.file.write(buf) {
            Ok(written) => {
                state.current_size += written as u64;
                Ok(written)
            }
            Err(e) => Self::fall_back(&mut state, buf, &e),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self
            .writer
            .state
            .lock()
            .map_err(|_| io::Error::other("log writer lock poisoned"))?;

        if state.fallback_mode {
            return io::stderr().flush();
        }
        state.file.flush()
    }
}

impl Drop for RotatingWriterGuard {
    fn drop(&mut self) {
        if let Ok(mut state) = self.writer.state.lock() {
            let _ = state.file.flush();
        }
    }
}

fn rotated_path(path: &Path, index: usize) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!(".{}", index));
    PathBuf::from(name)
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
