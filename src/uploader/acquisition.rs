//! File acquisition.
//!
//! Whole-file reads run on a worker thread and report back over a channel.
//! Every read is tagged with a [`RequestId`]; only the most recent request is
//! allowed to deliver a result; older ones are dropped when they finish.

use crate::data::{DataError, DataResult};
use crate::perf::measure;
use crate::types::DelimitedFormat;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Identifies one acquisition. Ids increase monotonically per reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// User-provided file content. Replaced wholesale, never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawFile {
    /// File name as selected (used for format detection and logs)
    pub name: String,
    pub format: DelimitedFormat,
    pub bytes: Arc<[u8]>,
}

impl RawFile {
    /// Wrap bytes, detecting the format from the name
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        let name = name.into();
        Self {
            format: DelimitedFormat::from_file_name(&name),
            name,
            bytes: bytes.into(),
        }
    }

    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::new(name, text.as_bytes())
    }

    /// Read a whole file from disk, refusing files above `max_mb`
    pub fn read(path: &Path, max_mb: usize) -> DataResult<Self> {
        const MIB: u64 = 1024 * 1024;
        let len = std::fs::metadata(path)?.len();
        if len > max_mb as u64 * MIB {
            return Err(DataError::TooLarge {
                size_mb: len.div_ceil(MIB),
                max_mb,
            });
        }

        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.csv")
            .to_string();

        Ok(Self::new(name, bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// The outcome of one acquisition
#[derive(Debug)]
pub struct Completion {
    pub request: RequestId,
    pub result: DataResult<RawFile>,
}

/// Starts background reads and collects their completions
pub struct FileReader {
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
    next_id: u64,
    latest: Arc<Mutex<Option<RequestId>>>,
    max_file_size_mb: usize,
}

impl FileReader {
    pub fn new(max_file_size_mb: usize) -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            next_id: 0,
            latest: Arc::new(Mutex::new(None)),
            max_file_size_mb,
        }
    }

    /// Allocate the next request id and mark it as the latest
    pub fn next_request(&mut self) -> RequestId {
        self.next_id += 1;
        let id = RequestId(self.next_id);
        *self.latest.lock() = Some(id);
        id
    }

    /// Forget the latest request so any in-flight read is treated as stale
    pub fn supersede(&mut self) {
        *self.latest.lock() = None;
    }

    pub fn latest(&self) -> Option<RequestId> {
        *self.latest.lock()
    }

    /// Start reading `path` on a worker thread
    pub fn start(&mut self, path: PathBuf) -> RequestId {
        let request = self.next_request();
        let tx = self.tx.clone();
        let latest = Arc::clone(&self.latest);
        let max_mb = self.max_file_size_mb;

        info!(%request, path = %path.display(), "starting file read");
        std::thread::spawn(move || {
            let (result, elapsed_ms) = measure(|| RawFile::read(&path, max_mb));
            debug!(%request, elapsed_ms = format!("{:.2}", elapsed_ms), "file read finished");

            // A newer selection may have arrived while we were reading
            if *latest.lock() != Some(request) {
                debug!(%request, "read superseded before delivery");
                return;
            }
            if tx.send(Completion { request, result }).is_err() {
                warn!(%request, "reader dropped before read completed");
            }
        });

        request
    }

    pub fn try_recv(&self) -> Option<Completion> {
        self.rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Completion, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}
