use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use image::RgbaImage;

use super::{TextureError, TextureId};

/// Result of one background file decode.
#[derive(Debug)]
pub struct LoadOutcome {
    pub id: TextureId,
    pub path: PathBuf,
    pub result: Result<RgbaImage, TextureError>,
}

/// Decodes image files off the render thread.
///
/// A single worker thread, started on the first request, decodes files in
/// request order. Results are collected with [`poll`](Self::poll) from the
/// thread that owns the textures. Dropping the loader closes the request
/// channel and the worker exits once its queue drains.
pub struct FileLoader {
    requests: Option<Sender<(TextureId, PathBuf)>>,
    tx: Sender<LoadOutcome>,
    rx: Receiver<LoadOutcome>,
    in_flight: usize,
}

impl FileLoader {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { requests: None, tx, rx, in_flight: 0 }
    }

    /// Queues `path` for decoding into texture `id`.
    pub fn request(&mut self, id: TextureId, path: PathBuf) {
        self.in_flight += 1;

        let requests = match self.worker() {
            Ok(requests) => requests,
            Err(reason) => return self.fail(id, path, reason),
        };
        if let Err(mpsc::SendError((id, path))) = requests.send((id, path)) {
            self.requests = None;
            self.fail(id, path, "loader thread stopped".into());
        }
    }

    /// Returns a handle to the request queue, spawning the worker if needed.
    fn worker(&mut self) -> Result<Sender<(TextureId, PathBuf)>, String> {
        if let Some(requests) = &self.requests {
            return Ok(requests.clone());
        }

        let (requests, queue) = mpsc::channel();
        let tx = self.tx.clone();
        std::thread::Builder::new()
            .name("tessera-texture-load".into())
            .spawn(move || decode_loop(queue, tx))
            .map_err(|e| {
                log::error!("failed to spawn texture loader thread: {e}");
                format!("loader thread unavailable: {e}")
            })?;
        self.requests = Some(requests.clone());
        Ok(requests)
    }

    fn fail(&self, id: TextureId, path: PathBuf, reason: String) {
        // Both channel ends live in `self`, so this cannot fail.
        let _ = self.tx.send(LoadOutcome {
            id,
            path,
            result: Err(TextureError::Decode(reason)),
        });
    }

    /// Collects finished loads without blocking.
    pub fn poll(&mut self) -> Vec<LoadOutcome> {
        let done: Vec<LoadOutcome> = self.rx.try_iter().collect();
        self.in_flight = self.in_flight.saturating_sub(done.len());
        done
    }

    /// Blocks until every in-flight load finished or `timeout` elapsed.
    pub fn wait(&mut self, timeout: Duration) -> Vec<LoadOutcome> {
        let deadline = Instant::now() + timeout;
        let mut done = Vec::new();

        while self.in_flight > 0 {
            let left = deadline.saturating_duration_since(Instant::now());
            match self.rx.recv_timeout(left) {
                Ok(outcome) => {
                    self.in_flight -= 1;
                    done.push(outcome);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }
        done
    }

    #[inline]
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_loop(queue: Receiver<(TextureId, PathBuf)>, tx: Sender<LoadOutcome>) {
    while let Ok((id, path)) = queue.recv() {
        let result = decode_file(&path);
        if tx.send(LoadOutcome { id, path, result }).is_err() {
            // Owner dropped; nobody is left to collect results.
            break;
        }
    }
    log::debug!("texture loader thread exiting");
}

fn decode_file(path: &Path) -> Result<RgbaImage, TextureError> {
    let image = image::open(path)
        .map_err(|e| TextureError::Decode(format!("{}: {e}", path.display())))?
        .to_rgba8();

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(TextureError::EmptyDimensions { width, height });
    }
    Ok(image)
}
