//! Loading assets off the frame loop.
//!
//! A load runs on its own thread and is polled once per frame; the frame loop never blocks on it.

use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use tracing::debug;

use crate::error::AssetError;

#[derive(Debug)]
pub enum AssetPoll<T> {
    Pending,
    Ready(T),
    Failed(AssetError),
    /// The result was already handed out by an earlier poll.
    Taken,
}

/// The eventual result of a background load.
#[derive(Debug)]
pub struct PendingAsset<T> {
    receiver: Option<Receiver<Result<T, AssetError>>>,
}

impl<T: Send + 'static> PendingAsset<T> {
    /// Runs `load` on a new thread.
    pub fn spawn<F>(load: F) -> Self
    where
        F: FnOnce() -> Result<T, AssetError> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            // The receiver may have been dropped; nobody wants the result then
            let _ = sender.send(load());
        });
        PendingAsset {
            receiver: Some(receiver),
        }
    }

    /// An asset that's already available.
    pub fn ready(value: T) -> Self {
        let (sender, receiver) = mpsc::channel();
        let _ = sender.send(Ok(value));
        PendingAsset {
            receiver: Some(receiver),
        }
    }

    /// Checks for a result without blocking. `Ready` or `Failed` is returned at most once.
    pub fn poll(&mut self) -> AssetPoll<T> {
        let receiver = match &self.receiver {
            Some(r) => r,
            None => return AssetPoll::Taken,
        };

        let result = match receiver.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return AssetPoll::Pending,
            Err(TryRecvError::Disconnected) => Err(AssetError::LoaderLost),
        };
        self.receiver = None;

        match result {
            Ok(value) => AssetPoll::Ready(value),
            Err(err) => AssetPoll::Failed(err),
        }
    }
}

/// Reads a TrueType/OpenType font in the background. The bytes are only handed back if they
/// parse as a font.
pub fn load_font(path: PathBuf) -> PendingAsset<Vec<u8>> {
    PendingAsset::spawn(move || {
        debug!(path = %path.display(), "loading font");
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(source) => return Err(AssetError::Read { path, source }),
        };
        if rusttype::Font::try_from_bytes(&bytes).is_none() {
            return Err(AssetError::Decode { path, kind: "font" });
        }
        Ok(bytes)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;
    use std::time::{Duration, Instant};

    fn wait_for<T: Send + 'static>(asset: &mut PendingAsset<T>) -> AssetPoll<T> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            match asset.poll() {
                AssetPoll::Pending if Instant::now() < deadline => {
                    thread::sleep(Duration::from_millis(1))
                }
                other => return other,
            }
        }
    }

    #[test]
    fn test_ready() {
        let mut asset = PendingAsset::ready(5);
        assert!(matches!(asset.poll(), AssetPoll::Ready(5)));
        assert!(matches!(asset.poll(), AssetPoll::Taken));
    }

    #[test]
    fn test_spawned_load() {
        let mut asset = PendingAsset::spawn(|| Ok(vec![1u8, 2, 3]));
        match wait_for(&mut asset) {
            AssetPoll::Ready(bytes) => assert_eq!(bytes, [1, 2, 3]),
            other => panic!("Expected bytes, got {:?}", other),
        }
        assert!(matches!(asset.poll(), AssetPoll::Taken));
    }

    #[test]
    fn test_font_that_does_not_parse() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();

        let mut asset = load_font(file.path().to_owned());
        match wait_for(&mut asset) {
            AssetPoll::Failed(AssetError::Decode { path, kind }) => {
                assert_eq!(path, file.path());
                assert_eq!(kind, "font");
            }
            other => panic!("Expected a decode failure, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_font() {
        let dir = tempfile::tempdir().unwrap();
        let mut asset = load_font(dir.path().join("nope.ttf"));
        assert!(matches!(
            wait_for(&mut asset),
            AssetPoll::Failed(AssetError::Read { .. })
        ));
    }

    #[test]
    fn test_panicking_loader() {
        let mut asset: PendingAsset<()> = PendingAsset::spawn(|| panic!("loader blew up"));
        assert!(matches!(
            wait_for(&mut asset),
            AssetPoll::Failed(AssetError::LoaderLost)
        ));
    }
}
