use tokio::sync::mpsc;

use crate::error::{FolioError, FolioResult};
use crate::scene::Scene;

/// Outcome of one load attempt, tagged with the generation that started it
/// so results from a cancelled load can be told apart and dropped.
enum LoadMessage {
    Loaded { generation: u64, scene: Box<Scene> },
    Failed { generation: u64, error: String },
}

/// One-shot asynchronous model loader.
///
/// `begin` spawns the fetch + parse + normalize work on the runtime and
/// returns immediately; the UI thread polls for the result each frame.
/// Dropping the loader, or starting a new load, bumps the generation: a
/// completion from the old load is discarded instead of mutating state
/// that no longer exists. Failure is terminal for the attempt — the
/// viewer keeps showing an empty scene, nothing retries.
pub struct SceneLoader {
    generation: u64,
    rx: Option<mpsc::UnboundedReceiver<LoadMessage>>,
}

impl SceneLoader {
    pub fn new() -> Self {
        Self {
            generation: 0,
            rx: None,
        }
    }

    pub fn begin(&mut self, runtime: &tokio::runtime::Handle, source: String) {
        self.generation += 1;
        let generation = self.generation;
        let (tx, rx) = mpsc::unbounded_channel();
        self.rx = Some(rx);
        runtime.spawn(async move {
            let message = match load_scene(&source).await {
                Ok(scene) => LoadMessage::Loaded {
                    generation,
                    scene: Box::new(scene),
                },
                Err(err) => LoadMessage::Failed {
                    generation,
                    error: format!("failed to load model '{source}': {err}"),
                },
            };
            // The receiver may be gone (page unmounted); that is fine.
            let _ = tx.send(message);
        });
    }

    /// Abandon any in-flight load. Late completions become stale.
    pub fn cancel(&mut self) {
        self.generation += 1;
        self.rx = None;
    }

    pub fn is_loading(&self) -> bool {
        self.rx.is_some()
    }

    /// Non-blocking poll, called once per frame. Returns the scene on
    /// success; failures are logged here and surface as `None` plus an
    /// empty viewer, per the degrade-quietly contract.
    pub fn poll(&mut self) -> Option<Box<Scene>> {
        let rx = self.rx.as_mut()?;
        loop {
            match rx.try_recv() {
                Ok(LoadMessage::Loaded { generation, scene }) if generation == self.generation => {
                    self.rx = None;
                    return Some(scene);
                }
                Ok(LoadMessage::Failed { generation, error }) if generation == self.generation => {
                    log::error!("{error}");
                    self.rx = None;
                    return None;
                }
                // Stale generation: a load that was cancelled after its
                // task had already started. Drop it and keep draining.
                Ok(_) => continue,
                Err(mpsc::error::TryRecvError::Empty) => return None,
                Err(mpsc::error::TryRecvError::Disconnected) => {
                    self.rx = None;
                    return None;
                }
            }
        }
    }
}

impl Default for SceneLoader {
    fn default() -> Self {
        Self::new()
    }
}

async fn load_scene(source: &str) -> FolioResult<Scene> {
    let bytes = fetch_bytes(source).await?;
    Scene::from_glb_bytes(&bytes)
}

/// Fetch model bytes from a URL or the local filesystem. The component
/// has no contract beyond "fetchable location returning a valid binary".
async fn fetch_bytes(source: &str) -> FolioResult<Vec<u8>> {
    if source.starts_with("http://") || source.starts_with("https://") {
        let response = reqwest::get(source).await?;
        if !response.status().is_success() {
            return Err(FolioError::asset(format!(
                "HTTP {} from {source}",
                response.status()
            )));
        }
        Ok(response.bytes().await?.to_vec())
    } else {
        Ok(tokio::fs::read(source).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wait_for<T>(loader: &mut SceneLoader, mut poll: impl FnMut(&mut SceneLoader) -> Option<T>) -> Option<T> {
        for _ in 0..200 {
            if let Some(v) = poll(loader) {
                return Some(v);
            }
            if !loader.is_loading() {
                return None;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn missing_file_fails_without_panicking() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut loader = SceneLoader::new();
        loader.begin(rt.handle(), "definitely/not/here.glb".to_string());
        let result = wait_for(&mut loader, SceneLoader::poll);
        assert!(result.is_none());
        assert!(!loader.is_loading());
    }

    #[test]
    fn cancel_discards_pending_work() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut loader = SceneLoader::new();
        loader.begin(rt.handle(), "definitely/not/here.glb".to_string());
        loader.cancel();
        assert!(!loader.is_loading());
        // Late completion has nowhere to go and must not panic anything.
        std::thread::sleep(std::time::Duration::from_millis(30));
        assert!(loader.poll().is_none());
    }

    #[test]
    fn restart_discards_stale_generation() {
        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut loader = SceneLoader::new();
        loader.begin(rt.handle(), "stale.glb".to_string());
        loader.begin(rt.handle(), "also-missing.glb".to_string());
        // Only the second load's failure resolves the poll; the stale
        // result, if delivered first, is skipped by the generation check.
        let result = wait_for(&mut loader, SceneLoader::poll);
        assert!(result.is_none());
        assert!(!loader.is_loading());
    }

    #[test]
    fn valid_glb_loads_and_normalizes() {
        // Minimal GLB: one triangle, written to a temp file.
        let json = br#"{
            "scene": 0,
            "scenes": [{"nodes": [0]}],
            "nodes": [{"mesh": 0}],
            "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
            "accessors": [{"bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3"}],
            "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 36}],
            "buffers": [{"byteLength": 36}]
        }"#;
        let mut bin = Vec::new();
        for v in [0.0f32, 0.0, 0.0, 8.0, 0.0, 0.0, 0.0, 8.0, 0.0] {
            bin.extend_from_slice(&v.to_le_bytes());
        }
        let mut json = json.to_vec();
        while json.len() % 4 != 0 {
            json.push(b' ');
        }
        let total = 12 + 8 + json.len() + 8 + bin.len();
        let mut glb = Vec::new();
        glb.extend_from_slice(&0x4654_6C67u32.to_le_bytes());
        glb.extend_from_slice(&2u32.to_le_bytes());
        glb.extend_from_slice(&(total as u32).to_le_bytes());
        glb.extend_from_slice(&(json.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x4E4F_534Au32.to_le_bytes());
        glb.extend_from_slice(&json);
        glb.extend_from_slice(&(bin.len() as u32).to_le_bytes());
        glb.extend_from_slice(&0x004E_4942u32.to_le_bytes());
        glb.extend_from_slice(&bin);

        let path = std::env::temp_dir().join("folio-rs-test-triangle.glb");
        std::fs::write(&path, &glb).unwrap();

        let rt = tokio::runtime::Runtime::new().unwrap();
        let mut loader = SceneLoader::new();
        loader.begin(rt.handle(), path.to_string_lossy().into_owned());
        let scene = wait_for(&mut loader, SceneLoader::poll).expect("scene should load");
        assert_eq!(scene.meshes.len(), 1);
        // Normalized: largest dimension scaled to 2 units.
        assert!((scene.bounds.max_dimension() - 8.0).abs() < 1e-4);
        let _ = std::fs::remove_file(&path);
    }
}
