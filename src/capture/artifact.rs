use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;

use crate::encode::encoder::VideoMime;
use crate::foundation::error::PromoResult;

/// Finished video handed to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Local reference resolvable through the [`ArtifactRegistry`] until revoked.
    pub url: String,
    /// Container format.
    pub mime: VideoMime,
    /// Suggested download name.
    pub file_name: String,
    /// Encoded container bytes.
    pub bytes: Arc<[u8]>,
}

impl GeneratedArtifact {
    /// Write the video into `dir` under [`GeneratedArtifact::file_name`].
    pub fn save_to_dir(&self, dir: &Path) -> PromoResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("failed to write '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "saved video");
        Ok(path)
    }
}

/// Local references to finished videos.
///
/// A reference stays resolvable until revoked; the pipeline revokes the previous artifact
/// before every new attempt and on cancellation.
#[derive(Debug, Default)]
pub struct ArtifactRegistry {
    next_id: u64,
    live: HashMap<String, Arc<[u8]>>,
}

impl ArtifactRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` and mint a reference for them.
    pub fn register(
        &mut self,
        bytes: Vec<u8>,
        mime: VideoMime,
        file_name: String,
    ) -> GeneratedArtifact {
        self.next_id += 1;
        let url = format!("blob:smartygym/{}", self.next_id);
        let bytes: Arc<[u8]> = bytes.into();
        self.live.insert(url.clone(), Arc::clone(&bytes));
        GeneratedArtifact {
            url,
            mime,
            file_name,
            bytes,
        }
    }

    /// Bytes behind a live reference.
    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        self.live.get(url).cloned()
    }

    /// Release a reference. Returns whether it was live.
    pub fn revoke(&mut self, url: &str) -> bool {
        self.live.remove(url).is_some()
    }

    /// Number of live references.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

/// Lowercase ASCII slug; runs of other characters collapse to one `-`.
pub fn slugify(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut dash = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            if dash && !out.is_empty() {
                out.push('-');
            }
            dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            dash = true;
        }
    }
    out
}

/// Download name for a label: `<slug>-smartygym<ext>`, with `video` for an empty slug.
pub fn artifact_file_name(label: &str, mime: VideoMime) -> String {
    let slug = slugify(label);
    let slug = if slug.is_empty() { "video" } else { &slug };
    format!("{slug}-smartygym{}", mime.extension())
}

#[cfg(test)]
#[path = "../../tests/unit/capture/artifact.rs"]
mod tests;
