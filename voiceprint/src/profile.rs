use std::path::{Path, PathBuf};

use aegis_audio::EMBEDDING_DIM;
use parking_lot::Mutex;
use tracing::debug;

use crate::VoiceprintError;

/// The single enrolled voice of the monitored user.
///
/// The embedding always has [`EMBEDDING_DIM`] finite values. On disk it is a
/// raw blob of [`EMBEDDING_DIM`] little-endian `f32` values with no header.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrolledVoiceProfile {
    embedding: Vec<f32>,
}

impl EnrolledVoiceProfile {
    /// Size of the serialized blob in bytes.
    pub const BLOB_LEN: usize = EMBEDDING_DIM * 4;

    /// Wraps an embedding produced by the enrollment flow.
    pub fn new(embedding: Vec<f32>) -> Result<Self, VoiceprintError> {
        if embedding.len() != EMBEDDING_DIM {
            return Err(VoiceprintError::DimensionMismatch {
                expected: EMBEDDING_DIM,
                got: embedding.len(),
            });
        }
        if embedding.iter().any(|v| !v.is_finite()) {
            return Err(VoiceprintError::NonFinite);
        }
        Ok(Self { embedding })
    }

    /// Builds a profile from several enrollment embeddings.
    ///
    /// The samples are averaged element-wise and the mean is L2-normalized.
    pub fn enroll(samples: &[Vec<f32>]) -> Result<Self, VoiceprintError> {
        if samples.is_empty() {
            return Err(VoiceprintError::EmptyEnrollment);
        }
        let mut mean = vec![0f64; EMBEDDING_DIM];
        for sample in samples {
            if sample.len() != EMBEDDING_DIM {
                return Err(VoiceprintError::DimensionMismatch {
                    expected: EMBEDDING_DIM,
                    got: sample.len(),
                });
            }
            for (acc, &v) in mean.iter_mut().zip(sample.iter()) {
                *acc += v as f64;
            }
        }
        let n = samples.len() as f64;
        let mut embedding: Vec<f32> = mean.into_iter().map(|v| (v / n) as f32).collect();
        l2_normalize(&mut embedding);
        Self::new(embedding)
    }

    /// Decodes a profile blob.
    pub fn from_bytes(data: &[u8]) -> Result<Self, VoiceprintError> {
        if data.len() != Self::BLOB_LEN {
            return Err(VoiceprintError::InvalidBlob {
                expected: Self::BLOB_LEN,
                got: data.len(),
            });
        }
        let embedding = data
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        Self::new(embedding)
    }

    /// Encodes the profile as a blob.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(Self::BLOB_LEN);
        for v in &self.embedding {
            data.extend_from_slice(&v.to_le_bytes());
        }
        data
    }

    /// Returns the enrolled embedding.
    pub fn embedding(&self) -> &[f32] {
        &self.embedding
    }

    /// Returns the L2 norm of the embedding.
    pub fn norm(&self) -> f32 {
        self.embedding
            .iter()
            .map(|&v| (v as f64) * (v as f64))
            .sum::<f64>()
            .sqrt() as f32
    }
}

/// Scales `v` to unit length in place. Zero vectors are left unchanged.
pub fn l2_normalize(v: &mut [f32]) {
    let mut norm: f64 = 0.0;
    for &x in v.iter() {
        norm += (x as f64) * (x as f64);
    }
    norm = norm.sqrt();
    if norm > 0.0 {
        let scale = (1.0 / norm) as f32;
        for x in v.iter_mut() {
            *x *= scale;
        }
    }
}

/// Storage for the single enrolled profile.
///
/// The detection engine only reads; enrollment and reset are owned by the
/// enrollment flow.
pub trait ProfileStore: Send + Sync {
    /// Loads the profile, or `None` if nobody is enrolled.
    fn load(&self) -> Result<Option<EnrolledVoiceProfile>, VoiceprintError>;

    /// Replaces the stored profile.
    fn save(&self, profile: &EnrolledVoiceProfile) -> Result<(), VoiceprintError>;

    /// Deletes the stored profile. Resetting an empty store is not an error.
    fn reset(&self) -> Result<(), VoiceprintError>;
}

/// Stores the profile blob in a single file.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    /// Creates a store backed by `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the blob path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<Option<EnrolledVoiceProfile>, VoiceprintError> {
        let data = match std::fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "voiceprint: no enrolled profile");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        EnrolledVoiceProfile::from_bytes(&data).map(Some)
    }

    fn save(&self, profile: &EnrolledVoiceProfile) -> Result<(), VoiceprintError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }
        std::fs::write(&self.path, profile.to_bytes())?;
        Ok(())
    }

    fn reset(&self) -> Result<(), VoiceprintError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps the profile in memory.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profile: Mutex<Option<EnrolledVoiceProfile>>,
}

impl MemoryProfileStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding `profile`.
    pub fn with_profile(profile: EnrolledVoiceProfile) -> Self {
        Self {
            profile: Mutex::new(Some(profile)),
        }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Option<EnrolledVoiceProfile>, VoiceprintError> {
        Ok(self.profile.lock().clone())
    }

    fn save(&self, profile: &EnrolledVoiceProfile) -> Result<(), VoiceprintError> {
        *self.profile.lock() = Some(profile.clone());
        Ok(())
    }

    fn reset(&self) -> Result<(), VoiceprintError> {
        *self.profile.lock() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Vec<f32> {
        (0..EMBEDDING_DIM).map(|i| i as f32 * 0.01).collect()
    }

    #[test]
    fn new_checks_dimension() {
        assert!(EnrolledVoiceProfile::new(ramp()).is_ok());
        let err = EnrolledVoiceProfile::new(vec![0.0; 512]).unwrap_err();
        assert!(matches!(
            err,
            VoiceprintError::DimensionMismatch {
                expected: 521,
                got: 512
            }
        ));
    }

    #[test]
    fn new_rejects_non_finite() {
        let mut emb = ramp();
        emb[10] = f32::NAN;
        assert!(matches!(
            EnrolledVoiceProfile::new(emb),
            Err(VoiceprintError::NonFinite)
        ));
    }

    #[test]
    fn blob_layout_is_raw_little_endian() {
        let profile = EnrolledVoiceProfile::new(ramp()).unwrap();
        let blob = profile.to_bytes();
        assert_eq!(blob.len(), 2084);
        assert_eq!(&blob[4..8], &0.01f32.to_le_bytes());

        let decoded = EnrolledVoiceProfile::from_bytes(&blob).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn truncated_blob_is_rejected() {
        let err = EnrolledVoiceProfile::from_bytes(&[0u8; 100]).unwrap_err();
        assert!(matches!(
            err,
            VoiceprintError::InvalidBlob {
                expected: 2084,
                got: 100
            }
        ));
    }

    #[test]
    fn enroll_averages_and_normalizes() {
        let mut a = vec![0.0f32; EMBEDDING_DIM];
        let mut b = vec![0.0f32; EMBEDDING_DIM];
        a[0] = 2.0;
        b[1] = 2.0;
        let profile = EnrolledVoiceProfile::enroll(&[a, b]).unwrap();
        let half = 1.0 / 2f32.sqrt();
        assert!((profile.embedding()[0] - half).abs() < 1e-6);
        assert!((profile.embedding()[1] - half).abs() < 1e-6);
        assert!((profile.norm() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn enroll_requires_samples() {
        assert!(matches!(
            EnrolledVoiceProfile::enroll(&[]),
            Err(VoiceprintError::EmptyEnrollment)
        ));
    }

    #[test]
    fn file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileProfileStore::new(dir.path().join("voice").join("profile.bin"));

        assert!(store.load().unwrap().is_none());

        let profile = EnrolledVoiceProfile::new(ramp()).unwrap();
        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap(), Some(profile));

        store.reset().unwrap();
        assert!(store.load().unwrap().is_none());
        // Second reset is a no-op.
        store.reset().unwrap();
    }

    #[test]
    fn file_store_reports_corrupt_blob() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.bin");
        std::fs::write(&path, b"not a profile").unwrap();
        let store = FileProfileStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(VoiceprintError::InvalidBlob { .. })
        ));
    }

    #[test]
    fn memory_store_lifecycle() {
        let store = MemoryProfileStore::new();
        assert!(store.load().unwrap().is_none());
        let profile = EnrolledVoiceProfile::new(ramp()).unwrap();
        store.save(&profile).unwrap();
        assert_eq!(store.load().unwrap().unwrap().embedding()[1], 0.01);
        store.reset().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
