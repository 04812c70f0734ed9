//! Handing exported artifacts to the user
//!
//! A sink stages an artifact behind a transient handle, triggers the actual
//! delivery, and releases the handle. [`deliver_artifact`] holds the handle in
//! a drop guard, so release runs on every exit path: success, a failed
//! trigger, or a panic inside the sink.

use std::borrow::Cow;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DeliveryError;
use crate::vcard::ContactArtifact;

/// Capability that delivers an artifact to the user
pub trait ArtifactSink {
    /// Transient resource backing the artifact while it is delivered
    type Handle;

    /// Stage the artifact and return its handle
    fn acquire(&self, artifact: &ContactArtifact) -> Result<Self::Handle, DeliveryError>;

    /// Deliver the staged artifact
    fn trigger(&self, handle: &Self::Handle) -> Result<(), DeliveryError>;

    /// Free the transient resource. Must not fail.
    fn release(&self, handle: &mut Self::Handle);
}

struct ReleaseGuard<'a, S: ArtifactSink + ?Sized> {
    sink: &'a S,
    handle: S::Handle,
}

impl<S: ArtifactSink + ?Sized> Drop for ReleaseGuard<'_, S> {
    fn drop(&mut self) {
        self.sink.release(&mut self.handle);
    }
}

/// Acquire, trigger and release an artifact through `sink`
pub fn deliver_artifact<S: ArtifactSink + ?Sized>(
    sink: &S,
    artifact: &ContactArtifact,
) -> Result<(), DeliveryError> {
    let guard = ReleaseGuard {
        sink,
        handle: sink.acquire(artifact)?,
    };
    let result = sink.trigger(&guard.handle);
    drop(guard);
    result
}

/// Writes artifacts as files into a directory
///
/// The staged copy is a hidden `.partial` file next to the destination;
/// triggering copies it into place and release removes it.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

/// Staged file owned by a [`DirectorySink`]
#[derive(Debug)]
pub struct StagedFile {
    staged: PathBuf,
    destination: PathBuf,
}

impl StagedFile {
    pub fn staged_path(&self) -> &Path {
        &self.staged
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Where an artifact will end up
    pub fn destination_for(&self, artifact: &ContactArtifact) -> Result<PathBuf, DeliveryError> {
        Ok(self
            .directory
            .join(plain_file_name(&artifact.filename)?.as_ref()))
    }
}

/// Single path component for `filename`
///
/// Separators and NUL become `_`, so a name like "AC/DC.vcf" is written as
/// `AC_DC.vcf`. Names that still address the directory itself are rejected.
fn plain_file_name(filename: &str) -> Result<Cow<'_, str>, DeliveryError> {
    if matches!(filename, "" | "." | "..") {
        return Err(DeliveryError::Rejected(format!(
            "unsafe file name {filename:?}"
        )));
    }
    if !filename.contains(['/', '\\', '\0']) {
        return Ok(Cow::Borrowed(filename));
    }
    Ok(Cow::Owned(
        filename
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
            .collect(),
    ))
}

impl ArtifactSink for DirectorySink {
    type Handle = StagedFile;

    fn acquire(&self, artifact: &ContactArtifact) -> Result<StagedFile, DeliveryError> {
        let file_name = plain_file_name(&artifact.filename)?;
        fs::create_dir_all(&self.directory)?;

        let staged = self.directory.join(format!(".{file_name}.partial"));
        fs::write(&staged, &artifact.bytes)?;
        debug!(path = %staged.display(), bytes = artifact.bytes.len(), "Staged artifact");

        Ok(StagedFile {
            staged,
            destination: self.directory.join(file_name.as_ref()),
        })
    }

    fn trigger(&self, handle: &StagedFile) -> Result<(), DeliveryError> {
        fs::copy(&handle.staged, &handle.destination)?;
        debug!(path = %handle.destination.display(), "Delivered artifact");
        Ok(())
    }

    fn release(&self, handle: &mut StagedFile) {
        match fs::remove_file(&handle.staged) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!(path = %handle.staged.display(), error = %e, "Failed to remove staged artifact");
            }
        }
    }
}
