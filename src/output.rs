use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DevCertError, Result};
use crate::identity::IssuedIdentity;

/// Directory the artifacts go to when the caller does not pick one.
pub const DEFAULT_OUTPUT_DIR: &str = "ssl";
pub const KEY_FILE_NAME: &str = "key.pem";
pub const CERT_FILE_NAME: &str = "cert.pem";

/// Where [`write_identity`] put the artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    pub private_key: PathBuf,
    pub certificate: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            private_key: dir.join(KEY_FILE_NAME),
            certificate: dir.join(CERT_FILE_NAME),
        }
    }
}

/// Writes `identity` to `key.pem` and `cert.pem` inside `dir`, creating the
/// directory if needed and replacing existing files.
///
/// Both artifacts are first written to temporary siblings; the final names
/// only appear once both writes succeeded.
pub fn write_identity(dir: &Path, identity: &IssuedIdentity) -> Result<OutputPaths> {
    fs::create_dir_all(dir).map_err(|source| DevCertError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let paths = OutputPaths::in_dir(dir);
    let staged_key = staging_path(&paths.private_key);
    let staged_cert = staging_path(&paths.certificate);

    let staged = write_file(&staged_key, identity.private_key_pem())
        .and_then(|()| write_file(&staged_cert, identity.certificate_pem()));
    if let Err(err) = staged {
        discard(&staged_key);
        discard(&staged_cert);
        return Err(err);
    }

    if let Err(err) = rename(&staged_key, &paths.private_key) {
        discard(&staged_key);
        discard(&staged_cert);
        return Err(err);
    }
    if let Err(err) = rename(&staged_cert, &paths.certificate) {
        discard(&staged_cert);
        tracing::warn!(
            key = %paths.private_key.display(),
            cert = %paths.certificate.display(),
            error = %err,
            "new key was written but the certificate was not; the pair on disk does not match"
        );
        return Err(err);
    }
    tracing::debug!(
        key = %paths.private_key.display(),
        cert = %paths.certificate.display(),
        "wrote certificate and key"
    );
    Ok(paths)
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    tracing::trace!(path = %path.display(), bytes = contents.len(), "writing");
    fs::write(path, contents).map_err(|source| DevCertError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| DevCertError::Io {
        path: to.to_path_buf(),
        source,
    })
}

fn discard(path: &Path) {
    if let Err(err) = fs::remove_file(path) {
        if err.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %err, "failed to remove staged file");
        }
    }
}
