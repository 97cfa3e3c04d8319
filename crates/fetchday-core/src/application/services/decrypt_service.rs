//! Decrypt Service - restores plain data files from their encrypted copies.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{DataCipher, Filesystem},
    },
    domain::ENCRYPTED_SUFFIX,
    error::{FetchDayError, FetchDayResult},
};

pub struct DecryptService {
    filesystem: Box<dyn Filesystem>,
    cipher: Box<dyn DataCipher>,
    data_dir: PathBuf,
}

impl DecryptService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        cipher: Box<dyn DataCipher>,
        data_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            filesystem,
            cipher,
            data_dir: data_dir.into(),
        }
    }

    /// Decrypt every `*.enc.txt` file in the data directory next to itself
    /// as `*.txt`. Returns the written paths in name order.
    #[instrument(skip_all, fields(data_dir = %self.data_dir.display()))]
    pub fn decrypt_all(&self) -> FetchDayResult<Vec<PathBuf>> {
        let mut entries = self.filesystem.list_dir(&self.data_dir)?;
        entries.sort();

        let mut written = Vec::new();
        for path in entries {
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .ok_or_else(|| ApplicationError::FilesystemError {
                    path: path.clone(),
                    reason: "file name is not valid UTF-8".into(),
                })?;

            let Some(stem) = name.strip_suffix(ENCRYPTED_SUFFIX) else {
                debug!(path = %path.display(), "Not an encrypted data file");
                continue;
            };
            let target = path.with_file_name(format!("{stem}.txt"));

            let encoded = self.filesystem.read_to_string(&path)?;
            let plain = self
                .cipher
                .decrypt(encoded.trim())
                .map_err(|e| decryption_failed(&path, e))?;

            self.filesystem.write_file(&target, &plain)?;
            debug!(path = %target.display(), "Decrypted");
            written.push(target);
        }

        info!(count = written.len(), "Data files decrypted");
        Ok(written)
    }
}

fn decryption_failed(path: &std::path::Path, error: FetchDayError) -> FetchDayError {
    let reason = match error {
        FetchDayError::Application(ApplicationError::DecryptionFailed { reason, .. }) => reason,
        other => other.to_string(),
    };
    ApplicationError::DecryptionFailed {
        path: path.to_path_buf(),
        reason,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::output::{MockDataCipher, MockFilesystem};
    use mockall::predicate::eq;
    use std::path::Path;

    #[test]
    fn only_encrypted_files_are_decrypted() {
        let mut fs = MockFilesystem::new();
        fs.expect_list_dir().returning(|_| {
            Ok(vec![
                PathBuf::from("data/day_02.txt"),
                PathBuf::from("data/day_02.enc.txt"),
                PathBuf::from("data/day_01.enc.txt"),
                PathBuf::from("data/.gitkeep"),
            ])
        });
        fs.expect_read_to_string()
            .returning(|path| Ok(format!("  {}\n", path.display())));
        fs.expect_write_file()
            .with(eq(Path::new("data/day_01.txt")), eq(&b"one"[..]))
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .with(eq(Path::new("data/day_02.txt")), eq(&b"two"[..]))
            .times(1)
            .returning(|_, _| Ok(()));

        let mut cipher = MockDataCipher::new();
        cipher
            .expect_decrypt()
            .with(eq("data/day_01.enc.txt"))
            .returning(|_| Ok(b"one".to_vec()));
        cipher
            .expect_decrypt()
            .with(eq("data/day_02.enc.txt"))
            .returning(|_| Ok(b"two".to_vec()));

        let service = DecryptService::new(Box::new(fs), Box::new(cipher), "data");
        let written = service.decrypt_all().unwrap();

        assert_eq!(
            written,
            vec![
                PathBuf::from("data/day_01.txt"),
                PathBuf::from("data/day_02.txt")
            ]
        );
    }

    #[test]
    fn failures_name_the_file() {
        let mut fs = MockFilesystem::new();
        fs.expect_list_dir()
            .returning(|_| Ok(vec![PathBuf::from("data/day_03.enc.txt")]));
        fs.expect_read_to_string().returning(|_| Ok("garbage".into()));
        fs.expect_write_file().never();

        let mut cipher = MockDataCipher::new();
        cipher.expect_decrypt().returning(|_| {
            Err(ApplicationError::DecryptionFailed {
                path: PathBuf::new(),
                reason: "authentication failed".into(),
            }
            .into())
        });

        let service = DecryptService::new(Box::new(fs), Box::new(cipher), "data");
        let err = service.decrypt_all().unwrap_err();

        assert!(matches!(
            err,
            FetchDayError::Application(ApplicationError::DecryptionFailed { ref path, ref reason })
                if path == Path::new("data/day_03.enc.txt") && reason == "authentication failed"
        ));
    }
}
