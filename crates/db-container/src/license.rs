//! License acceptance for images that ship under a vendor license.
//!
//! A license is accepted either in code or by listing the image reference on
//! its own line in an acceptance file. The file defaults to
//! `container-license-acceptance.txt` in the working directory and can be
//! relocated with `TESTCONTAINERS_LICENSE_ACCEPTANCE_FILE`.

use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

pub const LICENSE_ACCEPTANCE_FILE: &str = "container-license-acceptance.txt";
pub const LICENSE_ACCEPTANCE_FILE_ENV: &str = "TESTCONTAINERS_LICENSE_ACCEPTANCE_FILE";

/// Location of the acceptance file for this process.
pub fn acceptance_file() -> PathBuf {
    std::env::var_os(LICENSE_ACCEPTANCE_FILE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(LICENSE_ACCEPTANCE_FILE))
}

/// Whether `image` is listed in the acceptance file at `path`. A missing file
/// accepts nothing.
pub fn is_listed_in(path: &Path, image: &str) -> io::Result<bool> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file = %path.display(), "No license acceptance file");
            return Ok(false);
        }
        Err(e) => return Err(e),
    };
    let listed = contents.lines().map(str::trim).any(|line| line == image);
    debug!(file = %path.display(), image, listed, "Checked license acceptance file");
    Ok(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_accepts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LICENSE_ACCEPTANCE_FILE);
        assert!(!is_listed_in(&path, "store/saplabs/hanaexpress:2.00.045.00.20200121.1").unwrap());
    }

    #[test]
    fn test_listed_image_is_accepted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ibmcom/db2:11.5.0.0a").unwrap();
        writeln!(file, "  store/saplabs/hanaexpress:2.00.045.00.20200121.1  ").unwrap();

        assert!(is_listed_in(file.path(), "store/saplabs/hanaexpress:2.00.045.00.20200121.1").unwrap());
        assert!(!is_listed_in(file.path(), "store/saplabs/hanaexpress:2.00.040.00.20190729.1").unwrap());
        assert!(!is_listed_in(file.path(), "store/saplabs/hanaexpress").unwrap());
    }
}
