//! Blueprint packaging
//!
//! The backend wants a gzipped tar of a directory containing the blueprint,
//! not the blueprint text itself. The working directory is a `TempDir`, so
//! it is removed when packaging finishes, whether or not it succeeded.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io;

/// File name the backend expects inside the archive directory
pub const BLUEPRINT_FILE_NAME: &str = "blueprint.yaml";

/// Package blueprint text as a gzipped tar archive of a one-file directory
///
/// Synchronous; call from a blocking task when on the async runtime.
pub fn package_blueprint(blueprint: &str) -> io::Result<Vec<u8>> {
    let working_dir = tempfile::tempdir()?;
    fs::write(working_dir.path().join(BLUEPRINT_FILE_NAME), blueprint)?;

    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut archive = tar::Builder::new(encoder);
    archive.append_dir_all("blueprint", working_dir.path())?;
    let encoder = archive.into_inner()?;
    encoder.finish()

    // working_dir dropped here, removing the directory and its contents
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn archive_contains_blueprint_file() {
        let bytes = package_blueprint("tosca_definitions_version: yaml_1_0\n").unwrap();

        let mut archive = tar::Archive::new(GzDecoder::new(bytes.as_slice()));
        let mut found = false;
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            let path = entry.path().unwrap().to_string_lossy().into_owned();
            if path.ends_with(BLUEPRINT_FILE_NAME) {
                let mut contents = String::new();
                entry.read_to_string(&mut contents).unwrap();
                assert_eq!(contents, "tosca_definitions_version: yaml_1_0\n");
                found = true;
            }
        }
        assert!(found, "blueprint.yaml missing from archive");
    }

    #[test]
    fn archive_is_gzip() {
        let bytes = package_blueprint("x").unwrap();
        assert_eq!(&bytes[..2], &[0x1f, 0x8b]);
    }
}
