//! Zip extraction through the [`Filesystem`] port.

use std::io::{Cursor, Read};
use std::path::Path;

use tracing::{debug, instrument};
use zip::ZipArchive;

use platgen_core::{
    application::{
        ApplicationError,
        ports::{ArchiveExtractor, Filesystem},
    },
    error::PlatgenResult,
};

/// Upper bound on the buffer reserved from an entry's declared size.
const MAX_PREALLOCATION: u64 = 1 << 20;

/// Unpacks zip archives read from and written to `F`.
///
/// Entries whose path would escape the destination are rejected, and unix
/// execute bits (build wrappers) are carried over.
#[derive(Debug, Clone)]
pub struct ZipExtractor<F> {
    filesystem: F,
}

impl<F: Filesystem> ZipExtractor<F> {
    pub fn new(filesystem: F) -> Self {
        Self { filesystem }
    }
}

impl<F: Filesystem> ArchiveExtractor for ZipExtractor<F> {
    #[instrument(skip_all, fields(archive = %archive.display()))]
    fn extract(&self, archive: &Path, destination: &Path) -> PlatgenResult<()> {
        let invalid = |reason: String| ApplicationError::Archive {
            path: archive.to_path_buf(),
            reason,
        };

        let bytes = self.filesystem.read_bytes(archive)?;
        let mut zip = ZipArchive::new(Cursor::new(bytes)).map_err(|e| invalid(e.to_string()))?;
        self.filesystem.create_dir_all(destination)?;

        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).map_err(|e| invalid(e.to_string()))?;
            let relative = entry
                .enclosed_name()
                .ok_or_else(|| invalid(format!("unsafe entry path '{}'", entry.name())))?;
            let target = destination.join(&relative);

            if entry.is_dir() {
                self.filesystem.create_dir_all(&target)?;
                continue;
            }

            if let Some(parent) = target.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            let mut content = Vec::with_capacity(preallocation(entry.size()));
            entry
                .read_to_end(&mut content)
                .map_err(|e| invalid(format!("{}: {e}", relative.display())))?;
            self.filesystem.write_bytes(&target, &content)?;

            if entry.unix_mode().is_some_and(|mode| mode & 0o111 != 0) {
                self.filesystem.set_permissions(&target, true)?;
            }
        }

        debug!(entries = zip.len(), "Archive extracted");
        Ok(())
    }
}

/// Buffer size to reserve for an entry. The header value is untrusted, so
/// larger entries grow while reading instead.
fn preallocation(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOCATION)).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn archive(entries: &[(&str, &str, u32)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content, mode) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default().unix_permissions(*mode))
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn staged(fs: &MemoryFilesystem, bytes: &[u8]) -> &'static Path {
        fs.create_dir_all(Path::new("/out")).unwrap();
        fs.write_bytes(Path::new("/out/.svc.zip"), bytes).unwrap();
        Path::new("/out/.svc.zip")
    }

    #[test]
    fn extracts_nested_files_and_wrapper_mode() {
        let fs = MemoryFilesystem::new();
        let zip = staged(
            &fs,
            &archive(&[
                ("svc/mvnw", "#!/bin/sh\n", 0o755),
                ("svc/src/main/java/App.java", "class App {}\n", 0o644),
            ]),
        );

        ZipExtractor::new(fs.clone())
            .extract(zip, Path::new("/out"))
            .unwrap();

        assert_eq!(
            fs.read_file(Path::new("/out/svc/src/main/java/App.java"))
                .as_deref(),
            Some("class App {}\n")
        );
        assert!(fs.is_executable(Path::new("/out/svc/mvnw")));
        assert!(!fs.is_executable(Path::new("/out/svc/src/main/java/App.java")));
    }

    #[test]
    fn garbage_is_an_archive_error() {
        let fs = MemoryFilesystem::new();
        let zip = staged(&fs, b"<html>not a zip</html>");

        let err = ZipExtractor::new(fs.clone())
            .extract(zip, Path::new("/out"))
            .unwrap_err();
        assert!(matches!(
            err,
            platgen_core::error::PlatgenError::Application(ApplicationError::Archive { .. })
        ));
    }

    #[test]
    fn escaping_entries_are_rejected() {
        let fs = MemoryFilesystem::new();
        let zip = staged(&fs, &archive(&[("../evil.sh", "rm -rf /\n", 0o755)]));

        assert!(
            ZipExtractor::new(fs.clone())
                .extract(zip, Path::new("/out"))
                .is_err()
        );
        assert!(!fs.exists(Path::new("/evil.sh")));
    }

    #[test]
    fn declared_size_does_not_drive_allocation() {
        assert_eq!(preallocation(512), 512);
        assert_eq!(preallocation(u64::MAX), MAX_PREALLOCATION as usize);
    }

    #[test]
    fn lying_size_header_is_not_trusted() {
        let mut bytes = archive(&[("svc/App.java", "class App {}\n", 0o644)]);
        // Central directory record: uncompressed size lives 24 bytes in.
        let header = bytes
            .windows(4)
            .position(|w| w == [0x50, 0x4b, 0x01, 0x02])
            .unwrap();
        bytes[header + 24..header + 28].copy_from_slice(&0xF000_0000u32.to_le_bytes());

        let fs = MemoryFilesystem::new();
        let zip = staged(&fs, &bytes);
        match ZipExtractor::new(fs.clone()).extract(zip, Path::new("/out")) {
            Ok(()) => assert_eq!(
                fs.read_file(Path::new("/out/svc/App.java")).as_deref(),
                Some("class App {}\n")
            ),
            Err(err) => assert!(matches!(
                err,
                platgen_core::error::PlatgenError::Application(ApplicationError::Archive { .. })
            )),
        }
    }
}
