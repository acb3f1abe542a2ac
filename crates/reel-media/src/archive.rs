//! ZIP archiving of reel batches.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::MediaResult;

/// Bundle reels into a single ZIP at `dest`.
///
/// Entries are named `reel_<position>.<ext>` where position is the
/// 1-based index in `reel_paths` (gaps from skipped files are kept so
/// names stay stable). Paths that no longer exist are skipped with a
/// warning rather than failing the archive.
pub fn build_archive(reel_paths: &[PathBuf], dest: &Path) -> MediaResult<PathBuf> {
    let file = std::fs::File::create(dest)?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (i, path) in reel_paths.iter().enumerate() {
        if !path.exists() {
            warn!("Skipping missing reel while archiving: {}", path.display());
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("mp4");
        writer.start_file(format!("reel_{}.{}", i + 1, ext), options)?;

        let mut reel = std::fs::File::open(path)?;
        let mut buf = Vec::new();
        reel.read_to_end(&mut buf)?;
        writer.write_all(&buf)?;
    }

    writer.finish()?;
    Ok(dest.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use zip::ZipArchive;

    #[test]
    fn test_archive_names_and_skips_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let first = dir.path().join("a.mp4");
        let missing = dir.path().join("gone.mp4");
        let third = dir.path().join("c.mov");
        std::fs::write(&first, b"first reel").unwrap();
        std::fs::write(&third, b"third reel").unwrap();

        let dest = dir.path().join("video_reels.zip");
        let archive_path =
            build_archive(&[first, missing, third], &dest).unwrap();
        assert_eq!(archive_path, dest);

        let mut archive = ZipArchive::new(std::fs::File::open(&dest).unwrap()).unwrap();
        let names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        // Missing second entry is skipped; positions stay stable.
        assert_eq!(names, vec!["reel_1.mp4", "reel_3.mov"]);

        let mut content = String::new();
        archive
            .by_name("reel_1.mp4")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "first reel");
    }

    #[test]
    fn test_archive_empty_input() {
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("empty.zip");
        build_archive(&[], &dest).unwrap();

        let archive = ZipArchive::new(std::fs::File::open(&dest).unwrap()).unwrap();
        assert_eq!(archive.len(), 0);
    }
}
