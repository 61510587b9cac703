//! Zip archive construction.
//!
//! Writes an already expanded file list into a zip archive, naming every
//! entry relative to a caller-chosen base path.

use crate::NoopProgress;
use crate::PackError;
use crate::ProgressCallback;
use crate::Result;
use crate::paths;
use crate::report::PackReport;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Writes `files` into a new zip archive at `output_path`.
///
/// Each entry is named by the file's path relative to `base_path`, using
/// `/` separators, and entries keep the order of `files`. Choosing the
/// source root as `base_path` puts only its contents at the top of the
/// archive; choosing its parent keeps the root's own name as a top-level
/// folder.
///
/// An existing file at `output_path` is truncated. A file whose absolute
/// path equals the absolute output path is skipped, so an archive never
/// contains itself.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use zipstage_core::build_archive;
/// use zipstage_core::expand_source;
///
/// let files = expand_source("/srv/app", &["node_modules"])?;
/// let report = build_archive(&files, Path::new("/srv"), Path::new("/tmp/app.zip"))?;
/// println!("wrote {} entries to {}", report.files_added, report.output_path.display());
/// # Ok::<(), zipstage_core::PackError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The output file cannot be created or written
/// - A source file cannot be read
/// - A file does not lie under `base_path`
/// - An entry name is not valid UTF-8
///
/// The partially written output file is left on disk on failure.
pub fn build_archive<P: AsRef<Path>>(
    files: &[P],
    base_path: &Path,
    output_path: &Path,
) -> Result<PackReport> {
    build_archive_with_progress(files, base_path, output_path, &mut NoopProgress)
}

/// Writes `files` into a zip archive, reporting progress along the way.
///
/// Behaves exactly like [`build_archive`]; `progress` receives one
/// start/complete pair per written entry, byte counts for every copied
/// chunk and a final `on_complete`.
///
/// # Errors
///
/// Same as [`build_archive`].
pub fn build_archive_with_progress<P: AsRef<Path>>(
    files: &[P],
    base_path: &Path,
    output_path: &Path,
    progress: &mut dyn ProgressCallback,
) -> Result<PackReport> {
    let start = Instant::now();
    let output_path = paths::absolute_clean(output_path)?;

    let file = File::create(&output_path)?;
    let mut report = PackReport::new(output_path);
    let file = write_entries(file, files, base_path, &mut report, progress)?;

    report.archive_size = file.metadata()?.len();
    report.duration = start.elapsed();

    tracing::info!(
        output = %report.output_path.display(),
        files = report.files_added,
        bytes = report.bytes_written,
        "archive written"
    );

    progress.on_complete();

    Ok(report)
}

fn write_entries<W: Write + Seek, P: AsRef<Path>>(
    writer: W,
    files: &[P],
    base_path: &Path,
    report: &mut PackReport,
    progress: &mut dyn ProgressCallback,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];

    // Checked per file: the output may sit anywhere in the list.
    let mut candidates = Vec::with_capacity(files.len());
    for file in files {
        let abs = paths::absolute_clean(file.as_ref())?;
        if abs == report.output_path {
            tracing::debug!(path = %abs.display(), "skipping output archive");
            report.files_skipped += 1;
            continue;
        }
        candidates.push(abs);
    }

    let total = candidates.len();
    for (idx, abs) in candidates.into_iter().enumerate() {
        let relative = paths::relative_to(&abs, base_path)?;
        if relative.as_os_str().is_empty() {
            return Err(PackError::OutsideBasePath {
                path: abs,
                base: base_path.to_path_buf(),
            });
        }
        let name = paths::to_zip_name(&relative)?;

        progress.on_entry_start(&relative, total, idx + 1);
        let bytes = add_file(&mut zip, &abs, &name, options, &mut buffer, progress)?;
        progress.on_entry_complete(&relative);

        report.files_added += 1;
        report.bytes_written += bytes;
        report.entries.push(name);
    }

    Ok(zip.finish()?)
}

fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
    buffer: &mut [u8],
    progress: &mut dyn ProgressCallback,
) -> Result<u64> {
    let mut source = File::open(path)?;

    zip.start_file(name, options)?;

    let mut bytes_written = 0u64;
    loop {
        let bytes_read = source.read(buffer)?;
        if bytes_read == 0 {
            break;
        }
        zip.write_all(&buffer[..bytes_read])?;
        bytes_written += bytes_read as u64;
        progress.on_bytes_written(bytes_read as u64);
    }

    Ok(bytes_written)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn read_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        (0..archive.len())
            .map(|i| {
                let mut entry = archive.by_index(i).unwrap();
                let mut data = Vec::new();
                entry.read_to_end(&mut data).unwrap();
                (entry.name().to_string(), data)
            })
            .collect()
    }

    fn names(entries: &[(String, Vec<u8>)]) -> Vec<&str> {
        entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Builds `<temp>/a/b/x.txt` and `<temp>/a/b/c/y.txt`.
    fn sample_tree(temp: &TempDir) -> (PathBuf, Vec<PathBuf>) {
        let b = temp.path().join("a/b");
        fs::create_dir_all(b.join("c")).unwrap();
        fs::write(b.join("x.txt"), "x content").unwrap();
        fs::write(b.join("c/y.txt"), "y content").unwrap();
        (b.clone(), vec![b.join("x.txt"), b.join("c/y.txt")])
    }

    #[test]
    fn test_build_names_relative_to_root() {
        let temp = TempDir::new().unwrap();
        let (root, files) = sample_tree(&temp);
        let output = temp.path().join("out.zip");

        let report = build_archive(&files, &root, &output).unwrap();

        let entries = read_entries(&output);
        assert_eq!(names(&entries), vec!["x.txt", "c/y.txt"]);
        assert_eq!(report.files_added, 2);
        assert_eq!(report.entries, vec!["x.txt", "c/y.txt"]);
    }

    #[test]
    fn test_build_names_relative_to_parent() {
        let temp = TempDir::new().unwrap();
        let (root, files) = sample_tree(&temp);
        let output = temp.path().join("out.zip");

        build_archive(&files, root.parent().unwrap(), &output).unwrap();

        let entries = read_entries(&output);
        assert_eq!(names(&entries), vec!["b/x.txt", "b/c/y.txt"]);
    }

    #[test]
    fn test_build_contents_are_byte_identical() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("src");
        fs::create_dir(&root).unwrap();
        let binary: Vec<u8> = (0..=255u8).cycle().take(200_000).collect();
        fs::write(root.join("blob.bin"), &binary).unwrap();
        fs::write(root.join("empty.txt"), "").unwrap();
        let output = temp.path().join("out.zip");

        let report = build_archive(
            &[root.join("blob.bin"), root.join("empty.txt")],
            &root,
            &output,
        )
        .unwrap();

        let entries = read_entries(&output);
        assert_eq!(entries[0].1, binary);
        assert!(entries[1].1.is_empty());
        assert_eq!(report.bytes_written, binary.len() as u64);
        assert!(report.archive_size > 0);
    }

    #[test]
    fn test_build_preserves_input_order() {
        let temp = TempDir::new().unwrap();
        for name in ["a.txt", "b.txt", "c.txt"] {
            fs::write(temp.path().join(name), name).unwrap();
        }
        let files = vec![
            temp.path().join("c.txt"),
            temp.path().join("a.txt"),
            temp.path().join("b.txt"),
        ];
        let output = temp.path().join("out.zip");

        build_archive(&files, temp.path(), &output).unwrap();

        assert_eq!(
            names(&read_entries(&output)),
            vec!["c.txt", "a.txt", "b.txt"]
        );
    }

    #[test]
    fn test_build_skips_output_archive() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join("keep.txt"), "keep").unwrap();
        let output = root.join("self.zip");
        fs::write(&output, "stale archive").unwrap();

        let files = vec![root.join("keep.txt"), root.join("./self.zip")];
        let report = build_archive(&files, root, &output).unwrap();

        assert_eq!(names(&read_entries(&output)), vec!["keep.txt"]);
        assert_eq!(report.files_skipped, 1);
        assert!(report.skipped_output());
    }

    #[test]
    fn test_build_truncates_existing_output() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("one.txt"), "1").unwrap();
        let output = temp.path().join("out.zip");
        fs::write(&output, vec![b'x'; 100_000]).unwrap();

        build_archive(&[temp.path().join("one.txt")], temp.path(), &output).unwrap();

        assert!(fs::metadata(&output).unwrap().len() < 100_000);
        assert_eq!(names(&read_entries(&output)), vec!["one.txt"]);
    }

    #[test]
    fn test_build_file_outside_base_fails() {
        let temp = TempDir::new().unwrap();
        let (root, _) = sample_tree(&temp);
        let outside = temp.path().join("outside.txt");
        fs::write(&outside, "o").unwrap();
        let output = temp.path().join("out.zip");

        let err = build_archive(&[outside], &root, &output).unwrap_err();

        assert!(matches!(err, PackError::OutsideBasePath { .. }));
    }

    #[test]
    fn test_build_base_equal_to_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("solo.txt");
        fs::write(&file, "s").unwrap();

        let err = build_archive(&[&file], &file, &temp.path().join("out.zip")).unwrap_err();

        assert!(err.is_path_error());
    }

    #[test]
    fn test_build_missing_source_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.zip");

        let err = build_archive(&[temp.path().join("gone.txt")], temp.path(), &output)
            .unwrap_err();

        assert!(matches!(err, PackError::Io(_)));
        assert!(output.exists(), "partial output is left in place");
    }

    #[test]
    fn test_build_empty_list_writes_valid_archive() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out.zip");
        let files: Vec<PathBuf> = Vec::new();

        let report = build_archive(&files, temp.path(), &output).unwrap();

        assert_eq!(report.files_added, 0);
        assert!(read_entries(&output).is_empty());
    }

    #[derive(Default)]
    struct Recorder {
        started: Vec<(PathBuf, usize, usize)>,
        completed: usize,
        bytes: u64,
        finished: bool,
    }

    impl ProgressCallback for Recorder {
        fn on_entry_start(&mut self, path: &Path, total: usize, current: usize) {
            self.started.push((path.to_path_buf(), total, current));
        }
        fn on_bytes_written(&mut self, bytes: u64) {
            self.bytes += bytes;
        }
        fn on_entry_complete(&mut self, _path: &Path) {
            self.completed += 1;
        }
        fn on_complete(&mut self) {
            self.finished = true;
        }
    }

    #[test]
    fn test_build_reports_progress() {
        let temp = TempDir::new().unwrap();
        let (root, files) = sample_tree(&temp);
        let mut recorder = Recorder::default();

        build_archive_with_progress(&files, &root, &temp.path().join("o.zip"), &mut recorder)
            .unwrap();

        assert_eq!(recorder.started.len(), 2);
        assert_eq!(recorder.started[1], (PathBuf::from("c/y.txt"), 2, 2));
        assert_eq!(recorder.completed, 2);
        assert_eq!(recorder.bytes, 18);
        assert!(recorder.finished);
    }

    #[test]
    fn test_build_progress_total_excludes_output() {
        let temp = TempDir::new().unwrap();
        let (root, files) = sample_tree(&temp);
        let output = root.join("out.zip");
        fs::write(&output, "previous build").unwrap();
        let listed = vec![files[0].clone(), output.clone(), files[1].clone()];
        let mut recorder = Recorder::default();

        let report = build_archive_with_progress(&listed, &root, &output, &mut recorder).unwrap();

        assert_eq!(report.files_skipped, 1);
        assert_eq!(
            recorder.started,
            vec![
                (PathBuf::from("x.txt"), 2, 1),
                (PathBuf::from("c/y.txt"), 2, 2),
            ]
        );
        assert_eq!(recorder.completed, 2);
    }
}
