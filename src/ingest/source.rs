// src/ingest/source.rs
use anyhow::{anyhow, Context, Result};
use glob::glob;
use std::{
    fs::{self, File},
    io::Read,
    path::{Path, PathBuf},
};
use tracing::{debug, instrument, warn};
use zip::ZipArchive;

use super::Batch;

const BATCH_EXTENSIONS: &[&str] = &["csv", "json", "zip"];

fn has_batch_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| BATCH_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("zip"))
}

/// Expand one CLI input into concrete file paths:
/// - a directory yields every `.csv`/`.json`/`.zip` inside it, sorted by name
/// - a pattern containing `*`, `?` or `[` is globbed
/// - anything else must be an existing file
fn expand_input(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);
    if path.is_dir() {
        let mut files: Vec<PathBuf> = fs::read_dir(path)
            .with_context(|| format!("reading directory {}", path.display()))?
            .filter_map(|e| e.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_batch_extension(p))
            .collect();
        files.sort();
        return Ok(files);
    }

    if input.contains(&['*', '?', '['][..]) {
        let files: Vec<PathBuf> = glob(input)
            .with_context(|| format!("Failed to read glob pattern '{}'", input))?
            .filter_map(|entry| entry.ok())
            .filter(|p| p.is_file())
            .collect();
        if files.is_empty() {
            warn!(pattern = input, "glob matched no files");
        }
        return Ok(files);
    }

    if path.is_file() {
        Ok(vec![path.to_path_buf()])
    } else {
        Err(anyhow!("input {} does not exist", path.display()))
    }
}

/// Read every `.csv`/`.json` entry of a ZIP, in archive order, as its own batch.
fn read_zip_batches(zip_path: &Path) -> Result<Vec<Batch>> {
    let file = File::open(zip_path)
        .with_context(|| format!("Failed to open ZIP file: {:?}", zip_path))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Failed to read ZIP archive: {:?}", zip_path))?;

    let mut batches = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("Failed to access ZIP entry #{} in {:?}", i, zip_path))?;
        let name = entry.name().to_string();
        let lower = name.to_lowercase();
        if !entry.is_file() || !(lower.ends_with(".csv") || lower.ends_with(".json")) {
            continue;
        }
        let mut buf = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut buf)
            .with_context(|| format!("Failed to read {} into memory", name))?;
        batches.push(Batch::new(
            format!("{}/{}", zip_path.display(), name),
            buf,
        ));
    }
    Ok(batches)
}

/// Load all batches named by `inputs`, in the order given.
///
/// Missing paths are an error. A ZIP that cannot be opened is skipped with a
/// warning, like any other unreadable batch.
#[instrument(level = "info", skip(inputs), fields(inputs = inputs.len()))]
pub fn load_batches<S: AsRef<str>>(inputs: &[S]) -> Result<Vec<Batch>> {
    let mut batches = Vec::new();
    for input in inputs {
        for path in expand_input(input.as_ref())? {
            if is_zip(&path) {
                match read_zip_batches(&path) {
                    Ok(found) => {
                        debug!(zip = %path.display(), entries = found.len(), "expanded archive");
                        batches.extend(found);
                    }
                    Err(e) => warn!(zip = %path.display(), error = %e, "skipping unreadable archive"),
                }
                continue;
            }
            let data =
                fs::read(&path).with_context(|| format!("reading batch {}", path.display()))?;
            batches.push(Batch::new(path.display().to_string(), data));
        }
    }
    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::CompressionMethod;

    #[test]
    fn directory_inputs_are_sorted_and_filtered() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("b.csv"), "x\n1\n")?;
        fs::write(dir.path().join("a.csv"), "x\n2\n")?;
        fs::write(dir.path().join("notes.txt"), "ignored")?;

        let batches = load_batches(&[dir.path().display().to_string()])?;
        let names: Vec<&str> = batches.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].ends_with("a.csv"));
        assert!(names[1].ends_with("b.csv"));
        Ok(())
    }

    #[test]
    fn zip_entries_become_batches() -> Result<()> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options =
                SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
            zip.start_file("one.csv", options)?;
            zip.write_all(b"investorName\nA\n")?;
            zip.start_file("readme.md", options)?;
            zip.write_all(b"# skip")?;
            zip.start_file("two.json", options)?;
            zip.write_all(br#"[{"investorName":"B"}]"#)?;
            zip.finish()?;
        }
        let dir = tempdir()?;
        let zip_path = dir.path().join("uploads.zip");
        fs::write(&zip_path, &buf)?;

        let batches = load_batches(&[zip_path.display().to_string()])?;
        assert_eq!(batches.len(), 2);
        assert!(batches[0].name.ends_with("uploads.zip/one.csv"));
        assert!(batches[1].name.ends_with("uploads.zip/two.json"));
        Ok(())
    }

    #[test]
    fn corrupt_zip_is_skipped() -> Result<()> {
        let dir = tempdir()?;
        let zip_path = dir.path().join("broken.zip");
        fs::write(&zip_path, b"not a zip")?;
        let batches = load_batches(&[zip_path.display().to_string()])?;
        assert!(batches.is_empty());
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_batches(&["/definitely/not/here.csv"]).is_err());
    }

    #[test]
    fn glob_patterns_expand() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("t1.csv"), "x\n1\n")?;
        fs::write(dir.path().join("t2.csv"), "x\n2\n")?;
        let pattern = format!("{}/t*.csv", dir.path().display());
        let batches = load_batches(&[pattern])?;
        assert_eq!(batches.len(), 2);
        Ok(())
    }
}
