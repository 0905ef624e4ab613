//! Keeps `tests/unit` a file-for-file mirror of `src`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::{Path, PathBuf};

    const SOURCE_ROOT: &str = "src";
    const UNIT_ROOT: &str = "tests/unit";

    // Paths of every `.rs` file below `root`, relative to it
    fn rust_files(root: &Path) -> io::Result<BTreeSet<PathBuf>> {
        let mut found = BTreeSet::new();
        let mut pending = vec![root.to_path_buf()];

        while let Some(dir) = pending.pop() {
            for entry in fs::read_dir(&dir)? {
                let path = entry?.path();
                if path.is_dir() {
                    pending.push(path);
                } else if path.extension().is_some_and(|ext| ext == "rs") {
                    let relative = path.strip_prefix(root).map_err(io::Error::other)?;
                    found.insert(relative.to_path_buf());
                }
            }
        }

        Ok(found)
    }

    // Crate roots, harness roots and module lists only wire files together
    fn is_glue(path: &Path) -> bool {
        matches!(
            path.file_name().and_then(|name| name.to_str()),
            Some("lib.rs" | "main.rs" | "mod.rs")
        )
    }

    fn listing(paths: &[&PathBuf]) -> String {
        paths
            .iter()
            .map(|path| format!("  {}", path.display()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    // Tests each source file has a unit test file at the same relative path
    // Verified by deleting tests/unit/io/color.rs
    #[test]
    fn test_every_source_file_has_unit_tests() {
        let sources = rust_files(Path::new(SOURCE_ROOT)).unwrap();
        let tests = rust_files(Path::new(UNIT_ROOT)).unwrap();

        let untested: Vec<&PathBuf> = sources
            .iter()
            .filter(|path| !is_glue(path) && !tests.contains(*path))
            .collect();

        assert!(
            untested.is_empty(),
            "Source files without a matching file under {UNIT_ROOT}:\n{}",
            listing(&untested)
        );
    }

    // Tests no unit test file outlives the source file it covers
    // Verified by adding tests/unit/io/stale.rs
    #[test]
    fn test_every_unit_test_has_source() {
        let sources = rust_files(Path::new(SOURCE_ROOT)).unwrap();
        let tests = rust_files(Path::new(UNIT_ROOT)).unwrap();

        let orphaned: Vec<&PathBuf> = tests
            .iter()
            .filter(|path| !is_glue(path) && !sources.contains(*path))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a matching file under {SOURCE_ROOT}:\n{}",
            listing(&orphaned)
        );
    }

    // Tests every non-glue file under tests/ declares at least one test
    // Verified by emptying the body of tests/unit/io/color.rs
    #[test]
    fn test_test_files_declare_tests() {
        let root = Path::new("tests");
        let files = rust_files(root).unwrap();

        let empty: Vec<&PathBuf> = files
            .iter()
            .filter(|path| !is_glue(path))
            .filter(|path| {
                !fs::read_to_string(root.join(path))
                    .is_ok_and(|content| content.contains("#[test]"))
            })
            .collect();

        assert!(
            empty.is_empty(),
            "Test files without a #[test] function:\n{}",
            listing(&empty)
        );
    }
}
