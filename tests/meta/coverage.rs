//! Enforces a one-to-one mirror between `src/` and `tests/unit/`

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Entry points and module organisation files need no mirrored test file
    fn is_exempt(relative: &str) -> bool {
        relative == "main.rs" || relative == "lib.rs" || relative.ends_with("mod.rs")
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<BTreeSet<String>, io::Error> {
        let mut paths = BTreeSet::new();
        if !dir.is_dir() {
            return Ok(paths);
        }

        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(|_prefix_error| io::Error::other("Failed to strip prefix"))?
                .to_string_lossy()
                .to_string();

            if path.is_dir() {
                paths.extend(collect_relative_paths(&path, base)?);
                paths.insert(relative);
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(paths)
    }

    fn mirrored_trees() -> (BTreeSet<String>, BTreeSet<String>) {
        let src = Path::new("src");
        let unit = Path::new("tests/unit");
        let src_paths = collect_relative_paths(src, src).unwrap_or_default();
        let test_paths = collect_relative_paths(unit, unit).unwrap_or_default();
        assert!(!src_paths.is_empty(), "src directory is empty or unreadable");
        (src_paths, test_paths)
    }

    #[test]
    fn test_every_source_file_has_unit_tests() {
        let (src_paths, test_paths) = mirrored_trees();

        let missing: Vec<_> = src_paths
            .iter()
            .filter(|path| !is_exempt(path) && !test_paths.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "Source files without unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_every_unit_test_has_a_source_file() {
        let (src_paths, test_paths) = mirrored_trees();

        let orphaned: Vec<_> = test_paths
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src_paths.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "Unit test files without a source counterpart:\n{}",
            orphaned.join("\n")
        );
    }

    #[test]
    fn test_every_unit_test_file_contains_tests() {
        let unit = Path::new("tests/unit");
        let test_paths = collect_relative_paths(unit, unit).unwrap_or_default();

        let empty: Vec<_> = test_paths
            .iter()
            .filter(|path| path.ends_with(".rs") && !path.ends_with("mod.rs"))
            .filter(|path| {
                fs::read_to_string(unit.join(path))
                    .map(|content| !content.contains("#[test]"))
                    .unwrap_or(true)
            })
            .map(|path| format!("  - tests/unit/{path}"))
            .collect();

        assert!(
            empty.is_empty(),
            "Unit test files without any #[test] functions:\n{}",
            empty.join("\n")
        );
    }
}
