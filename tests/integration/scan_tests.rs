use namedupe::config::RunConfig;
use namedupe::duplicates::DuplicateFinder;
use namedupe::output::Terminal;
use namedupe::scanner::PathFilter;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

fn touch(dir: &Path, names: &[&str]) {
    for name in names {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        File::create(path).unwrap();
    }
}

fn pretend_config(root: &Path) -> RunConfig {
    RunConfig::new(root)
        .with_delete_extensions([".mp3", ".m4p"])
        .with_force(true)
        .with_pretend(true)
}

fn run(config: RunConfig) -> (namedupe::duplicates::RunSummary, String) {
    let mut term = Terminal::new(&b""[..], Vec::new(), config.quiet);
    let summary = DuplicateFinder::new(config).run(&mut term).unwrap();
    (summary, String::from_utf8(term.into_output()).unwrap())
}

#[test]
fn test_scan_empty_directory() {
    let dir = tempdir().unwrap();
    let (summary, out) = run(pretend_config(dir.path()));

    assert!(out.is_empty());
    assert_eq!(summary.directories_scanned, 1);
    assert_eq!(summary.files_seen, 0);
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_scan_unique_stems_produce_no_output() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["a.mp3", "b.m4p", "c.flac", "sub/d.mp3"]);

    let (summary, out) = run(pretend_config(dir.path()));

    assert!(out.is_empty());
    assert_eq!(summary.files_seen, 4);
    assert_eq!(summary.directories_scanned, 2);
}

#[test]
fn test_duplicates_are_never_grouped_across_directories() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["song.mp3", "other/song.m4p"]);

    let (summary, out) = run(pretend_config(dir.path()));

    assert!(out.is_empty());
    assert_eq!(summary.duplicate_groups, 0);
}

#[test]
fn test_every_directory_with_duplicates_is_reported() {
    let dir = tempdir().unwrap();
    touch(
        dir.path(),
        &["a.mp3", "a.wav", "x/b.mp3", "x/b.wav", "x/y/c.m4p", "x/y/c.aac"],
    );

    let (summary, out) = run(pretend_config(dir.path()));

    assert_eq!(summary.duplicate_groups, 3);
    assert_eq!(summary.pretended, 3);
    assert_eq!(out.matches("==========").count(), 3);
    assert!(out.contains("Found duplicate a\n"));
    assert!(out.contains("Found duplicate b\n"));
    assert!(out.contains("Found duplicate c\n"));
}

#[test]
fn test_excluded_directory_hides_whole_subtree() {
    let dir = tempdir().unwrap();
    touch(
        dir.path(),
        &[
            "@eaDir/a.mp3",
            "@eaDir/a.m4p",
            "@eaDir/nested/b.mp3",
            "@eaDir/nested/b.m4p",
            "keep/c.mp3",
            "keep/c.m4p",
        ],
    );

    let config = pretend_config(dir.path()).with_filter(PathFilter::new(["eaDir"]).unwrap());
    let (summary, out) = run(config);

    assert!(!out.contains("eaDir"));
    assert!(out.contains("Found duplicate c"));
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.directories_scanned, 2);
    assert_eq!(summary.entries_excluded, 1);
}

#[test]
fn test_excluded_file_does_not_complete_a_group() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["a.mp3", "SynoThumb.mp3", "SynoThumb.jpg", "a.Syno"]);

    let config = pretend_config(dir.path()).with_filter(PathFilter::new(["Syno"]).unwrap());
    let (summary, out) = run(config);

    assert!(out.is_empty());
    assert_eq!(summary.files_seen, 1);
    assert_eq!(summary.entries_excluded, 3);
}

#[test]
fn test_sibling_directories_in_name_order() {
    let dir = tempdir().unwrap();
    touch(
        dir.path(),
        &["zeta/s.mp3", "zeta/s.wav", "alpha/s.mp3", "alpha/s.wav"],
    );

    let (_, out) = run(pretend_config(dir.path()));

    let alpha = out.find("alpha").unwrap();
    let zeta = out.find("zeta").unwrap();
    assert!(alpha < zeta);
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_reports_each_directory_once() {
    let dir = tempdir().unwrap();
    touch(dir.path(), &["a.mp3", "a.wav"]);
    fs::create_dir(dir.path().join("sub")).unwrap();
    std::os::unix::fs::symlink(dir.path(), dir.path().join("sub/up")).unwrap();

    let (summary, out) = run(pretend_config(dir.path()));

    assert_eq!(summary.directories_scanned, 2);
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.entries_skipped, 1);
    assert_eq!(out.matches("Found duplicate a").count(), 1);
    assert!(dir.path().join("a.mp3").exists());
}

#[cfg(unix)]
#[test]
fn test_non_utf8_names_group_by_raw_stem() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = tempdir().unwrap();
    let mp3 = dir.path().join(OsStr::from_bytes(b"\xffsong.mp3"));
    let m4p = dir.path().join(OsStr::from_bytes(b"\xffsong.m4p"));
    // Some filesystems (e.g. macOS APFS) reject non-UTF-8 names.
    if File::create(&mp3).is_err() {
        return;
    }
    File::create(&m4p).unwrap();
    touch(dir.path(), &["\u{fffd}song.wav"]);

    let (summary, out) = run(pretend_config(dir.path()));

    // The lossily-named .wav has a different raw stem and stays out.
    assert_eq!(summary.duplicate_groups, 1);
    assert_eq!(summary.pretended, 2);
    assert!(out.contains("Found duplicate \u{fffd}song\n"));
    assert!(out.contains(&format!("Deleting file: {}\n", mp3.display())));
    assert!(out.contains(&format!("Deleting file: {}\n", m4p.display())));
    assert!(!out.contains("song.wav"));
}
