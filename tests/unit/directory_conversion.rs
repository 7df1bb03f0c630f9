use pretty_assertions::assert_eq;
use std::fs::{self, File};
use std::io::Write;
use tempfile::TempDir;
use webpconv::discovery::directory as discovery_dir;

#[test]
fn test_find_candidates_flat() {
    let td = TempDir::new().unwrap();
    let mut fa = File::create(td.path().join("a.jpg")).unwrap();
    write!(fa, "not really a jpeg").unwrap();
    File::create(td.path().join("b.png")).unwrap();

    let files = discovery_dir::find_candidates(td.path(), ".jpg").unwrap();
    assert_eq!(files, vec![td.path().join("a.jpg")]);
}

#[test]
fn test_find_candidates_any_case_any_depth() {
    let td = TempDir::new().unwrap();
    let mut dir = td.path().to_path_buf();
    for level in 0..12 {
        dir = dir.join(format!("level{}", level));
    }
    fs::create_dir_all(&dir).unwrap();
    File::create(dir.join("deep.JPG")).unwrap();
    File::create(td.path().join("top.jPg")).unwrap();
    File::create(td.path().join("top.webp")).unwrap();

    let mut files = discovery_dir::find_candidates(td.path(), ".jpg").unwrap();
    files.sort();
    let mut expected = vec![dir.join("deep.JPG"), td.path().join("top.jPg")];
    expected.sort();
    assert_eq!(files, expected);
}

#[test]
fn test_walk_is_lazy_and_matches_find() {
    let td = TempDir::new().unwrap();
    fs::create_dir(td.path().join("sub")).unwrap();
    File::create(td.path().join("sub/x.jpg")).unwrap();
    File::create(td.path().join("y.jpg")).unwrap();

    let walked: Vec<_> = discovery_dir::walk_candidates(td.path(), ".jpg")
        .collect::<Result<_, _>>()
        .unwrap();
    let found = discovery_dir::find_candidates(td.path(), ".jpg").unwrap();
    assert_eq!(walked, found);
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_followed() {
    let td = TempDir::new().unwrap();
    let outside = TempDir::new().unwrap();
    File::create(outside.path().join("linked.jpg")).unwrap();
    std::os::unix::fs::symlink(outside.path(), td.path().join("link")).unwrap();

    let files = discovery_dir::find_candidates(td.path(), ".jpg").unwrap();
    assert_eq!(files, vec![td.path().join("link/linked.jpg")]);
}
