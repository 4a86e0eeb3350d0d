//! Overlay precedence, caching, and failure-policy tests for the VFS.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use tempfile::TempDir;

use datapak::pak::{
    ArchiveBuilder, BackingMode, CompressionMethod, SearchOrder, Vfs, VfsError,
};

fn build_archive(dir: &TempDir, stem: &str, files: &[(&str, &[u8])]) -> PathBuf {
    let src_dir = dir.path().join(format!("{stem}-src"));
    fs::create_dir_all(&src_dir).unwrap();

    let mut builder = ArchiveBuilder::new(CompressionMethod::Deflate);
    for (name, bytes) in files {
        let src = src_dir.join(name.replace('/', "_"));
        fs::write(&src, bytes).unwrap();
        builder.add_file(&src, *name, None);
    }

    let out = dir.path().join(format!("{stem}.pak"));
    builder.build(&out).unwrap();
    out
}

fn overlay_fixture(dir: &TempDir) -> (PathBuf, PathBuf) {
    let a = build_archive(
        dir,
        "a",
        &[("common.txt", b"from A"), ("only_a.txt", b"alpha")],
    );
    let b = build_archive(
        dir,
        "b",
        &[("common.txt", b"from B"), ("only_b.txt", b"beta")],
    );
    (a, b)
}

fn read_all(vfs: &mut Vfs, name: &str) -> Vec<u8> {
    let mut stream = vfs.open(name).unwrap();
    let mut out = Vec::new();
    stream.read_to_end(&mut out).unwrap();
    out
}

#[test]
fn reverse_mount_order_prefers_the_last_mount() {
    let dir = TempDir::new().unwrap();
    let (a, b) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();
    vfs.mount(&b, BackingMode::Disk).unwrap();
    assert_eq!(vfs.mount_count(), 2);

    assert_eq!(read_all(&mut vfs, "common.txt"), b"from B");
    assert_eq!(read_all(&mut vfs, "only_a.txt"), b"alpha");
    assert_eq!(read_all(&mut vfs, "only_b.txt"), b"beta");
}

#[test]
fn mount_order_prefers_the_first_mount() {
    let dir = TempDir::new().unwrap();
    let (a, b) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();
    vfs.mount(&b, BackingMode::Disk).unwrap();

    vfs.set_search_order(SearchOrder::MountOrder);
    assert_eq!(vfs.get_search_order(), SearchOrder::MountOrder);

    assert_eq!(read_all(&mut vfs, "common.txt"), b"from A");
}

#[test]
fn switching_search_order_after_clearing_the_cache() {
    let dir = TempDir::new().unwrap();
    let (a, b) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();
    vfs.mount(&b, BackingMode::Disk).unwrap();

    assert_eq!(read_all(&mut vfs, "common.txt"), b"from B");

    // The cached copy would otherwise keep serving the old winner.
    vfs.set_search_order(SearchOrder::MountOrder);
    vfs.clear_cache();
    assert_eq!(read_all(&mut vfs, "common.txt"), b"from A");
}

#[test]
fn list_files_is_sorted_and_deduplicated() {
    let dir = TempDir::new().unwrap();
    let (a, b) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();
    vfs.mount(&b, BackingMode::Disk).unwrap();

    assert_eq!(
        vfs.list_files(),
        ["common.txt", "only_a.txt", "only_b.txt"]
    );
}

#[test]
fn contains_looks_across_all_mounts() {
    let dir = TempDir::new().unwrap();
    let (a, b) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();
    assert!(vfs.contains("only_a.txt"));
    assert!(!vfs.contains("only_b.txt"));

    vfs.mount(&b, BackingMode::Disk).unwrap();
    assert!(vfs.contains("only_b.txt"));
}

#[test]
fn absent_path_is_file_not_found() {
    let dir = TempDir::new().unwrap();
    let (a, _) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();

    assert!(matches!(
        vfs.open("nonexistent.txt"),
        Err(VfsError::FileNotFound(_))
    ));
}

#[test]
fn cache_serves_the_second_open_without_the_reader() {
    let dir = TempDir::new().unwrap();
    let (a, _) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();
    assert_eq!(vfs.cache_size(), 0);

    let first = read_all(&mut vfs, "common.txt");
    assert_eq!(vfs.cache_size(), 1);

    // Fault injection: truncate the backing file so any real read fails.
    fs::OpenOptions::new()
        .write(true)
        .open(&a)
        .unwrap()
        .set_len(0)
        .unwrap();

    let second = read_all(&mut vfs, "common.txt");
    assert_eq!(first, second);

    // Without the cache the fault is visible again.
    vfs.clear_cache();
    assert_eq!(vfs.cache_size(), 0);
    assert!(vfs.open("common.txt").is_err());
}

#[test]
fn clear_cache_repopulates_on_next_open() {
    let dir = TempDir::new().unwrap();
    let (a, _) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();

    let before = read_all(&mut vfs, "common.txt");
    vfs.clear_cache();
    assert_eq!(vfs.cache_size(), 0);

    let after = read_all(&mut vfs, "common.txt");
    assert_eq!(before, after);
    assert_eq!(vfs.cache_size(), 1);
}

#[test]
fn disabled_cache_stays_empty() {
    let dir = TempDir::new().unwrap();
    let (a, _) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();
    vfs.enable_cache(false);

    let _ = read_all(&mut vfs, "common.txt");
    assert_eq!(vfs.cache_size(), 0);
}

#[test]
fn memory_mode_mounts_behave_the_same() {
    let dir = TempDir::new().unwrap();
    let (a, b) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Memory).unwrap();
    vfs.mount(&b, BackingMode::Memory).unwrap();

    assert_eq!(read_all(&mut vfs, "common.txt"), b"from B");
    assert_eq!(read_all(&mut vfs, "only_a.txt"), b"alpha");
}

#[test]
fn open_error_does_not_fall_through_to_lower_mounts() {
    let dir = TempDir::new().unwrap();
    let (a, b) = overlay_fixture(&dir);

    // Corrupt B's data region, leaving its directory intact. B still
    // claims common.txt, so B stays authoritative under the default order.
    let mut bytes = fs::read(&b).unwrap();
    let directory_offset =
        u64::from_le_bytes(bytes[8..16].try_into().unwrap()) as usize;
    for byte in &mut bytes[24..directory_offset] {
        *byte = 0xFF;
    }
    fs::write(&b, &bytes).unwrap();

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();
    vfs.mount(&b, BackingMode::Disk).unwrap();

    let err = vfs.open("common.txt").unwrap_err();
    assert!(matches!(err, VfsError::Archive(_)));
    // The failed open must not have polluted the cache.
    assert_eq!(vfs.cache_size(), 0);

    // Mount order flips precedence back to the intact archive.
    vfs.set_search_order(SearchOrder::MountOrder);
    assert_eq!(read_all(&mut vfs, "common.txt"), b"from A");
}

#[test]
fn cached_streams_are_independent_copies() {
    let dir = TempDir::new().unwrap();
    let (a, _) = overlay_fixture(&dir);

    let mut vfs = Vfs::new();
    vfs.mount(&a, BackingMode::Disk).unwrap();

    let mut s1 = vfs.open("common.txt").unwrap();
    let mut half = [0u8; 3];
    s1.read_exact(&mut half).unwrap();

    // Draining one stream does not move the other.
    let s2 = vfs.open("common.txt").unwrap();
    assert_eq!(s2.position(), 0);
    assert_eq!(s2.as_bytes(), b"from A".as_slice());
}
