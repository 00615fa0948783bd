use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lintcache::{CacheStore, ChangeTracker, ConfigLocator, FileHasher};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Helper to fill a directory with files of a given size
fn setup_files(dir: &TempDir, count: usize, size: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|i| {
            let path = dir.path().join(format!("file_{}.rs", i));
            fs::write(&path, vec![b'x'; size]).expect("Failed to write bench file");
            path
        })
        .collect()
}

fn bench_hasher(c: &mut Criterion) {
    let mut group = c.benchmark_group("hasher");

    for size_kb in [1, 64, 1024] {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bench_file.rs");
        fs::write(&file_path, vec![b'a'; size_kb * 1024]).expect("Failed to write bench file");

        let hasher = FileHasher::new();
        group.bench_with_input(format!("blake3_{}KB", size_kb), &file_path, |b, path| {
            b.iter(|| {
                let digest = hasher.compute(path).unwrap();
                black_box(digest);
            });
        });
    }

    group.finish();
}

fn bench_change_query(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let files = setup_files(&temp_dir, 100, 4 * 1024);

    let store = CacheStore::open(&temp_dir.path().join("cache.db")).unwrap();
    let locator = ConfigLocator::new("lintcache-bench").with_search_root(temp_dir.path());
    let mut tracker = ChangeTracker::open(store, FileHasher::new(), &locator).unwrap();
    for f in &files {
        tracker.record_file(f).unwrap();
    }

    c.bench_function("has_changed_100_recorded_files", |b| {
        b.iter(|| {
            for f in &files {
                black_box(tracker.has_changed(f).unwrap());
            }
        })
    });
}

fn bench_record(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let files = setup_files(&temp_dir, 100, 4 * 1024);

    let store = CacheStore::open(&temp_dir.path().join("cache.db")).unwrap();
    let locator = ConfigLocator::new("lintcache-bench").with_search_root(temp_dir.path());
    let mut tracker = ChangeTracker::open(store, FileHasher::new(), &locator).unwrap();

    c.bench_function("record_100_files", |b| {
        b.iter(|| {
            for f in &files {
                tracker.record_file(f).unwrap();
            }
        })
    });
}

criterion_group!(benches, bench_hasher, bench_change_query, bench_record);
criterion_main!(benches);
