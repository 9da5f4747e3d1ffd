use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dupescan::duplicates::{group_by_size, DuplicateFinder, FinderConfig};
use dupescan::scanner::{FileEntry, Hasher, Walker};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Helper to create a test directory with a specific structure
fn setup_test_dir(depth: usize, files_per_dir: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    create_dir_recursive(temp_dir.path().to_path_buf(), depth, files_per_dir);
    temp_dir
}

fn create_dir_recursive(path: PathBuf, depth: usize, files_per_dir: usize) {
    if depth == 0 {
        return;
    }

    if !path.exists() {
        fs::create_dir_all(&path).expect("Failed to create dir");
    }

    for i in 0..files_per_dir {
        let file_path = path.join(format!("file_{}.txt", i));
        fs::write(file_path, format!("content for file {} at depth {}", i, depth))
            .expect("Failed to write file");
    }

    if depth > 1 {
        for i in 0..2 {
            // 2 subdirectories per level
            let sub_dir = path.join(format!("dir_{}", i));
            create_dir_recursive(sub_dir, depth - 1, files_per_dir);
        }
    }
}

// 1. Directory Walking Benchmarks
fn bench_walker(c: &mut Criterion) {
    let temp_dir = setup_test_dir(4, 10); // depth 4, 10 files per dir -> roughly 150 files

    c.bench_function("walker_150_files", |b| {
        b.iter(|| {
            let walker = Walker::new(temp_dir.path());
            let files: Vec<_> = walker.walk().collect();
            black_box(files);
        })
    });
}

// 2. Hashing Benchmarks
fn bench_hasher(c: &mut Criterion) {
    let mut group = c.benchmark_group("hasher");
    let hasher = Hasher::new();

    for size_kb in [1, 1024, 10240] {
        // 1KB, 1MB, 10MB
        let data = vec![b'a'; size_kb * 1024];
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bench_file.dat");
        fs::write(&file_path, &data).expect("Failed to write bench file");

        group.bench_with_input(format!("blake3_{}KB", size_kb), &file_path, |b, path| {
            b.iter(|| {
                let hash = hasher.full_hash(path).unwrap();
                black_box(hash);
            });
        });
    }
    group.finish();
}

// 3. Size Grouping Benchmarks
fn bench_group_by_size(c: &mut Criterion) {
    let files: Vec<FileEntry> = (0..100_000)
        .map(|i| {
            let size = if i % 2 == 0 { i as u64 + 1 } else { (i / 100) as u64 + 1 };
            FileEntry::new(PathBuf::from(format!("/bench/file{}.txt", i)), size)
        })
        .collect();

    c.bench_function("group_by_size_100k", |b| {
        b.iter(|| {
            let (groups, stats) = group_by_size(files.clone());
            black_box((groups, stats));
        })
    });
}

// 4. Full Pipeline Benchmark
fn bench_full_scan(c: &mut Criterion) {
    let temp_dir = setup_test_dir(3, 10);

    // Seed some duplicates across directories
    for i in 0..10 {
        fs::write(
            temp_dir.path().join(format!("dup_a_{}.bin", i)),
            b"shared duplicate payload",
        )
        .unwrap();
        fs::write(
            temp_dir.path().join(format!("dup_b_{}.bin", i)),
            b"shared duplicate payload",
        )
        .unwrap();
    }

    c.bench_function("full_scan_small_tree", |b| {
        b.iter(|| {
            let finder = DuplicateFinder::new(FinderConfig::default().with_io_threads(4));
            let result = finder.find_duplicates(temp_dir.path()).unwrap();
            black_box(result);
        })
    });
}

criterion_group!(
    benches,
    bench_walker,
    bench_hasher,
    bench_group_by_size,
    bench_full_scan
);
criterion_main!(benches);
