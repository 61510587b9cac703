//! Benchmarks for source expansion and archive building.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::cast_sign_loss)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::Throughput;
use criterion::criterion_group;
use criterion::criterion_main;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use zipstage_core::build_archive;
use zipstage_core::expand_source;

/// Creates a flat directory of 1 KB files plus an ignored `node_modules`.
fn create_app_directory(temp: &TempDir, file_count: usize) -> PathBuf {
    let dir = temp.path().join("app");
    let modules = dir.join("node_modules/dep");
    fs::create_dir_all(&modules).unwrap();

    let content = "x".repeat(1024);
    for i in 0..file_count {
        fs::write(dir.join(format!("file_{i:05}.txt")), &content).unwrap();
        fs::write(modules.join(format!("dep_{i:05}.js")), &content).unwrap();
    }

    dir
}

/// Creates a chain of nested directories with a few files per level.
fn create_nested_directory(temp: &TempDir, depth: usize, files_per_level: usize) -> PathBuf {
    fn create_level(base: &Path, remaining: usize, files: usize) {
        if remaining == 0 {
            return;
        }
        for i in 0..files {
            fs::write(base.join(format!("file_{i}.txt")), "content\n").unwrap();
        }
        let subdir = base.join(format!("level_{remaining}"));
        fs::create_dir_all(&subdir).unwrap();
        create_level(&subdir, remaining - 1, files);
    }

    let root = temp.path().join("nested");
    fs::create_dir_all(&root).unwrap();
    create_level(&root, depth, files_per_level);
    root
}

fn benchmark_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");

    for count in [100, 1000] {
        let temp = TempDir::new().unwrap();
        let dir = create_app_directory(&temp, count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("flat_pruned", count), &dir, |b, dir| {
            b.iter(|| expand_source(black_box(dir), &["node_modules"]).unwrap());
        });
    }

    let temp = TempDir::new().unwrap();
    let nested = create_nested_directory(&temp, 20, 5);
    group.bench_function("nested_depth_20", |b| {
        let rules: [&str; 0] = [];
        b.iter(|| expand_source(black_box(&nested), &rules).unwrap());
    });

    group.finish();
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for count in [100, 500] {
        let temp = TempDir::new().unwrap();
        let dir = create_app_directory(&temp, count);
        let files = expand_source(&dir, &["node_modules"]).unwrap();
        let output = temp.path().join("out.zip");

        group.throughput(Throughput::Bytes((count * 1024) as u64));
        group.bench_with_input(BenchmarkId::new("deflate", count), &files, |b, files| {
            b.iter(|| build_archive(black_box(files), temp.path(), &output).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_expand, benchmark_build);
criterion_main!(benches);
