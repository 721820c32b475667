//! End-to-end runs of the fingerprint pipeline over temporary source trees.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use simprint_core::cancel::CancelToken;
use simprint_core::discovery::{IgnoreMatcher, Walk};
use simprint_core::error::SimprintError;
use simprint_core::lang::Registry;
use simprint_core::pipeline::{self, Options, Pipeline};
use simprint_core::types::Fingerprint;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut f = File::create(path).unwrap();
    write!(f, "{content}").unwrap();
}

fn pipeline_with(options: Options) -> Pipeline {
    Pipeline::new(Registry::builtin().unwrap(), IgnoreMatcher::default(), options)
}

fn pipeline() -> Pipeline {
    pipeline_with(Options {
        parallelism: 4,
        ..Options::default()
    })
}

fn sample_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/main.go", "package main\n\nfunc main() {\n\tprintln(1)\n}\n");
    write(root, "src/util.py", "# helper\ndef add(a, b):\n    return a + b\n");
    write(root, "lib/Core.java", "// core\npublic class Core {\n  int x;\n}\n");
    write(root, "README.md", "# readme\n");
    write(root, "notes.txt", "not code\n");
    dir
}

#[test]
fn batch_skips_unrecognized_files() {
    let dir = sample_tree();
    let fp = pipeline().run(dir.path()).unwrap();

    let names: Vec<_> = fp.files.iter().map(|f| f.file.as_str()).collect();
    assert_eq!(names, vec!["lib/Core.java", "src/main.go", "src/util.py"]);
    assert_eq!(fp.metadata.total_files, 3);
    assert_eq!(fp.metadata.output_mode, "directory");
    assert_eq!(fp.metadata.language, vec!["go", "java", "python"]);
}

#[test]
fn single_unrecognized_file_is_an_error() {
    let dir = sample_tree();
    let err = pipeline().run(&dir.path().join("notes.txt")).unwrap_err();
    assert!(matches!(err, SimprintError::UnsupportedLanguage { .. }));
}

#[test]
fn single_file_run() {
    let dir = sample_tree();
    let fp = pipeline().run(&dir.path().join("src/main.go")).unwrap();
    assert_eq!(fp.files.len(), 1);
    assert_eq!(fp.files[0].file, "main.go");
    assert_eq!(fp.metadata.output_mode, "file");
    assert_eq!(fp.metadata.total_count, 1);
}

#[test]
fn totals_are_sums_over_files() {
    let dir = sample_tree();
    let fp = pipeline().run(dir.path()).unwrap();
    let size: u64 = fp.files.iter().map(|f| f.size).sum();
    let lines: u64 = fp.files.iter().map(|f| f.lines).sum();
    assert_eq!(fp.metadata.total_size, size);
    assert_eq!(fp.metadata.total_lines, lines);
    assert_eq!(fp.metadata.total_files, fp.files.len() as u64);
    assert_eq!(lines, 5 + 3 + 4);
}

#[test]
fn output_is_sorted_whatever_the_completion_order() {
    let dir = TempDir::new().unwrap();
    let mut rels: Vec<PathBuf> = (0..40)
        .map(|i| PathBuf::from(format!("m{i:02}.rs")))
        .collect();
    for rel in &rels {
        write(dir.path(), &rel.to_string_lossy(), "fn f() {}\n");
    }
    rels.reverse();

    let candidates = pipeline::candidates_under(dir.path(), &rels);
    let fp = pipeline()
        .run_candidates(candidates, &CancelToken::new())
        .unwrap();

    let names: Vec<_> = fp.files.iter().map(|f| f.file.clone()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names.len(), 40);
    assert_eq!(names, sorted);
}

#[test]
fn repeated_runs_agree() {
    let dir = sample_tree();
    let a = pipeline().run(dir.path()).unwrap();
    let b = pipeline_with(Options {
        parallelism: 1,
        ..Options::default()
    })
    .run(dir.path())
    .unwrap();
    assert_eq!(a.files, b.files);
}

#[test]
fn empty_directory_gives_empty_document() {
    let dir = TempDir::new().unwrap();
    let fp = pipeline().run(dir.path()).unwrap();
    assert!(fp.files.is_empty());
    assert_eq!(fp.metadata.total_files, 0);
    assert_eq!(fp.metadata.total_size, 0);
}

#[test]
fn missing_root_is_invalid() {
    let dir = TempDir::new().unwrap();
    let err = pipeline().run(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, SimprintError::RootInvalid { .. }));
}

#[test]
fn ignored_and_hidden_paths_are_not_walked() {
    let dir = sample_tree();
    write(dir.path(), ".git/hooks/pre-commit.sh", "echo hi\n");
    write(dir.path(), ".hidden/secret.rs", "fn s() {}\n");
    write(dir.path(), "gen/api.go", "package gen\n");

    let ignore = IgnoreMatcher::new(&["gen/**".to_string()], false).unwrap();
    let fp = Pipeline::new(Registry::builtin().unwrap(), ignore, Options::default())
        .run(dir.path())
        .unwrap();
    assert!(fp.files.iter().all(|f| !f.file.starts_with(".git")
        && !f.file.starts_with(".hidden")
        && !f.file.starts_with("gen/")));
    assert_eq!(fp.files.len(), 3);
}

#[test]
fn vendored_and_build_sources_are_fingerprinted() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, "src/a.go", "package a\nfunc A() {}\n");
    write(root, "vendor/github.com/x/y.go", "package y\nfunc Y() {}\n");
    write(root, "build/gen.c", "int gen(void) { return 1; }\n");
    write(root, "dist/app.js", "console.log(1);\n");
    write(root, "third_party/node_modules/z/index.js", "module.exports = 1;\n");

    let fp = pipeline().run(root).unwrap();
    let names: Vec<_> = fp.files.iter().map(|f| f.file.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "build/gen.c",
            "dist/app.js",
            "src/a.go",
            "third_party/node_modules/z/index.js",
            "vendor/github.com/x/y.go",
        ]
    );

    let pruned = IgnoreMatcher::default().with_prune(vec!["vendor".into(), "node_modules".into()]);
    let fp = Pipeline::new(Registry::builtin().unwrap(), pruned, Options::default())
        .run(root)
        .unwrap();
    assert_eq!(fp.files.len(), 3);
}

#[test]
fn dot_files_are_fingerprinted() {
    let dir = sample_tree();
    write(dir.path(), ".eslintrc.js", "module.exports = { root: true };\n");
    write(dir.path(), "web/.prettierrc.cjs", "module.exports = {};\n");

    let fp = pipeline().run(dir.path()).unwrap();
    let names: Vec<_> = fp.files.iter().map(|f| f.file.as_str()).collect();
    assert!(names.contains(&".eslintrc.js"));
    assert!(names.contains(&"web/.prettierrc.cjs"));
}

/// A producer that sends `rels` and then, optionally, a terminal error.
fn scripted_walk(root: &Path, rels: &[&str], error: Option<SimprintError>) -> Walk {
    let (tx, candidates) = crossbeam_channel::unbounded();
    let (err_tx, errors) = crossbeam_channel::bounded(1);
    let items: Vec<PathBuf> = rels.iter().map(PathBuf::from).collect();
    let batch = pipeline::candidates_under(root, &items);

    let handle = thread::spawn(move || {
        let mut sent = 0;
        for candidate in batch {
            if tx.send(candidate).is_err() {
                break;
            }
            sent += 1;
        }
        if let Some(e) = error {
            let _ = err_tx.send(e);
        }
        sent
    });
    Walk::new(candidates, errors, handle)
}

#[test]
fn walk_error_discards_collected_files() {
    let dir = sample_tree();
    let rels = ["src/main.go", "src/util.py", "lib/Core.java"];

    let clean = pipeline()
        .run_walk(scripted_walk(dir.path(), &rels, None), &CancelToken::new())
        .unwrap();
    assert_eq!(clean.files.len(), 3);
    assert_eq!(clean.metadata.total_count, 3);

    let failed = pipeline().run_walk(
        scripted_walk(dir.path(), &rels, Some(SimprintError::Walk("lib: permission denied".into()))),
        &CancelToken::new(),
    );
    assert!(matches!(failed, Err(SimprintError::Walk(msg)) if msg.contains("permission denied")));
}

#[test]
fn language_filter_limits_candidates() {
    let dir = sample_tree();
    let registry = Registry::builtin().unwrap().filter("go,unknown");
    let fp = Pipeline::new(registry, IgnoreMatcher::default(), Options::default())
        .run(dir.path())
        .unwrap();
    assert_eq!(fp.files.len(), 1);
    assert_eq!(fp.metadata.total_count, 1);
}

#[test]
fn pre_cancelled_run_reports_cancellation() {
    let dir = sample_tree();
    let token = CancelToken::new();
    token.cancel();
    let err = pipeline().run_with(dir.path(), &token).unwrap_err();
    assert!(matches!(err, SimprintError::Cancelled));
}

#[test]
fn cancellation_mid_run_returns_promptly() {
    let dir = TempDir::new().unwrap();
    let body = "fn f() {\n    let x = 1;\n}\n".repeat(200);
    for i in 0..400 {
        write(dir.path(), &format!("d{}/f{i}.rs", i % 10), &body);
    }

    let token = CancelToken::new();
    let remote = token.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(5));
        remote.cancel();
    });

    let start = Instant::now();
    let result = pipeline_with(Options {
        parallelism: 2,
        channel_capacity: 1,
        ..Options::default()
    })
    .run_with(dir.path(), &token);
    canceller.join().unwrap();

    assert!(start.elapsed() < Duration::from_secs(10));
    if let Err(e) = result {
        assert!(matches!(e, SimprintError::Cancelled));
    }
}

#[test]
fn zero_deadline_expires() {
    let dir = TempDir::new().unwrap();
    for i in 0..200 {
        write(dir.path(), &format!("f{i}.rs"), "fn f() {}\n");
    }
    let err = pipeline_with(Options {
        parallelism: 1,
        channel_capacity: 1,
        deadline: Some(Duration::ZERO),
        ..Options::default()
    })
    .run(dir.path())
    .unwrap_err();
    assert!(matches!(err, SimprintError::DeadlineExceeded(_)));
}

#[test]
fn document_survives_json() {
    let dir = sample_tree();
    let fp = pipeline().run(dir.path()).unwrap();
    let back = Fingerprint::from_json(&fp.to_json(true).unwrap()).unwrap();
    assert_eq!(back, fp);

    let value: serde_json::Value = serde_json::from_str(&fp.to_json(false).unwrap()).unwrap();
    assert!(value["metadata"]["totalFiles"].is_u64());
    assert_eq!(value["metadata"]["vendor"]["algoName"], "simhash");
    assert!(value["files"][0]["fingerprint"]["file"].is_string());
}

#[cfg(unix)]
#[test]
fn walk_failure_discards_the_batch() {
    use std::os::unix::fs::PermissionsExt;

    let dir = sample_tree();
    let locked = dir.path().join("locked");
    fs::create_dir(&locked).unwrap();
    write(&locked, "inner.rs", "fn i() {}\n");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Root ignores permission bits; nothing to test there.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = pipeline().run(dir.path());
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(SimprintError::Walk(_))));
}
