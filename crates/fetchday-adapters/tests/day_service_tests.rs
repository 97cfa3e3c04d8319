//! End-to-end runs of the core services over the in-memory adapters.

use std::path::{Path, PathBuf};

use fetchday_adapters::{
    AesGcmCipher, InMemoryStore, MemoryFilesystem, SimpleRenderer, StaticPuzzleSource,
};
use fetchday_core::{
    application::{DataOutcome, InstructionsSource},
    domain::{Day, Lang, PuzzleId, Year},
    prelude::*,
};

const KEY: &str = "0123456789abcdef0123456789abcdef";

const PAGE: &str = r#"<!DOCTYPE html>
<html><body><main>
<article class="day-desc"><h2>--- Day 2: Rock Paper Scissors ---</h2><p>The Elves begin to set up camp on the beach.</p>
<pre><code>A Y
B X
C Z
</code></pre>
<p>What would your total score be? Follow the <em>strategy guide</em>.</p>
</article>
</main></body></html>"#;

fn puzzle() -> PuzzleId {
    PuzzleId::new(Year::new(2022).unwrap(), Day::new(2).unwrap())
}

fn service(fs: &MemoryFilesystem, source: &StaticPuzzleSource) -> DayService {
    DayService::new(
        Box::new(fs.clone()),
        Box::new(source.clone()),
        Some(Box::new(AesGcmCipher::from_text(KEY).unwrap())),
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(SimpleRenderer::new()),
        WorkspacePaths::new("/aoc"),
    )
}

fn source() -> StaticPuzzleSource {
    StaticPuzzleSource::new()
        .with_instructions(puzzle(), PAGE)
        .with_input(puzzle(), "A Y\nB X\nC Z\n")
}

#[test]
fn full_run_writes_data_readmes_and_stubs() {
    let fs = MemoryFilesystem::new();
    let source = source();

    let report = service(&fs, &source)
        .run(&FetchOptions::new(puzzle(), Lang::ALL))
        .unwrap();

    assert!(matches!(report.data, DataOutcome::Downloaded { .. }));
    assert_eq!(report.instructions, InstructionsSource::Remote);
    assert_eq!(report.readmes.len(), 3);
    assert_eq!(report.stubs.len(), 3);

    assert_eq!(
        fs.read_file(Path::new("/aoc/data/day_02.txt")).as_deref(),
        Some("A Y\nB X\nC Z\n")
    );

    let readme = fs.read_file(Path::new("/aoc/rs/day_02/README.md")).unwrap();
    assert!(readme.starts_with(
        "# [--- Day 2: Rock Paper Scissors ---](https://adventofcode.com/2022/day/2)"
    ));
    assert!(readme.contains("<pre><code>A Y\nB X\nC Z\n</code></pre>"));
    assert!(readme.contains("Follow the **strategy guide**."));

    for path in [
        "/aoc/go/day_02/main.go",
        "/aoc/go/day_02/main_test.go",
        "/aoc/rs/day_02/Cargo.toml",
        "/aoc/rs/day_02/src/lib.rs",
        "/aoc/rs/day_02/src/bin/day_02.rs",
        "/aoc/rs/day_02/benches/bench.rs",
        "/aoc/ts/day_02/main.ts",
        "/aoc/ts/day_02/day.ts",
        "/aoc/ts/day_02/day.test.ts",
        "/aoc/ts/day_02/day.bench.ts",
    ] {
        let content = fs
            .read_file(Path::new(path))
            .unwrap_or_else(|| panic!("{path} was not written"));
        assert!(!content.contains("{{"), "{path} kept a marker");
        assert!(content.ends_with('\n') && !content.ends_with("\n\n"), "{path}");
    }

    assert!(!fs.exists(Path::new("/aoc/instructions.html")));
}

#[test]
fn rendered_stubs_keep_placeholder_bodies() {
    let fs = MemoryFilesystem::new();
    service(&fs, &source())
        .run(&FetchOptions::new(puzzle(), [Lang::Go, Lang::Rs]))
        .unwrap();

    let go = fs.read_file(Path::new("/aoc/go/day_02/main.go")).unwrap();
    assert!(go.contains("filepath.Join(dir, \"day_02.txt\")"));
    assert_eq!(go.matches("panic(\"todo\")").count(), 3);

    let lib = fs.read_file(Path::new("/aoc/rs/day_02/src/lib.rs")).unwrap();
    assert!(lib.contains("join(\"day_02.txt\")"));
    assert!(lib.contains("mod day_02_tests {"));
    assert!(lib.contains("todo!()"));

    let bench = fs
        .read_file(Path::new("/aoc/rs/day_02/benches/bench.rs"))
        .unwrap();
    assert!(bench.contains("benchmark_group(\"Day 02\")"));
    assert!(bench.contains("use day_02::{read_data, Input, PART_1, PART_2};"));
}

#[test]
fn encrypted_copy_decrypts_to_the_input() {
    let fs = MemoryFilesystem::new();
    service(&fs, &source())
        .run(&FetchOptions::new(puzzle(), [Lang::Rs]))
        .unwrap();

    fs.remove_file(Path::new("/aoc/data/day_02.txt")).unwrap();

    let decrypt = DecryptService::new(
        Box::new(fs.clone()),
        Box::new(AesGcmCipher::from_text(KEY).unwrap()),
        "/aoc/data",
    );
    let written = decrypt.decrypt_all().unwrap();

    assert_eq!(written, vec![PathBuf::from("/aoc/data/day_02.txt")]);
    assert_eq!(
        fs.read_file(Path::new("/aoc/data/day_02.txt")).as_deref(),
        Some("A Y\nB X\nC Z\n")
    );
}

#[test]
fn decrypt_with_another_key_fails() {
    let fs = MemoryFilesystem::new();
    service(&fs, &source())
        .run(&FetchOptions::new(puzzle(), [Lang::Rs]))
        .unwrap();

    let decrypt = DecryptService::new(
        Box::new(fs.clone()),
        Box::new(AesGcmCipher::from_text("fedcba9876543210fedcba9876543210").unwrap()),
        "/aoc/data",
    );

    assert!(decrypt.decrypt_all().is_err());
}

#[test]
fn rerun_keeps_existing_stubs_and_data() {
    let fs = MemoryFilesystem::new();
    let source = source();
    let svc = service(&fs, &source);
    let options = FetchOptions::new(puzzle(), [Lang::Go]);

    svc.run(&options).unwrap();
    fs.write_file(Path::new("/aoc/go/day_02/main.go"), b"// solved\n")
        .unwrap();

    let report = svc.run(&options).unwrap();

    assert!(matches!(report.data, DataOutcome::AlreadyPresent(_)));
    assert_eq!(report.stubs[0].written.len(), 0);
    assert_eq!(report.stubs[0].skipped.len(), 2);
    assert_eq!(
        fs.read_file(Path::new("/aoc/go/day_02/main.go")).as_deref(),
        Some("// solved\n")
    );
    assert_eq!(
        source
            .requests()
            .iter()
            .filter(|path| path.ends_with("/input"))
            .count(),
        1
    );
}

#[test]
fn overwrite_replaces_existing_stubs() {
    let fs = MemoryFilesystem::new()
        .with_file("/aoc/go/day_02/main.go", "// solved\n")
        .with_file("/aoc/data/day_02.txt", "A Y\n");

    let mut options = FetchOptions::new(puzzle(), [Lang::Go]);
    options.overwrite = true;
    service(&fs, &source()).run(&options).unwrap();

    let main = fs.read_file(Path::new("/aoc/go/day_02/main.go")).unwrap();
    assert!(main.starts_with("package main"));
}

#[test]
fn part_two_refreshes_readmes_only() {
    let fs = MemoryFilesystem::new().with_file("/aoc/instructions.html", "<p>stale</p>");
    let source = source();

    let options = FetchOptions::new(puzzle(), [Lang::Ts]).part_two();
    let report = service(&fs, &source).run(&options).unwrap();

    assert_eq!(report.data, DataOutcome::Skipped);
    assert_eq!(report.instructions, InstructionsSource::Remote);
    assert!(report.stubs.is_empty());
    assert_eq!(source.requests(), vec!["/2022/day/2".to_string()]);
    assert!(fs.exists(Path::new("/aoc/ts/day_02/README.md")));
    assert!(!fs.exists(Path::new("/aoc/ts/day_02/day.ts")));
    assert!(!fs.exists(Path::new("/aoc/instructions.html")));
}

#[test]
fn unpublished_puzzle_is_reported() {
    let fs = MemoryFilesystem::new();
    let err = service(&fs, &StaticPuzzleSource::new())
        .run(&FetchOptions::new(puzzle(), [Lang::Go]))
        .unwrap_err();

    assert_eq!(err.category(), fetchday_core::error::ErrorCategory::NotFound);
}
