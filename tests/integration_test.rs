use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

fn chunkmatch_exe() -> &'static str {
    env!("CARGO_BIN_EXE_chunkmatch")
}

fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chunkmatch_{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn run(args: &[&str]) -> String {
    let output = Command::new(chunkmatch_exe())
        .args(args)
        .output()
        .expect("failed to run chunkmatch");
    assert!(
        output.status.success(),
        "chunkmatch failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_all_algorithms_agree_on_counts() {
    let dir = fixture_dir("algos_agree");
    // 19 normalized bytes -> 4 chunks of 4, trailing "fox" dropped. The
    // target holds "quic", "k br" and "own " but no "the ".
    let query = write_file(&dir, "query.txt", b"the quick brown fox");
    let target = write_file(&dir, "target.txt", b"a very quick brown dog runs");

    for algo in ["simple", "rk", "rk-batch"] {
        let stdout = run(&[
            "-t",
            algo,
            "-k",
            "4",
            query.to_str().unwrap(),
            target.to_str().unwrap(),
        ]);
        assert!(
            stdout.contains("matched: 3 out of 4"),
            "algo {algo} gave: {stdout}"
        );
    }
}

#[test]
fn test_normalization_before_matching() {
    let dir = fixture_dir("normalization");
    // Case and whitespace runs differ between the documents; normalization
    // folds both onto the same byte sequence.
    let query = write_file(&dir, "query.txt", b"The Quick Brown fox");
    let target = write_file(&dir, "target.txt", b"the\t\tQUICK   brown\nFOX jumps");

    let stdout = run(&[
        "-t",
        "rk-batch",
        "-k",
        "4",
        query.to_str().unwrap(),
        target.to_str().unwrap(),
    ]);
    assert!(
        stdout.contains("1.00 matched: 4 out of 4"),
        "got: {stdout}"
    );
}

#[test]
fn test_no_matches() {
    let dir = fixture_dir("no_matches");
    let query = write_file(&dir, "query.txt", b"abcdefgh");
    let target = write_file(&dir, "target.txt", b"zzzzzzzzzzzzzzzz");

    let stdout = run(&[
        "-t",
        "rk-batch",
        "-k",
        "4",
        query.to_str().unwrap(),
        target.to_str().unwrap(),
    ]);
    assert!(stdout.contains("0.00 matched: 0 out of 2"), "got: {stdout}");
}

#[test]
fn test_multiple_targets_one_line_each() {
    let dir = fixture_dir("multi_target");
    let query = write_file(&dir, "query.txt", b"needle");
    let hit = write_file(&dir, "hit.txt", b"a haystack with a needle inside");
    let miss = write_file(&dir, "miss.txt", b"just hay");

    let stdout = run(&[
        "-t",
        "rk",
        "-k",
        "6",
        query.to_str().unwrap(),
        hit.to_str().unwrap(),
        miss.to_str().unwrap(),
    ]);
    assert!(
        stdout.contains(&format!("{}: 1.00 matched: 1 out of 1", hit.display())),
        "got: {stdout}"
    );
    assert!(
        stdout.contains(&format!("{}: 0.00 matched: 0 out of 1", miss.display())),
        "got: {stdout}"
    );
}

#[test]
fn test_query_shorter_than_chunk() {
    let dir = fixture_dir("short_query");
    let query = write_file(&dir, "query.txt", b"tiny");
    let target = write_file(&dir, "target.txt", b"a longer target document");

    let stdout = run(&[
        "-t",
        "rk-batch",
        "-k",
        "100",
        query.to_str().unwrap(),
        target.to_str().unwrap(),
    ]);
    assert!(stdout.contains("matched: 0 out of 0"), "got: {stdout}");
}

#[test]
fn test_verbose_batch_dumps_bloom_bits() {
    let dir = fixture_dir("verbose_bloom");
    let query = write_file(&dir, "query.txt", b"the quick brown fox");
    let target = write_file(&dir, "target.txt", b"the quick brown fox");

    let args = [
        "-t",
        "rk-batch",
        "-k",
        "4",
        "--verbose",
        query.to_str().unwrap(),
        target.to_str().unwrap(),
    ];
    let stdout = run(&args);
    assert!(stdout.contains("bloom bits: "), "got: {stdout}");

    // The dump is deterministic for identical inputs.
    let again = run(&args);
    let dump_line = |s: &str| {
        s.lines()
            .find(|l| l.contains("bloom bits: "))
            .map(str::to_owned)
    };
    let first = dump_line(&stdout);
    assert!(first.is_some(), "no bloom dump line in: {stdout}");
    assert_eq!(first, dump_line(&again));
}

#[test]
fn test_custom_modulus() {
    let dir = fixture_dir("custom_modulus");
    let query = write_file(&dir, "query.txt", b"needle");
    let target = write_file(&dir, "target.txt", b"a haystack with a needle inside");

    let stdout = run(&[
        "-t",
        "rk",
        "-k",
        "6",
        "-q",
        "1000003",
        query.to_str().unwrap(),
        target.to_str().unwrap(),
    ]);
    assert!(stdout.contains("matched: 1 out of 1"), "got: {stdout}");
}
