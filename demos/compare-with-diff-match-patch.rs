use std::{env, fs, process};

use diff_match_patch_rs::{DiffMatchPatch, Efficient};
use reconcile_diff::{create, Algorithm};

/// Diffs two files with every generator in this crate and with
/// `diff-match-patch`, printing the operation count each produced. Useful
/// for eyeballing size trade-offs during development; not part of the test
/// suite.
///
/// Run it with:
/// `cargo run --example compare-with-diff-match-patch <old> <new>`
fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 3 {
        eprintln!("Usage: compare-with-diff-match-patch <old> <new>");
        process::exit(1);
    }

    let old_content = fs::read_to_string(&args[1]).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", args[1]);
        process::exit(1);
    });

    let new_content = fs::read_to_string(&args[2]).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {e}", args[2]);
        process::exit(1);
    });

    for algorithm in
        [Algorithm::Zoom, Algorithm::Flash, Algorithm::Starscream, Algorithm::Optimus, Algorithm::Megatron]
    {
        let diff = create(&old_content, &new_content, algorithm, None);
        println!("{algorithm}: {} operations", diff.operations.len());
    }

    let dmp = DiffMatchPatch::new();
    match dmp.diff_main::<Efficient>(&old_content, &new_content) {
        Ok(diffs) => println!("diff-match-patch: {} operations", diffs.len()),
        Err(error) => eprintln!("diff-match-patch failed: {error:?}"),
    }
}
