use std::{env, fs, process};

use reconcile_diff::{Algorithm, create, emit_ascii};

/// Diffs two files and prints the result as an ASCII patch bound to the
/// first file's content.
///
/// Run it with:
/// `cargo run --example diff-file <old> <new> [algorithm]`
fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 || args.len() > 4 {
        eprintln!("Usage: diff-file <old> <new> [zoom|flash|starscream|optimus|megatron]");
        process::exit(1);
    }

    let old_file = &args[1];
    let new_file = &args[2];
    let algorithm = match args.get(3).map(String::as_str) {
        None => Algorithm::Megatron,
        Some("zoom") => Algorithm::Zoom,
        Some("flash") => Algorithm::Flash,
        Some("starscream") => Algorithm::Starscream,
        Some("optimus") => Algorithm::Optimus,
        Some("megatron") => Algorithm::Megatron,
        Some(other) => {
            eprintln!("Unknown algorithm: {other}");
            process::exit(1);
        }
    };

    let old_content = fs::read_to_string(old_file).unwrap_or_else(|e| {
        eprintln!("Error reading {old_file}: {e}");
        process::exit(1);
    });

    let new_content = fs::read_to_string(new_file).unwrap_or_else(|e| {
        eprintln!("Error reading {new_file}: {e}");
        process::exit(1);
    });

    let diff = create(&old_content, &new_content, algorithm, None);
    if let Some(metadata) = &diff.metadata {
        eprintln!("algorithm used: {}", metadata.algorithm_used);
    }

    print!("{}", emit_ascii(&diff, &old_content));
}
