use pretty_assertions::assert_eq;
use reconcile_diff::{apply, create, emit_ascii, make_undo, parse_ascii, verify, verify_full, Algorithm};

#[test]
fn test_s1_simple_substitution() {
    let source = "Hello, world!";
    let destination = "Hello, Swift!";

    let diff = create(source, destination, Algorithm::Zoom, None);
    assert_eq!(apply(source, &diff).unwrap(), destination);
    assert!(verify(&diff));

    let again = create(source, destination, Algorithm::Zoom, None);
    assert_eq!(diff.metadata.unwrap().diff_hash, again.metadata.unwrap().diff_hash);
}

#[test]
fn test_s2_pure_insertion() {
    let diff = create("", "new line\n", Algorithm::Megatron, None);
    assert_eq!(apply("", &diff).unwrap(), "new line\n");
}

#[test]
fn test_s3_pure_deletion() {
    let diff = create("doomed", "", Algorithm::Megatron, None);
    assert_eq!(apply("doomed", &diff).unwrap(), "");
}

#[test]
fn test_s4_line_replacement_ascii_round_trip() {
    let source = "func greet() {\n    print(\"Hello\")\n}\n";
    let destination = "func greet() {\n    print(\"Hello, World!\")\n}\n";

    let diff = create(source, destination, Algorithm::Megatron, None);
    let ascii = emit_ascii(&diff, source);
    assert_eq!(
        ascii,
        "📎 func greet() {\n❌     print(\"Hello\")\n✅     print(\"Hello, World!\")\n📎 }\n"
    );

    let parsed = parse_ascii(&ascii).unwrap();
    assert_eq!(apply(source, &parsed).unwrap(), destination);
}

#[test]
fn test_s5_truncated_application() {
    let document = "# Doc\n## Section A\nbody A\n## Section B\nbody B\n";
    let section = "## Section B\nbody B";
    let diff = create(section, "## Section B\nbody B updated", Algorithm::Megatron, None);

    assert_eq!(
        apply(document, &diff).unwrap(),
        "# Doc\n## Section A\nbody A\n## Section B\nbody B updated\n"
    );
}

#[test]
fn test_s6_ambiguous_context_disambiguated_by_following_line() {
    let document = "SEC\nfirst\nSEC\nsecond\n";
    let section = "SEC\nsecond\n";
    let diff = create(section, "SEC\nupdated\n", Algorithm::Megatron, None);

    assert_eq!(apply(document, &diff).unwrap(), "SEC\nfirst\nSEC\nupdated\n");
}

#[test]
fn test_undo_round_trips_through_the_facade() {
    let source = "one\ntwo\nthree\n";
    let destination = "one\nTWO\nthree\n";

    let diff = create(source, destination, Algorithm::Megatron, None);
    let applied = apply(source, &diff).unwrap();
    assert_eq!(applied, destination);

    let undo = make_undo(&diff).unwrap();
    assert_eq!(apply(&applied, &undo).unwrap(), source);
}

#[test]
fn test_verify_full_detects_tampering() {
    let mut diff = create("abc", "abd", Algorithm::Zoom, None);
    assert!(verify_full(&diff));

    if let Some(metadata) = diff.metadata.as_mut() {
        metadata.destination_content = "tampered".to_owned();
    }
    assert!(!verify_full(&diff));
}

#[test]
fn test_all_algorithms_round_trip_through_the_facade() {
    let cases = [
        ("Hello, world!", "Hello, Swift!"),
        ("", "new line\n"),
        ("doomed", ""),
        ("a\nb\nc\nd\n", "a\nx\ny\nd\n"),
    ];

    for (source, destination) in cases {
        for algorithm in
            [Algorithm::Zoom, Algorithm::Flash, Algorithm::Starscream, Algorithm::Optimus, Algorithm::Megatron]
        {
            let diff = create(source, destination, algorithm, None);
            assert_eq!(apply(source, &diff).unwrap(), destination);
            assert!(verify(&diff));
        }
    }
}
