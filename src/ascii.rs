//! The ASCII patch codec: a line-oriented textual rendering of a diff bound
//! to its source, and the parser that reconstructs operations and metadata
//! from it.

use crate::{
    diffs::{starscream, Algorithm},
    errors::ParseError,
    metadata::{ApplicationType, Diff, Metadata},
    operation::Op,
    raw_operation::RawOperation,
    utils::lines::strip_terminator,
};

const RETAIN_PREFIX: &str = "📎";
const DELETE_PREFIX: &str = "❌";
const INSERT_PREFIX: &str = "✅";

/// Emits `diff` as an ASCII patch bound to `source`. Regenerates line-level
/// operations via `starscream::line_ops` regardless of which algorithm
/// originally produced `diff`'s character-level operations, since the codec
/// only ever represents whole lines.
pub fn emit_ascii(diff: &Diff, source: &str) -> String {
    let destination = match &diff.metadata {
        Some(metadata) => metadata.destination_content.clone(),
        None => crate::operation::apply(source, &diff.operations).unwrap_or_default(),
    };

    let blocks = starscream::line_ops(source, &destination);
    let mut lines = Vec::new();
    let mut last_line_had_terminator = false;

    for block in blocks {
        let (prefix, text) = match &block {
            RawOperation::Equal(_) => (RETAIN_PREFIX, block.get_original_text()),
            RawOperation::Delete(_) => (DELETE_PREFIX, block.get_original_text()),
            RawOperation::Insert(_) => (INSERT_PREFIX, block.get_original_text()),
        };

        for line in split_keep_ends(&text) {
            lines.push(format!("{prefix} {}", strip_terminator(line)));
            last_line_had_terminator = line.ends_with('\n');
        }
    }

    let mut ascii = lines.join("\n");
    if last_line_had_terminator {
        ascii.push('\n');
    }
    ascii
}

fn split_keep_ends(text: &str) -> Vec<&str> {
    crate::utils::lines::split_lines_keep_ends(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Classifier {
    Retain,
    Delete,
    Insert,
}

/// Parses an ASCII patch, recovering both the operation sequence and enough
/// metadata to apply, verify, or re-emit it.
pub fn parse_ascii(text: &str) -> Result<Diff, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyPatch);
    }

    // A trailing `\n` on the whole patch signals that the line it terminates
    // had a real line terminator in the original content (see emit_ascii);
    // strip it here so it isn't mistaken for a spurious trailing blank line.
    let last_line_had_terminator = text.ends_with('\n');
    let text = text.strip_suffix('\n').unwrap_or(text);

    let raw_lines: Vec<&str> = text.split('\n').collect();
    let mut classified = Vec::with_capacity(raw_lines.len());

    for (index, line) in raw_lines.iter().enumerate() {
        let line_number = index + 1;
        if line.is_empty() {
            classified.push((
                classified.last().map(|(c, _): &(Classifier, String)| *c).unwrap_or(Classifier::Retain),
                String::new(),
            ));
            continue;
        }

        let chars: Vec<char> = line.chars().collect();
        if chars.len() < 2 {
            return Err(ParseError::InvalidFormat {
                line_number,
                content: (*line).to_owned(),
            });
        }

        let prefix = chars[0].to_string();
        let classifier = match prefix.as_str() {
            "📎" | "=" => Classifier::Retain,
            "❌" | "-" => Classifier::Delete,
            "✅" | "+" => Classifier::Insert,
            other => {
                return Err(ParseError::InvalidPrefix {
                    line_number,
                    prefix: other.to_owned(),
                })
            }
        };

        if chars.get(1) != Some(&' ') {
            return Err(ParseError::InvalidFormat {
                line_number,
                content: (*line).to_owned(),
            });
        }

        let content: String = chars[2..].iter().collect();
        classified.push((classifier, content));
    }

    // Only the line that is truly last on a given side (source or
    // destination) can lack a terminator; every other line is necessarily
    // followed by more content on its side and always carries one. A shared
    // `Retain` line is last-on-both-sides only when it's also the last
    // classified entry overall, in which case the two sides trivially agree
    // (it's the same text), so checking `last_line_had_terminator` once is
    // enough even though it was derived from a single trailing `\n` bit.
    let last_source_index =
        classified.iter().rposition(|(c, _)| *c == Classifier::Retain || *c == Classifier::Delete);
    let last_destination_index =
        classified.iter().rposition(|(c, _)| *c == Classifier::Retain || *c == Classifier::Insert);

    let mut operations = Vec::new();
    let mut source_content = String::new();
    let mut destination_content = String::new();
    let mut source_start_line = None;
    let mut preceding_context = None;
    let mut following_context = String::new();

    let mut i = 0;
    while i < classified.len() {
        let (classifier, _) = &classified[i];
        let run_start = i;
        while i < classified.len() && classified[i].0 == *classifier {
            i += 1;
        }
        let run = &classified[run_start..i];

        let mut run_text = String::new();
        for (offset, (_, content)) in run.iter().enumerate() {
            let global_index = run_start + offset;
            run_text.push_str(content);

            let is_final_for_its_side = match classifier {
                Classifier::Retain => {
                    Some(global_index) == last_source_index && Some(global_index) == last_destination_index
                }
                Classifier::Delete => Some(global_index) == last_source_index,
                Classifier::Insert => Some(global_index) == last_destination_index,
            };
            if !is_final_for_its_side || last_line_had_terminator {
                run_text.push('\n');
            }
        }

        match classifier {
            Classifier::Retain => {
                let length = run_text.chars().count();
                if length > 0 {
                    operations.push(Op::Retain(length));
                }
                source_content.push_str(&run_text);
                destination_content.push_str(&run_text);
                if preceding_context.is_none() {
                    preceding_context = run.first().map(|(_, content)| content.clone());
                }
                following_context = run.last().map(|(_, content)| content.clone()).unwrap_or_default();
            }
            Classifier::Delete => {
                let length = run_text.chars().count();
                if length > 0 {
                    operations.push(Op::Delete(length));
                }
                source_content.push_str(&run_text);
                if source_start_line.is_none() {
                    source_start_line = Some(run_start);
                }
            }
            Classifier::Insert => {
                if !run_text.is_empty() {
                    operations.push(Op::Insert(run_text.clone()));
                }
                destination_content.push_str(&run_text);
                if source_start_line.is_none() {
                    source_start_line = Some(run_start);
                }
            }
        }
    }

    let source_total_lines = classified
        .iter()
        .filter(|(c, _)| *c == Classifier::Retain || *c == Classifier::Delete)
        .count();

    let diff_hash = crate::metadata::checksum(&operations);

    let metadata = Metadata {
        source_start_line: source_start_line.unwrap_or(0),
        source_total_lines,
        preceding_context: preceding_context.unwrap_or_default(),
        following_context,
        source_content,
        destination_content,
        algorithm_used: Algorithm::Megatron,
        diff_hash,
        application_type: ApplicationType::RequiresFullSource,
    };

    Ok(Diff { operations, metadata: Some(metadata) })
}
