//! Locates a diff's captured source inside a larger document so the diff's
//! operations can be applied to a section of that document and spliced back.

use crate::{errors::ApplyError, metadata::Metadata, operation::apply};

/// Tunables for `locate_section`. Exposed rather than hard-coded since the
/// confidence threshold is a judgment call the scenario suite, not the
/// source material, pins down (see `DESIGN.md`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextLocatorConfig {
    pub threshold: f64,
}

impl Default for ContextLocatorConfig {
    fn default() -> Self { ContextLocatorConfig { threshold: 1.5 } }
}

struct Candidate {
    start: usize,
    end: usize,
    start_line: usize,
    score: f64,
}

/// Finds the unique sub-range of `document` corresponding to `metadata`'s
/// captured source, applies `diff`'s operations to it, and splices the
/// result back into the rest of `document`.
pub fn locate_and_apply(
    document: &str,
    metadata: &Metadata,
    operations: &[crate::operation::Op],
    config: &ContextLocatorConfig,
) -> Result<String, ApplyError> {
    if document == metadata.source_content {
        return apply(document, operations);
    }

    let candidates = find_candidates(document, metadata);
    let best = select_best(candidates, metadata, config)?;

    let prefix = &document[..best.start];
    let section = &document[best.start..best.end];
    let suffix = &document[best.end..];

    let replaced = apply(section, operations)?;
    Ok(format!("{prefix}{replaced}{suffix}"))
}

/// Scans `document` for line-aligned occurrences of the preceding and
/// following context anchors, scoring every `(start, end)` pair where an
/// occurrence of `preceding_context` opens a line before an occurrence of
/// `following_context` closes one.
fn find_candidates(document: &str, metadata: &Metadata) -> Vec<Candidate> {
    let preceding_starts = line_occurrences(document, &metadata.preceding_context);
    let following_ends = line_occurrences(document, &metadata.following_context);

    let mut candidates = Vec::new();
    for &(start, start_line) in &preceding_starts {
        for &(following_start, _) in &following_ends {
            let end = following_start + metadata.following_context.len();
            if end < start {
                continue;
            }
            candidates.push(Candidate {
                start,
                end,
                start_line,
                score: score(document, metadata, start, end, start_line),
            });
        }
    }
    candidates
}

/// Every byte offset at which `needle` occurs and opens a line, paired with
/// that line's 0-based index.
fn line_occurrences(document: &str, needle: &str) -> Vec<(usize, usize)> {
    if needle.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    let mut line_start = 0usize;
    let mut line_index = 0usize;

    for line in document.split_inclusive('\n') {
        if line.starts_with(needle) {
            results.push((line_start, line_index));
        }
        line_start += line.len();
        line_index += 1;
    }
    results
}

/// A pair of matched anchors is a baseline hit worth 1.0; the two bullets
/// from the locator algorithm layer additional confidence on top of that.
/// Without this baseline, a perfectly matched but hint-less two-line capture
/// (preceding and following context with no intermediate lines to compare)
/// could never clear a threshold above 1.0, which the truncated-application
/// scenario (source captured as a single context-anchor pair) requires it to.
const ANCHOR_MATCH_BASELINE: f64 = 1.0;

fn score(document: &str, metadata: &Metadata, start: usize, end: usize, start_line: usize) -> f64 {
    if end < start || end > document.len() {
        return f64::NEG_INFINITY;
    }

    let mut score = ANCHOR_MATCH_BASELINE;

    let hint_given = matches!(metadata.application_type, crate::metadata::ApplicationType::RequiresTruncatedSource);
    if hint_given && start_line == metadata.source_start_line {
        score += 1.0;
    }

    let captured_lines: Vec<&str> = metadata.source_content.split_inclusive('\n').collect();
    if captured_lines.len() >= 2 {
        let region = &document[start..end];
        let region_lines: Vec<&str> = region.split_inclusive('\n').collect();
        let intermediate = &captured_lines[1..captured_lines.len() - 1];
        if intermediate.is_empty() {
            // No intermediate lines to compare (a two-line capture: just the
            // two anchors). Weigh how plausible the candidate's span is by
            // comparing its length to the captured source's instead of
            // handing out a flat bonus regardless of region size.
            let region_len = region.len();
            let source_len = metadata.source_content.len();
            let longer = region_len.max(source_len).max(1);
            let delta = region_len.abs_diff(source_len);
            score += 1.0 - (delta as f64 / longer as f64);
        } else {
            let matching = intermediate
                .iter()
                .zip(region_lines.iter().skip(1))
                .filter(|(a, b)| a == b)
                .count();
            score += matching as f64 / intermediate.len() as f64;
        }
    }

    score
}

fn select_best(
    mut candidates: Vec<Candidate>,
    metadata: &Metadata,
    config: &ContextLocatorConfig,
) -> Result<Candidate, ApplyError> {
    candidates.retain(|c| c.score.is_finite() && c.score >= config.threshold);

    if candidates.is_empty() {
        return Err(ApplyError::SectionNotFound);
    }

    let best_score = candidates
        .iter()
        .map(|c| c.score)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut tied: Vec<Candidate> = candidates
        .into_iter()
        .filter(|c| (c.score - best_score).abs() < f64::EPSILON)
        .collect();

    if tied.len() == 1 {
        return Ok(tied.remove(0));
    }

    // Only break a tie by proximity to `source_start_line` when the caller
    // actually gave that hint; a bare default of 0 is not a hint, and using
    // it to prefer whichever tied candidate happens to sit closest to line 0
    // would silently resolve a genuine ambiguity instead of reporting it.
    let hint_given = metadata.source_start_line > 0;
    if hint_given {
        tied.sort_by_key(|c| c.start_line.abs_diff(metadata.source_start_line));
        let closest = tied[0].start_line.abs_diff(metadata.source_start_line);
        let closest_count = tied.iter().filter(|c| c.start_line.abs_diff(metadata.source_start_line) == closest).count();

        if closest_count == 1 {
            return Ok(tied.remove(0));
        }
        return Err(ApplyError::AmbiguousMatch { candidate_count: closest_count });
    }

    Err(ApplyError::AmbiguousMatch { candidate_count: tied.len() })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::diffs::Algorithm;
    use crate::metadata::Diff;

    #[test]
    fn test_truncated_application() {
        let document = "# Doc\n## Section A\nbody A\n## Section B\nbody B\n";
        let source = "## Section B\nbody B\n";
        let destination = "## Section B\nbody B updated\n";
        let diff = Diff::create(source, destination, Algorithm::Megatron, None);

        let result = locate_and_apply(
            document,
            diff.metadata.as_ref().unwrap(),
            &diff.operations,
            &ContextLocatorConfig::default(),
        )
        .unwrap();

        assert_eq!(result, "# Doc\n## Section A\nbody A\n## Section B\nbody B updated\n");
    }

    #[test]
    fn test_exact_match_applies_directly() {
        let source = "one\ntwo\n";
        let destination = "one\nthree\n";
        let diff = Diff::create(source, destination, Algorithm::Megatron, None);

        let result = locate_and_apply(
            source,
            diff.metadata.as_ref().unwrap(),
            &diff.operations,
            &ContextLocatorConfig::default(),
        )
        .unwrap();

        assert_eq!(result, destination);
    }

    #[test]
    fn test_disambiguates_via_following_context() {
        let document = "A\nfirst\nB\nA\nsecond\nC\n";
        let source = "A\nsecond\nC\n";
        let destination = "A\nupdated\nC\n";
        let diff = Diff::create(source, destination, Algorithm::Megatron, None);

        let result = locate_and_apply(
            document,
            diff.metadata.as_ref().unwrap(),
            &diff.operations,
            &ContextLocatorConfig::default(),
        )
        .unwrap();

        assert_eq!(result, "A\nfirst\nB\nA\nupdated\nC\n");
    }

    #[test]
    fn test_two_line_capture_picks_the_length_plausible_candidate() {
        // Regression test: "SEC" opens a line twice, but only the second
        // occurrence, paired with the unique "second" anchor, yields a span
        // whose length actually matches the captured source. The other
        // pairing spans the whole document and must not tie with it.
        let document = "SEC\nfirst\nSEC\nsecond\n";
        let source = "SEC\nsecond\n";
        let destination = "SEC\nupdated\n";
        let diff = Diff::create(source, destination, Algorithm::Megatron, None);

        let result = locate_and_apply(
            document,
            diff.metadata.as_ref().unwrap(),
            &diff.operations,
            &ContextLocatorConfig::default(),
        )
        .unwrap();

        assert_eq!(result, "SEC\nfirst\nSEC\nupdated\n");
    }

    #[test]
    fn test_fully_ambiguous_context_fails() {
        let document = "SEC\nbody\nSEC\nbody\n";
        let source = "SEC\nbody\n";
        let destination = "SEC\nchanged\n";
        let diff = Diff::create(source, destination, Algorithm::Megatron, None);

        let result = locate_and_apply(
            document,
            diff.metadata.as_ref().unwrap(),
            &diff.operations,
            &ContextLocatorConfig::default(),
        );

        assert!(matches!(result, Err(ApplyError::AmbiguousMatch { .. })));
    }

    #[test]
    fn test_no_match_fails() {
        let document = "totally unrelated document\n";
        let source = "## Section B\nbody B\n";
        let diff = Diff::create(source, "## Section B\nbody B updated\n", Algorithm::Megatron, None);

        let result = locate_and_apply(
            document,
            diff.metadata.as_ref().unwrap(),
            &diff.operations,
            &ContextLocatorConfig::default(),
        );

        assert!(matches!(result, Err(ApplyError::SectionNotFound)));
    }
}
