//! Comment-driven suppression of findings.
//!
//! - `// errdrop:allow` silences findings on the same line.
//! - `// errdrop:allow-next-line` silences findings on the following line.
//! - `// errdrop:allow-start` ... `// errdrop:allow-end` silences a region.
//!
//! Each form accepts an optional `-- reason`.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static BLOCK_START: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*///?\s*errdrop:allow-start(?:\s*--\s*(.*))?\s*$")
        .expect("block start pattern is valid")
});

static BLOCK_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*///?\s*errdrop:allow-end\s*$").expect("block end pattern is valid")
});

static NEXT_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*///?\s*errdrop:allow-next-line(?:\s*--\s*(.*))?\s*$")
        .expect("next line pattern is valid")
});

static SAME_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"///?\s*errdrop:allow(?:\s*--\s*(.*))?\s*$").expect("line pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionBlock {
    pub start_line: usize,
    /// `None` for a block that is never closed; it runs to the end of the file.
    pub end_line: Option<usize>,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionRule {
    pub reason: Option<String>,
    pub applies_to_next_line: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SuppressionContext {
    pub blocks: Vec<SuppressionBlock>,
    pub line_suppressions: HashMap<usize, SuppressionRule>,
}

impl SuppressionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suppressed(&self, line: usize) -> bool {
        [
            self.is_in_block(line),
            self.has_line_suppression(line),
            self.has_next_line_suppression(line),
        ]
        .into_iter()
        .any(|suppressed| suppressed)
    }

    pub fn unclosed_blocks(&self) -> impl Iterator<Item = &SuppressionBlock> {
        self.blocks.iter().filter(|block| block.end_line.is_none())
    }

    fn is_in_block(&self, line: usize) -> bool {
        self.blocks
            .iter()
            .any(|block| line >= block.start_line && block.end_line.is_none_or(|end| line <= end))
    }

    fn has_line_suppression(&self, line: usize) -> bool {
        self.line_suppressions
            .get(&line)
            .is_some_and(|rule| !rule.applies_to_next_line)
    }

    fn has_next_line_suppression(&self, line: usize) -> bool {
        (line > 0)
            .then(|| self.line_suppressions.get(&(line - 1)))
            .flatten()
            .is_some_and(|rule| rule.applies_to_next_line)
    }
}

enum LineParseResult {
    BlockStart(Option<String>),
    BlockEnd,
    NextLine(Option<String>),
    SameLine(Option<String>),
    None,
}

fn reason(captures: regex::Captures<'_>) -> Option<String> {
    captures
        .get(1)
        .map(|m| m.as_str().trim().to_string())
        .filter(|reason| !reason.is_empty())
}

fn parse_line(line: &str) -> LineParseResult {
    if let Some(captures) = BLOCK_START.captures(line) {
        return LineParseResult::BlockStart(reason(captures));
    }
    if BLOCK_END.is_match(line) {
        return LineParseResult::BlockEnd;
    }
    if let Some(captures) = NEXT_LINE.captures(line) {
        return LineParseResult::NextLine(reason(captures));
    }
    if let Some(captures) = SAME_LINE.captures(line) {
        return LineParseResult::SameLine(reason(captures));
    }
    LineParseResult::None
}

pub fn parse_suppression_comments(content: &str) -> SuppressionContext {
    let mut context = SuppressionContext::new();
    let mut open_blocks: Vec<(usize, Option<String>)> = Vec::new();

    for (line_number, line) in content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
    {
        match parse_line(line) {
            LineParseResult::BlockStart(reason) => open_blocks.push((line_number, reason)),
            LineParseResult::BlockEnd => {
                if let Some((start_line, reason)) = open_blocks.pop() {
                    context.blocks.push(SuppressionBlock {
                        start_line,
                        end_line: Some(line_number),
                        reason,
                    });
                }
            }
            LineParseResult::NextLine(reason) => {
                context.line_suppressions.insert(
                    line_number,
                    SuppressionRule {
                        reason,
                        applies_to_next_line: true,
                    },
                );
            }
            LineParseResult::SameLine(reason) => {
                context.line_suppressions.insert(
                    line_number,
                    SuppressionRule {
                        reason,
                        applies_to_next_line: false,
                    },
                );
            }
            LineParseResult::None => {}
        }
    }

    context
        .blocks
        .extend(open_blocks.into_iter().map(|(start_line, reason)| SuppressionBlock {
            start_line,
            end_line: None,
            reason,
        }));

    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_same_line_suppression() {
        let context = parse_suppression_comments(indoc! {"
            match r {
                Err(_) => {} // errdrop:allow -- retried by caller
            }
        "});
        assert!(context.is_suppressed(2));
        assert!(!context.is_suppressed(3));
        assert_eq!(
            context.line_suppressions[&2].reason.as_deref(),
            Some("retried by caller")
        );
    }

    #[test]
    fn test_next_line_suppression() {
        let context = parse_suppression_comments(indoc! {"
            // errdrop:allow-next-line
            Err(_) => {}
            Err(_) => {}
        "});
        assert!(!context.is_suppressed(1));
        assert!(context.is_suppressed(2));
        assert!(!context.is_suppressed(3));
    }

    #[test]
    fn test_block_suppression() {
        let context = parse_suppression_comments(indoc! {"
            fn a() {}
            // errdrop:allow-start -- generated bindings
            fn b() {}
            // errdrop:allow-end
            fn c() {}
        "});
        assert!(!context.is_suppressed(1));
        assert!(context.is_suppressed(3));
        assert!(!context.is_suppressed(5));
        assert_eq!(context.unclosed_blocks().count(), 0);
        assert_eq!(context.blocks[0].reason.as_deref(), Some("generated bindings"));
    }

    #[test]
    fn test_unclosed_block_runs_to_end_of_file() {
        let context = parse_suppression_comments(indoc! {"
            fn a() {}
            // errdrop:allow-start
            fn b() {}
        "});
        assert!(context.is_suppressed(3));
        assert!(context.is_suppressed(300));
        assert!(!context.is_suppressed(1));
        assert_eq!(context.unclosed_blocks().count(), 1);
    }

    #[test]
    fn test_markers_do_not_match_each_other() {
        let context = parse_suppression_comments("// errdrop:allow-start\n");
        assert!(context.line_suppressions.is_empty());

        let context = parse_suppression_comments("// errdrop:allowance\n");
        assert!(context.line_suppressions.is_empty());
        assert!(context.blocks.is_empty());
    }
}
