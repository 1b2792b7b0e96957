// Copyright 2025 Lablup Inc. and Jeongkyu Shin
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Narrowing several candidate targets down to one for an attached session.

use std::io::{BufRead, Write};

use crate::error::ExecError;
use crate::target::Target;
use crate::ui;

/// Prompt shown while waiting for a selection. Blank input picks entry 1.
pub const SELECTION_PROMPT: &str = "Login to [1]: ";

/// Resolve `candidates` to exactly one target.
///
/// A single candidate is returned as-is without any output. With more than
/// one, a table is written to `output` and `input` is read until it yields a
/// valid 1-based index (blank means 1). Invalid entries just repeat the
/// prompt. Fails with `NoTargets` for an empty list and `SelectionAborted`
/// when `input` reaches EOF.
pub fn select_target<R, W>(
    candidates: &[Target],
    mut input: R,
    mut output: W,
    use_colors: bool,
) -> Result<Target, ExecError>
where
    R: BufRead,
    W: Write,
{
    match candidates {
        [] => Err(ExecError::NoTargets),
        [only] => Ok(only.clone()),
        _ => {
            writeln!(output, "\nMultiple targets found:\n")?;
            write!(output, "{}", ui::selection_table(candidates, use_colors))?;
            writeln!(output)?;

            let mut line = String::new();
            loop {
                write!(output, "{SELECTION_PROMPT}")?;
                output.flush()?;

                line.clear();
                if input.read_line(&mut line)? == 0 {
                    return Err(ExecError::SelectionAborted);
                }

                if let Some(index) = parse_selection(&line, candidates.len()) {
                    let target = candidates[index].clone();
                    tracing::debug!("Selected {}", target);
                    return Ok(target);
                }
            }
        }
    }
}

/// Map operator input to a zero-based index into `count` candidates.
pub fn parse_selection(input: &str, count: usize) -> Option<usize> {
    let input = input.trim();
    if input.is_empty() {
        return (count > 0).then_some(0);
    }

    match input.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Some(n - 1),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_selection() {
        assert_eq!(parse_selection("\n", 3), Some(0));
        assert_eq!(parse_selection("  ", 3), Some(0));
        assert_eq!(parse_selection("1\n", 3), Some(0));
        assert_eq!(parse_selection(" 3 \n", 3), Some(2));
        assert_eq!(parse_selection("0", 3), None);
        assert_eq!(parse_selection("4", 3), None);
        assert_eq!(parse_selection("-1", 3), None);
        assert_eq!(parse_selection("abc", 3), None);
        assert_eq!(parse_selection("1.5", 3), None);
        assert_eq!(parse_selection("", 0), None);
    }

    #[test]
    fn test_single_candidate_skips_prompt() {
        let candidates = vec![Target::new("10.0.0.5")];
        let mut output = Vec::new();

        let selected = select_target(&candidates, &b""[..], &mut output, false).unwrap();

        assert_eq!(selected.address, "10.0.0.5");
        assert!(output.is_empty());
    }

    #[test]
    fn test_no_candidates() {
        let result = select_target(&[], &b"1\n"[..], Vec::new(), false);
        assert!(matches!(result, Err(ExecError::NoTargets)));
    }
}
