//! Input trace parsing: the one external collaborator the core spec
//! treats as "trivial glue" but a complete crate still has to implement.
//!
//! Format, one record per line: `<tag> <R|W> <hex-address>`. The tag is
//! arbitrary and ignored. `R` means Read; any other token (conventionally
//! `W`) means Write. The address is a hexadecimal virtual address; it is
//! shifted right by 12 bits to get a raw page number, and the set of
//! distinct raw page numbers across the whole trace is compacted into
//! `[0, N)`, preserving ascending numeric order — this is exactly what
//! `original_source/parser.h`'s `sort` + `unique` + index map does.

use std::io::BufRead;

use crate::error::SimError;
use crate::trace::{AccessHistory, Operation, PageAccess};

const PAGE_SHIFT: u32 = 12;

/// The compacted result of parsing one trace: the access history (with
/// page numbers already remapped into `[0, N)`) and `N` itself.
#[derive(Debug)]
pub struct ParsedTrace {
    pub access_history: AccessHistory,
    pub total_page_count: usize,
}

/// Parse a full trace from `reader`, one record per line.
///
/// Blank lines are skipped. Any other malformed line (too few tokens, or
/// an address token that isn't valid hexadecimal) is rejected with
/// [`SimError::InputParse`] naming the 1-based line number.
pub fn parse_access_trace<R: BufRead>(reader: R) -> Result<ParsedTrace, SimError> {
    let mut raw_pages: Vec<u64> = Vec::new();
    let mut ops: Vec<Operation> = Vec::new();

    for (zero_based, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| SimError::InputParse {
            line: zero_based + 1,
            text: format!("<io error: {e}>"),
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut tokens = trimmed.split_whitespace();
        let _tag = tokens.next();
        let op_token = tokens.next();
        let addr_token = tokens.next();

        let (op_token, addr_token) = match (op_token, addr_token) {
            (Some(o), Some(a)) => (o, a),
            _ => {
                return Err(SimError::InputParse { line: zero_based + 1, text: line });
            }
        };

        let op = if op_token == "R" { Operation::Read } else { Operation::Write };

        let hex_digits = addr_token.strip_prefix("0x").or_else(|| addr_token.strip_prefix("0X")).unwrap_or(addr_token);
        let addr = u64::from_str_radix(hex_digits, 16)
            .map_err(|_| SimError::InputParse { line: zero_based + 1, text: line.clone() })?;

        raw_pages.push(addr >> PAGE_SHIFT);
        ops.push(op);
    }

    let mut distinct: Vec<u64> = raw_pages.clone();
    distinct.sort_unstable();
    distinct.dedup();

    let index_of: std::collections::HashMap<u64, usize> =
        distinct.iter().enumerate().map(|(i, &page)| (page, i)).collect();

    let access_history = AccessHistory::new(
        raw_pages
            .into_iter()
            .zip(ops)
            .map(|(raw, op)| PageAccess { page_index: index_of[&raw], op })
            .collect(),
    );

    Ok(ParsedTrace { access_history, total_page_count: distinct.len() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compacts_pages_preserving_ascending_order() {
        // Addresses 0x4000, 0x1000, 0x4000 -> raw pages 4, 1, 4 -> compacted {1:0, 4:1}.
        let input = "t0 R 1000\nt1 W 4000\nt2 R 4000\n";
        let parsed = parse_access_trace(input.as_bytes()).unwrap();
        assert_eq!(parsed.total_page_count, 2);
        assert_eq!(parsed.access_history.len(), 3);
    }

    #[test]
    fn unknown_op_token_is_treated_as_write() {
        let input = "t0 X 1000\n";
        let parsed = parse_access_trace(input.as_bytes()).unwrap();
        assert_eq!(parsed.access_history.len(), 1);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let input = "t0 R 1000\n\n\nt1 W 2000\n";
        let parsed = parse_access_trace(input.as_bytes()).unwrap();
        assert_eq!(parsed.total_page_count, 2);
    }

    #[test]
    fn malformed_line_reports_its_line_number() {
        let input = "t0 R 1000\nbroken\n";
        let err = parse_access_trace(input.as_bytes()).unwrap_err();
        match err {
            SimError::InputParse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected InputParse, got {other:?}"),
        }
    }

    #[test]
    fn non_hex_address_is_rejected() {
        let input = "t0 R zzzz\n";
        assert!(parse_access_trace(input.as_bytes()).is_err());
    }

    #[test]
    fn accepts_0x_prefixed_addresses() {
        let input = "t0 R 0x1000\n";
        let parsed = parse_access_trace(input.as_bytes()).unwrap();
        assert_eq!(parsed.total_page_count, 1);
    }
}
