//! Heuristic cleanup of raw OCR text into a sectioned receipt block.

pub const HEADER: &str = "RECEIPT CONTENT:";
pub const FOOTER: &str = "END OF RECEIPT";
pub const NO_TEXT: &str = "No text extracted";
pub const NO_MEANINGFUL_TEXT: &str = "No meaningful text extracted from receipt";

const SEPARATOR_WIDTH: usize = 40;

/// A blank line follows any line containing one of these (case-insensitive).
const SECTION_KEYWORDS: [&str; 5] = ["total", "subtotal", "tax", "date", "time"];

/// Clean and structure OCR output for downstream parsing.
///
/// Lines are trimmed, whitespace runs collapsed, and noise dropped (single
/// characters and lines made only of `-`, `_`, `*`). Survivors are wrapped in
/// a fixed header and footer with a blank line after keyword lines, except
/// the last one.
pub fn clean_receipt_text(text: &str) -> String {
    if text.is_empty() {
        return NO_TEXT.to_string();
    }

    let lines = clean_lines(text);
    if lines.is_empty() {
        return NO_MEANINGFUL_TEXT.to_string();
    }

    let separator = "=".repeat(SEPARATOR_WIDTH);
    let mut out = String::new();
    out.push_str(HEADER);
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');

    let last = lines.len() - 1;
    for (i, line) in lines.iter().enumerate() {
        out.push_str(line);
        out.push('\n');
        if i < last && starts_section(line) {
            out.push('\n');
        }
    }

    out.push_str(&separator);
    out.push('\n');
    out.push_str(FOOTER);
    out
}

/// Trimmed, whitespace-collapsed lines with noise removed.
pub fn clean_lines(text: &str) -> Vec<String> {
    text.trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > 1)
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !is_symbol_noise(line))
        .collect()
}

fn is_symbol_noise(line: &str) -> bool {
    line.chars()
        .all(|c| matches!(c, '-' | '_' | '*') || c.is_whitespace())
}

fn starts_section(line: &str) -> bool {
    let lower = line.to_lowercase();
    SECTION_KEYWORDS.iter().any(|k| lower.contains(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sep() -> String {
        "=".repeat(40)
    }

    #[test]
    fn total_line_gets_trailing_blank() {
        let out = clean_receipt_text("Total $5.00\nThank you");
        let expected = format!(
            "RECEIPT CONTENT:\n{s}\nTotal $5.00\n\nThank you\n{s}\nEND OF RECEIPT",
            s = sep()
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn no_blank_after_last_line_even_with_keyword() {
        let out = clean_receipt_text("Coffee 3.50\nTOTAL 3.50");
        let expected = format!(
            "RECEIPT CONTENT:\n{s}\nCoffee 3.50\nTOTAL 3.50\n{s}\nEND OF RECEIPT",
            s = sep()
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn keyword_match_is_substring_and_case_insensitive() {
        let out = clean_receipt_text("Subtotal: 4.00\nSALES TAX 0.40\nDateTime 12/01\nBye now");
        assert!(out.contains("Subtotal: 4.00\n\nSALES TAX 0.40\n\nDateTime 12/01\n\nBye now\n"));
    }

    #[test]
    fn symbol_only_lines_dropped() {
        let lines = clean_lines("STORE\n----\n__**__\n- - -\nMilk 2.00");
        assert_eq!(lines, vec!["STORE", "Milk 2.00"]);
    }

    #[test]
    fn single_chars_and_blank_lines_dropped() {
        let lines = clean_lines("\n  \nA\n x \nOK\n\t\t\n");
        assert_eq!(lines, vec!["OK"]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        let lines = clean_lines("  Milk \t   2 x   1.00  ");
        assert_eq!(lines, vec!["Milk 2 x 1.00"]);
    }

    #[test]
    fn empty_input_has_dedicated_message() {
        assert_eq!(clean_receipt_text(""), NO_TEXT);
    }

    #[test]
    fn noise_only_input_has_fallback_message() {
        assert_eq!(clean_receipt_text("-\n----\n  \n*"), NO_MEANINGFUL_TEXT);
        assert_eq!(clean_receipt_text("   "), NO_MEANINGFUL_TEXT);
    }

    #[test]
    fn renormalizing_keeps_body_in_order() {
        let once = clean_receipt_text("ACME MART\nMilk   2.00\nTax 0.10\nTotal 2.10\nThanks!");
        let twice = clean_receipt_text(&once);

        let body: Vec<&str> = once.lines().filter(|l| !l.is_empty()).collect();
        let mut rest = twice.lines();
        for line in &body {
            assert!(rest.any(|l| l == *line), "missing {line:?} in {twice}");
        }
        assert!(twice.starts_with(HEADER));
        assert!(twice.ends_with(FOOTER));
    }

    #[test]
    fn deterministic() {
        let input = "WALMART\n01/15/2024 10:42\nTotal 12.00\nVISA";
        assert_eq!(clean_receipt_text(input), clean_receipt_text(input));
    }
}
