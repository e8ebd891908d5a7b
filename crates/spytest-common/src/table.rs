//! Parsing of tabular CLI show output.
//!
//! Both CLI shells print show results as fixed-width tables: a header row,
//! a separator row of dash runs, then one data row per entry. Column spans
//! are derived from the separator row, so multi-word headers and values
//! survive intact. Cells that are empty after trimming are omitted from
//! the row entirely -- an absent field stays absent.
//!
//! ```text
//! Interface    Lanes    Speed    MTU    Alias         Oper    Admin
//! -----------  -------  -------  -----  ------------  ------  -------
//! Ethernet0    65,66    100G     9100   Eth1/1        up      up
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Two or more spaces, used as the column split in the fallback path.
static COLUMN_GAP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("Invalid regex pattern"));

/// One parsed row: ordered (normalized header, trimmed value) pairs.
pub type TableRow = Vec<(String, String)>;

/// Normalizes a column header to the flat property-name form.
///
/// Lowercases, collapses whitespace/dashes/dots into underscores:
/// `"Asym PFC"` becomes `asym_pfc`, `"Alternate Name"` becomes
/// `alternate_name`.
pub fn normalize_header(header: &str) -> String {
    let mut out = String::with_capacity(header.len());
    let mut last_sep = true;
    for c in header.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_sep = false;
        } else if !last_sep {
            out.push('_');
            last_sep = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Returns true for a separator row (dash runs, optionally `+` joints).
fn is_separator(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty()
        && trimmed.contains('-')
        && trimmed.chars().all(|c| c == '-' || c == '+' || c == ' ')
}

/// Column spans (start, end) taken from the dash runs of a separator row.
fn column_spans(separator: &str) -> Vec<(usize, usize)> {
    let chars: Vec<char> = separator.chars().collect();
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in chars.iter().enumerate() {
        if *c == '-' || *c == '+' {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            spans.push((s, i));
        }
    }
    if let Some(s) = start {
        spans.push((s, chars.len()));
    }
    spans
}

/// Slices one cell out of a row by column index range.
///
/// The cell extends from the start of its own dash run to the start of
/// the next one, so left-aligned values wider than the run are kept.
fn slice_cell(line: &[char], start: usize, next_start: Option<usize>) -> String {
    let end = next_start.unwrap_or(line.len()).min(line.len());
    if start >= end {
        return String::new();
    }
    line[start..end].iter().collect::<String>().trim().to_string()
}

/// Parses captured show output into ordered rows.
///
/// Rows follow device/report order. Returns an empty vector (never an
/// error) when the output contains no table; a device that printed
/// nothing matched nothing.
pub fn parse_show_output(raw: &str) -> Vec<TableRow> {
    let lines: Vec<&str> = raw.lines().collect();

    let sep_idx = lines.iter().position(|l| is_separator(l));
    match sep_idx {
        Some(idx) if idx > 0 => parse_fixed_width(&lines, idx),
        _ => {
            tracing::trace!("no separator row, splitting on column gaps");
            parse_whitespace_split(&lines)
        }
    }
}

fn parse_fixed_width(lines: &[&str], sep_idx: usize) -> Vec<TableRow> {
    let header_idx = match lines[..sep_idx].iter().rposition(|l| !l.trim().is_empty()) {
        Some(i) => i,
        None => return Vec::new(),
    };
    let spans = column_spans(lines[sep_idx]);
    if spans.is_empty() {
        return Vec::new();
    }

    let header_chars: Vec<char> = lines[header_idx].chars().collect();
    let headers: Vec<String> = spans
        .iter()
        .enumerate()
        .map(|(i, (start, _))| {
            let next = spans.get(i + 1).map(|(s, _)| *s);
            normalize_header(&slice_cell(&header_chars, *start, next))
        })
        .collect();

    let mut rows = Vec::new();
    for line in &lines[sep_idx + 1..] {
        if line.trim().is_empty() || is_separator(line) {
            continue;
        }
        let chars: Vec<char> = line.chars().collect();
        let mut row = TableRow::new();
        for (i, (start, _)) in spans.iter().enumerate() {
            let next = spans.get(i + 1).map(|(s, _)| *s);
            let value = slice_cell(&chars, *start, next);
            if !value.is_empty() && !headers[i].is_empty() {
                row.push((headers[i].clone(), value));
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    rows
}

/// Fallback for output with no separator row: the first non-empty line is
/// the header, columns split on runs of two or more spaces.
fn parse_whitespace_split(lines: &[&str]) -> Vec<TableRow> {
    let mut iter = lines.iter().filter(|l| !l.trim().is_empty());
    let header_line = match iter.next() {
        Some(l) => l,
        None => return Vec::new(),
    };
    let headers: Vec<String> = COLUMN_GAP_RE
        .split(header_line.trim())
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for line in iter {
        let cells: Vec<&str> = COLUMN_GAP_RE.split(line.trim()).collect();
        let mut row = TableRow::new();
        for (header, value) in headers.iter().zip(cells.iter()) {
            let value = value.trim();
            if !value.is_empty() && !header.is_empty() {
                row.push((header.clone(), value.to_string()));
            }
        }
        if !row.is_empty() {
            rows.push(row);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STATUS_TABLE: &str = "\
  Interface    Lanes    Speed    MTU    Alias      Vlan    Oper    Admin
-----------  -------  -------  -----  ---------  ------  ------  -------
  Ethernet0    65,66     100G   9100  Eth1/1      trunk      up       up
  Ethernet4       69      25G   9100  Eth1/2     routed    down     down
";

    #[test]
    fn test_parse_status_table() {
        let rows = parse_show_output(STATUS_TABLE);
        assert_eq!(rows.len(), 2);
        let first = &rows[0];
        assert_eq!(first[0], ("interface".to_string(), "Ethernet0".to_string()));
        assert!(first.contains(&("speed".to_string(), "100G".to_string())));
        assert!(first.contains(&("admin".to_string(), "up".to_string())));
        assert!(rows[1].contains(&("oper".to_string(), "down".to_string())));
    }

    #[test]
    fn test_rows_follow_report_order() {
        let rows = parse_show_output(STATUS_TABLE);
        let names: Vec<&str> = rows
            .iter()
            .map(|r| r.iter().find(|(h, _)| h == "interface").unwrap().1.as_str())
            .collect();
        assert_eq!(names, vec!["Ethernet0", "Ethernet4"]);
    }

    #[test]
    fn test_empty_cell_is_absent() {
        let raw = "\
Name         Description    Admin
-----------  -------------  -------
Ethernet0                   up
Ethernet4    uplink         down
";
        let rows = parse_show_output(raw);
        assert!(!rows[0].iter().any(|(h, _)| h == "description"));
        assert!(rows[1]
            .contains(&("description".to_string(), "uplink".to_string())));
    }

    #[test]
    fn test_multi_word_headers() {
        let raw = "\
Name       AutoNeg Mode    Alternate Name
---------  --------------  ----------------
Ethernet0  off             Eth1/1
";
        let rows = parse_show_output(raw);
        assert!(rows[0].contains(&("autoneg_mode".to_string(), "off".to_string())));
        assert!(rows[0].contains(&("alternate_name".to_string(), "Eth1/1".to_string())));
    }

    #[test]
    fn test_whitespace_fallback() {
        let raw = "\
mode
standard
";
        let rows = parse_show_output(raw);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], ("mode".to_string(), "standard".to_string()));
    }

    #[test]
    fn test_counter_values_preserved_verbatim() {
        let raw = "    IFACE    STATE    RX_OK        RX_BPS    RX_UTIL
---------  -------  -------  ------------  ---------
Ethernet0        U  1,234,567  25.62 MB/s      0.12%
";
        let rows = parse_show_output(raw);
        assert!(rows[0].contains(&("rx_ok".to_string(), "1,234,567".to_string())));
        assert!(rows[0].contains(&("rx_bps".to_string(), "25.62 MB/s".to_string())));
    }

    #[test]
    fn test_no_table_yields_empty() {
        assert!(parse_show_output("").is_empty());
        assert!(parse_show_output("\n\n").is_empty());
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Asym PFC"), "asym_pfc");
        assert_eq!(normalize_header("  MTU "), "mtu");
        assert_eq!(normalize_header("Alternate Name"), "alternate_name");
        assert_eq!(normalize_header("RX_OK"), "rx_ok");
    }
}
