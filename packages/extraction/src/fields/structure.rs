//! Structural extraction - scheme name, category, holdings and sector
//! tables from flattened page text.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;

use crate::types::HoldingEntry;

/// Category keywords, most specific first so "Equity Large Cap" reports
/// the cap bucket rather than the broad asset class.
const CATEGORY_KEYWORDS: &[&str] = &[
    "ELSS",
    "Tax Saver",
    "Large Cap",
    "Mid Cap",
    "Small Cap",
    "Flexi Cap",
    "Hybrid",
    "Debt",
    "Equity",
];

/// Sectors worth scanning for when no allocation table is present.
const COMMON_SECTORS: &[&str] = &[
    "Financial",
    "Construction",
    "Energy",
    "Communication",
    "Sovereign",
    "Others",
    "Debt",
    "Cash",
    "Equity",
    "Government",
    "Banking",
    "PSU",
];

static SECTOR_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    COMMON_SECTORS
        .iter()
        .map(|sector| {
            let pattern = format!(r"(?i){sector}[:\s]+([\d.]+%)");
            (*sector, Regex::new(&pattern).expect("invalid sector pattern"))
        })
        .collect()
});

// Holdings rows come through as pipe- or tab-separated columns once the
// page tables are flattened to text.
static HOLDING_ROW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.{3,80}?)\s*[|\t]\s*([A-Za-z][A-Za-z /&().\-]{0,40}?)\s*[|\t]\s*(\d{1,2}(?:\.\d{1,2})?)%\s*$")
        .expect("invalid holding row pattern")
});

static HOLDING_ROW_TWO_COLUMN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(.{3,80}?)\s*[|\t]\s*(\d{1,2}(?:\.\d{1,2})?)%\s*$")
        .expect("invalid holding row pattern")
});

static HOLDINGS_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:top\s+)?holdings?\b").expect("invalid heading pattern"));

/// Column headers that should not be mistaken for a holding.
const HEADER_WORDS: &[&str] = &["name", "holding", "holdings", "company", "instrument", "assets", "sector"];

/// Extract the scheme display name.
///
/// The first non-blank line is the page heading; a `| Groww`-style title
/// suffix is stripped, and implausibly short or long candidates are
/// rejected rather than guessed at.
pub fn extract_display_name(text: &str) -> Option<String> {
    let line = text.lines().find(|l| !l.trim().is_empty())?;
    let name = match line.split_once('|') {
        Some((head, _)) => head.trim(),
        None => line.trim(),
    };

    if name.len() > 10 && name.len() < 120 {
        Some(name.to_string())
    } else {
        None
    }
}

/// Detect the fund category from a fixed keyword list.
pub fn extract_category(text: &str) -> Option<String> {
    CATEGORY_KEYWORDS
        .iter()
        .find(|keyword| text.contains(*keyword))
        .map(|keyword| keyword.to_string())
}

/// Parse holdings rows following a "Holdings" heading.
///
/// Reads consecutive column rows after the heading, tolerating a single
/// header row, and stops at the first line that no longer looks like a
/// row once data has been seen.
pub fn extract_holdings(text: &str) -> Vec<HoldingEntry> {
    let mut lines = text.lines();

    // Skip forward to the holdings heading.
    if !lines.any(|line| HOLDINGS_HEADING.is_match(line)) {
        return Vec::new();
    }

    let mut holdings = Vec::new();
    let mut skipped_header = false;

    for line in lines {
        if let Some(entry) = parse_holding_row(line) {
            holdings.push(entry);
        } else if line.trim().is_empty() && holdings.is_empty() {
            continue;
        } else if !skipped_header && holdings.is_empty() {
            // Tolerate one header row between the heading and the data.
            skipped_header = true;
        } else {
            break;
        }
    }

    holdings
}

fn parse_holding_row(line: &str) -> Option<HoldingEntry> {
    if let Some(captures) = HOLDING_ROW.captures(line) {
        let name = captures[1].trim().to_string();
        if is_header_word(&name) || is_header_word(captures[2].trim()) {
            return None;
        }
        return Some(HoldingEntry {
            name,
            instrument_type: captures[2].trim().to_string(),
            asset_percentage: format!("{}%", &captures[3]),
        });
    }

    if let Some(captures) = HOLDING_ROW_TWO_COLUMN.captures(line) {
        let name = captures[1].trim().to_string();
        if is_header_word(&name) {
            return None;
        }
        return Some(HoldingEntry {
            name,
            instrument_type: String::new(),
            asset_percentage: format!("{}%", &captures[2]),
        });
    }

    None
}

fn is_header_word(value: &str) -> bool {
    HEADER_WORDS.contains(&value.to_lowercase().as_str())
}

/// Scan for sector allocation percentages.
///
/// Takes the first percentage printed next to each known sector name;
/// insertion order follows the sector list so output is deterministic.
pub fn extract_sector_allocation(text: &str) -> IndexMap<String, String> {
    let mut allocation = IndexMap::new();

    for (sector, pattern) in SECTOR_PATTERNS.iter() {
        if let Some(captures) = pattern.captures(text) {
            allocation.insert(sector.to_string(), captures[1].to_string());
        }
    }

    allocation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_strips_title_suffix() {
        let text = "Axis Bluechip Fund Direct Growth | Groww\nNAV: ₹42.58";
        assert_eq!(
            extract_display_name(text).as_deref(),
            Some("Axis Bluechip Fund Direct Growth")
        );
    }

    #[test]
    fn display_name_rejects_short_headings() {
        assert_eq!(extract_display_name("Funds\ncontent"), None);
        assert_eq!(extract_display_name(""), None);
    }

    #[test]
    fn category_prefers_specific_bucket() {
        assert_eq!(
            extract_category("Equity Large Cap fund").as_deref(),
            Some("Large Cap")
        );
        assert_eq!(extract_category("An ELSS Equity fund").as_deref(), Some("ELSS"));
        assert_eq!(extract_category("no category words"), None);
    }

    #[test]
    fn holdings_parsed_after_heading() {
        let text = "\
Some Fund Direct Growth
Holdings
Name | Instrument | Assets
HDFC Bank NCD | NCD | 10.50%
TREPS | Cash Equivalent | 4.25%
Reliance Industries | Equity | 7.00%
Sector allocation follows
";
        let holdings = extract_holdings(text);
        assert_eq!(holdings.len(), 3);
        assert_eq!(holdings[0].name, "HDFC Bank NCD");
        assert_eq!(holdings[0].instrument_type, "NCD");
        assert_eq!(holdings[0].asset_percentage, "10.50%");
        assert_eq!(holdings[1].instrument_type, "Cash Equivalent");
    }

    #[test]
    fn holdings_two_column_rows() {
        let text = "Holdings\nState Bank of India | 6.30%\nInfosys | 5.10%\n";
        let holdings = extract_holdings(text);
        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings[0].instrument_type, "");
    }

    #[test]
    fn no_heading_means_no_holdings() {
        let text = "HDFC Bank NCD | NCD | 10.50%";
        assert!(extract_holdings(text).is_empty());
    }

    #[test]
    fn sector_allocation_scan() {
        let text = "Financial: 38.3%\nSovereign 21.0%\nEnergy: 4.5%";
        let allocation = extract_sector_allocation(text);
        assert_eq!(allocation.get("Financial").map(String::as_str), Some("38.3%"));
        assert_eq!(allocation.get("Sovereign").map(String::as_str), Some("21.0%"));
        assert_eq!(allocation.get("Energy").map(String::as_str), Some("4.5%"));
        assert!(allocation.get("Cash").is_none());
    }
}
