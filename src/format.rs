//! Interchange text format.
//!
//! One transaction per line, item ids as whitespace-separated decimal
//! integers in ascending order, no header or footer. The canonical ascending
//! order makes serialized datasets diffable and equal-by-bytes when runs are
//! reproduced from the same seed.

use crate::dataset::{Dataset, ItemId, Transaction};
use crate::{Error, Result};

/// Render a dataset in the interchange format, one line per transaction.
pub fn serialize(dataset: &Dataset) -> String {
    let mut out = String::new();
    for txn in dataset.transactions() {
        let line: Vec<String> = txn.iter().map(|item| item.to_string()).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// Parse interchange text back into transactions: split each line on
/// whitespace, parse integers, treat the result as a set. Blank lines are
/// skipped. Order within a line is not significant.
///
/// # Errors
///
/// [`Error::Parse`] on a token that is not a decimal item id.
pub fn parse(text: &str) -> Result<Vec<Transaction>> {
    let mut transactions = Vec::new();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut txn = Transaction::new();
        for token in line.split_whitespace() {
            let item: ItemId = token.parse().map_err(|_| {
                Error::parse(format!("line {}: invalid item id '{}'", lineno + 1, token))
            })?;
            txn.insert(item);
        }
        transactions.push(txn);
    }
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_ascending_ids() {
        let txns = vec![
            Transaction::from_items([5, 1, 3]),
            Transaction::from_items([0]),
        ];
        let dataset = Dataset::assemble(2, 6, txns).unwrap();
        assert_eq!(serialize(&dataset), "1 3 5\n0\n");
    }

    #[test]
    fn test_round_trip_preserves_sets() {
        let txns = vec![
            Transaction::from_items([9, 2, 4]),
            Transaction::from_items([1, 8]),
            Transaction::from_items([0, 3, 7]),
        ];
        let dataset = Dataset::assemble(3, 10, txns.clone()).unwrap();
        let parsed = parse(&serialize(&dataset)).unwrap();
        assert_eq!(parsed, txns);
    }

    #[test]
    fn test_parse_ignores_blank_lines_and_order() {
        let parsed = parse("3 1 2\n\n  \n7 5\n").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0], Transaction::from_items([1, 2, 3]));
        assert_eq!(parsed[1], Transaction::from_items([5, 7]));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(parse("1 two 3\n"), Err(Error::Parse(_))));
    }
}
