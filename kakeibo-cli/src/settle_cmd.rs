use anyhow::{Context, Result, anyhow, bail};
use kakeibo_finance::fmt::yen;
use kakeibo_finance::{ExpenseEntry, SettlementResult, calculate_settlement};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One line of a shared-expense export: `payer,amount`
#[derive(Debug, Deserialize)]
struct SharedExpenseRow {
    payer: String,
    amount: String,
}

pub fn read_shared_expenses(path: &Path) -> Result<Vec<ExpenseEntry<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut entries = Vec::new();
    for (idx, result) in rdr.deserialize::<SharedExpenseRow>().enumerate() {
        // +2: one for the header, one for 1-based line numbers
        let line = idx + 2;
        let row = result.with_context(|| format!("{}: line {line}", path.display()))?;
        let amount = parse_amount(&row.amount)
            .ok_or_else(|| anyhow!("{}: line {line}: bad amount {:?}", path.display(), row.amount))?;
        entries.push(ExpenseEntry::new(row.payer, amount));
    }
    Ok(entries)
}

/// Whole yen, thousands separators allowed. Signs are rejected: a refund is
/// not a shared expense.
fn parse_amount(cell: &str) -> Option<u64> {
    let digits = cell.replace(',', "");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Parse repeated `--name ID=NAME` flags.
pub fn parse_names(pairs: &[String]) -> Result<HashMap<String, String>> {
    let mut names = HashMap::new();
    for pair in pairs {
        let Some((id, name)) = pair.split_once('=') else {
            bail!("expected ID=NAME, got {pair:?}");
        };
        names.insert(id.trim().to_string(), name.trim().to_string());
    }
    Ok(names)
}

pub fn render(result: &SettlementResult<String>, names: &HashMap<String, String>) -> String {
    let mut out = String::new();
    for (id, total) in &result.user_totals {
        let label = names.get(id).unwrap_or(id);
        out.push_str(&format!("{label:<16} {:>12}\n", yen(*total as f64)));
    }
    out.push('\n');
    out.push_str(&result.describe(names));
    out.push('\n');
    out
}

pub fn run_settle(file: &Path, name_pairs: &[String]) -> Result<()> {
    let names = parse_names(name_pairs)?;
    let entries = read_shared_expenses(file)?;
    let result = calculate_settlement(&entries);
    print!("{}", render(&result, &names));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, content: &str) -> std::path::PathBuf {
        let p = dir.join("shared.csv");
        std::fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn test_read_and_settle() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(
            dir.path(),
            "payer,amount\ntaro,\"30,000\"\nhanako,10000\ntaro, 20000\n",
        );
        let entries = read_shared_expenses(&p).unwrap();
        assert_eq!(entries.len(), 3);
        let result = calculate_settlement(&entries);
        assert_eq!(result.difference, 20000.0);

        let names = parse_names(&["taro=太郎".to_string(), "hanako = 花子".to_string()]).unwrap();
        let text = render(&result, &names);
        assert!(text.contains("太郎"));
        assert!(text.contains("¥50,000"));
        assert!(text.ends_with("花子 pays 太郎 ¥20,000\n"));
    }

    #[test]
    fn test_bad_amount_names_the_line() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(dir.path(), "payer,amount\ntaro,100\nhanako,lots\n");
        let err = read_shared_expenses(&p).unwrap_err();
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn test_signed_amounts_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(dir.path(), "payer,amount\ntaro,1000\ntaro,-3000\n");
        let err = read_shared_expenses(&p).unwrap_err();
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("-3000"));

        let p = write(dir.path(), "payer,amount\ntaro,+500\n");
        assert!(read_shared_expenses(&p).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("30,000"), Some(30000));
        assert_eq!(parse_amount("0"), Some(0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("12.5"), None);
        assert_eq!(parse_amount("99999999999999999999999"), None);
    }

    #[test]
    fn test_empty_file_settles_to_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let p = write(dir.path(), "payer,amount\n");
        let entries = read_shared_expenses(&p).unwrap();
        let text = render(&calculate_settlement(&entries), &HashMap::new());
        assert_eq!(text, "\nNo shared expenses\n");
    }

    #[test]
    fn test_parse_names_rejects_missing_equals() {
        assert!(parse_names(&["taro".to_string()]).is_err());
    }
}
