use anyhow::{Context, Result};
use kakeibo_finance::fmt::yen;
use kakeibo_ingest::{
    NormalizedTransaction, ParserConfig, StatementFormat, decode_statement, import_statement,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::state::{append_seen_keys, read_seen_keys};

pub struct ImportArgs {
    pub file: PathBuf,
    pub format: Option<StatementFormat>,
    pub seen: Option<PathBuf>,
    pub record: bool,
    pub json: bool,
}

pub fn run_import(args: ImportArgs, config: &ParserConfig) -> Result<()> {
    let bytes = fs::read(&args.file).with_context(|| format!("read {}", args.file.display()))?;
    let content = decode_statement(&bytes);

    let seen = match &args.seen {
        Some(p) => read_seen_keys(p)?,
        None => HashSet::new(),
    };
    debug!(known_keys = seen.len(), "loaded stored hash keys");

    let batch = import_statement(&content, args.format, config, &seen)
        .with_context(|| format!("importing {}", args.file.display()))?;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&batch.fresh).context("serialize transactions")?
        );
    } else {
        println!(
            "Parsed {} transactions from {} ({})",
            batch.parsed_count(),
            args.file.display(),
            batch.format.name()
        );
        println!("New: {} | already imported: {}\n", batch.fresh.len(), batch.skipped.len());
        for txn in &batch.fresh {
            println!("{}", format_row(txn));
        }
    }

    if args.record {
        if let Some(p) = &args.seen {
            record_keys(p, &batch.fresh)?;
        }
    }
    Ok(())
}

fn record_keys(path: &Path, rows: &[NormalizedTransaction]) -> Result<()> {
    let written = append_seen_keys(path, rows.iter().map(|t| t.hash_key.as_str()))?;
    debug!(written, path = %path.display(), "recorded hash keys");
    Ok(())
}

pub fn format_row(txn: &NormalizedTransaction) -> String {
    let mut line = format!(
        "{}  {:<8} {:>12}  {}",
        txn.usage_date,
        txn.txn_type,
        yen(txn.amount as f64),
        txn.description
    );
    if let Some(holder) = &txn.card_holder {
        line.push_str(&format!("  [{holder}]"));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use kakeibo_ingest::{CardStatementParser, StatementParser};

    const CARD: &str = "\
山田　太郎　様,,,,,
2024/1/12,AMAZON.CO.JP,\"3,670\",１回払い,,
2024/1/13,ライフ,980,１回払い,,
,,,,,\"4,650\"
";

    #[test]
    fn test_format_row() {
        let txns = CardStatementParser::default().parse(CARD);
        let line = format_row(&txns[0]);
        assert!(line.starts_with("2024-01-12  expense"));
        assert!(line.contains("¥3,670  AMAZON.CO.JP"));
        assert!(line.ends_with("[山田　太郎]"));
    }

    #[test]
    fn test_import_records_keys_and_skips_on_rerun() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("card.csv");
        let seen = dir.path().join("seen.txt");
        fs::write(&file, CARD).unwrap();

        let args = || ImportArgs {
            file: file.clone(),
            format: None,
            seen: Some(seen.clone()),
            record: true,
            json: false,
        };
        run_import(args(), &ParserConfig::default()).unwrap();
        assert_eq!(read_seen_keys(&seen).unwrap().len(), 2);

        // Nothing new the second time round.
        run_import(args(), &ParserConfig::default()).unwrap();
        let lines = fs::read_to_string(&seen).unwrap().lines().count();
        assert_eq!(lines, 2);
    }

    #[test]
    fn test_import_of_unrecognised_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("other.csv");
        fs::write(&file, "Date,Description,Amount\n01/02/2024,COFFEE,4.50\n").unwrap();
        let err = run_import(
            ImportArgs {
                file,
                format: None,
                seen: None,
                record: false,
                json: true,
            },
            &ParserConfig::default(),
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Unknown statement format"));
    }
}
