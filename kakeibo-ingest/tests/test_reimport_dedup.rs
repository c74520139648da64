use std::collections::HashSet;

use kakeibo_ingest::{
    ALL_FORMATS, NormalizedTransaction, ParserConfig, StatementFormat, decode_statement,
    import_statement,
};

const SUMISHIN: &str = "\
\"日付\",\"内容\",\"出金金額(円)\",\"入金金額(円)\",\"残高(円)\",\"メモ\"
\"2024/1/15\",\"振込＊ヤマダ　タロウ\",\"\",\"250,000\",\"300,000\",\"\"
\"2024/1/16\",\"ハイブリッド預金\",\"100,000\",\"\",\"200,000\",\"\"
\"2024/1/20\",\"口座振替　電気料金\",\"3,670\",\"\",\"196,330\",\"-\"
";

const DEBIT: &str = "\
取引日,出金額,入金額,摘要,残高,メモ,ラベル
2024/2/1,,\"280,000\",給与　カブシキガイシャ,\"380,000\",,
2024/2/3,\"1,280\",,V123456 AMAZON.CO.JP,\"378,720\",,
2024/2/4,\"20,000\",,ATM　セブン銀行,\"358,720\",,
";

const CARD: &str = "\
山田　太郎　様,,,,,
2024/1/5,セブン－イレブン,\"1,200\",１回払い,,
2024/1/9,ＪＲ東日本モバイルＳｕｉｃａ,\"3,000\",１回払い,,
,,,,,\"4,200\"
山田　花子　様,,,,,
2024/1/6,ユニクロ,\"5,990\",１回払い,,
,,,,,\"5,990\"
";

fn keys(rows: &[NormalizedTransaction]) -> HashSet<String> {
    rows.iter().map(|t| t.hash_key.clone()).collect()
}

/// Storing every fresh key and importing the same files again adds nothing.
#[test]
fn test_second_import_of_every_format_is_fully_skipped() {
    let cfg = ParserConfig::default();
    let mut stored: HashSet<String> = HashSet::new();

    for content in [SUMISHIN, DEBIT, CARD] {
        let batch = import_statement(content, None, &cfg, &stored).unwrap();
        assert!(batch.skipped.is_empty());
        stored.extend(keys(&batch.fresh));
    }
    assert_eq!(stored.len(), 9);

    for content in [SUMISHIN, DEBIT, CARD] {
        let batch = import_statement(content, None, &cfg, &stored).unwrap();
        assert!(batch.fresh.is_empty(), "{:?} re-imported rows", batch.format);
    }
}

/// An overlapping statement period only yields the new rows.
#[test]
fn test_overlapping_statement_imports_new_rows_only() {
    let cfg = ParserConfig::default();
    let first = import_statement(DEBIT, None, &cfg, &HashSet::new()).unwrap();
    let stored = keys(&first.fresh);

    let next_period = "\
取引日,出金額,入金額,摘要,残高,メモ,ラベル
2024/2/4,\"20,000\",,ATM　セブン銀行,\"358,720\",,
2024/2/10,\"4,400\",,V777777 ヨドバシカメラ,\"354,320\",,
";
    let batch = import_statement(next_period, None, &cfg, &stored).unwrap();
    assert_eq!(batch.fresh.len(), 1);
    assert_eq!(batch.fresh[0].description, "ヨドバシカメラ");
    assert_eq!(batch.skipped.len(), 1);
}

#[test]
fn test_no_collisions_across_corpus() {
    let cfg = ParserConfig::default();
    let mut all = Vec::new();
    for fmt in ALL_FORMATS {
        let content = match fmt {
            StatementFormat::SumishinSbi => SUMISHIN,
            StatementFormat::DebitBank => DEBIT,
            StatementFormat::CardStatement => CARD,
        };
        all.extend(cfg.parser_for(*fmt).parse(content));
    }
    assert_eq!(keys(&all).len(), all.len());
}

#[test]
fn test_shift_jis_file_round_trips_through_import() {
    let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(CARD);
    let content = decode_statement(&bytes);
    let batch = import_statement(&content, None, &ParserConfig::default(), &HashSet::new()).unwrap();
    assert_eq!(batch.format, StatementFormat::CardStatement);
    assert_eq!(batch.fresh.len(), 3);
    assert_eq!(batch.fresh[2].card_holder.as_deref(), Some("山田　花子"));
}
