//! kakeibo-ingest: normalize Japanese bank and card statement exports into
//! deduplicable transaction records.

pub mod cleanse;
pub mod config;
pub mod error;
pub mod fields;
pub mod hash;
pub mod import;
pub mod parsers;
pub mod types;

pub use cleanse::cleanse_description;
pub use config::ParserConfig;
pub use error::IngestError;
pub use hash::{hash_key, hash_key_in};
pub use import::{ImportBatch, decode_statement, import_statement};
pub use parsers::{
    ALL_FORMATS, CardStatementParser, DebitBankParser, StatementFormat, StatementParser,
    SumishinSbiParser,
};
pub use types::{NormalizedTransaction, TransactionType};
