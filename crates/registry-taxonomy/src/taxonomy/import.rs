//! Bulk loading of named records from CSV (`name,code,description[,abbreviation]`).

use std::io::Read;

use serde::{Deserialize, Deserializer, Serialize};

use super::domain::{NamedEntity, NamedEntityDraft};
use super::validation::FieldErrors;

/// One data row of an import file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based line number in the source file, header included.
    pub line: usize,
    pub draft: NamedEntityDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    pub line: usize,
    pub code: String,
    pub errors: FieldErrors,
}

/// Outcome of an import. Rows are committed one by one, so earlier rows are visible to
/// the duplicate-code check of later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub created: Vec<NamedEntity>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportSummary {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

pub fn parse_rows<R: Read>(reader: R) -> Result<Vec<ImportRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        // quoted cells may span lines, so take the line the record starts on
        let line = record.position().map_or(0, |position| position.line() as usize);
        let row: CsvRow = record.deserialize(Some(&headers))?;
        rows.push(ImportRow {
            line,
            draft: NamedEntityDraft {
                name: row.name,
                code: row.code,
                description: row.description,
                abbreviation: row.abbreviation,
            },
        });
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    code: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    description: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    abbreviation: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
