//! CSV parsing for the goods import.

use std::path::Path;

use anyhow::{Context, Result, bail};
use pasok_core::validation::GoodsInput;

/// Reads goods rows from CSV text with a header row.
///
/// A malformed row fails the whole parse before anything is uploaded.
pub fn parse_goods_csv(text: &str) -> Result<Vec<GoodsInput>> {
    let text = text.trim_start_matches('\u{FEFF}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<GoodsInput>().enumerate() {
        let row = record.with_context(|| format!("row {} is not a valid goods row", index + 1))?;
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("the file has no goods rows");
    }
    Ok(rows)
}

pub fn read_goods_csv(path: &Path) -> Result<Vec<GoodsInput>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read {}", path.display()))?;
    parse_goods_csv(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasok_shared::types::SupplierId;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parses_rows_with_optional_columns() {
        let text = "\u{FEFF}name,unit,sale_price,cost_price,code,supplier_id\n\
                    Beras,kg,12000,10500,BRS,3\n\
                    Telur, butir ,2000.5,1800,,\n";
        let rows = parse_goods_csv(text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].supplier_id, Some(SupplierId(3)));
        assert_eq!(rows[0].sale_price, dec!(12000));
        assert!(rows[0].is_active);
        assert_eq!(rows[1].unit, "butir");
        assert_eq!(rows[1].code, None);
        assert_eq!(rows[1].supplier_id, None);
    }

    #[test]
    fn test_bad_row_fails_parse() {
        let text = "name,unit,sale_price,cost_price\nBeras,kg,mahal,10500\n";
        let err = parse_goods_csv(text).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }

    #[test]
    fn test_empty_file() {
        assert!(parse_goods_csv("name,unit,sale_price,cost_price\n").is_err());
    }
}
