//! Semicolon separated rows, no header.

use csv::ReaderBuilder;

pub(crate) enum Row {
    Fields(Vec<String>),
    /// The reader could not decode the record.
    Broken(String),
}

/// Split `body` into rows of trimmed fields. Blank lines produce no row;
/// a line holding a delimiter always does, even when every field is empty.
pub(crate) fn parse(body: &str) -> Vec<Row> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .quote(b'"')
        .has_headers(false)
        .flexible(true)
        .from_reader(body.trim().as_bytes());

    reader
        .records()
        .filter_map(|record| match record {
            Ok(record) => {
                let fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
                if fields.len() == 1 && fields[0].is_empty() {
                    None
                } else {
                    Some(Row::Fields(fields))
                }
            }
            Err(err) => Some(Row::Broken(err.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(body: &str) -> Vec<Vec<String>> {
        parse(body)
            .into_iter()
            .map(|row| match row {
                Row::Fields(fields) => fields,
                Row::Broken(err) => panic!("unexpected broken row: {err}"),
            })
            .collect()
    }

    #[test]
    fn splits_on_semicolons_and_trims() {
        let rows = fields("  AMS ; Amsterdam \nROT;Rotterdam\n\n");
        assert_eq!(rows, vec![vec!["AMS", "Amsterdam"], vec!["ROT", "Rotterdam"]]);
    }

    #[test]
    fn quoted_fields_keep_semicolons() {
        let rows = fields("AMS;AMS01;\"Inn; by the canal\"");
        assert_eq!(rows, vec![vec!["AMS", "AMS01", "Inn; by the canal"]]);
    }

    #[test]
    fn rows_may_have_any_length() {
        let rows = fields("A;B;C;D\nonly\nX;Y");
        assert_eq!(rows.iter().map(Vec::len).collect::<Vec<_>>(), [4, 1, 2]);
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert!(fields("").is_empty());
        assert!(fields("\n   \n").is_empty());
        assert_eq!(fields("AMS;Amsterdam\n \t \nROT;Rotterdam").len(), 2);
    }

    #[test]
    fn empty_fields_still_make_a_row() {
        let rows = fields("AMS;Amsterdam\n;\n  ;  \n;;");
        assert_eq!(
            rows,
            vec![
                vec!["AMS", "Amsterdam"],
                vec!["", ""],
                vec!["", ""],
                vec!["", "", ""],
            ]
        );
    }
}
