#[cfg(test)]
mod tests {
    use crate::parsing::csv_parser::{parse_csv, Row, Table};
    use proptest::prelude::*;

    #[test]
    fn test_parse_csv_basic() {
        let table = parse_csv("Контрагент,Год,Широта,Долгота\nАгро,2023,55.75,37.61\nНива,2024,51.5,39.2\n");

        assert_eq!(table.columns, vec!["Контрагент", "Год", "Широта", "Долгота"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].get("Контрагент"), Some("Агро"));
        assert_eq!(table.rows[1].get("Долгота"), Some("39.2"));
    }

    #[test]
    fn test_parse_csv_empty_input() {
        let table = parse_csv("");
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());

        let table = parse_csv("  \n\r\n  ");
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_parse_csv_header_only() {
        let table = parse_csv("lat,lon\n");
        assert_eq!(table.columns.len(), 2);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_parse_csv_crlf_line_endings() {
        let table = parse_csv("a,b\r\n1,2\r\n3,4\r\n");
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("b"), Some("4"));
    }

    #[test]
    fn test_parse_csv_missing_trailing_values_are_empty() {
        let table = parse_csv("a,b,c\n1\n");
        let row = &table.rows[0];
        assert_eq!(row.len(), 3);
        assert_eq!(row.get("a"), Some("1"));
        assert_eq!(row.get("b"), Some(""));
        assert_eq!(row.get("c"), Some(""));
    }

    #[test]
    fn test_parse_csv_extra_values_ignored() {
        let table = parse_csv("a,b\n1,2,3,4\n");
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[0].get("b"), Some("2"));
    }

    #[test]
    fn test_parse_csv_trims_values() {
        let table = parse_csv("name , year\n  Агро  ,\t2023 \n");
        assert_eq!(table.columns, vec!["name", "year"]);
        assert_eq!(table.rows[0].get("name"), Some("Агро"));
        assert_eq!(table.rows[0].get("year"), Some("2023"));
    }

    #[test]
    fn test_parse_csv_strips_bom() {
        let table = parse_csv("\u{feff}Год,Урожайность_ц_га\n2023,41,5\n");
        assert_eq!(table.columns[0], "Год");
        // No quoting: the decimal comma splits the value.
        assert_eq!(table.rows[0].get("Урожайность_ц_га"), Some("41"));
    }

    #[test]
    fn test_duplicate_header_last_value_wins() {
        let table = parse_csv("y,y,x\n1,2,3\n");
        let row = &table.rows[0];
        assert_eq!(row.len(), 2);
        assert_eq!(row.get("y"), Some("2"));
        let keys: Vec<&str> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["y", "x"]);
    }

    #[test]
    fn test_blank_interior_line_is_a_row() {
        let table = parse_csv("a,b\n1,2\n\n3,4");
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[1].get("a"), Some(""));
    }

    #[test]
    fn test_to_csv_roundtrip_preserves_trimmed_values() {
        let text = "entity, year ,yield\n Агро ,2023, 41.50 \nНива,2024,\n";
        let table = parse_csv(text);
        let reparsed = parse_csv(&table.to_csv());
        assert_eq!(reparsed, table);
        assert_eq!(reparsed.rows[0].get("yield"), Some("41.50"));
    }

    #[test]
    fn test_to_csv_empty_table() {
        assert_eq!(Table::default().to_csv(), "");
    }

    #[test]
    fn test_row_from_iter_overwrites() {
        let row: Row = vec![("a", "1"), ("b", "2"), ("a", "3")].into_iter().collect();
        assert_eq!(row.get("a"), Some("3"));
        assert_eq!(row.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_row_count_is_line_count_minus_one(
            header in prop::collection::vec("[a-z]{1,6}", 1..6),
            rows in prop::collection::vec(prop::collection::vec("[a-z0-9]{1,5}", 1..6), 0..40),
        ) {
            let mut text = header.join(",");
            for r in &rows {
                text.push('\n');
                text.push_str(&r.join(","));
            }
            let table = parse_csv(&text);
            prop_assert_eq!(table.rows.len(), rows.len());
            prop_assert_eq!(table.columns.len(), header.len());
        }
    }
}
