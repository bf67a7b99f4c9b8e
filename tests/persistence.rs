#[cfg(test)]
mod value {
    use minidb_engine::persistence::{Value, ValueType};

    #[test]
    fn value_equality_is_variant_exact() {
        assert_eq!(Value::Integer(1), Value::Integer(1));
        assert_ne!(Value::Integer(1), Value::Decimal(1.0));
        assert_ne!(Value::Text("1".to_string()), Value::Integer(1));
    }

    #[test]
    fn value_orders_by_type_then_payload() {
        let mut values = vec![
            Value::from("a"),
            Value::from(2.5),
            Value::from(10),
            Value::from(-3),
            Value::from(-1.5),
            Value::from("B"),
        ];
        values.sort();

        assert_eq!(
            values,
            vec![
                Value::from(-3),
                Value::from(10),
                Value::from(-1.5),
                Value::from(2.5),
                Value::from("B"),
                Value::from("a"),
            ]
        );
    }

    #[test]
    fn signed_zeros_are_equal() {
        assert_eq!(Value::from(-0.0), Value::from(0.0));
        assert!(Value::from(-0.0) < Value::from(0.5));
        assert!(Value::from(-0.5) < Value::from(-0.0));
    }

    #[test]
    fn integer_sorts_before_any_decimal() {
        assert!(Value::Integer(i64::MAX) < Value::Decimal(f64::MIN));
        assert!(Value::Decimal(f64::MAX) < Value::Text(String::new()));
    }

    #[test]
    fn value_renders_verbatim() {
        assert_eq!(Value::from(-42).to_string(), "-42");
        assert_eq!(Value::from(678.9).to_string(), "678.9");
        assert_eq!(Value::from("hi there").to_string(), "hi there");
    }

    #[test]
    fn value_type_names() {
        assert_eq!(ValueType::from_name("integer"), Some(ValueType::Integer));
        assert_eq!(ValueType::from_name("decimal"), Some(ValueType::Decimal));
        assert_eq!(ValueType::from_name("string"), Some(ValueType::Text));
        assert_eq!(ValueType::from_name("float"), None);
        assert_eq!(Value::from(1.0).value_type(), ValueType::Decimal);
    }
}

#[cfg(test)]
mod table {
    use minidb_engine::Error;
    use minidb_engine::persistence::{Column, Schema, Table, Value, ValueType};

    fn _create_table(columns: Vec<(&str, ValueType)>) -> Table {
        Table::new(
            "test",
            columns
                .into_iter()
                .map(|(name, value_type)| Column::new(name, value_type))
                .collect::<Schema>(),
        )
    }

    fn _people() -> Table {
        let mut table = _create_table(vec![
            ("id", ValueType::Integer),
            ("name", ValueType::Text),
            ("score", ValueType::Decimal),
        ]);
        let values = vec![
            (1, "Jansen", 1.5),
            (2, "Bonega", 2.5),
            (3, "Maharashtra", 3.5),
            (4, "Lorem", 4.5),
        ];

        for (id, name, score) in values {
            table
                .append(vec![id.into(), name.into(), score.into()])
                .unwrap();
        }

        table
    }

    #[test]
    fn table_append_preserves_cells_and_order() {
        let table = _people();

        assert_eq!(table.row_count(), 4);
        assert_eq!(
            table.row(0).unwrap().cells(),
            &[Value::from(1), Value::from("Jansen"), Value::from(1.5)]
        );
        assert_eq!(table.row(3).unwrap().cell(1).unwrap(), &Value::from("Lorem"));
    }

    #[test]
    fn table_append_rejects_wrong_length() {
        let mut table = _people();

        let result = table.append(vec![5.into(), "Malaika".into()]);
        assert!(matches!(result, Err(Error::SchemaMismatch(_))));

        let result = table.append(vec![5.into(), "Malaika".into(), 1.0.into(), 2.0.into()]);
        assert!(matches!(result, Err(Error::SchemaMismatch(_))));

        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn table_append_rejects_wrong_type_without_coercion() {
        let mut table = _people();

        // an integer where a decimal is declared is still a mismatch
        let result = table.append(vec![5.into(), "Malaika".into(), 5.into()]);
        assert!(matches!(result, Err(Error::SchemaMismatch(_))));
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn table_accepts_empty_schema() {
        let mut table = _create_table(vec![]);

        table.append(vec![]).unwrap();
        assert_eq!(table.row_count(), 1);
        assert!(table.row(0).unwrap().is_empty());
    }

    #[test]
    fn table_column_lookup_first_match_wins() {
        let table = _create_table(vec![
            ("a", ValueType::Integer),
            ("b", ValueType::Text),
            ("a", ValueType::Decimal),
        ]);

        assert_eq!(table.column_index_by_name("a").unwrap(), 0);
        assert_eq!(table.column_index_by_name("b").unwrap(), 1);
        assert_eq!(table.column_type(2).unwrap(), ValueType::Decimal);
        assert_eq!(table.column_name(1).unwrap(), "b");
        assert!(matches!(
            table.column_index_by_name("dummy"),
            Err(Error::UnknownColumn { .. })
        ));
        assert!(matches!(
            table.column_name(3),
            Err(Error::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn table_erase_shifts_later_rows() {
        let mut table = _people();

        let erased = table.erase(1).unwrap();
        assert_eq!(erased.cell(1).unwrap(), &Value::from("Bonega"));
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.row(1).unwrap().cell(0).unwrap(), &Value::from(3));
    }

    #[test]
    fn table_erase_out_of_range() {
        let mut table = _people();

        assert!(matches!(
            table.erase(4),
            Err(Error::IndexOutOfRange { index: 4, len: 4, .. })
        ));
        assert_eq!(table.row_count(), 4);
    }

    #[test]
    fn table_update_cell_round_trip() {
        let mut table = _people();

        table.update_cell(2, 1, Value::from("Jimmy")).unwrap();
        assert_eq!(table.row(2).unwrap().cell(1).unwrap(), &Value::from("Jimmy"));

        // nothing else changed
        assert_eq!(table.row(2).unwrap().cell(0).unwrap(), &Value::from(3));
        assert_eq!(table.row(1).unwrap().cell(1).unwrap(), &Value::from("Bonega"));
    }

    #[test]
    fn table_update_cell_type_mismatch_leaves_cell() {
        let mut table = _people();

        for value in [Value::from(1), Value::from(1.0)] {
            assert!(matches!(
                table.update_cell(0, 1, value),
                Err(Error::TypeMismatch { .. })
            ));
        }
        assert!(matches!(
            table.update_cell(0, 2, Value::from(7)),
            Err(Error::TypeMismatch {
                expected: ValueType::Decimal,
                found: ValueType::Integer,
                ..
            })
        ));
        assert_eq!(table.row(0).unwrap().cell(1).unwrap(), &Value::from("Jansen"));
        assert_eq!(table.row(0).unwrap().cell(2).unwrap(), &Value::from(1.5));
    }

    #[test]
    fn table_update_cell_out_of_range() {
        let mut table = _people();

        assert!(matches!(
            table.update_cell(9, 0, Value::from(1)),
            Err(Error::IndexOutOfRange { kind: "row", .. })
        ));
        assert!(matches!(
            table.update_cell(0, 3, Value::from(1)),
            Err(Error::IndexOutOfRange { kind: "column", .. })
        ));
    }

    #[test]
    fn table_display_shows_schema_and_rows() {
        let table = _people();
        let rendered = table.to_string();

        assert!(rendered.starts_with("id (INT) | name (TXT) | score (DEC)"));
        assert!(rendered.contains("2 | Bonega | 2.5"));
    }
}

#[cfg(test)]
mod filter {
    use minidb_engine::Error;
    use minidb_engine::persistence::{Column, RowFilter, Schema, Table, Value, ValueType};

    fn _table() -> Table {
        let schema = Schema::new(vec![
            Column::new("x", ValueType::Integer),
            Column::new("y", ValueType::Decimal),
            Column::new("z", ValueType::Text),
        ]);
        let mut table = Table::new("filter_test", schema);
        table.append(vec![1.into(), 1.0.into(), "a".into()]).unwrap();
        table.append(vec![1.into(), 2.0.into(), "b".into()]).unwrap();
        table.append(vec![2.into(), 1.0.into(), "a".into()]).unwrap();
        table
    }

    fn _matching(table: &Table, filter: &RowFilter) -> Vec<usize> {
        let bound = filter.bind(table).unwrap();
        table
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| bound.matches(row))
            .map(|(index, _)| index)
            .collect()
    }

    #[test]
    fn empty_filter_matches_every_row() {
        let table = _table();
        assert_eq!(_matching(&table, &RowFilter::new()), vec![0, 1, 2]);
    }

    #[test]
    fn filter_is_a_conjunction() {
        let table = _table();

        let filter = RowFilter::new().with("x", 1);
        assert_eq!(_matching(&table, &filter), vec![0, 1]);

        let filter = RowFilter::new().with("x", 1).with("z", "a");
        assert_eq!(_matching(&table, &filter), vec![0]);

        let filter: RowFilter = vec![("x", Value::from(2)), ("z", Value::from("a"))].into_iter().collect();
        assert_eq!(_matching(&table, &filter), vec![2]);
    }

    #[test]
    fn repeated_filter_column_keeps_first_value() {
        let table = _table();

        let filter: RowFilter = vec![("z", "a"), ("z", "b")].into_iter().collect();
        assert_eq!(filter.len(), 1);
        assert_eq!(_matching(&table, &filter), vec![0, 2]);

        let filter = RowFilter::new().with("x", 1).with("x", 2);
        assert_eq!(_matching(&table, &filter), vec![0, 1]);
    }

    #[test]
    fn negative_zero_matches_zero() {
        let mut table = _table();
        table.append(vec![3.into(), (-0.0).into(), "c".into()]).unwrap();
        table.append(vec![4.into(), 0.0.into(), "d".into()]).unwrap();

        let filter = RowFilter::new().with("y", 0.0);
        assert_eq!(_matching(&table, &filter), vec![3, 4]);

        let filter = RowFilter::new().with("y", -0.0);
        assert_eq!(_matching(&table, &filter), vec![3, 4]);
    }

    #[test]
    fn filter_does_not_coerce_numbers() {
        let table = _table();

        let filter = RowFilter::new().with("y", 1);
        assert!(_matching(&table, &filter).is_empty());

        let filter = RowFilter::new().with("x", 1.0);
        assert!(_matching(&table, &filter).is_empty());

        let filter = RowFilter::new().with("y", 1.0);
        assert_eq!(_matching(&table, &filter), vec![0, 2]);
    }

    #[test]
    fn binding_an_unknown_column_fails() {
        let table = _table();
        let filter = RowFilter::new().with("x", 1).with("dummy", Value::from(42));

        assert!(matches!(
            filter.bind(&table),
            Err(Error::UnknownColumn { column, .. }) if column == "dummy"
        ));
    }
}

#[cfg(test)]
mod database {
    use indexmap::IndexMap;
    use minidb_engine::Error;
    use minidb_engine::persistence::{
        Column, Database, Row, RowFilter, Schema, Value, ValueType,
    };

    fn _prepare_database() -> Database {
        let mut database = Database::new();
        database
            .create_table(
                "t",
                Schema::new(vec![
                    Column::new("a", ValueType::Integer),
                    Column::new("b", ValueType::Text),
                ]),
            )
            .unwrap();
        database.append_row("t", vec![1.into(), "x".into()]).unwrap();
        database.append_row("t", vec![2.into(), "y".into()]).unwrap();
        database
    }

    fn _query(database: &Database, name: &str, filter: Option<&RowFilter>) -> Vec<Vec<Value>> {
        let mut rows = Vec::new();
        database
            .query_table(name, filter, |row: &Row| rows.push(row.cells().to_vec()))
            .unwrap();
        rows
    }

    fn _changes(pairs: Vec<(&str, Value)>) -> IndexMap<String, Value> {
        pairs
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    #[test]
    fn database_query_in_table_order() {
        let database = _prepare_database();

        assert_eq!(
            _query(&database, "t", Some(&RowFilter::new())),
            vec![
                vec![Value::from(1), Value::from("x")],
                vec![Value::from(2), Value::from("y")],
            ]
        );
        assert_eq!(_query(&database, "t", None).len(), 2);
    }

    #[test]
    fn database_update_then_erase_rows() {
        let mut database = _prepare_database();

        let updated = database
            .update_rows(
                "t",
                &RowFilter::new().with("a", 1),
                &_changes(vec![("b", Value::from("z"))]),
            )
            .unwrap();
        assert_eq!(updated, 1);
        assert_eq!(
            _query(&database, "t", None),
            vec![
                vec![Value::from(1), Value::from("z")],
                vec![Value::from(2), Value::from("y")],
            ]
        );

        let erased = database
            .erase_rows("t", &RowFilter::new().with("b", "y"))
            .unwrap();
        assert_eq!(erased, 1);

        let table = database.lookup_table("t").unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(
            table.row(0).unwrap().cells(),
            &[Value::from(1), Value::from("z")]
        );
    }

    #[test]
    fn database_create_table_twice_fails() {
        let mut database = _prepare_database();

        assert!(matches!(
            database.create_table("t", Schema::new(vec![])),
            Err(Error::TableAlreadyExists(name)) if name == "t"
        ));
        // the existing table is untouched
        assert_eq!(database.lookup_table("t").unwrap().row_count(), 2);
    }

    #[test]
    fn database_drop_table_twice_fails() {
        let mut database = _prepare_database();

        database.drop_table("t").unwrap();
        assert!(matches!(
            database.lookup_table("t"),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            database.drop_table("t"),
            Err(Error::TableNotFound(_))
        ));
        assert!(database.table_names().is_empty());
    }

    #[test]
    fn database_table_names_in_creation_order() {
        let mut database = _prepare_database();
        database.create_table("c", Schema::new(vec![])).unwrap();
        database.create_table("b", Schema::new(vec![])).unwrap();

        assert_eq!(database.table_names(), vec!["t", "c", "b"]);
        assert!(database.contains_table("c"));
        assert!(!database.contains_table("d"));
    }

    #[test]
    fn database_operations_on_missing_table_fail() {
        let mut database = Database::new();
        let mut called = false;

        assert!(matches!(
            database.query_table("test", None, |_| called = true),
            Err(Error::TableNotFound(_))
        ));
        assert!(!called);
        assert!(matches!(
            database.append_row("test", vec![]),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            database.update_rows(
                "test",
                &RowFilter::new().with("dummy", 123),
                &_changes(vec![("x", Value::from(123.4))])
            ),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            database.erase_rows("test", &RowFilter::new()),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            database.erase_row("test", 42),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            database.update_cell("test", 0, 0, Value::from(1)),
            Err(Error::TableNotFound(_))
        ));
        assert!(matches!(
            database.query_column_histogram("test", "a", None),
            Err(Error::TableNotFound(_))
        ));
    }

    #[test]
    fn database_unknown_filter_column_fails() {
        let mut database = _prepare_database();
        let filter = RowFilter::new().with("dummy", 42);
        let mut called = false;

        assert!(matches!(
            database.query_table("t", Some(&filter), |_| called = true),
            Err(Error::UnknownColumn { .. })
        ));
        assert!(!called);
        assert!(matches!(
            database.erase_rows("t", &filter),
            Err(Error::UnknownColumn { .. })
        ));
        assert!(matches!(
            database.update_rows("t", &filter, &_changes(vec![("b", Value::from("q"))])),
            Err(Error::UnknownColumn { .. })
        ));
        assert_eq!(database.lookup_table("t").unwrap().row_count(), 2);
    }

    #[test]
    fn database_update_rows_is_atomic_on_invalid_change() {
        let mut database = _prepare_database();

        // first change is valid, second has the wrong type
        let result = database.update_rows(
            "t",
            &RowFilter::new(),
            &_changes(vec![("b", Value::from("q")), ("a", Value::from(1.5))]),
        );
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));

        let result = database.update_rows(
            "t",
            &RowFilter::new(),
            &_changes(vec![("b", Value::from("q")), ("dummy", Value::from(1))]),
        );
        assert!(matches!(result, Err(Error::UnknownColumn { .. })));

        assert_eq!(
            _query(&database, "t", None),
            vec![
                vec![Value::from(1), Value::from("x")],
                vec![Value::from(2), Value::from("y")],
            ]
        );
    }

    #[test]
    fn database_update_rows_multiple_columns() {
        let mut database = _prepare_database();
        database.append_row("t", vec![1.into(), "w".into()]).unwrap();

        let updated = database
            .update_rows(
                "t",
                &RowFilter::new().with("a", 1),
                &_changes(vec![("a", Value::from(7)), ("b", Value::from("seven"))]),
            )
            .unwrap();
        assert_eq!(updated, 2);

        // the filter was decided before the change to `a` was written
        assert_eq!(
            _query(&database, "t", Some(&RowFilter::new().with("a", 7))),
            vec![
                vec![Value::from(7), Value::from("seven")],
                vec![Value::from(7), Value::from("seven")],
            ]
        );
    }

    #[test]
    fn database_erase_row_by_index() {
        let mut database = _prepare_database();

        let erased = database.erase_row("t", 0).unwrap();
        assert_eq!(erased.cell(1).unwrap(), &Value::from("x"));
        assert!(matches!(
            database.erase_row("t", 1),
            Err(Error::IndexOutOfRange { .. })
        ));
        assert_eq!(_query(&database, "t", None), vec![vec![Value::from(2), Value::from("y")]]);
    }

    #[test]
    fn database_erase_rows_keeps_survivor_order() {
        let mut database = _prepare_database();
        for (a, b) in [(3, "x"), (4, "w"), (5, "x")] {
            database.append_row("t", vec![a.into(), b.into()]).unwrap();
        }

        let erased = database
            .erase_rows("t", &RowFilter::new().with("b", "x"))
            .unwrap();
        assert_eq!(erased, 3);
        assert_eq!(
            _query(&database, "t", None),
            vec![
                vec![Value::from(2), Value::from("y")],
                vec![Value::from(4), Value::from("w")],
            ]
        );

        // an empty filter erases everything
        assert_eq!(database.erase_rows("t", &RowFilter::new()).unwrap(), 2);
        assert_eq!(database.lookup_table("t").unwrap().row_count(), 0);
    }

    #[test]
    fn database_update_cell() {
        let mut database = _prepare_database();

        database.update_cell("t", 1, 1, Value::from("q")).unwrap();
        assert!(matches!(
            database.update_cell("t", 1, 0, Value::from("q")),
            Err(Error::TypeMismatch { .. })
        ));
        assert_eq!(_query(&database, "t", None)[1], vec![Value::from(2), Value::from("q")]);
    }

    #[test]
    fn database_histogram_counts_in_value_order() {
        let mut database = _prepare_database();
        database.append_row("t", vec![3.into(), "x".into()]).unwrap();

        let histogram = database.query_column_histogram("t", "b", None).unwrap();
        let entries: Vec<(Value, usize)> = histogram.into_iter().collect();
        assert_eq!(entries, vec![(Value::from("x"), 2), (Value::from("y"), 1)]);
    }

    #[test]
    fn database_histogram_with_filter_sums_to_matches() {
        let mut database = Database::new();
        database
            .create_table(
                "query-test",
                Schema::new(vec![
                    Column::new("X", ValueType::Integer),
                    Column::new("Y", ValueType::Integer),
                    Column::new("B", ValueType::Text),
                ]),
            )
            .unwrap();
        let rows = [
            (1, 1, "Hello"),
            (1, 2, "World"),
            (1, 3, "ABCD"),
            (2, 1, "Test"),
            (2, 2, "Hello"),
            (2, 3, "ABCD"),
            (3, 1, "ABCD"),
            (3, 2, "World"),
            (3, 3, "ABCD"),
            (3, 3, "ABCD"),
            (3, 3, "Hello"),
            (4, 1, "ABCD"),
        ];
        for (x, y, b) in rows {
            database
                .append_row("query-test", vec![x.into(), y.into(), b.into()])
                .unwrap();
        }

        let filter = RowFilter::new().with("B", "ABCD");
        let histogram = database
            .query_column_histogram("query-test", "Y", Some(&filter))
            .unwrap();
        let entries: Vec<(Value, usize)> = histogram.clone().into_iter().collect();
        assert_eq!(entries, vec![(Value::from(1), 2), (Value::from(3), 4)]);

        let n_matching = database
            .query_table("query-test", Some(&filter), |_| {})
            .unwrap();
        assert_eq!(histogram.values().sum::<usize>(), n_matching);

        let unfiltered = database
            .query_column_histogram("query-test", "B", None)
            .unwrap();
        assert_eq!(unfiltered.values().sum::<usize>(), rows.len());
    }

    #[test]
    fn database_histogram_counts_signed_zeros_together() {
        let mut database = Database::new();
        database
            .create_table("t", Schema::new(vec![Column::new("x", ValueType::Decimal)]))
            .unwrap();
        for x in [-0.0, 0.0, 1.5] {
            database.append_row("t", vec![x.into()]).unwrap();
        }

        let histogram = database.query_column_histogram("t", "x", None).unwrap();
        assert_eq!(histogram.len(), 2);
        assert_eq!(histogram.get(&Value::from(0.0)), Some(&2));
        assert_eq!(histogram.get(&Value::from(-0.0)), Some(&2));
        assert_eq!(histogram.get(&Value::from(1.5)), Some(&1));
    }

    #[test]
    fn database_histogram_unknown_column() {
        let database = _prepare_database();

        assert!(matches!(
            database.query_column_histogram("t", "c", None),
            Err(Error::UnknownColumn { .. })
        ));
    }
}
