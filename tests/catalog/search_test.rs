#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use databox::catalog::{Catalog, CatalogQuery, Record, SortOrder};
    use databox::schema::{FieldKind, FieldSpec, SchemaRegistry, TypeInfo};
    use databox::value::Value;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_catalog() -> Catalog {
        let mut schemas = SchemaRegistry::new();
        schemas.register(
            TypeInfo::new("Sample")
                .with_field(FieldSpec::new("title", FieldKind::Text))
                .with_field(FieldSpec::new("state", FieldKind::Text))
                .with_field(FieldSpec::new("sampled", FieldKind::Date)),
        );
        let mut catalog = Catalog::new(schemas);
        catalog.insert(
            Record::new("Sample")
                .with_field("title", "S-0001")
                .with_field("state", "published")
                .with_field("sampled", date(2024, 1, 10)),
        );
        catalog.insert(
            Record::new("Sample")
                .with_field("title", "S-0002")
                .with_field("state", "pending")
                .with_field("sampled", date(2024, 2, 20)),
        );
        catalog.insert(
            Record::new("Sample")
                .with_field("title", "S-0003")
                .with_field("state", "published")
                .with_field("sampled", date(2024, 3, 30)),
        );
        catalog.insert(Record::new("Client").with_field("title", "ACME"));
        catalog
    }

    fn titles(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.get("title").to_display()).collect()
    }

    #[test]
    fn test_content_type_filter() {
        let catalog = sample_catalog();
        let hits = catalog.search(&CatalogQuery::for_type("Sample"));
        assert_eq!(hits.len(), 3);
        let hits = catalog.search(&CatalogQuery::for_type("Client"));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_field_filter() {
        let catalog = sample_catalog();
        let query = CatalogQuery::for_type("Sample").with_filter("state", "published");
        assert_eq!(titles(&catalog.search(&query)), vec!["S-0001", "S-0003"]);
    }

    #[test]
    fn test_list_filter_matches_any_member() {
        let catalog = sample_catalog();
        let query = CatalogQuery::for_type("Sample").with_filter(
            "state",
            Value::List(vec![Value::str("pending"), Value::str("rejected")]),
        );
        assert_eq!(titles(&catalog.search(&query)), vec!["S-0002"]);
    }

    #[test]
    fn test_sort_descending() {
        let catalog = sample_catalog();
        let query =
            CatalogQuery::for_type("Sample").with_sort("sampled", SortOrder::Descending);
        assert_eq!(
            titles(&catalog.search(&query)),
            vec!["S-0003", "S-0002", "S-0001"]
        );
    }

    #[test]
    fn test_missing_sort_value_goes_last() {
        let mut catalog = sample_catalog();
        catalog.insert(Record::new("Sample").with_field("title", "S-0004"));
        let query = CatalogQuery::for_type("Sample").with_sort("sampled", SortOrder::Ascending);
        assert_eq!(
            titles(&catalog.search(&query)),
            vec!["S-0001", "S-0002", "S-0003", "S-0004"]
        );
    }

    #[test]
    fn test_limit() {
        let catalog = sample_catalog();
        let query = CatalogQuery::for_type("Sample")
            .with_sort("title", SortOrder::Ascending)
            .with_limit(2);
        assert_eq!(titles(&catalog.search(&query)), vec!["S-0001", "S-0002"]);

        // limit 0 means unlimited
        let unlimited = CatalogQuery::for_type("Sample").with_limit(0);
        assert_eq!(catalog.search(&unlimited).len(), 3);
    }

    #[test]
    fn test_date_range() {
        let catalog = sample_catalog();
        let mut query = CatalogQuery::for_type("Sample");
        query.date_index = Some("sampled".to_string());
        query.date_from = Some(date(2024, 2, 1));
        query.date_to = Some(date(2024, 3, 1));
        assert_eq!(titles(&catalog.search(&query)), vec!["S-0002"]);
    }

    #[test]
    fn test_date_range_excludes_records_without_the_index() {
        let mut catalog = sample_catalog();
        catalog.insert(Record::new("Sample").with_field("title", "S-0005"));
        let mut query = CatalogQuery::for_type("Sample");
        query.date_index = Some("sampled".to_string());
        query.date_from = Some(date(2024, 1, 1));
        assert_eq!(catalog.search(&query).len(), 3);
    }

    #[test]
    fn test_date_index_without_bounds_matches_everything() {
        let catalog = sample_catalog();
        let mut query = CatalogQuery::for_type("Sample");
        query.date_index = Some("sampled".to_string());
        assert_eq!(catalog.search(&query).len(), 3);
    }

    #[test]
    fn test_fixture_builds_a_catalog() {
        let fixture: databox::catalog::CatalogFixture = serde_json::from_str(
            r#"{
                "types": [
                    {"name": "Sample", "fields": [
                        {"name": "title", "kind": "text"},
                        {"name": "sampled", "kind": "date"}
                    ]}
                ],
                "records": [
                    {
                        "uid": "7d2f8c1a-1111-4a5b-9c3d-000000000001",
                        "content_type": "Sample",
                        "fields": {"title": "S-0001", "sampled": "2024-03-07"}
                    }
                ]
            }"#,
        )
        .unwrap();
        let catalog = fixture.into_catalog();
        assert_eq!(catalog.len(), 1);
        let hits = catalog.search(&CatalogQuery::for_type("Sample"));
        assert_eq!(hits[0].get("sampled"), Value::Date(date(2024, 3, 7)));
        assert!(catalog.schemas().field("Sample", "sampled").is_some());
    }

    #[test]
    fn test_parent_and_deref() {
        let mut schemas = SchemaRegistry::new();
        schemas.register(TypeInfo::new("Client").with_field(FieldSpec::new(
            "title",
            FieldKind::Text,
        )));
        schemas.register(
            TypeInfo::new("Sample")
                .with_field(FieldSpec::new("title", FieldKind::Text))
                .with_field(FieldSpec::new(
                    "client",
                    FieldKind::Reference {
                        allowed_types: vec!["Client".to_string()],
                    },
                )),
        );
        let mut catalog = Catalog::new(schemas);
        let client = catalog.insert(Record::new("Client").with_field("title", "ACME"));
        let sample = catalog.insert(
            Record::new("Sample")
                .with_field("title", "S-0001")
                .with_field("client", client)
                .with_parent(client),
        );

        let sample = catalog.get(sample).unwrap();
        let parent = catalog.parent_of(sample).unwrap();
        assert_eq!(parent.get("title"), Value::str("ACME"));

        let linked = catalog.deref(&sample.get("client")).unwrap();
        assert_eq!(linked.uid, client);
    }
}
