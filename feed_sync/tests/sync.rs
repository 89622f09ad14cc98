mod common;

use pretty_assertions::assert_eq;
use rstest::*;

use common::{catalog, MemoryStore};
use feed_sync::schema::types::{Param, PrimitiveType, SqlValue};
use feed_sync::{Document, Error, InferredSchema, SchemaInference, SyncMode, Synchronizer};

#[fixture]
fn feed() -> Document {
    catalog(
        r#"
        <categories>
            <category id="1">Books</category>
            <category id="2" parentId="1">Poetry</category>
        </categories>
        <offers>
            <offer id="10" available="true">
                <price>19.99</price>
                <name>Leaves of Grass</name>
            </offer>
            <offer id="11" available="false">
                <price>7,50</price>
                <name>Odes</name>
            </offer>
        </offers>
        "#,
    )
}

fn infer(document: &Document) -> InferredSchema {
    SchemaInference::new("shop").infer(document)
}

#[rstest]
#[tokio::test]
async fn upsert_creates_missing_tables_and_writes_every_row(feed: Document) {
    let store = MemoryStore::new();
    let schema = infer(&feed);

    let report = Synchronizer::new(&store, "shop", SyncMode::Upsert)
        .sync(&feed, &schema)
        .await;

    assert!(report.is_success());
    let creates = store.creates();
    assert_eq!(creates.len(), 2);
    assert!(creates[0].starts_with("CREATE TABLE IF NOT EXISTS \"public\".\"categories\""));
    assert!(creates[1].contains("\"created_at\" timestamptz NOT NULL DEFAULT now()"));

    let writes = store.writes();
    assert_eq!(writes.len(), 4);
    assert_eq!(
        writes[2].sql,
        "INSERT INTO \"public\".\"offers\" (\"id\", \"available\", \"price\", \"name\") VALUES ($1, $2, $3, $4) \
         ON CONFLICT (\"id\") DO UPDATE SET \"available\" = EXCLUDED.\"available\", \
         \"price\" = EXCLUDED.\"price\", \"name\" = EXCLUDED.\"name\""
    );
    assert_eq!(writes[2].params[0], Param::new(PrimitiveType::Integer, SqlValue::Integer(10)));
    assert_eq!(writes[2].params[1].value, SqlValue::Boolean(true));
    assert_eq!(writes[3].params[2].value, SqlValue::Text("7,50".to_string()));

    let offers = report.outcomes[1].result.as_ref().unwrap();
    assert!(offers.created);
    assert_eq!(offers.rows_written, 2);
    assert_eq!(offers.rows_affected, 2);
}

#[rstest]
#[tokio::test]
async fn absent_attributes_are_left_out_of_the_insert(feed: Document) {
    let store = MemoryStore::new();
    let schema = infer(&feed);

    Synchronizer::new(&store, "shop", SyncMode::Upsert)
        .sync_table(&feed, &schema, "categories")
        .await
        .unwrap();

    let writes = store.writes();
    // the first category has no parentId entry, so the column is left out
    assert_eq!(
        writes[0].sql,
        "INSERT INTO \"public\".\"categories\" (\"id\", \"category\") VALUES ($1, $2) \
         ON CONFLICT (\"id\") DO UPDATE SET \"category\" = EXCLUDED.\"category\""
    );
    assert_eq!(
        writes[1].sql,
        "INSERT INTO \"public\".\"categories\" (\"id\", \"category\", \"parentid\") VALUES ($1, $2, $3) \
         ON CONFLICT (\"id\") DO UPDATE SET \"category\" = EXCLUDED.\"category\", \
         \"parentid\" = EXCLUDED.\"parentid\""
    );
}

#[rstest]
#[tokio::test]
async fn existing_matching_table_is_not_recreated(feed: Document) {
    let store = MemoryStore::new()
        .with_table("offers", &["id", "available", "price", "name", "created_at"]);
    let schema = infer(&feed);

    let stats = Synchronizer::new(&store, "shop", SyncMode::Upsert)
        .sync_table(&feed, &schema, "offers")
        .await
        .unwrap();

    assert!(!stats.created);
    assert_eq!(stats.rows_written, 2);
    assert!(store.creates().is_empty());
}

#[rstest]
#[tokio::test]
async fn drifted_table_fails_with_missing_columns(feed: Document) {
    let store = MemoryStore::new().with_table("offers", &["id", "name"]);
    let schema = infer(&feed);

    let err = Synchronizer::new(&store, "shop", SyncMode::Update)
        .sync_table(&feed, &schema, "offers")
        .await
        .unwrap_err();

    match err {
        Error::SchemaMismatch {
            table,
            missing,
            unexpected,
            ..
        } => {
            assert_eq!(table, "offers");
            assert!(missing.contains("price"));
            assert!(missing.contains("available"));
            assert!(unexpected.is_empty());
        }
        other => panic!("expected a schema mismatch, got {other:?}"),
    }
    assert!(store.writes().is_empty());
}

#[rstest]
#[tokio::test]
async fn update_mode_requires_a_live_table(feed: Document) {
    let store = MemoryStore::new();
    let schema = infer(&feed);

    let err = Synchronizer::new(&store, "shop", SyncMode::Update)
        .sync_table(&feed, &schema, "offers")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::LiveTableNotFound(ref t) if t == "offers"));
    assert!(store.creates().is_empty());
}

#[tokio::test]
async fn update_mode_rejects_blank_ids_before_writing() {
    let feed = catalog(r#"<offers><offer id=""><name>x</name></offer></offers>"#);
    let store = MemoryStore::new().with_table("offers", &["id", "name", "created_at"]);
    let schema = infer(&feed);

    let err = Synchronizer::new(&store, "shop", SyncMode::Update)
        .sync_table(&feed, &schema, "offers")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn update_mode_skips_rows_with_nothing_to_set() {
    let feed = catalog(
        r#"<offers>
            <offer id="1"><name>Tea</name></offer>
            <offer id="2"/>
        </offers>"#,
    );
    let store = MemoryStore::new().with_table("offers", &["id", "name"]);
    let schema = infer(&feed);

    let stats = Synchronizer::new(&store, "shop", SyncMode::Update)
        .sync_table(&feed, &schema, "offers")
        .await
        .unwrap();

    assert_eq!(stats.rows_written, 1);
    assert_eq!(stats.rows_skipped, 1);
    let writes = store.writes();
    assert_eq!(writes[0].sql, "UPDATE \"public\".\"offers\" SET \"name\" = $2 WHERE \"id\" = $1");
    assert_eq!(writes[0].params[0].value, SqlValue::Integer(1));
}

#[tokio::test]
async fn coercion_failure_stops_only_its_table() {
    let feed = catalog(
        r#"
        <offers>
            <offer id="1"><name>Tea</name></offer>
            <offer id="abc"><name>Coffee</name></offer>
            <offer id="3"><name>Cocoa</name></offer>
        </offers>
        <currencies>
            <currency id="1" rate="1"/>
        </currencies>
        "#,
    );
    let store = MemoryStore::new();
    let schema = infer(&feed);

    let report = Synchronizer::new(&store, "shop", SyncMode::Upsert)
        .sync(&feed, &schema)
        .await;

    assert!(!report.is_success());
    let failures: Vec<&str> = report.failures().map(|(table, _)| table).collect();
    assert_eq!(failures, vec!["offers"]);
    assert!(matches!(
        report.outcomes[0].result,
        Err(Error::CoercionError { ref column, target: PrimitiveType::Integer, .. }) if column == "id"
    ));

    // the row before the failure stays written, the one after is never attempted
    let tables: Vec<String> = store
        .writes()
        .iter()
        .map(|w| w.sql.split('"').nth(3).unwrap_or_default().to_string())
        .collect();
    assert_eq!(tables, vec!["offers", "currencies"]);
}

#[tokio::test]
async fn tables_without_id_are_created_but_rows_are_rejected() {
    let feed = catalog(r#"<promos><promo type="gift"><name>x</name></promo></promos>"#);
    let store = MemoryStore::new();
    let schema = infer(&feed);

    let err = Synchronizer::new(&store, "shop", SyncMode::Upsert)
        .sync_table(&feed, &schema, "promos")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidArgument(_)));
    let creates = store.creates();
    assert_eq!(creates.len(), 1);
    assert!(creates[0].starts_with("CREATE TABLE IF NOT EXISTS \"public\".\"promos\""));
    assert!(!creates[0].contains("PRIMARY KEY"));
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn configured_schema_qualifies_ddl_and_writes() {
    let feed = catalog(
        r#"<offers>
            <offer id="1"><name>Tea</name></offer>
        </offers>"#,
    );
    let schema = infer(&feed);

    let store = MemoryStore::in_schema("feeds");
    Synchronizer::new(&store, "shop", SyncMode::Upsert)
        .sync_table(&feed, &schema, "offers")
        .await
        .unwrap();
    assert!(store.creates()[0].starts_with("CREATE TABLE IF NOT EXISTS \"feeds\".\"offers\" ("));
    assert!(store.writes()[0].sql.starts_with("INSERT INTO \"feeds\".\"offers\" ("));

    // a second run sees the table in the same schema and only validates it
    let store = MemoryStore::in_schema("feeds").with_table("offers", &["id", "name", "created_at"]);
    let stats = Synchronizer::new(&store, "shop", SyncMode::Update)
        .sync_table(&feed, &schema, "offers")
        .await
        .unwrap();
    assert!(!stats.created);
    assert_eq!(
        store.writes()[0].sql,
        "UPDATE \"feeds\".\"offers\" SET \"name\" = $2 WHERE \"id\" = $1"
    );
}

#[tokio::test]
async fn document_created_at_leaves_the_audit_column_alone() {
    let feed = catalog(
        r#"<offers>
            <offer id="1" created_at="yesterday"><name>Tea</name></offer>
        </offers>"#,
    );
    let store = MemoryStore::new();
    let schema = infer(&feed);

    Synchronizer::new(&store, "shop", SyncMode::Upsert)
        .sync_table(&feed, &schema, "offers")
        .await
        .unwrap();

    let creates = store.creates();
    assert_eq!(creates[0].matches("\"created_at\"").count(), 1);
    assert!(creates[0].contains("\"created_at\" timestamptz NOT NULL DEFAULT now()"));

    let write = &store.writes()[0];
    assert_eq!(
        write.sql,
        "INSERT INTO \"public\".\"offers\" (\"id\", \"name\") VALUES ($1, $2) \
         ON CONFLICT (\"id\") DO UPDATE SET \"name\" = EXCLUDED.\"name\""
    );
    assert_eq!(write.params.len(), 2);
}

#[rstest]
#[tokio::test]
async fn unknown_table_names_are_reported(feed: Document) {
    let store = MemoryStore::new();
    let schema = infer(&feed);
    let synchronizer = Synchronizer::new(&store, "shop", SyncMode::Upsert);

    assert!(matches!(
        synchronizer.sync_table(&feed, &schema, "gifts").await,
        Err(Error::TableNotFound(_))
    ));
    assert!(matches!(
        synchronizer.sync_table(&feed, &schema, " ").await,
        Err(Error::InvalidArgument(_))
    ));
}

#[tokio::test]
async fn detected_child_types_are_coerced_before_binding() {
    let feed = catalog(
        r#"<offers><offer id="7"><price>19,99</price><updated>2024-01-31T10:00:00</updated></offer></offers>"#,
    );
    let store = MemoryStore::new();
    let schema = SchemaInference::new("shop").detect_child_types(true).infer(&feed);

    // "19,99" is text to the detector, so the column stays varchar
    assert_eq!(schema.tables[0].columns[1].data_type, PrimitiveType::Text);
    assert_eq!(schema.tables[0].columns[2].data_type, PrimitiveType::Timestamp);

    Synchronizer::new(&store, "shop", SyncMode::Upsert)
        .sync(&feed, &schema)
        .await;

    let params = &store.writes()[0].params;
    assert_eq!(params[1].value, SqlValue::Text("19,99".to_string()));
    assert!(matches!(params[2].value, SqlValue::Timestamp(_)));
}
