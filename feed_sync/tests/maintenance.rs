mod common;

use pretty_assertions::assert_eq;

use common::MemoryStore;
use feed_sync::db::maintenance::{drop_all_tables, drop_tables};
use feed_sync::Error;

#[tokio::test]
async fn drop_all_goes_in_reverse_listing_order() {
    let store = MemoryStore::new()
        .with_table("categories", &["id"])
        .with_table("currencies", &["id"])
        .with_table("offers", &["id"]);

    let dropped = drop_all_tables(&store, "public", true).await.unwrap();

    assert_eq!(dropped, vec!["offers", "currencies", "categories"]);
    assert_eq!(
        store.executed(),
        vec![
            "DROP TABLE IF EXISTS \"public\".\"offers\" CASCADE",
            "DROP TABLE IF EXISTS \"public\".\"currencies\" CASCADE",
            "DROP TABLE IF EXISTS \"public\".\"categories\" CASCADE",
        ]
    );
}

#[tokio::test]
async fn drop_all_on_empty_schema_is_a_no_op() {
    let store = MemoryStore::new();
    assert!(drop_all_tables(&store, "feeds", false).await.unwrap().is_empty());
    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn drop_named_tables_without_cascade() {
    let store = MemoryStore::new();
    let tables = vec!["offers".to_string(), "odd\"name".to_string()];

    drop_tables(&store, "feeds", &tables, false).await.unwrap();

    assert_eq!(
        store.executed(),
        vec![
            "DROP TABLE IF EXISTS \"feeds\".\"offers\"",
            "DROP TABLE IF EXISTS \"feeds\".\"odd\"\"name\"",
        ]
    );
}

#[tokio::test]
async fn blank_arguments_are_rejected_before_any_drop() {
    let store = MemoryStore::new().with_table("offers", &["id"]);

    assert!(matches!(
        drop_all_tables(&store, " ", false).await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        drop_tables(&store, "public", &["offers".to_string(), "".to_string()], false).await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(store.executed().is_empty());
}
