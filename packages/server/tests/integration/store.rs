use chrono::Utc;
use ::common::CheckStatus;
use ::common::inspection::types::{NewAssetCheck, NewCheckGroup, NewCheckItem};
use ::common::inspection::{ChunkTransaction, InspectionStore};
use server::store::SeaOrmStore;

use crate::common::TestApp;

fn store(app: &TestApp) -> SeaOrmStore {
    SeaOrmStore::new(app.db.clone(), 1000)
}

fn asset_check(asset_id: i32) -> NewAssetCheck {
    NewAssetCheck {
        asset_id,
        owner: "inspector-7".to_string(),
        updated_at: Utc::now(),
        status: CheckStatus::Pass,
    }
}

mod chunk_scope {
    use super::*;

    #[tokio::test]
    async fn commit_persists_the_whole_tree() {
        let app = TestApp::spawn().await;
        let store = store(&app);

        let mut txn = store.begin().await.unwrap();
        let asset_check_id = txn.insert_asset_check(asset_check(1)).await.unwrap();
        let check_group_id = txn
            .insert_check_group(NewCheckGroup {
                name: "Exterior".to_string(),
                asset_check_id,
                status: CheckStatus::Pass,
            })
            .await
            .unwrap();
        txn.insert_check_item(NewCheckItem {
            name: "No dents".to_string(),
            check_group_id,
            status: CheckStatus::Pass,
            updated_at: Utc::now(),
        })
        .await
        .unwrap();
        txn.commit().await.unwrap();

        let checks = app.asset_checks().await;
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].id, asset_check_id);
        let groups = app.check_groups().await;
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].asset_check_id, asset_check_id);
        assert_eq!(app.check_item_count().await, 1);
    }

    #[tokio::test]
    async fn rollback_discards_its_rows() {
        let app = TestApp::spawn().await;
        let store = store(&app);

        let mut txn = store.begin().await.unwrap();
        txn.insert_asset_check(asset_check(1)).await.unwrap();
        txn.insert_asset_check(asset_check(2)).await.unwrap();
        txn.rollback().await.unwrap();

        assert!(app.asset_checks().await.is_empty());
    }

    #[tokio::test]
    async fn dropped_scope_discards_its_rows() {
        let app = TestApp::spawn().await;
        let store = store(&app);

        {
            let mut txn = store.begin().await.unwrap();
            txn.insert_asset_check(asset_check(1)).await.unwrap();
        }

        assert!(app.asset_checks().await.is_empty());

        // The connection is usable again after the implicit rollback.
        let mut txn = store.begin().await.unwrap();
        txn.insert_asset_check(asset_check(2)).await.unwrap();
        txn.commit().await.unwrap();

        let checks = app.asset_checks().await;
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].asset_id, 2);
    }
}

mod lookups {
    use super::*;

    #[tokio::test]
    async fn child_locations_follow_parent_ids() {
        let app = TestApp::spawn().await;
        app.seed_location(1, None).await;
        app.seed_location(2, Some(1)).await;
        app.seed_location(3, Some(1)).await;
        app.seed_location(4, Some(2)).await;

        let mut children = store(&app).child_locations(&[1]).await.unwrap();
        children.sort();
        assert_eq!(children, vec![2, 3]);
    }

    #[tokio::test]
    async fn assets_carry_their_product_category() {
        let app = TestApp::spawn().await;
        app.seed_location(1, None).await;
        app.seed_product(10, 100).await;
        app.seed_asset(5, 10, 1).await;

        let assets = store(&app).assets_at(&[1]).await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, 5);
        assert_eq!(assets[0].product_id, 10);
        assert_eq!(assets[0].category_id, 100);
    }
}
