use ::common::CheckStatus;
use serde_json::json;

use crate::common::{TestApp, routes};

/// Site 1 with rooms 2 and 3, shelf 4 inside room 3, and an unrelated site 9.
/// Category 100 has two groups (3 items total). Category 200 has no templates.
async fn seed_site(app: &TestApp) {
    app.seed_location(1, None).await;
    app.seed_location(2, Some(1)).await;
    app.seed_location(3, Some(1)).await;
    app.seed_location(4, Some(3)).await;
    app.seed_location(9, None).await;

    app.seed_product(10, 100).await;
    app.seed_product(20, 200).await;

    app.seed_group_template(1000, "Exterior", 100).await;
    app.seed_group_template(1001, "Electrical", 100).await;
    app.seed_item_template(5000, "No dents", 1000).await;
    app.seed_item_template(5001, "Paint intact", 1000).await;
    app.seed_item_template(5002, "Cable sheath", 1001).await;
}

mod passing {
    use super::*;

    #[tokio::test]
    async fn passes_every_asset_in_the_subtree() {
        let app = TestApp::spawn().await;
        seed_site(&app).await;
        app.seed_asset(1, 10, 2).await;
        app.seed_asset(2, 10, 4).await;
        app.seed_asset(3, 10, 9).await;

        let res = app.pass_all_assets(1, "inspector-7").await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["success"], true);
        assert_eq!(res.body["message"], "Successfully passed all assets");
        assert_eq!(res.body["summary"]["locations"], 4);
        assert_eq!(res.body["summary"]["assets"], 2);
        assert_eq!(res.body["summary"]["assetChecks"], 2);
        assert_eq!(res.body["summary"]["checkGroups"], 4);
        assert_eq!(res.body["summary"]["checkItems"], 6);

        let checks = app.asset_checks().await;
        let mut asset_ids: Vec<i32> = checks.iter().map(|c| c.asset_id).collect();
        asset_ids.sort();
        assert_eq!(asset_ids, vec![1, 2]);
        assert!(checks.iter().all(|c| c.owner == "inspector-7"));
        assert!(checks.iter().all(|c| c.status == CheckStatus::Pass));

        let groups = app.check_groups().await;
        assert_eq!(groups.len(), 4);
        assert!(groups.iter().all(|g| g.status == CheckStatus::Pass));
        assert_eq!(app.check_item_count().await, 6);
    }

    #[tokio::test]
    async fn asset_without_templates_gets_a_bare_check() {
        let app = TestApp::spawn().await;
        seed_site(&app).await;
        app.seed_asset(1, 20, 2).await;

        let res = app.pass_all_assets(2, "inspector-7").await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["summary"]["assetChecks"], 1);
        assert_eq!(res.body["summary"]["checkGroups"], 0);

        assert_eq!(app.asset_checks().await.len(), 1);
        assert!(app.check_groups().await.is_empty());
        assert_eq!(app.check_item_count().await, 0);
    }

    #[tokio::test]
    async fn empty_location_succeeds_without_writes() {
        let app = TestApp::spawn().await;
        seed_site(&app).await;

        let res = app.pass_all_assets(404, "inspector-7").await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["summary"]["locations"], 1);
        assert_eq!(res.body["summary"]["chunks"], 0);
        assert!(app.asset_checks().await.is_empty());
    }

    #[tokio::test]
    async fn many_assets_are_written_in_chunks() {
        let app = TestApp::spawn().await;
        seed_site(&app).await;
        for id in 1..=23 {
            app.seed_asset(id, 10, 2 + id % 3).await;
        }

        let res = app.pass_all_assets(1, "inspector-7").await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["summary"]["chunks"], 3);
        assert_eq!(app.asset_checks().await.len(), 23);
        assert_eq!(app.check_item_count().await, 23 * 3);
    }

    #[tokio::test]
    async fn cyclic_hierarchy_terminates() {
        let app = TestApp::spawn().await;
        app.seed_location(1, Some(2)).await;
        app.seed_location(2, Some(1)).await;
        app.seed_location(3, Some(2)).await;
        app.seed_product(10, 100).await;
        app.seed_asset(1, 10, 3).await;

        let res = app.pass_all_assets(1, "inspector-7").await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["summary"]["locations"], 3);
        assert_eq!(res.body["summary"]["assetChecks"], 1);
    }

    #[tokio::test]
    async fn repeated_runs_append_new_checks() {
        let app = TestApp::spawn().await;
        seed_site(&app).await;
        app.seed_asset(1, 10, 2).await;

        assert_eq!(app.pass_all_assets(1, "first").await.status, 200);
        assert_eq!(app.pass_all_assets(1, "second").await.status, 200);

        let checks = app.asset_checks().await;
        assert_eq!(checks.len(), 2);
        assert!(checks.iter().any(|c| c.owner == "first"));
        assert!(checks.iter().any(|c| c.owner == "second"));
    }
}

mod validation {
    use super::*;

    #[tokio::test]
    async fn malformed_body_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.post_raw(routes::PASS_ALL_ASSETS, "{not json").await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["success"], false);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn missing_user_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_json(routes::PASS_ALL_ASSETS, &json!({ "locationId": 1 }))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["message"], "userId is required");
    }

    #[tokio::test]
    async fn blank_user_is_rejected_before_any_write() {
        let app = TestApp::spawn().await;
        seed_site(&app).await;
        app.seed_asset(1, 10, 2).await;

        let res = app.pass_all_assets(1, "   ").await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["message"], "userId must not be empty");
        assert!(app.asset_checks().await.is_empty());
    }
}
