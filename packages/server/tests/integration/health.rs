use crate::common::{TestApp, routes};

#[tokio::test]
async fn health_reports_database_up() {
    let app = TestApp::spawn().await;

    let res = app.get(routes::HEALTH).await;
    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["success"], true);
}

#[tokio::test]
async fn openapi_lists_pass_all_assets() {
    let app = TestApp::spawn().await;

    let res = app.get("/scalar").await;
    assert_eq!(res.status, 200);
    assert!(res.text.contains("/api/pass-all-assets"));
}
