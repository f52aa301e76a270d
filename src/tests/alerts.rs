use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_alerts() {
    let mut app = helper::setup_demo_app().await;

    assert!(helper::list_alerts(&mut app).await.is_empty());

    let (status_code, alert) = helper::demo_alert(&mut app).await;
    assert_eq!(StatusCode::CREATED, status_code);
    assert_eq!(1, alert["id"].as_u64().unwrap());
    assert_eq!(
        Some("DEMO ALERT: This is a high-priority test alert!"),
        alert["message"].as_str()
    );
    assert_eq!(Some("high"), alert["riskLevel"].as_str());
    assert!(alert["timestamp"].is_string());

    let (_, alert) = helper::demo_alert(&mut app).await;
    assert_eq!(2, alert["id"].as_u64().unwrap());

    // newest first
    let alerts = helper::list_alerts(&mut app).await;
    let ids = alerts
        .iter()
        .map(|alert| alert["id"].as_u64().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(vec![2, 1], ids);

    let (_, data) = helper::root(&mut app).await;
    assert_eq!(2, data["alerts"].as_u64().unwrap());
}
