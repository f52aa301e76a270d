use axum::http::StatusCode;
use serde_json::json;

use crate::tests::helper;
use crate::view::PageSize;

fn ids(page: &helper::Page) -> Vec<i64> {
    page.aliases.iter().map(|alias| alias.id).collect()
}

#[tokio::test]
async fn test_view_defaults() {
    let mut app = helper::setup_demo_app().await;

    let view = helper::view(&mut app).await;
    assert_eq!(Some("all"), view["status"].as_str());
    assert_eq!(Some(""), view["search"].as_str());
    assert_eq!(Some("created"), view["sortField"].as_str());
    assert_eq!(Some("desc"), view["sortDirection"].as_str());
    assert_eq!(1, view["page"].as_u64().unwrap());
    assert_eq!(8, view["pageSize"].as_u64().unwrap());
}

#[tokio::test]
async fn test_filter_and_search() {
    let mut app = helper::setup_demo_app().await;

    let (status_code, page, _) =
        helper::maybe_update_view(&mut app, json!({ "status": "active" })).await;
    assert_eq!(StatusCode::OK, status_code);
    let page = page.unwrap();
    assert_eq!(5, page.total);
    assert!(page.aliases.iter().all(|alias| alias.status == "active"));

    let (_, page, _) = helper::maybe_update_view(&mut app, json!({ "search": "SHOP" })).await;
    let page = page.unwrap();
    assert_eq!(vec![1], ids(&page));

    // the search is taken as typed
    let (_, page, _) = helper::maybe_update_view(&mut app, json!({ "search": "john " })).await;
    assert_eq!(0, page.unwrap().total);

    let view = helper::view(&mut app).await;
    assert_eq!(Some("john "), view["search"].as_str());

    // the status filter is still applied
    let (_, page, _) = helper::maybe_update_view(&mut app, json!({ "search": "john" })).await;
    assert_eq!(5, page.unwrap().total);

    let (_, page, _) =
        helper::maybe_update_view(&mut app, json!({ "status": "all", "search": "" })).await;
    assert_eq!(8, page.unwrap().total);

    let (_, page, _) = helper::maybe_update_view(&mut app, json!({ "search": "nothing" })).await;
    let page = page.unwrap();
    assert_eq!(0, page.total);
    assert_eq!(1, page.last_page);
    assert!(page.aliases.is_empty());
}

#[tokio::test]
async fn test_invalid_view_update() {
    let mut app = helper::setup_demo_app().await;

    let (status_code, _, error) =
        helper::maybe_update_view(&mut app, json!({ "status": "bogus" })).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    let error = error.unwrap();
    assert_eq!("Invalid status filter", error.error);
    assert_eq!(
        Some(r#"Unknown status "bogus""#.to_string()),
        error.description
    );

    let (status_code, _, error) =
        helper::maybe_update_view(&mut app, json!({ "sortDirection": "sideways" })).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Invalid sort direction", error.unwrap().error);

    let (status_code, _, error) = helper::maybe_update_view(&mut app, json!({})).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Nothing to update", error.unwrap().error);

    // nothing changed
    let view = helper::view(&mut app).await;
    assert_eq!(Some("all"), view["status"].as_str());
    assert_eq!(Some("desc"), view["sortDirection"].as_str());
}

#[tokio::test]
async fn test_sort() {
    let mut app = helper::setup_demo_app().await;

    let (_, page, _) = helper::maybe_update_view(
        &mut app,
        json!({ "sortField": "email", "sortDirection": "asc" }),
    )
    .await;
    assert_eq!(vec![5, 4, 8, 2, 1, 3, 7, 6], ids(&page.unwrap()));

    // same column flips the direction
    let page = helper::sort_on(&mut app, "email").await;
    assert_eq!(vec![6, 7, 3, 1, 2, 8, 4, 5], ids(&page));

    // other column starts descending
    let page = helper::sort_on(&mut app, "service").await;
    assert_eq!(7, page.aliases[0].id);
    assert_eq!(5, page.aliases[7].id);

    // unknown columns sort on the creation date
    let page = helper::sort_on(&mut app, "bogus").await;
    assert_eq!(vec![4, 7, 1, 2, 6, 5, 8, 3], ids(&page));

    let view = helper::view(&mut app).await;
    assert_eq!(Some("created"), view["sortField"].as_str());
    assert_eq!(Some("desc"), view["sortDirection"].as_str());
}

#[tokio::test]
async fn test_sort_keeps_missing_part() {
    let mut app = helper::setup_demo_app().await;

    helper::sort_on(&mut app, "service").await;

    let (status_code, page, _) =
        helper::maybe_update_view(&mut app, json!({ "sortDirection": "asc" })).await;
    assert_eq!(StatusCode::OK, status_code);
    let page = page.unwrap();
    assert_eq!(5, page.aliases[0].id);
    assert_eq!(7, page.aliases[7].id);

    let view = helper::view(&mut app).await;
    assert_eq!(Some("service"), view["sortField"].as_str());
    assert_eq!(Some("asc"), view["sortDirection"].as_str());

    let (_, page, _) = helper::maybe_update_view(&mut app, json!({ "sortField": "email" })).await;
    assert_eq!(vec![5, 4, 8, 2, 1, 3, 7, 6], ids(&page.unwrap()));

    let view = helper::view(&mut app).await;
    assert_eq!(Some("email"), view["sortField"].as_str());
    assert_eq!(Some("asc"), view["sortDirection"].as_str());
}

#[tokio::test]
async fn test_paging() {
    let mut app =
        helper::setup_test_app_with_page_size(helper::closed_upstream(), PageSize::from_setting(3))
            .await;

    let page = helper::list_aliases(&mut app).await;
    assert_eq!(vec![4, 7, 1], ids(&page));
    assert_eq!(3, page.last_page);

    let page = helper::change_page(&mut app, 2).await;
    assert_eq!(vec![2, 6, 5], ids(&page));
    assert_eq!(2, page.page);
    assert!(!page.clamped);

    let page = helper::change_page(&mut app, 99).await;
    assert_eq!(vec![8, 3], ids(&page));
    assert_eq!(3, page.page);
    assert_eq!(99, page.requested_page);
    assert!(page.clamped);

    let page = helper::change_page(&mut app, 0).await;
    assert_eq!(1, page.page);
    assert!(page.clamped);

    // any filter change goes back to the first page
    helper::change_page(&mut app, 3).await;
    let (_, page, _) = helper::maybe_update_view(&mut app, json!({ "search": "john" })).await;
    let page = page.unwrap();
    assert_eq!(1, page.page);
    assert_eq!(vec![4, 7, 1], ids(&page));

    // a delete keeps the page
    helper::change_page(&mut app, 2).await;
    helper::maybe_delete_alias(&mut app, 2).await;
    let page = helper::list_aliases(&mut app).await;
    assert_eq!(2, page.page);
    assert_eq!(vec![6, 5, 8], ids(&page));

    // everything on a single page
    let page = helper::list_all_aliases(&mut app).await;
    assert_eq!(7, page.aliases.len());
    assert_eq!(1, page.last_page);
}

#[tokio::test]
async fn test_unbounded_page_size() {
    let mut app =
        helper::setup_test_app_with_page_size(helper::closed_upstream(), PageSize::from_setting(0))
            .await;

    let page = helper::list_aliases(&mut app).await;
    assert_eq!(8, page.aliases.len());
    assert_eq!(1, page.last_page);

    let view = helper::view(&mut app).await;
    assert!(view["pageSize"].is_null());
}
