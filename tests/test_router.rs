use filedrop::config::ServedRoot;
use filedrop::http::request::{Method, RequestBuilder};
use filedrop::http::response::StatusCode;
use filedrop::router::{Route, dispatch, resolve};

#[test]
fn test_resolve_routes() {
    assert_eq!(resolve(Method::GET, "/"), Route::Listing);
    assert_eq!(
        resolve(Method::GET, "/download/a%20b.txt"),
        Route::Download("a b.txt".to_string())
    );
    assert_eq!(resolve(Method::POST, "/upload"), Route::Upload);
    assert_eq!(resolve(Method::GET, "/style.css"), Route::Static("/style.css"));
    assert_eq!(resolve(Method::GET, "/upload"), Route::Static("/upload"));
}

#[test]
fn test_resolve_other_methods_are_not_found() {
    assert_eq!(resolve(Method::POST, "/"), Route::NotFound);
    assert_eq!(resolve(Method::POST, "/upload/extra"), Route::NotFound);
    assert_eq!(resolve(Method::PUT, "/upload"), Route::NotFound);
    assert_eq!(resolve(Method::DELETE, "/a.txt"), Route::NotFound);
    assert_eq!(resolve(Method::HEAD, "/"), Route::NotFound);
}

#[test]
fn test_download_name_decoding_is_lossy() {
    assert_eq!(
        resolve(Method::GET, "/download/%FFx"),
        Route::Download("\u{FFFD}x".to_string())
    );
}

#[tokio::test]
async fn test_dispatch_ignores_query_string_on_listing() {
    let tmp = tempfile::tempdir().unwrap();
    let root = ServedRoot::new(tmp.path()).unwrap();

    let req = RequestBuilder::new()
        .method(Method::GET)
        .path("/?sort=name")
        .build()
        .unwrap();

    let response = dispatch(&req, &root).await;
    assert_eq!(response.status, StatusCode::Ok);
}

#[tokio::test]
async fn test_dispatch_unknown_method_is_404() {
    let tmp = tempfile::tempdir().unwrap();
    let root = ServedRoot::new(tmp.path()).unwrap();

    let req = RequestBuilder::new()
        .method(Method::DELETE)
        .path("/a.txt")
        .build()
        .unwrap();

    let response = dispatch(&req, &root).await;
    assert_eq!(response.status, StatusCode::NotFound);
}
