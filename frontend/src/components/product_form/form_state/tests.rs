use super::*;
use crate::components::product_form::previews::MockPreviews;
use crate::web::MockHttpClient;
use catalog_shared::protocol::HttpMethod;
use serde_json::json;

// =========================================================
// 辅助函数
// =========================================================

type TestForm = ProductForm<MockPreviews>;

fn api() -> CatalogApi<MockHttpClient> {
    CatalogApi::new("", MockHttpClient::new())
}

fn create_form() -> (TestForm, MockPreviews) {
    let previews = MockPreviews::new();
    (ProductForm::new(None, previews.clone()), previews)
}

fn edit_form(id: u64) -> (TestForm, MockPreviews) {
    let previews = MockPreviews::new();
    (ProductForm::new(Some(id), previews.clone()), previews)
}

fn fill(form: &TestForm, sku: &str, name: &str, price: &str) {
    form.set_field(ProductField::Sku, sku.to_string());
    form.set_field(ProductField::Name, name.to_string());
    form.set_field(ProductField::Price, price.to_string());
}

fn files(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

fn sent_body(api: &CatalogApi<MockHttpClient>) -> serde_json::Value {
    let req = api.client().last_request().unwrap();
    serde_json::from_str(req.body.as_deref().unwrap()).unwrap()
}

fn mock_product(api: &CatalogApi<MockHttpClient>, id: u64, price: serde_json::Value) {
    api.client().mock_response(
        HttpMethod::Get,
        &format!("/api/products/{}", id),
        200,
        json!({
            "id": id,
            "sku": "LAMP-1",
            "name": "Desk lamp",
            "price": price,
            "images": ["https://cdn.test/lamp.png"]
        }),
    );
}

// =========================================================
// mount 测试
// =========================================================

#[tokio::test]
async fn test_create_mode_mounts_ready_without_request() {
    let api = api();
    let (form, _) = create_form();
    assert_eq!(form.phase.get_untracked(), FormPhase::Idle);

    form.mount(&api).await;

    assert_eq!(form.phase.get_untracked(), FormPhase::Ready);
    assert_eq!(api.client().request_count(), 0);
    assert_eq!(form.values.get_untracked(), ProductFormValues::default());
}

#[tokio::test]
async fn test_edit_mode_populates_values_and_seeds_previews() {
    let api = api();
    mock_product(&api, 4, json!(19.99));
    let (form, registry) = edit_form(4);

    form.mount(&api).await;

    let values = form.values.get_untracked();
    assert_eq!(values.sku, "LAMP-1");
    assert_eq!(values.name, "Desk lamp");
    assert_eq!(values.price, "19.99");
    assert!(values.images.is_empty());
    assert_eq!(
        form.previews.get_untracked(),
        vec!["https://cdn.test/lamp.png".to_string()]
    );
    assert!(!form.loading.get_untracked());
    assert_eq!(form.phase.get_untracked(), FormPhase::Ready);
    assert!(registry.live().is_empty());
}

#[tokio::test]
async fn test_whole_number_price_renders_without_fraction() {
    let api = api();
    mock_product(&api, 5, json!(20));
    let (form, _) = edit_form(5);

    form.mount(&api).await;

    assert_eq!(form.values.get_untracked().price, "20");
}

#[tokio::test]
async fn test_edit_mode_fetch_failure_leaves_fields_empty() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Get, "/api/products/8", 500, json!({}));
    let (form, _) = edit_form(8);

    form.mount(&api).await;

    assert_eq!(form.api_error.get_untracked().as_deref(), Some(FETCH_FAILED));
    assert_eq!(form.values.get_untracked(), ProductFormValues::default());
    assert!(form.previews.get_untracked().is_empty());
    assert!(!form.loading.get_untracked());
    assert_eq!(form.phase.get_untracked(), FormPhase::Ready);
}

// =========================================================
// 字段编辑与校验测试
// =========================================================

#[test]
fn test_field_edit_touches_one_field_and_keeps_errors() {
    let (form, _) = create_form();
    form.validate();
    let errors_before = form.errors.get_untracked();

    form.set_field(ProductField::Name, "Chair".to_string());

    let values = form.values.get_untracked();
    assert_eq!(values.name, "Chair");
    assert_eq!(values.sku, "");
    assert_eq!(values.price, "");
    assert_eq!(form.errors.get_untracked(), errors_before);
}

#[test]
fn test_all_failures_reported_together() {
    let (form, _) = create_form();

    let errors = form.validate();

    assert_eq!(errors.field(FIELD_SKU), Some("SKU is required"));
    assert_eq!(errors.field(FIELD_NAME), Some("Name is required"));
    assert_eq!(errors.field(FIELD_PRICE), Some("Price is required"));
    assert_eq!(errors.field(FIELD_IMAGES), Some("At least one image is required"));
    assert_eq!(form.errors.get_untracked(), errors);
}

#[test]
fn test_price_must_be_positive_number() {
    for bad in ["0", "-5", "abc", "NaN", "inf", " ", "1,5"] {
        let (form, _) = create_form();
        fill(&form, "S", "N", bad);
        let errors = form.validate();
        assert_eq!(
            errors.field(FIELD_PRICE),
            Some("Price must be a positive number"),
            "{bad:?}"
        );
    }

    for good in ["19.99", " 12 ", "1e3", "0.01"] {
        let (form, _) = create_form();
        fill(&form, "S", "N", good);
        assert!(form.validate().field(FIELD_PRICE).is_none(), "{good:?}");
    }
}

#[test]
fn test_parse_price() {
    assert_eq!(parse_price("19.99"), Some(19.99));
    assert_eq!(parse_price("0"), None);
    assert_eq!(parse_price(""), None);
}

#[test]
fn test_validation_regenerates_wholesale() {
    let (form, _) = create_form();
    form.validate();
    assert_eq!(form.errors.get_untracked().field_count(), 4);

    fill(&form, "S", "N", "3");
    form.validate();

    let errors = form.errors.get_untracked();
    assert_eq!(errors.field_count(), 1);
    assert!(errors.field(FIELD_IMAGES).is_some());
}

#[test]
fn test_edit_mode_accepts_no_images() {
    let (form, _) = edit_form(1);
    fill(&form, "S", "N", "3");

    assert!(form.validate().is_empty());
}

// =========================================================
// submit 测试
// =========================================================

#[tokio::test]
async fn test_create_posts_parsed_price_and_previews() {
    let api = api();
    api.client().mock_empty(HttpMethod::Post, "/api/products", 201);
    let (form, registry) = create_form();
    form.mount(&api).await;
    fill(&form, "CH-1", "Chair", "19.99");
    form.select_images(&files(&["a.png", "b.png"])).unwrap();

    let outcome = form.submit(&api).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Saved {
            redirect: AppRoute::Products
        }
    );
    let req = api.client().last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Post);
    assert_eq!(req.url, "/api/products");
    let body = sent_body(&api);
    assert_eq!(body["price"], json!(19.99));
    assert_eq!(body["sku"], json!("CH-1"));
    assert_eq!(body["images"], json!(registry.live()));
    assert_eq!(form.phase.get_untracked(), FormPhase::Saved);
    assert!(!form.loading.get_untracked());
}

#[tokio::test]
async fn test_create_without_images_sends_nothing() {
    let api = api();
    let (form, _) = create_form();
    fill(&form, "S", "N", "3");

    let outcome = form.submit(&api).await;

    assert_eq!(outcome, SubmitOutcome::Invalid);
    assert_eq!(api.client().request_count(), 0);
    assert!(form.errors.get_untracked().field(FIELD_IMAGES).is_some());
    assert_eq!(form.phase.get_untracked(), FormPhase::Ready);
}

#[tokio::test]
async fn test_edit_puts_to_record_with_existing_images() {
    let api = api();
    mock_product(&api, 4, json!(10));
    api.client()
        .mock_empty(HttpMethod::Put, "/api/products/4", 200);
    let (form, _) = edit_form(4);
    form.mount(&api).await;
    form.set_field(ProductField::Price, "12.5".to_string());

    let outcome = form.submit(&api).await;

    assert!(matches!(outcome, SubmitOutcome::Saved { .. }));
    let req = api.client().last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Put);
    assert_eq!(req.url, "/api/products/4");
    let body = sent_body(&api);
    assert_eq!(body["price"], json!(12.5));
    assert_eq!(body["images"], json!(["https://cdn.test/lamp.png"]));
}

#[tokio::test]
async fn test_save_failure_keeps_values_editable() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Post, "/api/products", 500, json!({}));
    let (form, _) = create_form();
    fill(&form, "S", "N", "3");
    form.select_images(&files(&["a.png"])).unwrap();

    let outcome = form.submit(&api).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form.api_error.get_untracked().as_deref(), Some(SAVE_FAILED));
    assert_eq!(form.values.get_untracked().sku, "S");
    assert!(!form.loading.get_untracked());
    assert_eq!(form.phase.get_untracked(), FormPhase::Failed);

    form.set_field(ProductField::Sku, "S2".to_string());
    assert_eq!(form.values.get_untracked().sku, "S2");
}

#[tokio::test]
async fn test_transport_failure_is_api_error() {
    let api = api();
    api.client()
        .mock_network_error(HttpMethod::Post, "/api/products");
    let (form, _) = create_form();
    fill(&form, "S", "N", "3");
    form.select_images(&files(&["a.png"])).unwrap();

    assert_eq!(form.submit(&api).await, SubmitOutcome::Failed);
    assert_eq!(form.api_error.get_untracked().as_deref(), Some(SAVE_FAILED));
}

#[tokio::test]
async fn test_resubmit_clears_previous_api_error() {
    let api = api();
    api.client()
        .mock_response(HttpMethod::Post, "/api/products", 500, json!({}));
    let (form, _) = create_form();
    fill(&form, "S", "N", "3");
    form.select_images(&files(&["a.png"])).unwrap();
    form.submit(&api).await;
    assert!(form.api_error.get_untracked().is_some());

    form.set_field(ProductField::Price, "0".to_string());
    assert_eq!(form.submit(&api).await, SubmitOutcome::Invalid);

    assert!(form.api_error.get_untracked().is_none());
}

// =========================================================
// 并发守卫测试
// =========================================================

#[tokio::test]
async fn test_double_submit_sends_one_request() {
    let api = api();
    api.client().mock_empty(HttpMethod::Post, "/api/products", 201);
    let (form, _) = create_form();
    fill(&form, "S", "N", "3");
    form.select_images(&files(&["a.png"])).unwrap();

    let (first, second) = futures::join!(form.submit(&api), form.submit(&api));

    assert!(matches!(first, SubmitOutcome::Saved { .. }));
    assert_eq!(second, SubmitOutcome::Busy);
    assert_eq!(api.client().request_count(), 1);
    assert!(!form.loading.get_untracked());
}

#[tokio::test]
async fn test_submit_blocked_while_loading_record() {
    let api = api();
    mock_product(&api, 2, json!(5));
    let (form, _) = edit_form(2);

    let ((), outcome) = futures::join!(form.mount(&api), form.submit(&api));

    assert_eq!(outcome, SubmitOutcome::Busy);
    assert_eq!(api.client().request_count(), 1);
    assert_eq!(api.client().last_request().unwrap().method, HttpMethod::Get);
}

#[tokio::test]
async fn test_edits_ignored_while_loading() {
    let api = api();
    mock_product(&api, 2, json!(5));
    let (form, _) = edit_form(2);

    let edit = async {
        form.set_field(ProductField::Sku, "typed-during-load".to_string());
    };
    futures::join!(form.mount(&api), edit);

    assert_eq!(form.values.get_untracked().sku, "LAMP-1");
}

// =========================================================
// 图片预览生命周期测试
// =========================================================

#[test]
fn test_selection_replaces_and_releases_previous() {
    let (form, registry) = create_form();

    form.select_images(&files(&["a.png", "b.png"])).unwrap();
    let first = registry.live();
    assert_eq!(first.len(), 2);
    assert_eq!(form.previews.get_untracked(), first);

    form.select_images(&files(&["c.png"])).unwrap();

    let live = registry.live();
    assert_eq!(live.len(), 1);
    assert_eq!(form.previews.get_untracked(), live);
    assert_eq!(registry.released(), first);
    let images = form.values.get_untracked().images;
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].file_name, "c.png");
}

#[test]
fn test_failed_selection_keeps_previous_state() {
    let (form, registry) = create_form();
    form.select_images(&files(&["a.png"])).unwrap();
    let before = form.previews.get_untracked();
    registry.fail_on("broken.png");

    let result = form.select_images(&files(&["ok.png", "broken.png"]));

    assert!(result.is_err());
    assert_eq!(form.previews.get_untracked(), before);
    assert_eq!(registry.live(), before);
    assert_eq!(registry.released().len(), 1);
}

#[tokio::test]
async fn test_selection_in_edit_mode_replaces_remote_seed() {
    let api = api();
    mock_product(&api, 4, json!(10));
    let (form, registry) = edit_form(4);
    form.mount(&api).await;

    form.select_images(&files(&["new.png"])).unwrap();

    assert_eq!(form.previews.get_untracked(), registry.live());
    assert!(registry.released().is_empty());
}

#[tokio::test]
async fn test_teardown_releases_only_local_previews() {
    let api = api();
    mock_product(&api, 4, json!(10));
    let (form, registry) = edit_form(4);
    form.mount(&api).await;
    form.teardown();
    assert!(registry.released().is_empty());

    let (form, registry) = create_form();
    form.select_images(&files(&["a.png", "b.png"])).unwrap();
    form.teardown();

    assert!(registry.live().is_empty());
    assert_eq!(registry.released().len(), 2);
    assert!(form.previews.get_untracked().is_empty());
}

#[tokio::test]
async fn test_duplicate_remote_images_get_distinct_entries() {
    let api = api();
    api.client().mock_response(
        HttpMethod::Get,
        "/api/products/6",
        200,
        json!({
            "id": 6,
            "sku": "DUP",
            "name": "Twin",
            "price": 3,
            "images": ["https://cdn.test/a.png", "https://cdn.test/a.png"]
        }),
    );
    let (form, _) = edit_form(6);
    form.mount(&api).await;

    let entries = form.preview_entries();

    assert_eq!(
        entries,
        vec![
            (0, "https://cdn.test/a.png".to_string()),
            (1, "https://cdn.test/a.png".to_string()),
        ]
    );
}
