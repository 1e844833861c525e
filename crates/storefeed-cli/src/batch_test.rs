use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use storefeed_core::COLUMNS;

use super::*;

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

#[test]
fn page_span_first_batch_default_width() {
    assert_eq!(page_span(1, 15), (1, 15));
}

#[test]
fn page_span_second_batch_continues_where_first_ended() {
    assert_eq!(page_span(2, 15), (16, 30));
}

#[test]
fn page_span_narrow_batches() {
    assert_eq!(page_span(1, 1), (1, 1));
    assert_eq!(page_span(3, 1), (3, 3));
    assert_eq!(page_span(2, 4), (5, 8));
}

#[test]
fn batch_file_path_is_deterministic() {
    let path = batch_file_path(Path::new("/tmp/out"), 2);
    assert_eq!(path, Path::new("/tmp/out/products_data_part_2.csv"));
}

#[test]
fn write_batch_file_emits_header_then_rows() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("out.csv");

    let row = ExportRow {
        handle: "iphone-13-pro".to_owned(),
        variant_sku: "SKU-1".to_owned(),
        ..ExportRow::default()
    };
    write_batch_file(&path, &[row]).expect("write must succeed");

    let contents = std::fs::read_to_string(&path).expect("file must exist");
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), COLUMNS.join(","));
    let data = lines.next().unwrap();
    assert!(data.starts_with("iphone-13-pro,"));
    assert!(data.contains("SKU-1"));
    assert!(lines.next().is_none());
}

// ---------------------------------------------------------------------------
// End-to-end runs against a mock storefront
// ---------------------------------------------------------------------------

fn test_config(shop_url: String, out_dir: &Path, batch_count: u32, pages_per_batch: u32) -> ExportConfig {
    ExportConfig {
        shop_url,
        page_size: 250,
        pages_per_batch,
        batch_count,
        out_dir: out_dir.to_path_buf(),
        request_timeout_secs: 5,
        user_agent: "storefeed-test/0.1".to_owned(),
    }
}

fn empty_page() -> serde_json::Value {
    json!({ "products": [] })
}

/// One product, two variants with an identical option triple and identical
/// SKUs — the collision-suffix scenario.
fn duplicate_triple_page() -> serde_json::Value {
    let variant = json!({
        "sku": "A",
        "grams": 180,
        "inventory_policy": null,
        "fulfillment_service": null,
        "price": "999.00",
        "compare_at_price": null,
        "requires_shipping": true,
        "taxable": true,
        "barcode": null,
        "option1": "Red",
        "option2": "128GB",
        "option3": null,
        "featured_image": null
    });
    json!({
        "products": [{
            "handle": "iphone-13-pro",
            "title": "iPhone 13 Pro",
            "body_html": "<p>Refurbished.</p>",
            "vendor": "Apple",
            "product_type": "Phones",
            "tags": ["refurbished"],
            "published_at": "2024-01-15T09:00:00+10:00",
            "options": [
                { "name": "Color", "values": ["Red"] },
                { "name": "Storage", "values": ["128GB"] }
            ],
            "variants": [variant.clone(), variant],
            "images": [{ "src": "https://cdn.example.com/iphone.jpg", "position": 1 }]
        }]
    })
}

fn single_product_page(handle: &str) -> serde_json::Value {
    json!({
        "products": [{
            "handle": handle,
            "title": "Product",
            "body_html": null,
            "vendor": "Acme",
            "product_type": null,
            "tags": [],
            "published_at": "2024-01-15T09:00:00+10:00",
            "options": [],
            "variants": [{
                "sku": "SKU-1",
                "grams": 100,
                "inventory_policy": "deny",
                "fulfillment_service": "manual",
                "price": "10.00",
                "compare_at_price": null,
                "requires_shipping": true,
                "taxable": true,
                "barcode": null,
                "option1": "Default Title",
                "option2": null,
                "option3": null,
                "featured_image": null
            }],
            "images": []
        }]
    })
}

async fn mount_page(server: &MockServer, page: u32, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/products.json"))
        .and(query_param("page", page.to_string()))
        .respond_with(template)
        .mount(server)
        .await;
}

#[tokio::test]
async fn run_writes_suffix_patched_rows_with_exact_header() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(&duplicate_triple_page()),
    )
    .await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_json(&empty_page()),
    )
    .await;

    let config = test_config(server.uri(), dir.path(), 1, 15);
    let summary = run_export(&config).await.expect("run must succeed");
    assert_eq!(summary.total_rows, 2);
    assert_eq!(summary.files_written.len(), 1);

    let contents =
        std::fs::read_to_string(dir.path().join("products_data_part_1.csv")).expect("file exists");
    let mut lines = contents.lines();
    assert_eq!(
        lines.next().unwrap(),
        COLUMNS.join(","),
        "header must match the import schema exactly"
    );

    let mut reader = csv::Reader::from_reader(contents.as_bytes());
    let records: Vec<csv::StringRecord> =
        reader.records().collect::<Result<_, _>>().expect("valid csv");
    assert_eq!(records.len(), 2);

    let col = |name: &str| COLUMNS.iter().position(|c| *c == name).unwrap();
    assert_eq!(&records[0][col("Variant SKU")], "A");
    assert_eq!(&records[1][col("Variant SKU")], "A_2");
    assert_eq!(&records[0][col("Option1 Value")], "Red");
    assert_eq!(&records[1][col("Option1 Value")], "Red_2");
    assert_eq!(&records[0][col("Option2 Value")], "128GB");
    assert_eq!(&records[1][col("Option2 Value")], "128GB_2");
    assert_eq!(&records[0][col("Option3 Value")], "");
    assert_eq!(&records[1][col("Option3 Value")], "");

    // Parent-row convention: product columns on the first row only.
    assert_eq!(&records[0][col("Title")], "iPhone 13 Pro");
    assert_eq!(&records[1][col("Title")], "");
    assert_eq!(&records[0][col("Handle")], "iphone-13-pro");
    assert_eq!(&records[1][col("Handle")], "iphone-13-pro");
    assert_eq!(&records[0][col("Status")], "active");
    assert_eq!(&records[1][col("Status")], "active");
}

#[tokio::test]
async fn empty_first_page_stops_batch_and_writes_no_file() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(&empty_page()),
    )
    .await;

    let config = test_config(server.uri(), dir.path(), 1, 15);
    let summary = run_export(&config).await.expect("run must succeed");

    assert_eq!(summary.total_rows, 0);
    assert!(summary.files_written.is_empty());
    assert!(!dir.path().join("products_data_part_1.csv").exists());

    // The empty page must end the batch: exactly one request was made even
    // though the span covers 15 pages.
    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn transport_error_midway_preserves_rows_from_earlier_pages() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(&single_product_page("alpha")),
    )
    .await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_json(&single_product_page("beta")),
    )
    .await;
    mount_page(&server, 3, ResponseTemplate::new(500)).await;

    let config = test_config(server.uri(), dir.path(), 1, 15);
    let summary = run_export(&config).await.expect("run must succeed");

    assert_eq!(summary.total_rows, 2, "pages before the failure still count");
    let contents =
        std::fs::read_to_string(dir.path().join("products_data_part_1.csv")).expect("file exists");
    assert!(contents.contains("alpha"));
    assert!(contents.contains("beta"));

    // No page after the failing one was requested.
    let requests = server.received_requests().await.expect("requests recorded");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn failed_batch_does_not_prevent_later_batches() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    // Batch 1 covers page 1 (fails); batch 2 covers page 2 (succeeds).
    mount_page(&server, 1, ResponseTemplate::new(500)).await;
    mount_page(
        &server,
        2,
        ResponseTemplate::new(200).set_body_json(&single_product_page("gamma")),
    )
    .await;

    let config = test_config(server.uri(), dir.path(), 2, 1);
    let summary = run_export(&config).await.expect("run must succeed");

    assert!(!dir.path().join("products_data_part_1.csv").exists());
    assert!(dir.path().join("products_data_part_2.csv").exists());
    assert_eq!(summary.files_written.len(), 1);
    assert_eq!(summary.total_rows, 1);
}

#[tokio::test]
async fn not_found_page_is_treated_as_end_of_data() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    mount_page(
        &server,
        1,
        ResponseTemplate::new(200).set_body_json(&single_product_page("alpha")),
    )
    .await;
    mount_page(&server, 2, ResponseTemplate::new(404)).await;

    let config = test_config(server.uri(), dir.path(), 1, 15);
    let summary = run_export(&config).await.expect("run must succeed");

    assert_eq!(summary.total_rows, 1);
    assert!(dir.path().join("products_data_part_1.csv").exists());
}
