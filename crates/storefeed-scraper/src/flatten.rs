//! Flattening from nested catalog products to bulk-import CSV rows.
//!
//! The import format encodes the one-to-many product→variant relationship
//! positionally: the first row of a product carries the product-level
//! columns (title, body, vendor, tags, option names, gallery image) and
//! every following row of the same product leaves them blank, with the
//! handle as the join key on every row. This module makes that rule
//! explicit via a `first_row` flag passed into the row builder.
//!
//! Variants that repeat an already-seen `(option1, option2, option3)` value
//! triple collide on import, so repeated occurrences are patched with a
//! `_N` counter suffix. The suffix lands on option1, option2, and the SKU
//! but never on option3 — a known quirk of the field mapping, pinned by a
//! test here; do not change it without product-owner sign-off.

use std::collections::HashMap;

use storefeed_core::ExportRow;

use crate::error::ScraperError;
use crate::types::{CatalogProduct, CatalogVariant};

/// The option-value triple of a variant, used to detect collisions within
/// one product's variant set.
#[derive(Debug, PartialEq, Eq, Hash)]
struct VariantKey {
    option1: String,
    option2: String,
    option3: String,
}

/// Flattens one page's products into export rows.
///
/// A failure while flattening a single product is logged and that product
/// contributes no further rows; rows already emitted for it stay in place
/// (no rollback) and processing continues with the next product.
#[must_use]
pub fn flatten_products(products: &[CatalogProduct]) -> Vec<ExportRow> {
    let mut rows = Vec::new();
    for product in products {
        let before = rows.len();
        match flatten_product(product, &mut rows) {
            Ok(()) => {
                tracing::debug!(
                    product = %product.title,
                    rows = rows.len() - before,
                    "flattened product"
                );
            }
            Err(e) => {
                tracing::warn!(
                    product = %product.title,
                    error = %e,
                    "skipping remainder of product during flatten"
                );
            }
        }
    }
    rows
}

/// Flattens a single product, pushing one row per variant onto `rows`.
///
/// Rows are pushed as variants are processed, so an error on the n-th
/// variant leaves the first n-1 rows emitted.
///
/// # Errors
///
/// Returns [`ScraperError::Flatten`] if a variant has no usable price.
fn flatten_product(
    product: &CatalogProduct,
    rows: &mut Vec<ExportRow>,
) -> Result<(), ScraperError> {
    let shared = SharedFields::compute(product);
    let mut occurrences: HashMap<VariantKey, u32> = HashMap::new();
    let mut first_row = true;

    for variant in &product.variants {
        let row = build_row(product, &shared, variant, &mut occurrences, first_row)?;
        rows.push(row);
        first_row = false;
    }
    Ok(())
}

/// Product-level column values, computed once per product and emitted only
/// on the product's first row.
struct SharedFields {
    title: String,
    body_html: String,
    vendor: String,
    product_type: String,
    tags: String,
    published: String,
    option1_name: String,
    option2_name: String,
    option3_name: String,
    image_src: String,
    image_position: String,
    /// `"active"` when the product has a publication timestamp, `"draft"`
    /// otherwise. Unlike the rest of this struct, emitted on every row.
    status: String,
}

impl SharedFields {
    fn compute(product: &CatalogProduct) -> Self {
        let published = product.published_at.clone().unwrap_or_default();
        let status = if published.is_empty() { "draft" } else { "active" };

        let option_name = |idx: usize| -> String {
            product
                .options
                .get(idx)
                .map(|o| o.name.clone())
                .unwrap_or_default()
        };

        let first_image = product.images.first();

        Self {
            title: product.title.clone(),
            body_html: product.body_html.clone().unwrap_or_default(),
            vendor: product.vendor.clone().unwrap_or_default(),
            product_type: product.product_type.clone().unwrap_or_default(),
            tags: product.tags.join(", "),
            status: status.to_owned(),
            published,
            option1_name: option_name(0),
            option2_name: option_name(1),
            option3_name: option_name(2),
            image_src: first_image.map(|i| i.src.clone()).unwrap_or_default(),
            image_position: first_image
                .and_then(|i| i.position)
                .map(|p| p.to_string())
                .unwrap_or_default(),
        }
    }
}

/// Builds the export row for one variant.
///
/// `first_row` gates the product-level columns; variant-level columns are
/// always populated. The occurrence map is keyed by the raw (unsuffixed)
/// option triple and shared across the product's variants.
fn build_row(
    product: &CatalogProduct,
    shared: &SharedFields,
    variant: &CatalogVariant,
    occurrences: &mut HashMap<VariantKey, u32>,
    first_row: bool,
) -> Result<ExportRow, ScraperError> {
    let price = variant
        .price
        .clone()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ScraperError::Flatten {
            title: product.title.clone(),
            reason: "variant has no price".to_owned(),
        })?;

    let option1 = variant.option1.clone().unwrap_or_default();
    let option2 = variant.option2.clone().unwrap_or_default();
    let option3 = variant.option3.clone().unwrap_or_default();

    let count = occurrences
        .entry(VariantKey {
            option1: option1.clone(),
            option2: option2.clone(),
            option3: option3.clone(),
        })
        .and_modify(|c| *c += 1)
        .or_insert(1);

    // Option3 is intentionally left unsuffixed; see the module docs.
    let suffix = if *count > 1 {
        format!("_{count}")
    } else {
        String::new()
    };

    let sku = format!("{}{suffix}", variant.sku.clone().unwrap_or_default());

    // The variant's own gallery image wins; the product's lead image is the
    // fallback so every row carries something importable.
    let variant_image = variant
        .featured_image
        .as_ref()
        .map(|i| i.src.clone())
        .unwrap_or_else(|| shared.image_src.clone());

    let bool_cell = |value: Option<bool>| value.map(|b| b.to_string()).unwrap_or_default();

    let mut row = ExportRow {
        handle: product.handle.clone(),
        variant_sku: sku,
        variant_grams: variant.grams.map(|g| g.to_string()).unwrap_or_default(),
        variant_inventory_tracker: "shopify".to_owned(),
        variant_inventory_policy: variant
            .inventory_policy
            .clone()
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "deny".to_owned()),
        variant_fulfillment_service: variant
            .fulfillment_service
            .clone()
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| "manual".to_owned()),
        variant_price: price,
        variant_compare_at_price: variant.compare_at_price.clone().unwrap_or_default(),
        variant_requires_shipping: bool_cell(variant.requires_shipping),
        variant_taxable: bool_cell(variant.taxable),
        variant_barcode: variant.barcode.clone().unwrap_or_default(),
        variant_image,
        option1_value: format!("{option1}{suffix}"),
        option2_value: format!("{option2}{suffix}"),
        option3_value: option3,
        status: shared.status.clone(),
        ..ExportRow::default()
    };

    if first_row {
        row.title = shared.title.clone();
        row.body_html = shared.body_html.clone();
        row.vendor = shared.vendor.clone();
        row.product_type = shared.product_type.clone();
        row.tags = shared.tags.clone();
        row.published = shared.published.clone();
        row.gift_card = "no".to_owned();
        row.option1_name = shared.option1_name.clone();
        row.option2_name = shared.option2_name.clone();
        row.option3_name = shared.option3_name.clone();
        row.image_src = shared.image_src.clone();
        row.image_position = shared.image_position.clone();
    }

    Ok(row)
}
