//! Storefront API response types for the public `products.json` endpoint.
//!
//! ## Observed shape notes
//!
//! ### Tags
//! The endpoint returns tags as a **JSON array of strings**, not the
//! comma-separated string the legacy Liquid API documented. The export
//! joins them with `", "` to match the bulk-import convention.
//!
//! ### `published_at`
//! An ISO-8601 timestamp string, or `null` for unpublished products. We
//! pass it through opaquely; only emptiness matters downstream (it decides
//! the `Status` column).
//!
//! ### `compare_at_price`
//! Explicitly `null` when the variant is not on sale (not omitted, not
//! `"0.00"`). When set it is a decimal string, e.g. `"162.00"`. Modeled as
//! `Option<String>` and passed through as-is.
//!
//! ### `options`
//! Up to three named axes per product. Each variant carries its position on
//! those axes as `option1`/`option2`/`option3` plain strings; a missing axis
//! is `null`.
//!
//! ### `featured_image` on variants
//! Present when a variant has its own gallery image; `null` otherwise, in
//! which case the product's first gallery image stands in.

use serde::Deserialize;

/// Top-level response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct ProductsPage {
    pub products: Vec<CatalogProduct>,
}

/// A single product from the storefront catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogProduct {
    /// URL slug for the product page (e.g., `"iphone-13-pro-refurbished"`).
    /// Doubles as the join key for the product's rows in the export.
    pub handle: String,

    /// Display name of the product.
    pub title: String,

    /// Raw HTML product description. May be `null` or absent.
    #[serde(default)]
    pub body_html: Option<String>,

    /// Vendor / brand name as configured in the storefront.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Free-form product type string. May be empty.
    #[serde(default)]
    pub product_type: Option<String>,

    /// Tags as a JSON array of strings. Empty array `[]` when no tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Publication timestamp, `null` for unpublished products.
    #[serde(default)]
    pub published_at: Option<String>,

    /// Named option axes; at most the first three are used by the export.
    #[serde(default)]
    pub options: Vec<CatalogOption>,

    /// All purchasable variants for this product.
    #[serde(default)]
    pub variants: Vec<CatalogVariant>,

    /// Full image gallery for the product, in `position` order.
    #[serde(default)]
    pub images: Vec<CatalogImage>,
}

/// A named axis of variation (e.g. `"Color"`) and its value set.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogOption {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A single purchasable variant of a [`CatalogProduct`].
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogVariant {
    /// Stock-keeping unit. Present but may be an empty string on some stores.
    #[serde(default)]
    pub sku: Option<String>,

    /// Weight in grams.
    #[serde(default)]
    pub grams: Option<i64>,

    /// `"deny"` or `"continue"`; absent on older stores.
    #[serde(default)]
    pub inventory_policy: Option<String>,

    /// Usually `"manual"`; absent on older stores.
    #[serde(default)]
    pub fulfillment_service: Option<String>,

    /// Current price as a decimal string (e.g., `"30.00"`).
    #[serde(default)]
    pub price: Option<String>,

    /// Pre-sale comparison price, or `null` when not on sale.
    #[serde(default)]
    pub compare_at_price: Option<String>,

    #[serde(default)]
    pub requires_shipping: Option<bool>,

    #[serde(default)]
    pub taxable: Option<bool>,

    #[serde(default)]
    pub barcode: Option<String>,

    /// Value on the product's first option axis, e.g. `"Red"`.
    #[serde(default)]
    pub option1: Option<String>,

    /// Value on the second option axis, e.g. `"128GB"`.
    #[serde(default)]
    pub option2: Option<String>,

    /// Value on the third option axis.
    #[serde(default)]
    pub option3: Option<String>,

    /// Variant-specific gallery image, when one is assigned.
    #[serde(default)]
    pub featured_image: Option<CatalogImage>,
}

/// A product image from the catalog payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogImage {
    /// Canonical CDN URL.
    pub src: String,
    /// 1-based image position.
    #[serde(default)]
    pub position: Option<i32>,
}
