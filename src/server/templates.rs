//! Embedded HTML templates
//!
//! Templates are compiled into the binary so a deployment is a single file.
//! Names ending in `.html` are auto-escaped by Tera.

use tera::Tera;

const TEMPLATES: [(&str, &str); 9] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("listing.html", include_str!("../../templates/listing.html")),
    ("index.html", include_str!("../../templates/index.html")),
    (
        "products_by_category.html",
        include_str!("../../templates/products_by_category.html"),
    ),
    (
        "product_detail.html",
        include_str!("../../templates/product_detail.html"),
    ),
    (
        "product_fields.html",
        include_str!("../../templates/product_fields.html"),
    ),
    (
        "product_create.html",
        include_str!("../../templates/product_create.html"),
    ),
    (
        "product_update.html",
        include_str!("../../templates/product_update.html"),
    ),
    (
        "product_delete.html",
        include_str!("../../templates/product_delete.html"),
    ),
];

/// Build a Tera instance holding every page template
pub fn load() -> Result<Tera, tera::Error> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES)?;
    Ok(tera)
}
