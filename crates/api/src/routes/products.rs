//! Catalog route handlers.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use rust_decimal::Decimal;

use crate::db::ProductRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireStaff;
use crate::models::{NewProduct, Product, Variant};
use crate::state::AppState;

/// List the full catalog. Public, unpaginated.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Raw multipart fields of a product upload.
#[derive(Default)]
struct ProductUpload {
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    variants: Option<String>,
    image: Option<UploadedImage>,
}

struct UploadedImage {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Create a catalog product from a staff multipart upload.
///
/// Any authenticated staff member may upload; the image is forwarded to
/// the external asset host and only its URL is stored.
pub async fn create(
    RequireStaff(claims): RequireStaff,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Product>)> {
    let upload = read_upload(multipart).await?;

    let image = upload
        .image
        .ok_or_else(|| AppError::Validation("Image is required".to_owned()))?;
    let title = require_text(upload.title, "Title")?;
    let description = require_text(upload.description, "Description")?;
    let category = require_text(upload.category, "Category")?;
    let variants = parse_variants(upload.variants.as_deref().unwrap_or_default())?;

    let assets = state
        .assets()
        .ok_or_else(|| AppError::Internal("asset host is not configured".to_owned()))?;
    let image_url = assets
        .upload_image(&image.file_name, &image.content_type, image.bytes)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "product image upload failed");
            AppError::Internal("failed to store product image".to_owned())
        })?;

    let product = ProductRepository::new(state.pool())
        .create(&NewProduct {
            title,
            description,
            category,
            image_url,
            variants,
        })
        .await?;

    tracing::info!(product_id = %product.id, uploaded_by = %claims.username, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// Drain the multipart stream into named fields.
async fn read_upload(mut multipart: Multipart) -> Result<ProductUpload> {
    let malformed = || AppError::Validation("Malformed upload".to_owned());

    let mut upload = ProductUpload::default();
    while let Some(field) = multipart.next_field().await.map_err(|_| malformed())? {
        match field.name() {
            Some("title") => upload.title = Some(field.text().await.map_err(|_| malformed())?),
            Some("description") => {
                upload.description = Some(field.text().await.map_err(|_| malformed())?);
            }
            Some("category") => {
                upload.category = Some(field.text().await.map_err(|_| malformed())?);
            }
            Some("variants") => {
                upload.variants = Some(field.text().await.map_err(|_| malformed())?);
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or("upload").to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field.bytes().await.map_err(|_| malformed())?.to_vec();
                upload.image = Some(UploadedImage {
                    file_name,
                    content_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    Ok(upload)
}

fn require_text(value: Option<String>, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(format!("{field} is required"))),
    }
}

/// Parse the `variants` form field: a JSON array of `{weight, price}`
/// objects, non-empty, with positive weight and non-negative price.
fn parse_variants(raw: &str) -> Result<Vec<Variant>> {
    let variants: Vec<Variant> =
        serde_json::from_str(raw).map_err(|_| AppError::Validation("Invalid variants".to_owned()))?;

    if variants.is_empty() {
        return Err(AppError::Validation(
            "At least one variant is required".to_owned(),
        ));
    }
    if variants
        .iter()
        .any(|v| v.weight <= Decimal::ZERO || v.price < Decimal::ZERO)
    {
        return Err(AppError::Validation(
            "Variant weight and price must be positive numbers".to_owned(),
        ));
    }

    Ok(variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_parse_from_the_form_field_json() {
        let variants = parse_variants(r#"[{"weight": 0.5, "price": 500}, {"weight": 1, "price": 800}]"#)
            .expect("parse");
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].weight, Decimal::new(5, 1));
        assert_eq!(variants[1].price, Decimal::from(800));
    }

    #[test]
    fn variants_reject_garbage_and_empty_lists() {
        assert!(parse_variants("not json").is_err());
        assert!(parse_variants("{}").is_err());
        assert!(parse_variants("[]").is_err());
        assert!(parse_variants("").is_err());
    }

    #[test]
    fn variants_reject_nonpositive_weights() {
        assert!(parse_variants(r#"[{"weight": 0, "price": 500}]"#).is_err());
        assert!(parse_variants(r#"[{"weight": -1, "price": 500}]"#).is_err());
        assert!(parse_variants(r#"[{"weight": 1, "price": -500}]"#).is_err());
    }

    #[test]
    fn variants_reject_non_numeric_entries() {
        assert!(parse_variants(r#"[{"weight": "heavy", "price": 500}]"#).is_err());
        assert!(parse_variants(r#"[{"weight": 1}]"#).is_err());
    }

    #[test]
    fn missing_text_fields_name_themselves() {
        let err = require_text(None, "Title").expect_err("must fail");
        assert!(matches!(err, AppError::Validation(msg) if msg == "Title is required"));

        let err = require_text(Some("   ".to_owned()), "Category").expect_err("must fail");
        assert!(matches!(err, AppError::Validation(msg) if msg == "Category is required"));
    }
}
