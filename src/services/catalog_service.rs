use uuid::Uuid;

use crate::{
    database::ProductStore,
    error::{AppError, Result},
    models::{
        ImageFile, NewProduct, Product, ProductChanges, ProductForm, validate_image_count,
    },
    services::media_service::{self, BatchOutcome, MediaHost},
};

fn product_not_found() -> AppError {
    AppError::NotFound("Product not found".to_string())
}

pub async fn create_product<S, M>(
    store: &S,
    media: &M,
    form: &ProductForm,
    files: &[ImageFile],
) -> Result<Product>
where
    S: ProductStore + ?Sized,
    M: MediaHost + ?Sized,
{
    let fields = form.validate()?;
    validate_image_count(files.len(), true)?;

    let images = media_service::upload_all(media, files).await?;
    let product = store.insert_product(NewProduct { fields, images }).await?;

    tracing::info!(
        product_id = %product.id,
        name = %product.name,
        images = product.images.len(),
        "Product created"
    );

    Ok(product)
}

pub async fn list_products<S>(store: &S) -> Result<Vec<Product>>
where
    S: ProductStore + ?Sized,
{
    store.list_products().await
}

pub async fn get_product<S>(store: &S, id: Uuid) -> Result<Product>
where
    S: ProductStore + ?Sized,
{
    store.find_product(id).await?.ok_or_else(product_not_found)
}

/// Replaces the product's fields. When `files` is non-empty the image list is
/// replaced too and the previous images are removed from the media host
/// afterwards, best-effort.
pub async fn update_product<S, M>(
    store: &S,
    media: &M,
    id: Uuid,
    form: &ProductForm,
    files: &[ImageFile],
) -> Result<Product>
where
    S: ProductStore + ?Sized,
    M: MediaHost + ?Sized,
{
    let fields = form.validate()?;
    validate_image_count(files.len(), false)?;

    let existing = store.find_product(id).await?.ok_or_else(product_not_found)?;

    let new_images = if files.is_empty() {
        None
    } else {
        Some(media_service::upload_all(media, files).await?)
    };
    let replaced_images = new_images.is_some();

    let product = store
        .update_product(
            id,
            ProductChanges {
                fields,
                images: new_images,
            },
        )
        .await?
        .ok_or_else(product_not_found)?;

    if replaced_images {
        let outcome = media_service::delete_all(media, &existing.images).await;
        tracing::debug!(
            product_id = %id,
            removed = outcome.succeeded(),
            failed = outcome.failures.len(),
            "Previous product images cleaned up"
        );
    }

    tracing::info!(product_id = %product.id, name = %product.name, "Product updated");

    Ok(product)
}

/// Removes the product record after a best-effort delete of its images. The
/// record is removed whatever happens to the images.
pub async fn delete_product<S, M>(store: &S, media: &M, id: Uuid) -> Result<BatchOutcome>
where
    S: ProductStore + ?Sized,
    M: MediaHost + ?Sized,
{
    let product = store.find_product(id).await?.ok_or_else(product_not_found)?;

    let outcome = media_service::delete_all(media, &product.images).await;

    if !store.delete_product(id).await? {
        return Err(product_not_found());
    }

    tracing::info!(
        product_id = %id,
        name = %product.name,
        images_removed = outcome.succeeded(),
        images_failed = outcome.failures.len(),
        "Product deleted"
    );

    Ok(outcome)
}
