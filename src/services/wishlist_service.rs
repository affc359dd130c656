use uuid::Uuid;

use crate::{
    database::{ProductStore, UserStore},
    error::{AppError, Result},
    models::{Product, User},
};

async fn load_user<S>(store: &S, user_id: Uuid) -> Result<User>
where
    S: UserStore + ?Sized,
{
    store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::Validation("User not found.".to_string()))
}

async fn persist<S>(store: &S, user_id: Uuid, wishlist: &[Uuid]) -> Result<()>
where
    S: UserStore + ?Sized,
{
    if store.save_wishlist(user_id, wishlist).await? {
        Ok(())
    } else {
        Err(AppError::Validation("User not found.".to_string()))
    }
}

pub async fn add_to_wishlist<S>(store: &S, user_id: Uuid, product_id: Uuid) -> Result<Vec<Uuid>>
where
    S: UserStore + ProductStore + ?Sized,
{
    let mut user = load_user(store, user_id).await?;

    if store.find_product(product_id).await?.is_none() {
        return Err(AppError::NotFound("Product not found".to_string()));
    }

    if user.wishlist.contains(&product_id) {
        return Err(AppError::Validation(
            "Product already in wishlist".to_string(),
        ));
    }

    user.wishlist.push(product_id);
    persist(store, user_id, &user.wishlist).await?;

    Ok(user.wishlist)
}

/// Products on the wishlist in the order they were added. Entries whose
/// product has since been deleted are skipped.
pub async fn get_wishlist<S>(store: &S, user_id: Uuid) -> Result<Vec<Product>>
where
    S: UserStore + ProductStore + ?Sized,
{
    let user = load_user(store, user_id).await?;
    let mut products = store.find_products_by_ids(&user.wishlist).await?;

    products.sort_by_key(|p| user.wishlist.iter().position(|id| *id == p.id));

    Ok(products)
}

pub async fn remove_from_wishlist<S>(
    store: &S,
    user_id: Uuid,
    product_id: Uuid,
) -> Result<Vec<Uuid>>
where
    S: UserStore + ?Sized,
{
    let mut user = load_user(store, user_id).await?;

    let before = user.wishlist.len();
    user.wishlist.retain(|id| *id != product_id);
    if user.wishlist.len() == before {
        return Err(AppError::NotFound(
            "Product not found in wishlist".to_string(),
        ));
    }

    persist(store, user_id, &user.wishlist).await?;

    Ok(user.wishlist)
}
