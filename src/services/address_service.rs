use chrono::Utc;
use uuid::Uuid;

use crate::{
    database::UserStore,
    error::{AppError, Result},
    models::{Address, AddressRequest, User},
};

fn user_not_found() -> AppError {
    AppError::Validation("User not found.".to_string())
}

fn address_not_found() -> AppError {
    AppError::Validation("Address not found.".to_string())
}

async fn load_user<S>(store: &S, user_id: Uuid) -> Result<User>
where
    S: UserStore + ?Sized,
{
    store.find_user(user_id).await?.ok_or_else(user_not_found)
}

async fn persist<S>(store: &S, user: &User) -> Result<()>
where
    S: UserStore + ?Sized,
{
    if store.save_addresses(user.id, &user.addresses.0).await? {
        Ok(())
    } else {
        Err(user_not_found())
    }
}

pub async fn add_address<S>(store: &S, user_id: Uuid, request: AddressRequest) -> Result<Address>
where
    S: UserStore + ?Sized,
{
    let (fields, is_default) = request.into_new_address()?;

    let mut user = load_user(store, user_id).await?;
    let address = user.addresses.add(fields, is_default, Utc::now()).clone();
    persist(store, &user).await?;

    tracing::info!(user_id = %user_id, address_id = %address.id, is_default, "Address added");

    Ok(address)
}

pub async fn list_addresses<S>(store: &S, user_id: Uuid) -> Result<Vec<Address>>
where
    S: UserStore + ?Sized,
{
    let user = load_user(store, user_id).await?;
    Ok(user.addresses.as_slice().to_vec())
}

pub async fn update_address<S>(
    store: &S,
    user_id: Uuid,
    address_id: Uuid,
    request: AddressRequest,
) -> Result<Address>
where
    S: UserStore + ?Sized,
{
    let patch = request.into_patch()?;

    let mut user = load_user(store, user_id).await?;
    let address = user
        .addresses
        .update(address_id, &patch, Utc::now())
        .cloned()
        .ok_or_else(address_not_found)?;
    persist(store, &user).await?;

    tracing::info!(user_id = %user_id, address_id = %address_id, "Address updated");

    Ok(address)
}

pub async fn delete_address<S>(store: &S, user_id: Uuid, address_id: Uuid) -> Result<()>
where
    S: UserStore + ?Sized,
{
    let mut user = load_user(store, user_id).await?;
    user.addresses
        .remove(address_id)
        .ok_or_else(address_not_found)?;
    persist(store, &user).await?;

    tracing::info!(user_id = %user_id, address_id = %address_id, "Address deleted");

    Ok(())
}
