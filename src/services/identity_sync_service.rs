use crate::{
    database::UserStore,
    error::{AppError, Result},
    models::{
        DeletedIdentityData, IdentityEvent, IdentityUserData, NewUser, USER_CREATED_EVENT,
        USER_DELETED_EVENT,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    AlreadyExists,
    Deleted,
    AlreadyAbsent,
    Ignored,
}

impl SyncOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            SyncOutcome::Created => "created",
            SyncOutcome::AlreadyExists => "already_exists",
            SyncOutcome::Deleted => "deleted",
            SyncOutcome::AlreadyAbsent => "already_absent",
            SyncOutcome::Ignored => "ignored",
        }
    }
}

/// Reacts to identity-provider lifecycle events. Both reactions are
/// idempotent: replays end in the same state.
pub async fn handle_event<S>(store: &S, event: IdentityEvent) -> Result<SyncOutcome>
where
    S: UserStore + ?Sized,
{
    match event.name.as_str() {
        USER_CREATED_EVENT => {
            let data: IdentityUserData = serde_json::from_value(event.data)
                .map_err(|e| AppError::Validation(format!("Invalid user payload: {}", e)))?;
            sync_created(store, data).await
        }
        USER_DELETED_EVENT => {
            let data: DeletedIdentityData = serde_json::from_value(event.data)
                .map_err(|e| AppError::Validation(format!("Invalid user payload: {}", e)))?;
            sync_deleted(store, &data.id).await
        }
        other => {
            tracing::debug!(event = other, "Ignoring identity event");
            Ok(SyncOutcome::Ignored)
        }
    }
}

async fn sync_created<S>(store: &S, data: IdentityUserData) -> Result<SyncOutcome>
where
    S: UserStore + ?Sized,
{
    if store.find_user_by_clerk_id(&data.id).await?.is_some() {
        tracing::info!(clerk_id = %data.id, "User already exists");
        return Ok(SyncOutcome::AlreadyExists);
    }

    let email = data
        .primary_email()
        .ok_or_else(|| AppError::Validation("User has no email address".to_string()))?
        .to_string();

    let user = store
        .insert_user(NewUser {
            clerk_id: data.id.clone(),
            email,
            name: data.display_name(),
            image_url: data.profile_image_url.clone().unwrap_or_default(),
        })
        .await?;

    tracing::info!(clerk_id = %user.clerk_id, user_id = %user.id, "Created user");

    Ok(SyncOutcome::Created)
}

async fn sync_deleted<S>(store: &S, clerk_id: &str) -> Result<SyncOutcome>
where
    S: UserStore + ?Sized,
{
    if store.delete_user_by_clerk_id(clerk_id).await? {
        tracing::info!(clerk_id, "Deleted user");
        Ok(SyncOutcome::Deleted)
    } else {
        tracing::info!(clerk_id, "No user to delete");
        Ok(SyncOutcome::AlreadyAbsent)
    }
}
