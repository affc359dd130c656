use serde::Deserialize;

pub const USER_CREATED_EVENT: &str = "clerk/user.created";
pub const USER_DELETED_EVENT: &str = "clerk/user.deleted";

/// Envelope delivered by the event bus.
#[derive(Debug, Deserialize)]
pub struct IdentityEvent {
    pub name: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}

#[derive(Debug, Deserialize)]
pub struct IdentityUserData {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(alias = "image_url")]
    pub profile_image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeletedIdentityData {
    pub id: String,
}

impl IdentityUserData {
    pub fn display_name(&self) -> String {
        [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses
            .first()
            .map(|e| e.email_address.as_str())
            .filter(|e| !e.is_empty())
    }
}
