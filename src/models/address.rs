use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: Uuid,
    pub label: String,
    pub full_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddressFields {
    pub label: String,
    pub full_name: String,
    pub street_address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone_number: String,
}

/// The address list embedded in a user record.
///
/// All mutations go through this type so that at most one entry is marked
/// default after any single operation. Entries keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook(Vec<Address>);

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Address] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Address> {
        self.0.iter().find(|a| a.id == id)
    }

    pub fn default_address(&self) -> Option<&Address> {
        self.0.iter().find(|a| a.is_default)
    }

    pub fn add(&mut self, fields: AddressFields, is_default: bool, now: DateTime<Utc>) -> &Address {
        if is_default {
            self.clear_default();
        }

        self.0.push(Address {
            id: Uuid::new_v4(),
            label: fields.label,
            full_name: fields.full_name,
            street_address: fields.street_address,
            city: fields.city,
            state: fields.state,
            zip_code: fields.zip_code,
            phone_number: fields.phone_number,
            is_default,
            created_at: now,
            updated_at: now,
        });

        &self.0[self.0.len() - 1]
    }

    /// Applies `patch` to the address with `id`. Returns `None` when no such
    /// address exists; the book is left untouched in that case.
    pub fn update(
        &mut self,
        id: Uuid,
        patch: &AddressPatch,
        now: DateTime<Utc>,
    ) -> Option<&Address> {
        let index = self.0.iter().position(|a| a.id == id)?;

        if patch.is_default == Some(true) {
            self.clear_default();
        }

        let address = &mut self.0[index];
        overwrite(&mut address.label, &patch.label);
        overwrite(&mut address.full_name, &patch.full_name);
        overwrite(&mut address.street_address, &patch.street_address);
        overwrite(&mut address.city, &patch.city);
        overwrite(&mut address.state, &patch.state);
        overwrite(&mut address.zip_code, &patch.zip_code);
        overwrite(&mut address.phone_number, &patch.phone_number);
        if let Some(is_default) = patch.is_default {
            address.is_default = is_default;
        }
        address.updated_at = now;

        Some(&*address)
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Address> {
        let index = self.0.iter().position(|a| a.id == id)?;
        Some(self.0.remove(index))
    }

    fn clear_default(&mut self) {
        for address in &mut self.0 {
            address.is_default = false;
        }
    }
}

fn overwrite(slot: &mut String, value: &Option<String>) {
    if let Some(value) = value {
        slot.clone_from(value);
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRequest {
    pub label: Option<String>,
    pub full_name: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub is_default: Option<bool>,
}

/// Fields present in an update payload. `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressPatch {
    pub label: Option<String>,
    pub full_name: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone_number: Option<String>,
    pub is_default: Option<bool>,
}

impl AddressRequest {
    pub fn into_new_address(self) -> Result<(AddressFields, bool)> {
        let all_present = [
            &self.label,
            &self.full_name,
            &self.street_address,
            &self.city,
            &self.state,
            &self.zip_code,
            &self.phone_number,
        ]
        .iter()
        .all(|field| field.as_deref().is_some_and(|v| !v.trim().is_empty()));

        if !all_present {
            return Err(AppError::Validation(
                "All address fields are required.".to_string(),
            ));
        }

        let take = |field: Option<String>| field.map(|v| v.trim().to_string()).unwrap_or_default();

        Ok((
            AddressFields {
                label: take(self.label),
                full_name: take(self.full_name),
                street_address: take(self.street_address),
                city: take(self.city),
                state: take(self.state),
                zip_code: take(self.zip_code),
                phone_number: take(self.phone_number),
            },
            self.is_default.unwrap_or(false),
        ))
    }

    /// Supplied fields overwrite; a supplied blank value is rejected rather
    /// than silently ignored.
    pub fn into_patch(self) -> Result<AddressPatch> {
        let patch = AddressPatch {
            label: non_blank("label", self.label)?,
            full_name: non_blank("fullName", self.full_name)?,
            street_address: non_blank("streetAddress", self.street_address)?,
            city: non_blank("city", self.city)?,
            state: non_blank("state", self.state)?,
            zip_code: non_blank("zipCode", self.zip_code)?,
            phone_number: non_blank("phoneNumber", self.phone_number)?,
            is_default: self.is_default,
        };

        if patch == AddressPatch::default() {
            return Err(AppError::Validation(
                "At least one field must be provided for update.".to_string(),
            ));
        }

        Ok(patch)
    }
}

fn non_blank(name: &str, value: Option<String>) -> Result<Option<String>> {
    match value {
        Some(v) if v.trim().is_empty() => Err(AppError::Validation(format!(
            "{} cannot be empty",
            name
        ))),
        Some(v) => Ok(Some(v.trim().to_string())),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize)]
pub struct AddressResponse {
    pub message: String,
    pub address: Address,
}

#[derive(Debug, Serialize)]
pub struct AddressListResponse {
    pub addresses: Vec<Address>,
}
