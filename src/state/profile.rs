//! Profile form model: field addressing, load outcome, and save.
//!
//! DESIGN
//! ======
//! Inputs are addressed by `ProfileField`, not by parsing input names, and all
//! seven fields go through the same `field_mut` rule. The record is always
//! written whole.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use crate::net::backend::Backend;
use crate::net::error::BackendError;
use crate::net::types::{ProfileRecord, ProfileRow, SocialLinks};

pub const SAVED_MESSAGE: &str = "Profile updated successfully!";
pub const SAVE_FAILED_MESSAGE: &str = "Error updating profile. Please try again.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SocialNetwork {
    Linkedin,
    Twitter,
    Github,
}

/// One editable form field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Name,
    Profession,
    Phone,
    ImageUrl,
    Social(SocialNetwork),
}

impl ProfileField {
    /// Form order.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Profession,
        Self::Phone,
        Self::ImageUrl,
        Self::Social(SocialNetwork::Linkedin),
        Self::Social(SocialNetwork::Twitter),
        Self::Social(SocialNetwork::Github),
    ];

    /// HTML `name`/`id` attribute.
    pub fn input_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Profession => "profession",
            Self::Phone => "phone",
            Self::ImageUrl => "image_url",
            Self::Social(SocialNetwork::Linkedin) => "social_linkedin",
            Self::Social(SocialNetwork::Twitter) => "social_twitter",
            Self::Social(SocialNetwork::Github) => "social_github",
        }
    }

    pub fn input_type(self) -> &'static str {
        match self {
            Self::Name | Self::Profession => "text",
            Self::Phone => "tel",
            Self::ImageUrl | Self::Social(_) => "url",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "Full Name",
            Self::Profession => "Profession",
            Self::Phone => "Phone Number",
            Self::ImageUrl => "Profile Image URL",
            Self::Social(SocialNetwork::Linkedin) => "LinkedIn URL",
            Self::Social(SocialNetwork::Twitter) => "Twitter URL",
            Self::Social(SocialNetwork::Github) => "GitHub URL",
        }
    }
}

/// A single input change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldUpdate {
    pub field: ProfileField,
    pub value: String,
}

impl SocialLinks {
    pub fn get(&self, network: SocialNetwork) -> &str {
        match network {
            SocialNetwork::Linkedin => &self.linkedin,
            SocialNetwork::Twitter => &self.twitter,
            SocialNetwork::Github => &self.github,
        }
    }

    fn get_mut(&mut self, network: SocialNetwork) -> &mut String {
        match network {
            SocialNetwork::Linkedin => &mut self.linkedin,
            SocialNetwork::Twitter => &mut self.twitter,
            SocialNetwork::Github => &mut self.github,
        }
    }
}

impl ProfileRecord {
    pub fn field(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Profession => &self.profession,
            ProfileField::Phone => &self.phone,
            ProfileField::ImageUrl => &self.image_url,
            ProfileField::Social(network) => self.social_links.get(network),
        }
    }

    fn field_mut(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Profession => &mut self.profession,
            ProfileField::Phone => &mut self.phone,
            ProfileField::ImageUrl => &mut self.image_url,
            ProfileField::Social(network) => self.social_links.get_mut(network),
        }
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        *self.field_mut(update.field) = update.value;
    }
}

// =============================================================================
// LOAD
// =============================================================================

/// Outcome of fetching the current user's profile row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProfileLoad {
    Found(ProfileRecord),
    /// No row yet; the first save creates it.
    Missing,
    Failed(BackendError),
}

impl ProfileLoad {
    /// Merge the outcome into form state: a found row replaces it wholesale,
    /// anything else leaves it untouched (failures are logged).
    pub fn apply_to(self, form: &mut ProfileRecord) {
        match self {
            Self::Found(record) => *form = record,
            Self::Missing => leptos::logging::log!("No profile row yet; the first save creates it"),
            Self::Failed(e) => leptos::logging::error!("Error fetching profile: {e}"),
        }
    }
}

/// Form contents plus the user they belong to.
///
/// Switching users clears the fields, so a missing row for the new user can
/// never leave the previous user's values in place for the next save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    owner: Option<String>,
    pub record: ProfileRecord,
}

impl ProfileForm {
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Point the form at `user_id`. Returns `true` (and resets every field)
    /// when the owner changed.
    pub fn bind(&mut self, user_id: Option<&str>) -> bool {
        if self.owner.as_deref() == user_id {
            return false;
        }
        self.owner = user_id.map(str::to_owned);
        self.record = ProfileRecord::default();
        true
    }

    /// Apply a load for `user_id`; dropped if the form has moved on.
    pub fn accept(&mut self, user_id: &str, outcome: ProfileLoad) -> bool {
        if self.owner.as_deref() != Some(user_id) {
            return false;
        }
        outcome.apply_to(&mut self.record);
        true
    }
}

pub async fn load_profile<B: Backend>(backend: &B, user_id: &str) -> ProfileLoad {
    match backend.fetch_profile(user_id).await {
        Ok(record) => ProfileLoad::Found(record),
        Err(BackendError::NotFound) => ProfileLoad::Missing,
        Err(e) => ProfileLoad::Failed(e),
    }
}

// =============================================================================
// SAVE
// =============================================================================

/// Upsert the whole record keyed by `user_id`.
///
/// # Errors
///
/// Returns the backend error after logging it.
pub async fn save_profile<B: Backend>(
    backend: &B,
    user_id: &str,
    profile: &ProfileRecord,
) -> Result<(), BackendError> {
    let row = ProfileRow { id: user_id.to_owned(), profile: profile.clone() };
    backend.upsert_profile(&row).await.inspect_err(|e| {
        leptos::logging::error!("Error updating profile: {e}");
    })
}

/// User-facing notice for a save outcome.
pub fn save_notice(result: &Result<(), BackendError>) -> &'static str {
    if result.is_ok() { SAVED_MESSAGE } else { SAVE_FAILED_MESSAGE }
}
