use serde::{Deserialize, Deserializer};

pub mod blog;
pub mod category;
pub mod subcategory;
pub mod user;

pub use blog::{Blog, BlogPayload, CategoryMapping, CategoryNode, SubCategoryLeaf};
pub use category::{Category, CategoryPayload};
pub use subcategory::{SubCategory, SubCategoryPayload};
pub use user::{Credentials, Identity, RegisterPayload, User};

/// Decode an explicit `null` the same as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
