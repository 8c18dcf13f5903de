//! Resource infrastructure for the Weebly Cloud API.
//!
//! This module provides:
//!
//! - **[`Resource`]**: A URL plus a lazily loaded property snapshot
//! - **[`CloudResource`], [`Mutable`], [`Deletable`]**: The contract concrete
//!   resources expose
//! - **[`CloudList<T>`]**: A cursor over a paginated listing that fetches
//!   pages on demand
//! - **[`Hydrate`]**: The strategy a listing uses to turn a page into resources
//! - **[`IdContext`]**: Parent ids handed to hydrators
//! - **[`PendingChanges`]**: Buffered edits awaiting a save
//! - **[`ResourceError`]**: Error type for resource operations
//! - **[`resources`]**: The concrete resources (Account, User, Site, ...)
//!
//! # Example
//!
//! ```rust,ignore
//! use weebly_cloud::{CloudConfig, RestClient};
//! use weebly_cloud::rest::resources::Account;
//! use weebly_cloud::rest::{CloudResource, Mutable};
//!
//! let client = RestClient::new(&CloudConfig::from_env()?)?;
//!
//! let account = Account::new(&client);
//! let mut user = account.create_user("someone@example.com", None).await?;
//!
//! let mut sites = user.list_sites(None).await?;
//! while let Some(site) = sites.advance().await? {
//!     println!("{}", site.site_id());
//! }
//!
//! user.set_property("language", "fr").await?;
//! user.save().await?;
//! ```

mod errors;
mod ids;
mod list;
mod resource;
mod tracking;

pub mod resources;

pub use errors::ResourceError;
pub use ids::IdContext;
pub use list::{CloudList, Hydrate};
pub use resource::{CloudResource, Deletable, Mutable, PropertyEnvelope, Resource};
pub use tracking::PendingChanges;
