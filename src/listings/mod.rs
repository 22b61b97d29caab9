//! # Property listings
//!
//! Query composition for the listing screens and the [`PropertyCatalog`] service that
//! runs the composed predicates against the properties collection.
//!
//! ```no_run
//! use restate_client::app::{initialize_client, ClientConfig};
//! use restate_client::listings::{property_loader, PropertyCatalog, PropertyQuery};
//! use restate_client::loader::LoaderOptions;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = initialize_client(ClientConfig::from_env())?;
//!     let loader = property_loader(
//!         PropertyCatalog::new(&client),
//!         LoaderOptions::new(PropertyQuery::recommended("All", "")).skip_initial_fetch(true),
//!     );
//!
//!     loader.refetch(PropertyQuery::recommended("Villa", "lake")).await;
//!     println!("{:?}", loader.status());
//!     Ok(())
//! }
//! ```

mod catalog;
mod model;
mod query;

#[doc(inline)]
pub use catalog::{latest_properties_loader, property_loader, PropertyCatalog};

#[doc(inline)]
pub use model::Property;

#[doc(inline)]
pub use query::{
    build_latest_query, build_query, PropertyQuery, ALL_FILTER, LATEST_LIMIT, LOCATION_FIELD,
    NAME_FIELD, RECOMMENDED_LIMIT, TYPE_FIELD,
};
