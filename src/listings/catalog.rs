use crate::app::Client;
use crate::database::{DatabaseResult, Databases};
use crate::listings::model::Property;
use crate::listings::query::{build_latest_query, build_query, PropertyQuery};
use crate::loader::{ListLoader, LoaderOptions};

/// Read access to the properties collection.
#[derive(Clone, Debug)]
pub struct PropertyCatalog {
    databases: Databases,
    database_id: String,
    collection_id: String,
}

impl PropertyCatalog {
    /// Catalog over the properties collection configured on `client`.
    pub fn new(client: &Client) -> Self {
        let config = client.config();
        Self::with_databases(
            client.databases(),
            config.database_id.clone(),
            config.properties_collection_id.clone(),
        )
    }

    pub fn with_databases(
        databases: Databases,
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            databases,
            database_id: database_id.into(),
            collection_id: collection_id.into(),
        }
    }

    /// Listings matching the filter and search state, newest first.
    pub async fn get_properties(&self, params: &PropertyQuery) -> DatabaseResult<Vec<Property>> {
        self.databases
            .list_documents_as(&self.database_id, &self.collection_id, &build_query(params))
            .await
    }

    /// Listings shown in the featured carousel.
    pub async fn get_latest_properties(&self) -> DatabaseResult<Vec<Property>> {
        self.databases
            .list_documents_as(&self.database_id, &self.collection_id, &build_latest_query())
            .await
    }

    pub async fn get_property(&self, id: &str) -> DatabaseResult<Property> {
        self.databases
            .get_document(&self.database_id, &self.collection_id, id)
            .await?
            .to_typed()
    }
}

/// Loader for a filterable listing grid, refetched with new [`PropertyQuery`] values as
/// the user edits filters or the search term.
pub fn property_loader(
    catalog: PropertyCatalog,
    options: LoaderOptions<PropertyQuery>,
) -> ListLoader<PropertyQuery, Property> {
    ListLoader::new(
        move |params: PropertyQuery| {
            let catalog = catalog.clone();
            async move { catalog.get_properties(&params).await }
        },
        options,
    )
}

/// Loader for the featured carousel; fetches as soon as it is created.
pub fn latest_properties_loader(catalog: PropertyCatalog) -> ListLoader<(), Property> {
    ListLoader::new(
        move |()| {
            let catalog = catalog.clone();
            async move { catalog.get_latest_properties().await }
        },
        LoaderOptions::new(()),
    )
}
