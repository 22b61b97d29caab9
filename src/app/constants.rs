pub const DEFAULT_ENDPOINT: &str = "https://cloud.appwrite.io/v1";
pub const DEFAULT_PROJECT_ID: &str = "67828afb00288d0e4305";
pub const DEFAULT_PLATFORM: &str = "com.jsm.restate";
pub const DEFAULT_DATABASE_ID: &str = "678568d70027fc401234";
pub const DEFAULT_GALLERIES_COLLECTION_ID: &str = "678569b100252aa70b98";
pub const DEFAULT_REVIEWS_COLLECTION_ID: &str = "67856b7800015ded5f08";
pub const DEFAULT_AGENTS_COLLECTION_ID: &str = "678569b100252aa70b98";
pub const DEFAULT_PROPERTIES_COLLECTION_ID: &str = "678569b100252aa70b98";

pub(crate) const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 20;

pub(crate) const ENV_ENDPOINT: &str = "APPWRITE_ENDPOINT";
pub(crate) const ENV_PROJECT_ID: &str = "APPWRITE_PROJECT_ID";
pub(crate) const ENV_PLATFORM: &str = "APPWRITE_PLATFORM";
pub(crate) const ENV_DATABASE_ID: &str = "APPWRITE_DATABASE_ID";
pub(crate) const ENV_GALLERIES_COLLECTION_ID: &str = "APPWRITE_GALLERIES_COLLECTION_ID";
pub(crate) const ENV_REVIEWS_COLLECTION_ID: &str = "APPWRITE_REVIEWS_COLLECTION_ID";
pub(crate) const ENV_AGENTS_COLLECTION_ID: &str = "APPWRITE_AGENTS_COLLECTION_ID";
pub(crate) const ENV_PROPERTIES_COLLECTION_ID: &str = "APPWRITE_PROPERTIES_COLLECTION_ID";
