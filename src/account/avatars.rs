use url::Url;

use crate::account::error::AccountResult;
use crate::app::Client;

/// Builds avatar image URLs served by the backend.
#[derive(Clone, Debug)]
pub struct Avatars {
    client: Client,
}

impl Avatars {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// URL of an image showing the initials of `name`.
    pub fn initials_url(&self, name: &str) -> AccountResult<Url> {
        let mut url = self.client.endpoint_url(&["avatars", "initials"])?;
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("project", &self.client.config().project_id);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{initialize_client, ClientConfig};

    #[test]
    fn initials_url_encodes_name() {
        let config = ClientConfig::default()
            .with_endpoint("https://backend.test/v1/")
            .with_project_id("demo-project");
        let avatars = Avatars::new(initialize_client(config).unwrap());
        let url = avatars.initials_url("Ada Lovelace").unwrap();

        assert_eq!(url.path(), "/v1/avatars/initials");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[0], ("name".to_string(), "Ada Lovelace".to_string()));
        assert_eq!(pairs[1], ("project".to_string(), "demo-project".to_string()));
    }
}
