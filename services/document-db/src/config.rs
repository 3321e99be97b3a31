// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use docdb_core::utils::Redact;
use docdb_core::{Context, Error, Result};
use http::Uri;
use log::debug;
use percent_encoding::utf8_percent_encode;

use crate::connection_string;
use crate::constants::*;
use crate::credential::MasterKey;
use crate::resource::{self, ResourceLink};

/// Config carries the settings needed to reach a document database.
///
/// Every field is optional here; [`Config::resolve`] turns it into a
/// [`ServiceConfig`] and fails if anything required is missing.
#[derive(Clone, Default)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DOCDB_ENDPOINT`], then [`COSMOS_ENDPOINT`]
    pub endpoint: Option<String>,
    /// `master_key` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DOCDB_MASTER_KEY`], then [`COSMOS_KEY`]
    pub master_key: Option<String>,
    /// `database_id` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DOCDB_DATABASE_ID`], then [`COSMOS_DATABASE`]
    pub database_id: Option<String>,
    /// `api_version` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`DOCDB_API_VERSION`]
    /// - [`DEFAULT_API_VERSION`] otherwise
    pub api_version: Option<String>,
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("endpoint", &self.endpoint)
            .field("master_key", &Redact::from(&self.master_key))
            .field("database_id", &self.database_id)
            .field("api_version", &self.api_version)
            .finish()
    }
}

impl Config {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the account endpoint, e.g. `https://myaccount.documents.azure.com:443/`.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the Base64 master key.
    pub fn with_master_key(mut self, master_key: impl Into<String>) -> Self {
        self.master_key = Some(master_key.into());
        self
    }

    /// Set the database all containers live in.
    pub fn with_database_id(mut self, database_id: impl Into<String>) -> Self {
        self.database_id = Some(database_id.into());
        self
    }

    /// Set the protocol version sent in `x-ms-version`.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = Some(api_version.into());
        self
    }

    /// Fill every unset field from the context's environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        let var = |keys: &[&str]| {
            keys.iter()
                .filter_map(|k| ctx.env_var(k))
                .find(|v| !v.trim().is_empty())
        };

        if self.endpoint.is_none() {
            self.endpoint = var(&[DOCDB_ENDPOINT, COSMOS_ENDPOINT]);
        }
        if self.master_key.is_none() {
            self.master_key = var(&[DOCDB_MASTER_KEY, COSMOS_KEY]);
        }
        if self.database_id.is_none() {
            self.database_id = var(&[DOCDB_DATABASE_ID, COSMOS_DATABASE]);
        }
        if self.api_version.is_none() {
            self.api_version = var(&[DOCDB_API_VERSION]);
        }

        self
    }

    /// Parse an account connection string
    /// (`AccountEndpoint=...;AccountKey=...;Database=...`) into a config.
    pub fn try_from_connection_string(conn_str: &str) -> Result<Self> {
        connection_string::parse(conn_str)
    }

    /// Validate this config and freeze it into a [`ServiceConfig`].
    ///
    /// Fails with [`ErrorKind::ConfigInvalid`](docdb_core::ErrorKind::ConfigInvalid)
    /// naming every missing value, before any request is sent.
    pub fn resolve(self) -> Result<ServiceConfig> {
        fn present(v: &Option<String>) -> Option<&str> {
            v.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        let (endpoint, master_key, database_id) = match (
            present(&self.endpoint),
            present(&self.master_key),
            present(&self.database_id),
        ) {
            (Some(endpoint), Some(master_key), Some(database_id)) => {
                (endpoint, master_key, database_id)
            }
            (endpoint, master_key, database_id) => {
                let missing = [
                    (endpoint.is_none(), "endpoint"),
                    (master_key.is_none(), "master_key"),
                    (database_id.is_none(), "database_id"),
                ]
                .into_iter()
                .filter_map(|(missing, name)| missing.then_some(name))
                .collect::<Vec<_>>();

                return Err(Error::config_invalid(format!(
                    "missing required config: {}",
                    missing.join(", ")
                )));
            }
        };

        let endpoint = endpoint.trim_end_matches('/').to_string();
        let uri: Uri = endpoint.parse().map_err(|e| {
            Error::config_invalid(format!("endpoint is not a valid url: {endpoint}"))
                .with_source(e)
        })?;
        if uri.scheme().is_none() || uri.authority().is_none() {
            return Err(Error::config_invalid(format!(
                "endpoint must be an absolute url: {endpoint}"
            )));
        }

        let master_key = MasterKey::from_base64(master_key)?;
        let api_version = present(&self.api_version)
            .unwrap_or(DEFAULT_API_VERSION)
            .to_string();

        let config = ServiceConfig(Arc::new(ServiceConfigInner {
            endpoint,
            master_key,
            database_id: database_id.to_string(),
            api_version,
        }));
        debug!("resolved service config: {config:?}");

        Ok(config)
    }
}

/// Resolved, immutable configuration shared by every request of a client.
///
/// Cloning is cheap.
#[derive(Clone)]
pub struct ServiceConfig(Arc<ServiceConfigInner>);

struct ServiceConfigInner {
    endpoint: String,
    master_key: MasterKey,
    database_id: String,
    api_version: String,
}

impl Debug for ServiceConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("endpoint", &self.0.endpoint)
            .field("master_key", &self.0.master_key)
            .field("database_id", &self.0.database_id)
            .field("api_version", &self.0.api_version)
            .finish()
    }
}

impl ServiceConfig {
    /// Account endpoint without trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.0.endpoint
    }

    /// Master key used to sign requests.
    pub fn master_key(&self) -> &MasterKey {
        &self.0.master_key
    }

    /// Database all containers live in.
    pub fn database_id(&self) -> &str {
        &self.0.database_id
    }

    /// Protocol version sent in `x-ms-version`.
    pub fn api_version(&self) -> &str {
        &self.0.api_version
    }

    /// `dbs/<database>`
    pub fn database_link(&self) -> ResourceLink {
        resource::database_link(self.database_id())
    }

    /// `dbs/<database>/colls/<container>`
    pub fn container_link(&self, container_id: &str) -> ResourceLink {
        resource::container_link(self.database_id(), container_id)
    }

    /// `dbs/<database>/colls/<container>/docs`
    pub fn documents_link(&self, container_id: &str) -> ResourceLink {
        resource::documents_link(self.database_id(), container_id)
    }

    /// `dbs/<database>/colls/<container>/docs/<document>`
    pub fn document_link(&self, container_id: &str, document_id: &str) -> ResourceLink {
        resource::document_link(self.database_id(), container_id, document_id)
    }

    /// Absolute request url of `link`, each segment percent encoded.
    pub fn url(&self, link: &ResourceLink) -> String {
        let mut url = String::with_capacity(self.0.endpoint.len() + link.as_str().len() + 8);
        url.push_str(&self.0.endpoint);
        for segment in link.segments() {
            url.push('/');
            url.extend(utf8_percent_encode(segment, &PATH_SEGMENT_ENCODE_SET));
        }
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdb_core::{ErrorKind, StaticEnv};
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    const KEY: &str =
        "C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==";

    fn ctx_with(envs: &[(&str, &str)]) -> Context {
        Context::new().with_env(StaticEnv {
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
    }

    #[test]
    fn test_resolve_from_env() {
        let ctx = ctx_with(&[
            (DOCDB_ENDPOINT, "https://localhost:8081/"),
            (DOCDB_MASTER_KEY, KEY),
            (DOCDB_DATABASE_ID, "app"),
        ]);

        let config = Config::new().from_env(&ctx).resolve().unwrap();
        assert_eq!(config.endpoint(), "https://localhost:8081");
        assert_eq!(config.database_id(), "app");
        assert_eq!(config.api_version(), DEFAULT_API_VERSION);
        assert_eq!(config.master_key().as_bytes().len(), 64);
    }

    #[test]
    fn test_env_fallback_names_and_explicit_fields_win() {
        let ctx = ctx_with(&[
            (COSMOS_ENDPOINT, "https://acct.documents.azure.com:443/"),
            (COSMOS_KEY, KEY),
            (COSMOS_DATABASE, "from-env"),
            (DOCDB_API_VERSION, "2020-07-15"),
        ]);

        let config = Config::new()
            .with_database_id("explicit")
            .from_env(&ctx)
            .resolve()
            .unwrap();
        assert_eq!(config.endpoint(), "https://acct.documents.azure.com:443");
        assert_eq!(config.database_id(), "explicit");
        assert_eq!(config.api_version(), "2020-07-15");
    }

    #[test]
    fn test_resolve_names_every_missing_value() {
        let err = Config::new()
            .with_master_key("   ")
            .from_env(&ctx_with(&[(DOCDB_DATABASE_ID, "")]))
            .resolve()
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        assert_eq!(
            err.to_string(),
            "missing required config: endpoint, master_key, database_id"
        );

        let err = Config::new()
            .with_endpoint("https://localhost:8081")
            .with_database_id("app")
            .resolve()
            .unwrap_err();
        assert_eq!(err.to_string(), "missing required config: master_key");
    }

    #[test]
    fn test_resolve_rejects_bad_values() {
        let err = Config::new()
            .with_endpoint("localhost")
            .with_master_key(KEY)
            .with_database_id("app")
            .resolve()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Config::new()
            .with_endpoint("https://localhost:8081")
            .with_master_key("not base64!")
            .with_database_id("app")
            .resolve()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_links_and_urls() {
        let config = Config::new()
            .with_endpoint("https://localhost:8081/")
            .with_master_key(KEY)
            .with_database_id("app")
            .resolve()
            .unwrap();

        assert_eq!(config.database_link().as_str(), "dbs/app");
        assert_eq!(config.container_link("notes").as_str(), "dbs/app/colls/notes");
        assert_eq!(
            config.url(&config.documents_link("notes")),
            "https://localhost:8081/dbs/app/colls/notes/docs"
        );
        assert_eq!(
            config.url(&config.document_link("notes", "my note#1")),
            "https://localhost:8081/dbs/app/colls/notes/docs/my%20note%231"
        );
    }

    #[test]
    fn test_debug_redacts_master_key() {
        let config = Config::new().with_master_key(KEY);
        assert!(!format!("{config:?}").contains(KEY));

        let resolved = config
            .with_endpoint("https://localhost:8081")
            .with_database_id("app")
            .resolve()
            .unwrap();
        assert!(!format!("{resolved:?}").contains(KEY));
    }
}
