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

//! REST client for a cloud document database.
//!
//! This crate signs requests with the account master key, addresses
//! databases, containers and documents by resource link, and exposes a small
//! CRUD and query surface on top.
//!
//! - [`Config`] / [`ServiceConfig`]: resolve endpoint, master key and database id
//! - [`ResourceLink`] / [`ResourceId`]: resource addressing
//! - [`sign`] / [`RequestSigner`]: master key authorization
//! - [`Operation`] / [`build_request`]: request assembly
//! - [`parse_response`]: response normalization
//! - [`Client`]: document operations
//!
//! # Example
//!
//! ```rust,no_run
//! use docdb_core::{Context, OsEnv, Result};
//! use docdb_http_send_reqwest::ReqwestHttpSend;
//! use docdb_rest::{Client, QueryOptions, QueryParam};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_env(OsEnv);
//!
//!     // Reads DOCDB_ENDPOINT, DOCDB_MASTER_KEY and DOCDB_DATABASE_ID.
//!     let client = Client::from_env(ctx)?;
//!
//!     let notes = client
//!         .query_documents(
//!             "notes",
//!             "SELECT * FROM c WHERE c.userId = @userId",
//!             vec![QueryParam::new("@userId", "u1")],
//!             QueryOptions::partition_key("u1"),
//!         )
//!         .await?;
//!     println!("{} notes", notes.len());
//!
//!     Ok(())
//! }
//! ```

mod constants;
pub use constants::DEFAULT_API_VERSION;

mod config;
pub use config::{Config, ServiceConfig};

mod connection_string;

mod credential;
pub use credential::MasterKey;

mod resource;
pub use resource::{
    build_id, build_link, container_link, database_link, document_link, documents_link,
    ResourceId, ResourceLink, ResourceType,
};

mod sign_request;
pub use sign_request::{sign, string_to_sign, RequestSigner};

mod document;
pub use document::{Document, PartitionKey, QueryOptions, QueryParam, QuerySpec};

mod request;
pub use request::{build_request, Operation, Payload};

mod response;
pub use response::parse_response;

mod client;
pub use client::Client;

/// Header names and values understood by the service.
pub mod headers {
    pub use crate::constants::{
        APPLICATION_JSON, APPLICATION_QUERY_JSON, HEADER_TRUE, PREFER, RETURN_REPRESENTATION,
        X_MS_DATE, X_MS_DOCUMENTDB_ISQUERY, X_MS_DOCUMENTDB_IS_UPSERT,
        X_MS_DOCUMENTDB_PARTITIONKEY, X_MS_DOCUMENTDB_QUERY_ENABLECROSSPARTITION, X_MS_VERSION,
    };
}
