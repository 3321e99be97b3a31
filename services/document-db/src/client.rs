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

use docdb_core::{Context, Error, Result};
use http::{HeaderName, HeaderValue, Method};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::constants::*;
use crate::document::{Document, PartitionKey, QueryOptions, QueryParam, QuerySpec};
use crate::request::{build_request, Operation};
use crate::resource::ResourceType;
use crate::response::parse_response;
use crate::sign_request::RequestSigner;
use crate::{Config, ServiceConfig};

/// Client for the documents of one database.
///
/// Holds no per-request state: every call is signed with its own timestamp
/// and concurrent calls need no coordination.
///
/// # Example
///
/// ```no_run
/// use docdb_core::{Context, OsEnv};
/// use docdb_http_send_reqwest::ReqwestHttpSend;
/// use docdb_rest::Client;
/// use serde_json::json;
///
/// # async fn example() -> docdb_core::Result<()> {
/// let ctx = Context::new()
///     .with_http_send(ReqwestHttpSend::default())
///     .with_env(OsEnv);
/// let client = Client::from_env(ctx)?;
///
/// let doc = json!({"id": "note-1", "userId": "u1", "title": "Hi"});
/// if let Some(stored) = client.create_document("notes", &doc, "u1").await? {
///     assert_eq!(stored.id(), Some("note-1"));
/// }
///
/// match client.read_document("notes", "note-2", "u1").await {
///     Ok(doc) => println!("found {doc:?}"),
///     Err(err) if err.is_not_found() => println!("no such note"),
///     Err(err) => return Err(err),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    ctx: Context,
    config: ServiceConfig,
    signer: RequestSigner,
}

impl Client {
    /// Create a client from a resolved config.
    pub fn new(ctx: Context, config: ServiceConfig) -> Self {
        Self {
            ctx,
            config,
            signer: RequestSigner::new(),
        }
    }

    /// Resolve config from the context's environment and create a client.
    ///
    /// Fails before any network call if the endpoint, master key or database id is missing.
    pub fn from_env(ctx: Context) -> Result<Self> {
        let config = Config::new().from_env(&ctx).resolve()?;
        Ok(Self::new(ctx, config))
    }

    #[cfg(test)]
    pub(crate) fn with_signer(mut self, signer: RequestSigner) -> Self {
        self.signer = signer;
        self
    }

    /// The config this client was created with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Sign and send `op`, returning the normalized response payload.
    ///
    /// `Ok(None)` means the service answered with success and no body.
    pub async fn execute(&self, op: Operation) -> Result<Option<Value>> {
        let req = build_request(&self.config, &self.signer, op)?;
        let resp = self.ctx.http_send(req).await?;
        parse_response(resp)
    }

    /// Run a SQL query against a container.
    ///
    /// Returns an empty vec when nothing matches. Unless `options.cross_partition`
    /// is set, `options.partition_key` must be given.
    ///
    /// Only the first page is returned: continuation tokens
    /// (`x-ms-continuation`) are not followed, so a result set larger than one
    /// page is truncated.
    pub async fn query_documents(
        &self,
        container_id: &str,
        query: &str,
        parameters: Vec<QueryParam>,
        options: QueryOptions,
    ) -> Result<Vec<Document>> {
        if !options.cross_partition && options.partition_key.is_none() {
            return Err(Error::request_invalid(
                "query needs a partition key unless it is cross partition",
            ));
        }

        let mut op = Operation::new(
            Method::POST,
            ResourceType::Documents,
            self.config.documents_link(container_id),
        )
        .with_query(QuerySpec {
            query: query.to_string(),
            parameters,
        })
        .with_partition_key(options.partition_key);
        if options.cross_partition {
            op = op.with_header(
                HeaderName::from_static(X_MS_DOCUMENTDB_QUERY_ENABLECROSSPARTITION),
                HeaderValue::from_static(HEADER_TRUE),
            );
        }

        let rows: Vec<Document> = match self.execute(op).await? {
            Some(Value::Object(mut body)) => match body.remove("Documents") {
                None | Some(Value::Null) => Vec::new(),
                Some(documents) => serde_json::from_value(documents).map_err(|e| {
                    Error::malformed_response("query returned documents that are not objects")
                        .with_source(e)
                })?,
            },
            Some(_) => {
                return Err(Error::malformed_response(
                    "query response is not a json object",
                ))
            }
            None => Vec::new(),
        };

        debug!("query on {container_id} returned {} documents", rows.len());
        Ok(rows)
    }

    /// Run a SQL query and deserialize every row into `T`.
    pub async fn query_documents_as<T: DeserializeOwned>(
        &self,
        container_id: &str,
        query: &str,
        parameters: Vec<QueryParam>,
        options: QueryOptions,
    ) -> Result<Vec<T>> {
        self.query_documents(container_id, query, parameters, options)
            .await?
            .into_iter()
            .map(Document::into_typed)
            .collect()
    }

    /// Read a document.
    ///
    /// A missing document fails with a remote error whose status is 404,
    /// see [`Error::is_not_found`].
    pub async fn read_document(
        &self,
        container_id: &str,
        document_id: &str,
        partition_key: impl Into<PartitionKey>,
    ) -> Result<Document> {
        let op = Operation::new(
            Method::GET,
            ResourceType::Documents,
            self.config.document_link(container_id, document_id),
        )
        .with_partition_key(Some(partition_key.into()));

        expect_document(self.execute(op).await?)
    }

    /// Read a document and deserialize it into `T`.
    pub async fn read_document_as<T: DeserializeOwned>(
        &self,
        container_id: &str,
        document_id: &str,
        partition_key: impl Into<PartitionKey>,
    ) -> Result<T> {
        self.read_document(container_id, document_id, partition_key)
            .await?
            .into_typed()
    }

    /// Create a document, returning the stored copy.
    ///
    /// `Ok(None)` means the write was committed but the service sent no body.
    /// Fails with a remote error whose status is 409 if the id is taken.
    pub async fn create_document<T: Serialize + ?Sized>(
        &self,
        container_id: &str,
        document: &T,
        partition_key: impl Into<PartitionKey>,
    ) -> Result<Option<Document>> {
        let op = Operation::new(
            Method::POST,
            ResourceType::Documents,
            self.config.documents_link(container_id),
        )
        .with_json(serde_json::to_value(document)?)
        .with_partition_key(Some(partition_key.into()))
        .with_header(
            HeaderName::from_static(PREFER),
            HeaderValue::from_static(RETURN_REPRESENTATION),
        );

        stored_document(self.execute(op).await?)
    }

    /// Create or replace a document keyed by its id, returning the stored copy
    /// if the service sent one.
    pub async fn upsert_document<T: Serialize + ?Sized>(
        &self,
        container_id: &str,
        document: &T,
        partition_key: impl Into<PartitionKey>,
    ) -> Result<Option<Document>> {
        let op = Operation::new(
            Method::POST,
            ResourceType::Documents,
            self.config.documents_link(container_id),
        )
        .with_json(serde_json::to_value(document)?)
        .with_partition_key(Some(partition_key.into()))
        .with_header(
            HeaderName::from_static(X_MS_DOCUMENTDB_IS_UPSERT),
            HeaderValue::from_static(HEADER_TRUE),
        )
        .with_header(
            HeaderName::from_static(PREFER),
            HeaderValue::from_static(RETURN_REPRESENTATION),
        );

        stored_document(self.execute(op).await?)
    }

    /// Replace an existing document, returning the stored copy if the service
    /// sent one.
    pub async fn replace_document<T: Serialize + ?Sized>(
        &self,
        container_id: &str,
        document_id: &str,
        document: &T,
        partition_key: impl Into<PartitionKey>,
    ) -> Result<Option<Document>> {
        let op = Operation::new(
            Method::PUT,
            ResourceType::Documents,
            self.config.document_link(container_id, document_id),
        )
        .with_json(serde_json::to_value(document)?)
        .with_partition_key(Some(partition_key.into()))
        .with_header(
            HeaderName::from_static(PREFER),
            HeaderValue::from_static(RETURN_REPRESENTATION),
        );

        stored_document(self.execute(op).await?)
    }

    /// Delete a document.
    ///
    /// A missing document fails with a remote error whose status is 404.
    pub async fn delete_document(
        &self,
        container_id: &str,
        document_id: &str,
        partition_key: impl Into<PartitionKey>,
    ) -> Result<()> {
        let op = Operation::new(
            Method::DELETE,
            ResourceType::Documents,
            self.config.document_link(container_id, document_id),
        )
        .with_partition_key(Some(partition_key.into()));

        self.execute(op).await?;
        Ok(())
    }
}

/// Body of a write. A committed write may come back without one.
fn stored_document(payload: Option<Value>) -> Result<Option<Document>> {
    payload.map(|v| expect_document(Some(v))).transpose()
}

fn expect_document(payload: Option<Value>) -> Result<Document> {
    match payload {
        Some(Value::Object(map)) => Ok(Document::from(map)),
        Some(_) => Err(Error::malformed_response(
            "response body is not a json object",
        )),
        None => Err(Error::malformed_response(
            "expected a document in the response body",
        )),
    }
}
