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

//! Request execution.

use bytes::Bytes;
use docdb_core::Result;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue, Method, Request};
use log::debug;
use serde_json::Value;

use crate::constants::*;
use crate::document::{PartitionKey, QuerySpec};
use crate::resource::{ResourceLink, ResourceType};
use crate::sign_request::RequestSigner;
use crate::ServiceConfig;

/// Body of an operation.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    /// No body.
    #[default]
    Empty,
    /// A JSON body sent as `application/json`.
    Json(Value),
    /// A query sent as `application/query+json` with the query header set.
    Query(QuerySpec),
}

/// A single request against the document database.
///
/// The resource id signed for the request is always derived from `link`.
#[derive(Debug, Clone)]
pub struct Operation {
    /// HTTP verb.
    pub method: Method,
    /// Resource type used as signature input.
    pub resource_type: ResourceType,
    /// Path of the resource the request is sent to.
    pub link: ResourceLink,
    /// Request body.
    pub payload: Payload,
    /// Partition the request is routed to.
    pub partition_key: Option<PartitionKey>,
    /// Extra headers forwarded verbatim, e.g. upsert or representation flags.
    pub headers: HeaderMap,
}

impl Operation {
    /// Create an operation without body, partition key or extra headers.
    pub fn new(method: Method, resource_type: ResourceType, link: ResourceLink) -> Self {
        Self {
            method,
            resource_type,
            link,
            payload: Payload::Empty,
            partition_key: None,
            headers: HeaderMap::new(),
        }
    }

    /// Send `body` as JSON.
    pub fn with_json(mut self, body: Value) -> Self {
        self.payload = Payload::Json(body);
        self
    }

    /// Send `spec` as a query.
    pub fn with_query(mut self, spec: QuerySpec) -> Self {
        self.payload = Payload::Query(spec);
        self
    }

    /// Route the request to `partition_key`.
    pub fn with_partition_key(mut self, partition_key: Option<PartitionKey>) -> Self {
        self.partition_key = partition_key;
        self
    }

    /// Add a header forwarded as-is.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// Assemble and sign the http request of `op`.
pub fn build_request(
    config: &ServiceConfig,
    signer: &RequestSigner,
    op: Operation,
) -> Result<Request<Bytes>> {
    let Operation {
        method,
        resource_type,
        link,
        payload,
        partition_key,
        headers,
    } = op;

    let (mut parts, ()) = Request::builder()
        .method(method)
        .uri(config.url(&link))
        .body(())?
        .into_parts();

    parts
        .headers
        .insert(X_MS_VERSION, HeaderValue::from_str(config.api_version())?);
    parts
        .headers
        .insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));

    if let Some(pk) = &partition_key {
        parts.headers.insert(
            X_MS_DOCUMENTDB_PARTITIONKEY,
            HeaderValue::from_str(&pk.header_value())?,
        );
    }

    let body = match payload {
        Payload::Empty => Bytes::new(),
        Payload::Json(v) => {
            parts
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
            Bytes::from(serde_json::to_vec(&v)?)
        }
        Payload::Query(spec) => {
            parts.headers.insert(
                X_MS_DOCUMENTDB_ISQUERY,
                HeaderValue::from_static(HEADER_TRUE),
            );
            parts.headers.insert(
                CONTENT_TYPE,
                HeaderValue::from_static(APPLICATION_QUERY_JSON),
            );
            Bytes::from(serde_json::to_vec(&spec)?)
        }
    };

    // Caller headers replace ours, including a caller supplied content type.
    parts.headers.extend(headers);

    signer.sign_request(
        &mut parts,
        resource_type,
        &link.id(),
        config.master_key(),
    )?;

    debug!("built request: {} {}", parts.method, parts.uri);

    Ok(Request::from_parts(parts, body))
}
