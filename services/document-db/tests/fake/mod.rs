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

//! In-memory stand-in for the document database REST API.
//!
//! Verifies every request's signature the way the service does, so a request
//! signed with a resource id that does not match its url is answered with 401.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use docdb_core::hash::base64_decode;
use docdb_core::{HttpSend, Result};
use docdb_rest::headers::*;
use docdb_rest::{build_link, sign};
use http::header::AUTHORIZATION;
use http::{Method, Request, Response, StatusCode};
use percent_encoding::percent_decode_str;
use serde_json::{json, Value};

pub const MASTER_KEY: &str =
    "C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==";

/// Documents keyed by (container, partition key header, id).
type Store = BTreeMap<(String, String, String), Value>;

#[derive(Debug, Clone, Default)]
pub struct FakeDocumentService {
    store: Arc<Mutex<Store>>,
    requests: Arc<Mutex<usize>>,
}

impl FakeDocumentService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        *self.requests.lock().expect("lock poisoned")
    }

    /// Number of documents stored in `container`.
    pub fn document_count(&self, container: &str) -> usize {
        self.store
            .lock()
            .expect("lock poisoned")
            .keys()
            .filter(|(c, _, _)| c == container)
            .count()
    }

    fn handle(&self, req: Request<Bytes>) -> (StatusCode, Value) {
        let path = percent_decode_str(req.uri().path())
            .decode_utf8_lossy()
            .to_string();
        let link = build_link([path.as_str()]);

        if !self.authorized(&req, link.id().as_str()) {
            return error(StatusCode::UNAUTHORIZED, "Unauthorized");
        }

        let segments = link.segments().map(str::to_string).collect::<Vec<_>>();
        let (container, id) = match segments.as_slice() {
            [dbs, _, colls, container, docs] if dbs == "dbs" && colls == "colls" && docs == "docs" => {
                (container.clone(), None)
            }
            [dbs, _, colls, container, docs, id]
                if dbs == "dbs" && colls == "colls" && docs == "docs" =>
            {
                (container.clone(), Some(id.clone()))
            }
            _ => return error(StatusCode::BAD_REQUEST, "BadRequest"),
        };

        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let partition = header(X_MS_DOCUMENTDB_PARTITIONKEY);
        let body = if req.body().is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice::<Value>(req.body()) {
                Ok(v) => v,
                Err(_) => return error(StatusCode::BAD_REQUEST, "BadRequest"),
            }
        };

        let mut store = self.store.lock().expect("lock poisoned");
        match (req.method().clone(), id) {
            (Method::POST, None) if header(X_MS_DOCUMENTDB_ISQUERY).is_some() => {
                let cross = header(X_MS_DOCUMENTDB_QUERY_ENABLECROSSPARTITION).is_some();
                if partition.is_none() && !cross {
                    return error(StatusCode::BAD_REQUEST, "BadRequest");
                }
                let documents = store
                    .iter()
                    .filter(|((c, pk, _), _)| {
                        c == &container && partition.as_ref().map_or(true, |p| p == pk)
                    })
                    .map(|(_, doc)| doc.clone())
                    .collect::<Vec<_>>();
                let count = documents.len();
                (
                    StatusCode::OK,
                    json!({"_rid": "fake", "Documents": documents, "_count": count}),
                )
            }
            (Method::POST, None) => {
                let Some(partition) = partition else {
                    return error(StatusCode::BAD_REQUEST, "BadRequest");
                };
                let Some(doc_id) = body.get("id").and_then(Value::as_str).map(str::to_string)
                else {
                    return error(StatusCode::BAD_REQUEST, "BadRequest");
                };
                let key = (container, partition, doc_id);
                let upsert = header(X_MS_DOCUMENTDB_IS_UPSERT).is_some();
                let existed = store.contains_key(&key);
                if existed && !upsert {
                    return error(StatusCode::CONFLICT, "Conflict");
                }
                let stored = with_metadata(body);
                store.insert(key, stored.clone());
                let status = if existed {
                    StatusCode::OK
                } else {
                    StatusCode::CREATED
                };
                (status, stored)
            }
            (method, Some(doc_id)) => {
                let Some(partition) = partition else {
                    return error(StatusCode::BAD_REQUEST, "BadRequest");
                };
                let key = (container, partition, doc_id);
                if !store.contains_key(&key) {
                    return error(StatusCode::NOT_FOUND, "NotFound");
                }
                match method {
                    Method::GET => (StatusCode::OK, store[&key].clone()),
                    Method::PUT => {
                        let stored = with_metadata(body);
                        store.insert(key, stored.clone());
                        (StatusCode::OK, stored)
                    }
                    Method::DELETE => {
                        store.remove(&key);
                        (StatusCode::NO_CONTENT, Value::Null)
                    }
                    _ => error(StatusCode::METHOD_NOT_ALLOWED, "MethodNotAllowed"),
                }
            }
            _ => error(StatusCode::METHOD_NOT_ALLOWED, "MethodNotAllowed"),
        }
    }

    fn authorized(&self, req: &Request<Bytes>, resource_id: &str) -> bool {
        let (Some(date), Some(auth)) = (
            req.headers().get(X_MS_DATE).and_then(|v| v.to_str().ok()),
            req.headers().get(AUTHORIZATION).and_then(|v| v.to_str().ok()),
        ) else {
            return false;
        };
        let key = base64_decode(MASTER_KEY).expect("valid key");

        sign(req.method(), "docs", resource_id, date, &key) == auth
    }
}

fn with_metadata(mut doc: Value) -> Value {
    if let Some(map) = doc.as_object_mut() {
        map.insert("_rid".to_string(), json!("fake-rid"));
        map.insert("_etag".to_string(), json!("\"00000000-0000-0000-0000-000000000000\""));
        map.insert("_ts".to_string(), json!(1760862600));
    }
    doc
}

fn error(status: StatusCode, code: &str) -> (StatusCode, Value) {
    (
        status,
        json!({"code": code, "message": format!("fake service: {code}")}),
    )
}

#[async_trait]
impl HttpSend for FakeDocumentService {
    async fn http_send(&self, req: Request<Bytes>) -> Result<Response<Bytes>> {
        *self.requests.lock().expect("lock poisoned") += 1;

        let (status, body) = self.handle(req);
        let body = if body.is_null() {
            Bytes::new()
        } else {
            Bytes::from(body.to_string())
        };
        Ok(Response::builder().status(status).body(body)?)
    }
}
