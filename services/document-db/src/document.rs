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

use std::ops::{Deref, DerefMut};

use docdb_core::{Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A JSON document stored in a container.
///
/// The client does not interpret documents beyond the `id` field and, on
/// request, the caller's partition key field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize any value into a document.
    ///
    /// Fails if `value` does not serialize to a JSON object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Ok(serde_json::from_value(serde_json::to_value(value)?)?)
    }

    /// The document's unique key within its container.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// The value of the field used as partition key.
    pub fn partition_key_value(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Deserialize the document into `T`.
    ///
    /// A document that does not fit `T` fails with `ErrorKind::MalformedResponse`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0)).map_err(|e| {
            Error::malformed_response(format!(
                "document does not match {}",
                std::any::type_name::<T>()
            ))
            .with_source(e)
        })
    }

    /// Unwrap the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Deref for Document {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Document {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Map<String, Value>> for Document {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl From<Document> for Value {
    fn from(value: Document) -> Self {
        Value::Object(value.0)
    }
}

/// Partition key value of a document.
///
/// Sent as a single-element JSON array, e.g. `["abc-123"]`.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionKey(Value);

impl PartitionKey {
    /// Render the `x-ms-documentdb-partitionkey` header value.
    pub fn header_value(&self) -> String {
        Value::Array(vec![self.0.clone()]).to_string()
    }
}

impl From<&str> for PartitionKey {
    fn from(value: &str) -> Self {
        Self(Value::String(value.to_string()))
    }
}

impl From<String> for PartitionKey {
    fn from(value: String) -> Self {
        Self(Value::String(value))
    }
}

impl From<&String> for PartitionKey {
    fn from(value: &String) -> Self {
        Self(Value::String(value.clone()))
    }
}

impl From<i64> for PartitionKey {
    fn from(value: i64) -> Self {
        Self(Value::from(value))
    }
}

impl From<bool> for PartitionKey {
    fn from(value: bool) -> Self {
        Self(Value::Bool(value))
    }
}

impl From<Value> for PartitionKey {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// A named parameter of a query, e.g. `@userId`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryParam {
    /// Parameter name including the leading `@`.
    pub name: String,
    /// Parameter value.
    pub value: Value,
}

impl QueryParam {
    /// Create a query parameter.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Body of a query request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuerySpec {
    /// SQL text.
    pub query: String,
    /// Parameters referenced by the query.
    pub parameters: Vec<QueryParam>,
}

/// Scoping of a query.
///
/// A query must either name a partition key or fan out across partitions.
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Fan out across all partitions.
    pub cross_partition: bool,
    /// Scope the query to one partition.
    pub partition_key: Option<PartitionKey>,
}

impl QueryOptions {
    /// Query every partition of the container.
    pub fn cross_partition() -> Self {
        Self {
            cross_partition: true,
            partition_key: None,
        }
    }

    /// Query a single partition.
    pub fn partition_key(partition_key: impl Into<PartitionKey>) -> Self {
        Self {
            cross_partition: false,
            partition_key: Some(partition_key.into()),
        }
    }
}
