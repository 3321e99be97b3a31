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

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

// Headers used by the document database REST API.
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_VERSION: &str = "x-ms-version";
pub const X_MS_DOCUMENTDB_PARTITIONKEY: &str = "x-ms-documentdb-partitionkey";
pub const X_MS_DOCUMENTDB_ISQUERY: &str = "x-ms-documentdb-isquery";
pub const X_MS_DOCUMENTDB_IS_UPSERT: &str = "x-ms-documentdb-is-upsert";
pub const X_MS_DOCUMENTDB_QUERY_ENABLECROSSPARTITION: &str =
    "x-ms-documentdb-query-enablecrosspartition";
pub const PREFER: &str = "prefer";

// Header values.
pub const HEADER_TRUE: &str = "True";
pub const RETURN_REPRESENTATION: &str = "return=representation";
pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_QUERY_JSON: &str = "application/query+json";

// Env values used to resolve the service config.
pub const DOCDB_ENDPOINT: &str = "DOCDB_ENDPOINT";
pub const DOCDB_MASTER_KEY: &str = "DOCDB_MASTER_KEY";
pub const DOCDB_DATABASE_ID: &str = "DOCDB_DATABASE_ID";
pub const DOCDB_API_VERSION: &str = "DOCDB_API_VERSION";
pub const COSMOS_ENDPOINT: &str = "COSMOS_ENDPOINT";
pub const COSMOS_KEY: &str = "COSMOS_KEY";
pub const COSMOS_DATABASE: &str = "COSMOS_DATABASE";

/// Protocol version sent with every request unless configured otherwise.
pub const DEFAULT_API_VERSION: &str = "2018-12-31";

/// Characters left alone by `encodeURIComponent`; everything else is escaped
/// in the authorization header value.
pub static AUTHORIZATION_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Escape set for a single path segment of a resource URL.
pub static PATH_SEGMENT_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'@')
    .remove(b':');
