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

use std::collections::HashMap;

use docdb_core::{Error, Result};

use crate::Config;

/// Parses an account connection string.
///
/// An example of a connection string looks like:
///
/// ```txt
/// AccountEndpoint=https://myaccount.documents.azure.com:443/;
/// AccountKey=C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==;
/// Database=app;
/// ```
///
/// Fields are optional: anything missing can still be set on the returned config.
pub(crate) fn parse(conn_str: &str) -> Result<Config> {
    let key_values = parse_into_key_values(conn_str)?;

    Ok(Config {
        endpoint: key_values.get("accountendpoint").cloned(),
        master_key: key_values.get("accountkey").cloned(),
        database_id: key_values.get("database").cloned(),
        ..Default::default()
    })
}

/// Keys are matched case-insensitively, values are kept verbatim.
fn parse_into_key_values(conn_str: &str) -> Result<HashMap<String, String>> {
    conn_str
        .trim()
        .replace('\n', "")
        .split(';')
        .map(str::trim)
        .filter(|field| !field.is_empty())
        .map(|field| {
            let (key, value) = field.split_once('=').ok_or_else(|| {
                Error::config_invalid(format!(
                    "invalid connection string, expected '=' in field: {field}"
                ))
            })?;
            Ok((key.trim().to_lowercase(), value.trim().to_string()))
        })
        .collect()
}
