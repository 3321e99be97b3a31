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

//! Response normalization.

use bytes::Bytes;
use docdb_core::utils::snippet;
use docdb_core::{Error, Result};
use http::{Response, StatusCode};
use log::{debug, warn};
use serde_json::Value;

const SNIPPET_LEN: usize = 256;

/// Turn a raw response into its JSON payload.
///
/// - Success without body returns `Ok(None)`.
/// - Success with a JSON body returns it as-is.
/// - Success with a body that is not JSON fails with `ErrorKind::MalformedResponse`.
/// - Any other status fails with `ErrorKind::Remote`, carrying the status, the
///   provider `code` and the parsed body (a non-JSON error body is dropped).
pub fn parse_response(resp: Response<Bytes>) -> Result<Option<Value>> {
    let (parts, body) = resp.into_parts();
    let text = String::from_utf8_lossy(&body);
    let status = parts.status;

    debug!("got response: {status}, {} bytes", body.len());

    let parsed = if text.trim().is_empty() {
        None
    } else {
        match serde_json::from_str::<Value>(&text) {
            Ok(v) => Some(v),
            Err(e) if status.is_success() => {
                return Err(Error::malformed_response(format!(
                    "response body is not valid json: {}",
                    snippet(&text, SNIPPET_LEN)
                ))
                .with_status(status)
                .with_source(e));
            }
            Err(_) => None,
        }
    };

    if !status.is_success() {
        let err = remote_error(status, parsed);
        warn!("request failed: {status}: {err}");
        return Err(err);
    }

    Ok(parsed)
}

/// Build the error for a non-success response.
///
/// The message is taken from `message`, then `Message`, then `_message`, then
/// `code`, falling back to a generic text.
fn remote_error(status: StatusCode, body: Option<Value>) -> Error {
    let field = |name: &str| {
        body.as_ref()
            .and_then(|b| b.get(name))
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let code = field("code");
    let message = field("message")
        .or_else(|| field("Message"))
        .or_else(|| field("_message"))
        .or_else(|| code.clone())
        .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));

    let mut err = Error::remote(status, message);
    if let Some(code) = code {
        err = err.with_code(code);
    }
    if let Some(body) = body {
        err = err.with_body(body);
    }
    err
}
