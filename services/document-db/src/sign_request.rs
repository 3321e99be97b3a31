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

use crate::constants::*;
use crate::credential::MasterKey;
use crate::resource::{ResourceId, ResourceType};
use docdb_core::hash::base64_hmac_sha256;
use docdb_core::time::{format_http_date, now, DateTime};
use docdb_core::Result;
use http::request::Parts;
use http::{header, HeaderValue, Method};
use log::debug;
use percent_encoding::utf8_percent_encode;

/// RequestSigner implements master key authorization for the document database.
///
/// Every call takes a fresh timestamp: signatures are only accepted within a
/// short clock-skew window, so they are never cached.
#[derive(Debug, Default)]
pub struct RequestSigner {
    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a new signer.
    pub fn new() -> Self {
        Self { time: None }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Insert the date and authorization headers into `req`.
    pub fn sign_request(
        &self,
        req: &mut Parts,
        resource_type: ResourceType,
        resource_id: &ResourceId,
        key: &MasterKey,
    ) -> Result<()> {
        let date = format_http_date(self.time.unwrap_or_else(now));
        let token = sign(
            &req.method,
            resource_type.as_str(),
            resource_id.as_str(),
            &date,
            key.as_bytes(),
        );

        req.headers.insert(X_MS_DATE, HeaderValue::from_str(&date)?);
        req.headers.insert(header::AUTHORIZATION, {
            let mut value = HeaderValue::from_str(&token)?;
            value.set_sensitive(true);
            value
        });

        Ok(())
    }
}

/// Compute the url encoded authorization token of a request.
///
/// `resource_id` is used verbatim; callers pass the lowercase id derived
/// from the request's [`ResourceLink`](crate::ResourceLink).
///
/// ## Format
///
/// ```text
/// type=master&ver=1.0&sig=<base64 hmac-sha256 of string to sign>
/// ```
pub fn sign(
    verb: &Method,
    resource_type: &str,
    resource_id: &str,
    date: &str,
    key: &[u8],
) -> String {
    let string_to_sign = string_to_sign(verb, resource_type, resource_id, date);
    let signature = base64_hmac_sha256(key, string_to_sign.as_bytes());

    utf8_percent_encode(
        &format!("type=master&ver=1.0&sig={signature}"),
        &AUTHORIZATION_ENCODE_SET,
    )
    .to_string()
}

/// Construct string to sign
///
/// ## Format
///
/// ```text
/// lower(VERB) + "\n" +
/// lower(ResourceType) + "\n" +
/// ResourceId + "\n" +
/// lower(Date) + "\n" +
/// "" + "\n"
/// ```
///
/// The last line is always empty and its newline is required.
pub fn string_to_sign(verb: &Method, resource_type: &str, resource_id: &str, date: &str) -> String {
    let s = format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.as_str().to_lowercase(),
        resource_type.to_lowercase(),
        resource_id,
        date.to_lowercase()
    );

    debug!("string to sign: {}", s.escape_debug());

    s
}
