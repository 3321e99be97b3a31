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

use docdb_core::hash::base64_decode;
use docdb_core::utils::Redact;
use docdb_core::{Error, Result};
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Master key of a document database account.
///
/// Holds the Base64 form as configured and the decoded bytes used as HMAC key.
#[derive(Clone)]
pub struct MasterKey {
    encoded: String,
    decoded: Arc<[u8]>,
}

impl Debug for MasterKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterKey")
            .field("key", &Redact::from(&self.encoded))
            .finish()
    }
}

impl MasterKey {
    /// Create a master key from its Base64 form.
    ///
    /// Fails if the key is empty or not valid Base64.
    pub fn from_base64(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.is_empty() {
            return Err(Error::config_invalid("master key is empty"));
        }

        let decoded = base64_decode(key).map_err(|e| {
            Error::config_invalid("master key is not valid base64").with_source(e)
        })?;

        Ok(Self {
            encoded: key.to_string(),
            decoded: decoded.into(),
        })
    }

    /// Raw key bytes used to compute signatures.
    pub fn as_bytes(&self) -> &[u8] {
        &self.decoded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docdb_core::ErrorKind;

    const KEY: &str =
        "C2y6yDjf5/R+ob0N8A7Cgv30VRDJIWEHLM+4QDU5DE2nQ9nDuVTqobD4b8mGGyPMbIZnqyMsEcaGQy67XIw/Jw==";

    #[test]
    fn test_master_key_decodes() {
        let key = MasterKey::from_base64(KEY).unwrap();
        assert_eq!(key.as_bytes().len(), 64);
    }

    #[test]
    fn test_master_key_debug_is_redacted() {
        let key = MasterKey::from_base64(KEY).unwrap();
        let debug = format!("{key:?}");
        assert_eq!(debug, "MasterKey { key: C2y***w== }");
        assert!(!debug.contains(KEY));
    }

    #[test]
    fn test_master_key_rejects_invalid_input() {
        let err = MasterKey::from_base64("   ").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = MasterKey::from_base64("definitely not base64!").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }
}
