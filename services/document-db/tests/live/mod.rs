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

//! Tests against a real account or the local emulator.
//!
//! Enabled with `DOCDB_TEST=on`. The target container must be partitioned on `/userId`.

use std::env;

use anyhow::Result;
use docdb_core::{Context, OsEnv};
use docdb_http_send_reqwest::ReqwestHttpSend;
use docdb_rest::{Client, QueryOptions, QueryParam};
use log::{debug, warn};
use serde_json::json;

fn init_client() -> Option<(Client, String)> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("DOCDB_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::from_env(ctx)
        .expect("env DOCDB_ENDPOINT, DOCDB_MASTER_KEY and DOCDB_DATABASE_ID must set");
    let container = env::var("DOCDB_TEST_CONTAINER").expect("env DOCDB_TEST_CONTAINER must set");

    Some((client, container))
}

#[tokio::test]
async fn test_live_document_lifecycle() -> Result<()> {
    let Some((client, container)) = init_client() else {
        warn!("DOCDB_TEST is not set, skipped");
        return Ok(());
    };

    let id = format!("docdb-live-{}", std::process::id());
    let doc = json!({"id": id, "userId": "live", "text": "hello"});

    let created = client.create_document(&container, &doc, "live").await?;
    debug!("created document: {created:?}");
    assert_eq!(Some(id.as_str()), created.as_ref().and_then(|d| d.id()));

    let read = client.read_document(&container, &id, "live").await?;
    assert_eq!(Some(&json!("hello")), read.get("text"));

    let upserted = client
        .upsert_document(
            &container,
            &json!({"id": id, "userId": "live", "text": "again"}),
            "live",
        )
        .await?;
    assert_eq!(
        Some(&json!("again")),
        upserted.as_ref().and_then(|d| d.get("text"))
    );

    let found = client
        .query_documents(
            &container,
            "SELECT * FROM c WHERE c.id = @id",
            vec![QueryParam::new("@id", id.clone())],
            QueryOptions::partition_key("live"),
        )
        .await?;
    assert_eq!(1, found.len());

    client.delete_document(&container, &id, "live").await?;
    let err = client
        .read_document(&container, &id, "live")
        .await
        .expect_err("deleted document must be gone");
    assert!(err.is_not_found());

    Ok(())
}

#[tokio::test]
async fn test_live_read_missing_document() -> Result<()> {
    let Some((client, container)) = init_client() else {
        warn!("DOCDB_TEST is not set, skipped");
        return Ok(());
    };

    let err = client
        .read_document(&container, "docdb-live-missing", "live")
        .await
        .expect_err("document must not exist");
    debug!("got error: {err:?}");
    assert!(err.is_not_found());

    Ok(())
}
