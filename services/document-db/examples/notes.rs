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

//! Create, query and delete a note.
//!
//! ```shell
//! DOCDB_ENDPOINT=https://localhost:8081 \
//! DOCDB_MASTER_KEY=... \
//! DOCDB_DATABASE_ID=app \
//! cargo run --example notes -- notes
//! ```

use anyhow::Result;
use docdb_core::{Context, OsEnv};
use docdb_http_send_reqwest::ReqwestHttpSend;
use docdb_rest::{Client, QueryOptions, QueryParam};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
struct Note {
    id: String,
    #[serde(rename = "userId")]
    user_id: String,
    text: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let _ = dotenv::dotenv();

    let container = std::env::args().nth(1).unwrap_or_else(|| "notes".to_string());

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::from_env(ctx)?;

    let note = Note {
        id: "note-1".to_string(),
        user_id: "u1".to_string(),
        text: "hello".to_string(),
    };
    let stored = client.upsert_document(&container, &note, "u1").await?;
    println!("stored: {:?}", stored.as_ref().and_then(|d| d.id()));

    let notes: Vec<Note> = client
        .query_documents_as(
            &container,
            "SELECT * FROM c WHERE c.userId = @user",
            vec![QueryParam::new("@user", "u1")],
            QueryOptions::partition_key("u1"),
        )
        .await?;
    for note in &notes {
        println!("{}: {}", note.id, note.text);
    }

    client.delete_document(&container, "note-1", "u1").await?;
    println!("deleted note-1");

    Ok(())
}
