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

//! Resource addressing.
//!
//! A [`ResourceLink`] is the human readable path of a resource, used to build
//! request URLs. A [`ResourceId`] is the lowercase form of a link and is only
//! ever used as signature input. A `ResourceId` can only be derived from a
//! `ResourceLink`, so the id signed for a request always matches the link the
//! request was sent to.

use std::fmt::{Display, Formatter};

/// The kinds of resources the client addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    /// `dbs`
    Databases,
    /// `colls`
    Containers,
    /// `docs`
    Documents,
}

impl ResourceType {
    /// The path segment (and signature input) of this resource type.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Databases => "dbs",
            ResourceType::Containers => "colls",
            ResourceType::Documents => "docs",
        }
    }
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slash-joined path of a resource, e.g. `dbs/app/colls/notes/docs/note-1`.
///
/// Never starts or ends with `/` and never contains empty segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceLink(String);

impl ResourceLink {
    /// Build a link from raw segments.
    ///
    /// Each segment is split on `/`, every piece is trimmed of whitespace and
    /// empty pieces are dropped before joining with `/`.
    pub fn build<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut link = String::with_capacity(64);
        for segment in segments {
            for piece in segment.as_ref().split('/') {
                let piece = piece.trim();
                if piece.is_empty() {
                    continue;
                }
                if !link.is_empty() {
                    link.push('/');
                }
                link.push_str(piece);
            }
        }

        Self(link)
    }

    /// Derive the resource id used to sign requests against this link.
    pub fn id(&self) -> ResourceId {
        ResourceId(self.0.to_lowercase())
    }

    /// Iterate over the segments of this link.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// The link as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ResourceLink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ResourceLink {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lowercase form of a [`ResourceLink`], only used as signature input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join segments into a [`ResourceLink`].
pub fn build_link<I, S>(segments: I) -> ResourceLink
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    ResourceLink::build(segments)
}

/// Lowercase a link into the [`ResourceId`] used for signing.
pub fn build_id(link: &ResourceLink) -> ResourceId {
    link.id()
}

/// `dbs/<database>`
pub fn database_link(database_id: &str) -> ResourceLink {
    build_link([ResourceType::Databases.as_str(), database_id])
}

/// `dbs/<database>/colls/<container>`
pub fn container_link(database_id: &str, container_id: &str) -> ResourceLink {
    build_link([
        ResourceType::Databases.as_str(),
        database_id,
        ResourceType::Containers.as_str(),
        container_id,
    ])
}

/// `dbs/<database>/colls/<container>/docs`
pub fn documents_link(database_id: &str, container_id: &str) -> ResourceLink {
    build_link([
        container_link(database_id, container_id).as_str(),
        ResourceType::Documents.as_str(),
    ])
}

/// `dbs/<database>/colls/<container>/docs/<document>`
pub fn document_link(database_id: &str, container_id: &str, document_id: &str) -> ResourceLink {
    build_link([
        documents_link(database_id, container_id).as_str(),
        document_id,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(&["dbs", "app", "colls", "notes"], "dbs/app/colls/notes"; "plain")]
    #[test_case(&["/dbs/", " app ", "colls", "notes/"], "dbs/app/colls/notes"; "slash and whitespace noise")]
    #[test_case(&["dbs", "", "  ", "/", "app"], "dbs/app"; "empty segments dropped")]
    #[test_case(&["dbs//app", "colls///notes"], "dbs/app/colls/notes"; "inner double slashes")]
    #[test_case(&["dbs/App", "colls/Notes"], "dbs/App/colls/Notes"; "case preserved")]
    #[test_case(&[], ""; "no segments")]
    fn test_build_link(segments: &[&str], expected: &str) {
        let link = build_link(segments);
        assert_eq!(link.as_str(), expected);

        assert!(!link.as_str().starts_with('/'));
        assert!(!link.as_str().ends_with('/'));
        assert!(!link.as_str().contains("//"));
        assert_eq!(build_id(&link).as_str(), link.as_str().to_lowercase());
    }

    #[test]
    fn test_convenience_links() {
        assert_eq!(database_link("app").as_str(), "dbs/app");
        assert_eq!(container_link("app", "notes").as_str(), "dbs/app/colls/notes");
        assert_eq!(
            documents_link("app", "notes").as_str(),
            "dbs/app/colls/notes/docs"
        );
        assert_eq!(
            document_link("app", "notes", "note-1").as_str(),
            "dbs/app/colls/notes/docs/note-1"
        );
    }

    #[test]
    fn test_id_is_lowercase_link() {
        let link = document_link("App", "LifePlan", "User-42");
        assert_eq!(link.as_str(), "dbs/App/colls/LifePlan/docs/User-42");
        assert_eq!(link.id().as_str(), "dbs/app/colls/lifeplan/docs/user-42");
    }

    #[test]
    fn test_segments() {
        let link = documents_link("app", "notes");
        assert_eq!(
            link.segments().collect::<Vec<_>>(),
            vec!["dbs", "app", "colls", "notes", "docs"]
        );
    }
}
