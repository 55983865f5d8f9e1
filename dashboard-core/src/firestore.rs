//! Process-wide handle to the document database backing the dashboard.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirebaseConfig {
    pub api_key: Option<String>,
    pub project_id: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
}

impl FirebaseConfig {
    pub fn auth_domain(&self) -> Option<String> {
        self.project_id.as_ref().map(|p| format!("{p}.firebaseapp.com"))
    }

    pub fn storage_bucket(&self) -> Option<String> {
        self.project_id.as_ref().map(|p| format!("{p}.firebasestorage.app"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentDb {
    project_id: String,
    api_key: Option<String>,
}

impl DocumentDb {
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// REST root under which the project's documents live.
    pub fn documents_url(&self) -> String {
        format!(
            "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
            self.project_id
        )
    }
}

static DOCUMENT_DB: OnceLock<Option<DocumentDb>> = OnceLock::new();

/// Initialise the database handle on first call; later calls return the same handle
/// regardless of `config`. `None` when no project id was configured at first call.
pub fn document_db(config: &FirebaseConfig) -> Option<&'static DocumentDb> {
    DOCUMENT_DB
        .get_or_init(|| {
            let project_id = config.project_id.clone()?;
            tracing::info!(%project_id, "document database initialised");
            Some(DocumentDb {
                project_id,
                api_key: config.api_key.clone(),
            })
        })
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_domains_follow_project_id() {
        let cfg = FirebaseConfig {
            project_id: Some("dash".into()),
            ..Default::default()
        };
        assert_eq!(cfg.auth_domain().as_deref(), Some("dash.firebaseapp.com"));
        assert_eq!(cfg.storage_bucket().as_deref(), Some("dash.firebasestorage.app"));
        assert!(FirebaseConfig::default().auth_domain().is_none());
    }

    #[test]
    fn document_db_is_initialised_once() {
        let first = FirebaseConfig {
            project_id: Some("first".into()),
            ..Default::default()
        };
        let second = FirebaseConfig {
            project_id: Some("second".into()),
            ..Default::default()
        };

        let a = document_db(&first).expect("project id configured");
        let b = document_db(&second).expect("handle already initialised");

        assert!(std::ptr::eq(a, b));
        assert_eq!(b.project_id(), "first");
        assert!(a.documents_url().contains("/projects/first/"));
    }
}
