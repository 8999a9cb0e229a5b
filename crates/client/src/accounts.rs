//! Typed wrapper over the `Accounts` controller.

use crate::dispatcher::{CallOptions, RequestDispatcher};
use crate::filter::QueryFilter;
use apibridge_types::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const CONTROLLER: &str = "Accounts";

/// Row shape returned by the list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountView {
    pub id: i64,
    pub name: String,
    pub account_type_id: i64,
    #[serde(default)]
    pub account_type_caption: Option<String>,
}

/// Minimal shape returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountNavigation {
    pub id: i64,
    pub name: String,
}

/// Creation payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountCreate {
    pub name: String,
    pub account_type_id: i64,
}

/// Update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountUpdate {
    pub name: String,
    pub account_type_id: i64,
}

/// Accounts endpoint wrapper; all calls go through the shared dispatcher and
/// inherit its refresh-and-replay behavior.
pub struct AccountsApi {
    dispatcher: Arc<RequestDispatcher>,
}

impl AccountsApi {
    #[must_use]
    pub fn new(dispatcher: Arc<RequestDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Search accounts by filter.
    ///
    /// # Errors
    ///
    /// Propagates dispatcher errors.
    pub async fn search(&self, filter: &QueryFilter) -> Result<Vec<AccountNavigation>> {
        self.dispatcher
            .get(
                &format!("{CONTROLLER}/Search{}", filter.to_query_string()),
                CallOptions::default(),
                true,
            )
            .await
    }

    /// List accounts matching the filter.
    ///
    /// # Errors
    ///
    /// Propagates dispatcher errors.
    pub async fn list(&self, filter: &QueryFilter, show_loader: bool) -> Result<Vec<AccountView>> {
        self.dispatcher
            .get(
                &format!("{CONTROLLER}{}", filter.to_query_string()),
                CallOptions::default(),
                show_loader,
            )
            .await
    }

    /// List accounts eligible as a transfer target.
    ///
    /// # Errors
    ///
    /// Propagates dispatcher errors.
    pub async fn for_target(&self, filter: &QueryFilter) -> Result<Vec<AccountView>> {
        self.dispatcher
            .get(
                &format!("{CONTROLLER}/ForTarget{}", filter.to_query_string()),
                CallOptions::default(),
                true,
            )
            .await
    }

    /// Create an account; the API answers with a bare success flag.
    ///
    /// # Errors
    ///
    /// Propagates dispatcher errors.
    pub async fn create(&self, account: &AccountCreate) -> Result<bool> {
        self.dispatcher
            .post(CONTROLLER, account, CallOptions::default(), true)
            .await
    }

    /// Update an existing account.
    ///
    /// # Errors
    ///
    /// Propagates dispatcher errors.
    pub async fn update(&self, account_id: i64, account: &AccountUpdate) -> Result<bool> {
        self.dispatcher
            .put(
                &format!("{CONTROLLER}/{account_id}"),
                account,
                CallOptions::default(),
                true,
            )
            .await
    }

    /// Remove an account.
    ///
    /// # Errors
    ///
    /// Propagates dispatcher errors.
    pub async fn remove(&self, account_id: i64) -> Result<bool> {
        self.dispatcher
            .delete(
                &format!("{CONTROLLER}/{account_id}"),
                CallOptions::default(),
                true,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apibridge_auth::TokenService;
    use apibridge_config::ApiConfig;
    use apibridge_store::MemoryCredentialStore;
    use apibridge_types::{
        TransportRequest, TransportResponse, Verb, traits::UiHooks, transport::Transport,
    };
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every URL and answers with a canned envelope per verb.
    struct UrlRecorder {
        urls: Mutex<Vec<(Verb, String)>>,
    }

    #[async_trait]
    impl Transport for UrlRecorder {
        async fn execute(
            &self,
            request: TransportRequest,
        ) -> apibridge_types::error::Result<TransportResponse> {
            self.urls
                .lock()
                .unwrap()
                .push((request.verb, request.url.clone()));
            let body = match request.verb {
                Verb::Get => json!({"IsSuccess": true, "Data": [], "ErrorMessage": null}),
                _ => json!({"IsSuccess": true, "Data": true, "ErrorMessage": null}),
            };
            Ok(TransportResponse::new(200, body.to_string()))
        }
    }

    fn accounts_api(transport: Arc<UrlRecorder>) -> AccountsApi {
        let config = ApiConfig::default();
        let store = Arc::new(MemoryCredentialStore::new());
        let auth = Arc::new(TokenService::new(
            config.clone(),
            transport.clone(),
            store,
            UiHooks::default(),
        ));
        AccountsApi::new(Arc::new(RequestDispatcher::new(
            config,
            transport,
            auth,
            UiHooks::default(),
        )))
    }

    #[tokio::test]
    async fn test_search_builds_filtered_url() {
        let transport = Arc::new(UrlRecorder {
            urls: Mutex::new(Vec::new()),
        });
        let api = accounts_api(transport.clone());

        let filter = QueryFilter::new().field("AccountTypeId", 3).field("Name", "");
        let result = api.search(&filter).await.unwrap();
        assert!(result.is_empty());

        let urls = transport.urls.lock().unwrap();
        assert_eq!(urls[0].0, Verb::Get);
        assert!(urls[0].1.ends_with("api/v1/Accounts/Search?accountTypeId=3"));
    }

    #[tokio::test]
    async fn test_update_puts_to_account_id() {
        let transport = Arc::new(UrlRecorder {
            urls: Mutex::new(Vec::new()),
        });
        let api = accounts_api(transport.clone());

        let updated = api
            .update(
                12,
                &AccountUpdate {
                    name: "savings".into(),
                    account_type_id: 2,
                },
            )
            .await
            .unwrap();
        assert!(updated);

        let urls = transport.urls.lock().unwrap();
        assert_eq!(urls[0].0, Verb::Put);
        assert!(urls[0].1.ends_with("api/v1/Accounts/12"));
    }

    #[tokio::test]
    async fn test_remove_deletes_account() {
        let transport = Arc::new(UrlRecorder {
            urls: Mutex::new(Vec::new()),
        });
        let api = accounts_api(transport.clone());

        assert!(api.remove(7).await.unwrap());
        let urls = transport.urls.lock().unwrap();
        assert_eq!(urls[0].0, Verb::Delete);
        assert!(urls[0].1.ends_with("api/v1/Accounts/7"));
    }

    #[tokio::test]
    async fn test_list_without_filter_hits_controller_root() {
        let transport = Arc::new(UrlRecorder {
            urls: Mutex::new(Vec::new()),
        });
        let api = accounts_api(transport.clone());

        api.list(&QueryFilter::new(), false).await.unwrap();
        let urls = transport.urls.lock().unwrap();
        assert!(urls[0].1.ends_with("api/v1/Accounts"));
    }
}
