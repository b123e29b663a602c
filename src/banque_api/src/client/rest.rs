use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::{
    error::ClientError,
    models::{
        AccountDraft, AccountRecord, BalanceUpdate, ProfileRecord, TransactionDraft,
        TransactionRecord,
    },
    Gateway,
};
use crate::types::{AccountId, Email};

/// JSON REST client for the bank backend.
pub struct RestGateway {
    /// The client used to make requests to the backend.
    client: reqwest::Client,
    /// Base URL without trailing slash, e.g. `http://localhost:3000`.
    base_url: String,
}

impl RestGateway {
    /// Build a client for the given backend.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Root of the REST API.
    /// * `timeout` - Optional per-request timeout, the transport default applies otherwise.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Get the headers sent with every request.
    fn get_headers(&self) -> reqwest::header::HeaderMap {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::ACCEPT,
            reqwest::header::HeaderValue::from_static("application/json"),
        );
        headers
    }

    /// Turn a non-2xx answer into a [`ClientError::Status`].
    async fn check(res: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        debug!("Bank API error response {}: {}", status, body);
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Decode a JSON body, an empty one is reported as such.
    async fn json<T: DeserializeOwned>(res: reqwest::Response) -> Result<T, ClientError> {
        let text = res.text().await?;
        if text.trim().is_empty() {
            return Err(ClientError::EmptyBody);
        }
        serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let res = self
            .client
            .get(self.url(path))
            .query(query)
            .headers(self.get_headers())
            .send()
            .await?;
        Self::json(Self::check(res).await?).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let res = self
            .client
            .delete(self.url(path))
            .headers(self.get_headers())
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn fetch_accounts(&self) -> Result<Vec<AccountRecord>, ClientError> {
        self.get("accounts", &[]).await
    }

    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>, ClientError> {
        self.get("transactions", &[]).await
    }

    async fn fetch_profiles(
        &self,
        email: Option<&Email>,
    ) -> Result<Vec<ProfileRecord>, ClientError> {
        match email {
            Some(email) => self.get("profiles", &[("email", email.as_str())]).await,
            None => self.get("profiles", &[]).await,
        }
    }

    async fn create_account(&self, draft: &AccountDraft) -> Result<AccountRecord, ClientError> {
        let res = self
            .client
            .post(self.url("accounts"))
            .headers(self.get_headers())
            .json(draft)
            .send()
            .await?;
        Self::json(Self::check(res).await?).await
    }

    async fn update_account_balance(
        &self,
        id: &AccountId,
        balance: f64,
    ) -> Result<(), ClientError> {
        let res = self
            .client
            .patch(self.url(&format!("accounts/{}", id)))
            .headers(self.get_headers())
            .json(&BalanceUpdate { balance })
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), ClientError> {
        self.delete(&format!("accounts/{}", id)).await
    }

    async fn add_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<TransactionRecord, ClientError> {
        let res = self
            .client
            .post(self.url("transactions"))
            .headers(self.get_headers())
            .json(draft)
            .send()
            .await?;
        Self::json(Self::check(res).await?).await
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&format!("transactions/{}", id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountType, BankAccount};
    use serde_json::json;
    use wiremock::{
        matchers::{body_json, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    async fn gateway(server: &MockServer) -> RestGateway {
        RestGateway::new(&server.uri(), Some(Duration::from_secs(5))).unwrap()
    }

    #[test]
    fn test_url_building() {
        let gateway = RestGateway::new("http://localhost:3000/", None).unwrap();
        assert_eq!(gateway.url("accounts"), "http://localhost:3000/accounts");
        let gateway = RestGateway::new("http://localhost:3000", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(gateway.url("accounts/1"), "http://localhost:3000/accounts/1");
    }

    #[tokio::test]
    async fn test_profiles_are_filtered_by_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/profiles"))
            .and(query_param("email", "marie@example.fr"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 1,
                "name": "Marie Dupont",
                "email": "marie@example.fr",
                "phone": "0612345678",
                "balance": 1200.5,
                "accountNumber": "FR76 0001"
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let email = Email::new("marie@example.fr").unwrap();
        let profiles = gateway(&server).await.fetch_profiles(Some(&email)).await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].email, "marie@example.fr");
        assert_eq!(profiles[0].balance, 1200.5);
    }

    #[tokio::test]
    async fn test_balance_update_sends_new_balance() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/accounts/7"))
            .and(body_json(json!({ "balance": 42.0 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let id = AccountId::new("7").unwrap();
        gateway(&server)
            .await
            .update_account_balance(&id, 42.0)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_error_status_keeps_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/accounts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
            .mount(&server)
            .await;

        let err = gateway(&server).await.fetch_accounts().await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Status {
                status: 500,
                body: "database is down".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_created_account_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/accounts"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let draft = AccountDraft::from(&BankAccount::draft(AccountType::LivretA, 100.0));
        let err = gateway(&server).await.create_account(&draft).await.unwrap_err();
        assert_eq!(err, ClientError::EmptyBody);
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let gateway = RestGateway::new("http://127.0.0.1:1", Some(Duration::from_secs(2))).unwrap();
        let err = gateway.fetch_accounts().await.unwrap_err();
        assert!(matches!(err, ClientError::Transport(_)), "got {err:?}");
    }
}
