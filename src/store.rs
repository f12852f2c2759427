//! Remote collaborators: role store and user directory
//!
//! Both are REST services behind one base URL. [`HttpStore`] implements
//! both traits; the panel only depends on the traits.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::role::{AssignRole, NewRole, Role, RoleUpdate, User, UserEnvelope};

#[async_trait]
pub trait RoleStore: Send + Sync {
    /// `GET roles`
    async fn list_roles(&self) -> Result<Vec<Role>>;
    /// `POST roles`
    async fn create_role(&self, role: &NewRole) -> Result<Role>;
    /// `PUT roles`
    async fn update_role(&self, role: &RoleUpdate) -> Result<Role>;
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// `GET users/{identifier}`
    async fn find_user(&self, identifier: &str) -> Result<User>;
    /// `PATCH users/{id}/role`
    async fn assign_role(&self, user_id: &str, role_id: &str) -> Result<()>;
}

/// reqwest-backed client for the panel's REST API
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base: Url,
    token: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl HttpStore {
    pub fn new(cfg: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = cfg.timeout {
            builder = builder.timeout(t);
        }
        Ok(HttpStore {
            client: builder.build().map_err(|e| Error::Config(e.to_string()))?,
            base: cfg.api_url.clone(),
            token: cfg.api_token.clone(),
        })
    }

    /// Base URL plus percent-encoded path segments
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("{} cannot be a base url", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        tracing::debug!(%method, %url, "store request");
        let req = self.client.request(method, url);
        Ok(match &self.token {
            Some(t) => req.bearer_auth(t),
            None => req,
        })
    }

    /// Send and map non-success statuses to `Error::Server`
    async fn execute(&self, req: RequestBuilder) -> Result<Response> {
        let res = req.send().await.map_err(|e| Error::Transport(e.to_string()))?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.message)
            .unwrap_or_else(|_| if body.is_empty() { status.to_string() } else { body });
        tracing::warn!(status = status.as_u16(), %message, "store rejected request");
        Err(Error::Server { status: status.as_u16(), message })
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T> {
        let res = self.execute(req).await?;
        res.json::<T>().await.map_err(|e| Error::Decode(e.to_string()))
    }
}

#[async_trait]
impl RoleStore for HttpStore {
    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.fetch(self.request(Method::GET, &["roles"])?).await
    }

    async fn create_role(&self, role: &NewRole) -> Result<Role> {
        self.fetch(self.request(Method::POST, &["roles"])?.json(role)).await
    }

    async fn update_role(&self, role: &RoleUpdate) -> Result<Role> {
        self.fetch(self.request(Method::PUT, &["roles"])?.json(role)).await
    }
}

#[async_trait]
impl UserDirectory for HttpStore {
    async fn find_user(&self, identifier: &str) -> Result<User> {
        let env: UserEnvelope = self.fetch(self.request(Method::GET, &["users", identifier])?).await?;
        Ok(env.user)
    }

    async fn assign_role(&self, user_id: &str, role_id: &str) -> Result<()> {
        let body = AssignRole { role_id: role_id.to_string() };
        self.execute(self.request(Method::PATCH, &["users", user_id, "role"])?.json(&body)).await?;
        Ok(())
    }
}
