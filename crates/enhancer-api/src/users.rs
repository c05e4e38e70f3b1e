//! Authentication endpoints

use reqwest::Method;

use crate::client::ApiClient;
use crate::models::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::Result;

#[derive(Clone)]
pub struct UserApi {
    client: ApiClient,
}

impl UserApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `POST /api/v1/login` with `{ email, password }`.
    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse<LoginResponse>> {
        let url = self.client.endpoint(&["api", "v1", "login"])?;
        let builder = self
            .client
            .request(Method::POST, url)
            .json(&LoginRequest { email, password });

        self.client.send(builder).await
    }

    /// `POST /api/v1/register` with `{ name, email, password }`.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<ApiResponse<RegisterResponse>> {
        let url = self.client.endpoint(&["api", "v1", "register"])?;
        let builder = self.client.request(Method::POST, url).json(&RegisterRequest {
            name,
            email,
            password,
        });

        self.client.send(builder).await
    }
}
