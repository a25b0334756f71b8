use contracts::domain::{
    Member, MemberDto, MemberOrderRow, OrderLineRecord, OrderPayload, OrderWindow, PeriodCode,
    WindowDraft,
};
use reqwest::RequestBuilder;
use uuid::Uuid;

use crate::error::ClientError;

/// HTTP client for the ordering backend. One independent request per call,
/// no automatic retries; a failure surfaces as an error and leaves nothing
/// half-done on this side.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer credential when we have one.
    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("backend request failed: {} {}", status, body);
            return Err(ClientError::Status { status, body });
        }
        Ok(response)
    }

    // ---- members ----

    /// GET /api/members
    pub async fn list_members(&self) -> Result<Vec<Member>, ClientError> {
        let response = self.client.get(self.url("/api/members")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// POST /api/members
    pub async fn create_member(&self, dto: &MemberDto) -> Result<(), ClientError> {
        dto.validate().map_err(ClientError::Validation)?;
        let response = self
            .authorize(self.client.post(self.url("/api/members")))
            .json(dto)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // ---- order windows ----

    /// GET /api/windows
    pub async fn list_windows(&self) -> Result<Vec<OrderWindow>, ClientError> {
        let response = self.client.get(self.url("/api/windows")).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// The window customers are currently allowed to order against.
    pub async fn active_window(&self) -> Result<Option<OrderWindow>, ClientError> {
        let windows = self.list_windows().await?;
        Ok(pick_active(windows))
    }

    /// POST /api/order-windows (the admin schedule form posts here; listing
    /// goes through /api/windows — the backend owns that split)
    pub async fn create_window(&self, draft: &WindowDraft) -> Result<(), ClientError> {
        draft.validate().map_err(ClientError::Validation)?;
        let response = self
            .authorize(self.client.post(self.url("/api/order-windows")))
            .json(draft)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// PUT /api/windows/:id with a partial body.
    pub async fn update_window(
        &self,
        id: Uuid,
        patch: &serde_json::Value,
    ) -> Result<(), ClientError> {
        let response = self
            .authorize(self.client.put(self.url(&format!("/api/windows/{}", id))))
            .json(patch)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// DELETE /api/windows/:id
    pub async fn delete_window(&self, id: Uuid) -> Result<(), ClientError> {
        let response = self
            .authorize(
                self.client
                    .delete(self.url(&format!("/api/windows/{}", id))),
            )
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    // ---- orders ----

    /// POST /api/orders
    pub async fn submit_order(&self, payload: &OrderPayload) -> Result<(), ClientError> {
        let response = self
            .authorize(self.client.post(self.url("/api/orders")))
            .json(payload)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    /// GET /api/orders/member/:id — the member's rows for the current period.
    pub async fn member_orders(&self, member_id: Uuid) -> Result<Vec<MemberOrderRow>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/orders/member/{}", member_id)))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    /// GET /api/orders/period/:code — every order line of a period, for the
    /// admin report.
    pub async fn period_order_lines(
        &self,
        period: PeriodCode,
    ) -> Result<Vec<OrderLineRecord>, ClientError> {
        let response = self
            .client
            .get(self.url(&format!("/api/orders/period/{}", period.value())))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }
}

/// First window flagged active, if any.
pub fn pick_active(windows: Vec<OrderWindow>) -> Option<OrderWindow> {
    windows.into_iter().find(|w| w.is_active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn window(active: bool) -> OrderWindow {
        OrderWindow {
            id: Uuid::new_v4(),
            order_no: None,
            start_time: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2024, 3, 7, 0, 0, 0).unwrap(),
            orderanke: None,
            is_active: active,
            announced_open: false,
            announced_close: false,
        }
    }

    #[test]
    fn test_pick_active() {
        assert!(pick_active(vec![]).is_none());
        assert!(pick_active(vec![window(false), window(false)]).is_none());

        let active = window(true);
        let id = active.id;
        let picked = pick_active(vec![window(false), active, window(true)]).unwrap();
        assert_eq!(picked.id, id);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = ApiClient::new("http://localhost:3000/", None);
        assert_eq!(api.url("/api/members"), "http://localhost:3000/api/members");
    }

    #[test]
    fn test_create_member_rejects_empty_name() {
        let api = ApiClient::new("http://localhost:3000", None);
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let err = rt
            .block_on(api.create_member(&MemberDto::new("   ")))
            .unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }
}
