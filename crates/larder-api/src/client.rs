// Async HTTP client for the larder back-office REST API.
//
// JSON REST endpoints under the configured base URL. No authentication;
// the service sits behind the deployment's own access controls.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{
    Ingredient, IngredientPayload, InventoryItem, Paged, RecipeDetail, RecipeDraft, RecipeItem,
    SortOrder,
};

// ── Error response shape ─────────────────────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the larder service.
///
/// Cheap to clone; the underlying `reqwest::Client` holds the connection
/// pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client from a base URL and transport config.
    pub fn new(base_url: &str, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Parse the base URL and ensure it ends with a single trailing slash
    /// so relative joins behave.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"recipes/7"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining relative paths works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        self.handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path);
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        self.handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.parse_error(status, resp).await)
        }
    }

    async fn parse_error(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let raw = resp.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<ErrorResponse>(&raw) {
            Error::Api {
                status: status.as_u16(),
                message: err.message.unwrap_or_else(|| status.to_string()),
                code: err.code,
            }
        } else {
            Error::Api {
                status: status.as_u16(),
                message: if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                },
                code: None,
            }
        }
    }

    /// Standard list-endpoint query parameters. `page` is 1-based.
    fn list_params(
        page: u32,
        per_page: u32,
        search: &str,
        order: SortOrder,
        sort: &str,
    ) -> Vec<(&'static str, String)> {
        vec![
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
            ("search", search.to_owned()),
            ("sort", sort.to_owned()),
            ("order", order.as_str().to_owned()),
        ]
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Recipes ──────────────────────────────────────────────────────

    /// Fetch one page of recipes. `page` is 1-based.
    pub async fn list_recipes(
        &self,
        page: u32,
        per_page: u32,
        search: &str,
        order: SortOrder,
        sort: &str,
    ) -> Result<Paged<RecipeItem>, Error> {
        self.get_with_params("recipes", &Self::list_params(page, per_page, search, order, sort))
            .await
    }

    /// Fetch a recipe plus its ingredient lines.
    pub async fn get_recipe_detail(&self, id: u64) -> Result<RecipeDetail, Error> {
        self.get(&format!("recipes/{id}")).await
    }

    pub async fn create_recipe(&self, draft: &RecipeDraft) -> Result<RecipeItem, Error> {
        self.post("recipes", draft).await
    }

    pub async fn update_recipe(&self, id: u64, draft: &RecipeDraft) -> Result<RecipeItem, Error> {
        self.put(&format!("recipes/{id}"), draft).await
    }

    pub async fn delete_recipe(&self, id: u64) -> Result<(), Error> {
        self.delete(&format!("recipes/{id}")).await
    }

    // ── Ingredients ──────────────────────────────────────────────────

    pub async fn create_ingredient(
        &self,
        payload: &IngredientPayload,
    ) -> Result<Ingredient, Error> {
        self.post("ingredients", payload).await
    }

    pub async fn update_ingredient(
        &self,
        id: u64,
        payload: &IngredientPayload,
    ) -> Result<Ingredient, Error> {
        self.put(&format!("ingredients/{id}"), payload).await
    }

    pub async fn delete_ingredient(&self, id: u64) -> Result<(), Error> {
        self.delete(&format!("ingredients/{id}")).await
    }

    // ── Inventory ────────────────────────────────────────────────────

    /// Fetch one page of inventory items. `page` is 1-based.
    pub async fn list_inventory(
        &self,
        page: u32,
        per_page: u32,
        search: &str,
        order: SortOrder,
        sort: &str,
    ) -> Result<Paged<InventoryItem>, Error> {
        self.get_with_params(
            "inventory",
            &Self::list_params(page, per_page, search, order, sort),
        )
        .await
    }
}
