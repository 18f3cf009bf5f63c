mod fetched;

pub use fetched::{ElementFormat, FetchedElement};

use crate::OSM_API_PATH;
use crate::config::ClientConfig;
use crate::error::{ClientError, OsmError, StatusPolicy};
use crate::normalize::{
    changeset_ids, element_from_json, first_element, history_from_json, resolve_changesets,
    user_from_json,
};
use crate::xml::{parse_changesets, parse_document};

use common::{HttpStatusCode, RedactedToken};
use models::{BoundingBox, Changeset, ElementRef, HistoryEntry, OsmDocument, OsmUser};

use std::path::Path;

use log::{debug, info, warn};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use url::Url;

const MAP_ENDPOINT: &str = "map";
const CHANGESETS_ENDPOINT: &str = "changesets";
const USER_ENDPOINT: &str = "user";
const HISTORY_SUFFIX: &str = "history";
const JSON_EXTENSION: &str = ".json";

#[derive(Clone)]
pub struct OsmClient {
    base_url: Url,
    client: Client,
    access_token: Option<RedactedToken>,
}

impl std::fmt::Debug for OsmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OsmClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.access_token.is_some())
            .finish()
    }
}

impl OsmClient {
    pub fn new(config: &ClientConfig) -> Result<Self, OsmError> {
        let mut base_url = Url::parse(&config.api_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        info!("OSM client targeting {base_url}");

        Ok(Self {
            base_url,
            client,
            access_token: config.access_token.clone(),
        })
    }

    /// Load `{config_dir}/osm-client.toml`, apply environment overrides and build a client.
    pub fn from_config_dir(config_dir: &Path) -> Result<Self, ClientError> {
        let config = ClientConfig::load(config_dir)?.apply_env()?;
        Ok(Self::new(&config)?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, OsmError> {
        Ok(self.base_url.join(OSM_API_PATH)?.join(path)?)
    }

    fn prepare_request(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request;
        if let Some(token) = &self.access_token {
            request = request.header(AUTHORIZATION, token.bearer_header());
        }
        request
    }

    /// Issue a GET and classify any non-success status under `policy`.
    async fn get(&self, url: Url, policy: StatusPolicy) -> Result<Response, OsmError> {
        debug!("GET {url}");

        let response = self
            .prepare_request(self.client.get(url.clone()))
            .send()
            .await
            .map_err(|e| {
                warn!("Request to {url} failed: {e}");
                OsmError::from(e)
            })?;

        let status = HttpStatusCode::from(response.status().as_u16());
        if !status.is_success() {
            let error = OsmError::from_status(status, policy, url.path());
            warn!("{error}");
            return Err(error);
        }

        Ok(response)
    }

    /// Download all map data inside `bbox` (`"minLon,minLat,maxLon,maxLat"`).
    ///
    /// # Errors
    /// - [`OsmError::RequestTooLarge`] on HTTP 400 (area or node limit exceeded)
    /// - [`OsmError::BandwidthExceeded`] on HTTP 509
    /// - [`OsmError::FetchFailure`] on any other status, network error or unreadable body
    /// - [`OsmError::InvalidRequest`] if `bbox` is malformed
    pub async fn fetch_map(&self, bbox: &str) -> Result<OsmDocument, OsmError> {
        let bbox: BoundingBox = bbox.parse()?;

        let mut url = self.endpoint(MAP_ENDPOINT)?;
        url.set_query(Some(&format!("bbox={bbox}")));

        let body = self.get(url, StatusPolicy::Map).await?.text().await?;
        let document = parse_document(&body)?;

        debug!(
            "Map download for {bbox} returned {} elements",
            document.element_count()
        );
        Ok(document)
    }

    /// Fetch one element by its `type/id` string.
    ///
    /// [`ElementFormat::Json`] yields the normalized element,
    /// [`ElementFormat::Xml`] the parsed XML document.
    ///
    /// # Errors
    /// - [`OsmError::RequestTooLarge`] on HTTP 400
    /// - [`OsmError::ElementMissing`] on HTTP 404
    /// - [`OsmError::BandwidthExceeded`] on HTTP 509
    /// - [`OsmError::FetchFailure`] on any other failure
    pub async fn fetch_element(
        &self,
        id: &str,
        format: ElementFormat,
    ) -> Result<FetchedElement, OsmError> {
        let element: ElementRef = id.parse()?;

        match format {
            ElementFormat::Xml => {
                let url = self.endpoint(&element.path())?;
                let body = self.get(url, StatusPolicy::Element).await?.text().await?;
                Ok(FetchedElement::Document(parse_document(&body)?))
            }
            ElementFormat::Json => {
                let url = self.endpoint(&format!("{}{JSON_EXTENSION}", element.path()))?;
                let json: Value = self.get(url, StatusPolicy::Element).await?.json().await?;
                let normalized = element_from_json(first_element(&json)?)?;
                Ok(FetchedElement::Normalized(normalized))
            }
        }
    }

    /// Fetch every version of an element, oldest first.
    ///
    /// An empty `id` resolves to `Ok(None)` without any request. With
    /// `include_changesets`, a second request fetches the referenced
    /// changesets and each entry's changeset id is replaced by its details.
    pub async fn fetch_element_history(
        &self,
        id: &str,
        include_changesets: bool,
    ) -> Result<Option<Vec<HistoryEntry>>, OsmError> {
        if id.trim().is_empty() {
            debug!("Empty element id, skipping history lookup");
            return Ok(None);
        }

        let element: ElementRef = id.parse()?;
        let url = self.endpoint(&format!(
            "{}/{HISTORY_SUFFIX}{JSON_EXTENSION}",
            element.path()
        ))?;

        let json: Value = self.get(url, StatusPolicy::Element).await?.json().await?;
        let entries = history_from_json(&json)?;

        if !include_changesets || entries.is_empty() {
            return Ok(Some(entries));
        }

        let ids = changeset_ids(&entries);
        let changesets = self.fetch_changesets(ids.as_slice()).await?;

        debug!(
            "Resolved {} of {} changesets for {element}",
            changesets.len(),
            ids.len()
        );
        Ok(Some(resolve_changesets(entries, &changesets)))
    }

    /// Fetch changesets by id in a single request.
    ///
    /// # Errors
    /// Same status mapping as [`OsmClient::fetch_element`]; an id that is not
    /// a non-negative integer is rejected before any request is made.
    pub async fn fetch_changesets<S: AsRef<str>>(
        &self,
        ids: &[S],
    ) -> Result<Vec<Changeset>, OsmError> {
        let ids = ids
            .iter()
            .map(|raw| {
                let raw = raw.as_ref().trim();
                raw.parse::<u64>()
                    .map_err(|_| OsmError::invalid_request(format!("Invalid changeset id: {raw:?}")))
            })
            .collect::<Result<Vec<u64>, OsmError>>()?;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(",");

        let mut url = self.endpoint(CHANGESETS_ENDPOINT)?;
        url.set_query(Some(&format!("changesets={joined}")));

        let body = self.get(url, StatusPolicy::Element).await?.text().await?;
        Ok(parse_changesets(&body)?)
    }

    /// Fetch a user's public profile.
    ///
    /// Returns `Ok(None)` when the user does not exist (HTTP 404). Transport
    /// errors are returned unclassified as [`OsmError::Http`].
    pub async fn fetch_user(&self, id: &str) -> Result<Option<OsmUser>, OsmError> {
        let id = id.trim();
        let user_id = id
            .parse::<u64>()
            .map_err(|_| OsmError::invalid_request(format!("Invalid user id: {id:?}")))?;

        let url = self.endpoint(&format!("{USER_ENDPOINT}/{user_id}{JSON_EXTENSION}"))?;
        debug!("GET {url}");

        let response = self
            .prepare_request(self.client.get(url.clone()))
            .send()
            .await
            .map_err(OsmError::raw_http)?;

        let status = HttpStatusCode::from(response.status().as_u16());
        if status == HttpStatusCode::NOT_FOUND {
            debug!("User {user_id} not found");
            return Ok(None);
        }

        if !status.is_success() {
            let error = OsmError::fetch_failure(format!("HTTP {status} from {}", url.path()));
            warn!("{error}");
            return Err(error);
        }

        let body = response.text().await.map_err(OsmError::raw_http)?;
        let json: Value = serde_json::from_str(&body).map_err(crate::error::ParseError::from)?;

        Ok(Some(user_from_json(&json)?))
    }
}
