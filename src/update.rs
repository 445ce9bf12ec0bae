//! Periodic refresh of the menu store.
//!
//! One cycle scrapes the menu page for the current PDF links, then downloads
//! and extracts each restaurant's PDF. A failed or timed out restaurant keeps
//! its previous menus.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use reqwest::Client;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::fetch::{self, TextExtractor};
use crate::pipeline;
use crate::profile::{self, RestaurantProfile};
use crate::scrape;
use crate::store::{CachedMenu, MenuStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated { days: usize },
    /// The PDF is byte-identical to the one already extracted.
    Unchanged,
    /// Another update of the same restaurant is still running.
    Busy,
}

pub struct UpdateService {
    client: Client,
    config: Config,
    store: Arc<MenuStore>,
    extractor: Arc<dyn TextExtractor>,
}

impl UpdateService {
    pub fn new(
        client: Client,
        config: Config,
        store: Arc<MenuStore>,
        extractor: Arc<dyn TextExtractor>,
    ) -> Self {
        Self {
            client,
            config,
            store,
            extractor,
        }
    }

    /// Runs one full cycle over all known restaurants. Only a failure to read
    /// the menu page is returned; per-restaurant failures are logged.
    pub async fn run_cycle(&self) -> Result<(), AppError> {
        info!("updating menus");
        let links = scrape::fetch_pdf_links(
            &self.client,
            &self.config.menu_page_url,
            &self.config.base_url,
        )
        .await?;
        if links.is_empty() {
            warn!(page = %self.config.menu_page_url, "no pdf links found");
        }
        self.store.set_links(links.clone());

        for profile in profile::all() {
            let result = match pdf_link(&links, profile) {
                Ok(url) => self.update_restaurant(profile, url).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(UpdateOutcome::Updated { days }) => {
                    info!(restaurant = profile.id, days, "menus updated")
                }
                Ok(UpdateOutcome::Unchanged) => {
                    debug!(restaurant = profile.id, "pdf unchanged")
                }
                Ok(UpdateOutcome::Busy) => {
                    info!(restaurant = profile.id, "update already running, skipped")
                }
                Err(err) => {
                    warn!(restaurant = profile.id, error = %err, "update failed, keeping previous menus")
                }
            }
        }

        info!("menus update finished");
        Ok(())
    }

    /// Refreshes one restaurant from `url`, bounded by the configured timeout.
    pub async fn update_restaurant(
        &self,
        profile: &RestaurantProfile,
        url: &str,
    ) -> Result<UpdateOutcome, AppError> {
        let Some(_guard) = self.store.try_begin_update(profile.id) else {
            return Ok(UpdateOutcome::Busy);
        };

        let timeout = self.config.update_timeout;
        tokio::time::timeout(timeout, self.refresh(profile, url))
            .await
            .map_err(|_| AppError::Timeout {
                restaurant: profile.id.to_string(),
                seconds: timeout.as_secs(),
            })?
    }

    async fn refresh(&self, profile: &RestaurantProfile, url: &str) -> Result<UpdateOutcome, AppError> {
        let bytes = fetch::download_pdf(&self.client, url).await?;
        let fingerprint = fetch::pdf_fingerprint(&bytes);
        if self.store.fingerprint(profile.id).as_deref() == Some(fingerprint.as_str()) {
            return Ok(UpdateOutcome::Unchanged);
        }

        let text = fetch::extract_text_blocking(Arc::clone(&self.extractor), bytes).await?;
        let menus = pipeline::extract_week(&text, profile);
        if menus.is_empty() {
            warn!(restaurant = profile.id, %url, "no menus found in pdf");
        }

        let days = menus.len();
        self.store.replace(
            profile.id,
            CachedMenu {
                pdf_url: url.to_string(),
                fingerprint,
                menus,
                updated_at: Utc::now(),
            },
        );
        Ok(UpdateOutcome::Updated { days })
    }

    /// Runs a cycle right away and then every refresh interval.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.config.refresh_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if let Err(err) = self.run_cycle().await {
                    warn!(error = %err, "menu update cycle failed");
                }
            }
        })
    }
}

fn pdf_link<'a>(
    links: &'a BTreeMap<String, String>,
    profile: &RestaurantProfile,
) -> Result<&'a str, AppError> {
    links
        .get(profile.id)
        .map(String::as_str)
        .ok_or_else(|| AppError::MissingLink(profile.id.to_string()))
}
