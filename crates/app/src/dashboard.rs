use bizgloss_api::CatalogClient;
use bizgloss_core::{render::render_page, BusinessDomain, BusinessTerm, ViewState};
use metrics::counter;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::views::{settled, ListView};

/// Root composition: a static header above the domain and glossary views.
///
/// The two views share nothing. Each fetches on its own and the dashboard
/// only reads their states when rendering.
pub struct Dashboard {
    client: CatalogClient,
    views: RwLock<MountedViews>,
}

struct MountedViews {
    domains: ListView<BusinessDomain>,
    glossary: ListView<BusinessTerm>,
}

/// Point-in-time copy of both view states.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub domains: ViewState<BusinessDomain>,
    pub glossary: ViewState<BusinessTerm>,
}

impl DashboardSnapshot {
    pub fn render(&self) -> String {
        render_page(&self.domains, &self.glossary)
    }
}

impl Dashboard {
    /// Mounts both views; each issues its fetch immediately.
    pub fn mount(client: CatalogClient) -> Self {
        let views = mount_views(&client);
        Self {
            client,
            views: RwLock::new(views),
        }
    }

    /// Replaces both views with freshly mounted ones.
    ///
    /// The previous views are unmounted, so their pending fetches never land.
    /// Ignored while either view is still loading; returns whether a remount
    /// happened.
    pub async fn remount(&self) -> bool {
        let previous = {
            let mut views = self.views.write().await;
            if views.domains.is_loading() || views.glossary.is_loading() {
                debug!(stage = "view", "remount ignored while views are loading");
                return false;
            }
            std::mem::replace(&mut *views, mount_views(&self.client))
        };
        drop(previous);

        counter!("dashboard_remount_total").increment(1);
        info!(stage = "view", "dashboard views remounted");
        true
    }

    /// Remounts only the views whose last fetch failed.
    ///
    /// Called on every page load so a failed view fetches again, the way a
    /// browser reload would. Loaded views keep their records.
    pub async fn remount_failed(&self) -> usize {
        let mut views = self.views.write().await;
        let mut remounted = 0;
        if views.domains.is_failed() {
            views.domains = mount_domains(&self.client);
            remounted += 1;
        }
        if views.glossary.is_failed() {
            views.glossary = mount_glossary(&self.client);
            remounted += 1;
        }
        drop(views);

        if remounted > 0 {
            counter!("dashboard_remount_total").increment(1);
            info!(stage = "view", remounted, "failed views remounted");
        }
        remounted
    }

    pub async fn snapshot(&self) -> DashboardSnapshot {
        let views = self.views.read().await;
        DashboardSnapshot {
            domains: views.domains.state(),
            glossary: views.glossary.state(),
        }
    }

    /// Waits until both currently mounted views have settled.
    pub async fn settled(&self) -> DashboardSnapshot {
        let (domains, glossary) = {
            let views = self.views.read().await;
            (views.domains.subscribe(), views.glossary.subscribe())
        };
        let (domains, glossary) = tokio::join!(settled(domains), settled(glossary));
        DashboardSnapshot { domains, glossary }
    }
}

fn mount_views(client: &CatalogClient) -> MountedViews {
    MountedViews {
        domains: mount_domains(client),
        glossary: mount_glossary(client),
    }
}

fn mount_domains(client: &CatalogClient) -> ListView<BusinessDomain> {
    let client = client.clone();
    ListView::mount("domains", async move { client.fetch_business_domains().await })
}

fn mount_glossary(client: &CatalogClient) -> ListView<BusinessTerm> {
    let client = client.clone();
    ListView::mount("glossary", async move { client.fetch_business_glossary().await })
}
