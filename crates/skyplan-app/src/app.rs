//! Application context: wires settings, the API client, the query store and
//! notifications together and runs commands against them.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use parking_lot::Mutex;
use serde_json::Value;
use skyplan_cache::MemoryStore;
use skyplan_core::NotificationCenter;
use skyplan_services::resource::{Aerodromes, Aircraft, Flights, Passengers, Users, Waypoints};
use skyplan_services::{ApiClient, HttpTransport, Resource, ResourceService, StaticToken, Transport};
use skyplan_settings::Settings;
use skyplan_table::{RowActionKind, RowCallback, TableConfig, TableEngine};

use crate::cli::ResourceKind;
use crate::pages;
use crate::render::render;

/// View options for `list`
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub search: Option<String>,
    /// Filter titles, matched case-insensitively
    pub filters: Vec<String>,
    /// Sort control clicks, in order
    pub sort: Vec<String>,
    pub page: usize,
}

/// Entity picked through a row's delete action
#[derive(Clone, Default)]
struct DeleteSelection(Arc<Mutex<Option<i64>>>);

impl DeleteSelection {
    fn hook(&self, id: i64) -> Option<RowCallback> {
        let picked = self.0.clone();
        Some(Arc::new(move || *picked.lock() = Some(id)))
    }

    fn take(&self) -> Option<i64> {
        self.0.lock().take()
    }
}

pub struct App {
    client: ApiClient,
    store: Arc<MemoryStore>,
    notifications: Arc<NotificationCenter>,
    settings: Settings,
}

impl App {
    pub fn new(transport: Arc<dyn Transport>, settings: Settings) -> Self {
        let tokens = Arc::new(StaticToken::new(settings.auth.token.clone()));
        Self {
            client: ApiClient::new(transport, tokens),
            store: Arc::new(MemoryStore::new(settings.cache.ttl())),
            notifications: Arc::new(NotificationCenter::new()),
            settings,
        }
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        let transport = HttpTransport::new(&settings.api.base_url, settings.api.timeout())
            .context("Failed to set up the API client")?;
        Ok(Self::new(Arc::new(transport), settings))
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    fn service<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(
            self.client.clone(),
            self.store.clone(),
            self.notifications.clone(),
        )
    }

    /// Fetch `kind` and build its page's table. Delete actions record the
    /// picked row in `selection`.
    async fn table(&self, kind: ResourceKind, selection: &DeleteSelection) -> Result<TableConfig> {
        let tables = &self.settings.tables;
        let on_delete = |id: i64| selection.hook(id);
        let config = match kind {
            ResourceKind::Aircraft => {
                let profiles = self.service::<Aircraft>().list().await?;
                pages::aircraft_table(&profiles, tables, &on_delete)?
            }
            ResourceKind::Aerodromes => {
                let aerodromes = self.service::<Aerodromes>().list().await?;
                pages::aerodromes_table(&aerodromes, tables, &on_delete)?
            }
            ResourceKind::Waypoints => {
                let waypoints = self.service::<Waypoints>().list().await?;
                pages::waypoints_table(&waypoints, tables, &on_delete)?
            }
            ResourceKind::Passengers => {
                let passengers = self.service::<Passengers>().list().await?;
                pages::passengers_table(&passengers, tables, &on_delete)?
            }
            ResourceKind::Flights => {
                let flights = self.service::<Flights>().list().await?;
                let aerodromes = self.service::<Aerodromes>().list().await?;
                let aircraft = self.service::<Aircraft>().list().await?;
                pages::flights_table(&flights, &aerodromes, &aircraft, tables, &on_delete)?
            }
            ResourceKind::Users => {
                let users = self.service::<Users>().list().await?;
                pages::users_table(&users, tables, &on_delete)?
            }
        };
        Ok(config)
    }

    /// Fetch `kind` and render it as a table
    pub async fn list(&self, kind: ResourceKind, options: &ListOptions) -> Result<String> {
        let config = self.table(kind, &DeleteSelection::default()).await?;
        let mut engine = TableEngine::new(config);
        apply_options(&mut engine, options)?;
        Ok(render(&engine.view()))
    }

    /// Fetch one entity as pretty-printed JSON
    pub async fn show(&self, kind: ResourceKind, id: i64) -> Result<String> {
        let value = match kind {
            ResourceKind::Aircraft => to_json(self.service::<Aircraft>().get(id).await?)?,
            ResourceKind::Aerodromes => to_json(self.service::<Aerodromes>().get(id).await?)?,
            ResourceKind::Waypoints => to_json(self.service::<Waypoints>().get(id).await?)?,
            ResourceKind::Passengers => to_json(self.service::<Passengers>().get(id).await?)?,
            ResourceKind::Flights => to_json(self.service::<Flights>().get(id).await?)?,
            ResourceKind::Users => to_json(self.service::<Users>().get(id).await?)?,
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Create an entity from the JSON draft `data`, returning the server's
    /// entity as pretty-printed JSON
    pub async fn create(&self, kind: ResourceKind, data: &str) -> Result<String> {
        let value = match kind {
            ResourceKind::Aircraft => self.create_from::<Aircraft>(data).await?,
            ResourceKind::Aerodromes => self.create_from::<Aerodromes>(data).await?,
            ResourceKind::Waypoints => self.create_from::<Waypoints>(data).await?,
            ResourceKind::Passengers => self.create_from::<Passengers>(data).await?,
            ResourceKind::Flights => self.create_from::<Flights>(data).await?,
            ResourceKind::Users => self.create_from::<Users>(data).await?,
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Update entity `id` from the JSON draft `data`
    pub async fn update(&self, kind: ResourceKind, id: i64, data: &str) -> Result<String> {
        let value = match kind {
            ResourceKind::Aircraft => self.update_from::<Aircraft>(id, data).await?,
            ResourceKind::Aerodromes => self.update_from::<Aerodromes>(id, data).await?,
            ResourceKind::Waypoints => self.update_from::<Waypoints>(id, data).await?,
            ResourceKind::Passengers => self.update_from::<Passengers>(id, data).await?,
            ResourceKind::Flights => self.update_from::<Flights>(id, data).await?,
            ResourceKind::Users => self.update_from::<Users>(id, data).await?,
        };
        Ok(serde_json::to_string_pretty(&value)?)
    }

    /// Delete entity `id` through its row's delete action. Rows whose
    /// permissions do not offer deleting are refused without a request.
    pub async fn delete(&self, kind: ResourceKind, id: i64) -> Result<()> {
        let selection = DeleteSelection::default();
        let engine = TableEngine::new(self.table(kind, &selection).await?);
        if !engine.config().rows().iter().any(|row| row.id == Some(id)) {
            bail!("{} {} not found", kind.singular(), id);
        }
        if engine.invoke_row_action(id, RowActionKind::Delete).is_none() {
            bail!("{} {} cannot be deleted", kind.singular(), id);
        }
        let Some(id) = selection.take() else {
            bail!("{} {} was not selected for deletion", kind.singular(), id);
        };

        match kind {
            ResourceKind::Aircraft => self.service::<Aircraft>().delete(id).await?,
            ResourceKind::Aerodromes => self.service::<Aerodromes>().delete(id).await?,
            ResourceKind::Waypoints => self.service::<Waypoints>().delete(id).await?,
            ResourceKind::Passengers => self.service::<Passengers>().delete(id).await?,
            ResourceKind::Flights => self.service::<Flights>().delete(id).await?,
            ResourceKind::Users => self.service::<Users>().delete(id).await?,
        }
        Ok(())
    }

    pub async fn weight_balance(&self, flight_id: i64) -> Result<String> {
        let value: Value = self
            .service::<Flights>()
            .query()
            .derived(flight_id, "weight-balance")
            .await?;
        Ok(serde_json::to_string_pretty(&value)?)
    }

    async fn create_from<R: Resource>(&self, data: &str) -> Result<Value> {
        let draft = parse_draft::<R>(data)?;
        to_json(self.service::<R>().create(draft).await?)
    }

    async fn update_from<R: Resource>(&self, id: i64, data: &str) -> Result<Value> {
        let draft = parse_draft::<R>(data)?;
        to_json(self.service::<R>().update(id, draft).await?)
    }
}

fn parse_draft<R: Resource>(data: &str) -> Result<R::Draft> {
    serde_json::from_str(data).with_context(|| format!("Invalid {} draft", R::LABEL))
}

fn to_json<T: serde::Serialize>(entity: T) -> Result<Value> {
    Ok(serde_json::to_value(entity)?)
}

fn apply_options(engine: &mut TableEngine, options: &ListOptions) -> Result<()> {
    for title in &options.filters {
        let index = filter_index(engine.config(), title)?;
        if !engine.state().filters.contains(&index) {
            engine.toggle_filter(index);
        }
    }

    if let Some(term) = &options.search {
        engine.set_search(term.clone());
    }

    for key in &options.sort {
        if !engine.config().sort_columns().iter().any(|c| c.key == *key) {
            let sortable: Vec<&str> = engine
                .config()
                .sort_columns()
                .iter()
                .map(|c| c.key.as_str())
                .collect();
            bail!("Column '{}' is not sortable (sortable: {})", key, sortable.join(", "));
        }
        engine.sort_by(key);
    }

    // Filters and search reset the page, so it goes last
    engine.set_page(options.page.max(1));
    Ok(())
}

fn filter_index(config: &TableConfig, title: &str) -> Result<usize> {
    let Some(spec) = config.filters() else {
        bail!("This table has no filters");
    };
    spec.definitions
        .iter()
        .position(|d| d.title.eq_ignore_ascii_case(title))
        .with_context(|| {
            let titles: Vec<&str> = spec.definitions.iter().map(|d| d.title.as_str()).collect();
            format!("Unknown filter '{}' (available: {})", title, titles.join(", "))
        })
}
