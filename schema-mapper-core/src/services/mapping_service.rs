//! 映射会话服务：目录加载、懒加载字段、保存提交

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{SelectAction, SelectionTree, Table, TableChange};

/// One mapping session: the open environment and its selection tree.
struct MappingSession {
    environment_id: Option<String>,
    tree: SelectionTree,
    last_saved_at: Option<DateTime<Utc>>,
}

/// Drives a mapping session against one environment at a time.
///
/// All mutation goes through `&self` methods behind a single `RwLock`; the
/// lock is never held across a connector call, so a long fetch cannot block
/// unrelated edits. Completed fetches are re-validated against the current
/// selection before they are applied (see
/// [`SelectionTree::apply_fetched_fields`]).
///
/// Saves are not queued or coalesced — callers must not start a save while
/// another is in flight.
pub struct MappingService {
    ctx: Arc<ServiceContext>,
    session: RwLock<MappingSession>,
}

impl MappingService {
    /// 创建映射服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            ctx,
            session: RwLock::new(MappingSession {
                environment_id: None,
                tree: SelectionTree::new(),
                last_saved_at: None,
            }),
        }
    }

    /// Open an environment and load its table catalog.
    ///
    /// Replaces the whole session; nothing from a previously opened
    /// environment survives. On failure the previous session is untouched.
    pub async fn open_environment(&self, environment_id: &str) -> CoreResult<()> {
        let env = self
            .ctx
            .environment_repository
            .find_by_id(environment_id)
            .await?
            .ok_or_else(|| CoreError::EnvironmentNotFound(environment_id.to_string()))?;

        let connector = self.ctx.get_connector(&env.id).await?;
        let catalog = match connector.fetch_catalog().await {
            Ok(catalog) => catalog,
            Err(e) => return Err(self.ctx.handle_connector_error(e)),
        };

        log::debug!("Loaded catalog for {}: {} tables", env.id, catalog.len());

        let mut session = self.session.write().await;
        session.environment_id = Some(env.id);
        session.tree.load_catalog(catalog);
        session.last_saved_at = None;
        Ok(())
    }

    /// Id of the currently open environment.
    pub async fn environment_id(&self) -> Option<String> {
        self.session.read().await.environment_id.clone()
    }

    /// Snapshot of the full catalog.
    pub async fn catalog(&self) -> Vec<Table> {
        self.session.read().await.tree.tables().to_vec()
    }

    /// Snapshot of the currently selected table, if any.
    pub async fn selected_table(&self) -> Option<Table> {
        self.session.read().await.tree.selected_table().cloned()
    }

    /// True iff any table has unsaved changes.
    pub async fn is_dirty(&self) -> bool {
        self.session.read().await.tree.is_dirty()
    }

    /// When the session last saved successfully.
    pub async fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.session.read().await.last_saved_at
    }

    /// Make a table the active selection, fetching its fields on first use.
    ///
    /// Re-selecting the active table does nothing. A response that comes back
    /// after another table took over the selection is dropped silently; a
    /// failed fetch restores the previous selection so re-selecting retries.
    pub async fn select_table(&self, table_name: &str) -> CoreResult<()> {
        let (environment_id, previous, action) = {
            let mut session = self.session.write().await;
            let environment_id = session
                .environment_id
                .clone()
                .ok_or(CoreError::NoEnvironmentOpen)?;
            let previous = session.tree.selected_table_name().map(str::to_string);
            let action = session.tree.select_table(table_name)?;
            (environment_id, previous, action)
        };

        if action != SelectAction::FetchNeeded {
            return Ok(());
        }

        let connector = match self.ctx.get_connector(&environment_id).await {
            Ok(connector) => connector,
            Err(e) => {
                let mut session = self.session.write().await;
                session.tree.revert_selection(table_name, previous);
                return Err(e);
            }
        };

        match connector.fetch_fields(table_name).await {
            Ok(entries) => {
                let mut session = self.session.write().await;
                session.tree.apply_fetched_fields(table_name, entries);
                Ok(())
            }
            Err(e) => {
                let mut session = self.session.write().await;
                session.tree.revert_selection(table_name, previous);
                Err(self.ctx.handle_connector_error(e))
            }
        }
    }

    /// Flip one field of the selected table.
    pub async fn toggle_field(&self, field_name: &str) -> CoreResult<()> {
        self.session.write().await.tree.toggle_field(field_name)
    }

    /// Flip a table's selection top-down.
    ///
    /// A no-op when the table is unselected — no fetch is triggered either.
    /// Otherwise the table becomes the active selection, its fields are
    /// lazily fetched if needed, and every field follows the table's new
    /// state. Returns whether anything changed.
    pub async fn toggle_table(&self, table_name: &str) -> CoreResult<bool> {
        {
            let session = self.session.read().await;
            let table = session
                .tree
                .table(table_name)
                .ok_or_else(|| CoreError::TableNotFound(table_name.to_string()))?;
            if !table.selected {
                return Ok(false);
            }
        }

        self.select_table(table_name).await?;

        let mut session = self.session.write().await;
        if !session.tree.table(table_name).is_some_and(Table::fields_loaded) {
            // The fetch was superseded by a newer selection.
            log::debug!("toggle_table({table_name}) superseded, nothing applied");
            return Ok(false);
        }
        session.tree.toggle_table(table_name)
    }

    /// Select a table together with every one of its fields, fetching the
    /// field list first when necessary.
    pub async fn select_all_fields(&self, table_name: &str) -> CoreResult<()> {
        self.select_table(table_name).await?;

        let mut session = self.session.write().await;
        if !session.tree.table(table_name).is_some_and(Table::fields_loaded) {
            log::debug!("select_all_fields({table_name}) superseded, nothing applied");
            return Ok(());
        }
        session.tree.select_all_fields(table_name)
    }

    /// Snapshot of every dirty table with its current field state.
    pub async fn collect_changes(&self) -> Vec<TableChange> {
        self.session.read().await.tree.collect_changes()
    }

    /// Persist all unsaved changes and clear their dirty flags.
    ///
    /// Returns the number of tables submitted; zero changes skip the remote
    /// call entirely. A failed save leaves every dirty flag untouched, so
    /// invoking save again retries the same changeset. Edits made while the
    /// save is in flight stay dirty after the commit.
    pub async fn save(&self) -> CoreResult<usize> {
        let (environment_id, changes) = {
            let session = self.session.read().await;
            let environment_id = session
                .environment_id
                .clone()
                .ok_or(CoreError::NoEnvironmentOpen)?;
            (environment_id, session.tree.collect_changes())
        };

        if changes.is_empty() {
            return Ok(0);
        }

        let connector = self.ctx.get_connector(&environment_id).await?;
        if let Err(e) = connector.save_changes(&changes).await {
            return Err(self.ctx.handle_connector_error(e));
        }

        log::debug!(
            "Saved {} changed tables for {environment_id}",
            changes.len()
        );

        let mut session = self.session.write().await;
        session.tree.commit(&changes);
        session.last_saved_at = Some(Utc::now());
        Ok(changes.len())
    }
}
