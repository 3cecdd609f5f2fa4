//! The tabbed host: composes the editors over one shared cache.
//!
//! The host distributes slices of the cached aggregate to the editors
//! and re-runs the invalidation after any successful save, regardless
//! of which editor triggered it. Cross-tab derived views (a profile tab
//! showing contact counts, say) therefore never go stale after a
//! checklist-only save. The background refetch is the one place where a
//! failure is deliberately swallowed: the last good view stays on
//! screen and the failure is logged.

use crate::branch::{BranchEditor, BranchSaveOutcome};
use crate::cache::AggregateCache;
use crate::checklist::{ChecklistKey, ChecklistState};
use crate::editor::SubResourceEditor;
use crate::error::{FichaError, Result};
use crate::remote::RemoteStore;
use crate::types::{AggregateView, BranchId, CompanyId, FichaPayload, NetworkConfig, TechnicalSheet};

/// One open company view: the cache plus one editor per sub-resource.
pub struct Console<S: RemoteStore> {
    store: S,
    cache: AggregateCache,
    ficha: SubResourceEditor<FichaPayload>,
    checklist: SubResourceEditor<ChecklistState>,
    technical_sheet: SubResourceEditor<TechnicalSheet>,
    network: SubResourceEditor<NetworkConfig>,
    branch: BranchEditor,
}

impl<S: RemoteStore> Console<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            cache: AggregateCache::new(),
            ficha: SubResourceEditor::new(),
            checklist: SubResourceEditor::new(),
            technical_sheet: SubResourceEditor::new(),
            network: SubResourceEditor::new(),
            branch: BranchEditor::new(),
        }
    }

    /// Select a company and load its aggregate. The previous view is
    /// discarded before the fetch starts, so the editors see a loading
    /// placeholder rather than stale data.
    pub async fn open_company(&mut self, company: CompanyId) -> Result<()> {
        self.cache.clear();
        self.reset_editors();
        self.cache.load(&self.store, company).await?;
        Ok(())
    }

    /// Deselect the company. Nothing of the aggregate survives.
    pub fn close_company(&mut self) {
        self.cache.clear();
        self.reset_editors();
    }

    fn reset_editors(&mut self) {
        self.ficha.cancel();
        self.checklist.cancel();
        self.technical_sheet.cancel();
        self.network.cancel();
        self.branch.cancel();
    }

    /// The underlying remote store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The cached aggregate; `None` while loading or with no selection.
    pub fn aggregate(&self) -> Option<&AggregateView> {
        self.cache.current()
    }

    /// Version counter of the cache, for staleness detection.
    pub fn version(&self) -> u64 {
        self.cache.version()
    }

    fn view(&self) -> Result<&AggregateView> {
        self.cache.current().ok_or(FichaError::NoCompanyLoaded)
    }

    fn company(&self) -> Result<CompanyId> {
        self.cache.company().ok_or(FichaError::NoCompanyLoaded)
    }

    /// Refetch the aggregate after a successful save. A failure here
    /// degrades to keeping the last good view; it is the only error
    /// this crate swallows.
    async fn on_updated(&mut self) {
        if let Err(error) = self.cache.invalidate(&self.store).await {
            tracing::warn!(%error, "aggregate refetch failed, keeping last good view");
        }
    }

    // --- ficha (profile + contacts) -------------------------------------

    pub fn ficha_editor(&self) -> &SubResourceEditor<FichaPayload> {
        &self.ficha
    }

    pub fn edit_ficha(&mut self) -> Result<()> {
        let slice = {
            let view = self.view()?;
            FichaPayload::from_view(&view.profile, &view.contacts)
        };
        self.ficha.enter_edit(slice)
    }

    pub fn ficha_buffer_mut(&mut self) -> Option<&mut FichaPayload> {
        self.ficha.buffer_mut()
    }

    pub fn cancel_ficha(&mut self) {
        self.ficha.cancel();
    }

    pub async fn save_ficha(&mut self) -> Result<()> {
        let company = self.company()?;
        self.ficha.save(&self.store, company).await?;
        self.on_updated().await;
        Ok(())
    }

    // --- checklist ------------------------------------------------------

    pub fn checklist_editor(&self) -> &SubResourceEditor<ChecklistState> {
        &self.checklist
    }

    pub fn edit_checklist(&mut self) -> Result<()> {
        let slice = self.view()?.checklist.clone();
        self.checklist.enter_edit(slice)
    }

    /// Toggle one checklist key in the edit buffer. The eventual save
    /// still transmits the complete fixed-key map.
    pub fn toggle_checklist(&mut self, key: ChecklistKey, value: bool) -> Result<()> {
        let state = self.checklist.state();
        let Some(buffer) = self.checklist.buffer_mut() else {
            return Err(FichaError::InvalidTransition {
                state: state.name(),
                action: "toggle checklist key",
            });
        };
        buffer.set(key, value);
        Ok(())
    }

    pub fn cancel_checklist(&mut self) {
        self.checklist.cancel();
    }

    pub async fn save_checklist(&mut self) -> Result<()> {
        let company = self.company()?;
        self.checklist.save(&self.store, company).await?;
        self.on_updated().await;
        Ok(())
    }

    // --- technical sheet ------------------------------------------------

    pub fn technical_sheet_editor(&self) -> &SubResourceEditor<TechnicalSheet> {
        &self.technical_sheet
    }

    pub fn edit_technical_sheet(&mut self) -> Result<()> {
        let slice = self.view()?.technical_sheet.clone();
        self.technical_sheet.enter_edit(slice)
    }

    pub fn technical_sheet_buffer_mut(&mut self) -> Option<&mut TechnicalSheet> {
        self.technical_sheet.buffer_mut()
    }

    pub fn cancel_technical_sheet(&mut self) {
        self.technical_sheet.cancel();
    }

    pub async fn save_technical_sheet(&mut self) -> Result<()> {
        let company = self.company()?;
        self.technical_sheet.save(&self.store, company).await?;
        self.on_updated().await;
        Ok(())
    }

    // --- company network (ISP) ------------------------------------------

    pub fn network_editor(&self) -> &SubResourceEditor<NetworkConfig> {
        &self.network
    }

    pub fn edit_network(&mut self) -> Result<()> {
        let slice = self.view()?.network.clone();
        self.network.enter_edit(slice)
    }

    pub fn network_buffer_mut(&mut self) -> Option<&mut NetworkConfig> {
        self.network.buffer_mut()
    }

    pub fn cancel_network(&mut self) {
        self.network.cancel();
    }

    pub async fn save_network(&mut self) -> Result<()> {
        let company = self.company()?;
        self.network.save(&self.store, company).await?;
        self.on_updated().await;
        Ok(())
    }

    // --- branches -------------------------------------------------------

    pub fn branch_editor(&self) -> &BranchEditor {
        &self.branch
    }

    pub fn branch_editor_mut(&mut self) -> &mut BranchEditor {
        &mut self.branch
    }

    pub fn open_branch_create(&mut self) -> Result<()> {
        self.view()?;
        self.branch.open_create()
    }

    /// Open the branch form pre-filled from the cached branch list.
    pub fn open_branch_edit(&mut self, branch: BranchId) -> Result<()> {
        let found = {
            let view = self.view()?;
            view.branches
                .iter()
                .find(|b| b.id == branch)
                .cloned()
                .ok_or(FichaError::BranchNotFound(branch.0))?
        };
        self.branch.open_edit(&found)
    }

    pub fn cancel_branch(&mut self) {
        self.branch.cancel();
    }

    /// Run the two-step branch save. The aggregate is invalidated on
    /// any outcome where the branch itself was written, including the
    /// partial one.
    pub async fn save_branch(&mut self) -> Result<BranchSaveOutcome> {
        let company = self.company()?;
        let outcome = self.branch.save(&self.store, company).await?;
        self.on_updated().await;
        Ok(outcome)
    }
}
