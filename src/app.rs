use crate::{
    config::BoardConfig,
    domain::ItemStatus,
    dom::DomHandle,
    error::Result,
    store::ProjectStore,
    view::{InputView, ListView},
};

/// The page: the input form followed by the active and finished lists
pub struct Board {
    input: InputView,
    active: ListView,
    finished: ListView,
}

impl Board {
    /// Builds the three top-level views into the configured host
    pub fn mount(dom: &DomHandle, store: &ProjectStore, config: &BoardConfig) -> Result<Self> {
        let input = InputView::new(dom, store, config)?;
        let active = ListView::new(dom, store, config, ItemStatus::Active)?;
        let finished = ListView::new(dom, store, config, ItemStatus::Finished)?;
        tracing::debug!(board = %config.name, host = %config.host_id, "board mounted");

        Ok(Self {
            input,
            active,
            finished,
        })
    }

    pub fn input(&self) -> &InputView {
        &self.input
    }

    pub fn list(&self, category: ItemStatus) -> &ListView {
        match category {
            ItemStatus::Active => &self.active,
            ItemStatus::Finished => &self.finished,
        }
    }
}
