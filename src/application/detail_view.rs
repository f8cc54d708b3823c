// src/application/detail_view.rs
use crate::application::comment_panel::{CommentApi, CommentPanel};
use crate::application::session::{SessionStore, SharedSession};
use crate::domain::{ApiError, Center, DetailError, Section, SectionToggles};
use std::rc::Rc;
use tracing::{debug, info, warn};

pub trait CenterApi {
    /// Fetch a center by id. `Ok(None)` means the response had no `data` payload.
    fn get_center(&mut self, id: i64) -> Result<Option<Center>, ApiError>;
}

/// Exactly one of these is rendered: spinner, error banner, or the page.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Failed(DetailError),
    Loaded(Center),
}

pub struct DetailView<A: CenterApi, S: SessionStore> {
    api: A,
    session: SharedSession<S>,
    center_id: Option<i64>,
    state: DetailState,
    sections: SectionToggles,
}

impl<A: CenterApi, S: SessionStore> DetailView<A, S> {
    pub fn new(api: A, session: SharedSession<S>) -> Self {
        Self {
            api,
            session,
            center_id: None,
            state: DetailState::Loading,
            sections: SectionToggles::new(),
        }
    }

    /// Show the given center. Fetches only when the id differs from the one
    /// already loaded.
    pub fn load(&mut self, center_id: i64) -> Result<&Center, DetailError> {
        let already_loaded =
            self.center_id == Some(center_id) && matches!(self.state, DetailState::Loaded(_));
        if already_loaded {
            debug!(center_id, "Center already loaded");
            return self.outcome();
        }
        self.center_id = Some(center_id);
        self.reload()
    }

    /// Refetch the current center unconditionally.
    pub fn reload(&mut self) -> Result<&Center, DetailError> {
        let center_id = self.center_id.ok_or(DetailError::NotFound)?;
        self.state = DetailState::Loading;

        self.state = match self.api.get_center(center_id) {
            Ok(Some(center)) => {
                info!(center_id, name = %center.name, "Center loaded");
                DetailState::Loaded(center)
            }
            Ok(None) => {
                warn!(center_id, "Center response carried no data");
                DetailState::Failed(DetailError::NotFound)
            }
            Err(e) => {
                warn!(center_id, error = %e, "Failed to fetch center");
                DetailState::Failed(DetailError::LoadFailed)
            }
        };
        self.outcome()
    }

    fn outcome(&self) -> Result<&Center, DetailError> {
        match &self.state {
            DetailState::Loaded(center) => Ok(center),
            DetailState::Failed(e) => Err(e.clone()),
            DetailState::Loading => Err(DetailError::LoadFailed),
        }
    }

    pub fn toggle(&mut self, section: Section) -> bool {
        let expanded = self.sections.toggle(section);
        debug!(%section, expanded, "Section toggled");
        expanded
    }

    pub fn sections(&self) -> &SectionToggles {
        &self.sections
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    pub fn center_id(&self) -> Option<i64> {
        self.center_id
    }

    pub fn center(&self) -> Option<&Center> {
        match &self.state {
            DetailState::Loaded(center) => Some(center),
            _ => None,
        }
    }

    /// Mount the comment panel for the loaded center.
    ///
    /// Returns `None` unless the page itself rendered; a failed or loading
    /// detail view has no comment section.
    pub fn comment_panel<C: CommentApi>(&self, api: C) -> Option<CommentPanel<C, S>> {
        let center_id = self.center_id?;
        self.center()?;
        Some(CommentPanel::new(api, Rc::clone(&self.session), center_id))
    }
}
