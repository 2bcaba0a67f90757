//! Session - セッション単位の状態
//!
//! 選択肢の一覧・FigureResolver・セッション ID をまとめて保持します。
//! 開始時に一度だけ一覧を読み込み、終了時に破棄します（グローバル状態なし）。

use std::sync::Arc;
use tracing::{Instrument, info, info_span};

use crate::domain::{Category, Selection, SelectionLists, SelectionLoadError, SessionId};
use crate::ports::{Clock, SelectionProvider};

use super::report::RenderReport;
use super::resolver::FigureResolver;

pub struct Session {
    id: SessionId,
    selections: SelectionLists,
    resolver: FigureResolver,
    clock: Arc<dyn Clock>,
}

impl Session {
    /// Load the selection lists. This is the one failure that aborts startup.
    pub async fn start(
        provider: &dyn SelectionProvider,
        resolver: FigureResolver,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, SelectionLoadError> {
        let id = SessionId::generate(clock.as_ref());
        let selections = provider
            .load_selections()
            .instrument(info_span!("load_selections", session = %id))
            .await?;

        info!(
            session = %id,
            models = selections.models().len(),
            scenarios = selections.scenarios().len(),
            "session started"
        );
        Ok(Self {
            id,
            selections,
            resolver,
            clock,
        })
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn selections(&self) -> &SelectionLists {
        &self.selections
    }

    /// Resolve every category, one after the other.
    ///
    /// A failing category does not stop the ones after it.
    pub async fn render(&self, selection: &Selection) -> RenderReport {
        let span = info_span!("render", session = %self.id, selection = %selection.label());
        let mut outcomes = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            let outcome = self
                .resolver
                .resolve(category, selection)
                .instrument(span.clone())
                .await;
            outcomes.push(outcome);
        }

        let report = RenderReport::new(self.id, selection.clone(), self.clock.now(), outcomes);
        info!(
            session = %self.id,
            selection = %selection.label(),
            found = report.counts.found,
            failed = report.counts.failed(),
            "render complete"
        );
        report
    }
}
