use serde_json::{Map, Value};

use crate::deal::{DEFAULT_CURRENCY, ORIGIN_CODE};
use crate::{Deal, DealError, DealRepository, DealResult};

/// What submitting the current draft will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftIntent {
    Create,
    Update(u64),
}

/// Editable state behind the admin deal form.
///
/// A fresh editor holds a create draft with the site defaults. Loading a
/// stored deal with [`DealEditor::begin_edit`] switches it to updating that
/// deal until it is submitted or reset.
#[derive(Debug, Clone)]
pub struct DealEditor {
    draft: Map<String, Value>,
    editing: Option<u64>,
}

impl DealEditor {
    pub fn new() -> Self {
        Self {
            draft: fresh_draft(),
            editing: None,
        }
    }

    pub fn draft(&self) -> &Map<String, Value> {
        &self.draft
    }

    pub fn intent(&self) -> DraftIntent {
        match self.editing {
            Some(id) => DraftIntent::Update(id),
            None => DraftIntent::Create,
        }
    }

    pub fn set(&mut self, field: &str, value: impl Into<Value>) {
        self.draft.insert(field.to_string(), value.into());
    }

    pub fn begin_edit(&mut self, deal: &Deal) -> DealResult<()> {
        let fields = match serde_json::to_value(deal) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(DealError::Internal("deal did not encode as an object".into())),
            Err(e) => return Err(DealError::Internal(e.to_string())),
        };
        self.draft = fields;
        self.editing = Some(deal.id);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.draft = fresh_draft();
        self.editing = None;
    }

    /// Sends the draft to `repo` as a create or an update.
    ///
    /// The editor resets after a successful save. On error the draft and
    /// intent are left as they were so the form can be corrected.
    pub async fn submit(&mut self, repo: &dyn DealRepository) -> DealResult<Deal> {
        let body = Value::Object(self.draft.clone());
        let saved = match self.intent() {
            DraftIntent::Create => repo.create_deal(body).await?,
            DraftIntent::Update(id) => repo.update_deal(id, body).await?,
        };

        tracing::debug!(deal_id = saved.id, "Draft submitted");
        self.reset();
        Ok(saved)
    }
}

impl Default for DealEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn fresh_draft() -> Map<String, Value> {
    let mut draft = Map::new();
    draft.insert("origin".to_string(), Value::from(ORIGIN_CODE));
    draft.insert("currency".to_string(), Value::from(DEFAULT_CURRENCY));
    draft
}
