//! Stateless rendering of the displayed programmer list.

use serde::Serialize;
use skillq_core::programmer::{Programmer, ProgrammerId};

/// Placeholder shown when the displayed list is empty.
pub const NO_DATA_MESSAGE: &str = "No programmers data available.";

/// Intents a rendered list can bubble up to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ListIntent {
    Delete(ProgrammerId),
}

/// One rendered programmer entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammerCard {
    pub id: ProgrammerId,
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub image_url: String,
    pub skills: Vec<String>,
    /// What the card's delete button emits.
    pub delete_intent: ListIntent,
}

/// Render state of the list. `Empty` is a distinct state, not an empty `Cards`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ListView {
    Empty { message: String },
    Cards(Vec<ProgrammerCard>),
}

impl ListView {
    pub fn is_empty_placeholder(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    pub fn cards(&self) -> &[ProgrammerCard] {
        match self {
            Self::Empty { .. } => &[],
            Self::Cards(cards) => cards,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ListPresenter;

impl ListPresenter {
    pub fn present(&self, programmers: &[Programmer]) -> ListView {
        if programmers.is_empty() {
            return ListView::Empty {
                message: NO_DATA_MESSAGE.to_string(),
            };
        }

        ListView::Cards(
            programmers
                .iter()
                .map(|p| ProgrammerCard {
                    id: p.id.clone(),
                    name: p.name.clone(),
                    job_title: p.job_title.clone(),
                    email: p.email.clone(),
                    image_url: p.image_url.clone(),
                    skills: p.skills.clone(),
                    delete_intent: ListIntent::Delete(p.id.clone()),
                })
                .collect(),
        )
    }
}
