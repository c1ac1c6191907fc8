use serde::{Deserialize, Serialize};

/// An article or card reading as handed over by the content store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub when_to_use: Option<Vec<String>>,
    #[serde(default)]
    pub reflection_prompts: Option<Vec<String>>,
    #[serde(default)]
    pub groups: Option<Vec<PositionGroup>>,
}

/// A named group of card positions, e.g. "The Cross" in a Celtic Cross spread.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PositionGroup {
    pub title: String,
    #[serde(default)]
    pub positions: Vec<Position>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Position {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl ContentRecord {
    /// Every piece of reading text, in fixed field order. `id` is not text.
    pub fn text_pieces(&self) -> Vec<&str> {
        let mut pieces = vec![self.content.as_str()];

        pieces.extend(self.subtitle.as_deref());
        pieces.extend(self.description.as_deref());
        for list in [&self.when_to_use, &self.reflection_prompts].into_iter().flatten() {
            pieces.extend(list.iter().map(String::as_str));
        }
        for group in self.groups.iter().flatten() {
            pieces.push(&group.title);
            for position in &group.positions {
                pieces.push(&position.title);
                pieces.extend(position.description.as_deref());
            }
        }

        pieces
    }
}
