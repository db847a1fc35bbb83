use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameState {
    Active,
    Won,
    Lost,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != Self::Active
    }
}

#[derive(Debug, Default, Clone)]
pub struct Field {
    pub has_bomb: bool,
    pub disclosed: bool,
    /// Only meaningful when `has_bomb` is false.
    pub bombs_around: u8,
}

/// Read-only view of a single field, handed out for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldView {
    pub bombs_around: u8,
    pub disclosed: bool,
    pub has_bomb: bool,
}

impl From<&Field> for FieldView {
    fn from(value: &Field) -> Self {
        Self {
            bombs_around: value.bombs_around,
            disclosed: value.disclosed,
            has_bomb: value.has_bomb,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Level {
    /// Unknown or missing names fall back to `Easy`.
    pub fn from_name(name: Option<&str>) -> Self {
        match name.map(|name| name.trim().to_ascii_lowercase()).as_deref() {
            Some("medium") => Self::Medium,
            Some("hard") => Self::Hard,
            _ => Self::Easy,
        }
    }

    /// `(bombs, size)` of the preset board.
    pub fn params(self) -> (i32, i32) {
        match self {
            Self::Easy => (7, 8),
            Self::Medium => (10, 8),
            Self::Hard => (13, 8),
        }
    }
}
