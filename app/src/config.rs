use serde::{Deserialize, Serialize};

/// Ranked single-player difficulties, cycled by the menu carousel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Stable key used by the score store.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "EASY",
            Self::Medium => "MEDIUM",
            Self::Hard => "HARD",
        }
    }

    pub const fn next(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium => Self::Hard,
            Self::Hard => Self::Easy,
        }
    }

    pub const fn prev(self) -> Self {
        match self {
            Self::Easy => Self::Hard,
            Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }
}

/// Grid shape and mine count for one board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardParams {
    pub rows: usize,
    pub cols: usize,
    pub mines: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyTable {
    pub easy: BoardParams,
    pub medium: BoardParams,
    pub hard: BoardParams,
}

impl DifficultyTable {
    pub const fn get(&self, difficulty: Difficulty) -> BoardParams {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for DifficultyTable {
    fn default() -> Self {
        Self {
            easy: BoardParams {
                rows: 9,
                cols: 9,
                mines: 10,
            },
            medium: BoardParams {
                rows: 16,
                cols: 16,
                mines: 40,
            },
            hard: BoardParams {
                rows: 16,
                cols: 30,
                mines: 99,
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    /// Fraction of cells mined on campaign boards.
    pub mine_ratio: f32,
    pub max_level: u8,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            mine_ratio: 0.15,
            max_level: 10,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub enabled: bool,
    pub music_volume: f32,
    pub sfx_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            music_volume: 0.5,
            sfx_volume: 0.5,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub cell_size: i32,
    /// Vertical band reserved at the top for timer and mine counters.
    pub hud_height: i32,
    pub margin: i32,
    /// Horizontal gap between the two multiplayer boards.
    pub board_gap: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cell_size: 40,
            hud_height: 80,
            margin: 30,
            board_gap: 60,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    pub size_small: u16,
    pub size_medium: u16,
    pub size_large: u16,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "main".into(),
            size_small: 20,
            size_medium: 28,
            size_large: 56,
        }
    }
}

/// Externally supplied numeric and layout parameters. Parsing the file this
/// comes from is the frontend's concern; the struct only has to deserialize.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub title: String,
    pub width: i32,
    pub height: i32,
    pub fps: u32,
    pub layout: LayoutConfig,
    pub fonts: FontConfig,
    pub audio: AudioConfig,
    pub difficulties: DifficultyTable,
    pub campaign: CampaignConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Sapper".into(),
            width: 1280,
            height: 720,
            fps: 60,
            layout: LayoutConfig::default(),
            fonts: FontConfig::default(),
            audio: AudioConfig::default(),
            difficulties: DifficultyTable::default(),
            campaign: CampaignConfig::default(),
        }
    }
}

impl Config {
    pub fn board_params(&self, difficulty: Difficulty) -> BoardParams {
        self.difficulties.get(difficulty)
    }

    /// Campaign progression: boards grow with the level, mined at a fixed
    /// density.
    pub fn campaign_params(&self, level: u8) -> BoardParams {
        let side = 5 + 2 * level as usize;
        let mines = ((side * side) as f32 * self.campaign.mine_ratio) as usize;
        BoardParams {
            rows: side,
            cols: side,
            mines,
        }
    }
}
