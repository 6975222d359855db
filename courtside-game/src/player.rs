//! Typed player profiles as supplied by the player repository.
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use thiserror::Error;

use crate::constants::{
    DEFAULT_ASSISTS, DEFAULT_FG_PCT, DEFAULT_FT_PCT, DEFAULT_HEIGHT_INCHES, DEFAULT_MINUTES,
    DEFAULT_POINTS, DEFAULT_THREE_PCT, DEFAULT_TS_PCT, DEFAULT_TURNOVERS,
};

/// Dataset identifier. Numeric and textual ids compare by their text form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for PlayerId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for PlayerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(value) => Self::from(value),
            RawId::Text(value) => Self::new(&value),
        })
    }
}

/// Single court role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    PointGuard,
    ShootingGuard,
    SmallForward,
    PowerForward,
    Center,
}

/// Coarse grouping that drives the position-conditioned estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionGroup {
    Big,
    Guard,
    Wing,
}

impl Position {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PointGuard => "PG",
            Self::ShootingGuard => "SG",
            Self::SmallForward => "SF",
            Self::PowerForward => "PF",
            Self::Center => "C",
        }
    }

    #[must_use]
    pub const fn group(self) -> PositionGroup {
        match self {
            Self::Center | Self::PowerForward => PositionGroup::Big,
            Self::PointGuard | Self::ShootingGuard => PositionGroup::Guard,
            Self::SmallForward => PositionGroup::Wing,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "PG" => Some(Self::PointGuard),
            "SG" => Some(Self::ShootingGuard),
            "SF" => Some(Self::SmallForward),
            "PF" => Some(Self::PowerForward),
            "C" => Some(Self::Center),
            _ => None,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown position code {0:?}")]
pub struct UnknownPosition(pub String);

/// Position exactly as listed, e.g. `SF-PF`, plus every role it names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PositionCode {
    code: String,
    roles: Vec<Position>,
}

impl PositionCode {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn roles(&self) -> &[Position] {
        &self.roles
    }

    /// Any big role wins, then any guard role; everything else plays the wing.
    #[must_use]
    pub fn group(&self) -> PositionGroup {
        let has = |group| self.roles.iter().any(|role| role.group() == group);
        if has(PositionGroup::Big) {
            PositionGroup::Big
        } else if has(PositionGroup::Guard) {
            PositionGroup::Guard
        } else {
            PositionGroup::Wing
        }
    }
}

impl From<Position> for PositionCode {
    fn from(position: Position) -> Self {
        Self {
            code: position.code().to_string(),
            roles: vec![position],
        }
    }
}

impl FromStr for PositionCode {
    type Err = UnknownPosition;

    /// Accepts `PG`, `sg`, or combos such as `SF-PF` and `G/F`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let code = value.trim().to_ascii_uppercase();
        let roles: Vec<Position> = code
            .split(['-', '/', ' '])
            .filter_map(Position::from_token)
            .collect();
        if roles.is_empty() {
            return Err(UnknownPosition(value.to_string()));
        }
        Ok(Self { code, roles })
    }
}

impl TryFrom<String> for PositionCode {
    type Error = UnknownPosition;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PositionCode> for String {
    fn from(position: PositionCode) -> Self {
        position.code
    }
}

impl fmt::Display for PositionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

/// Raised when a height string is not of the form `feet'inches"`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeightParseError {
    #[error("height {0:?} is not in feet'inches\" form")]
    Malformed(String),
}

fn height_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^\s*(\d{1,2})\s*'\s*(\d{1,2})?\s*(?:"|'')?\s*$"#)
            .expect("height pattern compiles")
    })
}

/// Convert `6'10"` style heights to inches. A missing inch part counts as zero.
///
/// # Errors
///
/// Returns [`HeightParseError`] when the foot/inch split cannot be made.
pub fn parse_height_inches(raw: &str) -> Result<u32, HeightParseError> {
    let captures = height_pattern()
        .captures(raw)
        .ok_or_else(|| HeightParseError::Malformed(raw.to_string()))?;
    let feet: u32 = captures[1]
        .parse()
        .map_err(|_| HeightParseError::Malformed(raw.to_string()))?;
    let inches: u32 = match captures.get(2) {
        Some(m) => m
            .as_str()
            .parse()
            .map_err(|_| HeightParseError::Malformed(raw.to_string()))?,
        None => 0,
    };
    if inches > 11 {
        return Err(HeightParseError::Malformed(raw.to_string()));
    }
    Ok(feet * 12 + inches)
}

/// Raw statistical profile for one player. Every stat is optional; the
/// accessors below substitute league-average defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PlayerId>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rebounds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assists: Option<f64>,
    #[serde(
        default,
        alias = "Field Goal Percentage (FG%)",
        skip_serializing_if = "Option::is_none"
    )]
    pub fg_pct: Option<f64>,
    #[serde(
        default,
        alias = "Three-Point Percentage (3P%)",
        skip_serializing_if = "Option::is_none"
    )]
    pub three_pct: Option<f64>,
    #[serde(
        default,
        alias = "Free Throw Percentage (FT%)",
        skip_serializing_if = "Option::is_none"
    )]
    pub ft_pct: Option<f64>,
    #[serde(
        default,
        alias = "True Shooting Percentage (TS%)",
        skip_serializing_if = "Option::is_none"
    )]
    pub ts_pct: Option<f64>,
    #[serde(
        default,
        alias = "Average Minutes Per Game (MPG)",
        skip_serializing_if = "Option::is_none"
    )]
    pub minutes_per_game: Option<f64>,
    #[serde(
        default,
        alias = "Steals Per Game (SPG)",
        skip_serializing_if = "Option::is_none"
    )]
    pub steals_per_game: Option<f64>,
    #[serde(
        default,
        alias = "Blocks Per Game (BPG)",
        skip_serializing_if = "Option::is_none"
    )]
    pub blocks_per_game: Option<f64>,
    #[serde(
        default,
        alias = "Turnovers Per Game (TOV)",
        skip_serializing_if = "Option::is_none"
    )]
    pub turnovers_per_game: Option<f64>,
}

impl PlayerProfile {
    /// Profile with only a name; every stat falls back to its default.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position.into());
        self
    }

    #[must_use]
    pub fn position_group(&self) -> PositionGroup {
        self.position
            .as_ref()
            .map_or(PositionGroup::Wing, PositionCode::group)
    }

    #[must_use]
    pub fn points_or_default(&self) -> f64 {
        self.points.unwrap_or(DEFAULT_POINTS)
    }

    #[must_use]
    pub fn assists_or_default(&self) -> f64 {
        self.assists.unwrap_or(DEFAULT_ASSISTS)
    }

    /// Rebounds with a caller-supplied default, since the default depends on
    /// which estimate is being computed.
    #[must_use]
    pub fn rebounds_or(&self, default: f64) -> f64 {
        self.rebounds.unwrap_or(default)
    }

    #[must_use]
    pub fn fg_pct_or_default(&self) -> f64 {
        self.fg_pct.unwrap_or(DEFAULT_FG_PCT)
    }

    #[must_use]
    pub fn three_pct_or_default(&self) -> f64 {
        self.three_pct.unwrap_or(DEFAULT_THREE_PCT)
    }

    #[must_use]
    pub fn ft_pct_or_default(&self) -> f64 {
        self.ft_pct.unwrap_or(DEFAULT_FT_PCT)
    }

    #[must_use]
    pub fn ts_pct_or_default(&self) -> f64 {
        self.ts_pct.unwrap_or(DEFAULT_TS_PCT)
    }

    #[must_use]
    pub fn minutes_or_default(&self) -> f64 {
        self.minutes_per_game.unwrap_or(DEFAULT_MINUTES)
    }

    #[must_use]
    pub fn turnovers_or_default(&self) -> f64 {
        self.turnovers_per_game.unwrap_or(DEFAULT_TURNOVERS)
    }

    /// Height in inches, defaulting to 6'0" when absent.
    ///
    /// # Errors
    ///
    /// Returns [`HeightParseError`] when a height is present but malformed.
    pub fn height_inches(&self) -> Result<u32, HeightParseError> {
        self.height
            .as_deref()
            .map_or(Ok(DEFAULT_HEIGHT_INCHES), parse_height_inches)
    }
}
