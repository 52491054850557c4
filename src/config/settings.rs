#[derive(Debug, Clone)]
pub struct ScoringSettings {
    /// Points awarded to the winner of a match
    pub win_points: i32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self { win_points: 3 }
    }
}

#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Entropy of generated bearer tokens, in bytes
    pub token_bytes: usize,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self { token_bytes: 32 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub scoring: ScoringSettings,
    pub auth: AuthSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
