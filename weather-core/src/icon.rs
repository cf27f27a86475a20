//! Maps free-text weather descriptions to a small emoji vocabulary.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Icon {
    Sunny,
    Cloudy,
    Rainy,
    Stormy,
    Snowy,
    Mixed,
}

impl Icon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Icon::Sunny => "☀️",
            Icon::Cloudy => "⛅",
            Icon::Rainy => "🌧️",
            Icon::Stormy => "⛈️",
            Icon::Snowy => "❄️",
            Icon::Mixed => "🌤️",
        }
    }

    pub const fn all() -> &'static [Icon] {
        &[
            Icon::Sunny,
            Icon::Cloudy,
            Icon::Rainy,
            Icon::Stormy,
            Icon::Snowy,
            Icon::Mixed,
        ]
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checked in order; the first rule with a matching keyword wins.
const RULES: &[(&[&str], Icon)] = &[
    (&["clear", "sunny"], Icon::Sunny),
    (&["cloud"], Icon::Cloudy),
    (&["rain"], Icon::Rainy),
    (&["storm"], Icon::Stormy),
    (&["snow"], Icon::Snowy),
];

pub fn classify(description: &str) -> Icon {
    let lower = description.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, icon)| *icon)
        .unwrap_or(Icon::Mixed)
}
