use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Level {
    pub id: u32,
    pub name: &'static str,
    pub size: usize,
    pub time_limit: Duration,
}

pub const LEVELS: [Level; 4] = [
    Level {
        id: 1,
        name: "Easy",
        size: 6,
        time_limit: Duration::from_secs(120),
    },
    Level {
        id: 2,
        name: "Normal",
        size: 8,
        time_limit: Duration::from_secs(90),
    },
    Level {
        id: 3,
        name: "Hard",
        size: 10,
        time_limit: Duration::from_secs(60),
    },
    Level {
        id: 4,
        name: "Expert",
        size: 12,
        time_limit: Duration::from_secs(45),
    },
];

impl Level {
    /// Unknown ids fall back to the first level.
    pub fn by_id(id: u32) -> Level {
        LEVELS
            .iter()
            .copied()
            .find(|l| l.id == id)
            .unwrap_or(LEVELS[0])
    }

    pub fn stars(&self) -> String {
        let filled = self.id as usize;
        let mut s = "★".repeat(filled);
        s.push_str(&"☆".repeat(LEVELS.len().saturating_sub(filled)));
        s
    }
}
