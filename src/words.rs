//! Word bank and spawn selection
//!
//! Four difficulty tiers plus the policy that maps (level, pool) to the set
//! of words a new spawn is drawn from.

use rand::Rng;
use serde::{Deserialize, Serialize};

pub const LETTERS: &[&str] = &[
    "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r", "s",
    "t", "u", "v", "w", "x", "y", "z",
];

pub const EASY: &[&str] = &[
    "code", "data", "byte", "node", "java", "ruby", "perl", "bash", "hack", "wifi", "link", "host",
    "port", "root", "user", "pass", "file", "disk", "load", "save", "edit", "copy", "void", "null",
    "true", "echo", "ping", "scan", "type", "grid", "chip", "core", "bios", "cmos", "boot", "exec",
    "kill", "nice", "cron", "grep",
];

pub const MEDIUM: &[&str] = &[
    "python", "script", "server", "client", "socket", "router", "switch", "access", "denied",
    "system", "kernel", "memory", "driver", "buffer", "stream", "filter", "search", "config",
    "deploy", "update", "upgrade", "install", "remove", "delete", "format", "backup", "restore",
    "module", "object", "string", "number", "vector", "matrix", "vertex", "pixel", "shader",
    "render", "engine", "visual", "studio",
];

pub const HARD: &[&str] = &[
    "javascript", "typescript", "algorithm", "encryption", "decryption", "mainframe", "database",
    "firewall", "security", "protocol", "interface", "namespace", "recursive", "iteration",
    "exception", "debugging", "compiling", "assembly", "binarytree", "linkedlist", "polymorph",
    "inheritance", "constructor", "destructor", "framework", "middleware", "fullstack",
    "developer", "engineer", "architect", "blockchain", "crypto", "ethereum", "bitcoin",
    "cyberpunk", "futuristic", "simulation", "processor", "bandwidth", "throughput",
];

/// Word difficulty bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Letters,
    Easy,
    Medium,
    Hard,
}

impl Tier {
    pub fn words(&self) -> &'static [&'static str] {
        match self {
            Tier::Letters => LETTERS,
            Tier::Easy => EASY,
            Tier::Medium => MEDIUM,
            Tier::Hard => HARD,
        }
    }
}

/// Practice difficulty (fixed pool regardless of level)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Where spawned words come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WordPool {
    /// Tiers ramp up with level
    #[default]
    Arcade,
    /// Fixed blend of two tiers
    Practice(Difficulty),
}

impl WordPool {
    pub fn as_str(&self) -> &'static str {
        match self {
            WordPool::Arcade => "Arcade",
            WordPool::Practice(difficulty) => difficulty.as_str(),
        }
    }

    /// "arcade", or a practice difficulty name
    pub fn from_str(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("arcade") {
            return Some(WordPool::Arcade);
        }
        Difficulty::from_str(s).map(WordPool::Practice)
    }

    /// Tiers to draw from at the given level (1-based)
    pub fn tiers(&self, level: u32) -> &'static [Tier] {
        match self {
            WordPool::Arcade => match level {
                0..=2 => &[Tier::Letters],
                3 => &[Tier::Easy],
                4 | 5 => &[Tier::Easy, Tier::Medium],
                _ => &[Tier::Medium, Tier::Hard],
            },
            WordPool::Practice(Difficulty::Easy) => &[Tier::Letters, Tier::Easy],
            WordPool::Practice(Difficulty::Medium) => &[Tier::Easy, Tier::Medium],
            WordPool::Practice(Difficulty::Hard) => &[Tier::Medium, Tier::Hard],
        }
    }

    /// Letter levels use instant single-character matching with no target lock
    pub fn is_letter_level(&self, level: u32) -> bool {
        self.tiers(level) == [Tier::Letters]
    }

    /// Pick one word uniformly from the combined tiers for this level
    pub fn select_word<R: Rng + ?Sized>(&self, rng: &mut R, level: u32) -> &'static str {
        let tiers = self.tiers(level);
        let total: usize = tiers.iter().map(|t| t.words().len()).sum();
        let mut i = rng.random_range(0..total);
        for tier in tiers {
            let words = tier.words();
            if i < words.len() {
                return words[i];
            }
            i -= words.len();
        }
        // Unreachable: i < total
        LETTERS[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_arcade_levels_ramp_up() {
        let pool = WordPool::Arcade;
        assert_eq!(pool.tiers(1), [Tier::Letters]);
        assert_eq!(pool.tiers(2), [Tier::Letters]);
        assert_eq!(pool.tiers(3), [Tier::Easy]);
        assert_eq!(pool.tiers(5), [Tier::Easy, Tier::Medium]);
        assert_eq!(pool.tiers(9), [Tier::Medium, Tier::Hard]);

        // Hardest tier available never drops as level rises
        let mut prev = Tier::Letters;
        for level in 1..20 {
            let hardest = *pool.tiers(level).iter().max().unwrap();
            assert!(hardest >= prev, "level {} got easier", level);
            prev = hardest;
        }
    }

    #[test]
    fn test_pool_names() {
        assert_eq!(WordPool::from_str("Arcade"), Some(WordPool::Arcade));
        assert_eq!(
            WordPool::from_str("med"),
            Some(WordPool::Practice(Difficulty::Medium))
        );
        assert_eq!(WordPool::from_str("nightmare"), None);
        for pool in [
            WordPool::Arcade,
            WordPool::Practice(Difficulty::Easy),
            WordPool::Practice(Difficulty::Hard),
        ] {
            assert_eq!(WordPool::from_str(pool.as_str()), Some(pool));
        }
    }

    #[test]
    fn test_letter_levels() {
        assert!(WordPool::Arcade.is_letter_level(1));
        assert!(WordPool::Arcade.is_letter_level(2));
        assert!(!WordPool::Arcade.is_letter_level(3));
        assert!(!WordPool::Practice(Difficulty::Easy).is_letter_level(1));
    }

    #[test]
    fn test_select_word_stays_in_pool() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let w = WordPool::Arcade.select_word(&mut rng, 4);
            assert!(EASY.contains(&w) || MEDIUM.contains(&w), "{} not in pool", w);
        }
        for _ in 0..500 {
            let w = WordPool::Practice(Difficulty::Hard).select_word(&mut rng, 1);
            assert!(MEDIUM.contains(&w) || HARD.contains(&w), "{} not in pool", w);
        }
    }

    #[test]
    fn test_select_word_reaches_both_tiers() {
        let mut rng = Pcg32::seed_from_u64(42);
        let picks: Vec<_> = (0..400)
            .map(|_| WordPool::Practice(Difficulty::Easy).select_word(&mut rng, 1))
            .collect();
        assert!(picks.iter().any(|w| w.len() == 1));
        assert!(picks.iter().any(|w| w.len() > 1));
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!(Difficulty::from_str("MED"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::from_str("hard"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("expert"), None);
    }

    #[test]
    fn test_word_lists_are_lowercase_ascii() {
        for tier in [Tier::Letters, Tier::Easy, Tier::Medium, Tier::Hard] {
            assert!(!tier.words().is_empty());
            for w in tier.words() {
                assert!(w.chars().all(|c| c.is_ascii_lowercase()), "{}", w);
            }
        }
    }
}
