//! Achievement System
//!
//! Semantic and historical achievements. Achievements are not just
//! "kill 100 monsters" — they're based on semantic patterns:
//! - Discover 5 fire-water synergy interactions
//! - Survive a Corruption Surge on floor 30+
//! - Complete a floor using only semantic attacks
//!
//! From opensourcestack.txt Category 16:
//! "Semantic and historical achievements"

use serde::{Deserialize, Serialize};

/// Achievement categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementCategory {
    Combat,      // fighting accomplishments
    Exploration, // floor/tower milestones
    Semantic,    // tag-based interactions
    Social,      // faction/multiplayer
    Crafting,    // crafting milestones
    Survival,    // death/echo related
    Mastery,     // weapon/skill mastery
    Tower,       // tower-specific (breath, events)
}

/// Achievement tier (determines reward quality)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Mythic,
}

/// Condition type for tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AchievementCondition {
    /// Reach a numeric threshold
    Counter { current: u64, target: u64 },
    /// Achieve something in a single run
    SingleRun { achieved: bool },
    /// Complete multiple sub-conditions
    Composite {
        completed: Vec<bool>,
        names: Vec<String>,
    },
    /// Floor-gated: must be on floor X+
    FloorGated { min_floor: u32, met: bool },
    /// Semantic: requires specific tag interactions
    SemanticPattern {
        required_tags: Vec<String>,
        matched: bool,
    },
    /// Time-limited challenge
    TimedChallenge {
        time_limit_secs: f32,
        elapsed: f32,
        completed: bool,
    },
}

impl AchievementCondition {
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Counter { current, target } => current >= target,
            Self::SingleRun { achieved } => *achieved,
            Self::Composite { completed, .. } => completed.iter().all(|c| *c),
            Self::FloorGated { met, .. } => *met,
            Self::SemanticPattern { matched, .. } => *matched,
            Self::TimedChallenge { completed, .. } => *completed,
        }
    }

    pub fn progress_percent(&self) -> f32 {
        match self {
            Self::Counter { current, target } => {
                if *target == 0 {
                    1.0
                } else {
                    (*current as f32 / *target as f32).min(1.0)
                }
            }
            Self::SingleRun { achieved } => {
                if *achieved {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Composite { completed, .. } => {
                let done = completed.iter().filter(|c| **c).count() as f32;
                done / completed.len().max(1) as f32
            }
            Self::FloorGated { met, .. } => {
                if *met {
                    1.0
                } else {
                    0.0
                }
            }
            Self::SemanticPattern { matched, .. } => {
                if *matched {
                    1.0
                } else {
                    0.0
                }
            }
            Self::TimedChallenge {
                completed,
                elapsed,
                time_limit_secs,
                ..
            } => {
                if *completed {
                    1.0
                } else {
                    (elapsed / time_limit_secs).min(0.99)
                }
            }
        }
    }
}

/// A single achievement definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub hint: String,
    pub category: AchievementCategory,
    pub tier: AchievementTier,
    pub condition: AchievementCondition,
    pub hidden: bool, // don't show until discovered
    pub reward_shards: u64,
    pub unlocked: bool,
    pub unlock_timestamp: Option<u64>,
}

impl Achievement {
    pub fn check_and_unlock(&mut self, timestamp: u64) -> bool {
        if self.unlocked {
            return false;
        }
        if self.condition.is_complete() {
            self.unlocked = true;
            self.unlock_timestamp = Some(timestamp);
            return true;
        }
        false
    }
}

/// The player's achievement tracker
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AchievementTracker {
    pub achievements: Vec<Achievement>,
    pub total_unlocked: u32,
    pub total_shards_earned: u64,
}

impl AchievementTracker {
    /// Initialize with all game achievements
    pub fn new() -> Self {
        Self {
            achievements: all_achievements(),
            ..Default::default()
        }
    }

    /// Increment a counter-based achievement
    pub fn increment_counter(&mut self, achievement_id: &str, amount: u64) {
        for ach in &mut self.achievements {
            if ach.id == achievement_id {
                if let AchievementCondition::Counter { current, .. } = &mut ach.condition {
                    *current += amount;
                }
            }
        }
    }

    /// Set a single-run achievement as achieved
    pub fn mark_achieved(&mut self, achievement_id: &str) {
        for ach in &mut self.achievements {
            if ach.id == achievement_id {
                if let AchievementCondition::SingleRun { achieved } = &mut ach.condition {
                    *achieved = true;
                }
            }
        }
    }

    /// Set a composite sub-condition
    pub fn complete_sub(&mut self, achievement_id: &str, sub_index: usize) {
        for ach in &mut self.achievements {
            if ach.id == achievement_id {
                if let AchievementCondition::Composite { completed, .. } = &mut ach.condition {
                    if sub_index < completed.len() {
                        completed[sub_index] = true;
                    }
                }
            }
        }
    }

    /// Mark floor-gated achievement
    pub fn check_floor_gate(&mut self, achievement_id: &str, current_floor: u32) {
        for ach in &mut self.achievements {
            if ach.id == achievement_id {
                if let AchievementCondition::FloorGated { min_floor, met } = &mut ach.condition {
                    if current_floor >= *min_floor {
                        *met = true;
                    }
                }
            }
        }
    }

    /// Check all achievements and return newly unlocked ones
    pub fn check_all(&mut self, timestamp: u64) -> Vec<Achievement> {
        let mut newly_unlocked = Vec::new();
        for ach in &mut self.achievements {
            if ach.check_and_unlock(timestamp) {
                newly_unlocked.push(ach.clone());
            }
        }
        for ach in &newly_unlocked {
            self.total_unlocked += 1;
            self.total_shards_earned += ach.reward_shards;
        }
        newly_unlocked
    }

    /// Get achievements by category
    pub fn by_category(&self, category: AchievementCategory) -> Vec<&Achievement> {
        self.achievements
            .iter()
            .filter(|a| a.category == category)
            .collect()
    }

    /// Overall completion percentage
    pub fn completion_percent(&self) -> f32 {
        if self.achievements.is_empty() {
            return 0.0;
        }
        let unlocked = self.achievements.iter().filter(|a| a.unlocked).count() as f32;
        unlocked / self.achievements.len() as f32
    }

    /// Serialize to JSON for Nakama storage
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// All game achievements
fn all_achievements() -> Vec<Achievement> {
    vec![
        // === Combat ===
        Achievement {
            id: "combat_first_kill".into(),
            name: "First Blood".into(),
            description: "Slay your first monster.".into(),
            hint: "Attack a monster until it falls.".into(),
            category: AchievementCategory::Combat,
            tier: AchievementTier::Bronze,
            condition: AchievementCondition::Counter {
                current: 0,
                target: 1,
            },
            hidden: false,
            reward_shards: 10,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "combat_100_kills".into(),
            name: "Centurion".into(),
            description: "Slay 100 monsters.".into(),
            hint: "Keep fighting.".into(),
            category: AchievementCategory::Combat,
            tier: AchievementTier::Silver,
            condition: AchievementCondition::Counter {
                current: 0,
                target: 100,
            },
            hidden: false,
            reward_shards: 50,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "combat_perfect_parry".into(),
            name: "Perfect Timing".into(),
            description: "Execute 10 perfect parries.".into(),
            hint: "Parry within 80-120ms of an incoming attack.".into(),
            category: AchievementCategory::Combat,
            tier: AchievementTier::Gold,
            condition: AchievementCondition::Counter {
                current: 0,
                target: 10,
            },
            hidden: false,
            reward_shards: 100,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "combat_all_weapons".into(),
            name: "Arsenal Master".into(),
            description: "Use all 6 weapon types in combat.".into(),
            hint: "Try every weapon at least once.".into(),
            category: AchievementCategory::Mastery,
            tier: AchievementTier::Silver,
            condition: AchievementCondition::Composite {
                completed: vec![false; 6],
                names: vec![
                    "Sword".into(),
                    "Greatsword".into(),
                    "DualDaggers".into(),
                    "Spear".into(),
                    "Gauntlets".into(),
                    "Staff".into(),
                ],
            },
            hidden: false,
            reward_shards: 75,
            unlocked: false,
            unlock_timestamp: None,
        },
        // === Exploration ===
        Achievement {
            id: "explore_floor_10".into(),
            name: "Tower Climber".into(),
            description: "Reach floor 10.".into(),
            hint: "Keep ascending.".into(),
            category: AchievementCategory::Exploration,
            tier: AchievementTier::Bronze,
            condition: AchievementCondition::FloorGated {
                min_floor: 10,
                met: false,
            },
            hidden: false,
            reward_shards: 25,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "explore_floor_50".into(),
            name: "Veteran Climber".into(),
            description: "Reach floor 50.".into(),
            hint: "The tower grows deeper.".into(),
            category: AchievementCategory::Exploration,
            tier: AchievementTier::Silver,
            condition: AchievementCondition::FloorGated {
                min_floor: 50,
                met: false,
            },
            hidden: false,
            reward_shards: 100,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "explore_floor_100".into(),
            name: "Echelon Breaker".into(),
            description: "Break through to Echelon 2 (floor 101).".into(),
            hint: "Master the first hundred floors.".into(),
            category: AchievementCategory::Exploration,
            tier: AchievementTier::Gold,
            condition: AchievementCondition::FloorGated {
                min_floor: 101,
                met: false,
            },
            hidden: false,
            reward_shards: 250,
            unlocked: false,
            unlock_timestamp: None,
        },
        // === Semantic ===
        Achievement {
            id: "semantic_synergy".into(),
            name: "Elemental Synergy".into(),
            description: "Trigger 5 semantic synergy bonuses in combat.".into(),
            hint: "Match your element to your attacks.".into(),
            category: AchievementCategory::Semantic,
            tier: AchievementTier::Silver,
            condition: AchievementCondition::Counter {
                current: 0,
                target: 5,
            },
            hidden: false,
            reward_shards: 60,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "semantic_resonance_event".into(),
            name: "Resonance Catalyst".into(),
            description: "Trigger a Semantic Resonance world event.".into(),
            hint: "Your tags must align with the floor's.".into(),
            category: AchievementCategory::Semantic,
            tier: AchievementTier::Gold,
            condition: AchievementCondition::SingleRun { achieved: false },
            hidden: true,
            reward_shards: 150,
            unlocked: false,
            unlock_timestamp: None,
        },
        // === Survival ===
        Achievement {
            id: "survival_first_death".into(),
            name: "Welcome to the Tower".into(),
            description: "Die for the first time.".into(),
            hint: "Everyone falls eventually.".into(),
            category: AchievementCategory::Survival,
            tier: AchievementTier::Bronze,
            condition: AchievementCondition::Counter {
                current: 0,
                target: 1,
            },
            hidden: false,
            reward_shards: 5,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "survival_corruption_surge".into(),
            name: "Corruption Survivor".into(),
            description: "Survive a Corruption Surge on floor 30+.".into(),
            hint: "Endure when the tower writhes.".into(),
            category: AchievementCategory::Survival,
            tier: AchievementTier::Platinum,
            condition: AchievementCondition::FloorGated {
                min_floor: 30,
                met: false,
            },
            hidden: true,
            reward_shards: 300,
            unlocked: false,
            unlock_timestamp: None,
        },
        // === Social ===
        Achievement {
            id: "social_faction_friendly".into(),
            name: "Making Friends".into(),
            description: "Reach Friendly standing with any faction.".into(),
            hint: "Complete quests and interact with shrines.".into(),
            category: AchievementCategory::Social,
            tier: AchievementTier::Silver,
            condition: AchievementCondition::SingleRun { achieved: false },
            hidden: false,
            reward_shards: 50,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "social_all_factions".into(),
            name: "Diplomat".into(),
            description: "Reach Neutral or better with all 4 factions.".into(),
            hint: "Balance your relationships carefully.".into(),
            category: AchievementCategory::Social,
            tier: AchievementTier::Gold,
            condition: AchievementCondition::Composite {
                completed: vec![false; 4],
                names: vec![
                    "Seekers".into(),
                    "Wardens".into(),
                    "Breakers".into(),
                    "Weavers".into(),
                ],
            },
            hidden: false,
            reward_shards: 200,
            unlocked: false,
            unlock_timestamp: None,
        },
        // === Crafting ===
        Achievement {
            id: "craft_first".into(),
            name: "Apprentice Crafter".into(),
            description: "Craft your first item.".into(),
            hint: "Visit a crafting station.".into(),
            category: AchievementCategory::Crafting,
            tier: AchievementTier::Bronze,
            condition: AchievementCondition::Counter {
                current: 0,
                target: 1,
            },
            hidden: false,
            reward_shards: 15,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "craft_high_quality".into(),
            name: "Master Craftsman".into(),
            description: "Craft an item with 90%+ quality.".into(),
            hint: "Use materials with highly matching tags.".into(),
            category: AchievementCategory::Crafting,
            tier: AchievementTier::Gold,
            condition: AchievementCondition::SingleRun { achieved: false },
            hidden: false,
            reward_shards: 150,
            unlocked: false,
            unlock_timestamp: None,
        },
        // === Tower ===
        Achievement {
            id: "tower_breath_all_phases".into(),
            name: "Breath Witness".into(),
            description: "Experience all 4 Breath of Tower phases.".into(),
            hint: "Stay in the tower through a full cycle.".into(),
            category: AchievementCategory::Tower,
            tier: AchievementTier::Silver,
            condition: AchievementCondition::Composite {
                completed: vec![false; 4],
                names: vec![
                    "Inhale".into(),
                    "Hold".into(),
                    "Exhale".into(),
                    "Pause".into(),
                ],
            },
            hidden: false,
            reward_shards: 40,
            unlocked: false,
            unlock_timestamp: None,
        },
        Achievement {
            id: "tower_memory_event".into(),
            name: "Remembered".into(),
            description: "Trigger a Tower Memory event.".into(),
            hint: "The tower watches your patterns...".into(),
            category: AchievementCategory::Tower,
            tier: AchievementTier::Gold,
            condition: AchievementCondition::SingleRun { achieved: false },
            hidden: true,
            reward_shards: 200,
            unlocked: false,
            unlock_timestamp: None,
        },
    ]
}
