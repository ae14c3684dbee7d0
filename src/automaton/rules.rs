//! Birth/survival rule sets for two-state cellular automata

use super::grid::CellState;
use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The available rule sets, in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    #[default]
    Conway,
    Seeds,
    HighLife,
    DayNight,
}

impl RuleType {
    pub const ALL: [RuleType; 4] = [
        RuleType::Conway,
        RuleType::Seeds,
        RuleType::HighLife,
        RuleType::DayNight,
    ];

    /// Cyclic successor, wrapping from the last rule to the first
    pub fn next(self) -> Self {
        match self {
            RuleType::Conway => RuleType::Seeds,
            RuleType::Seeds => RuleType::HighLife,
            RuleType::HighLife => RuleType::DayNight,
            RuleType::DayNight => RuleType::Conway,
        }
    }

    /// Neighbor counts that bring a dead cell to life
    pub fn birth(self) -> &'static [u8] {
        match self {
            RuleType::Conway => &[3],
            RuleType::Seeds => &[2],
            RuleType::HighLife => &[3, 6],
            RuleType::DayNight => &[3, 6, 7, 8],
        }
    }

    /// Neighbor counts that keep a live cell alive
    pub fn survival(self) -> &'static [u8] {
        match self {
            RuleType::Conway => &[2, 3],
            RuleType::Seeds => &[],
            RuleType::HighLife => &[2, 3],
            RuleType::DayNight => &[3, 4, 6, 7, 8],
        }
    }

    /// Rule in B/S notation, e.g. `B3/S23`
    pub fn notation(self) -> String {
        let digits = |counts: &[u8]| counts.iter().map(u8::to_string).collect::<String>();
        format!("B{}/S{}", digits(self.birth()), digits(self.survival()))
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Rules::name(*self))
    }
}

impl FromStr for RuleType {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conway" | "life" => Ok(RuleType::Conway),
            "seeds" => Ok(RuleType::Seeds),
            "highlife" | "high_life" => Ok(RuleType::HighLife),
            "day_night" | "daynight" | "day-night" => Ok(RuleType::DayNight),
            _ => Err(SimError::UnknownRule(s.to_string())),
        }
    }
}

/// Stateless rule evaluation
pub struct Rules;

impl Rules {
    /// Next state of a cell given its current state and live-neighbor count
    pub fn apply(rule: RuleType, current: CellState, neighbors: u8) -> CellState {
        let table = match current {
            CellState::Alive => rule.survival(),
            CellState::Dead => rule.birth(),
        };
        CellState::from_alive(table.contains(&neighbors))
    }

    /// Human-readable rule name
    pub fn name(rule: RuleType) -> &'static str {
        match rule {
            RuleType::Conway => "Conway's Game of Life",
            RuleType::Seeds => "Seeds",
            RuleType::HighLife => "HighLife",
            RuleType::DayNight => "Day & Night",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automaton::CellState::{Alive, Dead};

    fn alive_counts(rule: RuleType, current: CellState) -> Vec<u8> {
        (0..=8)
            .filter(|&n| Rules::apply(rule, current, n) == Alive)
            .collect()
    }

    #[test]
    fn test_conway_rule_logic() {
        assert_eq!(Rules::apply(RuleType::Conway, Alive, 2), Alive);
        assert_eq!(Rules::apply(RuleType::Conway, Alive, 3), Alive);
        assert_eq!(Rules::apply(RuleType::Conway, Dead, 3), Alive);
        assert_eq!(Rules::apply(RuleType::Conway, Alive, 1), Dead); // underpopulation
        assert_eq!(Rules::apply(RuleType::Conway, Alive, 4), Dead); // overpopulation
        assert_eq!(Rules::apply(RuleType::Conway, Dead, 2), Dead);
    }

    #[test]
    fn test_tables_cover_all_counts() {
        assert_eq!(alive_counts(RuleType::Conway, Alive), vec![2, 3]);
        assert_eq!(alive_counts(RuleType::Conway, Dead), vec![3]);

        assert!(alive_counts(RuleType::Seeds, Alive).is_empty());
        assert_eq!(alive_counts(RuleType::Seeds, Dead), vec![2]);

        assert_eq!(alive_counts(RuleType::HighLife, Alive), vec![2, 3]);
        assert_eq!(alive_counts(RuleType::HighLife, Dead), vec![3, 6]);

        assert_eq!(alive_counts(RuleType::DayNight, Alive), vec![3, 4, 6, 7, 8]);
        assert_eq!(alive_counts(RuleType::DayNight, Dead), vec![3, 6, 7, 8]);
    }

    #[test]
    fn test_next_cycles_through_all() {
        for start in RuleType::ALL {
            let mut rule = start;
            for _ in 0..RuleType::ALL.len() {
                rule = rule.next();
            }
            assert_eq!(rule, start);
        }
        assert_eq!(RuleType::DayNight.next(), RuleType::Conway);
    }

    #[test]
    fn test_names_and_notation() {
        assert_eq!(Rules::name(RuleType::Conway), "Conway's Game of Life");
        assert_eq!(Rules::name(RuleType::DayNight), "Day & Night");
        assert_eq!(RuleType::Conway.notation(), "B3/S23");
        assert_eq!(RuleType::Seeds.notation(), "B2/S");
        assert_eq!(RuleType::HighLife.notation(), "B36/S23");
        assert_eq!(RuleType::DayNight.notation(), "B3678/S34678");
    }

    #[test]
    fn test_parse_rule() {
        assert_eq!("Conway".parse::<RuleType>().unwrap(), RuleType::Conway);
        assert_eq!("high_life".parse::<RuleType>().unwrap(), RuleType::HighLife);
        assert_eq!("DayNight".parse::<RuleType>().unwrap(), RuleType::DayNight);
        assert!(matches!(
            "brian".parse::<RuleType>(),
            Err(SimError::UnknownRule(_))
        ));
    }
}
