//! Rule codes for d-regular graph-rewriting automata.
//!
//! A vertex of a binary, d-regular graph sees one of `2(d+1)` local
//! configurations:
//!
//! ```text
//! c(v) = (d+1) * s(v) + sum of s(u) over the neighbors u of v
//! ```
//!
//! A rule assigns every configuration a next state and a division flag, so a
//! rule is a `2 * 2(d+1)`-bit number. Reading the number in binary from the
//! right, the first `2(d+1)` digits are the next states of configurations
//! `0, 1, ...` and the following `2(d+1)` digits are the division flags.

use std::fmt;

use gra_core::Graph;
use serde::{Deserialize, Serialize};

use crate::error::{AutomatonError, AutomatonResult};
use crate::evolver::Evolver;

/// Largest supported degree: `4(d+1)` bits must fit in a `u64` rule number.
pub const MAX_DEGREE: usize = 15;

const MAX_CONFIGS: usize = 2 * (MAX_DEGREE + 1);

/// Number of local configurations for vertices of the given degree.
pub fn config_count(degree: usize) -> usize {
    2 * (degree + 1)
}

/// Largest valid rule number for the given degree, `4^(2(d+1)) - 1`.
pub fn max_number(degree: usize) -> AutomatonResult<u64> {
    check_degree(degree)?;
    let bits = 2 * config_count(degree);
    Ok(if bits >= 64 {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    })
}

/// Configuration index of a vertex from its own state and the number of
/// alive neighbors.
pub fn configuration(degree: usize, own_state: u8, alive_neighbors: usize) -> usize {
    (degree + 1) * usize::from(own_state) + alive_neighbors
}

fn check_degree(degree: usize) -> AutomatonResult<()> {
    if degree == 0 || degree > MAX_DEGREE {
        return Err(AutomatonError::range(format!(
            "degree {degree} outside [1, {MAX_DEGREE}]"
        )));
    }
    Ok(())
}

/// A decoded rule: next-state and division lookup tables for one degree.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RuleSpec", into = "RuleSpec")]
pub struct RuleCode {
    degree: usize,
    number: u64,
    next_state: [u8; MAX_CONFIGS],
    divides: [bool; MAX_CONFIGS],
}

/// Wire form of a [`RuleCode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Regularity degree the rule applies to.
    pub degree: usize,
    /// Rule number.
    pub number: u64,
}

impl TryFrom<RuleSpec> for RuleCode {
    type Error = AutomatonError;

    fn try_from(spec: RuleSpec) -> AutomatonResult<Self> {
        RuleCode::new(spec.degree, spec.number)
    }
}

impl From<RuleCode> for RuleSpec {
    fn from(rule: RuleCode) -> Self {
        RuleSpec {
            degree: rule.degree,
            number: rule.number,
        }
    }
}

/// One row of a rule's behavior table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleEntry {
    pub configuration: usize,
    pub own_state: u8,
    pub alive_neighbors: usize,
    pub next_state: u8,
    pub divides: bool,
}

impl RuleCode {
    /// Decode rule `number` for graphs of the given degree.
    ///
    /// Fails with [`AutomatonError::Range`] when the degree is outside
    /// `[1, MAX_DEGREE]` or `number >= 4^(2(d+1))`.
    pub fn new(degree: usize, number: u64) -> AutomatonResult<Self> {
        let max = max_number(degree)?;
        if number > max {
            return Err(AutomatonError::range(format!(
                "rule number {number} exceeds {max} for degree {degree}"
            )));
        }

        let count = config_count(degree);
        let mut next_state = [0u8; MAX_CONFIGS];
        let mut divides = [false; MAX_CONFIGS];
        for c in 0..count {
            next_state[c] = ((number >> c) & 1) as u8;
            divides[c] = (number >> (c + count)) & 1 == 1;
        }

        Ok(Self {
            degree,
            number,
            next_state,
            divides,
        })
    }

    /// Encode a rule from its two tables, each of length `2(d+1)`.
    pub fn from_tables(degree: usize, next_state: &[u8], divides: &[bool]) -> AutomatonResult<Self> {
        check_degree(degree)?;
        let count = config_count(degree);
        if next_state.len() != count || divides.len() != count {
            return Err(AutomatonError::range(format!(
                "degree {degree} needs tables of length {count}, got {} and {}",
                next_state.len(),
                divides.len()
            )));
        }

        let mut number = 0u64;
        for (c, (&state, &split)) in next_state.iter().zip(divides).enumerate() {
            if state > 1 {
                return Err(AutomatonError::range(format!(
                    "next state {state} for configuration {c} is not binary"
                )));
            }
            number |= u64::from(state) << c;
            number |= u64::from(split) << (c + count);
        }

        Self::new(degree, number)
    }

    /// Regularity degree the rule applies to.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Rule number.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Number of local configurations, `2(d+1)`.
    pub fn config_count(&self) -> usize {
        config_count(self.degree)
    }

    fn check(&self, configuration: usize) -> AutomatonResult<()> {
        if configuration < self.config_count() {
            Ok(())
        } else {
            Err(AutomatonError::Domain {
                configuration,
                config_count: self.config_count(),
            })
        }
    }

    /// State a vertex in `configuration` takes at the next step.
    pub fn next_state(&self, configuration: usize) -> AutomatonResult<u8> {
        self.check(configuration)?;
        Ok(self.next_state[configuration])
    }

    /// Whether a vertex in `configuration` divides at the next step.
    pub fn divides(&self, configuration: usize) -> AutomatonResult<bool> {
        self.check(configuration)?;
        Ok(self.divides[configuration])
    }

    /// Next state and division flag without the domain check.
    pub(crate) fn outcome(&self, configuration: usize) -> (u8, bool) {
        (
            self.next_state[configuration],
            self.divides[configuration],
        )
    }

    /// Next-state table indexed by configuration.
    pub fn next_state_table(&self) -> &[u8] {
        &self.next_state[..self.config_count()]
    }

    /// Division table indexed by configuration.
    pub fn division_table(&self) -> &[bool] {
        &self.divides[..self.config_count()]
    }

    /// The rule number in binary, most significant digit first, left-padded
    /// to `2 * config_count` digits.
    ///
    /// Element `k` is bit `2 * config_count - 1 - k`, so the last
    /// `config_count` elements read the next-state table backwards and the
    /// first `config_count` read the division table backwards.
    pub fn binary_digits(&self) -> Vec<u8> {
        let bits = 2 * self.config_count();
        (0..bits)
            .rev()
            .map(|bit| ((self.number >> bit) & 1) as u8)
            .collect()
    }

    /// Behavior table, one entry per configuration.
    pub fn entries(&self) -> impl Iterator<Item = RuleEntry> + '_ {
        (0..self.config_count()).map(move |c| RuleEntry {
            configuration: c,
            own_state: (c / (self.degree + 1)) as u8,
            alive_neighbors: c % (self.degree + 1),
            next_state: self.next_state[c],
            divides: self.divides[c],
        })
    }

    /// Evolve `graph` by one step with a default [`Evolver`].
    pub fn evolve(&self, graph: &Graph) -> AutomatonResult<Graph> {
        Evolver::new().step(graph, self)
    }

    /// Evolve `graph` by `steps` steps with a default [`Evolver`].
    pub fn jump(&self, graph: &Graph, steps: u64) -> AutomatonResult<Graph> {
        Evolver::new().jump(graph, self, steps)
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} (degree {})", self.number, self.degree)
    }
}

impl fmt::Debug for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleCode")
            .field("degree", &self.degree)
            .field("number", &self.number)
            .field("next_state", &self.next_state_table())
            .field("divides", &self.division_table())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_2236_tables() {
        let rule = RuleCode::new(3, 2236).unwrap();

        assert_eq!(rule.config_count(), 8);
        assert_eq!(rule.next_state_table(), &[0, 0, 1, 1, 1, 1, 0, 1]);
        assert_eq!(
            rule.division_table(),
            &[false, false, false, true, false, false, false, false]
        );
        assert_eq!(
            rule.binary_digits(),
            vec![0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 1, 1, 1, 0, 0]
        );
    }

    #[test]
    fn test_digits_match_lookups() {
        let rule = RuleCode::new(3, 2236).unwrap();
        let digits = rule.binary_digits();
        let count = rule.config_count();

        for c in 0..count {
            assert_eq!(digits[2 * count - 1 - c], rule.next_state(c).unwrap());
            assert_eq!(digits[count - 1 - c] == 1, rule.divides(c).unwrap());
        }
    }

    #[test]
    fn test_number_range() {
        assert_eq!(max_number(3).unwrap(), 65535);
        assert!(RuleCode::new(3, 65535).is_ok());
        assert!(matches!(
            RuleCode::new(3, 65536),
            Err(AutomatonError::Range { .. })
        ));
        assert_eq!(max_number(MAX_DEGREE).unwrap(), u64::MAX);
        assert!(RuleCode::new(MAX_DEGREE, u64::MAX).is_ok());
    }

    #[test]
    fn test_degree_range() {
        assert!(matches!(RuleCode::new(0, 0), Err(AutomatonError::Range { .. })));
        assert!(matches!(
            RuleCode::new(MAX_DEGREE + 1, 0),
            Err(AutomatonError::Range { .. })
        ));
    }

    #[test]
    fn test_domain_errors() {
        let rule = RuleCode::new(3, 2236).unwrap();

        assert!(matches!(
            rule.next_state(8),
            Err(AutomatonError::Domain {
                configuration: 8,
                config_count: 8
            })
        ));
        assert!(matches!(rule.divides(100), Err(AutomatonError::Domain { .. })));
    }

    #[test]
    fn test_from_tables_inverts_decoding() {
        let rule = RuleCode::new(2, 0b1001_0110_0101).unwrap();
        let rebuilt =
            RuleCode::from_tables(2, rule.next_state_table(), rule.division_table()).unwrap();
        assert_eq!(rule, rebuilt);

        let bad = RuleCode::from_tables(2, &[0, 2, 0, 0, 0, 0], &[false; 6]);
        assert!(matches!(bad, Err(AutomatonError::Range { .. })));
    }

    #[test]
    fn test_entries_split_configuration() {
        let rule = RuleCode::new(3, 2236).unwrap();
        let entry = rule.entries().nth(6).unwrap();

        assert_eq!(entry.own_state, 1);
        assert_eq!(entry.alive_neighbors, 2);
        assert_eq!(entry.next_state, 0);
        assert_eq!(configuration(3, 1, 2), 6);
    }

    #[test]
    fn test_serde_validates() {
        let rule: RuleCode = serde_json::from_str(r#"{"degree":3,"number":2236}"#).unwrap();
        assert_eq!(rule.number(), 2236);
        assert_eq!(rule.to_string(), "rule 2236 (degree 3)");

        let err = serde_json::from_str::<RuleCode>(r#"{"degree":3,"number":70000}"#);
        assert!(err.is_err());
    }
}
