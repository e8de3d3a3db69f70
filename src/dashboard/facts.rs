use rand::seq::IndexedRandom;

use super::models::{DevOpsFact, utc_timestamp};

pub const FACT_SOURCE: &str = "DevOps Demo API";

pub const FACTS: [&str; 5] = [
    "The term \"DevOps\" was coined by Patrick Debois, who organised the first DevOpsDays in Ghent in 2009.",
    "Elite DevOps teams deploy on demand, often many times per day, while low performers ship between once a month and once every six months.",
    "Continuous Integration was popularised by Kent Beck as one of the core practices of Extreme Programming.",
    "Infrastructure as Code lets you version, review and test servers exactly like application code.",
    "Teams with strong monitoring and fast rollbacks restore service after an incident in under an hour.",
];

/// Pick one of [`FACTS`] uniformly at random.
pub fn random_fact() -> &'static str {
    FACTS.choose(&mut rand::rng()).copied().unwrap_or(FACTS[0])
}

pub fn devops_fact() -> DevOpsFact {
    DevOpsFact {
        fact: random_fact().to_string(),
        timestamp: utc_timestamp(),
        source: FACT_SOURCE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_fact_always_from_list() {
        for _ in 0..200 {
            assert!(FACTS.contains(&random_fact()));
        }
    }

    #[test]
    fn test_facts_are_distinct() {
        let unique: HashSet<_> = FACTS.iter().collect();
        assert_eq!(unique.len(), FACTS.len());
    }

    #[test]
    fn test_devops_fact_fields() {
        let fact = devops_fact();
        assert!(FACTS.contains(&fact.fact.as_str()));
        assert_eq!(fact.source, FACT_SOURCE);
        assert!(chrono::DateTime::parse_from_rfc3339(&fact.timestamp).is_ok());
    }
}
