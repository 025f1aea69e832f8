use std::fmt;
use std::str::FromStr;

use crate::task::Task;

/// Which tasks the list shows. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Pending,
    Completed,
}

impl Filter {
    /// Every filter, in the order the selector offers them.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Pending, Filter::Completed];

    pub fn value(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Pending => "pending",
            Filter::Completed => "completed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Pending => "Pending",
            Filter::Completed => "Completed",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Pending => !task.done,
            Filter::Completed => task.done,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter: {0}")]
pub struct UnknownFilter(pub String);

impl FromStr for Filter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Filter::ALL
            .into_iter()
            .find(|filter| filter.value() == s)
            .ok_or_else(|| UnknownFilter(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_all() {
        assert_eq!(Filter::default(), Filter::All);
    }

    #[test]
    fn parses_its_own_values() {
        for filter in Filter::ALL {
            assert_eq!(filter.value().parse::<Filter>(), Ok(filter));
        }
        assert_eq!(
            "done".parse::<Filter>(),
            Err(UnknownFilter("done".to_owned()))
        );
    }

    #[test]
    fn matches_by_completion() {
        let mut task = Task::new("x");
        assert!(Filter::All.matches(&task));
        assert!(Filter::Pending.matches(&task));
        assert!(!Filter::Completed.matches(&task));

        task.done = true;
        assert!(Filter::All.matches(&task));
        assert!(!Filter::Pending.matches(&task));
        assert!(Filter::Completed.matches(&task));
    }
}
