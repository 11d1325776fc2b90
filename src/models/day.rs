//! Day model.

use serde::{Deserialize, Serialize};

/// A day column of the timetable.
///
/// The caller supplies the ordered day list (e.g., Monday-Friday, or a
/// filtered subset); output follows that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Day {
    /// Unique day identifier.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

impl Day {
    /// Creates a day with the given ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Sets the day name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The five school days, ids `MON`..`FRI`.
    pub fn weekdays() -> Vec<Day> {
        [
            ("MON", "Monday"),
            ("TUE", "Tuesday"),
            ("WED", "Wednesday"),
            ("THU", "Thursday"),
            ("FRI", "Friday"),
        ]
        .into_iter()
        .map(|(id, name)| Day::new(id).with_name(name))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekdays() {
        let days = Day::weekdays();
        assert_eq!(days.len(), 5);
        assert_eq!(days[0].id, "MON");
        assert_eq!(days[4].name, "Friday");
    }
}
