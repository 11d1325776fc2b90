//! Lesson model.
//!
//! A lesson is the reference entity behind every rendered event: which
//! subject is taught, by whom, and (optionally) for how many slots.
//! Lessons do not carry a time placement; placement is derived from the
//! fragments that reference them.

use serde::{Deserialize, Serialize};

/// A lesson definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Unique lesson identifier.
    pub id: String,
    /// Subject taught.
    pub subject_id: String,
    /// Teachers assigned to every occurrence.
    pub teacher_ids: Vec<String>,
    /// Explicit length of one occurrence in slots. `None` = derive from fragments.
    pub duration_in_slots: Option<i32>,
    /// Class or section this lesson belongs to (e.g., "7B").
    pub group: Option<String>,
}

impl Lesson {
    /// Creates a lesson for the given subject.
    pub fn new(id: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            subject_id: subject_id.into(),
            teacher_ids: Vec::new(),
            duration_in_slots: None,
            group: None,
        }
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        self.teacher_ids.push(teacher_id.into());
        self
    }

    /// Sets the explicit duration in slots.
    pub fn with_duration(mut self, slots: i32) -> Self {
        self.duration_in_slots = Some(slots);
        self
    }

    /// Sets the class or section.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// The explicit duration, if present and positive.
    ///
    /// Zero or negative values are treated as absent.
    pub fn explicit_duration(&self) -> Option<i64> {
        self.duration_in_slots
            .filter(|&d| d > 0)
            .map(i64::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_builder() {
        let lesson = Lesson::new("L1", "MATH")
            .with_teacher("T1")
            .with_teacher("T2")
            .with_duration(2)
            .with_group("7B");

        assert_eq!(lesson.subject_id, "MATH");
        assert_eq!(lesson.teacher_ids, vec!["T1", "T2"]);
        assert_eq!(lesson.explicit_duration(), Some(2));
        assert_eq!(lesson.group.as_deref(), Some("7B"));
    }

    #[test]
    fn test_non_positive_duration_is_absent() {
        assert_eq!(Lesson::new("L1", "S").with_duration(0).explicit_duration(), None);
        assert_eq!(Lesson::new("L1", "S").with_duration(-3).explicit_duration(), None);
        assert_eq!(Lesson::new("L1", "S").explicit_duration(), None);
    }
}
