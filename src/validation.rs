//! Input validation for layout requests.
//!
//! Checks structural integrity of the records a data-access layer hands
//! to the engine. Advisory only: the engine degrades gracefully whatever
//! this reports, but operators usually want to know why a lesson vanished
//! from a grid. Detects:
//! - Duplicate IDs
//! - Fragments referencing unknown lessons, days, slots, rooms or teachers
//! - Lessons referencing unknown subjects or teachers
//! - Slots whose wall-clock end is not after their start
//! - Non-positive explicit lesson durations

use crate::engine::LayoutRequest;
use crate::models::ReferenceKind;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A fragment references a lesson that doesn't exist.
    UnknownLesson,
    /// A fragment references a day outside the requested set.
    UnknownDay,
    /// A fragment references a slot that doesn't exist.
    UnknownSlot,
    /// A record references a subject, teacher or room that doesn't exist.
    InvalidReference,
    /// A fragment has neither a slot nor an explicit minute range.
    MissingPlacement,
    /// A slot's wall-clock end is not after its start.
    InvalidSlotTime,
    /// A lesson's explicit duration is zero or negative.
    InvalidDuration,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data of a layout request.
///
/// Checks:
/// 1. No duplicate slot, lesson, fragment or day IDs
/// 2. Slots with wall-clock times end after they start
/// 3. Explicit lesson durations are positive
/// 4. Lessons reference existing subjects and teachers
/// 5. Fragments reference existing lessons, days and slots
/// 6. Fragments have a placement (slot or explicit minutes)
/// 7. Fragment rooms and extra teachers exist (blank ids are ignored)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(request: &LayoutRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let slot_ids = collect_ids(
        "slot",
        request.slots.iter().map(|s| s.id.as_str()),
        &mut errors,
    );
    let lesson_ids = collect_ids(
        "lesson",
        request.lessons.iter().map(|l| l.id.as_str()),
        &mut errors,
    );
    collect_ids(
        "fragment",
        request.fragments.iter().map(|f| f.id.as_str()),
        &mut errors,
    );
    let day_ids = collect_ids(
        "day",
        request.days.iter().map(|d| d.id.as_str()),
        &mut errors,
    );

    for slot in &request.slots {
        if let (Some(start), Some(end)) = (slot.start, slot.end) {
            if end <= start {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidSlotTime,
                    format!("Slot '{}' ends at {} before it starts at {}", slot.id, end, start),
                ));
            }
        }
    }

    let refs = &request.references;
    for lesson in &request.lessons {
        if matches!(lesson.duration_in_slots, Some(d) if d <= 0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!(
                    "Lesson '{}' has non-positive duration {:?}",
                    lesson.id, lesson.duration_in_slots
                ),
            ));
        }
        if !refs.contains(ReferenceKind::Subject, &lesson.subject_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!(
                    "Lesson '{}' references unknown subject '{}'",
                    lesson.id, lesson.subject_id
                ),
            ));
        }
        for teacher in non_blank(&lesson.teacher_ids) {
            if !refs.contains(ReferenceKind::Teacher, teacher) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Lesson '{}' references unknown teacher '{}'", lesson.id, teacher),
                ));
            }
        }
    }

    for frag in &request.fragments {
        if !lesson_ids.contains(frag.lesson_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownLesson,
                format!(
                    "Fragment '{}' references unknown lesson '{}'",
                    frag.id, frag.lesson_id
                ),
            ));
        }
        if !day_ids.contains(frag.day_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownDay,
                format!("Fragment '{}' references unknown day '{}'", frag.id, frag.day_id),
            ));
        }
        match &frag.slot_id {
            Some(slot) if !slot_ids.contains(slot.as_str()) => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownSlot,
                    format!("Fragment '{}' references unknown slot '{}'", frag.id, slot),
                ));
            }
            None if frag.explicit_minutes().is_none() => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::MissingPlacement,
                    format!("Fragment '{}' has neither a slot nor a minute range", frag.id),
                ));
            }
            _ => {}
        }
        for room in non_blank(&frag.room_ids) {
            if !refs.contains(ReferenceKind::Room, room) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Fragment '{}' references unknown room '{}'", frag.id, room),
                ));
            }
        }
        for teacher in non_blank(&frag.teacher_ids) {
            if !refs.contains(ReferenceKind::Teacher, teacher) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Fragment '{}' references unknown teacher '{}'", frag.id, teacher),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Trimmed ids with blanks skipped, matching what the merger keeps.
fn non_blank(ids: &[String]) -> impl Iterator<Item = &str> {
    ids.iter().map(|id| id.trim()).filter(|id| !id.is_empty())
}

/// Collects IDs into a set, reporting each repeat.
fn collect_ids<'a>(
    label: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut set = HashSet::new();
    for id in ids {
        if !set.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {label} ID: {id}"),
            ));
        }
    }
    set
}
