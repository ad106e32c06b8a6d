use crate::validation::{FieldRules, Presence, Rule};

/// Rule table for the genre form.
pub const GENRE_FORM: &[FieldRules] = &[FieldRules {
    field: "name",
    message: Some("Genre name must contain at least 3 characters"),
    presence: Presence::Required,
    rules: &[Rule::Trim, Rule::MinLength(3), Rule::Escape],
}];
