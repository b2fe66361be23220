//! Table-driven validation of the add-employee draft.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::FormDraft;

/// A field of the add-employee form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    PhoneNumber,
    EmployeeId,
    City,
    Country,
    Latitude,
    Longitude,
}

impl Field {
    /// Every field, in form order.
    pub const ALL: [Field; 9] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::PhoneNumber,
        Field::EmployeeId,
        Field::City,
        Field::Country,
        Field::Latitude,
        Field::Longitude,
    ];

    /// Fields the user types into. Coordinates come from the location provider.
    pub const EDITABLE: [Field; 7] = [
        Field::FirstName,
        Field::LastName,
        Field::Email,
        Field::PhoneNumber,
        Field::EmployeeId,
        Field::City,
        Field::Country,
    ];

    /// Label shown next to the input.
    pub fn label(&self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::PhoneNumber => "Phone Number",
            Field::EmployeeId => "Employee ID",
            Field::City => "City",
            Field::Country => "Country",
            Field::Latitude => "Latitude",
            Field::Longitude => "Longitude",
        }
    }

    pub fn value<'a>(&self, draft: &'a FormDraft) -> &'a str {
        match self {
            Field::FirstName => &draft.first_name,
            Field::LastName => &draft.last_name,
            Field::Email => &draft.email,
            Field::PhoneNumber => &draft.phone_number,
            Field::EmployeeId => &draft.employee_id,
            Field::City => &draft.city,
            Field::Country => &draft.country,
            Field::Latitude => &draft.latitude,
            Field::Longitude => &draft.longitude,
        }
    }

    pub fn value_mut<'a>(&self, draft: &'a mut FormDraft) -> &'a mut String {
        match self {
            Field::FirstName => &mut draft.first_name,
            Field::LastName => &mut draft.last_name,
            Field::Email => &mut draft.email,
            Field::PhoneNumber => &mut draft.phone_number,
            Field::EmployeeId => &mut draft.employee_id,
            Field::City => &mut draft.city,
            Field::Country => &mut draft.country,
            Field::Latitude => &mut draft.latitude,
            Field::Longitude => &mut draft.longitude,
        }
    }
}

/// Predicate plus the message reported when it fails.
pub struct Rule {
    pub check: fn(&str) -> bool,
    pub message: &'static str,
}

const fn rule(check: fn(&str) -> bool, message: &'static str) -> Rule {
    Rule { check, message }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$").expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{10,15}$").expect("valid phone regex"));

fn non_empty(value: &str) -> bool {
    !value.is_empty()
}

/// Email address grammar. The local part may not start with a dot or contain `..`.
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

/// 10 to 15 ASCII digits and nothing else.
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// Field rules, checked in order. A field reports its first failing rule.
pub static SCHEMA: [(Field, &[Rule]); 9] = [
    (Field::FirstName, &[rule(non_empty, "First name is required")]),
    (Field::LastName, &[rule(non_empty, "Last name is required")]),
    (
        Field::Email,
        &[
            rule(non_empty, "Email is required"),
            rule(is_valid_email, "Enter a valid email address"),
        ],
    ),
    (
        Field::PhoneNumber,
        &[
            rule(non_empty, "Phone number is required"),
            rule(is_valid_phone, "Enter a valid phone number (10-15 digits)"),
        ],
    ),
    (Field::EmployeeId, &[rule(non_empty, "Employee ID is required")]),
    (Field::City, &[rule(non_empty, "City is required")]),
    (Field::Country, &[rule(non_empty, "Country is required")]),
    (Field::Latitude, &[rule(non_empty, "Latitude is required")]),
    (Field::Longitude, &[rule(non_empty, "Longitude is required")]),
];

/// Errors by field. A field with no entry is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: BTreeMap<Field, &'static str>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors.get(&field).copied()
    }

    /// Fields that currently fail, in form order.
    pub fn failing_fields(&self) -> Vec<Field> {
        self.errors.keys().copied().collect()
    }
}

/// Run every rule in [`SCHEMA`] against the draft.
pub fn validate(draft: &FormDraft) -> ValidationResult {
    let errors = SCHEMA
        .iter()
        .filter_map(|(field, rules)| {
            let value = field.value(draft);
            rules
                .iter()
                .find(|r| !(r.check)(value))
                .map(|r| (*field, r.message))
        })
        .collect();

    ValidationResult { errors }
}
