use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Country code the phone mask renders in front of local digits.
pub const PHONE_PREFIX: &str = "+370";
const LOCAL_DIGITS: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Message];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Message => "Message",
        }
    }

    pub const fn hint(self) -> &'static str {
        match self {
            Self::Name => "Letters only, at least 2 characters.",
            Self::Email => "Enter a valid email address.",
            Self::Phone => "Format: +370 XXX XXXXX",
            Self::Message => "At least 10 characters.",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Please fix: {}", invalid_list(.0))]
pub struct ContactError(pub Vec<Field>);

fn invalid_list(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Message => self.message = value,
        }
    }
}

pub fn validate(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}

#[derive(Clone, Debug)]
struct FieldRule {
    pattern: Regex,
    min_chars: usize,
}

impl FieldRule {
    fn new(pattern: Regex, min_chars: usize) -> Self {
        Self { pattern, min_chars }
    }

    fn check(&self, value: &str) -> bool {
        let value = value.trim();
        value.chars().count() >= self.min_chars && validate(value, &self.pattern)
    }
}

#[derive(Clone, Debug)]
pub struct ContactForm {
    name: FieldRule,
    email: FieldRule,
    phone: FieldRule,
    message: FieldRule,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            name: FieldRule::new(
                Regex::new(r"^\p{L}+(?:[ '\-]\p{L}+)*$").expect("valid name regex"),
                2,
            ),
            email: FieldRule::new(
                Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$").expect("valid email regex"),
                0,
            ),
            phone: FieldRule::new(
                Regex::new(r"^\+370 \d{3} \d{5}$").expect("valid phone regex"),
                0,
            ),
            message: FieldRule::new(Regex::new(r"\S").expect("valid message regex"), 10),
        }
    }

    fn rule(&self, field: Field) -> &FieldRule {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    pub fn pattern(&self, field: Field) -> &Regex {
        &self.rule(field).pattern
    }

    pub fn validate(&self, field: Field, value: &str) -> bool {
        self.rule(field).check(value)
    }

    pub fn submit(&self, draft: &ContactDraft) -> Result<(), ContactError> {
        let invalid: Vec<_> = Field::ALL
            .into_iter()
            .filter(|&field| !self.validate(field, draft.get(field)))
            .collect();

        if invalid.is_empty() {
            log::debug!("contact form accepted");
            Ok(())
        } else {
            log::debug!("contact form rejected: {:?}", invalid);
            Err(ContactError(invalid))
        }
    }
}

/// Masks raw phone input as `+370 XXX XXXXX`, filling in progressively.
/// A typed leading `370` is taken as the country code.
pub fn mask_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    let local = digits.strip_prefix("370").unwrap_or(&digits);
    let local = &local[..local.len().min(LOCAL_DIGITS)];

    if local.is_empty() {
        return String::new();
    }

    let (head, tail) = local.split_at(local.len().min(3));
    let mut masked = format!("{PHONE_PREFIX} {head}");
    if !tail.is_empty() {
        masked.push(' ');
        masked.push_str(tail);
    }
    masked
}
