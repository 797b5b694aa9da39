use serde::Serialize;

use super::state::RouteSelection;

pub const NO_NOTES_PLACEHOLDER: &str = "No additional notes.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Note,
    Acceptance,
}

const FIELD_ORDER: [ContactField; 5] = [
    ContactField::Name,
    ContactField::Email,
    ContactField::Phone,
    ContactField::Note,
    ContactField::Acceptance,
];

impl ContactField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Full name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Note => "Requirements",
            Self::Acceptance => "Terms accepted",
        }
    }

    fn order_index(self) -> usize {
        FIELD_ORDER
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        FIELD_ORDER[(self.order_index() + 1) % FIELD_ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.order_index();
        if idx == 0 {
            FIELD_ORDER[FIELD_ORDER.len() - 1]
        } else {
            FIELD_ORDER[idx - 1]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error("required field is empty: {}", .0.label())]
    MissingField(ContactField),

    #[error("terms and conditions have not been accepted")]
    TermsNotAccepted,
}

/// Transient contents of the contact modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub note: String,
    pub accepted: bool,
    pub route: RouteSelection,
    pub focus: ContactField,
}

impl ContactForm {
    pub fn new(route: RouteSelection) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            note: String::new(),
            accepted: false,
            route,
            focus: ContactField::Name,
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> Option<&mut String> {
        match field {
            ContactField::Name => Some(&mut self.name),
            ContactField::Email => Some(&mut self.email),
            ContactField::Phone => Some(&mut self.phone),
            ContactField::Note => Some(&mut self.note),
            ContactField::Acceptance => None,
        }
    }

    pub fn missing_fields(&self) -> Vec<ContactField> {
        [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Phone, &self.phone),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ContactError> {
        if !self.accepted {
            return Err(ContactError::TermsNotAccepted);
        }
        match self.missing_fields().first() {
            Some(field) => Err(ContactError::MissingField(*field)),
            None => Ok(()),
        }
    }

    pub fn to_request(&self) -> Result<ContactRequest, ContactError> {
        self.validate()?;
        Ok(ContactRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            note: self.note.trim().to_string(),
            origin: self.route.origin.name.to_string(),
            destination: self.route.destination.name.to_string(),
        })
    }
}

/// A validated submission. Acceptance is implied by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub note: String,
    pub origin: String,
    pub destination: String,
}

impl ContactRequest {
    pub fn compose_message(&self, brand: &str) -> String {
        let note = if self.note.is_empty() {
            NO_NOTES_PLACEHOLDER
        } else {
            self.note.as_str()
        };
        format!(
            "*NEW CONSULTATION REQUEST - {brand}*\n\n\
             *Name:* {}\n\
             *Email:* {}\n\
             *Phone:* {}\n\
             *Route:* {} -> {}\n\
             *Note:* {note}\n\n\
             _I have read and accepted the {brand} Terms and Conditions._\n\
             _Sent via {brand} desk_",
            self.name, self.email, self.phone, self.origin, self.destination,
        )
    }
}

pub fn route_proposal_message(route: &RouteSelection, brand: &str) -> String {
    format!(
        "Hello {brand} team, I am interested in a scheduling consultation for the route {} to {}. Please send a proposal.",
        route.origin.name, route.destination.name
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeepLink {
    /// Digits only, leading `+` removed.
    pub recipient: String,
    /// Already percent-encoded.
    pub encoded_text: Option<String>,
}

impl DeepLink {
    pub fn new(number: &str, text: Option<&str>) -> Self {
        Self {
            recipient: normalize_recipient(number),
            encoded_text: text.map(|t| urlencoding::encode(t).into_owned()),
        }
    }

    pub fn url(&self) -> String {
        match &self.encoded_text {
            Some(text) => format!("https://wa.me/{}?text={}", self.recipient, text),
            None => format!("https://wa.me/{}", self.recipient),
        }
    }
}

pub fn normalize_recipient(number: &str) -> String {
    number.trim().trim_start_matches('+').to_string()
}
