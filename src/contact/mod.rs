//! Contact form
//!
//! A four-field message form with per-field validation and a simulated
//! submission. Like the planner, submission is a state machine driven by the
//! caller's clock: [`ContactDesk::submit`] starts the delay and
//! [`ContactDesk::poll`] finishes it. Nothing leaves the machine; a finished
//! submission only shows the thank-you message and clears the form.

use std::fmt;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use regex::Regex;

pub const SUBMITTING_MESSAGE: &str = "Submitting...";
pub const THANK_YOU_MESSAGE: &str = "Thank you for reaching out! We'll get back to you soon.";

const EMAIL_PATTERN: &str = r"(?i)^[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}$";

fn email_regex() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).ok()).as_ref()
}

/// Whether `email` looks like `local@domain.tld`
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(email))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactField::Name => write!(f, "name"),
            ContactField::Email => write!(f, "email"),
            ContactField::Subject => write!(f, "subject"),
            ContactField::Message => write!(f, "message"),
        }
    }
}

/// A validation message attached to one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn field_mut(&mut self, field: ContactField) -> &mut String {
        match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        }
    }

    /// Every problem with the form, in field order
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut fail = |field, message| errors.push(FieldError { field, message });

        if self.name.trim().is_empty() {
            fail(ContactField::Name, "Name is required.");
        }
        if self.email.trim().is_empty() {
            fail(ContactField::Email, "Email is required.");
        } else if !is_valid_email(&self.email) {
            fail(ContactField::Email, "Invalid email address.");
        }
        if self.subject.trim().is_empty() {
            fail(ContactField::Subject, "Subject is required.");
        }
        if self.message.trim().is_empty() {
            fail(ContactField::Message, "Message cannot be empty.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactStatus {
    Idle,
    Sending { ready_at: Instant },
    Sent,
}

/// The contact form plus its submission state
#[derive(Debug)]
pub struct ContactDesk {
    delay: Duration,
    form: ContactForm,
    errors: Vec<FieldError>,
    status: ContactStatus,
}

impl ContactDesk {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            form: ContactForm::default(),
            errors: Vec::new(),
            status: ContactStatus::Idle,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Replace one field, clearing its error and any finished status
    pub fn set_field(&mut self, field: ContactField, value: impl Into<String>) {
        *self.form.field_mut(field) = value.into();
        self.errors.retain(|e| e.field != field);
        if self.status == ContactStatus::Sent {
            self.status = ContactStatus::Idle;
        }
    }

    /// Validate and start sending
    ///
    /// An invalid form keeps its contents and returns the field errors. A
    /// submission already in flight is left alone.
    pub fn submit(&mut self, now: Instant) -> Result<(), &[FieldError]> {
        if self.is_sending() {
            return Ok(());
        }

        match self.form.validate() {
            Ok(()) => {
                self.errors.clear();
                self.status = ContactStatus::Sending {
                    ready_at: now + self.delay,
                };
                Ok(())
            }
            Err(errors) => {
                self.errors = errors;
                Err(self.errors.as_slice())
            }
        }
    }

    /// Finish the submission once its delay has elapsed
    ///
    /// Returns true only on the call that finishes it.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.status {
            ContactStatus::Sending { ready_at } if now >= ready_at => {
                self.status = ContactStatus::Sent;
                self.form = ContactForm::default();
                true
            }
            _ => false,
        }
    }

    pub fn status(&self) -> ContactStatus {
        self.status
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.status, ContactStatus::Sending { .. })
    }

    pub fn ready_at(&self) -> Option<Instant> {
        match self.status {
            ContactStatus::Sending { ready_at } => Some(ready_at),
            _ => None,
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: ContactField) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message)
    }

    /// Line to show under the form, if any
    pub fn status_message(&self) -> Option<&'static str> {
        match self.status {
            ContactStatus::Idle => None,
            ContactStatus::Sending { .. } => Some(SUBMITTING_MESSAGE),
            ContactStatus::Sent => Some(THANK_YOU_MESSAGE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm::new("Asha", "asha@example.com", "Budget help", "How do goals work?")
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("asha@example.com"));
        assert!(is_valid_email("First.Last+tag@Mail.Example.IN"));
        assert!(!is_valid_email("asha@example"));
        assert!(!is_valid_email("asha.example.com"));
        assert!(!is_valid_email("asha@example.c"));
        assert!(!is_valid_email(" asha@example.com"));
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = ContactForm::default().validate().unwrap_err();
        let messages: Vec<_> = errors.iter().map(|e| e.message).collect();
        assert_eq!(
            messages,
            vec![
                "Name is required.",
                "Email is required.",
                "Subject is required.",
                "Message cannot be empty.",
            ]
        );
    }

    #[test]
    fn test_bad_email_message() {
        let mut form = filled();
        form.email = "nope".into();
        let errors = form.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![FieldError {
                field: ContactField::Email,
                message: "Invalid email address."
            }]
        );
    }

    #[test]
    fn test_invalid_submit_keeps_form() {
        let mut desk = ContactDesk::new(Duration::from_millis(1500));
        desk.set_field(ContactField::Name, "Asha");

        assert_eq!(desk.submit(Instant::now()).unwrap_err().len(), 3);
        assert_eq!(desk.form().name, "Asha");
        assert_eq!(desk.status(), ContactStatus::Idle);

        desk.set_field(ContactField::Email, "asha@example.com");
        assert_eq!(desk.error_for(ContactField::Email), None);
        assert_eq!(desk.error_for(ContactField::Subject), Some("Subject is required."));
    }

    #[test]
    fn test_submission_finishes_after_delay() {
        let delay = Duration::from_millis(1500);
        let mut desk = ContactDesk::new(delay);
        let form = filled();
        for field in [
            ContactField::Name,
            ContactField::Email,
            ContactField::Subject,
            ContactField::Message,
        ] {
            let value = form.clone().field_mut(field).clone();
            desk.set_field(field, value);
        }

        let start = Instant::now();
        desk.submit(start).unwrap();
        assert_eq!(desk.status_message(), Some(SUBMITTING_MESSAGE));
        assert!(!desk.poll(start + Duration::from_millis(1499)));

        assert!(desk.poll(start + delay));
        assert_eq!(desk.status_message(), Some(THANK_YOU_MESSAGE));
        assert_eq!(desk.form(), &ContactForm::default());
        assert!(!desk.poll(start + delay * 2));

        desk.set_field(ContactField::Name, "again");
        assert_eq!(desk.status_message(), None);
    }
}
