//! Contact CLI command
//!
//! Fills the contact form from flags and waits out the submission delay.

use std::thread;
use std::time::Instant;

use clap::Args;

use crate::config::settings::Settings;
use crate::contact::{ContactDesk, ContactField};
use crate::error::{FinbotError, FinbotResult};

#[derive(Args, Debug, Default)]
pub struct ContactArgs {
    /// Your full name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Where to reply
    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub subject: String,

    #[arg(long, default_value = "")]
    pub message: String,
}

/// Handle the contact command
pub fn handle_contact_command(settings: &Settings, args: ContactArgs) -> FinbotResult<()> {
    let mut desk = ContactDesk::new(settings.contact_delay());
    desk.set_field(ContactField::Name, args.name);
    desk.set_field(ContactField::Email, args.email);
    desk.set_field(ContactField::Subject, args.subject);
    desk.set_field(ContactField::Message, args.message);

    if let Err(errors) = desk.submit(Instant::now()) {
        let listed: Vec<_> = errors.iter().map(ToString::to_string).collect();
        return Err(FinbotError::Validation(listed.join("; ")));
    }
    println!("Submitting...");

    while let Some(ready_at) = desk.ready_at() {
        thread::sleep(ready_at.saturating_duration_since(Instant::now()));
        desk.poll(Instant::now());
    }

    if let Some(message) = desk.status_message() {
        println!("{}", message);
    }
    Ok(())
}
