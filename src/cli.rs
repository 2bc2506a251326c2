//! Terminal front-end for the user form.
//!
//! Each input line is one user event (field edit, search, submit, delete...).
//! The form and the user table are re-rendered after every event that changes
//! them.

use async_trait::async_trait;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use strum_macros::EnumString;

use crate::{
    error::Result,
    form::{Confirm, DeleteOutcome, SearchOutcome, SubmitOutcome, UserForm},
    models::ReferralType,
};

pub const HELP: &str = "\
Commands:
  name <text>          set full name
  email <text>         set email
  phone <text>         set phone number (01x-xxx xxxx or 01x xxx xxxx)
  dob <yyyy-mm-dd>     set date of birth (empty to clear)
  referral <0-4>       set referral type
  search [id]          find a user by id; empty id clears the search
  submit               create, or update the user being edited
  delete               delete the user being edited
  reset                clear the form
  list                 reload the user list
  show                 render the form again
  help                 this text
  quit                 exit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum Verb {
    Name,
    Email,
    Phone,
    Dob,
    Referral,
    Search,
    Submit,
    Delete,
    Reset,
    List,
    Show,
    Help,
    #[strum(serialize = "quit", serialize = "exit")]
    Quit,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SetFullName(String),
    SetEmail(String),
    SetPhoneNumber(String),
    SetDateOfBirth(String),
    SetReferralType(ReferralType),
    Search(String),
    Submit,
    Delete,
    Reset,
    List,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("referral type must be one of 0-4, got '{0}'")]
    Referral(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    /// Field values keep everything after the verb verbatim, inner spaces
    /// included, so `phone 012 345 6789` sets the full number.
    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let word = word.trim_end();
        let rest = rest.trim_end_matches(['\r', '\n']);
        if word.is_empty() {
            return Err(ParseCommandError::Empty);
        }

        let verb = Verb::from_str(&word.to_lowercase())
            .map_err(|_| ParseCommandError::Unknown(word.to_string()))?;

        Ok(match verb {
            Verb::Name => Command::SetFullName(rest.to_string()),
            Verb::Email => Command::SetEmail(rest.to_string()),
            Verb::Phone => Command::SetPhoneNumber(rest.to_string()),
            Verb::Dob => Command::SetDateOfBirth(rest.trim().to_string()),
            Verb::Referral => {
                let code = rest.trim();
                code.parse::<u8>()
                    .ok()
                    .and_then(|c| ReferralType::try_from(c).ok())
                    .map(Command::SetReferralType)
                    .ok_or_else(|| ParseCommandError::Referral(code.to_string()))?
            }
            Verb::Search => Command::Search(rest.trim().to_string()),
            Verb::Submit => Command::Submit,
            Verb::Delete => Command::Delete,
            Verb::Reset => Command::Reset,
            Verb::List => Command::List,
            Verb::Show => Command::Show,
            Verb::Help => Command::Help,
            Verb::Quit => Command::Quit,
        })
    }
}

/// Read one line from stdin without blocking the async runtime.
/// `None` at end of input.
pub async fn read_line() -> Result<Option<String>> {
    let line = tokio::task::spawn_blocking(|| {
        let mut buf = String::new();
        let read = io::stdin().lock().read_line(&mut buf)?;
        Ok::<_, io::Error>((read > 0).then_some(buf))
    })
    .await
    .map_err(io::Error::other)??;

    Ok(line)
}

/// Asks on stdout and reads `y`/`yes` from stdin; anything else is "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }

        match read_line().await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(err) => {
                tracing::warn!(error = %err, "Could not read confirmation answer");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Applies one command to the form. Returns `false` when the session should end.
pub async fn apply(form: &mut UserForm, command: Command) -> bool {
    match command {
        Command::SetFullName(value) => form.draft_mut().full_name = value,
        Command::SetEmail(value) => form.draft_mut().email = value,
        Command::SetPhoneNumber(value) => form.draft_mut().phone_number = value,
        Command::SetDateOfBirth(value) => form.draft_mut().date_of_birth = value,
        Command::SetReferralType(kind) => form.draft_mut().referral_type = kind,
        Command::Search(query) => {
            form.set_search_query(query);
            match form.search().await {
                SearchOutcome::NotFound => println!("No user with that id."),
                SearchOutcome::Failed => println!("Search failed; see log."),
                SearchOutcome::Found | SearchOutcome::Cleared => {}
            }
        }
        Command::Submit => match form.submit().await {
            SubmitOutcome::Created => println!("User created."),
            SubmitOutcome::Updated => println!("User updated."),
            SubmitOutcome::Failed => println!("Save failed; your input was kept."),
            SubmitOutcome::Invalid => {}
        },
        Command::Delete => match form.delete().await {
            DeleteOutcome::Unavailable => println!("Search for a user before deleting."),
            DeleteOutcome::Deleted => println!("User deleted."),
            DeleteOutcome::Failed => println!("Delete failed; see log."),
            DeleteOutcome::Cancelled => {}
        },
        Command::Reset => form.reset(),
        Command::List => form.load_users().await,
        Command::Show => {}
        Command::Help => {
            println!("{}", HELP);
            return true;
        }
        Command::Quit => return false,
    }

    println!("\n{}", form.view());
    true
}

/// Read-apply-render loop until `quit` or end of input.
pub async fn run(form: &mut UserForm) -> Result<()> {
    form.load_users().await;
    println!("{}", form.view());
    println!("Type 'help' for commands.");

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = read_line().await? else {
            break;
        };

        match line.parse::<Command>() {
            Ok(command) => {
                if !apply(form, command).await {
                    break;
                }
            }
            Err(ParseCommandError::Empty) => {}
            Err(err) => println!("{}. Type 'help' for commands.", err),
        }
    }

    Ok(())
}
