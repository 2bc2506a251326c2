//! Read-only snapshot of the form for rendering.

use chrono::{DateTime, Utc};
use std::fmt::{self, Write};

use crate::{
    models::{ReferralType, User},
    validation::DATE_INPUT_FORMAT,
};

/// One row of the user table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    /// Localized date, empty when the record has none
    pub date_of_birth: String,
    pub referral_type: &'static str,
}

impl UserRow {
    pub fn from_user(user: &User, date_format: &str) -> Self {
        Self {
            id: user.id.to_string(),
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            date_of_birth: user
                .date_of_birth
                .map(|dob| format_date(dob, date_format))
                .unwrap_or_default(),
            referral_type: user.referral_type.label(),
        }
    }
}

/// Format with a configured chrono pattern, falling back to `yyyy-mm-dd`
/// when the pattern is not valid.
fn format_date(date: DateTime<Utc>, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        return date.format(DATE_INPUT_FORMAT).to_string();
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub full_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub referral_type: ReferralType,
    pub error_message: Option<String>,
    /// `Submit` while creating, `Update` while editing
    pub submit_label: &'static str,
    pub show_delete: bool,
    pub search_query: String,
    pub rows: Vec<UserRow>,
}

const HEADERS: [&str; 6] = [
    "Id",
    "Name",
    "Email",
    "Phone Number",
    "Date of Birth",
    "Referral Type",
];

impl FormView {
    /// Text table of all rows, columns padded to their widest cell.
    pub fn table(&self) -> String {
        let cells: Vec<[&str; 6]> = self
            .rows
            .iter()
            .map(|row| {
                [
                    row.id.as_str(),
                    row.full_name.as_str(),
                    row.email.as_str(),
                    row.phone_number.as_str(),
                    row.date_of_birth.as_str(),
                    row.referral_type,
                ]
            })
            .collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_line(&mut out, &HEADERS, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let rule: Vec<&str> = rule.iter().map(String::as_str).collect();
        push_line(&mut out, &rule, &widths);
        for row in &cells {
            push_line(&mut out, row, &widths);
        }
        out
    }
}

fn push_line(out: &mut String, cells: &[&str], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

impl fmt::Display for FormView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Full Name     : {}", self.full_name)?;
        writeln!(f, "Email         : {}", self.email)?;
        writeln!(f, "Phone Number  : {}", self.phone_number)?;
        writeln!(f, "Date of Birth : {}", self.date_of_birth)?;
        let options: Vec<String> = ReferralType::options()
            .map(|(code, label)| {
                if code == self.referral_type.code() {
                    format!("[{}] {}*", code, label)
                } else {
                    format!("[{}] {}", code, label)
                }
            })
            .collect();
        writeln!(f, "Referral Type : {}", options.join("  "))?;
        if let Some(message) = &self.error_message {
            writeln!(f, "! {}", message)?;
        }
        if self.show_delete {
            writeln!(f, "<{}>  <Delete>", self.submit_label)?;
        } else {
            writeln!(f, "<{}>", self.submit_label)?;
        }
        writeln!(f)?;
        writeln!(f, "List of Users (search: {})", self.search_query)?;
        write!(f, "{}", self.table())
    }
}
