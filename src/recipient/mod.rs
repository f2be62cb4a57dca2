use std::fmt::{Display, Formatter};

use derive_getters::Getters;

use crate::recipient::error::RowRejection;

pub mod error;
pub mod load;

/// Name and email are guaranteed non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Recipient {
    name: String,
    email: String,
    group: Option<String>,
}

impl Recipient {
    pub fn try_new(name: &str, email: &str, group: Option<&str>) -> Result<Self, RowRejection> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(RowRejection::EmptyName);
        }
        if email.is_empty() {
            return Err(RowRejection::EmptyEmail);
        }
        let group = group
            .map(str::trim)
            .filter(|group| !group.is_empty())
            .map(str::to_owned);

        Ok(Self {
            name: name.to_owned(),
            email: email.to_owned(),
            group,
        })
    }

    pub fn group_key(&self) -> Option<&str> {
        self.group.as_deref()
    }
}

impl Display for Recipient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
