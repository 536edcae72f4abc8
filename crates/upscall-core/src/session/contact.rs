//! Visitor contact details captured by the email gate.

use serde::{Deserialize, Serialize};

/// The visitor's email and the display name derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub name: String,
}

impl Contact {
    pub fn from_email(email: impl Into<String>) -> Self {
        let email = email.into();
        let name = derive_user_name(&email);
        Self { email, name }
    }
}

/// Derives a display name from the local part of an email address.
///
/// `.` and `_` become spaces and the first character of every word is
/// upper-cased: `"jane.doe@x.com"` gives `"Jane Doe"`. A word starts at any
/// ASCII letter or digit not preceded by one. Input without `@` is used whole.
pub fn derive_user_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();

    let mut name = String::with_capacity(local.len());
    let mut in_word = false;
    for c in local.chars() {
        let c = if c == '.' || c == '_' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric();
        if is_word && !in_word {
            name.push(c.to_ascii_uppercase());
        } else {
            name.push(c);
        }
        in_word = is_word;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        assert_eq!(derive_user_name("john@x.com"), "John");
    }

    #[test]
    fn test_dots_and_underscores_split_words() {
        assert_eq!(derive_user_name("jane.doe@x.com"), "Jane Doe");
        assert_eq!(derive_user_name("alex.w@acme.com"), "Alex W");
        assert_eq!(derive_user_name("mary_ann.lee@x.com"), "Mary Ann Lee");
    }

    #[test]
    fn test_rest_of_word_is_left_alone() {
        assert_eq!(derive_user_name("mcDONALD@x.com"), "McDONALD");
        assert_eq!(derive_user_name("o'neil@x.com"), "O'Neil");
        assert_eq!(derive_user_name("bob-smith@x.com"), "Bob-Smith");
    }

    #[test]
    fn test_without_at_sign() {
        assert_eq!(derive_user_name("sam.jones"), "Sam Jones");
    }

    #[test]
    fn test_contact_keeps_email() {
        let contact = Contact::from_email("kim@studio.io");
        assert_eq!(contact.email, "kim@studio.io");
        assert_eq!(contact.name, "Kim");
    }
}
