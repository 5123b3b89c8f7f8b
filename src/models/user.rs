use serde::Serialize;

use crate::error::Result;
use crate::store::{self, TableRecord};

/// One row of the users table.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    /// The scrambled password as stored on disk. Never serialized into
    /// command output.
    #[serde(skip_serializing)]
    pub password: String,
    pub email: String,
    pub is_admin: bool,
}

/// Scramble a password for storage.
///
/// Character substitution shifted by 3 over `a-z`, `A-Z` and `0-9`
/// independently; everything else passes through. Reversible and not
/// cryptographic - the users table format and the exact-equality login
/// compare are a compatibility surface, so this must not change shape.
#[must_use]
pub fn scramble(plain: &str) -> String {
    plain.chars().map(shift).collect()
}

fn shift(c: char) -> char {
    match c {
        'a'..='z' => (b'a' + (c as u8 - b'a' + 3) % 26) as char,
        'A'..='Z' => (b'A' + (c as u8 - b'A' + 3) % 26) as char,
        '0'..='9' => (b'0' + (c as u8 - b'0' + 3) % 10) as char,
        _ => c,
    }
}

impl TableRecord for User {
    const TABLE: &'static str = "users";

    fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        Ok(Self {
            id: store::req_u32(&fields, 0, Self::TABLE)?,
            username: store::opt_str(&fields, 1),
            password: store::opt_str(&fields, 2),
            email: store::opt_str(&fields, 3),
            is_admin: fields.get(4).map(|s| s.trim()) == Some("1"),
        })
    }

    fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.id,
            self.username,
            self.password,
            self.email,
            u8::from(self.is_admin)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scramble_shifts_letters_and_digits() {
        assert_eq!(scramble("abc"), "def");
        assert_eq!(scramble("XYZ"), "ABC");
        assert_eq!(scramble("789"), "012");
        assert_eq!(scramble("p@ss1"), "s@vv4");
    }

    #[test]
    fn scramble_is_deterministic() {
        assert_eq!(scramble("hunter2"), scramble("hunter2"));
        assert_ne!(scramble("hunter2"), "hunter2");
    }

    #[test]
    fn round_trip_preserves_fields() {
        let user = User {
            id: 7,
            username: "alice".into(),
            password: scramble("secret"),
            email: "alice@example.com".into(),
            is_admin: false,
        };
        let back = User::parse_line(&user.to_line()).unwrap();
        assert_eq!(back.id, 7);
        assert_eq!(back.username, "alice");
        assert_eq!(back.password, scramble("secret"));
        assert_eq!(back.email, "alice@example.com");
        assert!(!back.is_admin);
    }

    #[test]
    fn admin_flag_parses_from_one() {
        let admin = User::parse_line("1,root,xyz,root@example.com,1").unwrap();
        assert!(admin.is_admin);
        let plain = User::parse_line("2,bob,xyz,bob@example.com,0").unwrap();
        assert!(!plain.is_admin);
        // Anything that is not "1" means non-admin.
        let odd = User::parse_line("3,eve,xyz,eve@example.com,admin").unwrap();
        assert!(!odd.is_admin);
    }

    #[test]
    fn password_is_not_serialized() {
        let user = User {
            id: 7,
            username: "alice".into(),
            password: "scrambled".into(),
            email: "alice@example.com".into(),
            is_admin: false,
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("scrambled"));
        assert!(!json.contains("password"));
    }
}
