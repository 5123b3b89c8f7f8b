//! User account operations: registration, login, profile edits and the
//! admin user-management surface.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, ShopError};
use crate::models::user::{scramble, User};
use crate::store::{self, next_id, RewriteAction, TableRecord};

/// The seeded administrator account that must never be removed.
pub const PRIMARY_ADMIN_ID: u32 = 1;

/// Register a new account. Usernames are unique across the table; the
/// password is scrambled before it is written.
pub fn register(config: &Config, username: &str, password: &str, email: &str) -> Result<User> {
    if username.trim().is_empty() {
        return Err(ShopError::EmptyField { field: "username" });
    }
    if password.is_empty() {
        return Err(ShopError::EmptyField { field: "password" });
    }
    if username_exists(config, username) {
        return Err(ShopError::UsernameTaken {
            username: username.to_string(),
        });
    }

    let user = User {
        id: next_id(&config.users_path, config.settings.ids.user_base),
        username: username.to_string(),
        password: scramble(password),
        email: email.to_string(),
        is_admin: false,
    };
    store::append_record(&config.users_path, &user)?;
    info!(id = user.id, username = %user.username, "user registered");
    Ok(user)
}

/// Log in by exact match of username and scrambled password. Unknown user
/// and wrong password are indistinguishable to the caller.
pub fn login(config: &Config, username: &str, password: &str) -> Result<User> {
    let scrambled = scramble(password);
    store::find_first(&config.users_path, |u: &User| {
        u.username == username && u.password == scrambled
    })
    .ok_or(ShopError::InvalidCredentials)
}

/// Point lookup by id.
#[must_use]
pub fn get_user(config: &Config, id: u32) -> Option<User> {
    store::find_first(&config.users_path, |u: &User| u.id == id)
}

/// Resolve a username to its id.
#[must_use]
pub fn find_user_id(config: &Config, username: &str) -> Option<u32> {
    store::find_first(&config.users_path, |u: &User| u.username == username).map(|u| u.id)
}

/// Email address for a user id.
#[must_use]
pub fn user_email(config: &Config, id: u32) -> Option<String> {
    get_user(config, id).map(|u| u.email)
}

fn username_exists(config: &Config, username: &str) -> bool {
    store::find_first(&config.users_path, |u: &User| u.username == username).is_some()
}

/// Every user, in file order.
#[must_use]
pub fn list_users(config: &Config) -> Vec<User> {
    store::scan_all(&config.users_path)
}

/// Update a user's username and/or email. Unset fields keep their stored
/// value; the password and admin flag are always preserved.
pub fn update_user(
    config: &Config,
    id: u32,
    new_username: Option<&str>,
    new_email: Option<&str>,
) -> Result<()> {
    if let Some(username) = new_username {
        if username.trim().is_empty() {
            return Err(ShopError::EmptyField { field: "username" });
        }
        if find_user_id(config, username).is_some_and(|existing| existing != id) {
            return Err(ShopError::UsernameTaken {
                username: username.to_string(),
            });
        }
    }

    let found = store::rewrite_where(&config.users_path, |line| match User::parse_line(line) {
        Ok(existing) if existing.id == id => {
            let updated = User {
                id: existing.id,
                username: new_username.map_or(existing.username, str::to_string),
                password: existing.password,
                email: new_email.map_or(existing.email, str::to_string),
                is_admin: existing.is_admin,
            };
            RewriteAction::Replace(updated.to_line())
        }
        _ => RewriteAction::Keep,
    })?;
    if !found {
        return Err(ShopError::UserNotFound { id });
    }
    debug!(id, "user updated");
    Ok(())
}

/// Remove a user. The primary admin can never be removed, and an admin
/// cannot remove their own account.
pub fn remove_user(config: &Config, id: u32, acting_user_id: u32) -> Result<()> {
    if id == PRIMARY_ADMIN_ID {
        return Err(ShopError::Validation(
            "cannot remove the primary admin account".to_string(),
        ));
    }
    if id == acting_user_id {
        return Err(ShopError::Validation(
            "cannot remove your own account".to_string(),
        ));
    }

    let found = store::rewrite_where(&config.users_path, |line| match User::parse_line(line) {
        Ok(existing) if existing.id == id => RewriteAction::Drop,
        _ => RewriteAction::Keep,
    })?;
    if !found {
        return Err(ShopError::UserNotFound { id });
    }
    info!(id, "user removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(tmp: &TempDir) -> Config {
        Config::new(tmp.path().join("data"))
    }

    #[test]
    fn register_then_login() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let user = register(&config, "alice", "hunter2", "alice@example.com").unwrap();
        assert_eq!(user.id, 1);
        assert!(!user.is_admin);

        let logged_in = login(&config, "alice", "hunter2").unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[test]
    fn login_rejects_wrong_password_and_unknown_user() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        register(&config, "alice", "hunter2", "alice@example.com").unwrap();

        assert!(matches!(
            login(&config, "alice", "wrong"),
            Err(ShopError::InvalidCredentials)
        ));
        assert!(matches!(
            login(&config, "nobody", "hunter2"),
            Err(ShopError::InvalidCredentials)
        ));
    }

    #[test]
    fn passwords_are_stored_scrambled() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        register(&config, "alice", "hunter2", "alice@example.com").unwrap();
        let table = std::fs::read_to_string(&config.users_path).unwrap();
        assert!(!table.contains("hunter2"));
        assert!(table.contains(&scramble("hunter2")));
    }

    #[test]
    fn duplicate_username_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        register(&config, "alice", "pw", "a@example.com").unwrap();
        assert!(matches!(
            register(&config, "alice", "pw2", "b@example.com"),
            Err(ShopError::UsernameTaken { .. })
        ));
    }

    #[test]
    fn update_preserves_password_and_admin_flag() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let user = register(&config, "alice", "hunter2", "alice@example.com").unwrap();

        update_user(&config, user.id, Some("alicia"), None).unwrap();
        let updated = get_user(&config, user.id).unwrap();
        assert_eq!(updated.username, "alicia");
        assert_eq!(updated.email, "alice@example.com");

        // Still able to log in with the original password.
        assert!(login(&config, "alicia", "hunter2").is_ok());
    }

    #[test]
    fn update_rejects_taken_username() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        register(&config, "alice", "pw", "a@example.com").unwrap();
        let bob = register(&config, "bob", "pw", "b@example.com").unwrap();
        assert!(matches!(
            update_user(&config, bob.id, Some("alice"), None),
            Err(ShopError::UsernameTaken { .. })
        ));
        // Renaming to your own current name is fine.
        assert!(update_user(&config, bob.id, Some("bob"), None).is_ok());
    }

    #[test]
    fn remove_user_guards() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let admin = register(&config, "root", "pw", "root@example.com").unwrap();
        let bob = register(&config, "bob", "pw", "b@example.com").unwrap();
        assert_eq!(admin.id, PRIMARY_ADMIN_ID);

        // Primary admin is protected, even from themselves.
        assert!(remove_user(&config, PRIMARY_ADMIN_ID, bob.id).is_err());
        // Self-removal is rejected.
        assert!(remove_user(&config, bob.id, bob.id).is_err());
        // A different admin can remove bob.
        remove_user(&config, bob.id, admin.id).unwrap();
        assert!(get_user(&config, bob.id).is_none());
    }

    #[test]
    fn lookups() {
        let tmp = TempDir::new().unwrap();
        let config = test_config(&tmp);
        let user = register(&config, "alice", "pw", "alice@example.com").unwrap();
        assert_eq!(find_user_id(&config, "alice"), Some(user.id));
        assert_eq!(find_user_id(&config, "nobody"), None);
        assert_eq!(
            user_email(&config, user.id).as_deref(),
            Some("alice@example.com")
        );
        assert_eq!(list_users(&config).len(), 1);
    }
}
