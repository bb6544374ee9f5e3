//! User operations

use rusqlite::{params, OptionalExtension};
use tracing::info;

use super::Database;
use crate::error::Result;
use crate::models::User;

impl Database {
    /// Look up a user by their messaging-platform id
    pub fn find_user_by_telegram_id(&self, telegram_id: &str) -> Result<Option<User>> {
        let conn = self.conn()?;

        let user = conn
            .query_row(
                "SELECT id, telegram_id FROM users WHERE telegram_id = ?",
                params![telegram_id],
                |row| {
                    Ok(User {
                        id: row.get(0)?,
                        telegram_id: row.get(1)?,
                    })
                },
            )
            .optional()?;

        Ok(user)
    }

    /// Create a new user
    pub fn create_user(&self, telegram_id: &str) -> Result<User> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO users (telegram_id) VALUES (?)",
            params![telegram_id],
        )?;

        let user = User {
            id: conn.last_insert_rowid(),
            telegram_id: telegram_id.to_string(),
        };

        info!(user_id = user.id, telegram_id, "Created user");
        Ok(user)
    }

    /// Look up a user, creating them on first contact
    pub fn get_or_create_user(&self, telegram_id: &str) -> Result<User> {
        match self.find_user_by_telegram_id(telegram_id)? {
            Some(user) => Ok(user),
            None => self.create_user(telegram_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_missing_user() {
        let db = Database::in_memory().unwrap();
        assert!(db.find_user_by_telegram_id("123").unwrap().is_none());
    }

    #[test]
    fn test_create_and_find_user() {
        let db = Database::in_memory().unwrap();

        let created = db.create_user("123456789").unwrap();
        let found = db.find_user_by_telegram_id("123456789").unwrap().unwrap();

        assert_eq!(found.id, created.id);
        assert_eq!(found.telegram_id, "123456789");
    }

    #[test]
    fn test_duplicate_telegram_id_rejected() {
        let db = Database::in_memory().unwrap();
        db.create_user("42").unwrap();
        assert!(db.create_user("42").is_err());
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let db = Database::in_memory().unwrap();

        let first = db.get_or_create_user("987").unwrap();
        let second = db.get_or_create_user("987").unwrap();
        assert_eq!(first.id, second.id);
    }
}
