//! Expense operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{Expense, NewExpense};

impl Database {
    /// Insert an expense and return the stored row
    pub fn create_expense(&self, new: &NewExpense) -> Result<Expense> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO expenses (user_id, description, amount, category)
            VALUES (?, ?, ?, ?)
            "#,
            params![
                new.user_id,
                new.description,
                new.amount,
                new.category.as_str(),
            ],
        )?;

        let id = conn.last_insert_rowid();

        let expense = conn.query_row(
            "SELECT id, user_id, description, amount, category, added_at FROM expenses WHERE id = ?",
            params![id],
            expense_from_row,
        )?;

        Ok(expense)
    }

    /// List a user's expenses, most recent first
    pub fn list_expenses(&self, user_id: i64, limit: i64, offset: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, description, amount, category, added_at
            FROM expenses
            WHERE user_id = ?
            ORDER BY added_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )?;

        let rows = stmt.query_map(params![user_id, limit, offset], expense_from_row)?;

        let mut expenses = Vec::new();
        for row in rows {
            expenses.push(row?);
        }
        Ok(expenses)
    }
}

/// Map a database row into an Expense, rejecting unknown category labels
fn expense_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Expense> {
    let category: String = row.get(4)?;
    let category = category.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(
            4,
            rusqlite::types::Type::Text,
            Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e)),
        )
    })?;

    let added_at: String = row.get(5)?;

    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        description: row.get(2)?,
        amount: row.get(3)?,
        category,
        added_at: parse_datetime(&added_at),
    })
}
