use super::item::Item;
use super::user::User;
use crate::schema::*;
use diesel::{
    deserialize::{self, FromSql, FromSqlRow},
    prelude::*,
    serialize::{self, IsNull, Output, ToSql},
    sql_types::Text,
    sqlite::Sqlite,
    AsExpression,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The only two accepted values, matched case-sensitively.
#[derive(Debug, Serialize, Deserialize, AsExpression, Clone, Copy, FromSqlRow, PartialEq)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "UPPERCASE")]
pub enum FeedbackType {
    Like,
    Dislike,
}

impl FeedbackType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackType::Like => "LIKE",
            FeedbackType::Dislike => "DISLIKE",
        }
    }
}

impl fmt::Display for FeedbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FeedbackType {
    type Err = FeedbackTableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LIKE" => Ok(FeedbackType::Like),
            "DISLIKE" => Ok(FeedbackType::Dislike),
            _ => Err(FeedbackTableError::InvalidFeedbackType),
        }
    }
}

impl FromSql<Text, Sqlite> for FeedbackType {
    fn from_sql(bytes: <Sqlite as diesel::backend::Backend>::RawValue<'_>) -> deserialize::Result<Self> {
        let value = <String as FromSql<Text, Sqlite>>::from_sql(bytes)?;
        value
            .parse()
            .map_err(|_| "Unrecognized feedback type".into())
    }
}

impl ToSql<Text, Sqlite> for FeedbackType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Sqlite>) -> serialize::Result {
        out.set_value(self.as_str().to_string());
        Ok(IsNull::No)
    }
}

#[derive(Debug, Serialize, Deserialize, Queryable, Identifiable, Associations)]
#[diesel(belongs_to(User))]
#[diesel(belongs_to(Item))]
#[diesel(table_name = user_feedback)]
pub struct Feedback {
    pub id: i32,
    pub user_id: i32,
    pub item_id: i32,
    pub feedback_type: FeedbackType,
}

#[derive(Debug, Serialize, Deserialize, Insertable)]
#[diesel(table_name = user_feedback)]
pub struct NewFeedback {
    pub user_id: i32,
    pub item_id: i32,
    pub feedback_type: FeedbackType,
}

#[derive(Debug, Error)]
pub enum FeedbackTableError {
    #[error("feedback_type must be LIKE or DISLIKE")]
    InvalidFeedbackType,
    #[error("Feedback not found")]
    FeedbackNotFound,
    #[error("Caller is not the author of this feedback")]
    NotAuthor,
    #[error("Item not found")]
    ItemNotFound,
    #[error("Database error")]
    DatabaseError,
}

impl Feedback {
    /// Repeated submissions by the same user for the same item all persist.
    pub fn submit(
        conn: &mut SqliteConnection,
        caller_id: i32,
        fb_item_id: i32,
        fb_type: FeedbackType,
    ) -> Result<Feedback, FeedbackTableError> {
        use crate::schema::user_feedback::dsl::*;

        if Item::get(conn, fb_item_id).is_none() {
            return Err(FeedbackTableError::ItemNotFound);
        }

        let new_feedback = NewFeedback {
            user_id: caller_id,
            item_id: fb_item_id,
            feedback_type: fb_type,
        };

        match diesel::insert_into(user_feedback)
            .values(&new_feedback)
            .get_result(conn)
        {
            Ok(feedback) => Ok(feedback),
            Err(err) => {
                log::error!("Failed to insert feedback: {:?}", err);
                Err(FeedbackTableError::DatabaseError)
            }
        }
    }

    pub fn get_for_item(
        conn: &mut SqliteConnection,
        fb_item_id: i32,
    ) -> Result<Vec<Feedback>, FeedbackTableError> {
        use crate::schema::user_feedback::dsl::*;
        user_feedback
            .filter(item_id.eq(fb_item_id))
            .load::<Feedback>(conn)
            .map_err(|err| {
                log::error!("Failed to get feedback: {:?}", err);
                FeedbackTableError::DatabaseError
            })
    }

    pub fn delete(
        conn: &mut SqliteConnection,
        feedback_id: i32,
        caller_id: i32,
    ) -> Result<(), FeedbackTableError> {
        use crate::schema::user_feedback::dsl::*;

        let feedback = user_feedback
            .find(feedback_id)
            .first::<Feedback>(conn)
            .optional()
            .map_err(|err| {
                log::error!("Failed to look up feedback: {:?}", err);
                FeedbackTableError::DatabaseError
            })?
            .ok_or(FeedbackTableError::FeedbackNotFound)?;

        if feedback.user_id != caller_id {
            log::warn!(
                "User {} is not authorized to delete feedback {}",
                caller_id,
                feedback_id
            );
            return Err(FeedbackTableError::NotAuthor);
        }

        diesel::delete(user_feedback.find(feedback_id))
            .execute(conn)
            .map_err(|err| {
                log::error!("Failed to delete feedback: {:?}", err);
                FeedbackTableError::DatabaseError
            })?;
        Ok(())
    }
}
