//! User repository for managing user database operations.

use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use time::OffsetDateTime;
use uuid::Uuid;

use super::Pagination;
use crate::models::{NewUser, UpdateUser, User};
use crate::{PgError, PgResult, schema};

/// Repository for user-related database operations.
///
/// Rows are inserted and updated "as-is": normalization (trimming,
/// lowercasing) and password hashing happen before values reach this layer.
/// Duplicate usernames and email addresses surface as unique-constraint
/// violations on the returned [`PgError`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UserRepository;

impl UserRepository {
    /// Creates a new user in the database.
    pub async fn create_user(conn: &mut AsyncPgConnection, new_user: NewUser) -> PgResult<User> {
        use schema::users;

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(conn)
            .await
            .map_err(PgError::from)
    }

    /// Finds a user by its ID.
    pub async fn find_user_by_id(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::id.eq(user_id))
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Finds a user by its username.
    pub async fn find_user_by_username(
        conn: &mut AsyncPgConnection,
        username: &str,
    ) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        users::table
            .filter(dsl::username.eq(username.to_lowercase()))
            .select(User::as_select())
            .first(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Updates a user by ID, returning the updated row.
    ///
    /// Returns `None` if no user with the given ID exists.
    pub async fn update_user(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        updates: UpdateUser,
    ) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        diesel::update(users::table.filter(dsl::id.eq(user_id)))
            .set(&updates)
            .returning(User::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Deletes a user by ID, returning the deleted row.
    ///
    /// Returns `None` if no user with the given ID exists.
    pub async fn delete_user(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
    ) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        diesel::delete(users::table.filter(dsl::id.eq(user_id)))
            .returning(User::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Records a successful password verification.
    pub async fn record_login(
        conn: &mut AsyncPgConnection,
        user_id: Uuid,
        at: OffsetDateTime,
    ) -> PgResult<Option<User>> {
        use schema::users::{self, dsl};

        diesel::update(users::table.filter(dsl::id.eq(user_id)))
            .set(dsl::last_login_at.eq(Some(at)))
            .returning(User::as_returning())
            .get_result(conn)
            .await
            .optional()
            .map_err(PgError::from)
    }

    /// Lists users ordered by registration date, newest first.
    pub async fn list_users(
        conn: &mut AsyncPgConnection,
        pagination: Pagination,
    ) -> PgResult<Vec<User>> {
        use schema::users::{self, dsl};

        users::table
            .order(dsl::joined_at.desc())
            .limit(pagination.limit)
            .offset(pagination.offset)
            .select(User::as_select())
            .load(conn)
            .await
            .map_err(PgError::from)
    }
}
