use std::collections::HashSet;

use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::{
    model::user::{RegisterUserDto, RegisteredUserDto, SetPasswordDto, UserDto},
    server::{
        data::user::{subscription::SubscriptionRepository, UserRepository},
        error::{resource::ResourceError, validation::ValidationError, Error},
        model::{
            pagination::{Page, PageRequest},
            recipe::user_dto,
            user::{registered_user_dto, NewUser},
        },
        util::password::{hash_password, verify_password},
    },
};

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_NAME_LENGTH: usize = 150;

/// Service for user accounts and profiles.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    /// Creates a new instance of [`UserService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a new user account.
    ///
    /// The email is stored lowercase and the password is hashed with Argon2 before anything is
    /// written.
    ///
    /// # Returns
    /// - `Ok(RegisteredUserDto)` - The created account
    /// - `Err(Error::ValidationError)` - A field is invalid or the email/username is taken
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn register(&self, payload: RegisterUserDto) -> Result<RegisteredUserDto, Error> {
        let new_user = validate_registration(payload)?;

        let user_repo = UserRepository::new(self.db);

        if user_repo.find_by_email(&new_user.email).await?.is_some() {
            return Err(ValidationError::EmailTaken.into());
        }
        if user_repo
            .find_by_username(&new_user.username)
            .await?
            .is_some()
        {
            return Err(ValidationError::UsernameTaken.into());
        }

        let user = match user_repo.create(new_user).await {
            Ok(user) => user,
            // Lost a race against a concurrent registration with the same email or username
            Err(err) if is_unique_violation(&err) => {
                return Err(ValidationError::EmailTaken.into())
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(user_id = user.id, "Registered new user");

        Ok(registered_user_dto(user))
    }

    /// Retrieves a profile as seen by `viewer_id`.
    ///
    /// # Returns
    /// - `Ok(UserDto)` - Profile with `is_subscribed` set when the viewer follows the user
    /// - `Err(Error::ResourceError(ResourceError::NotFound))` - No such user
    /// - `Err(Error::DbErr)` - Database operation failed
    pub async fn get_profile(
        &self,
        viewer_id: Option<i32>,
        user_id: i32,
    ) -> Result<UserDto, Error> {
        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.get(user_id).await? else {
            return Err(ResourceError::user_not_found(user_id).into());
        };

        let is_subscribed = match viewer_id {
            Some(viewer_id) => SubscriptionRepository::new(self.db)
                .exists(viewer_id, user_id)
                .await?,
            None => false,
        };

        Ok(user_dto(user, is_subscribed))
    }

    pub async fn list_users(
        &self,
        viewer_id: Option<i32>,
        page: PageRequest,
    ) -> Result<Page<UserDto>, Error> {
        let page = UserRepository::new(self.db)
            .get_page(page)
            .await?
            .ensure_exists()?;

        let following: HashSet<i32> = match viewer_id {
            Some(viewer_id) => {
                let ids: Vec<i32> = page.items.iter().map(|u| u.id).collect();
                SubscriptionRepository::new(self.db)
                    .following_ids_among(viewer_id, &ids)
                    .await?
                    .into_iter()
                    .collect()
            }
            None => HashSet::new(),
        };

        Ok(page.map(|user| {
            let is_subscribed = following.contains(&user.id);
            user_dto(user, is_subscribed)
        }))
    }

    /// Changes the password of a user after checking the current one.
    ///
    /// # Returns
    /// - `Ok(())` - Password replaced
    /// - `Err(Error::ValidationError(ValidationError::IncorrectPassword))` - Wrong current password
    /// - `Err(Error::ResourceError)` - User does not exist
    pub async fn set_password(&self, user_id: i32, payload: SetPasswordDto) -> Result<(), Error> {
        if payload.new_password.is_empty() {
            return Err(ValidationError::MissingField("new_password").into());
        }

        let user_repo = UserRepository::new(self.db);

        let Some(user) = user_repo.get(user_id).await? else {
            return Err(ResourceError::user_not_found(user_id).into());
        };

        if !verify_password(&payload.current_password, &user.password_hash) {
            return Err(ValidationError::IncorrectPassword.into());
        }

        let password_hash = hash_password(&payload.new_password)?;
        user_repo.update_password(user.id, password_hash).await?;

        tracing::info!(user_id = user.id, "Password changed");

        Ok(())
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

fn validate_registration(payload: RegisterUserDto) -> Result<NewUser, Error> {
    let email = payload.email.trim().to_lowercase();
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email || email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidField {
            field: "email",
            reason: "enter a valid email address".to_string(),
        }
        .into());
    }

    let username = payload.username.trim().to_string();
    let valid_username = username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-'));
    if !valid_username {
        return Err(ValidationError::InvalidField {
            field: "username",
            reason: "letters, digits and @/./+/-/_ only".to_string(),
        }
        .into());
    }

    let username = required_name("username", username)?;
    let first_name = required_name("first_name", payload.first_name.trim().to_string())?;
    let last_name = required_name("last_name", payload.last_name.trim().to_string())?;

    if payload.password.is_empty() {
        return Err(ValidationError::MissingField("password").into());
    }
    let password_hash = hash_password(&payload.password)?;

    Ok(NewUser {
        email,
        username,
        first_name,
        last_name,
        password_hash,
    })
}

fn required_name(field: &'static str, value: String) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::InvalidField {
            field,
            reason: format!("at most {} characters", MAX_NAME_LENGTH),
        });
    }

    Ok(value)
}
