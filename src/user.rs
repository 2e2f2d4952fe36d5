use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::store::{self, Store};
use crate::types::{self, Id, Time};
use crate::{Error, Kind, Result};

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct User {
	pub id: Id,
	pub email: String,
	/// Opaque blob supplied by the caller; no hashing scheme is assumed here.
	pub password_hash: String,
	pub first_name: String,
	pub family_name: String,
	pub role: Role,
	pub is_active: bool,
	pub created_at: Time,
	pub last_login: Option<Time>,
}

impl User {
	pub fn display_name(&self) -> String {
		format!("{} {}", self.first_name, self.family_name)
	}
}

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Role {
	User,
	Admin,
}

impl Role {
	pub fn as_str(&self) -> &str {
		match self {
			Role::User => "user",
			Role::Admin => "admin",
		}
	}
}

pub struct NewUser<'a> {
	pub email: &'a str,
	pub password_hash: &'a str,
	pub first_name: &'a str,
	pub family_name: &'a str,
	pub role: Role,
}

pub enum UserKey<'a> {
	ID(&'a str),
	Email(&'a str),
}

/// Data store implementation for operating on users
pub struct Repo {
	store: Store,
}

impl Repo {
	pub fn new(store: Store) -> Self {
		Repo { store }
	}

	fn load(&self) -> Result<Vec<User>> {
		Ok(self.store.get_or(store::USERS, Vec::new())?)
	}

	fn save(&self, users: &[User]) -> Result<()> {
		Ok(self.store.set(store::USERS, &users)?)
	}

	/// Create a user. Emails are unique across the store, compared
	/// case-insensitively.
	pub fn create(&self, new_user: NewUser) -> Result<User> {
		let mut users = self.load()?;
		let email = new_user.email.trim();
		if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
			return Err(Error::new(Kind::EmailTaken));
		}

		let user = User {
			id: types::next_id(types::USER_PREFIX),
			email: email.to_string(),
			password_hash: new_user.password_hash.to_string(),
			first_name: new_user.first_name.to_string(),
			family_name: new_user.family_name.to_string(),
			role: new_user.role,
			is_active: true,
			created_at: Utc::now(),
			last_login: None,
		};

		users.push(user.clone());
		self.save(&users)?;
		Ok(user)
	}

	pub fn find(&self, key: UserKey) -> Result<User> {
		let users = self.load()?;
		let found = match key {
			UserKey::ID(id) => users.into_iter().find(|u| u.id == id),
			UserKey::Email(email) => {
				users.into_iter().find(|u| u.email.eq_ignore_ascii_case(email.trim()))
			}
		};
		found.ok_or_else(|| Error::new(Kind::UserNotFound))
	}

	pub fn list(&self) -> Result<Vec<User>> {
		self.load()
	}

	/// Replace the stored record matching `user.id`. The email-uniqueness
	/// invariant is re-checked against every other user.
	pub fn update(&self, user: &User) -> Result<User> {
		let mut users = self.load()?;
		let clash = users
			.iter()
			.any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email));
		if clash {
			return Err(Error::new(Kind::EmailTaken));
		}

		let slot = users
			.iter_mut()
			.find(|u| u.id == user.id)
			.ok_or_else(|| Error::new(Kind::UserNotFound))?;
		*slot = user.clone();
		self.save(&users)?;
		Ok(user.clone())
	}

	pub fn record_login(&self, user_id: &str) -> Result<User> {
		let mut user = self.find(UserKey::ID(user_id))?;
		user.last_login = Some(Utc::now());
		self.update(&user)
	}

	pub fn set_active(&self, user_id: &str, is_active: bool) -> Result<User> {
		let mut user = self.find(UserKey::ID(user_id))?;
		user.is_active = is_active;
		self.update(&user)
	}

	/// Remove the user row only; cascading over accounts and transactions
	/// is the bank service's job.
	pub fn delete(&self, user_id: &str) -> Result<()> {
		let mut users = self.load()?;
		let before = users.len();
		users.retain(|u| u.id != user_id);
		if users.len() == before {
			return Err(Error::new(Kind::UserNotFound));
		}
		self.save(&users)
	}

	// Session snapshot under the `currentUser` key. A denormalized copy,
	// not a reference into the users collection.

	pub fn set_current(&self, user: &User) -> Result<()> {
		Ok(self.store.set(store::CURRENT_USER, user)?)
	}

	pub fn current(&self) -> Result<Option<User>> {
		Ok(self.store.get(store::CURRENT_USER)?)
	}

	pub fn clear_current(&self) -> Result<()> {
		Ok(self.store.remove(store::CURRENT_USER)?)
	}
}
