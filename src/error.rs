use std::error;
use std::fmt;

use crate::store;

pub type Result<T> = std::result::Result<T, Error>;

/// An error that can occur in this crate
#[derive(Debug, PartialEq)]
pub struct Error {
	kind: Kind,
}

impl Error {
	pub fn new(kind: Kind) -> Error {
		Error { kind }
	}

	pub fn kind(&self) -> &Kind {
		&self.kind
	}
}

/// The kind of an error that can occur.
#[derive(Debug, PartialEq)]
pub enum Kind {
	Store(store::Error),
	UserNotFound,
	EmailTaken,
	AccountNotFound,
	InsufficientFunds,
	InvalidAmount,
	RecipientNotFound,
	RecipientInactive,
	SameAccountTransfer,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match &self.kind {
			Kind::Store(e) => write!(f, "store error: {}", e),
			Kind::UserNotFound => write!(f, "user does not exist"),
			Kind::EmailTaken => write!(f, "email is already registered"),
			Kind::AccountNotFound => write!(f, "account does not exist"),
			Kind::InsufficientFunds => write!(f, "not enough funds in account"),
			Kind::InvalidAmount => write!(f, "amount must be positive"),
			Kind::RecipientNotFound => write!(f, "recipient account not found"),
			Kind::RecipientInactive => write!(f, "recipient account is inactive"),
			Kind::SameAccountTransfer => write!(f, "source and destination are the same account"),
		}
	}
}

impl error::Error for Error {}

impl From<store::Error> for Error {
	fn from(e: store::Error) -> Self {
		Error::new(Kind::Store(e))
	}
}
