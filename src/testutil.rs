pub use bigdecimal::BigDecimal;

use crate::account::{Account, AccountType, NewAccount};
use crate::user::{NewUser, Role, User};
use crate::{account, store::Store, transaction, user};

pub struct Fixture {
	pub store: Store,
	pub user_factory: UserFactory,
	pub account_factory: AccountFactory,
}

impl Fixture {
	pub fn new() -> Self {
		let store = Store::in_memory();
		let user_factory = UserFactory::new(store.clone());
		let account_factory = AccountFactory::new(store.clone());
		Fixture {
			store,
			user_factory,
			account_factory,
		}
	}

	pub fn store(&self) -> Store {
		self.store.clone()
	}
}

pub struct Suite {
	pub user_repo: user::Repo,
	pub account_repo: account::Repo,
	pub transaction_repo: transaction::Repo,
}

impl Suite {
	pub fn setup(store: Store) -> Self {
		Suite {
			user_repo: user::Repo::new(store.clone()),
			account_repo: account::Repo::new(store.clone()),
			transaction_repo: transaction::Repo::new(store),
		}
	}
}

pub struct UserFactory {
	store: Store,
}

impl<'a> UserFactory {
	fn new(store: Store) -> Self {
		UserFactory { store }
	}

	pub fn defaults() -> NewUser<'a> {
		NewUser {
			email: "default@example.com",
			password_hash: "x",
			first_name: "Default",
			family_name: "Default",
			role: Role::User,
		}
	}

	pub fn user(&self, new_user: NewUser) -> User {
		user::Repo::new(self.store.clone()).create(new_user).unwrap()
	}

	pub fn bob(&self) -> User {
		self.user(NewUser {
			email: "bob@example.com",
			first_name: "Bob",
			family_name: "Roberts",
			..UserFactory::defaults()
		})
	}

	pub fn lucy(&self) -> User {
		self.user(NewUser {
			email: "lucy@example.com",
			first_name: "Lucy",
			family_name: "Luke",
			..UserFactory::defaults()
		})
	}
}

pub struct AccountFactory {
	store: Store,
}

impl AccountFactory {
	pub fn new(store: Store) -> Self {
		AccountFactory { store }
	}

	pub fn checking_account(&self, user_id: &str, balance: u32) -> Account {
		account::Repo::new(self.store.clone())
			.create(NewAccount {
				user_id: user_id.to_string(),
				account_type: AccountType::Checking,
				initial_balance: BigDecimal::from(balance),
			})
			.unwrap()
	}
}

#[test]
fn test_fixture_setup() {
	let fixture = Fixture::new();
	let _suite = Suite::setup(fixture.store());

	let bob = fixture.user_factory.bob();
	let checking = fixture.account_factory.checking_account(&bob.id, 1000);
	assert_eq!(checking.user_id, bob.id);
}
