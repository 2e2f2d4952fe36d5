pub use bigdecimal::BigDecimal;

pub use bank_sim::*;
use bank_sim::{account, transaction, user};

pub struct TestUsers {}

impl<'a> TestUsers {
	pub const EMAIL_BOB: &'a str = "bob@example.com";
	pub const EMAIL_LUCY: &'a str = "lucy@example.com";
}

pub struct Suite {
	pub store: Store,
	pub user_repo: user::Repo,
	pub account_repo: account::Repo,
	pub transaction_repo: transaction::Repo,
}

impl Suite {
	pub fn setup() -> Self {
		let store = Store::in_memory();
		Suite {
			user_repo: user::Repo::new(store.clone()),
			account_repo: account::Repo::new(store.clone()),
			transaction_repo: transaction::Repo::new(store.clone()),
			store,
		}
	}

	pub fn bank(&self) -> BankService<'_> {
		BankService::new(NewBankService {
			store: self.store.clone(),
			user_repo: &self.user_repo,
			account_repo: &self.account_repo,
			transaction_repo: &self.transaction_repo,
		})
	}

	pub fn create_user(&self, email: &str, first_name: &str, family_name: &str) -> User {
		self.user_repo
			.create(NewUser {
				email,
				password_hash: "x",
				first_name,
				family_name,
				role: Role::User,
			})
			.unwrap()
	}

	pub fn bob(&self) -> User {
		self.create_user(TestUsers::EMAIL_BOB, "Bob", "Roberts")
	}

	pub fn lucy(&self) -> User {
		self.create_user(TestUsers::EMAIL_LUCY, "Lucy", "Luke")
	}

	pub fn create_account(&self, user: &User, balance: u32) -> Account {
		self.account_repo
			.create(NewAccount {
				user_id: user.id.clone(),
				account_type: AccountType::Checking,
				initial_balance: BigDecimal::from(balance),
			})
			.unwrap()
	}

	pub fn create_user_and_account(&self, balance: u32) -> (User, Account) {
		let user = self.bob();
		let account = self.create_account(&user, balance);
		(user, account)
	}
}
