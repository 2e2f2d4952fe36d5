use std::str::FromStr;

use bigdecimal::BigDecimal;
use log::{debug, info};

use crate::account::{self, Account, AccountType, NewAccount};
use crate::iban;
use crate::store::Store;
use crate::transaction::{self, NewTransaction, Transaction, Type};
use crate::user::{self, NewUser, User, UserKey};
use crate::{Error, Kind, Result};

/// Registration seeds two accounts per user.
const OPENING_CHECKING: &str = "1000.00";
const OPENING_SAVINGS: &str = "500.00";

pub struct NewBankService<'a> {
	pub store: Store,
	pub user_repo: &'a user::Repo,
	pub account_repo: &'a account::Repo,
	pub transaction_repo: &'a transaction::Repo,
}

/// Service for performing banking operations. Owns no state beyond a store
/// handle; every mutation goes through the repos inside one unit of work.
pub struct BankService<'a> {
	store: Store,
	user_repo: &'a user::Repo,
	account_repo: &'a account::Repo,
	transaction_repo: &'a transaction::Repo,
}

/// Everything a successful transfer produces: both ledger legs and both
/// post-transfer balances.
#[derive(PartialEq, Debug)]
pub struct TransferReceipt {
	pub debit: Transaction,
	pub credit: Transaction,
	pub source_balance: BigDecimal,
	pub destination_balance: BigDecimal,
}

impl<'a> BankService<'a> {
	pub fn new(n: NewBankService<'a>) -> Self {
		BankService {
			store: n.store,
			user_repo: n.user_repo,
			account_repo: n.account_repo,
			transaction_repo: n.transaction_repo,
		}
	}

	/// Register a user and auto-provision their checking and savings
	/// accounts, all in one unit of work.
	pub fn register(&self, new_user: NewUser) -> Result<(User, Vec<Account>)> {
		self.store.unit_of_work(|| {
			let user = self.user_repo.create(new_user)?;

			let checking = self.account_repo.create(NewAccount {
				user_id: user.id.clone(),
				account_type: AccountType::Checking,
				initial_balance: opening(OPENING_CHECKING),
			})?;
			let savings = self.account_repo.create(NewAccount {
				user_id: user.id.clone(),
				account_type: AccountType::Savings,
				initial_balance: opening(OPENING_SAVINGS),
			})?;

			info!("registered user {} with accounts {}, {}", user.id, checking.id, savings.id);
			Ok((user, vec![checking, savings]))
		})
	}

	/// Ad hoc account creation (admin tooling). The owner must exist;
	/// nothing at the storage layer enforces that relation.
	pub fn open_account(
		&self,
		user_id: &str,
		account_type: AccountType,
		initial_balance: BigDecimal,
	) -> Result<Account> {
		let owner = self.user_repo.find(UserKey::ID(user_id))?;
		self.account_repo.create(NewAccount {
			user_id: owner.id,
			account_type,
			initial_balance,
		})
	}

	pub fn deposit(
		&self,
		account_id: &str,
		amount: &BigDecimal,
		description: Option<&str>,
	) -> Result<(Account, Transaction)> {
		self.store.unit_of_work(|| {
			let account = self.account_repo.deposit(account_id, amount)?;
			let record = self.transaction_repo.create(NewTransaction {
				account_id,
				transaction_type: Type::Deposit,
				amount,
				description: description.unwrap_or("Deposit").to_string(),
				category: "deposit",
				counterparty_iban: None,
				counterparty_name: None,
				recipient_account_id: None,
			})?;
			debug!("deposit {} into {}", amount, account_id);
			Ok((account, record))
		})
	}

	pub fn withdraw(
		&self,
		account_id: &str,
		amount: &BigDecimal,
		description: Option<&str>,
	) -> Result<(Account, Transaction)> {
		self.store.unit_of_work(|| {
			let account = self.account_repo.withdraw(account_id, amount)?;
			let record = self.transaction_repo.create(NewTransaction {
				account_id,
				transaction_type: Type::Withdrawal,
				amount,
				description: description.unwrap_or("Withdrawal").to_string(),
				category: "withdrawal",
				counterparty_iban: None,
				counterparty_name: None,
				recipient_account_id: None,
			})?;
			debug!("withdraw {} from {}", amount, account_id);
			Ok((account, record))
		})
	}

	/// Execute a transfer. `destination` is either an internal account id
	/// or an external IBAN. Checks run in a fixed order and the first
	/// failure wins; no state changes before every check has passed, and
	/// the mutation phase is one unit of work.
	pub fn transfer(
		&self,
		source_account_id: &str,
		destination: &str,
		amount: &BigDecimal,
		description: Option<&str>,
	) -> Result<TransferReceipt> {
		let source = self
			.account_repo
			.lookup(source_account_id)?
			.ok_or_else(|| Error::new(Kind::AccountNotFound))?;

		// The overdraft_protection flag is deliberately not consulted.
		if source.balance.lt(amount) {
			return Err(Error::new(Kind::InsufficientFunds));
		}

		let destination = self.resolve_destination(destination)?;
		if !destination.is_active {
			return Err(Error::new(Kind::RecipientInactive));
		}
		if destination.id == source.id {
			return Err(Error::new(Kind::SameAccountTransfer));
		}

		let source_owner = self.user_repo.find(UserKey::ID(&source.user_id))?;
		let destination_owner = self.user_repo.find(UserKey::ID(&destination.user_id))?;

		self.store.unit_of_work(|| {
			let source = self.account_repo.withdraw(&source.id, amount)?;
			let destination_after = self.account_repo.deposit(&destination.id, amount)?;

			let debit = self.transaction_repo.create(NewTransaction {
				account_id: &source.id,
				transaction_type: Type::Transfer,
				amount,
				description: description
					.map(str::to_string)
					.unwrap_or_else(|| format!("Transfer to {}", iban::mask(&destination.iban))),
				category: "transfer",
				counterparty_iban: Some(destination.iban.clone()),
				counterparty_name: Some(destination_owner.display_name()),
				recipient_account_id: Some(destination.id.clone()),
			})?;

			let credit = self.transaction_repo.create(NewTransaction {
				account_id: &destination.id,
				transaction_type: Type::Deposit,
				amount,
				description: description
					.map(str::to_string)
					.unwrap_or_else(|| format!("Transfer from {}", iban::mask(&source.iban))),
				category: "transfer",
				counterparty_iban: Some(source.iban.clone()),
				counterparty_name: Some(source_owner.display_name()),
				recipient_account_id: None,
			})?;

			info!(
				"transferred {} from {} to {}",
				amount, source.id, destination_after.id
			);

			Ok(TransferReceipt {
				debit,
				credit,
				source_balance: source.balance,
				destination_balance: destination_after.balance,
			})
		})
	}

	fn resolve_destination(&self, destination: &str) -> Result<Account> {
		let found = if crate::types::is_account_id(destination) {
			self.account_repo.lookup(destination)?
		} else if iban::is_valid(destination) {
			self.account_repo.lookup_by_iban(destination)?
		} else {
			None
		};
		found.ok_or_else(|| Error::new(Kind::RecipientNotFound))
	}

	/// History joined across all of a user's active accounts, newest first.
	pub fn history(&self, user_id: &str, limit: Option<usize>) -> Result<Vec<Transaction>> {
		let account_ids: Vec<String> = self
			.account_repo
			.find_by_owner(user_id)?
			.into_iter()
			.map(|a| a.id)
			.collect();
		self.transaction_repo.find_by_accounts(&account_ids, limit)
	}

	/// Admin cascade delete: the user's transactions, then accounts, then
	/// the user row, all in one unit of work.
	pub fn delete_user(&self, user_id: &str) -> Result<()> {
		self.store.unit_of_work(|| {
			let account_ids = self.account_repo.delete_by_user(user_id)?;
			self.transaction_repo.delete_by_accounts(&account_ids)?;
			self.user_repo.delete(user_id)?;
			info!("deleted user {} and {} owned accounts", user_id, account_ids.len());
			Ok(())
		})
	}
}

fn opening(amount: &str) -> BigDecimal {
	// Literal constants above; parsing cannot fail.
	BigDecimal::from_str(amount).unwrap_or_default()
}
