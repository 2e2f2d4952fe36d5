use std::env;

use bigdecimal::BigDecimal;
use log::info;

use bank_sim::account;
use bank_sim::fee;
use bank_sim::money;
use bank_sim::transaction;
use bank_sim::user::{self, NewUser, Role};
use bank_sim::{BankService, NewBankService, Store};

/// Demo entry point: seed an in-memory store, register two users and move
/// some money around. `BANK_SIM_STORE=<path>` persists to a JSON file.
fn main() -> bank_sim::Result<()> {
	if env::var("RUST_LOG").is_err() {
		env::set_var("RUST_LOG", "debug");
	}
	pretty_env_logger::init();

	let store = match env::var("BANK_SIM_STORE") {
		Ok(path) => Store::open(path)?,
		Err(_) => Store::in_memory(),
	};

	let user_repo = user::Repo::new(store.clone());
	let account_repo = account::Repo::new(store.clone());
	let transaction_repo = transaction::Repo::new(store.clone());
	let bank = BankService::new(NewBankService {
		store: store.clone(),
		user_repo: &user_repo,
		account_repo: &account_repo,
		transaction_repo: &transaction_repo,
	});

	let (alice, alice_accounts) = bank.register(NewUser {
		email: "alice@example.com",
		password_hash: "not-a-real-hash",
		first_name: "Alice",
		family_name: "Archer",
		role: Role::User,
	})?;
	let (bob, bob_accounts) = bank.register(NewUser {
		email: "bob@example.com",
		password_hash: "not-a-real-hash",
		first_name: "Bob",
		family_name: "Roberts",
		role: Role::User,
	})?;

	let alice_checking = &alice_accounts[0];
	let bob_checking = &bob_accounts[0];

	user_repo.record_login(&alice.id)?;
	user_repo.set_current(&alice)?;

	let amount = BigDecimal::from(200);
	info!(
		"external transfer fee for {} would be {}",
		money::usd(&amount),
		money::usd(&fee::estimate(fee::Route::External, &amount)),
	);

	// External transfer: Bob is addressed by IBAN.
	let receipt = bank.transfer(&alice_checking.id, &bob_checking.iban, &amount, Some("rent"))?;
	info!(
		"{} sent {} to {} (ref {})",
		alice.display_name(),
		money::usd(&receipt.debit.amount),
		bob.display_name(),
		receipt.debit.reference,
	);
	info!(
		"balances now: alice {} / bob {}",
		money::usd(&receipt.source_balance),
		money::usd(&receipt.destination_balance),
	);

	for t in bank.history(&alice.id, Some(5))? {
		info!(
			"{} {} {} - {}",
			t.timestamp, t.transaction_type, money::usd(&t.amount), t.description
		);
	}

	Ok(())
}
