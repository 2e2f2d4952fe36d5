use chrono::{DateTime, Utc};
use rand::Rng;

pub type Id = String;
pub type Time = DateTime<Utc>;

pub const USER_PREFIX: &str = "usr";
pub const ACCOUNT_PREFIX: &str = "acc";
pub const TRANSACTION_PREFIX: &str = "txn";

/// Generate an opaque entity id: type prefix, millisecond timestamp,
/// short random suffix. Unique enough within a single session.
pub fn next_id(prefix: &str) -> Id {
	let millis = Utc::now().timestamp_millis();
	let suffix: u32 = rand::thread_rng().gen_range(0..0x1000000);
	format!("{}_{}_{:06x}", prefix, millis, suffix)
}

pub fn is_account_id(s: &str) -> bool {
	s.starts_with("acc_")
}

/// Opaque display reference carried on every transaction record.
pub fn reference_code() -> String {
	const CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ0123456789";
	let mut rng = rand::thread_rng();
	let code: String = (0..10)
		.map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
		.collect();
	format!("TX-{}", code)
}
