use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub type Result<T> = std::result::Result<T, Error>;

/// Namespaced keys for the persisted collections.
pub const USERS: &str = "users";
pub const ACCOUNTS: &str = "accounts";
pub const TRANSACTIONS: &str = "transactions";
pub const CURRENT_USER: &str = "currentUser";

/// Error that can occur when reading or writing the key-value store
#[derive(Debug, PartialEq)]
pub enum Error {
	Serde(String),
	Io(String),
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Error::Serde(e) => write!(f, "encoding stored value: {}", e),
			Error::Io(e) => write!(f, "persisting store: {}", e),
		}
	}
}

impl From<serde_json::Error> for Error {
	fn from(e: serde_json::Error) -> Self {
		Error::Serde(e.to_string())
	}
}

impl From<std::io::Error> for Error {
	fn from(e: std::io::Error) -> Self {
		Error::Io(e.to_string())
	}
}

/// Where the JSON entries actually live. The core never talks to a backend
/// directly; it goes through a `Store` handle.
trait Backend: Send {
	fn read(&self, key: &str) -> Option<Value>;
	fn write(&mut self, key: &str, value: Value) -> Result<()>;
	fn remove(&mut self, key: &str) -> Result<()>;
	fn dump(&self) -> HashMap<String, Value>;
	fn restore(&mut self, entries: HashMap<String, Value>) -> Result<()>;
}

#[derive(Default)]
struct MemoryBackend {
	entries: HashMap<String, Value>,
}

impl Backend for MemoryBackend {
	fn read(&self, key: &str) -> Option<Value> {
		self.entries.get(key).cloned()
	}

	fn write(&mut self, key: &str, value: Value) -> Result<()> {
		self.entries.insert(key.to_string(), value);
		Ok(())
	}

	fn remove(&mut self, key: &str) -> Result<()> {
		self.entries.remove(key);
		Ok(())
	}

	fn dump(&self) -> HashMap<String, Value> {
		self.entries.clone()
	}

	fn restore(&mut self, entries: HashMap<String, Value>) -> Result<()> {
		self.entries = entries;
		Ok(())
	}
}

/// Write-through JSON file backend. The whole entry map is rewritten on
/// every mutation, matching the read-all/write-all discipline of the
/// in-memory collections themselves.
struct FileBackend {
	path: PathBuf,
	entries: HashMap<String, Value>,
}

impl FileBackend {
	fn open(path: PathBuf) -> Result<Self> {
		let entries = if path.exists() {
			let raw = fs::read_to_string(&path)?;
			serde_json::from_str(&raw)?
		} else {
			HashMap::new()
		};
		Ok(FileBackend { path, entries })
	}

	fn persist(&self) -> Result<()> {
		let raw = serde_json::to_string_pretty(&self.entries)?;
		fs::write(&self.path, raw)?;
		log::debug!("store persisted to {}", self.path.display());
		Ok(())
	}
}

impl Backend for FileBackend {
	fn read(&self, key: &str) -> Option<Value> {
		self.entries.get(key).cloned()
	}

	fn write(&mut self, key: &str, value: Value) -> Result<()> {
		self.entries.insert(key.to_string(), value);
		self.persist()
	}

	fn remove(&mut self, key: &str) -> Result<()> {
		self.entries.remove(key);
		self.persist()
	}

	fn dump(&self) -> HashMap<String, Value> {
		self.entries.clone()
	}

	fn restore(&mut self, entries: HashMap<String, Value>) -> Result<()> {
		self.entries = entries;
		self.persist()
	}
}

/// Cloneable handle to the key-value store. Repos hold their own clone,
/// all of which share one backend.
#[derive(Clone)]
pub struct Store {
	backend: Arc<Mutex<Box<dyn Backend>>>,
}

impl Store {
	pub fn in_memory() -> Store {
		Store::with_backend(Box::new(MemoryBackend::default()))
	}

	/// Open a JSON-file-backed store, creating the file on first write.
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Store> {
		let backend = FileBackend::open(path.as_ref().to_path_buf())?;
		Ok(Store::with_backend(Box::new(backend)))
	}

	fn with_backend(backend: Box<dyn Backend>) -> Store {
		Store { backend: Arc::new(Mutex::new(backend)) }
	}

	fn lock(&self) -> std::sync::MutexGuard<'_, Box<dyn Backend>> {
		self.backend.lock().unwrap_or_else(PoisonError::into_inner)
	}

	pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
		match self.lock().read(key) {
			Some(value) => Ok(Some(serde_json::from_value(value)?)),
			None => Ok(None),
		}
	}

	pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
		Ok(self.get(key)?.unwrap_or(default))
	}

	pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
		let value = serde_json::to_value(value)?;
		self.lock().write(key, value)
	}

	pub fn remove(&self, key: &str) -> Result<()> {
		self.lock().remove(key)
	}

	/// Run `f` with all-or-nothing semantics: the full entry map is
	/// snapshotted first and restored if `f` fails, so a fault partway
	/// through a multi-write sequence leaves no partial state behind.
	/// The caller always sees `f`'s own error, even if the rollback
	/// itself faults. No cross-process guarantee; the snapshot covers
	/// this handle only.
	pub fn unit_of_work<T, E, F>(&self, f: F) -> std::result::Result<T, E>
	where
		F: FnOnce() -> std::result::Result<T, E>,
	{
		let snapshot = self.lock().dump();
		match f() {
			Ok(v) => Ok(v),
			Err(e) => {
				if let Err(restore_err) = self.lock().restore(snapshot) {
					log::error!("rollback failed after aborted unit of work: {}", restore_err);
				}
				Err(e)
			}
		}
	}
}
