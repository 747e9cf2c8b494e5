mod clock;
mod env;
mod file_store;
#[cfg(all(feature = "native-store", any(target_os = "macos", target_os = "ios")))]
mod keychain_store;
#[cfg(all(feature = "native-store", any(target_os = "linux", target_os = "windows")))]
mod keyring_store;
#[cfg(not(target_os = "android"))]
mod machine_id;
mod memory_store;

pub use clock::*;
pub use env::*;
pub use file_store::*;
#[cfg(all(feature = "native-store", any(target_os = "macos", target_os = "ios")))]
pub use keychain_store::*;
#[cfg(all(feature = "native-store", any(target_os = "linux", target_os = "windows")))]
pub use keyring_store::*;
#[cfg(not(target_os = "android"))]
pub use machine_id::*;
pub use memory_store::*;
