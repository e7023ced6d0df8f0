pub mod firestore;
pub mod kitsu;

pub use firestore::FirestoreClient;
pub use kitsu::KitsuClient;
