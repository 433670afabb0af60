// Validation
pub const MAX_FILE_SIZE_BYTES: usize = 10_000_000; // ~10 MB
pub const MAX_FILE_NAME_CHARACTERS: usize = 100;

// Photos
pub const PHOTO_ROUTE_PREFIX: &str = "/contacts/image/";
pub const DEFAULT_PHOTO_EXTENSION: &str = ".png";

// Paths
pub const PHOTOS_FOLDER: &str = "photos";
pub const CONTACTS_FOLDER: &str = "contacts";
pub const CONTACTS_FILE_NAME: &str = "contacts.json";
