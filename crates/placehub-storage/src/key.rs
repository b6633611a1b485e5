//! Object key and filename rules.
//!
//! Keys are `{folder}/{filename}` or just `{filename}`. Generated
//! filenames are `{unix_millis}_{6 base36 chars}.{ext}`, which keeps
//! listings roughly chronological.

use chrono::Utc;
use rand::Rng;

use crate::error::StorageError;

/// Extension used when none can be determined.
pub const FALLBACK_EXTENSION: &str = "jpg";

/// Length of the random suffix in generated filenames.
const RANDOM_SUFFIX_LEN: usize = 6;

/// Build the object key for `filename` inside an optional folder.
///
/// Leading and trailing slashes on the folder are ignored; an empty
/// folder means the bucket root.
pub fn object_key(folder: Option<&str>, filename: &str) -> String {
    match folder.map(|f| f.trim_matches('/')).filter(|f| !f.is_empty()) {
        Some(folder) => format!("{folder}/{filename}"),
        None => filename.to_owned(),
    }
}

/// Prefix used to list a folder, or `None` for the bucket root.
pub fn list_prefix(folder: &str) -> Option<String> {
    let folder = folder.trim_matches('/');
    (!folder.is_empty()).then(|| format!("{folder}/"))
}

/// Last path segment of a key.
pub fn file_name_of(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

/// Reject keys that cannot name an object.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.trim().is_empty() {
        return Err(StorageError::InvalidKey(String::from("empty key")));
    }
    if key.ends_with('/') {
        return Err(StorageError::InvalidKey(format!("{key} names a folder")));
    }
    Ok(())
}

/// Extension of an uploaded file's original name.
///
/// A name without a dot (or ending in one) yields [`FALLBACK_EXTENSION`]
/// instead of the whole name, so `"photo"` becomes `{stem}.jpg` rather
/// than `{stem}.photo`.
pub fn extension_from_name(name: &str) -> &str {
    name.rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty() && !ext.contains('/'))
        .unwrap_or(FALLBACK_EXTENSION)
}

/// Extension matching an image content type.
pub fn extension_for_content_type(content_type: &str) -> &'static str {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match mime.as_str() {
        "image/png" => "png",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => FALLBACK_EXTENSION,
    }
}

/// Generate a fresh, practically unique filename with extension `ext`.
pub fn generate_filename(ext: &str) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..RANDOM_SUFFIX_LEN)
        .filter_map(|_| char::from_digit(rng.random_range(0..36_u32), 36))
        .collect();

    format!("{}_{suffix}.{ext}", Utc::now().timestamp_millis())
}
