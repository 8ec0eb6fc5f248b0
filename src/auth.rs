//-----------------------------------------------------
// AUTHENTICATION
//-----------------------------------------------------

use rand::Rng;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;
use warp::http::HeaderMap;
use warp::Rejection;

pub const API_KEY_HEADER: &str = "X-API-Key";

// Custom error type for API key validation failures
#[derive(Debug)]
pub struct ApiKeyError;
impl warp::reject::Reject for ApiKeyError {}

/// Read the API key from `path`, creating a random one if the file is missing
pub fn get_or_create_api_key(path: &Path) -> std::io::Result<String> {
    if let Ok(api_key) = fs::read_to_string(path) {
        return Ok(api_key.trim().to_string());
    }

    let api_key: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    let mut file = fs::File::create(path)?;
    file.write_all(api_key.as_bytes())?;
    info!(path = %path.display(), "generated new API key");
    Ok(api_key)
}

// Check if the API key is valid
pub async fn check_api_key(headers: HeaderMap, our_api_key: String) -> Result<(), Rejection> {
    match headers.get(API_KEY_HEADER) {
        Some(key) if key.to_str().map(|s| s == our_api_key).unwrap_or(false) => Ok(()),
        _ => Err(warp::reject::custom(ApiKeyError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp::http::HeaderValue;

    fn temp_key_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("zpool_agent_{}_{}", tag, std::process::id()))
    }

    #[test]
    fn test_api_key_is_created_then_reused() {
        let path = temp_key_path("create");
        let _ = fs::remove_file(&path);

        let first = get_or_create_api_key(&path).unwrap();
        assert_eq!(first.len(), 32);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));

        let second = get_or_create_api_key(&path).unwrap();
        assert_eq!(first, second);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_existing_key_is_trimmed() {
        let path = temp_key_path("trim");
        fs::write(&path, "secret\n").unwrap();
        assert_eq!(get_or_create_api_key(&path).unwrap(), "secret");
        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_check_api_key() {
        let mut headers = HeaderMap::new();
        assert!(check_api_key(headers.clone(), "secret".into()).await.is_err());

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("wrong"));
        assert!(check_api_key(headers.clone(), "secret".into()).await.is_err());

        headers.insert(API_KEY_HEADER, HeaderValue::from_static("secret"));
        assert!(check_api_key(headers, "secret".into()).await.is_ok());
    }
}
