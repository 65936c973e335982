use std::fs;
use std::io;
use std::path::Path;

use consult_client::NativeClient;

pub const SESSION_FILE: &str = ".consult_session";

pub fn parse_session_content(raw: &str) -> Option<String> {
    let cookies = raw.trim().to_string();
    if cookies.is_empty() {
        return None;
    }
    Some(cookies)
}

pub fn load_session() -> io::Result<Option<String>> {
    if !Path::new(SESSION_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(SESSION_FILE)?;
    Ok(parse_session_content(&raw))
}

/// Сохраняет cookies, выданные сервером при входе. `false`, если их не было.
pub fn persist_session(client: &NativeClient) -> anyhow::Result<bool> {
    let cookies = client
        .transport()
        .session_cookies(client.origin().as_str())?;
    match cookies {
        Some(cookies) => {
            fs::write(SESSION_FILE, cookies)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

pub fn clear_session() -> io::Result<bool> {
    match fs::remove_file(SESSION_FILE) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_session_content_trims_whitespace() {
        let cookies = parse_session_content("  sid=abc; theme=dark \n");
        assert_eq!(cookies.as_deref(), Some("sid=abc; theme=dark"));
    }

    #[test]
    fn parse_session_content_rejects_blank() {
        assert!(parse_session_content("   ").is_none());
    }
}
