use axum::http::{header::InvalidHeaderValue, HeaderValue};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const SESSION_MAX_AGE: u32 = 60 * 60 * 8;

pub fn cookie(name: &str, value: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = if secure { " Secure;" } else { "" };
    HeaderValue::from_str(&format!(
        "{name}={value}; HttpOnly; Max-Age={SESSION_MAX_AGE};{secure} Path=/; SameSite=Strict"
    ))
}

pub fn clear_cookie(name: &str, secure: bool) -> Result<HeaderValue, InvalidHeaderValue> {
    let secure = if secure { " Secure;" } else { "" };
    HeaderValue::from_str(&format!(
        "{name}=; HttpOnly; Max-Age=0;{secure} Path=/; SameSite=Strict"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secure_flag_is_optional() {
        let plain = cookie("user_session", "abc", false).unwrap();
        assert!(!plain.to_str().unwrap().contains("Secure"));

        let secure = cookie("user_session", "abc", true).unwrap();
        assert!(secure.to_str().unwrap().contains("Secure;"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cleared = clear_cookie("lang", false).unwrap();
        assert!(cleared.to_str().unwrap().starts_with("lang=; HttpOnly; Max-Age=0;"));
    }
}
