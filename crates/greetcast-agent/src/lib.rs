//! User-Agent classification for the greeting payload.
//!
//! Pure string parsing, no I/O. Unrecognized input never fails; every field
//! falls back to `"Other"`.

use serde::Serialize;

/// Structured fields parsed from a User-Agent header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientSignature {
    /// Operating system family, with version where the header carries one.
    pub os: String,
    /// Browser product and version.
    pub browser: String,
    /// Device family: `iPhone`, `iPad`, `Android`, `Spider`, or `Other`.
    pub device: String,
}

/// Parse a raw User-Agent string into its structured fields.
pub fn parse(user_agent: &str) -> ClientSignature {
    ClientSignature {
        os: detect_os(user_agent),
        browser: detect_browser(user_agent),
        device: detect_device(user_agent),
    }
}

/// The token following `marker`, up to the next space, semicolon, or
/// closing parenthesis.
fn token_after<'a>(user_agent: &'a str, marker: &str) -> Option<&'a str> {
    let start = user_agent.find(marker)? + marker.len();
    let rest = &user_agent[start..];
    let end = rest
        .find(|c: char| c == ' ' || c == ';' || c == ')')
        .unwrap_or(rest.len());
    let token = &rest[..end];
    (!token.is_empty()).then_some(token)
}

fn detect_os(user_agent: &str) -> String {
    if user_agent.contains("Windows NT 10.0") {
        "Windows 10".to_string()
    } else if user_agent.contains("Windows NT 6.3") {
        "Windows 8.1".to_string()
    } else if user_agent.contains("Windows NT 6.2") {
        "Windows 8".to_string()
    } else if user_agent.contains("Windows NT 6.1") {
        "Windows 7".to_string()
    } else if user_agent.contains("Windows") {
        "Windows".to_string()
    } else if user_agent.contains("iPhone OS") || user_agent.contains("CPU OS") {
        // "iPhone OS 17_5 like Mac OS X" / iPad "CPU OS 17_5 like Mac OS X"
        match token_after(user_agent, "OS ") {
            Some(version) => format!("iOS {}", version.replace('_', ".")),
            None => "iOS".to_string(),
        }
    } else if user_agent.contains("Mac OS X") {
        match token_after(user_agent, "Mac OS X ") {
            Some(version) => format!("macOS {}", version.replace('_', ".")),
            None => "macOS".to_string(),
        }
    } else if user_agent.contains("CrOS") {
        "Chrome OS".to_string()
    } else if user_agent.contains("Android") {
        match token_after(user_agent, "Android ") {
            Some(version) => format!("Android {}", version),
            None => "Android".to_string(),
        }
    } else if user_agent.contains("Linux") {
        "Linux".to_string()
    } else {
        "Other".to_string()
    }
}

fn detect_browser(user_agent: &str) -> String {
    // Chromium derivatives embed a Chrome token, and everything embeds
    // Safari; order decides.
    let products = [
        ("Edg/", "Edge"),
        ("Edge/", "Edge"),
        ("OPR/", "Opera"),
        ("Opera/", "Opera"),
        ("Firefox/", "Firefox"),
        ("FxiOS/", "Firefox"),
        ("CriOS/", "Chrome"),
        ("Chrome/", "Chrome"),
    ];

    for (marker, name) in products {
        if let Some(version) = token_after(user_agent, marker) {
            return format!("{} {}", name, version);
        }
    }

    if user_agent.contains("Safari/") {
        return match token_after(user_agent, "Version/") {
            Some(version) => format!("Safari {}", version),
            None => "Safari".to_string(),
        };
    }

    "Other".to_string()
}

fn detect_device(user_agent: &str) -> String {
    let lower = user_agent.to_lowercase();
    if lower.contains("bot") || lower.contains("crawler") || lower.contains("spider") {
        "Spider".to_string()
    } else if user_agent.contains("iPhone") {
        "iPhone".to_string()
    } else if user_agent.contains("iPad") {
        "iPad".to_string()
    } else if user_agent.contains("Android") {
        "Android".to_string()
    } else {
        "Other".to_string()
    }
}
