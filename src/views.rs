//! HTML pages.
//!
//! Each page is a small form rendered into a shared layout. Anything that
//! came from a user or the identity provider goes through [`escape`].

use axum::response::Html;

fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 40rem; margin: 2rem auto; text-align: center; }}
form {{ display: flex; flex-direction: column; gap: 0.5rem; }}
.error {{ color: #b00020; }}
img {{ max-width: 100%; max-height: 60vh; }}
</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

fn error_block(error: Option<&str>) -> String {
    match error {
        Some(message) => format!(r#"<p class="error">{}</p>"#, escape(message)),
        None => String::new(),
    }
}

pub fn signup(error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{error}
<form method="post" action="/signup">
<input type="email" name="username" placeholder="Email" required>
<input type="password" name="password" placeholder="Password" required>
<button type="submit">Sign up</button>
</form>
<p><a href="/login">Already have an account? Log in</a></p>"#,
        error = error_block(error),
    );
    layout("Sign up", &body)
}

pub fn login(error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{error}
<form method="post" action="/login">
<input type="email" name="username" placeholder="Email" required>
<input type="password" name="password" placeholder="Password" required>
<button type="submit">Log in</button>
</form>
<p><a href="/signup">Sign up</a> | <a href="/reset_password">Forgot password?</a></p>"#,
        error = error_block(error),
    );
    layout("Log in", &body)
}

pub fn reset_password(error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"{error}
<form method="post" action="/reset_password">
<input type="email" name="username" placeholder="Email" required>
<button type="submit">Send reset email</button>
</form>
<p><a href="/login">Back to login</a></p>"#,
        error = error_block(error),
    );
    layout("Reset password", &body)
}

pub fn password_reset_sent() -> Html<String> {
    layout(
        "Check your email",
        r#"<p>If an account exists for that address, a password reset link is on its way.</p>
<p><a href="/login">Back to login</a></p>"#,
    )
}

/// New-password form. Posts back to the same URL so the token in the query
/// string comes along.
pub fn complete_password_reset(token: &str) -> Html<String> {
    let body = format!(
        r#"<form method="post" action="/complete_password_reset?token={token}">
<input type="password" name="new_password" placeholder="New password" required>
<button type="submit">Set new password</button>
</form>"#,
        token = escape(&url_encode(token)),
    );
    layout("Choose a new password", &body)
}

pub fn cat_vote(image_url: &str, username: &str) -> Html<String> {
    let body = format!(
        r#"<p>Logged in as {username} | <a href="/logout">Log out</a></p>
<img src="{image_url}" alt="A cat">
<div>
<button onclick="vote('1')">Cute</button>
<button onclick="vote('')">Very Cute</button>
</div>
<script>
function vote(cute) {{
  fetch("/", {{
    method: "POST",
    headers: {{ "Content-Type": "application/x-www-form-urlencoded" }},
    body: cute ? "cute=" + encodeURIComponent(cute) : ""
  }}).then(function () {{ window.location.reload(); }});
}}
</script>"#,
        username = escape(username),
        image_url = escape(image_url),
    );
    layout("Is this cat cute?", &body)
}

/// Escape text for use in HTML element content and quoted attributes
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a path segment or query value
pub fn url_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
