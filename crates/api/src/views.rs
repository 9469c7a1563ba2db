//! Minimal server-rendered HTML pages.
//!
//! Every user-controlled string goes through [`escape`] before it is
//! interpolated.

use axum::response::Html;
use signup_core::credentials::MAX_USERNAME_LENGTH;

/// Login form, also served as the home page.
pub fn login_page(messages: &[String]) -> Html<String> {
    let form = credentials_form("/login", "Log in");
    let body = format!(
        "<h1>Log in</h1>\n{form}\n<p>No account? <a href=\"/signup\">Sign up</a></p>"
    );
    layout("Log in", messages, &body)
}

pub fn signup_page(messages: &[String]) -> Html<String> {
    let form = credentials_form("/signup", "Sign up");
    let body = format!(
        "<h1>Sign up</h1>\n{form}\n<p>Already registered? <a href=\"/login\">Log in</a></p>"
    );
    layout("Sign up", messages, &body)
}

pub fn dashboard_page(username: &str, messages: &[String]) -> Html<String> {
    let body = format!(
        "<h1>Dashboard</h1>\n<p>Hello, {}!</p>\n<p><a href=\"/logout\">Log out</a></p>",
        escape(username)
    );
    layout("Dashboard", messages, &body)
}

fn credentials_form(action: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">\n\
         <label>Username <input name=\"username\" maxlength=\"{MAX_USERNAME_LENGTH}\" required></label>\n\
         <label>Password <input name=\"password\" type=\"password\" required></label>\n\
         <button type=\"submit\">{submit}</button>\n\
         </form>"
    )
}

fn layout(title: &str, messages: &[String], body: &str) -> Html<String> {
    let flashes = if messages.is_empty() {
        String::new()
    } else {
        let items: String = messages
            .iter()
            .map(|m| format!("<li>{}</li>", escape(m)))
            .collect();
        format!("<ul class=\"flashes\">{items}</ul>\n")
    };

    Html(format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n{flashes}{body}\n</body>\n</html>\n"
    ))
}

/// Escape text for safe inclusion in HTML element content and attributes.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#x27;x&#x27;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn dashboard_escapes_username() {
        let Html(page) = dashboard_page("<b>eve</b>", &[]);
        assert!(page.contains("Hello, &lt;b&gt;eve&lt;/b&gt;!"));
        assert!(!page.contains("<b>eve</b>"));
    }

    #[test]
    fn flashes_are_listed() {
        let Html(page) = login_page(&["Please log in first".to_string()]);
        assert!(page.contains("<li>Please log in first</li>"));
        assert!(page.contains("action=\"/login\""));
    }

    #[test]
    fn no_flash_list_without_messages() {
        let Html(page) = signup_page(&[]);
        assert!(!page.contains("class=\"flashes\""));
        assert!(page.contains("action=\"/signup\""));
    }
}
