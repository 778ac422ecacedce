//! HTML pages served to the browser
//!
//! The login page posts the identity token as JSON to `/login`; the chat page
//! posts `message` as a form field to `/chat` and renders the reply or image.

use crate::domain::entities::{Message, MessageRole};

/// Escape text for inclusion in HTML element content or attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Login page
#[mutants::skip] // Static markup, exercised by router tests
pub fn login_page() -> String {
    r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="utf-8">
    <title>Chatbridge - Login</title>
</head>
<body style="font-family: Arial, sans-serif; max-width: 480px; margin: 40px auto; color: #333;">
    <h2>Chatbridge</h2>
    <p>Sign in with your identity provider, then submit the issued ID token.</p>
    <form id="login-form">
        <textarea id="token" rows="6" style="width: 100%;" placeholder="ID token"></textarea>
        <button type="submit">Login</button>
    </form>
    <p id="login-error" style="color: #c00;"></p>
    <script>
        document.getElementById('login-form').addEventListener('submit', async (event) => {
            event.preventDefault();
            const token = document.getElementById('token').value.trim();
            const response = await fetch('/login', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ token }),
            });
            const data = await response.json();
            if (data.success) {
                window.location.href = data.redirect;
            } else {
                document.getElementById('login-error').textContent = data.message;
            }
        });
    </script>
</body>
</html>
"#
    .to_string()
}

fn render_message(message: &Message) -> String {
    let (class, label) = match message.role {
        MessageRole::User => ("user", "You"),
        MessageRole::Assistant => ("assistant", "Assistant"),
    };
    format!(
        r#"<div class="message {class}"><strong>{label}:</strong> {content}</div>"#,
        class = class,
        label = label,
        content = escape_html(&message.content)
    )
}

/// Chat page seeded with the user's stored history
pub fn chat_page(user_id: &str, history: &[Message]) -> String {
    let messages = history
        .iter()
        .map(render_message)
        .collect::<Vec<_>>()
        .join("\n        ");

    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="utf-8">
    <title>Chatbridge</title>
</head>
<body style="font-family: Arial, sans-serif; max-width: 720px; margin: 40px auto; color: #333;">
    <div style="display: flex; justify-content: space-between; align-items: center;">
        <h2>Chatbridge</h2>
        <form method="post" action="/logout">
            <span style="color: #666; font-size: 12px;">{user_id}</span>
            <button type="submit">Logout</button>
        </form>
    </div>
    <div id="messages">
        {messages}
    </div>
    <form id="chat-form">
        <input id="message" name="message" autocomplete="off" style="width: 80%;">
        <button type="submit">Send</button>
    </form>
    <script>
        const messages = document.getElementById('messages');
        function append(label, text) {{
            const div = document.createElement('div');
            const strong = document.createElement('strong');
            strong.textContent = label + ': ';
            div.appendChild(strong);
            div.appendChild(document.createTextNode(text));
            messages.appendChild(div);
            return div;
        }}
        document.getElementById('chat-form').addEventListener('submit', async (event) => {{
            event.preventDefault();
            const input = document.getElementById('message');
            const text = input.value;
            if (!text.trim()) {{ return; }}
            input.value = '';
            append('You', text);
            const response = await fetch('/chat', {{
                method: 'POST',
                body: new URLSearchParams({{ message: text }}),
            }});
            if (response.status === 401) {{
                window.location.href = '/login';
                return;
            }}
            const data = await response.json();
            const div = append('Assistant', data.reply || (data.error && data.error.message) || '');
            if (data.image_url) {{
                const img = document.createElement('img');
                img.src = data.image_url;
                img.style.maxWidth = '100%';
                div.appendChild(document.createElement('br'));
                div.appendChild(img);
            }}
        }});
    </script>
</body>
</html>
"#,
        user_id = escape_html(user_id),
        messages = messages
    )
}
