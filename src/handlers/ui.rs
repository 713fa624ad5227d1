use axum::{response::Html, routing::get, Router};

pub fn ui_routes() -> Router {
    Router::new()
        .route("/", get(chat_page))
        .route("/chat", get(chat_page))
}

pub async fn chat_page() -> Html<&'static str> {
    Html(CHAT_PAGE)
}

const CHAT_PAGE: &str = r###"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>YouTube Chatbot</title>
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: #0f1419;
            color: #e8e8e8;
            min-height: 100vh;
            display: flex;
            justify-content: center;
        }
        .app { width: 100%; max-width: 820px; padding: 24px; }
        h1 { color: #ff0000; margin-bottom: 16px; }
        .row { display: flex; gap: 8px; }
        input {
            flex: 1;
            padding: 12px;
            border-radius: 8px;
            border: 1px solid #2d3748;
            background: #1a202c;
            color: #e8e8e8;
        }
        button {
            padding: 12px 18px;
            border: none;
            border-radius: 8px;
            background: #ff0000;
            color: white;
            font-weight: 600;
            cursor: pointer;
        }
        button:disabled { opacity: 0.5; cursor: not-allowed; }
        .error-msg { color: #fc8181; margin-top: 8px; min-height: 1.2em; }
        .video-title { margin: 16px 0 8px; color: #a0aec0; }
        .chat-window {
            height: 60vh;
            overflow-y: auto;
            padding: 12px;
            border-radius: 8px;
            background: #1a202c;
            margin-bottom: 12px;
        }
        .message-bubble { max-width: 80%; padding: 10px 14px; border-radius: 12px; margin: 6px 0; white-space: pre-wrap; }
        .message-bubble.user { margin-left: auto; background: #2b6cb0; }
        .message-bubble.bot { margin-right: auto; background: #2d3748; }
        .message-bubble time { display: block; font-size: 0.7em; opacity: 0.6; margin-top: 4px; }
        .typing { color: #a0aec0; font-style: italic; }
        .hidden { display: none; }
    </style>
</head>
<body>
<div class="app">
    <h1>YouTube Chatbot</h1>

    <form id="video-form" class="row">
        <input id="video-url" type="text" placeholder="Enter YouTube video URL" autocomplete="off">
        <button id="video-submit" type="submit">Process Video</button>
    </form>
    <p id="video-error" class="error-msg"></p>

    <section id="chat" class="hidden">
        <p id="video-title" class="video-title"></p>
        <div id="chat-window" class="chat-window"></div>
        <form id="chat-form" class="row">
            <input id="question" type="text" placeholder="Ask something about the video..." autocomplete="off">
            <button id="send" type="submit">Send</button>
        </form>
    </section>
</div>

<script>
    const $ = (id) => document.getElementById(id);

    async function call(method, path, body) {
        const res = await fetch(path, {
            method,
            headers: { 'Content-Type': 'application/json' },
            body: body ? JSON.stringify(body) : undefined,
        });
        let data = {};
        try { data = await res.json(); } catch (_) {}
        return { ok: res.ok, data };
    }

    function render(state) {
        const processing = state.submission.state === 'processing';
        $('video-submit').disabled = processing;
        $('video-submit').textContent = processing ? 'Processing...' : 'Process Video';
        $('video-error').textContent = state.submission.state === 'failed' ? state.submission.message : '';

        if (!state.session) {
            $('chat').classList.add('hidden');
            return;
        }
        $('chat').classList.remove('hidden');
        $('video-title').textContent = state.session.title + ' (' + state.session.video_id + ')';

        const win = $('chat-window');
        win.innerHTML = '';
        for (const msg of state.messages) {
            const bubble = document.createElement('div');
            bubble.className = 'message-bubble ' + msg.role;
            const text = document.createElement('p');
            text.textContent = msg.content;
            const time = document.createElement('time');
            time.textContent = new Date(msg.timestamp).toLocaleTimeString();
            bubble.append(text, time);
            win.appendChild(bubble);
        }
        if (state.pending) {
            const typing = document.createElement('p');
            typing.className = 'typing';
            typing.textContent = 'Thinking...';
            win.appendChild(typing);
        }
        win.scrollTop = win.scrollHeight;

        $('send').disabled = state.pending;
        $('question').disabled = state.pending;
    }

    $('video-form').addEventListener('submit', async (e) => {
        e.preventDefault();
        $('video-submit').disabled = true;
        $('video-submit').textContent = 'Processing...';
        const { data } = await call('POST', '/api/videos', { url: $('video-url').value });
        if (data.state) render(data.state);
        if (data.error) $('video-error').textContent = data.error;
    });

    $('chat-form').addEventListener('submit', async (e) => {
        e.preventDefault();
        const question = $('question').value;
        if (!question.trim()) return;
        $('question').value = '';
        $('send').disabled = true;
        $('question').disabled = true;
        const bubble = document.createElement('div');
        bubble.className = 'message-bubble user';
        bubble.textContent = question.trim();
        $('chat-window').appendChild(bubble);
        const { data } = await call('POST', '/api/messages', { question });
        if (data.state) render(data.state);
        $('question').focus();
    });

    call('GET', '/api/state').then(({ data }) => data.state && render(data.state));
</script>
</body>
</html>
"###;
