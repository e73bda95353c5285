//! 首页

use axum::{extract::State, response::Html};

use super::layout::{page, Refresh};
use crate::app::AppState;

pub fn render_landing(redirect_seconds: u64) -> String {
    let refresh = Refresh {
        seconds: redirect_seconds,
        to: "/show-schools".to_string(),
    };
    let body = format!(
        r#"<section style="text-align:center;padding:48px 0">
<h1>Find the right school</h1>
<p>Browse schools in the directory or register a new one.</p>
<p><a class="badge" href="/show-schools">Browse Schools</a> <a class="badge" href="/add-school">Add a School</a></p>
<p class="redirect-note">Taking you to the school list in {} seconds&hellip;</p>
</section>"#,
        redirect_seconds
    );
    page("Welcome", None, Some(&refresh), &body)
}

pub async fn landing(State(state): State<AppState>) -> Html<String> {
    Html(render_landing(state.ui.landing_redirect_seconds))
}
