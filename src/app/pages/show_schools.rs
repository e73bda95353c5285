//! 学校列表与搜索

use std::fmt::Write;

use axum::{
    extract::{Query, State},
    response::Html,
};

use super::layout::{escape, page};
use crate::app::school::{
    filter::{filter_schools, normalize_term},
    handler::SearchQuery,
    model::School,
};
use crate::app::AppState;
use crate::core::error::CoreError;

pub const EMPTY_WITH_SEARCH: &str = "Try adjusting your search terms";
pub const EMPTY_WITHOUT_SEARCH: &str = "Be the first to add a school!";

/// "1 school found" / "3 schools found"
pub fn count_label(count: usize) -> String {
    format!("{} {} found", count, if count == 1 { "school" } else { "schools" })
}

fn render_card(out: &mut String, school: &School) {
    out.push_str("<article class=\"school\">");
    match &school.image {
        Some(url) => {
            let _ = write!(out, "<img src=\"{}\" alt=\"{}\">", escape(url), escape(&school.name));
        }
        None => out.push_str("<div class=\"placeholder\"></div>"),
    }
    let _ = write!(
        out,
        "<div class=\"body\"><h3>{name}</h3><p>{address}</p><p>{city}, {state}</p>\
         <p><a href=\"tel:{contact}\">{contact}</a></p>\
         <p><a href=\"mailto:{email}\">{email}</a></p></div></article>\n",
        name = escape(&school.name),
        address = escape(&school.address),
        city = escape(&school.city),
        state = escape(&school.state),
        contact = escape(&school.contact),
        email = escape(&school.email_id),
    );
}

/// 渲染列表页
pub fn render_listing(schools: &[School], search: Option<&str>) -> String {
    let term = normalize_term(search);
    let filtered = filter_schools(schools, term);

    let mut body = String::from("<h1>Schools Directory</h1>\n");
    let _ = write!(
        body,
        "<form method=\"get\" action=\"/show-schools\">\
         <input type=\"search\" name=\"search\" placeholder=\"Search by name, city or state...\" value=\"{}\">\
         <button type=\"submit\">Search</button></form>\n",
        escape(search.unwrap_or_default())
    );
    let _ = writeln!(body, "<p><span class=\"badge\">{}</span></p>", count_label(filtered.len()));

    if filtered.is_empty() {
        let hint = if term.is_some() {
            EMPTY_WITH_SEARCH
        } else {
            EMPTY_WITHOUT_SEARCH
        };
        let _ = write!(
            body,
            "<div class=\"empty\"><h3>No schools found</h3><p>{}</p>\
             <p><a class=\"badge\" href=\"/add-school\">Add School</a></p></div>",
            hint
        );
    } else {
        body.push_str("<div class=\"grid\">\n");
        for school in filtered {
            render_card(&mut body, school);
        }
        body.push_str("</div>");
    }

    page("Schools", None, None, &body)
}

pub async fn show_schools(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Html<String>, CoreError> {
    let schools = state.with_store(|store| store.list()).await?;
    Ok(Html(render_listing(&schools, query.search.as_deref())))
}
