//! 学校注册表单

use std::fmt::Write;
use std::time::Duration;

use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info};
use validator::Validate;

use super::layout::{escape, page, Notice, Refresh};
use crate::app::school::model::NewSchool;
use crate::app::AppState;
use crate::core::error::{field_errors, CoreError, FieldErrors};

/// 表单按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    UploadImage,
}

/// 表单原始输入，所有字段都按字符串接收以便原样回填
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SchoolForm {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    pub email_id: String,
    pub image: String,
    /// 按钮原始值，未知值按提交处理
    pub action: Option<String>,
}

impl SchoolForm {
    pub fn action(&self) -> FormAction {
        match self.action.as_deref() {
            Some("upload_image") => FormAction::UploadImage,
            _ => FormAction::Submit,
        }
    }

    pub fn to_new_school(&self) -> NewSchool {
        NewSchool {
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            contact: self.contact.clone(),
            email_id: self.email_id.clone(),
            image: Some(self.image.clone()),
        }
    }
}

struct FormField {
    name: &'static str,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
}

const FIELDS: [FormField; 7] = [
    FormField { name: "name", label: "School Name *", input_type: "text", placeholder: "Enter school name" },
    FormField { name: "address", label: "Address *", input_type: "text", placeholder: "Enter complete address" },
    FormField { name: "city", label: "City *", input_type: "text", placeholder: "Enter city" },
    FormField { name: "state", label: "State *", input_type: "text", placeholder: "Enter state" },
    FormField { name: "contact", label: "Contact Number *", input_type: "tel", placeholder: "Enter 10-digit number" },
    FormField { name: "email_id", label: "Email Address *", input_type: "email", placeholder: "Enter email address" },
    FormField { name: "image", label: "School Image URL", input_type: "url", placeholder: "https://example.com/school.jpg" },
];

fn field_value<'a>(form: &'a SchoolForm, name: &str) -> &'a str {
    match name {
        "name" => &form.name,
        "address" => &form.address,
        "city" => &form.city,
        "state" => &form.state,
        "contact" => &form.contact,
        "email_id" => &form.email_id,
        "image" => &form.image,
        _ => "",
    }
}

/// 渲染表单页面，带回填值和字段错误
pub fn render_form(
    form: &SchoolForm,
    errors: &FieldErrors,
    notice: Option<&Notice>,
    refresh: Option<&Refresh>,
) -> String {
    let mut body = String::from(
        "<h1>Add New School</h1>\n<p>Register a new school in our directory</p>\n\
         <form class=\"card\" method=\"post\" action=\"/add-school\" novalidate>\n",
    );

    for field in &FIELDS {
        let _ = write!(
            body,
            "<div class=\"field\"><label for=\"{name}\">{label}</label>\
             <input id=\"{name}\" name=\"{name}\" type=\"{ty}\" placeholder=\"{ph}\" value=\"{value}\">",
            name = field.name,
            label = field.label,
            ty = field.input_type,
            ph = field.placeholder,
            value = escape(field_value(form, field.name)),
        );
        if let Some(messages) = errors.get(field.name) {
            for message in messages {
                let _ = write!(
                    body,
                    "<p class=\"field-error\" data-field=\"{}\">{}</p>",
                    field.name,
                    escape(message)
                );
            }
        }
        body.push_str("</div>\n");
    }

    body.push_str(
        "<p><button type=\"submit\" name=\"action\" value=\"upload_image\" formnovalidate>Upload image</button></p>\n\
         <p><button type=\"submit\" name=\"action\" value=\"submit\">Add School</button></p>\n\
         </form>\n",
    );

    page("Add School", notice, refresh, &body)
}

pub async fn show_form() -> Html<String> {
    Html(render_form(&SchoolForm::default(), &FieldErrors::new(), None, None))
}

pub async fn submit_form(State(state): State<AppState>, Form(mut form): Form<SchoolForm>) -> Response {
    if form.action() == FormAction::UploadImage {
        // 不上传任何文件，直接填入占位图片
        form.image = state.ui.placeholder_image_url.clone();
        let notice = Notice::success("Image uploaded successfully!");
        return Html(render_form(&form, &FieldErrors::new(), Some(&notice), None)).into_response();
    }

    let fields = form.to_new_school();
    if let Err(errors) = fields.validate() {
        let errors = field_errors(&errors);
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(render_form(&form, &errors, None, None)),
        )
            .into_response();
    }

    tokio::time::sleep(Duration::from_millis(state.ui.submit_delay_ms)).await;

    let added = state
        .with_store(move |store| store.add(fields))
        .await
        .and_then(|result| result.map_err(CoreError::from));

    match added {
        Ok(school) => {
            info!("通过表单添加学校: {} ({})", school.name, school.id);
            let notice = Notice::success("School added successfully!");
            let refresh = Refresh::after_ms(state.ui.success_redirect_ms, "/show-schools");
            Html(render_form(
                &SchoolForm::default(),
                &FieldErrors::new(),
                Some(&notice),
                Some(&refresh),
            ))
            .into_response()
        }
        Err(e) => {
            error!("Error adding school: {:?}", e);
            let notice = Notice::error("Failed to add school. Please try again.");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_form(&form, &FieldErrors::new(), Some(&notice), None)),
            )
                .into_response()
        }
    }
}
