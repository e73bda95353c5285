//! 页面公共部分：外壳、通知条、HTML 转义

use std::fmt::Write;

/// 通知条类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// 页面顶部的通知
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// 延迟跳转
#[derive(Debug, Clone)]
pub struct Refresh {
    pub seconds: u64,
    pub to: String,
}

impl Refresh {
    /// 毫秒向上取整到秒，meta refresh 只认整数秒
    pub fn after_ms(ms: u64, to: impl Into<String>) -> Self {
        Self {
            seconds: ms.div_ceil(1000),
            to: to.into(),
        }
    }
}

/// 转义用户输入，防止注入 HTML
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

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; background: #f5f8ff; color: #1f2937; }
    header { background: #fff; border-bottom: 1px solid #e5e7eb; padding: 16px 32px; display: flex; gap: 24px; align-items: center; }
    header a { color: #2563eb; text-decoration: none; }
    main { max-width: 1100px; margin: 0 auto; padding: 32px; }
    .notice { padding: 12px 16px; border-radius: 8px; margin-bottom: 24px; }
    .notice.success { background: #dcfce7; color: #166534; }
    .notice.error { background: #fee2e2; color: #991b1b; }
    form.card { background: #fff; border-radius: 12px; padding: 24px; max-width: 640px; margin: 0 auto; box-shadow: 0 8px 24px rgba(0,0,0,.06); }
    .field { margin-bottom: 16px; }
    .field label { display: block; font-weight: 600; margin-bottom: 4px; }
    .field input { width: 100%; padding: 8px; border: 1px solid #d1d5db; border-radius: 6px; box-sizing: border-box; }
    .field-error { color: #ef4444; font-size: 0.875rem; margin: 4px 0 0; }
    .badge { display: inline-block; background: #dbeafe; color: #1e40af; border-radius: 999px; padding: 4px 12px; }
    .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 24px; margin-top: 24px; }
    .school { background: #fff; border-radius: 12px; overflow: hidden; box-shadow: 0 4px 12px rgba(0,0,0,.05); }
    .school img { width: 100%; height: 160px; object-fit: cover; }
    .school .placeholder { height: 160px; background: linear-gradient(135deg, #dbeafe, #d1fae5); }
    .school .body { padding: 16px; }
    .empty { text-align: center; padding: 64px 0; color: #6b7280; }
"#;

/// 渲染完整页面
pub fn page(title: &str, notice: Option<&Notice>, refresh: Option<&Refresh>, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
    );
    if let Some(refresh) = refresh {
        let _ = writeln!(
            html,
            "<meta http-equiv=\"refresh\" content=\"{}; url={}\">",
            refresh.seconds,
            escape(&refresh.to)
        );
    }
    let _ = writeln!(html, "<title>{} | School Directory</title>", escape(title));
    let _ = writeln!(html, "<style>{}</style>\n</head>\n<body>", STYLE);
    html.push_str(
        "<header><strong>School Directory</strong>\
         <a href=\"/\">Home</a><a href=\"/show-schools\">Schools</a>\
         <a href=\"/add-school\">Add School</a></header>\n<main>\n",
    );
    if let Some(notice) = notice {
        let class = match notice.kind {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        };
        let _ = writeln!(
            html,
            "<div class=\"notice {}\" role=\"status\">{}</div>",
            class,
            escape(&notice.text)
        );
    }
    html.push_str(body);
    html.push_str("\n</main>\n</body>\n</html>\n");
    html
}
