//! 服务端渲染页面：首页、注册表单、列表

pub mod add_school;
pub mod landing;
pub mod layout;
pub mod show_schools;
