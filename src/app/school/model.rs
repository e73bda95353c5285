//! 学校数据模型与校验规则

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidateEmail, ValidateUrl, ValidationError};

/// 学校记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct School {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub contact: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub email_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// 新建学校的字段，不包含 id 和时间戳
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct NewSchool {
    #[validate(length(min = 2, message = "School name must be at least 2 characters"))]
    pub name: String,

    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address: String,

    #[validate(length(min = 2, message = "City must be at least 2 characters"))]
    pub city: String,

    #[validate(length(min = 2, message = "State must be at least 2 characters"))]
    pub state: String,

    #[validate(custom(function = "validate_contact"))]
    pub contact: String,

    #[validate(custom(function = "validate_email_address"))]
    pub email_id: String,

    #[serde(default)]
    #[validate(custom(function = "validate_image"))]
    pub image: Option<String>,
}

/// 部分更新，只有出现的字段会被校验和合并
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SchoolUpdate {
    #[validate(length(min = 2, message = "School name must be at least 2 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address: Option<String>,

    #[validate(length(min = 2, message = "City must be at least 2 characters"))]
    pub city: Option<String>,

    #[validate(length(min = 2, message = "State must be at least 2 characters"))]
    pub state: Option<String>,

    #[validate(custom(function = "validate_contact"))]
    pub contact: Option<String>,

    #[validate(custom(function = "validate_email_address"))]
    pub email_id: Option<String>,

    /// `Some("")` 表示移除图片
    #[validate(custom(function = "validate_image"))]
    pub image: Option<String>,
}

/// 联系电话必须是 10 位数字
pub fn validate_contact(contact: &str) -> Result<(), ValidationError> {
    if contact.len() == 10 && contact.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("contact")
            .with_message(Cow::Borrowed("Contact must be a valid 10-digit number")))
    }
}

/// 邮箱地址：语法合法，且域名带点、顶级域名至少两个字母
pub fn validate_email_address(email: &str) -> Result<(), ValidationError> {
    let has_tld = email
        .rsplit_once('@')
        .and_then(|(_, domain)| domain.rsplit_once('.'))
        .is_some_and(|(host, tld)| {
            !host.is_empty() && tld.len() >= 2 && tld.bytes().all(|b| b.is_ascii_alphabetic())
        });

    if has_tld && email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::new("email")
            .with_message(Cow::Borrowed("Please enter a valid email address")))
    }
}

/// 图片地址可以为空，非空时必须是合法 URL
pub fn validate_image(image: &str) -> Result<(), ValidationError> {
    if image.is_empty() || image.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url")
            .with_message(Cow::Borrowed("Please enter a valid image URL")))
    }
}

/// 空字符串视为没有图片
pub fn normalize_image(image: Option<String>) -> Option<String> {
    image.filter(|url| !url.is_empty())
}

impl School {
    /// 用新建字段和分配好的 id、时间戳构造记录
    pub fn from_new(fields: NewSchool, id: Uuid, now: String) -> Self {
        Self {
            id,
            name: fields.name,
            address: fields.address,
            city: fields.city,
            state: fields.state,
            contact: fields.contact,
            image: normalize_image(fields.image),
            email_id: fields.email_id,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// 把部分字段合并到当前记录上，不处理时间戳
    pub fn merge(&mut self, update: SchoolUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(city) = update.city {
            self.city = city;
        }
        if let Some(state) = update.state {
            self.state = state;
        }
        if let Some(contact) = update.contact {
            self.contact = contact;
        }
        if let Some(email_id) = update.email_id {
            self.email_id = email_id;
        }
        if let Some(image) = update.image {
            self.image = normalize_image(Some(image));
        }
    }
}
